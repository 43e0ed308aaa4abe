use weather_web::e2e::pages::{BasePage, MainPage};

use crate::helpers::spawn_app;

#[tokio::test]
async fn main_page_shows_the_default_city_weather() {
    let app = spawn_app().await;
    let main_page = MainPage::default();
    let mut browser = app.browser();

    main_page.load_main_page(&mut browser).await.unwrap();

    assert_eq!(browser.text(&main_page.temp_value()).as_deref(), Some("18°C"));
    assert_eq!(browser.text(&main_page.humidity_value()).as_deref(), Some("55%"));
    assert_eq!(
        browser.text(&main_page.description_value()).as_deref(),
        Some("Cloudy")
    );
    assert!(!browser.is_visible(&main_page.toast_alert()));
}

#[tokio::test]
async fn searching_a_city_shows_its_weather() {
    let app = spawn_app().await;
    app.mock_weather("Poltava", 25.0, 60, "Sunny").await;
    let main_page = MainPage::default();
    let mut browser = app.browser();
    main_page.load_main_page(&mut browser).await.unwrap();

    main_page.search(&mut browser, "Poltava").await.unwrap();

    assert_eq!(browser.text(&main_page.temp_value()).as_deref(), Some("25°C"));
    assert_eq!(browser.text(&main_page.humidity_value()).as_deref(), Some("60%"));
    assert_eq!(
        browser.text(&main_page.description_value()).as_deref(),
        Some("Sunny")
    );
    assert!(browser.contains_text("Description for weather in Poltava"));
}

#[tokio::test]
async fn failed_weather_lookups_show_an_error_toast() {
    let app = spawn_app().await;
    let main_page = MainPage::default();
    let test_cases = [
        ("Atlantis", 404, "City not found"),
        ("Nowhere", 400, "Invalid request"),
        ("Brokenville", 500, "Internal Server Error"),
    ];

    for (city, status, message) in test_cases {
        app.mock_weather_failure(city, status).await;
        let mut browser = app.browser();
        main_page.load_main_page(&mut browser).await.unwrap();

        main_page.search(&mut browser, city).await.unwrap();

        let toast = main_page.toast_alert();
        assert_eq!(
            browser.text(&toast),
            Some(format!("Failed to load weather: {message}")),
            "Unexpected toast when the API answers {status}"
        );
        assert!(browser.has_class(&toast, "alert-error"));
        assert_eq!(browser.text(&main_page.temp_value()).as_deref(), Some("-"));
    }
}

#[tokio::test]
async fn a_blank_search_keeps_the_city_on_screen_and_is_never_looked_up() {
    let app = spawn_app().await;
    app.mock_weather("Poltava", 25.0, 60, "Sunny").await;
    let main_page = MainPage::default();
    let mut browser = app.browser();
    main_page.load_main_page(&mut browser).await.unwrap();
    main_page.search(&mut browser, "Poltava").await.unwrap();

    main_page.search(&mut browser, "   ").await.unwrap();

    assert_eq!(
        browser.text(&main_page.search_error()).as_deref(),
        Some("Field required!")
    );
    assert!(browser.contains_text("Description for weather in Poltava"));
    assert_eq!(browser.text(&main_page.temp_value()).as_deref(), Some("25°C"));
    let blank_lookups = app
        .api_server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|request| {
            request
                .url
                .query_pairs()
                .any(|(key, value)| key == "city" && value.trim().is_empty())
        })
        .count();
    assert_eq!(blank_lookups, 0);
}

#[tokio::test]
async fn city_names_with_punctuation_are_looked_up() {
    let app = spawn_app().await;
    app.mock_weather("Frankfurt (Oder)", 12.5, 70, "Rain").await;
    let main_page = MainPage::default();
    let mut browser = app.browser();
    main_page.load_main_page(&mut browser).await.unwrap();

    main_page.search(&mut browser, "Frankfurt (Oder)").await.unwrap();

    assert_eq!(browser.text(&main_page.temp_value()).as_deref(), Some("12.5°C"));
    assert!(!browser.is_visible(&main_page.search_error()));
}

#[tokio::test]
async fn the_subscribe_dialog_opens_for_the_current_city() {
    let app = spawn_app().await;
    let main_page = MainPage::default();
    let mut browser = app.browser();
    main_page.load_main_page(&mut browser).await.unwrap();
    assert!(!browser.is_visible(&main_page.sub_dialog.dialog()));

    main_page.open_subscribe_dialog(&mut browser).await.unwrap();

    let dialog = &main_page.sub_dialog;
    assert_eq!(browser.input_value(&dialog.city_input()).as_deref(), Some("Kyiv"));
    assert_eq!(browser.input_value(&dialog.email_input()).as_deref(), Some(""));
    assert_eq!(
        browser.input_value(&dialog.frequency_select()).as_deref(),
        Some("daily")
    );
}
