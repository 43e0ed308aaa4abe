use weather_web::e2e::pages::{BasePage, MainPage, TokenResultPage};
use weather_web::routes::{CONFIRM_TEXTS, TokenPageTexts, UNSUBSCRIBE_TEXTS};
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{any, method, path, path_regex},
};

use crate::helpers::{TestApp, spawn_app};

async fn mock_token_call(app: &TestApp, route: &str, token: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/{route}/{token}")))
        .respond_with(ResponseTemplate::new(status))
        .expect(1)
        .mount(&app.api_server)
        .await;
}

fn pages() -> [(&'static str, TokenResultPage, TokenPageTexts); 2] {
    [
        ("confirm", TokenResultPage::confirmation(), CONFIRM_TEXTS),
        ("unsubscribe", TokenResultPage::unsubscribe(), UNSUBSCRIBE_TEXTS),
    ]
}

#[tokio::test]
async fn a_valid_token_shows_the_success_state() {
    let app = spawn_app().await;

    for (route, page, texts) in pages() {
        let token = format!("{route}-valid-token");
        mock_token_call(&app, route, &token, 200).await;
        let mut browser = app.browser();

        page.open(&mut browser, &token).await.unwrap();

        assert_eq!(
            browser.text(&page.confirmation_text()).as_deref(),
            Some(texts.success_text)
        );
        let toast = page.toast_alert();
        assert_eq!(browser.text(&toast).as_deref(), Some(texts.success_toast));
        assert!(browser.has_class(&toast, "alert-success"));
    }
}

#[tokio::test]
async fn a_rejected_token_shows_the_failure_state() {
    let app = spawn_app().await;
    let test_cases = [
        (404, "Token not found"),
        (400, "Invalid token"),
        (500, "Internal Server Error"),
    ];

    for (route, page, texts) in pages() {
        for (status, message) in test_cases {
            let token = format!("{route}-token-{status}");
            mock_token_call(&app, route, &token, status).await;
            let mut browser = app.browser();

            page.open(&mut browser, &token).await.unwrap();

            assert_eq!(
                browser.text(&page.confirmation_text()).as_deref(),
                Some(texts.failure_text)
            );
            assert!(browser.has_class(&page.confirmation_text(), "result-error"));
            let toast = page.toast_alert();
            assert_eq!(
                browser.text(&toast),
                Some(format!("{}: {message}", texts.failure_toast_prefix)),
                "Unexpected toast on {route} when the API answers {status}"
            );
            assert!(browser.has_class(&toast, "alert-error"));
        }
    }
}

#[tokio::test]
async fn already_confirmed_subscriptions_report_a_conflict() {
    let app = spawn_app().await;
    mock_token_call(&app, "confirm", "used-token", 409).await;
    let page = TokenResultPage::confirmation();
    let mut browser = app.browser();

    page.open(&mut browser, "used-token").await.unwrap();

    assert_eq!(
        browser.text(&page.toast_alert()).as_deref(),
        Some("Confirmation failed: Email already subscribed")
    );
}

#[tokio::test]
async fn unusual_tokens_are_forwarded_to_the_api() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path_regex("^/api/v1/unsubscribe/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(2)
        .mount(&app.api_server)
        .await;
    let page = TokenResultPage::unsubscribe();

    for token in ["a".repeat(65), "abc(def)".to_string()] {
        let mut browser = app.browser();

        page.open(&mut browser, &token).await.unwrap();

        assert_eq!(
            browser.text(&page.confirmation_text()).as_deref(),
            Some(UNSUBSCRIBE_TEXTS.failure_text)
        );
        assert_eq!(
            browser.text(&page.toast_alert()).as_deref(),
            Some("Unsubscribe failed: Token not found"),
            "Unexpected toast for token {token}"
        );
    }
}

#[tokio::test]
async fn a_blank_token_never_reaches_the_api() {
    let app = spawn_app().await;
    Mock::given(any())
        .and(path_regex("^/api/v1/confirm/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.api_server)
        .await;
    let page = TokenResultPage::confirmation();
    let mut browser = app.browser();

    page.open(&mut browser, "%20").await.unwrap();

    assert_eq!(
        browser.text(&page.confirmation_text()).as_deref(),
        Some(CONFIRM_TEXTS.failure_text)
    );
    assert_eq!(
        browser.text(&page.toast_alert()).as_deref(),
        Some("Confirmation failed: Invalid token")
    );
}

#[tokio::test]
async fn an_expired_token_is_rejected_by_the_api() {
    let app = spawn_app().await;
    mock_token_call(&app, "confirm", "expired-token", 400).await;
    let page = TokenResultPage::confirmation();
    let mut browser = app.browser();

    page.open(&mut browser, "expired-token").await.unwrap();

    assert_eq!(
        browser.text(&page.confirmation_text()).as_deref(),
        Some(CONFIRM_TEXTS.failure_text)
    );
    let toast = page.toast_alert();
    assert_eq!(
        browser.text(&toast).as_deref(),
        Some("Confirmation failed: Invalid token")
    );
    assert!(browser.has_class(&toast, "alert-error"));
}

#[tokio::test]
async fn the_result_page_links_back_to_the_main_page() {
    let app = spawn_app().await;
    mock_token_call(&app, "unsubscribe", "some-token", 200).await;
    let page = TokenResultPage::unsubscribe();
    let main_page = MainPage::default();
    let mut browser = app.browser();
    page.open(&mut browser, "some-token").await.unwrap();

    browser.click(&page.link_to_main_page()).await.unwrap();

    assert_eq!(browser.url().unwrap().path(), "/");
    assert_eq!(browser.text(&main_page.temp_value()).as_deref(), Some("18°C"));
}
