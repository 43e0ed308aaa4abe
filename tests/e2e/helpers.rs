use once_cell::sync::Lazy;
use weather_web::e2e::pages::{MainPage, TokenResultPage};
use weather_web::e2e::{Browser, E2eSettings};
use weather_web::telemetry::{get_subscriber, init_subscriber};

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "e2e".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub fn settings() -> E2eSettings {
    Lazy::force(&TRACING);
    E2eSettings::load().expect("Failed to read e2e settings")
}

pub fn browser(settings: &E2eSettings) -> Browser {
    Browser::new(settings.base_url.clone()).expect("Failed to build browser")
}

/// Follows the result page's link home and checks the main page is usable.
pub async fn back_to_main_page(browser: &mut Browser, page: &TokenResultPage) {
    let main_page = MainPage::default();
    browser.click(&page.link_to_main_page()).await.unwrap();
    assert!(browser.contains_text("Kyiv"));
    assert!(browser.is_visible(&main_page.subscribe_button()));
}
