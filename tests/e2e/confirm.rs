use chrono::{Duration, Utc};
use weather_web::e2e::generate::generate_uuid;
use weather_web::e2e::pages::{BasePage, ConfirmationPage};
use weather_web::e2e::{Context, Subscription, User};

use crate::helpers::{back_to_main_page, browser, settings};

#[tokio::test]
#[ignore = "needs a deployed application, BASE_URL and DB_URL"]
async fn a_pending_subscription_is_confirmed_by_its_token() {
    let settings = settings();
    let user = User::new().with_subscription(Subscription::new("Kyiv"));
    let token = user.subscriptions[0].confirm_token.clone();
    let mut browser = browser(&settings);

    Context::new(&settings, vec![user])
        .run_scenario(async move {
            let page = ConfirmationPage::confirmation();
            page.open(&mut browser, &token).await.unwrap();

            assert!(browser.is_visible(&page.confirmation_text()));
            assert!(browser.is_visible(&page.link_to_main_page()));
            assert_eq!(
                browser.text(&page.confirmation_text()).as_deref(),
                Some("Subscription confirmed ✅")
            );
            let toast = page.toast_alert();
            assert_eq!(browser.text(&toast).as_deref(), Some("Subscription confirmed!"));
            assert!(browser.has_class(&toast, "alert-success"));

            back_to_main_page(&mut browser, &page).await;
        })
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "needs a deployed application, BASE_URL and DB_URL"]
async fn used_and_unknown_tokens_are_not_confirmed() {
    let settings = settings();
    let user = User::new().with_subscription(Subscription::new("Kyiv").confirmed());
    let test_cases = [
        ("already used token", user.subscriptions[0].confirm_token.clone()),
        ("invalid token", generate_uuid()),
    ];
    let mut browser = browser(&settings);

    Context::new(&settings, vec![user])
        .run_scenario(async move {
            let page = ConfirmationPage::confirmation();
            for (name, token) in test_cases {
                page.open(&mut browser, &token).await.unwrap();

                assert_eq!(
                    browser.text(&page.confirmation_text()).as_deref(),
                    Some("Confirmation failed ❌"),
                    "Confirmed with {name}"
                );
                let toast = page.toast_alert();
                assert!(
                    browser
                        .text(&toast)
                        .is_some_and(|text| text.starts_with("Confirmation failed")),
                    "No failure toast for {name}"
                );
                assert!(browser.has_class(&toast, "alert-error"));

                back_to_main_page(&mut browser, &page).await;
            }
        })
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "needs a deployed application, BASE_URL and DB_URL"]
async fn an_expired_token_is_not_confirmed() {
    let settings = settings();
    let user = User::new().with_subscription(
        Subscription::new("Kyiv").token_expires(Utc::now() - Duration::minutes(1)),
    );
    let token = user.subscriptions[0].confirm_token.clone();
    let mut browser = browser(&settings);

    Context::new(&settings, vec![user])
        .run_scenario(async move {
            let page = ConfirmationPage::confirmation();
            page.open(&mut browser, &token).await.unwrap();

            assert_eq!(
                browser.text(&page.confirmation_text()).as_deref(),
                Some("Confirmation failed ❌")
            );
            let toast = page.toast_alert();
            assert_eq!(
                browser.text(&toast).as_deref(),
                Some("Confirmation failed: Invalid token")
            );
            assert!(browser.has_class(&toast, "alert-error"));
        })
        .await
        .unwrap();
}
