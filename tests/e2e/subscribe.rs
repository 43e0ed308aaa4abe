use weather_web::e2e::pages::{BasePage, MainPage, SubscribeOptions};
use weather_web::e2e::{Context, Subscription, User};
use weather_web::routes::{SUBSCRIBE_FAILED_MESSAGE, SUBSCRIBED_MESSAGE};

use crate::helpers::{browser, settings};

#[tokio::test]
#[ignore = "needs a deployed application, BASE_URL and DB_URL"]
async fn new_and_unconfirmed_users_can_subscribe() {
    let settings = settings();
    let existing_user = User::new().with_subscription(Subscription::new("Kyiv"));
    let mut ctx = Context::new(&settings, vec![existing_user.clone()]);
    let new_user = ctx.create_new_user(None);
    let test_cases = [("Kyiv", new_user.email), ("Kharkiv", existing_user.email)];
    let mut browser = browser(&settings);

    ctx.run_scenario(async move {
        let main_page = MainPage::default();
        for (city, email) in test_cases {
            main_page.load_main_page(&mut browser).await.unwrap();
            main_page.open_subscribe_dialog(&mut browser).await.unwrap();

            main_page
                .sub_dialog
                .subscribe(
                    &mut browser,
                    SubscribeOptions {
                        city,
                        email: &email,
                        frequency: None,
                    },
                )
                .await
                .unwrap();

            let toast = main_page.toast_alert();
            assert_eq!(
                browser.text(&toast).as_deref(),
                Some(SUBSCRIBED_MESSAGE),
                "{email} could not subscribe to {city}"
            );
            assert!(browser.has_class(&toast, "alert-success"));
        }
    })
    .await
    .unwrap();
}

#[tokio::test]
#[ignore = "needs a deployed application, BASE_URL and DB_URL"]
async fn a_confirmed_user_cannot_subscribe_twice() {
    let settings = settings();
    let user = User::new().with_subscription(Subscription::new("Kyiv").confirmed());
    let email = user.email.clone();
    let mut browser = browser(&settings);

    Context::new(&settings, vec![user])
        .run_scenario(async move {
            let main_page = MainPage::default();
            main_page.load_main_page(&mut browser).await.unwrap();
            main_page.open_subscribe_dialog(&mut browser).await.unwrap();
            assert!(browser.is_visible(&main_page.sub_dialog.dialog()));

            main_page
                .sub_dialog
                .subscribe(
                    &mut browser,
                    SubscribeOptions {
                        city: "Kharkiv",
                        email: &email,
                        frequency: None,
                    },
                )
                .await
                .unwrap();

            let toast = main_page.toast_alert();
            assert_eq!(browser.text(&toast).as_deref(), Some(SUBSCRIBE_FAILED_MESSAGE));
            assert!(browser.has_class(&toast, "alert-error"));
        })
        .await
        .unwrap();
}
