//! Page objects: where things are on each page and the few multi-step
//! interactions scenarios repeat.

use super::browser::{Browser, BrowserError, Locator};
use crate::domain::Frequency;
use crate::routes::PAGE_TITLE;
use crate::test_ids::{
    CONFIRM_PAGE_IDS, MAIN_PAGE_IDS, ResultPageIds, SUBSCRIBE_DIALOG_IDS, UNSUBSCRIBE_PAGE_IDS,
};

/// Elements every page shares.
pub trait BasePage {
    fn toast_alert(&self) -> Locator {
        Locator::role("alert")
    }
}

fn ensure(condition: bool, message: impl FnOnce() -> String) -> Result<(), BrowserError> {
    if condition {
        Ok(())
    } else {
        Err(BrowserError::Expectation(message()))
    }
}

#[derive(Debug, Clone)]
pub struct MainPage {
    default_city: String,
    pub sub_dialog: SubscribeDialog,
}

impl Default for MainPage {
    fn default() -> Self {
        Self::new("Kyiv")
    }
}

impl BasePage for MainPage {}

impl MainPage {
    pub fn new(default_city: impl Into<String>) -> Self {
        Self {
            default_city: default_city.into(),
            sub_dialog: SubscribeDialog,
        }
    }

    pub fn search_input(&self) -> Locator {
        Locator::test_id(MAIN_PAGE_IDS.search_input).descendant("input")
    }

    pub fn search_button(&self) -> Locator {
        Locator::test_id(MAIN_PAGE_IDS.search_button)
    }

    pub fn search_error(&self) -> Locator {
        Locator::test_id(MAIN_PAGE_IDS.search_input).descendant(".field-error")
    }

    pub fn temp_value(&self) -> Locator {
        Locator::test_id(MAIN_PAGE_IDS.temp_value)
    }

    pub fn humidity_value(&self) -> Locator {
        Locator::test_id(MAIN_PAGE_IDS.humidity_value)
    }

    pub fn description_value(&self) -> Locator {
        Locator::test_id(MAIN_PAGE_IDS.description_value)
    }

    pub fn subscribe_button(&self) -> Locator {
        Locator::test_id(MAIN_PAGE_IDS.subscribe_button)
    }

    /// Opens `/` and waits for the default city's page to be usable.
    pub async fn load_main_page(&self, browser: &mut Browser) -> Result<(), BrowserError> {
        browser.goto("/").await?;

        let title = browser.title().unwrap_or_default();
        ensure(title == PAGE_TITLE, || {
            format!("Expected title `{PAGE_TITLE}`, got `{title}`")
        })?;
        ensure(browser.contains_text(&self.default_city), || {
            format!("`{}` is not shown on the main page", self.default_city)
        })?;
        ensure(browser.is_visible(&self.subscribe_button()), || {
            "The subscribe button is not visible".to_string()
        })
    }

    pub async fn search(&self, browser: &mut Browser, city: &str) -> Result<(), BrowserError> {
        browser.fill(&self.search_input(), city)?;
        browser.click(&self.search_button()).await
    }

    pub async fn open_subscribe_dialog(&self, browser: &mut Browser) -> Result<(), BrowserError> {
        browser.click(&self.subscribe_button()).await?;
        ensure(browser.is_visible(&self.sub_dialog.dialog()), || {
            "The subscribe dialog did not open".to_string()
        })
    }
}

/// What to type into the subscribe dialog. `frequency` is an option label;
/// `None` keeps "Every day".
#[derive(Debug, Clone, Copy)]
pub struct SubscribeOptions<'a> {
    pub city: &'a str,
    pub email: &'a str,
    pub frequency: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SubscribeDialog;

impl BasePage for SubscribeDialog {}

impl SubscribeDialog {
    pub fn dialog(&self) -> Locator {
        Locator::test_id(SUBSCRIBE_DIALOG_IDS.dialog)
    }

    pub fn city_input(&self) -> Locator {
        Locator::test_id(SUBSCRIBE_DIALOG_IDS.city_input).descendant("input")
    }

    pub fn email_input(&self) -> Locator {
        Locator::test_id(SUBSCRIBE_DIALOG_IDS.email_input).descendant("input")
    }

    pub fn frequency_select(&self) -> Locator {
        Locator::test_id(SUBSCRIBE_DIALOG_IDS.frequency_select)
    }

    pub fn subscribe_button(&self) -> Locator {
        Locator::test_id(SUBSCRIBE_DIALOG_IDS.subscribe_button)
    }

    pub fn city_error(&self) -> Locator {
        Locator::test_id(SUBSCRIBE_DIALOG_IDS.city_input).descendant(".field-error")
    }

    pub fn email_error(&self) -> Locator {
        Locator::test_id(SUBSCRIBE_DIALOG_IDS.email_input).descendant(".field-error")
    }

    /// Fills the open dialog and submits it.
    pub async fn subscribe(
        &self,
        browser: &mut Browser,
        options: SubscribeOptions<'_>,
    ) -> Result<(), BrowserError> {
        browser.fill(&self.city_input(), options.city)?;
        browser.fill(&self.email_input(), options.email)?;
        let frequency = options.frequency.unwrap_or(Frequency::Daily.label());
        browser.select_option(&self.frequency_select(), frequency)?;
        browser.click(&self.subscribe_button()).await
    }
}

/// Result page shown after following a confirm or unsubscribe link.
#[derive(Debug, Clone, Copy)]
pub struct TokenResultPage {
    ids: ResultPageIds,
    path_prefix: &'static str,
}

impl BasePage for TokenResultPage {}

impl TokenResultPage {
    pub fn confirmation() -> Self {
        Self {
            ids: CONFIRM_PAGE_IDS,
            path_prefix: "/confirm",
        }
    }

    pub fn unsubscribe() -> Self {
        Self {
            ids: UNSUBSCRIBE_PAGE_IDS,
            path_prefix: "/unsubscribe",
        }
    }

    pub fn confirmation_text(&self) -> Locator {
        Locator::test_id(self.ids.confirmation)
    }

    pub fn link_to_main_page(&self) -> Locator {
        Locator::test_id(self.ids.link_to_main_page)
    }

    pub async fn open(&self, browser: &mut Browser, token: &str) -> Result<(), BrowserError> {
        browser
            .goto(&format!("{}/{token}", self.path_prefix))
            .await
    }
}

pub type ConfirmationPage = TokenResultPage;
pub type UnsubscribePage = TokenResultPage;
