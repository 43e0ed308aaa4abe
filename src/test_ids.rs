//! Stable `data-testid` values shared by the templates and the page objects.
//!
//! Templates receive [`TEST_IDS`] as `ids` in their context, page objects
//! read the same constants, so markup changes never break element lookup.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MainPageIds {
    pub search_input: &'static str,
    pub search_button: &'static str,
    pub temp_value: &'static str,
    pub humidity_value: &'static str,
    pub description_value: &'static str,
    pub subscribe_button: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubscribeDialogIds {
    pub dialog: &'static str,
    pub city_input: &'static str,
    pub email_input: &'static str,
    pub frequency_select: &'static str,
    pub subscribe_button: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ResultPageIds {
    pub confirmation: &'static str,
    pub link_to_main_page: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct TestIds {
    pub main: MainPageIds,
    pub subscribe_dialog: SubscribeDialogIds,
    pub confirm: ResultPageIds,
    pub unsubscribe: ResultPageIds,
}

pub const MAIN_PAGE_IDS: MainPageIds = MainPageIds {
    search_input: "weather-search-input",
    search_button: "weather-search-button",
    temp_value: "weather-temp-value",
    humidity_value: "weather-humidity-value",
    description_value: "weather-description",
    subscribe_button: "weather-subscribe-btn",
};

pub const SUBSCRIBE_DIALOG_IDS: SubscribeDialogIds = SubscribeDialogIds {
    dialog: "subscription-dialog",
    city_input: "subscription-city-input",
    email_input: "subscription-email-input",
    frequency_select: "subscription-freq-select",
    subscribe_button: "subscription-subscribe-btn",
};

pub const CONFIRM_PAGE_IDS: ResultPageIds = ResultPageIds {
    confirmation: "confirm-result-text",
    link_to_main_page: "confirm-link-to-main",
};

pub const UNSUBSCRIBE_PAGE_IDS: ResultPageIds = ResultPageIds {
    confirmation: "unsubscribe-result-text",
    link_to_main_page: "unsubscribe-link-to-main",
};

pub const TEST_IDS: TestIds = TestIds {
    main: MAIN_PAGE_IDS,
    subscribe_dialog: SUBSCRIBE_DIALOG_IDS,
    confirm: CONFIRM_PAGE_IDS,
    unsubscribe: UNSUBSCRIBE_PAGE_IDS,
};
