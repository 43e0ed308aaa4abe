//! End-to-end harness: seeds the database around a scenario and drives the
//! rendered pages through a small HTML browser.
//!
//! A scenario builds [`models::User`]s with their subscriptions, hands them to
//! a [`context::Context`], and talks to the running application through
//! [`browser::Browser`] and the page objects in [`pages`].

pub mod browser;
pub mod context;
pub mod db_client;
pub mod generate;
pub mod models;
pub mod pages;
pub mod settings;

pub use browser::{Browser, Locator};
pub use context::Context;
pub use db_client::{DatabaseClient, DbClientError};
pub use models::{Subscription, User};
pub use settings::E2eSettings;
