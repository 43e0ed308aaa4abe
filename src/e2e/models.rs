use chrono::{DateTime, Duration, Utc};

use super::generate::{generate_autotest_email, generate_uuid};
use crate::domain::Frequency;

const TOKEN_LIFETIME_MINUTES: i64 = 15;

/// A subscriber row as seeded by the harness.
///
/// `id` stays `None` until the row is inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Option<i64>,
    pub email: String,
    pub subscriptions: Vec<Subscription>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A subscription row. It only records its owner's id, filled in once the
/// owning [`User`] has been inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: Option<i64>,
    pub city: String,
    pub frequency: Frequency,
    pub user_id: Option<i64>,
    pub is_confirmed: bool,
    pub confirm_token: String,
    pub token_expires: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// A user with a generated `autotest_` email and no subscriptions.
    pub fn new() -> Self {
        Self::with_email(generate_autotest_email())
    }

    pub fn with_email(email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            email: email.into(),
            subscriptions: Vec::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn with_subscription(mut self, subscription: Subscription) -> Self {
        self.subscriptions.push(subscription);
        self
    }

    pub fn with_subscriptions(mut self, subscriptions: impl IntoIterator<Item = Subscription>) -> Self {
        self.subscriptions.extend(subscriptions);
        self
    }

    pub fn deleted_at(mut self, at: DateTime<Utc>) -> Self {
        self.deleted_at = Some(at);
        self
    }

    /// Records the database id on the user and on every subscription it owns.
    pub fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
        for subscription in &mut self.subscriptions {
            subscription.user_id = Some(id);
        }
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

impl Subscription {
    /// An unconfirmed daily subscription with a fresh token valid for 15 minutes.
    pub fn new(city: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            city: city.into(),
            frequency: Frequency::default(),
            user_id: None,
            is_confirmed: false,
            confirm_token: generate_uuid(),
            token_expires: now + Duration::minutes(TOKEN_LIFETIME_MINUTES),
            confirmed_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn confirmed(mut self) -> Self {
        self.is_confirmed = true;
        self.confirmed_at = Some(Utc::now());
        self
    }

    pub fn token_expires(mut self, at: DateTime<Utc>) -> Self {
        self.token_expires = at;
        self
    }

    pub fn deleted_at(mut self, at: DateTime<Utc>) -> Self {
        self.deleted_at = Some(at);
        self
    }
}
