use std::future::Future;

use anyhow::Context as _;

use super::db_client::DatabaseClient;
use super::models::{Subscription, User};
use super::settings::E2eSettings;

/// Owns the database rows of one scenario: seeds them on setup and removes
/// them, together with any user created while the scenario ran, on teardown.
pub struct Context {
    settings: E2eSettings,
    db: Option<DatabaseClient>,
    pub users: Vec<User>,
    clean_up_users: Vec<User>,
}

impl Context {
    pub fn new(settings: &E2eSettings, users: Vec<User>) -> Self {
        Self {
            settings: settings.clone(),
            db: None,
            users,
            clean_up_users: Vec::new(),
        }
    }

    /// Connects, inserts every fixture user, then all of their subscriptions.
    #[tracing::instrument(name = "Fixture setup", skip(self), fields(users = self.users.len()))]
    pub async fn perform_setup(&mut self) -> Result<(), anyhow::Error> {
        if self.users.is_empty() {
            return Ok(());
        }

        self.connect_if_needed().await?;
        let db = self
            .db
            .as_mut()
            .context("Fixture database connection is not open.")?;

        db.insert_users(&mut self.users)
            .await
            .context("Failed to insert fixture users.")?;

        let mut subscriptions: Vec<&mut Subscription> = self
            .users
            .iter_mut()
            .flat_map(|user| user.subscriptions.iter_mut())
            .collect();
        db.insert_subscriptions(&mut subscriptions)
            .await
            .context("Failed to insert fixture subscriptions.")?;

        Ok(())
    }

    /// A fresh, unpersisted user that will be removed on teardown, for
    /// scenarios that subscribe through the UI.
    pub fn create_new_user(&mut self, email: Option<&str>) -> User {
        let user = match email {
            Some(email) => User::with_email(email),
            None => User::new(),
        };
        self.clean_up_users.push(user.clone());
        user
    }

    #[tracing::instrument(name = "Fixture cleanup", skip(self))]
    pub async fn cleanup(&mut self) -> Result<(), anyhow::Error> {
        let all_users: Vec<User> = self
            .users
            .iter()
            .chain(self.clean_up_users.iter())
            .cloned()
            .collect();
        if all_users.is_empty() {
            return Ok(());
        }

        self.connect_if_needed().await?;
        let db = self
            .db
            .as_mut()
            .context("Fixture database connection is not open.")?;

        db.cleanup(&all_users)
            .await
            .context("Failed to remove fixture rows.")
    }

    /// Removes every row this context is responsible for and closes the
    /// connection, even when the cleanup itself fails.
    #[tracing::instrument(name = "Fixture teardown", skip(self))]
    pub async fn perform_teardown(mut self) -> Result<(), anyhow::Error> {
        let cleanup = self.cleanup().await;

        if let Some(db) = self.db.take() {
            db.close()
                .await
                .context("Failed to close the fixture database connection.")?;
        }

        cleanup
    }

    /// Seeds the database, runs `scenario` on its own task and tears down
    /// whatever happened. A panicking scenario is re-raised after teardown.
    pub async fn run_scenario<F>(mut self, scenario: F) -> Result<(), anyhow::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Err(e) = self.perform_setup().await {
            if let Err(teardown) = self.perform_teardown().await {
                tracing::error!(
                    error.cause_chain = ?teardown,
                    "Teardown after a failed setup did not complete"
                );
            }
            return Err(e);
        }

        let outcome = tokio::spawn(scenario).await;
        let teardown = self.perform_teardown().await;

        match outcome {
            Ok(()) => teardown,
            Err(e) if e.is_panic() => {
                if let Err(teardown) = teardown {
                    tracing::error!(
                        error.cause_chain = ?teardown,
                        "Teardown after a panicking scenario did not complete"
                    );
                }
                std::panic::resume_unwind(e.into_panic())
            }
            Err(e) => Err(anyhow::Error::from(e).context("Scenario task was cancelled.")),
        }
    }

    async fn connect_if_needed(&mut self) -> Result<(), anyhow::Error> {
        if self.db.is_none() {
            let options = self.settings.db_options()?;
            let db = DatabaseClient::connect(&options)
                .await
                .context("Failed to connect to the fixture database.")?;
            self.db = Some(db);
        }
        Ok(())
    }
}
