mod health_check;
mod helpers;
mod home;
mod not_found;
mod notifications;
mod subscriptions;
mod subscriptions_confirm;
mod unsubscribe;

pub use health_check::*;
pub use helpers::{PAGE_TITLE, e500, error_chain_fmt, page_context, render_page};
pub use home::*;
pub use not_found::*;
pub use notifications::{Severity, Toast};
pub use subscriptions::*;
pub use subscriptions_confirm::*;
pub use unsubscribe::*;
