mod city;
mod confirmation_token;
mod frequency;
mod subscribe_request;
mod subscriber_email;
mod weather;

pub use city::City;
pub use confirmation_token::ConfirmationToken;
pub use frequency::Frequency;
pub use subscribe_request::SubscribeRequest;
pub use subscriber_email::SubscriberEmail;
pub use weather::Weather;
