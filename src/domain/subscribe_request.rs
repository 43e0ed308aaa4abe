use super::{City, Frequency, SubscriberEmail};

/// Body of `POST /api/v1/subscribe`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SubscribeRequest {
    pub email: String,
    pub city: String,
    pub frequency: Frequency,
}

impl SubscribeRequest {
    pub fn new(email: SubscriberEmail, city: City, frequency: Frequency) -> Self {
        Self {
            email: email.as_ref().to_string(),
            city: city.as_ref().to_string(),
            frequency,
        }
    }
}
