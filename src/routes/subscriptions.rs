use actix_web::{HttpResponse, http::StatusCode, web};
use tera::Tera;

use super::home::{DialogErrors, MainPageView, SubscribeDialogView, render_main_page};
use super::notifications::Toast;
use crate::api_client::ApiClient;
use crate::domain::{City, Frequency, SubscribeRequest, SubscriberEmail};
use crate::startup::DefaultCity;

pub const SUBSCRIBED_MESSAGE: &str =
    "Subscription submitted! Check your email for confirmation link!";
pub const SUBSCRIBE_FAILED_MESSAGE: &str = "Failed to subscribe";

#[derive(serde::Deserialize)]
pub struct FormData {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub frequency: String,
    pub current_city: Option<String>,
}

impl FormData {
    fn parse(&self) -> Result<SubscribeRequest, DialogErrors> {
        let city = City::parse(self.city.clone());
        let email = if self.email.trim().is_empty() {
            Err("Field required!".to_string())
        } else {
            SubscriberEmail::parse(self.email.clone())
        };
        let frequency = if self.frequency.trim().is_empty() {
            Err("Field required!".to_string())
        } else {
            self.frequency.parse::<Frequency>()
        };

        match (city, email, frequency) {
            (Ok(city), Ok(email), Ok(frequency)) => {
                Ok(SubscribeRequest::new(email, city, frequency))
            }
            (city, email, frequency) => Err(DialogErrors {
                city: city.err(),
                email: email.err(),
                frequency: frequency.err(),
            }),
        }
    }

    fn dialog(&self, errors: DialogErrors) -> SubscribeDialogView {
        SubscribeDialogView {
            city: self.city.clone(),
            email: self.email.clone(),
            frequency: self.frequency.clone(),
            errors,
        }
    }
}

#[tracing::instrument(
    name = "Adding a new subscriber.",
    skip(form, api_client, tera, default_city),
    fields(
        subscriber_email = %form.email,
        city = %form.city
    )
)]
pub async fn subscribe(
    form: web::Form<FormData>,
    api_client: web::Data<ApiClient>,
    tera: web::Data<Tera>,
    default_city: web::Data<DefaultCity>,
) -> Result<HttpResponse, actix_web::Error> {
    let form = form.into_inner();
    let current_city = form
        .current_city
        .clone()
        .and_then(|c| City::parse(c).ok())
        .unwrap_or_else(|| default_city.0.clone());
    let mut view = MainPageView::new(&current_city);

    let (subscribe_toast, status) = match form.parse() {
        Err(errors) => {
            view.dialog = Some(form.dialog(errors));
            (None, StatusCode::BAD_REQUEST)
        }
        Ok(request) => match api_client.subscribe(&request).await {
            Ok(()) => (Some(Toast::success(SUBSCRIBED_MESSAGE)), StatusCode::OK),
            Err(e) => {
                tracing::warn!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Subscription was rejected"
                );
                view.dialog = Some(form.dialog(DialogErrors::default()));
                (Some(Toast::error(SUBSCRIBE_FAILED_MESSAGE)), StatusCode::OK)
            }
        },
    };

    let weather_toast = view.load_weather(&api_client, current_city).await;

    render_main_page(&tera, &view, subscribe_toast.or(weather_toast), status)
}
