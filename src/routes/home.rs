use actix_web::{HttpResponse, http::StatusCode, web};
use serde::Serialize;
use tera::Tera;

use super::helpers::{page_context, render_page};
use super::notifications::Toast;
use crate::api_client::ApiClient;
use crate::domain::{City, Frequency, Weather};
use crate::startup::DefaultCity;

#[derive(serde::Deserialize)]
pub struct MainPageQuery {
    city: Option<String>,
    current_city: Option<String>,
    dialog: Option<String>,
}

/// Everything the main page template renders besides the toast.
#[derive(Debug, Serialize)]
pub struct MainPageView {
    pub city: String,
    pub search_value: String,
    pub search_error: Option<String>,
    pub weather: Option<WeatherView>,
    pub dialog: Option<SubscribeDialogView>,
    pub frequencies: Vec<FrequencyOption>,
}

#[derive(Debug, Serialize)]
pub struct WeatherView {
    pub temperature: String,
    pub humidity: String,
    pub description: String,
}

impl From<&Weather> for WeatherView {
    fn from(weather: &Weather) -> Self {
        Self {
            temperature: weather.temperature_text(),
            humidity: weather.humidity_text(),
            description: weather.description.clone(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct SubscribeDialogView {
    pub city: String,
    pub email: String,
    pub frequency: String,
    pub errors: DialogErrors,
}

#[derive(Debug, Default, Serialize)]
pub struct DialogErrors {
    pub city: Option<String>,
    pub email: Option<String>,
    pub frequency: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FrequencyOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl MainPageView {
    pub fn new(city: &City) -> Self {
        Self {
            city: city.to_string(),
            search_value: String::new(),
            search_error: None,
            weather: None,
            dialog: None,
            frequencies: Frequency::OFFERED
                .iter()
                .map(|f| FrequencyOption {
                    value: f.as_str(),
                    label: f.label(),
                })
                .collect(),
        }
    }

    /// Fetches the weather for `city` and returns the toast to show when it fails.
    pub async fn load_weather(&mut self, api_client: &ApiClient, city: City) -> Option<Toast> {
        self.city = city.to_string();
        match api_client.get_weather(&city).await {
            Ok(weather) => {
                self.weather = Some(WeatherView::from(&weather));
                None
            }
            Err(e) => {
                tracing::warn!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to load weather"
                );
                Some(Toast::error(format!("Failed to load weather: {e}")))
            }
        }
    }
}

impl SubscribeDialogView {
    pub fn for_city(city: &str) -> Self {
        Self {
            city: city.to_string(),
            frequency: Frequency::default().as_str().to_string(),
            ..Default::default()
        }
    }
}

pub fn render_main_page(
    tera: &Tera,
    view: &MainPageView,
    toast: Option<Toast>,
    status: StatusCode,
) -> Result<HttpResponse, actix_web::Error> {
    let mut ctx = page_context();
    ctx.insert("page", view);
    ctx.insert("toast", &toast);
    render_page(tera, "index.html", &ctx, status)
}

#[tracing::instrument(
    name = "Rendering main page",
    skip(query, api_client, tera, default_city),
    fields(city = ?query.city, current_city = ?query.current_city, dialog = ?query.dialog)
)]
pub async fn home(
    query: web::Query<MainPageQuery>,
    api_client: web::Data<ApiClient>,
    tera: web::Data<Tera>,
    default_city: web::Data<DefaultCity>,
) -> Result<HttpResponse, actix_web::Error> {
    let MainPageQuery {
        city,
        current_city,
        dialog,
    } = query.into_inner();
    let shown_city = current_city
        .and_then(|c| City::parse(c).ok())
        .unwrap_or_else(|| default_city.0.clone());
    let mut view = MainPageView::new(&shown_city);

    let toast = match city {
        None => view.load_weather(&api_client, shown_city).await,
        Some(raw) => {
            view.search_value = raw.clone();
            match City::parse(raw) {
                Ok(city) => view.load_weather(&api_client, city).await,
                // The rejected input is never looked up; the page keeps the city it showed.
                Err(e) => {
                    view.search_error = Some(e);
                    view.load_weather(&api_client, shown_city).await
                }
            }
        }
    };

    if dialog.as_deref() == Some("subscribe") {
        view.dialog = Some(SubscribeDialogView::for_city(&view.city));
    }

    render_main_page(&tera, &view, toast, StatusCode::OK)
}
