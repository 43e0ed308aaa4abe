/// Current weather as returned by `GET /api/v1/weather`.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Weather {
    pub temperature: f64,
    pub humidity: i64,
    pub description: String,
    #[serde(default)]
    pub city: Option<String>,
}

impl Weather {
    pub fn temperature_text(&self) -> String {
        format!("{}°C", self.temperature)
    }

    pub fn humidity_text(&self) -> String {
        format!("{}%", self.humidity)
    }
}
