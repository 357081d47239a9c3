//! Weather lookup using Open-Meteo (free, no API key required).

use super::Tool;
use crate::models::{PlanParameters, ToolKind, WeatherRecord, WeatherReport};
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m";

/// WMO weather interpretation codes
pub const WMO_CODES: &[(i64, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Foggy"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (71, "Slight snow"),
    (73, "Moderate snow"),
    (75, "Heavy snow"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

/// Map a WMO code to a human-readable description
pub fn describe_weather_code(code: Option<i64>) -> String {
    let Some(code) = code else {
        return "Unknown".to_string();
    };

    WMO_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, description)| description.to_string())
        .unwrap_or_else(|| format!("Weather code: {}", code))
}

pub struct WeatherTool {
    client: Client,
    geocoding_url: String,
    forecast_url: String,
}

#[derive(Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current: CurrentConditions,
}

#[derive(Deserialize, Default)]
struct CurrentConditions {
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    weather_code: Option<i64>,
    wind_speed_10m: Option<f64>,
}

impl WeatherTool {
    pub fn new(client: Client, geocoding_url: String, forecast_url: String) -> Self {
        Self {
            client,
            geocoding_url,
            forecast_url,
        }
    }

    /// Current weather for a city.
    ///
    /// A city the geocoder does not know yields `WeatherRecord::Unavailable`;
    /// transport and status failures are returned as errors.
    pub async fn get_weather(&self, city: &str) -> Result<WeatherRecord> {
        let Some(location) = self.geocode(city).await? else {
            info!(city = %city, "No coordinates found for city");
            return Ok(WeatherRecord::Unavailable {
                error: format!("Could not find coordinates for city: {}", city),
                city: city.to_string(),
            });
        };

        let current = self.fetch_current(location.latitude, location.longitude).await?;

        Ok(WeatherRecord::Report(WeatherReport {
            city: city.to_string(),
            latitude: location.latitude,
            longitude: location.longitude,
            temperature: current.temperature_2m,
            weather_code: current.weather_code,
            description: describe_weather_code(current.weather_code),
            windspeed: current.wind_speed_10m,
            humidity: current.relative_humidity_2m,
        }))
    }

    async fn geocode(&self, city: &str) -> Result<Option<GeocodingResult>> {
        debug!(city = %city, "Geocoding city");

        let response: GeocodingResponse = self
            .client
            .get(&self.geocoding_url)
            .query(&[
                ("name", city),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.results.and_then(|r| r.into_iter().next()))
    }

    async fn fetch_current(&self, latitude: f64, longitude: f64) -> Result<CurrentConditions> {
        debug!(lat = latitude, lon = longitude, "Fetching current weather");

        let response: ForecastResponse = self
            .client
            .get(&self.forecast_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.current)
    }
}

#[async_trait]
impl Tool for WeatherTool {
    type Record = WeatherRecord;

    fn kind(&self) -> ToolKind {
        ToolKind::Weather
    }

    async fn lookup(&self, parameters: &PlanParameters) -> Result<WeatherRecord> {
        self.get_weather(parameters.city_or_default()).await
    }
}
