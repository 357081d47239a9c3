//! Fakes shared by the pipeline unit tests

use crate::error::OrchestrationError;
use crate::llm::TextGenerator;
use crate::models::{
    Article, NewsRecord, PlanParameters, ToolKind, WeatherRecord, WeatherReport,
};
use crate::tools::{describe_weather_code, Tool};
use crate::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

pub fn weather_report(city: &str) -> WeatherReport {
    WeatherReport {
        city: city.to_string(),
        latitude: 19.07,
        longitude: 72.88,
        temperature: Some(31.2),
        weather_code: Some(2),
        description: describe_weather_code(Some(2)),
        windspeed: Some(12.5),
        humidity: Some(70.0),
    }
}

pub fn articles(count: usize) -> Vec<Article> {
    (1..=count)
        .map(|i| Article {
            title: format!("Headline {}", i),
            link: format!("https://news.example.com/{}", i),
            published: "Mon, 01 Jan 2024 00:00:00 GMT".to_string(),
            source: format!("Paper {}", i),
        })
        .collect()
}

/// Text generator with a canned reply that records every prompt it sees
pub struct FakeGenerator {
    reply: std::result::Result<String, String>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Arc::default(),
        }
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate_text(
        &self,
        prompt: &str,
        _system_instruction: Option<&str>,
    ) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .map_err(OrchestrationError::LlmError)
    }
}

enum Outcome<T> {
    Record(T),
    Fail(String),
}

/// Weather tool returning a fixed outcome; records the city it was asked for
pub struct FakeWeather {
    outcome: Outcome<WeatherRecord>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl FakeWeather {
    pub fn report(report: WeatherReport) -> Self {
        Self::with(Outcome::Record(WeatherRecord::Report(report)))
    }

    pub fn unavailable(city: &str) -> Self {
        Self::with(Outcome::Record(WeatherRecord::Unavailable {
            error: format!("Could not find coordinates for city: {}", city),
            city: city.to_string(),
        }))
    }

    pub fn failing(message: &str) -> Self {
        Self::with(Outcome::Fail(message.to_string()))
    }

    fn with(outcome: Outcome<WeatherRecord>) -> Self {
        Self {
            outcome,
            calls: Arc::default(),
        }
    }
}

#[async_trait]
impl Tool for FakeWeather {
    type Record = WeatherRecord;

    fn kind(&self) -> ToolKind {
        ToolKind::Weather
    }

    async fn lookup(&self, parameters: &PlanParameters) -> Result<WeatherRecord> {
        self.calls
            .lock()
            .unwrap()
            .push(parameters.city_or_default().to_string());
        match &self.outcome {
            Outcome::Record(record) => Ok(record.clone()),
            Outcome::Fail(message) => Err(OrchestrationError::ToolError(message.clone())),
        }
    }
}

/// News tool returning `count` headlines or a raised failure
pub struct FakeNews {
    outcome: Outcome<usize>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl FakeNews {
    pub fn headlines(count: usize) -> Self {
        Self {
            outcome: Outcome::Record(count),
            calls: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Outcome::Fail(message.to_string()),
            calls: Arc::default(),
        }
    }
}

#[async_trait]
impl Tool for FakeNews {
    type Record = NewsRecord;

    fn kind(&self) -> ToolKind {
        ToolKind::News
    }

    async fn lookup(&self, parameters: &PlanParameters) -> Result<NewsRecord> {
        let query = parameters.news_query_or_default().to_string();
        self.calls.lock().unwrap().push(query.clone());
        match &self.outcome {
            Outcome::Record(count) => Ok(NewsRecord::headlines(&query, articles(*count))),
            Outcome::Fail(message) => Err(OrchestrationError::ToolError(message.clone())),
        }
    }
}
