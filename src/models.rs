//! Core data models for the operations assistant
//!
//! Every value here is request-scoped: produced and consumed within a
//! single pipeline invocation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default city when the plan names none
pub const DEFAULT_CITY: &str = "Delhi";

/// Default news query when neither a query nor a city is planned
pub const DEFAULT_NEWS_QUERY: &str = "India";

/// Upper bound on headlines fetched and reported
pub const MAX_ARTICLES: usize = 5;

//
// ================= Tools =================
//

/// The closed set of lookups the planner may select
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Weather,
    News,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::Weather, ToolKind::News];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Weather => "weather",
            ToolKind::News => "news",
        }
    }

    /// Parse a tool name as written by the planner. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "weather" => Some(ToolKind::Weather),
            "news" => Some(ToolKind::News),
            _ => None,
        }
    }

    /// Capability line shown to the planner model
    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::Weather => "Get current weather for a city (requires: city name)",
            ToolKind::News => "Get top news headlines (requires: query/location)",
        }
    }

    /// Prefix used when a lookup raises during execution
    pub fn failure_label(&self) -> &'static str {
        match self {
            ToolKind::Weather => "Weather fetch failed",
            ToolKind::News => "News fetch failed",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//
// ================= Plan =================
//

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub news_query: Option<String>,
}

impl PlanParameters {
    pub fn city_or_default(&self) -> &str {
        self.city.as_deref().unwrap_or(DEFAULT_CITY)
    }

    /// `news_query`, falling back to the planned city and then to the default query
    pub fn news_query_or_default(&self) -> &str {
        self.news_query
            .as_deref()
            .or(self.city.as_deref())
            .unwrap_or(DEFAULT_NEWS_QUERY)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    pub task: String,
    pub tools_needed: Vec<ToolKind>,
    #[serde(default)]
    pub parameters: PlanParameters,
    #[serde(default)]
    pub plan_summary: String,
}

impl Plan {
    /// Plan that runs nothing; used when planning fails
    pub fn empty(task: &str) -> Self {
        Self {
            task: task.to_string(),
            tools_needed: Vec::new(),
            parameters: PlanParameters::default(),
            plan_summary: "Failed to create plan".to_string(),
        }
    }

    pub fn requires(&self, kind: ToolKind) -> bool {
        self.tools_needed.contains(&kind)
    }
}

/// Planner output. `plan` is always usable, even when `success` is false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOutcome {
    pub success: bool,
    pub plan: Plan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlanOutcome {
    pub fn planned(plan: Plan) -> Self {
        Self {
            success: true,
            plan,
            error: None,
        }
    }

    pub fn failed(task: &str, error: String) -> Self {
        Self {
            success: false,
            plan: Plan::empty(task),
            error: Some(error),
        }
    }
}

//
// ================= Weather =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: Option<f64>,
    pub weather_code: Option<i64>,
    pub description: String,
    pub windspeed: Option<f64>,
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum WeatherRecord {
    /// Geocoding found nothing for the city
    Unavailable { error: String, city: String },
    Report(WeatherReport),
}

impl WeatherRecord {
    pub fn city(&self) -> &str {
        match self {
            WeatherRecord::Unavailable { city, .. } => city,
            WeatherRecord::Report(report) => &report.city,
        }
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            WeatherRecord::Report(report) => Some(report),
            WeatherRecord::Unavailable { .. } => None,
        }
    }
}

//
// ================= News =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub published: String,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum NewsRecord {
    /// Feed fetch or parse failed; `articles` is always empty
    Unavailable {
        error: String,
        query: String,
        articles: Vec<Article>,
    },
    Headlines {
        query: String,
        total_articles: usize,
        articles: Vec<Article>,
    },
}

impl NewsRecord {
    pub fn unavailable(query: &str, error: String) -> Self {
        NewsRecord::Unavailable {
            error,
            query: query.to_string(),
            articles: Vec::new(),
        }
    }

    pub fn headlines(query: &str, articles: Vec<Article>) -> Self {
        NewsRecord::Headlines {
            query: query.to_string(),
            total_articles: articles.len(),
            articles,
        }
    }

    pub fn articles(&self) -> &[Article] {
        match self {
            NewsRecord::Unavailable { articles, .. } | NewsRecord::Headlines { articles, .. } => {
                articles
            }
        }
    }
}

//
// ================= Execution =================
//

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExecutionResult {
    pub weather_data: Option<WeatherRecord>,
    pub news_data: Option<NewsRecord>,
    pub errors: Vec<String>,
}

//
// ================= Final Response =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Headline {
    pub title: String,
    pub source: String,
    pub link: String,
}

impl From<&Article> for Headline {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            source: article.source.clone(),
            link: article.link.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinalResponse {
    pub city: String,
    pub weather: String,
    pub top_headlines: Vec<Headline>,
    pub summary: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}
