//! News headlines from the Google News RSS search feed (no API key required).

use super::Tool;
use crate::error::OrchestrationError;
use crate::models::{Article, NewsRecord, PlanParameters, ToolKind, MAX_ARTICLES};
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

pub struct NewsTool {
    client: Client,
    feed_url: String,
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
struct FeedItem {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    source: Option<FeedSource>,
}

#[derive(Debug, Deserialize)]
struct FeedSource {
    #[serde(rename = "$text")]
    name: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl FeedItem {
    fn into_article(self) -> Article {
        Article {
            title: non_blank(self.title).unwrap_or_else(|| "No title".to_string()),
            link: non_blank(self.link).unwrap_or_default(),
            published: non_blank(self.pub_date).unwrap_or_default(),
            source: non_blank(self.source.and_then(|s| s.name))
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Parse an RSS 2.0 document, keeping at most `max_articles` items in feed order
pub fn parse_feed(xml: &str, max_articles: usize) -> Result<Vec<Article>> {
    let rss: Rss = quick_xml::de::from_str(xml)
        .map_err(|e| OrchestrationError::ToolError(format!("Invalid RSS feed: {}", e)))?;

    Ok(rss
        .channel
        .items
        .into_iter()
        .take(max_articles)
        .map(FeedItem::into_article)
        .collect())
}

impl NewsTool {
    pub fn new(client: Client, feed_url: String) -> Self {
        Self { client, feed_url }
    }

    /// Top headlines for `query`. Failures become `NewsRecord::Unavailable`.
    pub async fn get_news(&self, query: &str, max_articles: usize) -> NewsRecord {
        match self.fetch_articles(query, max_articles).await {
            Ok(articles) => {
                debug!(query = %query, count = articles.len(), "News fetched");
                NewsRecord::headlines(query, articles)
            }
            Err(e) => {
                warn!(query = %query, error = %e, "News fetch failed");
                NewsRecord::unavailable(query, format!("Failed to fetch news: {}", e))
            }
        }
    }

    async fn fetch_articles(&self, query: &str, max_articles: usize) -> Result<Vec<Article>> {
        let body = self
            .client
            .get(&self.feed_url)
            .query(&[
                ("q", query),
                ("hl", "en-IN"),
                ("gl", "IN"),
                ("ceid", "IN:en"),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_feed(&body, max_articles)
    }
}

#[async_trait]
impl Tool for NewsTool {
    type Record = NewsRecord;

    fn kind(&self) -> ToolKind {
        ToolKind::News
    }

    async fn lookup(&self, parameters: &PlanParameters) -> Result<NewsRecord> {
        Ok(self
            .get_news(parameters.news_query_or_default(), MAX_ARTICLES)
            .await)
    }
}
