//! Gemini advisor backend
//!
//! Talks to the Google Generative Language REST API. Every request carries
//! a hard timeout so a stalled provider cannot stall the handling request.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{CategorySpending, Goal, HealthMetrics, RecurringPattern, ShortfallPrediction};

use super::parsing::parse_partial;
use super::prompts;
use super::types::{
    AdviceContext, BillRiskAnalysis, GoalSuggestions, HabitAssessment, HealthAssessment,
    OptimizationAdvice, PurchaseAdvice, PurchaseContext, SentimentAnalysis, SpendingContext,
};
use super::AdvisorBackend;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// Per-request deadline for provider calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Advisor backend backed by the Gemini generateContent API
#[derive(Clone)]
pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiBackend {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Create from `GEMINI_API_KEY` / `GEMINI_MODEL`. Returns None when no
    /// API key is configured.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        if api_key.is_empty() {
            return None;
        }
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Some(Self::new(&api_key, &model))
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            model: model.to_string(),
            ..self.clone()
        }
    }

    /// Override the API base URL (for tests against a local stub)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One prompt-in / text-out round-trip to the provider
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Advisor(format!(
                "Gemini API returned {}",
                status.as_u16()
            )));
        }

        let reply: GenerateContentResponse = response.json().await?;
        let text = reply
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| Error::Advisor("Gemini reply contained no candidates".to_string()))?;

        debug!(model = %self.model, chars = text.len(), "Gemini reply received");
        Ok(text)
    }
}

#[derive(Debug, Deserialize, Default)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

#[async_trait]
impl AdvisorBackend for GeminiBackend {
    async fn optimization_suggestions(
        &self,
        categories: &[CategorySpending],
        total_spent: f64,
    ) -> Result<OptimizationAdvice> {
        let reply = self
            .generate(&prompts::optimization(categories, total_spent))
            .await?;
        Ok(parse_partial(&reply).unwrap_or_else(|| OptimizationAdvice::from_raw(&reply)))
    }

    async fn classify_habits(
        &self,
        patterns: &[RecurringPattern],
        context: &SpendingContext,
    ) -> Result<HabitAssessment> {
        let reply = self
            .generate(&prompts::classify_habits(patterns, context))
            .await?;
        Ok(parse_partial(&reply).unwrap_or_else(|| HabitAssessment::from_raw(&reply)))
    }

    async fn assess_financial_health(
        &self,
        metrics: &HealthMetrics,
        bill_count: usize,
        transaction_count: usize,
    ) -> Result<HealthAssessment> {
        let reply = self
            .generate(&prompts::health_score(metrics, bill_count, transaction_count))
            .await?;
        Ok(parse_partial(&reply).unwrap_or_else(|| HealthAssessment::from_raw(&reply)))
    }

    async fn analyze_bill_risk(
        &self,
        prediction: &ShortfallPrediction,
    ) -> Result<BillRiskAnalysis> {
        let reply = self.generate(&prompts::bill_risk(prediction)).await?;
        Ok(parse_partial(&reply).unwrap_or_else(|| BillRiskAnalysis::from_raw(&reply)))
    }

    async fn evaluate_purchase(&self, context: &PurchaseContext) -> Result<PurchaseAdvice> {
        let reply = self.generate(&prompts::evaluate_purchase(context)).await?;
        Ok(parse_partial(&reply).unwrap_or_else(|| PurchaseAdvice::from_raw(&reply)))
    }

    async fn financial_advice(&self, question: &str, context: &AdviceContext) -> Result<String> {
        self.generate(&prompts::financial_advice(question, context))
            .await
    }

    async fn suggest_goal_plan(
        &self,
        goal: &Goal,
        metrics: &HealthMetrics,
    ) -> Result<GoalSuggestions> {
        let reply = self.generate(&prompts::goal_plan(goal, metrics)).await?;
        Ok(parse_partial(&reply).unwrap_or_else(|| GoalSuggestions::from_raw(&reply)))
    }

    async fn predict_timeline(&self, user_data: &serde_json::Value) -> Result<String> {
        self.generate(&prompts::timeline(user_data)).await
    }

    async fn classify_purchase_sentiment(&self, purchase_text: &str) -> Result<String> {
        self.generate(&prompts::purchase_sentiment(purchase_text))
            .await
    }

    async fn chat(&self, message: &str) -> Result<String> {
        self.generate(&prompts::chat(message)).await
    }

    async fn analyze_news_sentiment(&self, article_text: &str) -> Result<SentimentAnalysis> {
        let reply = self.generate(&prompts::news_sentiment(article_text)).await?;
        Ok(parse_partial(&reply).unwrap_or_else(|| SentimentAnalysis::from_raw(&reply)))
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/models?key={}", self.base_url, self.api_key);
        match self
            .client
            .get(&url)
            .timeout(Duration::from_secs(10))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
