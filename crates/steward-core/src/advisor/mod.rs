//! Pluggable advisor backend abstraction
//!
//! The external LLM sits behind a narrow interface: locally computed
//! numeric summaries go in as a prompt, a typed partial result comes back
//! out. Nothing else in the crate knows which provider (if any) answers.
//!
//! - `AdvisorBackend` trait: the operations the rest of the app may ask for
//! - `AdvisorClient` enum: concrete wrapper with Clone + compile-time dispatch
//! - Backend implementations: `GeminiBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Environment variables:
//! - `ADVISOR_BACKEND`: Backend to use (gemini, mock). Default: gemini
//! - `GEMINI_API_KEY`: API key (required for the gemini backend)
//! - `GEMINI_MODEL`: Model name (default: gemini-1.5-pro)

mod gemini;
mod mock;
pub mod parsing;
pub mod prompts;
pub mod types;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;
pub use types::*;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CategorySpending, Goal, HealthMetrics, RecurringPattern, ShortfallPrediction};

/// Trait defining the interface for all advisor backends
///
/// Responses are partial by design: the backend extracts what it can from
/// the model's reply and falls back to carrying the raw text. Only
/// transport-level failures surface as errors.
#[async_trait]
pub trait AdvisorBackend: Send + Sync {
    /// Suggest optimizations for a category spending breakdown
    async fn optimization_suggestions(
        &self,
        categories: &[CategorySpending],
        total_spent: f64,
    ) -> Result<OptimizationAdvice>;

    /// Classify detected recurring patterns as healthy or unhealthy habits
    async fn classify_habits(
        &self,
        patterns: &[RecurringPattern],
        context: &SpendingContext,
    ) -> Result<HabitAssessment>;

    /// Rate overall financial health 0-100 from the computed ratios
    async fn assess_financial_health(
        &self,
        metrics: &HealthMetrics,
        bill_count: usize,
        transaction_count: usize,
    ) -> Result<HealthAssessment>;

    /// Explain the payment risk behind a shortfall prediction
    async fn analyze_bill_risk(&self, prediction: &ShortfallPrediction)
        -> Result<BillRiskAnalysis>;

    /// Advise on a prospective purchase
    async fn evaluate_purchase(&self, context: &PurchaseContext) -> Result<PurchaseAdvice>;

    /// Free-form financial advice grounded in the user's context
    async fn financial_advice(&self, question: &str, context: &AdviceContext) -> Result<String>;

    /// Suggest a plan for reaching a savings goal
    async fn suggest_goal_plan(&self, goal: &Goal, metrics: &HealthMetrics)
        -> Result<GoalSuggestions>;

    /// Predict the user's financial timeline (1 week .. 10 years)
    async fn predict_timeline(&self, user_data: &serde_json::Value) -> Result<String>;

    /// Classify a purchase as essential / non-essential / impulse / goal-aligned
    async fn classify_purchase_sentiment(&self, purchase_text: &str) -> Result<String>;

    /// Conversational chat support
    async fn chat(&self, message: &str) -> Result<String>;

    /// Score the sentiment of a financial news article
    async fn analyze_news_sentiment(&self, article_text: &str) -> Result<SentimentAnalysis>;

    /// Whether the backend is reachable
    async fn health_check(&self) -> bool;
}

/// Concrete advisor client with compile-time dispatch
#[derive(Clone)]
pub enum AdvisorClient {
    /// Google Gemini REST API
    Gemini(GeminiBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AdvisorClient {
    /// Create an advisor client from environment variables
    ///
    /// Checks `ADVISOR_BACKEND` to determine which backend to use:
    /// - `gemini` (default): requires GEMINI_API_KEY
    /// - `mock`: deterministic canned responses for testing
    ///
    /// Returns None when the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("ADVISOR_BACKEND").unwrap_or_else(|_| "gemini".to_string());

        match backend.to_lowercase().as_str() {
            "gemini" => GeminiBackend::from_env().map(AdvisorClient::Gemini),
            "mock" => Some(AdvisorClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown ADVISOR_BACKEND, falling back to gemini");
                GeminiBackend::from_env().map(AdvisorClient::Gemini)
            }
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AdvisorClient::Mock(MockBackend::new())
    }

    /// Human-readable backend name for status output
    pub fn backend_name(&self) -> &'static str {
        match self {
            AdvisorClient::Gemini(_) => "gemini",
            AdvisorClient::Mock(_) => "mock",
        }
    }
}

// Implement AdvisorBackend for AdvisorClient by delegating to the inner backend
#[async_trait]
impl AdvisorBackend for AdvisorClient {
    async fn optimization_suggestions(
        &self,
        categories: &[CategorySpending],
        total_spent: f64,
    ) -> Result<OptimizationAdvice> {
        match self {
            AdvisorClient::Gemini(b) => b.optimization_suggestions(categories, total_spent).await,
            AdvisorClient::Mock(b) => b.optimization_suggestions(categories, total_spent).await,
        }
    }

    async fn classify_habits(
        &self,
        patterns: &[RecurringPattern],
        context: &SpendingContext,
    ) -> Result<HabitAssessment> {
        match self {
            AdvisorClient::Gemini(b) => b.classify_habits(patterns, context).await,
            AdvisorClient::Mock(b) => b.classify_habits(patterns, context).await,
        }
    }

    async fn assess_financial_health(
        &self,
        metrics: &HealthMetrics,
        bill_count: usize,
        transaction_count: usize,
    ) -> Result<HealthAssessment> {
        match self {
            AdvisorClient::Gemini(b) => {
                b.assess_financial_health(metrics, bill_count, transaction_count)
                    .await
            }
            AdvisorClient::Mock(b) => {
                b.assess_financial_health(metrics, bill_count, transaction_count)
                    .await
            }
        }
    }

    async fn analyze_bill_risk(
        &self,
        prediction: &ShortfallPrediction,
    ) -> Result<BillRiskAnalysis> {
        match self {
            AdvisorClient::Gemini(b) => b.analyze_bill_risk(prediction).await,
            AdvisorClient::Mock(b) => b.analyze_bill_risk(prediction).await,
        }
    }

    async fn evaluate_purchase(&self, context: &PurchaseContext) -> Result<PurchaseAdvice> {
        match self {
            AdvisorClient::Gemini(b) => b.evaluate_purchase(context).await,
            AdvisorClient::Mock(b) => b.evaluate_purchase(context).await,
        }
    }

    async fn financial_advice(&self, question: &str, context: &AdviceContext) -> Result<String> {
        match self {
            AdvisorClient::Gemini(b) => b.financial_advice(question, context).await,
            AdvisorClient::Mock(b) => b.financial_advice(question, context).await,
        }
    }

    async fn suggest_goal_plan(
        &self,
        goal: &Goal,
        metrics: &HealthMetrics,
    ) -> Result<GoalSuggestions> {
        match self {
            AdvisorClient::Gemini(b) => b.suggest_goal_plan(goal, metrics).await,
            AdvisorClient::Mock(b) => b.suggest_goal_plan(goal, metrics).await,
        }
    }

    async fn predict_timeline(&self, user_data: &serde_json::Value) -> Result<String> {
        match self {
            AdvisorClient::Gemini(b) => b.predict_timeline(user_data).await,
            AdvisorClient::Mock(b) => b.predict_timeline(user_data).await,
        }
    }

    async fn classify_purchase_sentiment(&self, purchase_text: &str) -> Result<String> {
        match self {
            AdvisorClient::Gemini(b) => b.classify_purchase_sentiment(purchase_text).await,
            AdvisorClient::Mock(b) => b.classify_purchase_sentiment(purchase_text).await,
        }
    }

    async fn chat(&self, message: &str) -> Result<String> {
        match self {
            AdvisorClient::Gemini(b) => b.chat(message).await,
            AdvisorClient::Mock(b) => b.chat(message).await,
        }
    }

    async fn analyze_news_sentiment(&self, article_text: &str) -> Result<SentimentAnalysis> {
        match self {
            AdvisorClient::Gemini(b) => b.analyze_news_sentiment(article_text).await,
            AdvisorClient::Mock(b) => b.analyze_news_sentiment(article_text).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AdvisorClient::Gemini(b) => b.health_check().await,
            AdvisorClient::Mock(b) => b.health_check().await,
        }
    }
}
