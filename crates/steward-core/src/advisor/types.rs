//! Typed results and contexts for advisor operations
//!
//! All response types are partial: every field is `#[serde(default)]` so a
//! reply missing a section still deserializes, and each type has a
//! `from_raw` constructor that carries the model's free text when no JSON
//! could be extracted at all. Callers never see a parse error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Bill, Budget, Transaction};

/// One spending-optimization recommendation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizationRecommendation {
    pub category: String,
    pub suggestion: String,
    pub potential_savings: Option<String>,
    pub difficulty: Option<String>,
    pub impact: Option<String>,
}

/// Advisor suggestions for optimizing category spending
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizationAdvice {
    pub observations: Vec<String>,
    pub recommendations: Vec<OptimizationRecommendation>,
    pub monthly_targets: BTreeMap<String, f64>,
}

impl OptimizationAdvice {
    pub fn from_raw(text: &str) -> Self {
        Self {
            observations: vec![text.to_string()],
            ..Default::default()
        }
    }
}

/// Healthy/unhealthy classification of one recurring pattern
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HabitClassification {
    pub category: String,
    pub merchant: String,
    /// "healthy" or "unhealthy"
    pub classification: String,
    pub reasoning: Option<String>,
    pub suggestions: Option<String>,
}

/// Advisor classification of detected spending habits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HabitAssessment {
    pub habits: Vec<HabitClassification>,
    pub overall_assessment: Option<String>,
    pub top_recommendations: Vec<String>,
}

impl HabitAssessment {
    pub fn from_raw(text: &str) -> Self {
        Self {
            overall_assessment: Some(text.to_string()),
            ..Default::default()
        }
    }
}

/// Per-dimension scores within a health assessment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentScores {
    pub savings: Option<f64>,
    pub spending: Option<f64>,
    pub debt: Option<f64>,
    pub emergency: Option<f64>,
    pub cashflow: Option<f64>,
}

/// The advisor's 0-100 financial health rating
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthAssessment {
    pub overall_score: Option<f64>,
    /// Critical | Vulnerable | Coping | Stable | Thriving
    pub category: Option<String>,
    pub component_scores: ComponentScores,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub priority_actions: Vec<String>,
    pub summary: Option<String>,
}

impl HealthAssessment {
    pub fn from_raw(text: &str) -> Self {
        Self {
            summary: Some(text.to_string()),
            ..Default::default()
        }
    }
}

/// Advisor analysis of bill payment risk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillRiskAnalysis {
    /// high | medium | low
    pub risk_level: Option<String>,
    pub risk_analysis: Option<String>,
    pub recommendations: Vec<String>,
    pub priority_bills: Vec<String>,
}

impl BillRiskAnalysis {
    pub fn from_raw(text: &str) -> Self {
        Self {
            risk_analysis: Some(text.to_string()),
            ..Default::default()
        }
    }
}

/// Advisor verdict on a prospective purchase
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseAdvice {
    /// recommended | acceptable | caution | not recommended
    pub recommendation: Option<String>,
    pub confidence: Option<f64>,
    pub reasoning: Option<String>,
    pub impact: Option<String>,
    pub alternatives: Vec<String>,
}

impl PurchaseAdvice {
    pub fn from_raw(text: &str) -> Self {
        Self {
            reasoning: Some(text.to_string()),
            ..Default::default()
        }
    }
}

/// Advisor plan for reaching a savings goal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalSuggestions {
    pub assessment: Option<String>,
    pub suggestions: Vec<String>,
}

impl GoalSuggestions {
    pub fn from_raw(text: &str) -> Self {
        Self {
            assessment: Some(text.to_string()),
            ..Default::default()
        }
    }
}

/// Sentiment analysis of a financial news article
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SentimentAnalysis {
    /// -1.0 to 1.0
    pub sentiment_score: Option<f64>,
    pub keywords: Vec<String>,
    pub summary: Option<String>,
    pub impact_analysis: Option<String>,
}

impl SentimentAnalysis {
    pub fn from_raw(text: &str) -> Self {
        Self {
            summary: Some(text.to_string()),
            ..Default::default()
        }
    }
}

// ========== Operation inputs ==========

/// Aggregate spending context handed to the habit classifier
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingContext {
    pub transaction_count: usize,
    pub average_amount: f64,
    /// "Category ($total)" strings, highest spend first
    pub top_categories: Vec<String>,
}

/// The purchase a user is considering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseDetails {
    pub amount: f64,
    pub description: String,
    pub category: String,
}

/// Financial state snapshot for purchase evaluation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseContext {
    pub balance: f64,
    pub purchase: PurchaseDetails,
    pub upcoming_bills: Vec<Bill>,
    pub budget: Option<Budget>,
}

/// Financial state snapshot for free-form advice
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceContext {
    pub balance: f64,
    pub budget: Option<Budget>,
    pub upcoming_bills: Vec<Bill>,
    pub recent_transactions: Vec<Transaction>,
}
