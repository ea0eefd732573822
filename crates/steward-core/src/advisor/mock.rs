//! Mock advisor backend for testing
//!
//! Returns deterministic canned responses for every operation so the
//! server and analytics paths can be exercised without a provider.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{CategorySpending, Goal, HealthMetrics, RecurringPattern, ShortfallPrediction};

use super::types::{
    AdviceContext, BillRiskAnalysis, GoalSuggestions, HabitAssessment, HabitClassification,
    HealthAssessment, OptimizationAdvice, OptimizationRecommendation, PurchaseAdvice,
    PurchaseContext, SentimentAnalysis, SpendingContext,
};
use super::AdvisorBackend;

/// Mock advisor backend
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should report the backend as reachable
    pub healthy: bool,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self { healthy: true }
    }

    /// Create an unreachable mock backend
    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }
}

#[async_trait]
impl AdvisorBackend for MockBackend {
    async fn optimization_suggestions(
        &self,
        categories: &[CategorySpending],
        total_spent: f64,
    ) -> Result<OptimizationAdvice> {
        // Recommend trimming the biggest category by 10%
        let recommendations = categories
            .first()
            .map(|top| {
                vec![OptimizationRecommendation {
                    category: top.category.clone(),
                    suggestion: format!("Reduce {} spending by 10%", top.category),
                    potential_savings: Some(format!("${:.2}", top.total * 0.1)),
                    difficulty: Some("medium".to_string()),
                    impact: Some("high".to_string()),
                }]
            })
            .unwrap_or_default();

        Ok(OptimizationAdvice {
            observations: vec![format!(
                "Total spending of ${:.2} across {} categories",
                total_spent,
                categories.len()
            )],
            recommendations,
            monthly_targets: Default::default(),
        })
    }

    async fn classify_habits(
        &self,
        patterns: &[RecurringPattern],
        _context: &SpendingContext,
    ) -> Result<HabitAssessment> {
        // Simple rule of thumb: regular-amount patterns are healthy
        let habits = patterns
            .iter()
            .map(|p| HabitClassification {
                category: p.category.clone(),
                merchant: p.merchant.clone(),
                classification: if p.is_regular_amount {
                    "healthy".to_string()
                } else {
                    "unhealthy".to_string()
                },
                reasoning: Some(format!("{} charge from {}", p.frequency, p.merchant)),
                suggestions: None,
            })
            .collect();

        Ok(HabitAssessment {
            habits,
            overall_assessment: Some("Spending habits look stable".to_string()),
            top_recommendations: vec!["Review subscriptions quarterly".to_string()],
        })
    }

    async fn assess_financial_health(
        &self,
        metrics: &HealthMetrics,
        _bill_count: usize,
        _transaction_count: usize,
    ) -> Result<HealthAssessment> {
        let score = if metrics.savings_rate > 0.2 { 75.0 } else { 50.0 };
        Ok(HealthAssessment {
            overall_score: Some(score),
            category: Some(if score > 60.0 { "Stable" } else { "Coping" }.to_string()),
            component_scores: Default::default(),
            strengths: vec!["Consistent income".to_string()],
            weaknesses: vec![],
            priority_actions: vec!["Build emergency fund to 6 months".to_string()],
            summary: None,
        })
    }

    async fn analyze_bill_risk(
        &self,
        prediction: &ShortfallPrediction,
    ) -> Result<BillRiskAnalysis> {
        let risk = if prediction.will_miss_bills {
            "high"
        } else {
            "low"
        };
        Ok(BillRiskAnalysis {
            risk_level: Some(risk.to_string()),
            risk_analysis: Some(format!(
                "Projected balance after bills: ${:.2}",
                prediction.projected_balance
            )),
            recommendations: vec!["Schedule bill payments after payday".to_string()],
            priority_bills: vec![],
        })
    }

    async fn evaluate_purchase(&self, context: &PurchaseContext) -> Result<PurchaseAdvice> {
        let affordable = context.balance >= context.purchase.amount;
        Ok(PurchaseAdvice {
            recommendation: Some(if affordable { "acceptable" } else { "caution" }.to_string()),
            confidence: Some(0.8),
            reasoning: Some(format!(
                "Balance ${:.2} against a ${:.2} purchase",
                context.balance, context.purchase.amount
            )),
            impact: None,
            alternatives: vec![],
        })
    }

    async fn financial_advice(&self, question: &str, _context: &AdviceContext) -> Result<String> {
        Ok(format!(
            "Regarding \"{}\": keep expenses below income and automate savings.",
            question
        ))
    }

    async fn suggest_goal_plan(
        &self,
        goal: &Goal,
        _metrics: &HealthMetrics,
    ) -> Result<GoalSuggestions> {
        let remaining = (goal.target_amount - goal.current_amount).max(0.0);
        Ok(GoalSuggestions {
            assessment: Some(format!("${:.2} left to reach {}", remaining, goal.name)),
            suggestions: vec![
                "Set up an automatic monthly transfer".to_string(),
                "Redirect one recurring expense into the goal".to_string(),
            ],
        })
    }

    async fn predict_timeline(&self, _user_data: &serde_json::Value) -> Result<String> {
        Ok("- 1 week: stable\n- 1 month: stable\n- 1 year: modest savings growth".to_string())
    }

    async fn classify_purchase_sentiment(&self, purchase_text: &str) -> Result<String> {
        let lower = purchase_text.to_lowercase();
        let label = if lower.contains("grocer") || lower.contains("rent") {
            "essential"
        } else {
            "non-essential"
        };
        Ok(format!("{}: based on the purchase description", label))
    }

    async fn chat(&self, message: &str) -> Result<String> {
        Ok(format!("You said: {}", message))
    }

    async fn analyze_news_sentiment(&self, article_text: &str) -> Result<SentimentAnalysis> {
        // Crude keyword scan keeps tests deterministic
        let lower = article_text.to_lowercase();
        let score = if lower.contains("rally") || lower.contains("growth") {
            0.6
        } else if lower.contains("crash") || lower.contains("recession") {
            -0.6
        } else {
            0.0
        };
        Ok(SentimentAnalysis {
            sentiment_score: Some(score),
            keywords: vec!["markets".to_string()],
            summary: Some("Mock sentiment summary".to_string()),
            impact_analysis: None,
        })
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }
}
