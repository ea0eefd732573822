//! Domain models for Steward

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::advisor::types::{
    BillRiskAnalysis, HabitAssessment, HealthAssessment, OptimizationAdvice, PurchaseAdvice,
};

/// Derived transaction direction, computed from the sign of the amount.
/// Never stored; recomputed whenever a row is read or created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    /// Classify an amount. Zero amounts are rejected before this is called.
    pub fn from_amount(amount: f64) -> Self {
        if amount > 0.0 {
            Self::Deposit
        } else {
            Self::Withdrawal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deposit" => Ok(Self::Deposit),
            "withdrawal" => Ok(Self::Withdrawal),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method recorded with a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Credit,
    Debit,
    Cash,
    /// Incoming transfers (salary, refunds)
    Deposit,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::Cash => "cash",
            Self::Deposit => "deposit",
            Self::Other => "other",
        }
    }

    /// Default method when the caller omits one: deposits for income,
    /// debit for spending.
    pub fn default_for_amount(amount: f64) -> Self {
        if amount > 0.0 {
            Self::Deposit
        } else {
            Self::Debit
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "credit" => Ok(Self::Credit),
            "debit" => Ok(Self::Debit),
            "cash" => Ok(Self::Cash),
            "deposit" => Ok(Self::Deposit),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown payment method: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A financial transaction. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub user_id: String,
    /// Positive = deposit, negative = withdrawal. Never zero.
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub method: PaymentMethod,
    /// Derived from the sign of `amount`
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A new transaction before insertion
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: String,
    pub amount: f64,
    pub description: String,
    pub category: String,
    pub method: PaymentMethod,
    pub date: NaiveDate,
}

/// Bill lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Upcoming,
    Paid,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Paid => "paid",
        }
    }
}

impl std::str::FromStr for BillStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upcoming" => Ok(Self::Upcoming),
            "paid" => Ok(Self::Paid),
            _ => Err(format!("Unknown bill status: {}", s)),
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheduled bill
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    /// Always positive
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: BillStatus,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// A new bill before insertion. Bills are always created `upcoming`.
#[derive(Debug, Clone)]
pub struct NewBill {
    pub user_id: String,
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub category: String,
}

/// One planned expense line in a budget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetExpense {
    pub category: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A user's monthly budget. One per user, upserted on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub user_id: String,
    /// Monthly income, positive
    pub income: f64,
    /// Planned expenses, order preserved
    pub expenses: Vec<BudgetExpense>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Amount by which planned expenses exceed income, floored at zero.
    pub fn shortfall(&self) -> f64 {
        let total: f64 = self.expenses.iter().map(|e| e.amount).sum();
        (total - self.income).max(0.0)
    }
}

/// Goal completion state, always derived from the amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalStatus {
    InProgress,
    Completed,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Unknown goal status: {}", s)),
        }
    }
}

/// A savings goal
///
/// `progress` and `status` are recomputed from the amounts on every read
/// and write; they are never stored, so they can never go stale relative
/// to the amounts that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    /// Always positive
    pub target_amount: f64,
    /// Never negative
    pub current_amount: f64,
    /// currentAmount / targetAmount
    pub progress: f64,
    pub status: GoalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Derive progress and status from the amounts.
    /// Invariant: status == Completed ⟺ current >= target.
    pub fn derive_progress(current_amount: f64, target_amount: f64) -> (f64, GoalStatus) {
        let progress = current_amount / target_amount;
        let status = if current_amount >= target_amount {
            GoalStatus::Completed
        } else {
            GoalStatus::InProgress
        };
        (progress, status)
    }
}

/// A new goal before insertion
#[derive(Debug, Clone)]
pub struct NewGoal {
    pub user_id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: Option<NaiveDate>,
    pub category: Option<String>,
}

/// A cached financial news article with its sentiment analysis.
/// The news store is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub source: String,
    /// -1.0 (very negative) to 1.0 (very positive)
    pub sentiment_score: f64,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A new news article before insertion
#[derive(Debug, Clone)]
pub struct NewNewsArticle {
    pub title: String,
    pub content: String,
    pub source: String,
    pub sentiment_score: f64,
    pub keywords: Vec<String>,
    pub summary: Option<String>,
}

/// Advisor operations, for the call log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorOperation {
    OptimizeSpending,
    ClassifyHabits,
    HealthScore,
    BillRisk,
    EvaluatePurchase,
    Advice,
    GoalPlan,
    Timeline,
    Sentiment,
    Chat,
    NewsSentiment,
}

impl AdvisorOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OptimizeSpending => "optimize_spending",
            Self::ClassifyHabits => "classify_habits",
            Self::HealthScore => "health_score",
            Self::BillRisk => "bill_risk",
            Self::EvaluatePurchase => "evaluate_purchase",
            Self::Advice => "advice",
            Self::GoalPlan => "goal_plan",
            Self::Timeline => "timeline",
            Self::Sentiment => "sentiment",
            Self::Chat => "chat",
            Self::NewsSentiment => "news_sentiment",
        }
    }
}

impl std::str::FromStr for AdvisorOperation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "optimize_spending" => Ok(Self::OptimizeSpending),
            "classify_habits" => Ok(Self::ClassifyHabits),
            "health_score" => Ok(Self::HealthScore),
            "bill_risk" => Ok(Self::BillRisk),
            "evaluate_purchase" => Ok(Self::EvaluatePurchase),
            "advice" => Ok(Self::Advice),
            "goal_plan" => Ok(Self::GoalPlan),
            "timeline" => Ok(Self::Timeline),
            "sentiment" => Ok(Self::Sentiment),
            "chat" => Ok(Self::Chat),
            "news_sentiment" => Ok(Self::NewsSentiment),
            _ => Err(format!("Unknown advisor operation: {}", s)),
        }
    }
}

impl std::fmt::Display for AdvisorOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One logged round-trip to the advisor backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorLogEntry {
    pub id: i64,
    pub operation: AdvisorOperation,
    pub input: String,
    pub response: String,
    pub created_at: DateTime<Utc>,
}

// ========== Analytics Models ==========

/// Spending summary for one category over the analysis window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category: String,
    /// Sum of absolute expense amounts
    pub total: f64,
    /// Share of total spend, 0-100. Zero when there is no spend.
    pub percentage: f64,
    pub transaction_count: i64,
    pub average_transaction: f64,
}

/// Category spending analysis, optionally enriched with advisor suggestions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingAnalysis {
    pub total_spent: f64,
    pub categories: Vec<CategorySpending>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization: Option<OptimizationAdvice>,
}

/// Recurring charge cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Weekly,
    BiWeekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Canonical period in days
    pub fn period_days(&self) -> i64 {
        match self {
            Self::Weekly => 7,
            Self::BiWeekly => 14,
            Self::Monthly => 30,
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected recurring merchant pattern
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringPattern {
    pub category: String,
    /// Exact transaction description shared by the group
    pub merchant: String,
    pub frequency: Frequency,
    pub average_amount: f64,
    pub transaction_count: i64,
    /// Whether every amount is within 15% of the group mean
    pub is_regular_amount: bool,
}

/// Recurring patterns plus the advisor's healthy/unhealthy classification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitReport {
    pub patterns: Vec<RecurringPattern>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<HabitAssessment>,
}

/// Projected spending for one future calendar month
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastMonth {
    /// YYYY-MM
    pub month: String,
    pub categories: BTreeMap<String, f64>,
    pub total: f64,
}

/// Three-month expense projection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseForecast {
    /// Sum of per-category monthly averages over the historical window
    pub historical_monthly_average: f64,
    pub category_averages: BTreeMap<String, f64>,
    pub forecast: Vec<ForecastMonth>,
}

/// Deterministic financial ratios handed to the advisor for scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub current_balance: f64,
    /// (income - expenses) / income over the window, 0 when income is 0
    pub savings_rate: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    /// Upcoming "Debt" bills over monthly income, 0 when income is 0
    pub debt_to_income_ratio: f64,
    /// Months of runway; capped at 120 when monthly expenses are zero
    pub emergency_fund_months: f64,
}

/// Health metrics plus the advisor's 0-100 score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub raw_metrics: HealthMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_score: Option<HealthAssessment>,
}

/// Bill-shortfall prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortfallPrediction {
    pub current_balance: f64,
    pub upcoming_bills: Vec<Bill>,
    pub projected_income: f64,
    pub projected_balance: f64,
    pub will_miss_bills: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_analysis: Option<BillRiskAnalysis>,
}

/// Purchase evaluation result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseEvaluation {
    pub current_balance: f64,
    pub purchase_amount: f64,
    pub balance_after_purchase: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_advice: Option<PurchaseAdvice>,
}

/// Budget details with upcoming bills, for the budget endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDetails {
    pub income: f64,
    pub expenses: Vec<BudgetExpense>,
    pub shortfall: f64,
    pub upcoming_bills: Vec<Bill>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_progress_invariant() {
        // status == completed exactly when current >= target
        for (current, target) in [
            (0.0, 100.0),
            (50.0, 100.0),
            (100.0, 100.0),
            (150.0, 100.0),
            (0.01, 1000.0),
        ] {
            let (progress, status) = Goal::derive_progress(current, target);
            assert!((progress - current / target).abs() < f64::EPSILON);
            assert_eq!(status == GoalStatus::Completed, current >= target);
        }
    }

    #[test]
    fn budget_shortfall_floors_at_zero() {
        let budget = Budget {
            user_id: "u1".into(),
            income: 3000.0,
            expenses: vec![
                BudgetExpense {
                    category: "Rent".into(),
                    amount: 1500.0,
                    description: None,
                },
                BudgetExpense {
                    category: "Food".into(),
                    amount: 600.0,
                    description: None,
                },
            ],
            updated_at: Utc::now(),
        };
        assert_eq!(budget.shortfall(), 0.0);

        let over = Budget {
            income: 1800.0,
            ..budget
        };
        assert!((over.shortfall() - 300.0).abs() < 1e-9);
    }

    #[test]
    fn transaction_kind_follows_sign() {
        assert_eq!(TransactionKind::from_amount(25.0), TransactionKind::Deposit);
        assert_eq!(
            TransactionKind::from_amount(-25.0),
            TransactionKind::Withdrawal
        );
    }

    #[test]
    fn kind_serializes_as_type() {
        let tx = Transaction {
            id: 1,
            user_id: "u1".into(),
            amount: -9.5,
            description: "Coffee".into(),
            category: "Dining".into(),
            method: PaymentMethod::Debit,
            kind: TransactionKind::Withdrawal,
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "withdrawal");
        assert_eq!(json["userId"], "u1");
    }
}
