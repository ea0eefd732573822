//! Prompt templates for advisor operations

use crate::advisor::types::{AdviceContext, PurchaseContext, SpendingContext};
use crate::models::{CategorySpending, Goal, HealthMetrics, RecurringPattern, ShortfallPrediction};

/// Standing instructions prepended to the assistant-style operations
/// (timeline, sentiment, chat).
pub const APP_CONTEXT: &str = "You are a financial assistant inside a budgeting app. \
You help users predict future events based on transaction history, classify purchase \
sentiment, and answer questions about saving goals, spending patterns, and financial \
planning. Avoid inventing specific numbers unless they are provided. Stay helpful and \
grounded in the user's context.";

pub fn optimization(categories: &[CategorySpending], total_spent: f64) -> String {
    format!(
        r#"Analyze this spending breakdown by category:
{}

Total spending: ${:.2}

Based on this spending profile, provide suggestions for optimizing finances. Focus on:
1. Categories with unusually high spending
2. Potential areas to reduce expenses
3. Better allocation of resources

Return your analysis in this JSON format:
{{
  "observations": ["3-5 key observations about the spending pattern"],
  "recommendations": [
    {{
      "category": "category name",
      "suggestion": "specific action to optimize spending",
      "potentialSavings": "estimated monthly savings from this action",
      "difficulty": "easy|medium|hard",
      "impact": "high|medium|low"
    }}
  ],
  "monthlyTargets": {{ "category": 123.0 }}
}}"#,
        serde_json::to_string(categories).unwrap_or_default(),
        total_spent
    )
}

pub fn classify_habits(patterns: &[RecurringPattern], context: &SpendingContext) -> String {
    format!(
        r#"Analyze these recurring financial transactions and spending patterns:
{}

Some additional context on overall spending:
- Total number of transactions: {}
- Average transaction amount: ${:.2}
- Categories with highest spending: {}

For each recurring pattern, classify it as a "healthy" or "unhealthy" financial habit
and explain why. Consider factors like:
- Is this a necessary expense or a luxury?
- Is the frequency appropriate?
- Is the spending level sustainable?
- Could this be affecting the ability to save?

Return your analysis in this JSON format:
{{
  "habits": [
    {{
      "category": "category name",
      "merchant": "merchant name",
      "classification": "healthy | unhealthy",
      "reasoning": "explanation of the classification",
      "suggestions": "1-2 suggestions to improve if unhealthy, or maintain if healthy"
    }}
  ],
  "overallAssessment": "brief assessment of overall financial habits",
  "topRecommendations": ["list of 3 actionable recommendations"]
}}"#,
        serde_json::to_string(patterns).unwrap_or_default(),
        context.transaction_count,
        context.average_amount,
        context.top_categories.join(", ")
    )
}

pub fn health_score(metrics: &HealthMetrics, bill_count: usize, transaction_count: usize) -> String {
    format!(
        r#"Analyze this financial profile and calculate a comprehensive financial health score:

Current balance: ${:.2}
Savings rate: {:.2}%
Monthly income: ${:.2}
Monthly expenses: ${:.2}
Debt-to-income ratio: {:.2}%
Emergency savings: {:.2} months of expenses
Upcoming bill count: {}
Transactions analyzed: {}

Calculate a financial health score on a scale of 0-100, where:
- 0-20: Critical financial distress
- 21-40: Financially vulnerable
- 41-60: Financially coping
- 61-80: Financially stable
- 81-100: Financially thriving

Return your analysis in this JSON format:
{{
  "overallScore": 0,
  "category": "Critical|Vulnerable|Coping|Stable|Thriving",
  "componentScores": {{ "savings": 0, "spending": 0, "debt": 0, "emergency": 0, "cashflow": 0 }},
  "strengths": ["list of financial strengths"],
  "weaknesses": ["list of areas needing improvement"],
  "priorityActions": ["list of 3-5 most important actions to improve financial health"],
  "summary": "one-paragraph overall assessment"
}}"#,
        metrics.current_balance,
        metrics.savings_rate * 100.0,
        metrics.monthly_income,
        metrics.monthly_expenses,
        metrics.debt_to_income_ratio * 100.0,
        metrics.emergency_fund_months,
        bill_count,
        transaction_count
    )
}

pub fn bill_risk(prediction: &ShortfallPrediction) -> String {
    format!(
        r#"Analyze the following financial situation and provide advice on bill payment risk:
- Current balance: ${:.2}
- Projected income: ${:.2}
- Upcoming bills: {}
- Projected balance after bills: ${:.2}

Provide a JSON response with the following structure:
{{
  "riskLevel": "high|medium|low",
  "riskAnalysis": "detailed explanation of the risk",
  "recommendations": ["3-5 actionable recommendations to avoid missing bill payments"],
  "priorityBills": ["bills that should be prioritized if there is a shortfall"]
}}"#,
        prediction.current_balance,
        prediction.projected_income,
        serde_json::to_string(&prediction.upcoming_bills).unwrap_or_default(),
        prediction.projected_balance
    )
}

pub fn evaluate_purchase(context: &PurchaseContext) -> String {
    format!(
        r#"Evaluate whether this purchase is a good financial decision:
- Current balance: ${:.2}
- Purchase details: {}
- Upcoming bills: {}
- Monthly budget: {}

Provide a JSON response with the following structure:
{{
  "recommendation": "recommended|acceptable|caution|not recommended",
  "confidence": 0.0,
  "reasoning": "detailed explanation of the recommendation",
  "impact": "how this purchase might affect upcoming bill payments",
  "alternatives": ["optional alternative approaches if not recommended"]
}}"#,
        context.balance,
        serde_json::to_string(&context.purchase).unwrap_or_default(),
        serde_json::to_string(&context.upcoming_bills).unwrap_or_default(),
        serde_json::to_string(&context.budget).unwrap_or_default()
    )
}

pub fn financial_advice(question: &str, context: &AdviceContext) -> String {
    format!(
        r#"As a financial advisor, answer the following question with the user's financial
context in mind:

User's question: "{}"

User's financial context:
- Current balance: ${:.2}
- Monthly budget: {}
- Upcoming bills: {}
- Recent transactions: {}

Provide a helpful, personalized financial advice response based on this specific
context. Respond in a conversational, readable format, not JSON."#,
        question,
        context.balance,
        serde_json::to_string(&context.budget).unwrap_or_default(),
        serde_json::to_string(&context.upcoming_bills).unwrap_or_default(),
        serde_json::to_string(&context.recent_transactions).unwrap_or_default()
    )
}

pub fn goal_plan(goal: &Goal, metrics: &HealthMetrics) -> String {
    format!(
        r#"A user is saving towards this goal:
{}

Their financial situation:
- Current balance: ${:.2}
- Monthly income: ${:.2}
- Monthly expenses: ${:.2}
- Savings rate: {:.2}%

Suggest how they can reach the goal. Provide a JSON response with this structure:
{{
  "assessment": "1-2 sentence assessment of whether the goal is on track",
  "suggestions": ["3-5 concrete suggestions to reach the goal faster"]
}}"#,
        serde_json::to_string(goal).unwrap_or_default(),
        metrics.current_balance,
        metrics.monthly_income,
        metrics.monthly_expenses,
        metrics.savings_rate * 100.0
    )
}

pub fn timeline(user_data: &serde_json::Value) -> String {
    format!(
        r#"{}

Here is a user's current financial data:
{}

Generate predictions for 1 week, 1 month, 1 year, 5 years, and 10 years.
Return the predictions as bullet points or in a structured format."#,
        APP_CONTEXT,
        serde_json::to_string_pretty(user_data).unwrap_or_default()
    )
}

pub fn purchase_sentiment(purchase_text: &str) -> String {
    format!(
        r#"{}

Classify this purchase sentiment:
"{}"

Return one of: "essential", "non-essential", "impulse", or "goal-aligned".
Explain briefly why."#,
        APP_CONTEXT, purchase_text
    )
}

pub fn chat(message: &str) -> String {
    format!("{}\n\nUser: \"{}\"", APP_CONTEXT, message)
}

pub fn news_sentiment(article_text: &str) -> String {
    format!(
        r#"Analyze the sentiment of this financial news article.
Return a JSON object with the following structure:
{{
  "sentimentScore": 0.0,
  "keywords": ["key financial terms mentioned"],
  "summary": "brief 1-2 sentence summary",
  "impactAnalysis": "brief analysis of potential market impact"
}}
The sentimentScore is between -1 and 1, where -1 is very negative, 0 is neutral,
and 1 is very positive.

Article:
{}"#,
        article_text
    )
}
