//! Record store tests

use chrono::NaiveDate;

use super::Database;
use crate::error::Error;
use crate::models::{
    BillStatus, BudgetExpense, GoalStatus, NewBill, NewGoal, NewNewsArticle, NewTransaction,
    PaymentMethod, TransactionKind,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tx(user: &str, amount: f64, category: &str, description: &str, d: NaiveDate) -> NewTransaction {
    NewTransaction {
        user_id: user.to_string(),
        amount,
        description: description.to_string(),
        category: category.to_string(),
        method: PaymentMethod::default_for_amount(amount),
        date: d,
    }
}

#[test]
fn insert_and_list_transactions() {
    let db = Database::in_memory().unwrap();

    let created = db
        .insert_transaction(&tx("u1", -42.5, "Food", "WHOLE FOODS", date(2026, 3, 5)))
        .unwrap();
    assert_eq!(created.kind, TransactionKind::Withdrawal);
    assert_eq!(created.category, "Food");

    db.insert_transaction(&tx("u1", 2000.0, "Income", "PAYROLL", date(2026, 3, 1)))
        .unwrap();
    db.insert_transaction(&tx("u2", -10.0, "Food", "CAFE", date(2026, 3, 2)))
        .unwrap();

    let listed = db
        .list_transactions("u1", &Default::default(), 100)
        .unwrap();
    assert_eq!(listed.len(), 2);
    // Newest first
    assert_eq!(listed[0].description, "WHOLE FOODS");
}

#[test]
fn zero_amount_is_rejected() {
    let db = Database::in_memory().unwrap();
    let result = db.insert_transaction(&tx("u1", 0.0, "Food", "NOTHING", date(2026, 3, 5)));
    assert!(matches!(result, Err(Error::InvalidData(_))));
}

#[test]
fn transaction_filters() {
    let db = Database::in_memory().unwrap();
    db.insert_transaction(&tx("u1", -42.5, "Food", "MARKET", date(2026, 3, 5)))
        .unwrap();
    db.insert_transaction(&tx("u1", 2000.0, "Income", "PAYROLL", date(2026, 3, 1)))
        .unwrap();
    db.insert_transaction(&tx("u1", -15.0, "Transport", "METRO", date(2026, 2, 10)))
        .unwrap();

    let deposits = db
        .list_transactions(
            "u1",
            &super::TransactionQueryOptions {
                kind: Some(TransactionKind::Deposit),
                ..Default::default()
            },
            100,
        )
        .unwrap();
    assert_eq!(deposits.len(), 1);
    assert_eq!(deposits[0].description, "PAYROLL");

    let march = db
        .list_transactions(
            "u1",
            &super::TransactionQueryOptions {
                start_date: Some(date(2026, 3, 1)),
                end_date: Some(date(2026, 3, 31)),
                ..Default::default()
            },
            100,
        )
        .unwrap();
    assert_eq!(march.len(), 2);

    let food = db
        .list_transactions(
            "u1",
            &super::TransactionQueryOptions {
                category: Some("Food".to_string()),
                ..Default::default()
            },
            100,
        )
        .unwrap();
    assert_eq!(food.len(), 1);
}

#[test]
fn balance_is_signed_sum() {
    let db = Database::in_memory().unwrap();
    db.insert_transaction(&tx("u1", 2000.0, "Income", "PAYROLL", date(2026, 3, 1)))
        .unwrap();
    db.insert_transaction(&tx("u1", -500.0, "Housing", "RENT", date(2026, 3, 2)))
        .unwrap();

    let balance = db.balance("u1").unwrap();
    assert!((balance - 1500.0).abs() < 1e-9);

    // No transactions => zero, not an error
    assert_eq!(db.balance("nobody").unwrap(), 0.0);
}

#[test]
fn bill_lifecycle() {
    let db = Database::in_memory().unwrap();
    let bill = db
        .insert_bill(&NewBill {
            user_id: "u1".to_string(),
            name: "Electricity".to_string(),
            amount: 90.0,
            due_date: date(2026, 4, 12),
            category: "Utilities".to_string(),
        })
        .unwrap();
    assert_eq!(bill.status, BillStatus::Upcoming);

    let paid = db.update_bill_status(bill.id, BillStatus::Paid).unwrap();
    assert_eq!(paid.status, BillStatus::Paid);

    // Unknown id is a distinct not-found error
    let missing = db.update_bill_status(9999, BillStatus::Paid);
    assert!(matches!(missing, Err(Error::NotFound(_))));
}

#[test]
fn upcoming_bills_window_excludes_paid_and_far_future() {
    let db = Database::in_memory().unwrap();
    let today = date(2026, 4, 1);

    let soon = db
        .insert_bill(&NewBill {
            user_id: "u1".to_string(),
            name: "Rent".to_string(),
            amount: 1500.0,
            due_date: date(2026, 4, 5),
            category: "Housing".to_string(),
        })
        .unwrap();
    db.insert_bill(&NewBill {
        user_id: "u1".to_string(),
        name: "Insurance".to_string(),
        amount: 200.0,
        due_date: date(2026, 6, 20),
        category: "Insurance".to_string(),
    })
    .unwrap();
    let paid = db
        .insert_bill(&NewBill {
            user_id: "u1".to_string(),
            name: "Water".to_string(),
            amount: 40.0,
            due_date: date(2026, 4, 10),
            category: "Utilities".to_string(),
        })
        .unwrap();
    db.update_bill_status(paid.id, BillStatus::Paid).unwrap();

    let upcoming = db.upcoming_bills("u1", today, 30).unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].id, soon.id);
}

#[test]
fn budget_upsert_replaces_expenses() {
    let db = Database::in_memory().unwrap();
    assert!(db.get_budget("u1").unwrap().is_none());

    let expenses = vec![
        BudgetExpense {
            category: "Rent".to_string(),
            amount: 1200.0,
            description: None,
        },
        BudgetExpense {
            category: "Food".to_string(),
            amount: 400.0,
            description: Some("groceries".to_string()),
        },
    ];
    let budget = db.upsert_budget("u1", 3000.0, &expenses).unwrap();
    assert_eq!(budget.expenses.len(), 2);
    // Order preserved
    assert_eq!(budget.expenses[0].category, "Rent");
    assert_eq!(budget.shortfall(), 0.0);

    let replacement = vec![BudgetExpense {
        category: "Everything".to_string(),
        amount: 2500.0,
        description: None,
    }];
    let updated = db.upsert_budget("u1", 2000.0, &replacement).unwrap();
    assert_eq!(updated.expenses.len(), 1);
    assert!((updated.shortfall() - 500.0).abs() < 1e-9);
}

#[test]
fn budget_income_must_be_positive() {
    let db = Database::in_memory().unwrap();
    let result = db.upsert_budget("u1", 0.0, &[]);
    assert!(matches!(result, Err(Error::InvalidData(_))));
}

#[test]
fn goal_progress_recomputed_on_every_read() {
    let db = Database::in_memory().unwrap();
    let goal = db
        .insert_goal(&NewGoal {
            user_id: "u1".to_string(),
            name: "Emergency fund".to_string(),
            target_amount: 1000.0,
            current_amount: 250.0,
            target_date: Some(date(2026, 12, 31)),
            category: Some("Savings".to_string()),
        })
        .unwrap();
    assert!((goal.progress - 0.25).abs() < 1e-9);
    assert_eq!(goal.status, GoalStatus::InProgress);

    let updated = db.add_goal_progress(goal.id, 750.0).unwrap();
    assert!((updated.progress - 1.0).abs() < 1e-9);
    assert_eq!(updated.status, GoalStatus::Completed);

    // Status always tracks the amounts, even past the target
    let over = db.add_goal_progress(goal.id, 500.0).unwrap();
    assert_eq!(over.status, GoalStatus::Completed);
    assert!(over.progress > 1.0);
}

#[test]
fn goal_validation() {
    let db = Database::in_memory().unwrap();
    let bad_target = db.insert_goal(&NewGoal {
        user_id: "u1".to_string(),
        name: "Broken".to_string(),
        target_amount: 0.0,
        current_amount: 0.0,
        target_date: None,
        category: None,
    });
    assert!(matches!(bad_target, Err(Error::InvalidData(_))));

    let missing = db.delete_goal(424242);
    assert!(matches!(missing, Err(Error::NotFound(_))));
}

#[test]
fn news_append_and_query() {
    let db = Database::in_memory().unwrap();
    db.insert_news(&NewNewsArticle {
        title: "Markets rally".to_string(),
        content: "Stocks posted strong gains.".to_string(),
        source: "wire".to_string(),
        sentiment_score: 0.7,
        keywords: vec!["stocks".to_string(), "rally".to_string()],
        summary: None,
    })
    .unwrap();
    db.insert_news(&NewNewsArticle {
        title: "Recession fears".to_string(),
        content: "Indicators point down.".to_string(),
        source: "wire".to_string(),
        sentiment_score: -0.5,
        keywords: vec![],
        summary: Some("Downturn expected".to_string()),
    })
    .unwrap();

    let recent = db.recent_news(10).unwrap();
    assert_eq!(recent.len(), 2);

    let negative = db.news_by_sentiment(-1.0, 0.0).unwrap();
    assert_eq!(negative.len(), 1);
    assert_eq!(negative[0].title, "Recession fears");

    // Keywords survive the JSON column round-trip
    let rally = recent.iter().find(|a| a.title == "Markets rally").unwrap();
    assert_eq!(rally.keywords, vec!["stocks", "rally"]);
}

#[test]
fn advisor_log_appends() {
    let db = Database::in_memory().unwrap();
    db.log_advisor_call(
        crate::models::AdvisorOperation::Chat,
        "hello",
        "hi there",
    )
    .unwrap();

    assert_eq!(db.count_advisor_calls().unwrap(), 1);
    let entries = db.recent_advisor_calls(5).unwrap();
    assert_eq!(entries[0].input, "hello");
}
