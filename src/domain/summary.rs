use serde::{Deserialize, Serialize};

use crate::domain::models::ExpenseRecord;

pub const ALL_PERIOD: &str = "Total";
pub const ALL_FALLBACK: &str = "No registered expenses found.";

/// What a list screen renders: a period header with the summed amount,
/// followed by the expenses or a fallback line when there are none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensesOutput {
    pub period: String,
    pub total: f64,
    pub total_display: String,
    pub expenses: Vec<ExpenseRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_text: Option<String>,
}

impl ExpensesOutput {
    pub fn new(
        period: impl Into<String>,
        fallback_text: impl Into<String>,
        expenses: Vec<ExpenseRecord>,
    ) -> Self {
        let total = total_amount(&expenses);
        let fallback_text = expenses.is_empty().then(|| fallback_text.into());
        Self {
            period: period.into(),
            total,
            total_display: format!("${total:.2}"),
            expenses,
            fallback_text,
        }
    }

    pub fn all(expenses: Vec<ExpenseRecord>) -> Self {
        Self::new(ALL_PERIOD, ALL_FALLBACK, expenses)
    }

    pub fn recent(window_days: u32, expenses: Vec<ExpenseRecord>) -> Self {
        Self::new(
            format!("Last {window_days} Days"),
            format!("No expenses registered for the last {window_days} days."),
            expenses,
        )
    }
}

pub fn total_amount(expenses: &[ExpenseRecord]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}
