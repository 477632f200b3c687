use crate::domain::models::{ExpenseData, ExpenseId, ExpenseRecord};

/// The current list of expenses shown across screens.
///
/// Newest entries sit at the front; a fetched list replaces the contents
/// wholesale and keeps the store's order.
#[derive(Debug, Clone, Default)]
pub struct ExpenseBook {
    expenses: Vec<ExpenseRecord>,
}

impl ExpenseBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn find(&self, id: &ExpenseId) -> Option<&ExpenseRecord> {
        self.expenses.iter().find(|expense| &expense.id == id)
    }

    pub fn set_expenses(&mut self, expenses: Vec<ExpenseRecord>) {
        self.expenses = expenses;
    }

    pub fn add_expense(&mut self, expense: ExpenseRecord) {
        self.expenses.insert(0, expense);
    }

    pub fn update_expense(&mut self, id: &ExpenseId, data: ExpenseData) -> bool {
        match self.expenses.iter_mut().find(|expense| &expense.id == id) {
            Some(expense) => {
                expense.apply(data);
                true
            }
            None => false,
        }
    }

    pub fn delete_expense(&mut self, id: &ExpenseId) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|expense| &expense.id != id);
        self.expenses.len() != before
    }
}
