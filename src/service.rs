// 💼 Expense Service - create/read/update/delete workflows
//
// Applies category defaulting (via ExpenseDetails::from) and delegates
// storage to ExpenseStore and read views to ExpenseQuery.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::Result;
use crate::model::{Expense, ExpenseDetails, ExpenseInput};
use crate::query::ExpenseQuery;
use crate::store::ExpenseStore;

/// Application service shared by every request handler
#[derive(Debug, Default)]
pub struct ExpenseService {
    store: ExpenseStore,
}

impl ExpenseService {
    pub fn new() -> Self {
        Self::with_store(ExpenseStore::new())
    }

    pub fn with_store(store: ExpenseStore) -> Self {
        ExpenseService { store }
    }

    fn query(&self) -> ExpenseQuery<'_> {
        ExpenseQuery::new(&self.store)
    }

    /// Record a new expense; the store assigns its id
    pub fn create_expense(&self, input: ExpenseInput) -> Expense {
        let expense = self.store.save(None, ExpenseDetails::from(input));
        info!(id = expense.id, category = %expense.category, amount = %expense.amount, "expense created");
        expense
    }

    pub fn list_all(&self) -> Vec<Expense> {
        let expenses = self.store.find_all();
        debug!(count = expenses.len(), "listed expenses");
        expenses
    }

    pub fn find_by_id(&self, id: u64) -> Option<Expense> {
        self.store.find_by_id(id)
    }

    /// Replace every field of an existing expense
    ///
    /// Returns None (and stores nothing) when the id does not exist.
    pub fn update_expense(&self, id: u64, input: ExpenseInput) -> Option<Expense> {
        let updated = self.store.update(id, ExpenseDetails::from(input));
        match &updated {
            Some(expense) => info!(id, category = %expense.category, "expense updated"),
            None => debug!(id, "update skipped, expense not found"),
        }
        updated
    }

    /// Returns whether an expense was actually removed
    pub fn delete_expense(&self, id: u64) -> bool {
        let deleted = self.store.delete_by_id(id);
        if deleted {
            info!(id, "expense deleted");
        } else {
            debug!(id, "delete skipped, expense not found");
        }
        deleted
    }

    pub fn filter_by_category(&self, category: Option<&str>) -> Vec<Expense> {
        self.query().find_by_category(category)
    }

    pub fn filter_by_month(&self, year: i32, month: u32) -> Result<Vec<Expense>> {
        self.query().find_by_month(year, month)
    }

    pub fn total_for_month(&self, year: i32, month: u32) -> Result<Decimal> {
        self.query().total_for_month(year, month)
    }

    pub fn total_for_current_month(&self) -> Result<Decimal> {
        self.query().total_for_current_month()
    }

    pub fn count(&self) -> usize {
        self.store.count()
    }
}
