// 🔎 Query Layer - read-only views over the expense store
//
// Every view filters a single snapshot taken under the store's read lock,
// so a result never mixes records from different moments.

use chrono::{Datelike, Local, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{ExpenseError, Result};
use crate::model::Expense;
use crate::store::ExpenseStore;

/// First and last day of a calendar month
///
/// Month outside 1-12, or a year chrono cannot represent, is rejected as
/// `InvalidMonth` instead of panicking.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || ExpenseError::InvalidMonth { year, month };

    if !(1..=12).contains(&month) {
        return Err(invalid());
    }

    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(invalid)?;

    Ok((start, end))
}

/// Category filter, month filter and monthly total
pub struct ExpenseQuery<'a> {
    store: &'a ExpenseStore,
}

impl<'a> ExpenseQuery<'a> {
    pub fn new(store: &'a ExpenseStore) -> Self {
        ExpenseQuery { store }
    }

    /// Expenses whose category matches, ignoring case
    ///
    /// `None` applies no filter and returns everything.
    pub fn find_by_category(&self, category: Option<&str>) -> Vec<Expense> {
        match category {
            Some(category) => self.store.find_where(|e| e.has_category(category)),
            None => self.store.find_all(),
        }
    }

    /// Expenses dated within the given month (both ends inclusive)
    pub fn find_by_month(&self, year: i32, month: u32) -> Result<Vec<Expense>> {
        let (start, end) = month_bounds(year, month)?;
        Ok(self.store.find_where(|e| e.is_between(start, end)))
    }

    /// Exact sum of the amounts dated within the given month
    ///
    /// A sum past `Decimal::MAX` is reported as `TotalOverflow`.
    pub fn total_for_month(&self, year: i32, month: u32) -> Result<Decimal> {
        self.find_by_month(year, month)?
            .iter()
            .try_fold(Decimal::ZERO, |sum, e| sum.checked_add(e.amount))
            .ok_or(ExpenseError::TotalOverflow { year, month })
    }

    /// Total for the month the local system clock is in right now
    pub fn total_for_current_month(&self) -> Result<Decimal> {
        let today = Local::now().date_naive();
        self.total_for_month(today.year(), today.month())
    }
}
