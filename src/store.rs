// 🗄️ Expense Store - in-memory record collection
//
// One RwLock guards both the records and the id counter, so:
// - id assignment and insertion happen in the same critical section
// - every read clones from a single consistent state
//
// Nothing is persisted; state lives as long as the store.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::model::{Expense, ExpenseDetails};

/// First identifier handed out by a fresh store
const FIRST_ID: u64 = 1;

#[derive(Debug)]
struct StoreState {
    records: BTreeMap<u64, Expense>,
    /// Next id to assign (monotonic, never rewinds)
    next_id: u64,
}

/// Keyed collection of expenses with monotonic id assignment
#[derive(Debug)]
pub struct ExpenseStore {
    state: RwLock<StoreState>,
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseStore {
    /// Create new empty store (ids start at 1)
    pub fn new() -> Self {
        ExpenseStore {
            state: RwLock::new(StoreState {
                records: BTreeMap::new(),
                next_id: FIRST_ID,
            }),
        }
    }

    // Writers never leave the map half-updated, so a poisoned lock still
    // guards a usable state.
    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a record, assigning the next id when `id` is None
    ///
    /// With an explicit id, any record under that id is overwritten. The
    /// counter is moved past explicit ids so a later assignment cannot
    /// collide with them. An explicit `u64::MAX` leaves the counter where it
    /// is, since nothing lies past it; assigned ids keep counting up below it.
    pub fn save(&self, id: Option<u64>, details: ExpenseDetails) -> Expense {
        let mut state = self.write();

        let id = match id {
            Some(id) => {
                if id >= state.next_id {
                    if let Some(next) = id.checked_add(1) {
                        state.next_id = next;
                    }
                }
                id
            }
            None => {
                let id = state.next_id;
                state.next_id = id.saturating_add(1);
                id
            }
        };

        let expense = Expense::from_details(id, details);
        state.records.insert(id, expense.clone());
        expense
    }

    /// Replace the fields of an existing record, keeping its id
    ///
    /// Lookup and replacement share one write lock, so a record deleted
    /// concurrently is never recreated. Returns None when the id is absent.
    pub fn update(&self, id: u64, details: ExpenseDetails) -> Option<Expense> {
        let mut state = self.write();
        let expense = state.records.get_mut(&id)?;
        expense.apply(details);
        Some(expense.clone())
    }

    pub fn find_by_id(&self, id: u64) -> Option<Expense> {
        self.read().records.get(&id).cloned()
    }

    /// Snapshot of every record, ordered by id
    pub fn find_all(&self) -> Vec<Expense> {
        self.read().records.values().cloned().collect()
    }

    /// Snapshot of the records matching `predicate`, taken under one read lock
    pub fn find_where<F>(&self, predicate: F) -> Vec<Expense>
    where
        F: Fn(&Expense) -> bool,
    {
        self.read()
            .records
            .values()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }

    /// Remove a record; returns whether one was actually removed
    pub fn delete_by_id(&self, id: u64) -> bool {
        self.write().records.remove(&id).is_some()
    }

    pub fn count(&self) -> usize {
        self.read().records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn details(description: &str) -> ExpenseDetails {
        ExpenseDetails {
            description: description.to_string(),
            amount: Decimal::new(550, 2),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            category: "Other".to_string(),
        }
    }

    #[test]
    fn test_save_assigns_increasing_ids() {
        let store = ExpenseStore::new();

        let first = store.save(None, details("Coffee"));
        let second = store.save(None, details("Bagel"));

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_save_with_id_overwrites() {
        let store = ExpenseStore::new();
        let saved = store.save(None, details("Coffee"));

        store.save(Some(saved.id), details("Tea"));

        assert_eq!(store.count(), 1);
        assert_eq!(store.find_by_id(saved.id).unwrap().description, "Tea");
    }

    #[test]
    fn test_explicit_id_advances_counter() {
        let store = ExpenseStore::new();
        store.save(Some(10), details("Imported"));

        let next = store.save(None, details("Fresh"));
        assert_eq!(next.id, 11);
    }

    #[test]
    fn test_explicit_max_id_keeps_counter() {
        let store = ExpenseStore::new();
        store.save(None, details("Coffee"));

        let max = store.save(Some(u64::MAX), details("Imported"));
        let next = store.save(None, details("Fresh"));

        assert_eq!(max.id, u64::MAX);
        assert_eq!(next.id, 2);
        assert_eq!(store.count(), 3);
        assert_eq!(store.find_by_id(u64::MAX).unwrap().description, "Imported");
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = ExpenseStore::new();
        let first = store.save(None, details("Coffee"));
        assert!(store.delete_by_id(first.id));

        let second = store.save(None, details("Tea"));
        assert!(second.id > first.id);
    }

    #[test]
    fn test_delete_twice() {
        let store = ExpenseStore::new();
        let saved = store.save(None, details("Coffee"));

        assert!(store.delete_by_id(saved.id));
        assert!(store.find_by_id(saved.id).is_none());
        assert!(!store.delete_by_id(saved.id));
    }

    #[test]
    fn test_update_missing_is_not_upsert() {
        let store = ExpenseStore::new();
        store.save(None, details("Coffee"));

        assert!(store.update(99, details("Ghost")).is_none());
        assert_eq!(store.count(), 1);
        assert!(store.find_by_id(99).is_none());
    }

    #[test]
    fn test_update_keeps_id() {
        let store = ExpenseStore::new();
        let saved = store.save(None, details("Coffee"));

        let updated = store.update(saved.id, details("Espresso")).unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.description, "Espresso");
        assert_eq!(store.find_by_id(saved.id), Some(updated));
    }

    #[test]
    fn test_find_where_filters_snapshot() {
        let store = ExpenseStore::new();
        store.save(None, details("Coffee"));
        store.save(None, details("Tea"));

        let teas = store.find_where(|e| e.description == "Tea");
        assert_eq!(teas.len(), 1);
        assert_eq!(teas[0].id, 2);
    }

    #[test]
    fn test_concurrent_saves_get_distinct_ids() {
        let store = Arc::new(ExpenseStore::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..50)
                        .map(|i| store.save(None, details(&format!("item {}", i))).id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id), "duplicate id {}", id);
            }
        }

        assert_eq!(ids.len(), 400);
        assert_eq!(store.count(), 400);
        assert_eq!(ids.iter().max(), Some(&400));
    }
}
