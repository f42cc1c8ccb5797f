//! The narrow row-store contract every loader depends on.

use async_trait::async_trait;
use wedplan_core::types::RowId;

use crate::error::StoreError;
use crate::query::{Filter, Row, Select, Table};

/// Row-based access to the hosted relational store.
///
/// Implementations must validate column names with [`Table::check_column`]
/// (or [`Select::validate`]) before touching storage.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Rows matching every filter, in the requested order.
    async fn select(&self, query: &Select) -> Result<Vec<Row>, StoreError>;

    /// Number of rows matching every filter. Ordering and limit are ignored.
    async fn count(&self, query: &Select) -> Result<i64, StoreError>;

    /// Insert one row. Omitted columns take the table defaults. Returns the
    /// stored row.
    async fn insert(&self, table: Table, row: Row) -> Result<Row, StoreError>;

    /// Apply `changes` to the row with `id`. Returns `None` if no such row.
    async fn update(&self, table: Table, id: RowId, changes: Row)
        -> Result<Option<Row>, StoreError>;

    /// Delete rows matching every filter; returns the number removed. At
    /// least one filter is required.
    async fn delete(&self, table: Table, filters: &[Filter]) -> Result<u64, StoreError>;

    async fn delete_by_id(&self, table: Table, id: RowId) -> Result<bool, StoreError> {
        Ok(self.delete(table, &[Filter::eq("id", id)]).await? > 0)
    }

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Shared validation for [`DataStore::delete`].
pub(crate) fn check_delete(table: Table, filters: &[Filter]) -> Result<(), StoreError> {
    if filters.is_empty() {
        return Err(StoreError::InvalidQuery(format!(
            "refusing unfiltered delete on {}",
            table.name()
        )));
    }
    filters
        .iter()
        .try_for_each(|f| table.check_column(f.column()))
}
