//! In-memory [`DataStore`] for local demos and tests.
//!
//! Mirrors the Postgres schema closely enough for screens to behave the
//! same: generated ids and timestamps, column defaults, the two unique
//! constraints, and Postgres null ordering. Tables can be switched into a
//! failing or read-only state to exercise error paths.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use uuid::Uuid;
use wedplan_core::types::RowId;

use crate::error::StoreError;
use crate::query::{Filter, Order, Row, Select, Table};
use crate::store::{check_delete, DataStore};

#[derive(Default)]
struct Inner {
    tables: HashMap<Table, Vec<Row>>,
    failing: HashSet<Table>,
    read_only: HashSet<Table>,
    last_timestamp: Option<DateTime<Utc>>,
}

impl Inner {
    fn check_available(&self, table: Table) -> Result<(), StoreError> {
        if self.failing.contains(&table) {
            return Err(StoreError::Unavailable(format!(
                "{} is not reachable",
                table.name()
            )));
        }
        Ok(())
    }

    fn check_writable(&self, table: Table) -> Result<(), StoreError> {
        self.check_available(table)?;
        if self.read_only.contains(&table) {
            return Err(StoreError::Unavailable(format!(
                "{} is not accepting writes",
                table.name()
            )));
        }
        Ok(())
    }

    /// Strictly increasing timestamps so creation order is always observable.
    fn next_timestamp(&mut self) -> String {
        let mut now = Utc::now();
        if let Some(last) = self.last_timestamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_timestamp = Some(now);
        now.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn rows(&self, table: Table) -> &[Row] {
        self.tables.get(&table).map(Vec::as_slice).unwrap_or_default()
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call touching `table` fail until [`MemoryStore::recover`].
    pub async fn fail(&self, table: Table) {
        self.inner.lock().await.failing.insert(table);
    }

    /// Make inserts, updates and deletes on `table` fail while reads still
    /// succeed, until [`MemoryStore::recover`].
    pub async fn fail_writes(&self, table: Table) {
        self.inner.lock().await.read_only.insert(table);
    }

    pub async fn recover(&self, table: Table) {
        let mut inner = self.inner.lock().await;
        inner.failing.remove(&table);
        inner.read_only.remove(&table);
    }

    /// Snapshot of a table in insertion order.
    pub async fn dump(&self, table: Table) -> Vec<Row> {
        self.inner.lock().await.rows(table).to_vec()
    }
}

// ---------------------------------------------------------------------------
// Schema mirror
// ---------------------------------------------------------------------------

/// Column defaults other than `id` and the timestamps.
fn column_defaults(table: Table) -> Vec<(&'static str, Value)> {
    match table {
        Table::Events => vec![("status", json!("planning")), ("guest_count", json!(0))],
        Table::Vendors | Table::Venues => vec![
            ("approval_status", json!("pending")),
            ("review_count", json!(0)),
        ],
        Table::VenueAvailability => vec![("is_available", json!(true))],
        Table::BookingRequests | Table::VendorInquiries => vec![("status", json!("pending"))],
        Table::Profiles | Table::UserRoles => Vec::new(),
    }
}

fn unique_keys(table: Table) -> &'static [&'static [&'static str]] {
    match table {
        Table::UserRoles => &[&["user_id", "role"]],
        Table::VenueAvailability => &[&["venue_id", "date"]],
        _ => &[],
    }
}

fn violates_unique(table: Table, existing: &[Row], candidate: &Row, skip_id: Option<&Value>) -> bool {
    unique_keys(table).iter().any(|key| {
        existing
            .iter()
            .filter(|row| skip_id.is_none_or(|id| row.get("id") != Some(id)))
            .any(|row| key.iter().all(|col| row.get(*col) == candidate.get(*col)))
    })
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn compare_rows(a: &Row, b: &Row, order: &[Order]) -> Ordering {
    for o in order {
        let left = a.get(&o.column).filter(|v| !v.is_null());
        let right = b.get(&o.column).filter(|v| !v.is_null());
        let ord = match (left, right) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) if o.nulls_first => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) if o.nulls_first => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) if o.ascending => compare_values(x, y),
            (Some(x), Some(y)) => compare_values(y, x),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

fn matching<'a>(rows: &'a [Row], filters: &'a [Filter]) -> impl Iterator<Item = &'a Row> + 'a {
    rows.iter().filter(move |row| filters.iter().all(|f| f.matches(row)))
}

// ---------------------------------------------------------------------------
// DataStore
// ---------------------------------------------------------------------------

#[async_trait]
impl DataStore for MemoryStore {
    async fn select(&self, query: &Select) -> Result<Vec<Row>, StoreError> {
        query.validate()?;
        let inner = self.inner.lock().await;
        inner.check_available(query.table)?;

        let mut rows: Vec<Row> = matching(inner.rows(query.table), &query.filters)
            .cloned()
            .collect();
        rows.sort_by(|a, b| compare_rows(a, b, &query.order));
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn count(&self, query: &Select) -> Result<i64, StoreError> {
        query.validate()?;
        let inner = self.inner.lock().await;
        inner.check_available(query.table)?;
        Ok(matching(inner.rows(query.table), &query.filters).count() as i64)
    }

    async fn insert(&self, table: Table, row: Row) -> Result<Row, StoreError> {
        table.check_row(&row)?;
        let mut inner = self.inner.lock().await;
        inner.check_writable(table)?;

        let mut stored = Row::new();
        for column in table.columns() {
            stored.insert((*column).to_string(), Value::Null);
        }
        stored.insert("id".into(), json!(Uuid::new_v4()));
        let now = inner.next_timestamp();
        stored.insert("created_at".into(), json!(now));
        if table.has_column("updated_at") {
            stored.insert("updated_at".into(), json!(now));
        }
        for (column, value) in column_defaults(table) {
            stored.insert(column.into(), value);
        }
        stored.extend(row);

        if violates_unique(table, inner.rows(table), &stored, None) {
            return Err(StoreError::InvalidQuery(format!(
                "duplicate key value violates unique constraint on {}",
                table.name()
            )));
        }
        inner.tables.entry(table).or_default().push(stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        table: Table,
        id: RowId,
        changes: Row,
    ) -> Result<Option<Row>, StoreError> {
        table.check_row(&changes)?;
        if changes.contains_key("id") {
            return Err(StoreError::InvalidQuery("the id column cannot be updated".into()));
        }
        let mut inner = self.inner.lock().await;
        inner.check_writable(table)?;

        let id = json!(id);
        let Some(index) = inner.rows(table).iter().position(|r| r.get("id") == Some(&id)) else {
            return Ok(None);
        };

        let mut updated = inner.rows(table)[index].clone();
        updated.extend(changes);
        if violates_unique(table, inner.rows(table), &updated, Some(&id)) {
            return Err(StoreError::InvalidQuery(format!(
                "duplicate key value violates unique constraint on {}",
                table.name()
            )));
        }
        if table.has_column("updated_at") {
            let now = inner.next_timestamp();
            updated.insert("updated_at".into(), json!(now));
        }
        let rows = inner.tables.entry(table).or_default();
        rows[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, table: Table, filters: &[Filter]) -> Result<u64, StoreError> {
        check_delete(table, filters)?;
        let mut inner = self.inner.lock().await;
        inner.check_writable(table)?;

        let rows = inner.tables.entry(table).or_default();
        let before = rows.len();
        rows.retain(|row| !filters.iter().all(|f| f.matches(row)));
        Ok((before - rows.len()) as u64)
    }

    /// Fails while any table is marked failing.
    async fn ping(&self) -> Result<(), StoreError> {
        let inner = self.inner.lock().await;
        Table::ALL
            .iter()
            .try_for_each(|table| inner.check_available(*table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn insert_applies_defaults() {
        let store = MemoryStore::new();
        let stored = store
            .insert(
                Table::Events,
                row(json!({ "title": "Wedding", "couple_id": Uuid::new_v4(), "event_date": "2027-06-12" })),
            )
            .await
            .unwrap();
        assert_eq!(stored["status"], json!("planning"));
        assert_eq!(stored["guest_count"], json!(0));
        assert_eq!(stored["planner_id"], Value::Null);
        assert!(stored["id"].is_string());
    }

    #[tokio::test]
    async fn ordering_puts_nulls_last_when_asked() {
        let store = MemoryStore::new();
        for rating in [json!(4.5), Value::Null, json!(4.9)] {
            store
                .insert(Table::Venues, row(json!({ "name": "v", "location": "x", "rating": rating })))
                .await
                .unwrap();
        }
        let desc = Select::from(Table::Venues).order_by("rating", false);
        let rows = store.select(&desc).await.unwrap();
        assert_eq!(rows[0]["rating"], Value::Null);

        let rows = store.select(&desc.nulls_last()).await.unwrap();
        let ratings: Vec<_> = rows.iter().map(|r| r["rating"].clone()).collect();
        assert_eq!(ratings, vec![json!(4.9), json!(4.5), Value::Null]);
    }

    #[tokio::test]
    async fn unique_role_assignment_enforced() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let assignment = row(json!({ "user_id": user, "role": "admin" }));
        store.insert(Table::UserRoles, assignment.clone()).await.unwrap();
        assert_matches!(
            store.insert(Table::UserRoles, assignment).await,
            Err(StoreError::InvalidQuery(_))
        );
    }

    #[tokio::test]
    async fn update_merges_and_missing_id_is_none() {
        let store = MemoryStore::new();
        let created = store
            .insert(Table::Vendors, row(json!({ "business_name": "Bloom", "category": "florist" })))
            .await
            .unwrap();
        let id: Uuid = serde_json::from_value(created["id"].clone()).unwrap();

        let updated = store
            .update(Table::Vendors, id, row(json!({ "approval_status": "approved" })))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated["approval_status"], json!("approved"));
        assert_eq!(updated["business_name"], json!("Bloom"));
        assert_ne!(updated["updated_at"], created["updated_at"]);

        assert!(store
            .update(Table::Vendors, Uuid::new_v4(), Row::new())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn failing_table_reports_unavailable() {
        let store = MemoryStore::new();
        store.fail(Table::Events).await;
        assert_matches!(
            store.select(&Select::from(Table::Events)).await,
            Err(StoreError::Unavailable(_))
        );
        store.recover(Table::Events).await;
        assert!(store.select(&Select::from(Table::Events)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn read_only_table_still_serves_reads() {
        let store = MemoryStore::new();
        let created = store
            .insert(Table::Vendors, row(json!({ "business_name": "Bloom", "category": "florist" })))
            .await
            .unwrap();
        let id: Uuid = serde_json::from_value(created["id"].clone()).unwrap();

        store.fail_writes(Table::Vendors).await;
        assert_eq!(store.select(&Select::from(Table::Vendors)).await.unwrap().len(), 1);
        assert_matches!(
            store.update(Table::Vendors, id, row(json!({ "rating": 5 }))).await,
            Err(StoreError::Unavailable(_))
        );

        store.recover(Table::Vendors).await;
        assert!(store.update(Table::Vendors, id, Row::new()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn unfiltered_delete_refused() {
        let store = MemoryStore::new();
        assert_matches!(
            store.delete(Table::Venues, &[]).await,
            Err(StoreError::InvalidQuery(_))
        );
    }

    #[tokio::test]
    async fn delete_by_id_removes_one_row() {
        let store = MemoryStore::new();
        let a = store
            .insert(Table::Profiles, row(json!({ "id": Uuid::new_v4(), "email": "a@x", "full_name": "A" })))
            .await
            .unwrap();
        store
            .insert(Table::Profiles, row(json!({ "id": Uuid::new_v4(), "email": "b@x", "full_name": "B" })))
            .await
            .unwrap();
        let id: Uuid = serde_json::from_value(a["id"].clone()).unwrap();
        assert!(store.delete_by_id(Table::Profiles, id).await.unwrap());
        assert_eq!(store.dump(Table::Profiles).await.len(), 1);
        assert!(!store.delete_by_id(Table::Profiles, id).await.unwrap());
    }
}
