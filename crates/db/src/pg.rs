//! [`DataStore`] over a Postgres pool.
//!
//! Rows travel as JSONB: reads go through `to_jsonb(t.*)`, writes through
//! `jsonb_populate_record` limited to the supplied columns so that column
//! defaults and the `updated_at` triggers still apply.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder};
use wedplan_core::types::RowId;

use crate::error::StoreError;
use crate::query::{Filter, Row, Select, Table};
use crate::store::{check_delete, DataStore};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filters: &[Filter]) {
    for (i, filter) in filters.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match filter {
            Filter::Eq { column, value } => {
                qb.push("t.")
                    .push(column)
                    .push("::text = ")
                    .push_bind(value.clone());
            }
            Filter::In { column, values } => {
                qb.push("t.")
                    .push(column)
                    .push("::text = ANY(")
                    .push_bind(values.clone())
                    .push(")");
            }
        }
    }
}

fn into_row(value: Value) -> Result<Row, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidQuery(format!(
            "expected a JSON object row, got {other}"
        ))),
    }
}

fn column_list(row: &Row) -> String {
    row.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[async_trait]
impl DataStore for PgStore {
    async fn select(&self, query: &Select) -> Result<Vec<Row>, StoreError> {
        query.validate()?;
        if query.is_trivially_empty() {
            return Ok(Vec::new());
        }

        let mut qb = QueryBuilder::new(format!(
            "SELECT to_jsonb(t.*) FROM {} AS t",
            query.table.name()
        ));
        push_filters(&mut qb, &query.filters);
        for (i, order) in query.order.iter().enumerate() {
            qb.push(if i == 0 { " ORDER BY t." } else { ", t." })
                .push(&order.column)
                .push(if order.ascending { " ASC" } else { " DESC" })
                .push(if order.nulls_first {
                    " NULLS FIRST"
                } else {
                    " NULLS LAST"
                });
        }
        if let Some(limit) = query.limit {
            qb.push(" LIMIT ").push_bind(limit as i64);
        }

        let rows: Vec<Value> = qb.build_query_scalar().fetch_all(&self.pool).await?;
        rows.into_iter().map(into_row).collect()
    }

    async fn count(&self, query: &Select) -> Result<i64, StoreError> {
        query.validate()?;
        if query.is_trivially_empty() {
            return Ok(0);
        }
        let mut qb = QueryBuilder::new(format!(
            "SELECT COUNT(*) FROM {} AS t",
            query.table.name()
        ));
        push_filters(&mut qb, &query.filters);
        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn insert(&self, table: Table, row: Row) -> Result<Row, StoreError> {
        table.check_row(&row)?;
        let name = table.name();

        let value: Value = if row.is_empty() {
            let sql = format!("INSERT INTO {name} AS t DEFAULT VALUES RETURNING to_jsonb(t.*)");
            sqlx::query_scalar::<_, Value>(&sql).fetch_one(&self.pool).await?
        } else {
            let columns = column_list(&row);
            let sql = format!(
                "INSERT INTO {name} AS t ({columns})
                 SELECT {columns} FROM jsonb_populate_record(NULL::{name}, $1)
                 RETURNING to_jsonb(t.*)"
            );
            sqlx::query_scalar::<_, Value>(&sql)
                .bind(Value::Object(row))
                .fetch_one(&self.pool)
                .await?
        };
        into_row(value)
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
        let name = table.name();

        let value: Option<Value> = if changes.is_empty() {
            let sql = format!("SELECT to_jsonb(t.*) FROM {name} AS t WHERE t.id = $1");
            sqlx::query_scalar::<_, Value>(&sql)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
        } else {
            let assignments = changes
                .keys()
                .map(|c| format!("{c} = r.{c}"))
                .collect::<Vec<_>>()
                .join(", ");
            let sql = format!(
                "UPDATE {name} AS t SET {assignments}
                 FROM jsonb_populate_record(NULL::{name}, $1) AS r
                 WHERE t.id = $2
                 RETURNING to_jsonb(t.*)"
            );
            sqlx::query_scalar::<_, Value>(&sql)
                .bind(Value::Object(changes))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
        };
        value.map(into_row).transpose()
    }

    async fn delete(&self, table: Table, filters: &[Filter]) -> Result<u64, StoreError> {
        check_delete(table, filters)?;
        let mut qb = QueryBuilder::new(format!("DELETE FROM {} AS t", table.name()));
        push_filters(&mut qb, filters);
        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
