//! Table catalog, row shape and the select builder shared by every store.
//!
//! Column names are always checked against [`Table::columns`] before they
//! reach a store, so implementations may splice them into SQL directly.
//! Filter values are compared by their text form, which is how the hosted
//! store's REST filters behave.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;

/// One row as returned by the store: column name to JSON value.
pub type Row = serde_json::Map<String, Value>;

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Profiles,
    UserRoles,
    Events,
    Vendors,
    Venues,
    VenueAvailability,
    BookingRequests,
    VendorInquiries,
}

impl Table {
    pub const ALL: &'static [Table] = &[
        Table::Profiles,
        Table::UserRoles,
        Table::Events,
        Table::Vendors,
        Table::Venues,
        Table::VenueAvailability,
        Table::BookingRequests,
        Table::VendorInquiries,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::Profiles => "profiles",
            Table::UserRoles => "user_roles",
            Table::Events => "events",
            Table::Vendors => "vendors",
            Table::Venues => "venues",
            Table::VenueAvailability => "venue_availability",
            Table::BookingRequests => "booking_requests",
            Table::VendorInquiries => "vendor_inquiries",
        }
    }

    /// Every column of the table, as declared in `db/migrations`.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::Profiles => &[
                "id", "email", "full_name", "phone", "avatar_url", "created_at", "updated_at",
            ],
            Table::UserRoles => &["id", "user_id", "role", "created_at"],
            Table::Events => &[
                "id",
                "couple_id",
                "planner_id",
                "title",
                "description",
                "event_date",
                "venue_location",
                "budget",
                "guest_count",
                "status",
                "created_at",
                "updated_at",
            ],
            Table::Vendors => &[
                "id",
                "user_id",
                "business_name",
                "category",
                "description",
                "location",
                "price_range",
                "portfolio_images",
                "rating",
                "review_count",
                "approval_status",
                "rejection_reason",
                "created_at",
                "updated_at",
            ],
            Table::Venues => &[
                "id",
                "manager_id",
                "name",
                "description",
                "location",
                "capacity",
                "price_per_day",
                "amenities",
                "images",
                "rating",
                "review_count",
                "approval_status",
                "rejection_reason",
                "created_at",
                "updated_at",
            ],
            Table::VenueAvailability => &[
                "id", "venue_id", "date", "is_available", "notes", "created_at", "updated_at",
            ],
            Table::BookingRequests => &[
                "id",
                "venue_id",
                "event_id",
                "requester_id",
                "request_date",
                "guest_count",
                "message",
                "status",
                "created_at",
                "updated_at",
            ],
            Table::VendorInquiries => &[
                "id",
                "vendor_id",
                "event_id",
                "inquirer_id",
                "message",
                "status",
                "created_at",
                "updated_at",
            ],
        }
    }

    pub fn has_column(self, column: &str) -> bool {
        self.columns().contains(&column)
    }

    pub fn check_column(self, column: &str) -> Result<(), StoreError> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(StoreError::UnknownColumn {
                table: self.name(),
                column: column.to_string(),
            })
        }
    }

    /// Reject a row carrying any column the table does not declare.
    pub fn check_row(self, row: &Row) -> Result<(), StoreError> {
        row.keys().try_for_each(|column| self.check_column(column))
    }
}

// ---------------------------------------------------------------------------
// Filters and ordering
// ---------------------------------------------------------------------------

/// Row predicate. Values are compared against the column's text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq { column: String, value: String },
    In { column: String, values: Vec<String> },
}

impl Filter {
    pub fn eq(column: &str, value: impl Display) -> Self {
        Filter::Eq {
            column: column.to_string(),
            value: value.to_string(),
        }
    }

    pub fn is_in<V: Display>(column: &str, values: impl IntoIterator<Item = V>) -> Self {
        Filter::In {
            column: column.to_string(),
            values: values.into_iter().map(|v| v.to_string()).collect(),
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Filter::Eq { column, .. } | Filter::In { column, .. } => column,
        }
    }

    /// Evaluate against a JSON row. A missing or null column never matches.
    pub fn matches(&self, row: &Row) -> bool {
        let Some(text) = row.get(self.column()).and_then(value_text) else {
            return false;
        };
        match self {
            Filter::Eq { value, .. } => text == *value,
            Filter::In { values, .. } => values.contains(&text),
        }
    }
}

/// Text form of a scalar JSON value, or `None` for null and composites.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
    /// Defaults to Postgres behaviour: nulls sort first when descending.
    pub nulls_first: bool,
}

// ---------------------------------------------------------------------------
// Select builder
// ---------------------------------------------------------------------------

/// A row query: `Select::from(Table::Venues).eq("manager_id", id).order_by("created_at", false)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    pub table: Table,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    pub limit: Option<usize>,
}

impl Select {
    pub fn from(table: Table) -> Self {
        Self {
            table,
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    pub fn is_in<V: Display>(mut self, column: &str, values: impl IntoIterator<Item = V>) -> Self {
        self.filters.push(Filter::is_in(column, values));
        self
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order.push(Order {
            column: column.to_string(),
            ascending,
            nulls_first: !ascending,
        });
        self
    }

    /// Place nulls after non-null values for the most recent `order_by`.
    pub fn nulls_last(mut self) -> Self {
        if let Some(last) = self.order.last_mut() {
            last.nulls_first = false;
        }
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// `true` when a membership filter has no values; such a query matches nothing.
    pub fn is_trivially_empty(&self) -> bool {
        self.filters
            .iter()
            .any(|f| matches!(f, Filter::In { values, .. } if values.is_empty()))
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        for filter in &self.filters {
            self.table.check_column(filter.column())?;
        }
        for order in &self.order {
            self.table.check_column(&order.column)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Row conversion
// ---------------------------------------------------------------------------

/// Serialize a DTO into a row. The DTO must serialize to a JSON object.
pub fn to_row<T: Serialize>(value: &T) -> Result<Row, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidQuery(format!(
            "expected an object row, got {other}"
        ))),
    }
}

/// Decode a row into a typed model.
pub fn from_row<T: DeserializeOwned>(row: Row) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(row))?)
}

pub fn from_rows<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, StoreError> {
    rows.into_iter().map(from_row).collect()
}
