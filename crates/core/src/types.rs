/// Every row in the hosted store is keyed by a UUID, and user ids are the
/// auth provider's subject UUIDs.
pub type RowId = uuid::Uuid;

/// Identity of an authenticated account. Stable for the account lifetime.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (event dates, availability entries) carry no time zone.
pub type Date = chrono::NaiveDate;
