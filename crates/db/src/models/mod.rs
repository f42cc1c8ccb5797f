//! Entity models and DTOs.
//!
//! Each submodule contains:
//! - A `Deserialize` + `Serialize` entity struct matching the stored row
//! - A `Serialize` create DTO for inserts (omitted fields take table defaults)
//! - Where the screens patch rows, a small update DTO

pub mod approval;
pub mod availability;
pub mod booking;
pub mod event;
pub mod inquiry;
pub mod profile;
pub mod role;
pub mod vendor;
pub mod venue;
