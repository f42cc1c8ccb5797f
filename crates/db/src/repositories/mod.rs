//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations that
//! accept `&dyn DataStore` as the first argument. Every list is scoped by
//! an ownership or visibility filter.

pub mod availability_repo;
pub mod booking_repo;
pub mod event_repo;
pub mod inquiry_repo;
pub mod profile_repo;
pub mod role_repo;
pub mod vendor_repo;
pub mod venue_repo;

pub use availability_repo::AvailabilityRepo;
pub use booking_repo::BookingRepo;
pub use event_repo::EventRepo;
pub use inquiry_repo::InquiryRepo;
pub use profile_repo::ProfileRepo;
pub use role_repo::RoleRepo;
pub use vendor_repo::VendorRepo;
pub use venue_repo::VenueRepo;
