//! Client-side filtering for the venue and vendor directories.
//!
//! Filters run over whatever list was last loaded; they never issue a query.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::status::VendorCategory;

/// Fields the venue directory searches and filters on.
pub trait VenueListing {
    fn name(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn location(&self) -> &str;
    fn capacity(&self) -> Option<i32>;
}

/// Fields the vendor directory searches and filters on.
pub trait VendorListing {
    fn business_name(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn location(&self) -> Option<&str>;
    fn category(&self) -> VendorCategory;
}

// ---------------------------------------------------------------------------
// Capacity filter
// ---------------------------------------------------------------------------

/// Guest-capacity filter, written as `all`, `min-max` or an open-ended `min`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CapacityFilter {
    #[default]
    All,
    Range { min: i32, max: Option<i32> },
}

/// Buckets offered by the venue directory, as `(key, label)`.
pub const CAPACITY_PRESETS: &[(&str, &str)] = &[
    ("all", "All Sizes"),
    ("0-50", "Intimate (0-50 guests)"),
    ("51-100", "Small (51-100 guests)"),
    ("101-200", "Medium (101-200 guests)"),
    ("201-500", "Large (201-500 guests)"),
    ("501", "Grand (500+ guests)"),
];

impl CapacityFilter {
    /// Venues with no recorded capacity (or zero) never match a range.
    pub fn matches(self, capacity: Option<i32>) -> bool {
        match self {
            CapacityFilter::All => true,
            CapacityFilter::Range { min, max } => match capacity {
                None | Some(0) => false,
                Some(c) => c >= min && max.is_none_or(|max| c <= max),
            },
        }
    }
}

impl FromStr for CapacityFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "all" {
            return Ok(CapacityFilter::All);
        }
        let invalid = || CoreError::validation(format!("Invalid capacity filter '{s}'"));
        let (min, max) = match s.split_once('-') {
            Some((min, max)) => (min, Some(max)),
            None => (s, None),
        };
        let min: i32 = min.trim().parse().map_err(|_| invalid())?;
        let max = max
            .map(|m| m.trim().parse::<i32>().map_err(|_| invalid()))
            .transpose()?;
        if min < 0 || max.is_some_and(|max| max < min) {
            return Err(invalid());
        }
        Ok(CapacityFilter::Range { min, max })
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Query-string shape of the venue directory filters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueFilterParams {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub capacity: String,
}

#[derive(Debug, Clone, Default)]
pub struct VenueQuery {
    pub search: String,
    pub capacity: CapacityFilter,
}

impl TryFrom<&VenueFilterParams> for VenueQuery {
    type Error = CoreError;

    fn try_from(params: &VenueFilterParams) -> Result<Self, Self::Error> {
        Ok(VenueQuery {
            search: params.search.clone(),
            capacity: params.capacity.parse()?,
        })
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Apply search text and capacity range, preserving input order.
pub fn filter_venues<'a, V: VenueListing>(venues: &'a [V], query: &VenueQuery) -> Vec<&'a V> {
    let needle = query.search.trim().to_lowercase();
    venues
        .iter()
        .filter(|v| {
            needle.is_empty()
                || contains_ci(v.name(), &needle)
                || v.description().is_some_and(|d| contains_ci(d, &needle))
                || contains_ci(v.location(), &needle)
        })
        .filter(|v| query.capacity.matches(v.capacity()))
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorQuery {
    #[serde(default)]
    pub search: String,
    pub category: Option<VendorCategory>,
}

/// Apply search text and category, preserving input order.
pub fn filter_vendors<'a, V: VendorListing>(vendors: &'a [V], query: &VendorQuery) -> Vec<&'a V> {
    let needle = query.search.trim().to_lowercase();
    vendors
        .iter()
        .filter(|v| query.category.is_none_or(|c| v.category() == c))
        .filter(|v| {
            needle.is_empty()
                || contains_ci(v.business_name(), &needle)
                || v.description().is_some_and(|d| contains_ci(d, &needle))
                || v.location().is_some_and(|l| contains_ci(l, &needle))
        })
        .collect()
}
