//! Admin review patch shared by vendors and venues.

use serde::Serialize;
use wedplan_core::error::CoreError;
use wedplan_core::status::ApprovalStatus;
use wedplan_core::validation::validate_rejection_reason;

/// Patch applied to a listing when an admin reviews it.
///
/// `rejection_reason` always serializes, so approving a previously rejected
/// listing clears the old reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovalChange {
    pub approval_status: ApprovalStatus,
    pub rejection_reason: Option<String>,
}

impl ApprovalChange {
    /// Build a patch, refusing a rejection without a non-blank reason.
    pub fn new(status: ApprovalStatus, reason: Option<&str>) -> Result<Self, CoreError> {
        Ok(Self {
            approval_status: status,
            rejection_reason: validate_rejection_reason(status, reason)?,
        })
    }
}
