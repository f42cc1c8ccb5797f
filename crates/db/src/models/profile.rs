//! Account profile model.

use serde::{Deserialize, Serialize};
use wedplan_core::types::{Timestamp, UserId};

/// A row from the `profiles` table. `id` is the auth provider's user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a profile on first sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct CreateProfile {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
}
