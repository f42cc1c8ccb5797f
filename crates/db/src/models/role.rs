//! Role assignment model.

use serde::{Deserialize, Serialize};
use wedplan_core::roles::Role;
use wedplan_core::types::{RowId, Timestamp, UserId};

use crate::models::profile::Profile;

/// A row from the `user_roles` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub id: RowId,
    pub user_id: UserId,
    pub role: Role,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateRoleAssignment {
    pub user_id: UserId,
    pub role: Role,
}

/// A profile joined with every role it holds, as listed on the admin screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWithRoles {
    #[serde(flatten)]
    pub profile: Profile,
    pub roles: Vec<Role>,
}
