//! Repository for the `user_roles` table.

use std::collections::HashMap;

use wedplan_core::roles::Role;
use wedplan_core::types::UserId;

use crate::error::StoreError;
use crate::models::role::{CreateRoleAssignment, RoleAssignment, UserWithRoles};
use crate::query::{from_row, from_rows, to_row, Filter, Select, Table};
use crate::repositories::ProfileRepo;
use crate::store::DataStore;

pub struct RoleRepo;

impl RoleRepo {
    /// Every role held by `user_id`, in assignment order.
    pub async fn roles_for(store: &dyn DataStore, user_id: UserId) -> Result<Vec<Role>, StoreError> {
        let rows = store
            .select(
                &Select::from(Table::UserRoles)
                    .eq("user_id", user_id)
                    .order_by("created_at", true),
            )
            .await?;
        let assignments: Vec<RoleAssignment> = from_rows(rows)?;
        Ok(assignments.into_iter().map(|a| a.role).collect())
    }

    pub async fn list(store: &dyn DataStore) -> Result<Vec<RoleAssignment>, StoreError> {
        let rows = store.select(&Select::from(Table::UserRoles)).await?;
        from_rows(rows)
    }

    /// Grant a role. Fails if the user already holds it.
    pub async fn assign(
        store: &dyn DataStore,
        user_id: UserId,
        role: Role,
    ) -> Result<RoleAssignment, StoreError> {
        let input = CreateRoleAssignment { user_id, role };
        let row = store.insert(Table::UserRoles, to_row(&input)?).await?;
        from_row(row)
    }

    /// Revoke a role. Returns `true` if an assignment was removed.
    pub async fn revoke(store: &dyn DataStore, user_id: UserId, role: Role) -> Result<bool, StoreError> {
        let removed = store
            .delete(
                Table::UserRoles,
                &[Filter::eq("user_id", user_id), Filter::eq("role", role)],
            )
            .await?;
        Ok(removed > 0)
    }

    /// Profiles (newest first) joined with the roles each one holds.
    pub async fn users_with_roles(store: &dyn DataStore) -> Result<Vec<UserWithRoles>, StoreError> {
        let (profiles, assignments) =
            futures::try_join!(ProfileRepo::list(store), Self::list(store))?;

        let mut by_user: HashMap<UserId, Vec<Role>> = HashMap::new();
        for assignment in assignments {
            by_user.entry(assignment.user_id).or_default().push(assignment.role);
        }
        Ok(profiles
            .into_iter()
            .map(|profile| {
                let mut roles = by_user.remove(&profile.id).unwrap_or_default();
                roles.sort();
                UserWithRoles { profile, roles }
            })
            .collect())
    }
}
