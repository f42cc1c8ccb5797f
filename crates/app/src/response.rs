//! Shared response envelope types for screen handlers.
//!
//! Plain reads use a `{ "data": ... }` envelope. Screens wrap their view in
//! [`crate::screens::ScreenResponse`], which adds state and toasts.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
