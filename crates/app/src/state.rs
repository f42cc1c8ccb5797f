use std::sync::Arc;

use wedplan_db::storage::BlobStore;
use wedplan_db::DataStore;

use crate::budget_store::BudgetStore;
use crate::config::AppConfig;
use crate::navigator::Navigator;
use crate::session::SessionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (everything is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Remote data store.
    pub store: Arc<dyn DataStore>,
    /// Object storage for portfolio images.
    pub blobs: Arc<dyn BlobStore>,
    /// The single session for this running application.
    pub session: Arc<SessionStore>,
    /// Current screen tracking.
    pub navigator: Arc<Navigator>,
    /// On-device budget document.
    pub budget: Arc<BudgetStore>,
    pub config: Arc<AppConfig>,
}
