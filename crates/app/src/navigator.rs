//! Tracks which screen is current.
//!
//! Every navigation bumps a generation counter and hands the screen a
//! [`ScreenTicket`]. Results that arrive for a ticket that is no longer
//! current are dropped instead of being applied to a screen the user has
//! left. The navigator also keeps the last successfully loaded sections of
//! the current screen so a failed reload can fall back to them.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tokio::sync::Mutex;
use wedplan_core::routes::Route;

use crate::screens::ScreenState;

/// Proof of which navigation a screen instance belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenTicket {
    pub route: Route,
    pub generation: u64,
}

#[derive(Debug, Default)]
struct Retained {
    route: Option<Route>,
    sections: HashMap<&'static str, Value>,
    rendered: Option<ScreenState>,
}

#[derive(Debug, Default)]
pub struct Navigator {
    generation: AtomicU64,
    retained: Mutex<Retained>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `route`. Leaving for a different route discards what the
    /// previous screen had loaded.
    pub async fn enter(&self, route: Route) -> ScreenTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut retained = self.retained.lock().await;
        if retained.route != Some(route) {
            retained.route = Some(route);
            retained.sections.clear();
            retained.rendered = None;
        }
        tracing::debug!(route = route.path(), generation, "Entered screen");
        ScreenTicket { route, generation }
    }

    pub fn is_current(&self, ticket: &ScreenTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Remember a successfully loaded section of the current screen. A load
    /// for a superseded ticket is not kept, even on the same route.
    pub async fn retain(&self, ticket: &ScreenTicket, section: &'static str, value: Value) {
        let mut retained = self.retained.lock().await;
        if retained.route == Some(ticket.route) && self.is_current(ticket) {
            retained.sections.insert(section, value);
        }
    }

    /// The last successfully loaded copy of a section, if the screen has not
    /// changed since.
    pub async fn recall(&self, ticket: &ScreenTicket, section: &'static str) -> Option<Value> {
        let retained = self.retained.lock().await;
        if retained.route != Some(ticket.route) {
            return None;
        }
        retained.sections.get(section).cloned()
    }

    pub async fn record_rendered(&self, ticket: &ScreenTicket, state: ScreenState) {
        let mut retained = self.retained.lock().await;
        if retained.route == Some(ticket.route) {
            retained.rendered = Some(state);
        }
    }

    /// Drop everything retained. Called when the signed-in identity changes
    /// so one user's rows never back another user's screen.
    pub async fn forget(&self) {
        let mut retained = self.retained.lock().await;
        *retained = Retained::default();
    }

    /// The state the current screen last rendered in.
    pub async fn last_rendered(&self, ticket: &ScreenTicket) -> Option<ScreenState> {
        let retained = self.retained.lock().await;
        retained
            .rendered
            .filter(|_| retained.route == Some(ticket.route))
    }
}
