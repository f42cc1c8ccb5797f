//! Dashboard aggregates, recomputed from scratch on every load.

use std::collections::HashSet;

use serde::Serialize;

use crate::status::{ApprovalStatus, EventStatus};
use crate::types::{Date, UserId};

/// Event fields the dashboard aggregates read.
pub trait EventFacts {
    fn status(&self) -> EventStatus;
    fn couple_id(&self) -> UserId;
    fn event_date(&self) -> Date;
    fn budget(&self) -> Option<f64>;
    fn guest_count(&self) -> Option<i32>;
}

/// Headline numbers on the planner dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlannerStats {
    pub total_events: usize,
    pub active_events: usize,
    pub total_clients: usize,
    pub total_budget: f64,
}

impl PlannerStats {
    pub fn compute<E: EventFacts>(events: &[E]) -> Self {
        let clients: HashSet<UserId> = events.iter().map(EventFacts::couple_id).collect();
        Self {
            total_events: events.len(),
            active_events: events.iter().filter(|e| e.status().is_active()).count(),
            total_clients: clients.len(),
            total_budget: events.iter().filter_map(EventFacts::budget).sum(),
        }
    }
}

/// Headline numbers on the couple dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CoupleSummary {
    pub total_events: usize,
    /// Events dated today or later that are not cancelled.
    pub upcoming_events: usize,
    pub total_budget: f64,
    pub total_guests: i64,
}

impl CoupleSummary {
    pub fn compute<E: EventFacts>(events: &[E], today: Date) -> Self {
        Self {
            total_events: events.len(),
            upcoming_events: events
                .iter()
                .filter(|e| e.event_date() >= today && e.status() != EventStatus::Cancelled)
                .count(),
            total_budget: events.iter().filter_map(EventFacts::budget).sum(),
            total_guests: events
                .iter()
                .filter_map(EventFacts::guest_count)
                .map(i64::from)
                .sum(),
        }
    }
}

/// Row counts the admin dashboard fetches from the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformCounts {
    pub users: i64,
    pub events: i64,
    pub vendors: i64,
    pub venues: i64,
    pub pending_bookings: i64,
}

/// Platform overview on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminAnalytics {
    pub total_users: i64,
    pub total_events: i64,
    pub total_vendors: i64,
    pub total_venues: i64,
    pub pending_vendors: usize,
    pub pending_venues: usize,
    pub pending_bookings: i64,
}

impl AdminAnalytics {
    /// Pending listing counts come from the loaded listing sequences.
    pub fn compute(
        counts: PlatformCounts,
        vendor_statuses: impl IntoIterator<Item = ApprovalStatus>,
        venue_statuses: impl IntoIterator<Item = ApprovalStatus>,
    ) -> Self {
        let pending = |it: &mut dyn Iterator<Item = ApprovalStatus>| {
            it.filter(|s| *s == ApprovalStatus::Pending).count()
        };
        Self {
            total_users: counts.users,
            total_events: counts.events,
            total_vendors: counts.vendors,
            total_venues: counts.venues,
            pending_vendors: pending(&mut vendor_statuses.into_iter()),
            pending_venues: pending(&mut venue_statuses.into_iter()),
            pending_bookings: counts.pending_bookings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    struct Ev {
        status: EventStatus,
        couple: UserId,
        date: Date,
        budget: Option<f64>,
        guests: Option<i32>,
    }

    impl EventFacts for Ev {
        fn status(&self) -> EventStatus {
            self.status
        }
        fn couple_id(&self) -> UserId {
            self.couple
        }
        fn event_date(&self) -> Date {
            self.date
        }
        fn budget(&self) -> Option<f64> {
            self.budget
        }
        fn guest_count(&self) -> Option<i32> {
            self.guests
        }
    }

    fn d(m: u32, day: u32) -> Date {
        Date::from_ymd_opt(2027, m, day).unwrap()
    }

    fn sample() -> Vec<Ev> {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        vec![
            Ev { status: EventStatus::Planning, couple: a, date: d(3, 1), budget: Some(20_000.0), guests: Some(120) },
            Ev { status: EventStatus::Confirmed, couple: a, date: d(6, 1), budget: None, guests: None },
            Ev { status: EventStatus::Completed, couple: b, date: d(1, 1), budget: Some(5_000.0), guests: Some(40) },
            Ev { status: EventStatus::Cancelled, couple: b, date: d(9, 1), budget: Some(1_000.0), guests: Some(10) },
        ]
    }

    #[test]
    fn planner_stats() {
        let stats = PlannerStats::compute(&sample());
        assert_eq!(stats.total_events, 4);
        assert_eq!(stats.active_events, 2);
        assert_eq!(stats.total_clients, 2);
        assert_eq!(stats.total_budget, 26_000.0);
    }

    #[test]
    fn planner_stats_empty() {
        assert_eq!(PlannerStats::compute::<Ev>(&[]), PlannerStats::default());
    }

    #[test]
    fn couple_summary_counts_upcoming() {
        let summary = CoupleSummary::compute(&sample(), d(2, 15));
        assert_eq!(summary.total_events, 4);
        assert_eq!(summary.upcoming_events, 2);
        assert_eq!(summary.total_guests, 170);
    }

    #[test]
    fn admin_pending_counts_from_listings() {
        use ApprovalStatus::*;
        let analytics = AdminAnalytics::compute(
            PlatformCounts {
                users: 10,
                events: 4,
                vendors: 3,
                venues: 2,
                pending_bookings: 1,
            },
            [Pending, Approved, Pending],
            [Rejected, Approved],
        );
        assert_eq!(analytics.pending_vendors, 2);
        assert_eq!(analytics.pending_venues, 0);
        assert_eq!(analytics.total_users, 10);
    }
}
