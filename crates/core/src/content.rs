//! Static copy for the landing page and the cultural activities catalog.

use serde::Serialize;

use crate::roles::Role;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

/// Audience blurb on the landing page, linked to the role it targets.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Audience {
    pub role: Role,
    pub title: &'static str,
    pub description: &'static str,
}

pub const FEATURES: &[Feature] = &[
    Feature {
        title: "Event Planning",
        description: "Organize every detail with intelligent task management and automated reminders",
    },
    Feature {
        title: "Vendor Directory",
        description: "Browse and book top-rated vendors with transparent pricing and reviews",
    },
    Feature {
        title: "Venue Discovery",
        description: "Find your perfect venue with detailed filters and availability tracking",
    },
    Feature {
        title: "Cultural Integration",
        description: "Celebrate your heritage with curated cultural performances and exhibitions",
    },
    Feature {
        title: "Secure Payments",
        description: "Safe and transparent payment processing for all bookings",
    },
    Feature {
        title: "Budget Analytics",
        description: "Track expenses and stay on budget with real-time insights",
    },
];

pub const AUDIENCES: &[Audience] = &[
    Audience {
        role: Role::Couple,
        title: "For Couples",
        description: "Plan your dream wedding with tools designed for you",
    },
    Audience {
        role: Role::Planner,
        title: "For Planners",
        description: "Manage multiple events effortlessly",
    },
    Audience {
        role: Role::Vendor,
        title: "For Vendors",
        description: "Grow your wedding business",
    },
    Audience {
        role: Role::VenueManager,
        title: "For Venue Managers",
        description: "Maximize your venue bookings",
    },
];

// ---------------------------------------------------------------------------
// Cultural catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Performance {
    pub id: u32,
    pub name: &'static str,
    pub kind: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub price: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SuggestionGroup {
    pub title: &'static str,
    pub suggestions: &'static [&'static str],
}

pub const PERFORMANCES: &[Performance] = &[
    Performance {
        id: 1,
        name: "Traditional Dance Ensemble",
        kind: "Dance Performance",
        description: "Experience authentic cultural dances performed by skilled artists",
        duration: "45 minutes",
        price: "$800",
    },
    Performance {
        id: 2,
        name: "Classical Orchestra",
        kind: "Musical Performance",
        description: "Live classical music to create an elegant atmosphere",
        duration: "2 hours",
        price: "$1,500",
    },
    Performance {
        id: 3,
        name: "Cultural Art Exhibition",
        kind: "Visual Arts",
        description: "Curated display of traditional artworks and crafts",
        duration: "Full event",
        price: "$1,200",
    },
];

pub const SUGGESTIONS: &[SuggestionGroup] = &[
    SuggestionGroup {
        title: "Based on Your Event Theme",
        suggestions: &[
            "Traditional Henna Artist - Perfect for your cultural celebration",
            "Folk Music Band - Matches your preference for live entertainment",
            "Cultural Storyteller - Adds unique narrative element",
        ],
    },
    SuggestionGroup {
        title: "Popular in Your Area",
        suggestions: &[
            "Local Dance Troupe - Highly rated by recent couples",
            "Contemporary Fusion Band - Blends traditional and modern",
            "Cultural Cuisine Demonstration - Interactive guest experience",
        ],
    },
];
