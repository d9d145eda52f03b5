//! Fixed trade-category catalog and crew roster.
//!
//! The catalog drives both cost grouping and schedule sequencing: the
//! array order below IS the construction sequence, and the overlap group
//! marks categories whose tasks may run concurrently.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Categories sharing a group may overlap on the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapGroup {
    Structure,
    Services,
    Finishes,
    Closeout,
}

/// One entry of the fixed trade catalog.
#[derive(Debug, Clone, Copy)]
pub struct TradeCategory {
    pub id: &'static str,
    pub name: &'static str,
    /// Nominal task length in calendar days before cost scaling.
    pub base_days: i64,
    pub overlap_group: Option<OverlapGroup>,
}

/// The full catalog in construction-sequence order.
pub static CATEGORIES: [TradeCategory; 18] = [
    TradeCategory {
        id: "C01",
        name: "Demolition",
        base_days: 4,
        overlap_group: Some(OverlapGroup::Structure),
    },
    TradeCategory {
        id: "C02",
        name: "Structural",
        base_days: 8,
        overlap_group: Some(OverlapGroup::Structure),
    },
    TradeCategory {
        id: "C03",
        name: "Masonry",
        base_days: 6,
        overlap_group: None,
    },
    TradeCategory {
        id: "C04",
        name: "Waterproofing",
        base_days: 3,
        overlap_group: None,
    },
    TradeCategory {
        id: "C05",
        name: "Plumbing",
        base_days: 4,
        overlap_group: Some(OverlapGroup::Services),
    },
    TradeCategory {
        id: "C06",
        name: "Electrical",
        base_days: 4,
        overlap_group: Some(OverlapGroup::Services),
    },
    TradeCategory {
        id: "C07",
        name: "HVAC",
        base_days: 5,
        overlap_group: Some(OverlapGroup::Services),
    },
    TradeCategory {
        id: "C08",
        name: "Insulation",
        base_days: 3,
        overlap_group: None,
    },
    TradeCategory {
        id: "C09",
        name: "Carpentry",
        base_days: 7,
        overlap_group: Some(OverlapGroup::Finishes),
    },
    TradeCategory {
        id: "C10",
        name: "Flooring",
        base_days: 4,
        overlap_group: Some(OverlapGroup::Finishes),
    },
    TradeCategory {
        id: "C11",
        name: "Painting",
        base_days: 5,
        overlap_group: Some(OverlapGroup::Finishes),
    },
    TradeCategory {
        id: "C12",
        name: "Tiling",
        base_days: 4,
        overlap_group: None,
    },
    TradeCategory {
        id: "C13",
        name: "Wallcovering",
        base_days: 3,
        overlap_group: None,
    },
    TradeCategory {
        id: "C14",
        name: "Kitchen",
        base_days: 3,
        overlap_group: None,
    },
    TradeCategory {
        id: "C15",
        name: "Bathroom",
        base_days: 3,
        overlap_group: None,
    },
    TradeCategory {
        id: "C16",
        name: "Glazing",
        base_days: 3,
        overlap_group: Some(OverlapGroup::Closeout),
    },
    TradeCategory {
        id: "C17",
        name: "Signage",
        base_days: 2,
        overlap_group: Some(OverlapGroup::Closeout),
    },
    TradeCategory {
        id: "C18",
        name: "Cleanup",
        base_days: 2,
        overlap_group: Some(OverlapGroup::Closeout),
    },
];

/// Fixed crew roster used for round-robin task assignment.
pub const ROSTER: [&str; 5] = ["Alvarez", "Chen", "Park", "Novak", "Okafor"];

static CATEGORY_INDEX: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    CATEGORIES
        .iter()
        .enumerate()
        .map(|(idx, category)| (category.id, idx))
        .collect()
});

/// Looks up a catalog entry by id.
pub fn category(id: &str) -> Option<&'static TradeCategory> {
    CATEGORY_INDEX.get(id).map(|&idx| &CATEGORIES[idx])
}

/// Position of a category in the construction sequence, if known.
pub fn sequence_index(id: &str) -> Option<usize> {
    CATEGORY_INDEX.get(id).copied()
}

/// Display name for a category id, falling back to the raw id.
pub fn display_name(id: &str) -> &str {
    category(id).map(|c| c.name).unwrap_or(id)
}
