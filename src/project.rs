//! Derives the rendered restaurant list from the base collection plus live
//! criteria: rank-sort first, then AND-combined predicate filters. Pure and
//! fully recomputed on every input change; inputs are never mutated.

use std::collections::BTreeSet;

use crate::model::{RANK_MISSING, Restaurant};

/// "Near Campus" cutoff, in meters.
pub const NEAR_CAMPUS_MAX_METERS: f64 = 1000.0;

/// "≤ $8" maps to the maps-provider price tier scale.
pub const BUDGET_MAX_PRICE_LEVEL: u8 = 1;

/// The fixed chip row. Only some chips have a backing field in the data
/// source; the rest are pass-through until the backend grows the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Chip {
    UnderEight,
    HappyHour,
    NearCampus,
    Vegetarian,
    OpenNow,
}

impl Chip {
    pub const ALL: [Chip; 5] = [
        Chip::UnderEight,
        Chip::HappyHour,
        Chip::NearCampus,
        Chip::Vegetarian,
        Chip::OpenNow,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Chip::UnderEight => "≤ $8",
            Chip::HappyHour => "Happy Hour",
            Chip::NearCampus => "Near Campus",
            Chip::Vegetarian => "Vegetarian",
            Chip::OpenNow => "Open Now",
        }
    }

    pub fn from_label(label: &str) -> Option<Chip> {
        Chip::ALL.into_iter().find(|c| c.label() == label)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Criteria {
    /// Free-text query, matched case-insensitively against the display name.
    pub query: String,
    pub active: BTreeSet<Chip>,
}

impl Criteria {
    pub fn toggle(&mut self, chip: Chip) {
        if !self.active.remove(&chip) {
            self.active.insert(chip);
        }
    }
}

/// Sort ascending by distance (missing distance sorts last, stable ties),
/// then keep items passing every active predicate.
pub fn project(base: &[Restaurant], criteria: &Criteria) -> Vec<Restaurant> {
    let mut out: Vec<Restaurant> = base.to_vec();
    out.sort_by(|a, b| rank_key(a).total_cmp(&rank_key(b)));
    let query = criteria.query.trim().to_lowercase();
    out.retain(|item| {
        let name_ok = query.is_empty() || item.name.to_lowercase().contains(&query);
        name_ok && criteria.active.iter().all(|chip| passes(item, *chip))
    });
    out
}

fn rank_key(item: &Restaurant) -> f64 {
    item.distance_value.unwrap_or(RANK_MISSING)
}

/// Predicate for one active chip. Fail-closed: when the chip has a backing
/// field, an item lacking that field is excluded.
fn passes(item: &Restaurant, chip: Chip) -> bool {
    match chip {
        Chip::UnderEight => item
            .price_level
            .is_some_and(|p| p <= BUDGET_MAX_PRICE_LEVEL),
        Chip::NearCampus => item
            .distance_value
            .is_some_and(|d| d <= NEAR_CAMPUS_MAX_METERS),
        // No backing field yet; active or not, everything passes.
        Chip::HappyHour | Chip::Vegetarian | Chip::OpenNow => true,
    }
}
