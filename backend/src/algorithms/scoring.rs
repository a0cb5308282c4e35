//! Recommendation score and explanation for a single shelter.
//!
//! The score is an additive heuristic starting from [`BASE_SCORE`]:
//!
//! | factor | contribution |
//! |---|---|
//! | distance | −10 per km |
//! | occupancy level | low +20, medium +10, high −10 |
//! | rating | +5 per star |
//! | opening hours mention "24" | +15 |
//! | amenities | +3 each |
//!
//! The result is clamped below at zero; there is no upper bound.

use crate::models::{OccupancyLevel, ShelterWithDistance};

pub const BASE_SCORE: f64 = 100.0;
pub const DISTANCE_PENALTY_PER_KM: f64 = 10.0;
pub const RATING_WEIGHT: f64 = 5.0;
pub const ALL_DAY_BONUS: f64 = 15.0;
pub const AMENITY_WEIGHT: f64 = 3.0;

/// Maximum number of phrases in a recommendation reason.
pub const MAX_REASON_PHRASES: usize = 3;

fn occupancy_adjustment(level: OccupancyLevel) -> f64 {
    match level {
        OccupancyLevel::Low => 20.0,
        OccupancyLevel::Medium => 10.0,
        OccupancyLevel::High => -10.0,
    }
}

/// Desirability of a shelter for the user it was measured from.
pub fn score(candidate: &ShelterWithDistance) -> f64 {
    let shelter = &candidate.shelter;

    let mut score = BASE_SCORE;
    score -= candidate.distance * DISTANCE_PENALTY_PER_KM;
    score += occupancy_adjustment(shelter.occupancy_level);
    score += shelter.rating * RATING_WEIGHT;
    if shelter.is_open_24h() {
        score += ALL_DAY_BONUS;
    }
    score += shelter.amenities.len() as f64 * AMENITY_WEIGHT;

    score.max(0.0)
}

/// Short explanation of why a shelter was recommended.
///
/// Phrases are checked in a fixed priority order and the first
/// [`MAX_REASON_PHRASES`] matches are joined with `", "`. Returns an empty
/// string when nothing applies. `rank` does not change the text.
pub fn reason(candidate: &ShelterWithDistance, _rank: usize) -> String {
    let shelter = &candidate.shelter;

    let phrases = [
        (candidate.distance < 1.0, "close distance"),
        (shelter.occupancy_level == OccupancyLevel::Low, "ample space"),
        (shelter.is_open_24h(), "24-hour availability"),
        (shelter.rating > 4.5, "high satisfaction"),
        (shelter.has_amenity("wifi"), "Wi-Fi available"),
        (shelter.has_amenity("free"), "free admission"),
    ];

    phrases
        .iter()
        .filter(|(matched, _)| *matched)
        .map(|(_, phrase)| *phrase)
        .take(MAX_REASON_PHRASES)
        .collect::<Vec<_>>()
        .join(", ")
}
