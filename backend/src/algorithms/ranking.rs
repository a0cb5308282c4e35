//! Distance annotation and top-N shelter recommendation.

use super::distance::haversine_km;
use super::error::AnalysisResult;
use super::scoring::{reason, score};
use crate::models::{Coordinate, Recommendation, Shelter, ShelterWithDistance};

pub const DEFAULT_TOP_N: usize = 3;

/// Pairs every shelter with its distance from `origin`, keeping input order.
pub fn with_distance(
    shelters: &[Shelter],
    origin: &Coordinate,
) -> AnalysisResult<Vec<ShelterWithDistance>> {
    origin.validate()?;

    Ok(shelters
        .iter()
        .map(|shelter| {
            let km = haversine_km(origin, &shelter.location);
            ShelterWithDistance::new(shelter.clone(), km)
        })
        .collect())
}

/// Ranks shelters by recommendation score and returns the best `top_n`.
///
/// Sorting is stable, so shelters with equal scores keep their input order.
/// Each returned entry carries its score in `recommendation_score`.
pub fn recommend(
    shelters: &[Shelter],
    origin: &Coordinate,
    top_n: usize,
) -> AnalysisResult<Vec<Recommendation>> {
    let mut scored = with_distance(shelters, origin)?;
    for candidate in &mut scored {
        candidate.recommendation_score = Some(score(candidate));
    }

    scored.sort_by(|a, b| {
        let a = a.recommendation_score.unwrap_or_default();
        let b = b.recommendation_score.unwrap_or_default();
        b.total_cmp(&a)
    });

    Ok(scored
        .into_iter()
        .take(top_n)
        .enumerate()
        .map(|(idx, candidate)| {
            let rank = idx + 1;
            let reason = reason(&candidate, rank);
            Recommendation {
                shelter: candidate,
                rank,
                reason,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sample_data::sample_shelters;
    use crate::models::{NewShelter, ShelterId, ShelterType};
    use chrono::Utc;

    fn shelter(name: &str, latitude: f64, longitude: f64) -> Shelter {
        let new = NewShelter {
            name: name.to_string(),
            address: "Gangnam-gu".to_string(),
            location: Coordinate {
                latitude,
                longitude,
            },
            shelter_type: ShelterType::Public,
            current_occupancy: 10,
            max_capacity: 100,
            operating_hours: "09:00-18:00".to_string(),
            rating: 4.0,
            amenities: Default::default(),
            description: None,
            is_active: true,
        };
        Shelter::from_new(ShelterId::generate(), new, Utc::now())
    }

    fn origin() -> Coordinate {
        crate::models::FALLBACK_LOCATION
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(with_distance(&[], &origin()).unwrap().is_empty());
        assert!(recommend(&[], &origin(), DEFAULT_TOP_N).unwrap().is_empty());
    }

    #[test]
    fn test_with_distance_preserves_order() {
        let shelters = vec![shelter("far", 37.60, 127.10), shelter("near", 37.5172, 127.0473)];
        let annotated = with_distance(&shelters, &origin()).unwrap();
        assert_eq!(annotated[0].shelter.name, "far");
        assert_eq!(annotated[1].shelter.name, "near");
        assert_eq!(annotated[1].distance, 0.0);
        assert!(annotated.iter().all(|s| s.recommendation_score.is_none()));
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let shelters = vec![shelter("a", 37.5, 127.0)];
        let bad = Coordinate {
            latitude: f64::NAN,
            longitude: 127.0,
        };
        assert!(with_distance(&shelters, &bad).is_err());
        assert!(recommend(&shelters, &bad, 3).is_err());
    }

    #[test]
    fn test_top_three_of_sample_shelters() {
        let shelters: Vec<Shelter> = sample_shelters(Utc::now());
        assert_eq!(shelters.len(), 5);

        let recs = recommend(&shelters, &origin(), DEFAULT_TOP_N).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);

        let scores: Vec<f64> = recs
            .iter()
            .map(|r| r.shelter.recommendation_score.unwrap())
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));

        let names: Vec<&str> = recs.iter().map(|r| r.shelter.shelter.name.as_str()).collect();
        assert_eq!(names, vec!["역삼동 주민센터", "강남구청 대피소", "코엑스몰"]);
        assert_eq!(recs[0].reason, "ample space, 24-hour availability, Wi-Fi available");
        assert_eq!(recs[1].reason, "close distance, 24-hour availability, Wi-Fi available");
        assert_eq!(recs[2].reason, "");
    }

    #[test]
    fn test_top_n_larger_than_input() {
        let shelters = vec![shelter("a", 37.5, 127.0), shelter("b", 37.51, 127.01)];
        assert_eq!(recommend(&shelters, &origin(), 10).unwrap().len(), 2);
        assert!(recommend(&shelters, &origin(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_ties_keep_input_order() {
        // Identical location and attributes give identical scores.
        let shelters = vec![
            shelter("first", 37.50, 127.04),
            shelter("second", 37.50, 127.04),
            shelter("third", 37.50, 127.04),
        ];
        let recs = recommend(&shelters, &origin(), 3).unwrap();
        let names: Vec<&str> = recs.iter().map(|r| r.shelter.shelter.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_higher_score_ranks_first() {
        let mut better = shelter("better", 37.50, 127.04);
        better.rating = 5.0;
        let shelters = vec![shelter("plain", 37.50, 127.04), better];
        let recs = recommend(&shelters, &origin(), 1).unwrap();
        assert_eq!(recs[0].shelter.shelter.name, "better");
        assert_eq!(recs[0].rank, 1);
    }
}
