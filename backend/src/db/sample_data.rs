//! Demo data set: five cooling shelters in Gangnam-gu, Seoul, and a heat
//! warning for the district.

use chrono::{DateTime, Utc};

use crate::models::{
    Coordinate, NewShelter, NewWeatherData, Shelter, ShelterId, ShelterType, WeatherData,
    WeatherId,
};

/// Location key of the seeded weather observation.
pub const SAMPLE_WEATHER_LOCATION: &str = "서울시 강남구";

#[allow(clippy::too_many_arguments)]
fn shelter(
    name: &str,
    address: &str,
    (latitude, longitude): (f64, f64),
    shelter_type: ShelterType,
    (current_occupancy, max_capacity): (u32, u32),
    operating_hours: &str,
    rating: f64,
    amenities: &[&str],
    description: &str,
) -> NewShelter {
    NewShelter {
        name: name.to_string(),
        address: address.to_string(),
        location: Coordinate {
            latitude,
            longitude,
        },
        shelter_type,
        current_occupancy,
        max_capacity,
        operating_hours: operating_hours.to_string(),
        rating,
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
        description: Some(description.to_string()),
        is_active: true,
    }
}

/// Creation payloads for the demo shelters, in seeding order.
pub fn sample_new_shelters() -> Vec<NewShelter> {
    vec![
        shelter(
            "강남구청 대피소",
            "서울시 강남구 학동로 426",
            (37.5172, 127.0473),
            ShelterType::Public,
            (85, 100),
            "24시간",
            4.2,
            &["wifi", "free"],
            "대형 냉방시설과 휴게공간을 갖춘 공공 대피소입니다.",
        ),
        shelter(
            "선릉역 냉방시설",
            "서울시 강남구 선릉로 지하",
            (37.5044, 127.0489),
            ShelterType::Transport,
            (45, 80),
            "06:00-22:00",
            4.5,
            &["free", "convenience_store"],
            "지하철역 내부 대합실 쉼터입니다.",
        ),
        shelter(
            "대치문화센터",
            "서울시 강남구 대치동",
            (37.4946, 127.0631),
            ShelterType::Public,
            (15, 120),
            "09:00-18:00",
            4.7,
            &["wifi", "free", "cafe", "quiet"],
            "쾌적한 환경과 다양한 편의시설을 갖춘 문화센터입니다.",
        ),
        shelter(
            "역삼동 주민센터",
            "서울시 강남구 역삼동",
            (37.5001, 127.0374),
            ShelterType::Public,
            (20, 60),
            "24시간",
            4.3,
            &["wifi", "free"],
            "24시간 운영하는 주민센터 냉방 쉼터입니다.",
        ),
        shelter(
            "코엑스몰",
            "서울시 강남구 영동대로 513",
            (37.5115, 127.0595),
            ShelterType::Commercial,
            (150, 300),
            "10:00-22:00",
            4.1,
            &["parking", "restaurants", "shopping"],
            "대형 쇼핑몰로 다양한 편의시설과 식음료를 이용할 수 있습니다.",
        ),
    ]
}

/// The demo shelters materialized with fresh ids.
pub fn sample_shelters(now: DateTime<Utc>) -> Vec<Shelter> {
    sample_new_shelters()
        .into_iter()
        .map(|new| Shelter::from_new(ShelterId::generate(), new, now))
        .collect()
}

pub fn sample_weather(now: DateTime<Utc>) -> WeatherData {
    WeatherData::from_new(
        WeatherId::generate(),
        NewWeatherData {
            location: SAMPLE_WEATHER_LOCATION.to_string(),
            temperature: 35.0,
            heat_index: Some(38.0),
            weather_alert: Some("폭염주의보".to_string()),
        },
        now,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OccupancyLevel;

    #[test]
    fn test_sample_payloads_are_valid() {
        for new in sample_new_shelters() {
            assert!(new.validate().is_ok(), "{} failed validation", new.name);
        }
    }

    #[test]
    fn test_sample_occupancy_levels() {
        let levels: Vec<OccupancyLevel> = sample_shelters(Utc::now())
            .iter()
            .map(|s| s.occupancy_level)
            .collect();
        assert_eq!(
            levels,
            vec![
                OccupancyLevel::High,
                OccupancyLevel::Medium,
                OccupancyLevel::Low,
                OccupancyLevel::Low,
                OccupancyLevel::Medium,
            ]
        );
    }

    #[test]
    fn test_sample_weather() {
        let weather = sample_weather(Utc::now());
        assert_eq!(weather.location, SAMPLE_WEATHER_LOCATION);
        assert_eq!(weather.heat_index, Some(38.0));
    }
}
