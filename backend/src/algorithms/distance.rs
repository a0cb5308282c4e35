//! Great-circle distance on a spherical Earth.

use super::error::AnalysisResult;
use crate::models::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometers between two finite coordinates.
///
/// No validation is performed; non-finite input yields a non-finite result.
/// Use [`distance`] at API boundaries.
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Haversine distance in kilometers, failing with `InvalidInput` when either
/// coordinate has a NaN or infinite component.
///
/// # Examples
///
/// ```
/// use heatwise::algorithms::distance::distance;
/// use heatwise::models::Coordinate;
///
/// let gangnam_office = Coordinate::new(37.5172, 127.0473).unwrap();
/// let seolleung = Coordinate::new(37.5044, 127.0489).unwrap();
/// let km = distance(&gangnam_office, &seolleung).unwrap();
/// assert!((km - 1.43).abs() < 0.05);
/// ```
pub fn distance(a: &Coordinate, b: &Coordinate) -> AnalysisResult<f64> {
    a.validate()?;
    b.validate()?;
    Ok(haversine_km(a, b))
}
