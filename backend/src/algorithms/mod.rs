//! Pure ranking and posture-classification algorithms.
//!
//! Everything here is synchronous and side-effect free; storage and HTTP
//! concerns live in [`crate::services`].

pub mod distance;
pub mod error;
pub mod posture;
pub mod ranking;
pub mod scoring;

pub use distance::{distance, haversine_km, EARTH_RADIUS_KM};
pub use error::{AnalysisError, AnalysisResult};
pub use posture::{analyze, classify, detect_nail_biting, detect_turtle_neck};
pub use ranking::{recommend, with_distance, DEFAULT_TOP_N};
pub use scoring::{reason, score};
