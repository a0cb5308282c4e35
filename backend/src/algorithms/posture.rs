//! Single-frame posture classification over pose keypoints.
//!
//! Two detectors run independently on the same frame:
//!
//! - **turtle neck**: the head is pushed forward when the ear→nose vector
//!   leans away from vertical by more than a sensitivity-dependent angle;
//! - **nail biting**: a confidently tracked wrist is closer to the nose than
//!   a sensitivity-dependent pixel distance.
//!
//! Missing keypoints are a normal condition and produce a zero reading, not
//! an error. Nothing is remembered between frames.

use super::error::AnalysisResult;
use crate::models::{
    find_part, validate_sensitivity, BodyPart, DetectionSettings, Keypoint, NailBitingReading,
    PostureAnalysis, PostureState, TurtleNeckReading,
};

/// Keypoints below this score are ignored for wrists and do not count
/// towards a confident detection.
pub const CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Forward-head angle threshold in degrees; stricter as sensitivity rises.
pub fn turtle_neck_threshold(sensitivity: u8) -> f64 {
    15.0 + (10.0 - f64::from(sensitivity)) * 2.0
}

/// Wrist-to-nose distance threshold in pixels; narrower as sensitivity rises.
///
/// Defined for any `u8`; detectors only call it with validated values.
pub fn nail_biting_threshold(sensitivity: u8) -> f64 {
    150.0 - (f64::from(sensitivity) - 1.0) * 15.0
}

fn validate_keypoints(keypoints: &[Keypoint]) -> AnalysisResult<()> {
    keypoints.iter().try_for_each(Keypoint::validate)
}

/// Measures forward head posture.
pub fn detect_turtle_neck(
    keypoints: &[Keypoint],
    sensitivity: u8,
) -> AnalysisResult<TurtleNeckReading> {
    let sensitivity = validate_sensitivity("turtle neck", sensitivity)?;
    validate_keypoints(keypoints)?;

    let (Some(nose), Some(left_shoulder), Some(right_shoulder), Some(left_ear), Some(right_ear)) = (
        find_part(keypoints, BodyPart::Nose),
        find_part(keypoints, BodyPart::LeftShoulder),
        find_part(keypoints, BodyPart::RightShoulder),
        find_part(keypoints, BodyPart::LeftEar),
        find_part(keypoints, BodyPart::RightEar),
    ) else {
        return Ok(TurtleNeckReading::default());
    };

    let ear_mid = left_ear.position.midpoint(&right_ear.position);
    let neck_angle = (nose.position.x - ear_mid.x)
        .atan2(nose.position.y - ear_mid.y)
        .to_degrees();
    let shoulder_angle = (right_shoulder.position.y - left_shoulder.position.y)
        .atan2(right_shoulder.position.x - left_shoulder.position.x)
        .to_degrees();

    let confidence = [nose, left_shoulder, right_shoulder, left_ear, right_ear]
        .iter()
        .map(|kp| kp.score)
        .fold(f64::INFINITY, f64::min);

    Ok(TurtleNeckReading {
        neck_angle,
        shoulder_angle,
        is_detected: neck_angle.abs() > turtle_neck_threshold(sensitivity),
        confidence,
    })
}

/// Measures how close the nearest confidently tracked wrist is to the nose.
pub fn detect_nail_biting(
    keypoints: &[Keypoint],
    sensitivity: u8,
) -> AnalysisResult<NailBitingReading> {
    let sensitivity = validate_sensitivity("nail biting", sensitivity)?;
    validate_keypoints(keypoints)?;

    let Some(nose) = find_part(keypoints, BodyPart::Nose) else {
        return Ok(NailBitingReading::default());
    };

    let mut closest: Option<(f64, f64)> = None;
    for part in [BodyPart::LeftWrist, BodyPart::RightWrist] {
        let Some(wrist) = find_part(keypoints, part) else {
            continue;
        };
        if wrist.score <= CONFIDENCE_THRESHOLD {
            continue;
        }
        let distance = wrist.position.distance_to(&nose.position);
        // Strictly closer only: the left wrist wins ties.
        if closest.map_or(true, |(best, _)| distance < best) {
            closest = Some((distance, nose.score.min(wrist.score)));
        }
    }

    let Some((distance, confidence)) = closest else {
        return Ok(NailBitingReading::default());
    };

    Ok(NailBitingReading {
        hand_to_face_distance: distance,
        is_detected: distance < nail_biting_threshold(sensitivity),
        confidence,
    })
}

fn combine(
    settings: &DetectionSettings,
    turtle_neck: &TurtleNeckReading,
    nail_biting: &NailBitingReading,
) -> PostureState {
    let mut state = PostureState::Good;
    if settings.turtle_neck_enabled
        && turtle_neck.is_detected
        && turtle_neck.confidence > CONFIDENCE_THRESHOLD
    {
        state = PostureState::TurtleNeck;
    }
    // Evaluated second, so it overrides a turtle-neck result.
    if settings.nail_biting_enabled
        && nail_biting.is_detected
        && nail_biting.confidence > CONFIDENCE_THRESHOLD
    {
        state = PostureState::NailBiting;
    }
    state
}

/// Classifies one frame. Disabled detectors never contribute.
pub fn classify(keypoints: &[Keypoint], settings: &DetectionSettings) -> AnalysisResult<PostureState> {
    settings.validate()?;

    let turtle_neck = if settings.turtle_neck_enabled {
        detect_turtle_neck(keypoints, settings.turtle_neck_sensitivity)?
    } else {
        TurtleNeckReading::default()
    };
    let nail_biting = if settings.nail_biting_enabled {
        detect_nail_biting(keypoints, settings.nail_biting_sensitivity)?
    } else {
        NailBitingReading::default()
    };

    Ok(combine(settings, &turtle_neck, &nail_biting))
}

/// Runs both detectors and returns their readings with the combined state.
///
/// Readings are always filled in, even for disabled detectors; the enabled
/// flags only affect `status`.
pub fn analyze(keypoints: &[Keypoint], settings: &DetectionSettings) -> AnalysisResult<PostureAnalysis> {
    settings.validate()?;

    let turtle_neck = detect_turtle_neck(keypoints, settings.turtle_neck_sensitivity)?;
    let nail_biting = detect_nail_biting(keypoints, settings.nail_biting_sensitivity)?;
    let status = combine(settings, &turtle_neck, &nail_biting);

    Ok(PostureAnalysis {
        status,
        turtle_neck,
        nail_biting,
    })
}
