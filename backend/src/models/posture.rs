//! Pose keypoints and per-frame posture classification results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithms::error::{AnalysisError, AnalysisResult};

/// Body parts reported by a PoseNet-style model (17 keypoints).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyPart {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl BodyPart {
    pub const COUNT: usize = 17;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "leftEye",
            Self::RightEye => "rightEye",
            Self::LeftEar => "leftEar",
            Self::RightEar => "rightEar",
            Self::LeftShoulder => "leftShoulder",
            Self::RightShoulder => "rightShoulder",
            Self::LeftElbow => "leftElbow",
            Self::RightElbow => "rightElbow",
            Self::LeftWrist => "leftWrist",
            Self::RightWrist => "rightWrist",
            Self::LeftHip => "leftHip",
            Self::RightHip => "rightHip",
            Self::LeftKnee => "leftKnee",
            Self::RightKnee => "rightKnee",
            Self::LeftAnkle => "leftAnkle",
            Self::RightAnkle => "rightAnkle",
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel position within the video frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(&self, other: &Position) -> Position {
        Position {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A single labelled keypoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub part: BodyPart,
    pub position: Position,
    /// Model confidence (0.0–1.0).
    pub score: f64,
}

impl Keypoint {
    pub fn new(part: BodyPart, x: f64, y: f64, score: f64) -> Self {
        Self {
            part,
            position: Position::new(x, y),
            score,
        }
    }

    /// Rejects non-finite positions and scores outside 0..=1.
    pub fn validate(&self) -> AnalysisResult<()> {
        if !self.position.x.is_finite() || !self.position.y.is_finite() {
            return Err(AnalysisError::invalid_keypoint(
                self.part,
                "position must be finite",
            ));
        }
        if !self.score.is_finite() || !(0.0..=1.0).contains(&self.score) {
            return Err(AnalysisError::invalid_keypoint(
                self.part,
                "score must lie within 0.0..=1.0",
            ));
        }
        Ok(())
    }
}

/// Looks up the first keypoint for `part`.
pub fn find_part(keypoints: &[Keypoint], part: BodyPart) -> Option<&Keypoint> {
    keypoints.iter().find(|kp| kp.part == part)
}

/// Discrete posture classification of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostureState {
    #[default]
    Good,
    TurtleNeck,
    NailBiting,
}

impl PostureState {
    pub fn is_warning(&self) -> bool {
        !matches!(self, Self::Good)
    }
}

/// Forward-head detector output.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurtleNeckReading {
    /// Angle of the ear→nose vector from vertical, in degrees.
    pub neck_angle: f64,
    /// Slope of the shoulder line, in degrees.
    pub shoulder_angle: f64,
    pub is_detected: bool,
    pub confidence: f64,
}

/// Hand-near-mouth detector output.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NailBitingReading {
    /// Pixel distance from the closest qualifying wrist to the nose.
    pub hand_to_face_distance: f64,
    pub is_detected: bool,
    pub confidence: f64,
}

/// Combined classification plus both detector readings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostureAnalysis {
    pub status: PostureState,
    pub turtle_neck: TurtleNeckReading,
    pub nail_biting: NailBitingReading,
}

pub const DEFAULT_TURTLE_NECK_SENSITIVITY: u8 = 7;
pub const DEFAULT_NAIL_BITING_SENSITIVITY: u8 = 5;
pub const MIN_SENSITIVITY: u8 = 1;
pub const MAX_SENSITIVITY: u8 = 10;

fn default_true() -> bool {
    true
}

fn default_turtle_neck_sensitivity() -> u8 {
    DEFAULT_TURTLE_NECK_SENSITIVITY
}

fn default_nail_biting_sensitivity() -> u8 {
    DEFAULT_NAIL_BITING_SENSITIVITY
}

/// Detector switches and sensitivities (1 = lenient, 10 = strict/eager).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionSettings {
    #[serde(default = "default_true")]
    pub turtle_neck_enabled: bool,
    #[serde(default = "default_true")]
    pub nail_biting_enabled: bool,
    #[serde(default = "default_turtle_neck_sensitivity")]
    pub turtle_neck_sensitivity: u8,
    #[serde(default = "default_nail_biting_sensitivity")]
    pub nail_biting_sensitivity: u8,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            turtle_neck_enabled: true,
            nail_biting_enabled: true,
            turtle_neck_sensitivity: DEFAULT_TURTLE_NECK_SENSITIVITY,
            nail_biting_sensitivity: DEFAULT_NAIL_BITING_SENSITIVITY,
        }
    }
}

/// Fails with `InvalidInput` unless `value` lies within 1..=10.
pub fn validate_sensitivity(name: &str, value: u8) -> AnalysisResult<u8> {
    if (MIN_SENSITIVITY..=MAX_SENSITIVITY).contains(&value) {
        Ok(value)
    } else {
        Err(AnalysisError::invalid_sensitivity(name, value))
    }
}

impl DetectionSettings {
    pub fn validate(&self) -> AnalysisResult<()> {
        validate_sensitivity("turtle neck", self.turtle_neck_sensitivity)?;
        validate_sensitivity("nail biting", self.nail_biting_sensitivity)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypoint_json_shape() {
        let json = serde_json::json!({
            "part": "leftShoulder",
            "position": { "x": 120.5, "y": 300.0 },
            "score": 0.93
        });
        let kp: Keypoint = serde_json::from_value(json).unwrap();
        assert_eq!(kp.part, BodyPart::LeftShoulder);
        assert_eq!(kp.position.x, 120.5);
        assert_eq!(kp.part.to_string(), "leftShoulder");
    }

    #[test]
    fn test_unknown_part_is_rejected() {
        let json = serde_json::json!({
            "part": "tail",
            "position": { "x": 0.0, "y": 0.0 },
            "score": 0.5
        });
        assert!(serde_json::from_value::<Keypoint>(json).is_err());
    }

    #[test]
    fn test_keypoint_validate() {
        assert!(Keypoint::new(BodyPart::Nose, 1.0, 2.0, 0.9).validate().is_ok());
        assert!(Keypoint::new(BodyPart::Nose, f64::NAN, 2.0, 0.9).validate().is_err());
        assert!(Keypoint::new(BodyPart::Nose, 1.0, 2.0, 1.2).validate().is_err());
        assert!(Keypoint::new(BodyPart::Nose, 1.0, 2.0, -0.1).validate().is_err());
    }

    #[test]
    fn test_find_part_returns_first_match() {
        let kps = vec![
            Keypoint::new(BodyPart::Nose, 1.0, 1.0, 0.2),
            Keypoint::new(BodyPart::Nose, 9.0, 9.0, 0.9),
        ];
        assert_eq!(find_part(&kps, BodyPart::Nose).unwrap().score, 0.2);
        assert!(find_part(&kps, BodyPart::LeftEar).is_none());
    }

    #[test]
    fn test_posture_state_wire_names() {
        assert_eq!(serde_json::to_value(PostureState::Good).unwrap(), "good");
        assert_eq!(serde_json::to_value(PostureState::TurtleNeck).unwrap(), "turtle_neck");
        assert_eq!(serde_json::to_value(PostureState::NailBiting).unwrap(), "nail_biting");
        assert!(!PostureState::Good.is_warning());
        assert!(PostureState::NailBiting.is_warning());
    }

    #[test]
    fn test_detection_settings_defaults() {
        let parsed: DetectionSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, DetectionSettings::default());
        assert_eq!(parsed.turtle_neck_sensitivity, 7);
        assert_eq!(parsed.nail_biting_sensitivity, 5);
    }

    #[test]
    fn test_sensitivity_range() {
        assert!(validate_sensitivity("x", 0).is_err());
        assert!(validate_sensitivity("x", 1).is_ok());
        assert!(validate_sensitivity("x", 10).is_ok());
        assert!(validate_sensitivity("x", 11).is_err());
    }
}
