#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

use heatwise::db::LocalRepository;
use heatwise::models::{BodyPart, Keypoint};
use tempfile::NamedTempFile;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Holds a process-wide lock so parallel tests never observe each other's
/// variables, and restores the previous values even if `f` panics.
///
/// `changes` maps a key to `Some(value)` to set it or `None` to remove it.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = EnvGuard::apply(changes);
    f()
}

struct EnvGuard {
    previous: HashMap<String, Option<String>>,
}

impl EnvGuard {
    fn apply(changes: &[(&str, Option<&str>)]) -> Self {
        let previous = changes
            .iter()
            .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
            .collect();
        for (key, value) in changes {
            set_or_remove(key, *value);
        }
        Self { previous }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain() {
            set_or_remove(&key, value.as_deref());
        }
    }
}

fn set_or_remove(key: &str, value: Option<&str>) {
    match value {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }
}

/// Writes `contents` to a temporary `.toml` file that lives as long as the
/// returned handle.
pub fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

pub fn seeded_repo() -> LocalRepository {
    LocalRepository::with_sample_data()
}

pub fn kp(part: BodyPart, x: f64, y: f64, score: f64) -> Keypoint {
    Keypoint::new(part, x, y, score)
}

/// Upright frame: nose straight below the ear midpoint, hands far away.
pub fn upright_frame() -> Vec<Keypoint> {
    vec![
        kp(BodyPart::Nose, 120.0, 160.0, 0.95),
        kp(BodyPart::LeftEar, 100.0, 100.0, 0.9),
        kp(BodyPart::RightEar, 140.0, 100.0, 0.9),
        kp(BodyPart::LeftShoulder, 60.0, 260.0, 0.85),
        kp(BodyPart::RightShoulder, 180.0, 260.0, 0.85),
        kp(BodyPart::LeftWrist, 40.0, 450.0, 0.8),
        kp(BodyPart::RightWrist, 200.0, 450.0, 0.8),
    ]
}

/// Head pushed 45 degrees forward, hands far away.
pub fn turtle_neck_frame() -> Vec<Keypoint> {
    let mut frame = upright_frame();
    frame[0] = kp(BodyPart::Nose, 150.0, 130.0, 0.95);
    frame
}

/// Upright head with the left wrist 50 px from the nose.
pub fn nail_biting_frame() -> Vec<Keypoint> {
    let mut frame = upright_frame();
    frame[5] = kp(BodyPart::LeftWrist, 150.0, 200.0, 0.8);
    frame
}
