//! # Heatwise
//!
//! Backend for a heat-shelter finder and a webcam posture monitor.
//!
//! ## Features
//!
//! - **Shelter ranking**: great-circle distance, a weighted recommendation
//!   score and short human-readable reasons for the top picks
//! - **Posture classification**: turtle-neck and nail-biting detection over
//!   pose-estimation keypoints, one frame at a time
//! - **Storage**: shelters, weather, favorites, posture sessions and user
//!   settings behind repository traits (in-memory implementation)
//! - **HTTP API**: JSON REST endpoints via Axum
//!
//! ## Architecture
//!
//! - [`models`]: Domain records and their wire format
//! - [`algorithms`]: Pure distance, scoring, ranking and posture functions
//! - [`db`]: Repository traits, the in-memory repository and sample data
//! - [`services`]: Validation and orchestration on top of the repository
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum router, handlers and error mapping

// RepositoryError carries structured context.
#![allow(clippy::result_large_err)]

pub mod algorithms;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
