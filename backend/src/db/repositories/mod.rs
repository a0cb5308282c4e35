//! Repository implementations.
//!
//! Only the in-memory `local` backend exists; durable storage is out of
//! scope for this service.
pub mod local;

pub use local::LocalRepository;
