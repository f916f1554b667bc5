//! Scan strategy over a binarized crop
//!
//! - Middle-out row selection and per-row decode attempts
//! - Candidate tallying and majority vote
//! - Right-angle rotation retries

/// Right-angle rotation of binarized crops
pub mod rotate;
/// Middle-out row scanning and candidate tallying
pub mod rows;

pub use rotate::{ROTATION_ORDER, Rotation, rotate};
pub use rows::{CandidateTally, scan_rows};
