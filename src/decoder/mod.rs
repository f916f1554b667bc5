//! One-dimensional symbol decoding
//!
//! This module turns binarized pixel rows into decoded EAN-13 strings:
//! - Run-length scanning and zero-copy pattern views
//! - Variance-scored pattern matching against module-width tables
//! - The EAN-13 guard/digit grammar with L/G parity resolution

/// EAN-13 grammar: guards, digit tables, symbol state machine
pub mod ean13;
/// Run-length scanning, pattern views and variance matching
pub mod pattern;
