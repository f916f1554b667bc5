//! Middle-out row scanning
//!
//! Rows are examined from the vertical middle outward, alternating above and
//! below, since the barcode is most likely to cross the center of a detection
//! crop. Every successful decode on any row is tallied; the most frequent
//! string across rows wins.

use std::collections::HashMap;

use crate::decoder::ean13::decode_pattern;
use crate::decoder::pattern::{PatternView, scan_row};
use crate::models::BinaryImage;

/// Tally of decoded candidate strings for one orientation.
///
/// Holds unique 13-digit strings with the number of row decodes that
/// produced each of them. Built fresh per orientation attempt.
#[derive(Debug, Default)]
pub struct CandidateTally {
    counts: HashMap<String, u32>,
}

impl CandidateTally {
    /// Empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one successful decode of `text`
    pub fn record(&mut self, text: String) {
        *self.counts.entry(text).or_insert(0) += 1;
    }

    /// Whether no candidate was recorded
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct candidate strings
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether `text` was recorded at least once
    pub fn contains(&self, text: &str) -> bool {
        self.counts.contains_key(text)
    }

    /// The candidate with the highest decode count, or an empty string.
    ///
    /// Ties keep whichever string the unordered tally yields first.
    pub fn most_frequent(&self) -> String {
        let mut best = String::new();
        let mut best_count = 0u32;
        for (text, &count) in &self.counts {
            if count > best_count {
                best_count = count;
                best = text.clone();
            }
        }
        best
    }
}

/// Scan every row of a binarized crop, middle-out, collecting all decodes.
///
/// Row order is middle, middle+1, middle-1, middle+2, ...; scanning stops as
/// soon as a row index would fall outside the image. Within a row, decode
/// attempts advance by pairs of runs so each retry starts on a bar.
pub fn scan_rows(image: &BinaryImage) -> CandidateTally {
    let mut tally = CandidateTally::new();
    let height = image.height();
    let middle = height / 2;

    for i in 0..height {
        let steps = (i + 1) / 2;
        let row_number = if i % 2 == 1 {
            match middle.checked_add(steps) {
                Some(r) if r < height => r,
                _ => break, // ran off the bottom, stop
            }
        } else {
            match middle.checked_sub(steps) {
                Some(r) => r,
                None => break, // ran off the top, stop
            }
        };

        scan_one_row(image.row(row_number), &mut tally);
    }

    if crate::debug::debug_enabled() {
        eprintln!(
            "SCAN: {} candidate(s) over {}x{} crop",
            tally.len(),
            image.width(),
            height
        );
    }

    tally
}

fn scan_one_row(row: &[u8], tally: &mut CandidateTally) {
    let runs = scan_row(row);
    let mut view = PatternView::new(&runs);

    loop {
        if let Some(result) = decode_pattern(&mut view) {
            if result.text.len() == 13 {
                tally.record(result.text);
            }
        }
        if view.size() == 0 {
            break; // no further guard in this row
        }

        // make progress and start the next attempt on a bar
        view.shift(2 - view.index() % 2);
        view.extend();
        if view.size() == 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_vote() {
        let mut tally = CandidateTally::new();
        tally.record("0000000000000".to_string());
        tally.record("0000000000000".to_string());
        tally.record("1111111111111".to_string());
        tally.record("0000000000000".to_string());

        assert_eq!(tally.len(), 2);
        assert_eq!(tally.most_frequent(), "0000000000000");
    }

    #[test]
    fn test_empty_tally() {
        let tally = CandidateTally::new();
        assert!(tally.is_empty());
        assert_eq!(tally.most_frequent(), "");
    }

    #[test]
    fn test_blank_rows_yield_nothing() {
        let all_white = BinaryImage::from_raw(40, 8, vec![255; 40 * 8]);
        assert!(scan_rows(&all_white).is_empty());

        let all_black = BinaryImage::from_raw(40, 8, vec![0; 40 * 8]);
        assert!(scan_rows(&all_black).is_empty());
    }

    #[test]
    fn test_row_order_covers_single_row() {
        // a 1-pixel-tall image scans exactly its one row and stops
        let img = BinaryImage::from_raw(10, 1, vec![255; 10]);
        assert!(scan_rows(&img).is_empty());
    }
}
