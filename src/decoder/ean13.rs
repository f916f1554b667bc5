//! EAN-13 symbol grammar
//!
//! Decodes one symbol out of a run-length view: left guard, six L/G-encoded
//! digits, middle guard, six L-encoded digits, right guard. The first digit
//! is never printed as bars; it is implied by which of the left six digits
//! used the mirrored G width table.
//!
//! Note that the mod-10 check digit is intentionally NOT verified: any
//! syntactically complete 13-digit symbol is reported as-is.

use super::pattern::{
    FixedPattern, PatternView, SparsePattern, find_left_guard, is_right_guard, is_sparse_pattern,
    pattern_match_variance,
};

/// Runs per digit
const CHAR_LEN: usize = 4;

/// Smallest run count a whole symbol can occupy (shared with UPC-E sizing):
/// start guard + six digits + enough for the rest of the smallest symbol.
pub const MIN_SYMBOL_RUNS: usize = 3 + 6 * CHAR_LEN + 6;

/// Start/end guard: bar-space-bar, one module each
pub const END_PATTERN: FixedPattern<3> = FixedPattern {
    widths: [1, 1, 1],
    modules: 3,
};

/// Middle guard: space-bar-space-bar-space, one module each. Matched as a
/// sparse pattern (every named run must be one module wide).
pub const MID_PATTERN: SparsePattern<5> = SparsePattern {
    indices: [0, 1, 2, 3, 4],
};

// These two values control how permissive digit matching is. Setting them
// any higher lets false positives creep in quickly.
const MAX_AVG_VARIANCE: f32 = 0.48;
const MAX_INDIVIDUAL_VARIANCE: f32 = 0.7;

// GS1 prescribes 11 modules on the left and 7 on the right; scanning in the
// wild needs slack on both.
const QUIET_ZONE_LEFT: f32 = 6.0;
const QUIET_ZONE_RIGHT: f32 = 3.0;

/// Left-hand "L" digit encodings, run widths in modules (sum 7 each)
pub const L_PATTERNS: [[u16; 4]; 10] = [
    [3, 2, 1, 1], // 0
    [2, 2, 2, 1], // 1
    [2, 1, 2, 2], // 2
    [1, 4, 1, 1], // 3
    [1, 1, 3, 2], // 4
    [1, 2, 3, 1], // 5
    [1, 1, 1, 4], // 6
    [1, 3, 1, 2], // 7
    [1, 2, 1, 3], // 8
    [3, 1, 1, 2], // 9
];

/// L digits followed by their mirrored "G" variants (entries 10-19)
pub const L_AND_G_PATTERNS: [[u16; 4]; 20] = [
    [3, 2, 1, 1], // 0
    [2, 2, 2, 1], // 1
    [2, 1, 2, 2], // 2
    [1, 4, 1, 1], // 3
    [1, 1, 3, 2], // 4
    [1, 2, 3, 1], // 5
    [1, 1, 1, 4], // 6
    [1, 3, 1, 2], // 7
    [1, 2, 1, 3], // 8
    [3, 1, 1, 2], // 9
    // reversed
    [1, 1, 2, 3], // 10
    [1, 2, 2, 2], // 11
    [2, 2, 1, 2], // 12
    [1, 1, 4, 1], // 13
    [2, 3, 1, 1], // 14
    [1, 3, 2, 1], // 15
    [4, 1, 1, 1], // 16
    [2, 1, 3, 1], // 17
    [3, 1, 2, 1], // 18
    [2, 1, 1, 3], // 19
];

/// Implied first digit, indexed by the 6-bit L/G parity code of the left six
/// digits (MSB first, 1 = G)
pub const FIRST_DIGIT_ENCODINGS: [u32; 10] =
    [0x00, 0x0B, 0x0D, 0x0E, 0x13, 0x19, 0x1C, 0x15, 0x16, 0x1A];

/// One successfully decoded symbol: the 13-digit text plus the view over the
/// end guard, usable to resume scanning past the symbol.
#[derive(Debug)]
pub struct PartialResult<'a> {
    /// 13 ASCII digits
    pub text: String,
    /// Window over the end guard just consumed
    pub end: PatternView<'a>,
}

/// Match a 4-run window against every entry of a digit table.
///
/// Returns the index of the lowest-variance candidate within the accept
/// threshold. With `require_unambiguous` a tie between two candidates yields
/// no match; the EAN-13 grammar always runs in permissive mode where the
/// first lowest-variance table entry wins.
fn decode_digit_index(
    view: &PatternView,
    patterns: &[[u16; 4]],
    require_unambiguous: bool,
) -> Option<usize> {
    let counters = [view.at(0), view.at(1), view.at(2), view.at(3)];

    let mut best_variance = MAX_AVG_VARIANCE; // worst variance we'll accept
    let mut best_match: Option<usize> = None;
    for (i, pattern) in patterns.iter().enumerate() {
        let variance = pattern_match_variance(&counters, pattern, MAX_INDIVIDUAL_VARIANCE);
        if variance < best_variance {
            best_variance = variance;
            best_match = Some(i);
        } else if require_unambiguous && variance == best_variance {
            // a second equally good match means we cannot report either
            best_match = None;
        }
    }

    best_match
}

/// Decode `count` consecutive digits, appending each to `digits` and (when a
/// parity accumulator is given) its L/G bit to the running code.
fn decode_digits(
    count: usize,
    next: &mut PatternView,
    digits: &mut Vec<u8>,
    mut lg_code: Option<&mut u32>,
) -> bool {
    let table: &[[u16; 4]] = if lg_code.is_some() {
        &L_AND_G_PATTERNS
    } else {
        &L_PATTERNS
    };

    for _ in 0..count {
        let Some(index) = decode_digit_index(next, table, false) else {
            return false;
        };
        digits.push((index % 10) as u8);
        if let Some(code) = lg_code.as_deref_mut() {
            *code = (*code << 1) | u32::from(index >= 10);
        }
        next.skip_symbol();
    }

    true
}

/// Decode one whole EAN-13 symbol starting at a left guard window.
fn decode_symbol<'a>(begin: PatternView<'a>) -> Option<PartialResult<'a>> {
    let mid = begin.sub_view(27, 5);
    let end = begin.sub_view(56, 3);

    if !end.is_valid()
        || !is_right_guard(&end, &END_PATTERN, QUIET_ZONE_RIGHT)
        || is_sparse_pattern(&mid, &MID_PATTERN, None, 0.0, 0.0, false) == 0.0
    {
        return None;
    }

    let mut next = begin.sub_view(END_PATTERN.widths.len(), CHAR_LEN);
    let mut digits: Vec<u8> = Vec::with_capacity(13);
    let mut lg_code = 0u32;

    if !decode_digits(6, &mut next, &mut digits, Some(&mut lg_code)) {
        return None;
    }

    next = next.sub_view(5, CHAR_LEN); // skip the middle guard

    if !decode_digits(6, &mut next, &mut digits, None) {
        return None;
    }

    let first = FIRST_DIGIT_ENCODINGS
        .iter()
        .position(|&code| code == lg_code)? as u8;

    let mut text = String::with_capacity(13);
    text.push((b'0' + first) as char);
    for d in digits {
        text.push((b'0' + d) as char);
    }

    Some(PartialResult { text, end })
}

/// Find the next plausible start guard inside `next` and try to decode a
/// symbol from it.
///
/// On return `next` points at the guard that was tried, so the caller can
/// resume scanning past it; when no further guard exists the view is
/// cleared, which ends the caller's scan loop.
pub fn decode_pattern<'a>(next: &mut PatternView<'a>) -> Option<PartialResult<'a>> {
    match find_left_guard(*next, MIN_SYMBOL_RUNS, &END_PATTERN, QUIET_ZONE_LEFT) {
        Some(guard) => {
            *next = guard;
            decode_symbol(guard)
        }
        None => {
            next.clear();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::pattern::PatternRow;

    fn view_over(runs: &PatternRow) -> PatternView<'_> {
        PatternView::new(runs).sub_view(0, 4)
    }

    #[test]
    fn test_decode_digit_exact() {
        for (digit, widths) in L_PATTERNS.iter().enumerate() {
            let runs: PatternRow = vec![
                9,
                widths[0] * 3,
                widths[1] * 3,
                widths[2] * 3,
                widths[3] * 3,
                9,
            ];
            let got = decode_digit_index(&view_over(&runs), &L_PATTERNS, false);
            assert_eq!(got, Some(digit), "digit {digit}");
        }
    }

    #[test]
    fn test_decode_digit_g_variant_sets_high_index() {
        // G-encoded 5 = reversed L[5] = (1,3,2,1)
        let runs: PatternRow = vec![9, 4, 12, 8, 4, 9];
        let got = decode_digit_index(&view_over(&runs), &L_AND_G_PATTERNS, false);
        assert_eq!(got, Some(15));
    }

    #[test]
    fn test_decode_digit_rejects_garbage() {
        let runs: PatternRow = vec![9, 20, 1, 20, 1, 9];
        assert_eq!(decode_digit_index(&view_over(&runs), &L_PATTERNS, false), None);
    }

    #[test]
    fn test_first_digit_encodings_unique() {
        for (i, a) in FIRST_DIGIT_ENCODINGS.iter().enumerate() {
            for b in &FIRST_DIGIT_ENCODINGS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_g_patterns_are_reversed_l() {
        for i in 0..10 {
            let mut reversed = L_AND_G_PATTERNS[i];
            reversed.reverse();
            assert_eq!(reversed, L_AND_G_PATTERNS[i + 10]);
        }
    }
}
