//! Run-length scanning and pattern matching primitives
//!
//! A pixel row is reduced to an alternating space/bar run-length sequence,
//! then examined through a `PatternView`: a cheap windowed cursor over that
//! sequence that never copies and never reads out of bounds.

/// Alternating run lengths for one pixel row.
///
/// Element 0 is always the width of the background run in front of the first
/// bar (possibly zero). The sequence always ends on a background run; a row
/// ending on a bar gets an explicit trailing zero-width space appended so
/// guard and digit boundaries line up.
pub type PatternRow = Vec<u16>;

/// Build the run-length sequence for one binarized row (0 = bar, 255 = space).
pub fn scan_row(row: &[u8]) -> PatternRow {
    let mut runs = PatternRow::with_capacity(128); // EAN-13 has 59 bars/spaces
    let mut last_is_bar = false;
    let mut run_start = 0usize;

    for (x, &px) in row.iter().enumerate() {
        let is_bar = px == 0;
        if is_bar != last_is_bar {
            runs.push((x - run_start) as u16);
            last_is_bar = is_bar;
            run_start = x;
        }
    }
    runs.push((row.len() - run_start) as u16);

    // keep the space/bar alternation intact when the row ends on a bar
    if row.last() == Some(&0) {
        runs.push(0);
    }

    runs
}

/// Windowed cursor over a [`PatternRow`].
///
/// The window starts on the first bar (run index 1 of the underlying row) and
/// can be narrowed, shifted and re-extended without copying. All operations
/// are bounds-checked: anything that would leave the underlying sequence
/// turns the view invalid instead.
#[derive(Debug, Clone, Copy)]
pub struct PatternView<'a> {
    row: &'a [u16],
    start: usize,
    len: usize,
}

impl<'a> PatternView<'a> {
    /// View over a full row, positioned on the first bar.
    pub fn new(row: &'a PatternRow) -> Self {
        Self {
            row,
            start: 1,
            len: row.len().saturating_sub(1),
        }
    }

    /// Number of runs in the window
    pub fn size(&self) -> usize {
        self.len
    }

    /// Number of runs between the first bar of the row and the window start
    pub fn index(&self) -> usize {
        self.start - 1
    }

    /// Whether the window lies fully inside the underlying sequence
    pub fn is_valid(&self) -> bool {
        self.start >= 1 && self.start + self.len <= self.row.len()
    }

    /// Run width at window position `i`
    pub fn at(&self, i: usize) -> u16 {
        self.row[self.start + i]
    }

    /// Sum of all runs in the window
    pub fn sum(&self) -> u32 {
        self.sum_first(self.len)
    }

    /// Sum of the first `n` runs in the window
    pub fn sum_first(&self, n: usize) -> u32 {
        self.row[self.start..self.start + n]
            .iter()
            .map(|&r| r as u32)
            .sum()
    }

    /// Whether the window starts on the first bar of the row
    pub fn is_at_first_bar(&self) -> bool {
        self.start == 1
    }

    /// Whether the window ends on the last bar of the row
    pub fn is_at_last_bar(&self) -> bool {
        self.start + self.len == self.row.len() - 1
    }

    /// Width of the run immediately before the window
    pub fn before(&self) -> u16 {
        self.row[self.start - 1]
    }

    /// Width of the run immediately after the window, `None` at the sequence
    /// boundary (nothing to measure against)
    pub fn space_after(&self) -> Option<u16> {
        if self.is_at_last_bar() || self.start + self.len >= self.row.len() {
            None
        } else {
            Some(self.row[self.start + self.len])
        }
    }

    /// True if the window sits at the row start or the preceding run is at
    /// least `scale` times the window width
    pub fn has_quiet_zone_before(&self, scale: f32) -> bool {
        self.is_at_first_bar() || self.before() as f32 >= self.sum() as f32 * scale
    }

    /// True if the window sits at the row end or the following run is at
    /// least `scale` times the window width
    pub fn has_quiet_zone_after(&self, scale: f32) -> bool {
        match self.space_after() {
            None => true,
            Some(space) => space as f32 >= self.sum() as f32 * scale,
        }
    }

    /// Window over `[offset, offset + len)` of this window.
    ///
    /// The length is always explicit; to grow a window to the end of the
    /// sequence use [`extend`](Self::extend) instead.
    pub fn sub_view(&self, offset: usize, len: usize) -> PatternView<'a> {
        PatternView {
            row: self.row,
            start: self.start + offset,
            len,
        }
    }

    /// Move the window start by `n` runs. Returns false (and leaves the view
    /// invalid) once the window would pass the end of the sequence.
    pub fn shift(&mut self, n: usize) -> bool {
        self.start += n;
        self.is_valid()
    }

    /// Move to the next run of the same color
    pub fn skip_pair(&mut self) -> bool {
        self.shift(2)
    }

    /// Move past the current window (one decoded symbol group)
    pub fn skip_symbol(&mut self) -> bool {
        self.shift(self.len)
    }

    /// Grow the window to the end of the sequence
    pub fn extend(&mut self) {
        self.len = self.row.len().saturating_sub(self.start);
    }

    /// Shrink the window to nothing, ending any scan loop over it
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

/// Constant reference pattern; widths are expressed in modules.
pub struct FixedPattern<const N: usize> {
    /// Per-run widths in modules
    pub widths: [u16; N],
    /// Total width in modules (sum of `widths`)
    pub modules: u16,
}

/// Constant sparse reference pattern: only the named run indices are
/// required to be one module wide each; runs in between are ignored.
pub struct SparsePattern<const N: usize> {
    /// Window indices of the runs that must be equally wide
    pub indices: [usize; N],
}

/// Compare a window against a dense reference pattern.
///
/// Returns the estimated module size on a match and 0.0 otherwise. The
/// optional `space_in_pixel` is the width of the run outside the window used
/// for the quiet-zone test (`None` = window sits at a sequence boundary, the
/// test passes). `module_size_ref` overrides the locally estimated module
/// size when non-zero; `relaxed` widens the per-run tolerance.
pub fn is_pattern<const N: usize>(
    view: &PatternView,
    pattern: &FixedPattern<N>,
    space_in_pixel: Option<u32>,
    min_quiet_zone: f32,
    module_size_ref: f32,
    relaxed: bool,
) -> f32 {
    let width = view.sum_first(N);
    if pattern.modules as usize > N && width < pattern.modules as u32 {
        // not even one pixel per module
        return 0.0;
    }

    let module_size = width as f32 / pattern.modules as f32;

    if min_quiet_zone > 0.0 {
        if let Some(space) = space_in_pixel {
            if (space as f32) < min_quiet_zone * module_size - 1.0 {
                return 0.0;
            }
        }
    }

    let reference = if module_size_ref > 0.0 {
        module_size_ref
    } else {
        module_size
    };
    // the 0.5 offset keeps the check usable at module sizes near one pixel
    let threshold = reference * (0.5 + if relaxed { 0.25 } else { 0.0 }) + 0.5;

    for i in 0..N {
        if (view.at(i) as f32 - pattern.widths[i] as f32 * reference).abs() > threshold {
            return 0.0;
        }
    }

    module_size
}

/// Sparse variant of [`is_pattern`]: only the runs named by the pattern are
/// measured and each must be one module wide.
pub fn is_sparse_pattern<const N: usize>(
    view: &PatternView,
    pattern: &SparsePattern<N>,
    space_in_pixel: Option<u32>,
    min_quiet_zone: f32,
    module_size_ref: f32,
    relaxed: bool,
) -> f32 {
    let width: u32 = pattern.indices.iter().map(|&i| view.at(i) as u32).sum();
    let module_size = width as f32 / N as f32;

    if min_quiet_zone > 0.0 {
        if let Some(space) = space_in_pixel {
            if (space as f32) < min_quiet_zone * module_size - 1.0 {
                return 0.0;
            }
        }
    }

    let reference = if module_size_ref > 0.0 {
        module_size_ref
    } else {
        module_size
    };
    let threshold = reference * (0.5 + if relaxed { 0.25 } else { 0.0 }) + 0.5;

    for &i in &pattern.indices {
        if (view.at(i) as f32 - reference).abs() > threshold {
            return 0.0;
        }
    }

    module_size
}

/// Check a window against a pattern that must be followed by a quiet zone
/// (or the end of the row).
pub fn is_right_guard<const N: usize>(
    view: &PatternView,
    pattern: &FixedPattern<N>,
    min_quiet_zone: f32,
) -> bool {
    let space = view.space_after().map(|s| s as u32);
    is_pattern(view, pattern, space, min_quiet_zone, 0.0, false) != 0.0
}

/// Search for the next left guard inside `view`.
///
/// The first candidate sitting on the very first bar of the row is accepted
/// without a quiet-zone test; every later candidate needs `min_quiet_zone`
/// modules of background in front. Candidates advance by pairs of runs so a
/// window always starts on a bar. `min_size` is the smallest number of runs
/// that must remain from a candidate to the row end for a whole symbol.
pub fn find_left_guard<'a, const N: usize>(
    view: PatternView<'a>,
    min_size: usize,
    pattern: &FixedPattern<N>,
    min_quiet_zone: f32,
) -> Option<PatternView<'a>> {
    let min_size = min_size.max(N);
    if view.size() < min_size {
        return None;
    }

    let mut window = view.sub_view(0, N);
    if window.is_at_first_bar()
        && is_pattern(&window, pattern, None, min_quiet_zone, 0.0, false) != 0.0
    {
        return Some(window);
    }

    let limit = view.start + view.len - min_size;
    while window.start < limit {
        let space = window.before() as u32;
        if is_pattern(&window, pattern, Some(space), min_quiet_zone, 0.0, false) != 0.0 {
            return Some(window);
        }
        window.skip_pair();
    }

    None
}

/// Average deviation of observed run widths from a scaled reference pattern.
///
/// Returns `f32::MAX` when the window is too narrow for the pattern or any
/// single run deviates by more than `max_individual_variance` unit widths;
/// otherwise the total absolute deviation divided by the window width
/// (lower is better).
pub fn pattern_match_variance(
    counters: &[u16],
    pattern: &[u16],
    max_individual_variance: f32,
) -> f32 {
    let total: u32 = counters.iter().map(|&c| c as u32).sum();
    let pattern_modules: u32 = pattern.iter().map(|&p| p as u32).sum();
    if total < pattern_modules {
        // less than one pixel per module, too small to match reliably
        return f32::MAX;
    }

    let unit_width = total as f32 / pattern_modules as f32;
    let max_individual = max_individual_variance * unit_width;

    let mut total_variance = 0.0f32;
    for (&c, &p) in counters.iter().zip(pattern.iter()) {
        let variance = (c as f32 - p as f32 * unit_width).abs();
        if variance > max_individual {
            return f32::MAX;
        }
        total_variance += variance;
    }

    total_variance / total as f32
}
