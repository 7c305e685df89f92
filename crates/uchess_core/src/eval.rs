//! Score presentation helpers

/// Probability that white wins given a centipawn score from white's side
pub fn win_probability(cp: i32) -> f64 {
    let pawns = f64::from(cp) / 100.0;
    1.0 / (1.0 + 10f64.powf(-pawns / 4.0))
}

/// Whether `pct` (0..=100) reaches the `idx`-th of `total` equal steps.
///
/// Used to fill an evaluation bar one cell at a time.
pub fn at_scale(idx: usize, total: usize, pct: f64) -> bool {
    if total == 0 {
        return false;
    }
    let step = 100.0 / total as f64;
    pct >= idx as f64 * step
}

/// Round `x` to the nearest multiple of `unit`
pub fn round_nearest(x: f64, unit: f64) -> f64 {
    (x / unit).round() * unit
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
