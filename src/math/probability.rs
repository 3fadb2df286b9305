/// Entropy heuristic over raw catalog weights: `-Σ w·log2(w)`
///
/// Weights are not normalised to sum to one, so this measures relative
/// uncertainty rather than Shannon entropy. Cells whose remaining options are
/// collectively rare score lower and are committed earlier. Non-positive
/// weights contribute nothing.
pub fn weighted_entropy(weights: impl IntoIterator<Item = f64>) -> f64 {
    -weights
        .into_iter()
        .filter(|&w| w > 0.0)
        .map(|w| w * w.log2())
        .sum::<f64>()
}

/// Normalised cumulative distribution of the given weights
///
/// The last entry is 1.0 whenever the total weight is positive. Returns an
/// empty vector if the total is not positive.
pub fn cumulative_distribution(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().filter(|&&w| w > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut cumulative = 0.0;
    weights
        .iter()
        .map(|&w| {
            cumulative += w.max(0.0) / total;
            cumulative
        })
        .collect()
}

/// Index of the first cumulative entry strictly greater than `draw`
///
/// `draw` is expected in `[0, 1)`. Rounding can leave the final entry just
/// below 1.0, so the last index is returned as a fallback.
pub fn sample_cumulative(cumulative: &[f64], draw: f64) -> Option<usize> {
    cumulative
        .iter()
        .position(|&c| c > draw)
        .or_else(|| cumulative.len().checked_sub(1))
}
