use std::collections::BTreeSet;

/// Indices of `count` items spread evenly across `0..total`, ascending
///
/// Always returns exactly `min(count, total)` indices. With `count < total`
/// the step between picks is above 1, so no two picks round to the same
/// index.
pub fn pick_even_indices(total: usize, count: usize) -> Vec<usize> {
    if total == 0 || count == 0 {
        return Vec::new();
    }
    if count >= total {
        return (0..total).collect();
    }
    if count == 1 {
        return vec![total / 2];
    }

    let step = (total - 1) as f64 / (count - 1) as f64;
    let picked: BTreeSet<usize> = (0..count)
        .map(|i| (i as f64 * step).round() as usize)
        .collect();
    picked.into_iter().collect()
}
