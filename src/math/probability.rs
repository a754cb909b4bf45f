/// Contribution `w * ln(w)` of one weight to the entropy numerator
///
/// Zero and negative weights contribute nothing, which matches the limit
/// `w ln w -> 0` as `w -> 0`.
pub fn weight_log_weight(weight: f64) -> f64 {
    if weight > 0.0 {
        weight * weight.ln()
    } else {
        0.0
    }
}

/// Shannon entropy of a weight distribution given its running sums
///
/// With `S = sum(w)` and `L = sum(w ln w)` the entropy of the normalised
/// distribution is `ln(S) - L / S`. Keeping only the two sums lets the
/// wave update entropy in O(1) per removal.
pub fn shannon_entropy(sum_of_weights: f64, sum_of_weight_log_weights: f64) -> f64 {
    if sum_of_weights <= 0.0 {
        return 0.0;
    }
    sum_of_weights.ln() - sum_of_weight_log_weights / sum_of_weights
}

/// Pick an index proportionally to `weights` using a uniform draw in [0, 1)
///
/// Returns `None` if all weights are zero or the slice is empty.
pub fn weighted_index(weights: &[f64], uniform: f64) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return None;
    }

    let mut remaining = uniform * total;
    let mut last_positive = None;
    for (i, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        last_positive = Some(i);
        if remaining < weight {
            return Some(i);
        }
        remaining -= weight;
    }
    // Rounding can leave a sliver past the final bucket
    last_positive
}
