/// Dot product of two equal-length slices.
///
/// Returns `0.0` when the lengths differ instead of failing; callers that
/// care about shape check it before getting here.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Sum of absolute values: Σ|v[i]|
pub fn abs_sum(v: &[f64]) -> f64 {
    v.iter().map(|x| x.abs()).sum()
}
