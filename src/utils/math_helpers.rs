/// Replaces NaN and infinities with `0.0`.
///
/// # Examples
/// ```
/// use particle_life::utils::sanitize;
///
/// assert_eq!(sanitize(1.5), 1.5);
/// assert_eq!(sanitize(f32::NAN), 0.0);
/// assert_eq!(sanitize(f32::NEG_INFINITY), 0.0);
/// ```
#[inline]
pub fn sanitize(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Component-wise `sanitize` for a 2D vector.
#[inline]
pub fn sanitize_vector(v: (f32, f32)) -> (f32, f32) {
    (sanitize(v.0), sanitize(v.1))
}

/// Euclidean length of a 2D vector.
#[inline]
pub fn length(v: (f32, f32)) -> f32 {
    (v.0 * v.0 + v.1 * v.1).sqrt()
}

/// Splits `len` items into `parts` contiguous ranges whose sizes differ by at most one.
///
/// The first `len % parts` ranges get the extra item. Ranges may be empty when there are
/// more parts than items.
///
/// # Examples
/// ```
/// use particle_life::utils::split_evenly;
///
/// assert_eq!(split_evenly(10, 3), vec![0..4, 4..7, 7..10]);
/// assert_eq!(split_evenly(2, 3), vec![0..1, 1..2, 2..2]);
/// ```
pub fn split_evenly(len: usize, parts: usize) -> Vec<std::ops::Range<usize>> {
    debug_assert!(parts > 0, "cannot split into zero parts");
    let parts = parts.max(1);
    let base = len / parts;
    let remainder = len % parts;

    let mut start = 0;
    (0..parts)
        .map(|i| {
            let size = base + usize::from(i < remainder);
            let range = start..start + size;
            start += size;
            range
        })
        .collect()
}
