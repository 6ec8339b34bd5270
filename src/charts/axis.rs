//! Axis Labeling Utility
//! Shared tick computation so every chart labels the time axis the same way.

/// Tick positions and labels for a sequence of `len` points, one tick every
/// `stride` points, with labels drawn from `label_at`.
///
/// The label source is a closure so callers can feed period labels, dates or
/// anything else without the charts layer knowing about the data model.
pub fn tick_labels<F>(len: usize, stride: usize, label_at: F) -> Vec<(usize, String)>
where
    F: Fn(usize) -> String,
{
    if len == 0 || stride == 0 {
        return Vec::new();
    }
    (0..len)
        .step_by(stride)
        .map(|i| (i, label_at(i)))
        .collect()
}

/// Stride that keeps roughly `target` ticks on the axis.
pub fn stride_for(len: usize, target: usize) -> usize {
    (len / target.max(1)).max(1)
}
