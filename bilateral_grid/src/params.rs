/// Filter parameters, immutable for the duration of one harness run.
///
/// Values are passed through from the caller without bounds validation;
/// candidates reject non-positive or non-finite sigmas when invoked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// Smoothing strength of the range (intensity) dimension.
    pub range_sigma: f32,
}

impl FilterParams {
    #[must_use]
    pub fn new(range_sigma: f32) -> Self {
        Self { range_sigma }
    }
}
