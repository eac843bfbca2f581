use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the harness, the codec layer and the filter
/// candidates.
#[derive(Debug, Error)]
pub enum Error {
    /// Input image could not be read or decoded.
    #[error("failed to load image {path}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Output artifact could not be encoded or written.
    #[error("failed to save image {path}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// Candidates require a positive, finite range sigma.
    #[error("range_sigma must be a positive finite number, got {0}")]
    InvalidRangeSigma(f32),
    /// The input image has no pixels.
    #[error("input image has zero width or height")]
    EmptyInput,
    /// The output buffer does not have the shape the candidate contract
    /// requires. Candidates never resize buffers.
    #[error("output shape {actual:?} does not match expected {expected:?}")]
    ShapeMismatch {
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },
    /// A requested candidate name is not registered.
    #[error("unknown candidate {0:?}")]
    UnknownCandidate(String),
    /// The enabled-candidate list selected nothing.
    #[error("no candidates enabled")]
    NoCandidates,
    /// A candidate wrote into the shared read-only input buffer. This
    /// silently corrupts every later candidate's result, so it aborts the
    /// whole run.
    #[error("candidate {candidate:?} mutated the shared input buffer")]
    InputMutated { candidate: &'static str },
}
