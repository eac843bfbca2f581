//! Candidate pipeline variants and their registry.

use crate::buffer::ImageF32;
use crate::error::Error;
use crate::grid::{ManualFilter, ParallelFilter, ScalarFilter};
use crate::params::FilterParams;

/// One interchangeable implementation of the filter.
///
/// Implementations must be stateless: repeated `run` calls with the same
/// arguments write the same pixels into `output` and have no other effect.
/// The input buffer is shared read-only by every candidate in a harness run
/// and must never be written; the harness checks this and treats a
/// violation as fatal.
pub trait Candidate: Send + Sync {
    /// Short key used for run-time selection.
    fn name(&self) -> &'static str;

    /// Human-readable label used in the timing report.
    fn label(&self) -> &'static str;

    /// Filter `input` into `output`.
    ///
    /// `output` must already have shape `(input.width, input.height, 1)`;
    /// candidates never resize it. A mismatched buffer is rejected before
    /// any pixel work.
    fn run(
        &self,
        input: &ImageF32,
        params: &FilterParams,
        output: &mut ImageF32,
    ) -> Result<(), Error>;
}

/// Ordered, fixed set of candidates for one harness run.
///
/// The registry does not verify that its members agree numerically; the
/// test suite does. Reporting assumes they do.
pub struct Registry {
    entries: Vec<Box<dyn Candidate>>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.entries.iter().map(|c| c.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl Registry {
    /// Every built-in candidate, primary (manually tuned) first.
    #[must_use]
    pub fn all() -> Self {
        Self {
            entries: vec![
                Box::new(ManualFilter),
                Box::new(ScalarFilter),
                Box::new(ParallelFilter),
            ],
        }
    }

    /// Built-in candidates restricted to `names`, keeping the canonical
    /// order. Unrecognized names and empty selections are errors rather
    /// than silently shrinking the comparison table.
    pub fn with_enabled<S: AsRef<str>>(names: &[S]) -> Result<Self, Error> {
        let all = Self::all();
        for name in names {
            if !all.entries.iter().any(|c| c.name() == name.as_ref()) {
                return Err(Error::UnknownCandidate(name.as_ref().to_owned()));
            }
        }
        let entries: Vec<_> = all
            .entries
            .into_iter()
            .filter(|c| names.iter().any(|n| n.as_ref() == c.name()))
            .collect();
        if entries.is_empty() {
            return Err(Error::NoCandidates);
        }
        Ok(Self { entries })
    }

    /// Candidates in fixed registry order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Candidate> {
        self.entries.iter().map(|c| c.as_ref())
    }

    /// First registered candidate. It runs the untimed reference pass and
    /// produces the persisted artifact.
    #[must_use]
    pub fn primary(&self) -> &dyn Candidate {
        self.entries[0].as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
