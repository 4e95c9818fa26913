//! Pipeline boundary error.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Stages of a pipeline run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    SchemaLoad,
    Ingest,
    Load,
    CountCheck,
    TypeCheck,
    DriftCheck,
    Persist,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::SchemaLoad => "schema load",
            Stage::Ingest => "ingest",
            Stage::Load => "load",
            Stage::CountCheck => "column count check",
            Stage::TypeCheck => "numeric type check",
            Stage::DriftCheck => "drift check",
            Stage::Persist => "persist",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any failure during a run, tagged with the stage it happened in.
///
/// The original error is kept as the source so callers can inspect or print
/// the full chain.
#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: Box<dyn StdError + Send + Sync + 'static>,
}

impl PipelineError {
    pub fn new<E>(stage: Stage, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            stage,
            source: Box::new(source),
        }
    }

    /// Closure for `map_err` that tags an error with `stage`.
    pub fn at<E>(stage: Stage) -> impl FnOnce(E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        move |source| Self::new(stage, source)
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_stage_and_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = PipelineError::new(Stage::Persist, io);
        assert_eq!(err.to_string(), "persist stage failed: denied");
        assert!(err.source().is_some());
    }

    #[test]
    fn at_tags_stage() {
        let result: std::result::Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let err = result.map_err(PipelineError::at(Stage::DriftCheck)).unwrap_err();
        assert_eq!(err.stage, Stage::DriftCheck);
    }
}
