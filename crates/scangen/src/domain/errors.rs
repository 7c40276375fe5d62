//! Domain-specific errors.

use std::io;

use thiserror::Error;

/// Ranges that would not terminate or cannot be scaled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("step must be nonzero")]
    ZeroStep,
    #[error("range starting at {start} is empty")]
    EmptyRange { start: i64 },
    #[error("step {step} never reaches {stop} from {start}")]
    StepDirection { start: i64, stop: i64, step: i64 },
    #[error("scale divisor must be positive, got {0}")]
    NonPositiveDivisor(i64),
}

/// Failures while looking up or rendering a line template.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template '{0}' not found")]
    Unknown(String),
    #[error("invalid template '{name}'")]
    Invalid {
        name: String,
        #[source]
        source: minijinja::Error,
    },
    #[error("failed to render template '{name}'")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Failures while producing a generated file.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to write generated lines to {target}")]
    Io {
        target: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Template(#[from] TemplateError),
}
