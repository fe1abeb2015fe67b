//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// What went wrong on a specification line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("unknown species: \"{name}\"")]
    UnknownSpecies { name: String },

    #[error("the species \"{name}\" was already listed on line {first_line}")]
    DuplicateSpecies { name: String, first_line: usize },

    #[error("expected a keyword or ages after the species \"{species}\"")]
    MissingSelector { species: String },

    #[error("extra text after \"{keyword}\": \"{text}\"")]
    UnexpectedTrailingData { keyword: String, text: String },

    #[error("expected at least one species line, found {found}")]
    EmptyBlock { found: String },

    #[error("expected one or more species to plant")]
    EmptyPlantingList,

    #[error("the species \"{name}\" appears more than once in the planting list")]
    DuplicatePlantingSpecies { name: String },

    #[error("missing planting density in \"{text}\"")]
    MissingDensityValue { text: String },

    #[error("\"{text}\" is not a valid planting density")]
    MalformedDensity { text: String },

    #[error("planting density {text} is not between 0 and {max}")]
    DensityOutOfRange { text: String, max: u32 },

    #[error("missing \")\" after planting density: \"{text}\"")]
    UnterminatedDensity { text: String },

    #[error("expected \"{expected}\", found \"{found}\"")]
    ExpectedKeyword { expected: String, found: String },

    #[error("expected \"{expected}\", found end of input")]
    UnexpectedEndOfInput { expected: String },

    #[error("expected a value after \"{keyword}\"")]
    MissingValue { keyword: String },

    #[error("unknown cohort removal method: \"{text}\" (expected ClearCut or SpeciesList)")]
    UnknownRemovalMethod { text: String },

    #[error("\"{text}\" is not a valid repeat interval: expected a positive integer")]
    InvalidRepeatInterval { text: String },

    #[error("the prescription \"{name}\" was already defined on line {first_line}")]
    DuplicatePrescription { name: String, first_line: usize },
}

/// A parse failure with the source line it happened on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, kind: impl Into<ParseErrorKind>) -> Self {
        Self {
            line,
            kind: kind.into(),
        }
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

/// Result type for the readers.
pub type ParseResult<T> = Result<T, ParseError>;

/// Attach a line number to a line-less failure.
pub trait AtLine<T> {
    fn at_line(self, line: usize) -> ParseResult<T>;
}

impl<T, E: Into<ParseErrorKind>> AtLine<T> for Result<T, E> {
    fn at_line(self, line: usize) -> ParseResult<T> {
        self.map_err(|e| ParseError::new(line, e))
    }
}

/// Application errors wrap parse and domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{path}: {source}", path = .path.display())]
    ParseFile { path: PathBuf, source: ParseError },

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
