use thiserror::Error;

use crate::kind::ChartKind;

/// Rejected input at the data ingestion boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    #[error("expected an array of records")]
    NotAnArray,

    #[error("record {index} is not an object")]
    NotAnObject { index: usize },

    #[error("record {index} has no label, name, category or date field")]
    MissingKey { index: usize },

    #[error("record {index}: `{value}` is not a YYYY-MM-DD date")]
    InvalidDate { index: usize, value: String },

    #[error("record {index}: value for `{series}` is not a finite number")]
    NonFinite { index: usize, series: String },

    #[error("duplicate category `{0}`")]
    DuplicateKey(String),

    #[error("tree node is not an object or has no name")]
    MissingName,

    #[error("tree node `{0}` has neither a value nor children")]
    EmptyNode(String),

    #[error("tree node `{parent}` has two children named `{name}`")]
    DuplicateChild { parent: String, name: String },
}

/// Failure of one render step. Steps fail independently; the chart logs the
/// error and carries on with the remaining steps.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("{kind} charts have no cartesian scales")]
    NoCartesianScale { kind: ChartKind },

    #[error("{kind} charts need tabular data")]
    NeedsTable { kind: ChartKind },

    #[error("layout produced a non-finite coordinate for `{key}`")]
    NonFinite { key: String },
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
