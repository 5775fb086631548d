//! Error types for fuzzy system setup and evaluation

use thiserror::Error;

/// Everything that can go wrong while building or running a control system
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuzzyError {
    // Setup errors
    #[error("Invalid universe: min {min}, max {max}, step {step}")]
    InvalidUniverse { min: f64, max: f64, step: f64 },

    #[error("Invalid membership function: {0}")]
    InvalidMembershipFunction(String),

    #[error("Cannot partition a universe into zero sets")]
    EmptyPartition,

    #[error("Label {label:?} already exists on variable {variable:?}")]
    DuplicateLabel { variable: String, label: String },

    #[error("Variable {0:?} is already registered")]
    DuplicateVariable(String),

    // Rule base errors
    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Variable {variable:?} has no label {label:?}")]
    UnknownLabel { variable: String, label: String },

    #[error("Variable {variable:?} is not an {expected}")]
    WrongRole { variable: String, expected: &'static str },

    #[error("Rule #{0} has no conclusions")]
    EmptyConclusion(usize),

    #[error("Conclusion weight {0} is outside [0, 1]")]
    InvalidWeight(f64),

    // Evaluation errors
    #[error("No input set for antecedent {0:?}")]
    MissingInput(String),

    #[error("Input {value} for antecedent {variable:?} is not a finite number")]
    NonFiniteInput { variable: String, value: f64 },

    #[error("Aggregated set for {variable:?} has {actual} samples, universe has {expected}")]
    SampleCount { variable: String, expected: usize, actual: usize },

    #[error("No rule fired for consequent {0:?}")]
    NoRuleFired(String),

    #[error("Output {0:?} has not been computed")]
    NotComputed(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for fuzzy operations
pub type FuzzyResult<T> = Result<T, FuzzyError>;
