//! Inference configuration.
//!
//! Every field has a default, so a partial TOML document is enough:
//!
//! ```toml
//! and_op = "prod"
//! defuzzification = "mean_of_maximum"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, FuzzyResult};
use crate::ops::{AndOp, DefuzzificationOp, OrOp};

/// Operators used when evaluating a control system.
///
/// The defaults give classic Mamdani inference: `min` for AND, `max` for OR,
/// and centroid defuzzification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub and_op: AndOp,
    pub or_op: OrOp,
    pub defuzzification: DefuzzificationOp,
}

impl InferenceConfig {
    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> FuzzyResult<Self> {
        toml::from_str(content).map_err(|e| FuzzyError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> FuzzyResult<String> {
        toml::to_string_pretty(self).map_err(|e| FuzzyError::Config(e.to_string()))
    }
}
