use std::collections::HashMap;

use crate::variable::{Consequent, Variable, VariableKey};

/// The aggregated fuzzy set of one consequent and its defuzzified value
#[derive(Clone, Debug, PartialEq)]
pub struct Inferred {
    pub aggregated: Vec<f64>,
    pub crisp: f64,
}

/// Result of one inference pass
#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    inferred: HashMap<VariableKey, Inferred>,
    firing_strengths: Vec<f64>,
}

impl Outputs {
    pub(crate) fn new(inferred: HashMap<VariableKey, Inferred>, firing_strengths: Vec<f64>) -> Self {
        Self {
            inferred,
            firing_strengths,
        }
    }

    pub fn get(&self, var: Variable<Consequent>) -> Option<f64> {
        self.inferred.get(&var.0).map(|inferred| inferred.crisp)
    }

    pub fn inferred(&self, key: VariableKey) -> Option<&Inferred> {
        self.inferred.get(&key)
    }

    /// Firing strength of each rule, in rule base order
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }
}
