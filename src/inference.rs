use std::collections::HashMap;

use tracing::{debug, trace};

use crate::config::InferenceConfig;
use crate::error::{FuzzyError, FuzzyResult};
use crate::inputs::Inputs;
use crate::outputs::{Inferred, Outputs};
use crate::rules::Rules;
use crate::variable::{Kind, LinguisticVariable, VariableKey, Variables};

/// A validated, immutable rule base over its variables.
///
/// Evaluation never mutates the system, so one instance can back any number
/// of simulations, including ones living on other threads.
#[derive(Debug)]
pub struct ControlSystem {
    variables: Variables,
    rules: Rules,
    config: InferenceConfig,
}

impl ControlSystem {
    pub fn new(variables: Variables, rules: Rules) -> FuzzyResult<Self> {
        Self::with_config(variables, rules, InferenceConfig::default())
    }

    /// Checks that every term of every rule names a registered variable of
    /// the right kind and one of its labels.
    pub fn with_config(variables: Variables, rules: Rules, config: InferenceConfig) -> FuzzyResult<Self> {
        for (i, rule) in rules.iter().enumerate() {
            for (var_key, label) in rule.premise().propositions() {
                check_term(&variables, var_key, label, Kind::Antecedent)?;
            }

            if rule.conclusions().is_empty() {
                return Err(FuzzyError::EmptyConclusion(i));
            }

            for conclusion in rule.conclusions() {
                check_term(&variables, conclusion.var, &conclusion.label, Kind::Consequent)?;

                if !(0. ..=1.).contains(&conclusion.weight) {
                    return Err(FuzzyError::InvalidWeight(conclusion.weight));
                }
            }
        }

        debug!(
            variables = variables.len(),
            rules = rules.len(),
            ?config,
            "built control system"
        );

        Ok(Self {
            variables,
            rules,
            config,
        })
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn antecedents(&self) -> impl Iterator<Item = (VariableKey, &LinguisticVariable)> {
        self.variables
            .iter()
            .filter(|(_, var)| var.kind() == Kind::Antecedent)
    }

    pub fn consequents(&self) -> impl Iterator<Item = (VariableKey, &LinguisticVariable)> {
        self.variables
            .iter()
            .filter(|(_, var)| var.kind() == Kind::Consequent)
    }

    /// Runs one Mamdani pass: fire every rule, clip each conclusion's set at
    /// the rule's strength, take the pointwise max per consequent, then
    /// defuzzify.
    pub fn eval(&self, inputs: &Inputs) -> FuzzyResult<Outputs> {
        for (key, var) in self.antecedents() {
            match inputs.get(key) {
                None => return Err(FuzzyError::MissingInput(var.name().to_owned())),
                Some(value) if !value.is_finite() => {
                    return Err(FuzzyError::NonFiniteInput {
                        variable: var.name().to_owned(),
                        value,
                    })
                },
                Some(_) => {},
            }
        }

        let mut aggregated: HashMap<VariableKey, Vec<f64>> = self
            .consequents()
            .map(|(key, var)| (key, vec![0.; var.universe().len()]))
            .collect();
        let mut firing_strengths = Vec::with_capacity(self.rules.len());

        for (i, rule) in self.rules.iter().enumerate() {
            let strength = rule.fire(&self.variables, inputs, &self.config)?;

            trace!(rule = i, strength, "fired rule");
            firing_strengths.push(strength);

            for conclusion in rule.conclusions() {
                let var = self.variables.resolve(conclusion.var)?;
                let membership = var
                    .membership(&conclusion.label)
                    .ok_or_else(|| FuzzyError::UnknownLabel {
                        variable: var.name().to_owned(),
                        label: conclusion.label.clone(),
                    })?;
                let activation = strength * conclusion.weight;
                let Some(agg) = aggregated.get_mut(&conclusion.var) else {
                    continue;
                };

                // Min implication, max aggregation
                for (slot, x) in agg.iter_mut().zip(var.universe().points()) {
                    *slot = f64::max(*slot, f64::min(activation, membership.evaluate(*x)));
                }
            }
        }

        let mut inferred = HashMap::with_capacity(aggregated.len());

        for (key, var) in self.consequents() {
            let Some(aggregated) = aggregated.remove(&key) else {
                continue;
            };
            let crisp = var.defuzzify(&aggregated, self.config.defuzzification)?;

            debug!(variable = var.name(), crisp, "defuzzified output");
            inferred.insert(key, Inferred { aggregated, crisp });
        }

        Ok(Outputs::new(inferred, firing_strengths))
    }
}

fn check_term(variables: &Variables, var_key: VariableKey, label: &str, expected: Kind) -> FuzzyResult<()> {
    let var = variables.resolve(var_key)?;

    if var.kind() != expected {
        return Err(FuzzyError::WrongRole {
            variable: var.name().to_owned(),
            expected: expected.as_str(),
        });
    }

    if var.membership(label).is_none() {
        return Err(FuzzyError::UnknownLabel {
            variable: var.name().to_owned(),
            label: label.to_owned(),
        });
    }

    Ok(())
}
