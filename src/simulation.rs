use tracing::debug;

use crate::error::{FuzzyError, FuzzyResult};
use crate::inference::ControlSystem;
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::variable::{Antecedent, Consequent, Kind, Variable, VariableKey};

/// Crisp inputs and computed outputs for one evaluation against a shared
/// `ControlSystem`.
///
/// Cheap to create; make one per request (or per thread) rather than
/// reusing a single instance everywhere.
#[derive(Clone, Debug)]
pub struct Simulation<'s> {
    system: &'s ControlSystem,
    inputs: Inputs,
    outputs: Option<Outputs>,
}

impl<'s> Simulation<'s> {
    pub fn new(system: &'s ControlSystem) -> Self {
        Self {
            system,
            inputs: Inputs::new(),
            outputs: None,
        }
    }

    pub fn system(&self) -> &'s ControlSystem {
        self.system
    }

    /// Sets the crisp value of the antecedent called `name`. Clears any computed outputs.
    pub fn set_input(&mut self, name: &str, value: f64) -> FuzzyResult<()> {
        let key = self.checked_input(name, value)?;

        self.inputs.0.insert(key, value);
        self.outputs = None;

        Ok(())
    }

    /// Sets several inputs at once. Nothing is stored if any name or value is rejected.
    pub fn set_inputs<'n>(&mut self, values: impl IntoIterator<Item = (&'n str, f64)>) -> FuzzyResult<()> {
        let checked = values
            .into_iter()
            .map(|(name, value)| Ok((self.checked_input(name, value)?, value)))
            .collect::<FuzzyResult<Vec<_>>>()?;

        self.inputs.0.extend(checked);
        self.outputs = None;

        Ok(())
    }

    /// Typed variant of `set_input`
    pub fn input(&mut self, var: Variable<Antecedent>, value: f64) -> FuzzyResult<()> {
        if !value.is_finite() {
            let variable = self
                .system
                .variables()
                .get(var)
                .map_or_else(|| format!("{:?}", var.key()), |v| v.name().to_owned());

            return Err(FuzzyError::NonFiniteInput { variable, value });
        }

        self.inputs.add(var, value);
        self.outputs = None;

        Ok(())
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    /// Evaluates every rule and defuzzifies every consequent. On failure no
    /// outputs are kept.
    pub fn compute(&mut self) -> FuzzyResult<()> {
        self.outputs = None;

        let outputs = self.system.eval(&self.inputs)?;

        debug!(rules = outputs.firing_strengths().len(), "computed simulation");
        self.outputs = Some(outputs);

        Ok(())
    }

    /// Crisp value of the consequent called `name`
    pub fn output(&self, name: &str) -> FuzzyResult<f64> {
        let key = self.key_of(name, Kind::Consequent)?;

        self.crisp(key, name)
    }

    /// Typed variant of `output`
    pub fn output_of(&self, var: Variable<Consequent>) -> FuzzyResult<f64> {
        let name = self
            .system
            .variables()
            .get(var)
            .ok_or_else(|| FuzzyError::UnknownVariable(format!("{:?}", var.key())))?
            .name();

        self.crisp(var.key(), name)
    }

    /// Everything the last successful `compute` produced
    pub fn outputs(&self) -> Option<&Outputs> {
        self.outputs.as_ref()
    }

    pub fn firing_strengths(&self) -> Option<&[f64]> {
        self.outputs.as_ref().map(Outputs::firing_strengths)
    }

    fn crisp(&self, key: VariableKey, name: &str) -> FuzzyResult<f64> {
        self.outputs
            .as_ref()
            .and_then(|outputs| outputs.inferred(key))
            .map(|inferred| inferred.crisp)
            .ok_or_else(|| FuzzyError::NotComputed(name.to_owned()))
    }

    fn key_of(&self, name: &str, expected: Kind) -> FuzzyResult<VariableKey> {
        match self.system.variables().by_name(name) {
            Some(var) if var.kind() == expected => self.system.variables().key_of(name),
            _ => Err(FuzzyError::UnknownVariable(name.to_owned())),
        }
    }

    fn checked_input(&self, name: &str, value: f64) -> FuzzyResult<VariableKey> {
        let key = self.key_of(name, Kind::Antecedent)?;

        if !value.is_finite() {
            return Err(FuzzyError::NonFiniteInput {
                variable: name.to_owned(),
                value,
            });
        }

        Ok(key)
    }
}
