use crate::config::InferenceConfig;
use crate::dsl::Expr;
use crate::error::{FuzzyError, FuzzyResult};
use crate::inputs::Inputs;
use crate::variable::{Consequent, Variable, VariableKey, Variables};

/// A `(consequent, label)` pair a rule concludes on
#[derive(Clone, Debug, PartialEq)]
pub struct Conclusion {
    pub(crate) var: VariableKey,
    pub(crate) label: String,
    pub(crate) weight: f64,
}

impl Conclusion {
    /// Scales the rule's firing strength for this conclusion. Must lie in [0, 1].
    pub fn weighted(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn variable(&self) -> VariableKey {
        self.var
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl Variable<Consequent> {
    pub fn is(self, label: impl Into<String>) -> Conclusion {
        Conclusion {
            var: self.0,
            label: label.into(),
            weight: 1.,
        }
    }
}

impl Variables {
    /// A conclusion on a consequent looked up by name, checked right away
    pub fn conclusion(&self, name: &str, label: &str) -> FuzzyResult<Conclusion> {
        let var = self.consequent(name)?;

        if self.vars[var.0].membership(label).is_none() {
            return Err(FuzzyError::UnknownLabel {
                variable: name.to_owned(),
                label: label.to_owned(),
            });
        }

        Ok(var.is(label))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    premise: Expr,
    conclusions: Vec<Conclusion>,
}

impl Rule {
    pub fn new(premise: Expr, conclusions: impl IntoIterator<Item = Conclusion>) -> Self {
        Rule {
            premise,
            conclusions: conclusions.into_iter().collect(),
        }
    }

    pub fn premise(&self) -> &Expr {
        &self.premise
    }

    pub fn conclusions(&self) -> &[Conclusion] {
        &self.conclusions
    }

    /// Firing strength of the premise
    pub fn fire(&self, vars: &Variables, inputs: &Inputs, config: &InferenceConfig) -> FuzzyResult<f64> {
        self.premise.evaluate(vars, inputs, config)
    }
}

/// The ordered rule base
#[derive(Clone, Debug, Default)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn add(&mut self, premise: Expr, conclusions: impl IntoIterator<Item = Conclusion>) {
        self.push(Rule::new(premise, conclusions));
    }

    pub fn push(&mut self, rule: Rule) {
        self.0.push(rule);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }
}

impl FromIterator<Rule> for Rules {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Rules(iter.into_iter().collect())
    }
}
