use crate::config::InferenceConfig;
use crate::error::{FuzzyError, FuzzyResult};
use crate::inputs::Inputs;
use crate::variable::{Antecedent, Variable, VariableKey, Variables};

/// A rule premise: propositions on antecedents joined by fuzzy connectives
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Is(VariableKey, String),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    pub fn and(self, rhs: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(rhs))
    }

    pub fn or(self, rhs: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs))
    }

    pub fn negate(self) -> Self {
        Expr::Not(Box::new(self))
    }

    /// Every `(variable, label)` leaf, left to right
    pub fn propositions(&self) -> Vec<(VariableKey, &str)> {
        fn parse<'p>(expr: &'p Expr, out: &mut Vec<(VariableKey, &'p str)>) {
            match expr {
                Expr::Is(var_key, label) => out.push((*var_key, label)),
                Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                    parse(lhs, out);
                    parse(rhs, out);
                },
                Expr::Not(expr) => parse(expr, out),
            }
        }

        let mut props = Vec::new();
        parse(self, &mut props);
        props
    }

    /// Firing strength of the premise for the given crisp inputs
    pub fn evaluate(&self, vars: &Variables, inputs: &Inputs, config: &InferenceConfig) -> FuzzyResult<f64> {
        match self {
            Expr::Is(var_key, label) => {
                let var = vars.resolve(*var_key)?;
                let x = inputs
                    .get(*var_key)
                    .ok_or_else(|| FuzzyError::MissingInput(var.name().to_owned()))?;

                var.membership_of(label, x)
            },
            Expr::And(lhs, rhs) => {
                let left = lhs.evaluate(vars, inputs, config)?;
                let right = rhs.evaluate(vars, inputs, config)?;

                Ok(config.and_op.call(left, right))
            },
            Expr::Or(lhs, rhs) => {
                let left = lhs.evaluate(vars, inputs, config)?;
                let right = rhs.evaluate(vars, inputs, config)?;

                Ok(config.or_op.call(left, right))
            },
            Expr::Not(expr) => Ok(1. - expr.evaluate(vars, inputs, config)?),
        }
    }
}

impl Variable<Antecedent> {
    pub fn is(self, label: impl Into<String>) -> Expr {
        Expr::Is(self.0, label.into())
    }
}

impl Variables {
    /// A proposition on an antecedent looked up by name, checked right away
    pub fn term(&self, name: &str, label: &str) -> FuzzyResult<Expr> {
        let var = self.antecedent(name)?;

        if self.vars[var.0].membership(label).is_none() {
            return Err(FuzzyError::UnknownLabel {
                variable: name.to_owned(),
                label: label.to_owned(),
            });
        }

        Ok(var.is(label))
    }
}
