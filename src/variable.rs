use std::collections::{HashMap, HashSet};
use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use slotmap::{new_key_type, SlotMap};

use crate::error::{FuzzyError, FuzzyResult};
use crate::membership::{auto_partition, Membership};
use crate::ops::DefuzzificationOp;
use crate::universe::Universe;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Marker for input variables, read on the condition side of rules
#[derive(Clone, Copy, Debug)]
pub struct Antecedent;

/// Marker for output variables, set on the conclusion side of rules
#[derive(Clone, Copy, Debug)]
pub struct Consequent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Antecedent,
    Consequent,
}

impl Kind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Antecedent => "antecedent",
            Kind::Consequent => "consequent",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Role {
    const KIND: Kind;
}

impl Role for Antecedent {
    const KIND: Kind = Kind::Antecedent;
}

impl Role for Consequent {
    const KIND: Kind = Kind::Consequent;
}

/// A typed handle to a variable registered in `Variables`
pub struct Variable<R>(pub(crate) VariableKey, PhantomData<R>);

impl<R> Variable<R> {
    pub fn key(self) -> VariableKey {
        self.0
    }
}

impl<R> Clone for Variable<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Variable<R> {}

impl<R> fmt::Debug for Variable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Variable").field(&self.0).finish()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuzzySet {
    pub label: String,
    pub membership: Membership,
}

/// A named universe together with its labeled fuzzy sets
#[derive(Clone, Debug)]
pub struct LinguisticVariable {
    name: String,
    kind: Kind,
    universe: Universe,
    sets: Vec<FuzzySet>,
    labels: HashMap<String, usize>,
}

impl LinguisticVariable {
    fn new(name: String, kind: Kind, universe: Universe) -> Self {
        Self {
            name,
            kind,
            universe,
            sets: Vec::new(),
            labels: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn sets(&self) -> &[FuzzySet] {
        &self.sets
    }

    /// Labels in registration order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|set| set.label.as_str())
    }

    pub fn membership(&self, label: &str) -> Option<&Membership> {
        self.labels.get(label).map(|i| &self.sets[*i].membership)
    }

    pub(crate) fn add_set(&mut self, label: String, membership: Membership) -> FuzzyResult<()> {
        if self.labels.contains_key(&label) {
            return Err(FuzzyError::DuplicateLabel {
                variable: self.name.clone(),
                label,
            });
        }

        membership.validate()?;
        self.labels.insert(label.clone(), self.sets.len());
        self.sets.push(FuzzySet { label, membership });

        Ok(())
    }

    fn require(&self, label: &str) -> FuzzyResult<&Membership> {
        self.membership(label).ok_or_else(|| FuzzyError::UnknownLabel {
            variable: self.name.clone(),
            label: label.to_owned(),
        })
    }

    /// Degree of `x` (clamped to the universe) in every set, in registration order
    pub fn fuzzify(&self, x: f64) -> Vec<(&str, f64)> {
        let x = self.universe.clamp(x);

        self.sets
            .iter()
            .map(|set| (set.label.as_str(), set.membership.evaluate(x)))
            .collect()
    }

    /// Degree of `x` (clamped to the universe) in one set
    pub fn membership_of(&self, label: &str, x: f64) -> FuzzyResult<f64> {
        Ok(self.require(label)?.evaluate(self.universe.clamp(x)))
    }

    /// One set evaluated across the whole universe
    pub fn sampled(&self, label: &str) -> FuzzyResult<Vec<f64>> {
        Ok(self.require(label)?.sample(&self.universe))
    }

    /// Reduces a membership function sampled on this variable's universe to a crisp value
    pub fn defuzzify(&self, aggregated: &[f64], op: DefuzzificationOp) -> FuzzyResult<f64> {
        if self.kind != Kind::Consequent {
            return Err(FuzzyError::WrongRole {
                variable: self.name.clone(),
                expected: Kind::Consequent.as_str(),
            });
        }

        if aggregated.len() != self.universe.len() {
            return Err(FuzzyError::SampleCount {
                variable: self.name.clone(),
                expected: self.universe.len(),
                actual: aggregated.len(),
            });
        }

        if aggregated.iter().sum::<f64>() == 0. {
            return Err(FuzzyError::NoRuleFired(self.name.clone()));
        }

        Ok(op.call(self.universe.points(), aggregated))
    }
}

/// Registry of every linguistic variable in a system
#[derive(Debug, Default)]
pub struct Variables {
    pub(crate) vars: SlotMap<VariableKey, LinguisticVariable>,
    names: HashMap<String, VariableKey>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_antecedent(&mut self, name: impl Into<String>, universe: Universe) -> FuzzyResult<Variable<Antecedent>> {
        self.add(name.into(), universe)
    }

    pub fn add_consequent(&mut self, name: impl Into<String>, universe: Universe) -> FuzzyResult<Variable<Consequent>> {
        self.add(name.into(), universe)
    }

    fn add<R: Role>(&mut self, name: String, universe: Universe) -> FuzzyResult<Variable<R>> {
        if self.names.contains_key(&name) {
            return Err(FuzzyError::DuplicateVariable(name));
        }

        let key = self
            .vars
            .insert(LinguisticVariable::new(name.clone(), R::KIND, universe));
        self.names.insert(name, key);

        Ok(Variable(key, PhantomData))
    }

    /// Registers a labeled fuzzy set on `var`
    pub fn add_set<R>(&mut self, var: Variable<R>, label: impl Into<String>, membership: Membership) -> FuzzyResult<()> {
        self.get_mut(var.0)?.add_set(label.into(), membership)
    }

    /// Covers the universe of `var` with evenly spaced triangles, one per label.
    /// Registers every set or none of them.
    pub fn auto_partition<R, S: AsRef<str>>(&mut self, var: Variable<R>, labels: &[S]) -> FuzzyResult<()> {
        let var = self.get_mut(var.0)?;
        let sets = auto_partition(var.universe(), labels)?;
        let mut seen = HashSet::with_capacity(sets.len());

        for (label, _) in &sets {
            if var.labels.contains_key(label) || !seen.insert(label.as_str()) {
                return Err(FuzzyError::DuplicateLabel {
                    variable: var.name.clone(),
                    label: label.clone(),
                });
            }
        }

        for (label, membership) in sets {
            var.add_set(label, membership)?;
        }

        Ok(())
    }

    pub fn get<R>(&self, var: Variable<R>) -> Option<&LinguisticVariable> {
        self.vars.get(var.0)
    }

    pub fn by_name(&self, name: &str) -> Option<&LinguisticVariable> {
        self.names.get(name).map(|key| &self.vars[*key])
    }

    /// Looks up an antecedent handle by name
    pub fn antecedent(&self, name: &str) -> FuzzyResult<Variable<Antecedent>> {
        self.handle(name)
    }

    /// Looks up a consequent handle by name
    pub fn consequent(&self, name: &str) -> FuzzyResult<Variable<Consequent>> {
        self.handle(name)
    }

    fn handle<R: Role>(&self, name: &str) -> FuzzyResult<Variable<R>> {
        let key = self.key_of(name)?;

        if self.vars[key].kind != R::KIND {
            return Err(FuzzyError::WrongRole {
                variable: name.to_owned(),
                expected: R::KIND.as_str(),
            });
        }

        Ok(Variable(key, PhantomData))
    }

    pub(crate) fn key_of(&self, name: &str) -> FuzzyResult<VariableKey> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| FuzzyError::UnknownVariable(name.to_owned()))
    }

    pub(crate) fn resolve(&self, key: VariableKey) -> FuzzyResult<&LinguisticVariable> {
        self.vars
            .get(key)
            .ok_or_else(|| FuzzyError::UnknownVariable(format!("{key:?}")))
    }

    fn get_mut(&mut self, key: VariableKey) -> FuzzyResult<&mut LinguisticVariable> {
        self.vars
            .get_mut(key)
            .ok_or_else(|| FuzzyError::UnknownVariable(format!("{key:?}")))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, &LinguisticVariable)> {
        self.vars.iter()
    }
}
