//! Read-only snapshots of a variable for plotting.

use serde::Serialize;

use crate::error::{FuzzyError, FuzzyResult};
use crate::inference::ControlSystem;
use crate::simulation::Simulation;
use crate::variable::{Kind, LinguisticVariable};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TermView {
    pub label: String,
    /// The set's membership function sampled on the universe
    pub membership: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VariableView {
    pub name: String,
    pub kind: Kind,
    pub universe: Vec<f64>,
    pub terms: Vec<TermView>,
    /// Crisp input of an antecedent, when set
    pub input: Option<f64>,
    /// Aggregated set of a consequent after a compute pass
    pub aggregated: Option<Vec<f64>>,
    /// Defuzzified value of a consequent after a compute pass
    pub crisp: Option<f64>,
}

impl VariableView {
    fn new(var: &LinguisticVariable) -> Self {
        let universe = var.universe();

        Self {
            name: var.name().to_owned(),
            kind: var.kind(),
            universe: universe.points().to_vec(),
            terms: var
                .sets()
                .iter()
                .map(|set| TermView {
                    label: set.label.clone(),
                    membership: set.membership.sample(universe),
                })
                .collect(),
            input: None,
            aggregated: None,
            crisp: None,
        }
    }
}

impl ControlSystem {
    /// Universe and sampled sets of the variable called `name`
    pub fn view(&self, name: &str) -> FuzzyResult<VariableView> {
        self.variables()
            .by_name(name)
            .map(VariableView::new)
            .ok_or_else(|| FuzzyError::UnknownVariable(name.to_owned()))
    }
}

impl Simulation<'_> {
    /// Like `ControlSystem::view`, plus the current input or computed output
    pub fn view(&self, name: &str) -> FuzzyResult<VariableView> {
        let mut view = self.system().view(name)?;
        let key = self.system().variables().key_of(name)?;

        match view.kind {
            Kind::Antecedent => view.input = self.inputs().get(key),
            Kind::Consequent => {
                if let Some(inferred) = self.outputs().and_then(|outputs| outputs.inferred(key)) {
                    view.aggregated = Some(inferred.aggregated.clone());
                    view.crisp = Some(inferred.crisp);
                }
            },
        }

        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::Membership;
    use crate::rules::Rules;
    use crate::universe::Universe;
    use crate::variable::Variables;

    fn system() -> ControlSystem {
        let mut vars = Variables::new();
        let load = vars
            .add_antecedent("load", Universe::new(0., 4., 1.).unwrap())
            .unwrap();
        let fan = vars
            .add_consequent("fan", Universe::new(0., 2., 0.5).unwrap())
            .unwrap();

        vars.auto_partition(load, &["idle", "busy"]).unwrap();
        vars.add_set(fan, "fast", Membership::triangular(0., 2., 2.).unwrap())
            .unwrap();

        let mut rules = Rules::new();
        rules.add(load.is("busy"), [fan.is("fast")]);

        ControlSystem::new(vars, rules).unwrap()
    }

    #[test]
    fn test_system_view() {
        let system = system();
        let view = system.view("load").unwrap();

        assert_eq!(view.kind, Kind::Antecedent);
        assert_eq!(view.universe, vec![0., 1., 2., 3., 4.]);
        assert_eq!(view.terms[0].label, "idle");
        assert_eq!(view.terms[0].membership, vec![1., 0.75, 0.5, 0.25, 0.]);
        assert_eq!(view.terms[1].membership, vec![0., 0.25, 0.5, 0.75, 1.]);
        assert_eq!(view.input, None);

        assert!(matches!(system.view("noise"), Err(FuzzyError::UnknownVariable(_))));
    }

    #[test]
    fn test_simulation_view() {
        let system = system();
        let mut sim = Simulation::new(&system);

        sim.set_input("load", 2.).unwrap();
        assert_eq!(sim.view("load").unwrap().input, Some(2.));
        assert_eq!(sim.view("fan").unwrap().crisp, None);

        sim.compute().unwrap();

        let fan = sim.view("fan").unwrap();
        assert_eq!(fan.aggregated, Some(vec![0., 0.25, 0.5, 0.5, 0.5]));
        assert_eq!(fan.crisp, Some(sim.output("fan").unwrap()));
    }
}
