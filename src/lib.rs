//! Mamdani fuzzy inference.
//!
//! ```
//! use mamdani::{ControlSystem, Membership, Rules, Simulation, Universe, Variables};
//!
//! # fn main() -> mamdani::FuzzyResult<()> {
//! let mut vars = Variables::new();
//! let speed = vars.add_antecedent("speed", Universe::new(0., 550., 1.)?)?;
//! let throttle = vars.add_consequent("throttle", Universe::new(0., 1., 0.01)?)?;
//!
//! vars.add_set(speed, "slow", Membership::triangular(0., 0., 300.)?)?;
//! vars.add_set(throttle, "increase", Membership::triangular(0.5, 1., 1.)?)?;
//!
//! let mut rules = Rules::new();
//! rules.add(speed.is("slow"), [throttle.is("increase")]);
//!
//! let system = ControlSystem::new(vars, rules)?;
//! let mut sim = Simulation::new(&system);
//!
//! sim.set_input("speed", 100.)?;
//! sim.compute()?;
//! assert!(sim.output("throttle")? > 0.5);
//! # Ok(())
//! # }
//! ```

mod config;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod rules;
mod simulation;
mod universe;
mod variable;
mod view;

pub use config::InferenceConfig;
pub use dsl::Expr;
pub use error::{FuzzyError, FuzzyResult};
pub use inference::ControlSystem;
pub use inputs::Inputs;
pub use membership::{auto_partition, Membership};
pub use ops::{AndOp, DefuzzificationOp, OrOp};
pub use outputs::{Inferred, Outputs};
pub use rules::{Conclusion, Rule, Rules};
pub use simulation::Simulation;
pub use universe::Universe;
pub use variable::{Antecedent, Consequent, FuzzySet, Kind, LinguisticVariable, Role, Variable, VariableKey, Variables};
pub use view::{TermView, VariableView};
