//! Throttle advice from altitude, airspeed and pitch.
//!
//! Run with `RUST_LOG=mamdani=debug` to see rule firing and defuzzification.

use mamdani::{ControlSystem, FuzzyResult, Membership, Rules, Simulation, Universe, Variables};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn build() -> FuzzyResult<ControlSystem> {
    let mut vars = Variables::new();
    let altitude = vars.add_antecedent("altitude", Universe::new(0., 40000., 1000.)?)?;
    let speed = vars.add_antecedent("speed", Universe::new(0., 550., 1.)?)?;
    let pitch = vars.add_antecedent("pitch", Universe::new(-10., 15., 1.)?)?;
    let throttle = vars.add_consequent("throttle", Universe::new(0., 1.09, 0.01)?)?;

    vars.auto_partition(altitude, &["low", "medium", "high"])?;
    vars.add_set(speed, "slow", Membership::triangular(0., 0., 300.)?)?;
    vars.add_set(speed, "stable", Membership::triangular(250., 350., 450.)?)?;
    vars.add_set(speed, "fast", Membership::triangular(400., 550., 550.)?)?;
    vars.add_set(pitch, "nose_down", Membership::triangular(-10., -10., -2.)?)?;
    vars.add_set(pitch, "leveled", Membership::triangular(-3., 0., 3.)?)?;
    vars.add_set(pitch, "nose_up", Membership::triangular(2., 15., 15.)?)?;
    vars.add_set(throttle, "decrease", Membership::triangular(0., 0., 0.5)?)?;
    vars.add_set(throttle, "maintain", Membership::triangular(0.15, 0.5, 0.85)?)?;
    vars.add_set(throttle, "increase", Membership::triangular(0.5, 1., 1.)?)?;

    let mut rules = Rules::with_capacity(5);
    rules.add(speed.is("fast").or(pitch.is("nose_down")), [throttle.is("decrease")]);
    rules.add(speed.is("stable").and(pitch.is("leveled")), [throttle.is("maintain")]);
    rules.add(speed.is("slow").or(pitch.is("nose_up")), [throttle.is("increase")]);
    rules.add(speed.is("slow").and(pitch.is("nose_up")), [throttle.is("increase")]);
    rules.add(speed.is("slow").and(altitude.is("low")), [throttle.is("increase")]);

    ControlSystem::new(vars, rules)
}

fn main() -> FuzzyResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let system = build()?;
    let rows = [
        (10000., 300., 14., "Increase"),
        (35000., 480., -5., "Decrease"),
        (22000., 350., 1., "Maintain"),
        (3000., 120., 8., "Increase"),
    ];

    for (altitude, speed, pitch, expected) in rows {
        let mut sim = Simulation::new(&system);

        sim.set_inputs([("altitude", altitude), ("speed", speed), ("pitch", pitch)])?;

        match sim.compute() {
            Ok(()) => {
                let percent = sim.output("throttle")? * 100.;
                info!(altitude, speed, pitch, expected, "throttle {percent:.2}%");
            },
            Err(e) => warn!(altitude, speed, pitch, "no advice: {e}"),
        }
    }

    Ok(())
}
