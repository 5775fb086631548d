//! Property-based tests for membership functions and inference
//!
//! These tests use proptest to check properties that should hold for any
//! breakpoints, inputs and rule ordering.

use mamdani::{
    AndOp, Antecedent, ControlSystem, Expr, InferenceConfig, Inputs, Membership, OrOp, Rule, Rules, Simulation, Universe,
    Variable, Variables,
};
use proptest::prelude::*;

// ===== Strategies for generating test data =====

/// Triangle breakpoints with a <= b <= c
fn arb_triangle() -> impl Strategy<Value = (f64, f64, f64)> {
    prop::collection::vec(-1000.0..1000.0f64, 3).prop_map(|mut points| {
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        (points[0], points[1], points[2])
    })
}

/// Triangle breakpoints with a < b < c
fn arb_strict_triangle() -> impl Strategy<Value = (f64, f64, f64)> {
    (-1000.0..1000.0f64, 0.001..500.0f64, 0.001..500.0f64).prop_map(|(a, left, right)| (a, a + left, a + left + right))
}

fn degree() -> impl Strategy<Value = f64> {
    0.0..=1.0f64
}

/// A small two-input system where every rule has a distinct shape
fn system(rule_order: &[usize], config: InferenceConfig) -> (ControlSystem, [Variable<Antecedent>; 2]) {
    let mut vars = Variables::new();
    let x = vars.add_antecedent("x", Universe::new(0., 10., 0.5).unwrap()).unwrap();
    let y = vars.add_antecedent("y", Universe::new(-5., 5., 0.25).unwrap()).unwrap();
    let out = vars.add_consequent("out", Universe::new(0., 100., 1.).unwrap()).unwrap();

    vars.auto_partition(x, &["low", "mid", "high"]).unwrap();
    vars.auto_partition(y, &["neg", "zero", "pos"]).unwrap();
    vars.add_set(out, "small", Membership::triangular(0., 0., 40.).unwrap()).unwrap();
    vars.add_set(out, "medium", Membership::triangular(20., 50., 80.).unwrap()).unwrap();
    vars.add_set(out, "large", Membership::triangular(60., 100., 100.).unwrap()).unwrap();

    let all = [
        Rule::new(x.is("low").or(y.is("neg")), [out.is("small")]),
        Rule::new(x.is("mid").and(y.is("zero")), [out.is("medium")]),
        Rule::new(x.is("high").or(y.is("pos")), [out.is("large")]),
        Rule::new(x.is("mid").and(y.is("pos").negate()), [out.is("medium").weighted(0.8)]),
        Rule::new(x.is("high").and(y.is("neg")), [out.is("small"), out.is("large").weighted(0.3)]),
    ];
    let rules: Rules = rule_order.iter().map(|i| all[*i].clone()).collect();

    (ControlSystem::with_config(vars, rules, config).unwrap(), [x, y])
}

// ===== Property Tests =====

proptest! {
    #[test]
    fn prop_triangle_breakpoints((a, b, c) in arb_strict_triangle()) {
        let mf = Membership::triangular(a, b, c).unwrap();

        prop_assert_eq!(mf.evaluate(a), 0.);
        prop_assert_eq!(mf.evaluate(b), 1.);
        prop_assert_eq!(mf.evaluate(c), 0.);
    }

    #[test]
    fn prop_triangle_range_and_support((a, b, c) in arb_triangle(), x in -2000.0..2000.0f64) {
        let mf = Membership::triangular(a, b, c).unwrap();
        let value = mf.evaluate(x);

        prop_assert!(value.is_finite());
        prop_assert!((0. ..=1.).contains(&value));
        if x < a || x > c {
            prop_assert_eq!(value, 0.);
        }
    }

    #[test]
    fn prop_triangle_monotonic_sides((a, b, c) in arb_triangle(), u in 0.0..=1.0f64, v in 0.0..=1.0f64) {
        let mf = Membership::triangular(a, b, c).unwrap();
        let (lo, hi) = if u <= v { (u, v) } else { (v, u) };

        // Rising side
        let (x1, x2) = ((a + (b - a) * lo).clamp(a, b), (a + (b - a) * hi).clamp(a, b));
        prop_assert!(mf.evaluate(x1) <= mf.evaluate(x2) + 1e-12);

        // Falling side
        let (x1, x2) = ((b + (c - b) * lo).clamp(b, c), (b + (c - b) * hi).clamp(b, c));
        prop_assert!(mf.evaluate(x1) + 1e-12 >= mf.evaluate(x2));
    }

    #[test]
    fn prop_and_or_are_min_max(u in degree(), v in degree()) {
        prop_assert_eq!(AndOp::Min.call(u, v), u.min(v));
        prop_assert_eq!(OrOp::Max.call(u, v), u.max(v));
        prop_assert_eq!(AndOp::Min.call(u, 0.), 0.);
        prop_assert_eq!(OrOp::Max.call(u, 1.), 1.);
    }

    #[test]
    fn prop_premise_connectives(x in 0.0..=10.0f64, y in -5.0..=5.0f64) {
        let (system, [xv, yv]) = system(&[0, 1, 2, 3, 4], InferenceConfig::default());
        let vars = system.variables();
        let config = system.config();
        let mut inputs = Inputs::new();
        inputs.add(xv, x);
        inputs.add(yv, y);

        let lhs = xv.is("mid");
        let rhs = yv.is("pos");
        let a = lhs.evaluate(vars, &inputs, config).unwrap();
        let b = rhs.evaluate(vars, &inputs, config).unwrap();
        let and: Expr = lhs.clone().and(rhs.clone());
        let or: Expr = lhs.or(rhs);

        prop_assert_eq!(and.evaluate(vars, &inputs, config).unwrap(), a.min(b));
        prop_assert_eq!(or.evaluate(vars, &inputs, config).unwrap(), a.max(b));
    }

    #[test]
    fn prop_rule_order_is_irrelevant(
        order in Just(vec![0usize, 1, 2, 3, 4]).prop_shuffle(),
        x in 0.0..=10.0f64,
        y in -5.0..=5.0f64,
    ) {
        let (base, _) = system(&[0, 1, 2, 3, 4], InferenceConfig::default());
        let (shuffled, _) = system(&order, InferenceConfig::default());

        let mut first = Simulation::new(&base);
        first.set_inputs([("x", x), ("y", y)]).unwrap();
        let mut second = Simulation::new(&shuffled);
        second.set_inputs([("x", x), ("y", y)]).unwrap();

        // Rules 0 to 2 cover the whole input space, so something always fires
        first.compute().unwrap();
        second.compute().unwrap();

        let view_a = first.view("out").unwrap();
        let view_b = second.view("out").unwrap();
        prop_assert_eq!(view_a.aggregated, view_b.aggregated);
        prop_assert_eq!(first.output("out").unwrap().to_bits(), second.output("out").unwrap().to_bits());
    }

    #[test]
    fn prop_compute_is_idempotent(x in -20.0..=20.0f64, y in -20.0..=20.0f64, prod in any::<bool>()) {
        let config = if prod {
            InferenceConfig { and_op: AndOp::Prod, or_op: OrOp::ProbOr, ..Default::default() }
        } else {
            InferenceConfig::default()
        };
        let (system, _) = system(&[0, 1, 2, 3, 4], config);
        let mut sim = Simulation::new(&system);
        sim.set_inputs([("x", x), ("y", y)]).unwrap();

        sim.compute().unwrap();
        let first = sim.output("out").unwrap();
        sim.compute().unwrap();
        let second = sim.output("out").unwrap();

        prop_assert_eq!(first.to_bits(), second.to_bits());
        prop_assert!((0. ..=100.).contains(&first));
    }

    #[test]
    fn prop_clipped_below_strength(x in 0.0..=10.0f64, y in -5.0..=5.0f64) {
        let (system, _) = system(&[0, 1, 2, 3, 4], InferenceConfig::default());
        let mut sim = Simulation::new(&system);
        sim.set_inputs([("x", x), ("y", y)]).unwrap();
        sim.compute().unwrap();

        let strongest = sim.firing_strengths().unwrap().iter().copied().fold(0., f64::max);
        let aggregated = sim.view("out").unwrap().aggregated.unwrap();

        prop_assert!(aggregated.iter().all(|m| *m <= strongest));
    }

    #[test]
    fn prop_auto_partition_sums_to_one(n in 2usize..8, max in 1.0..1000.0f64) {
        let universe = Universe::new(0., max, max / 50.).unwrap();
        let labels: Vec<String> = (0..n).map(|i| format!("set{i}")).collect();
        let sets = mamdani::auto_partition(&universe, &labels).unwrap();

        for x in universe.points() {
            let total: f64 = sets.iter().map(|(_, mf)| mf.evaluate(*x)).sum();
            prop_assert!((total - 1.).abs() < 1e-9, "sum at {} was {}", x, total);
        }
    }
}
