//! Integration tests across numeric domains
//!
//! The same scheme runs over reals, intervals, affine and mixed forms. Every
//! real trajectory started inside the set-valued initial row must stay inside
//! the computed enclosures.

use pdenclose_rs::domain::{AffineForm, Interval, MixedForm, Numeric};
use pdenclose_rs::models::{BurgersFlux, CubicFlux, FluxKind, LwrFlux};
use pdenclose_rs::physics::FluxFunction;
use pdenclose_rs::simulation::{to_affine_conditions, to_interval_conditions, to_mixed_conditions};
use pdenclose_rs::solver::{
    solver_for, LaxFriedrichsSolver, LeapfrogSolver, Scenario, SimulationResult, Solver,
    SolverConfiguration, SolverType,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

mod common;
use common::{assert_encloses, assert_rows_close, ZeroFlux};

const CENTERS: [f64; 6] = [0.2, 0.5, 0.9, 0.7, 0.4, 0.1];
const EPSILON: f64 = 0.05;

fn config(solver: SolverType, steps: usize) -> SolverConfiguration {
    match solver {
        SolverType::Leapfrog => SolverConfiguration::leapfrog(CENTERS.len(), steps, 0.1, 1.0),
        _ => SolverConfiguration::lax_friedrichs(CENTERS.len(), steps, 0.1, 1.0),
    }
}

fn run<T: Numeric>(flux: Box<dyn FluxFunction<T>>, initial: Vec<T>, solver: SolverType, steps: usize) -> SimulationResult<T> {
    solver_for::<T>(solver)
        .solve(&Scenario::from_vec(flux, initial), &config(solver, steps))
        .unwrap()
}

/// Sample real initial rows inside the boxes and check every cell of every
/// resulting trajectory against the enclosures.
fn assert_sound<T: Numeric>(enclosure: &SimulationResult<T>, kind: FluxKind, solver: SolverType, steps: usize, label: &str) {
    let mut rng = StdRng::seed_from_u64(7);

    for sample in 0..25 {
        let initial: Vec<f64> = CENTERS
            .iter()
            .map(|c| c + rng.gen_range(-EPSILON..=EPSILON))
            .collect();
        let real = run(kind.dispatch::<f64>(), initial, solver, steps);

        for t in 0..steps {
            let sets = enclosure.mesh.row(t).unwrap();
            let points = real.mesh.row(t).unwrap();
            for (x, (set, point)) in sets.iter().zip(points.iter()).enumerate() {
                assert_encloses(set, *point, &format!("{} sample {} t={} x={}", label, sample, t, x));
            }
        }
    }
}

#[test]
fn test_enclosures_are_sound() {
    let steps = 8;
    for kind in [FluxKind::Burgers, FluxKind::Lwr, FluxKind::Cubic] {
        for solver in [SolverType::LaxFriedrichs, SolverType::Leapfrog] {
            let intervals = run(kind.dispatch(), to_interval_conditions(&CENTERS, EPSILON), solver, steps);
            assert_sound(&intervals, kind, solver, steps, "interval");

            let affine = run(kind.dispatch(), to_affine_conditions(&CENTERS, EPSILON), solver, steps);
            assert_sound(&affine, kind, solver, steps, "affine");

            let mixed = run(kind.dispatch(), to_mixed_conditions(&CENTERS, EPSILON), solver, steps);
            assert_sound(&mixed, kind, solver, steps, "mixed");
        }
    }
}

#[test]
fn test_mixed_is_never_wider_than_its_parts() {
    let steps = 10;
    let intervals = run(Box::new(BurgersFlux), to_interval_conditions(&CENTERS, EPSILON), SolverType::LaxFriedrichs, steps);
    let affine = run(Box::new(BurgersFlux), to_affine_conditions(&CENTERS, EPSILON), SolverType::LaxFriedrichs, steps);
    let mixed = run(Box::new(BurgersFlux), to_mixed_conditions(&CENTERS, EPSILON), SolverType::LaxFriedrichs, steps);

    let last = steps - 1;
    for x in 0..CENTERS.len() {
        let m = mixed.mesh.get(last, x).unwrap().to_interval();
        let i = *intervals.mesh.get(last, x).unwrap();
        let a = affine.mesh.get(last, x).unwrap().to_interval();
        assert!(m.width() <= i.width() + 1e-12, "cell {}: mixed {} vs interval {}", x, m, i);
        assert!(m.width() <= a.width() + 1e-12, "cell {}: mixed {} vs affine {}", x, m, a);
    }
}

#[test]
fn test_degenerate_sets_track_the_real_run() {
    let steps = 6;
    let real = run(Box::new(LwrFlux), CENTERS.to_vec(), SolverType::Leapfrog, steps);
    let points: Vec<Interval> = CENTERS.iter().map(|v| Interval::point(*v)).collect();
    let intervals = run(Box::new(LwrFlux), points, SolverType::Leapfrog, steps);
    let constants: Vec<AffineForm> = CENTERS.iter().map(|v| AffineForm::constant(*v)).collect();
    let affine = run(Box::new(LwrFlux), constants, SolverType::Leapfrog, steps);

    for t in 0..steps {
        let expected: Vec<f64> = real.mesh.row(t).unwrap().to_vec();
        let lower: Vec<f64> = intervals.mesh.row(t).unwrap().iter().map(|v| v.lo()).collect();
        let centers: Vec<f64> = affine.mesh.row(t).unwrap().iter().map(|v| v.center()).collect();
        assert_rows_close(ndarray::ArrayView1::from(lower.as_slice()), &expected, 1e-12, "interval lower bound");
        assert_rows_close(ndarray::ArrayView1::from(centers.as_slice()), &expected, 1e-12, "affine center");
    }
}

#[test]
fn test_cubic_fixture_in_every_domain() {
    let unit: Vec<Interval> = (0..4).map(|i| Interval::new(i as f64, i as f64 + 1.0)).collect();
    let config = SolverConfiguration::lax_friedrichs(4, 3, 0.02, 1.0);

    let real = LaxFriedrichsSolver::new()
        .solve(&Scenario::from_vec(Box::new(CubicFlux), vec![1.0, 2.0, 3.0, 4.0]), &config)
        .unwrap();
    assert_rows_close(real.mesh.row(1).unwrap(), &[3.56, 1.74, 2.44, 2.26], 1e-9, "real row 1");

    let interval = LaxFriedrichsSolver::new()
        .solve(&Scenario::from_vec(Box::new(CubicFlux), unit.clone()), &config)
        .unwrap();
    let affine = LaxFriedrichsSolver::new()
        .solve(
            &Scenario::from_vec(Box::new(CubicFlux), unit.iter().map(AffineForm::from_interval).collect()),
            &config,
        )
        .unwrap();
    let mixed = LaxFriedrichsSolver::new()
        .solve(
            &Scenario::from_vec(Box::new(CubicFlux), unit.iter().map(MixedForm::from_interval).collect()),
            &config,
        )
        .unwrap();

    for x in 0..4 {
        let i = *interval.mesh.get(2, x).unwrap();
        let a = affine.mesh.get(2, x).unwrap().to_interval();
        let m = mixed.mesh.get(2, x).unwrap().to_interval();
        // the reduced product is at least as tight as the affine component
        assert!(m.lo() >= a.lo() - 1e-12 && m.hi() <= a.hi() + 1e-12);
        assert!(i.width() > 0.0 && a.width() > 0.0);
    }
}

#[test]
fn test_leapfrog_with_zero_flux_alternates() {
    let initial = vec![1.0, 5.0, 2.0, 8.0];
    let result = LeapfrogSolver::new()
        .solve(
            &Scenario::from_vec(Box::new(ZeroFlux), initial.clone()),
            &SolverConfiguration::leapfrog(4, 6, 0.1, 1.0),
        )
        .unwrap();

    // primer averages neighbours, then u[t+1] = u[t-1]
    let primer = [6.5, 1.5, 6.5, 1.5];
    for t in [0, 2, 4] {
        assert_rows_close(result.mesh.row(t).unwrap(), &initial, 1e-12, "even rows");
    }
    for t in [1, 3, 5] {
        assert_rows_close(result.mesh.row(t).unwrap(), &primer, 1e-12, "odd rows");
    }
}

#[test]
fn test_solver_for_matches_direct_use() {
    let scenario = Scenario::from_vec(Box::new(BurgersFlux), CENTERS.to_vec());
    let config = SolverConfiguration::leapfrog(CENTERS.len(), 5, 0.1, 1.0);

    let boxed = solver_for::<f64>(SolverType::Leapfrog).solve(&scenario, &config).unwrap();
    let direct = LeapfrogSolver::new().solve(&scenario, &config).unwrap();
    assert_eq!(boxed.mesh, direct.mesh);
}
