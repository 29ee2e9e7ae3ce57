use criterion::{criterion_group, criterion_main, Criterion};
use extremum::{
    algo::{
        BoundingPhase, ExhaustiveSearch, FibonacciSearch, GoldenSection, Hypercube,
        IntervalHalving, NewtonRaphson, SimplexSearch,
    },
    testing::*,
    Controls, Domain, Goal, PlanarSearch, Search, Trace,
};
use rand::{rngs::StdRng, SeedableRng};

const EPSILON: f64 = 1e-6;

fn search<S, F>(mut algo: S, f: &F, dom: &Domain, controls: &Controls) -> bool
where
    S: Search,
    F: TestFunction,
{
    let mut trace = Trace::new();
    match algo.search(f, dom, controls, Goal::Minimize, &mut trace) {
        Ok(outcome) => outcome.success,
        Err(_) => false,
    }
}

fn reference(c: &mut Criterion) {
    let f = Reference::new();
    let dom = f.domains()[1];
    let delta = Controls::new().with_delta(1e-3);
    let epsilon = Controls::new().with_epsilon(EPSILON);

    c.bench_function("exhaustive search reference", |b| {
        b.iter(|| assert!(search(ExhaustiveSearch::new(), &f, &dom, &delta)))
    });

    c.bench_function("bounding phase reference", |b| {
        b.iter(|| {
            assert!(search(
                BoundingPhase::new(StdRng::seed_from_u64(0)),
                &f,
                &dom,
                &delta
            ))
        })
    });

    c.bench_function("interval halving reference", |b| {
        b.iter(|| assert!(search(IntervalHalving::new(), &f, &dom, &epsilon)))
    });

    c.bench_function("fibonacci search reference", |b| {
        b.iter(|| assert!(search(FibonacciSearch::new(), &f, &dom, &epsilon)))
    });

    c.bench_function("golden section reference", |b| {
        b.iter(|| assert!(search(GoldenSection::new(), &f, &dom, &epsilon)))
    });

    c.bench_function("newton raphson reference", |b| {
        b.iter(|| {
            assert!(search(
                NewtonRaphson::new(StdRng::seed_from_u64(0)),
                &f,
                &dom,
                &Controls::new().with_epsilon(1e-4)
            ))
        })
    });
}

fn himmelblau(c: &mut Criterion) {
    let f = Himmelblau::new();
    let dom = f.domain();
    let controls = Controls::new().with_epsilon(EPSILON).with_max_iters(1000);

    c.bench_function("hypercube himmelblau", |b| {
        b.iter(|| {
            let mut trace = Trace::new();
            let outcome = Hypercube::new()
                .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
                .unwrap();
            assert!(outcome.success);
        })
    });

    c.bench_function("simplex himmelblau", |b| {
        b.iter(|| {
            let mut trace = Trace::new();
            SimplexSearch::new(StdRng::seed_from_u64(0))
                .search(&f, &dom, &controls, Goal::Minimize, &mut trace)
                .unwrap();
        })
    });
}

criterion_group!(searches, reference, himmelblau);
criterion_main!(searches);
