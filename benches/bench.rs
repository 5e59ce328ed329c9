use criterion::{Criterion, criterion_group, criterion_main};
use prop_kb::logic::clause::Clause;
use prop_kb::logic::cnf::parse_and_normalize;
use prop_kb::logic::dpll::Dpll;
use prop_kb::logic::generator::{GeneratorConfig, generate};
use std::collections::BTreeSet;
use std::hint::black_box;

fn bench_planted_instances(c: &mut Criterion) {
    let config = GeneratorConfig {
        variables: 12,
        clauses: 48,
        literals_per_clause: 4,
    };
    let mut rng = fastrand::Rng::with_seed(0xBEEF);
    let mut instances: Vec<BTreeSet<Clause>> = Vec::new();
    for _ in 0..10 {
        let (clauses, _) = generate(&config, &mut rng).unwrap();
        instances.push(clauses.into_iter().collect());
    }

    c.bench_function("dpll - planted instances", |b| {
        b.iter(|| {
            for clauses in &instances {
                let mut solver = Dpll::new(clauses.clone());
                black_box(solver.solve());
            }
        })
    });
}

fn bench_normalization(c: &mut Criterion) {
    c.bench_function("normalize - chained equivalences", |b| {
        b.iter(|| {
            let clauses = parse_and_normalize(black_box("a <=> (b <=> (c <=> d))")).unwrap();
            black_box(clauses);
        })
    });

    c.bench_function("normalize - nested implications", |b| {
        b.iter(|| {
            let clauses =
                parse_and_normalize(black_box("-(a => (b => (c => (d => e))))")).unwrap();
            black_box(clauses);
        })
    });
}

criterion_group!(benches, bench_planted_instances, bench_normalization);

criterion_main!(benches);
