use criterion::{black_box, criterion_group, criterion_main, Criterion};
use loan_calculator::amortization::engine::{AmortizationEngine, RepaymentMethod};
use loan_calculator::amortization::terms::LoanTerms;
use rust_decimal_macros::dec;

fn bench_term(c: &mut Criterion, months: u32) {
    let terms = LoanTerms::new(dec!(250000), dec!(0.0525), months, dec!(0.004));
    for method in RepaymentMethod::ALL {
        c.bench_function(&format!("{}_{}_months", method, months), |b| {
            b.iter(|| AmortizationEngine::compute(method, black_box(&terms)))
        });
    }
}

fn bench_12_months(c: &mut Criterion) {
    bench_term(c, 12);
}

fn bench_360_months(c: &mut Criterion) {
    bench_term(c, 360);
}

fn bench_600_months(c: &mut Criterion) {
    bench_term(c, 600);
}

criterion_group!(benches, bench_12_months, bench_360_months, bench_600_months);
criterion_main!(benches);
