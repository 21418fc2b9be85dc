use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evalexpr::*;
use formulix_rs::{evaluate, Evaluator, Parser};
use std::collections::HashMap;

/// Benchmark simple constant arithmetic
fn benchmark_simple_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simple Arithmetic Evaluation");

    let expr = "2 + 3 * 4";
    let empty = HashMap::new();
    let ast = Parser::parse_expression(expr).unwrap();
    let evaluator = Evaluator::new();
    let precompiled_evalexpr = build_operator_tree::<DefaultNumericTypes>(expr).unwrap();

    group.bench_function("evaluate_arithmetic", |b| {
        b.iter(|| evaluate(black_box(expr), &empty).unwrap())
    });

    group.bench_function("preparsed_arithmetic", |b| {
        b.iter(|| evaluator.evaluate(black_box(&ast), &empty).unwrap())
    });

    group.bench_function("native_rust_arithmetic", |b| {
        b.iter(|| black_box(2.0 + 3.0 * 4.0))
    });

    group.bench_function("meval_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });

    group.bench_function("evalexpr_arithmetic", |b| {
        b.iter(|| evalexpr::eval(black_box(expr)).unwrap())
    });

    group.bench_function("precompiled_evalexpr_arithmetic", |b| {
        b.iter(|| precompiled_evalexpr.eval().unwrap())
    });
}

/// Benchmark a formula over variable bindings
fn benchmark_formula_with_variables(c: &mut Criterion) {
    let mut group = c.benchmark_group("Formula With Variables Evaluation");

    let expr = "x * y + (x - y) / 2";
    let mut bindings = HashMap::new();
    bindings.insert("x".to_string(), 12.0);
    bindings.insert("y".to_string(), 4.5);

    let ast = Parser::parse_expression(expr).unwrap();
    let evaluator = Evaluator::new();

    let mut meval_context = meval::Context::new();
    meval_context.var("x", 12.0).var("y", 4.5);

    let mut evalexpr_context = HashMapContext::<DefaultNumericTypes>::new();
    evalexpr_context
        .set_value("x".to_string(), Value::from_float(12.0))
        .unwrap();
    evalexpr_context
        .set_value("y".to_string(), Value::from_float(4.5))
        .unwrap();
    let precompiled_evalexpr = build_operator_tree::<DefaultNumericTypes>(expr).unwrap();

    group.bench_function("evaluate_with_variables", |b| {
        b.iter(|| evaluate(black_box(expr), &bindings).unwrap())
    });

    group.bench_function("preparsed_with_variables", |b| {
        b.iter(|| evaluator.evaluate(black_box(&ast), &bindings).unwrap())
    });

    group.bench_function("native_rust_with_variables", |b| {
        b.iter(|| black_box(12.0 * 4.5 + (12.0 - 4.5) / 2.0))
    });

    group.bench_function("meval_with_variables", |b| {
        b.iter(|| meval::eval_str_with_context(black_box(expr), &meval_context).unwrap())
    });

    group.bench_function("evalexpr_with_variables", |b| {
        b.iter(|| eval_with_context(black_box(expr), &evalexpr_context).unwrap())
    });

    group.bench_function("precompiled_evalexpr_with_variables", |b| {
        b.iter(|| precompiled_evalexpr.eval_with_context(&evalexpr_context).unwrap())
    });
}

/// Benchmark whitelisted function calls
fn benchmark_whitelisted_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("Whitelisted Function Evaluation");

    let expr = "sqrt(x) + floor(y) * 2";
    let mut bindings = HashMap::new();
    bindings.insert("x".to_string(), 9.0);
    bindings.insert("y".to_string(), 3.7);

    let ast = Parser::parse_expression(expr).unwrap();
    let evaluator = Evaluator::new();

    let mut meval_context = meval::Context::new();
    meval_context.var("x", 9.0).var("y", 3.7);

    group.bench_function("evaluate_function_calls", |b| {
        b.iter(|| evaluate(black_box(expr), &bindings).unwrap())
    });

    group.bench_function("preparsed_function_calls", |b| {
        b.iter(|| evaluator.evaluate(black_box(&ast), &bindings).unwrap())
    });

    group.bench_function("native_rust_function_calls", |b| {
        b.iter(|| black_box(9.0_f64.sqrt() + 3.7_f64.floor() * 2.0))
    });

    group.bench_function("meval_function_calls", |b| {
        b.iter(|| meval::eval_str_with_context(black_box(expr), &meval_context).unwrap())
    });
}

/// Benchmark parsing alone
fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Formula Parsing");

    let expr = "sqrt(x) + (x * y) / 2";

    group.bench_function("parse_formula", |b| {
        b.iter(|| Parser::parse_expression(black_box(expr)).unwrap())
    });

    group.bench_function("meval_parse", |b| {
        b.iter(|| black_box(expr).parse::<meval::Expr>().unwrap())
    });

    group.bench_function("evalexpr_parse", |b| {
        b.iter(|| build_operator_tree::<DefaultNumericTypes>(black_box(expr)).unwrap())
    });
}

/// Grouping benchmarks
criterion_group!(
    benches,
    benchmark_simple_arithmetic,
    benchmark_formula_with_variables,
    benchmark_whitelisted_functions,
    benchmark_parsing,
);
criterion_main!(benches);
