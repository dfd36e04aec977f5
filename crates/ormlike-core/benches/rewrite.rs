//! Condition rewriting benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ormlike_core::catalog::{
    Catalog, EntityDef, FieldDef, FieldType, NoAnnotations, ScalarType, SchemaBundle,
};
use ormlike_core::like::{detect, ConditionRewriter, LikePlugin, RewritePolicy};
use ormlike_core::query::{QueryContext, QueryExecutor};
use ormlike_proto::{FilterExpr, GraphQuery, Value};

fn membership(width: usize) -> FilterExpr {
    let values = (0..width)
        .map(|i| {
            if i % 4 == 0 {
                Value::String(format!("%user_{i}%"))
            } else {
                Value::String(format!("user_{i}"))
            }
        })
        .collect();
    FilterExpr::in_values("name", values)
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("like/detect");

    group.bench_function("native", |b| {
        b.iter(|| black_box(detect(black_box("jes%sica"), None)));
    });

    group.bench_function("emoji_marker", |b| {
        b.iter(|| black_box(detect(black_box("🍌a🍌b🍌"), Some("🍌"))));
    });

    group.bench_function("no_pattern", |b| {
        b.iter(|| black_box(detect(black_box("jessica"), Some("🍌"))));
    });

    group.finish();
}

fn bench_rewrite_membership(c: &mut Criterion) {
    let mut group = c.benchmark_group("like/membership");
    let policy = RewritePolicy::default();
    let rewriter = ConditionRewriter::new(&policy, &NoAnnotations);

    for width in [4, 32, 256] {
        let expr = membership(width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &expr, |b, expr| {
            b.iter(|| black_box(rewriter.rewrite(expr.clone())));
        });
    }

    group.finish();
}

fn bench_rewrite_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("like/nested");
    let policy = RewritePolicy::default();
    let rewriter = ConditionRewriter::new(&policy, &NoAnnotations);

    let expr = FilterExpr::and(
        (0..16i32)
            .map(|i| {
                FilterExpr::or(vec![
                    membership(8),
                    FilterExpr::eq("other", format!("a{i}%")),
                    FilterExpr::eq("age", i),
                ])
            })
            .collect(),
    );

    group.bench_function("and_of_or_groups", |b| {
        b.iter(|| black_box(rewriter.rewrite(expr.clone())));
    });

    group.finish();
}

fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("like/execute");

    let user = EntityDef::new("User", "name")
        .with_field(FieldDef::new("name", FieldType::scalar(ScalarType::String)))
        .with_field(FieldDef::new("age", FieldType::scalar(ScalarType::Int32)));
    let mut executor = QueryExecutor::new(Catalog::with_schema(SchemaBundle::new(1).with_entity(user)));
    executor.use_plugin(&LikePlugin::default()).unwrap();

    for i in 0..1_000 {
        executor
            .insert(
                "User",
                [
                    ("name", Value::String(format!("user_{i}"))),
                    ("age", Value::Int32(i % 100)),
                ],
            )
            .unwrap();
    }

    let query = GraphQuery::new("User").and_where(FilterExpr::in_values(
        "name",
        vec!["user_1%".into(), "user_500".into()],
    ));
    let context = QueryContext::new();

    group.bench_function("membership_split", |b| {
        b.iter(|| black_box(executor.execute(&query, &context).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_detect,
    bench_rewrite_membership,
    bench_rewrite_nested,
    bench_execute,
);

criterion_main!(benches);
