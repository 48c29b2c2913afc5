use criterion::{Criterion, black_box, criterion_group, criterion_main};
use serde_json::{Value, json};

use edifakt::{OrdersConfig, assemble, generate, generate_batch, validate_order};

fn build_order(items: usize) -> Value {
    let items: Vec<Value> = (1..=items)
        .map(|n| {
            json!({
                "product_code": format!("PART-{n:05}"),
                "description": format!("Catalogue item {n}"),
                "quantity": "10.00",
                "price": "12.50",
            })
        })
        .collect();
    json!({
        "message_ref": "BENCH-001",
        "order_number": "PO-2024-BENCH",
        "order_date": "20240615",
        "delivery_date": "20240630",
        "currency": "EUR",
        "tax_rate": "19",
        "parties": [
            {"qualifier": "BY", "id": "BUYER-GMBH", "name": "Buyer GmbH", "address": "Berlin"},
            {"qualifier": "SU", "id": "SUPPLIER-AG", "name": "Supplier AG"},
        ],
        "items": items,
    })
}

fn bench_validate(c: &mut Criterion) {
    let config = OrdersConfig::default();
    let raw = build_order(10);
    c.bench_function("validate_order_10_items", |b| {
        b.iter(|| black_box(validate_order(black_box(&raw), black_box(&config))));
    });
}

fn bench_assemble(c: &mut Criterion) {
    let config = OrdersConfig::default();
    let order = validate_order(&build_order(10), &config).unwrap();
    c.bench_function("assemble_10_items", |b| {
        b.iter(|| black_box(assemble(black_box(&order), black_box(&config))));
    });
}

fn bench_generate_full(c: &mut Criterion) {
    let config = OrdersConfig::default();
    let raw = build_order(10);
    c.bench_function("generate_10_items", |b| {
        b.iter(|| black_box(generate(black_box(&raw), black_box(&config))));
    });
}

fn bench_generate_1000_items(c: &mut Criterion) {
    let config = OrdersConfig::default();
    let raw = build_order(1000);
    c.bench_function("generate_1000_items", |b| {
        b.iter(|| black_box(generate(black_box(&raw), black_box(&config))));
    });
}

fn bench_batch_100_orders(c: &mut Criterion) {
    let config = OrdersConfig::default();
    let orders: Vec<Value> = (0..100).map(|_| build_order(2)).collect();
    c.bench_function("batch_100_orders", |b| {
        b.iter(|| black_box(generate_batch(black_box(&orders), black_box(&config))));
    });
}

criterion_group!(
    benches,
    bench_validate,
    bench_assemble,
    bench_generate_full,
    bench_generate_1000_items,
    bench_batch_100_orders,
);
criterion_main!(benches);
