use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use std::sync::Arc;

use chrono::NaiveDate;

use shelfwise_alerts::monitor::StockMonitor;
use shelfwise_alerts::stores::StockPosition;
use shelfwise_core::{LocationId, OrganizationId, ProductId};
use shelfwise_deals::{Coordinate, DealRequest, TravelParams, score_deal};
use shelfwise_forecast::{Horizon, SalesObservation, forecast_demand};
use shelfwise_infra::stores::{
    InMemoryAlertStore, InMemoryAnalysisStore, InMemoryInventoryProvider,
};

/// Scan throughput over healthy inventories of increasing size.
fn bench_stock_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("stock_scan");

    for positions in [100usize, 1_000, 10_000] {
        let inventory = InMemoryInventoryProvider::arc();
        let organization = OrganizationId::new();
        let location = LocationId::new();
        inventory.add_organization(organization);
        inventory.add_location(organization, location);

        // Plenty of cover everywhere: the hot path is evaluation, not alert IO.
        for i in 0..positions {
            inventory.put_position(
                organization,
                location,
                StockPosition {
                    product_id: ProductId::new(),
                    product_name: format!("product-{i}"),
                    quantity_on_hand: 500.0,
                    forecast_7d: Some(84),
                },
            );
        }

        let monitor = Arc::new(StockMonitor::new(
            inventory,
            InMemoryAlertStore::arc(),
            InMemoryAnalysisStore::arc(),
        ));

        group.throughput(Throughput::Elements(positions as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(positions),
            &positions,
            |b, _| {
                b.iter(|| {
                    let report = monitor.run_scan(chrono::Utc::now()).unwrap();
                    black_box(report)
                });
            },
        );
    }

    group.finish();
}

fn bench_forecast(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let observations: Vec<_> = (0..30)
        .map(|i| SalesObservation::new(start + chrono::Days::new(i), (i % 9) as f64 + 2.0))
        .collect();

    c.bench_function("forecast_30_observations", |b| {
        b.iter(|| black_box(forecast_demand(black_box(&observations), Horizon::SevenDays)));
    });
}

fn bench_deal_score(c: &mut Criterion) {
    let request = DealRequest {
        origin: Coordinate::new(-23.3217, -46.7289),
        destination: Coordinate::new(-23.2947, -46.7289),
        current_price: 20.0,
        offer_price: 15.0,
        in_stock: true,
    };
    let params = TravelParams::default();

    c.bench_function("score_deal", |b| {
        b.iter(|| black_box(score_deal(black_box(&request), &params)));
    });
}

criterion_group!(benches, bench_stock_scan, bench_forecast, bench_deal_score);
criterion_main!(benches);
