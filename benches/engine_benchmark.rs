use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use aircesfam_engine::config::EngineConfig;
use aircesfam_engine::models::{Pollutant, RawObservation};
use aircesfam_engine::processors::{classify, DemandModel, Pipeline};

// Build a raw feed of hourly readings across several stations
fn create_test_feed(station_count: usize, hours: usize) -> Vec<RawObservation> {
    let base = NaiveDate::from_ymd_opt(2025, 8, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let mut rows = Vec::with_capacity(station_count * hours);
    for station in 0..station_count {
        for hour in 0..hours {
            let timestamp = base + chrono::Duration::hours(hour as i64);
            // Sweep the PM2.5 range so every tier gets exercised
            let value = (station * 13 + hour * 7) % 300;

            rows.push(RawObservation {
                datetime_local: Some(timestamp.format("%Y-%m-%d %H:%M:%S").to_string()),
                parameter: Some("pm25".to_string()),
                value: Some(value.to_string()),
                location_id: None,
                location_name: Some(format!("Station {}", station)),
                latitude: Some(-33.0 - station as f64 * 0.1),
                longitude: Some(-70.0 - station as f64 * 0.1),
                unit: Some("µg/m³".to_string()),
            });
        }
    }

    rows
}

fn benchmark_classifier(c: &mut Criterion) {
    c.bench_function("classify_pm25_sweep", |b| {
        b.iter(|| {
            for value in 0..500 {
                black_box(classify(Pollutant::Pm25, black_box(value as f64)));
            }
        })
    });
}

fn benchmark_demand(c: &mut Criterion) {
    let model = DemandModel::default();
    c.bench_function("estimate_demand_sweep", |b| {
        b.iter(|| {
            for value in 0..500 {
                black_box(model.estimate(black_box(value as f64)));
            }
        })
    });
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_run");

    for station_count in [10, 50] {
        let rows = create_test_feed(station_count, 24 * 7);
        let pipeline = Pipeline::new(EngineConfig::default()).with_max_workers(2);

        group.bench_with_input(
            BenchmarkId::from_parameter(station_count),
            &rows,
            |b, rows| b.iter(|| pipeline.run(black_box(rows)).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_classifier,
    benchmark_demand,
    benchmark_pipeline
);
criterion_main!(benches);
