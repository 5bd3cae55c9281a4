use chrono::{NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lodging_booking::{
    BookingRequest, BookingService, BookingValidator, CollectionPath, InMemoryBookingStore,
    LodgingCatalog, StaticIdentity,
};
use rand::{seq::SliceRandom, thread_rng};
use std::sync::Arc;

// Validation throughput for accepted and rejected requests
pub fn validation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("booking_validation");

    let validator = BookingValidator::new(Arc::new(LodgingCatalog::default()));
    let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();

    let cases = [
        ("accepted", BookingRequest::new("2", "2030-01-10", "2030-01-14", 3)),
        ("unknown_lodging", BookingRequest::new("999", "2030-01-10", "2030-01-14", 3)),
        ("past_check_in", BookingRequest::new("1", "2029-12-01", "2029-12-03", 1)),
        ("zero_nights", BookingRequest::new("4", "2030-01-10", "2030-01-10", 1)),
    ];

    for (name, request) in cases.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(name), request, |b, request| {
            b.iter(|| black_box(validator.validate(request, Some("user-1"), today)))
        });
    }

    group.finish();
}

// Random lookups over the built-in catalog
pub fn catalog_benchmark(c: &mut Criterion) {
    let catalog = LodgingCatalog::default();
    let ids: Vec<String> = (0..10).map(|i| i.to_string()).collect();

    c.bench_function("catalog_find_by_id", |b| {
        let mut rng = thread_rng();
        b.iter(|| {
            let id = ids.choose(&mut rng).unwrap();
            black_box(catalog.find_by_id(id))
        })
    });
}

// Full submission against the in-memory store
pub fn submission_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let service = BookingService::new(
        Arc::new(LodgingCatalog::default()),
        Arc::new(StaticIdentity::new("user-1")),
        Arc::new(InMemoryBookingStore::new(CollectionPath::bookings("bench"))),
    );
    let request = BookingRequest::new("1", "2030-01-10", "2030-01-12", 2);
    let now = NaiveDateTime::parse_from_str("2030-01-01 10:00:00", "%Y-%m-%d %H:%M:%S").unwrap();

    c.bench_function("submit_booking_in_memory", |b| {
        b.iter(|| black_box(runtime.block_on(service.submit_booking(&request, now))))
    });
}

criterion_group!(
    benches,
    validation_benchmark,
    catalog_benchmark,
    submission_benchmark
);
criterion_main!(benches);
