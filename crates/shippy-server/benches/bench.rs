use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use shippy_core::proto::{
    Consignment, Container, shipping_service_server::ShippingService,
};
use shippy_server::server::{
    repository::{MemoryRepository, Repository},
    service::handler::ConsignmentService,
};
use std::{sync::Arc, thread};
use tokio::runtime::Builder;
use tonic::Request;

const CREATES_PER_THREAD: usize = 1_000;

fn sample() -> Consignment {
    Consignment {
        description: "bench".to_string(),
        weight: 100,
        containers: vec![Container {
            id: "c1".to_string(),
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn bench_repository_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("repository/create");

    for threads in [1, 2, 4, 8] {
        group.throughput(Throughput::Elements((threads * CREATES_PER_THREAD) as u64));
        group.bench_function(format!("threads/{threads}"), |b| {
            b.iter(|| {
                let repo = MemoryRepository::new();
                thread::scope(|s| {
                    for _ in 0..threads {
                        s.spawn(|| {
                            for _ in 0..CREATES_PER_THREAD {
                                black_box(repo.create(sample()).unwrap());
                            }
                        });
                    }
                });
                assert_eq!(repo.len(), threads * CREATES_PER_THREAD);
            });
        });
    }

    group.finish();
}

fn bench_handler(c: &mut Criterion) {
    let rt = Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .unwrap();

    let mut group = c.benchmark_group("handler/create_consignment");
    group.throughput(Throughput::Elements(1));
    group.bench_function("single", |b| {
        let service = ConsignmentService::new(Arc::new(MemoryRepository::new()));
        b.to_async(&rt).iter(|| {
            let service = service.clone();
            async move {
                black_box(
                    service
                        .create_consignment(Request::new(sample()))
                        .await
                        .unwrap(),
                )
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_repository_create, bench_handler);
criterion_main!(benches);
