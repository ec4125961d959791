//! Performance benchmarks for relaycast
//!
//! Run with: cargo bench

use criterion::{criterion_group, criterion_main, Criterion};
use relaycast::{
    Dispatcher, InboundFrame, MemorySessionRegistry, MessageBody, RelayConfig, Router,
    SessionTaskRegistry, TaskScheduler,
};
use std::sync::Arc;

fn bench_reply_serialization(c: &mut Criterion) {
    let reply = relaycast::Reply::new("BENCHMARK MESSAGE");

    c.bench_function("Reply serialize", |b| {
        b.iter(|| serde_json::to_value(&reply).unwrap());
    });

    c.bench_function("InboundFrame deserialize", |b| {
        let json = r#"{"destination":"/hello","sessionId":"s1","body":{"message":"hi"}}"#;
        b.iter(|| serde_json::from_str::<InboundFrame>(json).unwrap());
    });
}

fn bench_route_hello(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let dispatcher = Dispatcher::new();
    let router = Router::new(
        dispatcher.clone(),
        Arc::new(MemorySessionRegistry::new()),
        SessionTaskRegistry::new(),
        TaskScheduler::new(),
        RelayConfig::default(),
    );
    // One live subscriber so the broadcast path does real work
    let mut rx = rt.block_on(dispatcher.subscribe("/topic/hello"));

    c.bench_function("Router route /hello", |b| {
        b.iter(|| {
            rt.block_on(async {
                router
                    .handle(InboundFrame::new("/hello", MessageBody::new("benchmark")))
                    .await
                    .unwrap();
                while rx.try_recv().is_ok() {}
            });
        });
    });
}

fn bench_unicast(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dispatcher = Dispatcher::new();
    let mut rx = rt.block_on(dispatcher.attach("s1"));

    c.bench_function("Dispatcher unicast", |b| {
        b.iter(|| {
            rt.block_on(async {
                dispatcher
                    .unicast("s1", "/queue/trade", serde_json::json!(42))
                    .await;
                while rx.try_recv().is_ok() {}
            });
        });
    });
}

criterion_group!(
    benches,
    bench_reply_serialization,
    bench_route_hello,
    bench_unicast
);
criterion_main!(benches);
