use std::sync::Arc;

use chrono::Duration;
use serde::Serialize;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use spool_core::{DrainConfig, DrainItem, Sink, Spool, TaskId, VecSink};

#[derive(Debug, Clone, Serialize)]
struct Sms {
    task_id: i64,
    user_id: u32,
    message: String,
}

impl Sms {
    fn batch(task_id: i64, from: u32, to: u32) -> Vec<Sms> {
        (from..to)
            .map(|user_id| Sms {
                task_id,
                user_id,
                message: format!("helloworld{user_id}"),
            })
            .collect()
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let spool = Spool::with_logging();

    // (A) fetch-only: enqueue a batch and drain it with a signal that never
    // fires. Every message reaches the consumer.
    let fetch_id = TaskId::new(1);
    let effected = spool.enqueue(fetch_id, Sms::batch(1, 1, 6));
    println!("enqueued: {effected:?}");

    let mut stream = spool
        .drain(CancellationToken::new(), fetch_id, DrainConfig::new())
        .expect("no drain active for task 1");
    while let Some(DrainItem::Value(sms)) = stream.recv().await {
        println!("fetched: {}", serde_json::to_string(&sms).unwrap());
    }
    println!("task 1 exists after drain: {}", spool.exists(fetch_id));

    // (B) fetch-or-store: same shape, but cancellation fires mid-drain and
    // the remainder is diverted into a recording sink.
    let divert_id = TaskId::new(2);
    spool.enqueue(divert_id, Sms::batch(2, 1, 6));
    spool.enqueue(divert_id, Sms::batch(2, 6, 11));
    println!("task 2 pending: {}", spool.len(divert_id));

    let sink = Arc::new(VecSink::new());
    let config = DrainConfig::new()
        .with_interval(Duration::milliseconds(300))
        .with_sink(Arc::clone(&sink) as Arc<dyn Sink<Sms>>)
        .notify_on_completion(true);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        sleep(std::time::Duration::from_millis(700)).await;
        trigger.cancel();
    });

    let mut stream = spool
        .drain(cancel, divert_id, config)
        .expect("no drain active for task 2");
    let mut delivered = 0;
    while let Some(item) = stream.recv().await {
        match item {
            DrainItem::Value(sms) => {
                delivered += 1;
                println!("fetched before cancel: {}", sms.message);
            }
            DrainItem::Completed => println!("drain reported completion"),
        }
    }

    println!(
        "delivered {delivered} message(s); diverted {} to the sink",
        sink.len()
    );
    for sms in sink.values() {
        println!("stored: {}", serde_json::to_string(&sms).unwrap());
    }
    println!("task 2 exists after drain: {}", spool.exists(divert_id));
}
