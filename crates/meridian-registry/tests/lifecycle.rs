//! Boot metadata and the shutdown signal seen from async tasks.

use std::sync::Arc;
use std::time::Duration;

use meridian_registry::{FixedIdentity, PositionService, ServiceConfig};
use meridian_space::ScriptedEntropy;

fn service() -> Arc<PositionService> {
    let config = ServiceConfig::default().with_dimensions(3, 4);
    let entropy = Arc::new(ScriptedEntropy::new([vec![1, 3, 0]]));
    Arc::new(PositionService::new(config, entropy, Arc::new(FixedIdentity::new("node-a"))).unwrap())
}

#[tokio::test]
async fn shutdown_wakes_waiting_task() {
    let service = service();
    let mut signal = service.shutdown_signal();

    let waiter = tokio::spawn(async move {
        signal.wait_for(|closed| *closed).await.is_ok()
    });

    tokio::task::yield_now().await;
    assert!(service.shutdown());

    let woke = tokio::time::timeout(Duration::from_secs(5), waiter)
        .await
        .expect("waiter timed out")
        .unwrap();
    assert!(woke);
}

#[tokio::test]
async fn late_subscriber_sees_shutdown() {
    let service = service();
    service.shutdown();
    service.shutdown();

    let signal = service.shutdown_signal();
    assert!(*signal.borrow());
}

#[tokio::test]
async fn full_scenario() {
    let service = service();

    assert!(service.boot().unwrap());
    assert_eq!(service.metadata()["id"], "node-a");

    assert_eq!(service.create("peerA").unwrap(), "1,3,0");
    assert_eq!(service.search("peerA").unwrap(), "1,3,0");
    assert_eq!(service.delete("peerA").unwrap(), "1,3,0");
    assert!(service.search("peerA").is_err());
    assert!(service.delete("peerA").is_err());

    // Exhausted script: generation fails and nothing is stored.
    assert!(service.create("peerB").is_err());
    assert!(service.record("peerB").is_none());

    assert!(service.shutdown());
    assert!(!service.shutdown());
}
