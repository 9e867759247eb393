//! Service-level submission flow tests
//!
//! Embedded SurrealDB in a tempdir (one per test), injected failure
//! policies, audit sink on a temp file.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tempfile::TempDir;

use order_server::audit::{AuditLogger, AuditSink, AuditWorker};
use order_server::db;
use order_server::db::repository::{OrderRepository, RepoError};
use order_server::orders::{FailurePolicy, OrderService, SubmitOutcome};

#[derive(Debug)]
struct NeverFail;

impl FailurePolicy for NeverFail {
    fn should_fail(&self) -> bool {
        false
    }
}

#[derive(Debug)]
struct AlwaysFail;

impl FailurePolicy for AlwaysFail {
    fn should_fail(&self) -> bool {
        true
    }
}

struct TestHarness {
    service: OrderService,
    repo: OrderRepository,
    sink: AuditSink,
    // keeps the database directory alive for the test's duration
    _tmp: TempDir,
}

async fn setup(policy: Arc<dyn FailurePolicy>) -> TestHarness {
    let tmp = tempfile::tempdir().unwrap();
    let database = db::connect(&tmp.path().join("database")).await.unwrap();

    let sink = AuditSink::new(tmp.path().join("orders.log"));
    let (audit, rx) = AuditLogger::new(64);
    tokio::spawn(AuditWorker::new(sink.clone()).run(rx));

    let repo = OrderRepository::new(database.clone());
    let service = OrderService::new(repo.clone(), policy, audit);

    TestHarness {
        service,
        repo,
        sink,
        _tmp: tmp,
    }
}

fn items(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Poll the audit file until `needle` appears or the deadline passes.
async fn wait_for_audit_line(sink: &AuditSink, needle: &str) -> bool {
    for _ in 0..100 {
        if let Ok(content) = tokio::fs::read_to_string(sink.path()).await
            && content.contains(needle)
        {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    false
}

#[tokio::test]
async fn submit_is_idempotent() {
    let h = setup(Arc::new(NeverFail)).await;
    let order_items = items(&["item1", "item2"]);

    let first = h.service.submit(&order_items, dec("100.50")).await.unwrap();
    let SubmitOutcome::Processed {
        order_id: first_id,
        created: true,
    } = first
    else {
        panic!("expected newly created order, got {first:?}");
    };

    let second = h.service.submit(&order_items, dec("100.50")).await.unwrap();
    assert_eq!(
        second,
        SubmitOutcome::Processed {
            order_id: first_id.clone(),
            created: false,
        }
    );

    // exactly one record in the store
    assert_eq!(h.repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn equivalent_submissions_share_an_order() {
    let h = setup(Arc::new(NeverFail)).await;

    // item order and amount rendering are not significant to identity
    let first = h
        .service
        .submit(&items(&["item1", "item2"]), dec("100.50"))
        .await
        .unwrap();
    let second = h
        .service
        .submit(&items(&["item2", "item1"]), dec("100.5"))
        .await
        .unwrap();

    let SubmitOutcome::Processed { order_id: a, created: true } = first else {
        panic!("expected creation");
    };
    let SubmitOutcome::Processed { order_id: b, created: false } = second else {
        panic!("expected duplicate");
    };
    assert_eq!(a, b);
    assert_eq!(h.repo.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_submissions_collapse_to_one_order() {
    const CONCURRENCY: usize = 16;

    let h = setup(Arc::new(NeverFail)).await;
    let order_items = items(&["item1", "item2"]);

    let tasks: Vec<_> = (0..CONCURRENCY)
        .map(|_| {
            let service = h.service.clone();
            let order_items = order_items.clone();
            tokio::spawn(async move { service.submit(&order_items, dec("100.50")).await })
        })
        .collect();

    let mut ids = Vec::new();
    let mut created_count = 0;
    for task in futures::future::join_all(tasks).await {
        match task.unwrap().unwrap() {
            SubmitOutcome::Processed { order_id, created } => {
                ids.push(order_id);
                if created {
                    created_count += 1;
                }
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    // exactly one winner; every loser resolved to the winner's id
    assert_eq!(created_count, 1);
    assert!(ids.windows(2).all(|w| w[0] == w[1]));

    let stored = h.repo.find_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].order_id, ids[0]);
}

#[tokio::test]
async fn forced_failure_leaves_no_trace() {
    let h = setup(Arc::new(AlwaysFail)).await;

    let outcome = h
        .service
        .submit(&items(&["item1"]), dec("10.00"))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::TransientFailure {
            retry_after_secs: 5
        }
    );

    assert!(h.repo.find_all().await.unwrap().is_empty());
    assert!(wait_for_audit_line(&h.sink, "Order attempt: ID=null, Result=failure").await);
}

#[tokio::test]
async fn duplicate_create_recovers_to_winner() {
    let h = setup(Arc::new(NeverFail)).await;
    let order_items = items(&["item1"]);
    let fp = order_server::orders::fingerprint(&order_items, dec("10.00"));

    let winner = h.repo.create(&order_items, dec("10.00"), &fp).await.unwrap();

    // a second insert with the same fingerprint must hit the unique index
    let err = h.repo.create(&order_items, dec("10.00"), &fp).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)), "got {err:?}");

    // conflict recovery fetch resolves to the winning record
    let refetched = h.repo.get_by_fingerprint(&fp).await.unwrap();
    assert_eq!(refetched.order_id, winner.order_id);

    // a vanished row is the logic-impossible case: NotFound
    let missing = h.repo.get_by_fingerprint("no-such-fingerprint").await;
    assert!(matches!(missing, Err(RepoError::NotFound(_))));
}

#[tokio::test]
async fn audit_trail_is_eventually_observed() {
    let h = setup(Arc::new(NeverFail)).await;

    let outcome = h
        .service
        .submit(&items(&["item1", "item2"]), dec("100.50"))
        .await
        .unwrap();
    let SubmitOutcome::Processed { order_id, .. } = outcome else {
        panic!("expected processed outcome");
    };

    let success_line = format!("Order attempt: ID={order_id}, Result=success");
    assert!(wait_for_audit_line(&h.sink, &success_line).await);

    h.service
        .submit(&items(&["item1", "item2"]), dec("100.50"))
        .await
        .unwrap();
    let duplicate_line = format!("Order attempt: ID={order_id}, Result=duplicate");
    assert!(wait_for_audit_line(&h.sink, &duplicate_line).await);
}

#[tokio::test]
async fn submit_does_not_wait_for_audit() {
    let tmp = tempfile::tempdir().unwrap();
    let database = db::connect(&tmp.path().join("database")).await.unwrap();

    // capacity-1 queue with NO worker attached: every record after the
    // first is dropped, and submit must still return promptly
    let (audit, _rx) = AuditLogger::new(1);
    let repo = OrderRepository::new(database);
    let service = OrderService::new(repo, Arc::new(NeverFail), audit);

    for i in 0..4 {
        let outcome = service
            .submit(&items(&[&format!("item{i}")]), dec("1.00"))
            .await
            .unwrap();
        assert!(matches!(outcome, SubmitOutcome::Processed { created: true, .. }));
    }
}
