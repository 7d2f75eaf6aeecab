//! Maintenance endpoint integration tests.
//!
//! Accounts created through the API always carry the counter field, so the
//! backfill over API-created data is a no-op; the legacy-document rewrite
//! itself is covered by the store's unit tests.

mod common;

use common::TestHarness;

#[tokio::test]
async fn backfill_reports_zero_for_current_data() {
    let harness = TestHarness::new();

    harness.create_account("Ana", 1001, 500).await;

    let response = harness.server.post("/api/mantenimiento/contadores").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["backfilled"], 0);
}

#[tokio::test]
async fn backfill_is_repeatable() {
    let harness = TestHarness::new();

    harness.create_account("Ana", 1001, 500).await;

    let first = harness.server.post("/api/mantenimiento/contadores").await;
    first.assert_status_ok();

    let second = harness.server.post("/api/mantenimiento/contadores").await;
    second.assert_status_ok();
    let body: serde_json::Value = second.json();
    assert_eq!(body["backfilled"], 0);
}
