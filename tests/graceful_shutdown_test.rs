//! Cancellation tests
//!
//! Verifies that a fired cancel signal stops the poll loop, cancels the
//! remote job where the API allows it and reports the interruption.

mod common;

use common::{created, fast_polling, status, success, Call, ScriptedApi};
use mytracker::config::PollingConfig;
use mytracker::{CancelSignal, ExportCoordinator, ExportKind, ExportParams, MyTrackerError, ResultFormat};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

fn long_interval() -> PollingConfig {
    PollingConfig {
        interval_ms: 60_000,
        ..PollingConfig::default()
    }
}

#[tokio::test]
async fn test_cancel_before_start_skips_create() {
    let api = Arc::new(ScriptedApi::new(
        created(ExportKind::Raw, 7),
        vec![status("In progress")],
    ));
    let coordinator = ExportCoordinator::with_api(api.clone(), fast_polling());
    let (cancel_tx, cancel) = CancelSignal::pair();
    cancel_tx.send(true).unwrap();

    let err = coordinator
        .get_raw_data_with_cancel(ExportParams::new(), ResultFormat::Table, cancel)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        MyTrackerError::Interrupted {
            cancel_response: None
        }
    ));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_raw_interrupt_cancels_remote_job() {
    let api = Arc::new(ScriptedApi::new(
        created(ExportKind::Raw, 7),
        vec![status("In progress")],
    ));
    let coordinator = ExportCoordinator::with_api(api.clone(), long_interval());
    let (cancel_tx, cancel) = CancelSignal::pair();

    let handle = tokio::spawn(async move {
        coordinator
            .get_raw_data_with_cancel(ExportParams::new(), ResultFormat::Table, cancel)
            .await
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel_tx.send(true).unwrap();

    let result = timeout(Duration::from_secs(5), handle)
        .await
        .expect("flow should stop promptly after cancel")
        .unwrap();

    match result {
        Err(MyTrackerError::Interrupted {
            cancel_response: Some(response),
        }) => assert_eq!(response.status_str(), Some("Canceled by user")),
        other => panic!("Expected Interrupted with cancel response, got {other:?}"),
    }
    assert!(api
        .calls()
        .contains(&Call::Cancel(ExportKind::Raw, "7".to_string())));
    assert_eq!(api.downloads(), 0);
}

#[tokio::test]
async fn test_report_interrupt_has_no_remote_cancel() {
    let api = Arc::new(ScriptedApi::new(
        created(ExportKind::Report, 3),
        vec![status("In progress")],
    ));
    let coordinator = ExportCoordinator::with_api(api.clone(), long_interval());
    let (cancel_tx, cancel) = CancelSignal::pair();

    let handle = tokio::spawn(async move {
        coordinator
            .get_report_with_cancel(ExportParams::new(), ResultFormat::Table, cancel)
            .await
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel_tx.send(true).unwrap();

    let result = timeout(Duration::from_secs(5), handle)
        .await
        .expect("flow should stop promptly after cancel")
        .unwrap();

    assert!(matches!(
        result,
        Err(MyTrackerError::Interrupted {
            cancel_response: None
        })
    ));
    assert_eq!(api.count(|c| matches!(c, Call::Cancel(..))), 0);
}

#[tokio::test]
async fn test_dropped_sender_does_not_interrupt() {
    let api = Arc::new(ScriptedApi::new(
        created(ExportKind::Segment, 9),
        vec![status("In progress"), status("Success!")],
    ));
    let coordinator = ExportCoordinator::with_api(api.clone(), fast_polling());
    let (cancel_tx, cancel) = CancelSignal::pair();
    drop(cancel_tx);

    let envelope = coordinator
        .get_segment_with_cancel(ExportParams::new(), cancel)
        .await
        .unwrap();

    assert_eq!(envelope.status_str(), Some("Success!"));
    assert_eq!(api.polls(), 2);
}

#[tokio::test]
async fn test_interrupt_during_status_request() {
    let api = Arc::new(
        ScriptedApi::new(created(ExportKind::Raw, 7), vec![status("In progress")])
            .with_poll_delay(Duration::from_secs(60)),
    );
    let coordinator = ExportCoordinator::with_api(api.clone(), fast_polling());
    let (cancel_tx, cancel) = CancelSignal::pair();

    let handle = tokio::spawn(async move {
        coordinator
            .get_raw_data_with_cancel(ExportParams::new(), ResultFormat::Table, cancel)
            .await
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel_tx.send(true).unwrap();

    let result = timeout(Duration::from_secs(5), handle)
        .await
        .expect("in-flight status request should not delay the interrupt")
        .unwrap();

    assert!(matches!(
        result,
        Err(MyTrackerError::Interrupted {
            cancel_response: Some(_)
        })
    ));
    assert_eq!(api.polls(), 1);
    assert!(api
        .calls()
        .contains(&Call::Cancel(ExportKind::Raw, "7".to_string())));
}

#[tokio::test]
async fn test_interrupt_during_download() {
    let api = Arc::new(
        ScriptedApi::new(created(ExportKind::Report, 3), vec![success(&["report"])])
            .with_file("report", "date,installs\n2022-05-01,10\n")
            .with_download_delay(Duration::from_secs(60)),
    );
    let coordinator = ExportCoordinator::with_api(api.clone(), fast_polling());
    let (cancel_tx, cancel) = CancelSignal::pair();

    let handle = tokio::spawn(async move {
        coordinator
            .get_report_with_cancel(ExportParams::new(), ResultFormat::Table, cancel)
            .await
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel_tx.send(true).unwrap();

    let result = timeout(Duration::from_secs(5), handle)
        .await
        .expect("in-flight download should not delay the interrupt")
        .unwrap();

    assert!(matches!(
        result,
        Err(MyTrackerError::Interrupted {
            cancel_response: None
        })
    ));
    assert_eq!(api.downloads(), 1);
}
