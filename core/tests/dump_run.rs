mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use common::{output_file, single_product_config, FailingStore, RecordingReport, StubClient};
use dhubdump_core::dump::{acquire_token, DumpRunner};
use dhubdump_core::error::DumpError;
use dhubdump_core::executor::ExecutionOpts;
use dhubdump_core::query::Format;
use dhubdump_core::report::{FetchStatus, ReportRow};
use dhubdump_core::task::DumpRequest;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 8, 9, 30, 0).unwrap()
}

fn opts(root: &std::path::Path) -> ExecutionOpts {
    ExecutionOpts::new(root).with_time_between(Duration::from_millis(5))
}

fn sorted_names(rows: &[ReportRow]) -> Vec<String> {
    let mut names: Vec<String> = rows.iter().map(|r| r.name.clone()).collect();
    names.sort();
    names
}

#[tokio::test]
async fn single_product_run_reports_every_format_once() {
    let out = tempfile::tempdir().unwrap();
    let client = Arc::new(StubClient::default());
    let report = Arc::new(RecordingReport::default());

    let result = DumpRunner::new(client.clone())
        .with_report(report.clone())
        .run(
            &single_product_config(),
            &[DumpRequest::Products],
            opts(out.path()),
            now(),
        )
        .await
        .unwrap();

    assert_eq!(result.total_tasks, 6);
    assert_eq!(result.completed, 12);
    assert_eq!(result.failed, 0);
    assert!(result.report_written);
    assert_eq!(report.write_count(), 1);

    let rows = report.rows();
    assert_eq!(rows.len(), 12);
    assert!(rows.iter().all(|r| r.status == FetchStatus::Ok));
    assert!(rows.iter().all(|r| r.size == Some(13)));
    assert_eq!(
        sorted_names(&rows),
        vec![
            "accommodation-all-day-20240107-20240108.json",
            "accommodation-all-day-20240107-20240108.xml",
            "accommodation-all-week-20240101-20240108.json",
            "accommodation-all-week-20240101-20240108.xml",
            "accommodation-all.json",
            "accommodation-all.xml",
            "accommodation-pub-day-20240107-20240108.json",
            "accommodation-pub-day-20240107-20240108.xml",
            "accommodation-pub-week-20240101-20240108.json",
            "accommodation-pub-week-20240101-20240108.xml",
            "accommodation-pub.json",
            "accommodation-pub.xml",
        ]
    );

    let xml = output_file(out.path(), ".", "accommodation-pub.xml");
    assert_eq!(std::fs::read_to_string(xml).unwrap(), "<dump></dump>");
    assert_eq!(client.starts.load(std::sync::atomic::Ordering::SeqCst), 1);
}

#[tokio::test]
async fn default_report_lands_in_output_root() {
    let out = tempfile::tempdir().unwrap();
    let client = Arc::new(StubClient::default());

    DumpRunner::new(client)
        .run(
            &single_product_config(),
            &[DumpRequest::Vocabularies, DumpRequest::Item(42)],
            opts(out.path()),
            now(),
        )
        .await
        .unwrap();

    let csv = std::fs::read_to_string(out.path().join("dhubdump-report.csv")).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("start,end,duration_ms,dir,name,"));
    assert_eq!(lines.count(), 4);
    assert!(out.path().join("byid").join("product-42.json").exists());
    assert!(out.path().join("vocabularies.xml").exists());
}

#[tokio::test]
async fn missing_output_root_fails_before_any_client_call() {
    let out = tempfile::tempdir().unwrap();
    let missing = out.path().join("nope");
    let client = Arc::new(StubClient::default());
    let report = Arc::new(RecordingReport::default());

    let err = DumpRunner::new(client.clone())
        .with_report(report.clone())
        .run(
            &single_product_config(),
            &[DumpRequest::Products],
            opts(&missing),
            now(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DumpError::OutputMissing(ref p) if p == &missing));
    assert_eq!(client.calls(), 0);
    assert_eq!(report.write_count(), 0);
}

#[tokio::test]
async fn output_root_that_is_a_file_is_rejected() {
    let out = tempfile::tempdir().unwrap();
    let file = out.path().join("plain.txt");
    std::fs::write(&file, "x").unwrap();
    let client = Arc::new(StubClient::default());

    let err = DumpRunner::new(client.clone())
        .run(
            &single_product_config(),
            &[DumpRequest::Claims],
            opts(&file),
            now(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DumpError::OutputNotDirectory(_)));
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn dispatches_are_paced() {
    let out = tempfile::tempdir().unwrap();
    let client = Arc::new(StubClient::default());
    let report = Arc::new(RecordingReport::default());

    DumpRunner::new(client)
        .with_report(report.clone())
        .run(
            &single_product_config(),
            &[
                DumpRequest::Item(1),
                DumpRequest::Item(2),
                DumpRequest::Item(3),
            ],
            ExecutionOpts::new(out.path()).with_time_between(Duration::from_millis(50)),
            now(),
        )
        .await
        .unwrap();

    let rows = report.rows();
    let start_of = |name: &str| {
        rows.iter()
            .find(|r| r.name == name)
            .map(|r| r.start)
            .unwrap()
    };
    let first = start_of("product-1.xml");
    let second = start_of("product-2.xml");
    let third = start_of("product-3.xml");

    assert!((second - first).num_milliseconds() >= 50);
    assert!((third - first).num_milliseconds() >= 100);
    // Both formats of one task share the dispatch time.
    assert_eq!(start_of("product-2.json"), second);
}

#[tokio::test]
async fn sink_error_removes_partial_file_and_keeps_siblings() {
    let out = tempfile::tempdir().unwrap();
    let client = Arc::new(StubClient::default());
    let report = Arc::new(RecordingReport::default());

    let result = DumpRunner::new(client)
        .with_report(report.clone())
        .with_store(Arc::new(FailingStore::new("accommodation-pub.xml")))
        .run(
            &single_product_config(),
            &[DumpRequest::Products],
            opts(out.path()),
            now(),
        )
        .await
        .unwrap();

    assert_eq!(result.failed, 1);
    assert_eq!(report.write_count(), 1);

    let rows = report.rows();
    assert_eq!(rows.len(), 12);
    let failed: Vec<&ReportRow> = rows.iter().filter(|r| !r.status.is_ok()).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].name, "accommodation-pub.xml");
    assert!(failed[0].status.to_string().starts_with("error saving"));
    assert_eq!(failed[0].size, None);

    assert!(!output_file(out.path(), ".", "accommodation-pub.xml").exists());
    assert!(output_file(out.path(), ".", "accommodation-pub.json").exists());
    assert!(output_file(out.path(), ".", "accommodation-all.xml").exists());
}

#[tokio::test]
async fn remote_error_becomes_report_row() {
    let out = tempfile::tempdir().unwrap();
    let client = Arc::new(StubClient {
        fail_format: Some(Format::Json),
        ..StubClient::default()
    });
    let report = Arc::new(RecordingReport::default());

    let result = DumpRunner::new(client)
        .with_report(report.clone())
        .run(
            &single_product_config(),
            &[DumpRequest::Claims],
            opts(out.path()),
            now(),
        )
        .await
        .unwrap();

    assert_eq!(result.completed, 2);
    assert_eq!(result.failed, 1);
    let rows = report.rows();
    let json = rows.iter().find(|r| r.name == "claims.json").unwrap();
    assert!(json.status.to_string().contains("status=503"));
    assert!(!out.path().join("claims.json").exists());
    assert!(out.path().join("claims.xml").exists());
}

#[tokio::test]
async fn report_waits_for_slow_format() {
    let out = tempfile::tempdir().unwrap();
    let client = Arc::new(StubClient {
        delay: Some((Format::Xml, Duration::from_millis(40))),
        ..StubClient::default()
    });
    let report = Arc::new(RecordingReport::default());

    DumpRunner::new(client)
        .with_report(report.clone())
        .run(
            &single_product_config(),
            &[DumpRequest::Item(7), DumpRequest::Item(8)],
            opts(out.path()),
            now(),
        )
        .await
        .unwrap();

    assert_eq!(report.write_count(), 1);
    let rows = report.rows();
    assert_eq!(rows.len(), 4);
    // Completion order, not dispatch order: the delayed xml rows come last.
    assert!(rows[..2].iter().all(|r| r.name.ends_with(".json")));
    assert!(rows[2..].iter().all(|r| r.name.ends_with(".xml")));
}

#[tokio::test]
async fn repeated_formats_are_fetched_once() {
    let out = tempfile::tempdir().unwrap();
    let client = Arc::new(StubClient::default());
    let report = Arc::new(RecordingReport::default());
    let mut opts = opts(out.path());
    opts.formats = vec![Format::Xml, Format::Xml, Format::Json];

    let result = DumpRunner::new(client.clone())
        .with_report(report.clone())
        .run(
            &single_product_config(),
            &[DumpRequest::Item(5)],
            opts,
            now(),
        )
        .await
        .unwrap();

    assert!(result.report_written);
    assert_eq!(report.write_count(), 1);
    assert_eq!(
        sorted_names(&report.rows()),
        vec!["product-5.json", "product-5.xml"]
    );
    assert_eq!(client.streams.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[tokio::test]
async fn empty_queue_still_writes_report() {
    let out = tempfile::tempdir().unwrap();
    let client = Arc::new(StubClient::default());
    let report = Arc::new(RecordingReport::default());

    let result = DumpRunner::new(client.clone())
        .with_report(report.clone())
        .run(
            &single_product_config(),
            &[DumpRequest::Samples],
            opts(out.path()),
            now(),
        )
        .await
        .unwrap();

    assert_eq!(result.total_tasks, 0);
    assert!(result.report_written);
    assert_eq!(report.write_count(), 1);
    assert!(report.rows().is_empty());
    assert_eq!(client.streams.load(std::sync::atomic::Ordering::SeqCst), 0);
}

#[tokio::test]
async fn token_is_handed_back() {
    let client = StubClient::default();
    assert_eq!(acquire_token(&client).await.unwrap(), "stub-token");
}
