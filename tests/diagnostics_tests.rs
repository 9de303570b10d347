//! Diagnostic log tests
//!
//! Events emitted by the store and services end up in the diagnostic slot,
//! filtered by target and level, without disturbing the link slot.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;

use pocketlink::config::DiagnosticsConfig;
use pocketlink::storage::{FileBackend, KvBackend, LinkStore, MemoryBackend, ShortLink};
use pocketlink::system::logging::diagnostic_targets;
use pocketlink::system::{DiagnosticLayer, DiagnosticLog, LogLevel};

fn link(code: &str) -> ShortLink {
    ShortLink::new(
        code,
        "https://example.com",
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        30,
    )
    .unwrap()
}

fn diagnostics(backend: Arc<dyn KvBackend>, config: &DiagnosticsConfig) -> Arc<DiagnosticLog> {
    Arc::new(DiagnosticLog::new(backend, "diagnostic_logs", config))
}

#[test]
fn test_store_events_are_captured() {
    let backend: Arc<dyn KvBackend> = Arc::new(MemoryBackend::new());
    let store = LinkStore::new(backend.clone(), "url_shortener_data");
    let log = diagnostics(backend.clone(), &DiagnosticsConfig::default());

    let subscriber = tracing_subscriber::registry().with(
        DiagnosticLayer::new(log.clone()).with_filter(diagnostic_targets("info").unwrap()),
    );
    tracing::subscriber::with_default(subscriber, || {
        store.create(link("abcd"));
        store.append_click("missing1", None);
    });

    let logs = log.get_logs();
    assert_eq!(logs.len(), 2);

    assert_eq!(logs[0].level, LogLevel::Info);
    assert_eq!(logs[0].message, "Short link added");
    assert!(logs[0].package.starts_with("pocketlink"));

    assert_eq!(logs[1].level, LogLevel::Warn);
    let meta = logs[1].meta.as_ref().expect("shortcode should be in meta");
    assert_eq!(meta["shortcode"], "missing1");

    // 链接数据不受影响
    assert!(store.lookup("abcd").is_some());
}

#[test]
fn test_shared_file_backend_does_not_deadlock() {
    let dir = TempDir::new().unwrap();
    let backend: Arc<dyn KvBackend> = Arc::new(FileBackend::new(dir.path()));
    let store = LinkStore::new(backend.clone(), "url_shortener_data");
    let log = diagnostics(backend, &DiagnosticsConfig::default());

    let subscriber = tracing_subscriber::registry().with(
        DiagnosticLayer::new(log.clone()).with_filter(diagnostic_targets("info").unwrap()),
    );
    tracing::subscriber::with_default(subscriber, || {
        for code in ["aaaa", "bbbb", "cccc"] {
            store.create(link(code));
            store.append_click(code, None);
        }
    });

    assert_eq!(store.list_all().len(), 3);
    assert_eq!(log.get_logs().len(), 6);
    assert!(dir.path().join("diagnostic_logs.json").exists());
}

#[test]
fn test_level_and_target_filtering() {
    let backend: Arc<dyn KvBackend> = Arc::new(MemoryBackend::new());
    let log = diagnostics(backend, &DiagnosticsConfig::default());

    let subscriber = tracing_subscriber::registry().with(
        DiagnosticLayer::new(log.clone()).with_filter(diagnostic_targets("warn").unwrap()),
    );
    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(target: "pocketlink::storage", "too quiet");
        tracing::error!(target: "ureq::agent", "not ours");
        tracing::error!(target: "pocketlink::services::redirect", "Redirect failed");
    });

    let logs = log.get_logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].message, "Redirect failed");
    assert_eq!(logs[0].level, LogLevel::Error);
}

#[test]
fn test_cap_applies_across_events() {
    let backend: Arc<dyn KvBackend> = Arc::new(MemoryBackend::new());
    let config = DiagnosticsConfig {
        max_entries: 5,
        stack: "test".to_string(),
        ..DiagnosticsConfig::default()
    };
    let log = diagnostics(backend, &config);

    let subscriber = tracing_subscriber::registry().with(
        DiagnosticLayer::new(log.clone()).with_filter(diagnostic_targets("debug").unwrap()),
    );
    tracing::subscriber::with_default(subscriber, || {
        for i in 0..12 {
            tracing::debug!(target: "pocketlink::test", n = i, "event {}", i);
        }
    });

    let logs = log.get_logs();
    assert_eq!(logs.len(), 5);
    assert_eq!(logs[0].message, "event 7");
    assert_eq!(logs[4].message, "event 11");
    assert!(logs.iter().all(|e| e.stack == "test"));
}

#[test]
fn test_disabled_sink_ignores_events() {
    let backend: Arc<dyn KvBackend> = Arc::new(MemoryBackend::new());
    let config = DiagnosticsConfig {
        enabled: false,
        ..DiagnosticsConfig::default()
    };
    let log = diagnostics(backend.clone(), &config);

    let subscriber = tracing_subscriber::registry().with(DiagnosticLayer::new(log.clone()));
    tracing::subscriber::with_default(subscriber, || {
        tracing::warn!(target: "pocketlink::storage", "ignored");
    });

    assert!(log.get_logs().is_empty());
    assert_eq!(backend.read("diagnostic_logs").unwrap(), None);
}
