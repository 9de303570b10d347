//! CLI integration tests
//!
//! Drives parsed commands against an in-memory context.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use clap::Parser;

use pocketlink::cli::{Cli, Commands};
use pocketlink::config::StaticConfig;
use pocketlink::interfaces::cli::{CliError, run_cli_command};
use pocketlink::runtime::StartupContext;
use pocketlink::storage::MemoryBackend;
use pocketlink::utils::clock::ManualClock;

fn context() -> (StartupContext, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 0).unwrap(),
    ));
    let ctx = StartupContext::with_backend(
        Arc::new(StaticConfig::default()),
        Arc::new(MemoryBackend::new()),
        clock.clone(),
    );
    (ctx, clock)
}

fn parse(args: &[&str]) -> Commands {
    let mut argv = vec!["pocketlink"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("arguments should parse").command
}

async fn run(ctx: &StartupContext, args: &[&str]) -> Result<(), CliError> {
    run_cli_command(parse(args), ctx).await
}

#[tokio::test]
async fn test_add_open_and_stats() {
    let (ctx, _clock) = context();

    run(&ctx, &["add", "https://example.com/docs", "--code", "docs"])
        .await
        .unwrap();
    run(&ctx, &["open", "docs", "--referrer", "https://chat.example"])
        .await
        .unwrap();
    run(&ctx, &["stats", "docs"]).await.unwrap();
    run(&ctx, &["stats"]).await.unwrap();
    run(&ctx, &["list"]).await.unwrap();

    let link = ctx.store.lookup("docs").unwrap();
    assert_eq!(link.long_url, "https://example.com/docs");
    assert_eq!(link.clicks.len(), 1);
    assert_eq!(link.clicks[0].referrer, "https://chat.example");
}

#[tokio::test]
async fn test_open_unknown_code_fails() {
    let (ctx, _clock) = context();
    let err = run(&ctx, &["open", "nothere"]).await.unwrap_err();
    assert!(matches!(err, CliError::CommandError(ref m) if m.contains("does not exist")));
}

#[tokio::test]
async fn test_open_expired_code_fails_without_click() {
    let (ctx, clock) = context();
    run(&ctx, &["add", "https://example.com", "-n", "brief", "-v", "1"])
        .await
        .unwrap();

    clock.advance(Duration::seconds(61));

    let err = run(&ctx, &["open", "brief"]).await.unwrap_err();
    assert!(matches!(err, CliError::CommandError(ref m) if m.contains("expired")));
    assert!(ctx.store.lookup("brief").unwrap().clicks.is_empty());
}

#[tokio::test]
async fn test_invalid_input_is_reported_per_field() {
    let (ctx, _clock) = context();
    let err = run(&ctx, &["add", "example.com", "--code", "ab"])
        .await
        .unwrap_err();

    match err {
        CliError::ValidationError(msg) => {
            assert!(msg.contains("longUrl"));
            assert!(msg.contains("customShortcode"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(ctx.store.list_all().is_empty());
}

#[tokio::test]
async fn test_batch_and_limits() {
    let (ctx, _clock) = context();

    run(&ctx, &["batch", "https://a.example", "nope", "https://c.example"])
        .await
        .unwrap();
    assert_eq!(ctx.store.list_all().len(), 2);

    let err = run(
        &ctx,
        &[
            "batch", "https://1.example", "https://2.example", "https://3.example",
            "https://4.example", "https://5.example", "https://6.example",
        ],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, CliError::CommandError(_)));
    assert_eq!(ctx.store.list_all().len(), 2);

    let err = run(&ctx, &["batch", "nope", "also nope"]).await.unwrap_err();
    assert!(matches!(err, CliError::CommandError(_)));
}

#[tokio::test]
async fn test_clear_and_logs() {
    let (ctx, _clock) = context();
    run(&ctx, &["add", "https://example.com"]).await.unwrap();
    assert_eq!(ctx.store.list_all().len(), 1);

    run(&ctx, &["clear"]).await.unwrap();
    assert!(ctx.store.list_all().is_empty());

    ctx.diagnostics.record(
        pocketlink::system::LogLevel::Info,
        "pocketlink::test",
        "hello",
        None,
    );
    run(&ctx, &["logs", "--limit", "5"]).await.unwrap();
    run(&ctx, &["logs", "--clear"]).await.unwrap();
    assert!(ctx.diagnostics.get_logs().is_empty());
}

#[tokio::test]
async fn test_config_generate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pocketlink.toml");
    let path_str = path.to_string_lossy().to_string();
    let (ctx, _clock) = context();

    run(&ctx, &["config", "generate", &path_str, "--force"])
        .await
        .unwrap();

    let loaded = StaticConfig::try_load(Some(&path_str)).unwrap();
    assert_eq!(loaded.links.default_validity_minutes, 30);
    assert_eq!(loaded.links.max_batch_size, 5);
}
