use std::time::Duration;

use cb_app::usecases::{CopyReport, PasteOutcome};
use cb_core::config::HarnessConfig;
use cb_core::ports::MIRROR_PAYLOADS_KEY;
use cb_core::{Classification, FormatPolicy, FormatTag, StoragePolicy, TriggerKind};
use clipbench_lib::bootstrap::{wire_harness, ResolvedSettings};
use clipbench_lib::shell::run_shell;

fn fast_settings() -> ResolvedSettings {
    ResolvedSettings {
        resolve_delay: Duration::ZERO,
        ..ResolvedSettings::from_config(&HarnessConfig::empty()).unwrap()
    }
}

#[tokio::test]
async fn copy_in_one_tab_pastes_in_another() {
    let harness = wire_harness(&fast_settings()).await.unwrap();
    let (source, target) = (harness.handle(0).unwrap(), harness.handle(1).unwrap());

    let report = source
        .copy_and_wait(harness.default_formats.clone(), TriggerKind::Programmatic)
        .await
        .unwrap();
    assert!(matches!(report, CopyReport::Published { .. }));

    let outcome = target
        .paste(FormatPolicy::Explicit(FormatTag::rich_text()), TriggerKind::Programmatic)
        .await
        .unwrap();
    match outcome {
        PasteOutcome::Rendered {
            selection,
            classification,
            ..
        } => {
            assert_eq!(classification, Classification::CrossSession);
            assert_eq!(selection.tag, FormatTag::rich_text());
            assert!(selection.content.is_some());
        }
        other => panic!("unexpected paste outcome: {other:?}"),
    }

    harness.shutdown().await;
}

#[tokio::test]
async fn channel_only_policy_leaves_the_mirror_empty() {
    let dir = tempfile::tempdir().unwrap();
    let settings = ResolvedSettings {
        storage_policy: StoragePolicy::ChannelOnly,
        mirror_path: Some(dir.path().join("mirror.json")),
        ..fast_settings()
    };
    let harness = wire_harness(&settings).await.unwrap();

    harness
        .handle(0)
        .unwrap()
        .copy_and_wait(vec![FormatTag::plain_text()], TriggerKind::Programmatic)
        .await
        .unwrap();

    assert!(!dir.path().join("mirror.json").exists());
    harness.shutdown().await;
}

#[tokio::test]
async fn mirror_file_holds_the_published_payloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mirror.json");
    let settings = ResolvedSettings {
        mirror_path: Some(path.clone()),
        ..fast_settings()
    };
    let harness = wire_harness(&settings).await.unwrap();

    harness
        .handle(0)
        .unwrap()
        .copy_and_wait(vec![FormatTag::plain_text()], TriggerKind::Programmatic)
        .await
        .unwrap();

    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains(MIRROR_PAYLOADS_KEY));
    harness.shutdown().await;
}

#[tokio::test]
async fn shell_stops_at_quit() {
    let harness = wire_harness(&fast_settings()).await.unwrap();
    let script: &[u8] = b"status\nbogus\npaste 9\nquit\ncopy 0\n";

    run_shell(&harness, script).await.unwrap();

    let status = harness.handle(0).unwrap().status().await.unwrap();
    assert!(status.last_copy.is_none());
    harness.shutdown().await;
}
