mod common;

use std::sync::Arc;
use std::time::Duration;

use cb_app::usecases::{CopyReport, PasteOutcome};
use cb_core::clipboard::{parse_copied_at, ReplicaCodec, PLACEHOLDER_TEXT};
use cb_core::ports::{MirrorStorePort, MIRROR_METADATA_KEY, MIRROR_PAYLOADS_KEY};
use cb_core::{
    Classification, CopyStatus, FormatPolicy, FormatTag, PayloadContent, PayloadSet, ReplicaKind,
    StoragePolicy, TriggerKind,
};
use cb_infra::FixtureContentProvider;
use cb_platform::ports::SystemBufferPort;
use cb_platform::PlatformSettings;

use common::{all_formats, eventually, settings, Api, Browser};

#[tokio::test]
async fn empty_copy_clears_both_replicas() {
    common::init_tracing();
    let browser = Browser::new(PlatformSettings::default());
    let tab = browser.open_tab("tab-1", Api::DataTransfer, settings(StoragePolicy::ChannelAndMirror));

    let report = tab
        .handle
        .copy_and_wait(vec![FormatTag::plain_text()], TriggerKind::Programmatic)
        .await
        .unwrap();
    assert!(matches!(report, CopyReport::Published { .. }));

    let report = tab
        .handle
        .copy_and_wait(Vec::new(), TriggerKind::Programmatic)
        .await
        .unwrap();
    assert_eq!(report, CopyReport::Cleared);

    assert!(browser.buffer.read().unwrap().is_empty());
    let mirror = browser.storage.handle();
    assert_eq!(mirror.get(MIRROR_PAYLOADS_KEY).await.unwrap(), None);
    assert_eq!(mirror.get(MIRROR_METADATA_KEY).await.unwrap(), None);
    assert!(tab.ui.has_log("Select at least one payload to copy"));
}

#[tokio::test]
async fn clearing_context_falls_back_to_unknown_origin_formats() {
    let browser = Browser::new(PlatformSettings::default());
    let tab = browser.open_tab("tab-1", Api::DataTransfer, settings(StoragePolicy::ChannelAndMirror));

    tab.handle
        .copy_and_wait(vec![FormatTag::plain_text()], TriggerKind::Programmatic)
        .await
        .unwrap();
    assert_eq!(tab.ui.last_paste_formats().unwrap().len(), 4);

    tab.handle
        .copy_and_wait(Vec::new(), TriggerKind::Programmatic)
        .await
        .unwrap();

    let status = tab.handle.status().await.unwrap();
    let expected: std::collections::BTreeSet<_> =
        [FormatTag::plain_text(), FormatTag::custom()].into_iter().collect();
    assert_eq!(status.last_copy, None);
    assert_eq!(status.last_classification, None);
    assert_eq!(status.eligible, expected);
    assert_eq!(tab.ui.last_paste_formats(), Some(expected));
}

#[tokio::test]
async fn same_session_paste_prefers_custom_format() {
    let browser = Browser::new(PlatformSettings::default());
    let tab = browser.open_tab("tab-1", Api::DataTransfer, settings(StoragePolicy::ChannelAndMirror));

    tab.handle
        .copy_and_wait(all_formats(), TriggerKind::Programmatic)
        .await
        .unwrap();

    // The data-transfer channel cannot carry the custom format; the mirror can.
    assert!(!browser.buffer.read().unwrap().contains(&FormatTag::custom()));

    let outcome = tab
        .handle
        .paste(FormatPolicy::DefaultPriority, TriggerKind::Programmatic)
        .await
        .unwrap();
    match outcome {
        PasteOutcome::Rendered {
            selection,
            classification,
            source,
        } => {
            assert_eq!(selection.tag, FormatTag::custom());
            assert_eq!(classification, Classification::SameSession);
            assert_eq!(source, ReplicaKind::Mirror);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn cross_session_image_request_is_denied() {
    let browser = Browser::new(PlatformSettings::default());
    let source = browser.open_tab("tab-1", Api::DataTransfer, settings(StoragePolicy::ChannelAndMirror));
    let target = browser.open_tab("tab-2", Api::DataTransfer, settings(StoragePolicy::ChannelAndMirror));

    source
        .handle
        .copy_and_wait(all_formats(), TriggerKind::Programmatic)
        .await
        .unwrap();

    let outcome = target
        .handle
        .paste(FormatPolicy::Explicit(FormatTag::image()), TriggerKind::Programmatic)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        PasteOutcome::Denied {
            tag: FormatTag::image(),
            classification: Classification::CrossSession,
        }
    );
    assert!(target.ui.rendered.lock().unwrap().is_empty());

    let mirror = browser.storage.handle();
    let raw = mirror.get(MIRROR_PAYLOADS_KEY).await.unwrap().unwrap();
    assert!(ReplicaCodec::decode_payloads(&raw)
        .unwrap()
        .contains(&FormatTag::image()));
}

#[tokio::test]
async fn foreign_channel_content_without_mirror_is_external() {
    let browser = Browser::new(PlatformSettings::default());
    let tab = browser.open_tab("tab-1", Api::AsyncClipboard, settings(StoragePolicy::ChannelOnly));

    browser
        .buffer
        .write(&PayloadSet::new().with(FormatTag::plain_text(), PayloadContent::text("from elsewhere")))
        .unwrap();

    let outcome = tab
        .handle
        .paste(FormatPolicy::DefaultPriority, TriggerKind::Programmatic)
        .await
        .unwrap();
    match outcome {
        PasteOutcome::Rendered {
            selection,
            classification,
            source,
        } => {
            assert_eq!(classification, Classification::External);
            assert_eq!(source, ReplicaKind::Channel);
            assert_eq!(selection.content, Some(PayloadContent::text("from elsewhere")));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    let expected = [FormatTag::plain_text(), FormatTag::custom()].into_iter().collect();
    assert_eq!(tab.ui.last_paste_formats(), Some(expected));
}

#[tokio::test]
async fn copy_in_another_context_refreshes_eligibility() {
    let browser = Browser::new(PlatformSettings::default());
    let source = browser.open_tab("tab-1", Api::AsyncClipboard, settings(StoragePolicy::ChannelAndMirror));
    let target = browser.open_tab("tab-2", Api::AsyncClipboard, settings(StoragePolicy::ChannelAndMirror));

    source
        .handle
        .copy_and_wait(vec![FormatTag::plain_text()], TriggerKind::Programmatic)
        .await
        .unwrap();

    let status = eventually(&target.handle, |s| {
        s.last_classification == Some(Classification::CrossSession)
    })
    .await;
    assert!(!status.eligible.contains(&FormatTag::image()));
    assert_eq!(status.eligible.len(), 3);

    // The writer is never notified of its own copy.
    let own = source.handle.status().await.unwrap();
    assert_eq!(own.last_classification, Some(Classification::SameSession));
}

#[tokio::test]
async fn async_clipboard_carries_every_format_and_a_timestamp() {
    let browser = Browser::new(PlatformSettings::default());
    let tab = browser.open_tab("tab-1", Api::AsyncClipboard, settings(StoragePolicy::ChannelOnly));

    let report = tab
        .handle
        .copy_and_wait(all_formats(), TriggerKind::Programmatic)
        .await
        .unwrap();
    let CopyReport::Published { copied_at_ms, .. } = report else {
        panic!("copy was not published: {report:?}");
    };

    let channel = browser.buffer.read().unwrap();
    assert!(channel.contains(&FormatTag::custom()));
    assert!(channel.contains(&FormatTag::metadata()));
    let html = channel.get(&FormatTag::rich_text()).unwrap().as_text().unwrap();
    assert_eq!(parse_copied_at(html), Some(copied_at_ms));

    let mirror = browser.storage.handle();
    assert_eq!(mirror.get(MIRROR_PAYLOADS_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn keyboard_copy_writes_placeholder_inside_the_gesture() {
    let browser = Browser::new(PlatformSettings {
        honor_capture_requests: false,
        ..PlatformSettings::default()
    });
    let tab = browser.open_tab("tab-1", Api::DataTransfer, settings(StoragePolicy::ChannelAndMirror));

    let report = tab
        .handle
        .copy_and_wait(vec![FormatTag::plain_text()], TriggerKind::Keyboard)
        .await
        .unwrap();
    assert!(matches!(report, CopyReport::Published { .. }));

    // Phase 1 went through the gesture; phase 2 could not reach the channel.
    let channel = browser.buffer.read().unwrap();
    assert_eq!(
        channel.get(&FormatTag::plain_text()),
        Some(&PayloadContent::text(PLACEHOLDER_TEXT))
    );
    assert!(tab.ui.has_log("CaptureRejected"));

    let mirror = browser.storage.handle();
    let raw = mirror.get(MIRROR_METADATA_KEY).await.unwrap().unwrap();
    assert_eq!(
        ReplicaCodec::decode_metadata(&raw).unwrap().copy_status,
        CopyStatus::Completed
    );
}

#[tokio::test]
async fn keyboard_paste_reads_inside_the_gesture() {
    let browser = Browser::new(PlatformSettings {
        honor_capture_requests: false,
        ..PlatformSettings::default()
    });
    let tab = browser.open_tab("tab-1", Api::DataTransfer, settings(StoragePolicy::ChannelOnly));
    browser
        .buffer
        .write(&PayloadSet::new().with(FormatTag::plain_text(), PayloadContent::text("typed")))
        .unwrap();

    let aborted = tab
        .handle
        .paste(FormatPolicy::DefaultPriority, TriggerKind::Programmatic)
        .await
        .unwrap();
    assert_eq!(aborted, PasteOutcome::Aborted);

    let outcome = tab
        .handle
        .paste(FormatPolicy::DefaultPriority, TriggerKind::Keyboard)
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        PasteOutcome::Rendered { classification: Classification::External, .. }
    ));
}

#[tokio::test]
async fn failed_resolution_leaves_the_placeholder() {
    let browser = Browser::new(PlatformSettings::default());
    let content = FixtureContentProvider::empty()
        .with_fixture(FormatTag::plain_text(), PayloadContent::text("ok"));
    let tab = browser.open_tab_with_content(
        "tab-1",
        Api::AsyncClipboard,
        settings(StoragePolicy::ChannelAndMirror),
        Arc::new(content),
    );

    let report = tab
        .handle
        .copy_and_wait(
            vec![FormatTag::plain_text(), FormatTag::image()],
            TriggerKind::Programmatic,
        )
        .await
        .unwrap();
    assert!(matches!(report, CopyReport::Failed(ref err) if err.format() == &FormatTag::image()));
    assert!(tab.ui.has_log("ContentResolutionFailure"));

    let mirror = browser.storage.handle();
    let raw = mirror.get(MIRROR_METADATA_KEY).await.unwrap().unwrap();
    assert_eq!(
        ReplicaCodec::decode_metadata(&raw).unwrap().copy_status,
        CopyStatus::Started
    );
    assert_eq!(
        browser.buffer.read().unwrap().get(&FormatTag::plain_text()),
        Some(&PayloadContent::text(PLACEHOLDER_TEXT))
    );
    assert_eq!(tab.ui.progress.lock().unwrap().last(), Some(&false));
}

#[tokio::test]
async fn external_overwrite_after_copy_wins_over_the_mirror() {
    let browser = Browser::new(PlatformSettings::default());
    let tab = browser.open_tab("tab-1", Api::AsyncClipboard, settings(StoragePolicy::ChannelAndMirror));

    tab.handle
        .copy_and_wait(all_formats(), TriggerKind::Programmatic)
        .await
        .unwrap();
    browser
        .buffer
        .write(&PayloadSet::new().with(FormatTag::plain_text(), PayloadContent::text("other app")))
        .unwrap();

    let outcome = tab
        .handle
        .paste(FormatPolicy::DefaultPriority, TriggerKind::Programmatic)
        .await
        .unwrap();
    match outcome {
        PasteOutcome::Rendered {
            selection,
            classification,
            source,
        } => {
            assert_eq!(source, ReplicaKind::Channel);
            assert_eq!(classification, Classification::External);
            assert_eq!(selection.tag, FormatTag::plain_text());
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn unavailable_mirror_degrades_to_the_channel() {
    let browser = Browser::new(PlatformSettings::default());
    let tab = browser.open_tab("tab-1", Api::AsyncClipboard, settings(StoragePolicy::ChannelAndMirror));
    browser.storage.set_available(false);

    let report = tab
        .handle
        .copy_and_wait(vec![FormatTag::rich_text()], TriggerKind::Programmatic)
        .await
        .unwrap();
    assert!(matches!(report, CopyReport::Published { .. }));
    assert!(tab.ui.has_log("StorageUnavailable"));

    let outcome = tab
        .handle
        .paste(FormatPolicy::Explicit(FormatTag::rich_text()), TriggerKind::Programmatic)
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        PasteOutcome::Rendered { source: ReplicaKind::Channel, classification: Classification::SameSession, .. }
    ));
}

#[tokio::test]
async fn overlapping_copies_both_complete_without_fencing() {
    let browser = Browser::new(PlatformSettings::default());
    let mut slow = settings(StoragePolicy::ChannelAndMirror);
    slow.resolve_delay = Duration::from_millis(100);
    let tab = browser.open_tab("tab-1", Api::AsyncClipboard, slow);

    let first = tab
        .handle
        .copy(vec![FormatTag::plain_text()], TriggerKind::Programmatic)
        .await
        .unwrap();
    let second = tab
        .handle
        .copy(vec![FormatTag::rich_text()], TriggerKind::Programmatic)
        .await
        .unwrap();

    let during = tab.handle.status().await.unwrap();
    assert_eq!(during.copies_in_flight, 2);

    assert!(matches!(first.await.unwrap(), CopyReport::Published { .. }));
    assert!(matches!(second.await.unwrap(), CopyReport::Published { .. }));

    let after = tab.handle.status().await.unwrap();
    assert_eq!(after.copies_in_flight, 0);
    assert_eq!(
        after.last_copy.map(|m| m.copy_status),
        Some(CopyStatus::Completed)
    );
}
