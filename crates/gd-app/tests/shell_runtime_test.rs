mod support;

use std::time::Duration;

use gd_app::ShellRuntime;
use gd_core::ingest::{Key, REACTIVATION_MESSAGE};
use gd_core::{
    BackgroundEffectKind, ClipboardPayload, DropPayload, DropVerdict, KeyChord, ResolvedAppearance,
    SettingsChange, ShellSettings, ThemeMode,
};
use support::*;
use tokio::task::JoinHandle;

fn spawn(harness: &Harness, silent: bool) -> (gd_app::ShellHandle, JoinHandle<()>) {
    let (runtime, handle) = ShellRuntime::new(harness.deps(), options(windows_11()));
    let task = tokio::spawn(runtime.start(silent));
    (handle, task)
}

async fn settle(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn assert_send<T: Send>(_: &T) {}

fn count(calls: &[String], call: &str) -> usize {
    calls.iter().filter(|c| c.as_str() == call).count()
}

#[tokio::test(start_paused = true)]
async fn drop_forwards_only_http_urls_after_the_staging_delay() {
    let harness = Harness::new(ShellSettings::default());
    let (handle, task) = spawn(&harness, false);

    let payload = DropPayload::from_urls(["http://x.test", "ftp://y.test"]);
    assert_eq!(handle.drag_enter(payload.clone()).await.unwrap(), DropVerdict::Accept);
    handle.drop_payload(payload).await.unwrap();

    settle(5).await;
    assert!(harness.task_manager.proposals().is_empty());

    settle(20).await;
    assert_eq!(harness.task_manager.proposals(), vec!["http://x.test"]);

    handle.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn foreign_copy_is_proposed_and_foregrounds_the_window() {
    let harness = Harness::new(ShellSettings::default());
    let (handle, task) = spawn(&harness, true);
    settle(1).await;

    harness
        .clipboard
        .set(ClipboardPayload::from_text("http://a.test\n\nhttp://b.test"));
    harness.monitor.fire();
    settle(50).await;

    assert_eq!(harness.task_manager.proposals(), vec!["http://a.test\nhttp://b.test"]);
    assert!(harness.window.snapshot(|w| w.visible && w.bring_to_front_count == 1));

    handle.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn self_written_error_report_is_not_ingested() {
    let harness = Harness::new(ShellSettings::default());
    let (handle, task) = spawn(&harness, false);
    settle(1).await;

    handle.report_error("http://looks-like-a-link.test").await.unwrap();
    settle(1).await;
    harness.monitor.fire();
    settle(50).await;

    assert_eq!(harness.clipboard.writes().len(), 1);
    assert!(harness.task_manager.proposals().is_empty());

    handle.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn reactivation_message_shows_the_window_only() {
    let harness = Harness::new(ShellSettings::default());
    let (handle, task) = spawn(&harness, true);

    assert!(handle.native_message(REACTIVATION_MESSAGE).await.unwrap());
    settle(50).await;

    assert!(harness.window.snapshot(|w| w.visible));
    assert!(harness.task_manager.proposals().is_empty());

    handle.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn paste_is_inert_once_the_listener_is_switched_off() {
    let harness = Harness::new(ShellSettings::default());
    let (handle, task) = spawn(&harness, false);
    harness
        .clipboard
        .set(ClipboardPayload::from_text("http://pasted.test"));
    let paste = KeyChord::new(Key::Char('v')).ctrl();

    assert!(handle.key_pressed(paste).await.unwrap());
    settle(20).await;
    assert_eq!(harness.task_manager.proposals(), vec!["http://pasted.test"]);

    handle
        .settings_changed(SettingsChange::ClipboardListener(false))
        .await
        .unwrap();
    assert!(handle.key_pressed(paste).await.unwrap());
    settle(20).await;
    assert_eq!(harness.task_manager.proposals().len(), 1);

    handle.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn dark_switch_with_mica_is_applied_twice() {
    let harness = Harness::new(ShellSettings {
        theme_mode: ThemeMode::System,
        background_effect: BackgroundEffectKind::Mica,
        ..ShellSettings::default()
    });
    let (handle, task) = spawn(&harness, false);
    settle(1).await;

    harness.watcher.publish(ResolvedAppearance::DARK);
    settle(100).await;
    assert_eq!(count(&harness.compositor.calls(), "mica:Standard:true"), 1);

    settle(500).await;
    assert_eq!(count(&harness.compositor.calls(), "mica:Standard:true"), 2);

    handle.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn coalesced_theme_updates_apply_the_latest() {
    let harness = Harness::new(ShellSettings {
        background_effect: BackgroundEffectKind::Acrylic,
        ..ShellSettings::default()
    });
    let (handle, task) = spawn(&harness, false);
    settle(1).await;
    harness.compositor.clear();

    harness.watcher.publish(ResolvedAppearance::DARK);
    harness.watcher.publish(ResolvedAppearance::LIGHT);
    settle(10).await;

    assert_eq!(harness.compositor.calls(), vec!["remove", "acrylic:FFFFFF30"]);

    handle.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_watcher_and_listener() {
    let harness = Harness::new(ShellSettings::default());
    let (handle, task) = spawn(&harness, false);
    settle(1).await;
    assert_eq!(harness.watcher.running(), 1);

    handle.shutdown().await.unwrap();
    task.await.unwrap();

    assert_eq!(harness.watcher.running(), 0);
    assert!(!harness.monitor.running.load(std::sync::atomic::Ordering::SeqCst));
    assert!(handle.show_main_window().await.is_err());
}

#[tokio::test]
async fn runtime_future_can_be_spawned_on_the_multi_thread_pool() {
    let harness = Harness::new(ShellSettings::default());
    let (runtime, handle) = ShellRuntime::new(harness.deps(), options(windows_11()));
    let future = runtime.start(false);
    assert_send(&future);
    drop(future);
    drop(handle);
}

#[tokio::test(start_paused = true)]
async fn late_publish_from_a_stopped_watcher_is_not_applied() {
    let harness = Harness::new(ShellSettings {
        theme_mode: ThemeMode::System,
        background_effect: BackgroundEffectKind::Acrylic,
        ..ShellSettings::default()
    });
    let (handle, task) = spawn(&harness, false);
    settle(1).await;

    harness.watcher.publish(ResolvedAppearance::DARK);
    handle
        .settings_changed(SettingsChange::ThemeMode(ThemeMode::Light))
        .await
        .unwrap();
    handle
        .settings_changed(SettingsChange::ThemeMode(ThemeMode::System))
        .await
        .unwrap();
    settle(10).await;

    assert_eq!(harness.watcher.running(), 1);
    assert_eq!(harness.compositor.calls().last().map(String::as_str), Some("acrylic:FFFFFF30"));

    handle.shutdown().await.unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn dropping_every_handle_stops_the_runtime() {
    let harness = Harness::new(ShellSettings::default());
    let (handle, task) = spawn(&harness, false);
    settle(1).await;
    assert_eq!(harness.watcher.running(), 1);

    drop(handle);
    tokio::time::timeout(Duration::from_secs(1), task)
        .await
        .expect("runtime kept running without handles")
        .unwrap();

    assert_eq!(harness.watcher.running(), 0);
    assert!(!harness.monitor.running.load(std::sync::atomic::Ordering::SeqCst));
}
