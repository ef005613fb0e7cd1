//! Hand-written fakes for every shell port.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gd_app::{ShellDeps, ShellOptions};
use gd_core::ports::*;
use gd_core::{
    ClipboardPayload, EffectCapabilities, OsPlatform, OsVersion, Rect, ResolvedAppearance,
    ShellSettings, Tagged, WidgetTheme,
};

pub const SCREEN: Rect = Rect::new(0, 0, 1920, 1040);

#[derive(Debug, Default)]
pub struct WindowState {
    pub visible: bool,
    pub maximized: bool,
    pub full_screen: bool,
    pub geometry: Option<Rect>,
    pub title: String,
    pub accept_drops: bool,
    pub hidden_buttons: HashSet<CaptionButton>,
    pub transparent: bool,
    pub background: Option<Rgba>,
    pub widget_theme: Option<WidgetTheme>,
    pub flags: WindowFlags,
    pub title_bar_spacing: Option<u32>,
    pub bring_to_front_count: usize,
}

#[derive(Default)]
pub struct FakeWindow {
    pub state: Mutex<WindowState>,
    /// `set_geometry` fails for this rectangle.
    pub reject: Mutex<Option<Rect>>,
}

impl FakeWindow {
    pub fn snapshot<R>(&self, f: impl FnOnce(&WindowState) -> R) -> R {
        f(&self.state.lock().unwrap())
    }
}

impl WindowPort for FakeWindow {
    fn show(&self) {
        self.state.lock().unwrap().visible = true;
    }

    fn hide(&self) {
        self.state.lock().unwrap().visible = false;
    }

    fn is_visible(&self) -> bool {
        self.state.lock().unwrap().visible
    }

    fn bring_to_front(&self) {
        let mut state = self.state.lock().unwrap();
        state.visible = true;
        state.bring_to_front_count += 1;
    }

    fn is_maximized(&self) -> bool {
        self.state.lock().unwrap().maximized
    }

    fn is_full_screen(&self) -> bool {
        self.state.lock().unwrap().full_screen
    }

    fn geometry(&self) -> Rect {
        self.state.lock().unwrap().geometry.unwrap_or(Rect::new(0, 0, 0, 0))
    }

    fn set_geometry(&self, rect: Rect) -> Result<(), WindowError> {
        if *self.reject.lock().unwrap() == Some(rect) {
            return Err(WindowError::Backend("rejected by test".into()));
        }
        self.state.lock().unwrap().geometry = Some(rect);
        Ok(())
    }

    fn available_screen(&self) -> Rect {
        SCREEN
    }

    fn set_title(&self, title: &str) {
        self.state.lock().unwrap().title = title.to_string();
    }

    fn set_accept_drops(&self, accept: bool) {
        self.state.lock().unwrap().accept_drops = accept;
    }

    fn set_caption_button_visible(&self, button: CaptionButton, visible: bool) {
        let mut state = self.state.lock().unwrap();
        if visible {
            state.hidden_buttons.remove(&button);
        } else {
            state.hidden_buttons.insert(button);
        }
    }

    fn set_transparent_background(&self, transparent: bool) {
        self.state.lock().unwrap().transparent = transparent;
    }

    fn is_transparent_background(&self) -> bool {
        self.state.lock().unwrap().transparent
    }

    fn set_background_color(&self, color: Rgba) {
        self.state.lock().unwrap().background = Some(color);
    }

    fn apply_widget_theme(&self, theme: WidgetTheme) {
        self.state.lock().unwrap().widget_theme = Some(theme);
    }

    fn flags(&self) -> WindowFlags {
        self.state.lock().unwrap().flags
    }

    fn set_flags(&self, flags: WindowFlags) {
        self.state.lock().unwrap().flags = flags;
    }

    fn insert_title_bar_spacing(&self, width: u32) {
        self.state.lock().unwrap().title_bar_spacing = Some(width);
    }
}

/// Records every compositor call by name.
#[derive(Default)]
pub struct FakeCompositor {
    pub calls: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

impl FakeCompositor {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::default(),
            fail: AtomicBool::new(true),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: String) -> Result<(), CompositorError> {
        self.calls.lock().unwrap().push(call);
        if self.fail.load(Ordering::SeqCst) {
            Err(CompositorError::CallFailed {
                call: "fake",
                message: "compositor refused".into(),
            })
        } else {
            Ok(())
        }
    }
}

impl CompositorPort for FakeCompositor {
    fn remove_background_effect(&self) -> Result<(), CompositorError> {
        self.record("remove".into())
    }

    fn set_acrylic(&self, tint: Rgba) -> Result<(), CompositorError> {
        self.record(format!("acrylic:{}", tint.to_hex()))
    }

    fn set_mica(&self, is_dark: bool, variant: MicaVariant) -> Result<(), CompositorError> {
        self.record(format!("mica:{variant:?}:{is_dark}"))
    }

    fn set_window_attribute(&self, attribute: u32, value: i32) -> Result<(), CompositorError> {
        self.record(format!("attribute:{attribute}={value}"))
    }

    fn set_aero(&self) -> Result<(), CompositorError> {
        self.record("aero".into())
    }

    fn enable_blur_behind(&self) -> Result<(), CompositorError> {
        self.record("blur_behind".into())
    }

    fn add_window_animation(&self) -> Result<(), CompositorError> {
        self.record("animation".into())
    }

    fn add_shadow(&self) -> Result<(), CompositorError> {
        self.record("shadow".into())
    }
}

pub struct FakeOsTheme {
    pub dark: AtomicBool,
}

impl FakeOsTheme {
    pub fn new(dark: bool) -> Self {
        Self {
            dark: AtomicBool::new(dark),
        }
    }
}

impl OsThemePort for FakeOsTheme {
    fn is_dark(&self) -> Option<bool> {
        Some(self.dark.load(Ordering::SeqCst))
    }
}

/// Counts spawns and stops; keeps the last slot so tests can publish.
#[derive(Default)]
pub struct FakeWatcherFactory {
    pub spawned: Arc<AtomicUsize>,
    pub stopped: Arc<AtomicUsize>,
    pub slot: Mutex<Option<AppearanceSlot>>,
    pub fail: AtomicBool,
}

impl FakeWatcherFactory {
    pub fn running(&self) -> usize {
        self.spawned.load(Ordering::SeqCst) - self.stopped.load(Ordering::SeqCst)
    }

    pub fn publish(&self, appearance: ResolvedAppearance) {
        let slot = self.slot.lock().unwrap();
        slot.as_ref()
            .expect("watcher was never spawned")
            .send_replace(Some(appearance));
    }
}

struct FakeRunningWatcher {
    stopped: Arc<AtomicUsize>,
}

impl RunningThemeWatcher for FakeRunningWatcher {
    fn stop(self: Box<Self>) {
        self.stopped.fetch_add(1, Ordering::SeqCst);
    }
}

impl ThemeWatcherPort for FakeWatcherFactory {
    fn spawn(&self, slot: AppearanceSlot) -> Result<Box<dyn RunningThemeWatcher>, WatcherError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(WatcherError::Spawn("no threads in tests".into()));
        }
        self.spawned.fetch_add(1, Ordering::SeqCst);
        *self.slot.lock().unwrap() = Some(slot);
        Ok(Box::new(FakeRunningWatcher {
            stopped: self.stopped.clone(),
        }))
    }
}

/// In-memory clipboard that stores the origin marker next to the text,
/// the way the real adapter does.
#[derive(Default)]
pub struct FakeClipboard {
    pub payload: Mutex<ClipboardPayload>,
    pub writes: Mutex<Vec<Tagged<String>>>,
    pub fail_reads: AtomicBool,
}

impl FakeClipboard {
    pub fn set(&self, payload: ClipboardPayload) {
        *self.payload.lock().unwrap() = payload;
    }

    pub fn writes(&self) -> Vec<Tagged<String>> {
        self.writes.lock().unwrap().clone()
    }
}

impl SystemClipboardPort for FakeClipboard {
    fn read(&self) -> Result<ClipboardPayload, ClipboardError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ClipboardError::Read("locked by another process".into()));
        }
        Ok(self.payload.lock().unwrap().clone())
    }

    fn write_text(&self, content: Tagged<String>) -> Result<(), ClipboardError> {
        self.set(ClipboardPayload::from_text(content.value.clone()).with_origin(content.origin.clone()));
        self.writes.lock().unwrap().push(content);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeMonitor {
    pub running: AtomicBool,
    pub sink: Mutex<Option<ChangeSink>>,
    pub starts: AtomicUsize,
}

impl FakeMonitor {
    /// Simulate an OS clipboard notification.
    pub fn fire(&self) {
        let sink = self.sink.lock().unwrap().clone();
        if let Some(sink) = sink {
            sink();
        }
    }
}

impl ClipboardMonitorPort for FakeMonitor {
    fn start(&self, sink: ChangeSink) -> Result<(), ClipboardError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        *self.sink.lock().unwrap() = Some(sink);
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) {
        self.sink.lock().unwrap().take();
        self.running.store(false, Ordering::SeqCst);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Accepts lines that start with `http`.
pub struct PrefixValidator;

#[async_trait]
impl LinkValidatorPort for PrefixValidator {
    async fn validate(&self, candidate: &str) -> anyhow::Result<bool> {
        Ok(candidate.starts_with("http"))
    }
}

#[derive(Default)]
pub struct RecordingTaskManager {
    pub proposals: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

impl RecordingTaskManager {
    pub fn proposals(&self) -> Vec<String> {
        self.proposals.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskManagerPort for RecordingTaskManager {
    async fn propose_task(&self, candidate_text: String, _headers: Headers) -> anyhow::Result<()> {
        self.proposals.lock().unwrap().push(candidate_text);
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("add-task dialog crashed");
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySettings {
    pub current: Mutex<ShellSettings>,
    pub saves: AtomicUsize,
}

impl MemorySettings {
    pub fn with(settings: ShellSettings) -> Self {
        Self {
            current: Mutex::new(settings),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn current(&self) -> ShellSettings {
        self.current.lock().unwrap().clone()
    }
}

#[async_trait]
impl SettingsPort for MemorySettings {
    async fn load(&self) -> anyhow::Result<ShellSettings> {
        Ok(self.current())
    }

    async fn save(&self, settings: &ShellSettings) -> anyhow::Result<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.current.lock().unwrap() = settings.clone();
        Ok(())
    }
}

pub struct FakeDialog {
    pub answer: bool,
    pub shown: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl DialogPort for FakeDialog {
    async fn confirm(&self, title: &str, content: &str) -> bool {
        self.shown
            .lock()
            .unwrap()
            .push((title.to_string(), content.to_string()));
        self.answer
    }
}

#[derive(Default)]
pub struct FakeOpener {
    pub opened: Mutex<Vec<String>>,
}

impl OpenerPort for FakeOpener {
    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct Counter(pub AtomicUsize);

impl Counter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

impl TrayPort for Counter {
    fn show(&self) {
        self.bump();
    }
}

impl SplashPort for Counter {
    fn finish(&self) {
        self.bump();
    }
}

#[async_trait]
impl UpdateCheckerPort for Counter {
    async fn check_for_update(&self) -> anyhow::Result<()> {
        self.bump();
        Ok(())
    }
}

/// All fakes wired for one shell.
pub struct Harness {
    pub window: Arc<FakeWindow>,
    pub compositor: Arc<FakeCompositor>,
    pub os_theme: Arc<FakeOsTheme>,
    pub watcher: Arc<FakeWatcherFactory>,
    pub clipboard: Arc<FakeClipboard>,
    pub monitor: Arc<FakeMonitor>,
    pub task_manager: Arc<RecordingTaskManager>,
    pub settings: Arc<MemorySettings>,
    pub dialog: Arc<FakeDialog>,
    pub opener: Arc<FakeOpener>,
    pub tray: Arc<Counter>,
    pub splash: Arc<Counter>,
    pub updater: Arc<Counter>,
}

/// Route shell logs to the test writer; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

impl Harness {
    pub fn new(settings: ShellSettings) -> Self {
        init_tracing();
        Self {
            window: Arc::default(),
            compositor: Arc::default(),
            os_theme: Arc::new(FakeOsTheme::new(false)),
            watcher: Arc::default(),
            clipboard: Arc::default(),
            monitor: Arc::default(),
            task_manager: Arc::default(),
            settings: Arc::new(MemorySettings::with(settings)),
            dialog: Arc::new(FakeDialog {
                answer: true,
                shown: Mutex::default(),
            }),
            opener: Arc::default(),
            tray: Arc::default(),
            splash: Arc::default(),
            updater: Arc::default(),
        }
    }

    pub fn deps(&self) -> ShellDeps {
        ShellDeps {
            window: self.window.clone(),
            compositor: self.compositor.clone(),
            os_theme: self.os_theme.clone(),
            theme_watcher: self.watcher.clone(),
            clipboard: self.clipboard.clone(),
            clipboard_monitor: self.monitor.clone(),
            link_validator: Arc::new(PrefixValidator),
            task_manager: self.task_manager.clone(),
            settings: self.settings.clone(),
            dialog: self.dialog.clone(),
            opener: self.opener.clone(),
            tray: self.tray.clone(),
            splash: self.splash.clone(),
            update_checker: self.updater.clone(),
        }
    }
}

pub fn windows_11() -> EffectCapabilities {
    EffectCapabilities::for_os(OsVersion::windows(10, 0, 22631))
}

pub fn windows_7() -> EffectCapabilities {
    EffectCapabilities::for_os(OsVersion::windows(6, 1, 7601))
}

pub fn linux() -> EffectCapabilities {
    EffectCapabilities::for_os(OsVersion::other(OsPlatform::Linux))
}

pub fn options(capabilities: EffectCapabilities) -> ShellOptions {
    ShellOptions::new(capabilities.os().platform, capabilities)
}
