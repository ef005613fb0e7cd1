//! Shell runtime: the single task that owns the controller.
//!
//! Drains window events, self-scheduled commands and the theme watcher's
//! appearance slot. Nothing else touches the window.

use gd_core::{DropPayload, DropVerdict, KeyChord, ResolvedAppearance, SettingsChange};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

use crate::deps::{ShellDeps, ShellOptions};
use crate::events::{ShellCommand, ShellEvent};
use crate::shell::{ShellController, ShellError};

pub struct ShellRuntime {
    controller: ShellController,
    event_rx: mpsc::Receiver<ShellEvent>,
    command_rx: mpsc::Receiver<ShellCommand>,
    appearance_rx: watch::Receiver<Option<ResolvedAppearance>>,
    shutting_down: bool,
}

impl ShellRuntime {
    pub fn new(deps: ShellDeps, options: ShellOptions) -> (Self, ShellHandle) {
        let capacity = options.event_capacity.max(1);
        let (event_tx, event_rx) = mpsc::channel(capacity);
        let (command_tx, command_rx) = mpsc::channel(capacity);
        let (appearance_slot, appearance_rx) = watch::channel(None);

        let controller = ShellController::new(deps, options, event_tx.clone(), command_tx, appearance_slot);

        let runtime = Self {
            controller,
            event_rx,
            command_rx,
            appearance_rx,
            shutting_down: false,
        };
        (runtime, ShellHandle { events: event_tx })
    }

    /// Run the startup sequence, then the event loop until [`ShellEvent::Shutdown`]
    /// or until every [`ShellHandle`] is dropped.
    pub async fn start(mut self, silent: bool) {
        self.controller.start(silent).await;

        while !self.shutting_down {
            tokio::select! {
                event = self.event_rx.recv() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => {
                        info!("All shell handles dropped");
                        break;
                    }
                },
                Some(command) = self.command_rx.recv() => {
                    self.handle_command(command).await;
                }
                Ok(()) = self.appearance_rx.changed() => {
                    // Only the latest value matters; intermediate ones are coalesced.
                    let latest = *self.appearance_rx.borrow_and_update();
                    if let Some(appearance) = latest {
                        self.controller.on_os_theme_changed(appearance);
                    }
                }
            }
        }

        self.controller.shutdown();
        info!("Shell runtime stopped");
    }

    async fn handle_event(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::ClipboardChanged => self.controller.on_clipboard_changed().await,
            ShellEvent::DragEnter { payload, reply } => {
                let verdict = self.controller.on_drag_enter(&payload);
                if let Some(reply) = reply {
                    let _ = reply.send(verdict);
                }
            }
            ShellEvent::Drop { payload } => self.controller.on_drop(&payload),
            ShellEvent::KeyPressed { chord, reply } => {
                let handled = self.controller.on_key_pressed(&chord);
                if let Some(reply) = reply {
                    let _ = reply.send(handled);
                }
            }
            ShellEvent::NativeMessage { code, reply } => {
                let handled = self.controller.on_native_message(code);
                if let Some(reply) = reply {
                    let _ = reply.send(handled);
                }
            }
            ShellEvent::CloseRequested => self.controller.close_requested().await,
            ShellEvent::ShowMainWindow => self.controller.show_main_window(),
            ShellEvent::SettingsChanged(change) => self.controller.on_settings_changed(change),
            ShellEvent::AppError { message } => self.controller.on_app_error(&message).await,
            ShellEvent::Shutdown => {
                info!("Shell runtime shutting down");
                self.shutting_down = true;
            }
        }
    }

    async fn handle_command(&mut self, command: ShellCommand) {
        debug!(?command, "Deferred command");
        match command {
            ShellCommand::ProposeTask(request) => self.controller.propose_task(request).await,
            ShellCommand::ReapplyEffect => self.controller.reapply_effect(),
        }
    }
}

/// Cloneable sender side of the shell runtime.
#[derive(Clone)]
pub struct ShellHandle {
    events: mpsc::Sender<ShellEvent>,
}

impl ShellHandle {
    pub async fn send(&self, event: ShellEvent) -> Result<(), ShellError> {
        self.events
            .send(event)
            .await
            .map_err(|_| ShellError::RuntimeClosed)
    }

    pub async fn drag_enter(&self, payload: DropPayload) -> Result<DropVerdict, ShellError> {
        let (reply, rx) = oneshot::channel();
        self.send(ShellEvent::DragEnter {
            payload,
            reply: Some(reply),
        })
        .await?;
        rx.await.map_err(|_| ShellError::RuntimeClosed)
    }

    pub async fn drop_payload(&self, payload: DropPayload) -> Result<(), ShellError> {
        self.send(ShellEvent::Drop { payload }).await
    }

    /// Whether the shell consumed the key press.
    pub async fn key_pressed(&self, chord: KeyChord) -> Result<bool, ShellError> {
        let (reply, rx) = oneshot::channel();
        self.send(ShellEvent::KeyPressed {
            chord,
            reply: Some(reply),
        })
        .await?;
        rx.await.map_err(|_| ShellError::RuntimeClosed)
    }

    /// Whether the native message was handled.
    pub async fn native_message(&self, code: u32) -> Result<bool, ShellError> {
        let (reply, rx) = oneshot::channel();
        self.send(ShellEvent::NativeMessage {
            code,
            reply: Some(reply),
        })
        .await?;
        rx.await.map_err(|_| ShellError::RuntimeClosed)
    }

    pub async fn close_requested(&self) -> Result<(), ShellError> {
        self.send(ShellEvent::CloseRequested).await
    }

    pub async fn show_main_window(&self) -> Result<(), ShellError> {
        self.send(ShellEvent::ShowMainWindow).await
    }

    pub async fn settings_changed(&self, change: SettingsChange) -> Result<(), ShellError> {
        self.send(ShellEvent::SettingsChanged(change)).await
    }

    pub async fn report_error(&self, message: impl Into<String>) -> Result<(), ShellError> {
        self.send(ShellEvent::AppError {
            message: message.into(),
        })
        .await
    }

    pub async fn clipboard_changed(&self) -> Result<(), ShellError> {
        self.send(ShellEvent::ClipboardChanged).await
    }

    pub async fn shutdown(&self) -> Result<(), ShellError> {
        self.send(ShellEvent::Shutdown).await
    }
}
