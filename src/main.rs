use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use gd_app::{ClipboardIngestionPipeline, ShellRuntime};
use gd_core::ports::OsThemePort;
use gd_core::{EffectCapabilities, OsPlatform, OsVersion};
use gd_platform::{detect_os_version, DarkLightProbe, HeadlessWindow, NoopCompositor};
use ghost_shell_lib::adapters::{
    ConsoleDialog, ConsoleTaskManager, LoggingSplash, LoggingTray, LoggingUpdateChecker,
};
use ghost_shell_lib::bootstrap::wiring::{create_clipboard_layer, create_link_validator};
use ghost_shell_lib::bootstrap::{self, Collaborators, ShellConfig, WindowLayer};

/// Exercise the shell's OS integrations without a GUI.
#[derive(Parser)]
#[command(name = "shell-probe", version, about)]
struct Cli {
    /// Bootstrap TOML; a missing file means defaults
    #[arg(short, long, default_value = "ghost-shell.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the shell headless and print every proposed task until Ctrl+C
    Watch {
        /// Keep the (headless) window hidden at startup
        #[arg(long)]
        silent: bool,
    },
    /// Print the detected OS appearance and effect capabilities
    Theme,
    /// Write self-tagged text to the clipboard and check it is ignored
    Copy { text: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = bootstrap::load_config(&cli.config)?;
    bootstrap::tracing::init_tracing_subscriber(config.resolved_log_dir().as_deref())?;

    match cli.command {
        Command::Watch { silent } => watch(&config, silent).await,
        Command::Theme => {
            print_theme();
            Ok(())
        }
        Command::Copy { text } => copy(&config, text).await,
    }
}

async fn watch(config: &ShellConfig, silent: bool) -> anyhow::Result<()> {
    // No native window: report the platform family only so no compositor call is attempted.
    let window_layer = WindowLayer {
        window: Arc::new(HeadlessWindow::new()),
        compositor: Arc::new(NoopCompositor),
        capabilities: EffectCapabilities::for_os(OsVersion::other(OsPlatform::current())),
    };
    let collaborators = Collaborators {
        task_manager: Arc::new(ConsoleTaskManager),
        dialog: Arc::new(ConsoleDialog),
        tray: Arc::new(LoggingTray),
        splash: Arc::new(LoggingSplash),
        update_checker: Arc::new(LoggingUpdateChecker),
    };
    let (deps, options) = bootstrap::wire_dependencies(config, window_layer, collaborators)?;

    let (runtime, handle) = ShellRuntime::new(deps, options);
    let task = tokio::spawn(runtime.start(silent));
    println!("watching clipboard, press Ctrl+C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;
    handle.shutdown().await?;
    task.await.context("shell runtime panicked")?;
    Ok(())
}

fn print_theme() {
    let appearance = match DarkLightProbe.is_dark() {
        Some(true) => "dark",
        Some(false) => "light",
        None => "unspecified",
    };
    let os = detect_os_version();
    let capabilities = EffectCapabilities::for_os(os);

    println!("OS appearance: {appearance}");
    println!(
        "OS version:    {:?} {}.{} build {}",
        os.platform, os.major, os.minor, os.build
    );
    let supported: Vec<&str> = capabilities.supported().iter().map(|e| e.as_str()).collect();
    println!("effects:       {}", supported.join(", "));
    println!(
        "frameless decorations: {}, hide caption buttons for Aero: {}",
        capabilities.frameless_decorations(),
        capabilities.hides_caption_buttons_for_aero()
    );
}

async fn copy(config: &ShellConfig, text: String) -> anyhow::Result<()> {
    let (clipboard, monitor) = create_clipboard_layer()?;
    let pipeline = ClipboardIngestionPipeline::new(clipboard, monitor, create_link_validator(config));

    pipeline.write_tagged(text)?;
    match pipeline.handle_change().await {
        None => println!("ok: self-tagged write was ignored"),
        Some(request) => anyhow::bail!("self-tagged write was ingested: {:?}", request.raw_text),
    }
    Ok(())
}
