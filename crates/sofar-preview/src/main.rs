//! sofar-preview - open an effect editor outside a plugin host.
//!
//! Instantiates one editor against the headless or native backend, applies
//! host parameter pushes, drives the idle loop for a number of frames and
//! logs what happened.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use sofar_plugin::host::{self, HEADLESS_BACKEND};
use sofar_plugin::{PANELS, native, panels};
use sofar_ui::{FLOAT_PROTOCOL, HeadlessProbe, UiConfig, UiContext};

/// Idle interval for native windows, roughly 60 Hz.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendArg {
    /// In-memory backend, no display needed
    Headless,
    /// baseview window on the desktop
    Native,
}

/// Preview a sofar effect editor.
#[derive(Parser, Debug)]
#[command(name = "sofar-preview")]
#[command(author, version, about = "Preview a sofar effect editor", long_about = None)]
struct Args {
    /// Editor to open (eq4bp, bitcrusher)
    #[arg(long, default_value = "eq4bp")]
    panel: String,

    /// Backend to open the editor with
    #[arg(long, value_enum, default_value = "headless")]
    backend: BackendArg,

    /// Number of idle cycles to run
    #[arg(long, default_value = "60")]
    frames: u32,

    /// Host parameter push applied before the first frame (INDEX=VALUE)
    #[arg(long = "push", value_parser = parse_push)]
    pushes: Vec<(u32, f32)>,

    /// TOML configuration file (defaults to $SOFAR_UI_CONFIG, then built-ins)
    #[arg(long)]
    config: Option<PathBuf>,

    /// List the available editors and exit
    #[arg(long)]
    list: bool,
}

/// Parse an `INDEX=VALUE` pair for clap's `value_parser`.
fn parse_push(s: &str) -> Result<(u32, f32), String> {
    let (index, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid push '{s}' (expected INDEX=VALUE)"))?;
    let index = index
        .trim()
        .parse()
        .map_err(|_| format!("invalid port index '{index}'"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid value '{value}'"))?;
    Ok((index, value))
}

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    tracing_log::LogTracer::init().ok();

    let args = Args::parse();

    if args.list {
        for panel in PANELS {
            println!("{:<12} {}", panel.name, panel.uri);
        }
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => UiConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => UiConfig::from_env().context("loading config from environment")?,
    };

    let descriptor = panels::find_by_name(&args.panel).with_context(|| {
        let names: Vec<&str> = PANELS.iter().map(|p| p.name).collect();
        format!("unknown panel '{}' (available: {})", args.panel, names.join(", "))
    })?;

    let ctx = UiContext::new(config);
    let probe = HeadlessProbe::new();
    let backend = match args.backend {
        BackendArg::Headless => {
            ctx.select_backend(probe.selection())?;
            HEADLESS_BACKEND
        }
        BackendArg::Native => native::NAME,
    };

    let uri = descriptor.ui_uri(backend);
    let write = Box::new(|port: sofar_ui::ParamIndex, value: f32| {
        tracing::info!(port = %port, value, "notify host");
    });
    let mut editor = host::try_instantiate(&ctx, &uri, write, [])
        .with_context(|| format!("instantiating {uri}"))?;

    let size = editor.size();
    tracing::info!(
        panel = descriptor.name,
        width = size.width,
        height = size.height,
        widget = ?editor.widget(),
        "editor open"
    );

    for &(index, value) in &args.pushes {
        editor.port_event(index, 4, FLOAT_PROTOCOL, &value.to_ne_bytes());
    }

    let mut presented = 0u32;
    for _ in 0..args.frames {
        if editor.update() {
            presented += 1;
        }
        if args.backend == BackendArg::Native {
            std::thread::sleep(FRAME_INTERVAL);
        }
    }

    if args.backend == BackendArg::Headless {
        if let Some(frame) = probe.last_frame(editor.window().key()) {
            tracing::debug!(texts = ?frame.texts(), "last frame");
        }
    }
    tracing::info!(frames = presented, idle_cycles = args.frames, "done");

    editor.cleanup();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_parses_index_and_value() {
        assert_eq!(parse_push("6=-3.5"), Ok((6, -3.5)));
        assert_eq!(parse_push(" 0 = 2 "), Ok((0, 2.0)));
    }

    #[test]
    fn push_rejects_malformed_input() {
        assert!(parse_push("6").is_err());
        assert!(parse_push("x=1").is_err());
        assert!(parse_push("1=loud").is_err());
    }

    #[test]
    fn args_parse() {
        let args = Args::parse_from([
            "sofar-preview",
            "--panel",
            "bitcrusher",
            "--frames",
            "3",
            "--push",
            "1=8",
            "--push",
            "0=2",
        ]);
        assert_eq!(args.backend, BackendArg::Headless);
        assert_eq!(args.pushes, [(1, 8.0), (0, 2.0)]);
        assert_eq!(args.frames, 3);
    }
}
