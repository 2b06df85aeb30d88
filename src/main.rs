//! Chat Arena entry point
//!
//! Headless native runner: chat lines (`username: message`) arrive on stdin,
//! the arena steps on its fixed period, and snapshots for a renderer are
//! written to stdout as JSON lines.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

use clap::Parser;
use serde::Serialize;

use chat_arena::scoreboard::ScoreEntry;
use chat_arena::sim::{ArenaEvent, EntityView};
use chat_arena::{ArenaConfig, ArenaMode, ArenaRunner, ChatEvent, logging};

/// Chat-driven team arena simulation
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Options {
    /// JSON config file; missing fields fall back to the mode preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Arena mode (roster or chat), overriding the config file
    #[arg(short, long, value_parser = parse_mode)]
    mode: Option<ArenaMode>,

    /// Emit a snapshot every N steps (0 = never)
    #[arg(short, long, default_value_t = 20)]
    snapshot_every: u64,

    /// Stop after this many steps
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_mode(value: &str) -> Result<ArenaMode, String> {
    ArenaMode::from_str(value).ok_or_else(|| format!("unknown mode {:?} (expected roster or chat)", value))
}

/// One JSON line on stdout
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
enum Output<'a> {
    Snapshot {
        tick: u64,
        entities: &'a [EntityView],
    },
    Kill(&'a ArenaEvent),
    Leaders(&'a [ScoreEntry]),
}

/// Write one output line; `false` once the sink is closed
fn emit(out: &mut impl Write, output: &Output<'_>) -> bool {
    let json = match serde_json::to_string(output) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Output serialization failed: {}", e);
            return true;
        }
    };
    writeln!(out, "{}", json).and_then(|_| out.flush()).is_ok()
}

fn load_config(options: &Options) -> Result<ArenaConfig, chat_arena::ConfigError> {
    let mut config = match &options.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };
    if let Some(mode) = options.mode {
        config.apply_mode(mode);
    }
    config.validate()?;
    Ok(config)
}

/// Read chat lines on a separate thread; the arena only sees them through
/// the channel, so every mutation stays on the main thread.
fn spawn_chat_reader() -> Receiver<ChatEvent> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::error!("stdin read failed: {}", e);
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match ChatEvent::parse_line(&line) {
                Ok(event) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => log::warn!("Dropping chat line {:?}: {}", line, e),
            }
        }
        log::info!("Chat source disconnected");
    });
    rx
}

fn main() -> ExitCode {
    let options = Options::parse();
    logging::init(options.verbose);

    let config = match load_config(&options) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "Chat Arena starting ({} mode, {}x{}, radius {}, seed {})",
        config.mode.as_str(),
        config.width,
        config.height,
        config.engagement_radius,
        config.seed
    );

    let mut runner = match ArenaRunner::new(config) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let chat = spawn_chat_reader();
    let mut chat_open = true;
    let mut last = Instant::now();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    loop {
        while chat_open {
            match chat.try_recv() {
                Ok(event) => runner.submit(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => chat_open = false,
            }
        }

        let now = Instant::now();
        let report = runner.advance(now - last);
        last = now;

        if !report.events.iter().all(|event| emit(&mut out, &Output::Kill(event))) {
            log::info!("Output sink closed");
            break;
        }

        let ticks = runner.state().time_ticks;
        if report.steps > 0 && options.snapshot_every > 0 {
            let emitted_before = (ticks - u64::from(report.steps)) / options.snapshot_every;
            if ticks / options.snapshot_every > emitted_before {
                let entities = runner.state().snapshot();
                if !emit(&mut out, &Output::Snapshot { tick: ticks, entities: &entities }) {
                    log::info!("Output sink closed");
                    break;
                }
            }
        }

        if options.ticks.is_some_and(|max| ticks >= max) {
            break;
        }
        // A chat arena has nothing left to drive it once the source closes
        let chat_mode = runner.state().config.mode == ArenaMode::Chat;
        if !chat_open && chat_mode && options.ticks.is_none() {
            break;
        }

        std::thread::sleep(runner.period().min(Duration::from_millis(10)));
    }

    if runner.scoreboard().is_empty() {
        log::info!("No kills recorded");
    } else {
        let leaders = runner.scoreboard().leaders(5);
        for entry in &leaders {
            log::info!("{}: {} kills, {} deaths", entry.name, entry.kills, entry.deaths);
        }
        emit(&mut out, &Output::Leaders(&leaders));
    }
    ExitCode::SUCCESS
}
