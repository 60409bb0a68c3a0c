//! `vigil-cli` – Vigil Command Line Interface
//!
//! Drives the hero-banner animations headlessly in a terminal.  It:
//!
//! 1. Initialises logging (see [`vigil_runtime::telemetry`]).
//! 2. Reads `~/.vigil/config.toml` once, plus `VIGIL_*` overrides.
//! 3. Drops the user into an **interactive REPL** with slash-commands
//!    (`/run`, `/presets`, `/theme`, `/help`, ...).
//! 4. Intercepts **Ctrl-C** to stop a running scene and exit cleanly.

mod config;
mod repl;
mod terminal;

use colored::Colorize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;

fn main() {
    // Hold the guard until exit so pending spans are flushed.
    let _telemetry = vigil_runtime::init_tracing("vigil-cli");

    // ── Preferences ───────────────────────────────────────────────────────
    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            println!("{}: {}", "Config error".red(), e);
            println!("  Using default configuration.");
            config::Config::default()
        }
    };

    print_banner(&cfg);

    // ── Shared shutdown flag ──────────────────────────────────────────────
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        println!();
        println!("{}", "⚠  Ctrl-C received – stopping …".yellow().bold());
        shutdown_clone.store(true, Ordering::SeqCst);
    }) {
        warn!(error = %e, "Failed to install Ctrl-C handler; scenes must run to their frame limit");
    }

    // ── Frame loop runtime ────────────────────────────────────────────────
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("{}: {}", "Failed to start runtime".red(), e);
            return;
        }
    };

    println!(
        "  Type {} for a list of commands.\n",
        terminal::accent(cfg.theme, "/help")
    );

    // ── Interactive REPL ──────────────────────────────────────────────────
    repl::run(cfg, &rt, shutdown);
}

// ─────────────────────────────────────────────────────────────────────────────
// Banner
// ─────────────────────────────────────────────────────────────────────────────

fn print_banner(cfg: &config::Config) {
    let t = cfg.theme;
    println!();
    println!("{}", terminal::accent(t, r#" _   __ _       _  __"#));
    println!("{}", terminal::accent(t, r#"| | / /(_)___ _(_)/ /"#));
    println!("{}", terminal::accent(t, r#"| |/ // // _ `/ // / "#));
    println!("{}", terminal::accent(t, r#"|___//_/ \_, /_//_/  "#));
    println!("{}", terminal::accent(t, r#"        /___/        "#));
    println!();
    println!(
        "  {} {}",
        "Vigil".bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("  Detection-sweep hero animations");
    println!(
        "  {}",
        terminal::muted(
            t,
            &format!("theme {} · scene {} · config {}", cfg.theme, cfg.preset, config::config_path().display())
        )
    );
    println!();
}
