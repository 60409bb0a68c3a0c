//! REPL – Read-Eval-Print Loop for the Vigil shell.
//!
//! Supported slash-commands:
//!   /help                    – show this list
//!   /presets                 – list the sweep scenes
//!   /run [preset] [frames]   – drive a scene in the terminal
//!   /theme                   – toggle dark/light and save it
//!   /typewriter [seconds]    – play the headline typewriter
//!   /gradient [frames] [WxH] – show the background palette after N frames
//!   /carousel [seconds]      – trace the testimonial columns
//!   /orbit <x> <y> [frames]  – ease the hero camera toward a pointer position
//!   /schema                  – print the JSON Schema of a scene config
//!   /quit | /exit            – exit the shell

use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::runtime::Runtime;
use vigil_runtime::carousel::{Carousel, TICK_SECS};
use vigil_runtime::clock::{Clock, SystemClock};
use vigil_runtime::gradient::{ColorStop, GradientField};
use vigil_runtime::orbit::CameraOrbit;
use vigil_runtime::typewriter::{DEFAULT_WAIT, Typewriter, TypewriterSet};
use vigil_runtime::{SceneDriver, SweepAnimator, SweepConfig, presets};
use vigil_scene::sim::{SimAssetLoader, SimDecorationFactory};
use vigil_scene::{Primitive, load_or_fallback};

use crate::config::{self, Config};
use crate::terminal::{TerminalStage, accent, muted};

const HEADLINES: [&str; 3] = [
    "Perception pipelines",
    "Real-time detection",
    "Robotics software",
];

const CARD_HEIGHTS: [f32; 5] = [180.0, 220.0, 160.0, 200.0, 240.0];

/// Viewport assumed by `/gradient` and `/orbit` unless one is given.
const VIEWPORT: (u32, u32) = (1280, 720);

/// Entry point for the interactive REPL.
///
/// `shutdown` is polled each iteration; when set the REPL exits cleanly.
pub fn run(mut cfg: Config, rt: &Runtime, shutdown: Arc<AtomicBool>) {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }

        print!("{} ", accent(cfg.theme, "vigil>"));
        stdout.flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("{}: {}", "Read error".red(), e);
                break;
            }
        }

        let mut words = line.split_whitespace();
        let Some(cmd) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();

        match cmd {
            "/help" => cmd_help(&cfg),
            "/presets" => cmd_presets(&cfg),
            "/run" => cmd_run(&args, &cfg, rt, &shutdown),
            "/theme" => cmd_theme(&mut cfg),
            "/typewriter" => cmd_typewriter(&args, &cfg, rt, &shutdown),
            "/gradient" => cmd_gradient(&args, &cfg),
            "/carousel" => cmd_carousel(&args, &cfg),
            "/orbit" => cmd_orbit(&args, &cfg),
            "/schema" => cmd_schema(),
            "/quit" | "/exit" => {
                println!("{}", "Goodbye.".green());
                shutdown.store(true, Ordering::SeqCst);
                break;
            }
            other => {
                println!(
                    "{} '{}'. Type {} for available commands.",
                    "Unknown command:".red(),
                    other.yellow(),
                    "/help".bold()
                );
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Command handlers
// ─────────────────────────────────────────────────────────────────────────────

fn cmd_help(cfg: &Config) {
    let t = cfg.theme;
    println!();
    println!("{}", "Vigil Commands".bold().underline());
    println!("  {}                 – list the sweep scenes", accent(t, "/presets"));
    println!("  {}  – drive a scene (Ctrl-C stops it)", accent(t, "/run [preset] [frames]"));
    println!("  {}                   – toggle dark/light theme", accent(t, "/theme"));
    println!("  {}    – play the headline typewriter", accent(t, "/typewriter [secs]"));
    println!("  {} – background palette after N frames", accent(t, "/gradient [frames] [WxH]"));
    println!("  {}      – trace the testimonial columns", accent(t, "/carousel [secs]"));
    println!("  {}  – ease the camera toward a pointer", accent(t, "/orbit <x> <y> [frames]"));
    println!("  {}                  – JSON Schema of a scene config", accent(t, "/schema"));
    println!("  {}            – exit the shell", accent(t, "/quit  /exit"));
    println!();
}

fn cmd_presets(cfg: &Config) {
    println!("{}", "Scenes".bold().underline());
    for scene in presets::all() {
        let marker = if scene.name == cfg.preset { "▶" } else { " " };
        println!(
            "  {} {:<12} {}",
            marker.green(),
            scene.name.bold(),
            muted(
                cfg.theme,
                &format!(
                    "pool {:>2}  fov ±{:>4.1}°  range {:>4.1}  dwell {} ms",
                    scene.pool_size, scene.half_angle_deg, scene.max_range, scene.dwell_ms
                )
            )
        );
    }
}

fn cmd_run(args: &[&str], cfg: &Config, rt: &Runtime, shutdown: &Arc<AtomicBool>) {
    let (preset, frames) = match parse_run_args(args, cfg) {
        Ok(parsed) => parsed,
        Err(e) => {
            println!("{} {}", "Usage error:".red(), e);
            return;
        }
    };
    let Some(scene) = presets::by_name(&preset) else {
        println!("{} '{}'. Try {}.", "Unknown scene".red(), preset.yellow(), "/presets".bold());
        return;
    };

    let sweep = match build_sweep(scene, cfg.seed) {
        Ok(sweep) => sweep,
        Err(e) => {
            println!("{}: {}", "Scene error".red(), e);
            return;
        }
    };

    println!(
        "  {} {} {}",
        "Running".green().bold(),
        preset.bold(),
        muted(
            cfg.theme,
            &match frames {
                Some(n) => format!("for {n} frames at {} Hz", cfg.frame_rate_hz),
                None => format!("at {} Hz until Ctrl-C", cfg.frame_rate_hz),
            }
        )
    );

    let stage = TerminalStage::new(io::stdout(), cfg.theme);
    let mut driver = SceneDriver::new(sweep, Box::new(stage), Box::new(SystemClock::new()));
    let mut replaced = 0usize;
    let summary = rt.block_on(driver.run(
        frames,
        cfg.frame_interval(),
        Arc::clone(shutdown),
        |report| replaced += report.replaced.len(),
    ));
    drop(driver);

    println!();
    println!(
        "  {} {} frames, {} detections, {} replacements{}",
        "✓".green().bold(),
        summary.frames,
        summary.detections,
        replaced,
        if summary.interrupted { " (interrupted)" } else { "" }
    );
}

fn cmd_theme(cfg: &mut Config) {
    cfg.theme = cfg.theme.toggled();
    match config::save(cfg) {
        Ok(()) => println!("{} {}", "✓ Theme set to".green(), accent(cfg.theme, &cfg.theme.to_string())),
        Err(e) => println!("{}: {}", "Error saving config".red(), e),
    }
}

fn cmd_typewriter(args: &[&str], cfg: &Config, rt: &Runtime, shutdown: &Arc<AtomicBool>) {
    let seconds = match parse_count(args.first(), 8) {
        Ok(n) => n,
        Err(e) => {
            println!("{} {}", "Usage error:".red(), e);
            return;
        }
    };
    let Some(writer) = Typewriter::new(HEADLINES, DEFAULT_WAIT) else {
        return;
    };
    let mut set = TypewriterSet::new();
    let clock = SystemClock::new();
    let id = set.add(writer, clock.now());
    let theme = cfg.theme;

    rt.block_on(async {
        let mut interval = tokio::time::interval(Duration::from_millis(25));
        let end = Duration::from_secs(seconds);
        while clock.now() < end && !shutdown.load(Ordering::SeqCst) {
            interval.tick().await;
            if set.poll(clock.now()).contains(&id)
                && let Some(tw) = set.get(id)
            {
                print!("\r\x1b[2K  {}{}", accent(theme, &tw.text()), "▌".dimmed());
                io::stdout().flush().ok();
            }
        }
    });
    println!();
}

fn cmd_gradient(args: &[&str], cfg: &Config) {
    let frames = match parse_count(args.first(), 0) {
        Ok(n) => n,
        Err(e) => {
            println!("{} {}", "Usage error:".red(), e);
            return;
        }
    };
    let Some(mut field) = GradientField::new(VIEWPORT.0, VIEWPORT.1) else {
        return;
    };
    if let Some(arg) = args.get(1) {
        let resized = parse_viewport(arg).map(|(w, h)| field.resize(w, h));
        if resized != Ok(true) {
            println!("{} '{arg}' is not a non-empty WIDTHxHEIGHT", "Usage error:".red());
            return;
        }
    }
    for _ in 0..frames {
        field.advance();
    }
    let frame = field.frame();
    let (cw, ch) = field.canvas_size();
    println!(
        "{} {}",
        "Background".bold().underline(),
        muted(
            cfg.theme,
            &format!(
                "canvas {cw}×{ch}, buffer {}×{}, t = {:.5}",
                frame.buffer.0,
                frame.buffer.1,
                field.time()
            )
        )
    );
    for (i, g) in frame.linear.iter().enumerate() {
        println!("  linear {i}  {}", swatches(&g.stops));
    }
    println!(
        "  radial    {}  r = {:.1} at ({:.1}, {:.1})",
        swatches(&frame.radial.stops),
        frame.radial.radius,
        frame.radial.centre.0,
        frame.radial.centre.1
    );
}

fn cmd_carousel(args: &[&str], cfg: &Config) {
    let seconds = match parse_count(args.first(), 5) {
        Ok(n) => n,
        Err(e) => {
            println!("{} {}", "Usage error:".red(), e);
            return;
        }
    };
    let Some(mut carousel) = Carousel::three_column(&CARD_HEIGHTS) else {
        return;
    };
    println!("{}", "Testimonials".bold().underline());
    let frame = Duration::from_secs_f32(TICK_SECS);
    let mut shown = Duration::ZERO;
    for second in 0..=seconds {
        while shown < Duration::from_secs(second) {
            carousel.tick_at(shown);
            shown += frame;
        }
        let tops: Vec<String> = carousel
            .offsets()
            .iter()
            .map(|col| col.first().map_or("-".to_string(), |y| format!("{y:>8.1}")))
            .collect();
        println!(
            "  {}  {}",
            muted(cfg.theme, &format!("t = {second:>3}s")),
            tops.join("  ")
        );
    }
}

fn cmd_orbit(args: &[&str], cfg: &Config) {
    let pointer = match args {
        [x, y, ..] => x.parse::<f32>().ok().zip(y.parse::<f32>().ok()),
        _ => None,
    };
    let Some((x, y)) = pointer else {
        println!("{} /orbit <x> <y> [frames]", "Usage:".red());
        return;
    };
    let frames = match parse_count(args.get(2), 60) {
        Ok(n) => n,
        Err(e) => {
            println!("{} {}", "Usage error:".red(), e);
            return;
        }
    };

    let mut camera = CameraOrbit::default();
    if !camera.follow_pointer(x, y, (VIEWPORT.0 as f32, VIEWPORT.1 as f32)) {
        return;
    }
    for _ in 0..frames {
        camera.update();
    }
    let p = camera.position();
    println!(
        "{} {}",
        "Camera".bold().underline(),
        muted(
            cfg.theme,
            &format!("pointer ({x:.0}, {y:.0}) on {}×{}, {frames} frames", VIEWPORT.0, VIEWPORT.1)
        )
    );
    println!(
        "  yaw {:>6.2}°  pitch {:>6.2}°  at ({:.2}, {:.2}, {:.2})",
        camera.yaw().to_degrees(),
        camera.pitch().to_degrees(),
        p.x,
        p.y,
        p.z
    );
}

fn cmd_schema() {
    let schema = schemars::schema_for!(SweepConfig);
    match serde_json::to_string_pretty(&schema) {
        Ok(json) => println!("{json}"),
        Err(e) => println!("{}: {}", "Schema error".red(), e),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// `/run` arguments: an optional scene name then an optional frame count.
/// A count of `0` means "until Ctrl-C".
fn parse_run_args(args: &[&str], cfg: &Config) -> Result<(String, Option<u64>), String> {
    let mut preset = cfg.preset.clone();
    let mut frames = cfg.frame_limit();
    let mut rest = args.iter();

    if let Some(first) = args.first()
        && first.parse::<u64>().is_err()
    {
        preset = first.to_string();
        rest.next();
    }
    if let Some(count) = rest.next() {
        let n = count
            .parse::<u64>()
            .map_err(|_| format!("'{count}' is not a frame count"))?;
        frames = (n > 0).then_some(n);
    }
    if let Some(extra) = rest.next() {
        return Err(format!("unexpected argument '{extra}'"));
    }
    Ok((preset, frames))
}

/// `WIDTHxHEIGHT`, e.g. `1920x1080`.
fn parse_viewport(arg: &str) -> Result<(u32, u32), String> {
    let (w, h) = arg
        .split_once(['x', 'X', '×'])
        .ok_or_else(|| format!("'{arg}' is not WIDTHxHEIGHT"))?;
    let side = |v: &str| v.parse::<u32>().map_err(|_| format!("'{v}' is not a size"));
    Ok((side(w)?, side(h)?))
}

fn parse_count(arg: Option<&&str>, default: u64) -> Result<u64, String> {
    match arg {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| format!("'{s}' is not a number")),
    }
}

/// Body mesh for each scene, with the primitive shown if the model is missing.
fn model_for(scene: &str) -> (&'static str, Primitive) {
    match scene {
        "drones" => ("drone.glb", Primitive::Sphere { radius: 0.5 }),
        "ships" => ("ship.glb", Primitive::Cone { radius: 1.0, height: 2.5 }),
        "boxes" => ("crate.glb", Primitive::Cube { size: 0.8 }),
        _ => ("robot.glb", Primitive::Cube { size: 1.0 }),
    }
}

fn bundled_models() -> SimAssetLoader {
    SimAssetLoader::new()
        .with_model("robot.glb", 18_400)
        .with_model("drone.glb", 6_200)
        .with_model("ship.glb", 24_900)
}

fn build_sweep(scene: SweepConfig, seed: Option<u64>) -> Result<SweepAnimator, vigil_types::VigilError> {
    let (model, fallback) = model_for(&scene.name);
    let mesh = load_or_fallback(&mut bundled_models(), model, fallback);
    let factory = Box::new(SimDecorationFactory::full_overlay().with_mesh(mesh));
    match seed {
        Some(seed) => SweepAnimator::with_seed(scene, factory, seed),
        None => SweepAnimator::new(scene, factory),
    }
}

fn swatches(stops: &[ColorStop]) -> String {
    stops
        .iter()
        .map(|s| {
            format!(
                "{} {}",
                "██".truecolor(s.color.r, s.color.g, s.color.b),
                s.color.to_hex()
            )
        })
        .collect::<Vec<_>>()
        .join("  ")
}
