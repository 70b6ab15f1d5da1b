use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use setpace_core::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "setpace")]
#[command(about = "Workout session timer and set tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interval or rest countdown
    Timer {
        /// Preset id (see `setpace presets`)
        #[arg(long, conflicts_with = "work")]
        preset: Option<String>,

        /// Work phase length in seconds
        #[arg(long)]
        work: Option<u32>,

        /// Rest phase length in seconds (omit for a single-phase countdown)
        #[arg(long)]
        rest: Option<u32>,

        /// Number of rounds
        #[arg(long, default_value_t = 1)]
        rounds: u32,

        /// Warning window in seconds
        #[arg(long)]
        warn: Option<u32>,

        /// Run without wall-clock delays (for scripting and tests)
        #[arg(long)]
        fast: bool,
    },

    /// Work through a planned set session
    Lift {
        /// Path to a workout plan JSON file
        #[arg(long)]
        plan: PathBuf,

        /// Rest length between sets in seconds (default from config)
        #[arg(long)]
        rest: Option<u32>,

        /// Complete every set at its target without prompting (for
        /// scripting and tests)
        #[arg(long)]
        auto: bool,
    },

    /// List available timer presets
    Presets,
}

fn main() -> Result<()> {
    setpace_core::logging::init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Timer {
            preset,
            work,
            rest,
            rounds,
            warn,
            fast,
        } => cmd_timer(&config, preset, work, rest, rounds, warn, fast),
        Commands::Lift { plan, rest, auto } => cmd_lift(&config, &plan, rest, auto),
        Commands::Presets => cmd_presets(&config),
    }
}

// ── Timer command ────────────────────────────────────────────────────

fn cmd_timer(
    config: &Config,
    preset: Option<String>,
    work: Option<u32>,
    rest: Option<u32>,
    rounds: u32,
    warn: Option<u32>,
    fast: bool,
) -> Result<()> {
    let timer_config = match preset {
        Some(id) => {
            let preset = config
                .resolve_preset(&id)
                .ok_or_else(|| Error::Configuration(format!("unknown preset: {}", id)))?;
            println!("{}", preset.name);
            preset.config
        }
        None => {
            let work_secs = work.ok_or_else(|| {
                Error::Configuration("either --preset or --work is required".into())
            })?;
            let single_phase = rest.unwrap_or(0) == 0;
            let warn_secs = warn.unwrap_or(if single_phase {
                config.timer.rest_warn_secs
            } else {
                config.timer.warn_secs
            });
            TimerConfig {
                work_secs,
                rest_secs: rest,
                rounds,
                warn_secs,
            }
        }
    };

    let labels = if timer_config.is_single_phase() && timer_config.rounds == 1 {
        ("TIME", "REST")
    } else {
        ("WORK", "REST")
    };

    tracing::debug!("running timer: {:?}", timer_config);
    let mut timer = IntervalTimer::new(timer_config)?.with_cue(cue_sink(fast));
    timer.start();
    run_countdown(&mut timer, labels, fast)
}

/// Drive an active timer to completion, rendering once per tick.
///
/// In normal mode ticks come from wall-clock sleep; elapsed time is
/// measured so a delayed wakeup feeds the engine every missed second
/// and no boundary is skipped. Fast mode feeds logical seconds with no
/// delay at all.
fn run_countdown(
    timer: &mut IntervalTimer,
    labels: (&str, &str),
    fast: bool,
) -> Result<()> {
    let mut last = Instant::now();

    loop {
        let snap = timer.snapshot();
        if snap.phase != TimerPhase::Active {
            break;
        }
        render_countdown(&snap, labels)?;

        let elapsed = if fast {
            1
        } else {
            std::thread::sleep(Duration::from_secs(1));
            let whole_secs = last.elapsed().as_secs().min(u64::from(u32::MAX)) as u32;
            last += Duration::from_secs(u64::from(whole_secs));
            whole_secs.max(1)
        };

        for event in timer.catch_up(elapsed) {
            report_event(&event, timer.snapshot(), labels);
        }
    }

    Ok(())
}

fn render_countdown(snap: &TimerSnapshot, labels: (&str, &str)) -> Result<()> {
    let label = if snap.is_work_phase { labels.0 } else { labels.1 };
    let marker = if snap.warning() { "!" } else { " " };
    print!(
        "\r{:<4} round {}/{}  {}{} ",
        label,
        snap.current_round,
        snap.total_rounds,
        format_mmss(snap.secs_remaining),
        marker
    );
    io::stdout().flush()?;
    Ok(())
}

fn report_event(event: &TimerEvent, snap: TimerSnapshot, labels: (&str, &str)) {
    match event {
        TimerEvent::PhaseBoundary { .. } => {
            if snap.phase == TimerPhase::Active {
                let label = if snap.is_work_phase { labels.0 } else { labels.1 };
                println!(
                    "\r{:<4} round {}/{}  {}",
                    label,
                    snap.current_round,
                    snap.total_rounds,
                    format_mmss(snap.secs_remaining)
                );
            }
        }
        TimerEvent::SessionComplete { rounds, .. } => {
            println!("\rSession complete after {} round(s).          ", rounds);
        }
        TimerEvent::ThresholdWarning { .. } => {}
    }
}

// ── Lift command ─────────────────────────────────────────────────────

fn cmd_lift(config: &Config, plan_path: &Path, rest: Option<u32>, auto: bool) -> Result<()> {
    let plan = WorkoutPlan::load(plan_path)?;
    let mut tracker = SetTracker::new(&plan)?;
    let rest_secs = rest.unwrap_or(config.timer.default_rest_secs);

    let session_id = Uuid::new_v4();
    let started = Utc::now();
    tracing::debug!("lift session {} started", session_id);
    println!("{} - {} sets", plan.exercise, tracker.len());

    if auto {
        while !tracker.all_completed() {
            while tracker.current_set().current_reps < tracker.current_set().target_reps {
                tracker.increment_reps();
            }
            tracker.complete_set();
        }
    } else {
        run_interactive(config, &mut tracker, rest_secs)?;
    }

    print_summary(&tracker, &plan, session_id, started);
    Ok(())
}

fn run_interactive(config: &Config, tracker: &mut SetTracker, rest_secs: u32) -> Result<()> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut input = String::new();

    loop {
        print_current_set(tracker);
        print!("[+/-] rep  [d]one  [n]ext  [p]rev  [r]eset  [q]uit > ");
        io::stdout().flush()?;

        input.clear();
        if reader.read_line(&mut input)? == 0 {
            // stdin closed; treat like quit
            break;
        }

        match input.trim() {
            "+" => {
                tracker.increment_reps();
            }
            "-" => {
                tracker.decrement_reps();
            }
            "d" | "done" => {
                tracker.complete_set();
                if tracker.all_completed() {
                    println!("All sets completed.");
                    break;
                }
                rest_between_sets(config, rest_secs)?;
            }
            "n" | "next" => {
                tracker.go_to_next_set();
            }
            "p" | "prev" => {
                tracker.go_to_previous_set();
            }
            "r" | "reset" => {
                tracker.reset_session();
            }
            "q" | "quit" => break,
            "" => {}
            other => println!("Unknown command: {}", other),
        }
    }

    Ok(())
}

/// Completing a set starts the rest countdown; the two machines only
/// meet here.
fn rest_between_sets(config: &Config, rest_secs: u32) -> Result<()> {
    let rest_config =
        TimerConfig::rest_only(rest_secs).with_warning(config.timer.rest_warn_secs);
    let mut timer = IntervalTimer::new(rest_config)?.with_cue(cue_sink(false));
    timer.start();
    run_countdown(&mut timer, ("REST", "REST"), false)
}

fn print_current_set(tracker: &SetTracker) {
    let set = tracker.current_set();
    let mark = if set.completed { " [done]" } else { "" };
    println!(
        "set {}/{}: {}/{} reps @ {:.1}{}   ({} of {} sets done)",
        set.set_index + 1,
        tracker.len(),
        set.current_reps,
        set.target_reps,
        set.target_weight,
        mark,
        tracker.completed_sets(),
        tracker.len()
    );
}

fn print_summary(
    tracker: &SetTracker,
    plan: &WorkoutPlan,
    session_id: Uuid,
    started: DateTime<Utc>,
) {
    let finished = Utc::now();
    println!();
    println!("Session summary [{}]", session_id);
    println!("  {}", plan.exercise);
    println!(
        "  {} - {}",
        started.format("%H:%M:%S"),
        finished.format("%H:%M:%S")
    );
    for set in tracker.sets() {
        let mark = if set.completed { "done" } else { "open" };
        println!(
            "  set {}: {:>2}/{} reps @ {:.1}  [{}]",
            set.set_index + 1,
            set.current_reps,
            set.target_reps,
            set.target_weight,
            mark
        );
    }
    println!(
        "  {}/{} sets completed",
        tracker.completed_sets(),
        tracker.len()
    );
}

// ── Presets command ──────────────────────────────────────────────────

fn cmd_presets(config: &Config) -> Result<()> {
    println!("Built-in presets:");
    for preset in get_default_presets() {
        println!("  {:<12} {}  ({})", preset.id, preset.name, describe(&preset.config));
    }

    if !config.presets.is_empty() {
        println!();
        println!("Custom presets:");
        for custom in &config.presets {
            let preset = custom.to_preset(&config.timer);
            println!("  {:<12} {}  ({})", preset.id, preset.name, describe(&preset.config));
        }
    }

    Ok(())
}

fn describe(config: &TimerConfig) -> String {
    match config.rest() {
        Some(rest) => format!(
            "{} work / {} rest x {}",
            format_mmss(config.work_secs),
            format_mmss(rest),
            config.rounds
        ),
        None if config.rounds > 1 => format!(
            "{} work x {}",
            format_mmss(config.work_secs),
            config.rounds
        ),
        None => format_mmss(config.work_secs),
    }
}

// ── Rendering helpers ────────────────────────────────────────────────

/// Terminal bell cues: one beep for warnings and boundaries, three for
/// the completion fanfare.
struct TerminalBell;

impl CueSink for TerminalBell {
    fn play(&mut self, cue: Cue) {
        let bells = match cue {
            Cue::Warning | Cue::Boundary => "\x07",
            Cue::Completion => "\x07\x07\x07",
        };
        print!("{}", bells);
        let _ = io::stdout().flush();
    }
}

fn cue_sink(fast: bool) -> Box<dyn CueSink> {
    if fast {
        Box::new(SilentCues)
    } else {
        Box::new(TerminalBell)
    }
}

fn format_mmss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
