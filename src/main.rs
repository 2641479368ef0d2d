use clap::Parser;
use hydrosync::{
    coach::{render_report, Benchmark, ModelCoach, OfflineModel},
    config::{Config, ConfigStore, FileConfigStore},
    history::SessionLog,
    metrics::{
        average_swolf, benchmark_gap, format_clock, format_gap, format_pace, pace_per_100m,
        stroke_count_std_dev,
    },
    runtime::{
        drive, ChannelEventSource, FixedTicker, NoopObserver, Runner, SessionEvent,
        SessionObserver, Tracker,
    },
    Lap, Mood, ResilientCoach, SeededRandom, SessionSummary, SimulationState, SwimStyle,
    TelemetryRng, ThreadRandom,
};
use std::{
    error::Error,
    io::{self, BufRead, Write},
    path::PathBuf,
    thread,
    time::Duration,
};

/// simulated swim tracker with session summaries and coaching feedback
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Simulates the telemetry of a swim session the way a swim watch would record it, then prints the session summary and coaching feedback."
)]
pub struct Cli {
    /// stroke discipline of the session
    #[clap(short = 's', long, value_enum)]
    style: Option<SwimStyle>,

    /// target distance in meters (omit for an open swim)
    #[clap(short = 't', long)]
    target: Option<u32>,

    /// run this many ticks immediately instead of in real time
    #[clap(short = 'n', long)]
    ticks: Option<u32>,

    /// seed the telemetry generator for a reproducible session
    #[clap(long)]
    seed: Option<u64>,

    /// print the summary and coaching as JSON
    #[clap(long)]
    json: bool,

    /// append the finished session to this CSV log
    #[clap(long)]
    log: Option<PathBuf>,

    /// read settings from this file instead of the default config location
    #[clap(long)]
    config: Option<PathBuf>,

    /// write the effective settings back to the config file
    #[clap(long)]
    save_config: bool,

    /// journal note to get recovery feedback on
    #[clap(long)]
    note: Option<String>,

    /// mood reported with the journal note
    #[clap(long, value_enum, default_value_t = Mood::Good)]
    mood: Mood,
}

impl Cli {
    /// Flags win over the stored config
    fn merge_into(&self, mut cfg: Config) -> Config {
        if let Some(style) = self.style {
            cfg.style = style;
        }
        if self.target.is_some() {
            cfg.target_distance_meters = self.target;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if self.log.is_some() {
            cfg.log_path = self.log.clone();
        }
        cfg
    }
}

/// Live watch-face line on stderr while a real-time session runs
struct WatchFace;

impl SessionObserver for WatchFace {
    fn on_tick(&mut self, state: &SimulationState) {
        eprint!(
            "\r{}  {:>5}m  {:>3} bpm  {} laps ",
            format_clock(state.elapsed_seconds),
            state.distance_meters.floor(),
            state.heart_rate_bpm.floor(),
            state.laps.len()
        );
        let _ = io::stderr().flush();
    }

    fn on_lap(&mut self, lap: &Lap) {
        eprintln!(
            "\rlap {}: {} strokes, swolf {}, {} bpm",
            lap.lap_number, lap.stroke_count, lap.swolf, lap.heart_rate_bpm
        );
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let cfg = cli.merge_into(store.load());
    if cli.save_config {
        store.save(&cfg)?;
    }

    let summary = run_session(&cli, &cfg)?;

    if let Some(path) = &cfg.log_path {
        SessionLog::new(path).append(&summary)?;
    }

    let coach = ResilientCoach::new(ModelCoach::new(OfflineModel));
    let report = cfg
        .benchmark
        .as_ref()
        .map(|benchmark| coach.analyze(&summary, benchmark));
    let note_feedback = cli
        .note
        .as_deref()
        .map(|note| coach.analyze_note(note, cli.mood));

    if cli.json {
        let out = serde_json::json!({
            "summary": summary,
            "stroke_count_std_dev": stroke_count_std_dev(&summary.laps),
            "benchmark_gap_seconds": cfg
                .benchmark
                .as_ref()
                .map(|benchmark| benchmark_gap(&summary, benchmark)),
            "coaching": report,
            "journal_feedback": note_feedback,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_summary(&summary, cfg.benchmark.as_ref());
        if let Some(report) = &report {
            println!("\nCoach:\n{}", render_report(report));
        }
        if let Some(feedback) = &note_feedback {
            println!("\nRecovery: {}", feedback);
        }
    }

    Ok(())
}

fn run_session(cli: &Cli, cfg: &Config) -> Result<SessionSummary, Box<dyn Error>> {
    let rng: Box<dyn TelemetryRng> = match cfg.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom::new()),
    };

    let mut tracker = Tracker::new();
    tracker.start(
        cfg.style,
        cfg.target_distance_meters.map(f64::from),
        rng,
    )?;

    let summary = match cli.ticks {
        Some(n) => {
            // the sender stays alive but silent, so every step ticks without waiting
            let (_stop, events) = ChannelEventSource::pair();
            let runner = Runner::new(events, FixedTicker::new(Duration::ZERO));
            drive(&runner, &mut tracker, &mut NoopObserver, Some(n))?
        }
        None => {
            let (tx, events) = ChannelEventSource::pair();
            thread::spawn(move || {
                let mut line = String::new();
                let _ = io::stdin().lock().read_line(&mut line);
                let _ = tx.send(SessionEvent::Stop);
            });
            eprintln!("swimming {}: press Enter to finish", cfg.style);
            let runner = Runner::new(events, FixedTicker::default());
            let summary = drive(&runner, &mut tracker, &mut WatchFace, None)?;
            eprintln!();
            summary
        }
    };

    Ok(summary)
}

fn print_summary(summary: &SessionSummary, benchmark: Option<&Benchmark>) {
    println!("{} session {}", summary.style, summary.id);
    println!("  finished:  {}", summary.started_at.to_rfc3339());
    println!("  distance:  {}m", summary.total_distance_meters);
    match summary.target_distance_meters {
        Some(target) => println!("  target:    {}m", target),
        None => println!("  target:    open swim"),
    }
    println!("  time:      {}", format_clock(summary.total_time_seconds));
    println!("  calories:  {}", summary.calories_burned);
    println!("  avg hr:    {} bpm", summary.average_heart_rate_bpm);
    if let Some(pace) = pace_per_100m(summary) {
        println!("  pace:      {} /100m", format_pace(pace));
    }
    if let Some(swolf) = average_swolf(&summary.laps) {
        println!("  avg swolf: {}", swolf);
    }
    if let Some(spread) = stroke_count_std_dev(&summary.laps) {
        println!("  stroke sd: {:.1}", spread);
    }
    if let Some(benchmark) = benchmark {
        println!(
            "  gap:       {} per lap vs {}",
            format_gap(benchmark_gap(summary, benchmark)),
            benchmark.swimmer_name
        );
    }
    for lap in &summary.laps {
        println!(
            "  lap {:>2}: {}s  {} strokes  swolf {}  {} bpm",
            lap.lap_number, lap.time_seconds, lap.stroke_count, lap.swolf, lap.heart_rate_bpm
        );
    }
}
