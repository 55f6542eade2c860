use clap::Parser;
use nagare::data::RecordedSession;
use nagare::error::SpecConversionError;
use nagare::prelude::*;
use serde::Deserialize;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

// --- JSON Deserialization Structs (Input Format Specific) ---
// These structs match the `app.json` format and are only used here for conversion.

#[derive(Deserialize)]
struct RawSpec {
    screens: Vec<RawScreen>,
    #[serde(default)]
    transitions: Vec<RawTransition>,
}

#[derive(Deserialize)]
struct RawScreen {
    id: Option<String>,
    name: String,
    #[serde(default, alias = "type")]
    kind: Option<String>,
    #[serde(default)]
    actions: Vec<String>,
}

#[derive(Deserialize)]
struct RawTransition {
    from: String,
    #[serde(alias = "on")]
    trigger: String,
    to: String,
}

// --- Converter Implementation ---

impl IntoSpec for RawSpec {
    fn into_spec(self) -> Result<SpecSnapshot, SpecConversionError> {
        let mut snapshot = SpecSnapshot::new();
        for (index, screen) in self.screens.iter().enumerate() {
            if screen.name.trim().is_empty() {
                return Err(SpecConversionError::MissingField {
                    index,
                    field: "name",
                });
            }
            // Screens without an explicit id are addressed by their name.
            let id = screen.id.as_deref().unwrap_or(&screen.name);
            let actions: Vec<&str> = screen.actions.iter().map(String::as_str).collect();
            snapshot = snapshot.screen(id, &screen.name, screen.kind.as_deref(), &actions);
        }
        for t in &self.transitions {
            snapshot = snapshot.transition(&t.from, &t.trigger, &t.to);
        }
        Ok(snapshot)
    }
}

/// Validates an application flow, settles its layout and replays recorded interactions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the application spec JSON file
    spec_path: String,
    /// Optional path to a recorded session (interaction events JSON)
    events_path: Option<String>,

    /// Optional session configuration JSON; missing fields use defaults
    #[arg(short, long)]
    config: Option<String>,

    /// Layout ticks to run before replaying events
    #[arg(short, long, default_value_t = 300)]
    ticks: usize,

    /// Simulated milliseconds per tick during replay
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Print the final node positions
    #[arg(long)]
    frame: bool,

    /// Write an export bundle here (`.json` for JSON, anything else for binary)
    #[arg(short, long)]
    export: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nagare=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. Loading ---
    let config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read config file '{}': {}", path, e))
            });
            serde_json::from_str::<SessionConfig>(&json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse config JSON: {}", e)))
        }
        None => SessionConfig::default(),
    };
    let spec_json = fs::read_to_string(&cli.spec_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read spec file '{}': {}",
            &cli.spec_path, e
        ))
    });
    let recording = cli.events_path.as_ref().map(|path| {
        RecordedSession::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load events from '{}': {}", path, e))
        })
    });

    // --- 2. Parsing and Conversion ---
    let raw_spec: RawSpec = serde_json::from_str(&spec_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse spec JSON: {}", e)));
    let snapshot = raw_spec
        .into_spec()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert spec: {}", e)));

    // --- 3. Validation ---
    let mut session = Session::new(config);
    let validate_start = Instant::now();
    if let Err(e) = session.load_spec(snapshot) {
        exit_with_error(&format!("Spec rejected: {}", e));
    }
    let validate_duration = validate_start.elapsed();
    println!("\n--- Validation ---");
    print!("{}", ReportFormatter::format_report(session.report()));

    // --- 4. Layout ---
    let layout_start = Instant::now();
    let mut now = 0u64;
    for _ in 0..cli.ticks {
        session.tick(now);
    }
    let layout_duration = layout_start.elapsed();

    // --- 5. Replay ---
    let replay_start = Instant::now();
    if let Some(recording) = &recording {
        let events = recording.chronological();
        now = events.first().map_or(0, |e| e.timestamp);
        session.start(now);
        let end = recording.end_time() + session.config().monitor.recency_window_ms * 2;
        let mut pending = events.into_iter().peekable();
        while now <= end {
            while let Some(event) = pending.next_if(|e| e.timestamp <= now) {
                session.push(InboundEvent::Interaction(event.clone()));
            }
            session.tick(now);
            now += cli.tick_ms.max(1);
        }

        println!("\n--- Runtime ---");
        print!("{}", ReportFormatter::format_snapshot(&session.snapshot()));
        if session.graph().edges().iter().any(|e| e.origin == EdgeOrigin::Observed) {
            println!("\n--- Validation (with observed transitions) ---");
            print!("{}", ReportFormatter::format_report(session.report()));
        }
    }
    let replay_duration = replay_start.elapsed();

    for warning in session.layout().warnings() {
        println!("  warning: {}", warning);
    }
    if cli.frame {
        println!("\n--- Layout ---");
        print!("{}", ReportFormatter::format_frame(&session.frame()));
    }

    // --- 6. Export ---
    if let Some(path) = &cli.export {
        session
            .export()
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Export failed: {}", e)));
        println!("\nExported session to '{}'", path);
    }

    let total_duration = total_start.elapsed();
    println!("\n--- Performance Summary ---");
    println!("Validation:           {:?}", validate_duration);
    println!("Layout ({} ticks):    {:?}", cli.ticks, layout_duration);
    println!("Replay:               {:?}", replay_duration);
    println!("-----------------------------");
    println!("Total Execution:      {:?}", total_duration);
    println!();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
