use clap::Parser;
use nagare::data::RecordedSession;
use nagare::graph::{Graph, GraphBuilder};
use nagare::monitor::InteractionEvent;
use nagare::spec::SpecSnapshot;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use std::fs;

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
}

#[derive(Deserialize)]
struct RawTransition {
    from: String,
    #[serde(alias = "on")]
    trigger: String,
    to: String,
}

/// Generates a random interaction recording by walking an application's flow
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the application spec JSON file
    spec_path: String,

    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_events.json")]
    output: String,

    /// Number of navigations to generate
    #[arg(short, long, default_value_t = 20)]
    steps: usize,

    /// Minimum pause between navigations, in milliseconds
    #[arg(long, default_value_t = 500)]
    min_gap: u64,

    /// Maximum pause between navigations, in milliseconds
    #[arg(long, default_value_t = 3000)]
    max_gap: u64,

    /// Probability of an undeclared jump to a random screen
    #[arg(long, default_value_t = 0.0)]
    stray: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min_gap > cli.max_gap {
        eprintln!(
            "Error: --min-gap ({}) cannot be greater than --max-gap ({})",
            cli.min_gap, cli.max_gap
        );
        std::process::exit(1);
    }

    let raw: RawSpec = serde_json::from_str(&fs::read_to_string(&cli.spec_path)?)?;
    let mut snapshot = SpecSnapshot::new();
    for screen in &raw.screens {
        snapshot = snapshot.screen(
            screen.id.as_deref().unwrap_or(&screen.name),
            &screen.name,
            None,
            &[],
        );
    }
    for t in &raw.transitions {
        snapshot = snapshot.transition(&t.from, &t.trigger, &t.to);
    }
    let graph = GraphBuilder::new(snapshot).build()?;

    println!(
        "Walking {} screens for {} steps (gap {}..={} ms)...",
        graph.len(),
        cli.steps,
        cli.min_gap,
        cli.max_gap
    );
    let events = random_walk(&graph, &cli, &mut rng);
    let recording = RecordedSession { events };
    fs::write(&cli.output, recording.to_json()?)?;

    println!(
        "Successfully generated {} events and saved them to '{}'",
        recording.events.len(),
        cli.output
    );
    Ok(())
}

/// Follows random outgoing transitions from the entry screen. A dead end
/// restarts the walk at the entry screen.
fn random_walk(graph: &Graph, cli: &Cli, rng: &mut impl Rng) -> Vec<InteractionEvent> {
    let Some(entry) = graph.entry() else {
        return Vec::new();
    };
    let mut current = entry.id.clone();
    let mut timestamp = 0u64;
    let mut events = Vec::with_capacity(cli.steps);

    for _ in 0..cli.steps {
        timestamp += rng.random_range(cli.min_gap..=cli.max_gap);
        let stray = cli.stray > 0.0 && rng.random_bool(cli.stray.min(1.0));
        let declared: Vec<_> = graph.edges_from(&current).collect();

        let (label, target) = match declared.choose(rng) {
            Some(edge) if !stray => (edge.trigger.clone(), edge.to.clone()),
            _ => match graph.nodes().choose(rng) {
                Some(node) if stray => (format!("jump to {}", node.name), node.id.clone()),
                _ => {
                    current = entry.id.clone();
                    continue;
                }
            },
        };
        events.push(InteractionEvent {
            action_label: label,
            from_screen: current.clone(),
            to_screen: target.clone(),
            timestamp,
        });
        current = target;
    }
    events
}
