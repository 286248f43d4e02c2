//! Cabinet Sim - Entry Point
//!
//! Terminal front end: forms a government, then reads player commands in a
//! loop until the player quits.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use cabinet_sim::core::config::SimulationConfig;
use cabinet_sim::core::error::{Result, SimError};
use cabinet_sim::nation::data::{DEFAULT_LEADER_NAME, DEFAULT_PARTY_NAME};
use cabinet_sim::nation::{PolicyKind, RandomEvent, Simulation, Trend};
use cabinet_sim::persistence::{SaveSlot, SaveStore};

/// Prime-minister strategy simulation
#[derive(Parser, Debug)]
#[command(name = "cabinet-sim")]
#[command(about = "Govern 47 regions and try to keep the nation's approval")]
struct Args {
    /// TOML config file
    #[arg(long, default_value = "data/simulation.toml")]
    config: PathBuf,

    /// Random seed for deterministic runs (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Leader name
    #[arg(long, default_value = DEFAULT_LEADER_NAME)]
    leader: String,

    /// Party name
    #[arg(long, default_value = DEFAULT_PARTY_NAME)]
    party: String,

    /// Directory for save slots (overrides config)
    #[arg(long)]
    save_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cabinet_sim=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = if args.config.exists() {
        SimulationConfig::load(&args.config)?
    } else {
        tracing::warn!("Config {:?} not found - using defaults", args.config);
        SimulationConfig::default()
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(dir) = args.save_dir {
        config.save_dir = dir;
    }
    config.validate()?;

    let store = SaveStore::new(config.save_dir.clone());
    let mut sim = Simulation::new(&args.leader, &args.party, &config);

    println!("\n=== CABINET SIM ===");
    println!(
        "{} of the {} takes office.",
        sim.leader().name,
        sim.leader().party
    );
    print_help();

    loop {
        display_status(&sim);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default();
        let arg = parts.next();

        match command {
            "quit" | "q" => break,
            "help" | "h" => print_help(),
            "day" | "d" => {
                let event = sim.advance_day();
                report_event(event.as_ref());
            }
            "run" => match arg.and_then(|n| n.parse::<u32>().ok()) {
                Some(n) => {
                    for _ in 0..n {
                        let event = sim.advance_day();
                        report_event(event.as_ref());
                    }
                }
                None => println!("Usage: run <days>"),
            },
            "year" => {
                sim.skip_year();
                let date = sim.date();
                println!(
                    "One year has passed. The date is now {}/{}/{}.",
                    date.day, date.month, date.year
                );
            }
            "policy" | "p" => match arg.map(str::parse::<PolicyKind>) {
                Some(Ok(kind)) => enact_policy(&mut sim, kind),
                Some(Err(e)) => println!("{}", e),
                None => {
                    let labels: Vec<&str> = PolicyKind::ALL.iter().map(|k| k.label()).collect();
                    println!("Usage: policy <{}>", labels.join("|"));
                }
            },
            "regions" | "r" => display_regions(&sim),
            "events" | "e" => {
                for entry in sim.recent_events() {
                    println!("  - {}", entry);
                }
            }
            "stats" => println!("{}", sim.statistics().report()),
            "history" => display_history(&sim),
            "save" => match parse_slot(arg) {
                Ok(slot) => match store.save(slot, &sim) {
                    Ok(_) => println!("Game saved to slot {}", slot.id()),
                    Err(e) => report_save_error(&e),
                },
                Err(e) => println!("{}", e),
            },
            "load" => match parse_slot(arg) {
                Ok(slot) => match store.load(slot) {
                    Ok(loaded) => {
                        sim = loaded;
                        println!("Game loaded from slot {}", slot.id());
                    }
                    Err(e) => report_save_error(&e),
                },
                Err(e) => println!("{}", e),
            },
            _ => println!("Unknown command. Type 'help' for the list."),
        }
    }

    println!(
        "\nGoodbye! {} leaves office on {} with {:.1}% approval.",
        sim.leader().name,
        sim.date(),
        sim.global_approval()
    );
    Ok(())
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  policy <kind> / p  - Enact a policy, then advance one day");
    println!("  day / d            - Advance one day");
    println!("  run <n>            - Advance n days");
    println!("  year               - Skip ahead one year");
    println!("  regions / r        - Show regional statistics");
    println!("  events / e         - Show recent events");
    println!("  stats              - Show country statistics");
    println!("  history            - Show approval history");
    println!("  save <1-3>         - Save to a slot");
    println!("  load <1-3>         - Load from a slot");
    println!("  quit / q           - Exit");
    println!();
}

fn parse_slot(arg: Option<&str>) -> Result<SaveSlot> {
    let slot = arg
        .and_then(|s| s.parse::<u8>().ok())
        .unwrap_or_default();
    SaveSlot::new(slot)
}

fn report_save_error(error: &SimError) {
    if error.is_file_error() {
        println!("File Error: {}", error);
    } else if error.is_data_error() {
        println!("Data Error: {}", error);
    } else {
        println!("Error: {}", error);
    }
}

fn enact_policy(sim: &mut Simulation, kind: PolicyKind) {
    let outcome = sim.apply_policy(kind);

    if sim.last_was_catastrophe() {
        println!("DISASTER! {}", outcome.name);
        println!("Approval change: {:.2}%", outcome.effect);
    } else if outcome.effect < 0.0 {
        println!("Policy backfired: {}", outcome.name);
        println!("Approval change: {:.2}%", outcome.effect);
    } else {
        println!("You implemented {}.", outcome.name);
        println!("Approval change: +{:.2}%", outcome.effect);
    }

    let event = sim.advance_day();
    report_event(event.as_ref());
}

fn report_event(event: Option<&RandomEvent>) {
    if let Some(event) = event {
        let effect = if event.category.is_adverse() {
            "Your approval rating has dropped!"
        } else {
            "Your approval rating has increased!"
        };
        println!("[{}] {} - {}", event.category, event.name, effect);
    }
}

fn display_status(sim: &Simulation) {
    let summary = sim.summary();
    let trend = match sim.history().trend(7) {
        Trend::Rising => "rising",
        Trend::Falling => "falling",
        Trend::Flat => "steady",
    };
    println!();
    println!(
        "--- {} | Approval: {:.1}% ({}) | Unemployment: {:.1}% ---",
        summary.date, summary.national_approval, trend, summary.mean_unemployment
    );
}

fn display_regions(sim: &Simulation) {
    println!(
        "{:<12} {:>12} {:>8} {:>9} {:>8} {:>8}",
        "Region", "Population", "Economy", "Approval", "Unemp.", "Env."
    );
    for (name, population, economy, approval, unemployment, environment) in
        sim.region_snapshot().iter().map(|r| r.as_row())
    {
        println!(
            "{:<12} {:>12} {:>8.2} {:>8.1}% {:>7.1}% {:>8.1}",
            name, population, economy, approval, unemployment, environment
        );
    }
    let summary = sim.summary();
    println!(
        "Total Population: {} | Average Approval: {:.1}% | Average Unemployment: {:.1}%",
        summary.total_population, summary.mean_regional_approval, summary.mean_unemployment
    );
}

fn display_history(sim: &Simulation) {
    let history = sim.history();
    let skip = history.len().saturating_sub(20);
    for (approval, date) in history.points().skip(skip) {
        let bar = "#".repeat((approval / 2.0).round() as usize);
        println!("{}  {:>5.1}% {}", date, approval, bar);
    }
}
