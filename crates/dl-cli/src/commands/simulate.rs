use std::collections::BTreeMap;
use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use miette::IntoDiagnostic;

use dl_core::{BalanceConfig, Catalog, World};
use dl_session::{GameSession, JsonFileRepository, MemoryRepository, SaveRepository, SessionConfig};
use dl_simulation::{SimConfig, SimEventKind};

use crate::demo::demo_world;

pub struct Options {
    pub ticks: u64,
    pub seed: u64,
    pub config: Option<PathBuf>,
    pub save: Option<String>,
    pub dir: PathBuf,
    pub verbose: bool,
}

pub fn run(opts: &Options) -> miette::Result<()> {
    let balance = match &opts.config {
        Some(path) => BalanceConfig::from_path(path).into_diagnostic()?,
        None => BalanceConfig::default(),
    };
    let catalog = Catalog::builtin();
    let world = demo_world(&catalog).into_diagnostic()?;
    let start_population = population(&world);
    let start_plants = world.plant_count();

    let sim_config = SimConfig::default()
        .with_seed(opts.seed)
        .with_balance(balance);
    let session_config = SessionConfig::default()
        .with_sim_config(sim_config)
        .with_slot(opts.save.as_deref().unwrap_or("demo"))
        .without_autosave();
    let repository: Box<dyn SaveRepository> = match &opts.save {
        Some(_) => Box::new(JsonFileRepository::new(&opts.dir)),
        None => Box::new(MemoryRepository::new()),
    };
    let mut session = GameSession::new(world, catalog, session_config, repository).into_diagnostic()?;

    for _ in 0..opts.ticks {
        session.advance_turn().into_diagnostic()?;
    }

    let sim = session.simulation();
    let world = sim.world();
    let events = sim.events();

    println!(
        "  {} '{}' {}",
        "Simulation".bold(),
        world.name,
        format!("({} ticks, seed={})", opts.ticks, opts.seed).dimmed()
    );
    println!(
        "  Day {}, {} | {} events logged",
        sim.clock().day(),
        sim.clock().season(),
        events.len()
    );
    println!();

    if opts.verbose {
        println!("  {}", "Event Log".bold().underline());
        println!();
        for event in events.events() {
            let tick_label = format!("[tick {:>3}]", event.tick).dimmed();
            let desc = colorize_event(&event.kind, &event.description);
            println!("  {tick_label} {desc}");
        }
        if events.is_empty() {
            println!("  {}", "(no events)".dimmed());
        }
        println!();
    } else {
        let notable: Vec<_> = events
            .events()
            .iter()
            .filter(|e| {
                matches!(
                    e.kind,
                    SimEventKind::CreatureDied { .. } | SimEventKind::CreatureBorn { .. }
                )
            })
            .collect();
        if !notable.is_empty() {
            println!("  {}", "Notable Events".bold().underline());
            for event in notable {
                let tag = match event.kind {
                    SimEventKind::CreatureDied { .. } => "DEATH".red().bold(),
                    _ => "BIRTH".green().bold(),
                };
                println!("  {tag}  [tick {:>3}] {}", event.tick, event.description);
            }
            println!();
        }
    }

    println!("  {}", "Population".bold().underline());
    println!();
    let end_population = population(world);
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Species", "Start", "End"]);
    let species: std::collections::BTreeSet<&String> =
        start_population.keys().chain(end_population.keys()).collect();
    for id in species {
        let start = start_population.get(id).copied().unwrap_or(0);
        let end = end_population.get(id).copied().unwrap_or(0);
        let end_cell = match end.cmp(&start) {
            std::cmp::Ordering::Greater => end.to_string().green().to_string(),
            std::cmp::Ordering::Less => end.to_string().red().to_string(),
            std::cmp::Ordering::Equal => end.to_string(),
        };
        table.add_row(vec![id.clone(), start.to_string(), end_cell]);
    }
    println!("{table}");
    println!();

    println!("  {}", "Vegetation".bold().underline());
    println!();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Plant", "Count", "Mature"]);
    let mut plants: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for chunk in world.chunks() {
        for plant in &chunk.plants {
            let entry = plants.entry(plant.species.as_str()).or_default();
            entry.0 += 1;
            if plant.is_mature() {
                entry.1 += 1;
            }
        }
    }
    for (id, (count, mature)) in &plants {
        table.add_row(vec![id.to_string(), count.to_string(), mature.to_string()]);
    }
    println!("{table}");
    println!(
        "  {} plants at start, {} now",
        start_plants,
        world.plant_count()
    );
    println!();

    println!("  {}", "Activity".bold().underline());
    println!();
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Event", "Count"]);
    for (label, name) in [
        ("plant_spawned", "Plants spread"),
        ("plant_dropped", "Harvest drops"),
        ("plant_died", "Plants died"),
        ("creature_born", "Births"),
        ("creature_died", "Deaths"),
        ("creature_fled", "Flights"),
        ("creature_fed", "Meals"),
    ] {
        table.add_row(vec![name.to_string(), events.count_label(label).to_string()]);
    }
    println!("{table}");
    println!();

    if let Some(slot) = &opts.save {
        session.save().into_diagnostic()?;
        println!(
            "  Saved to slot '{}' in {}",
            slot.green(),
            opts.dir.display()
        );
    }

    Ok(())
}

fn population(world: &World) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for creature in world.creatures() {
        *counts.entry(creature.species.clone()).or_insert(0) += 1;
    }
    counts
}

fn colorize_event(kind: &SimEventKind, description: &str) -> colored::ColoredString {
    match kind {
        SimEventKind::CreatureDied { .. } | SimEventKind::PlantDied { .. } => {
            description.red().bold()
        }
        SimEventKind::CreatureBorn { .. } | SimEventKind::PlantSpawned { .. } => {
            description.green()
        }
        SimEventKind::CreatureFled { .. } => description.yellow(),
        SimEventKind::PlantDropped { .. } => description.cyan(),
        SimEventKind::PlantGrew { .. }
        | SimEventKind::CreatureFed { .. }
        | SimEventKind::CreaturePromoted { .. } => description.blue(),
        SimEventKind::Custom { .. } => description.normal(),
    }
}
