//! CLI frontend for the Dreamland engine.

mod commands;
mod demo;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dl_core::recipe::CookingMethod;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dreamland",
    about = "Dreamland engine tools: ecology simulation, crafting and cooking checks",
    version,
    propagate_version = true
)]
struct Cli {
    /// Debug logging, and full event logs where a command has them
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the ecology simulation on a generated demo world
    Simulate {
        /// Number of ticks to simulate
        #[arg(short, long, default_value = "24")]
        ticks: u64,

        /// RNG seed for deterministic simulation
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Balance table JSON (partial tables are merged over the defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Save the final state to this slot
        #[arg(long)]
        save: Option<String>,

        /// Save directory
        #[arg(short, long, default_value = "saves")]
        dir: PathBuf,
    },

    /// Show how long a craft of the given difficulty takes
    CraftTime {
        /// Recipe difficulty (clamped to 1-5)
        #[arg(allow_hyphen_values = true)]
        difficulty: i32,
    },

    /// Show a crafting recipe's cost and check it against materials
    Recipe {
        /// Recipe id
        id: String,

        /// Materials on hand, as id=quantity (repeatable)
        #[arg(long = "have", value_parser = commands::recipe::parse_stack)]
        have: Vec<(String, u32)>,
    },

    /// Cook a recipe on a heat source
    Cook {
        /// Heat source
        method: MethodArg,

        /// Cooking recipe id
        recipe: String,

        /// Oven temperature in degrees Celsius
        #[arg(long, default_value = "180")]
        temp: f64,

        /// Pot cook time
        #[arg(long, default_value = "90")]
        time: u32,

        /// Ingredient ids to use instead of the recipe's own (repeatable)
        #[arg(short, long = "with")]
        with: Vec<String>,

        /// Spice to season with
        #[arg(long)]
        spice: Option<String>,
    },

    /// Print the balance table as JSON
    Balance {
        /// Merge this JSON file over the defaults first
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List saved games
    Saves {
        /// Save directory
        #[arg(short, long, default_value = "saves")]
        dir: PathBuf,

        /// Print the action history of one slot
        #[arg(long)]
        show: Option<String>,
    },

    /// Validate a catalog of items, recipes, and species
    Check {
        /// Catalog JSON (default: the built-in catalog)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    Campfire,
    Oven,
    Pot,
}

impl From<MethodArg> for CookingMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Campfire => Self::Campfire,
            MethodArg::Oven => Self::Oven,
            MethodArg::Pot => Self::Pot,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Simulate {
            ticks,
            seed,
            config,
            save,
            dir,
        } => commands::simulate::run(&commands::simulate::Options {
            ticks,
            seed,
            config,
            save,
            dir,
            verbose: cli.verbose,
        }),
        Commands::CraftTime { difficulty } => commands::craft_time::run(difficulty),
        Commands::Recipe { id, have } => commands::recipe::run(&id, &have),
        Commands::Cook {
            method,
            recipe,
            temp,
            time,
            with,
            spice,
        } => commands::cook::run(
            method.into(),
            &recipe,
            &commands::cook::Settings {
                temperature: temp,
                cook_time: time,
                ingredients: with,
                spice,
            },
        ),
        Commands::Balance { config } => commands::balance::run(config.as_deref()),
        Commands::Saves { dir, show } => commands::saves::run(&dir, show.as_deref()),
        Commands::Check { catalog } => commands::check::run(catalog.as_deref()),
    }
}
