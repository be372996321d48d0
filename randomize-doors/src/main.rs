use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use door_placement::seed::rng_from_seed;
use door_placement::{Canvas, Integer, SizingPolicy, DEFAULT_MAX_ATTEMPTS_PER_ITEM};
use randomize_doors::{randomize, RandomizeArgs};
use tracing_subscriber::EnvFilter;

/// Give every door in layout.json a new random position and size.
#[derive(Parser, Debug)]
#[clap(name = "randomize-doors", version)]
struct Cli {
    /// Layout file with a `door` section; a backup is written next to it as <file>.bak.
    #[clap(long, value_name = "PATH", default_value = "layout.json", parse(from_os_str))]
    layout: PathBuf,

    /// Canvas width [default: 100]
    #[clap(long, value_name = "INT")]
    canvas_width: Option<Integer>,

    /// Canvas height [default: 100]
    #[clap(long, value_name = "INT")]
    canvas_height: Option<Integer>,

    /// Smallest door width [default: 6]
    #[clap(long, value_name = "INT")]
    min_width: Option<Integer>,

    /// Largest door width, only reached by the primary door [default: 18]
    #[clap(long, value_name = "INT")]
    max_width: Option<Integer>,

    /// Smallest door height [default: 8]
    #[clap(long, value_name = "INT")]
    min_height: Option<Integer>,

    /// Largest door height, only reached by the primary door [default: 18]
    #[clap(long, value_name = "INT")]
    max_height: Option<Integer>,

    /// Minimal gap between two doors [default: 2]
    #[clap(long, value_name = "INT")]
    padding: Option<Integer>,

    /// Minimal gap between a door and the canvas border [default: 2]
    #[clap(long, value_name = "INT")]
    edge_padding: Option<Integer>,

    /// How far below the maximum the other doors stay; must exceed 1 so the secondary door stays larger
    /// [default: 2]
    #[clap(long, value_name = "INT")]
    generic_shrink: Option<Integer>,

    /// Door that gets the largest size
    #[clap(long, value_name = "ID", default_value = "24")]
    primary: String,

    /// Door that gets the second largest size
    #[clap(long, value_name = "ID", default_value = "6")]
    secondary: String,

    /// Random trials per door before giving up
    #[clap(long, value_name = "INT", default_value_t = DEFAULT_MAX_ATTEMPTS_PER_ITEM)]
    max_attempts: u64,

    /// Random seed, any string. Without one every run gives a different layout.
    #[clap(short, long, value_name = "STRING")]
    seed: Option<String>,

    /// Print the new layout instead of writing it
    #[clap(long)]
    dry_run: bool,

    /// Log every placed door
    #[clap(short, long)]
    verbose: bool,
}

impl Cli {
    fn canvas(&self) -> Canvas {
        let defaults = Canvas::default();
        Canvas::new(
            self.canvas_width.unwrap_or(defaults.width),
            self.canvas_height.unwrap_or(defaults.height),
        )
    }

    fn policy(&self) -> SizingPolicy {
        let defaults = SizingPolicy::default();
        SizingPolicy {
            min_width: self.min_width.unwrap_or(defaults.min_width),
            max_width: self.max_width.unwrap_or(defaults.max_width),
            min_height: self.min_height.unwrap_or(defaults.min_height),
            max_height: self.max_height.unwrap_or(defaults.max_height),
            padding: self.padding.unwrap_or(defaults.padding),
            edge_padding: self.edge_padding.unwrap_or(defaults.edge_padding),
            generic_shrink: self.generic_shrink.unwrap_or(defaults.generic_shrink),
            overrides: defaults.overrides,
        }
        .with_primary_secondary(self.primary.as_str(), self.secondary.as_str())
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let args = RandomizeArgs {
        layout_path: cli.layout.clone(),
        policy: cli.policy(),
        canvas: cli.canvas(),
        max_attempts_per_item: cli.max_attempts,
        dry_run: cli.dry_run,
    };
    let mut rng = rng_from_seed(cli.seed.as_deref());
    let outcome = randomize(&args, &mut rng)
        .with_context(|| format!("randomizing doors in '{}'", args.layout_path.display()))?;

    match outcome.backup_path {
        Some(backup_path) => println!(
            "{} updated ({} doors). Backup written: {}",
            outcome.layout_path.display(),
            outcome.placed,
            backup_path.display()
        ),
        None => print!("{}", outcome.document),
    }
    Ok(())
}
