//! CLI argument parsing for seedscope.
//!
//! Each subcommand is a thin wrapper over a `Session`; none of them holds
//! matching logic of its own.
use crate::catalog::{MapType, NightlordChoice, MATCH_TOLERANCE};
use crate::observation::{parse_slot_assertion, Assertion};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "seedscope",
    version,
    about = "Narrow down Nightreign map seeds from observed points of interest",
    after_help = "Commands:\n  init                      Write a config stub\n  match                     Filter the catalog by nightlord, map and slot states\n  show <SEED>               Print one seed with its POIs\n  slots --map <MAP>         List the slot geometry for a map type\n  locate --seed N --x X --y Y  Look up the POI type near a coordinate\n  status                    Summarize the loaded catalog\n  inspect                   Interactive terminal inspector\n\nExamples:\n  seedscope init --catalog dataset/dataset.json\n  seedscope match --nightlord gladius --map default --poi 1=church --poi 4=unknown\n  seedscope show 42 --json\n  seedscope inspect",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Config file (defaults to the per-user config when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog JSON, overriding the configured catalog_path
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Emit debug logs on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Init(InitArgs),
    Match(MatchArgs),
    Show(ShowArgs),
    Slots(SlotsArgs),
    Locate(LocateArgs),
    Status(StatusArgs),
    Inspect(InspectArgs),
}

/// Init writes to `--config`, or the per-user config path.
#[derive(Parser, Debug)]
#[command(about = "Write a seedscope config stub")]
pub struct InitArgs {
    /// Overwrite an existing config.json
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Filter the catalog by nightlord, map type and slot observations")]
pub struct MatchArgs {
    /// Nightlord name, or "unknown" for any
    #[arg(long, value_name = "NAME")]
    pub nightlord: Option<NightlordChoice>,

    /// Map type (default, mountaintop, crater, rotted-woods, noklateo)
    #[arg(long, value_name = "MAP")]
    pub map: Option<MapType>,

    /// Slot observation, e.g. 3=church; repeatable, applied in order
    #[arg(long = "poi", value_name = "SLOT=STATE", value_parser = parse_slot_assertion)]
    pub pois: Vec<(u32, Assertion)>,

    /// Filter by nightlord and map only; slot observations are not accepted
    #[arg(long, conflicts_with = "pois")]
    pub no_poi_filter: bool,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Show one seed's record and POIs")]
pub struct ShowArgs {
    /// Seed number
    #[arg(value_name = "SEED")]
    pub seed: u32,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "List the POI slots of a map type")]
pub struct SlotsArgs {
    #[arg(long, value_name = "MAP")]
    pub map: MapType,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Report the POI type a seed has near a coordinate")]
pub struct LocateArgs {
    #[arg(long, value_name = "SEED")]
    pub seed: u32,

    #[arg(long)]
    pub x: f64,

    #[arg(long)]
    pub y: f64,

    /// Maximum distance to a POI
    #[arg(long, default_value_t = MATCH_TOLERANCE)]
    pub tolerance: f64,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Summarize the loaded catalog")]
pub struct StatusArgs {
    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Narrow seeds interactively in a terminal UI")]
pub struct InspectArgs {}
