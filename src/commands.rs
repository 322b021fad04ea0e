//! Subcommand handlers.
//!
//! Handlers resolve config, load the catalog once and drive a `Session`;
//! printing goes through `output`.
use crate::catalog::CatalogStore;
use crate::cli::{
    Command, InitArgs, LocateArgs, MatchArgs, RootArgs, ShowArgs, SlotsArgs, StatusArgs,
};
use crate::config::{self, ResolvedConfig};
use crate::inspect;
use crate::output::{self, LocateReport, MatchReport, SeedReport, SlotsReport, StatusReport};
use crate::session::Session;
use crate::slots::slots_for;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Configuration and catalog shared by every command except `init`.
struct Runtime {
    config: ResolvedConfig,
    catalog_path: PathBuf,
    catalog: CatalogStore,
}

impl Runtime {
    fn load(args: &RootArgs, cwd: &Path) -> Result<Self> {
        let config = config::resolve_config(args.config.as_deref(), cwd)?;
        let catalog_path = match &args.catalog {
            Some(path) => cwd.join(path),
            None => config.catalog_path(),
        };
        let catalog = CatalogStore::load_or_empty(&catalog_path);
        Ok(Self {
            config,
            catalog_path,
            catalog,
        })
    }

    fn session(self) -> (Session, ResolvedConfig) {
        let session = Session::new(self.catalog, self.config.config.ground_truth);
        (session, self.config)
    }
}

pub fn run(args: RootArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("resolve current directory")?;
    if let Command::Init(init) = &args.command {
        return run_init(&args, init, &cwd);
    }
    let runtime = Runtime::load(&args, &cwd)?;
    match &args.command {
        // handled before the catalog is loaded
        Command::Init(_) => Ok(()),
        Command::Match(match_args) => run_match(runtime, match_args),
        Command::Show(show_args) => run_show(&runtime, show_args),
        Command::Slots(slots_args) => run_slots(&runtime, slots_args),
        Command::Locate(locate_args) => run_locate(&runtime, locate_args),
        Command::Status(status_args) => run_status(&runtime, status_args),
        Command::Inspect(_) => {
            let (session, config) = runtime.session();
            inspect::run(session, config)
        }
    }
}

fn run_init(args: &RootArgs, init: &InitArgs, cwd: &Path) -> Result<()> {
    let target = match &args.config {
        Some(path) => cwd.join(path),
        None => config::user_config_path()
            .ok_or_else(|| anyhow!("no per-user config directory; pass --config <PATH>"))?,
    };
    if target.is_file() && !init.force {
        return Err(anyhow!(
            "config already exists at {} (pass --force to overwrite)",
            target.display()
        ));
    }
    let mut stub = config::default_config();
    if let Some(catalog) = &args.catalog {
        stub.catalog_path = cwd.join(catalog).display().to_string();
    }
    config::validate_config(&stub)?;
    config::write_config(&target, &stub)?;
    tracing::info!(path = %target.display(), "config written");
    println!("wrote {}", target.display());
    Ok(())
}

fn run_match(runtime: Runtime, args: &MatchArgs) -> Result<()> {
    let locale = runtime.config.config.locale;
    let (mut session, _) = runtime.session();
    if let Some(choice) = args.nightlord {
        session.toggle_nightlord(choice);
    }
    if let Some(map_type) = args.map {
        session.toggle_map_type(map_type);
    }
    if args.no_poi_filter {
        session.set_poi_filter(false);
    }
    if !args.pois.is_empty() && args.map.is_none() {
        tracing::warn!("--poi needs --map; slot observations ignored");
    }
    for (slot, assertion) in &args.pois {
        if !session.set_assertion(*slot, *assertion) && args.map.is_some() {
            tracing::warn!(slot = *slot, "slot is not on the selected map; ignored");
        }
    }

    let report = MatchReport::from_session(&session, locale);
    if args.json {
        output::print_json(&report)
    } else {
        output::print_match(&report);
        Ok(())
    }
}

fn run_show(runtime: &Runtime, args: &ShowArgs) -> Result<()> {
    let seed = runtime.catalog.seed_by_number(args.seed).ok_or_else(|| {
        anyhow!(
            "seed {} not found in catalog {}",
            args.seed,
            runtime.catalog_path.display()
        )
    })?;
    let report = SeedReport::new(&seed, &runtime.config);
    if args.json {
        output::print_json(&report)
    } else {
        output::print_seed(&report);
        Ok(())
    }
}

fn run_slots(runtime: &Runtime, args: &SlotsArgs) -> Result<()> {
    let report = SlotsReport {
        map_type: runtime.config.config.locale.map_label(args.map).to_string(),
        slots: slots_for(args.map).to_vec(),
    };
    if args.json {
        output::print_json(&report)
    } else {
        output::print_slots(&report);
        Ok(())
    }
}

fn run_locate(runtime: &Runtime, args: &LocateArgs) -> Result<()> {
    if runtime.catalog.seed_by_number(args.seed).is_none() {
        return Err(anyhow!(
            "seed {} not found in catalog {}",
            args.seed,
            runtime.catalog_path.display()
        ));
    }
    let kind = runtime
        .catalog
        .poi_type_at_coordinate(args.seed, args.x, args.y, args.tolerance);
    let report = LocateReport {
        seed_number: args.seed,
        x: args.x,
        y: args.y,
        tolerance: args.tolerance,
        found: kind.is_some(),
        kind,
    };
    if args.json {
        output::print_json(&report)
    } else {
        output::print_locate(&report);
        Ok(())
    }
}

fn run_status(runtime: &Runtime, args: &StatusArgs) -> Result<()> {
    let config = &runtime.config.config;
    let report = StatusReport {
        config_path: runtime
            .config
            .source
            .as_ref()
            .map(|path| path.display().to_string()),
        catalog_path: runtime.catalog_path.display().to_string(),
        ground_truth: config.ground_truth.resolve(&runtime.catalog),
        locale: config.locale,
        summary: runtime.catalog.summary(),
    };
    if args.json {
        output::print_json(&report)
    } else {
        output::print_status(&report);
        Ok(())
    }
}
