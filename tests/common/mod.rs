//! Shared test infrastructure for integration tests.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A temporary workspace holding a small catalog, isolated from any real
/// per-user config.
pub struct CatalogFixture {
    pub dir: TempDir,
    pub catalog_path: PathBuf,
}

impl CatalogFixture {
    pub fn new() -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        let catalog_path = dir.path().join("dataset.json");
        std::fs::write(&catalog_path, serde_json::to_vec_pretty(&sample_catalog())?)?;
        Ok(Self { dir, catalog_path })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run seedscope against the fixture catalog.
    pub fn run(&self, args: &[&str]) -> Output {
        let mut full = vec!["--catalog".to_string(), self.catalog_path.display().to_string()];
        full.extend(args.iter().map(|arg| arg.to_string()));
        self.run_raw(&full)
    }

    /// Run seedscope with exactly `args`.
    pub fn run_raw(&self, args: &[String]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_seedscope"))
            .args(args)
            .current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.path().join("xdg"))
            .env_remove("RUST_LOG")
            .output()
            .expect("run seedscope")
    }

    /// Run with `--json` appended and parse stdout.
    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut args = args.to_vec();
        args.push("--json");
        let output = self.run(&args);
        assert!(
            output.status.success(),
            "seedscope {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout is JSON")
    }
}

fn poi(x: f64, y: f64, kind: &str) -> Value {
    json!({ "coordinates": { "x": x, "y": y }, "type": kind })
}

/// Seeds 1 and 2 differ only at Default slot 1; seed 3 is on the Crater.
pub fn sample_catalog() -> Value {
    json!({
        "poiDatabase": {
            "seeds": {
                "1": {
                    "seedNumber": 1,
                    "nightlord": "Gladius",
                    "mapType": "Default",
                    "pois": { "1": poi(155.0, 551.0, "church"), "2": poi(350.0, 545.0, "village") }
                },
                "2": {
                    "seedNumber": 2,
                    "nightlord": "Gladius",
                    "mapType": "Default",
                    "pois": { "1": poi(152.0, 549.0, "mage"), "2": poi(350.0, 545.0, "village") }
                },
                "3": {
                    "seedNumber": 3,
                    "nightlord": "Caligo",
                    "mapType": "Crater",
                    "pois": { "2": poi(348.0, 545.0, "Great Church") }
                }
            }
        },
        "classifications": {
            "001": { "POI1": "church", "POI2": "nothing" }
        }
    })
}
