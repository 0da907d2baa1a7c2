//! Runtime configuration for the CLI.
//!
//! Table location and the normal/t threshold come from flags first, then from
//! GEOSTAT_TABLE_DIR and GEOSTAT_MIN_N, then from the compiled-in defaults.

use std::path::PathBuf;
use std::sync::Arc;

use geostat_pvalue::{EngineConfig, PValueEngine};
use geostat_tables::TableCatalog;
use log::{debug, warn};

pub const TABLE_DIR_VAR: &str = "GEOSTAT_TABLE_DIR";
pub const MIN_N_VAR: &str = "GEOSTAT_MIN_N";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub table_dir: Option<PathBuf>,
    pub engine: EngineConfig,
}

impl Settings {
    /// Resolve settings from an explicit `--tables` flag and a variable lookup.
    pub fn resolve(
        table_flag: Option<PathBuf>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let table_dir = table_flag.or_else(|| lookup(TABLE_DIR_VAR).map(PathBuf::from));

        let mut engine = EngineConfig::default();
        if let Some(s) = lookup(MIN_N_VAR) {
            match s.trim().parse::<u32>() {
                Ok(n) if n > 0 => engine.min_n = n,
                _ => return Err(format!("{MIN_N_VAR} must be a positive integer, got '{s}'")),
            }
        }

        Ok(Self { table_dir, engine })
    }

    pub fn from_env(table_flag: Option<PathBuf>) -> Result<Self, String> {
        Self::resolve(table_flag, |name| std::env::var(name).ok())
    }

    pub fn engine(&self) -> PValueEngine {
        let catalog = match &self.table_dir {
            Some(dir) => {
                debug!("reading tables from {}", dir.display());
                if !dir.is_dir() {
                    warn!("table directory {} does not exist", dir.display());
                }
                Arc::new(TableCatalog::from_directory(dir.clone()))
            }
            None => TableCatalog::embedded(),
        };
        PValueEngine::with_config(catalog, self.engine)
    }
}
