//! Lazily loaded, shared distribution tables.
//!
//! A [`TableCatalog`] owns a [`TableResolver`] and builds each table the first
//! time it is asked for. Construction is guarded so every table is built at most
//! once per catalog even when several threads race for it. Once built, a table
//! is handed out as an `Arc` and read without locking. Failed loads are not
//! cached; the next request tries again and reports the same error.
//!
//! [`TableCatalog::embedded`] returns a process-wide catalog over the tables
//! compiled into the crate.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use lazy_static::lazy_static;
use log::{debug, info};
use parking_lot::Mutex;

use crate::chi_square::ChiSquareTable;
use crate::error::Result;
use crate::grid::{load_rectangular_table, Grid};
use crate::normal::NormalTable;
use crate::source::{DirectoryTables, EmbeddedTables, TableId, TableResolver};
use crate::student_t::StudentTTable;
use crate::tails::Tails;

lazy_static! {
    static ref EMBEDDED_CATALOG: Arc<TableCatalog> = Arc::new(TableCatalog::new(EmbeddedTables));
}

/// Shared access to the four distribution tables.
pub struct TableCatalog {
    resolver: Box<dyn TableResolver>,
    normal: OnceLock<Arc<NormalTable>>,
    t_one_tail: OnceLock<Arc<StudentTTable>>,
    t_two_tail: OnceLock<Arc<StudentTTable>>,
    chi_square: OnceLock<Arc<ChiSquareTable>>,
    init: Mutex<()>,
    loads: AtomicUsize,
}

impl TableCatalog {
    /// A catalog reading tables through `resolver`.
    pub fn new(resolver: impl TableResolver + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
            normal: OnceLock::new(),
            t_one_tail: OnceLock::new(),
            t_two_tail: OnceLock::new(),
            chi_square: OnceLock::new(),
            init: Mutex::new(()),
            loads: AtomicUsize::new(0),
        }
    }

    /// A catalog reading CSV files from `root`.
    pub fn from_directory(root: impl Into<std::path::PathBuf>) -> Self {
        Self::new(DirectoryTables::new(root))
    }

    /// The process-wide catalog over the embedded tables.
    pub fn embedded() -> Arc<TableCatalog> {
        Arc::clone(&EMBEDDED_CATALOG)
    }

    /// The resolver tables are read through.
    pub fn resolver(&self) -> &dyn TableResolver {
        self.resolver.as_ref()
    }

    /// The normal table.
    pub fn normal(&self) -> Result<Arc<NormalTable>> {
        self.get_or_load(&self.normal, TableId::Normal, NormalTable::from_grid)
    }

    /// The Student's t table for `tails`.
    pub fn student_t(&self, tails: Tails) -> Result<Arc<StudentTTable>> {
        let cell = match tails {
            Tails::One => &self.t_one_tail,
            Tails::Two => &self.t_two_tail,
        };
        self.get_or_load(cell, TableId::student_t(tails), |grid| {
            StudentTTable::from_grid(grid, tails)
        })
    }

    /// The chi-square table.
    pub fn chi_square(&self) -> Result<Arc<ChiSquareTable>> {
        self.get_or_load(&self.chi_square, TableId::ChiSquare, ChiSquareTable::from_grid)
    }

    /// Read and parse the raw grid for `id`, bypassing the cache.
    pub fn load_grid(&self, id: TableId) -> Result<Grid> {
        let text = self.resolver.read(id)?;
        load_rectangular_table(&self.resolver.describe(id), text.as_bytes(), id.row_key_name())
    }

    /// Build every table now instead of on first use.
    pub fn preload(&self) -> Result<()> {
        self.normal()?;
        self.student_t(Tails::One)?;
        self.student_t(Tails::Two)?;
        self.chi_square()?;
        Ok(())
    }

    /// How many tables this catalog has successfully built.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Acquire)
    }

    fn get_or_load<T>(
        &self,
        cell: &OnceLock<Arc<T>>,
        id: TableId,
        build: impl FnOnce(Grid) -> Result<T>,
    ) -> Result<Arc<T>> {
        if let Some(table) = cell.get() {
            return Ok(Arc::clone(table));
        }

        let _guard = self.init.lock();
        if let Some(table) = cell.get() {
            return Ok(Arc::clone(table));
        }

        debug!("building {id} table from {}", self.resolver.describe(id));
        let table = Arc::new(build(self.load_grid(id)?)?);
        let table = Arc::clone(cell.get_or_init(|| table));
        self.loads.fetch_add(1, Ordering::AcqRel);
        info!("{id} table ready");
        Ok(table)
    }
}

impl fmt::Debug for TableCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableCatalog")
            .field("resolver", &self.resolver)
            .field("normal", &self.normal.get().is_some())
            .field("t_one_tail", &self.t_one_tail.get().is_some())
            .field("t_two_tail", &self.t_two_tail.get().is_some())
            .field("chi_square", &self.chi_square.get().is_some())
            .finish()
    }
}
