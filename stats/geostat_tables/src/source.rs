//! Where table data comes from.
//!
//! The tables never locate their own files. A [`TableResolver`] is handed to the
//! [`TableCatalog`](crate::TableCatalog) and asked for the text of each table by
//! [`TableId`]. Two resolvers ship with the crate: the tables compiled into the
//! binary, and a directory of CSV files with the same names.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Result, TableError};
use crate::tails::Tails;

/// The distribution tables the catalog knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableId {
    /// Area between the mean and z, keyed by z.
    Normal,
    /// Student's t critical values by single-tail probability.
    StudentTOneTail,
    /// Student's t critical values by two-sided probability.
    StudentTTwoTail,
    /// Chi-square critical values by upper-tail probability.
    ChiSquare,
}

impl TableId {
    /// Every table, in catalog order
    pub const ALL: [TableId; 4] = [
        TableId::Normal,
        TableId::StudentTOneTail,
        TableId::StudentTTwoTail,
        TableId::ChiSquare,
    ];

    /// The Student's t table for the given tail convention.
    pub fn student_t(tails: Tails) -> Self {
        match tails {
            Tails::One => TableId::StudentTOneTail,
            Tails::Two => TableId::StudentTTwoTail,
        }
    }

    /// File name used by [`DirectoryTables`].
    pub fn file_name(self) -> &'static str {
        match self {
            TableId::Normal => "normal_table.csv",
            TableId::StudentTOneTail => "students_t_table_one_tail.csv",
            TableId::StudentTTwoTail => "students_t_table_two_tail.csv",
            TableId::ChiSquare => "chi_square_table.csv",
        }
    }

    /// Header of the row-key column.
    pub fn row_key_name(self) -> &'static str {
        match self {
            TableId::Normal => "z",
            _ => "df",
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableId::Normal => "normal",
            TableId::StudentTOneTail => "one-tailed Student's t",
            TableId::StudentTTwoTail => "two-tailed Student's t",
            TableId::ChiSquare => "chi-square",
        };
        f.write_str(name)
    }
}

/// Supplies the CSV text of a table.
pub trait TableResolver: fmt::Debug + Send + Sync {
    /// Label used in errors and logs, typically a path.
    fn describe(&self, id: TableId) -> String;

    /// Read the full CSV text of `id`.
    fn read(&self, id: TableId) -> Result<String>;
}

/// The tables compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTables;

impl EmbeddedTables {
    fn text(id: TableId) -> &'static str {
        match id {
            TableId::Normal => include_str!("../tables/normal_table.csv"),
            TableId::StudentTOneTail => include_str!("../tables/students_t_table_one_tail.csv"),
            TableId::StudentTTwoTail => include_str!("../tables/students_t_table_two_tail.csv"),
            TableId::ChiSquare => include_str!("../tables/chi_square_table.csv"),
        }
    }
}

impl TableResolver for EmbeddedTables {
    fn describe(&self, id: TableId) -> String {
        format!("embedded:{}", id.file_name())
    }

    fn read(&self, id: TableId) -> Result<String> {
        Ok(Self::text(id).to_string())
    }
}

/// A directory holding CSV files named by [`TableId::file_name`].
#[derive(Debug, Clone)]
pub struct DirectoryTables {
    root: PathBuf,
}

impl DirectoryTables {
    /// Resolve tables under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory being read.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, id: TableId) -> PathBuf {
        self.root.join(id.file_name())
    }
}

impl TableResolver for DirectoryTables {
    fn describe(&self, id: TableId) -> String {
        self.path(id).display().to_string()
    }

    fn read(&self, id: TableId) -> Result<String> {
        let path = self.path(id);
        debug!("reading {id} table from {}", path.display());
        fs::read_to_string(&path)
            .map_err(|e| TableError::load(path.display().to_string(), e.to_string()))
    }
}
