//! Location of the on-disk record tables.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the data root.
pub const DATA_ENV: &str = "GRAM_ENGINE_DATA";

/// Directory layout of the irrep and vertex tables.
///
/// ```text
/// <root>/irreps/<S>/<S><rank:02>-irreps.tsv
/// <root>/vertices/<S>/<S><rank:02>-vertices.tsv
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    pub root: PathBuf,
}

impl Default for DataLayout {
    fn default() -> Self {
        Self {
            root: PathBuf::from("data"),
        }
    }
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root from `GRAM_ENGINE_DATA`, or `./data` when unset.
    pub fn from_env() -> Self {
        env::var_os(DATA_ENV)
            .map(Self::new)
            .unwrap_or_default()
    }

    /// Validate the layout
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.root.as_os_str().is_empty() {
            return Err("data root must not be empty");
        }
        if !self.root.is_dir() {
            return Err("data root must be an existing directory");
        }
        Ok(())
    }

    /// Table identifier such as `D04`.
    pub fn group_id(series: char, rank: u32) -> String {
        format!("{series}{rank:02}")
    }

    pub fn irreps_path(&self, series: char, rank: u32) -> PathBuf {
        self.table_path("irreps", series, rank)
    }

    pub fn vertices_path(&self, series: char, rank: u32) -> PathBuf {
        self.table_path("vertices", series, rank)
    }

    fn table_path(&self, kind: &str, series: char, rank: u32) -> PathBuf {
        let group_id = Self::group_id(series, rank);
        self.root
            .join(kind)
            .join(series.to_string())
            .join(format!("{group_id}-{kind}.tsv"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
