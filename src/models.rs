// src/models.rs

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// One loaded rc file. `index` is its position in load order and is only ever
/// used as an origin tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RcFile {
    pub path: PathBuf,
    pub index: usize,
}

impl RcFile {
    pub fn new(path: impl Into<PathBuf>, index: usize) -> Self {
        Self {
            path: path.into(),
            index,
        }
    }
}

/// A single option word read from an rc file, tagged with the index of the
/// file it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RcOption {
    pub rcfile_index: usize,
    pub option: String,
}

impl RcOption {
    pub fn new(rcfile_index: usize, option: impl Into<String>) -> Self {
        Self {
            rcfile_index,
            option: option.into(),
        }
    }
}

/// Options grouped by rc keyword (`startup`, `build`, ...). Within a keyword the
/// order is the order in which the words were read.
pub type RcOptions = BTreeMap<String, Vec<RcOption>>;

/// Where a startup option value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum OptionOrigin {
    CommandLine,
    RcFile(PathBuf),
}

impl OptionOrigin {
    pub fn rc_file(path: &Path) -> Self {
        Self::RcFile(path.to_path_buf())
    }
}

impl fmt::Display for OptionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandLine => write!(f, "the command line"),
            Self::RcFile(path) => write!(f, "rc file '{}'", path.display()),
        }
    }
}

/// Informational record of the `startup` options one file contributed.
/// Imports report their own notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupNotice {
    pub path: PathBuf,
    pub options: Vec<String>,
}

impl fmt::Display for StartupNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reading 'startup' options from {}: {}",
            self.path.display(),
            self.options.join(" ")
        )
    }
}
