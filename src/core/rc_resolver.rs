// src/core/rc_resolver.rs

//! # Rc Resolver
//!
//! Loads rc files and everything they import into a flat, ordered model:
//! the list of files in load order, and the option words grouped by keyword.
//!
//! Imports are followed depth-first at the point where the `import` line
//! appears, so an imported file's options land between the options of the
//! lines around it. A file imported twice is parsed twice and gets two
//! indices. A file that imports itself, directly or through other files,
//! is rejected.

use crate::{
    constants::{IMPORT_KEYWORD, RC_COMMENT_CHAR, STARTUP_KEYWORD},
    core::{
        error::ConfigError,
        tokenizer::{join_continuations, tokenize},
    },
    models::{RcFile, RcOption, RcOptions, StartupNotice},
    system::fs::{is_readable_file, make_absolute, read_lossy},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything learned from a set of root rc files.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RcResolution {
    /// Files in load order; `files[i].index == i`.
    pub files: Vec<RcFile>,
    /// Option words by keyword, in read order within each keyword.
    pub options: RcOptions,
    /// One notice per file that declared `startup` options.
    pub notices: Vec<StartupNotice>,
}

impl RcResolution {
    /// The `startup` options, in read order.
    pub fn startup_options(&self) -> &[RcOption] {
        self.options
            .get(STARTUP_KEYWORD)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Looks up a file by the index recorded on its options.
    pub fn file(&self, index: usize) -> Option<&RcFile> {
        self.files.get(index)
    }
}

/// Accumulates rc files into an [`RcResolution`].
///
/// Relative paths, both for roots and for `import` targets, are read relative
/// to `cwd` but recorded as written.
#[derive(Debug)]
pub struct RcResolver<'a> {
    cwd: &'a Path,
    resolution: RcResolution,
}

impl<'a> RcResolver<'a> {
    pub fn new(cwd: &'a Path) -> Self {
        Self {
            cwd,
            resolution: RcResolution::default(),
        }
    }

    /// Registers `path` as a new root file and parses it with its imports.
    /// The caller has already checked that the file is readable.
    pub fn resolve(&mut self, path: &Path) -> Result<(), ConfigError> {
        let index = self.register(path);
        self.parse_file(path, index, &[path.to_path_buf()])
    }

    pub fn finish(self) -> RcResolution {
        self.resolution
    }

    fn register(&mut self, path: &Path) -> usize {
        let index = self.resolution.files.len();
        self.resolution.files.push(RcFile::new(path, index));
        index
    }

    /// Parses one file. `import_chain` holds the files currently open, from the
    /// root down to and including `path`.
    fn parse_file(
        &mut self,
        path: &Path,
        index: usize,
        import_chain: &[PathBuf],
    ) -> Result<(), ConfigError> {
        log::debug!("Parsing rc file '{}' (index {}).", path.display(), index);

        let contents = read_lossy(&make_absolute(path, self.cwd)).map_err(|source| {
            ConfigError::UnreadableExpectedFile {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let contents = join_continuations(&contents);

        let mut startup_options = Vec::new();

        for raw_line in contents.split('\n') {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            let words = tokenize(line, RC_COMMENT_CHAR);
            let Some((keyword, rest)) = words.split_first() else {
                continue;
            };

            if keyword == IMPORT_KEYWORD {
                let [target] = rest else {
                    return Err(ConfigError::MalformedImport {
                        file: path.to_path_buf(),
                        line: line.to_string(),
                    });
                };
                self.import(path, Path::new(target), import_chain)?;
                continue;
            }

            let entries = self.resolution.options.entry(keyword.clone()).or_default();
            for word in rest {
                entries.push(RcOption::new(index, word.as_str()));
            }
            if keyword == STARTUP_KEYWORD {
                startup_options.extend(rest.iter().cloned());
            }
        }

        if !startup_options.is_empty() {
            let notice = StartupNotice {
                path: path.to_path_buf(),
                options: startup_options,
            };
            log::info!("{}", notice);
            self.resolution.notices.push(notice);
        }

        Ok(())
    }

    fn import(
        &mut self,
        importer: &Path,
        target: &Path,
        import_chain: &[PathBuf],
    ) -> Result<(), ConfigError> {
        if import_chain.iter().any(|open| open == target) {
            let mut chain = import_chain.to_vec();
            chain.push(target.to_path_buf());
            return Err(ConfigError::ImportCycle { chain });
        }

        if !is_readable_file(&make_absolute(target, self.cwd)) {
            return Err(ConfigError::UnreadableImport {
                file: importer.to_path_buf(),
                target: target.to_path_buf(),
            });
        }

        log::debug!(
            "'{}' imports '{}'.",
            importer.display(),
            target.display()
        );

        let index = self.register(target);
        let mut chain = import_chain.to_vec();
        chain.push(target.to_path_buf());
        self.parse_file(target, index, &chain)
    }
}

/// Resolves `roots` in order into a single [`RcResolution`].
pub fn resolve_all(roots: &[PathBuf], cwd: &Path) -> Result<RcResolution, ConfigError> {
    let mut resolver = RcResolver::new(cwd);
    for root in roots {
        resolver.resolve(root)?;
    }
    Ok(resolver.finish())
}
