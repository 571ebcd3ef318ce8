// src/core/error.rs

use crate::models::OptionOrigin;
use std::fmt::Write as _;
use std::path::PathBuf;
use thiserror::Error;

/// Process exit classes used by the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The user supplied something invalid: a flag, an rc file, an import.
    BadArgv = 2,
    /// Something that was checked a moment ago is no longer true.
    InternalError = 37,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Every way option resolution can fail. All of them are fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read .blazerc file '{}'.", path.display())]
    UnreadableFile { path: PathBuf },

    #[error("Invalid import declaration in .blazerc file '{}': '{line}'", file.display())]
    MalformedImport { file: PathBuf, line: String },

    #[error("Import loop detected:\n{}", render_chain(chain))]
    ImportCycle { chain: Vec<PathBuf> },

    #[error("Unable to read '{}' imported from .blazerc file '{}'.", target.display(), file.display())]
    UnreadableImport { file: PathBuf, target: PathBuf },

    #[error("Unexpected error reading .blazerc file '{}': {source}", path.display())]
    UnreadableExpectedFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown startup option '{option}' (from {origin}).")]
    UnknownOption {
        option: String,
        origin: OptionOrigin,
    },

    #[error("Startup option '{option}' (from {origin}) requires a value.")]
    MissingOptionValue {
        option: String,
        origin: OptionOrigin,
    },

    #[error("In argument '{option}' (from {origin}): option does not take a value.")]
    UnexpectedOptionValue {
        option: String,
        origin: OptionOrigin,
    },

    #[error("Invalid value '{value}' for startup option '{option}' (from {origin}).")]
    InvalidOptionValue {
        option: String,
        value: String,
        origin: OptionOrigin,
    },
}

impl ConfigError {
    /// The exit class for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::UnreadableExpectedFile { .. } => ExitCode::InternalError,
            _ => ExitCode::BadArgv,
        }
    }
}

fn render_chain(chain: &[PathBuf]) -> String {
    chain.iter().fold(String::new(), |mut out, path| {
        let _ = writeln!(out, "  {}", path.display());
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_split_user_and_internal_errors() {
        let cycle = ConfigError::ImportCycle { chain: vec![] };
        assert_eq!(cycle.exit_code(), ExitCode::BadArgv);
        assert_eq!(cycle.exit_code().code(), 2);

        let vanished = ConfigError::UnreadableExpectedFile {
            path: PathBuf::from("/gone"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(vanished.exit_code(), ExitCode::InternalError);
        assert_eq!(vanished.exit_code().code(), 37);
    }

    #[test]
    fn test_import_cycle_lists_every_file() {
        let err = ConfigError::ImportCycle {
            chain: vec![
                PathBuf::from("a.rc"),
                PathBuf::from("b.rc"),
                PathBuf::from("a.rc"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Import loop detected:\n  a.rc\n  b.rc\n  a.rc\n"
        );
    }

    #[test]
    fn test_unknown_option_names_its_origin() {
        let err = ConfigError::UnknownOption {
            option: "--bogus".to_string(),
            origin: OptionOrigin::RcFile(PathBuf::from("/ws/.blazerc")),
        };
        let msg = err.to_string();
        assert!(msg.contains("--bogus"));
        assert!(msg.contains("/ws/.blazerc"));
    }
}
