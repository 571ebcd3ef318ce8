// src/system/environment.rs

//! The launcher's view of the process it runs in: inherited variables, the
//! home directory and the controlling terminal. Resolution code only talks to
//! [`ClientEnvironment`], so tests can hand it a fixed snapshot.

use crate::constants::DEFAULT_TERMINAL_COLUMNS;
use serde::Serialize;
use std::path::PathBuf;

/// Facts about the terminal the launcher was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TerminalInfo {
    pub is_tty: bool,
    pub columns: u16,
}

impl Default for TerminalInfo {
    fn default() -> Self {
        Self {
            is_tty: false,
            columns: DEFAULT_TERMINAL_COLUMNS,
        }
    }
}

/// Read access to the client's environment.
pub trait ClientEnvironment {
    /// Every inherited variable, in enumeration order.
    fn vars(&self) -> Vec<(String, String)>;

    fn var(&self, name: &str) -> Option<String>;

    fn home_dir(&self) -> Option<PathBuf>;

    fn terminal(&self) -> TerminalInfo;
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl ClientEnvironment for ProcessEnvironment {
    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }

    fn var(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        // $HOME wins so that an explicitly redirected home is honoured.
        self.var("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
    }

    fn terminal(&self) -> TerminalInfo {
        let term = console::Term::stderr();
        let is_tty = term.is_term();
        let columns = term
            .size_checked()
            .map(|(_rows, cols)| cols)
            .filter(|&cols| cols > 0)
            .or_else(|| columns_from_env(self.var("COLUMNS")))
            .unwrap_or(DEFAULT_TERMINAL_COLUMNS);
        TerminalInfo { is_tty, columns }
    }
}

/// An immutable snapshot, mainly for tests and for embedding.
#[derive(Debug, Default, Clone)]
pub struct FixedEnvironment {
    vars: Vec<(String, String)>,
    home: Option<PathBuf>,
    terminal: TerminalInfo,
}

impl FixedEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a variable. Replacing keeps the original position.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.vars.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.vars.push((name, value)),
        }
        self
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_terminal(mut self, terminal: TerminalInfo) -> Self {
        self.terminal = terminal;
        self
    }
}

impl ClientEnvironment for FixedEnvironment {
    fn vars(&self) -> Vec<(String, String)> {
        self.vars.clone()
    }

    fn var(&self, name: &str) -> Option<String> {
        self.vars
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn terminal(&self) -> TerminalInfo {
        self.terminal
    }
}

fn columns_from_env(value: Option<String>) -> Option<u16> {
    value
        .and_then(|v| v.trim().parse::<u16>().ok())
        .filter(|&cols| cols > 0)
}
