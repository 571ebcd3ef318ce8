// src/core/flags.rs

//! Small matchers for the two startup flag shapes.

use crate::constants::HELP_ALIASES;

/// How an argument relates to a unary flag `--key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryMatch<'a> {
    /// The argument is some other flag.
    NoMatch,
    /// `--key=value`: one token.
    Inline(&'a str),
    /// `--key value`: two tokens.
    Separate(&'a str),
    /// `--key` with nothing after it.
    MissingValue,
}

impl<'a> UnaryMatch<'a> {
    pub fn value(self) -> Option<&'a str> {
        match self {
            Self::Inline(v) | Self::Separate(v) => Some(v),
            Self::NoMatch | Self::MissingValue => None,
        }
    }
}

/// Matches `arg` (and possibly `next`) against the unary flag `key`.
pub fn match_unary<'a>(arg: &'a str, next: Option<&'a str>, key: &str) -> UnaryMatch<'a> {
    let Some(rest) = arg.strip_prefix(key) else {
        return UnaryMatch::NoMatch;
    };
    if rest.is_empty() {
        return match next {
            Some(value) => UnaryMatch::Separate(value),
            None => UnaryMatch::MissingValue,
        };
    }
    match rest.strip_prefix('=') {
        Some(value) => UnaryMatch::Inline(value),
        None => UnaryMatch::NoMatch,
    }
}

/// How an argument relates to a nullary flag `--key` / `--nokey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullaryMatch {
    NoMatch,
    Set(bool),
    /// `--key=...` or `--nokey=...`.
    HasValue,
}

/// Matches `arg` against the nullary flag named `name` (without dashes).
pub fn match_nullary(arg: &str, name: &str) -> NullaryMatch {
    let Some(body) = arg.strip_prefix("--") else {
        return NullaryMatch::NoMatch;
    };
    let (negated, body) = match body.strip_prefix("no") {
        Some(stripped) if stripped.starts_with(name) => (true, stripped),
        _ => (false, body),
    };
    let Some(rest) = body.strip_prefix(name) else {
        return NullaryMatch::NoMatch;
    };
    if rest.is_empty() {
        NullaryMatch::Set(!negated)
    } else if rest.starts_with('=') {
        NullaryMatch::HasValue
    } else {
        NullaryMatch::NoMatch
    }
}

/// True if `arg` looks like a startup flag: it starts with a dash and is not
/// one of the help spellings.
pub fn is_startup_arg(arg: &str) -> bool {
    arg.starts_with('-') && !HELP_ALIASES.contains(&arg)
}
