// src/cli/output.rs

//! Human and machine renderings of a [`ParsedOptions`].

use crate::core::option_processor::ParsedOptions;
use std::borrow::Cow;
use std::fmt::Write as _;

/// Quotes `arg` for a POSIX shell. Arguments that cannot be quoted (they
/// contain NUL) are shown as-is.
fn quote(arg: &str) -> Cow<'_, str> {
    shlex::try_quote(arg).unwrap_or(Cow::Borrowed(arg))
}

/// A plain-text report: command, rc files, startup option origins and the
/// backend argument vector, one shell-quoted argument per line.
pub fn render_text(parsed: &ParsedOptions) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "command: {}", parsed.command().unwrap_or("(no command)"));
    let _ = writeln!(out, "startup arguments: {}", parsed.startup_args);

    let _ = writeln!(out, "rc files:");
    if parsed.rc_files.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for rc in &parsed.rc_files {
        let _ = writeln!(out, "  [{}] {}", rc.index, rc.path.display());
    }

    let _ = writeln!(out, "startup options set:");
    if parsed.startup_options.option_sources.is_empty() {
        let _ = writeln!(out, "  (defaults only)");
    }
    for (name, origin) in &parsed.startup_options.option_sources {
        let _ = writeln!(out, "  --{name} (from {origin})");
    }

    let _ = writeln!(out, "backend argv:");
    for arg in parsed.backend_argv() {
        let _ = writeln!(out, "  {}", quote(&arg));
    }

    out
}

/// The full resolution as pretty JSON.
pub fn render_json(parsed: &ParsedOptions) -> serde_json::Result<String> {
    serde_json::to_string_pretty(parsed)
}
