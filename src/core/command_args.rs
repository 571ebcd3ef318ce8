// src/core/command_args.rs

//! Builds the options the launcher injects in front of the user's command
//! arguments when it hands a command to the backend.

use crate::{
    constants::{EMACS_ENV_VALUE, EMACS_ENV_VAR, STARTUP_KEYWORD},
    core::rc_resolver::RcResolution,
    system::environment::ClientEnvironment,
};
use std::path::Path;

/// Emits, in order:
///
/// 1. `--rc_source=<path>` for every loaded rc file, by index;
/// 2. `--default_override=<index>:<keyword>=<option>` for every non-startup
///    rc option;
/// 3. `--isatty=<0|1>` and `--terminal_columns=<n>`;
/// 4. `--ignore_client_env` in batch mode, otherwise one `--client_env=K=V`
///    per inherited variable;
/// 5. `--client_cwd=<cwd>`;
/// 6. `--emacs` when `EMACS=t`.
pub fn build_injected_arguments(
    resolution: &RcResolution,
    batch: bool,
    cwd: &Path,
    env: &dyn ClientEnvironment,
) -> Vec<String> {
    let mut args: Vec<String> = resolution
        .files
        .iter()
        .map(|rc| format!("--rc_source={}", rc.path.display()))
        .collect();

    for (keyword, options) in &resolution.options {
        if keyword == STARTUP_KEYWORD {
            // Already consumed by the launcher.
            continue;
        }
        args.extend(options.iter().map(|o| {
            format!("--default_override={}:{}={}", o.rcfile_index, keyword, o.option)
        }));
    }

    let terminal = env.terminal();
    args.push(format!("--isatty={}", u8::from(terminal.is_tty)));
    args.push(format!("--terminal_columns={}", terminal.columns));

    if batch {
        args.push("--ignore_client_env".to_string());
    } else {
        args.extend(
            env.vars()
                .into_iter()
                .map(|(name, value)| format!("--client_env={name}={value}")),
        );
    }

    args.push(format!("--client_cwd={}", cwd.display()));

    if env.var(EMACS_ENV_VAR).as_deref() == Some(EMACS_ENV_VALUE) {
        args.push("--emacs".to_string());
    }

    args
}
