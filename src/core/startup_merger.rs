// src/core/startup_merger.rs

//! Merges rc-file `startup` options and command-line startup flags into one
//! [`StartupOptions`], and finds where the command begins.
//!
//! Application order is fixed: every rc `startup` word in collection order,
//! then the leading flags of the command line. The command line therefore
//! always wins.

use crate::{
    core::{
        error::ConfigError,
        flags::is_startup_arg,
        rc_resolver::RcResolution,
        startup_options::{StartupOptions, StartupOptionsBuilder},
    },
    models::OptionOrigin,
};

/// Result of merging.
#[derive(Debug, Clone)]
pub struct MergedStartup {
    pub options: StartupOptions,
    /// How many arguments after `args[0]` were startup flags or their values.
    /// The command, if any, is `args[startup_args + 1]`.
    pub startup_args: usize,
}

/// Applies rc `startup` options, then command-line startup flags.
pub fn merge_startup_options(
    resolution: &RcResolution,
    args: &[String],
    defaults: StartupOptions,
    cwd: &std::path::Path,
) -> Result<MergedStartup, ConfigError> {
    let mut builder = StartupOptionsBuilder::new(defaults, cwd);
    apply_rc_startup_options(&mut builder, resolution)?;
    let startup_args = apply_command_line(&mut builder, args)?;
    Ok(MergedStartup {
        options: builder.build(),
        startup_args,
    })
}

fn apply_rc_startup_options(
    builder: &mut StartupOptionsBuilder<'_>,
    resolution: &RcResolution,
) -> Result<(), ConfigError> {
    let entries = resolution.startup_options();
    let mut i = 0;

    while let Some(entry) = entries.get(i) {
        let origin = resolution
            .file(entry.rcfile_index)
            .map(|file| OptionOrigin::rc_file(&file.path))
            .unwrap_or(OptionOrigin::CommandLine);

        match entries.get(i + 1) {
            Some(next) => {
                if builder.apply(&entry.option, Some(next.option.as_str()), &origin)? {
                    i += 1;
                }
            }
            // The last word only counts if it looks like a flag; a stray
            // value at the end has nothing to attach to.
            None if is_startup_arg(&entry.option) => {
                builder.apply(&entry.option, None, &origin)?;
            }
            None => log::debug!(
                "Ignoring trailing startup word '{}' from {}.",
                entry.option,
                origin
            ),
        }
        i += 1;
    }
    Ok(())
}

/// Applies the leading flags of `args` (skipping `args[0]`) and returns the
/// number of arguments they used.
fn apply_command_line(
    builder: &mut StartupOptionsBuilder<'_>,
    args: &[String],
) -> Result<usize, ConfigError> {
    let origin = OptionOrigin::CommandLine;
    let mut i = 1;

    while let Some(arg) = args.get(i) {
        if !is_startup_arg(arg) {
            break;
        }
        let next = args.get(i + 1).map(String::as_str);
        if builder.apply(arg, next, &origin)? {
            i += 1;
        }
        i += 1;
    }

    Ok(i.saturating_sub(1))
}
