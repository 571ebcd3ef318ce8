// src/cli/mod.rs

use clap::Parser;
use std::path::PathBuf;

pub mod output;

/// Name reported as `args[0]` to option processing.
pub const LAUNCHER_NAME: &str = "blaze";

/// blaze-options: resolves the startup options and backend arguments a
/// `blaze` invocation would use, without starting anything.
///
/// Everything after `--` is taken as the launcher's own arguments, e.g.
/// `blaze-options -- --batch build //pkg:all`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Workspace root used to locate rc files.
    ///
    /// Defaults to the nearest ancestor of the working directory that holds a
    /// `WORKSPACE` file, or the working directory itself.
    #[arg(long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Working directory reported to the backend and used for relative paths.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Print the full resolution as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// The launcher arguments (without the launcher's own name).
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

impl Cli {
    /// The argument vector as the launcher would receive it, `args[0]` included.
    pub fn launcher_args(&self) -> Vec<String> {
        std::iter::once(LAUNCHER_NAME.to_string())
            .chain(self.args.iter().cloned())
            .collect()
    }
}
