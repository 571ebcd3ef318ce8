// src/bin/blaze-options.rs

use anyhow::{Context, Result};
use blaze_options::{
    cli::{Cli, output},
    core::{discovery::find_workspace, error::ConfigError, option_processor::OptionProcessor},
    system::environment::ProcessEnvironment,
};
use clap::Parser;
use colored::*;
use std::path::PathBuf;

/// The main entry point of `blaze-options`.
/// It sets up logging, parses arguments, runs option processing, and performs
/// centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        // Resolution errors carry their own exit class; everything else is a
        // plain failure.
        let code = e
            .downcast_ref::<ConfigError>()
            .map(|config_err| config_err.exit_code().code())
            .unwrap_or(1);

        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(code);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let cwd = match &cli.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Could not determine the current directory")?,
    };
    let cwd = dunce::simplified(&cwd).to_path_buf();
    let workspace: PathBuf = cli
        .workspace
        .clone()
        .or_else(|| find_workspace(&cwd))
        .unwrap_or_else(|| cwd.clone());
    log::debug!("Workspace: '{}', cwd: '{}'", workspace.display(), cwd.display());

    let env = ProcessEnvironment;
    let parsed = OptionProcessor::new(&env).parse_options(&cli.launcher_args(), &workspace, &cwd)?;

    for notice in &parsed.notices {
        eprintln!("INFO: {}", notice);
    }

    if cli.json {
        println!("{}", output::render_json(&parsed)?);
    } else {
        print!("{}", output::render_text(&parsed));
    }
    Ok(())
}
