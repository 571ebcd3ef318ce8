// src/core/option_processor.rs

//! # Option Processor
//!
//! Entry point of option resolution. Given the raw launcher arguments, it:
//!
//! 1. **Discovers** the rc roots (shared master rc, then user rc).
//! 2. **Resolves** them, following imports, into files and per-keyword options.
//! 3. **Merges** rc `startup` options with leading command-line flags.
//! 4. **Identifies** the command: the first argument after the startup flags.
//! 5. **Builds** the arguments for the backend: rc provenance, every
//!    non-startup rc option as an origin-tagged default, client context, and
//!    finally the user's own arguments.
//!
//! Any failure aborts the whole run; nothing is partially resolved.

use crate::{
    core::{
        command_args::build_injected_arguments,
        discovery::discover,
        error::ConfigError,
        rc_resolver::{RcResolution, resolve_all},
        startup_merger::merge_startup_options,
        startup_options::StartupOptions,
    },
    models::{RcFile, RcOptions, StartupNotice},
    system::environment::ClientEnvironment,
};
use serde::Serialize;
use std::path::Path;

/// The complete result of option processing.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedOptions {
    pub rc_files: Vec<RcFile>,
    pub rc_options: RcOptions,
    pub startup_options: StartupOptions,
    /// Number of arguments after `args[0]` consumed as startup flags.
    pub startup_args: usize,
    command: Option<String>,
    /// Arguments injected by the launcher; empty when there is no command.
    injected_arguments: Vec<String>,
    /// The user's arguments after the command, untouched.
    trailing_arguments: Vec<String>,
    pub notices: Vec<StartupNotice>,
}

impl ParsedOptions {
    /// The command, or `None` if the arguments end with the startup flags.
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// Injected arguments followed by the user's arguments after the command.
    pub fn command_arguments(&self) -> Vec<String> {
        self.injected_arguments
            .iter()
            .chain(&self.trailing_arguments)
            .cloned()
            .collect()
    }

    /// The full argument vector for the backend: injected arguments, the
    /// command, then the user's arguments. Empty when there is no command.
    pub fn backend_argv(&self) -> Vec<String> {
        let Some(command) = &self.command else {
            return Vec::new();
        };
        self.injected_arguments
            .iter()
            .chain(std::iter::once(command))
            .chain(&self.trailing_arguments)
            .cloned()
            .collect()
    }

    pub fn trailing_arguments(&self) -> &[String] {
        &self.trailing_arguments
    }
}

/// Runs option processing against one client environment.
pub struct OptionProcessor<'a> {
    env: &'a dyn ClientEnvironment,
}

impl std::fmt::Debug for OptionProcessor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionProcessor").finish_non_exhaustive()
    }
}

impl<'a> OptionProcessor<'a> {
    pub fn new(env: &'a dyn ClientEnvironment) -> Self {
        Self { env }
    }

    /// Processes `args` (including `args[0]`, the launcher's own name).
    ///
    /// `workspace` anchors rc discovery; `cwd` is where relative paths are
    /// resolved and is reported to the backend.
    pub fn parse_options(
        &self,
        args: &[String],
        workspace: &Path,
        cwd: &Path,
    ) -> Result<ParsedOptions, ConfigError> {
        log::debug!(
            "Processing {} argument(s) in workspace '{}'.",
            args.len(),
            workspace.display()
        );

        let roots = discover(args, workspace, cwd, self.env)?;
        let resolution = resolve_all(&roots, cwd)?;

        let defaults = StartupOptions::with_defaults(self.env);
        let merged = merge_startup_options(&resolution, args, defaults, cwd)?;

        let command_index = merged.startup_args + 1;
        let command = args.get(command_index).cloned();

        let (injected_arguments, trailing_arguments) = match &command {
            Some(name) => {
                log::debug!("Command is '{}'.", name);
                (
                    build_injected_arguments(
                        &resolution,
                        merged.options.batch,
                        cwd,
                        self.env,
                    ),
                    args.get(command_index + 1..)
                        .map(<[String]>::to_vec)
                        .unwrap_or_default(),
                )
            }
            None => {
                log::debug!("No command given.");
                (Vec::new(), Vec::new())
            }
        };

        let RcResolution {
            files,
            options,
            notices,
        } = resolution;

        Ok(ParsedOptions {
            rc_files: files,
            rc_options: options,
            startup_options: merged.options,
            startup_args: merged.startup_args,
            command,
            injected_arguments,
            trailing_arguments,
            notices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MASTER_BLAZERC_PATH;
    use crate::models::OptionOrigin;
    use crate::system::environment::{FixedEnvironment, TerminalInfo};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    struct Workspace {
        _dir: TempDir,
        root: PathBuf,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let root = dir.path().to_path_buf();
            Self { _dir: dir, root }
        }

        fn write(&self, relative: &str, content: &str) -> PathBuf {
            let path = self.root.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
            path
        }
    }

    fn env() -> FixedEnvironment {
        FixedEnvironment::new()
            .with_var("PATH", "/bin")
            .with_var("TERM", "xterm")
            .with_terminal(TerminalInfo {
                is_tty: false,
                columns: 100,
            })
    }

    #[test]
    fn test_command_and_trailing_arguments() {
        let ws = Workspace::new();
        let env = env();
        let parsed = OptionProcessor::new(&env)
            .parse_options(&args(&["blaze", "--batch", "build", "--flag"]), &ws.root, &ws.root)
            .unwrap();

        assert_eq!(parsed.command(), Some("build"));
        assert_eq!(parsed.trailing_arguments(), ["--flag"]);
        assert_eq!(parsed.startup_args, 1);
        assert!(parsed.startup_options.batch);
        assert_eq!(
            parsed.command_arguments(),
            vec![
                "--isatty=0".to_string(),
                "--terminal_columns=100".to_string(),
                "--ignore_client_env".to_string(),
                format!("--client_cwd={}", ws.root.display()),
                "--flag".to_string(),
            ]
        );
    }

    #[test]
    fn test_no_command() {
        let ws = Workspace::new();
        let env = env();
        let parsed = OptionProcessor::new(&env)
            .parse_options(&args(&["blaze", "--batch"]), &ws.root, &ws.root)
            .unwrap();
        assert_eq!(parsed.command(), None);
        assert!(parsed.command_arguments().is_empty());
        assert!(parsed.backend_argv().is_empty());
    }

    #[test]
    fn test_help_is_the_command() {
        let ws = Workspace::new();
        let env = env();
        let parsed = OptionProcessor::new(&env)
            .parse_options(&args(&["blaze", "--help"]), &ws.root, &ws.root)
            .unwrap();
        assert_eq!(parsed.command(), Some("--help"));
    }

    #[test]
    fn test_full_pipeline_with_master_and_user_rc() {
        let ws = Workspace::new();
        let child = ws.write("common.rc", "build --common\n");
        let master = ws.write(
            MASTER_BLAZERC_PATH,
            &format!("startup --max_idle_secs=10\nimport {}\nbuild --master\n", child.display()),
        );
        let user = ws.write(".blazerc", "startup --batch\ntest --user\n");

        let env = env();
        let parsed = OptionProcessor::new(&env)
            .parse_options(&args(&["blaze", "test", "//pkg:all"]), &ws.root, &ws.root)
            .unwrap();

        assert_eq!(
            parsed.rc_files,
            vec![
                RcFile::new(&master, 0),
                RcFile::new(&child, 1),
                RcFile::new(&user, 2)
            ]
        );
        assert!(parsed.startup_options.batch);
        assert_eq!(parsed.startup_options.max_idle_secs, 10);
        assert_eq!(
            parsed.startup_options.origin_of("batch"),
            Some(&OptionOrigin::RcFile(user.clone()))
        );
        assert_eq!(parsed.notices.len(), 2);

        let argv = parsed.backend_argv();
        let expected_prefix = vec![
            format!("--rc_source={}", master.display()),
            format!("--rc_source={}", child.display()),
            format!("--rc_source={}", user.display()),
            "--default_override=1:build=--common".to_string(),
            "--default_override=0:build=--master".to_string(),
            "--default_override=2:test=--user".to_string(),
            "--isatty=0".to_string(),
            "--terminal_columns=100".to_string(),
            "--ignore_client_env".to_string(),
            format!("--client_cwd={}", ws.root.display()),
            "test".to_string(),
            "//pkg:all".to_string(),
        ];
        assert_eq!(argv, expected_prefix);
    }

    #[test]
    fn test_server_mode_forwards_environment() {
        let ws = Workspace::new();
        let env = env().with_var("EMACS", "t");
        let parsed = OptionProcessor::new(&env)
            .parse_options(&args(&["blaze", "build"]), &ws.root, &ws.root)
            .unwrap();

        let argv = parsed.command_arguments();
        let client_env: Vec<_> = argv.iter().filter(|a| a.starts_with("--client_env=")).collect();
        assert_eq!(client_env.len(), 3);
        assert_eq!(client_env[0], "--client_env=PATH=/bin");
        assert!(argv.contains(&"--emacs".to_string()));
        assert!(!argv.contains(&"--ignore_client_env".to_string()));
    }

    #[test]
    fn test_nomaster_blazerc_skips_shared_file() {
        let ws = Workspace::new();
        ws.write(MASTER_BLAZERC_PATH, "build --master\n");
        let env = env();
        let parsed = OptionProcessor::new(&env)
            .parse_options(
                &args(&["blaze", "--nomaster_blazerc", "build"]),
                &ws.root,
                &ws.root,
            )
            .unwrap();
        assert!(parsed.rc_files.is_empty());
        assert!(!parsed.startup_options.use_master_blazerc);
    }

    #[test]
    fn test_explicit_blazerc_replaces_workspace_rc() {
        let ws = Workspace::new();
        ws.write(".blazerc", "build --workspace_rc\n");
        let custom = ws.write("custom.rc", "build --custom\n");
        let env = env();
        let parsed = OptionProcessor::new(&env)
            .parse_options(
                &args(&["blaze", "--blazerc=custom.rc", "build"]),
                &ws.root,
                &ws.root,
            )
            .unwrap();
        assert_eq!(parsed.rc_files, vec![RcFile::new(&custom, 0)]);
        assert_eq!(parsed.startup_options.blazerc, Some(custom));
    }

    #[test]
    fn test_missing_explicit_blazerc_fails() {
        let ws = Workspace::new();
        let env = env();
        let err = OptionProcessor::new(&env)
            .parse_options(
                &args(&["blaze", "--blazerc", "nope.rc", "build"]),
                &ws.root,
                &ws.root,
            )
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnreadableFile { .. }));
    }

    #[test]
    fn test_import_cycle_aborts() {
        let ws = Workspace::new();
        let a = ws.root.join("a.rc");
        ws.write(".blazerc", &format!("import {}\n", a.display()));
        ws.write("a.rc", &format!("import {}\n", ws.root.join(".blazerc").display()));
        let env = env();
        let err = OptionProcessor::new(&env)
            .parse_options(&args(&["blaze", "build"]), &ws.root, &ws.root)
            .unwrap_err();
        assert!(matches!(err, ConfigError::ImportCycle { ref chain } if chain.len() == 3));
    }
}
