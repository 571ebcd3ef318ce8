// src/constants.rs

/// Relative location of the shared (team-wide) rc file inside a workspace.
pub const MASTER_BLAZERC_PATH: &str = "tools/blaze.blazerc";

/// Secondary location of the shared rc file, used when `tools/` is not mapped
/// into the client.
pub const MASTER_BLAZERC_FALLBACK_PATH: &str = "../READONLY/google3/tools/blaze.blazerc";

/// File name of the user rc file, looked up in the workspace and then in `$HOME`.
pub const USER_BLAZERC_FILENAME: &str = ".blazerc";

/// The marker file that identifies a workspace root.
pub const WORKSPACE_FILENAME: &str = "WORKSPACE";

/// Startup flag naming an explicit user rc file.
pub const BLAZERC_FLAG: &str = "--blazerc";

/// Startup flag that disables the shared rc file.
pub const NO_MASTER_BLAZERC_FLAG: &str = "--nomaster_blazerc";

/// The rc keyword that pulls another file in.
pub const IMPORT_KEYWORD: &str = "import";

/// The rc keyword whose options are consumed by the launcher itself.
pub const STARTUP_KEYWORD: &str = "startup";

/// Comment marker inside rc files.
pub const RC_COMMENT_CHAR: char = '#';

/// Help spellings that end the startup scan and are treated as the command.
pub const HELP_ALIASES: &[&str] = &["--help", "-help", "-h"];

/// Variable checked for editor integration, and the value that enables it.
pub const EMACS_ENV_VAR: &str = "EMACS";
pub const EMACS_ENV_VALUE: &str = "t";

/// Terminal width reported when nothing better is known.
pub const DEFAULT_TERMINAL_COLUMNS: u16 = 80;
