// src/core/discovery.rs

//! Locates the rc files to load, in the order they must be loaded:
//! the shared master rc first, then the user rc.

use crate::{
    constants::{
        BLAZERC_FLAG, MASTER_BLAZERC_FALLBACK_PATH, MASTER_BLAZERC_PATH, NO_MASTER_BLAZERC_FLAG,
        USER_BLAZERC_FILENAME, WORKSPACE_FILENAME,
    },
    core::{error::ConfigError, flags::match_unary},
    system::{
        environment::ClientEnvironment,
        fs::{is_readable_file, make_absolute},
    },
};
use std::path::{Path, PathBuf};

/// The rc-related flags found by scanning the raw arguments before any rc
/// file is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcFlags {
    /// The first `--blazerc` value, if any.
    pub explicit_rc: Option<String>,
    pub use_master_rc: bool,
}

impl Default for RcFlags {
    fn default() -> Self {
        Self {
            explicit_rc: None,
            use_master_rc: true,
        }
    }
}

/// Scans every argument after `args[0]` for `--blazerc` and
/// `--nomaster_blazerc`.
pub fn scan_rc_flags(args: &[String]) -> RcFlags {
    let mut flags = RcFlags::default();
    let tail = args.get(1..).unwrap_or_default();

    for (i, arg) in tail.iter().enumerate() {
        let next = tail.get(i + 1).map(String::as_str);
        if flags.explicit_rc.is_none() {
            flags.explicit_rc = match_unary(arg, next, BLAZERC_FLAG)
                .value()
                .map(str::to_string);
        }
        if arg == NO_MASTER_BLAZERC_FLAG {
            flags.use_master_rc = false;
        }
    }
    flags
}

/// The shared rc file under the workspace, or its fallback location, or
/// nothing if neither is readable.
pub fn find_master_blazerc(workspace: &Path) -> Option<PathBuf> {
    [MASTER_BLAZERC_PATH, MASTER_BLAZERC_FALLBACK_PATH]
        .iter()
        .map(|relative| workspace.join(relative))
        .find(|candidate| {
            let readable = is_readable_file(candidate);
            log::debug!(
                "Master rc candidate '{}': {}",
                candidate.display(),
                if readable { "found" } else { "not readable" }
            );
            readable
        })
}

/// The user rc file.
///
/// An explicit path must be readable; otherwise the first readable of
/// `<workspace>/.blazerc` and `<home>/.blazerc` is used.
pub fn find_user_blazerc(
    explicit: Option<&str>,
    workspace: &Path,
    cwd: &Path,
    env: &dyn ClientEnvironment,
) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(explicit) = explicit {
        let path = make_absolute(Path::new(explicit), cwd);
        if !is_readable_file(&path) {
            return Err(ConfigError::UnreadableFile { path });
        }
        return Ok(Some(path));
    }

    let workspace_rc = workspace.join(USER_BLAZERC_FILENAME);
    if is_readable_file(&workspace_rc) {
        return Ok(Some(workspace_rc));
    }

    let home_rc = env
        .home_dir()
        .map(|home| home.join(USER_BLAZERC_FILENAME))
        .filter(|rc| is_readable_file(rc));
    Ok(home_rc)
}

/// Returns the rc roots to resolve, shared first.
pub fn discover(
    args: &[String],
    workspace: &Path,
    cwd: &Path,
    env: &dyn ClientEnvironment,
) -> Result<Vec<PathBuf>, ConfigError> {
    let flags = scan_rc_flags(args);
    log::debug!("Rc flags from the command line: {:?}", flags);

    let mut roots = Vec::new();
    if flags.use_master_rc {
        roots.extend(find_master_blazerc(workspace));
    }
    roots.extend(find_user_blazerc(
        flags.explicit_rc.as_deref(),
        workspace,
        cwd,
        env,
    )?);

    log::debug!("Rc files to load: {:?}", roots);
    Ok(roots)
}

/// Walks up from `start` to the first directory holding a `WORKSPACE` file.
pub fn find_workspace(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(WORKSPACE_FILENAME).is_file())
        .map(Path::to_path_buf)
}
