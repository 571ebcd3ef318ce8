// src/core/startup_options.rs

//! # Startup Options
//!
//! The options the launcher consumes itself, before any command runs.
//!
//! Each option is declared once in [`STARTUP_OPTION_REGISTRY`] together with
//! its shape (nullary `--[no]flag` or unary `--flag value`) and a setter that
//! validates and stores the value. [`StartupOptionsBuilder`] applies raw
//! arguments against that registry and records, per option, which origin set
//! it last.

use crate::{
    core::{
        error::ConfigError,
        flags::{NullaryMatch, UnaryMatch, match_nullary, match_unary},
    },
    models::OptionOrigin,
    system::{environment::ClientEnvironment, fs::make_absolute},
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const DEFAULT_MAX_IDLE_SECS: u64 = 3 * 3600;
const FALLBACK_OUTPUT_ROOT: &str = "/tmp/blaze";

/// Parsed startup options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupOptions {
    /// Top-level directory for all output. Not settable by a flag.
    pub output_root: PathBuf,
    pub output_user_root: PathBuf,
    pub output_base: Option<PathBuf>,
    pub install_base: Option<PathBuf>,
    pub host_javabase: Option<PathBuf>,
    pub host_jvm_profile: Option<String>,
    /// Accumulates across every occurrence, in application order.
    pub host_jvm_args: Vec<String>,
    pub skyframe: Option<String>,
    /// Negative leaves I/O priority alone; 0..=7 selects best-effort priority.
    pub io_nice_level: i32,
    pub max_idle_secs: u64,
    pub blazerc: Option<PathBuf>,
    pub use_master_blazerc: bool,
    pub batch: bool,
    pub block_for_lock: bool,
    pub host_jvm_debug: bool,
    pub use_blaze64: bool,
    pub batch_cpu_scheduling: bool,
    pub allow_configurable_attributes: bool,
    pub fatal_event_bus_exceptions: bool,
    /// Option name (without dashes) to the origin that set it last. Options
    /// still at their default are absent.
    pub option_sources: BTreeMap<String, OptionOrigin>,
}

impl StartupOptions {
    /// Defaults for a client running in `env`.
    pub fn with_defaults(env: &dyn ClientEnvironment) -> Self {
        let output_root = env
            .var("TEST_TMPDIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| env.home_dir().map(|home| home.join(".cache").join("blaze")))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_OUTPUT_ROOT));
        let user = env
            .var("USER")
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| "unknown".to_string());
        let output_user_root = output_root.join(format!("_blaze_{user}"));

        Self {
            output_root,
            output_user_root,
            output_base: None,
            install_base: None,
            host_javabase: None,
            host_jvm_profile: None,
            host_jvm_args: Vec::new(),
            skyframe: None,
            io_nice_level: -1,
            max_idle_secs: DEFAULT_MAX_IDLE_SECS,
            blazerc: None,
            use_master_blazerc: true,
            batch: false,
            block_for_lock: true,
            host_jvm_debug: false,
            use_blaze64: false,
            batch_cpu_scheduling: false,
            allow_configurable_attributes: false,
            fatal_event_bus_exceptions: false,
            option_sources: BTreeMap::new(),
        }
    }

    /// Where `name` (e.g. `"batch"`) was last set, if it was set at all.
    pub fn origin_of(&self, name: &str) -> Option<&OptionOrigin> {
        self.option_sources.get(name)
    }
}

// --- Registry ---

struct InvalidValue;

type NullarySetter = fn(&mut StartupOptions, bool);
type UnarySetter = fn(&mut StartupOptions, &str, &Path) -> Result<(), InvalidValue>;

enum OptionShape {
    Nullary(NullarySetter),
    Unary(UnarySetter),
}

/// One recognised startup option.
struct StartupOptionDefinition {
    name: &'static str,
    shape: OptionShape,
}

/// Every startup option the launcher understands. To support a new option,
/// add an entry here.
static STARTUP_OPTION_REGISTRY: &[StartupOptionDefinition] = &[
    StartupOptionDefinition {
        name: "output_base",
        shape: OptionShape::Unary(|o, v, cwd| {
            o.output_base = Some(make_absolute(Path::new(v), cwd));
            Ok(())
        }),
    },
    StartupOptionDefinition {
        name: "install_base",
        shape: OptionShape::Unary(|o, v, cwd| {
            o.install_base = Some(make_absolute(Path::new(v), cwd));
            Ok(())
        }),
    },
    StartupOptionDefinition {
        name: "output_user_root",
        shape: OptionShape::Unary(|o, v, cwd| {
            o.output_user_root = make_absolute(Path::new(v), cwd);
            Ok(())
        }),
    },
    StartupOptionDefinition {
        name: "host_javabase",
        shape: OptionShape::Unary(|o, v, cwd| {
            o.host_javabase = Some(make_absolute(Path::new(v), cwd));
            Ok(())
        }),
    },
    StartupOptionDefinition {
        name: "host_jvm_profile",
        shape: OptionShape::Unary(|o, v, _| {
            o.host_jvm_profile = Some(v.to_string());
            Ok(())
        }),
    },
    StartupOptionDefinition {
        name: "host_jvm_args",
        shape: OptionShape::Unary(|o, v, _| {
            o.host_jvm_args.push(v.to_string());
            Ok(())
        }),
    },
    StartupOptionDefinition {
        name: "skyframe",
        shape: OptionShape::Unary(|o, v, _| {
            o.skyframe = Some(v.to_string());
            Ok(())
        }),
    },
    StartupOptionDefinition {
        name: "io_nice_level",
        shape: OptionShape::Unary(|o, v, _| {
            let level: i32 = v.parse().map_err(|_| InvalidValue)?;
            if !(-1..=7).contains(&level) {
                return Err(InvalidValue);
            }
            o.io_nice_level = level;
            Ok(())
        }),
    },
    StartupOptionDefinition {
        name: "max_idle_secs",
        shape: OptionShape::Unary(|o, v, _| {
            o.max_idle_secs = v.parse().map_err(|_| InvalidValue)?;
            Ok(())
        }),
    },
    StartupOptionDefinition {
        name: "blazerc",
        shape: OptionShape::Unary(|o, v, cwd| {
            o.blazerc = Some(make_absolute(Path::new(v), cwd));
            Ok(())
        }),
    },
    StartupOptionDefinition {
        name: "master_blazerc",
        shape: OptionShape::Nullary(|o, v| o.use_master_blazerc = v),
    },
    StartupOptionDefinition {
        name: "batch",
        shape: OptionShape::Nullary(|o, v| o.batch = v),
    },
    StartupOptionDefinition {
        name: "block_for_lock",
        shape: OptionShape::Nullary(|o, v| o.block_for_lock = v),
    },
    StartupOptionDefinition {
        name: "host_jvm_debug",
        shape: OptionShape::Nullary(|o, v| o.host_jvm_debug = v),
    },
    StartupOptionDefinition {
        name: "blaze64",
        shape: OptionShape::Nullary(|o, v| o.use_blaze64 = v),
    },
    StartupOptionDefinition {
        name: "batch_cpu_scheduling",
        shape: OptionShape::Nullary(|o, v| o.batch_cpu_scheduling = v),
    },
    StartupOptionDefinition {
        name: "allow_configurable_attributes",
        shape: OptionShape::Nullary(|o, v| o.allow_configurable_attributes = v),
    },
    StartupOptionDefinition {
        name: "fatal_event_bus_exceptions",
        shape: OptionShape::Nullary(|o, v| o.fatal_event_bus_exceptions = v),
    },
];

/// Names of every registered startup option, in registry order.
pub fn known_option_names() -> impl Iterator<Item = &'static str> {
    STARTUP_OPTION_REGISTRY.iter().map(|def| def.name)
}

// --- Builder ---

/// Applies raw startup arguments on top of a set of defaults.
///
/// Later applications overwrite earlier ones; `option_sources` always holds
/// the origin of the winning value.
#[derive(Debug)]
pub struct StartupOptionsBuilder<'a> {
    options: StartupOptions,
    cwd: &'a Path,
}

impl<'a> StartupOptionsBuilder<'a> {
    /// `cwd` is used to make path-valued options absolute.
    pub fn new(defaults: StartupOptions, cwd: &'a Path) -> Self {
        Self {
            options: defaults,
            cwd,
        }
    }

    /// Applies `arg`, looking at `next` only if `arg` is a unary option in
    /// `--flag value` form. Returns `true` if `next` was consumed.
    pub fn apply(
        &mut self,
        arg: &str,
        next: Option<&str>,
        origin: &OptionOrigin,
    ) -> Result<bool, ConfigError> {
        for def in STARTUP_OPTION_REGISTRY {
            match &def.shape {
                OptionShape::Nullary(set) => match match_nullary(arg, def.name) {
                    NullaryMatch::NoMatch => continue,
                    NullaryMatch::HasValue => {
                        return Err(ConfigError::UnexpectedOptionValue {
                            option: arg.to_string(),
                            origin: origin.clone(),
                        });
                    }
                    NullaryMatch::Set(value) => {
                        set(&mut self.options, value);
                        self.record(def.name, origin);
                        return Ok(false);
                    }
                },
                OptionShape::Unary(set) => {
                    let key = format!("--{}", def.name);
                    let (value, consumed_next) = match match_unary(arg, next, &key) {
                        UnaryMatch::NoMatch => continue,
                        UnaryMatch::MissingValue => {
                            return Err(ConfigError::MissingOptionValue {
                                option: arg.to_string(),
                                origin: origin.clone(),
                            });
                        }
                        UnaryMatch::Inline(value) => (value, false),
                        UnaryMatch::Separate(value) => (value, true),
                    };
                    set(&mut self.options, value, self.cwd).map_err(|InvalidValue| {
                        ConfigError::InvalidOptionValue {
                            option: key.clone(),
                            value: value.to_string(),
                            origin: origin.clone(),
                        }
                    })?;
                    self.record(def.name, origin);
                    return Ok(consumed_next);
                }
            }
        }

        Err(ConfigError::UnknownOption {
            option: arg.to_string(),
            origin: origin.clone(),
        })
    }

    pub fn build(self) -> StartupOptions {
        self.options
    }

    fn record(&mut self, name: &str, origin: &OptionOrigin) {
        match self.options.option_sources.insert(name.to_string(), origin.clone()) {
            Some(previous) => log::debug!(
                "Startup option '{}' from {} overrides the value from {}.",
                name,
                origin,
                previous
            ),
            None => log::debug!("Startup option '{}' set from {}.", name, origin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::environment::FixedEnvironment;

    fn builder(cwd: &Path) -> StartupOptionsBuilder<'_> {
        StartupOptionsBuilder::new(StartupOptions::with_defaults(&FixedEnvironment::new()), cwd)
    }

    fn rc(path: &str) -> OptionOrigin {
        OptionOrigin::RcFile(PathBuf::from(path))
    }

    #[test]
    fn test_defaults() {
        let env = FixedEnvironment::new()
            .with_home("/home/ada")
            .with_var("USER", "ada");
        let options = StartupOptions::with_defaults(&env);
        assert_eq!(options.output_root, PathBuf::from("/home/ada/.cache/blaze"));
        assert_eq!(
            options.output_user_root,
            PathBuf::from("/home/ada/.cache/blaze/_blaze_ada")
        );
        assert!(!options.batch);
        assert!(options.block_for_lock);
        assert_eq!(options.io_nice_level, -1);
        assert_eq!(options.max_idle_secs, 10800);
        assert!(options.option_sources.is_empty());
    }

    #[test]
    fn test_test_tmpdir_overrides_output_root() {
        let env = FixedEnvironment::new()
            .with_home("/home/ada")
            .with_var("TEST_TMPDIR", "/tmp/t");
        let options = StartupOptions::with_defaults(&env);
        assert_eq!(options.output_root, PathBuf::from("/tmp/t"));
        assert_eq!(options.output_user_root, PathBuf::from("/tmp/t/_blaze_unknown"));
    }

    #[test]
    fn test_nullary_options() {
        let cwd = PathBuf::from("/ws");
        let mut b = builder(&cwd);
        assert!(!b.apply("--batch", Some("build"), &OptionOrigin::CommandLine).unwrap());
        assert!(!b.apply("--noblock_for_lock", None, &OptionOrigin::CommandLine).unwrap());
        let options = b.build();
        assert!(options.batch);
        assert!(!options.block_for_lock);
        assert_eq!(options.origin_of("batch"), Some(&OptionOrigin::CommandLine));
    }

    #[test]
    fn test_unary_options_in_both_forms() {
        let cwd = PathBuf::from("/ws");
        let mut b = builder(&cwd);
        assert!(!b.apply("--output_base=out", Some("x"), &rc("/rc")).unwrap());
        assert!(b.apply("--max_idle_secs", Some("60"), &rc("/rc")).unwrap());
        let options = b.build();
        assert_eq!(options.output_base, Some(PathBuf::from("/ws/out")));
        assert_eq!(options.max_idle_secs, 60);
        assert_eq!(options.origin_of("output_base"), Some(&rc("/rc")));
    }

    #[test]
    fn test_later_application_overrides_and_records_origin() {
        let cwd = PathBuf::from("/ws");
        let mut b = builder(&cwd);
        b.apply("--batch", None, &rc("/a")).unwrap();
        b.apply("--nobatch", None, &OptionOrigin::CommandLine).unwrap();
        let options = b.build();
        assert!(!options.batch);
        assert_eq!(options.origin_of("batch"), Some(&OptionOrigin::CommandLine));
    }

    #[test]
    fn test_host_jvm_args_accumulate() {
        let cwd = PathBuf::from("/ws");
        let mut b = builder(&cwd);
        b.apply("--host_jvm_args=-Xmx1g", None, &rc("/a")).unwrap();
        b.apply("--host_jvm_args", Some("-Xss4m"), &OptionOrigin::CommandLine).unwrap();
        assert_eq!(b.build().host_jvm_args, vec!["-Xmx1g", "-Xss4m"]);
    }

    #[test]
    fn test_unknown_option_carries_origin() {
        let cwd = PathBuf::from("/ws");
        let err = builder(&cwd).apply("--frobnicate", None, &rc("/a")).unwrap_err();
        match err {
            ConfigError::UnknownOption { option, origin } => {
                assert_eq!(option, "--frobnicate");
                assert_eq!(origin, rc("/a"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_shape_errors() {
        let cwd = PathBuf::from("/ws");
        let cl = OptionOrigin::CommandLine;
        assert!(matches!(
            builder(&cwd).apply("--output_base", None, &cl),
            Err(ConfigError::MissingOptionValue { .. })
        ));
        assert!(matches!(
            builder(&cwd).apply("--batch=yes", None, &cl),
            Err(ConfigError::UnexpectedOptionValue { .. })
        ));
        assert!(matches!(
            builder(&cwd).apply("--io_nice_level=9", None, &cl),
            Err(ConfigError::InvalidOptionValue { .. })
        ));
        assert!(matches!(
            builder(&cwd).apply("--max_idle_secs", Some("soon"), &cl),
            Err(ConfigError::InvalidOptionValue { .. })
        ));
    }

    #[test]
    fn test_rc_flags_are_recognised() {
        let cwd = PathBuf::from("/ws");
        let mut b = builder(&cwd);
        assert!(b.apply("--blazerc", Some("my.rc"), &OptionOrigin::CommandLine).unwrap());
        b.apply("--nomaster_blazerc", None, &OptionOrigin::CommandLine).unwrap();
        let options = b.build();
        assert_eq!(options.blazerc, Some(PathBuf::from("/ws/my.rc")));
        assert!(!options.use_master_blazerc);
    }

    #[test]
    fn test_registry_names_are_unique() {
        let mut names: Vec<_> = known_option_names().collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
