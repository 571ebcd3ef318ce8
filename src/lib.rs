//! Startup option and rc-file resolution for a build-tool launcher.
//!
//! The launcher reads layered `.blazerc` files, merges their `startup`
//! options with its own command line, and prepares the argument vector it
//! hands to the long-lived backend. See [`core::option_processor`].

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
