// src/core/mod.rs

pub mod command_args;
pub mod discovery;
pub mod error;
pub mod flags;
pub mod option_processor;
pub mod rc_resolver;
pub mod startup_merger;
pub mod startup_options;
pub mod tokenizer;
