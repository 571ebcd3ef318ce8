//! # System Interaction Layer
//!
//! The boundary between option resolution and the machine it runs on.
//!
//! ## Modules
//!
//! - **`environment`**: the [`environment::ClientEnvironment`] capability
//!   (inherited variables, home directory, terminal facts), with a real
//!   implementation and a fixed snapshot for tests.
//! - **`fs`**: readability checks, path absolutisation and lossy file reads.

pub mod environment;
pub mod fs;
