extern crate r2pipe;
extern crate serde_json;

/// Individual smoke checks against the plugin's `RE` command group
pub mod checks;
/// The plugin's credential config file
pub mod config;
/// Error type shared by the pipe, config and harness layers
pub mod error;
/// Open a session, run every check, and produce an exit code
pub mod harness;
/// Interact with the rizin / radare2 instance
pub mod r2_api;
/// Tagged, colored log lines
pub mod report;

pub use crate::error::{Error, Result};
pub use crate::harness::{run, HarnessConfig, Preset, RunReport};
pub use crate::r2_api::{CommandPipe, R2Api, Session};
