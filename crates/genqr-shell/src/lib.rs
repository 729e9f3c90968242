//! Command-line shell around the genqr engine.
//!
//! Owns everything the engine refuses to do: reading configuration from the
//! environment and job files, resolving free-form prompts into payloads,
//! loading fonts and photos from disk, and saving the rendered PNG.

pub mod config;
pub mod interpret;
pub mod job;
pub mod output;

pub use config::ShellConfig;
pub use interpret::{Interpretation, LiteralInterpreter, PayloadInterpreter, resolve_payload};
pub use job::RenderJob;
pub use output::{OutputKind, output_file_name, save_png};
