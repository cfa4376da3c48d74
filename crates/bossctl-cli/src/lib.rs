// NOTE: bossctl Architecture Rationale
//
// Why render saved responses (not call the controller)?
// - The rendering pipeline is the part every command shares
// - A JSON file or stdin is enough to exercise it end to end
// - Transport and per-entity argument parsing live outside this workspace
//
// Why typed records behind a `Record` trait (not reflection)?
// - Format strings name fields at runtime (`{{.SerialNumber}}`)
// - Each record exposes its fields by name, so filters, ordering and templates
//   share one lookup path
// - Typed records also declare their field set, so a misspelled column fails
//   before anything is printed

mod align;
mod args;
mod commands;
pub mod config;
mod handlers;
pub mod kinds;
mod logging;
pub mod types;

pub use args::{Cli, Commands, OutputArgs};
pub use commands::run;
