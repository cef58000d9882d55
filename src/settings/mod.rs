//! Settings come from built-in defaults, a TOML file and a few environment
//! variables, in that order of precedence.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
