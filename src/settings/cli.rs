use super::Parser;

#[derive(Parser, Debug)]
#[command(about = "Session token service for the files manager")]
pub struct Cli {
    /// Path to a TOML settings file.
    #[arg(long)]
    pub settings: Option<String>,
}
