use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "focusboard",
    about = concat!("focusboard v", env!("CARGO_PKG_VERSION"), " - projects and todos in your terminal"),
    version
)]
pub struct Cli {
    /// JSON data file to load and save
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Config file (defaults to focusboard.toml in the current directory)
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}
