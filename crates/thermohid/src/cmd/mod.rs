use clap::Args;
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod monitor;

#[derive(Args, Debug)]
pub struct MonitorArgs {
    /// hidraw device node (e.g. /dev/hidraw0).
    pub device: PathBuf,
    /// Log file for readings. Created, or truncated if it exists.
    pub log: PathBuf,
    /// Skip printing the device descriptor diagnostics at startup.
    #[arg(long)]
    pub no_describe: bool,
}

pub fn run(args: MonitorArgs, format: OutputFormat) -> CliResult<i32> {
    monitor::run(args, format)
}
