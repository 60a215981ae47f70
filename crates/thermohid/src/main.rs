mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::MonitorArgs;
use crate::exit::usage_code;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "thermohid",
    version,
    about = "Read a hidraw temperature/humidity sensor and log each reading"
)]
struct Cli {
    #[command(flatten)]
    monitor: MonitorArgs,

    /// Display format for readings and diagnostics (stdout).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    format: OutputFormat,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        env = "THERMOHID_LOG_LEVEL"
    )]
    log_level: LogLevel,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            std::process::exit(usage_code(&err));
        }
    };
    init_logging(cli.log_format, cli.log_level);

    match cmd::run(cli.monitor, cli.format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
