use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "gateway")]
#[command(about = "Dial-up style web gateway for a 30-column terminal", long_about = None)]
pub struct Cli {
    /// RON configuration file; built-in defaults are used when absent
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Serial device the terminal is attached to (e.g. /dev/ttyUSB0)
    #[arg(short, long, conflicts_with = "tcp")]
    pub serial: Option<String>,

    /// Serial line speed
    #[arg(short, long)]
    pub baud: Option<u32>,

    /// Listen for a terminal emulator on this address instead of a serial port
    #[arg(long, value_name = "ADDR")]
    pub tcp: Option<String>,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Write logs to this file in addition to the terminal
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
