mod cli;
mod config;
mod effects;
mod gateway;
mod logging;
mod transport;

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use gateway_engine::EngineHandle;

use crate::cli::Cli;
use crate::config::{GatewayConfig, TransportConfig};
use crate::effects::EffectRunner;
use crate::gateway::Gateway;
use crate::transport::{SerialTransport, TcpTransport};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = GatewayConfig::from_cli(&cli)?;
    logging::initialize(config.log_destination, config.level_filter()?, &config.log_file);

    let engine =
        EngineHandle::new(config.engine_config()).context("failed to start fetch engine")?;
    let runner = EffectRunner::new(engine);
    let poll_timeout = Duration::from_millis(config.poll_timeout_ms);

    match &config.transport {
        TransportConfig::Serial { path, baud_rate } => {
            let transport = SerialTransport::open(path, *baud_rate, poll_timeout)
                .with_context(|| format!("failed to open serial port {path}"))?;
            Gateway::new(transport, runner, config.timing()).run()
        }
        TransportConfig::Tcp { listen } => {
            let transport = TcpTransport::bind(listen, poll_timeout)
                .with_context(|| format!("failed to listen on {listen}"))?;
            Gateway::new(transport, runner, config.timing()).run()
        }
    }
}
