use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use rfbridge_core::config::Config;
use rfbridge_core::Transceiver;

pub fn run(config_path: Option<&Path>, port: Option<u16>) -> anyhow::Result<()> {
    let config = Config::load_or_default(config_path).context("failed to load config")?;
    for warning in config.validate() {
        tracing::warn!("config: {}", warning.message);
    }
    let port = port.unwrap_or(config.server.port);

    let driver = config.link.build().context("failed to build link driver")?;
    let radio = Arc::new(Transceiver::new(
        driver,
        config.radio.clone(),
        &config.transaction,
    ));
    // A link that cannot be brought up is fatal: never serve requests on an
    // unconfigured radio.
    radio.init().context("radio initialization failed")?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(rfbridge_server::serve(radio, port))
}
