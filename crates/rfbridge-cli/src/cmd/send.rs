use std::path::Path;

use anyhow::Context;
use rfbridge_core::command::Command;
use rfbridge_core::config::Config;
use rfbridge_core::{Outcome, Transceiver};

use crate::output::print_json;

pub fn run(config_path: Option<&Path>, text: &str, json: bool) -> anyhow::Result<()> {
    let command: Command = text.parse().context("unrecognized command")?;
    let config = Config::load_or_default(config_path).context("failed to load config")?;

    let driver = config.link.build().context("failed to build link driver")?;
    let radio = Transceiver::new(driver, config.radio.clone(), &config.transaction);
    radio.init().context("radio initialization failed")?;

    let outcome = radio.exchange(&command.wire_text());
    radio.shutdown();

    match outcome? {
        Outcome::Reply(reply) => {
            if json {
                print_json(&serde_json::json!({
                    "command": command.wire_text(),
                    "reply": reply,
                }))?;
            } else {
                println!("{reply}");
            }
            Ok(())
        }
        Outcome::NoReply => {
            if json {
                print_json(&serde_json::json!({
                    "command": command.wire_text(),
                    "reply": serde_json::Value::Null,
                }))?;
            } else {
                println!("no reply");
            }
            Ok(())
        }
        Outcome::SendFailed => anyhow::bail!("link rejected the transmission"),
    }
}
