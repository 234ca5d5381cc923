use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::config::{RadioSettings, TransactionSettings};
use crate::error::{BridgeError, Result};
use crate::link::{LinkDirection, RadioLink};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// The single result of one request-reply transaction. Send rejection and
/// timeout are values, not errors: the caller decides whether to retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The remote answered; NUL padding and surrounding whitespace stripped.
    Reply(String),
    /// Deadline elapsed without a usable reply frame.
    NoReply,
    /// The driver rejected the transmission; no reply was awaited.
    SendFailed,
}

// ---------------------------------------------------------------------------
// Transceiver
// ---------------------------------------------------------------------------

struct LinkState<D> {
    driver: D,
    direction: LinkDirection,
    configured: bool,
}

impl<D: RadioLink> LinkState<D> {
    /// Idempotent mode switch: no driver call when the direction already
    /// matches.
    fn set_direction(&mut self, direction: LinkDirection) {
        if self.direction != direction {
            tracing::debug!(%direction, "switching link direction");
            self.driver.set_mode(direction);
            self.direction = direction;
        }
    }
}

/// Request-reply transaction manager for the half-duplex link.
///
/// One transaction at a time: the link state sits behind a mutex held for the
/// whole send, switch, poll, receive sequence, including the bounded wait.
/// The link is left in Listening on every exit path, and the deadline is
/// computed once per transaction from a monotonic clock and never extended.
pub struct Transceiver<D: RadioLink> {
    link: Mutex<LinkState<D>>,
    radio: RadioSettings,
    reply_timeout: Duration,
    poll_interval: Duration,
}

impl<D: RadioLink> Transceiver<D> {
    pub fn new(driver: D, radio: RadioSettings, transaction: &TransactionSettings) -> Self {
        Self {
            link: Mutex::new(LinkState {
                driver,
                direction: LinkDirection::Listening,
                configured: false,
            }),
            radio,
            reply_timeout: transaction.reply_timeout(),
            poll_interval: transaction.poll_interval(),
        }
    }

    // A panicked transaction leaves at worst a stale direction behind, and
    // the next exchange resets that; recover the guard from poisoning.
    fn lock(&self) -> MutexGuard<'_, LinkState<D>> {
        self.link.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// One-time link bring-up: apply the physical parameters and start
    /// listening. A failure here is a hard startup error; the process must
    /// not serve requests on an unconfigured link.
    pub fn init(&self) -> Result<()> {
        let mut link = self.lock();
        link.driver.configure(&self.radio)?;
        link.driver.set_mode(LinkDirection::Listening);
        link.direction = LinkDirection::Listening;
        link.configured = true;
        tracing::info!(
            channel = self.radio.channel,
            read_address = %self.radio.read_address,
            write_address = %self.radio.write_address,
            "radio link initialized"
        );
        Ok(())
    }

    /// Power the radio down and stop accepting transactions. Later
    /// `exchange` calls fail with `NotInitialized`.
    pub fn shutdown(&self) {
        let mut link = self.lock();
        if link.configured {
            link.set_direction(LinkDirection::Listening);
            link.driver.power_down();
            link.configured = false;
            tracing::info!("radio link powered down");
        }
    }

    /// Execute one send-then-await-reply transaction, serialized against all
    /// other callers and bounded by the reply timeout.
    pub fn exchange(&self, command: &str) -> Result<Outcome> {
        let mut link = self.lock();
        if !link.configured {
            return Err(BridgeError::NotInitialized);
        }

        let payload = command.as_bytes();
        if payload.len() > self.radio.frame_size {
            return Err(BridgeError::PayloadTooLarge {
                len: payload.len(),
                max: self.radio.frame_size,
            });
        }

        tracing::info!(command, "sending command");
        let deadline = Instant::now() + self.reply_timeout;

        link.set_direction(LinkDirection::Transmitting);
        let accepted = link.driver.send(payload);
        link.set_direction(LinkDirection::Listening);

        if !accepted {
            tracing::warn!(command, "link rejected transmission");
            return Ok(Outcome::SendFailed);
        }

        let mut frame = None;
        while Instant::now() < deadline {
            if link.driver.has_incoming() {
                frame = Some(link.driver.receive(self.radio.frame_size));
                break;
            }
            if !self.poll_interval.is_zero() {
                std::thread::sleep(self.poll_interval);
            }
        }

        match frame.as_deref().and_then(decode_reply) {
            Some(text) => {
                tracing::debug!(command, reply = %text, "reply received");
                Ok(Outcome::Reply(text))
            }
            None => {
                tracing::warn!(command, "no reply received");
                Ok(Outcome::NoReply)
            }
        }
    }
}

/// Decode a reply frame: UTF-8, trailing NUL padding and surrounding
/// whitespace stripped. Undecodable or empty frames are operationally
/// equivalent to no reply and yield `None`.
fn decode_reply(bytes: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(bytes).ok()?;
    let text = text.trim_end_matches('\0').trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
