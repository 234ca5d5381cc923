use crate::config::RadioSettings;
use crate::error::Result;
use crate::link::{LinkDirection, RadioLink};

/// In-process echo driver for development and tests.
///
/// Every accepted frame becomes the next inbound frame, either verbatim or
/// replaced by a fixed reply. `silent` accepts sends without ever replying
/// (exercises the timeout path), `rejecting` refuses every transmission.
#[derive(Debug, Default)]
pub struct LoopbackLink {
    pending: Option<Vec<u8>>,
    fixed_reply: Option<Vec<u8>>,
    silent: bool,
    reject_sends: bool,
    powered_down: bool,
}

impl LoopbackLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `reply` instead of echoing the sent frame.
    pub fn with_reply(reply: impl Into<Vec<u8>>) -> Self {
        Self {
            fixed_reply: Some(reply.into()),
            ..Self::default()
        }
    }

    /// Accept every send but never produce a reply.
    pub fn silent() -> Self {
        Self {
            silent: true,
            ..Self::default()
        }
    }

    /// Refuse every transmission.
    pub fn rejecting() -> Self {
        Self {
            reject_sends: true,
            ..Self::default()
        }
    }

    pub fn is_powered_down(&self) -> bool {
        self.powered_down
    }
}

impl RadioLink for LoopbackLink {
    fn configure(&mut self, radio: &RadioSettings) -> Result<()> {
        tracing::debug!(channel = radio.channel, "loopback link configured");
        Ok(())
    }

    fn set_mode(&mut self, _direction: LinkDirection) {}

    fn send(&mut self, frame: &[u8]) -> bool {
        if self.reject_sends {
            return false;
        }
        if !self.silent {
            self.pending = Some(match &self.fixed_reply {
                Some(reply) => reply.clone(),
                None => frame.to_vec(),
            });
        }
        true
    }

    fn has_incoming(&mut self) -> bool {
        self.pending.is_some()
    }

    fn receive(&mut self, max_len: usize) -> Vec<u8> {
        let mut frame = self.pending.take().unwrap_or_default();
        frame.truncate(max_len);
        frame
    }

    fn power_down(&mut self) {
        self.powered_down = true;
    }
}
