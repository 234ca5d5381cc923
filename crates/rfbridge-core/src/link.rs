use std::fmt;

use crate::config::RadioSettings;
use crate::error::Result;

pub mod loopback;
pub mod udp;

// ---------------------------------------------------------------------------
// LinkDirection
// ---------------------------------------------------------------------------

/// The half-duplex link's current mode. Exactly one value holds at any
/// instant; only the transaction manager changes it, under its lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDirection {
    Listening,
    Transmitting,
}

impl LinkDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            LinkDirection::Listening => "listening",
            LinkDirection::Transmitting => "transmitting",
        }
    }
}

impl fmt::Display for LinkDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RadioLink
// ---------------------------------------------------------------------------

/// Driver contract for the physical half-duplex link.
///
/// Only `configure` has an error channel: a link that cannot be brought up is
/// a hard startup failure. The steady-state operations report trouble through
/// their return values (`send` → rejected, `has_incoming` → nothing there,
/// `receive` → empty frame) and are expected to log the underlying cause
/// themselves; the transaction manager folds all of them into its outcome.
pub trait RadioLink: Send {
    /// One-time physical setup: address table, channel, power level, data
    /// rate. Called once before the first transaction.
    fn configure(&mut self, radio: &RadioSettings) -> Result<()>;

    /// Switch the link between receive-ready and send-ready.
    fn set_mode(&mut self, direction: LinkDirection);

    /// Transmit one frame. Returns false when the driver rejects it.
    fn send(&mut self, frame: &[u8]) -> bool;

    /// Non-blocking check for a pending inbound frame.
    fn has_incoming(&mut self) -> bool;

    /// Read the pending frame, up to `max_len` bytes. An empty vec means
    /// nothing usable arrived.
    fn receive(&mut self, max_len: usize) -> Vec<u8>;

    /// Release the hardware at process teardown.
    fn power_down(&mut self);
}

/// Type-erased link, used by the HTTP façade so the router is not generic
/// over the driver.
pub type BoxedLink = Box<dyn RadioLink + Send>;

impl RadioLink for BoxedLink {
    fn configure(&mut self, radio: &RadioSettings) -> Result<()> {
        self.as_mut().configure(radio)
    }

    fn set_mode(&mut self, direction: LinkDirection) {
        self.as_mut().set_mode(direction);
    }

    fn send(&mut self, frame: &[u8]) -> bool {
        self.as_mut().send(frame)
    }

    fn has_incoming(&mut self) -> bool {
        self.as_mut().has_incoming()
    }

    fn receive(&mut self, max_len: usize) -> Vec<u8> {
        self.as_mut().receive(max_len)
    }

    fn power_down(&mut self) {
        self.as_mut().power_down();
    }
}
