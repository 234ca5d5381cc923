use std::fmt;
use std::str::FromStr;

use crate::error::{BridgeError, Result};

pub const SERVO_ANGLE_MAX: u32 = 180;
pub const SLEEP_MINUTES_MAX: u32 = 720;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// The command vocabulary understood by the remote device. Arguments are
/// range-checked at construction so every façade shares one validation path;
/// the transaction manager itself treats commands as opaque text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Light the remote's LED. Remote replies `LEDOn`.
    PowerOn,
    /// Dark the remote's LED. Remote replies `LEDOff`.
    PowerOff,
    /// Move the servo to an angle, 0-180 degrees.
    Servo(u8),
    /// Read the remote's battery level in millivolts.
    BatteryLevel,
    /// Power the remote's radio down for a number of minutes, 0-720.
    RadioOff(u16),
}

impl Command {
    pub fn servo(angle: u32) -> Result<Self> {
        if angle > SERVO_ANGLE_MAX {
            return Err(BridgeError::ServoAngleOutOfRange(angle));
        }
        Ok(Command::Servo(angle as u8))
    }

    pub fn radio_off(minutes: u32) -> Result<Self> {
        if minutes > SLEEP_MINUTES_MAX {
            return Err(BridgeError::SleepMinutesOutOfRange(minutes));
        }
        Ok(Command::RadioOff(minutes as u16))
    }

    /// The frame payload sent across the link.
    pub fn wire_text(&self) -> String {
        match self {
            Command::PowerOn => "on".to_string(),
            Command::PowerOff => "off".to_string(),
            Command::Servo(angle) => format!("servo {angle}"),
            Command::BatteryLevel => "btlvl".to_string(),
            Command::RadioOff(minutes) => format!("rdoff {minutes}"),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire_text())
    }
}

impl FromStr for Command {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s {
            "on" => return Ok(Command::PowerOn),
            "off" => return Ok(Command::PowerOff),
            "btlvl" => return Ok(Command::BatteryLevel),
            _ => {}
        }
        if let Some(arg) = s.strip_prefix("servo ") {
            let angle: u32 = arg
                .trim()
                .parse()
                .map_err(|_| BridgeError::UnknownCommand(s.to_string()))?;
            return Command::servo(angle);
        }
        if let Some(arg) = s.strip_prefix("rdoff ") {
            let minutes: u32 = arg
                .trim()
                .parse()
                .map_err(|_| BridgeError::UnknownCommand(s.to_string()))?;
            return Command::radio_off(minutes);
        }
        Err(BridgeError::UnknownCommand(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_text_matches_remote_vocabulary() {
        assert_eq!(Command::PowerOn.wire_text(), "on");
        assert_eq!(Command::PowerOff.wire_text(), "off");
        assert_eq!(Command::servo(90).unwrap().wire_text(), "servo 90");
        assert_eq!(Command::BatteryLevel.wire_text(), "btlvl");
        assert_eq!(Command::radio_off(720).unwrap().wire_text(), "rdoff 720");
    }

    #[test]
    fn servo_angle_bounds() {
        assert!(Command::servo(0).is_ok());
        assert!(Command::servo(180).is_ok());
        assert!(matches!(
            Command::servo(181),
            Err(BridgeError::ServoAngleOutOfRange(181))
        ));
    }

    #[test]
    fn sleep_minutes_bounds() {
        assert!(Command::radio_off(0).is_ok());
        assert!(Command::radio_off(720).is_ok());
        assert!(matches!(
            Command::radio_off(721),
            Err(BridgeError::SleepMinutesOutOfRange(721))
        ));
    }

    #[test]
    fn parses_bare_commands() {
        assert_eq!("on".parse::<Command>().unwrap(), Command::PowerOn);
        assert_eq!("off".parse::<Command>().unwrap(), Command::PowerOff);
        assert_eq!("btlvl".parse::<Command>().unwrap(), Command::BatteryLevel);
    }

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            "servo 45".parse::<Command>().unwrap(),
            Command::Servo(45)
        );
        assert_eq!(
            "rdoff 30".parse::<Command>().unwrap(),
            Command::RadioOff(30)
        );
    }

    #[test]
    fn parse_rejects_out_of_range_arguments() {
        assert!(matches!(
            "servo 200".parse::<Command>(),
            Err(BridgeError::ServoAngleOutOfRange(200))
        ));
        assert!(matches!(
            "rdoff 1000".parse::<Command>(),
            Err(BridgeError::SleepMinutesOutOfRange(1000))
        ));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            "reboot".parse::<Command>(),
            Err(BridgeError::UnknownCommand(_))
        ));
        assert!(matches!(
            "servo fast".parse::<Command>(),
            Err(BridgeError::UnknownCommand(_))
        ));
    }

    #[test]
    fn display_is_wire_text() {
        assert_eq!(Command::Servo(12).to_string(), "servo 12");
    }
}
