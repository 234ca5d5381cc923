use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("radio link not initialized")]
    NotInitialized,

    #[error("command payload is {len} bytes but the link frame size is {max}")]
    PayloadTooLarge { len: usize, max: usize },

    #[error("servo angle out of range 0-180: {0}")]
    ServoAngleOutOfRange(u32),

    #[error("sleep minutes out of range 0-720: {0}")]
    SleepMinutesOutOfRange(u32),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("radio link error: {0}")]
    Link(String),

    #[error("config file not found: {0}")]
    ConfigNotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
