//! Error types for PocketIO

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// PocketIO error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I2C bus or register access failed
    #[error("I2C error: {0}")]
    I2c(#[from] i2cdev::linux::LinuxI2CError),

    /// GPIO line request or event wait failed
    #[error("GPIO error: {0}")]
    Gpio(#[from] gpiocdev::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration parsed but holds an unusable value
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The startup voltage read failed; the charge estimate cannot be seeded
    #[error("initial voltage read failed: {0}")]
    Seed(#[source] Box<Error>),

    /// A periodic sensor read failed; the tick is skipped, state preserved
    #[error("sensor read failed: {0}")]
    SampleRead(#[source] Box<Error>),

    /// Battery state could not be written to its output file
    #[error("cannot write {path}: {source}")]
    Persistence {
        /// Output file path
        path: String,
        /// Underlying write error
        source: std::io::Error,
    },

    /// The power-off command could not be issued
    #[error("power off failed: {0}")]
    PowerOff(String),
}
