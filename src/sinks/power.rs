//! System power-off action

use super::PowerAction;
use crate::error::{Error, Result};
use std::process::Command;

/// Powers the system off by running the configured command
pub struct SystemPower {
    command: String,
}

impl SystemPower {
    /// Create the action with the command to run (e.g., "/sbin/poweroff")
    pub fn new(command: impl Into<String>) -> Self {
        SystemPower {
            command: command.into(),
        }
    }
}

impl PowerAction for SystemPower {
    fn power_off(&mut self) -> Result<()> {
        log::info!("Issuing power off: {}", self.command);
        let status = Command::new(&self.command)
            .status()
            .map_err(|e| Error::PowerOff(format!("{}: {}", self.command, e)))?;
        if !status.success() {
            return Err(Error::PowerOff(format!(
                "{} exited with {}",
                self.command, status
            )));
        }
        Ok(())
    }
}
