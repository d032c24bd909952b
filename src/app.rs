//! Application orchestration for the PocketIO daemon
//!
//! Wires configuration to concrete hardware and sinks, installs signal
//! handlers, and runs the single-threaded control loop. One logical thread
//! owns all state, so the loop needs no locking: the button wake wait (or
//! its polling stand-in) is the only suspension point, and its bound doubles
//! as the battery path's pacing.

use crate::config::{AppConfig, WakeStrategy};
use crate::devices::{GpioWake, Ina219, Mcp23017, PollWake};
use crate::drivers::WakeSource;
use crate::error::Result;
use crate::monitor::{BatteryMonitor, BatteryPoll, ButtonMonitor};
use crate::sinks::{StatusFiles, SystemPower, UinputKeyboard};
use crate::transport::I2cTransport;
use log::{info, warn};
use signal_hook::consts::{SIGINT, SIGQUIT, SIGTERM};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Which monitoring paths to run (from the command line)
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub battery: bool,
    pub buttons: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            battery: true,
            buttons: true,
        }
    }
}

type HwBatteryMonitor = BatteryMonitor<Ina219<I2cTransport>, StatusFiles, SystemPower>;
type HwButtonMonitor = ButtonMonitor<Mcp23017<I2cTransport>, UinputKeyboard>;

/// Main application structure owning both monitoring paths
pub struct App {
    battery: Option<HwBatteryMonitor>,
    buttons: Option<HwButtonMonitor>,
    shutdown: Arc<AtomicBool>,
    /// Bound on the button wake wait; also the battery path's worst-case delay
    wake_timeout: Duration,
    /// Loop pacing when the button path is disabled
    idle_sleep: Duration,
}

impl App {
    /// Initialize hardware, sinks, and signal handling
    pub fn new(config: AppConfig, options: RunOptions) -> Result<Self> {
        info!("Initializing PocketIO");

        let shutdown = Arc::new(AtomicBool::new(false));
        for signal in [SIGINT, SIGTERM, SIGQUIT] {
            signal_hook::flag::register(signal, Arc::clone(&shutdown))?;
        }

        let buttons = if options.buttons {
            info!(
                "Setting up button pad at {:#04x} on {}",
                config.hardware.button_pad_addr, config.hardware.i2c_bus
            );
            let keyboard = UinputKeyboard::new(&config.buttons.device_name)?;
            let transport = I2cTransport::open(
                &config.hardware.i2c_bus,
                config.hardware.button_pad_addr,
            )?;
            let pad = Mcp23017::new(transport)?;
            let wake: Box<dyn WakeSource> = match config.buttons.wake {
                WakeStrategy::Interrupt => Box::new(GpioWake::open(
                    &config.hardware.gpiochip,
                    config.hardware.interrupt_line,
                )?),
                WakeStrategy::Poll => Box::new(PollWake::new(Duration::from_millis(
                    config.buttons.poll_interval_ms,
                ))),
            };
            Some(ButtonMonitor::new(pad, keyboard, wake)?)
        } else {
            info!("Button monitoring disabled");
            None
        };

        let battery = if options.battery {
            info!(
                "Setting up battery gauge at {:#04x} on {}",
                config.hardware.power_monitor_addr, config.hardware.i2c_bus
            );
            let status = StatusFiles::create(Path::new(&config.battery.output_dir))?;
            let transport = I2cTransport::open(
                &config.hardware.i2c_bus,
                config.hardware.power_monitor_addr,
            )?;
            let sensor = Ina219::new(transport, config.battery.sense_range)?;
            let power = SystemPower::new(config.battery.poweroff_command.clone());
            Some(BatteryMonitor::new(sensor, status, power, &config.battery)?)
        } else {
            info!("Battery monitoring disabled");
            None
        };

        if battery.is_none() && buttons.is_none() {
            warn!("Both monitoring paths disabled; idling until a signal arrives");
        }

        Ok(Self {
            battery,
            buttons,
            shutdown,
            wake_timeout: Duration::from_millis(config.battery.update_interval_ms),
            idle_sleep: Duration::from_millis(config.buttons.poll_interval_ms),
        })
    }

    /// Run the control loop until a termination signal or the low-battery
    /// power-off
    pub fn run(&mut self) -> Result<()> {
        info!("PocketIO running");

        while !self.shutdown.load(Ordering::Relaxed) {
            match self.buttons.as_mut() {
                Some(buttons) => buttons.poll(self.wake_timeout)?,
                // no wake wait to pace the loop; sleep instead of spinning
                None => thread::sleep(self.idle_sleep),
            }

            if let Some(battery) = self.battery.as_mut() {
                if battery.poll()? == BatteryPoll::PowerOff {
                    info!("Power off issued, stopping");
                    break;
                }
            }
        }

        info!("PocketIO stopped");
        Ok(())
    }
}
