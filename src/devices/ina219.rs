//! INA219 current/voltage sense chip driver

use crate::drivers::PowerSensor;
use crate::error::Result;
use crate::transport::Transport;
use crate::types::PowerSample;
use serde::{Deserialize, Serialize};

// Register map
const REG_CONFIG: u8 = 0x00;
const REG_SHUNT_VOLTAGE: u8 = 0x01;
const REG_BUS_VOLTAGE: u8 = 0x02;
const REG_POWER: u8 = 0x03;
const REG_CURRENT: u8 = 0x04;
const REG_CALIBRATION: u8 = 0x05;

// Config register fields shared by both range profiles
const OPERATING_MODE: u16 = 0x07; // shunt + bus, continuous
const BUS_ADC_RESOLUTION: u16 = 0x0D;
const SHUNT_ADC_RESOLUTION: u16 = 0x0D;

/// Supported bus-voltage / max-current range profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SenseRange {
    /// 16 V bus range, 5 A max (handheld battery pack)
    #[serde(rename = "16v-5a")]
    Range16V5A,
    /// 32 V bus range, 2 A max
    #[serde(rename = "32v-2a")]
    Range32V2A,
}

/// Calibration and scaling constants for one range profile
struct RangeProfile {
    bus_range_bits: u16,
    gain_bits: u16,
    calibration: u16,
    /// mA per current-register LSB
    current_lsb_ma: f64,
    /// W per power-register LSB
    power_lsb_w: f64,
}

impl SenseRange {
    fn profile(self) -> RangeProfile {
        match self {
            SenseRange::Range16V5A => RangeProfile {
                bus_range_bits: 0x00,
                gain_bits: 0x01, // /2, 80 mV shunt range
                calibration: 26868,
                current_lsb_ma: 0.1524,
                power_lsb_w: 0.003048,
            },
            SenseRange::Range32V2A => RangeProfile {
                bus_range_bits: 0x01,
                gain_bits: 0x03, // /8, 320 mV shunt range
                calibration: 4096,
                current_lsb_ma: 0.1,
                power_lsb_w: 0.002,
            },
        }
    }
}

/// INA219 sense chip over a register transport
pub struct Ina219<T: Transport> {
    transport: T,
    profile: RangeProfile,
}

impl<T: Transport> Ina219<T> {
    /// Program calibration and configuration for the given range
    pub fn new(transport: T, range: SenseRange) -> Result<Self> {
        let mut sensor = Ina219 {
            transport,
            profile: range.profile(),
        };
        sensor.configure()?;
        log::info!("INA219 configured for {:?}", range);
        Ok(sensor)
    }

    fn configure(&mut self) -> Result<()> {
        self.transport
            .write_word(REG_CALIBRATION, self.profile.calibration)?;

        let config = (self.profile.bus_range_bits << 13)
            | (self.profile.gain_bits << 11)
            | (BUS_ADC_RESOLUTION << 7)
            | (SHUNT_ADC_RESOLUTION << 3)
            | OPERATING_MODE;
        self.transport.write_word(REG_CONFIG, config)
    }

    fn read_register(&mut self, register: u8) -> Result<u16> {
        // the calibration register does not survive a chip reset; re-arm it
        // before every read
        self.transport
            .write_word(REG_CALIBRATION, self.profile.calibration)?;
        self.transport.read_word(register)
    }

    /// Bus voltage in volts
    pub fn bus_voltage_v(&mut self) -> Result<f64> {
        // bottom three bits are status flags; 4 mV per LSB above them
        let raw = self.read_register(REG_BUS_VOLTAGE)?;
        Ok(f64::from(raw >> 3) * 0.004)
    }

    /// Shunt voltage in volts (signed, 10 uV per LSB)
    pub fn shunt_voltage_v(&mut self) -> Result<f64> {
        let raw = self.read_register(REG_SHUNT_VOLTAGE)?;
        Ok(f64::from(raw as i16) * 0.000_01)
    }

    /// Shunt current in mA (signed; positive = current flowing into the pack)
    pub fn current_ma(&mut self) -> Result<f64> {
        let raw = self.read_register(REG_CURRENT)?;
        Ok(f64::from(raw as i16) * self.profile.current_lsb_ma)
    }

    /// Power draw in watts
    pub fn power_w(&mut self) -> Result<f64> {
        let raw = self.read_register(REG_POWER)?;
        Ok(f64::from(raw as i16) * self.profile.power_lsb_w)
    }
}

impl<T: Transport> PowerSensor for Ina219<T> {
    fn read_sample(&mut self) -> Result<PowerSample> {
        Ok(PowerSample {
            current_ma: self.current_ma()?,
            bus_voltage_v: self.bus_voltage_v()?,
        })
    }

    fn read_bus_voltage(&mut self) -> Result<f64> {
        self.bus_voltage_v()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    #[test]
    fn configure_programs_calibration_then_config() {
        let transport = MockTransport::new();
        Ina219::new(transport.clone(), SenseRange::Range16V5A).unwrap();

        assert_eq!(
            transport.word_writes(),
            vec![(REG_CALIBRATION, 26868), (REG_CONFIG, 0x0EEF)]
        );
    }

    #[test]
    fn configure_for_32v_range() {
        let transport = MockTransport::new();
        Ina219::new(transport.clone(), SenseRange::Range32V2A).unwrap();

        assert_eq!(
            transport.word_writes(),
            vec![(REG_CALIBRATION, 4096), (REG_CONFIG, 0x3EEF)]
        );
    }

    #[test]
    fn bus_voltage_discards_status_bits() {
        let transport = MockTransport::new();
        let mut sensor = Ina219::new(transport.clone(), SenseRange::Range16V5A).unwrap();

        // 1000 counts above the three status bits -> 4.000 V
        transport.set_register(REG_BUS_VOLTAGE, 1000 << 3);
        assert!((sensor.bus_voltage_v().unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn current_is_twos_complement() {
        let transport = MockTransport::new();
        let mut sensor = Ina219::new(transport.clone(), SenseRange::Range16V5A).unwrap();

        transport.set_register(REG_CURRENT, 100);
        assert!((sensor.current_ma().unwrap() - 15.24).abs() < 1e-9);

        transport.set_register(REG_CURRENT, 0xFFFF); // -1
        assert!((sensor.current_ma().unwrap() + 0.1524).abs() < 1e-9);
    }

    #[test]
    fn every_read_rearms_calibration() {
        let transport = MockTransport::new();
        let mut sensor = Ina219::new(transport.clone(), SenseRange::Range16V5A).unwrap();
        transport.clear_writes();

        sensor.current_ma().unwrap();
        sensor.bus_voltage_v().unwrap();
        assert_eq!(
            transport.word_writes(),
            vec![(REG_CALIBRATION, 26868), (REG_CALIBRATION, 26868)]
        );
    }

    #[test]
    fn read_failure_propagates() {
        let transport = MockTransport::new();
        let mut sensor = Ina219::new(transport.clone(), SenseRange::Range16V5A).unwrap();

        transport.fail_next();
        assert!(sensor.read_sample().is_err());
    }
}
