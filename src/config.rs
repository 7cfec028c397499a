//! Logical configuration values and their register encodings.

use crate::{
    error::DeviceError,
    register::{DO, FAST_ODR, FS, IEN, OM, Register},
};

/// Full-scale range selected in `CTRL_REG2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FullScale {
    /// ±4 gauss (power-on default)
    Gauss4 = 0,
    /// ±8 gauss
    Gauss8 = 1,
    /// ±12 gauss
    Gauss12 = 2,
    /// ±16 gauss
    Gauss16 = 3,
}

impl FullScale {
    /// Decode the FS field of a `CTRL_REG2` byte
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::InvalidFullScale`] if the field holds an unknown code
    pub fn decode(ctrl_reg2: u8) -> Result<Self, DeviceError> {
        Self::try_from(FS.extract(ctrl_reg2))
    }

    /// FS bits for this range, all other bits zero
    #[must_use]
    pub const fn encode(self) -> u8 {
        FS.insert(self as u8)
    }

    /// Upper bound of the range in gauss
    #[must_use]
    pub const fn gauss(self) -> u8 {
        match self {
            Self::Gauss4 => 4,
            Self::Gauss8 => 8,
            Self::Gauss12 => 12,
            Self::Gauss16 => 16,
        }
    }

    /// Sensitivity in LSB per gauss
    #[must_use]
    pub const fn sensitivity(self) -> u16 {
        match self {
            Self::Gauss4 => 6842,
            Self::Gauss8 => 3421,
            Self::Gauss12 => 2281,
            Self::Gauss16 => 1711,
        }
    }
}

impl TryFrom<u8> for FullScale {
    type Error = DeviceError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Gauss4),
            1 => Ok(Self::Gauss8),
            2 => Ok(Self::Gauss12),
            3 => Ok(Self::Gauss16),
            _ => Err(DeviceError::InvalidFullScale(code)),
        }
    }
}

/// X/Y operating mode (OM field of `CTRL_REG1`)
///
/// With `FAST_ODR` set, the mode also fixes the output data rate: the lower
/// the power, the faster the rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OperatingMode {
    /// Low-power mode
    LowPower = 0,
    /// Medium-performance mode
    MediumPerformance = 1,
    /// High-performance mode
    HighPerformance = 2,
    /// Ultra-high-performance mode
    UltraHighPerformance = 3,
}

impl TryFrom<u8> for OperatingMode {
    type Error = DeviceError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::LowPower),
            1 => Ok(Self::MediumPerformance),
            2 => Ok(Self::HighPerformance),
            3 => Ok(Self::UltraHighPerformance),
            _ => Err(DeviceError::InvalidOperatingMode(code)),
        }
    }
}

/// Output data rate
///
/// Rates up to 80 Hz are written to the DO field. Faster rates set `FAST_ODR`
/// and are selected through the operating mode, see [`FAST_RATES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DataRate {
    /// 0.625 Hz
    Hz0_625 = 0,
    /// 1.25 Hz
    Hz1_25 = 1,
    /// 2.5 Hz
    Hz2_5 = 2,
    /// 5 Hz
    Hz5 = 3,
    /// 10 Hz
    Hz10 = 4,
    /// 20 Hz
    Hz20 = 5,
    /// 40 Hz
    Hz40 = 6,
    /// 80 Hz
    Hz80 = 7,
    /// 155 Hz (ultra-high-performance)
    Hz155 = 8,
    /// 300 Hz (high-performance)
    Hz300 = 9,
    /// 560 Hz (medium-performance)
    Hz560 = 10,
    /// 1000 Hz (low-power)
    Hz1000 = 11,
}

/// Operating mode to data rate correspondence while `FAST_ODR` is set
///
/// Used in both directions by [`DataRate::encode`] and [`DataRate::decode`].
pub const FAST_RATES: [(OperatingMode, DataRate); 4] = [
    (OperatingMode::LowPower, DataRate::Hz1000),
    (OperatingMode::MediumPerformance, DataRate::Hz560),
    (OperatingMode::HighPerformance, DataRate::Hz300),
    (OperatingMode::UltraHighPerformance, DataRate::Hz155),
];

impl OperatingMode {
    /// Operating mode that yields `rate` in fast mode, if any
    #[must_use]
    pub fn for_fast_rate(rate: DataRate) -> Option<Self> {
        FAST_RATES
            .iter()
            .find(|(_, fast)| *fast == rate)
            .map(|&(mode, _)| mode)
    }
}

impl DataRate {
    /// All rates, slowest first
    pub const ALL: [Self; 12] = [
        Self::Hz0_625,
        Self::Hz1_25,
        Self::Hz2_5,
        Self::Hz5,
        Self::Hz10,
        Self::Hz20,
        Self::Hz40,
        Self::Hz80,
        Self::Hz155,
        Self::Hz300,
        Self::Hz560,
        Self::Hz1000,
    ];

    /// Rate produced by `mode` while `FAST_ODR` is set
    #[must_use]
    pub fn for_fast_mode(mode: OperatingMode) -> Option<Self> {
        FAST_RATES
            .iter()
            .find(|(fast, _)| *fast == mode)
            .map(|&(_, rate)| rate)
    }

    /// Whether this rate needs `FAST_ODR`
    #[must_use]
    pub const fn is_fast(self) -> bool {
        self as u8 > Self::Hz80 as u8
    }

    /// Nominal rate in millihertz
    #[must_use]
    pub const fn millihertz(self) -> u32 {
        match self {
            Self::Hz0_625 => 625,
            Self::Hz1_25 => 1_250,
            Self::Hz2_5 => 2_500,
            Self::Hz5 => 5_000,
            Self::Hz10 => 10_000,
            Self::Hz20 => 20_000,
            Self::Hz40 => 40_000,
            Self::Hz80 => 80_000,
            Self::Hz155 => 155_000,
            Self::Hz300 => 300_000,
            Self::Hz560 => 560_000,
            Self::Hz1000 => 1_000_000,
        }
    }

    /// `CTRL_REG1` bits selecting this rate, all other bits zero
    ///
    /// Normal rates only fill DO and leave `FAST_ODR` clear. Fast rates set
    /// `FAST_ODR` and the matching OM code.
    #[must_use]
    pub fn encode(self) -> u8 {
        match OperatingMode::for_fast_rate(self) {
            Some(mode) => FAST_ODR.insert(1) | OM.insert(mode as u8),
            None => DO.insert(self as u8),
        }
    }

    /// Decode the rate selected by a `CTRL_REG1` byte
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::InvalidOperatingMode`] if `FAST_ODR` is set and
    /// the OM field holds an unknown code
    pub fn decode(ctrl_reg1: u8) -> Result<Self, DeviceError> {
        if FAST_ODR.extract(ctrl_reg1) == 0 {
            return Self::try_from(DO.extract(ctrl_reg1));
        }

        let code = OM.extract(ctrl_reg1);
        let mode = OperatingMode::try_from(code)?;
        Self::for_fast_mode(mode).ok_or(DeviceError::InvalidOperatingMode(code))
    }
}

impl TryFrom<u8> for DataRate {
    type Error = DeviceError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(DeviceError::InvalidDataRate(code))
    }
}

/// State of the global interrupt enable (IEN) in `INT_CFG`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InterruptPin {
    /// Interrupt generation disabled
    Disabled = 0,
    /// Interrupt generation enabled
    Enabled = 1,
}

impl InterruptPin {
    /// Apply this state to an `INT_CFG` byte, keeping every other bit
    #[must_use]
    pub const fn apply(self, int_cfg: u8) -> u8 {
        match self {
            Self::Enabled => int_cfg | IEN.mask,
            Self::Disabled => IEN.clear(int_cfg),
        }
    }

    /// Read the IEN state out of an `INT_CFG` byte
    #[must_use]
    pub const fn decode(int_cfg: u8) -> Self {
        if IEN.extract(int_cfg) == 0 {
            Self::Disabled
        } else {
            Self::Enabled
        }
    }
}

impl From<bool> for InterruptPin {
    fn from(enabled: bool) -> Self {
        if enabled { Self::Enabled } else { Self::Disabled }
    }
}

impl TryFrom<u8> for InterruptPin {
    type Error = DeviceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Disabled),
            1 => Ok(Self::Enabled),
            _ => Err(DeviceError::InvalidInterruptPin(value)),
        }
    }
}

/// Measurement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Axis {
    /// X axis
    X = 0,
    /// Y axis
    Y = 1,
    /// Z axis
    Z = 2,
}

impl Axis {
    /// Address of the axis' low output byte; the high byte follows it
    #[must_use]
    pub const fn register(self) -> Register {
        match self {
            Self::X => Register::OutXL,
            Self::Y => Register::OutYL,
            Self::Z => Register::OutZL,
        }
    }
}

impl TryFrom<u8> for Axis {
    type Error = DeviceError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::X),
            1 => Ok(Self::Y),
            2 => Ok(Self::Z),
            _ => Err(DeviceError::InvalidAxis(code)),
        }
    }
}

/// Raw magnetic field sample for all three axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// X axis, two's complement
    pub x: i16,
    /// Y axis, two's complement
    pub y: i16,
    /// Z axis, two's complement
    pub z: i16,
}

impl Measurement {
    /// Assemble a sample from the `OUT_X_L..OUT_Z_H` block
    #[must_use]
    pub const fn from_le_bytes(raw: [u8; 6]) -> Self {
        Self {
            x: i16::from_le_bytes([raw[0], raw[1]]),
            y: i16::from_le_bytes([raw[2], raw[3]]),
            z: i16::from_le_bytes([raw[4], raw[5]]),
        }
    }

    /// Raw value for `axis`
    #[must_use]
    pub const fn axis(&self, axis: Axis) -> i16 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Convert to gauss using the sensitivity of `scale`
    #[must_use]
    pub fn to_gauss(&self, scale: FullScale) -> [f32; 3] {
        let lsb_per_gauss = f32::from(scale.sensitivity());
        [
            f32::from(self.x) / lsb_per_gauss,
            f32::from(self.y) / lsb_per_gauss,
            f32::from(self.z) / lsb_per_gauss,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_rate_table_is_consistent_both_ways() {
        for (mode, rate) in FAST_RATES {
            let decoded = DataRate::for_fast_mode(mode).unwrap();
            assert_eq!(OperatingMode::for_fast_rate(decoded), Some(mode));
            assert_eq!(decoded, rate);
            assert!(rate.is_fast());
        }
    }

    #[test]
    fn fast_rates_decrease_with_operating_mode() {
        for pair in FAST_RATES.windows(2) {
            assert!((pair[0].0 as u8) < (pair[1].0 as u8));
            assert!(pair[0].1.millihertz() > pair[1].1.millihertz());
        }
    }

    #[test]
    fn normal_and_fast_paths_partition_all_rates() {
        let fast = DataRate::ALL
            .iter()
            .filter(|rate| OperatingMode::for_fast_rate(**rate).is_some())
            .count();
        assert_eq!(fast, 4);
        for rate in DataRate::ALL {
            assert_eq!(rate.is_fast(), OperatingMode::for_fast_rate(rate).is_some());
        }
    }

    #[test]
    fn every_rate_survives_encode_decode() {
        for rate in DataRate::ALL {
            assert_eq!(DataRate::decode(rate.encode()), Ok(rate));
        }
    }

    #[test]
    fn rate_encodings_touch_only_rate_fields() {
        let rate_bits = DO.mask | FAST_ODR.mask | OM.mask;
        for rate in DataRate::ALL {
            assert_eq!(rate.encode() & !rate_bits, 0);
        }
    }

    #[test]
    fn normal_rate_leaves_fast_odr_clear() {
        assert_eq!(DataRate::Hz80.encode(), 0b0001_1100);
        assert_eq!(DataRate::Hz0_625.encode(), 0);
        assert_eq!(DataRate::Hz1000.encode(), 0b0000_0010);
        assert_eq!(DataRate::Hz155.encode(), 0b0110_0010);
    }

    #[test]
    fn rejects_undefined_rate_codes() {
        assert_eq!(DataRate::try_from(11), Ok(DataRate::Hz1000));
        assert_eq!(DataRate::try_from(12), Err(DeviceError::InvalidDataRate(12)));
        assert_eq!(DataRate::try_from(15), Err(DeviceError::InvalidDataRate(15)));
    }

    #[test]
    fn decodes_every_full_scale_code() {
        for code in 0..4u8 {
            let scale = FullScale::decode(code << 5).unwrap();
            assert_eq!(scale as u8, code);
            assert_eq!(FullScale::decode(scale.encode() | 0x9F), Ok(scale));
        }
        assert_eq!(FullScale::try_from(4), Err(DeviceError::InvalidFullScale(4)));
    }

    #[test]
    fn interrupt_pin_only_touches_ien() {
        for byte in [0x00, 0xE8, 0xFF, 0x5A] {
            let enabled = InterruptPin::Enabled.apply(byte);
            let disabled = InterruptPin::Disabled.apply(enabled);
            assert_eq!(enabled & !IEN.mask, byte & !IEN.mask);
            assert_eq!(disabled, byte & !IEN.mask);
            assert_eq!(InterruptPin::decode(enabled), InterruptPin::Enabled);
            assert_eq!(InterruptPin::decode(disabled), InterruptPin::Disabled);
        }
        assert_eq!(InterruptPin::try_from(2), Err(DeviceError::InvalidInterruptPin(2)));
        assert_eq!(InterruptPin::from(true), InterruptPin::Enabled);
    }

    #[test]
    fn assembles_little_endian_samples() {
        let m = Measurement::from_le_bytes([0x34, 0x12, 0xFF, 0xFF, 0x00, 0x80]);
        assert_eq!(m.axis(Axis::X), 4660);
        assert_eq!(m.axis(Axis::Y), -1);
        assert_eq!(m.axis(Axis::Z), i16::MIN);
    }

    #[test]
    fn converts_to_gauss() {
        let m = Measurement { x: 6842, y: -3421, z: 0 };
        assert_eq!(m.to_gauss(FullScale::Gauss4), [1.0, -0.5, 0.0]);
    }
}
