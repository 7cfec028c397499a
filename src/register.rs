//! Register addresses and bit fields for the LIS3MDL sensor.

use crate::codec::Field;

/// Register addresses for LIS3MDL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
#[repr(u8)]
pub enum Register {
    /// Control register 1: operating mode and output data rate
    CtrlReg1 = 0x20,
    /// Control register 2: full-scale selection
    CtrlReg2 = 0x21,

    /// X-axis output, low byte
    OutXL = 0x28,
    /// X-axis output, high byte
    OutXH = 0x29,
    /// Y-axis output, low byte
    OutYL = 0x2A,
    /// Y-axis output, high byte
    OutYH = 0x2B,
    /// Z-axis output, low byte
    OutZL = 0x2C,
    /// Z-axis output, high byte
    OutZH = 0x2D,

    /// Interrupt configuration
    IntCfg = 0x30,
}

impl From<Register> for u8 {
    fn from(reg: Register) -> u8 {
        reg as u8
    }
}

/// `CTRL_REG2` FS1..FS0: full-scale selection (bits 6:5)
pub const FS: Field = Field::new(0b0110_0000, 5);

/// `CTRL_REG1` DO2..DO0: normal output data rate (bits 4:2)
pub const DO: Field = Field::new(0b0001_1100, 2);

/// `CTRL_REG1` `FAST_ODR`: enables rates above 80 Hz (bit 1)
pub const FAST_ODR: Field = Field::new(0b0000_0010, 1);

/// `CTRL_REG1` OM1..OM0: X/Y operating mode (bits 6:5)
///
/// Selects the data rate only while `FAST_ODR` is set
pub const OM: Field = Field::new(0b0110_0000, 5);

/// `INT_CFG` IEN: global interrupt enable on the INT pin (bit 0)
pub const IEN: Field = Field::new(0b0000_0001, 0);
