//! Blocking driver for LIS3MDL magnetometer

use embedded_hal::i2c::I2c;

use crate::{
    config::{Axis, DataRate, FullScale, InterruptPin, Measurement},
    error::Error,
    register::{FS, Register},
};

/// Possible I2C addresses of the LIS3MDL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlaveAddr {
    /// SDO/SA1 low -> `0x1C`
    #[default]
    Default,
    /// SDO/SA1 high -> `0x1E`
    Alternative,
}

impl SlaveAddr {
    /// 7-bit bus address
    #[must_use]
    pub const fn addr(self) -> u8 {
        match self {
            Self::Default => 0x1C,
            Self::Alternative => 0x1E,
        }
    }
}

/// Register-level magnetometer operations
pub trait Magnetometer {
    /// Error returned by every operation
    type Error;

    /// Currently configured full-scale range
    ///
    /// # Errors
    ///
    /// Bus failure or an implausible FS code
    fn full_scale(&mut self) -> Result<FullScale, Self::Error>;

    /// Select an output data rate, keeping unrelated `CTRL_REG1` bits
    ///
    /// # Errors
    ///
    /// Bus failure on the read or the write
    fn set_output_data_rate(&mut self, rate: DataRate) -> Result<(), Self::Error>;

    /// Currently configured output data rate
    ///
    /// # Errors
    ///
    /// Bus failure or an implausible operating mode
    fn output_data_rate(&mut self) -> Result<DataRate, Self::Error>;

    /// Enable or disable the global interrupt on the INT pin
    ///
    /// # Errors
    ///
    /// Bus failure on the read or the write
    fn set_interrupt_pin(&mut self, state: InterruptPin) -> Result<(), Self::Error>;

    /// Raw two's complement sample of one axis
    ///
    /// # Errors
    ///
    /// Bus failure
    fn read_axis(&mut self, axis: Axis) -> Result<i16, Self::Error>;
}

/// LIS3MDL driver instance (blocking)
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lis3mdl<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, E> Lis3mdl<I2C>
where
    I2C: I2c<Error = E>,
{
    /// Create a new LIS3MDL driver instance
    pub fn new(i2c: I2C, addr: SlaveAddr) -> Self {
        Self {
            i2c,
            address: addr.addr(),
        }
    }

    /// Release the I2C bus, consuming the driver
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Read `buf.len()` consecutive registers starting at `register`
    fn read_registers(&mut self, register: Register, buf: &mut [u8]) -> Result<(), Error<E>> {
        let address = u8::from(register);

        #[cfg(feature = "defmt")]
        defmt::trace!("Reading {} byte(s) from register 0x{:02X}", buf.len(), address);

        self.i2c
            .write_read(self.address, &[address], buf)
            .map_err(Error::Communication)
    }

    fn read_register(&mut self, register: Register) -> Result<u8, Error<E>> {
        let mut buf = [0u8; 1];
        self.read_registers(register, &mut buf)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Register 0x{:02X} value: 0x{:02X}", u8::from(register), buf[0]);

        Ok(buf[0])
    }

    fn write_register(&mut self, register: Register, data: u8) -> Result<(), Error<E>> {
        let address = u8::from(register);

        #[cfg(feature = "defmt")]
        defmt::debug!("Writing 0x{:02X} to register 0x{:02X}", data, address);

        self.i2c
            .write(self.address, &[address, data])
            .map_err(Error::Communication)
    }

    fn modify_register<R>(
        &mut self,
        register: Register,
        f: impl FnOnce(&mut u8) -> R,
    ) -> Result<R, Error<E>> {
        let mut data = self.read_register(register)?;

        let result = f(&mut data);

        self.write_register(register, data)?;

        Ok(result)
    }

    /// Get the configured full-scale range from `CTRL_REG2`
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails or the FS field holds an unknown code
    pub fn full_scale(&mut self) -> Result<FullScale, Error<E>> {
        let ctrl_reg2 = self.read_register(Register::CtrlReg2)?;
        FullScale::decode(ctrl_reg2).map_err(|err| {
            #[cfg(feature = "defmt")]
            defmt::warn!("Implausible CTRL_REG2 value: 0x{:02X}", ctrl_reg2);
            Error::Device(err)
        })
    }

    /// Select the full-scale range
    ///
    /// Clears the FS field of `CTRL_REG2` and writes the new code; other bits
    /// are preserved
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn set_full_scale(&mut self, scale: FullScale) -> Result<(), Error<E>> {
        self.modify_register(Register::CtrlReg2, |v: &mut u8| {
            *v = FS.clear(*v) | scale.encode();
        })
    }

    /// Set the output data rate
    ///
    /// The rate bits are ORed into the current `CTRL_REG1` value, so bits
    /// outside DO, `FAST_ODR` and OM are never cleared
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn set_output_data_rate(&mut self, rate: DataRate) -> Result<(), Error<E>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Setting output data rate {}", rate);

        self.modify_register(Register::CtrlReg1, |v: &mut u8| *v |= rate.encode())
    }

    /// Get the output data rate from `CTRL_REG1`
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails or `FAST_ODR` is set with
    /// an unknown operating mode
    pub fn output_data_rate(&mut self) -> Result<DataRate, Error<E>> {
        let ctrl_reg1 = self.read_register(Register::CtrlReg1)?;
        DataRate::decode(ctrl_reg1).map_err(|err| {
            #[cfg(feature = "defmt")]
            defmt::warn!("Implausible CTRL_REG1 value: 0x{:02X}", ctrl_reg1);
            Error::Device(err)
        })
    }

    /// Enable or disable the global interrupt (IEN bit of `INT_CFG`)
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn set_interrupt_pin(&mut self, state: impl Into<InterruptPin>) -> Result<(), Error<E>> {
        let state = state.into();
        self.modify_register(Register::IntCfg, |v: &mut u8| *v = state.apply(*v))
    }

    /// Get the IEN state from `INT_CFG`
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn interrupt_pin(&mut self) -> Result<InterruptPin, Error<E>> {
        self.read_register(Register::IntCfg)
            .map(InterruptPin::decode)
    }

    /// Read the raw sample of one axis
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn read_axis(&mut self, axis: Axis) -> Result<i16, Error<E>> {
        let mut buf = [0u8; 2];
        self.read_registers(axis.register(), &mut buf)?;
        Ok(i16::from_le_bytes(buf))
    }

    /// Read all three axes in one transfer
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub fn read_measurement(&mut self) -> Result<Measurement, Error<E>> {
        let mut buf = [0u8; 6];
        self.read_registers(Register::OutXL, &mut buf)?;
        Ok(Measurement::from_le_bytes(buf))
    }
}

impl<I2C, E> Magnetometer for Lis3mdl<I2C>
where
    I2C: I2c<Error = E>,
{
    type Error = Error<E>;

    fn full_scale(&mut self) -> Result<FullScale, Self::Error> {
        Lis3mdl::full_scale(self)
    }

    fn set_output_data_rate(&mut self, rate: DataRate) -> Result<(), Self::Error> {
        Lis3mdl::set_output_data_rate(self, rate)
    }

    fn output_data_rate(&mut self) -> Result<DataRate, Self::Error> {
        Lis3mdl::output_data_rate(self)
    }

    fn set_interrupt_pin(&mut self, state: InterruptPin) -> Result<(), Self::Error> {
        Lis3mdl::set_interrupt_pin(self, state)
    }

    fn read_axis(&mut self, axis: Axis) -> Result<i16, Self::Error> {
        Lis3mdl::read_axis(self, axis)
    }
}
