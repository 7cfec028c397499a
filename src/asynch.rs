//! Asynchronous driver for LIS3MDL magnetometer

use embedded_hal_async::i2c::I2c;

use crate::{
    config::{Axis, DataRate, FullScale, InterruptPin, Measurement},
    driver::SlaveAddr,
    error::Error,
    register::{FS, Register},
};

/// LIS3MDL driver instance (asynchronous)
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lis3mdlAsync<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, E> Lis3mdlAsync<I2C>
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

    async fn read_registers(&mut self, register: Register, buf: &mut [u8]) -> Result<(), Error<E>> {
        let address = u8::from(register);

        #[cfg(feature = "defmt")]
        defmt::trace!("Reading {} byte(s) from register 0x{:02X}", buf.len(), address);

        self.i2c
            .write_read(self.address, &[address], buf)
            .await
            .map_err(Error::Communication)
    }

    async fn read_register(&mut self, register: Register) -> Result<u8, Error<E>> {
        let mut buf = [0u8; 1];
        self.read_registers(register, &mut buf).await?;
        Ok(buf[0])
    }

    async fn write_register(&mut self, register: Register, data: u8) -> Result<(), Error<E>> {
        let address = u8::from(register);

        #[cfg(feature = "defmt")]
        defmt::debug!("Writing 0x{:02X} to register 0x{:02X}", data, address);

        self.i2c
            .write(self.address, &[address, data])
            .await
            .map_err(Error::Communication)
    }

    async fn modify_register(
        &mut self,
        register: Register,
        f: impl FnOnce(u8) -> u8,
    ) -> Result<(), Error<E>> {
        let data = self.read_register(register).await?;
        self.write_register(register, f(data)).await
    }

    /// Get the configured full-scale range from `CTRL_REG2`
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails or the FS field holds an unknown code
    pub async fn full_scale(&mut self) -> Result<FullScale, Error<E>> {
        let ctrl_reg2 = self.read_register(Register::CtrlReg2).await?;
        FullScale::decode(ctrl_reg2).map_err(Error::Device)
    }

    /// Select the full-scale range, preserving the other `CTRL_REG2` bits
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn set_full_scale(&mut self, scale: FullScale) -> Result<(), Error<E>> {
        self.modify_register(Register::CtrlReg2, |v| FS.clear(v) | scale.encode())
            .await
    }

    /// Set the output data rate, ORing the rate bits into `CTRL_REG1`
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn set_output_data_rate(&mut self, rate: DataRate) -> Result<(), Error<E>> {
        self.modify_register(Register::CtrlReg1, |v| v | rate.encode())
            .await
    }

    /// Get the output data rate from `CTRL_REG1`
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails or `FAST_ODR` is set with
    /// an unknown operating mode
    pub async fn output_data_rate(&mut self) -> Result<DataRate, Error<E>> {
        let ctrl_reg1 = self.read_register(Register::CtrlReg1).await?;
        DataRate::decode(ctrl_reg1).map_err(Error::Device)
    }

    /// Enable or disable the global interrupt (IEN bit of `INT_CFG`)
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn set_interrupt_pin(
        &mut self,
        state: impl Into<InterruptPin>,
    ) -> Result<(), Error<E>> {
        let state = state.into();
        self.modify_register(Register::IntCfg, |v| state.apply(v))
            .await
    }

    /// Get the IEN state from `INT_CFG`
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn interrupt_pin(&mut self) -> Result<InterruptPin, Error<E>> {
        self.read_register(Register::IntCfg)
            .await
            .map(InterruptPin::decode)
    }

    /// Read the raw sample of one axis
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn read_axis(&mut self, axis: Axis) -> Result<i16, Error<E>> {
        let mut buf = [0u8; 2];
        self.read_registers(axis.register(), &mut buf).await?;
        Ok(i16::from_le_bytes(buf))
    }

    /// Read all three axes in one transfer
    ///
    /// # Errors
    ///
    /// Returns an error if I2C communication fails
    pub async fn read_measurement(&mut self) -> Result<Measurement, Error<E>> {
        let mut buf = [0u8; 6];
        self.read_registers(Register::OutXL, &mut buf).await?;
        Ok(Measurement::from_le_bytes(buf))
    }
}
