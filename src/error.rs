/// Error type for LIS3MDL operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error on the I2C bus
    Communication(E),
    /// Invalid input or implausible value decoded from a register
    Device(DeviceError),
}

impl<E> Error<E> {
    /// Whether the failure happened on the bus
    #[must_use]
    pub const fn is_bus_error(&self) -> bool {
        matches!(self, Self::Communication(_))
    }

    /// Whether the failure was detected by the driver itself
    #[must_use]
    pub const fn is_device_error(&self) -> bool {
        matches!(self, Self::Device(_))
    }
}

impl<E> From<DeviceError> for Error<E> {
    fn from(error: DeviceError) -> Self {
        Self::Device(error)
    }
}

/// Device-level errors, each carrying the offending raw code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    /// Full-scale code outside 0..=3
    InvalidFullScale(u8),
    /// Output data rate code outside 0..=11
    InvalidDataRate(u8),
    /// Operating mode code outside 0..=3
    InvalidOperatingMode(u8),
    /// Axis selector outside 0..=2
    InvalidAxis(u8),
    /// Interrupt pin state other than 0 or 1
    InvalidInterruptPin(u8),
}
