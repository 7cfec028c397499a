#![no_std]
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

mod asynch;
pub mod codec;
mod config;
mod driver;
mod error;
mod register;

pub use asynch::Lis3mdlAsync;
pub use config::{Axis, DataRate, FAST_RATES, FullScale, InterruptPin, Measurement, OperatingMode};
pub use driver::{Lis3mdl, Magnetometer, SlaveAddr};
pub use error::{DeviceError, Error};
pub use register::Register;
