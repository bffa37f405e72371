// Licensed under the Apache-2.0 license

//! I2C slave over the MSP430 USI module.
//!
//! [`usi::Usi`] drives the USI registers, [`transport::SlaveTransport`] is the
//! interrupt-driven byte/bit state machine, and [`target`] presents the SD16
//! register protocol to it through the `proposed-traits` target interface.

pub mod common;
pub mod target;
pub mod traits;
pub mod transport;
pub mod usi;

pub use common::{
    ClockPolarity, Direction, Error, SampleLatch, SlaveConfig, SlaveConfigBuilder, SlaveEvent,
    SlaveStatus, State,
};
pub use traits::UsiSlavePort;
pub use transport::SlaveTransport;
pub use usi::Usi;
