// Licensed under the Apache-2.0 license

//! Bring-up and the bus interrupt entry point.
//!
//! ```no_run
//! use sd16_i2c_bridge::bridge::{Bridge, BridgeConfig};
//! use sd16_i2c_bridge::i2c::Usi;
//! use sd16_i2c_bridge::regs::Mmio;
//! use sd16_i2c_bridge::sample::SampleRegister;
//! use sd16_i2c_bridge::sd16::{CompletionHandler, Sd16};
//!
//! static SAMPLE: SampleRegister = SampleRegister::new();
//!
//! // SAFETY: single-core device, handles are split between the two ISRs.
//! let regs = unsafe { Mmio::steal() };
//! let mut bridge = Bridge::new(Usi::new(regs), Sd16::new(regs), &SAMPLE, &BridgeConfig::default())
//!     .unwrap();
//! let mut adc_isr = CompletionHandler::new(Sd16::new(regs), &SAMPLE);
//!
//! // USI vector:  bridge.on_usi_interrupt();
//! // SD16 vector: adc_isr.on_interrupt();
//! # bridge.on_usi_interrupt();
//! # adc_isr.on_interrupt();
//! ```

use crate::common::{ConfigurationError, Logger, NoOpLogger};
use crate::i2c::common::{SlaveConfig, SlaveStatus};
use crate::i2c::traits::UsiSlavePort;
use crate::i2c::transport::SlaveTransport;
use crate::protocol::RegisterProtocol;
use crate::sample::SampleRegister;
use crate::sd16::config::Sd16Config;
use crate::sd16::traits::Sd16Port;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BridgeConfig {
    pub slave: SlaveConfig,
    pub adc: Sd16Config,
}

/// One USI slave serving one SD16 channel.
///
/// `L` logs bus events, `RL` logs register changes.
pub struct Bridge<'s, P, A, L = NoOpLogger, RL = NoOpLogger>
where
    P: UsiSlavePort,
    A: Sd16Port,
    L: Logger,
    RL: Logger,
{
    transport: SlaveTransport<P, RegisterProtocol<'s, A, RL>, L>,
}

impl<'s, P, A> Bridge<'s, P, A>
where
    P: UsiSlavePort,
    A: Sd16Port,
{
    pub fn new(
        port: P,
        adc: A,
        sample: &'s SampleRegister,
        config: &BridgeConfig,
    ) -> Result<Self, ConfigurationError> {
        Self::with_loggers(port, adc, sample, config, NoOpLogger, NoOpLogger)
    }
}

impl<'s, P, A, L, RL> Bridge<'s, P, A, L, RL>
where
    P: UsiSlavePort,
    A: Sd16Port,
    L: Logger,
    RL: Logger,
{
    /// Check the slave address, then initialise the ADC (reference, clock,
    /// default channel and routing), then register the address and bring up
    /// the USI. Nothing is programmed when the address is rejected.
    pub fn with_loggers(
        port: P,
        mut adc: A,
        sample: &'s SampleRegister,
        config: &BridgeConfig,
        bus_logger: L,
        register_logger: RL,
    ) -> Result<Self, ConfigurationError> {
        config.slave.validate()?;
        adc.init(&config.adc);
        let protocol = RegisterProtocol::with_logger(adc, sample, register_logger);
        let mut transport = SlaveTransport::with_logger(port, protocol, config.slave, bus_logger);
        transport
            .init()
            .map_err(|_| ConfigurationError::InvalidAddress(config.slave.address))?;
        Ok(Self { transport })
    }

    /// USI interrupt body.
    pub fn on_usi_interrupt(&mut self) {
        self.transport.on_interrupt();
    }

    pub fn status(&self) -> SlaveStatus {
        self.transport.status()
    }

    pub fn protocol(&self) -> &RegisterProtocol<'s, A, RL> {
        self.transport.target()
    }

    pub fn protocol_mut(&mut self) -> &mut RegisterProtocol<'s, A, RL> {
        self.transport.target_mut()
    }

    pub fn transport(&self) -> &SlaveTransport<P, RegisterProtocol<'s, A, RL>, L> {
        &self.transport
    }
}
