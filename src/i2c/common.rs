// Licensed under the Apache-2.0 license

//! Common types and constants for the USI I2C slave.
//!
//! This module provides shared definitions for configuration, error handling,
//! transaction state and the events the transport reports.

use crate::common::ConfigurationError;
use embedded_hal::i2c::{ErrorKind, SevenBitAddress};

/// Address the device answers on unless configured otherwise.
pub const DEFAULT_SLAVE_ADDRESS: SevenBitAddress = 0x0B;

/// Bytes in a write frame: `[opcode, value]`.
pub const RX_MAX_BYTES: u8 = 2;
/// Bytes of real data in a read frame; later bytes are [`DUMMY_BYTE`].
pub const TX_MAX_BYTES: u8 = 2;

pub const ACK: u8 = 0x00;
pub const NACK: u8 = 0xFF;
pub const DUMMY_BYTE: u8 = 0xFF;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Master writes to slave (R/W bit 0).
    #[default]
    Write,
    /// Master reads from slave (R/W bit 1).
    Read,
}

impl Direction {
    pub fn from_rw_bit(address_byte: u8) -> Self {
        if address_byte & 0x01 == 0 {
            Direction::Write
        } else {
            Direction::Read
        }
    }
}

/// Idle level of SCL as seen by the USI clock logic.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockPolarity {
    IdleLow,
    #[default]
    IdleHigh,
}

/// When the 16-bit value for a read transaction is sampled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleLatch {
    /// Re-read the selected source for every byte. A conversion completing
    /// between the two bytes yields a mixed pair.
    #[default]
    PerByte,
    /// Capture both bytes once, when a read address matches.
    Transaction,
}

/// Transport state ids. The numbering follows the USI slave flow:
/// write 2->4->6->8, read 2->4->10->12->14.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum State {
    #[default]
    Idle = 0,
    AddrCount = 2,
    AddrMatch = 4,
    RxByte = 6,
    RxEval = 8,
    TxByte = 10,
    AckWait = 12,
    AckEval = 14,
    Abort = 16,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlaveEvent {
    Start,
    AddressMatched(Direction),
    AddressMismatch(u8),
    CommandDispatched { opcode: u8, value: u8 },
    ExcessByte(u8),
    MasterNack,
    Aborted,
}

/// Snapshot of the transport for diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlaveStatus {
    pub address: SevenBitAddress,
    pub state: State,
    pub direction: Direction,
    pub rx_count: u8,
    pub tx_count: u8,
    pub last_event: Option<SlaveEvent>,
}

/// Error type of the register device behind the transport.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A write did not carry exactly one `[opcode, value]` frame.
    Overrun,
    Invalid,
}

impl embedded_hal::i2c::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::Overrun => ErrorKind::Overrun,
            Error::Invalid => ErrorKind::Other,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlaveConfig {
    pub address: SevenBitAddress,
    pub clock_polarity: ClockPolarity,
    pub sample_latch: SampleLatch,
}

impl SlaveConfig {
    /// Rejects addresses that do not fit in seven bits. The fields are public,
    /// so a config assembled by hand may skip the builder's check.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.address > 0x7F {
            return Err(ConfigurationError::InvalidAddress(self.address));
        }
        Ok(())
    }
}

impl Default for SlaveConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_SLAVE_ADDRESS,
            clock_polarity: ClockPolarity::IdleHigh,
            sample_latch: SampleLatch::PerByte,
        }
    }
}

pub struct SlaveConfigBuilder {
    address: SevenBitAddress,
    clock_polarity: ClockPolarity,
    sample_latch: SampleLatch,
}

impl Default for SlaveConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SlaveConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        let defaults = SlaveConfig::default();
        Self {
            address: defaults.address,
            clock_polarity: defaults.clock_polarity,
            sample_latch: defaults.sample_latch,
        }
    }
    #[must_use]
    pub fn address(mut self, address: SevenBitAddress) -> Self {
        self.address = address;
        self
    }
    #[must_use]
    pub fn clock_polarity(mut self, polarity: ClockPolarity) -> Self {
        self.clock_polarity = polarity;
        self
    }
    #[must_use]
    pub fn sample_latch(mut self, latch: SampleLatch) -> Self {
        self.sample_latch = latch;
        self
    }
    pub fn build(self) -> Result<SlaveConfig, ConfigurationError> {
        let config = SlaveConfig {
            address: self.address,
            clock_polarity: self.clock_polarity,
            sample_latch: self.sample_latch,
        };
        config.validate()?;
        Ok(config)
    }
}
