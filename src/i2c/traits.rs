// Licensed under the Apache-2.0 license

//! # USI Slave Hardware Abstraction
//!
//! The transport state machine never touches registers directly. Everything it
//! needs from the Universal Serial Interface is expressed by [`UsiSlavePort`]:
//!
//! ```text
//! UsiSlavePort (required)
//!     ├── init                      one-time bring-up
//!     ├── start_pending / clear_start
//!     ├── arm_bit_counter           bits to shift before the next interrupt
//!     ├── shift_register / load_shift_register
//!     ├── drive_sda / release_sda
//!     └── clear_pending
//! UsiSlavePort (provided)
//!     ├── receive_byte              release SDA, shift in 8 bits
//!     ├── transmit_byte             drive SDA, shift out 8 bits
//!     ├── send_ack_bit              drive SDA, shift out ACK/NACK
//!     └── receive_ack_bit           release SDA, shift in the master's ACK/NACK
//! ```
//!
//! Each interrupt of the USI corresponds to the bit counter reaching zero or a
//! start condition being detected. Implementations must be non-blocking.

use crate::i2c::common::{SlaveConfig, ACK, NACK};

pub trait UsiSlavePort {
    /// Bring the USI up as an I2C slave: pull-ups on SCL/SDA, I2C mode, data
    /// and start-condition interrupts enabled, clock polarity from `config`,
    /// automatic flag clearing disabled, released from software reset.
    fn init(&mut self, config: &SlaveConfig);

    /// Whether a start condition has been detected since the flag was cleared.
    fn start_pending(&self) -> bool;

    fn clear_start(&mut self);

    /// Load the bit counter. The next interrupt fires once `bits` bits have
    /// been shifted in or out.
    fn arm_bit_counter(&mut self, bits: u8);

    /// Contents of the low shift register.
    fn shift_register(&self) -> u8;

    fn load_shift_register(&mut self, byte: u8);

    /// Enable the SDA output driver.
    fn drive_sda(&mut self);

    /// Turn SDA into an input so the master can drive it.
    fn release_sda(&mut self);

    /// Acknowledge the interrupt. Called once at the end of every ISR pass.
    fn clear_pending(&mut self);

    fn receive_byte(&mut self) {
        self.release_sda();
        self.arm_bit_counter(8);
    }

    fn transmit_byte(&mut self, byte: u8) {
        self.drive_sda();
        self.load_shift_register(byte);
        self.arm_bit_counter(8);
    }

    fn send_ack_bit(&mut self, ack: bool) {
        self.drive_sda();
        self.load_shift_register(if ack { ACK } else { NACK });
        self.arm_bit_counter(1);
    }

    fn receive_ack_bit(&mut self) {
        self.release_sda();
        self.arm_bit_counter(1);
    }

    /// After [`receive_ack_bit`](Self::receive_ack_bit) completed: true if the
    /// master answered NACK (SDA high, shifted into bit 0).
    fn master_nacked(&self) -> bool {
        self.shift_register() & (NACK & 0x01) != 0
    }
}
