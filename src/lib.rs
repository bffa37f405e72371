// Licensed under the Apache-2.0 license

//! SD16 delta-sigma ADC exposed as an I2C register device over a USI slave.
//!
//! Both halves run from interrupt context: [`bridge::Bridge::on_usi_interrupt`]
//! is the bus ISR body and [`sd16::acquisition::CompletionHandler::on_interrupt`]
//! is the conversion-complete ISR body. The only state they share is the
//! [`sample::SampleRegister`].

// Enforce Copilot coding guidelines - prevent panic-prone patterns in production code only
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::indexing_slicing))]
#![cfg_attr(not(test), warn(clippy::expect_used))]
#![cfg_attr(not(test), no_std)]
pub mod bridge;
pub mod common;
pub mod i2c;
pub mod protocol;
pub mod regs;
pub mod sample;
pub mod sd16;
#[cfg(test)]
mod tests;
