// Licensed under the Apache-2.0 license

//! SD16 hardware seam used by the register protocol and the acquisition logic.

use crate::sd16::config::Sd16Config;
use crate::sd16::registers::{AnalogEnable, ChannelControl, InputControl};
use core::convert::Infallible;

/// Typed access to one SD16_A channel.
///
/// The configuration registers live in the peripheral itself; this trait is
/// the only way the crate reads or mutates them after bring-up.
pub trait Sd16Port {
    /// Reference, clock, default channel configuration and analog routing.
    fn init(&mut self, config: &Sd16Config);

    fn channel_control(&self) -> ChannelControl;
    fn set_channel_control(&mut self, value: ChannelControl);

    fn input_control(&self) -> InputControl;
    fn set_input_control(&mut self, value: InputControl);

    fn analog_enable(&self) -> AnalogEnable;
    fn set_analog_enable(&mut self, value: AnalogEnable);

    /// Conversion result once the channel's interrupt flag is set.
    ///
    /// Returns `WouldBlock` while the conversion is in progress. Reading the
    /// result clears the flag.
    fn read_result(&mut self) -> nb::Result<i16, Infallible>;

    /// SD16MEM0 regardless of the flag, as done by the completion interrupt.
    fn conversion_value(&mut self) -> i16;
}
