// Licensed under the Apache-2.0 license

//! Analog input multiplexer routing.
//!
//! | channel | unipolar | bipolar       |
//! |---------|----------|---------------|
//! | A0      | P1.0     | P1.0 + P1.1   |
//! | A1      | P1.2     | P1.2 + P1.3   |
//! | A2      | P1.4     | P1.4 + P1.5   |
//!
//! Any other channel selection disconnects every analog pin.

use crate::sd16::registers::{AnalogEnable, ChannelControl, InputChannel, InputControl, Polarity};

pub fn analog_routing(input: InputControl, channel_control: ChannelControl) -> AnalogEnable {
    let positive = match input.channel() {
        InputChannel::A0 => 0,
        InputChannel::A1 => 2,
        InputChannel::A2 => 4,
        _ => return AnalogEnable::NONE,
    };
    match channel_control.polarity() {
        Polarity::Unipolar => AnalogEnable::pin(positive),
        Polarity::Bipolar => AnalogEnable::pin(positive).union(AnalogEnable::pin(positive + 1)),
    }
}
