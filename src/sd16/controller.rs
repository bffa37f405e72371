// Licensed under the Apache-2.0 license

//! Register-level [`Sd16Port`] for SD16_A channel 0.

use crate::regs::{addr, pin, RegisterIo};
use crate::sd16::config::{Reference, Sd16Config};
use crate::sd16::registers::{AnalogEnable, ChannelControl, InputControl};
use crate::sd16::routing::analog_routing;
use crate::sd16::traits::Sd16Port;
use core::convert::Infallible;

pub struct Sd16<R: RegisterIo> {
    regs: R,
}

impl<R: RegisterIo> Sd16<R> {
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    pub fn free(self) -> R {
        self.regs
    }
}

impl<R: RegisterIo> Sd16Port for Sd16<R> {
    fn init(&mut self, config: &Sd16Config) {
        let control = config.control();
        // The mid-voltage buffer is switched on last, after routing is settled.
        self.regs
            .write16(addr::SD16CTL, control.with_vmid_buffer_on(false).bits());
        self.set_channel_control(config.channel_control);
        self.set_input_control(config.input_control);
        self.set_analog_enable(analog_routing(config.input_control, config.channel_control));

        if let Reference::Internal {
            buffered_output: true,
        } = config.reference
        {
            self.regs.set_bits8(addr::P1SEL, pin::BIT3);
            self.regs.write16(addr::SD16CTL, control.bits());
        }
    }

    fn channel_control(&self) -> ChannelControl {
        ChannelControl(self.regs.read16(addr::SD16CCTL0))
    }

    fn set_channel_control(&mut self, value: ChannelControl) {
        self.regs.write16(addr::SD16CCTL0, value.bits());
    }

    fn input_control(&self) -> InputControl {
        InputControl(self.regs.read8(addr::SD16INCTL0))
    }

    fn set_input_control(&mut self, value: InputControl) {
        self.regs.write8(addr::SD16INCTL0, value.bits());
    }

    fn analog_enable(&self) -> AnalogEnable {
        AnalogEnable(self.regs.read8(addr::SD16AE))
    }

    fn set_analog_enable(&mut self, value: AnalogEnable) {
        self.regs.write8(addr::SD16AE, value.bits());
    }

    fn read_result(&mut self) -> nb::Result<i16, Infallible> {
        if self.channel_control().interrupt_pending() {
            Ok(self.conversion_value())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    fn conversion_value(&mut self) -> i16 {
        self.regs.read16(addr::SD16MEM0) as i16
    }
}
