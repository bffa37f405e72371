// Licensed under the Apache-2.0 license

//! Conversion start/stop and the completion interrupt.
//!
//! A single-shot start spins on the conversion-complete flag inside the bus
//! ISR. That stalls every other interrupt for one conversion time (about 1 ms
//! at OSR 1024 and a 1 MHz modulator clock). The wait is bounded by the
//! hardware and has no timeout.

use crate::sample::{SampleRegister, TxSource};
use crate::sd16::registers::ConversionMode;
use crate::sd16::traits::Sd16Port;

pub struct Acquisition<'s, A: Sd16Port> {
    adc: A,
    sample: &'s SampleRegister,
}

impl<'s, A: Sd16Port> Acquisition<'s, A> {
    pub fn new(adc: A, sample: &'s SampleRegister) -> Self {
        Self { adc, sample }
    }

    pub fn adc(&self) -> &A {
        &self.adc
    }

    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }

    pub fn sample(&self) -> &'s SampleRegister {
        self.sample
    }

    /// Set the start bit. In single mode, wait for the result and capture it;
    /// in continuous mode the completion interrupt keeps the sample fresh.
    pub fn start(&mut self, selector: &mut TxSource) -> ConversionMode {
        let cc = self.adc.channel_control();
        let mode = cc.mode();
        self.adc.set_channel_control(cc.with_start(true));

        if mode == ConversionMode::Single {
            let value = match nb::block!(self.adc.read_result()) {
                Ok(value) => value,
                Err(never) => match never {},
            };
            self.sample.store(value);
        }
        *selector = TxSource::Sample;
        mode
    }

    /// Clear the start bit. The sample keeps its last value.
    pub fn stop(&mut self) {
        let cc = self.adc.channel_control();
        self.adc.set_channel_control(cc.with_start(false));
    }
}

/// Body of the SD16 interrupt. Owns its own port handle so it can run
/// independently of the bus ISR.
pub struct CompletionHandler<'s, A: Sd16Port> {
    adc: A,
    sample: &'s SampleRegister,
}

impl<'s, A: Sd16Port> CompletionHandler<'s, A> {
    pub fn new(adc: A, sample: &'s SampleRegister) -> Self {
        Self { adc, sample }
    }

    pub fn on_interrupt(&mut self) {
        let value = self.adc.conversion_value();
        self.sample.store(value);
    }
}
