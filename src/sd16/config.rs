// Licensed under the Apache-2.0 license

//! One-time SD16 bring-up parameters.

use crate::common::ConfigurationError;
use crate::sd16::registers::{
    ChannelControl, ClockDivider, ClockSource, ConversionMode, DataFormat, ExtraDivider, Gain,
    InputChannel, InputControl, InterruptDelay, OversamplingRatio, Polarity, Sd16Control,
};
use fugit::HertzU32;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reference {
    /// Internal 1.2 V reference. With `buffered_output` the buffered reference
    /// is also driven onto P1.3.
    Internal { buffered_output: bool },
    External,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AdcClock {
    pub source: ClockSource,
    pub divider: ClockDivider,
    pub extra: ExtraDivider,
}

impl AdcClock {
    /// Find dividers that turn `source_rate` into exactly `target`.
    pub fn from_rates(
        source: ClockSource,
        source_rate: HertzU32,
        target: HertzU32,
    ) -> Result<Self, ConfigurationError> {
        let unreachable = ConfigurationError::AdcClockUnreachable {
            source_hz: source_rate.raw(),
            target_hz: target.raw(),
        };
        if target.raw() == 0 || source_rate.raw() % target.raw() != 0 {
            return Err(unreachable);
        }
        let ratio = source_rate.raw() / target.raw();
        for divider in ClockDivider::ALL {
            for extra in ExtraDivider::ALL {
                if divider.factor() * extra.factor() == ratio {
                    return Ok(Self {
                        source,
                        divider,
                        extra,
                    });
                }
            }
        }
        Err(unreachable)
    }

    pub fn rate(&self, source_rate: HertzU32) -> HertzU32 {
        HertzU32::from_raw(source_rate.raw() / (self.divider.factor() * self.extra.factor()))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Sd16Config {
    pub reference: Reference,
    pub clock: AdcClock,
    pub channel_control: ChannelControl,
    pub input_control: InputControl,
}

impl Sd16Config {
    pub fn control(&self) -> Sd16Control {
        let (on, buffered) = match self.reference {
            Reference::Internal { buffered_output } => (true, buffered_output),
            Reference::External => (false, false),
        };
        Sd16Control::default()
            .with_reference_on(on)
            .with_vmid_buffer_on(buffered)
            .with_clock(self.clock.source, self.clock.divider, self.clock.extra)
    }
}

impl Default for Sd16Config {
    fn default() -> Self {
        Sd16ConfigBuilder::new().build()
    }
}

pub struct Sd16ConfigBuilder {
    reference: Reference,
    clock: AdcClock,
    oversampling: OversamplingRatio,
    format: DataFormat,
    mode: ConversionMode,
    polarity: Polarity,
    channel: InputChannel,
    gain: Gain,
    interrupt_delay: InterruptDelay,
}

impl Default for Sd16ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Sd16ConfigBuilder {
    /// SMCLK (16 MHz) / 16 = 1 MHz, two's complement, OSR 1024, single
    /// conversion, differential A1, gain 1x, interrupt on the fourth sample.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reference: Reference::Internal {
                buffered_output: true,
            },
            clock: AdcClock {
                source: ClockSource::Smclk,
                divider: ClockDivider::Div1,
                extra: ExtraDivider::Div16,
            },
            oversampling: OversamplingRatio::X1024,
            format: DataFormat::TwosComplement,
            mode: ConversionMode::Single,
            polarity: Polarity::Bipolar,
            channel: InputChannel::A1,
            gain: Gain::X1,
            interrupt_delay: InterruptDelay::Fourth,
        }
    }
    #[must_use]
    pub fn reference(mut self, reference: Reference) -> Self {
        self.reference = reference;
        self
    }
    #[must_use]
    pub fn clock(mut self, clock: AdcClock) -> Self {
        self.clock = clock;
        self
    }
    pub fn clock_from_rates(
        mut self,
        source: ClockSource,
        source_rate: HertzU32,
        target: HertzU32,
    ) -> Result<Self, ConfigurationError> {
        self.clock = AdcClock::from_rates(source, source_rate, target)?;
        Ok(self)
    }
    #[must_use]
    pub fn oversampling(mut self, osr: OversamplingRatio) -> Self {
        self.oversampling = osr;
        self
    }
    #[must_use]
    pub fn format(mut self, format: DataFormat) -> Self {
        self.format = format;
        self
    }
    #[must_use]
    pub fn mode(mut self, mode: ConversionMode) -> Self {
        self.mode = mode;
        self
    }
    #[must_use]
    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }
    #[must_use]
    pub fn channel(mut self, channel: InputChannel) -> Self {
        self.channel = channel;
        self
    }
    #[must_use]
    pub fn gain(mut self, gain: Gain) -> Self {
        self.gain = gain;
        self
    }
    #[must_use]
    pub fn interrupt_delay(mut self, delay: InterruptDelay) -> Self {
        self.interrupt_delay = delay;
        self
    }
    #[must_use]
    pub fn build(self) -> Sd16Config {
        let channel_control = ChannelControl::default()
            .with_format(self.format)
            .with_oversampling(self.oversampling)
            .with_mode(self.mode)
            .with_polarity(self.polarity)
            .with_interrupt_enable(self.mode == ConversionMode::Continuous);
        let input_control = InputControl::default()
            .with_channel(self.channel)
            .with_gain(self.gain)
            .with_interrupt_delay(self.interrupt_delay);
        Sd16Config {
            reference: self.reference,
            clock: self.clock,
            channel_control,
            input_control,
        }
    }
}
