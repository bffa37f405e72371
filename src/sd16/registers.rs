// Licensed under the Apache-2.0 license

//! Typed views of the SD16_A registers.
//!
//! Bit positions are part of the bus protocol: opcode `0xA0` carries the low
//! byte of SD16CCTL0, `0xA1` its high byte and `0xB0` SD16INCTL0 verbatim.

macro_rules! flag {
    ($reg:ident : $ty:ty, $name:ident, $mask:expr) => {
        paste::paste! {
            impl $reg {
                #[inline]
                pub const fn $name(self) -> bool {
                    self.0 & ($mask as $ty) != 0
                }

                #[inline]
                #[must_use]
                pub const fn [<with_ $name>](self, on: bool) -> Self {
                    if on {
                        Self(self.0 | ($mask as $ty))
                    } else {
                        Self(self.0 & !($mask as $ty))
                    }
                }
            }
        }
    };
}

/// SD16CCTL0: channel 0 control.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelControl(pub u16);

flag!(ChannelControl: u16, start, 0x0002);
flag!(ChannelControl: u16, interrupt_pending, 0x0004);
flag!(ChannelControl: u16, interrupt_enable, 0x0008);
flag!(ChannelControl: u16, twos_complement, 0x0010);
flag!(ChannelControl: u16, single, 0x0400);
flag!(ChannelControl: u16, unipolar, 0x1000);

impl ChannelControl {
    /// Data-format bit as it appears in the low byte.
    pub const FORMAT_BIT: u8 = 0x10;
    /// OSR0, OSR1, SNGL, XOSR, UNI as they appear in the high byte.
    pub const HIGH_CONFIG_MASK: u8 = 0x1F;

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn format_bits(self) -> u8 {
        (self.0 as u8) & Self::FORMAT_BIT
    }

    #[must_use]
    pub const fn with_format_bits(self, low: u8) -> Self {
        Self((self.0 & !(Self::FORMAT_BIT as u16)) | (low & Self::FORMAT_BIT) as u16)
    }

    pub const fn high_config(self) -> u8 {
        ((self.0 >> 8) as u8) & Self::HIGH_CONFIG_MASK
    }

    #[must_use]
    pub const fn with_high_config(self, high: u8) -> Self {
        let mask = (Self::HIGH_CONFIG_MASK as u16) << 8;
        Self((self.0 & !mask) | (((high & Self::HIGH_CONFIG_MASK) as u16) << 8))
    }

    pub fn format(self) -> DataFormat {
        if self.twos_complement() {
            DataFormat::TwosComplement
        } else {
            DataFormat::Offset
        }
    }

    #[must_use]
    pub fn with_format(self, format: DataFormat) -> Self {
        self.with_twos_complement(format == DataFormat::TwosComplement)
    }

    pub fn mode(self) -> ConversionMode {
        if self.single() {
            ConversionMode::Single
        } else {
            ConversionMode::Continuous
        }
    }

    #[must_use]
    pub fn with_mode(self, mode: ConversionMode) -> Self {
        self.with_single(mode == ConversionMode::Single)
    }

    pub fn polarity(self) -> Polarity {
        if self.unipolar() {
            Polarity::Unipolar
        } else {
            Polarity::Bipolar
        }
    }

    #[must_use]
    pub fn with_polarity(self, polarity: Polarity) -> Self {
        self.with_unipolar(polarity == Polarity::Unipolar)
    }

    pub fn oversampling(self) -> Option<OversamplingRatio> {
        OversamplingRatio::from_code(self.high_config() & OversamplingRatio::CODE_MASK)
    }

    #[must_use]
    pub fn with_oversampling(self, osr: OversamplingRatio) -> Self {
        let high = (self.high_config() & !OversamplingRatio::CODE_MASK) | osr.code();
        self.with_high_config(high)
    }
}

/// SD16INCTL0: input multiplexer, gain and interrupt delay.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputControl(pub u8);

impl InputControl {
    const CHANNEL_MASK: u8 = 0x07;
    const GAIN_SHIFT: u8 = 3;
    const GAIN_MASK: u8 = 0x38;
    const DELAY_SHIFT: u8 = 6;
    const DELAY_MASK: u8 = 0xC0;

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub fn channel(self) -> InputChannel {
        InputChannel::from_bits(self.0 & Self::CHANNEL_MASK)
    }

    #[must_use]
    pub fn with_channel(self, channel: InputChannel) -> Self {
        Self((self.0 & !Self::CHANNEL_MASK) | channel as u8)
    }

    /// `None` for the reserved codes 6 and 7.
    pub fn gain(self) -> Option<Gain> {
        Gain::from_bits((self.0 & Self::GAIN_MASK) >> Self::GAIN_SHIFT)
    }

    #[must_use]
    pub fn with_gain(self, gain: Gain) -> Self {
        Self((self.0 & !Self::GAIN_MASK) | ((gain as u8) << Self::GAIN_SHIFT))
    }

    pub fn interrupt_delay(self) -> InterruptDelay {
        InterruptDelay::from_bits((self.0 & Self::DELAY_MASK) >> Self::DELAY_SHIFT)
    }

    #[must_use]
    pub fn with_interrupt_delay(self, delay: InterruptDelay) -> Self {
        Self((self.0 & !Self::DELAY_MASK) | ((delay as u8) << Self::DELAY_SHIFT))
    }
}

/// SD16AE: analog input enables, one bit per pin A0+ .. A3-.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogEnable(pub u8);

impl AnalogEnable {
    pub const NONE: Self = Self(0);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn pin(n: u8) -> Self {
        Self(1 << n)
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// SD16CTL: reference, clock selection and dividers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sd16Control(pub u16);

flag!(Sd16Control: u16, reference_on, 0x0004);
flag!(Sd16Control: u16, vmid_buffer_on, 0x0008);

impl Sd16Control {
    const SSEL_SHIFT: u16 = 4;
    const SSEL_MASK: u16 = 0x0030;
    const DIV_SHIFT: u16 = 6;
    const DIV_MASK: u16 = 0x00C0;
    const XDIV_SHIFT: u16 = 9;
    const XDIV_MASK: u16 = 0x0E00;

    pub const fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn with_clock(self, source: ClockSource, div: ClockDivider, xdiv: ExtraDivider) -> Self {
        let cleared = self.0 & !(Self::SSEL_MASK | Self::DIV_MASK | Self::XDIV_MASK);
        Self(
            cleared
                | ((source as u16) << Self::SSEL_SHIFT)
                | ((div as u16) << Self::DIV_SHIFT)
                | ((xdiv as u16) << Self::XDIV_SHIFT),
        )
    }

    pub fn clock_source(self) -> ClockSource {
        match (self.0 & Self::SSEL_MASK) >> Self::SSEL_SHIFT {
            0 => ClockSource::Mclk,
            1 => ClockSource::Smclk,
            2 => ClockSource::Aclk,
            _ => ClockSource::Taclk,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataFormat {
    /// Offset binary: 0x8000 is mid-scale.
    Offset,
    TwosComplement,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionMode {
    Single,
    Continuous,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Differential input on a pin pair.
    Bipolar,
    /// Single-ended input on the positive pin.
    Unipolar,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OversamplingRatio {
    X32,
    X64,
    X128,
    X256,
    X512,
    X1024,
}

impl OversamplingRatio {
    /// OSR0, OSR1 and XOSR within the high configuration byte.
    pub const CODE_MASK: u8 = 0x0B;

    pub const fn code(self) -> u8 {
        match self {
            OversamplingRatio::X32 => 0x03,
            OversamplingRatio::X64 => 0x02,
            OversamplingRatio::X128 => 0x01,
            OversamplingRatio::X256 => 0x00,
            OversamplingRatio::X512 => 0x08,
            OversamplingRatio::X1024 => 0x09,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0x03 => Some(OversamplingRatio::X32),
            0x02 => Some(OversamplingRatio::X64),
            0x01 => Some(OversamplingRatio::X128),
            0x00 => Some(OversamplingRatio::X256),
            0x08 => Some(OversamplingRatio::X512),
            0x09 => Some(OversamplingRatio::X1024),
            _ => None,
        }
    }

    pub const fn ratio(self) -> u16 {
        match self {
            OversamplingRatio::X32 => 32,
            OversamplingRatio::X64 => 64,
            OversamplingRatio::X128 => 128,
            OversamplingRatio::X256 => 256,
            OversamplingRatio::X512 => 512,
            OversamplingRatio::X1024 => 1024,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InputChannel {
    A0 = 0,
    A1 = 1,
    A2 = 2,
    A3 = 3,
    A4 = 4,
    /// (VCC - VSS) / 11
    Supply = 5,
    Temperature = 6,
    /// Inputs shorted for offset measurement.
    Short = 7,
}

impl InputChannel {
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x07 {
            0 => InputChannel::A0,
            1 => InputChannel::A1,
            2 => InputChannel::A2,
            3 => InputChannel::A3,
            4 => InputChannel::A4,
            5 => InputChannel::Supply,
            6 => InputChannel::Temperature,
            _ => InputChannel::Short,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Gain {
    X1 = 0,
    X2 = 1,
    X4 = 2,
    X8 = 3,
    X16 = 4,
    X32 = 5,
}

impl Gain {
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Gain::X1),
            1 => Some(Gain::X2),
            2 => Some(Gain::X4),
            3 => Some(Gain::X8),
            4 => Some(Gain::X16),
            5 => Some(Gain::X32),
            _ => None,
        }
    }

    pub const fn factor(self) -> i32 {
        1 << (self as u8)
    }
}

/// Which sample after a start raises the first interrupt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum InterruptDelay {
    Fourth = 0,
    Third = 1,
    Second = 2,
    First = 3,
}

impl InterruptDelay {
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => InterruptDelay::Fourth,
            1 => InterruptDelay::Third,
            2 => InterruptDelay::Second,
            _ => InterruptDelay::First,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ClockSource {
    Mclk = 0,
    Smclk = 1,
    Aclk = 2,
    Taclk = 3,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ClockDivider {
    Div1 = 0,
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
}

impl ClockDivider {
    pub const ALL: [Self; 4] = [Self::Div1, Self::Div2, Self::Div4, Self::Div8];

    pub const fn factor(self) -> u32 {
        1 << (self as u8)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ExtraDivider {
    Div1 = 0,
    Div3 = 1,
    Div16 = 2,
    Div48 = 3,
}

impl ExtraDivider {
    pub const ALL: [Self; 4] = [Self::Div1, Self::Div3, Self::Div16, Self::Div48];

    pub const fn factor(self) -> u32 {
        match self {
            ExtraDivider::Div1 => 1,
            ExtraDivider::Div3 => 3,
            ExtraDivider::Div16 => 16,
            ExtraDivider::Div48 => 48,
        }
    }
}
