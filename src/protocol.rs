// Licensed under the Apache-2.0 license

//! Two-byte register protocol: `[opcode, value]` written by the bus master.
//!
//! | opcode | effect                                                    |
//! |--------|-----------------------------------------------------------|
//! | `0xA0` | SD16CCTL0 low byte, data-format bit only                  |
//! | `0xA1` | SD16CCTL0 high byte, OSR/SNGL/XOSR/UNI; derives SD16IE    |
//! | `0xB0` | SD16INCTL0, replaced wholesale                            |
//! | `0xFF` | bit 0 set starts a conversion, clear stops it             |
//!
//! Every register write is gated on the value actually changing. Analog pin
//! routing is recomputed after a change made by `0xA1` or `0xB0`.

use crate::common::{Logger, NoOpLogger};
use crate::sample::{SampleRegister, TxSource};
use crate::sd16::acquisition::Acquisition;
use crate::sd16::registers::{ChannelControl, ConversionMode, DataFormat, InputControl};
use crate::sd16::routing::analog_routing;
use crate::sd16::traits::Sd16Port;
use embedded_hal::i2c::SevenBitAddress;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Opcode {
    ChannelControlLow = 0xA0,
    ChannelControlHigh = 0xA1,
    InputControl = 0xB0,
    Conversion = 0xFF,
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0xA0 => Ok(Opcode::ChannelControlLow),
            0xA1 => Ok(Opcode::ChannelControlHigh),
            0xB0 => Ok(Opcode::InputControl),
            0xFF => Ok(Opcode::Conversion),
            other => Err(other),
        }
    }
}

/// Start/stop flag in the value of a [`Opcode::Conversion`] command.
pub const START_CONVERSION: u8 = 0x01;

/// What a command did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Applied {
    /// The register already held the requested bits.
    Unchanged,
    FormatChanged(DataFormat),
    /// Any bit of the high configuration byte changed; carries the mode the
    /// channel is now in.
    HighConfigChanged(ConversionMode),
    InputChanged(InputControl),
    ConversionStarted(ConversionMode),
    ConversionStopped,
    /// Opcode outside the protocol.
    Ignored(u8),
}

impl Applied {
    /// Whether this outcome requires the analog routing to be recomputed.
    pub fn reroutes(self) -> bool {
        matches!(self, Applied::HighConfigChanged(_) | Applied::InputChanged(_))
    }
}

/// Register view of the SD16 exposed to the bus.
pub struct RegisterProtocol<'s, A: Sd16Port, L: Logger = NoOpLogger> {
    acquisition: Acquisition<'s, A>,
    selector: TxSource,
    address: Option<SevenBitAddress>,
    logger: L,
}

impl<'s, A: Sd16Port> RegisterProtocol<'s, A, NoOpLogger> {
    pub fn new(adc: A, sample: &'s SampleRegister) -> Self {
        Self::with_logger(adc, sample, NoOpLogger)
    }
}

impl<'s, A: Sd16Port, L: Logger> RegisterProtocol<'s, A, L> {
    pub fn with_logger(adc: A, sample: &'s SampleRegister, logger: L) -> Self {
        Self {
            acquisition: Acquisition::new(adc, sample),
            selector: TxSource::Sample,
            address: None,
            logger,
        }
    }

    pub fn address(&self) -> Option<SevenBitAddress> {
        self.address
    }

    pub(crate) fn set_address(&mut self, address: SevenBitAddress) {
        self.address = Some(address);
    }

    pub fn selector(&self) -> TxSource {
        self.selector
    }

    pub fn adc(&self) -> &A {
        self.acquisition.adc()
    }

    pub fn adc_mut(&mut self) -> &mut A {
        self.acquisition.adc_mut()
    }

    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Bytes a read transaction returns right now.
    pub fn frame(&self) -> [u8; 2] {
        self.selector.frame(self.acquisition.sample())
    }

    pub fn apply(&mut self, opcode: u8, value: u8) -> Applied {
        let applied = match Opcode::try_from(opcode) {
            Ok(Opcode::ChannelControlLow) => self.write_format(value),
            Ok(Opcode::ChannelControlHigh) => self.write_high_config(value),
            Ok(Opcode::InputControl) => self.write_input_control(value),
            Ok(Opcode::Conversion) => self.conversion(value),
            Err(unknown) => {
                self.logger
                    .debug(format_args!("sd16: ignoring opcode {unknown:#04x}"));
                Applied::Ignored(unknown)
            }
        };

        if applied.reroutes() {
            let adc = self.acquisition.adc_mut();
            let routing = analog_routing(adc.input_control(), adc.channel_control());
            adc.set_analog_enable(routing);
            self.logger
                .debug(format_args!("sd16: analog enable {:#04x}", routing.bits()));
        }
        applied
    }

    fn write_format(&mut self, value: u8) -> Applied {
        let adc = self.acquisition.adc_mut();
        let cc = adc.channel_control();
        if cc.format_bits() == value & ChannelControl::FORMAT_BIT {
            return Applied::Unchanged;
        }
        let cc = cc.with_format_bits(value);
        adc.set_channel_control(cc);
        self.logger
            .debug(format_args!("sd16: format {:?}", cc.format()));
        Applied::FormatChanged(cc.format())
    }

    fn write_high_config(&mut self, value: u8) -> Applied {
        let adc = self.acquisition.adc_mut();
        let cc = adc.channel_control();
        if cc.high_config() == value & ChannelControl::HIGH_CONFIG_MASK {
            return Applied::Unchanged;
        }
        let cc = cc.with_high_config(value);
        let mode = cc.mode();
        let cc = cc.with_interrupt_enable(mode == ConversionMode::Continuous);
        adc.set_channel_control(cc);
        match cc.oversampling() {
            Some(osr) => self.logger.debug(format_args!(
                "sd16: cctl0 {:#06x} ({:?}, OSR {})",
                cc.bits(),
                mode,
                osr.ratio()
            )),
            None => self.logger.error(format_args!(
                "sd16: reserved oversampling code in {:#04x}",
                cc.high_config()
            )),
        }
        Applied::HighConfigChanged(mode)
    }

    fn write_input_control(&mut self, value: u8) -> Applied {
        let adc = self.acquisition.adc_mut();
        if adc.input_control().bits() == value {
            return Applied::Unchanged;
        }
        let input = InputControl(value);
        adc.set_input_control(input);
        self.logger.debug(format_args!(
            "sd16: input {:?} gain {:?}",
            input.channel(),
            input.gain()
        ));
        Applied::InputChanged(input)
    }

    fn conversion(&mut self, value: u8) -> Applied {
        if value & START_CONVERSION != 0 {
            let mode = self.acquisition.start(&mut self.selector);
            self.logger.debug(format_args!("sd16: started {mode:?}"));
            Applied::ConversionStarted(mode)
        } else {
            self.acquisition.stop();
            self.logger.debug(format_args!("sd16: stopped"));
            Applied::ConversionStopped
        }
    }

    /// Current contents of the register an opcode addresses, as the master
    /// would have to write them.
    pub fn read_back(&self, opcode: u8) -> Option<[u8; 2]> {
        let adc = self.acquisition.adc();
        match Opcode::try_from(opcode).ok()? {
            Opcode::ChannelControlLow => Some([adc.channel_control().format_bits(), 0]),
            Opcode::ChannelControlHigh => Some([adc.channel_control().high_config(), 0]),
            Opcode::InputControl => Some([adc.input_control().bits(), 0]),
            Opcode::Conversion => Some(self.frame()),
        }
    }
}
