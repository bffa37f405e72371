// Licensed under the Apache-2.0 license

//! Logging shared by the bus and ADC layers.
//!
//! Everything in this crate runs inside interrupt handlers, so the default
//! logger is [`NoOpLogger`], which compiles away. [`UartLogger`] forwards lines
//! to any `embedded_io::Write` sink for bring-up and debugging.

use core::fmt;
use embedded_io::Write;

/// Rejected bring-up parameters. Raised while building configuration, never
/// from interrupt context.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigurationError {
    /// Slave address does not fit in 7 bits.
    InvalidAddress(u8),
    /// No divider combination turns the source clock into the requested ADC clock.
    AdcClockUnreachable { source_hz: u32, target_hz: u32 },
}

pub trait Logger {
    fn debug(&mut self, args: fmt::Arguments<'_>);
    fn error(&mut self, args: fmt::Arguments<'_>);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline(always)]
    fn debug(&mut self, _args: fmt::Arguments<'_>) {}
    #[inline(always)]
    fn error(&mut self, _args: fmt::Arguments<'_>) {}
}

/// Line-oriented logger writing to a serial port.
///
/// Write failures are dropped: a stuck console must never stall the bus ISR.
pub struct UartLogger<W: Write> {
    writer: W,
}

impl<W: Write> UartLogger<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn line(&mut self, tag: &str, args: fmt::Arguments<'_>) {
        let _ = self.writer.write_all(tag.as_bytes());
        let _ = self.writer.write_fmt(args);
        let _ = self.writer.write_all(b"\r\n");
    }
}

impl<W: Write> Logger for UartLogger<W> {
    fn debug(&mut self, args: fmt::Arguments<'_>) {
        self.line("[DBG] ", args);
    }

    fn error(&mut self, args: fmt::Arguments<'_>) {
        self.line("[ERR] ", args);
    }
}

impl<L: Logger + ?Sized> Logger for &mut L {
    fn debug(&mut self, args: fmt::Arguments<'_>) {
        (**self).debug(args);
    }

    fn error(&mut self, args: fmt::Arguments<'_>) {
        (**self).error(args);
    }
}
