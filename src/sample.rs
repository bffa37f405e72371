// Licensed under the Apache-2.0 license

//! Most-recent conversion result and the selector the bus reads it through.

use core::sync::atomic::{AtomicI16, Ordering};

/// Latest SD16 conversion value.
///
/// Written by the conversion ISR (continuous mode) or by the bus ISR after a
/// single-shot spin-wait; read by the bus ISR one byte at a time. Each load and
/// store is a single 16-bit access, so a value is never torn internally. A read
/// transaction can still return the low byte of one sample and the high byte
/// of the next when a conversion completes between the two bytes.
#[derive(Debug, Default)]
pub struct SampleRegister {
    value: AtomicI16,
}

impl SampleRegister {
    pub const fn new() -> Self {
        Self {
            value: AtomicI16::new(0),
        }
    }

    pub fn load(&self) -> i16 {
        self.value.load(Ordering::Relaxed)
    }

    pub fn store(&self, value: i16) {
        self.value.store(value, Ordering::Relaxed);
    }
}

/// Transmission selector: which quantity a read transaction returns.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxSource {
    /// SD16MEM0 as captured in the [`SampleRegister`].
    #[default]
    Sample,
}

impl TxSource {
    pub fn value(self, sample: &SampleRegister) -> i16 {
        match self {
            TxSource::Sample => sample.load(),
        }
    }

    /// Wire encoding of the selected value: little-endian, low byte first.
    pub fn frame(self, sample: &SampleRegister) -> [u8; 2] {
        self.value(sample).to_le_bytes()
    }
}
