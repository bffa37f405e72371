// Licensed under the Apache-2.0 license

//! Peripheral register access for the MSP430F20x3 USI and SD16_A blocks.
//!
//! [`RegisterIo`] is the lowest seam in the crate. [`Mmio`] performs volatile
//! accesses at the device addresses below; tests substitute a simulated
//! register file.

use core::ptr::{read_volatile, write_volatile};

/// Byte/word access to peripheral registers by address.
///
/// Accesses take `&self` so that the bus ISR and the conversion ISR can each
/// hold a handle to the same register file.
pub trait RegisterIo {
    fn read8(&self, addr: u16) -> u8;
    fn write8(&self, addr: u16, value: u8);
    fn read16(&self, addr: u16) -> u16;
    fn write16(&self, addr: u16, value: u16);

    fn modify8(&self, addr: u16, f: impl FnOnce(u8) -> u8) {
        let value = self.read8(addr);
        self.write8(addr, f(value));
    }

    fn set_bits8(&self, addr: u16, mask: u8) {
        self.modify8(addr, |v| v | mask);
    }

    fn clear_bits8(&self, addr: u16, mask: u8) {
        self.modify8(addr, |v| v & !mask);
    }
}

impl<T: RegisterIo + ?Sized> RegisterIo for &T {
    fn read8(&self, addr: u16) -> u8 {
        (**self).read8(addr)
    }

    fn write8(&self, addr: u16, value: u8) {
        (**self).write8(addr, value);
    }

    fn read16(&self, addr: u16) -> u16 {
        (**self).read16(addr)
    }

    fn write16(&self, addr: u16, value: u16) {
        (**self).write16(addr, value);
    }
}

/// Memory-mapped register file of the running device.
#[derive(Clone, Copy, Debug)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// # Safety
    ///
    /// The caller must be executing on an MSP430F20x3 and must not let two
    /// handles perform conflicting read-modify-write sequences on the same
    /// register concurrently. The bus and conversion ISRs in this crate touch
    /// disjoint registers apart from SD16MEM0, which is only read.
    pub const unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl RegisterIo for Mmio {
    fn read8(&self, addr: u16) -> u8 {
        // SAFETY: `addr` is one of the peripheral addresses in `addr`.
        unsafe { read_volatile(usize::from(addr) as *const u8) }
    }

    fn write8(&self, addr: u16, value: u8) {
        // SAFETY: as above.
        unsafe { write_volatile(usize::from(addr) as *mut u8, value) }
    }

    fn read16(&self, addr: u16) -> u16 {
        // SAFETY: word registers are even-aligned.
        unsafe { read_volatile(usize::from(addr) as *const u16) }
    }

    fn write16(&self, addr: u16, value: u16) {
        // SAFETY: as above.
        unsafe { write_volatile(usize::from(addr) as *mut u16, value) }
    }
}

/// Register addresses (MSP430x20x3 peripheral map).
pub mod addr {
    pub const P1OUT: u16 = 0x0021;
    pub const P1SEL: u16 = 0x0026;
    pub const P1REN: u16 = 0x0027;

    pub const USICTL0: u16 = 0x0078;
    pub const USICTL1: u16 = 0x0079;
    pub const USICKCTL: u16 = 0x007A;
    pub const USICNT: u16 = 0x007B;
    pub const USISRL: u16 = 0x007C;

    pub const SD16INCTL0: u16 = 0x00B0;
    pub const SD16AE: u16 = 0x00B7;
    pub const SD16CTL: u16 = 0x0100;
    pub const SD16CCTL0: u16 = 0x0102;
    pub const SD16MEM0: u16 = 0x0112;
}

/// Port 1 pin masks.
pub mod pin {
    pub const BIT3: u8 = 1 << 3;
    pub const BIT6: u8 = 1 << 6;
    pub const BIT7: u8 = 1 << 7;
}
