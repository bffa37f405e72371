// Licensed under the Apache-2.0 license

//! Register-level [`UsiSlavePort`] for the MSP430 USI module.

use crate::i2c::common::{ClockPolarity, SlaveConfig};
use crate::i2c::traits::UsiSlavePort;
use crate::regs::{addr, pin, RegisterIo};

/// USICTL0 bits.
pub mod ctl0 {
    pub const USIPE7: u8 = 0x80;
    pub const USIPE6: u8 = 0x40;
    pub const USIOE: u8 = 0x02;
    pub const USISWRST: u8 = 0x01;
}

/// USICTL1 bits.
pub mod ctl1 {
    pub const USII2C: u8 = 0x40;
    pub const USISTTIE: u8 = 0x20;
    pub const USIIE: u8 = 0x10;
    pub const USISTTIFG: u8 = 0x02;
    pub const USIIFG: u8 = 0x01;
}

/// USICKCTL bits.
pub mod ckctl {
    pub const USICKPL: u8 = 0x02;
}

/// USICNT bits.
pub mod cnt {
    pub const USIIFGCC: u8 = 0x20;
    /// Control bits kept when the counter is reloaded.
    pub const CONTROL_MASK: u8 = 0xE0;
    pub const COUNT_MASK: u8 = 0x1F;
}

pub struct Usi<R: RegisterIo> {
    regs: R,
}

impl<R: RegisterIo> Usi<R> {
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    pub fn free(self) -> R {
        self.regs
    }
}

impl<R: RegisterIo> UsiSlavePort for Usi<R> {
    fn init(&mut self, config: &SlaveConfig) {
        let r = &self.regs;
        r.write8(addr::P1OUT, pin::BIT6 | pin::BIT7);
        r.set_bits8(addr::P1REN, pin::BIT6 | pin::BIT7);

        r.write8(addr::USICTL0, ctl0::USIPE6 | ctl0::USIPE7 | ctl0::USISWRST);
        r.write8(addr::USICTL1, ctl1::USII2C | ctl1::USIIE | ctl1::USISTTIE);
        r.write8(
            addr::USICKCTL,
            match config.clock_polarity {
                ClockPolarity::IdleHigh => ckctl::USICKPL,
                ClockPolarity::IdleLow => 0,
            },
        );
        r.set_bits8(addr::USICNT, cnt::USIIFGCC);
        r.clear_bits8(addr::USICTL0, ctl0::USISWRST);
        r.clear_bits8(addr::USICTL1, ctl1::USIIFG);
    }

    fn start_pending(&self) -> bool {
        self.regs.read8(addr::USICTL1) & ctl1::USISTTIFG != 0
    }

    fn clear_start(&mut self) {
        self.regs.clear_bits8(addr::USICTL1, ctl1::USISTTIFG);
    }

    fn arm_bit_counter(&mut self, bits: u8) {
        self.regs.modify8(addr::USICNT, |v| {
            (v & cnt::CONTROL_MASK) | (bits & cnt::COUNT_MASK)
        });
    }

    fn shift_register(&self) -> u8 {
        self.regs.read8(addr::USISRL)
    }

    fn load_shift_register(&mut self, byte: u8) {
        self.regs.write8(addr::USISRL, byte);
    }

    fn drive_sda(&mut self) {
        self.regs.set_bits8(addr::USICTL0, ctl0::USIOE);
    }

    fn release_sda(&mut self) {
        self.regs.clear_bits8(addr::USICTL0, ctl0::USIOE);
    }

    fn clear_pending(&mut self) {
        self.regs.clear_bits8(addr::USICTL1, ctl1::USIIFG);
    }
}
