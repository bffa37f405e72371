// Licensed under the Apache-2.0 license

//! The register protocol as an I2C target device.
//!
//! The transport only knows these traits: it asks the target whether an
//! address is ours, hands over complete `[opcode, value]` frames and pulls the
//! bytes of a read frame.

use crate::common::Logger;
use crate::i2c::common::{Error, TX_MAX_BYTES};
use crate::protocol::RegisterProtocol;
use crate::sd16::traits::Sd16Port;
use proposed_traits::i2c_target::{
    I2CCoreTarget, ReadTarget, RegisterAccess, WriteReadTarget, WriteTarget,
};

impl<A: Sd16Port, L: Logger> embedded_hal::i2c::ErrorType for RegisterProtocol<'_, A, L> {
    type Error = Error;
}

impl<A: Sd16Port, L: Logger> I2CCoreTarget for RegisterProtocol<'_, A, L> {
    fn init(&mut self, address: u8) -> Result<(), Self::Error> {
        if address > 0x7F {
            return Err(Error::Invalid);
        }
        self.set_address(address);
        Ok(())
    }

    fn on_transaction_start(&mut self, _repeated: bool) {}

    fn on_stop(&mut self) {}

    fn on_address_match(&mut self, address: u8) -> bool {
        self.address() == Some(address)
    }
}

impl<A: Sd16Port, L: Logger> ReadTarget for RegisterProtocol<'_, A, L> {
    fn on_read(&mut self, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        let frame = self.frame();
        let n = buffer.len().min(usize::from(TX_MAX_BYTES));
        for (dst, src) in buffer.iter_mut().zip(frame.iter()).take(n) {
            *dst = *src;
        }
        Ok(n)
    }
}

impl<A: Sd16Port, L: Logger> WriteTarget for RegisterProtocol<'_, A, L> {
    fn on_write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        match *data {
            [opcode, value] => {
                self.apply(opcode, value);
                Ok(())
            }
            _ => Err(Error::Overrun),
        }
    }
}

impl<A: Sd16Port, L: Logger> WriteReadTarget for RegisterProtocol<'_, A, L> {}

impl<A: Sd16Port, L: Logger> RegisterAccess for RegisterProtocol<'_, A, L> {
    fn write_register(&mut self, register: u8, data: u8) -> Result<(), Self::Error> {
        self.apply(register, data);
        Ok(())
    }

    fn read_register(&mut self, register: u8, data: &mut [u8]) -> Result<usize, Self::Error> {
        let bytes = self.read_back(register).ok_or(Error::Invalid)?;
        let n = data.len().min(bytes.len());
        for (dst, src) in data.iter_mut().zip(bytes.iter()) {
            *dst = *src;
        }
        Ok(n)
    }
}
