// Licensed under the Apache-2.0 license

use super::{bridge, ADDRESS};
use crate::bridge::BridgeConfig;
use crate::i2c::common::SlaveEvent;
use crate::regs::addr;
use crate::sample::SampleRegister;
use crate::sd16::registers::{ChannelControl, ConversionMode, InputChannel, Polarity};
use crate::tests::sim_chip::SimChip;
use crate::tests::sim_master::SimMaster;
use embedded_hal::i2c::I2c;
use hex_literal::hex;

#[test]
fn high_byte_write_sets_interrupt_enable_from_mode() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let mut master = SimMaster::new(&chip, &mut b);

    // every OSR with and without SNGL, bipolar and unipolar
    for osr in [0x00, 0x01, 0x02, 0x03, 0x08, 0x09] {
        for uni in [0x00, 0x10] {
            for sngl in [0x00, 0x04] {
                let value = osr | uni | sngl;
                master.write(ADDRESS, &[0xA1, value]).unwrap();
                let cc = ChannelControl(chip.peek16(addr::SD16CCTL0));
                assert_eq!(cc.high_config(), value);
                assert_eq!(
                    cc.interrupt_enable(),
                    cc.mode() == ConversionMode::Continuous,
                    "high byte {value:#04x}"
                );
            }
        }
    }
}

#[test]
fn routing_follows_channel_and_polarity() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let mut master = SimMaster::new(&chip, &mut b);

    master.write(ADDRESS, &hex!("B0 00")).unwrap();
    assert_eq!(chip.peek8(addr::SD16AE), 0b0000_0011);
    master.write(ADDRESS, &hex!("B0 02")).unwrap();
    assert_eq!(chip.peek8(addr::SD16AE), 0b0011_0000);

    // unipolar, OSR 1024, single
    master.write(ADDRESS, &hex!("A1 1D")).unwrap();
    assert_eq!(chip.peek8(addr::SD16AE), 0b0001_0000);
    let cc = ChannelControl(chip.peek16(addr::SD16CCTL0));
    assert_eq!(cc.polarity(), Polarity::Unipolar);
}

#[test]
fn unsupported_channels_disconnect_every_pin() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let mut master = SimMaster::new(&chip, &mut b);

    for channel in [
        InputChannel::A3,
        InputChannel::A4,
        InputChannel::Supply,
        InputChannel::Temperature,
        InputChannel::Short,
    ] {
        master.write(ADDRESS, &hex!("B0 01")).unwrap();
        assert_ne!(chip.peek8(addr::SD16AE), 0);
        // gain 2 on top of the channel
        master.write(ADDRESS, &[0xB0, channel as u8 | 0x08]).unwrap();
        assert_eq!(chip.peek8(addr::SD16AE), 0, "{channel:?}");
    }
}

#[test]
fn repeated_configuration_write_has_no_effect() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let mut master = SimMaster::new(&chip, &mut b);

    master.write(ADDRESS, &hex!("A1 09")).unwrap();
    let cctl = chip.peek16(addr::SD16CCTL0);
    let routing = chip.peek8(addr::SD16AE);

    // A reroute or IE derivation would overwrite these markers.
    chip.poke8(addr::SD16AE, 0xC0);
    chip.poke16(addr::SD16CCTL0, cctl & !0x0008);
    master.write(ADDRESS, &hex!("A1 09")).unwrap();
    assert_eq!(chip.peek8(addr::SD16AE), 0xC0);
    assert_eq!(chip.peek16(addr::SD16CCTL0), cctl & !0x0008);
    assert_ne!(routing, 0xC0);
}

#[test]
fn format_write_leaves_routing_alone() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let mut master = SimMaster::new(&chip, &mut b);

    chip.poke8(addr::SD16AE, 0xC0);
    master.write(ADDRESS, &hex!("A0 00")).unwrap();
    assert_eq!(chip.peek16(addr::SD16CCTL0) & 0x0010, 0);
    assert_eq!(chip.peek8(addr::SD16AE), 0xC0);
    master.write(ADDRESS, &hex!("A0 10")).unwrap();
    assert_eq!(chip.peek16(addr::SD16CCTL0) & 0x0010, 0x0010);
}

#[test]
fn unknown_opcode_is_acknowledged_and_ignored() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let cctl = chip.peek16(addr::SD16CCTL0);
    let inctl = chip.peek8(addr::SD16INCTL0);
    let routing = chip.peek8(addr::SD16AE);

    let mut master = SimMaster::new(&chip, &mut b);
    master.write(ADDRESS, &hex!("C3 5A")).unwrap();
    assert_eq!(
        master.slave().status().last_event,
        Some(SlaveEvent::CommandDispatched {
            opcode: 0xC3,
            value: 0x5A
        })
    );
    assert_eq!(chip.peek16(addr::SD16CCTL0), cctl);
    assert_eq!(chip.peek8(addr::SD16INCTL0), inctl);
    assert_eq!(chip.peek8(addr::SD16AE), routing);
}
