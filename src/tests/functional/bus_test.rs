// Licensed under the Apache-2.0 license

use super::{bridge, ADDRESS};
use crate::bridge::{Bridge, BridgeConfig};
use crate::common::test_log::RecordingLogger;
use crate::i2c::common::{Direction, SlaveEvent, State};
use crate::i2c::usi::Usi;
use crate::regs::addr;
use crate::sample::SampleRegister;
use crate::sd16::controller::Sd16;
use crate::tests::sim_chip::SimChip;
use crate::tests::sim_master::{BusError, SimMaster};
use embedded_hal::i2c::{ErrorKind, I2c, NoAcknowledgeSource};
use hex_literal::hex;

const USIOE: u8 = 0x02;

#[test]
fn foreign_address_is_nacked_in_both_directions() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let inctl = chip.peek8(addr::SD16INCTL0);
    let mut master = SimMaster::new(&chip, &mut b);

    let nack = Err(BusError(ErrorKind::NoAcknowledge(
        NoAcknowledgeSource::Address,
    )));
    assert_eq!(master.write(0x0C, &hex!("B0 02")), nack);
    assert_eq!(master.slave().status().state, State::Idle);
    assert_eq!(
        master.slave().status().last_event,
        Some(SlaveEvent::Aborted)
    );

    let mut buf = [0u8; 2];
    assert_eq!(master.read(0x0A, &mut buf), nack);
    assert_eq!(master.slave().status().state, State::Idle);
    assert_eq!(chip.peek8(addr::USICTL0) & USIOE, 0);
    assert_eq!(chip.peek8(addr::SD16INCTL0), inctl);
}

#[test]
fn mismatch_does_not_wait_for_more_bytes() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let mut master = SimMaster::new(&chip, &mut b);

    master.start();
    assert!(master.clock_byte_in(0x42));
    assert!(!master.clock_ack_out());
    // the slave is idle: nothing armed, SDA released
    assert!(!master.clock_byte_in(0xB0));
    assert_eq!(master.clock_byte_out(), None);
    assert_eq!(
        master.slave().status().last_event,
        Some(SlaveEvent::Aborted)
    );
}

#[test]
fn third_byte_is_nacked_and_next_start_resets_counters() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let mut master = SimMaster::new(&chip, &mut b);

    let result = master.write(ADDRESS, &hex!("B0 02 04"));
    assert_eq!(
        result,
        Err(BusError(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)))
    );
    assert_eq!(chip.peek8(addr::SD16INCTL0), 0x02);
    let status = master.slave().status();
    assert_eq!(status.state, State::Idle);
    assert_eq!(status.rx_count, 2);
    assert_eq!(status.last_event, Some(SlaveEvent::ExcessByte(0x04)));

    master.start();
    let status = master.slave().status();
    assert_eq!((status.rx_count, status.tx_count), (0, 0));
    assert_eq!(status.state, State::AddrMatch);

    // a fresh transaction works normally
    assert!(master.clock_byte_in(ADDRESS << 1));
    assert!(master.clock_ack_out());
    assert_eq!(
        master.slave().status().last_event,
        Some(SlaveEvent::AddressMatched(Direction::Write))
    );
}

#[test]
fn single_byte_write_dispatches_nothing() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let mut master = SimMaster::new(&chip, &mut b);

    master.write(ADDRESS, &hex!("B0")).unwrap();
    assert_eq!(chip.peek8(addr::SD16INCTL0), 0x01);
    // the half frame does not leak into the next transaction
    master.write(ADDRESS, &hex!("03 B0")).unwrap();
    assert_eq!(chip.peek8(addr::SD16INCTL0), 0x01);
}

#[test]
fn write_then_read_with_repeated_start() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let mut master = SimMaster::new(&chip, &mut b);

    chip.queue_single_shot(-2);
    let mut buf = [0u8; 2];
    master
        .write_read(ADDRESS, &hex!("FF 01"), &mut buf)
        .unwrap();
    assert_eq!(buf, hex!("FE FF"));
}

#[test]
fn loggers_report_bus_and_register_activity() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = Bridge::with_loggers(
        Usi::new(&chip),
        Sd16::new(&chip),
        &sample,
        &BridgeConfig::default(),
        RecordingLogger::default(),
        RecordingLogger::default(),
    )
    .unwrap();
    let mut master = SimMaster::new(&chip, &mut b);

    master.write(ADDRESS, &hex!("B0 00")).unwrap();
    master.write(ADDRESS, &hex!("77 00")).unwrap();
    let _ = master.write(0x33, &hex!("00"));
    let _ = master.write(ADDRESS, &hex!("B0 00 99"));

    let bus = master.slave().transport().logger();
    assert!(bus.contains("slave ready at 0x0b"));
    assert!(bus.contains("address byte 0x66 not ours"));
    assert!(bus.contains("dropping excess byte 0x99"));

    let registers = master.slave().protocol().logger();
    assert!(registers.contains("input A0"));
    assert!(registers.contains("analog enable 0x03"));
    assert!(registers.contains("ignoring opcode 0x77"));
}
