// Licensed under the Apache-2.0 license

use super::{bridge, ADDRESS};
use crate::bridge::BridgeConfig;
use crate::i2c::common::{SampleLatch, SlaveConfigBuilder};
use crate::regs::addr;
use crate::sample::SampleRegister;
use crate::sd16::acquisition::CompletionHandler;
use crate::sd16::controller::Sd16;
use crate::tests::sim_chip::SimChip;
use crate::tests::sim_master::SimMaster;
use embedded_hal::i2c::I2c;
use hex_literal::hex;

const SC: u16 = 0x0002;

#[test]
fn single_shot_value_is_read_low_byte_first() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let mut master = SimMaster::new(&chip, &mut b);

    // OSR 256, single
    master.write(ADDRESS, &hex!("A1 04")).unwrap();
    chip.queue_single_shot(0x1A2B);
    master.write(ADDRESS, &hex!("FF 01")).unwrap();
    assert_eq!(chip.peek16(addr::SD16CCTL0) & SC, 0);

    let mut buf = [0u8; 2];
    master.read(ADDRESS, &mut buf).unwrap();
    assert_eq!(buf, hex!("2B 1A"));

    // a second read returns the same capture
    master.read(ADDRESS, &mut buf).unwrap();
    assert_eq!(i16::from_le_bytes(buf), 0x1A2B);
}

#[test]
fn each_start_takes_a_fresh_single_shot() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let mut master = SimMaster::new(&chip, &mut b);
    let mut buf = [0u8; 2];

    chip.queue_single_shot(-12_345);
    chip.queue_single_shot(77);
    master.write(ADDRESS, &hex!("FF 01")).unwrap();
    master.read(ADDRESS, &mut buf).unwrap();
    assert_eq!(i16::from_le_bytes(buf), -12_345);

    master.write(ADDRESS, &hex!("FF 01")).unwrap();
    master.read(ADDRESS, &mut buf).unwrap();
    assert_eq!(i16::from_le_bytes(buf), 77);
}

#[test]
fn reads_past_the_sample_are_filler() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let mut master = SimMaster::new(&chip, &mut b);

    chip.queue_single_shot(0x0102);
    master.write(ADDRESS, &hex!("FF 01")).unwrap();
    let mut buf = [0u8; 5];
    master.read(ADDRESS, &mut buf).unwrap();
    assert_eq!(buf, hex!("02 01 FF FF FF"));
    assert_eq!(master.slave().status().tx_count, 2);
}

#[test]
fn continuous_read_tracks_latest_sample() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let mut adc_isr = CompletionHandler::new(Sd16::new(&chip), &sample);
    let mut master = SimMaster::new(&chip, &mut b);

    // OSR 1024, continuous
    master.write(ADDRESS, &hex!("A1 09")).unwrap();
    master.write(ADDRESS, &hex!("FF 01")).unwrap();
    assert_eq!(chip.peek16(addr::SD16CCTL0) & SC, SC);

    for value in [100_i16, -200, 300, 0x7F00] {
        assert!(chip.complete_conversion(value));
        adc_isr.on_interrupt();
    }
    let mut buf = [0u8; 2];
    master.read(ADDRESS, &mut buf).unwrap();
    assert_eq!(i16::from_le_bytes(buf), 0x7F00);
}

#[test]
fn sample_arriving_between_bytes_mixes_the_pair() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let mut adc_isr = CompletionHandler::new(Sd16::new(&chip), &sample);
    let mut master = SimMaster::new(&chip, &mut b);

    master.write(ADDRESS, &hex!("A1 09")).unwrap();
    master.write(ADDRESS, &hex!("FF 01")).unwrap();
    assert!(chip.complete_conversion(0x1234));
    adc_isr.on_interrupt();

    master.start();
    assert!(master.clock_byte_in((ADDRESS << 1) | 1));
    assert!(master.clock_ack_out());
    let low = master.clock_byte_out().unwrap();

    assert!(chip.complete_conversion(0x5678));
    adc_isr.on_interrupt();

    master.clock_ack_in(true);
    let high = master.clock_byte_out().unwrap();
    master.clock_ack_in(false);

    assert_eq!([low, high], hex!("34 56"));
}

#[test]
fn transaction_latch_returns_one_sample() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let config = BridgeConfig {
        slave: SlaveConfigBuilder::new()
            .sample_latch(SampleLatch::Transaction)
            .build()
            .unwrap(),
        ..BridgeConfig::default()
    };
    let mut b = bridge(&chip, &sample, &config);
    let mut adc_isr = CompletionHandler::new(Sd16::new(&chip), &sample);
    let mut master = SimMaster::new(&chip, &mut b);

    master.write(ADDRESS, &hex!("A1 09")).unwrap();
    master.write(ADDRESS, &hex!("FF 01")).unwrap();
    assert!(chip.complete_conversion(0x1234));
    adc_isr.on_interrupt();

    master.start();
    assert!(master.clock_byte_in((ADDRESS << 1) | 1));
    assert!(master.clock_ack_out());
    let low = master.clock_byte_out().unwrap();
    assert!(chip.complete_conversion(0x5678));
    adc_isr.on_interrupt();
    master.clock_ack_in(true);
    let high = master.clock_byte_out().unwrap();
    master.clock_ack_in(false);

    assert_eq!([low, high], hex!("34 12"));
    assert_eq!(sample.load(), 0x5678);
}

#[test]
fn stop_freezes_the_sample() {
    let chip = SimChip::new();
    let sample = SampleRegister::new();
    let mut b = bridge(&chip, &sample, &BridgeConfig::default());
    let mut adc_isr = CompletionHandler::new(Sd16::new(&chip), &sample);
    let mut master = SimMaster::new(&chip, &mut b);

    master.write(ADDRESS, &hex!("A1 09")).unwrap();
    master.write(ADDRESS, &hex!("FF 01")).unwrap();
    assert!(chip.complete_conversion(-42));
    adc_isr.on_interrupt();

    master.write(ADDRESS, &hex!("FF 00")).unwrap();
    assert_eq!(chip.peek16(addr::SD16CCTL0) & SC, 0);
    // the converter is halted: no completion interrupt fires
    assert!(!chip.complete_conversion(999));

    let mut buf = [0u8; 2];
    master.read(ADDRESS, &mut buf).unwrap();
    assert_eq!(i16::from_le_bytes(buf), -42);
}
