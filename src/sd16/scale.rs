// Licensed under the Apache-2.0 license

//! Host-side conversion of raw samples to input voltage.

use crate::sd16::registers::{DataFormat, Gain};

/// Internal reference, in microvolts.
pub const VREF_UV: i64 = 1_200_000;
/// Codes per half scale.
pub const HALF_SCALE_CODES: i64 = 32_767;

/// Full-scale range for `gain`: (VREF / 2) / gain.
pub const fn full_scale_uv(gain: Gain) -> i64 {
    (VREF_UV / 2) / gain.factor() as i64
}

/// Differential input voltage represented by `raw`.
pub fn microvolts(raw: i16, gain: Gain, format: DataFormat) -> i32 {
    let code = match format {
        DataFormat::TwosComplement => i64::from(raw),
        DataFormat::Offset => i64::from(raw as u16) - 0x8000,
    };
    let uv = code * full_scale_uv(gain) / HALF_SCALE_CODES;
    // |uv| <= 600_000 * 32768 / 32767, well inside i32
    uv as i32
}
