use core::convert::TryFrom;
use core::fmt;

use crate::pec;
use crate::register::Register;

/// Resolution of the temperature registers, in Kelvin per LSB.
const KELVIN_PER_LSB: f32 = 0.02;
const KELVIN_OFFSET: f32 = 273.15;

/// Length of every register read: LSB, MSB, PEC.
pub const SAMPLE_LEN: usize = 3;

/** The three bytes the sensor returns for a register read.

The PEC byte is kept as-is; reads never check it. Use [RawSample::pec_matches] to
verify a sample against the transaction that produced it. */
#[derive(Debug, PartialEq, Eq, Default, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    pub lsb: u8,
    pub msb: u8,
    pub pec: u8,
}

impl RawSample {
    /** The register value used for temperature conversion.

    Only the high byte contributes; the low byte is discarded. Readings are
    therefore quantized to 256 LSBs (5.12 K). */
    pub fn raw(&self) -> u16 {
        u16::from(self.msb) << 8
    }

    /// Whether `pec` is the PEC of a read of `register` from `address`.
    pub fn pec_matches(&self, address: u8, register: Register) -> bool {
        let frame = [
            pec::write_addr(address),
            register.into(),
            pec::read_addr(address),
            self.lsb,
            self.msb,
        ];

        pec::crc8(&frame) == self.pec
    }
}

impl TryFrom<&[u8]> for RawSample {
    /// Number of bytes actually available.
    type Error = usize;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        match bytes {
            [lsb, msb, pec, ..] => Ok(RawSample {
                lsb: *lsb,
                msb: *msb,
                pec: *pec,
            }),
            short => Err(short.len()),
        }
    }
}

/* Invariant: always derived from a RawSample through the fixed linear
formula; there is no other constructor. */

#[derive(Debug, PartialEq, PartialOrd, Default, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature(pub(crate) f32);

impl Temperature {
    pub fn celsius(self) -> f32 {
        self.0
    }

    pub fn fahrenheit(self) -> f32 {
        self.0 * 9.0 / 5.0 + 32.0
    }

    pub fn kelvin(self) -> f32 {
        self.0 + KELVIN_OFFSET
    }
}

impl From<RawSample> for Temperature {
    fn from(sample: RawSample) -> Self {
        Temperature(f32::from(sample.raw()) * KELVIN_PER_LSB - KELVIN_OFFSET)
    }
}

impl From<Temperature> for f32 {
    fn from(temp: Temperature) -> Self {
        temp.celsius()
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn sample(lsb: u8, msb: u8) -> RawSample {
        RawSample { lsb, msb, pec: 0 }
    }

    #[test]
    fn test_low_byte_discarded() {
        for msb in [0x00u8, 0x01, 0x3A, 0x80, 0xFF].iter().copied() {
            let expected = f32::from(u16::from(msb) * 256) * 0.02 - 273.15;

            for lsb in 0..=0xFFu8 {
                let temp = Temperature::from(sample(lsb, msb));
                assert_eq!(temp, Temperature::from(sample(0, msb)));
                assert!(approx_eq(temp.celsius(), expected));
            }
        }
    }

    #[test]
    fn test_msb_0x80() {
        let temp = Temperature::from(sample(0x00, 0x80));

        assert!(approx_eq(temp.celsius(), 382.21));
        assert!(approx_eq(temp.fahrenheit(), 719.978));
        assert!(approx_eq(temp.kelvin(), 655.36));
    }

    #[test]
    fn test_absolute_zero() {
        let temp = Temperature::from(sample(0xFF, 0x00));

        assert!(approx_eq(temp.celsius(), -273.15));
        assert!(approx_eq(temp.kelvin(), 0.0));
    }

    #[test]
    fn test_fahrenheit_follows_celsius() {
        for msb in 0..=0xFFu8 {
            let temp = Temperature::from(sample(0, msb));
            assert_eq!(temp.fahrenheit(), temp.celsius() * 9.0 / 5.0 + 32.0);
        }
    }

    #[test]
    fn test_from_bytes() {
        let full: &[u8] = &[0x01, 0x80, 0x7F, 0xAA];
        let short: &[u8] = &[0x00, 0x80];
        let empty: &[u8] = &[];

        assert_eq!(
            RawSample::try_from(full),
            Ok(RawSample { lsb: 0x01, msb: 0x80, pec: 0x7F })
        );
        assert_eq!(RawSample::try_from(short), Err(2));
        assert_eq!(RawSample::try_from(empty), Err(0));
    }

    #[test]
    fn test_pec_matches() {
        let mut raw = sample(0x3A, 0x3C);
        raw.pec = pec::crc8(&[0xB4, 0x07, 0xB5, 0x3A, 0x3C]);

        assert!(raw.pec_matches(0x5A, Register::Object1));
        assert!(!raw.pec_matches(0x5A, Register::Ambient));
        assert!(!raw.pec_matches(0x5B, Register::Object1));
    }
}
