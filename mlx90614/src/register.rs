/// Factory-programmed SMBus address of every MLX90614.
pub const DEFAULT_ADDRESS: u8 = 0x5A;

/// Highest address representable in 7 bits.
pub(crate) const MAX_ADDRESS: u8 = 0x7F;

// RAM lives at 0x00-0x1F, EEPROM at 0x20-0x3F. Commands outside both
// windows are special (flags, sleep) and cannot be written as words.
const EEPROM_ACCESS: u8 = 0x20;

macro_rules! impl_registers {
    ( $( $(#[$meta:meta])* $name:ident = $code:expr ),* $(,)? ) => {
        /// SMBus command codes understood by the MLX90614.
        ///
        /// Reading a command returns a little-endian word followed by a PEC byte.
        #[derive(Debug, PartialEq, Eq, Clone, Copy)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[repr(u8)]
        pub enum Register {
            $(
                $(#[$meta])*
                $name = $code
            ),*
        }

        impl From<Register> for u8 {
            fn from(reg: Register) -> u8 {
                reg as u8
            }
        }
    }
}

impl_registers! {
    /// Raw IR channel 1 (RAM).
    RawIr1 = 0x04,
    /// Raw IR channel 2 (RAM).
    RawIr2 = 0x05,
    /// Die (ambient) temperature, Ta.
    Ambient = 0x06,
    /// Object temperature of the first thermopile, Tobj1.
    Object1 = 0x07,
    /// Object temperature of the second thermopile, Tobj2. Dual-zone parts only.
    Object2 = 0x08,
    ToMax = 0x20,
    ToMin = 0x21,
    PwmCtrl = 0x22,
    TaRange = 0x23,
    /// Emissivity correction coefficient, 0xFFFF for e = 1.0.
    Emissivity = 0x24,
    Config1 = 0x25,
    SmbusAddress = 0x2E,
    Id1 = 0x3C,
    Id2 = 0x3D,
    Id3 = 0x3E,
    Id4 = 0x3F,
    /// Status flags (EEPROM busy, EEPROM dead, POR).
    Flags = 0xF0,
}

impl Register {
    /// Whether the command addresses the EEPROM window, the only place word
    /// writes are accepted.
    pub fn is_eeprom(self) -> bool {
        u8::from(self) & 0xE0 == EEPROM_ACCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_codes() {
        assert_eq!(u8::from(Register::Ambient), 0x06);
        assert_eq!(u8::from(Register::Object1), 0x07);
        assert_eq!(u8::from(Register::Object2), 0x08);
        assert_eq!(u8::from(Register::Flags), 0xF0);
    }

    #[test]
    fn test_eeprom_window() {
        assert!(Register::Emissivity.is_eeprom());
        assert!(Register::SmbusAddress.is_eeprom());
        assert!(Register::Id4.is_eeprom());

        assert!(!Register::Object1.is_eeprom());
        assert!(!Register::RawIr1.is_eeprom());
        assert!(!Register::Flags.is_eeprom());
    }
}
