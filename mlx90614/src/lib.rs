/*! `mlx90614` is an [`embedded_hal`](https://github.com/rust-embedded/embedded-hal) crate for
reading [Melexis MLX90614](https://www.melexis.com/en/product/MLX90614/) infrared thermometers
over an I2C (SMBus) bus.

The MLX90614 exposes its measurements as 16-bit words behind SMBus command codes. Every read
is a write of the command code followed by a read of three bytes: the word's low byte, its
high byte, and a packet error code (PEC). Two words matter for everyday use:

* Ambient (die) temperature, `Ta`, at command `0x06`
* Object temperature, `Tobj1`, at command `0x07`

Both are in units of 0.02 K. Conversion to Celsius uses only the high byte of each word, so
readings step in 5.12 K increments; see [RawSample::raw].

Each transaction names the device address explicitly. Several drivers can share one bus by
each borrowing it (`&mut bus` implements [`I2c`] as well), which keeps concurrent access
impossible without a lock chosen by the caller. */
#![no_std]
#![doc(html_root_url = "https://docs.rs/mlx90614/0.1.0")]

use core::convert::TryFrom;
use core::fmt;
use core::result::Result;
use embedded_hal::i2c::I2c;

#[macro_use]
mod logging;

pub mod pec;
mod register;
mod temp;

pub use register::{Register, DEFAULT_ADDRESS};
use register::MAX_ADDRESS;
pub use temp::{RawSample, Temperature, SAMPLE_LEN};

/** A struct for reading an MLX90614 infrared thermometer via an [`embedded_hal`] I2C
implementation.

The bus is owned for the lifetime of the struct and released when it is dropped, or earlier
through [Mlx90614::release]. */
pub struct Mlx90614<I>
where
    I: I2c,
{
    bus: Option<I>,
    address: u8,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Enum for describing possible error conditions when talking to an MLX90614.
pub enum Error<E> {
    /// The address given at construction does not fit in 7 bits.
    InvalidAddress(u8),
    /** The device did not answer at its address during construction. Contains the error
    propagated from the [`embedded_hal`] implementation. */
    Initialization(E),
    /** A transaction was attempted after the bus was released with [Mlx90614::release]. */
    BusNotInitialized,
    /// Reading a register failed. Contains the error from the [`embedded_hal`] implementation.
    Read(E),
    /// Writing a register failed. Contains the error from the [`embedded_hal`] implementation.
    Write(E),
    /** Fewer bytes than a full [RawSample] were available. Contains the number received.

    [`embedded_hal`] reports a truncated transfer as a bus error, so reads through
    [Mlx90614] surface one as [Error::Read]. This variant only comes from decoding a
    caller-supplied buffer with [RawSample::try_from]. */
    ShortRead(usize),
}

impl<E> fmt::Display for Error<E>
where
    E: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidAddress(a) => write!(f, "address {:#04x} is not a 7-bit address", a),
            Error::Initialization(e) => write!(f, "device did not answer at its address: {:?}", e),
            Error::BusNotInitialized => write!(f, "I2C bus was released"),
            Error::Read(e) => write!(f, "register read failed: {:?}", e),
            Error::Write(e) => write!(f, "register write failed: {:?}", e),
            Error::ShortRead(n) => write!(f, "expected {} bytes, got {}", SAMPLE_LEN, n),
        }
    }
}

impl<I> Mlx90614<I>
where
    I: I2c,
{
    /** Bind a sensor at `address` on `bus`.

    The address is confirmed by reading the ambient temperature once. On failure the bus is
    dropped along with the half-built driver. */
    pub fn new(bus: I, address: u8) -> Result<Self, Error<I::Error>> {
        if address > MAX_ADDRESS {
            warn!("rejecting address {=u8:#x}", address);
            return Err(Error::InvalidAddress(address));
        }

        let mut mlx = Mlx90614 {
            bus: Some(bus),
            address,
        };
        let mut probe = [0u8; SAMPLE_LEN];

        match mlx.read_reg_n(Register::Ambient, &mut probe) {
            Ok(_) => {
                debug!("mlx90614 bound at {=u8:#x}", address);
                Ok(mlx)
            }
            Err(Error::Read(e)) => {
                warn!("no mlx90614 answering at {=u8:#x}", address);
                Err(Error::Initialization(e))
            }
            Err(e) => Err(e),
        }
    }

    /// [Mlx90614::new] at the factory address, [DEFAULT_ADDRESS].
    pub fn with_default_address(bus: I) -> Result<Self, Error<I::Error>> {
        Self::new(bus, DEFAULT_ADDRESS)
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn read_object_temp_c(&mut self) -> Result<f32, Error<I::Error>> {
        self.object_temperature().map(Temperature::celsius)
    }

    pub fn read_ambient_temp_c(&mut self) -> Result<f32, Error<I::Error>> {
        self.ambient_temperature().map(Temperature::celsius)
    }

    pub fn read_object_temp_f(&mut self) -> Result<f32, Error<I::Error>> {
        self.object_temperature().map(Temperature::fahrenheit)
    }

    pub fn read_ambient_temp_f(&mut self) -> Result<f32, Error<I::Error>> {
        self.ambient_temperature().map(Temperature::fahrenheit)
    }

    /// Object temperature from the second thermopile. Single-zone parts return garbage.
    pub fn read_object2_temp_c(&mut self) -> Result<f32, Error<I::Error>> {
        self.read_temperature(Register::Object2)
            .map(Temperature::celsius)
    }

    pub fn read_object2_temp_f(&mut self) -> Result<f32, Error<I::Error>> {
        self.read_temperature(Register::Object2)
            .map(Temperature::fahrenheit)
    }

    pub fn object_temperature(&mut self) -> Result<Temperature, Error<I::Error>> {
        self.read_temperature(Register::Object1)
    }

    pub fn ambient_temperature(&mut self) -> Result<Temperature, Error<I::Error>> {
        self.read_temperature(Register::Ambient)
    }

    /// Read the undecoded response to any command. The PEC is not checked.
    pub fn read_raw(&mut self, reg: Register) -> Result<RawSample, Error<I::Error>> {
        let mut buf = [0u8; SAMPLE_LEN];
        self.read_reg_n(reg, &mut buf)?;

        RawSample::try_from(&buf[..]).map_err(Error::ShortRead)
    }

    /** Write `value` to an EEPROM word, with the PEC the device requires appended.

    The MLX90614 only latches a new value into a cell that reads zero, so overwriting a cell
    takes a write of `0` first, and each write needs about 5 ms before the next command.
    Neither is done here.

    Panics if `reg` is not an EEPROM command. */
    pub fn write_word(&mut self, reg: Register, value: u16) -> Result<(), Error<I::Error>> {
        if !reg.is_eeprom() {
            panic!("Only EEPROM commands (0x20 to 0x3F) accept word writes.");
        }

        let [lsb, msb] = value.to_le_bytes();
        let pec = pec::crc8(&[pec::write_addr(self.address), u8::from(reg), lsb, msb]);

        self.write_reg_n(reg, &[lsb, msb, pec])
    }

    /// Detach the bus. Every later transaction fails with [Error::BusNotInitialized].
    pub fn release(&mut self) -> Option<I> {
        debug!("mlx90614 at {=u8:#x} releasing bus", self.address);
        self.bus.take()
    }

    pub fn free(mut self) -> Option<I> {
        self.bus.take()
    }

    fn read_temperature(&mut self, reg: Register) -> Result<Temperature, Error<I::Error>> {
        self.read_raw(reg).map(Temperature::from)
    }

    fn read_reg_n(&mut self, reg: Register, buf: &mut [u8]) -> Result<usize, Error<I::Error>> {
        let bus = self.bus.as_mut().ok_or(Error::BusNotInitialized)?;

        trace!("read {=usize} bytes from {}", buf.len(), reg);
        bus.write_read(self.address, &[u8::from(reg)], buf)
            .map_err(Error::Read)?;

        Ok(buf.len())
    }

    fn write_reg_n(&mut self, reg: Register, data: &[u8]) -> Result<(), Error<I::Error>> {
        if data.len() > SAMPLE_LEN {
            panic!("At most 3 bytes (LSB, MSB, PEC) may follow a command.");
        }

        let bus = self.bus.as_mut().ok_or(Error::BusNotInitialized)?;
        let mut frame = [0u8; SAMPLE_LEN + 1];

        frame[0] = reg.into();
        frame[1..=data.len()].copy_from_slice(data);

        trace!("write {=usize} bytes to {}", data.len(), reg);
        bus.write(self.address, &frame[..=data.len()])
            .map_err(Error::Write)
    }
}
