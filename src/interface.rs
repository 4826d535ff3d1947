//! Hardware interface abstraction
//!
//! This module provides the [`TileInterface`] trait, the single primitive the
//! driver needs from the hardware, along with three implementations:
//!
//! - [`SpiInterface`] talks to a MultiTron controller over an embedded-hal SPI device
//! - [`FnInterface`] adapts a raw `exchange(word, buffer) -> status` function
//! - [`Retry`] wraps another interface and re-issues failed exchanges
//!
//! ## Exchange Contract
//!
//! | Opcode      | Buffer                               |
//! |-------------|--------------------------------------|
//! | `PowerOn`   | 2 bytes, filled with `[cols, rows]`  |
//! | `PowerOff`  | none                                 |
//! | `ReadLine`  | tile width bytes, filled by device   |
//! | `WriteLine` | tile width bytes, sent to device     |
//!
//! ## Example
//!
//! ```
//! use multitron::{ControlWord, FnInterface, Opcode, TileInterface};
//!
//! let mut interface = FnInterface::new(|_word: u32, buffer: Option<&mut [u8]>| {
//!     if let Some(reply) = buffer {
//!         reply.fill(1);
//!     }
//!     0
//! });
//!
//! let mut reply = [0u8; 2];
//! let result = interface.exchange(ControlWord::system(Opcode::PowerOn), Some(&mut reply));
//! assert!(result.is_ok());
//! assert_eq!(reply, [1, 1]);
//! ```

use core::fmt::Debug;
use embedded_hal::spi::{Operation, SpiDevice};

use crate::command::{ControlWord, Opcode};

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the tile-addressable hardware primitive
///
/// This trait abstracts over different hardware implementations, allowing
/// [`Display`](crate::display::Display) to run against a real controller or a
/// test double.
///
/// ## Implementing
///
/// Each call must complete before returning; the driver never has more than one
/// exchange in flight. Sharing one device between threads requires the
/// implementation itself to serialize exchanges.
pub trait TileInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Issue one command, exchanging `buffer` with the device
    ///
    /// # Errors
    ///
    /// Returns an error if the device signals failure or the transport fails.
    fn exchange(
        &mut self,
        command: ControlWord,
        buffer: Option<&mut [u8]>,
    ) -> InterfaceResult<(), Self::Error>;
}

impl<T: TileInterface + ?Sized> TileInterface for &mut T {
    type Error = T::Error;

    fn exchange(
        &mut self,
        command: ControlWord,
        buffer: Option<&mut [u8]>,
    ) -> InterfaceResult<(), Self::Error> {
        (**self).exchange(command, buffer)
    }
}

/// Errors that can occur on the SPI transport
#[derive(Debug, PartialEq, Eq)]
pub enum InterfaceError<SpiErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// Controller returned a non-zero status byte
    Status(u8),
}

impl<SpiErr: Debug> core::fmt::Display for InterfaceError<SpiErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Status(code) => write!(f, "Device status {code:#04x}"),
        }
    }
}

impl<SpiErr: Debug> core::error::Error for InterfaceError<SpiErr> {}

/// SPI transport for the MultiTron controller
///
/// Each exchange is a single SPI transaction:
/// 1. the control word, 4 bytes little endian
/// 2. the payload, if any: read for `PowerOn`/`ReadLine`, written for `WriteLine`
/// 3. one status byte read back, zero on success
pub struct SpiInterface<SPI> {
    /// SPI device for communication
    spi: SPI,
}

impl<SPI> SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    /// Create a new SpiInterface
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Release the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> TileInterface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    type Error = InterfaceError<SPI::Error>;

    fn exchange(
        &mut self,
        command: ControlWord,
        buffer: Option<&mut [u8]>,
    ) -> InterfaceResult<(), Self::Error> {
        let header = command.bits().to_le_bytes();
        let mut status = [0u8; 1];
        let writes_payload = command.opcode() == Some(Opcode::WriteLine);

        let result = match buffer {
            Some(payload) if writes_payload => self.spi.transaction(&mut [
                Operation::Write(&header),
                Operation::Write(payload),
                Operation::Read(&mut status),
            ]),
            Some(payload) => self.spi.transaction(&mut [
                Operation::Write(&header),
                Operation::Read(payload),
                Operation::Read(&mut status),
            ]),
            None => self
                .spi
                .transaction(&mut [Operation::Write(&header), Operation::Read(&mut status)]),
        };
        result.map_err(InterfaceError::Spi)?;

        match status[0] {
            0 => Ok(()),
            code => Err(InterfaceError::Status(code)),
        }
    }
}

/// Non-zero status returned by a raw exchange function
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusError(pub i32);

impl core::fmt::Display for StatusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Exchange failed with status {}", self.0)
    }
}

impl core::error::Error for StatusError {}

/// Adapter for a raw `exchange(word, buffer) -> status` primitive
///
/// Any non-zero status is reported as [`StatusError`]; specific codes are not
/// interpreted.
pub struct FnInterface<F> {
    exchange: F,
}

impl<F> FnInterface<F>
where
    F: FnMut(u32, Option<&mut [u8]>) -> i32,
{
    /// Wrap an exchange function
    pub fn new(exchange: F) -> Self {
        Self { exchange }
    }
}

impl<F> TileInterface for FnInterface<F>
where
    F: FnMut(u32, Option<&mut [u8]>) -> i32,
{
    type Error = StatusError;

    fn exchange(
        &mut self,
        command: ControlWord,
        buffer: Option<&mut [u8]>,
    ) -> InterfaceResult<(), Self::Error> {
        match (self.exchange)(command.bits(), buffer) {
            0 => Ok(()),
            status => Err(StatusError(status)),
        }
    }
}

/// Decorator that re-issues failed exchanges
///
/// Every exchange the driver issues is idempotent (a scanline read or a full
/// scanline write), so replaying one after a transient fault is safe.
pub struct Retry<I> {
    inner: I,
    attempts: u8,
}

impl<I: TileInterface> Retry<I> {
    /// Wrap `inner`, trying each exchange up to `attempts` times (at least once)
    pub fn new(inner: I, attempts: u8) -> Self {
        Self {
            inner,
            attempts: attempts.max(1),
        }
    }

    /// Maximum attempts per exchange
    pub fn attempts(&self) -> u8 {
        self.attempts
    }

    /// Release the wrapped interface
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: TileInterface> TileInterface for Retry<I> {
    type Error = I::Error;

    fn exchange(
        &mut self,
        command: ControlWord,
        mut buffer: Option<&mut [u8]>,
    ) -> InterfaceResult<(), Self::Error> {
        let mut attempt = 1;
        loop {
            match self.inner.exchange(command, buffer.as_deref_mut()) {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.attempts => {
                    log::warn!(
                        "exchange {:#010x} failed (attempt {}/{}): {:?}",
                        command.bits(),
                        attempt,
                        self.attempts,
                        e
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct MockError;

    impl embedded_hal::spi::Error for MockError {
        fn kind(&self) -> embedded_hal::spi::ErrorKind {
            embedded_hal::spi::ErrorKind::Other
        }
    }

    /// Records written bytes, answers reads with `reply` then `status`
    struct MockSpi {
        written: Vec<Vec<u8>>,
        reply: u8,
        status: u8,
        fail: bool,
    }

    impl MockSpi {
        fn new(reply: u8, status: u8) -> Self {
            Self {
                written: Vec::new(),
                reply,
                status,
                fail: false,
            }
        }
    }

    impl embedded_hal::spi::ErrorType for MockSpi {
        type Error = MockError;
    }

    impl SpiDevice for MockSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), MockError> {
            if self.fail {
                return Err(MockError);
            }
            let last = operations.len() - 1;
            for (i, op) in operations.iter_mut().enumerate() {
                match op {
                    Operation::Write(bytes) => self.written.push(bytes.to_vec()),
                    Operation::Read(bytes) if i == last => bytes.fill(self.status),
                    Operation::Read(bytes) => bytes.fill(self.reply),
                    _ => return Err(MockError),
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_spi_read_line_frames_word_and_fills_payload() {
        let mut interface = SpiInterface::new(MockSpi::new(0xAB, 0));
        let mut line = [0u8; 8];
        let word = ControlWord::line(Opcode::ReadLine, 2, 5);
        assert!(interface.exchange(word, Some(&mut line)).is_ok());
        assert_eq!(line, [0xAB; 8]);
        let spi = interface.release();
        assert_eq!(spi.written, [word.bits().to_le_bytes().to_vec()]);
    }

    #[test]
    fn test_spi_write_line_sends_payload() {
        let mut interface = SpiInterface::new(MockSpi::new(0, 0));
        let mut line = [1u8, 2, 3, 4];
        let word = ControlWord::line(Opcode::WriteLine, 0, 0);
        assert!(interface.exchange(word, Some(&mut line)).is_ok());
        let spi = interface.release();
        assert_eq!(spi.written.len(), 2);
        assert_eq!(spi.written[1], [1, 2, 3, 4]);
    }

    #[test]
    fn test_spi_power_off_has_no_payload() {
        let mut interface = SpiInterface::new(MockSpi::new(0, 0));
        assert!(
            interface
                .exchange(ControlWord::system(Opcode::PowerOff), None)
                .is_ok()
        );
        assert_eq!(interface.release().written.len(), 1);
    }

    #[test]
    fn test_spi_nonzero_status_is_error() {
        let mut interface = SpiInterface::new(MockSpi::new(0, 0x07));
        let result = interface.exchange(ControlWord::system(Opcode::PowerOff), None);
        assert_eq!(result, Err(InterfaceError::Status(0x07)));
    }

    #[test]
    fn test_spi_bus_error_is_wrapped() {
        let mut spi = MockSpi::new(0, 0);
        spi.fail = true;
        let mut interface = SpiInterface::new(spi);
        let result = interface.exchange(ControlWord::system(Opcode::PowerOff), None);
        assert_eq!(result, Err(InterfaceError::Spi(MockError)));
    }

    #[test]
    fn test_fn_interface_maps_status() {
        let mut seen = Vec::new();
        let mut interface = FnInterface::new(|word: u32, _buffer: Option<&mut [u8]>| {
            seen.push(word);
            if word == 0 { 0 } else { -5 }
        });
        assert!(
            interface
                .exchange(ControlWord::system(Opcode::PowerOn), None)
                .is_ok()
        );
        assert_eq!(
            interface.exchange(ControlWord::system(Opcode::PowerOff), None),
            Err(StatusError(-5))
        );
        drop(interface);
        assert_eq!(seen, [0, 1 << 7]);
    }

    #[test]
    fn test_retry_recovers_from_transient_failure() {
        let mut calls = 0;
        let flaky = FnInterface::new(|_word: u32, buffer: Option<&mut [u8]>| {
            calls += 1;
            if calls < 3 {
                return 1;
            }
            if let Some(line) = buffer {
                line.fill(9);
            }
            0
        });
        let mut interface = Retry::new(flaky, 3);
        let mut line = [0u8; 4];
        assert!(
            interface
                .exchange(ControlWord::line(Opcode::ReadLine, 0, 0), Some(&mut line))
                .is_ok()
        );
        assert_eq!(line, [9; 4]);
        drop(interface);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_retry_gives_up_after_attempts() {
        let mut calls = 0;
        let broken = FnInterface::new(|_word: u32, _buffer: Option<&mut [u8]>| {
            calls += 1;
            2
        });
        let mut interface = Retry::new(broken, 2);
        let result = interface.exchange(ControlWord::system(Opcode::PowerOff), None);
        assert_eq!(result, Err(StatusError(2)));
        drop(interface);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_retry_zero_attempts_still_tries_once() {
        let interface = Retry::new(FnInterface::new(|_: u32, _: Option<&mut [u8]>| 0), 0);
        assert_eq!(interface.attempts(), 1);
    }
}
