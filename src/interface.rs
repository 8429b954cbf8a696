//! Bus interface for ADIS devices
//!
//! The driver talks to the device through [`BusInterface`], a full-duplex
//! transfer that splits a frame into chip-select-bounded words and idles for
//! a stall time between them. [`SpiInterface`] implements it on top of an
//! `embedded-hal` [`SpiDevice`](embedded_hal::spi::SpiDevice) and a
//! [`DelayNs`](embedded_hal::delay::DelayNs) provider.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiDevice;

/// Full-duplex, word-framed bus transfer
///
/// Implementations exchange `tx` for `rx` as `tx.len() / word_len`
/// separate chip-select-bounded words, waiting `stall_us` after each. A
/// `word_len` of zero (or equal to the frame length) sends the frame as a
/// single word. `rx` has the same length as `tx`.
pub trait BusInterface {
    /// Error reported by the underlying bus
    type Error;

    /// Run one transfer
    ///
    /// # Errors
    ///
    /// Returns the bus error if any word fails; the remaining words are not
    /// sent.
    fn transfer(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
        word_len: usize,
        stall_us: u32,
    ) -> Result<(), Self::Error>;
}

impl<T: BusInterface + ?Sized> BusInterface for &mut T {
    type Error = T::Error;

    fn transfer(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
        word_len: usize,
        stall_us: u32,
    ) -> Result<(), Self::Error> {
        (**self).transfer(tx, rx, word_len, stall_us)
    }
}

/// SPI interface for ADIS devices
///
/// The SPI device must run in mode 3 and own chip select, e.g.
/// `embedded_hal_bus::spi::ExclusiveDevice`. Every word becomes one
/// `SpiDevice::transfer` call, so chip select toggles between words as the
/// device requires.
///
/// ```ignore
/// let interface = SpiInterface::new(spi_device, delay);
/// let mut imu = AdisDriver::new(interface, ADIS16475, Config::default())?;
/// ```
pub struct SpiInterface<SPI, D> {
    spi: SPI,
    delay: D,
}

impl<SPI, D> SpiInterface<SPI, D> {
    /// Create a new SPI interface
    pub const fn new(spi: SPI, delay: D) -> Self {
        Self { spi, delay }
    }

    /// Consume the interface and return the SPI device and delay
    pub fn release(self) -> (SPI, D) {
        (self.spi, self.delay)
    }
}

impl<SPI, D> BusInterface for SpiInterface<SPI, D>
where
    SPI: SpiDevice,
    D: DelayNs,
{
    type Error = SPI::Error;

    fn transfer(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
        word_len: usize,
        stall_us: u32,
    ) -> Result<(), Self::Error> {
        let word_len = if word_len == 0 { tx.len() } else { word_len };
        if word_len == 0 {
            return Ok(());
        }

        for (write, read) in tx.chunks(word_len).zip(rx.chunks_mut(word_len)) {
            self.spi.transfer(read, write)?;
            if stall_us > 0 {
                self.delay.delay_us(stall_us);
            }
        }
        Ok(())
    }
}
