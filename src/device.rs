//! ADIS driver
//!
//! [`AdisDriver`] owns the bus, the page cache and the transfer buffers for
//! one device. Every operation takes `&mut self`; nothing is shared.

use embedded_hal::delay::DelayNs;

use crate::address::RegisterAddress;
use crate::burst::{self, BurstLayout, ChannelWidth, RawSample};
use crate::config::Config;
use crate::control::{
    ClockMode, DeviceInfo, FirmwareDate, FirmwareRevision, MiscControl, SelfTestReport, msc,
};
use crate::interface::BusInterface;
use crate::page::{PageAction, PageCache};
use crate::profile::{CommandSpec, DeviceProfile};
use crate::response;
use crate::scale::{self, ScaleFactorTable, ScaledSample};
use crate::transaction::{self, BUFFER_CAPACITY, Frame, MAX_ARRAY_READ, PageSelect, WORD_LEN};
use crate::Error;

/// Values returned by [`AdisDriver::read_register_array`]
pub type RegisterValues = heapless::Vec<u16, MAX_ARRAY_READ>;

/// Main driver for ADIS inertial measurement units
pub struct AdisDriver<I> {
    interface: I,
    profile: DeviceProfile,
    config: Config,
    width: Option<ChannelWidth>,
    stall_us: u32,
    page: PageCache,
    frame: Frame,
    rx: [u8; BUFFER_CAPACITY],
    scale_table: Option<ScaleFactorTable>,
}

impl<I> AdisDriver<I>
where
    I: BusInterface,
{
    /// Create a driver for a device described by `profile`
    ///
    /// No bus traffic happens here; call [`init`](Self::init) before use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the profile is inconsistent, the
    /// requested channel width is not offered by the device, or the largest
    /// transaction would not fit the transfer buffers.
    pub fn new(
        interface: I,
        profile: DeviceProfile,
        config: Config,
    ) -> Result<Self, Error<I::Error>> {
        if !profile.validate() {
            return Err(Error::InvalidConfig);
        }
        if config.max_array_len == 0 || config.max_array_len > MAX_ARRAY_READ {
            return Err(Error::InvalidConfig);
        }

        let width = match config.channel_width {
            Some(width) if profile.burst_layout(width).is_none() => {
                return Err(Error::InvalidConfig);
            }
            Some(width) => Some(width),
            None => profile.widest_burst(),
        };

        let paged = profile.capabilities.paged;
        let burst_len = width
            .and_then(|w| profile.burst_layout(w))
            .map_or(0, BurstLayout::frame_len);
        let longest = transaction::array_read_len(config.max_array_len, paged)
            .max(burst_len)
            .max(3 * WORD_LEN);
        if longest > BUFFER_CAPACITY {
            return Err(Error::InvalidConfig);
        }

        Ok(Self {
            interface,
            profile,
            config,
            width,
            stall_us: config.stall_us.unwrap_or(profile.stall_us),
            page: PageCache::new(paged),
            frame: Frame::new(),
            rx: [0; BUFFER_CAPACITY],
            scale_table: None,
        })
    }

    /// Bring the driver in line with the device
    ///
    /// Drops the page cache, reads the device information (which verifies
    /// the product id and selects the scale table) and, on parts that switch
    /// burst width in hardware, programs the configured width.
    ///
    /// # Errors
    ///
    /// Returns an error if communication fails, the product id does not
    /// match, or the range register holds an unknown code.
    pub fn init(&mut self) -> Result<DeviceInfo, Error<I::Error>> {
        self.page.invalidate();
        self.scale_table = None;

        let info = self.device_info()?;

        let misc = self.profile.registers.misc_control;
        let burst32 = self.profile.burst32_enable;
        if let (Some(bit), Some(misc), Some(width)) = (burst32, misc, self.width) {
            let current = self.read_register(misc)?;
            let value = match width {
                ChannelWidth::Bits32 => current | bit,
                ChannelWidth::Bits16 => current & !bit,
            };
            if value != current {
                #[cfg(feature = "defmt")]
                defmt::debug!("Burst width {} (MSC_CTRL 0x{:04X})", width, value);

                self.write_register(misc, value)?;
            }
        }

        Ok(info)
    }

    // --- Bus plumbing ---

    fn page_register(&self) -> Option<u8> {
        self.profile.registers.page_id.map(RegisterAddress::offset)
    }

    fn exchange(&mut self, word_len: usize) -> Result<(), Error<I::Error>> {
        let len = self.frame.len();
        self.interface
            .transfer(self.frame.as_bytes(), &mut self.rx[..len], word_len, self.stall_us)
            .map_err(Error::Bus)
    }

    /// Send the current frame word by word, keeping the page cache in step
    /// with any page-select word it carries
    fn exchange_selected(&mut self, select: Option<PageSelect>) -> Result<(), Error<I::Error>> {
        let result = self.exchange(WORD_LEN);
        if let Some(select) = select {
            if result.is_ok() {
                self.page.set(select.page);
            } else {
                self.page.invalidate();
            }
        }
        result
    }

    /// Read the page register (mirrored on every page, so no select needed)
    fn refresh_page(&mut self) -> Result<u8, Error<I::Error>> {
        let Some(page_id) = self.profile.registers.page_id else {
            return Ok(0);
        };
        transaction::single_read(&mut self.frame, None, page_id);
        self.exchange(WORD_LEN)?;
        let [page, _] = response::single_read(&self.rx, false).to_le_bytes();

        #[cfg(feature = "defmt")]
        defmt::trace!("Device reports page {}", page);

        self.page.set(page);
        Ok(page)
    }

    /// Page-select word needed ahead of an access to `target`, if any
    fn plan_select(&mut self, target: u8) -> Result<Option<PageSelect>, Error<I::Error>> {
        let mut action = self.page.plan(target);
        if action == PageAction::Refresh {
            self.refresh_page()?;
            action = self.page.plan(target);
        }
        Ok(match action {
            PageAction::Select(page) => self
                .page_register()
                .map(|register| PageSelect { register, page }),
            PageAction::None | PageAction::Refresh => None,
        })
    }

    fn ensure_page(&mut self, target: u8) -> Result<(), Error<I::Error>> {
        if let Some(select) = self.plan_select(target)? {
            #[cfg(feature = "defmt")]
            defmt::trace!("Selecting page {}", select.page);

            transaction::page_select(&mut self.frame, select);
            self.exchange_selected(Some(select))?;
        }
        Ok(())
    }

    // --- Register access ---

    /// Write a 16-bit register
    ///
    /// A write to the page register itself drops the page cache, whether
    /// or not the transfer succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn write_register(
        &mut self,
        address: RegisterAddress,
        value: u16,
    ) -> Result<(), Error<I::Error>> {
        let targets_page = self.page.is_paged() && Some(address.offset()) == self.page_register();
        let select = self.plan_select(address.page())?;
        transaction::single_write(&mut self.frame, select, address, value);
        let result = self.exchange_selected(select);

        // The device may have switched pages even if the transfer failed
        if targets_page {
            self.page.invalidate();
        }
        result
    }

    /// Read a 16-bit register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_register(&mut self, address: RegisterAddress) -> Result<u16, Error<I::Error>> {
        let select = self.plan_select(address.page())?;
        transaction::single_read(&mut self.frame, select, address);
        self.exchange_selected(select)?;
        Ok(response::single_read(&self.rx, select.is_some()))
    }

    /// Read several registers in one transfer
    ///
    /// Registers may be on different pages; the values come back in request
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for an empty list or one longer than
    /// [`Config::max_array_len`], or an error if communication fails.
    pub fn read_register_array(
        &mut self,
        addresses: &[RegisterAddress],
    ) -> Result<RegisterValues, Error<I::Error>> {
        let Some(last) = addresses.last() else {
            return Err(Error::InvalidRequest);
        };
        if addresses.len() > self.config.max_array_len {
            return Err(Error::InvalidRequest);
        }

        let page_register = self.page_register();
        let tracker = transaction::array_read(&mut self.frame, page_register, addresses);
        if let Err(e) = self.exchange(WORD_LEN) {
            self.page.invalidate();
            return Err(e);
        }
        self.page.set(last.page());

        let mut values = RegisterValues::new();
        for value in response::array_read(&self.rx, addresses.len(), tracker) {
            values.push(value).map_err(|_| Error::InvalidRequest)?;
        }
        Ok(values)
    }

    /// Read a 32-bit output split over a `*_LOW` and a `*_OUT` register
    ///
    /// Both halves are read in one transfer.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_register_pair(
        &mut self,
        low: RegisterAddress,
        high: RegisterAddress,
    ) -> Result<u32, Error<I::Error>> {
        let values = self.read_register_array(&[low, high])?;
        match values.as_slice() {
            [low, high] => Ok((u32::from(*high) << 16) | u32::from(*low)),
            _ => Err(Error::InvalidRequest),
        }
    }

    // --- Burst reads ---

    fn burst_layout(&self) -> Result<BurstLayout, Error<I::Error>> {
        self.width
            .and_then(|width| self.profile.burst_layout(width))
            .copied()
            .ok_or(Error::BurstNotSupported)
    }

    /// Read one sample in burst mode
    ///
    /// # Errors
    ///
    /// Returns [`Error::BurstNotSupported`] if the device has no burst mode,
    /// [`Error::ChecksumMismatch`] if checksum verification is enabled and
    /// fails, or an error if communication fails.
    pub fn read_burst(&mut self) -> Result<RawSample, Error<I::Error>> {
        let layout = self.burst_layout()?;
        self.ensure_page(layout.trigger.page())?;

        transaction::burst(&mut self.frame, layout.trigger, layout.length);
        self.exchange(0)?;

        let payload = &self.rx[WORD_LEN..layout.frame_len()];
        let sample = burst::decode(&layout, payload);

        if self.config.verify_checksum {
            let computed = layout.compute_checksum(payload);
            if let (Some(computed), Some(expected)) = (computed, sample.checksum) {
                if computed != expected {
                    #[cfg(feature = "defmt")]
                    defmt::warn!(
                        "Burst checksum mismatch: 0x{:04X} != 0x{:04X}",
                        computed,
                        expected
                    );

                    return Err(Error::ChecksumMismatch { expected, computed });
                }
            }
        }
        Ok(sample)
    }

    /// Read one sample in burst mode, in physical units
    ///
    /// Uses the scale table selected by [`device_info`](Self::device_info),
    /// selecting one first if none is cached.
    ///
    /// # Errors
    ///
    /// As [`read_burst`](Self::read_burst), plus [`Error::UnknownRange`] if a
    /// scale table has to be selected and the range is unknown.
    pub fn read_burst_scaled(&mut self) -> Result<ScaledSample, Error<I::Error>> {
        let raw = self.read_burst()?;
        let table = match self.scale_table {
            Some(table) => table,
            None => self.load_scale_table()?,
        };
        Ok(scale::scale(&raw, &table))
    }

    fn select_scale_table(
        &mut self,
        range: Option<u16>,
    ) -> Result<ScaleFactorTable, Error<I::Error>> {
        let width = self.width.unwrap_or(ChannelWidth::Bits16);
        let table = self
            .profile
            .scale_table(width, range)
            .ok_or(Error::UnknownRange(range.unwrap_or_default()))?;
        self.scale_table = Some(table);
        Ok(table)
    }

    fn load_scale_table(&mut self) -> Result<ScaleFactorTable, Error<I::Error>> {
        let range = match self.profile.range {
            Some(range) => Some(self.read_register(range.address)?),
            None => None,
        };
        self.select_scale_table(range)
    }

    /// Scale table in use, once selected
    pub const fn scale_table(&self) -> Option<&ScaleFactorTable> {
        self.scale_table.as_ref()
    }

    // --- Identification ---

    /// Read identification and configuration registers
    ///
    /// Also selects the scale table for the configured width and the range
    /// the device reports.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProductIdMismatch`] if the device is not the expected
    /// variant, [`Error::UnknownRange`] for an unknown range code, or an error
    /// if communication fails.
    pub fn device_info(&mut self) -> Result<DeviceInfo, Error<I::Error>> {
        let regs = self.profile.registers;

        let product_id = self.read_register(regs.product_id)?;
        if product_id != self.profile.product_id {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Unexpected product id 0x{:04X} (expected 0x{:04X})",
                product_id,
                self.profile.product_id
            );

            return Err(Error::ProductIdMismatch {
                expected: self.profile.product_id,
                found: product_id,
            });
        }

        let values = self.read_register_array(&[
            regs.firmware_revision,
            regs.firmware_day_month,
            regs.firmware_year,
            regs.serial_number,
            regs.decimation,
        ])?;
        let [revision, day_month, year, serial_number, decimation] = values.as_slice() else {
            return Err(Error::InvalidRequest);
        };
        let (revision, day_month, year, serial_number, decimation) =
            (*revision, *day_month, *year, *serial_number, *decimation);

        let active_page = if self.page.is_paged() {
            Some(self.refresh_page()?)
        } else {
            None
        };

        let range = match self.profile.range {
            Some(range) => Some(self.read_register(range.address)?),
            None => None,
        };

        let clock_mode = match regs.misc_control {
            Some(misc) => MiscControl::from_raw(self.read_register(misc)?).map(|m| m.clock_mode),
            None => None,
        };

        self.select_scale_table(range)?;

        Ok(DeviceInfo {
            product_id,
            firmware_revision: FirmwareRevision::from_raw(revision),
            firmware_date: FirmwareDate::from_raw(day_month, year),
            serial_number,
            decimation,
            active_page,
            range,
            clock_mode,
            output_rate: self.profile.output_rate(decimation),
        })
    }

    // --- Page control ---

    /// Make `page` the device's active page
    ///
    /// Only writes the page register when the cache says the device is on
    /// another page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] for a non-zero page on an unpaged
    /// device, or an error if communication fails.
    pub fn set_active_page(&mut self, page: u8) -> Result<(), Error<I::Error>> {
        if !self.page.is_paged() {
            return if page == 0 { Ok(()) } else { Err(Error::Unsupported) };
        }
        self.ensure_page(page)
    }

    /// Read the active page back from the device, refreshing the cache
    ///
    /// Unpaged devices always report page 0.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn active_page(&mut self) -> Result<u8, Error<I::Error>> {
        self.refresh_page()
    }

    /// Forget the cached page; the next paged access reads it back first
    pub fn invalidate_page_cache(&mut self) {
        self.page.invalidate();
    }

    // --- Configuration ---

    /// Set the output data rate
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataRate`] if the device cannot produce
    /// `rate_hz` exactly, or an error if communication fails.
    pub fn set_data_rate(&mut self, rate_hz: u32) -> Result<(), Error<I::Error>> {
        let decimation = self
            .profile
            .decimation_for(rate_hz)
            .ok_or(Error::InvalidDataRate)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Data rate {} Hz (DEC_RATE {})", rate_hz, decimation);

        self.write_register(self.profile.registers.decimation, decimation)
    }

    fn check_clock_mode(&self, mode: ClockMode) -> Result<(), Error<I::Error>> {
        let caps = self.profile.capabilities;
        match mode {
            ClockMode::Internal => Ok(()),
            ClockMode::ExternalSync if caps.external_sync => Ok(()),
            ClockMode::Pps if caps.pps => Ok(()),
            ClockMode::ExternalSync | ClockMode::Pps => Err(Error::Unsupported),
        }
    }

    /// Write the miscellaneous-control settings
    ///
    /// Bits outside [`MiscControl`], such as the burst width, are preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] if the device has no misc-control
    /// register or cannot use the requested clock mode, or an error if
    /// communication fails.
    pub fn configure_misc_control(&mut self, settings: MiscControl) -> Result<(), Error<I::Error>> {
        let misc = self.profile.registers.misc_control.ok_or(Error::Unsupported)?;
        self.check_clock_mode(settings.clock_mode)?;
        let current = self.read_register(misc)?;
        self.write_register(misc, settings.apply(current))
    }

    /// Change only the sample clock source
    ///
    /// # Errors
    ///
    /// As [`configure_misc_control`](Self::configure_misc_control).
    pub fn set_clock_mode(&mut self, mode: ClockMode) -> Result<(), Error<I::Error>> {
        let misc = self.profile.registers.misc_control.ok_or(Error::Unsupported)?;
        self.check_clock_mode(mode)?;
        let current = self.read_register(misc)?;
        let value = (current & !msc::SYNC_MASK) | ((mode as u16) << msc::SYNC_SHIFT);
        self.write_register(misc, value)
    }

    /// Loopback test through the user scratch register
    ///
    /// Writes two complementary patterns, reads each back and restores the
    /// original value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CommunicationCheckFailed`] on the first mismatch, or
    /// an error if communication fails.
    pub fn check_communications(&mut self) -> Result<(), Error<I::Error>> {
        let scratch = self.profile.registers.scratch;
        let original = self.read_register(scratch)?;

        for pattern in [0x5AA5, 0xA55A] {
            self.write_register(scratch, pattern)?;
            let found = self.read_register(scratch)?;
            if found != pattern {
                #[cfg(feature = "defmt")]
                defmt::warn!("Scratch read back 0x{:04X}, wrote 0x{:04X}", found, pattern);

                return Err(Error::CommunicationCheckFailed {
                    expected: pattern,
                    found,
                });
            }
        }

        self.write_register(scratch, original)
    }

    // --- Commands ---

    fn command<D: DelayNs>(
        &mut self,
        command: CommandSpec,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>> {
        self.write_register(self.profile.registers.command, command.mask)?;
        delay.delay_ms(command.duration_ms);
        Ok(())
    }

    /// Store the user configuration in flash
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn flash_update<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Flash update");

        self.command(self.profile.commands.flash_update, delay)
    }

    /// Reset the device and wait for it to restart
    ///
    /// The page cache is dropped; the device comes back on page 0 but the
    /// driver reads it back before the next paged access.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn software_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("Software reset");

        let result = self.command(self.profile.commands.software_reset, delay);
        self.page.invalidate();
        result
    }

    /// Run the on-chip self-test
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. A failed
    /// test is reported in the returned [`SelfTestReport`], not as an error.
    pub fn self_test<D>(&mut self, delay: &mut D) -> Result<SelfTestReport, Error<I::Error>>
    where
        D: DelayNs,
    {
        self.command(self.profile.commands.self_test, delay)?;
        let diagnostic = self.read_register(self.profile.registers.diagnostic)?;
        let passed = diagnostic & self.profile.self_test_failure_mask == 0;

        if !passed {
            #[cfg(feature = "defmt")]
            defmt::warn!("Self-test failed, diagnostic 0x{:04X}", diagnostic);
        }

        Ok(SelfTestReport { diagnostic, passed })
    }

    /// Apply the bias correction estimated by the device
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn bias_correction_update<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: DelayNs,
    {
        self.command(self.profile.commands.bias_correction_update, delay)
    }

    // --- Accessors ---

    /// Device profile in use
    pub const fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    /// Driver configuration
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Burst channel width in use, if the device supports bursts
    pub const fn channel_width(&self) -> Option<ChannelWidth> {
        self.width
    }

    /// Consume the driver and return the bus interface
    pub fn release(self) -> I {
        self.interface
    }
}
