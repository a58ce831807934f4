//! Full-screen bitmap blit

use embedded_hal::delay::DelayNs;

use crate::addressing::{Side, BUFFER_SIZE, HALF_WIDTH, PAGES, WIDTH};
use crate::display::Display;
use crate::error::{InvalidArgument, Result};
use crate::traits::DisplayBus;

impl<B, D> Display<B, D>
where
    B: DisplayBus,
    D: DelayNs,
{
    /// Write a 1024-byte bitmap laid out like the shadow framebuffer
    ///
    /// `bitmap[page * 128 + x]` is the column byte at global column `x`.
    /// With `top_to_bottom` each byte is taken MSB-first (bit 7 is the top
    /// row) and reversed before writing.
    ///
    /// The shadow is left as it was unless
    /// [`DisplayConfig::mirror_image_writes`](crate::config::DisplayConfig)
    /// is set. Until the next clear, pixel plots and text that touch the
    /// blitted area then merge with stale shadow contents.
    pub fn write_image(&mut self, bitmap: &[u8], top_to_bottom: bool) -> Result<()> {
        self.ensure_ready()?;
        if bitmap.len() != BUFFER_SIZE {
            return Err(InvalidArgument::ImageSize(bitmap.len()).into());
        }

        let mirror = self.config().mirror_image_writes;

        #[cfg(feature = "defmt")]
        defmt::trace!("ks0108: image blit, mirrored={}", mirror);

        let half = HALF_WIDTH as usize;
        for (page, row) in (0..PAGES).zip(bitmap.chunks_exact(WIDTH as usize)) {
            for (side, bytes) in [(Side::Left, &row[..half]), (Side::Right, &row[half..])] {
                self.set_page(side, page)?;
                self.set_column(side, 0)?;
                self.wait_ready()?;
                for &byte in bytes {
                    let value = if top_to_bottom { byte.reverse_bits() } else { byte };
                    self.write_byte(side, value, mirror)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::addressing::{Side, BUFFER_SIZE};
    use crate::config::DisplayConfig;
    use crate::error::{Error, InvalidArgument};
    use crate::mock::{ready_display, ready_display_with};
    use crate::plot::PlotMode;

    #[test]
    fn test_rejects_wrong_length() {
        let mut display = ready_display();
        display.bus_mut_for_test().clear_log();

        assert_eq!(
            display.write_image(&[0u8; 1023], false),
            Err(Error::InvalidArgument(InvalidArgument::ImageSize(1023)))
        );
        assert_eq!(
            display.write_image(&[], true),
            Err(Error::InvalidArgument(InvalidArgument::ImageSize(0)))
        );
        assert!(display.bus().log.is_empty());
    }

    #[test]
    fn test_all_zero_image() {
        let mut display = ready_display();
        display.bus_mut_for_test().clear_log();

        display.write_image(&[0u8; BUFFER_SIZE], false).unwrap();

        let writes = display.bus().data_writes();
        assert_eq!(writes.len(), BUFFER_SIZE);
        assert!(writes.iter().all(|&(_, byte)| byte == 0x00));
        assert!(display.bus().ram_is_blank());
    }

    #[test]
    fn test_top_to_bottom_reverses_bits() {
        let mut display = ready_display();
        display.bus_mut_for_test().clear_log();

        display.write_image(&[0x01; BUFFER_SIZE], true).unwrap();

        let writes = display.bus().data_writes();
        assert_eq!(writes.len(), BUFFER_SIZE);
        assert!(writes.iter().all(|&(_, byte)| byte == 0x80));
    }

    #[test]
    fn test_halves_and_pages_in_order() {
        let mut display = ready_display();
        let bitmap: Vec<u8> = (0..BUFFER_SIZE).map(|i| (i / 64) as u8).collect();
        display.bus_mut_for_test().clear_log();

        display.write_image(&bitmap, false).unwrap();

        let bus = display.bus();
        for page in 0..8u8 {
            for x in 0..128u8 {
                let expected = bitmap[page as usize * 128 + x as usize];
                assert_eq!(bus.ram_byte(x, page), expected);
            }
        }
        // Left half goes out before the right half of each page
        let writes = bus.data_writes();
        assert_eq!(writes.len(), BUFFER_SIZE);
        assert_eq!(writes[0], (Side::Left, 0));
        assert_eq!(writes[63], (Side::Left, 0));
        assert_eq!(writes[64], (Side::Right, 1));
        assert_eq!(writes[128], (Side::Left, 2));
    }

    #[test]
    fn test_shadow_untouched_by_default() {
        let mut display = ready_display();
        display.plot_pixel(10, 10, PlotMode::Set).unwrap();
        let before = display.shadow().clone();

        display.write_image(&[0xAA; BUFFER_SIZE], false).unwrap();

        assert_eq!(display.shadow(), &before);
        assert_eq!(display.bus().ram_byte(10, 1), 0xAA);
    }

    #[test]
    fn test_shadow_mirrored_when_enabled() {
        let config = DisplayConfig::new().with_image_mirroring(true);
        let mut display = ready_display_with(config);

        display.write_image(&[0x0F; BUFFER_SIZE], true).unwrap();

        assert!(display.shadow().as_bytes().iter().all(|&b| b == 0xF0));
        assert_eq!(display.shadow().as_bytes(), &display.bus().ram_bytes());
    }

    #[test]
    fn test_plot_after_unmirrored_blit_merges_shadow() {
        let mut display = ready_display();
        display.write_image(&[0xFF; BUFFER_SIZE], false).unwrap();

        display.plot_pixel(0, 0, PlotMode::Set).unwrap();

        // The plot was computed from the zeroed shadow, not the blitted RAM
        assert_eq!(display.bus().ram_byte(0, 0), 0x01);
        assert_eq!(display.bus().ram_byte(1, 0), 0xFF);
    }
}
