//! Pixel plotting
//!
//! Pixels are changed with a read-modify-write against the shadow: the
//! target byte is taken from the mirror, one bit is changed and the byte is
//! written to the controller and stored back.

use embedded_hal::delay::DelayNs;

use crate::addressing::{check_page, Coordinate, Side, HALF_WIDTH};
use crate::display::Display;
use crate::error::Result;
use crate::traits::DisplayBus;

/// Pixel operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlotMode {
    /// Turn the pixel on
    Set,
    /// Turn the pixel off
    Clear,
    /// Turn off all eight pixels of the page column holding the pixel
    ClearColumn,
}

impl PlotMode {
    fn apply(self, current: u8, mask: u8) -> u8 {
        match self {
            PlotMode::Set => current | mask,
            PlotMode::Clear => current & !mask,
            PlotMode::ClearColumn => 0x00,
        }
    }
}

/// Row of the horizontal axis
pub const X_AXIS_ROW: u8 = 32;

/// Column of the vertical axis
pub const Y_AXIS_COLUMN: u8 = 64;

/// Lowest row of the vertical axis
const Y_AXIS_BOTTOM: u8 = 54;

const Y_ARROW: [(u8, u8); 6] = [(63, 1), (62, 2), (61, 3), (65, 1), (66, 2), (67, 3)];

const X_ARROW: [(u8, u8); 7] = [
    (127, 32),
    (126, 31),
    (126, 33),
    (125, 30),
    (125, 34),
    (124, 29),
    (124, 35),
];

/// Points of the axes overlay, in drawing order
pub fn axis_points() -> impl Iterator<Item = (u8, u8)> {
    let vertical = (0..=Y_AXIS_BOTTOM).map(|y| (Y_AXIS_COLUMN, y));
    let horizontal = (0..=126).map(|x| (x, X_AXIS_ROW));
    vertical
        .chain(horizontal)
        .chain(Y_ARROW)
        .chain(X_ARROW)
}

impl<B, D> Display<B, D>
where
    B: DisplayBus,
    D: DelayNs,
{
    /// Set, clear or column-clear one pixel
    ///
    /// Leaves the cursor on the pixel's controller, page and column.
    pub fn plot_pixel(&mut self, x: u8, y: u8, mode: PlotMode) -> Result<()> {
        self.ensure_ready()?;
        let coord = Coordinate::new(x, y)?;
        let target = coord.target();

        self.set_page(target.side, target.page)?;
        self.set_column(target.side, target.column)?;
        self.wait_ready()?;

        let value = mode.apply(self.current_byte(target.side), coord.mask());
        self.write_byte(target.side, value, true)
    }

    /// Draw the fixed axes overlay: a vertical axis at x=64 and a horizontal
    /// axis at y=32, each with an arrow head
    pub fn draw_axes(&mut self) -> Result<()> {
        self.ensure_ready()?;
        for (x, y) in axis_points() {
            self.plot_pixel(x, y, PlotMode::Set)?;
        }
        Ok(())
    }

    /// Blank one page row across both halves
    ///
    /// Leaves the cursor at column 0 of the left half on that page.
    pub fn clear_page(&mut self, page: u8) -> Result<()> {
        self.ensure_ready()?;
        let page = check_page(page)?;

        self.set_page(Side::Both, page)?;
        self.set_column(Side::Both, 0)?;
        self.wait_ready()?;
        for _ in 0..HALF_WIDTH {
            self.write_byte(Side::Both, 0x00, true)?;
        }

        self.cursor.side = Side::Left;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, InvalidArgument};
    use crate::mock::{ready_display, Op};
    use crate::text::Justify;
    use proptest::prelude::*;

    #[test]
    fn test_set_and_clear() {
        let mut display = ready_display();

        display.plot_pixel(70, 10, PlotMode::Set).unwrap();
        assert!(display.shadow().pixel(70, 10));
        assert_eq!(display.bus().ram[1][1][6], 0b0000_0100);

        display.plot_pixel(70, 11, PlotMode::Set).unwrap();
        display.plot_pixel(70, 10, PlotMode::Clear).unwrap();
        assert!(!display.shadow().pixel(70, 10));
        assert_eq!(display.bus().ram[1][1][6], 0b0000_1000);

        let cursor = display.cursor();
        assert_eq!((cursor.side, cursor.page, cursor.column), (Side::Right, 1, 6));
    }

    #[test]
    fn test_clear_column_zeroes_byte() {
        let mut display = ready_display();
        for y in 16..24 {
            display.plot_pixel(3, y, PlotMode::Set).unwrap();
        }
        assert_eq!(display.shadow().page(2).unwrap()[3], 0xFF);

        display.plot_pixel(3, 20, PlotMode::ClearColumn).unwrap();

        assert_eq!(display.shadow().page(2).unwrap()[3], 0x00);
        assert_eq!(display.bus().ram[0][2][3], 0x00);
    }

    #[test]
    fn test_plot_off_panel_rejected() {
        let mut display = ready_display();
        display.bus_mut_for_test().clear_log();

        assert_eq!(
            display.plot_pixel(200, 0, PlotMode::Set),
            Err(Error::InvalidArgument(InvalidArgument::Coordinate { x: 200, y: 0 }))
        );
        assert_eq!(
            display.plot_pixel(0, 64, PlotMode::Clear),
            Err(Error::InvalidArgument(InvalidArgument::Coordinate { x: 0, y: 64 }))
        );
        assert!(display.shadow().is_blank());
        assert!(display.bus().log.is_empty());
    }

    #[test]
    fn test_plot_addresses_before_data() {
        let mut display = ready_display();
        display.bus_mut_for_test().clear_log();

        display.plot_pixel(64, 63, PlotMode::Set).unwrap();

        assert_eq!(
            display.bus().log,
            [
                Op::Status,
                Op::Command(Side::Right, 0xBF),
                Op::Status,
                Op::Command(Side::Right, 0x40),
                Op::Status,
                Op::Data(Side::Right, 0x80),
            ]
        );
    }

    #[test]
    fn test_axis_points() {
        let points: Vec<_> = axis_points().collect();
        assert_eq!(points.len(), 195);
        assert_eq!(points[0], (64, 0));
        assert_eq!(points[54], (64, 54));
        assert_eq!(points[55], (0, 32));
        assert!(points.contains(&(61, 3)));
        assert!(points.contains(&(124, 35)));
    }

    #[test]
    fn test_draw_axes() {
        let mut display = ready_display();
        display.draw_axes().unwrap();

        let fb = display.shadow();
        assert!(fb.pixel(64, 0));
        assert!(fb.pixel(64, 54));
        assert!(!fb.pixel(64, 55));
        assert!(fb.pixel(0, 32));
        assert!(fb.pixel(126, 32));
        assert!(fb.pixel(127, 32));
        assert!(fb.pixel(67, 3));
        assert!(!fb.pixel(0, 0));

        // (64, 32) is shared by both axes
        let lit: u32 = fb.as_bytes().iter().map(|b| b.count_ones()).sum();
        assert_eq!(lit, 194);
        assert_eq!(fb.as_bytes(), &display.bus().ram_bytes());
    }

    #[test]
    fn test_clear_page() {
        let mut display = ready_display();
        display.select_page(Side::Left, 3).unwrap();
        display.draw_string("RECORDING", Justify::Center).unwrap();
        display.plot_pixel(0, 0, PlotMode::Set).unwrap();

        display.clear_page(3).unwrap();

        assert!(display.shadow().page(3).unwrap().iter().all(|&b| b == 0));
        assert!(display.shadow().pixel(0, 0));
        assert_eq!(display.shadow().as_bytes(), &display.bus().ram_bytes());

        let cursor = display.cursor();
        assert_eq!((cursor.side, cursor.page, cursor.column), (Side::Left, 3, 0));

        assert_eq!(
            display.clear_page(8),
            Err(Error::InvalidArgument(InvalidArgument::Page(8)))
        );
    }

    #[derive(Debug, Clone)]
    enum Step {
        Plot(u8, u8, PlotMode),
        Glyph(u8, Justify),
        Text(String, Justify),
        Space,
        Page(Side, u8),
        Column(Side, u8),
        ClearPage(u8),
    }

    fn side() -> impl Strategy<Value = Side> {
        prop_oneof![Just(Side::Left), Just(Side::Right), Just(Side::Both)]
    }

    fn justify() -> impl Strategy<Value = Justify> {
        (0u8..4).prop_map(|j| Justify::try_from(j).unwrap())
    }

    fn step() -> impl Strategy<Value = Step> {
        let mode = prop_oneof![
            Just(PlotMode::Set),
            Just(PlotMode::Clear),
            Just(PlotMode::ClearColumn)
        ];
        prop_oneof![
            (0u8..128, 0u8..64, mode).prop_map(|(x, y, m)| Step::Plot(x, y, m)),
            (32u8..127, justify()).prop_map(|(c, j)| Step::Glyph(c, j)),
            ("[ -~]{0,21}", justify()).prop_map(|(s, j)| Step::Text(s, j)),
            Just(Step::Space),
            (side(), 0u8..8).prop_map(|(s, p)| Step::Page(s, p)),
            (side(), 0u8..64).prop_map(|(s, c)| Step::Column(s, c)),
            (0u8..8).prop_map(Step::ClearPage),
        ]
    }

    proptest! {
        #[test]
        fn prop_set_then_clear(x in 0u8..128, y in 0u8..64) {
            let mut display = ready_display();

            display.plot_pixel(x, y, PlotMode::Set).unwrap();
            prop_assert!(display.shadow().pixel(x, y));
            prop_assert_eq!(display.bus().ram_byte(x, y / 8), 1 << (y % 8));

            display.plot_pixel(x, y, PlotMode::Clear).unwrap();
            prop_assert!(display.shadow().is_blank());
            prop_assert!(display.bus().ram_is_blank());
        }

        #[test]
        fn prop_shadow_tracks_controller_ram(steps in prop::collection::vec(step(), 1..40)) {
            let mut display = ready_display();

            for step in steps {
                match step {
                    Step::Plot(x, y, mode) => display.plot_pixel(x, y, mode).unwrap(),
                    Step::Glyph(code, justify) => display.draw_glyph(code, justify).unwrap(),
                    Step::Text(text, justify) => display.draw_string(&text, justify).unwrap(),
                    Step::Space => display.advance_spacing().unwrap(),
                    Step::Page(side, page) => display.select_page(side, page).unwrap(),
                    Step::Column(side, column) => display.select_column(side, column).unwrap(),
                    Step::ClearPage(page) => display.clear_page(page).unwrap(),
                }
                prop_assert_eq!(display.shadow().as_bytes(), &display.bus().ram_bytes());
            }
        }
    }
}
