//! SH1106 OLED Display Driver
//!
//! Driver for 128x64 SH1106-based OLED displays via I2C. Text is drawn
//! into a local frame buffer with an `embedded-graphics` 5x8 mono font
//! in 6x8 cells (21 chars x 8 rows); [`Sh1106::flush`] pushes the buffer out.

use core::convert::Infallible;
use core::fmt;

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use quizbuzz_core::traits::TextDisplay;

/// SH1106 I2C address (typically 0x3C or 0x3D)
pub const SH1106_ADDR: u8 = 0x3C;

/// Display dimensions
const WIDTH: usize = 128;
const HEIGHT: usize = 64;
const PAGES: usize = HEIGHT / 8;

/// Character cell size
const CELL_WIDTH: usize = 6;
const CELL_HEIGHT: usize = 8;

/// Text grid size
pub const COLUMNS: u8 = (WIDTH / CELL_WIDTH) as u8;
pub const ROWS: u8 = (HEIGHT / CELL_HEIGHT) as u8;

/// The SH1106 has 132 columns of RAM; a 128-pixel panel starts at column 2
const COLUMN_OFFSET: u8 = 2;

/// SH1106 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Control byte announcing a command
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte announcing display data
const CONTROL_DATA: u8 = 0x40;

/// Power-up sequence
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14,
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SH1106 OLED driver
pub struct Sh1106<I2C> {
    i2c: I2C,
    /// Frame buffer (1 bit per pixel, organized as pages)
    buffer: [[u8; WIDTH]; PAGES],
    /// Text cursor as (row, col)
    cursor: (u8, u8),
}

impl<I2C> Sh1106<I2C> {
    /// Create a new driver with a blank frame buffer
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            buffer: [[0; WIDTH]; PAGES],
            cursor: (0, 0),
        }
    }

    /// Draw text at a character cell, without moving the cursor
    ///
    /// Each character replaces the whole cell it lands in. Text running
    /// past the right edge is cut off.
    pub fn draw_text(&mut self, row: u8, col: u8, text: &str) {
        if row >= ROWS || col >= COLUMNS {
            return;
        }

        let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);
        let y = usize::from(row) * CELL_HEIGHT;
        let room = usize::from(COLUMNS - col);

        for (i, ch) in text.chars().take(room).enumerate() {
            let x = (usize::from(col) + i) * CELL_WIDTH;
            // A cell is exactly one page tall
            self.buffer[usize::from(row)][x..x + CELL_WIDTH].fill(0);

            let mut utf8 = [0u8; 4];
            let glyph = ch.encode_utf8(&mut utf8);
            // Infallible target
            let _ = Text::with_baseline(glyph, Point::new(x as i32, y as i32), style, Baseline::Top)
                .draw(self);
        }
    }

    /// Check a frame buffer pixel
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < WIDTH && y < HEIGHT && self.buffer[y / 8][x] & (1 << (y % 8)) != 0
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 || x as usize >= WIDTH || y as usize >= HEIGHT {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let bit = 1 << (y % 8);
        if on {
            self.buffer[y / 8][x] |= bit;
        } else {
            self.buffer[y / 8][x] &= !bit;
        }
    }
}

impl<I2C> Sh1106<I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    /// Initialize the display
    pub async fn init(&mut self) -> Result<(), I2C::Error> {
        for &c in INIT_SEQUENCE {
            self.command(c).await?;
        }
        Ok(())
    }

    /// Send a command to the display
    async fn command(&mut self, cmd: u8) -> Result<(), I2C::Error> {
        self.i2c.write(SH1106_ADDR, &[CONTROL_COMMAND, cmd]).await
    }

    /// Flush the frame buffer to the display
    pub async fn flush(&mut self) -> Result<(), I2C::Error> {
        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8).await?;
            self.command(cmd::SET_LOW_COLUMN | (COLUMN_OFFSET & 0x0F)).await?;
            self.command(cmd::SET_HIGH_COLUMN | (COLUMN_OFFSET >> 4)).await?;

            let mut data = [0u8; WIDTH + 1];
            data[0] = CONTROL_DATA;
            data[1..].copy_from_slice(&self.buffer[page]);
            self.i2c.write(SH1106_ADDR, &data).await?;
        }
        Ok(())
    }
}

impl<I2C> OriginDimensions for Sh1106<I2C> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl<I2C> DrawTarget for Sh1106<I2C> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

impl<I2C> fmt::Write for Sh1106<I2C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let (row, col) = self.cursor;
        self.draw_text(row, col, s);
        let advanced = usize::from(col) + s.chars().count();
        self.cursor.1 = advanced.min(usize::from(COLUMNS)) as u8;
        Ok(())
    }
}

impl<I2C> TextDisplay for Sh1106<I2C> {
    fn locate(&mut self, row: u8, col: u8) {
        self.cursor = (row.min(ROWS - 1), col.min(COLUMNS));
    }

    fn clear(&mut self) {
        for page in self.buffer.iter_mut() {
            page.fill(0);
        }
        self.cursor = (0, 0);
    }

    fn dimensions(&self) -> (u8, u8) {
        (COLUMNS, ROWS)
    }
}
