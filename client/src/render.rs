use common::{GridSize, PixelSize, PLAYER_SLOTS, RESOLUTION, VIEWPORT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
}

/// Colour of each player slot, by index in the snapshot's player list.
pub const PLAYER_COLORS: [Rgb; PLAYER_SLOTS] = [Rgb::RED, Rgb::BLUE];

/// Colour used to outline every painted cell.
pub const OUTLINE_COLOR: Rgb = Rgb::WHITE;

/// Colour hosts show for unpainted pixels.
pub const BACKGROUND_COLOR: Rgb = Rgb::BLACK;

/// A rectangle in surface pixels. Edges may fall between pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Something a [`Renderer`] can paint on.
pub trait Surface {
    /// Erase the whole surface back to the background.
    fn clear(&mut self);

    /// Paint a filled rectangle with a one pixel outline.
    fn fill_rect(&mut self, rect: PixelRect, fill: Rgb, outline: Rgb);
}

/// Maps logical grid cells onto a fixed pixel surface.
pub struct Renderer<S: Surface> {
    surface: S,
    resolution: GridSize,
    viewport: PixelSize,
    cell_width: f64,
    cell_height: f64,
}

impl<S: Surface> Renderer<S> {
    pub fn new(surface: S) -> Self {
        Self::with_geometry(surface, RESOLUTION, VIEWPORT)
    }

    pub fn with_geometry(surface: S, resolution: GridSize, viewport: PixelSize) -> Self {
        Self {
            surface,
            resolution,
            viewport,
            cell_width: viewport.width as f64 / resolution.width as f64,
            cell_height: viewport.height as f64 / resolution.height as f64,
        }
    }

    /// Pixel rectangle covered by grid cell `(x, y)`.
    ///
    /// Width and height are swapped: the rectangle is `cell_height` wide and
    /// `cell_width` tall. Only observable with non-square cells.
    pub fn cell_rect(&self, x: i32, y: i32) -> PixelRect {
        PixelRect {
            x: x as f64 * self.cell_width,
            y: y as f64 * self.cell_height,
            width: self.cell_height,
            height: self.cell_width,
        }
    }

    pub fn draw_point(&mut self, x: i32, y: i32, color: Rgb) {
        let rect = self.cell_rect(x, y);
        self.surface.fill_rect(rect, color, OUTLINE_COLOR);
    }

    pub fn clear(&mut self) {
        self.surface.clear();
    }

    pub fn cell_size(&self) -> (f64, f64) {
        (self.cell_width, self.cell_height)
    }

    pub fn resolution(&self) -> GridSize {
        self.resolution
    }

    pub fn viewport(&self) -> PixelSize {
        self.viewport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
