//! Color grid handed over by the external image sampler.
//!
//! The engine never rasterizes anything itself. When a bubble breaks,
//! the embedder snapshots the bubble's square region and passes the
//! pixels in as an [`ImageSample`]; the strategy reads colors from it by
//! grid coordinates.

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Components as normalized floats, in RGBA order.
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// A rectangular grid of color samples, row-major.
#[derive(Debug, Clone)]
pub struct ImageSample {
    width: usize,
    height: usize,
    pixels: Vec<Rgba8>,
}

impl ImageSample {
    /// Wrap a row-major pixel grid. The pixel count must match the
    /// dimensions; a mismatch is a caller bug.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgba8>) -> Self {
        assert!(width > 0 && height > 0, "image sample must not be empty");
        assert_eq!(
            pixels.len(),
            width * height,
            "pixel count must match dimensions"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A uniformly colored sample. Handy for tests and flat bubbles.
    pub fn solid(width: usize, height: usize, color: Rgba8) -> Self {
        Self::from_pixels(width, height, vec![color; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Color at (x, y), clamped to the valid bounds. Out-of-range
    /// coordinates are never an error.
    pub fn color_at(&self, x: usize, y: usize) -> Rgba8 {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[y * self.width + x]
    }
}
