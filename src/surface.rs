//! The drawing surface the engine paints on and loads images through.
//!
//! In the browser this is a `<canvas>` with a 2D context (see
//! `wasm::canvas`). [`HeadlessSurface`] records draw calls instead and is
//! what the engine runs on outside a page.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{EngineError, Result};

/// Handle of an image loaded through a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageState {
    Loading,
    Ready { width: f64, height: f64 },
    Failed,
}

impl ImageState {
    /// Size used for layout. Images that are not ready measure 0x0.
    pub fn size(&self) -> (f64, f64) {
        match *self {
            ImageState::Ready { width, height } => (width, height),
            ImageState::Loading | ImageState::Failed => (0.0, 0.0),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ImageState::Ready { .. })
    }
}

pub trait Surface {
    /// Canvas size in pixels.
    fn size(&self) -> (f64, f64);

    /// Offset of the canvas within the page; subtracted from pointer
    /// coordinates.
    fn page_offset(&self) -> (f64, f64);

    fn fill_rect(&mut self, color: &str, x: f64, y: f64, width: f64, height: f64);

    fn draw_image(&mut self, image: ImageId, x: f64, y: f64, width: f64, height: f64)
        -> Result<()>;

    /// Start loading `src`. The returned state is `Ready` only when the image
    /// is already decoded; otherwise completion is reported later through
    /// `Game::image_loaded` / `Game::image_failed`.
    fn load_image(&mut self, src: &str) -> (ImageId, ImageState);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        color: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Image {
        image: ImageId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// Surface without a display: records every draw call.
///
/// Images listed with [`HeadlessSurface::with_cached_image`] load
/// synchronously; everything else stays `Loading` until the caller reports
/// completion to the game. Images added with
/// [`HeadlessSurface::with_broken_image`] load but refuse to draw.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    width: f64,
    height: f64,
    offset: (f64, f64),
    cache: HashMap<String, (f64, f64)>,
    broken: HashSet<String>,
    sources: Vec<String>,
    ops: Vec<DrawOp>,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        HeadlessSurface {
            width: f64::from(width),
            height: f64::from(height),
            ..HeadlessSurface::default()
        }
    }

    pub fn with_page_offset(mut self, left: f64, top: f64) -> Self {
        self.offset = (left, top);
        self
    }

    pub fn with_cached_image(mut self, src: &str, width: f64, height: f64) -> Self {
        self.cache.insert(src.to_string(), (width, height));
        self
    }

    pub fn with_broken_image(mut self, src: &str, width: f64, height: f64) -> Self {
        self.broken.insert(src.to_string());
        self.with_cached_image(src, width, height)
    }

    /// Source URL of a previously loaded image.
    pub fn source(&self, image: ImageId) -> Option<&str> {
        self.sources.get(image.0 as usize).map(String::as_str)
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn page_offset(&self) -> (f64, f64) {
        self.offset
    }

    fn fill_rect(&mut self, color: &str, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::FillRect {
            color: color.to_string(),
            x,
            y,
            width,
            height,
        });
    }

    fn draw_image(
        &mut self,
        image: ImageId,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        if let Some(src) = self.source(image).filter(|src| self.broken.contains(*src)) {
            return Err(EngineError::Surface(format!("cannot draw {src}")));
        }
        self.ops.push(DrawOp::Image {
            image,
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn load_image(&mut self, src: &str) -> (ImageId, ImageState) {
        let id = ImageId(self.sources.len() as u32);
        self.sources.push(src.to_string());
        let state = match self.cache.get(src) {
            Some(&(width, height)) => ImageState::Ready { width, height },
            None => ImageState::Loading,
        };
        (id, state)
    }
}
