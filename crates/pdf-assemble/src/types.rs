use std::any::Any;

use thiserror::Error;

use crate::constants::mm_to_pt;

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Invalid rotation {0}: expected one of 0, 90, 180, 270")]
    InvalidRotation(i64),
    /// A failure reported by an underlying library as a bare message
    /// rather than an error value (including panics in blocking tasks).
    #[error("{0}")]
    Rejected(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl AssembleError {
    /// Turn a panic payload into a `Rejected` error carrying its message.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(message) => (*message).to_string(),
                Err(_) => "blocking task panicked".to_string(),
            },
        };
        AssembleError::Rejected(message)
    }
}

impl From<String> for AssembleError {
    fn from(message: String) -> Self {
        AssembleError::Rejected(message)
    }
}

impl From<&str> for AssembleError {
    fn from(message: &str) -> Self {
        AssembleError::Rejected(message.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AssembleError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height >= width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Base dimensions in points
    pub fn size_pt(self) -> Size {
        let (w, h) = self.dimensions_mm();
        Size::new(mm_to_pt(w), mm_to_pt(h))
    }
}

/// Clockwise rotation, used both for pixel data and for the page `/Rotate` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    pub fn is_none(self) -> bool {
        self == Rotation::None
    }
}

impl TryFrom<i64> for Rotation {
    type Error = AssembleError;

    fn try_from(degrees: i64) -> Result<Self> {
        match degrees {
            0 => Ok(Rotation::None),
            90 => Ok(Rotation::Clockwise90),
            180 => Ok(Rotation::Clockwise180),
            270 => Ok(Rotation::Clockwise270),
            other => Err(AssembleError::InvalidRotation(other)),
        }
    }
}

/// Width and height in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn orientation(self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// The same size with width and height exchanged
    pub fn swapped(self) -> Self {
        Self::new(self.height, self.width)
    }
}

/// A position in page coordinates (origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in PDF coordinates (origin bottom-left)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge X coordinate
    pub x: f32,
    /// Bottom edge Y coordinate
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Right edge X coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge Y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}
