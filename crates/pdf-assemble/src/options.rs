use crate::constants::{DEFAULT_MARGIN_PT, LABEL_FONT_SIZE, TITLE_FONT_SIZE, TITLE_POSITION};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Page layout parameters shared by every builder.
///
/// Passed explicitly to the builders so callers (and tests) can vary page
/// size or margins without any global state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Base (portrait) page size; image pages turn it landscape as needed
    pub paper_size: PaperSize,
    /// Free space kept around each image, in points
    pub margin_pt: f32,
    /// Title page text size, in points
    pub title_font_size: f32,
    /// Baseline start of the title text
    pub title_position: Point,
    /// "Page N" label size, in points
    pub label_font_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            margin_pt: DEFAULT_MARGIN_PT,
            title_font_size: TITLE_FONT_SIZE,
            title_position: Point::new(TITLE_POSITION.0, TITLE_POSITION.1),
            label_font_size: LABEL_FONT_SIZE,
        }
    }
}

impl LayoutConfig {
    /// Base page size in points
    pub fn page_size(&self) -> Size {
        self.paper_size.size_pt()
    }

    /// Where the page-number label starts, half a margin in from the corner
    pub fn label_position(&self) -> Point {
        Point::new(self.margin_pt / 2.0, self.margin_pt / 2.0)
    }

    /// Load a layout from a JSON file; missing fields keep their defaults
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let config: Self = serde_json::from_slice(&bytes)
            .map_err(|e| AssembleError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save the layout to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AssembleError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the layout
    pub fn validate(&self) -> Result<()> {
        let page = self.page_size();
        if !(page.width > 0.0 && page.height > 0.0) {
            return Err(AssembleError::Config(
                "Page size must be positive".to_string(),
            ));
        }
        if page.width > page.height {
            return Err(AssembleError::Config(
                "Base page size must be portrait (width <= height)".to_string(),
            ));
        }
        if !(self.margin_pt >= 0.0) || 2.0 * self.margin_pt >= page.width {
            return Err(AssembleError::Config(format!(
                "Margin {}pt leaves no room on a {}x{}pt page",
                self.margin_pt, page.width, page.height
            )));
        }
        if !(self.title_font_size > 0.0) || !(self.label_font_size > 0.0) {
            return Err(AssembleError::Config(
                "Font sizes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Options for turning a list of images into a PDF
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImagesOptions {
    /// Text for an optional first page
    pub title: Option<String>,
    /// Clockwise rotation baked into every image before it is placed
    pub rotation: Rotation,
    pub layout: LayoutConfig,
}

/// Options for concatenating PDFs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergeOptions {
    /// Text for an optional first page
    pub title: Option<String>,
    pub layout: LayoutConfig,
}

/// Options for setting the page rotation of existing PDFs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateOptions {
    /// Absolute `/Rotate` value written to every page
    pub rotation: Rotation,
    /// Write back to the source file instead of `<name>-rotated.pdf`
    pub overwrite: bool,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self {
            rotation: Rotation::Clockwise180,
            overwrite: false,
        }
    }
}
