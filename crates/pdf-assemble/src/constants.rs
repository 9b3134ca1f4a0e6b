//! Shared constants for page assembly
//!
//! Defaults for the layout configuration live here so the values used by
//! `LayoutConfig::default()` and the tests stay in one place.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Page Layout
// =============================================================================

/// Margin kept free around each image page (points)
pub const DEFAULT_MARGIN_PT: f32 = 50.0;

/// Font size of the title page text (points)
pub const TITLE_FONT_SIZE: f32 = 30.0;

/// Position of the title baseline, from the bottom-left corner (points)
pub const TITLE_POSITION: (f32, f32) = (100.0, 100.0);

/// Font size of the "Page N" label on image pages (points)
pub const LABEL_FONT_SIZE: f32 = 14.0;

// =============================================================================
// Resource Names
// =============================================================================

/// Resource name of the built-in Helvetica font
pub const FONT_RESOURCE: &str = "F1";

/// Resource name of the embedded image on an image page
pub const IMAGE_RESOURCE: &str = "Im0";

/// PDF version written for assembled documents
pub const PDF_VERSION: &str = "1.7";

/// Suffix inserted before `.pdf` when rotation does not overwrite
pub const ROTATED_SUFFIX: &str = "-rotated";
