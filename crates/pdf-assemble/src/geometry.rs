//! Page geometry for image pages
//!
//! Everything here is pure: given an image's intrinsic size and a page size,
//! decide the page orientation and where the image lands on it. Coordinates
//! follow PDF conventions, origin at the bottom-left corner.

use crate::types::{Point, Rect, Size};

/// Pick the page size for an image.
///
/// Wide images (`orig_width > orig_height`) get the base size with width and
/// height swapped; everything else keeps the base size. Square images stay
/// portrait. `base` is expected in portrait form.
pub fn select_orientation(orig_width: f32, orig_height: f32, base: Size) -> Size {
    if orig_width > orig_height {
        base.swapped()
    } else {
        base
    }
}

/// Scale a box to fit inside `max_width` × `max_height`, preserving aspect ratio.
///
/// Upscaling is allowed: a small image grows until one side touches its bound.
pub fn scale_to_fit(orig_width: f32, orig_height: f32, max_width: f32, max_height: f32) -> Size {
    if orig_width <= 0.0 || orig_height <= 0.0 || max_width <= 0.0 || max_height <= 0.0 {
        return Size::default();
    }

    let scale = (max_width / orig_width).min(max_height / orig_height);
    Size::new(orig_width * scale, orig_height * scale)
}

/// Offset that centers `size` inside `container`.
pub fn center_on(size: Size, container: Size) -> Point {
    Point::new(
        (container.width - size.width) / 2.0,
        (container.height - size.height) / 2.0,
    )
}

/// Where an image of the given intrinsic size is drawn on a page.
///
/// The image is fitted into the page minus `margin` on every side and then
/// centered on the whole page.
pub fn placement_rect(orig_width: f32, orig_height: f32, page: Size, margin: f32) -> Rect {
    let fitted = scale_to_fit(
        orig_width,
        orig_height,
        page.width - 2.0 * margin,
        page.height - 2.0 * margin,
    );
    Rect::from_parts(center_on(fitted, page), fitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Orientation;

    const A4: Size = Size {
        width: 595.28,
        height: 841.89,
    };

    #[test]
    fn test_wide_image_gets_landscape_page() {
        let page = select_orientation(1600.0, 900.0, A4);
        assert_eq!(page.orientation(), Orientation::Landscape);
        assert_eq!(page, Size::new(841.89, 595.28));
    }

    #[test]
    fn test_tall_and_square_images_stay_portrait() {
        assert_eq!(select_orientation(900.0, 1600.0, A4), A4);
        assert_eq!(select_orientation(500.0, 500.0, A4), A4);
    }

    #[test]
    fn test_orientation_does_not_leak_between_calls() {
        let base = A4;
        let landscape = select_orientation(2.0, 1.0, base);
        let portrait = select_orientation(1.0, 2.0, base);
        assert_eq!(landscape.orientation(), Orientation::Landscape);
        assert_eq!(portrait, base);
    }

    #[test]
    fn test_scale_fit_width_limited() {
        // 800x600 into 400x400: width binds, scale 0.5
        let size = scale_to_fit(800.0, 600.0, 400.0, 400.0);
        assert!((size.width - 400.0).abs() < 0.001);
        assert!((size.height - 300.0).abs() < 0.001);
    }

    #[test]
    fn test_scale_fit_height_limited() {
        let size = scale_to_fit(400.0, 800.0, 400.0, 400.0);
        assert!((size.width - 200.0).abs() < 0.001);
        assert!((size.height - 400.0).abs() < 0.001);
    }

    #[test]
    fn test_scale_fit_upscales_small_images() {
        let size = scale_to_fit(10.0, 20.0, 400.0, 400.0);
        assert!((size.height - 400.0).abs() < 0.001);
        assert!((size.width - 200.0).abs() < 0.001);
    }

    #[test]
    fn test_scale_fit_preserves_aspect_ratio() {
        let cases = [
            (1920.0, 1080.0, 495.28, 741.89),
            (37.0, 1013.0, 300.0, 300.0),
            (3000.0, 3000.0, 100.0, 250.0),
            (1.0, 7.0, 1000.0, 10.0),
        ];
        for (w, h, max_w, max_h) in cases {
            let size = scale_to_fit(w, h, max_w, max_h);
            assert!(((size.width / size.height) - (w / h)).abs() < 1e-3);
            assert!(size.width <= max_w + 1e-3);
            assert!(size.height <= max_h + 1e-3);
            // One of the bounds is reached
            assert!((size.width - max_w).abs() < 1e-2 || (size.height - max_h).abs() < 1e-2);
        }
    }

    #[test]
    fn test_scale_fit_degenerate_input() {
        assert_eq!(scale_to_fit(0.0, 100.0, 400.0, 400.0), Size::default());
        assert_eq!(scale_to_fit(100.0, 100.0, -5.0, 400.0), Size::default());
    }

    #[test]
    fn test_center_on() {
        let origin = center_on(Size::new(100.0, 50.0), Size::new(300.0, 250.0));
        assert_eq!(origin, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_placement_is_centered_inside_margins() {
        let page = select_orientation(1200.0, 800.0, A4);
        let rect = placement_rect(1200.0, 800.0, page, 50.0);

        assert!(rect.x >= 50.0 - 1e-3);
        assert!(rect.y >= 50.0 - 1e-3);
        assert!(rect.right() <= page.width - 50.0 + 1e-3);
        assert!(rect.top() <= page.height - 50.0 + 1e-3);

        let left = rect.x;
        let right = page.width - rect.right();
        let bottom = rect.y;
        let top = page.height - rect.top();
        assert!((left - right).abs() < 1e-3);
        assert!((bottom - top).abs() < 1e-3);
    }
}
