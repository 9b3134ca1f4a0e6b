//! Optional title page

use crate::document::{OutputDocument, text_ops};
use crate::options::LayoutConfig;
use crate::types::*;
use lopdf::{Dictionary, Object};

/// Put a page carrying `title` in front of all other pages.
///
/// Blank or missing titles add nothing. Returns whether a page was added.
/// A title the built-in font cannot encode is an error and adds no page.
pub fn add_title_page(
    output: &mut OutputDocument,
    title: Option<&str>,
    config: &LayoutConfig,
) -> Result<bool> {
    let title = match title.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Ok(false),
    };

    let position = config.title_position;
    let content = text_ops(title, position.x, position.y, config.title_font_size)?;

    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(output.font_resources()));

    output.add_page(config.page_size(), content, resources, Some(0));
    log::debug!("Added title page \"{}\"", title);
    Ok(true)
}
