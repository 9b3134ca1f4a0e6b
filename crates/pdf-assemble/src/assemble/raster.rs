//! Image pages: one decoded image per page, centered inside the margins

use super::io::run_blocking;
use crate::constants::IMAGE_RESOURCE;
use crate::document::{OutputDocument, text_ops};
use crate::embed::{EmbeddedImage, ImageAsset, ImageKind};
use crate::geometry::{placement_rect, select_orientation};
use crate::options::LayoutConfig;
use crate::types::*;
use lopdf::{Dictionary, Object};
use std::path::Path;

/// Add a page showing the image at `path`.
///
/// Paths without a `.png`, `.jpg` or `.jpeg` extension are skipped with a
/// warning and `Ok(false)` is returned; they do not consume a page number.
/// Read or decode failures are errors.
pub async fn add_image_page(
    output: &mut OutputDocument,
    path: impl AsRef<Path>,
    page_number: usize,
    rotation: Rotation,
    config: &LayoutConfig,
) -> Result<bool> {
    let path = path.as_ref();
    let Some(kind) = ImageKind::from_path(path) else {
        log::warn!("Image {} is neither PNG nor JPG, skipping", path.display());
        return Ok(false);
    };

    let bytes = tokio::fs::read(path).await?;
    if !rotation.is_none() {
        log::debug!("Rotating {} by {} degrees", path.display(), rotation.degrees());
    }
    let (image_size, embedded) = run_blocking(move || {
        let asset = ImageAsset::decode(bytes, kind, rotation)?;
        let embedded = asset.to_xobjects()?;
        Ok((asset.size(), embedded))
    })
    .await?;

    let page_size = place_image(output, image_size, embedded, page_number, config)?;
    log::debug!(
        "Page {} : {}x{} from {}",
        page_number,
        page_size.width,
        page_size.height,
        path.display()
    );
    Ok(true)
}

/// Create the page for an already embedded image and return its size
fn place_image(
    output: &mut OutputDocument,
    image_size: Size,
    embedded: EmbeddedImage,
    page_number: usize,
    config: &LayoutConfig,
) -> Result<Size> {
    let page_size = select_orientation(image_size.width, image_size.height, config.page_size());
    let rect = placement_rect(
        image_size.width,
        image_size.height,
        page_size,
        config.margin_pt,
    );

    log::debug!(
        "Image original {}x{}, scaled {}x{}",
        image_size.width,
        image_size.height,
        rect.width,
        rect.height
    );

    let doc = output.inner_mut();
    let mut image_stream = embedded.image;
    if let Some(mask) = embedded.soft_mask {
        let mask_id = doc.add_object(mask);
        image_stream.dict.set("SMask", Object::Reference(mask_id));
    }
    let image_id = doc.add_object(image_stream);

    let mut xobjects = Dictionary::new();
    xobjects.set(IMAGE_RESOURCE, Object::Reference(image_id));

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));
    resources.set("Font", Object::Dictionary(output.font_resources()));

    let label = config.label_position();
    let mut content = format!(
        "q {} 0 0 {} {} {} cm /{} Do Q\n",
        rect.width, rect.height, rect.x, rect.y, IMAGE_RESOURCE
    );
    content.push_str(&text_ops(
        &format!("Page {}", page_number),
        label.x,
        label.y,
        config.label_font_size,
    )?);

    output.add_page(page_size, content, resources, None);
    Ok(page_size)
}
