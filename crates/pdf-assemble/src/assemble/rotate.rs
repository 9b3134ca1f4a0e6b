//! Page rotation of existing PDFs

use crate::constants::ROTATED_SUFFIX;
use crate::types::*;
use lopdf::{Document, Object, ObjectId};
use std::path::{Path, PathBuf};

/// Set `/Rotate` on every page to `rotation`.
///
/// The value is absolute: whatever the page had before, own or inherited,
/// is replaced rather than added to. Returns the number of pages touched.
pub fn rotate_document(doc: &mut Document, rotation: Rotation) -> Result<usize> {
    let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    let degrees = i64::from(rotation.degrees());

    for &page_id in &page_ids {
        let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
        page_dict.set("Rotate", Object::Integer(degrees));
    }

    Ok(page_ids.len())
}

/// Sibling path used when rotating without overwriting: `a/b.pdf` → `a/b-rotated.pdf`
pub fn rotated_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{}{}.pdf", stem, ROTATED_SUFFIX))
}
