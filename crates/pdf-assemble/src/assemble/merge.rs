//! Page transfer from source PDFs into the output document

use crate::document::OutputDocument;
use crate::types::*;
use lopdf::{Document, Object, ObjectId};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// Structural objects of the source that are replaced by the output's own
const SKIPPED_TYPES: [&[u8]; 4] = [b"Catalog", b"Pages", b"Outlines", b"Outline"];

/// Guard against malformed, cyclic `/Parent` chains
const MAX_TREE_DEPTH: usize = 64;

/// Append every page of `source`, in its own order, to `output`.
///
/// Pages keep their content, resources and rotation; attributes they only
/// inherited from the source page tree are copied onto the page first.
/// Returns the number of pages appended.
pub fn append_document(output: &mut OutputDocument, mut source: Document) -> Result<usize> {
    let start_id = output.inner().max_id + 1;
    source.renumber_objects_with(start_id);

    let page_ids: Vec<ObjectId> = source.get_pages().into_values().collect();

    for &page_id in &page_ids {
        let inherited = collect_inherited(&source, page_id)?;
        let page_dict = source.get_object_mut(page_id)?.as_dict_mut()?;
        for (key, value) in inherited {
            page_dict.set(key, value);
        }
    }

    let pages_id = output.pages_id();
    let doc = output.inner_mut();
    for (id, object) in source.objects {
        if is_structural(&object) {
            continue;
        }
        doc.objects.insert(id, object);
    }
    doc.max_id = doc.max_id.max(source.max_id);

    for &page_id in &page_ids {
        let page_dict = doc.get_object_mut(page_id)?.as_dict_mut()?;
        page_dict.set("Parent", Object::Reference(pages_id));
    }
    for &page_id in &page_ids {
        output.push_page(page_id, None);
    }

    Ok(page_ids.len())
}

/// Inheritable attributes missing on the page but set on an ancestor
fn collect_inherited(doc: &Document, page_id: ObjectId) -> Result<Vec<(&'static [u8], Object)>> {
    let page_dict = doc.get_dictionary(page_id)?;
    let mut found = Vec::new();

    for key in INHERITABLE_KEYS {
        if page_dict.has(key) {
            continue;
        }
        if let Some(value) = resolve_inherited(doc, page_id, key)? {
            found.push((key, value.clone()));
        }
    }
    Ok(found)
}

/// Look up `key` on the ancestors of `page_id`, nearest first
fn resolve_inherited<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut current = doc.get_dictionary(page_id)?;
    for _ in 0..MAX_TREE_DEPTH {
        let parent_id = match current.get(b"Parent").and_then(Object::as_reference) {
            Ok(id) => id,
            Err(_) => return Ok(None),
        };
        current = doc.get_dictionary(parent_id)?;
        if let Ok(value) = current.get(key) {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn is_structural(object: &Object) -> bool {
    let Object::Dictionary(dict) = object else {
        return false;
    };
    dict.get(b"Type")
        .and_then(Object::as_name)
        .map(|name| SKIPPED_TYPES.iter().any(|skipped| *skipped == name))
        .unwrap_or(false)
}
