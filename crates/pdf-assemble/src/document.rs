//! The in-progress output document
//!
//! Pages are collected as an ordered list of references; the `Pages` node and
//! the catalog are only written when the document is finished.

use crate::constants::{FONT_RESOURCE, PDF_VERSION};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// An output PDF under construction.
pub struct OutputDocument {
    doc: Document,
    pages_id: ObjectId,
    kids: Vec<ObjectId>,
    font_id: Option<ObjectId>,
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputDocument {
    pub fn new() -> Self {
        let mut doc = Document::with_version(PDF_VERSION);
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            kids: Vec::new(),
            font_id: None,
        }
    }

    /// Number of pages added so far
    pub fn page_count(&self) -> usize {
        self.kids.len()
    }

    /// Object ID reserved for the page tree root
    pub fn pages_id(&self) -> ObjectId {
        self.pages_id
    }

    /// Page object IDs in output order
    pub fn page_ids(&self) -> &[ObjectId] {
        &self.kids
    }

    pub(crate) fn inner(&self) -> &Document {
        &self.doc
    }

    pub(crate) fn inner_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Shared Helvetica font object, created on first use
    pub(crate) fn helvetica(&mut self) -> ObjectId {
        if let Some(id) = self.font_id {
            return id;
        }

        let mut font_dict = Dictionary::new();
        font_dict.set("Type", Object::Name(b"Font".to_vec()));
        font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        font_dict.set("BaseFont", Object::Name(b"Helvetica".to_vec()));
        font_dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        let id = self.doc.add_object(font_dict);
        self.font_id = Some(id);
        id
    }

    /// Font resources dictionary naming Helvetica as `/F1`
    pub(crate) fn font_resources(&mut self) -> Dictionary {
        let font_id = self.helvetica();
        let mut fonts = Dictionary::new();
        fonts.set(FONT_RESOURCE, Object::Reference(font_id));
        fonts
    }

    /// Create a page of the given size with a content stream and resources.
    ///
    /// `index` of `None` appends; `Some(i)` inserts before the current page `i`.
    pub(crate) fn add_page(
        &mut self,
        size: Size,
        content: String,
        resources: Dictionary,
        index: Option<usize>,
    ) -> ObjectId {
        let content_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(size.width),
                Object::Real(size.height),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.doc.add_object(page_dict);
        self.push_page(page_id, index);
        page_id
    }

    /// Register an existing page object (already inside this document)
    pub(crate) fn push_page(&mut self, page_id: ObjectId, index: Option<usize>) {
        match index {
            Some(i) if i < self.kids.len() => self.kids.insert(i, page_id),
            _ => self.kids.push(page_id),
        }
    }

    /// Write the page tree and catalog and hand back the finished document
    pub fn finish(self) -> Document {
        let OutputDocument {
            mut doc,
            pages_id,
            kids,
            ..
        } = self;

        let count = kids.len() as i64;
        let page_refs: Vec<Object> = kids.into_iter().map(Object::Reference).collect();
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        doc.trailer.set("Root", catalog_id);

        doc
    }
}

/// WinAnsi codes 0x80..=0x9F whose characters lie outside Latin-1
const WIN_ANSI_HIGH: [(char, u8); 27] = [
    ('\u{20ac}', 0x80),
    ('\u{201a}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201e}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02c6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8a),
    ('\u{2039}', 0x8b),
    ('\u{0152}', 0x8c),
    ('\u{017d}', 0x8e),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201c}', 0x93),
    ('\u{201d}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02dc}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9a),
    ('\u{203a}', 0x9b),
    ('\u{0153}', 0x9c),
    ('\u{017e}', 0x9e),
    ('\u{0178}', 0x9f),
];

fn win_ansi_code(ch: char) -> Option<u8> {
    match ch {
        ' '..='~' | '\u{a0}'..='\u{ff}' => Some(ch as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .find(|(unicode, _)| *unicode == ch)
            .map(|&(_, code)| code),
    }
}

/// Encode text as a PDF literal string for a WinAnsi-encoded font.
///
/// Delimiters are escaped and bytes above ASCII are written in octal.
/// A character WinAnsi has no code for is an error.
pub(crate) fn pdf_text_literal(text: &str) -> Result<String> {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('(');
    for ch in text.chars() {
        let code = win_ansi_code(ch).ok_or_else(|| {
            AssembleError::Rejected(format!(
                "WinAnsi cannot encode \"{}\" (0x{:04x})",
                ch, ch as u32
            ))
        })?;
        match code {
            b'(' | b')' | b'\\' => {
                out.push('\\');
                out.push(ch);
            }
            0x20..=0x7e => out.push(ch),
            _ => out.push_str(&format!("\\{:03o}", code)),
        }
    }
    out.push(')');
    Ok(out)
}

/// Text drawing operators for a single line
pub(crate) fn text_ops(text: &str, x: f32, y: f32, font_size: f32) -> Result<String> {
    Ok(format!(
        "BT /{} {} Tf {} {} Td {} Tj ET\n",
        FONT_RESOURCE,
        font_size,
        x,
        y,
        pdf_text_literal(text)?
    ))
}
