pub mod assemble;
pub mod constants;
mod document;
mod embed;
pub mod geometry;
mod options;
mod types;

pub use assemble::{
    AssemblySummary, add_image_page, add_title_page, append_document, images_to_pdf, load_pdf,
    merge_pdfs, rotate_document, rotate_pdfs, rotated_path, run_blocking, save_pdf,
};
pub use document::OutputDocument;
pub use embed::{ImageAsset, ImageKind};
pub use options::*;
pub use types::*;
