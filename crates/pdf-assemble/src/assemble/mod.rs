//! PDF assembly - building output documents from images and PDFs
//!
//! Three flows, each strictly sequential so page order follows input order:
//! 1. Images: optional title page, then one page per image
//! 2. Merge: optional title page, then every page of every source PDF
//! 3. Rotate: set the page rotation of each PDF and write it back

mod io;
mod merge;
mod raster;
mod rotate;
mod title;

pub use io::{load_pdf, run_blocking, save_pdf};
pub use merge::append_document;
pub use raster::add_image_page;
pub use rotate::{rotate_document, rotated_path};
pub use title::add_title_page;

use crate::document::OutputDocument;
use crate::options::{ImagesOptions, MergeOptions, RotateOptions};
use crate::types::*;
use std::path::{Path, PathBuf};

/// What an assembly run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssemblySummary {
    /// Content pages written (title page not included)
    pub pages: usize,
    /// Inputs skipped because of an unsupported extension
    pub skipped: usize,
    /// Whether a title page was prepended
    pub title_page: bool,
}

/// Build a PDF with one page per image and write it to `output_path`.
///
/// Images are placed in the order given. Unsupported files are skipped; any
/// other failure aborts before the output file is written.
pub async fn images_to_pdf(
    images: &[impl AsRef<Path>],
    output_path: impl AsRef<Path>,
    options: &ImagesOptions,
) -> Result<AssemblySummary> {
    options.layout.validate()?;

    let mut output = OutputDocument::new();
    let title_page = add_title_page(&mut output, options.title.as_deref(), &options.layout)?;

    let mut summary = AssemblySummary {
        title_page,
        ..Default::default()
    };
    let mut page_number = if title_page { 2 } else { 1 };

    for image in images {
        if add_image_page(
            &mut output,
            image,
            page_number,
            options.rotation,
            &options.layout,
        )
        .await?
        {
            page_number += 1;
            summary.pages += 1;
        } else {
            summary.skipped += 1;
        }
    }

    save_pdf(output.finish(), output_path.as_ref()).await?;
    log::info!(
        "Wrote {} image pages to {}",
        summary.pages,
        output_path.as_ref().display()
    );
    Ok(summary)
}

/// Concatenate PDFs, in the order given, into one document at `output_path`.
pub async fn merge_pdfs(
    pdfs: &[impl AsRef<Path>],
    output_path: impl AsRef<Path>,
    options: &MergeOptions,
) -> Result<AssemblySummary> {
    options.layout.validate()?;

    let mut output = OutputDocument::new();
    let title_page = add_title_page(&mut output, options.title.as_deref(), &options.layout)?;

    let mut summary = AssemblySummary {
        title_page,
        ..Default::default()
    };

    for pdf in pdfs {
        let source = load_pdf(pdf).await?;
        let added = append_document(&mut output, source)?;
        log::debug!("Copied {} pages from {}", added, pdf.as_ref().display());
        summary.pages += added;
    }

    save_pdf(output.finish(), output_path.as_ref()).await?;
    log::info!(
        "Merged {} pages into {}",
        summary.pages,
        output_path.as_ref().display()
    );
    Ok(summary)
}

/// Rotate every page of each PDF and return the paths written.
///
/// Files are processed one by one; the first failure stops the run.
pub async fn rotate_pdfs(
    pdfs: &[impl AsRef<Path>],
    options: &RotateOptions,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(pdfs.len());

    for pdf in pdfs {
        let source_path = pdf.as_ref();
        let mut doc = load_pdf(source_path).await?;
        let pages = rotate_document(&mut doc, options.rotation)?;

        let target = if options.overwrite {
            source_path.to_path_buf()
        } else {
            rotated_path(source_path)
        };
        save_pdf(doc, &target).await?;

        log::debug!(
            "Rotated {} pages to {} degrees: {}",
            pages,
            options.rotation.degrees(),
            target.display()
        );
        written.push(target);
    }

    Ok(written)
}
