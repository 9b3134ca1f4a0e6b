//! Document I/O and blocking-task plumbing

use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Run CPU-bound work on the blocking pool.
///
/// A panic inside `f` comes back as `AssembleError::Rejected` carrying the
/// panic message, so callers only ever see typed errors.
pub async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(err) if err.is_panic() => Err(AssembleError::from_panic(err.into_panic())),
        Err(err) => Err(AssembleError::TaskJoin(err)),
    }
}

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    run_blocking(move || Ok(Document::load_mem(&bytes)?)).await
}

/// Serialize a document and write it with a single call.
///
/// The file is not touched unless serialization succeeded.
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = run_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok(writer)
    })
    .await?;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}
