//! Document I/O for assembly

use crate::types::AssemblyError;
use lopdf::Document;
use std::io::ErrorKind;
use std::path::Path;

/// Load a PDF document, classifying failures by cause
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document, AssemblyError> {
    let path = path.as_ref().to_owned();
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AssemblyError::Missing { path });
        }
        Err(source) => return Err(AssemblyError::Unreadable { path, source }),
    };

    let loaded = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await?;
    loaded.map_err(|source| AssemblyError::Invalid { path, source })
}

/// Save an assembled document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<(), AssemblyError> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer).map(|_| writer)
    })
    .await?
    .map_err(|e| AssemblyError::Write {
        path: path.clone(),
        message: e.to_string(),
    })?;

    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| AssemblyError::Write {
            path: path.clone(),
            message: e.to_string(),
        })
}
