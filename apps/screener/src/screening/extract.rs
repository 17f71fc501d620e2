//! Plain-text extraction from uploaded resume files.

use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format '{0}'. Only PDF, DOCX, TXT and MD are supported.")]
    UnsupportedFormat(String),

    #[error("PDF extraction error: {0}")]
    Pdf(String),

    #[error("DOCX extraction error: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    /// Picks the document kind from the file name's extension, ignoring case.
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" | "md" => Ok(Self::PlainText),
            _ => Err(ExtractError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

/// Extracts plain text from an uploaded file's bytes.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    tracing::debug!("Extracting text from {file_name} ({} bytes)", bytes.len());

    match DocumentKind::from_file_name(file_name)? {
        DocumentKind::Pdf => extract_pdf(bytes),
        DocumentKind::Docx => extract_docx(bytes),
        DocumentKind::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// pdf-extract panics on some malformed fonts; a panic is reported as a
/// failure of this one file.
fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes))
        .map_err(|_| ExtractError::Pdf("parser panicked on malformed input".to_string()))?
        .map_err(|e| ExtractError::Pdf(e.to_string()))
}

/// Body paragraphs joined by newlines. Tables and headers are skipped.
fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(
                paragraph
                    .children
                    .iter()
                    .filter_map(|p_child| match p_child {
                        ParagraphChild::Run(run) => Some(run_text(&run.children)),
                        _ => None,
                    })
                    .collect::<String>(),
            ),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn run_text(children: &[RunChild]) -> String {
    children
        .iter()
        .filter_map(|child| match child {
            RunChild::Text(text) => Some(text.text.as_str()),
            RunChild::Tab(_) => Some("\t"),
            _ => None,
        })
        .collect()
}
