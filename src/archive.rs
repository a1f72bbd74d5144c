//! In-memory access to the parts of a .pptx container.
//!
//! A .pptx file is a ZIP archive of named parts (slide XML, media, content
//! types). This module decodes it into an addressable set of parts, lets the
//! template engine read and rewrite them, and serializes the final state back
//! into a single archive. Part order follows the central directory of the
//! input so untouched parts round-trip in place.

use std::io::{Cursor, Read, Write};

use regex::Regex;
use thiserror::Error;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Errors raised while decoding, reading, or re-encoding a container.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("not a valid .pptx archive: {0}")]
    Malformed(#[source] zip::result::ZipError),
    #[error("archive part not found: {path}")]
    PartNotFound { path: String },
    #[error("part {path} is not valid UTF-8 text")]
    Encoding { path: String },
    #[error("failed to read part {path}: {source}")]
    PartIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize archive: {0}")]
    Serialize(#[source] zip::result::ZipError),
}

/// One named entry of the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub path: String,
    pub data: Vec<u8>,
}

/// Decoded .pptx container. Exclusively owned by one processing request.
#[derive(Debug)]
pub struct PptxArchive {
    parts: Vec<Part>,
}

impl PptxArchive {
    /// Decode a zip-format byte buffer into its parts.
    ///
    /// The input is copied, never mutated in place. Directory entries carry
    /// no content and are dropped.
    pub fn open(bytes: &[u8]) -> Result<Self, ArchiveError> {
        let cursor = Cursor::new(bytes.to_vec());
        let mut zip = ZipArchive::new(cursor).map_err(ArchiveError::Malformed)?;

        // by_index preserves central-directory order; file_names() does not.
        let mut parts = Vec::with_capacity(zip.len());
        for index in 0..zip.len() {
            let mut entry = zip.by_index(index).map_err(ArchiveError::Malformed)?;
            if entry.is_dir() {
                continue;
            }
            let path = entry.name().to_string();
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry
                .read_to_end(&mut data)
                .map_err(|source| ArchiveError::PartIo {
                    path: path.clone(),
                    source,
                })?;
            parts.push(Part { path, data });
        }

        Ok(Self { parts })
    }

    /// Build an archive directly from parts, bypassing zip decoding.
    ///
    /// Lets the template engine be exercised against hand-built part sets
    /// without real compression.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.parts.iter().any(|part| part.path == path)
    }

    /// Part paths in stored order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|part| part.path.as_str())
    }

    /// Paths matching `pattern`, in stored order.
    pub fn matching_paths(&self, pattern: &Regex) -> Vec<String> {
        self.parts
            .iter()
            .filter(|part| pattern.is_match(&part.path))
            .map(|part| part.path.clone())
            .collect()
    }

    /// Raw content of a part.
    pub fn read_binary(&self, path: &str) -> Result<&[u8], ArchiveError> {
        self.parts
            .iter()
            .find(|part| part.path == path)
            .map(|part| part.data.as_slice())
            .ok_or_else(|| ArchiveError::PartNotFound {
                path: path.to_string(),
            })
    }

    /// Decoded textual content of a part. A part that is not valid UTF-8 is
    /// an error for the whole request, never a best-effort decode.
    pub fn read_text(&self, path: &str) -> Result<String, ArchiveError> {
        let data = self.read_binary(path)?;
        String::from_utf8(data.to_vec()).map_err(|_| ArchiveError::Encoding {
            path: path.to_string(),
        })
    }

    /// Replace the named part's content, or append a new part when the path
    /// is absent. The only mutation this type supports.
    pub fn write_part(&mut self, path: &str, data: Vec<u8>) {
        match self.parts.iter_mut().find(|part| part.path == path) {
            Some(part) => part.data = data,
            None => self.parts.push(Part {
                path: path.to_string(),
                data,
            }),
        }
    }

    /// Compress every part back into a single archive byte buffer.
    pub fn serialize(&self) -> Result<Vec<u8>, ArchiveError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for part in &self.parts {
            writer
                .start_file(part.path.as_str(), options)
                .map_err(ArchiveError::Serialize)?;
            writer
                .write_all(&part.data)
                .map_err(|source| ArchiveError::PartIo {
                    path: part.path.clone(),
                    source,
                })?;
        }

        let cursor = writer.finish().map_err(ArchiveError::Serialize)?;
        Ok(cursor.into_inner())
    }
}
