//! Packaging rendered pages into a downloadable archive.

use super::renderer::{RenderError, RenderReport, RenderResult};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Pack a render report's pages into a zip archive.
///
/// Entries are named `page-<n>.png` after each page's logical number,
/// in page order, so a bundle with a skipped page keeps stable names
/// for the pages that made it.
pub fn write_bundle(report: &RenderReport) -> RenderResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for page in &report.pages {
        writer
            .start_file(format!("page-{}.png", page.page), options)
            .map_err(|e| RenderError::Bundle(e.to_string()))?;
        writer
            .write_all(&page.png)
            .map_err(|e| RenderError::Bundle(e.to_string()))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| RenderError::Bundle(e.to_string()))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::renderer::RenderPage;

    fn report(pages: &[usize]) -> RenderReport {
        RenderReport {
            pages: pages
                .iter()
                .map(|&page| RenderPage {
                    page,
                    png: vec![0x89, b'P', b'N', b'G'],
                })
                .collect(),
            skipped: Vec::new(),
        }
    }

    #[test]
    fn test_bundle_entry_names_follow_page_numbers() {
        let bytes = write_bundle(&report(&[1, 2, 3])).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_owned())
            .collect();
        assert_eq!(names, vec!["page-1.png", "page-2.png", "page-3.png"]);
    }

    #[test]
    fn test_bundle_with_gap_keeps_logical_numbering() {
        // Page 2 was skipped upstream; names must not renumber.
        let bytes = write_bundle(&report(&[1, 3])).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();

        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_owned())
            .collect();
        assert_eq!(names, vec!["page-1.png", "page-3.png"]);
    }

    #[test]
    fn test_empty_report_is_an_empty_archive() {
        let bytes = write_bundle(&RenderReport::default()).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
