//! PDF encoding of a [`DocumentLayout`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, info};
use vitals_core::Project;

use crate::document::{DocumentLayout, FontStyle, PageGeometry};
use crate::error::{RenderError, Result};

const ARTIFACT: &str = "PDF report";

/// File name for a project's report: `Project_Health_Report_<name>.pdf`.
///
/// Whitespace runs become `_`; characters unsafe in file names become `_`.
pub fn report_file_name(project: &Project) -> String {
    let name: String = project
        .name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect();
    format!("Project_Health_Report_{}.pdf", name)
}

/// Writes laid-out documents as PDF files using the standard Helvetica fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer {
    geometry: PageGeometry,
}

impl PdfRenderer {
    /// Encode `layout` into an in-memory PDF document.
    pub fn encode(&self, layout: &DocumentLayout) -> Result<Document> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let fonts = dictionary! {
            "F1" => helvetica(&mut doc, "Helvetica"),
            "F2" => helvetica(&mut doc, "Helvetica-Bold"),
            "F3" => helvetica(&mut doc, "Helvetica-Oblique"),
        };
        let resources_id = doc.add_object(dictionary! { "Font" => fonts });

        let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
        for page in &layout.pages {
            let mut operations = Vec::with_capacity(page.lines.len() * 5);
            for line in &page.lines {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new(
                    "Tf",
                    vec![font_key(line.style).into(), line.size.into()],
                ));
                operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(to_latin(&line.text))],
                ));
                operations.push(Operation::new("ET", vec![]));
            }

            let content = Content { operations }.encode().map_err(pdf_error)?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                self.geometry.width.into(),
                self.geometry.height.into(),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        debug!(pages = count, "Encoded PDF document");
        Ok(doc)
    }

    /// Encode `layout` and save it to `path`.
    pub fn write(&self, layout: &DocumentLayout, path: &Path) -> Result<PathBuf> {
        let mut doc = self.encode(layout)?;
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|err| write_error(path, io::Error::other(err)))?;
        fs::write(path, &bytes).map_err(|source| write_error(path, source))?;
        info!("Wrote {} to {}", ARTIFACT, path.display());
        Ok(path.to_path_buf())
    }
}

fn helvetica(doc: &mut Document, base_font: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
    })
}

fn font_key(style: FontStyle) -> &'static str {
    match style {
        FontStyle::Regular => "F1",
        FontStyle::Bold => "F2",
        FontStyle::Italic => "F3",
    }
}

/// Standard Type1 fonts only cover Latin-1; anything else becomes `?`.
fn to_latin(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

fn write_error(path: &Path, source: io::Error) -> RenderError {
    RenderError::Write {
        artifact: format!("{} {}", ARTIFACT, path.display()),
        source,
    }
}

fn pdf_error(source: lopdf::Error) -> RenderError {
    RenderError::Pdf {
        artifact: ARTIFACT.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_core::Date;
    use vitals_progress::HealthAnalyzer;
    use vitals_storage::parse_project;

    const SAMPLE: &str = include_str!("../../../projects/project_nexus.json");

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn sample_layout() -> (Project, DocumentLayout) {
        let project = parse_project(SAMPLE).unwrap();
        let layout = {
            let report = HealthAnalyzer::new().analyze(&project, date("2023-10-16"));
            DocumentLayout::build(&project, &report)
        };
        (project, layout)
    }

    #[test]
    fn test_report_file_name() {
        let (mut project, _) = sample_layout();
        assert_eq!(report_file_name(&project), "Project_Health_Report_Project_Nexus.pdf");

        project.name = "  Alpha   Beta/Gamma ".to_string();
        assert_eq!(report_file_name(&project), "Project_Health_Report_Alpha_Beta_Gamma.pdf");
    }

    #[test]
    fn test_to_latin_replaces_wide_chars() {
        assert_eq!(to_latin("ab"), b"ab".to_vec());
        assert_eq!(to_latin("é"), vec![0xE9]);
        assert_eq!(to_latin("•x"), b"?x".to_vec());
    }

    #[test]
    fn test_encode_has_one_page_per_layout_page() {
        let (_, layout) = sample_layout();
        let doc = PdfRenderer::default().encode(&layout).unwrap();
        assert_eq!(doc.get_pages().len(), layout.pages.len());
    }

    #[test]
    fn test_write_pdf_file() {
        let (project, layout) = sample_layout();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(report_file_name(&project));

        let written = PdfRenderer::default().write(&layout, &path).unwrap();
        assert_eq!(written, path);

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let reloaded = Document::load(&path).unwrap();
        assert_eq!(reloaded.get_pages().len(), layout.pages.len());
    }

    #[test]
    fn test_write_to_missing_directory_names_artifact() {
        let (_, layout) = sample_layout();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.pdf");

        let err = PdfRenderer::default().write(&layout, &path).unwrap_err();
        assert!(matches!(err, RenderError::Write { .. }));
        assert!(err.artifact().starts_with("PDF report"));
        assert!(err.to_string().contains("report.pdf"));
        assert!(!path.exists());
    }
}
