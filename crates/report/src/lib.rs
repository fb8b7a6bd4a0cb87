//! Presentation adapters for vitals.
//!
//! Console summary, ASCII timeline and client document. Adapters only
//! lay out what the analyzer already computed; none of them re-derives
//! a health metric.

#![warn(missing_docs)]

mod error;
pub mod console;
pub mod timeline;
pub mod document;
pub mod pdf;

pub use error::{RenderError, Result};
pub use console::ConsoleSummary;
pub use timeline::{status_glyph, Timeline, DEFAULT_CHART_WIDTH, MAX_CHART_WIDTH};
pub use document::{DocumentLayout, FontStyle, Page, PageGeometry, PageWriter, TextLine};
pub use pdf::{report_file_name, PdfRenderer};
