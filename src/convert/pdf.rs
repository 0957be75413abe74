use super::with_extension;
use printpdf::{BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Point, Pt, TextItem};
use repo_docgen_core::contract::DocumentConverter;
use repo_docgen_core::DocgenError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 4.4;
const FONT_SIZE_PT: f32 = 9.0;

/// Plain monospaced PDF written with `printpdf`, no external tools needed.
pub struct NativePdfConverter {
    pub lines_per_page: usize,
    pub max_columns: usize,
}

impl Default for NativePdfConverter {
    fn default() -> Self {
        Self {
            lines_per_page: 60,
            max_columns: 94,
        }
    }
}

/// Builtin PDF fonts only cover WinAnsi, so tree glyphs become ASCII and anything else `?`.
fn to_ascii(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            '├' => '+',
            '└' => '`',
            '│' => '|',
            '─' => '-',
            '\t' => ' ',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '?',
        })
        .collect()
}

/// Hard-wraps each line at `width` characters.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();
    for line in text.lines() {
        let chars: Vec<char> = to_ascii(line).chars().collect();
        if chars.is_empty() {
            out.push(String::new());
            continue;
        }
        for chunk in chars.chunks(width) {
            out.push(chunk.iter().collect());
        }
    }
    out
}

impl NativePdfConverter {
    fn page(&self, lines: &[String]) -> PdfPage {
        let mut ops = Vec::with_capacity(lines.len() * 5);
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM * (i as f32 + 1.0);
            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point::new(Mm(MARGIN_MM), Mm(y)),
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(FONT_SIZE_PT),
                font: BuiltinFont::Courier,
            });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(line.clone())],
                font: BuiltinFont::Courier,
            });
            ops.push(Op::EndTextSection);
        }
        PdfPage::new(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), ops)
    }

    /// Renders the text into PDF bytes.
    pub fn render(&self, title: &str, text: &str) -> Result<Vec<u8>, DocgenError> {
        let lines = wrap_lines(text, self.max_columns);
        if lines.iter().all(|l| l.trim().is_empty()) {
            return Err(DocgenError::conversion("native_pdf", "document is empty"));
        }
        let pages: Vec<PdfPage> = lines
            .chunks(self.lines_per_page.max(1))
            .map(|chunk| self.page(chunk))
            .collect();
        debug!(pages = pages.len(), lines = lines.len(), "Laid out PDF pages");

        let mut doc = PdfDocument::new(title);
        let mut warnings = Vec::new();
        let bytes = doc
            .with_pages(pages)
            .save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(count = warnings.len(), "printpdf reported warnings");
        }
        Ok(bytes)
    }
}

impl DocumentConverter for NativePdfConverter {
    fn name(&self) -> &'static str {
        "native_pdf"
    }

    fn convert(&self, markdown: &str, destination_stem: &Path) -> Result<PathBuf, DocgenError> {
        let title = destination_stem
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Documentation".to_string());
        let bytes = self.render(&title, markdown)?;
        let output = with_extension(destination_stem, "pdf");
        std::fs::write(&output, &bytes)?;
        info!(path = %output.display(), bytes = bytes.len(), "PDF written");
        Ok(output)
    }
}
