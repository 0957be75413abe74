use super::with_extension;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use repo_docgen_core::assemble::anchor;
use repo_docgen_core::contract::DocumentConverter;
use repo_docgen_core::DocgenError;
use std::path::{Path, PathBuf};
use tracing::info;

const STYLESHEET: &str = r#"
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; max-width: 800px; margin: 0 auto; padding: 20px; color: #333; }
h1, h2, h3, h4, h5, h6 { color: #2c3e50; margin-top: 2em; margin-bottom: 0.5em; }
h1 { border-bottom: 3px solid #3498db; padding-bottom: 10px; }
h2 { border-bottom: 2px solid #ecf0f1; padding-bottom: 5px; }
code { background-color: #f8f9fa; padding: 2px 4px; border-radius: 3px; font-family: 'Monaco', 'Menlo', monospace; color: #e74c3c; }
pre { background-color: #f8f9fa; padding: 15px; border-radius: 5px; overflow-x: auto; border-left: 4px solid #3498db; }
pre code { color: #333; background: none; padding: 0; }
table { border-collapse: collapse; width: 100%; margin: 1em 0; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
th { background-color: #f2f2f2; }
blockquote { border-left: 4px solid #ecf0f1; margin: 0; padding-left: 1em; color: #666; }
@media print { body { max-width: none; margin: 0; padding: 15px; } h1, h2, h3, h4, h5, h6 { page-break-after: avoid; } }
"#;

/// Self-contained HTML page with embedded CSS. Never needs external tools.
pub struct StyledHtmlConverter;

/// CommonMark plus tables to HTML. Headings get the same ids the table of
/// contents links to.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut events: Vec<Event<'_>> =
        Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH).collect();

    for i in 0..events.len() {
        if !matches!(events[i], Event::Start(Tag::Heading { id: None, .. })) {
            continue;
        }
        let title: String = events[i + 1..]
            .iter()
            .take_while(|e| !matches!(e, Event::End(TagEnd::Heading(_))))
            .filter_map(|e| match e {
                Event::Text(text) | Event::Code(text) => Some(&**text),
                _ => None,
            })
            .collect();
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(anchor(&title)));
        }
    }

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

pub fn styled_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n<title>{}</title>\n<style>{STYLESHEET}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        html_escape::encode_text(title)
    )
}

impl DocumentConverter for StyledHtmlConverter {
    fn name(&self) -> &'static str {
        "styled_html"
    }

    fn convert(&self, markdown: &str, destination_stem: &Path) -> Result<PathBuf, DocgenError> {
        let title = markdown
            .lines()
            .find_map(|l| l.strip_prefix("# "))
            .unwrap_or("Project Documentation");
        let page = styled_page(title, &markdown_to_html(markdown));
        let output = with_extension(destination_stem, "html");
        std::fs::write(&output, page)?;
        info!(path = %output.display(), "HTML written");
        Ok(output)
    }
}
