use repo_docgen::config::OutputFormat;
use repo_docgen::convert::html::markdown_to_html;
use repo_docgen::convert::pdf::wrap_lines;
use repo_docgen::convert::{
    with_extension, ConversionChain, NativePdfConverter, PandocConverter, PandocTarget,
    StyledHtmlConverter, PRINT_TO_PDF_INSTRUCTIONS,
};
use repo_docgen_core::contract::{DocumentConverter, MockDocumentConverter};
use repo_docgen_core::DocgenError;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const MARKDOWN: &str = "# Widget\n\n## Usage & Setup\n\nRun `widget --help` for **all** options.\n\n- one\n- two\n\n```bash\necho \"<hi>\"\n```\n\nSee [docs](https://example.org/a?b=1&c=2).\n";

fn failing(name: &'static str) -> Box<dyn DocumentConverter> {
    let mut converter = MockDocumentConverter::new();
    converter.expect_name().return_const(name);
    converter
        .expect_convert()
        .returning(move |_, _| Err(DocgenError::conversion(name, "tool missing")));
    Box::new(converter)
}

#[test]
fn extension_is_appended_not_replaced() {
    assert_eq!(
        with_extension(&PathBuf::from("out/demo_docs.v2"), "pdf"),
        PathBuf::from("out/demo_docs.v2.pdf")
    );
}

#[test]
fn default_chains() {
    assert!(ConversionChain::for_format(OutputFormat::Markdown).is_none());
    let html = ConversionChain::for_format(OutputFormat::Html).expect("html chain");
    assert_eq!(html.names(), vec!["pandoc_html", "styled_html"]);
    let pdf = ConversionChain::for_format(OutputFormat::Pdf).expect("pdf chain");
    assert_eq!(pdf.names(), vec!["pandoc_pdf", "native_pdf", "styled_html"]);
}

#[test]
fn native_pdf_has_pdf_header() {
    let bytes = NativePdfConverter::default()
        .render("Widget", MARKDOWN)
        .expect("pdf renders");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn native_pdf_rejects_empty_document() {
    assert!(NativePdfConverter::default().render("Empty", "\n  \n").is_err());
}

#[test]
fn long_lines_wrap_and_tree_glyphs_become_ascii() {
    let lines = wrap_lines(&format!("{}\n├── src\n", "x".repeat(25)), 10);
    assert_eq!(lines, vec!["xxxxxxxxxx", "xxxxxxxxxx", "xxxxx", "+-- src"]);
}

#[test]
fn pdf_request_falls_back_to_native_pdf() {
    let dir = TempDir::new().expect("tempdir");
    let stem = dir.path().join("widget_documentation");
    let chain = ConversionChain::new(
        OutputFormat::Pdf,
        vec![failing("pandoc_pdf"), Box::new(NativePdfConverter::default())],
    );
    let outcome = chain.convert(MARKDOWN, &stem).expect("conversion succeeds");
    assert_eq!(outcome.converter, "native_pdf");
    assert!(!outcome.degraded);
    assert!(outcome.instructions.is_none());
    assert_eq!(outcome.path, dir.path().join("widget_documentation.pdf"));
    assert!(fs::read(&outcome.path).expect("pdf written").starts_with(b"%PDF"));
}

#[test]
fn pdf_request_degrades_to_html_with_instructions() {
    let dir = TempDir::new().expect("tempdir");
    let stem = dir.path().join("widget_documentation");
    let chain = ConversionChain::new(
        OutputFormat::Pdf,
        vec![failing("pandoc_pdf"), failing("native_pdf"), Box::new(StyledHtmlConverter)],
    );
    let outcome = chain.convert(MARKDOWN, &stem).expect("html fallback succeeds");
    assert_eq!(outcome.converter, "styled_html");
    assert!(outcome.degraded);
    assert_eq!(outcome.instructions.as_deref(), Some(PRINT_TO_PDF_INSTRUCTIONS));
    assert!(outcome.path.ends_with("widget_documentation.html"));
    let html = fs::read_to_string(&outcome.path).expect("html written");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Widget</title>"));
}

#[test]
fn chain_error_lists_every_failure() {
    let dir = TempDir::new().expect("tempdir");
    let chain = ConversionChain::new(OutputFormat::Html, vec![failing("first"), failing("second")]);
    let err = chain
        .convert(MARKDOWN, &dir.path().join("doc"))
        .expect_err("all converters fail");
    let message = err.to_string();
    assert!(message.contains("first"));
    assert!(message.contains("second"));
}

#[test]
fn missing_pandoc_fails_fast() {
    let dir = TempDir::new().expect("tempdir");
    let converter = PandocConverter::with_program(PandocTarget::Pdf, "repo-docgen-no-such-pandoc");
    assert_eq!(converter.name(), "pandoc_pdf");
    let err = converter
        .convert(MARKDOWN, &dir.path().join("doc"))
        .expect_err("pandoc is missing");
    assert!(err.to_string().contains("not installed"));
}

#[test]
fn html_body_escapes_and_anchors() {
    let html = markdown_to_html(MARKDOWN);
    assert!(html.contains("<h1 id=\"widget\">Widget</h1>"));
    assert!(html.contains("<h2 id=\"usage-&amp;-setup\">Usage &amp; Setup</h2>"));
    assert!(html.contains("<code>widget --help</code>"));
    assert!(html.contains("<strong>all</strong>"));
    assert!(html.contains("<ul>\n<li>one</li>\n<li>two</li>\n</ul>"));
    assert!(html.contains("<pre><code class=\"language-bash\">"));
    assert!(html.contains("&lt;hi&gt;"));
    assert!(html.contains("<a href=\"https://example.org/a?b=1&amp;c=2\">docs</a>"));
}

#[test]
fn numbered_and_nested_lists_keep_their_structure() {
    let html = markdown_to_html("1. Clone the repo\n2. Run make\n   - with `-j4`\n");
    assert!(html.contains("<ol>"));
    assert!(html.contains("<li>Clone the repo</li>"));
    assert!(html.contains("<li>Run make"));
    assert!(html.contains("<ul>\n<li>with <code>-j4</code></li>\n</ul>"));
    assert!(!html.contains("<p>1. Clone"));
}

#[test]
fn tables_render_header_and_body_cells() {
    let html = markdown_to_html("| Name | Value |\n|------|-------|\n| port | 8080 |\n");
    assert!(html.contains("<table>"));
    assert!(html.contains("<th>Name</th>"));
    assert!(html.contains("<td>8080</td>"));
}
