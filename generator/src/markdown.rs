use std::path::PathBuf;

use crate::error::{Error, IoResultExt as _, Result};

/// Required start of the first line of every source page.
pub const TITLE_PREFIX: &str = "@title: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePage {
    pub path: PathBuf,
    pub title: String,
    /// Everything after the header line, still markdown.
    pub body: String,
}

impl SourcePage {
    pub fn read(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).at(&path)?;
        Self::parse(path, &content)
    }

    /// Split `content` into the `@title: ` header and the markdown body.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let path = path.into();
        let mut lines = content.split_inclusive('\n');

        let Some(title) = lines.next().and_then(|l| l.strip_prefix(TITLE_PREFIX)) else {
            return Err(Error::MalformedHeader { path });
        };

        Ok(Self {
            title: title.trim().to_string(),
            body: lines.collect(),
            path,
        })
    }

    pub fn body_html(&self) -> String {
        to_html(&self.body)
    }
}

pub fn to_html(markdown: &str) -> String {
    comrak::markdown_to_html(markdown, &options())
}

// Fenced code blocks are part of CommonMark, so comrak always parses them; the
// info string ends up as `class="language-..."` on the `<code>` element.
fn options() -> comrak::Options<'static> {
    let extension = comrak::ExtensionOptions::builder()
        .strikethrough(true)
        .table(true)
        .build();
    let parse = comrak::ParseOptions::builder().build();
    let render = comrak::RenderOptions::builder().r#unsafe(true).build();

    comrak::Options {
        extension,
        parse,
        render,
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn title_is_trimmed() {
        let page = SourcePage::parse("a.md", "@title:   Hello world \t\n# Hi\n").unwrap();
        assert_eq!(page.path, Path::new("a.md"));
        assert_eq!(page.title, "Hello world");
        assert_eq!(page.body, "# Hi\n");
    }

    #[test]
    fn body_keeps_remaining_lines_verbatim() {
        let page = SourcePage::parse("a.md", "@title: T\r\nline 1\r\n\r\nline 2").unwrap();
        assert_eq!(page.title, "T");
        assert_eq!(page.body, "line 1\r\n\r\nline 2");
    }

    #[test]
    fn header_only_page_has_empty_body() {
        let page = SourcePage::parse("a.md", "@title: Only").unwrap();
        assert_eq!(page.title, "Only");
        assert!(page.body.is_empty());
        assert_eq!(page.body_html(), "");
    }

    #[test]
    fn missing_header_is_rejected() {
        for content in ["# Hi\n@title: late\n", "", "@title:no-space\n", " @title: x\n"] {
            let err = SourcePage::parse("markdown/bad.md", content).unwrap_err();
            assert!(
                matches!(err, Error::MalformedHeader { ref path } if path == Path::new("markdown/bad.md")),
                "accepted {content:?}"
            );
        }
    }

    #[test]
    fn heading_becomes_h1() {
        assert_eq!(to_html("# Hi"), "<h1>Hi</h1>\n");
    }

    #[test]
    fn paragraphs_and_headers() {
        let html = to_html("## Section\n\nSome text.\n");
        assert_eq!(html, "<h2>Section</h2>\n<p>Some text.</p>\n");
        assert_eq!(to_html("## Section\n\nSome text.\n"), html);
    }

    #[test]
    fn fenced_code_block() {
        let html = to_html("```rust\nfn main() {}\n```\n");
        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
        );
    }

    #[test]
    fn raw_html_passes_through() {
        let html = to_html("<div class=\"note\">hi</div>\n");
        assert_eq!(html, "<div class=\"note\">hi</div>\n");
    }

    #[test]
    fn read_reports_missing_file() {
        let err = SourcePage::read("does/not/exist.md").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
