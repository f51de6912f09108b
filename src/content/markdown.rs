//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::html::{styled_line_to_highlighted_html, ClassStyle, ClassedHTMLGenerator, IncludeBackground};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::config::HighlightConfig;
use crate::error::SkipReason;

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    highlight: HighlightConfig,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(HighlightConfig::default())
    }

    /// Create with custom settings
    pub fn with_options(highlight: HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            highlight,
        }
    }

    /// Render markdown to HTML.
    ///
    /// Malformed markup still renders on a best-effort basis; an error is only
    /// returned if rendering itself panics. The process panic hook is left
    /// alone, so that panic is also printed to stderr before the skip is logged.
    pub fn render(&self, markdown: &str) -> Result<String, SkipReason> {
        panic::catch_unwind(AssertUnwindSafe(|| self.render_html(markdown)))
            .map_err(|payload| SkipReason::RendererFault(panic_message(payload.as_ref())))
    }

    fn render_html(&self, markdown: &str) -> String {
        // No YAML metadata blocks: front-matter is split off before rendering
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        // (language tag, collected source) while inside a code block
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => fence_language(&info),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let rendered = self.render_code_block(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(rendered)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                _ if code_block.is_some() => {}
                event => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Render one code block; only tagged fences get highlighted
    fn render_code_block(&self, code: &str, lang: Option<&str>) -> String {
        match lang {
            Some(lang) if self.highlight.enable => self.highlight_code(code, lang),
            _ => format!("<pre><code>{}</code></pre>\n", html_escape(code)),
        }
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: &str) -> String {
        // Try to find syntax for the language
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let highlighted = match self.highlight.theme.as_deref() {
            Some(theme) => self.inline_spans(code, syntax, theme),
            None => self.classed_spans(code, syntax),
        };
        let body = highlighted.unwrap_or_else(|e| {
            tracing::debug!("Highlighting {} failed, using plain text: {}", lang, e);
            html_escape(code)
        });

        let lang = html_escape(lang);
        let inner = if self.highlight.line_number {
            self.add_line_numbers(&body, &lang, code.lines().count())
        } else {
            format!(r#"<pre><code class="language-{}">{}</code></pre>"#, lang, body)
        };
        format!(
            "<div class=\"{}\">{}</div>\n",
            html_escape(&self.highlight.css_class),
            inner
        )
    }

    /// Spans carrying CSS classes named after the syntax scopes
    fn classed_spans(&self, code: &str, syntax: &SyntaxReference) -> Result<String, syntect::Error> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, ClassStyle::Spaced);
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }

    /// Spans with inline colors from a bundled theme
    fn inline_spans(
        &self,
        code: &str,
        syntax: &SyntaxReference,
        theme_name: &str,
    ) -> Result<String, syntect::Error> {
        let theme = match self.theme_set.themes.get(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!("Unknown highlight theme {}, using CSS classes", theme_name);
                return self.classed_spans(code, syntax);
            }
        };

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut output = String::new();
        for line in LinesWithEndings::from(code) {
            let regions = highlighter.highlight_line(line, &self.syntax_set)?;
            output.push_str(&styled_line_to_highlighted_html(
                &regions[..],
                IncludeBackground::No,
            )?);
        }
        Ok(output)
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str, line_count: usize) -> String {
        let gutter = (1..=line_count)
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");
        let code_lines = code.trim_end_matches('\n');

        format!(
            r#"<table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre><code class="language-{}">{}</code></pre></td></tr></table>"#,
            gutter, lang, code_lines
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Language tag of a fence info string (`python title="x"` -> `python`)
fn fence_language(info: &str) -> Option<String> {
    info.split(|c: char| c.is_whitespace() || c == ',' || c == '{')
        .next()
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
