//! `<head>` rewriting for existing HTML pages.
//!
//! The page is streamed through quick-xml. Managed tags found inside
//! `<head>` are loaded into a [`HeadDocument`] on parse and dropped on
//! render; the document's nodes are then written back just before
//! `</head>`. Everything else passes through byte for byte.
//!
//! A head without a closing tag ends at `<body>`, `</html>` or the end of
//! input, as browsers treat it.
//!
//! Managed tags:
//! - `<title>`
//! - `<meta name=...>` / `<meta property=...>`
//! - `<link rel="canonical">`
//! - `<script type="application/ld+json" data-schema-id=...>`

use super::document::{HeadDocument, HeadNode};
use super::xml::{XmlWriter, attr_value, create_xml_reader, create_xml_writer, write_raw_text_element};
use super::{HeadError, HeadSink, MetaAttr, MetaKey};
use quick_xml::{
    escape::unescape,
    events::{BytesStart, BytesText, Event},
};

/// Elements whose content is raw text and must not be tokenized.
const RAW_TEXT_ELEMENTS: &[&[u8]] = &[b"script", b"style", b"title", b"textarea"];

/// An HTML page acting as a head sink.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    source: Vec<u8>,
    head: HeadDocument,
}

impl HtmlPage {
    /// Parse `source` and load its managed head tags.
    pub fn parse(source: impl Into<Vec<u8>>) -> Result<Self, HeadError> {
        let source = source.into();
        let mut head = HeadDocument::new();
        let mut in_head = false;
        let mut found_head = false;

        scan(&source, |token| {
            match token {
                Token::Event(Event::Start(elem)) if is_named(elem.name().as_ref(), b"head") => {
                    in_head = true;
                    found_head = true;
                }
                Token::Event(Event::End(elem)) if is_named(elem.name().as_ref(), b"head") => {
                    in_head = false;
                }
                token if closes_head(&token) => in_head = false,
                Token::Event(Event::Start(elem) | Event::Empty(elem)) if in_head => {
                    if let Some(node) = managed_node(&elem, None)? {
                        head.push_node(node);
                    }
                }
                Token::RawText { start, text } if in_head => {
                    if let Some(node) = managed_node(&start, Some(text))? {
                        head.push_node(node);
                    }
                }
                _ => {}
            }
            Ok(())
        })?;

        if !found_head {
            return Err(HeadError::MissingHead);
        }
        Ok(Self { source, head })
    }

    /// Managed head tags as currently held.
    pub fn head(&self) -> &HeadDocument {
        &self.head
    }

    /// Rewrite the page with the current head tags.
    ///
    /// Rendering the output again yields identical bytes.
    pub fn render(&self) -> Result<Vec<u8>, HeadError> {
        let mut writer = create_xml_writer(self.source.len() + self.head.len() * 96);
        let mut in_head = false;
        // Whitespace is held back inside <head> so that it disappears
        // together with a dropped tag.
        let mut pending = String::new();

        scan(&self.source, |token| {
            if in_head && closes_head(&token) {
                in_head = false;
                self.close_head(&mut writer, &mut pending)?;
            }

            match token {
                Token::Event(Event::Start(elem)) if is_named(elem.name().as_ref(), b"head") => {
                    in_head = true;
                    writer.write_event(Event::Start(elem))?;
                }
                Token::Event(Event::End(elem)) if is_named(elem.name().as_ref(), b"head") => {
                    if in_head {
                        in_head = false;
                        self.close_head(&mut writer, &mut pending)?;
                    }
                    writer.write_event(Event::End(elem))?;
                }
                Token::Event(event) if !in_head => writer.write_event(event)?,
                Token::RawText { start, text } if !in_head => {
                    write_raw_text_element(&mut writer, start, text)?;
                }
                Token::Event(Event::Text(text)) if is_blank(&text) => {
                    pending.push_str(&String::from_utf8_lossy(&text));
                }
                Token::Event(Event::Start(elem) | Event::Empty(elem))
                    if managed_node(&elem, None)?.is_some() =>
                {
                    pending.clear();
                }
                Token::Event(Event::End(elem))
                    if is_named(elem.name().as_ref(), b"meta")
                        || is_named(elem.name().as_ref(), b"link") =>
                {
                    pending.clear();
                }
                Token::RawText { start, text } => {
                    if managed_node(&start, Some(text))?.is_some() {
                        pending.clear();
                    } else {
                        flush(&mut writer, &mut pending)?;
                        write_raw_text_element(&mut writer, start, text)?;
                    }
                }
                Token::Event(event) => {
                    flush(&mut writer, &mut pending)?;
                    writer.write_event(event)?;
                }
            }
            Ok(())
        })?;

        if in_head {
            self.close_head(&mut writer, &mut pending)?;
        }
        Ok(writer.into_inner().into_inner())
    }

    /// Write the managed nodes, then any whitespace held back before the
    /// point where the head ends.
    fn close_head(&self, writer: &mut XmlWriter, pending: &mut String) -> Result<(), HeadError> {
        self.head.write_nodes(writer, "\n")?;
        flush(writer, pending)
    }

    /// Render as a UTF-8 string.
    pub fn render_string(&self) -> Result<String, HeadError> {
        let bytes = self.render()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl HeadSink for HtmlPage {
    fn set_title(&mut self, title: &str) {
        self.head.set_title(title);
    }

    fn upsert_meta(&mut self, key: MetaKey<'_>, content: &str) {
        self.head.upsert_meta(key, content);
    }

    fn remove_meta(&mut self, key: MetaKey<'_>) {
        self.head.remove_meta(key);
    }

    fn replace_meta_group(&mut self, key: MetaKey<'_>, contents: &[String]) {
        self.head.replace_meta_group(key, contents);
    }

    fn upsert_link(&mut self, rel: &str, href: &str) {
        self.head.upsert_link(rel, href);
    }

    fn upsert_script(&mut self, id: &str, json: &str) {
        self.head.upsert_script(id, json);
    }

    fn remove_script(&mut self, id: &str) {
        self.head.remove_script(id);
    }

    fn contains_meta(&self, key: MetaKey<'_>) -> bool {
        self.head.contains_meta(key)
    }

    fn contains_script(&self, id: &str) -> bool {
        self.head.contains_script(id)
    }
}

// ============================================================================
// Scanner
// ============================================================================

enum Token<'a> {
    Event(Event<'a>),
    /// A raw-text element, start tag plus unparsed content.
    RawText { start: BytesStart<'a>, text: &'a [u8] },
}

/// Stream `source` as tokens.
///
/// Raw-text elements are cut out of the byte stream by locating their
/// closing tag, then the reader restarts after it. This keeps `<` in
/// scripts and styles from being read as markup.
fn scan<'a, F>(source: &'a [u8], mut visit: F) -> Result<(), HeadError>
where
    F: FnMut(Token<'a>) -> Result<(), HeadError>,
{
    let mut offset = 0;

    'restart: while offset < source.len() {
        let mut reader = create_xml_reader(&source[offset..]);
        loop {
            let event = reader.read_event().map_err(|source| HeadError::Parse {
                position: offset as u64 + reader.error_position() as u64,
                source,
            })?;

            match event {
                Event::Eof => break 'restart,
                Event::Start(elem) if is_raw_text(elem.name().as_ref()) => {
                    let body_start = offset + reader.buffer_position() as usize;
                    let (body_end, resume) =
                        find_closing_tag(source, body_start, elem.name().as_ref());
                    let text = &source[body_start..body_end];
                    visit(Token::RawText { start: elem, text })?;
                    offset = resume;
                    continue 'restart;
                }
                event => visit(Token::Event(event))?,
            }
        }
    }
    Ok(())
}

/// Locate `</name>` at or after `from`, case-insensitively.
///
/// Returns the end of the element content and the index just past the
/// closing tag. An unclosed element runs to the end of input.
fn find_closing_tag(source: &[u8], from: usize, name: &[u8]) -> (usize, usize) {
    let mut i = from;
    while i + 2 + name.len() <= source.len() {
        if source[i] == b'<'
            && source[i + 1] == b'/'
            && source[i + 2..i + 2 + name.len()].eq_ignore_ascii_case(name)
        {
            let after_name = i + 2 + name.len();
            if let Some(close) = source[after_name..].iter().position(|&b| b == b'>') {
                return (i, after_name + close + 1);
            }
            return (i, source.len());
        }
        i += 1;
    }
    (source.len(), source.len())
}

/// Classify a head element. `text` is the content of raw-text elements.
fn managed_node(elem: &BytesStart<'_>, text: Option<&[u8]>) -> Result<Option<HeadNode>, HeadError> {
    let name = elem.name();
    let name = name.as_ref();
    let text = String::from_utf8_lossy(text.unwrap_or_default());

    if is_named(name, b"title") {
        let title = unescape(&text).map_or_else(|_| text.to_string(), |t| t.into_owned());
        return Ok(Some(HeadNode::Title(title.trim().to_owned())));
    }

    if is_named(name, b"meta") {
        let key = match attr_value(elem, "name")? {
            Some(name) => Some((MetaAttr::Name, name)),
            None => attr_value(elem, "property")?.map(|p| (MetaAttr::Property, p)),
        };
        return Ok(match key {
            Some((attr, name)) => Some(HeadNode::Meta {
                attr,
                name,
                content: attr_value(elem, "content")?.unwrap_or_default(),
            }),
            None => None,
        });
    }

    if is_named(name, b"link") {
        let rel = attr_value(elem, "rel")?;
        if rel.as_deref().is_some_and(|r| r.eq_ignore_ascii_case("canonical")) {
            return Ok(Some(HeadNode::Link {
                rel: "canonical".to_owned(),
                href: attr_value(elem, "href")?.unwrap_or_default(),
            }));
        }
        return Ok(None);
    }

    if is_named(name, b"script") {
        let is_json_ld = attr_value(elem, "type")?
            .is_some_and(|t| t.eq_ignore_ascii_case("application/ld+json"));
        if let (true, Some(id)) = (is_json_ld, attr_value(elem, "data-schema-id")?) {
            return Ok(Some(HeadNode::Script {
                id,
                body: text.replace("<\\/", "</"),
            }));
        }
    }

    Ok(None)
}

fn flush(writer: &mut XmlWriter, pending: &mut String) -> Result<(), HeadError> {
    if !pending.is_empty() {
        writer.write_event(Event::Text(BytesText::from_escaped(pending.as_str())))?;
        pending.clear();
    }
    Ok(())
}

/// Tokens that end a head left open by the page.
fn closes_head(token: &Token<'_>) -> bool {
    match token {
        Token::Event(Event::Start(elem) | Event::Empty(elem)) => {
            is_named(elem.name().as_ref(), b"body")
        }
        Token::Event(Event::End(elem)) => is_named(elem.name().as_ref(), b"html"),
        _ => false,
    }
}

#[inline]
fn is_named(name: &[u8], expected: &[u8]) -> bool {
    name.eq_ignore_ascii_case(expected)
}

#[inline]
fn is_raw_text(name: &[u8]) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|raw| is_named(name, raw))
}

#[inline]
fn is_blank(text: &BytesText<'_>) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width">
<title>Old &amp; Stale</title>
<meta name="description" content="Old description">
<link rel="stylesheet" href="/main.css">
<link rel="canonical" href="https://dominicanews.com/old">
<script>var ok = 1 < 2 && 3 > 2;</script>
<script type="application/ld+json" data-schema-id="article-schema">{"old":true}</script>
</head>
<body><p>Hi &amp; bye</p><script>if (a < b) {}</script></body>
</html>
"#;

    #[test]
    fn test_parse_loads_managed_tags() {
        let page = HtmlPage::parse(PAGE).unwrap();
        let head = page.head();

        assert_eq!(head.title(), Some("Old & Stale"));
        assert_eq!(
            head.meta_content(MetaKey::name("description")),
            Some("Old description")
        );
        assert_eq!(
            head.meta_content(MetaKey::name("viewport")),
            Some("width=device-width")
        );
        assert_eq!(head.link("canonical"), Some("https://dominicanews.com/old"));
        assert_eq!(head.script("article-schema"), Some(r#"{"old":true}"#));
        // charset meta and the stylesheet are not managed
        assert_eq!(head.len(), 5);
    }

    #[test]
    fn test_render_replaces_managed_tags() {
        let mut page = HtmlPage::parse(PAGE).unwrap();
        page.set_title("Budget Passed");
        page.upsert_meta(MetaKey::name("description"), "New description");
        page.remove_script("article-schema");

        let html = page.render_string().unwrap();
        assert!(html.contains(r#"<meta name="description" content="New description"/>"#));
        assert!(!html.contains("Old description"));
        assert!(!html.contains("article-schema"));
        assert_eq!(html.matches("<title>").count(), 1);
        assert!(html.contains("<title>Budget Passed</title>"));
        // unmanaged content untouched
        assert!(html.contains(r#"<meta charset="utf-8">"#));
        assert!(html.contains(r#"<link rel="stylesheet" href="/main.css">"#));
        assert!(html.contains("<script>var ok = 1 < 2 && 3 > 2;</script>"));
        assert!(html.contains("<body><p>Hi &amp; bye</p><script>if (a < b) {}</script></body>"));
        assert!(html.find("<title>").unwrap() < html.find("</head>").unwrap());
    }

    #[test]
    fn test_render_is_stable() {
        let mut page = HtmlPage::parse(PAGE).unwrap();
        page.upsert_script("website-schema", r#"{"url":"</x>"}"#);
        let first = page.render().unwrap();

        let again = HtmlPage::parse(first.clone()).unwrap();
        assert_eq!(again.head(), page.head());
        assert_eq!(again.render().unwrap(), first);
    }

    #[test]
    fn test_body_script_before_closing_tags() {
        let source = "<html><head><title>Old</title></head>\n\
                      <body><p>x</p><script>load()</script></body></html>";
        let mut page = HtmlPage::parse(source).unwrap();
        page.set_title("New");

        let html = page.render_string().unwrap();
        assert!(html.contains("<title>New</title>"));
        assert!(html.ends_with("<script>load()</script></body></html>"));
    }

    #[test]
    fn test_unclosed_head_ends_at_body() {
        let source = "<html><head><title>Old</title>\n<body><p>x</p></body></html>";
        let mut page = HtmlPage::parse(source).unwrap();
        page.set_title("New");
        page.upsert_meta(MetaKey::name("description"), "Fresh");

        let first = page.render_string().unwrap();
        assert_eq!(
            first,
            "<html><head>\n<title>New</title>\n<meta name=\"description\" content=\"Fresh\"/>\n\
             <body><p>x</p></body></html>"
        );

        let again = HtmlPage::parse(first.clone()).unwrap();
        assert_eq!(again.head(), page.head());
        assert_eq!(again.render_string().unwrap(), first);
    }

    #[test]
    fn test_unclosed_head_ends_at_eof() {
        let mut page = HtmlPage::parse("<head><meta name=\"description\" content=\"Old\">").unwrap();
        page.upsert_meta(MetaKey::name("description"), "New");

        let html = page.render_string().unwrap();
        assert_eq!(html, "<head>\n<meta name=\"description\" content=\"New\"/>");
    }

    #[test]
    fn test_raw_text_keeps_invalid_utf8() {
        let mut source = b"<html><head><style>p::after{content:\"".to_vec();
        source.push(0xFF);
        source.extend_from_slice(b"\"}</style></head><body><script>s=\"");
        source.push(0xFE);
        source.extend_from_slice(b"\"</script></body></html>");

        let mut page = HtmlPage::parse(source).unwrap();
        page.set_title("Budget");
        let out = page.render().unwrap();

        let contains = |needle: &[u8]| out.windows(needle.len()).any(|w| w == needle);
        assert!(contains(b"<style>p::after{content:\"\xFF\"}</style>"));
        assert!(contains(b"<script>s=\"\xFE\"</script>"));
        assert!(contains(b"<title>Budget</title>"));
    }

    #[test]
    fn test_missing_head() {
        let err = HtmlPage::parse("<html><body></body></html>").unwrap_err();
        assert!(matches!(err, HeadError::MissingHead));
    }

    #[test]
    fn test_find_closing_tag() {
        let src = b"<style>a{}</STYLE >rest";
        assert_eq!(find_closing_tag(src, 7, b"style"), (10, 19));
        assert_eq!(find_closing_tag(b"abc", 0, b"script"), (3, 3));
    }
}
