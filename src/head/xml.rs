use super::HeadError;
use quick_xml::{
    Reader, Writer,
    escape::unescape,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use std::io::{Cursor, Write};

pub type XmlWriter = Writer<Cursor<Vec<u8>>>;

#[inline]
pub fn create_xml_writer(capacity: usize) -> XmlWriter {
    Writer::new(Cursor::new(Vec::with_capacity(capacity)))
}

#[inline]
pub fn create_xml_reader(content: &[u8]) -> Reader<&[u8]> {
    let mut reader = Reader::from_reader(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().enable_all_checks(false);
    // The page scanner restarts the reader after every raw-text element,
    // so closing tags routinely arrive without their start tag.
    reader.config_mut().allow_unmatched_ends = true;
    reader
}

/// Read an attribute value, unescaped. `None` if the attribute is absent.
pub fn attr_value(elem: &BytesStart<'_>, name: &str) -> Result<Option<String>, HeadError> {
    for attr in elem.html_attributes().flatten() {
        if attr.key.as_ref().eq_ignore_ascii_case(name.as_bytes()) {
            let raw = String::from_utf8_lossy(&attr.value);
            return Ok(Some(unescape(&raw)?.into_owned()));
        }
    }
    Ok(None)
}

/// Write a text element: `<tag>text</tag>`.
#[inline]
pub fn write_text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<(), HeadError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Write an empty element with attributes: `<tag attr1="val1" ... />`.
#[inline]
pub fn write_empty_elem(
    writer: &mut XmlWriter,
    tag: &str,
    attrs: &[(&str, &str)],
) -> Result<(), HeadError> {
    let mut elem = BytesStart::new(tag);
    for (k, v) in attrs {
        elem.push_attribute((*k, *v));
    }
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

/// Write a JSON-LD script block keyed by `data-schema-id`.
///
/// Script content is raw text in HTML, so the body is written unescaped;
/// `</` is broken up to keep the block from closing early.
pub fn write_json_script(writer: &mut XmlWriter, id: &str, json: &str) -> Result<(), HeadError> {
    let mut elem = BytesStart::new("script");
    elem.push_attribute(("type", "application/ld+json"));
    elem.push_attribute(("data-schema-id", id));
    writer.write_event(Event::Start(elem))?;
    let body = json.replace("</", "<\\/");
    writer.write_event(Event::Text(BytesText::from_escaped(body)))?;
    writer.write_event(Event::End(BytesEnd::new("script")))?;
    Ok(())
}

/// Write a raw-text element (`<script>`, `<style>`) read from a source page.
///
/// The content is copied as bytes, whatever its encoding.
pub fn write_raw_text_element(
    writer: &mut XmlWriter,
    start: BytesStart<'_>,
    text: &[u8],
) -> Result<(), HeadError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    writer.write_event(Event::Start(start))?;
    writer.get_mut().write_all(text)?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(writer: XmlWriter) -> String {
        String::from_utf8(writer.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn test_write_empty_elem_escapes_attrs() {
        let mut writer = create_xml_writer(64);
        write_empty_elem(
            &mut writer,
            "meta",
            &[("name", "description"), ("content", "Rain & \"wind\"")],
        )
        .unwrap();
        assert_eq!(
            written(writer),
            r#"<meta name="description" content="Rain &amp; &quot;wind&quot;"/>"#
        );
    }

    #[test]
    fn test_write_json_script_keeps_json_raw() {
        let mut writer = create_xml_writer(64);
        write_json_script(&mut writer, "x", r#"{"name":"A & B","u":"</script>"}"#).unwrap();
        assert_eq!(
            written(writer),
            r#"<script type="application/ld+json" data-schema-id="x">{"name":"A & B","u":"<\/script>"}</script>"#
        );
    }

    #[test]
    fn test_reader_accepts_unmatched_end() {
        let mut reader = create_xml_reader(b"</body></html>");
        assert!(matches!(reader.read_event(), Ok(Event::End(_))));
        assert!(matches!(reader.read_event(), Ok(Event::End(_))));
        assert!(matches!(reader.read_event(), Ok(Event::Eof)));
    }

    #[test]
    fn test_write_raw_text_element_copies_bytes() {
        let mut writer = create_xml_writer(32);
        write_raw_text_element(&mut writer, BytesStart::new("style"), b"a{b:\"\xFF\"}").unwrap();
        assert_eq!(
            writer.into_inner().into_inner(),
            b"<style>a{b:\"\xFF\"}</style>".to_vec()
        );
    }

    #[test]
    fn test_attr_value_unescapes() {
        let mut reader = create_xml_reader(br#"<meta name="title" content="Rain &amp; Wind">"#);
        let Ok(Event::Start(elem)) = reader.read_event() else {
            panic!("expected start tag");
        };
        assert_eq!(
            attr_value(&elem, "content").unwrap().as_deref(),
            Some("Rain & Wind")
        );
        assert_eq!(attr_value(&elem, "property").unwrap(), None);
    }
}
