//! Minimal owned element tree built from `quick-xml` events.
//!
//! BGG responses are small (a user profile, or at most a few thousand
//! collection items), so the mapper works on a fully materialized tree
//! instead of streaming.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Concatenated direct text and CDATA content
    pub text: String,
    pub children: Vec<XmlElement>,
}

fn malformed(detail: impl std::fmt::Display) -> AppError {
    AppError::MalformedResponse(detail.to_string())
}

fn decode(bytes: &[u8]) -> AppResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(malformed)
}

impl XmlElement {
    /// Parses a complete document and returns its root element.
    ///
    /// The document must contain exactly one root element and every tag must
    /// be balanced.
    pub fn parse(input: &str) -> AppResult<XmlElement> {
        let mut reader = Reader::from_str(input);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(malformed("multiple root elements"));
                    }
                    stack.push(Self::from_start(e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let element = Self::from_start(e)?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| malformed("unexpected closing tag"))?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(ref t)) => {
                    let text = t.unescape().map_err(malformed)?;
                    match stack.last_mut() {
                        Some(current) => current.text.push_str(&text),
                        None if text.trim().is_empty() => {}
                        None => return Err(malformed("text outside of root element")),
                    }
                }
                Ok(Event::CData(t)) => {
                    let text = decode(&t.into_inner())?;
                    match stack.last_mut() {
                        Some(current) => current.text.push_str(&text),
                        None => return Err(malformed("CDATA outside of root element")),
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(malformed(format!(
                        "at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(malformed(format!("unclosed element <{}>", open.name)));
        }

        root.ok_or_else(|| malformed("document has no root element"))
    }

    fn from_start(start: &BytesStart<'_>) -> AppResult<XmlElement> {
        let name = decode(start.name().as_ref())?;
        let mut attributes = Vec::new();

        for attr in start.attributes() {
            let attr = attr.map_err(malformed)?;
            let key = decode(attr.key.as_ref())?;
            let value = attr.unescape_value().map_err(malformed)?;
            attributes.push((key, value.into_owned()));
        }

        Ok(XmlElement {
            name,
            attributes,
            ..Default::default()
        })
    }

    fn attach(
        stack: &mut [XmlElement],
        root: &mut Option<XmlElement>,
        element: XmlElement,
    ) -> AppResult<()> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_some() => return Err(malformed("multiple root elements")),
            None => *root = Some(element),
        }
        Ok(())
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given tag
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Text of the first direct child named `name`, or `""`
    pub fn child_text(&self, name: &str) -> String {
        self.child(name).map(|c| c.text.clone()).unwrap_or_default()
    }

    /// `value` attribute of the first direct child named `name`, or `""`
    pub fn child_value(&self, name: &str) -> String {
        self.child(name)
            .and_then(|c| c.attr("value"))
            .unwrap_or_default()
            .to_string()
    }

    /// Every element named `name` in this subtree, self included, in document order
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        if self.name == name {
            found.push(self);
        }
        for child in &self.children {
            child.collect_named(name, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_document() {
        let root = XmlElement::parse(
            r#"<?xml version="1.0" encoding="utf-8"?>
            <items totalitems="1">
                <item objectid="13"><name sortindex="1">Catan &amp; Friends</name></item>
            </items>"#,
        )
        .unwrap();

        assert_eq!(root.name, "items");
        assert_eq!(root.attr("totalitems"), Some("1"));
        let item = root.child("item").unwrap();
        assert_eq!(item.attr("objectid"), Some("13"));
        assert_eq!(item.child_text("name"), "Catan & Friends");
        assert_eq!(item.child_text("missing"), "");
    }

    #[test]
    fn test_cdata_is_text() {
        let root = XmlElement::parse("<a><b><![CDATA[x < y]]></b></a>").unwrap();
        assert_eq!(root.child_text("b"), "x < y");
    }

    #[test]
    fn test_child_value_reads_value_attribute() {
        let root = XmlElement::parse(r#"<user><country value="NL"/><blank/></user>"#).unwrap();
        assert_eq!(root.child_value("country"), "NL");
        assert_eq!(root.child_value("blank"), "");
        assert_eq!(root.child_value("absent"), "");
    }

    #[test]
    fn test_descendants_flattens_across_parents() {
        let root = XmlElement::parse(
            r#"<r><g><item id="1"/><item id="2"/></g><item id="3"><item id="4"/></item></r>"#,
        )
        .unwrap();

        let ids: Vec<_> = root
            .descendants("item")
            .iter()
            .filter_map(|e| e.attr("id"))
            .collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_empty_body_is_malformed() {
        assert!(matches!(
            XmlElement::parse(""),
            Err(AppError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_unclosed_element_is_malformed() {
        assert!(matches!(
            XmlElement::parse("<items><item>"),
            Err(AppError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_mismatched_tags_are_malformed() {
        assert!(matches!(
            XmlElement::parse("<items></item>"),
            Err(AppError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_second_root_is_malformed() {
        assert!(matches!(
            XmlElement::parse("<a/><b/>"),
            Err(AppError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_plain_text_is_malformed() {
        assert!(matches!(
            XmlElement::parse("Rate limit exceeded"),
            Err(AppError::MalformedResponse(_))
        ));
    }
}
