//! In-memory head model.

use super::xml::{XmlWriter, create_xml_writer, write_empty_elem, write_json_script, write_text_element};
use super::{HeadError, HeadSink, MetaAttr, MetaKey};
use quick_xml::events::{BytesText, Event};

/// A managed tag inside `<head>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadNode {
    Title(String),
    Meta {
        attr: MetaAttr,
        name: String,
        content: String,
    },
    Link {
        rel: String,
        href: String,
    },
    /// `<script type="application/ld+json" data-schema-id="{id}">`
    Script {
        id: String,
        body: String,
    },
}

impl HeadNode {
    /// CSS selector that finds this node.
    pub fn selector(&self) -> String {
        match self {
            Self::Title(_) => "title".to_owned(),
            Self::Meta { attr, name, .. } => format!("meta[{}=\"{name}\"]", attr.as_str()),
            Self::Link { rel, .. } => format!("link[rel=\"{rel}\"]"),
            Self::Script { id, .. } => format!("script[data-schema-id=\"{id}\"]"),
        }
    }

    fn is_meta(&self, key: MetaKey<'_>) -> bool {
        matches!(self, Self::Meta { attr, name, .. } if *attr == key.attr && name == key.name)
    }

    fn is_script(&self, script_id: &str) -> bool {
        matches!(self, Self::Script { id, .. } if id == script_id)
    }

    fn write(&self, writer: &mut XmlWriter) -> Result<(), HeadError> {
        match self {
            Self::Title(text) => write_text_element(writer, "title", text),
            Self::Meta {
                attr,
                name,
                content,
            } => write_empty_elem(
                writer,
                "meta",
                &[(attr.as_str(), name.as_str()), ("content", content.as_str())],
            ),
            Self::Link { rel, href } => {
                write_empty_elem(writer, "link", &[("rel", rel.as_str()), ("href", href.as_str())])
            }
            Self::Script { id, body } => write_json_script(writer, id, body),
        }
    }
}

/// Ordered list of head nodes.
///
/// Upserts keep a node at its current position; new nodes are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadDocument {
    nodes: Vec<HeadNode>,
}

impl HeadDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[HeadNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes matching a selector produced by [`HeadNode::selector`]
    /// or [`MetaKey::selector`].
    pub fn select(&self, selector: &str) -> Vec<&HeadNode> {
        self.nodes
            .iter()
            .filter(|node| node.selector() == selector)
            .collect()
    }

    pub fn count(&self, selector: &str) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.selector() == selector)
            .count()
    }

    pub fn title(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            HeadNode::Title(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Content of the first `<meta>` matching `key`.
    pub fn meta_content(&self, key: MetaKey<'_>) -> Option<&str> {
        self.meta_contents(key).into_iter().next()
    }

    /// Contents of every `<meta>` matching `key`, in document order.
    pub fn meta_contents(&self, key: MetaKey<'_>) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                HeadNode::Meta { content, .. } if node.is_meta(key) => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn link(&self, rel: &str) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            HeadNode::Link { rel: r, href } if r == rel => Some(href.as_str()),
            _ => None,
        })
    }

    /// Body of the JSON-LD script with the given id.
    pub fn script(&self, id: &str) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            HeadNode::Script { body, .. } if node.is_script(id) => Some(body.as_str()),
            _ => None,
        })
    }

    /// Ids of all JSON-LD scripts, in document order.
    pub fn script_ids(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                HeadNode::Script { id, .. } => Some(id.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Append a node as read from a source document.
    pub(super) fn push_node(&mut self, node: HeadNode) {
        self.nodes.push(node);
    }

    /// Write every node, each preceded by `separator`.
    pub(super) fn write_nodes(
        &self,
        writer: &mut XmlWriter,
        separator: &str,
    ) -> Result<(), HeadError> {
        for node in &self.nodes {
            if !separator.is_empty() {
                writer.write_event(Event::Text(BytesText::from_escaped(separator)))?;
            }
            node.write(writer)?;
        }
        Ok(())
    }

    /// Render the nodes as HTML, one tag per line.
    pub fn to_html(&self) -> Result<String, HeadError> {
        let mut writer = create_xml_writer(self.nodes.len() * 96);
        for node in &self.nodes {
            node.write(&mut writer)?;
            writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;
        }
        let bytes = writer.into_inner().into_inner();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl HeadSink for HeadDocument {
    fn set_title(&mut self, title: &str) {
        match self
            .nodes
            .iter_mut()
            .find(|node| matches!(node, HeadNode::Title(_)))
        {
            Some(HeadNode::Title(text)) => title.clone_into(text),
            _ => self.nodes.insert(0, HeadNode::Title(title.to_owned())),
        }
    }

    fn upsert_meta(&mut self, key: MetaKey<'_>, content: &str) {
        let existing = self.nodes.iter_mut().find(|node| node.is_meta(key));
        match existing {
            Some(HeadNode::Meta { content: c, .. }) => content.clone_into(c),
            _ => self.nodes.push(HeadNode::Meta {
                attr: key.attr,
                name: key.name.to_owned(),
                content: content.to_owned(),
            }),
        }
    }

    fn remove_meta(&mut self, key: MetaKey<'_>) {
        self.nodes.retain(|node| !node.is_meta(key));
    }

    fn replace_meta_group(&mut self, key: MetaKey<'_>, contents: &[String]) {
        let at = self
            .nodes
            .iter()
            .position(|node| node.is_meta(key))
            .unwrap_or(self.nodes.len());
        self.nodes.retain(|node| !node.is_meta(key));

        let group = contents.iter().map(|content| HeadNode::Meta {
            attr: key.attr,
            name: key.name.to_owned(),
            content: content.clone(),
        });
        self.nodes.splice(at..at, group);
    }

    fn upsert_link(&mut self, rel: &str, href: &str) {
        let existing = self
            .nodes
            .iter_mut()
            .find(|node| matches!(node, HeadNode::Link { rel: r, .. } if r == rel));
        match existing {
            Some(HeadNode::Link { href: h, .. }) => href.clone_into(h),
            _ => self.nodes.push(HeadNode::Link {
                rel: rel.to_owned(),
                href: href.to_owned(),
            }),
        }
    }

    fn upsert_script(&mut self, id: &str, json: &str) {
        self.remove_script(id);
        self.nodes.push(HeadNode::Script {
            id: id.to_owned(),
            body: json.to_owned(),
        });
    }

    fn remove_script(&mut self, id: &str) {
        self.nodes.retain(|node| !node.is_script(id));
    }

    fn contains_meta(&self, key: MetaKey<'_>) -> bool {
        self.nodes.iter().any(|node| node.is_meta(key))
    }

    fn contains_script(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node.is_script(id))
    }
}
