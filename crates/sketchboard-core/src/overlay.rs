//! Step-revealable vector overlay.
//!
//! The overlay is an externally-authored SVG document flattened into an
//! ordered list of revealable nodes. The source text is the canonical
//! stored form; the node list is derived from it and rebuilt after
//! deserialization so restored documents re-render identically.

use kurbo::Point;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("invalid vector document: {0}")]
    Parse(#[from] roxmltree::Error),
    #[error("document root is not an svg element")]
    NotSvg,
}

/// Tags that never produce visible output on their own.
const NON_VISUAL_TAGS: &[&str] = &[
    "defs",
    "metadata",
    "title",
    "desc",
    "style",
    "linearGradient",
    "radialGradient",
    "pattern",
    "clipPath",
    "mask",
    "symbol",
    "filter",
    "script",
];

/// Leaf tags that draw something.
const VISUAL_LEAF_TAGS: &[&str] = &[
    "path", "rect", "circle", "ellipse", "line", "polyline", "polygon", "text", "image", "use",
];

/// Container tags that may hold visual content.
const CONTAINER_TAGS: &[&str] = &["g", "a", "svg", "switch"];

/// One revealable node: the raw markup slice for a top-level element.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayNode {
    pub markup: String,
    pub id: Option<String>,
}

/// Overlay document plus its rigid transform and reveal state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Overlay {
    /// Original document text; everything else derives from it.
    pub source: String,
    /// The document's own view-box string, preserved verbatim.
    pub view_box: Option<String>,
    pub position: Point,
    pub scale: f64,
    pub rotation: f64,
    /// Per-node visibility flags, parallel to the node list.
    pub visible: Vec<bool>,
    /// How many nodes the reveal cursor has uncovered.
    pub cursor: usize,
    #[serde(skip)]
    nodes: Vec<OverlayNode>,
}

impl Overlay {
    /// Parse a vector document into an overlay. On error nothing is
    /// constructed, so callers keep their previous state.
    pub fn from_source(source: String) -> Result<Self, OverlayError> {
        let (nodes, view_box) = parse_nodes(&source)?;
        let visible = vec![false; nodes.len()];
        Ok(Self {
            source,
            view_box,
            position: Point::ZERO,
            scale: 1.0,
            rotation: 0.0,
            visible,
            cursor: 0,
            nodes,
        })
    }

    /// Rebuild the derived node list from the stored source, after
    /// deserialization. Visibility flags are resized to match.
    pub fn rehydrate(&mut self) -> Result<(), OverlayError> {
        let (nodes, view_box) = parse_nodes(&self.source)?;
        self.visible.resize(nodes.len(), false);
        self.cursor = self.cursor.min(nodes.len());
        self.view_box = view_box;
        self.nodes = nodes;
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[OverlayNode] {
        &self.nodes
    }

    /// Step the reveal cursor by a signed amount, clamped to the node
    /// count. Nodes below the cursor become visible, the rest hidden.
    pub fn step_cursor(&mut self, delta: isize) {
        let len = self.nodes.len() as isize;
        self.cursor = (self.cursor as isize + delta).clamp(0, len) as usize;
        for (i, v) in self.visible.iter_mut().enumerate() {
            *v = i < self.cursor;
        }
    }

    pub fn reveal_all(&mut self) {
        self.cursor = self.nodes.len();
        self.visible.iter_mut().for_each(|v| *v = true);
    }

    /// Markup of the currently visible nodes, in document order.
    pub fn visible_markup(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .zip(&self.visible)
            .filter(|(_, v)| **v)
            .map(|(n, _)| n.markup.as_str())
    }
}

fn parse_nodes(source: &str) -> Result<(Vec<OverlayNode>, Option<String>), OverlayError> {
    let doc = Document::parse(source)?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(OverlayError::NotSvg);
    }
    let view_box = root.attribute("viewBox").map(str::to_owned);

    let mut nodes = Vec::new();
    for child in root.children().filter(Node::is_element) {
        let tag = child.tag_name().name();
        if NON_VISUAL_TAGS.contains(&tag) {
            continue;
        }
        let revealable = if CONTAINER_TAGS.contains(&tag) {
            has_visual_descendant(child)
        } else {
            VISUAL_LEAF_TAGS.contains(&tag)
        };
        if !revealable {
            continue;
        }
        nodes.push(OverlayNode {
            markup: source[child.range()].to_owned(),
            id: child.attribute("id").map(str::to_owned),
        });
    }
    Ok((nodes, view_box))
}

fn has_visual_descendant(node: Node) -> bool {
    node.descendants()
        .filter(Node::is_element)
        .any(|d| VISUAL_LEAF_TAGS.contains(&d.tag_name().name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100">
  <defs><linearGradient id="lg"/></defs>
  <rect id="r1" x="0" y="0" width="10" height="10"/>
  <g id="grp"><circle cx="5" cy="5" r="2"/></g>
  <g id="empty-group"><desc>nothing visual</desc></g>
  <metadata>ignored</metadata>
  <path id="p1" d="M0 0 L10 10"/>
</svg>"#;

    #[test]
    fn test_node_extraction() {
        let ov = Overlay::from_source(DOC.to_string()).unwrap();
        let ids: Vec<_> = ov.nodes().iter().map(|n| n.id.as_deref()).collect();
        // defs/metadata excluded, empty group excluded.
        assert_eq!(ids, vec![Some("r1"), Some("grp"), Some("p1")]);
        assert_eq!(ov.view_box.as_deref(), Some("0 0 200 100"));
    }

    #[test]
    fn test_markup_is_source_slice() {
        let ov = Overlay::from_source(DOC.to_string()).unwrap();
        assert!(ov.nodes()[0].markup.starts_with("<rect"));
        assert!(ov.nodes()[1].markup.contains("<circle"));
    }

    #[test]
    fn test_invalid_document_rejected() {
        assert!(Overlay::from_source("<svg><unclosed".to_string()).is_err());
        assert!(Overlay::from_source("<html/>".to_string()).is_err());
    }

    #[test]
    fn test_reveal_cursor_stepping() {
        let mut ov = Overlay::from_source(DOC.to_string()).unwrap();
        assert_eq!(ov.visible_markup().count(), 0);

        ov.step_cursor(2);
        assert_eq!(ov.cursor, 2);
        assert_eq!(ov.visible_markup().count(), 2);

        // Clamped at both ends.
        ov.step_cursor(10);
        assert_eq!(ov.cursor, 3);
        ov.step_cursor(-10);
        assert_eq!(ov.cursor, 0);
        assert_eq!(ov.visible_markup().count(), 0);
    }

    #[test]
    fn test_rehydrate_after_roundtrip() {
        let mut ov = Overlay::from_source(DOC.to_string()).unwrap();
        ov.step_cursor(2);

        let json = serde_json::to_string(&ov).unwrap();
        let mut restored: Overlay = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.node_count(), 0);

        restored.rehydrate().unwrap();
        assert_eq!(restored.node_count(), 3);
        assert_eq!(restored.cursor, 2);
        assert_eq!(restored.visible_markup().count(), 2);
    }
}
