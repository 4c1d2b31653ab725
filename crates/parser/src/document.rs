//! Reference document tree
//!
//! The document is a plain tree of `{kind, attrs, text, children}` nodes,
//! stored as JSON or YAML. It is loaded once into an arena and only read
//! afterwards. Parts of a node that have already been interpreted are
//! excluded from text extraction through an explicit [`Consumed`] set.

use lolgen_common::{GeneratorError, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Handle of a node in a [`DocumentTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Node as it appears in the serialized document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawNode {
    pub kind: String,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
    pub children: Vec<RawNode>,
}

/// Serialization format of a reference document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Guess the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            other => Err(GeneratorError::Parse(format!(
                "Unknown document format '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: String,
    attrs: BTreeMap<String, String>,
    text: String,
    children: Vec<NodeId>,
}

/// Arena-indexed, read-only document tree
#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<NodeData>,
}

/// Nodes whose text has already been interpreted
pub type Consumed = HashSet<NodeId>;

impl DocumentTree {
    pub fn new(root: RawNode) -> Self {
        let mut tree = DocumentTree { nodes: Vec::new() };
        tree.insert(root);
        tree
    }

    fn insert(&mut self, raw: RawNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind: raw.kind,
            attrs: raw.attrs,
            text: raw.text,
            children: Vec::new(),
        });

        let children: Vec<NodeId> = raw.children.into_iter().map(|c| self.insert(c)).collect();
        self.nodes[id.0].children = children;
        id
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let root: RawNode = serde_json::from_str(content)?;
        Ok(Self::new(root))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let root: RawNode = serde_yaml::from_str(content)?;
        Ok(Self::new(root))
    }

    pub fn parse(content: &str, format: DocumentFormat) -> Result<Self> {
        match format {
            DocumentFormat::Json => Self::from_json(content),
            DocumentFormat::Yaml => Self::from_yaml(content),
        }
    }

    /// Load a document, detecting the format from the extension unless given
    pub fn load(path: &Path, format: Option<DocumentFormat>) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Parse(format!("Failed to read document {:?}: {}", path, e))
        })?;

        let format = format.unwrap_or_else(|| DocumentFormat::from_path(path));
        Self::parse(&content, format).map_err(|e| {
            GeneratorError::Parse(format!("Failed to parse document {:?}: {}", path, e))
        })
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn kind(&self, id: NodeId) -> &str {
        &self.nodes[id.0].kind
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0].attrs.get(name).map(String::as_str)
    }

    /// Own text of a node, without its children
    pub fn own_text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn children_of_kind<'a>(
        &'a self,
        id: NodeId,
        kind: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id)
            .iter()
            .copied()
            .filter(move |c| self.kind(*c) == kind)
    }

    pub fn first_child_of_kind(&self, id: NodeId, kind: &str) -> Option<NodeId> {
        self.children_of_kind(id, kind).next()
    }

    /// All descendants of a kind, in document order
    pub fn descendants_of_kind(&self, id: NodeId, kind: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();

        while let Some(node) = stack.pop() {
            if self.kind(node) == kind {
                found.push(node);
            }
            stack.extend(self.children(node).iter().rev().copied());
        }
        found
    }

    /// Own text followed by the children's text, whitespace-joined
    pub fn text(&self, id: NodeId) -> String {
        self.text_excluding(id, &Consumed::new())
    }

    /// Like [`DocumentTree::text`], skipping consumed subtrees
    pub fn text_excluding(&self, id: NodeId, consumed: &Consumed) -> String {
        let mut parts = Vec::new();
        self.collect_text(id, consumed, &mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, id: NodeId, consumed: &Consumed, parts: &mut Vec<&'a str>) {
        if consumed.contains(&id) {
            return;
        }

        let own = self.own_text(id).trim();
        if !own.is_empty() {
            parts.push(own);
        }
        for child in self.children(id) {
            self.collect_text(*child, consumed, parts);
        }
    }

    /// True if a node has neither text nor children
    pub fn is_blank(&self, id: NodeId) -> bool {
        self.children(id).is_empty() && self.own_text(id).trim().is_empty()
    }
}
