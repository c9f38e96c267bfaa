//! Serializable views of lookup results, plus their plain-text rendering.

use serde::Serialize;
use std::fmt;
use yaml_locus_engine::{
    AddressCodec, LineColumn, LineRange, NodeId, Span, SyntaxError, YamlDocument,
};

#[derive(Debug, Serialize)]
pub struct NodeReport {
    pub id: NodeId,
    pub kind: &'static str,
    pub span: Span,
    pub range: LineRange,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl NodeReport {
    pub fn new<C: AddressCodec>(doc: &YamlDocument<C>, id: NodeId) -> Option<Self> {
        let node = doc.node(id)?;
        Some(Self {
            id,
            kind: node.kind.name(),
            span: doc.to_char_span(node.span),
            range: doc.to_line_column(Some(id)),
            address: doc.address_of(id),
            value: node.scalar_value().map(str::to_string),
        })
    }
}

impl fmt::Display for NodeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}..{} [{}-{}]",
            self.kind,
            self.span.start,
            self.span.end,
            position(self.range.from),
            position(self.range.to)
        )?;
        if !self.address.is_empty() {
            write!(f, " {}", self.address)?;
        }
        if let Some(value) = &self.value {
            write!(f, " {value:?}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct OutlineEntry {
    pub depth: usize,
    #[serde(flatten)]
    pub node: NodeReport,
}

pub fn outline<C: AddressCodec>(doc: &YamlDocument<C>) -> Vec<OutlineEntry> {
    doc.tree()
        .iter()
        .filter_map(|(id, _)| {
            Some(OutlineEntry {
                depth: doc.tree().depth(id),
                node: NodeReport::new(doc, id)?,
            })
        })
        .collect()
}

impl fmt::Display for OutlineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", "  ".repeat(self.depth), self.node)
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub message: String,
    pub span: Span,
    pub at: LineColumn,
}

pub fn errors<C: AddressCodec>(doc: &YamlDocument<C>) -> Vec<ErrorReport> {
    doc.errors()
        .iter()
        .map(|error: &SyntaxError| {
            let span = doc.to_char_span(Span::from(error.range));
            ErrorReport {
                message: error.message.clone(),
                span,
                at: doc.offset_to_line_column(span.start),
            }
        })
        .collect()
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", position(Some(self.at)), self.message)
    }
}

/// One-based `line:column` for people reading terminal output.
fn position(at: Option<LineColumn>) -> String {
    match at {
        Some(at) => format!("{}:{}", at.line + 1, at.column + 1),
        None => "-".to_string(),
    }
}
