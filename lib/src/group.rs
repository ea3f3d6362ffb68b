//! The quad grouper: folds an ordered sequence of triples into a JSON-LD-shaped
//! document, one node object per subject, arrays holding multi-valued predicates.
//!
//! This is a pure transformation over oxigraph terms. It performs no I/O and
//! cannot fail on well-formed triples; malformed input is a precondition
//! violation belonging to the upstream parser.

use crate::consts::{
    BLANK_NODE_PREFIX, KW_CONTEXT, KW_GRAPH, KW_ID, KW_LANGUAGE, KW_TYPE, KW_VALUE, XSD_STRING,
};
use crate::options::Strategy;
use indexmap::IndexMap;
use oxigraph::model::{NamedOrBlankNodeRef, TermRef, Triple};
use serde_json::{Map, Value};

/// JSON-LD value representation of a single RDF object term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueRepr {
    /// A reference to a named resource.
    Iri(String),
    /// A reference to a blank node, stored without the `_:` prefix.
    BlankNode(String),
    /// A literal with its lexical value and optional datatype or language tag.
    /// `xsd:string` datatypes are elided at construction time.
    Literal {
        value: String,
        datatype: Option<String>,
        language: Option<String>,
    },
}

impl ValueRepr {
    /// Builds the representation for an object term.
    ///
    /// Language-tagged literals carry `rdf:langString` as their datatype in
    /// oxigraph; that datatype is implied by the tag and is not repeated here,
    /// so a term never produces both a datatype and a language.
    pub fn from_term(term: TermRef<'_>) -> Self {
        match term {
            TermRef::NamedNode(nn) => ValueRepr::Iri(nn.as_str().to_string()),
            TermRef::BlankNode(bn) => ValueRepr::BlankNode(bn.as_str().to_string()),
            TermRef::Literal(lit) => {
                if let Some(lang) = lit.language() {
                    ValueRepr::Literal {
                        value: lit.value().to_string(),
                        datatype: None,
                        language: Some(lang.to_string()),
                    }
                } else {
                    let dt = lit.datatype();
                    let datatype = if dt == XSD_STRING {
                        None
                    } else {
                        Some(dt.as_str().to_string())
                    };
                    ValueRepr::Literal {
                        value: lit.value().to_string(),
                        datatype,
                        language: None,
                    }
                }
            }
        }
    }

    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        match self {
            ValueRepr::Iri(iri) => {
                obj.insert(KW_ID.to_string(), Value::String(iri.clone()));
            }
            ValueRepr::BlankNode(label) => {
                obj.insert(
                    KW_ID.to_string(),
                    Value::String(format!("{BLANK_NODE_PREFIX}{label}")),
                );
            }
            ValueRepr::Literal {
                value,
                datatype,
                language,
            } => {
                obj.insert(KW_VALUE.to_string(), Value::String(value.clone()));
                if let Some(dt) = datatype {
                    obj.insert(KW_TYPE.to_string(), Value::String(dt.clone()));
                }
                if let Some(lang) = language {
                    obj.insert(KW_LANGUAGE.to_string(), Value::String(lang.clone()));
                }
            }
        }
        Value::Object(obj)
    }
}

/// Entry for one predicate under a subject: a bare value until a second triple
/// with the same subject and predicate arrives, then an ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Single(ValueRepr),
    Multiple(Vec<ValueRepr>),
}

impl PropertyValue {
    /// Upgrades a single value to a sequence, or appends to an existing one.
    fn push(&mut self, value: ValueRepr) {
        match self {
            PropertyValue::Single(existing) => {
                *self = PropertyValue::Multiple(vec![existing.clone(), value]);
            }
            PropertyValue::Multiple(values) => values.push(value),
        }
    }

    pub fn values(&self) -> Vec<&ValueRepr> {
        match self {
            PropertyValue::Single(v) => vec![v],
            PropertyValue::Multiple(vs) => vs.iter().collect(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            PropertyValue::Single(v) => v.to_json(),
            PropertyValue::Multiple(vs) => Value::Array(vs.iter().map(|v| v.to_json()).collect()),
        }
    }
}

/// All properties of one subject, keyed by predicate IRI in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeObject {
    id: String,
    properties: IndexMap<String, PropertyValue>,
}

impl NodeObject {
    fn new(id: String) -> Self {
        Self {
            id,
            properties: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn properties(&self) -> &IndexMap<String, PropertyValue> {
        &self.properties
    }

    pub fn get(&self, predicate: &str) -> Option<&PropertyValue> {
        self.properties.get(predicate)
    }

    /// Renders the node as a JSON object seeded with its `@id`.
    pub fn to_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert(KW_ID.to_string(), Value::String(self.id.clone()));
        for (predicate, value) in &self.properties {
            obj.insert(predicate.clone(), value.to_json());
        }
        Value::Object(obj)
    }
}

/// The grouped document: subject identifier to node object, insertion-ordered
/// by first occurrence so that identical triple order yields identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedDocument {
    nodes: IndexMap<String, NodeObject>,
}

impl GroupedDocument {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, subject: &str) -> Option<&NodeObject> {
        self.nodes.get(subject)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &NodeObject)> {
        self.nodes.iter()
    }

    fn insert(&mut self, subject: String, predicate: String, value: ValueRepr) {
        let node = self
            .nodes
            .entry(subject.clone())
            .or_insert_with(|| NodeObject::new(subject));
        match node.properties.get_mut(&predicate) {
            Some(existing) => existing.push(value),
            None => {
                node.properties.insert(predicate, PropertyValue::Single(value));
            }
        }
    }

    /// Renders the document in the requested shape. The context, when present,
    /// is passed through untouched; this component never computes one.
    pub fn to_json(&self, strategy: Strategy, context: Option<&Value>) -> Value {
        match strategy {
            Strategy::Grouped => {
                let mut obj = Map::new();
                if let Some(ctx) = context {
                    obj.insert(KW_CONTEXT.to_string(), ctx.clone());
                }
                obj.insert(
                    KW_GRAPH.to_string(),
                    Value::Array(self.nodes.values().map(|n| n.to_json()).collect()),
                );
                Value::Object(obj)
            }
            Strategy::Basic => {
                let mut obj = Map::new();
                if let Some(ctx) = context {
                    obj.insert(KW_CONTEXT.to_string(), ctx.clone());
                }
                for (subject, node) in &self.nodes {
                    obj.insert(subject.clone(), node.to_json());
                }
                Value::Object(obj)
            }
            Strategy::Flat => Value::Array(self.nodes.values().map(|n| n.to_json()).collect()),
        }
    }
}

/// Returns the document key for a subject term; blank nodes get the `_:` prefix.
fn subject_key(subject: NamedOrBlankNodeRef<'_>) -> String {
    match subject {
        NamedOrBlankNodeRef::NamedNode(nn) => nn.as_str().to_string(),
        NamedOrBlankNodeRef::BlankNode(bn) => format!("{BLANK_NODE_PREFIX}{}", bn.as_str()),
    }
}

/// Groups an ordered sequence of triples into a [`GroupedDocument`].
///
/// A single sequential pass: subjects and predicates appear in the order they
/// are first seen, and repeated subject/predicate pairs fold into ordered
/// sequences in triple order.
pub fn group_triples(triples: &[Triple]) -> GroupedDocument {
    let mut doc = GroupedDocument::default();
    for triple in triples {
        let subject = subject_key(triple.subject.as_ref());
        let predicate = triple.predicate.as_str().to_string();
        let value = ValueRepr::from_term(triple.object.as_ref());
        doc.insert(subject, predicate, value);
    }
    doc
}
