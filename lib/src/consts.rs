//! Defines constant NamedNodeRefs for RDF terms the converter cares about,
//! plus the JSON-LD keywords used when shaping output documents.

use oxigraph::model::NamedNodeRef;

pub const XSD_STRING: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#string");

// JSON-LD keywords
pub const KW_ID: &str = "@id";
pub const KW_VALUE: &str = "@value";
pub const KW_TYPE: &str = "@type";
pub const KW_LANGUAGE: &str = "@language";
pub const KW_GRAPH: &str = "@graph";
pub const KW_CONTEXT: &str = "@context";

/// Prefix applied to blank node labels to match the JSON-LD identifier convention.
pub const BLANK_NODE_PREFIX: &str = "_:";
