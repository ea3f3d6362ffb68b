//! Context compaction: rewrites long IRIs in a grouped document as the short
//! terms a JSON-LD context defines for them.
//!
//! This is a deliberately small, pure rewriting pass. Terms that map to a
//! full IRI compact exactly; terms whose IRI is a namespace prefix of the
//! target compact to `term:suffix`, longest namespace first. Keys beginning
//! with `@` are JSON-LD keywords and are never rewritten, and the `@context`
//! subtree is passed through untouched.

use crate::consts::{KW_CONTEXT, KW_ID, KW_TYPE};
use serde_json::{Map, Value};

/// A term definition extracted from a context: the short name and the IRI it
/// expands to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TermDef {
    term: String,
    iri: String,
}

/// Pulls term -> IRI definitions out of a context document. Accepts either a
/// bare context object or a wrapper with an `@context` key. String
/// definitions and `{"@id": ...}` definitions are supported; anything else
/// is ignored.
fn term_definitions(context: &Value) -> Vec<TermDef> {
    let ctx = match context.get(KW_CONTEXT) {
        Some(inner) => inner,
        None => context,
    };
    let mut defs = Vec::new();
    if let Some(obj) = ctx.as_object() {
        for (term, def) in obj {
            if term.starts_with('@') {
                continue;
            }
            let iri = match def {
                Value::String(s) => Some(s.clone()),
                Value::Object(map) => map.get(KW_ID).and_then(|v| v.as_str()).map(String::from),
                _ => None,
            };
            if let Some(iri) = iri {
                defs.push(TermDef {
                    term: term.clone(),
                    iri,
                });
            }
        }
    }
    // longest namespace wins when several prefixes match
    defs.sort_by(|a, b| b.iri.len().cmp(&a.iri.len()));
    defs
}

/// Compacts a single IRI against the term table.
fn compact_iri(iri: &str, defs: &[TermDef]) -> String {
    for def in defs {
        if iri == def.iri {
            return def.term.clone();
        }
    }
    for def in defs {
        if let Some(suffix) = iri.strip_prefix(&def.iri) {
            if !suffix.is_empty() {
                return format!("{}:{}", def.term, suffix);
            }
        }
    }
    iri.to_string()
}

fn compact_value(value: &Value, defs: &[TermDef]) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::new();
            for (key, val) in map {
                if key == KW_CONTEXT {
                    out.insert(key.clone(), val.clone());
                    continue;
                }
                let new_key = if key.starts_with('@') {
                    key.clone()
                } else {
                    compact_iri(key, defs)
                };
                let new_val = match key.as_str() {
                    KW_ID | KW_TYPE => match val {
                        Value::String(s) => Value::String(compact_iri(s, defs)),
                        Value::Array(items) => Value::Array(
                            items
                                .iter()
                                .map(|item| match item {
                                    Value::String(s) => Value::String(compact_iri(s, defs)),
                                    other => compact_value(other, defs),
                                })
                                .collect(),
                        ),
                        other => compact_value(other, defs),
                    },
                    _ => compact_value(val, defs),
                };
                out.insert(new_key, new_val);
            }
            Value::Object(out)
        }
        Value::Array(items) => {
            Value::Array(items.iter().map(|item| compact_value(item, defs)).collect())
        }
        other => other.clone(),
    }
}

/// Rewrites IRIs in `document` using the terms defined by `context`.
///
/// Property keys, `@id` values, and `@type` values are compacted; literal
/// `@value` strings are data, not identifiers, and are left alone.
pub fn compact(document: &Value, context: &Value) -> Value {
    let defs = term_definitions(context);
    if defs.is_empty() {
        return document.clone();
    }
    compact_value(document, &defs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> Value {
        json!({
            "@context": {
                "foaf": "http://xmlns.com/foaf/0.1/",
                "name": "http://xmlns.com/foaf/0.1/name",
                "ex": "http://example.org/",
                "Person": {"@id": "http://xmlns.com/foaf/0.1/Person"}
            }
        })
    }

    #[test]
    fn exact_term_match_beats_prefix() {
        let defs = term_definitions(&context());
        assert_eq!(
            compact_iri("http://xmlns.com/foaf/0.1/name", &defs),
            "name"
        );
        assert_eq!(
            compact_iri("http://xmlns.com/foaf/0.1/knows", &defs),
            "foaf:knows"
        );
        assert_eq!(
            compact_iri("http://xmlns.com/foaf/0.1/Person", &defs),
            "Person"
        );
    }

    #[test]
    fn unmatched_iris_pass_through() {
        let defs = term_definitions(&context());
        assert_eq!(
            compact_iri("http://other.org/thing", &defs),
            "http://other.org/thing"
        );
    }

    #[test]
    fn compacts_keys_ids_and_types() {
        let doc = json!({
            "@graph": [{
                "@id": "http://example.org/Alice",
                "@type": "http://xmlns.com/foaf/0.1/Person",
                "http://xmlns.com/foaf/0.1/knows": {"@id": "http://example.org/Bob"}
            }]
        });
        let compacted = compact(&doc, &context());
        assert_eq!(
            compacted,
            json!({
                "@graph": [{
                    "@id": "ex:Alice",
                    "@type": "Person",
                    "foaf:knows": {"@id": "ex:Bob"}
                }]
            })
        );
    }

    #[test]
    fn literal_values_are_not_rewritten() {
        let doc = json!({
            "@graph": [{
                "@id": "http://example.org/a",
                "http://xmlns.com/foaf/0.1/name": {"@value": "http://example.org/not-an-id"}
            }]
        });
        let compacted = compact(&doc, &context());
        assert_eq!(
            compacted["@graph"][0]["name"]["@value"],
            "http://example.org/not-an-id"
        );
    }

    #[test]
    fn context_subtree_is_untouched() {
        let ctx = context();
        let doc = json!({
            "@context": {"ex": "http://example.org/"},
            "@graph": []
        });
        let compacted = compact(&doc, &ctx);
        assert_eq!(compacted["@context"], json!({"ex": "http://example.org/"}));
    }
}
