//! Frame extraction: selects node objects matching a frame document and
//! embeds the nodes they reference, producing a shaped subgraph.
//!
//! Matching is intentionally simple. A node matches when the frame's `@type`
//! (if any) intersects the node's types and every non-keyword property named
//! by the frame exists on the node. Matched nodes are deep-embedded: bare
//! `{"@id": x}` references are replaced with the full node object for `x`
//! when it exists in the graph, with a visited set stopping cycles.

use crate::consts::{KW_CONTEXT, KW_GRAPH, KW_ID, KW_TYPE};
use anyhow::{anyhow, Result};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Collects the node objects of a document regardless of its output shape:
/// `@graph` arrays, bare arrays, and subject-keyed mappings are all accepted.
fn collect_nodes(document: &Value) -> Result<Vec<Value>> {
    if let Some(graph) = document.get(KW_GRAPH) {
        let arr = graph
            .as_array()
            .ok_or_else(|| anyhow!("@graph is not an array"))?;
        return Ok(arr.clone());
    }
    if let Some(arr) = document.as_array() {
        return Ok(arr.clone());
    }
    if let Some(obj) = document.as_object() {
        return Ok(obj
            .iter()
            .filter(|(key, _)| !key.starts_with('@'))
            .map(|(_, node)| node.clone())
            .collect());
    }
    Err(anyhow!("Document has no recognizable node collection"))
}

fn as_string_set(value: &Value) -> HashSet<&str> {
    match value {
        Value::String(s) => HashSet::from([s.as_str()]),
        Value::Array(items) => items.iter().filter_map(|v| v.as_str()).collect(),
        _ => HashSet::new(),
    }
}

/// Tests whether a node object satisfies the frame's constraints. An empty
/// frame matches every node.
fn matches_frame(node: &Value, frame: &Value) -> bool {
    let Some(frame_obj) = frame.as_object() else {
        return false;
    };
    let Some(node_obj) = node.as_object() else {
        return false;
    };
    for (key, constraint) in frame_obj {
        match key.as_str() {
            KW_CONTEXT | KW_ID => continue,
            KW_TYPE => {
                let wanted = as_string_set(constraint);
                if wanted.is_empty() {
                    // wildcard type constraint ({} or []): any typed node
                    if !node_obj.contains_key(KW_TYPE) {
                        return false;
                    }
                    continue;
                }
                let present = node_obj.get(KW_TYPE).map(as_string_set).unwrap_or_default();
                if wanted.is_disjoint(&present) {
                    return false;
                }
            }
            _ => {
                if !node_obj.contains_key(key) {
                    return false;
                }
            }
        }
    }
    true
}

/// Returns the target id when `value` is a bare node reference.
fn reference_id(value: &Value) -> Option<&str> {
    let obj = value.as_object()?;
    if obj.len() == 1 {
        obj.get(KW_ID)?.as_str()
    } else {
        None
    }
}

/// Recursively replaces node references with their referents. `visited` holds
/// the ids on the current embedding path so that cycles fall back to a bare
/// reference instead of recursing forever.
fn embed(value: &Value, by_id: &HashMap<&str, &Value>, visited: &mut HashSet<String>) -> Value {
    match value {
        Value::Object(map) => {
            if let Some(id) = reference_id(value) {
                if let Some(target) = by_id.get(id) {
                    if visited.insert(id.to_string()) {
                        let embedded = embed(target, by_id, visited);
                        visited.remove(id);
                        return embedded;
                    }
                    // cycle: keep the reference
                    return value.clone();
                }
            }
            let mut out = Map::new();
            for (key, val) in map {
                if key == KW_CONTEXT {
                    out.insert(key.clone(), val.clone());
                } else {
                    out.insert(key.clone(), embed(val, by_id, visited));
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| embed(item, by_id, visited))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Frames `document` against `frame_doc`, returning a new document whose
/// `@graph` holds the matched, embedded nodes. The frame's `@context` wins
/// over the input's when both are present.
pub fn frame(document: &Value, frame_doc: &Value) -> Result<Value> {
    let nodes = collect_nodes(document)?;
    let by_id: HashMap<&str, &Value> = nodes
        .iter()
        .filter_map(|node| node.get(KW_ID).and_then(|id| id.as_str()).map(|id| (id, node)))
        .collect();

    let mut framed = Vec::new();
    for node in &nodes {
        if matches_frame(node, frame_doc) {
            let id = node.get(KW_ID).and_then(|v| v.as_str());
            let mut visited: HashSet<String> =
                id.map(|i| HashSet::from([i.to_string()])).unwrap_or_default();
            framed.push(embed(node, &by_id, &mut visited));
        }
    }

    let mut out = Map::new();
    let context = frame_doc
        .get(KW_CONTEXT)
        .or_else(|| document.get(KW_CONTEXT));
    if let Some(ctx) = context {
        out.insert(KW_CONTEXT.to_string(), ctx.clone());
    }
    out.insert(KW_GRAPH.to_string(), Value::Array(framed));
    Ok(Value::Object(out))
}
