use std::path::PathBuf;

use ttl2jsonld::{Config, Converter, DocumentSource, Strategy};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

#[test]
fn convert_without_context_produces_graph_document() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("model.jsonld");
    let config = Config::builder()
        .input(fixture("model.ttl"))
        .output(output.clone())
        .build()
        .unwrap();

    let report = Converter::new(config).run().unwrap();
    assert_eq!(report.triples, 5);
    assert_eq!(report.subjects, 2);

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let graph = doc["@graph"].as_array().unwrap();
    assert_eq!(graph.len(), 2);

    let alice = graph
        .iter()
        .find(|n| n["@id"] == "http://example.org/Alice")
        .unwrap();
    let knows = alice["http://xmlns.com/foaf/0.1/knows"].as_array().unwrap();
    assert_eq!(knows[0]["@id"], "http://example.org/Bob");
    assert_eq!(knows[1]["@id"], "http://example.org/Carol");
    // single-valued predicates are bare objects, not arrays
    assert!(alice["http://xmlns.com/foaf/0.1/name"].is_object());
    assert_eq!(alice["http://xmlns.com/foaf/0.1/name"]["@value"], "Alice");
}

#[test]
fn convert_with_context_compacts_iris() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("compacted.jsonld");
    let config = Config::builder()
        .input(fixture("model.ttl"))
        .output(output.clone())
        .context(Some(DocumentSource::File(fixture("context.json"))))
        .build()
        .unwrap();

    Converter::new(config).run().unwrap();
    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();

    let graph = doc["@graph"].as_array().unwrap();
    let alice = graph.iter().find(|n| n["@id"] == "ex:Alice").unwrap();
    assert_eq!(alice["foaf:knows"][0]["@id"], "ex:Bob");
    assert_eq!(alice["name"]["@value"], "Alice");

    let bob = graph.iter().find(|n| n["@id"] == "ex:Bob").unwrap();
    assert_eq!(bob["name"]["@value"], "Bob");
    assert_eq!(bob["name"]["@language"], "en");
}

#[test]
fn convert_with_frame_selects_and_embeds() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("framed.jsonld");
    let config = Config::builder()
        .input(fixture("model.ttl"))
        .output(output.clone())
        .context(Some(DocumentSource::File(fixture("context.json"))))
        .frame(Some(DocumentSource::File(fixture("frame.json"))))
        .build()
        .unwrap();

    Converter::new(config).run().unwrap();
    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();

    // only Alice has foaf:knows, and Bob is embedded where Carol (not in the
    // input) stays a bare reference
    let graph = doc["@graph"].as_array().unwrap();
    assert_eq!(graph.len(), 1);
    let alice = &graph[0];
    assert_eq!(alice["@id"], "ex:Alice");
    let knows = alice["foaf:knows"].as_array().unwrap();
    assert_eq!(knows[0]["name"]["@value"], "Bob");
    assert_eq!(knows[1], serde_json::json!({"@id": "ex:Carol"}));
}

#[test]
fn flat_strategy_writes_bare_array() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("flat.jsonld");
    let config = Config::builder()
        .input(fixture("model.ttl"))
        .output(output.clone())
        .strategy(Strategy::Flat)
        .build()
        .unwrap();

    Converter::new(config).run().unwrap();
    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert!(doc.is_array());
    assert_eq!(doc.as_array().unwrap().len(), 2);
}

#[test]
fn basic_strategy_keys_by_subject() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("basic.jsonld");
    let config = Config::builder()
        .input(fixture("model.ttl"))
        .output(output.clone())
        .strategy(Strategy::Basic)
        .build()
        .unwrap();

    Converter::new(config).run().unwrap();
    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let alice = &doc["http://example.org/Alice"];
    assert_eq!(alice["@id"], "http://example.org/Alice");
}

#[test]
fn missing_input_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("never.jsonld");
    let config = Config::builder()
        .input(dir.path().join("missing.ttl"))
        .output(output.clone())
        .build()
        .unwrap();

    let result = Converter::new(config).run();
    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn offline_url_context_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("never.jsonld");
    let config = Config::builder()
        .input(fixture("model.ttl"))
        .output(output.clone())
        .context(Some(DocumentSource::Url(
            "http://example.org/context.json".to_string(),
        )))
        .offline(true)
        .build()
        .unwrap();

    let result = Converter::new(config).run();
    assert!(result.is_err());
    assert!(!output.exists());
}
