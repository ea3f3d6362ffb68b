use anyhow::{Context, Result};

use std::io::BufReader;
use std::path::Path;

use oxigraph::io::{RdfFormat, RdfParser};
use oxigraph::model::Triple;

use crate::options::Overwrite;
use log::{debug, info};

/// Reads an RDF file into an ordered sequence of triples, in document order.
///
/// Document order matters downstream: the grouper's output key order follows
/// the first occurrence of each subject and predicate. The format is chosen
/// by file extension, defaulting to Turtle. Only the default graph is kept.
pub fn read_turtle_file(file: &Path) -> Result<Vec<Triple>> {
    debug!("Reading file: {}", file.display());
    let filename = file;
    let file = std::fs::File::open(file)
        .with_context(|| format!("Failed to open input file {}", filename.display()))?;
    let content: BufReader<_> = BufReader::new(file);
    let content_type = filename.extension().and_then(|ext| ext.to_str());
    let content_type = content_type.and_then(|ext| match ext {
        "ttl" => Some(RdfFormat::Turtle),
        "xml" => Some(RdfFormat::RdfXml),
        "n3" => Some(RdfFormat::Turtle),
        "nt" => Some(RdfFormat::NTriples),
        _ => None,
    });
    let parser = RdfParser::from_format(content_type.unwrap_or(RdfFormat::Turtle));
    let mut triples = Vec::new();
    let parser = parser.for_reader(content);
    for quad in parser {
        let quad =
            quad.with_context(|| format!("Failed to parse {}", filename.display()))?;
        triples.push(Triple::new(quad.subject, quad.predicate, quad.object));
    }

    Ok(triples)
}

/// Writes a JSON document to a file as indented text, creating parent
/// directories as needed. Under `Overwrite::Preserve` an existing file is an
/// error rather than silently replaced.
pub fn write_json_to_file(path: &Path, document: &serde_json::Value, overwrite: Overwrite) -> Result<()> {
    if path.exists() && !overwrite.as_bool() {
        return Err(anyhow::anyhow!(
            "Output file {} already exists; pass overwrite to replace it",
            path.display()
        ));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    info!("Writing JSON-LD document to {}", path.display());
    let text = serde_json::to_string_pretty(document)?;
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_turtle_file() {
        // testing turtle file
        let triples = read_turtle_file(Path::new("fixtures/model.ttl")).unwrap();
        assert_eq!(triples.len(), 5);

        // testing ntriples file
        let triples = read_turtle_file(Path::new("fixtures/model.nt")).unwrap();
        assert_eq!(triples.len(), 2);

        // reading non-existent file should return an error
        let result = read_turtle_file(Path::new("fixtures/non-existent.ttl"));
        assert!(result.is_err());
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out").join("doc.json");
        let doc = serde_json::json!({"@graph": []});
        write_json_to_file(&target, &doc, Overwrite::Allow).unwrap();
        let text = std::fs::read_to_string(&target).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_write_json_preserve_refuses_clobber() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("doc.json");
        let doc = serde_json::json!({"@graph": []});
        write_json_to_file(&target, &doc, Overwrite::Allow).unwrap();
        let result = write_json_to_file(&target, &doc, Overwrite::Preserve);
        assert!(result.is_err());
    }
}
