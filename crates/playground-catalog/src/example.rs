//! Example references and manifest parsing

use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleRef {
    /// Label shown in the example selector
    pub name: String,
    /// Location of the program text, relative to the examples root
    pub file: String,
}

impl ExampleRef {
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }
}

/// Parse an `index.json` manifest, keeping manifest order
pub fn parse_manifest(text: &str) -> Result<Vec<ExampleRef>> {
    let examples: Vec<ExampleRef> = serde_json::from_str(text)?;
    Ok(examples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    #[test]
    fn test_parse_manifest_keeps_order() {
        let examples = parse_manifest(
            r#"[
                {"name": "Identity", "file": "id.rufus"},
                {"name": "Twice", "file": "twice.rufus"},
                {"name": "Fibonacci", "file": "fib.rufus"}
            ]"#,
        )
        .unwrap();

        let names: Vec<&str> = examples.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Identity", "Twice", "Fibonacci"]);
        assert_eq!(examples[0], ExampleRef::new("Identity", "id.rufus"));
    }

    #[test]
    fn test_parse_empty_manifest() {
        assert!(parse_manifest("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_manifest() {
        assert!(matches!(
            parse_manifest("{\"name\": \"Identity\"}"),
            Err(CatalogError::Manifest(_))
        ));
        assert!(matches!(
            parse_manifest(r#"[{"name": "Identity"}]"#),
            Err(CatalogError::Manifest(_))
        ));
        assert!(matches!(
            parse_manifest("<html>404</html>"),
            Err(CatalogError::Manifest(_))
        ));
    }
}
