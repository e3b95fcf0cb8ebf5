//! Catalog loader

use std::sync::Arc;

use crate::example::{parse_manifest, ExampleRef};
use crate::fetcher::{fetcher_for_root, ResourceFetcher};
use crate::Result;

/// Manifest file name under the examples root
pub const MANIFEST_FILE: &str = "index.json";

#[derive(Clone)]
pub struct CatalogLoader {
    fetcher: Arc<dyn ResourceFetcher>,
}

impl CatalogLoader {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self { fetcher }
    }

    pub fn from_root(root: &str) -> Result<Self> {
        Ok(Self::new(fetcher_for_root(root)?))
    }

    pub fn root(&self) -> String {
        self.fetcher.root()
    }

    /// Fetch and parse the manifest
    pub async fn load_catalog(&self) -> Result<Vec<ExampleRef>> {
        let text = self.fetcher.fetch_text(MANIFEST_FILE).await?;
        let examples = parse_manifest(&text)?;

        tracing::info!(
            root = %self.fetcher.root(),
            examples = examples.len(),
            "Loaded example catalog"
        );

        Ok(examples)
    }

    /// Fetch the program text of one example
    pub async fn load_example(&self, example: &ExampleRef) -> Result<String> {
        let program = self.fetcher.fetch_text(&example.file).await?;

        tracing::debug!(
            name = %example.name,
            file = %example.file,
            bytes = program.len(),
            "Loaded example"
        );

        Ok(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::fetcher::MemoryFetcher;

    fn loader(fetcher: MemoryFetcher) -> CatalogLoader {
        CatalogLoader::new(Arc::new(fetcher))
    }

    #[tokio::test]
    async fn test_load_catalog_and_example() {
        let loader = loader(
            MemoryFetcher::new()
                .with(MANIFEST_FILE, r#"[{"name":"Identity","file":"id.rufus"}]"#)
                .with("id.rufus", "fun x -> x"),
        );

        let examples = loader.load_catalog().await.unwrap();
        assert_eq!(examples, vec![ExampleRef::new("Identity", "id.rufus")]);

        let program = loader.load_example(&examples[0]).await.unwrap();
        assert_eq!(program, "fun x -> x");
    }

    #[tokio::test]
    async fn test_missing_manifest() {
        let loader = loader(MemoryFetcher::new());
        assert!(matches!(
            loader.load_catalog().await,
            Err(CatalogError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_malformed_manifest() {
        let loader = loader(MemoryFetcher::new().with(MANIFEST_FILE, "not json"));
        assert!(matches!(
            loader.load_catalog().await,
            Err(CatalogError::Manifest(_))
        ));
    }

    #[tokio::test]
    async fn test_from_directory_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"[{"name":"Twice","file":"twice.rufus"}]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("twice.rufus"), "twice inc 0").unwrap();

        let loader = CatalogLoader::from_root(dir.path().to_str().unwrap()).unwrap();
        let examples = loader.load_catalog().await.unwrap();
        assert_eq!(loader.load_example(&examples[0]).await.unwrap(), "twice inc 0");
    }
}
