//! Rufus Playground Example Catalog
//!
//! Examples live under a static root next to a manifest:
//! - `<root>/index.json` lists `{ "name", "file" }` entries in display order
//! - each `file` is a path relative to the same root holding raw program text
//!
//! The root is either an `http(s)://` URL or a local directory.

mod error;
mod example;
mod fetcher;
mod loader;

pub use error::CatalogError;
pub use example::{parse_manifest, ExampleRef};
pub use fetcher::{fetcher_for_root, FileFetcher, HttpFetcher, MemoryFetcher, ResourceFetcher};
pub use loader::{CatalogLoader, MANIFEST_FILE};

pub type Result<T> = std::result::Result<T, CatalogError>;
