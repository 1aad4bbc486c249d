//! Content module - per-day payloads and the stores that serve them

mod frontmatter;
mod loader;
mod markdown;
mod payload;
mod store;

pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::ContentLoader;
pub use markdown::{MarkdownRenderer, DEFAULT_THEME};
pub use payload::{ContentPayload, Resource};
pub use store::{ContentStore, DirectoryStore, MemoryStore, StoreError};
