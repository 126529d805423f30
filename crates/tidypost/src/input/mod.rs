//! Loading post datasets from delimited files.

mod loader;
mod source;

pub use loader::{Loader, LoaderConfig};
pub use source::SourceMetadata;
