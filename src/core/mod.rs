//! Core migration logic, free of file-system access
//!
//! - date: post date parsing, correction and formatting
//! - metadata: canonical post metadata and virtual title inference
//! - frontmatter: Hexo front matter construction
//! - destination: output path computation

pub mod date;
pub mod destination;
pub mod frontmatter;
pub mod metadata;

pub use destination::DestinationResolver;
pub use frontmatter::{FrontmatterBlock, FrontmatterBuilder};
pub use metadata::{Metadata, PostStatus, SidecarRecord};
