pub mod fs;
pub mod mirror;
pub mod reader;
pub mod scanner;
pub mod writer;

pub use fs::{is_markdown, is_sidecar, LocalFs, PostFs};
pub use mirror::TreeMirror;
pub use reader::{read_post, MetadataResolver, PostRecord, Resolution};
pub use scanner::{PostSet, Scanner, ScannerConfig};
pub use writer::{PostWriter, WriteOutcome};
