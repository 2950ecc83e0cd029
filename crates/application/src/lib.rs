mod error;
mod ports;
mod session;
mod use_cases;

pub use error::ApplicationError;
pub use ports::{
    ExportArtifact, FileScanSummary, FileScanner, ImageExporter, ImageRenderer, MetadataReader,
};
pub use session::ViewerSession;
pub use use_cases::{ViewerCommand, ViewerOutcome};
