use std::path::PathBuf;

use sift_domain::{ExportReport, RenderedImage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerCommand {
    SetOrigin(PathBuf),
    SetDestination(PathBuf),
    Advance,
    Retreat,
    ExportCurrent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerOutcome {
    Unchanged,
    Rendered(RenderedImage),
    Cleared,
    Exported(ExportReport),
    ExportSkipped,
}
