use std::path::Path;
use std::sync::Arc;

use iris_neat::{ArtifactStore, Population, ResultViewer};

/// Read-only state shared by every request handler.
///
/// Artifacts are read from disk on each request, so no locking is needed.
pub struct ViewerState {
    pub viewer: ResultViewer<Population>,
}

impl ViewerState {
    pub fn new(artifacts_dir: &Path) -> Self {
        ViewerState { viewer: ResultViewer::new(ArtifactStore::new(artifacts_dir)) }
    }
}

pub type SharedState = Arc<ViewerState>;
