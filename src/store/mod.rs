pub mod artifact;
pub mod store;

pub use artifact::{custom_artifact_name, default_artifact_name, unix_timestamp, GenomeArtifact};
pub use store::ArtifactStore;
