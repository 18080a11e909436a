pub mod csv;
pub mod dataset;
pub mod record;
pub mod species;

pub use dataset::Dataset;
pub use record::Record;
pub use species::Species;
