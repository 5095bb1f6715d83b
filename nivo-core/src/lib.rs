pub mod dataset;
pub mod error;
pub mod measurement;
pub mod observation;
pub mod station;

pub use dataset::Dataset;
pub use error::{NivoError, Result};
pub use measurement::Measurement;
pub use observation::Observation;
pub use station::{StationCatalog, StationInfo};
