//! City dataset loading.
//!
//! The dataset is a JSON array of `{city, lat, lng}` records, read once at
//! startup (and on refresh) from a file, a URL, or the copy compiled into
//! the binary. Any malformed record fails the whole load.

mod error;
mod loader;
mod source;

pub use error::CityDataError;
pub use loader::{load_cities, parse_cities};
pub use source::CitySource;
