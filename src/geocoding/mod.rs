mod search;

pub use search::{GeocodingError, PlaceMatch, search};
