mod elevation_response;
mod resolver;

pub use resolver::resolve;
