pub mod events;
mod position;
mod status;
mod terrain;

pub use position::Position;
pub use status::Status;
pub use terrain::TerrainDescription;
