mod tile;

pub use tile::{MarkerOffset, Tile, tile_for, tile_url};
