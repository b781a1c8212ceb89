use std::f64::consts::PI;

/// Web Mercator latitude limit; the projection diverges beyond it.
const MAX_LATITUDE: f64 = 85.051_128_78;
const TILE_SIZE: u32 = 256;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub zoom: u8,
}

/// Pixel offset of a coordinate within its tile, for marker placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerOffset {
    pub x: u32,
    pub y: u32,
}

/// The slippy-map tile containing the coordinate at the given zoom, with the
/// marker offset inside it. The zoom is clamped to the provider maximum and
/// the latitude to the Web Mercator range.
pub fn tile_for(latitude: f64, longitude: f64, zoom: u8, max_zoom: u8) -> (Tile, MarkerOffset) {
    let zoom = zoom.min(max_zoom);
    let n = 1u32 << zoom;

    let latitude = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let x = (longitude + 180.0) / 360.0 * f64::from(n);
    let y = (1.0 - latitude.to_radians().tan().asinh() / PI) / 2.0 * f64::from(n);

    let tile_x = (x.floor() as u32).min(n - 1);
    let tile_y = (y.floor() as u32).min(n - 1);

    let marker = MarkerOffset {
        x: (((x - f64::from(tile_x)) * f64::from(TILE_SIZE)).round() as u32).min(TILE_SIZE - 1),
        y: (((y - f64::from(tile_y)) * f64::from(TILE_SIZE)).round() as u32).min(TILE_SIZE - 1),
    };

    (Tile { x: tile_x, y: tile_y, zoom }, marker)
}

/// Expands a Leaflet-style `{s}/{z}/{x}/{y}` template. The subdomain is picked
/// deterministically from the tile coordinates, spreading load the way tile
/// clients do.
pub fn tile_url(template: &str, subdomains: &str, tile: &Tile) -> String {
    let mut url = template
        .replace("{z}", &tile.zoom.to_string())
        .replace("{x}", &tile.x.to_string())
        .replace("{y}", &tile.y.to_string());

    if url.contains("{s}") {
        url = url.replace("{s}", &pick_subdomain(subdomains, tile));
    }
    url
}

fn pick_subdomain(subdomains: &str, tile: &Tile) -> String {
    let count = subdomains.chars().count();
    if count == 0 {
        return String::new();
    }

    let index = (tile.x as usize + tile.y as usize) % count;
    subdomains.chars().nth(index).map(String::from).unwrap_or_default()
}
