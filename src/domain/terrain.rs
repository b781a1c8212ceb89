/// AI-generated description of the surroundings of a position. Only meaningful
/// relative to the position that produced it; the store clears it on every
/// position change.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainDescription {
    /// Elevation in meters as reported by the analysis, not by the elevation resolver.
    pub elevation: f64,
    pub location_name: String,
    pub features: Vec<String>,
    pub climate_zone: String,
    pub notable_fact: String,
}
