//! Hypocenter coordinate parsing
//!
//! Coordinates are written as a fixed-width signed token such as
//! `+35.6+139.7-10000/`: five characters of latitude, six of longitude, then
//! depth and terminator, which are ignored.

const LAT_WIDTH: usize = 5;
const LON_WIDTH: usize = 6;

/// Extract `(lat, lon)` from a coordinate token
///
/// Slices shorter than their width are parsed as they are; any slice that
/// does not parse as a number yields `(0.0, 0.0)`.
pub fn parse_coordinate(token: &str) -> (f64, f64) {
    parse_fields(token).unwrap_or((0.0, 0.0))
}

/// Same as [`parse_coordinate`] for an optional token
pub fn parse_optional_coordinate(token: Option<&str>) -> (f64, f64) {
    token.map(parse_coordinate).unwrap_or((0.0, 0.0))
}

fn parse_fields(token: &str) -> Option<(f64, f64)> {
    let mut chars = token.chars();
    let lat: String = chars.by_ref().take(LAT_WIDTH).collect();
    let lon: String = chars.take(LON_WIDTH).collect();

    let lat = lat.trim().parse::<f64>().ok()?;
    let lon = lon.trim().parse::<f64>().ok()?;
    if !lat.is_finite() || !lon.is_finite() {
        return None;
    }
    Some((lat, lon))
}
