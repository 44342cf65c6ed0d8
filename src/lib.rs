pub mod errors;
pub mod geodesy;
pub mod douglas_peucker;
pub mod poly;
pub mod geojson_output;
pub mod poly_simplification;
