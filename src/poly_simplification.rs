use std::path::Path;

use error_stack::{Result, ResultExt};
use rayon::prelude::*;
use serde::Serialize;

use crate::douglas_peucker::simplify;
use crate::errors::{PolyIoError, SimplificationError};
use crate::poly::{Poly, Polygon};

/// Vertex counts of one ring before and after simplification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingSummary {
    pub name: String,
    pub hole: bool,
    pub original_vertices: usize,
    pub simplified_vertices: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimplifiedPoly {
    pub poly: Poly,
    pub summaries: Vec<RingSummary>,
}

impl SimplifiedPoly {
    pub fn original_vertices(&self) -> usize {
        self.summaries.iter().map(|s| s.original_vertices).sum()
    }

    pub fn simplified_vertices(&self) -> usize {
        self.summaries.iter().map(|s| s.simplified_vertices).sum()
    }
}

/// Simplifies a single ring. With no tolerance the ring passes through unchanged.
pub fn simplify_polygon(
    polygon: &Polygon,
    epsilon: Option<f64>
) -> Result<(Polygon, RingSummary), SimplificationError> {
    let ring = match epsilon {
        Some(epsilon) => simplify(&polygon.ring, epsilon)
            .change_context_lazy(|| SimplificationError { ring: polygon.name.clone() })?,
        None => polygon.ring.clone(),
    };

    log::debug!("ring {:?}: {} -> {} vertices", polygon.name, polygon.ring.len(), ring.len());

    let summary = RingSummary {
        name: polygon.name.clone(),
        hole: polygon.is_hole(),
        original_vertices: polygon.ring.len(),
        simplified_vertices: ring.len(),
    };

    Ok((Polygon { name: polygon.name.clone(), ring }, summary))
}

/// Simplifies every ring of `poly` independently on the rayon pool. Rings
/// keep their input order.
pub fn simplify_poly(poly: &Poly, epsilon: Option<f64>) -> Result<SimplifiedPoly, SimplificationError> {
    let results: Vec<(Polygon, RingSummary)> = poly.polygons.par_iter()
        .map(|polygon| simplify_polygon(polygon, epsilon))
        .collect::<Result<Vec<_>, SimplificationError>>()?;

    let (polygons, summaries): (Vec<Polygon>, Vec<RingSummary>) = results.into_iter().unzip();
    let simplified = SimplifiedPoly {
        poly: Poly { name: poly.name.clone(), polygons },
        summaries,
    };

    log::info!("{}: {} rings, {} -> {} vertices",
        poly.name,
        simplified.summaries.len(),
        simplified.original_vertices(),
        simplified.simplified_vertices());

    Ok(simplified)
}

pub fn write_summary_csv<P: AsRef<Path>>(path: P, summaries: &[RingSummary]) -> Result<(), PolyIoError> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .change_context(PolyIoError)
        .attach_printable_lazy(|| format!("could not create {}", path.display()))?;

    for summary in summaries {
        writer.serialize(summary).change_context(PolyIoError)?;
    }

    writer.flush().change_context(PolyIoError)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::geodesy::GeoPoint;
    use crate::poly::read_poly;

    const FIXTURE: &str = "tests/fixtures/sample.poly";

    #[test]
    fn test_no_tolerance_passes_through() {
        let poly = read_poly(FIXTURE).unwrap();
        let simplified = simplify_poly(&poly, None).unwrap();
        assert_eq!(simplified.poly, poly);
        assert_eq!(simplified.original_vertices(), simplified.simplified_vertices());
    }

    #[test]
    fn test_simplify_fixture() {
        let poly = read_poly(FIXTURE).unwrap();
        let simplified = simplify_poly(&poly, Some(50.0)).unwrap();

        assert_eq!(simplified.poly.name, "lake_geneva");
        let names: Vec<&str> = simplified.poly.polygons.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["1", "!2"]);

        // of the three points stacked near (46.3, 6.5) only the northernmost survives
        let outer = &simplified.summaries[0];
        assert_eq!(outer.original_vertices, 7);
        assert_eq!(outer.simplified_vertices, 5);
        assert!(!outer.hole);

        let hole = &simplified.summaries[1];
        assert!(hole.hole);
        assert_eq!(hole.simplified_vertices, 3);
    }

    #[test]
    fn test_ring_error_names_ring() {
        let poly = Poly {
            name: String::from("p"),
            polygons: vec![Polygon { name: String::from("bad"), ring: vec![GeoPoint::new(0.0, 0.0)] }],
        };
        let err = simplify_poly(&poly, Some(1.0)).unwrap_err();
        assert_eq!(err.current_context().ring, "bad");
    }

    #[test]
    fn test_write_summary_csv() {
        let summaries = vec![
            RingSummary {
                name: String::from("1"),
                hole: false,
                original_vertices: 10,
                simplified_vertices: 4,
            },
            RingSummary {
                name: String::from("!2"),
                hole: true,
                original_vertices: 3,
                simplified_vertices: 3,
            },
        ];

        let path = std::env::temp_dir().join(format!("polyramen_summary_{}.csv", std::process::id()));
        write_summary_csv(&path, &summaries).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(contents,
            "name,hole,original_vertices,simplified_vertices\n1,false,10,4\n!2,true,3,3\n");
    }
}
