//! Reader and writer for the osmosis bounding-polygon (`.poly`) text format.
//!
//! A file holds one named poly set made of named rings. Each ring lists one
//! `longitude latitude` pair per line and is terminated by `END`; a final
//! `END` closes the set. Rings whose name starts with `!` are holes.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Write};
use std::path::Path;

use error_stack::{bail, Report, Result, ResultExt};

use crate::errors::{PolyIoError, PolyParseError};
use crate::geodesy::GeoPoint;

const SENTINEL: &str = "END";

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub name: String,
    /// Open ring, the closing point is not stored.
    pub ring: Vec<GeoPoint>,
}

impl Polygon {
    pub fn is_hole(&self) -> bool {
        self.name.starts_with('!')
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Poly {
    pub name: String,
    pub polygons: Vec<Polygon>,
}

struct PolyLines<R> {
    lines: Lines<R>,
    line_num: usize,
}

impl<R: BufRead> PolyLines<R> {
    fn next_line(&mut self) -> Result<Option<String>, PolyParseError> {
        match self.lines.next() {
            None => Ok(None),
            Some(line) => {
                self.line_num += 1;
                let line = line.change_context(PolyParseError::Unreadable { line: self.line_num })?;
                Ok(Some(line.trim().to_string()))
            }
        }
    }

    fn expect_line(&mut self) -> Result<String, PolyParseError> {
        self.next_line()?
            .ok_or_else(|| Report::new(PolyParseError::MissingEnd { line: self.line_num }))
    }
}

fn parse_coordinate(s: &str, line_num: usize) -> Result<GeoPoint, PolyParseError> {
    let malformed = || PolyParseError::MalformedCoordinate {
        line: line_num,
        content: s.to_string(),
    };

    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != 2 {
        bail!(malformed());
    }

    let lon = parts[0].parse::<f64>().change_context_lazy(malformed)?;
    let lat = parts[1].parse::<f64>().change_context_lazy(malformed)?;
    if !lon.is_finite() || !lat.is_finite() {
        bail!(malformed());
    }

    Ok(GeoPoint::new(lat, lon))
}

/// Parses a poly set, dropping each ring's closing point when it repeats the
/// first point within 1e-5 degrees.
pub fn parse_poly<R: BufRead>(reader: R) -> Result<Poly, PolyParseError> {
    let mut lines = PolyLines { lines: reader.lines(), line_num: 0 };

    let name = match lines.next_line()? {
        Some(name) => name,
        None => bail!(PolyParseError::Empty),
    };

    let mut polygons = Vec::new();
    let mut line = lines.expect_line()?;
    while line != SENTINEL {
        let ring_name = line;
        let mut ring = Vec::new();

        let mut coord_line = lines.expect_line()?;
        while coord_line != SENTINEL {
            ring.push(parse_coordinate(&coord_line, lines.line_num)?);
            coord_line = lines.expect_line()?;
        }

        if ring.len() >= 2 && ring[0].approx_eq(&ring[ring.len() - 1]) {
            ring.pop();
        }
        if ring.len() < 2 {
            bail!(PolyParseError::RingTooShort { line: lines.line_num, name: ring_name });
        }

        polygons.push(Polygon { name: ring_name, ring });
        line = lines.expect_line()?;
    }

    log::debug!("parsed poly {:?} with {} rings", name, polygons.len());

    Ok(Poly { name, polygons })
}

pub fn read_poly<P: AsRef<Path>>(path: P) -> Result<Poly, PolyIoError> {
    let path = path.as_ref();
    let file = File::open(path)
        .change_context(PolyIoError)
        .attach_printable_lazy(|| format!("could not open {}", path.display()))?;

    parse_poly(BufReader::new(file))
        .change_context(PolyIoError)
        .attach_printable_lazy(|| format!("could not parse {}", path.display()))
}

/// Writes `poly` back out, re-appending each ring's first point to close it.
pub fn write_poly<W: Write>(poly: &Poly, mut writer: W) -> Result<(), PolyIoError> {
    writeln!(writer, "{}", poly.name).change_context(PolyIoError)?;

    for polygon in &poly.polygons {
        writeln!(writer, "{}", polygon.name).change_context(PolyIoError)?;
        for point in &polygon.ring {
            writeln!(writer, "{} {}", point.lon, point.lat).change_context(PolyIoError)?;
        }
        if let Some(first) = polygon.ring.first() {
            writeln!(writer, "{} {}", first.lon, first.lat).change_context(PolyIoError)?;
        }
        writeln!(writer, "{}", SENTINEL).change_context(PolyIoError)?;
    }

    writeln!(writer, "{}", SENTINEL).change_context(PolyIoError)?;
    writer.flush().change_context(PolyIoError)
}
