//! Route geometry primitives

use serde::{Deserialize, Serialize};

/// A `(longitude, latitude)` position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Longitude in degrees (-180 to 180)
    pub lon: f64,
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
}

impl Position {
    /// Create a position from longitude and latitude
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether both coordinates are finite and within WGS84 ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

/// Ordered sequence of positions describing a path
///
/// An empty line string is valid and means "nothing to draw".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineString(Vec<Position>);

impl LineString {
    /// Create a line string from positions
    #[must_use]
    pub const fn new(positions: Vec<Position>) -> Self {
        Self(positions)
    }

    /// Build from `(lon, lat)` pairs
    pub fn from_pairs(pairs: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(lon, lat)| Position::new(lon, lat))
                .collect(),
        )
    }

    /// Number of positions
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there is nothing to draw
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The positions in path order
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.0
    }

    /// The first position that is out of range or non-finite, if any
    #[must_use]
    pub fn first_invalid(&self) -> Option<(usize, Position)> {
        self.0
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_valid())
            .map(|(i, p)| (i, *p))
    }

    /// Bounding box of all positions, `None` when empty
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let mut iter = self.0.iter();
        let first = iter.next()?;
        Some(iter.fold(Bounds::from_position(*first), |mut b, p| {
            b.extend(*p);
            b
        }))
    }
}

/// Axis-aligned bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Western edge
    pub min_lon: f64,
    /// Southern edge
    pub min_lat: f64,
    /// Eastern edge
    pub max_lon: f64,
    /// Northern edge
    pub max_lat: f64,
}

impl Bounds {
    /// A degenerate box around a single position
    #[must_use]
    pub const fn from_position(p: Position) -> Self {
        Self {
            min_lon: p.lon,
            min_lat: p.lat,
            max_lon: p.lon,
            max_lat: p.lat,
        }
    }

    /// Grow the box to include `p`
    pub fn extend(&mut self, p: Position) {
        self.min_lon = self.min_lon.min(p.lon);
        self.min_lat = self.min_lat.min(p.lat);
        self.max_lon = self.max_lon.max(p.lon);
        self.max_lat = self.max_lat.max(p.lat);
    }

    /// Smallest box containing both `self` and `other`
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }

    /// Whether `p` lies inside or on the edge of the box
    #[must_use]
    pub fn contains(&self, p: Position) -> bool {
        (self.min_lon..=self.max_lon).contains(&p.lon)
            && (self.min_lat..=self.max_lat).contains(&p.lat)
    }
}
