//! Ordered vertex sequences: open [`LineString`]s and closed [`Polygon`]s.
use crate::error::Error;
use crate::geometry::{Coord, Line, Triangle};

/// A finite ordered sequence of points, open (no closure invariant).
#[derive(Debug, Clone, PartialEq)]
pub struct LineString(pub Vec<Coord>);

impl LineString {
    pub fn new(points: Vec<Coord>) -> Self {
        Self(points)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn points(&self) -> &[Coord] {
        &self.0
    }

    /// Half-open slice `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> LineString {
        LineString(self.0[start..end].to_vec())
    }

    /// Adjacent-pair segments.
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.0.windows(2).map(|w| Line::new(w[0], w[1]))
    }

    /// Consecutive-triple triangles.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.0.windows(3).map(|w| Triangle::new(w[0], w[1], w[2]))
    }

    /// Close the line string into a [`Polygon`], appending the first point
    /// again if needed.
    pub fn into_polygon(mut self) -> Result<Polygon, Error> {
        if self.0.is_empty() {
            return Err(Error::InvalidPolygon("polygon has no vertices".into()));
        }
        if self.0.first() != self.0.last() {
            let first = self.0[0];
            self.0.push(first);
        }
        Polygon::new(self.0)
    }
}

/// A closed [`LineString`]: first and last point are identical.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon(Vec<Coord>);

impl Polygon {
    /// Fails with [`Error::Closure`] if the endpoints differ, or
    /// [`Error::InvalidPolygon`] if there are fewer than 3 distinct vertices.
    pub fn new(points: Vec<Coord>) -> Result<Self, Error> {
        if points.len() < 4 {
            return Err(Error::InvalidPolygon(format!(
                "polygon needs at least 3 distinct vertices plus closing repeat, got {}",
                points.len()
            )));
        }
        if points.first() != points.last() {
            return Err(Error::Closure);
        }
        Ok(Self(points))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn points(&self) -> &[Coord] {
        &self.0
    }

    /// Number of distinct vertices (i.e. excluding the closing repeat).
    pub fn n_distinct(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.0.windows(2).map(|w| Line::new(w[0], w[1]))
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.0.windows(3).map(|w| Triangle::new(w[0], w[1], w[2]))
    }

    pub fn as_open(&self) -> LineString {
        LineString(self.0.clone())
    }

    /// Half-open slice `[start, end)` that does not cross the seam.
    pub fn slice(&self, start: usize, end: usize) -> LineString {
        LineString(self.0[start..end].to_vec())
    }

    /// Slice across the wraparound seam: `start..len-1` followed by `0..=end`,
    /// used when splitting the boundary at hull vertices `start` and `end`
    /// where `end < start`.
    pub fn seam_slice(&self, start: usize, end: usize) -> LineString {
        if start <= end {
            return self.slice(start, end + 1);
        }
        let last = self.0.len() - 1;
        let mut points = self.0[start..last].to_vec();
        points.extend_from_slice(&self.0[0..=end]);
        LineString(points)
    }
}

/// Concatenate open polylines whose shared endpoints match exactly into one.
///
/// Fails with [`Error::Seam`] if consecutive polylines do not share an
/// endpoint.
pub fn merge(line_strings: impl IntoIterator<Item = LineString>) -> Result<LineString, Error> {
    let mut iter = line_strings.into_iter();
    let first = iter
        .next()
        .ok_or_else(|| Error::InvalidPolygon("no polylines to merge".into()))?;
    let mut points = first.0;
    for ls in iter {
        if ls.0.first() != points.last() {
            return Err(Error::Seam);
        }
        points.extend_from_slice(&ls.0[1..]);
    }
    Ok(LineString(points))
}
