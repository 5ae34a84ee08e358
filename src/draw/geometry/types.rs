//! Core value types for EAGLE geometry: points, boxes, rotations and the
//! flip/offset/scale context every primitive renders against.

use crate::draw::layers::LayerSet;
use serde::{Deserialize, Serialize};

/// A 2D point in native document units (millimetres)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box, `min` is the bottom-left corner in EAGLE's y-up space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Box of half-extent `margin` around `center`
    pub fn around(center: Point, margin: f64) -> Self {
        Self {
            min: Point::new(center.x - margin, center.y - margin),
            max: Point::new(center.x + margin, center.y + margin),
        }
    }

    /// Tight box around a set of points; `None` when there are none.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| {
            acc.union(&Self::new(*p, *p))
        }))
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn expand(&self, margin: f64) -> BoundingBox {
        BoundingBox {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }

    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Direction multiplier for one output axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn factor(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

impl TryFrom<i8> for Sign {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Sign::Positive),
            -1 => Ok(Sign::Negative),
            other => Err(format!("flip component must be 1 or -1, got {other}")),
        }
    }
}

impl From<Sign> for i8 {
    fn from(sign: Sign) -> Self {
        match sign {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }
}

/// Per-axis flip applied before offset and scale. Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flip(pub Sign, pub Sign);

impl Flip {
    pub fn x(self) -> Sign {
        self.0
    }

    pub fn y(self) -> Sign {
        self.1
    }
}

impl Default for Flip {
    /// EAGLE is y-up, SVG is y-down
    fn default() -> Self {
        Flip(Sign::Positive, Sign::Negative)
    }
}

/// Decoded EAGLE rotation string such as `R90`, `MR180` or `SMR45`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rotation {
    pub degrees: f64,
    pub mirrored: bool,
    pub spin: bool,
}

impl Rotation {
    /// Parse the `rot` attribute format. Returns `None` for anything that is
    /// not `[S][M][R]<number>`.
    pub fn parse(value: &str) -> Option<Self> {
        let mut rest = value.trim();
        let mut rotation = Rotation::default();
        if let Some(stripped) = rest.strip_prefix('S') {
            rotation.spin = true;
            rest = stripped;
        }
        if let Some(stripped) = rest.strip_prefix('M') {
            rotation.mirrored = true;
            rest = stripped;
        }
        rest = rest.strip_prefix('R').unwrap_or(rest);
        rotation.degrees = rest.parse().ok()?;
        rotation.degrees.is_finite().then_some(rotation)
    }

    /// Angle snapped to the nearest quarter turn, in `0..360`
    pub fn quadrant(&self) -> u16 {
        let quarters = (self.degrees / 90.0).round().rem_euclid(4.0);
        (quarters as u16) * 90
    }
}

/// Everything a primitive needs to place itself in output space
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub offset: Point,
    pub scale: f64,
    pub flip: Flip,
    pub layers: &'a LayerSet,
}

impl<'a> RenderContext<'a> {
    pub fn new(offset: Point, scale: f64, flip: Flip, layers: &'a LayerSet) -> Self {
        Self {
            offset,
            scale,
            flip,
            layers,
        }
    }

    /// `((x * flip_x) + offset_x) * scale`
    pub fn project_x(&self, x: f64) -> f64 {
        ((x * self.flip.x().factor()) + self.offset.x) * self.scale
    }

    /// `((y * flip_y) + offset_y) * scale`
    pub fn project_y(&self, y: f64) -> f64 {
        ((y * self.flip.y().factor()) + self.offset.y) * self.scale
    }

    pub fn project(&self, point: Point) -> Point {
        Point::new(self.project_x(point.x), self.project_y(point.y))
    }
}
