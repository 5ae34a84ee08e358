//! EAGLE geometry primitives
//!
//! Coordinate system notes:
//! - EAGLE has `(0, 0)` at the bottom left; rectangles are given by their
//!   bottom-left `(x1, y1)` and top-right `(x2, y2)` corners, text `(x, y)` is
//!   the left end of the baseline.
//! - SVG has `(0, 0)` at the top left; `rect` x/y is the top-left corner,
//!   `circle` cx/cy the centre, `text` x/y the left end of the baseline.
//!
//! Every primitive knows its native bounding box and how to turn itself into
//! SVG fragments for a given [`RenderContext`]. A primitive on a hidden or
//! inactive layer renders nothing.

use super::types::{BoundingBox, Point, RenderContext, Rotation, Sign};
use crate::draw::layers::{HOLES_LAYER, PADS_LAYER, PINS_LAYER, SYMBOLS_LAYER, VIAS_LAYER};
use crate::draw::svg::{Fragment, Style};
use serde::Serialize;

/// Grid unit that pin lengths are multiples of (0.1 inch)
pub const PIN_GRID: f64 = 2.54;
/// Radius of the circle marking a pin's connection point
pub const PIN_ORIGIN_RADIUS: f64 = 0.508;

const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";

/// A straight (or arc, when `curve` is set) line segment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wire {
    pub start: Point,
    pub end: Point,
    pub width: f64,
    pub layer: i32,
    /// Arc sweep in degrees; arcs are drawn as their chord
    pub curve: Option<f64>,
    pub cap: Option<String>,
}

impl Wire {
    pub fn bounding_box(&self) -> BoundingBox {
        let pad = self.width / 2.0;
        BoundingBox::new(
            Point::new(self.start.x.min(self.end.x) - pad, self.start.y.min(self.end.y) - pad),
            Point::new(self.start.x.max(self.end.x) + pad, self.start.y.max(self.end.y) + pad),
        )
    }

    pub fn render(&self, ctx: &RenderContext) -> Vec<Fragment> {
        let Some(color) = ctx.layers.get_css_color(self.layer) else {
            return Vec::new();
        };
        let start = ctx.project(self.start);
        let end = ctx.project(self.end);
        vec![Fragment::Line {
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            style: Style::new()
                .with("stroke", color)
                .with_num("stroke-width", self.width * ctx.scale)
                .with("stroke-linecap", "round"),
        }]
    }
}

/// Surface-mount pad, centred on `position`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Smd {
    pub name: String,
    pub position: Point,
    pub dx: f64,
    pub dy: f64,
    pub layer: i32,
    pub roundness: i32,
    pub rotation: Rotation,
    pub stop: bool,
    pub cream: bool,
}

impl Smd {
    /// Extents after applying a quarter-turn rotation
    fn extents(&self) -> (f64, f64) {
        match self.rotation.quadrant() {
            90 | 270 => (self.dy, self.dx),
            _ => (self.dx, self.dy),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let (dx, dy) = self.extents();
        BoundingBox::new(
            Point::new(self.position.x - dx / 2.0, self.position.y - dy / 2.0),
            Point::new(self.position.x + dx / 2.0, self.position.y + dy / 2.0),
        )
    }

    pub fn render(&self, ctx: &RenderContext) -> Vec<Fragment> {
        let Some(color) = ctx.layers.get_css_color(self.layer) else {
            return Vec::new();
        };
        let (dx, dy) = self.extents();
        let fx = ctx.flip.x().factor();
        let fy = ctx.flip.y().factor();
        vec![Fragment::Rect {
            x: ((self.position.x * fx) + ctx.offset.x - dx / 2.0) * ctx.scale,
            y: ((self.position.y * fy) + ctx.offset.y - dy / 2.0) * ctx.scale,
            width: dx * ctx.scale,
            height: dy * ctx.scale,
            style: Style::new().with("fill", color),
        }]
    }
}

/// Text label. Glyph metrics are approximated with a fixed monospace aspect
/// ratio; nothing here measures real fonts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub text: String,
    pub position: Point,
    /// Height of the text
    pub size: f64,
    pub layer: i32,
    /// Stroke weight in percent of `size`
    pub ratio: Option<f64>,
    pub rotation: Rotation,
    pub font: Option<String>,
    pub align: Option<String>,
}

impl Text {
    pub const FONT_FAMILY: &'static str = "Consolas";
    pub const FONT_BASELINE_OFFSET: f64 = 0.25;
    pub const FONT_ASPECT_RATIO: f64 = 0.55;

    /// Approximate `(width, height)` of the rendered string at `scale`
    pub fn calculate_size(&self, scale: f64) -> (f64, f64) {
        let h = self.size * scale;
        let w = h * Self::FONT_ASPECT_RATIO * self.text.chars().count() as f64;
        (w, h)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let (w, h) = self.calculate_size(1.0);
        let offset = Self::FONT_BASELINE_OFFSET * self.size;
        BoundingBox::new(
            Point::new(self.position.x, self.position.y - h + offset),
            Point::new(self.position.x + w, self.position.y + offset),
        )
    }

    pub fn render(&self, ctx: &RenderContext) -> Vec<Fragment> {
        let Some(color) = ctx.layers.get_css_color(self.layer) else {
            return Vec::new();
        };
        let (native_width, native_height) = self.calculate_size(1.0);
        let mut x = self.position.x * ctx.flip.x().factor();
        let mut y = self.position.y * ctx.flip.y().factor();

        if ctx.flip.x() == Sign::Negative {
            x -= 2.0 * native_width;
        }
        match ctx.flip.y() {
            Sign::Negative => y += native_height * 0.5,
            Sign::Positive => y -= native_height,
        }

        let transform = format!(
            "scale({} {})",
            i8::from(ctx.flip.x()),
            -i8::from(ctx.flip.y())
        );

        vec![Fragment::Text {
            content: self.text.clone(),
            x: (x + ctx.offset.x) * ctx.scale,
            y: (y + ctx.offset.y) * ctx.scale,
            transform,
            style: Style::new()
                .with("fill", color)
                .with_num("font-size", self.size * ctx.scale)
                .with("font-family", Self::FONT_FAMILY),
        }]
    }
}

/// Filled rectangle given by two opposite corners
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rectangle {
    pub start: Point,
    pub end: Point,
    pub layer: i32,
    pub rotation: Rotation,
}

impl Rectangle {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(
            Point::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
            Point::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y)),
        )
    }

    pub fn render(&self, ctx: &RenderContext) -> Vec<Fragment> {
        let Some(color) = ctx.layers.get_css_color(self.layer) else {
            return Vec::new();
        };
        let fx = ctx.flip.x().factor();
        let fy = ctx.flip.y().factor();
        let x = (self.start.x * fx).min(self.end.x * fx);
        let y = (self.start.y * fy).min(self.end.y * fy);
        vec![Fragment::Rect {
            x: (x + ctx.offset.x) * ctx.scale,
            y: (y + ctx.offset.y) * ctx.scale,
            width: (self.end.x - self.start.x).abs() * ctx.scale,
            height: (self.end.y - self.start.y).abs() * ctx.scale,
            style: Style::new().with("fill", color),
        }]
    }
}

/// Through-hole pad. Always drawn as a circle on the pads layer, whatever
/// its nominal shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pad {
    pub name: String,
    pub position: Point,
    pub drill: f64,
    /// `0` means "automatic" in EAGLE
    pub diameter: f64,
    pub shape: Option<String>,
    pub rotation: Rotation,
    pub stop: bool,
    pub thermals: bool,
    pub first: bool,
}

impl Pad {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::around(self.position, self.diameter / 2.0)
    }

    pub fn render(&self, ctx: &RenderContext) -> Vec<Fragment> {
        let Some(color) = ctx.layers.get_css_color(PADS_LAYER) else {
            return Vec::new();
        };
        let center = ctx.project(self.position);
        vec![Fragment::Circle {
            cx: center.x,
            cy: center.y,
            r: (self.diameter / 2.0) * ctx.scale,
            style: Style::new().with("fill", color).with("stroke-width", 0),
        }]
    }
}

/// Pin length category, in multiples of [`PIN_GRID`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PinLength {
    Point,
    Short,
    #[default]
    Middle,
    Long,
}

impl PinLength {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "point" => Some(PinLength::Point),
            "short" => Some(PinLength::Short),
            "middle" => Some(PinLength::Middle),
            "long" => Some(PinLength::Long),
            _ => None,
        }
    }

    pub fn grid_multiple(self) -> f64 {
        match self {
            PinLength::Point => 0.0,
            PinLength::Short => 1.0,
            PinLength::Middle => 2.0,
            PinLength::Long => 3.0,
        }
    }

    pub fn length(self) -> f64 {
        self.grid_multiple() * PIN_GRID
    }
}

/// Schematic symbol pin. With no rotation the pin is horizontal with its
/// origin on the left; at 90 degrees it is vertical with the origin at the
/// bottom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pin {
    pub name: String,
    pub position: Point,
    pub length: PinLength,
    /// Electrical direction (`io`, `pwr`, `pas`, ...), only used by ERC
    pub direction: Option<String>,
    /// `dot`, `clk` or `dotclk`
    pub function: Option<String>,
    pub rotation: Rotation,
    pub visible: bool,
    pub swap_level: i32,
}

impl Pin {
    /// Far end of the pin line
    pub fn line_endpoint(&self) -> Point {
        let length = self.length.length();
        let Point { x, y } = self.position;
        match self.rotation.quadrant() {
            90 => Point::new(x, y + length),
            180 => Point::new(x - length, y),
            270 => Point::new(x, y - length),
            _ => Point::new(x + length, y),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let end = self.line_endpoint();
        let r = PIN_ORIGIN_RADIUS;
        let Point { x, y } = self.position;
        match self.rotation.quadrant() {
            90 => BoundingBox::new(Point::new(x - r, y - r), Point::new(x + r, end.y)),
            180 => BoundingBox::new(Point::new(end.x, y - r), Point::new(x + r, y + r)),
            270 => BoundingBox::new(Point::new(x - r, end.y), Point::new(x + r, y + r)),
            _ => BoundingBox::new(Point::new(x - r, y - r), Point::new(end.x, y + r)),
        }
    }

    /// The pin line goes on the symbols layer and the origin marker on the
    /// pins layer, regardless of anything else; each is gated on its own layer.
    pub fn render(&self, ctx: &RenderContext) -> Vec<Fragment> {
        let mut elements = Vec::with_capacity(2);
        let origin = ctx.project(self.position);

        if let Some(color) = ctx.layers.get_css_color(SYMBOLS_LAYER) {
            let end = ctx.project(self.line_endpoint());
            elements.push(Fragment::Line {
                x1: origin.x,
                y1: origin.y,
                x2: end.x,
                y2: end.y,
                style: Style::new().with("stroke", color).with("stroke-width", 1),
            });
        }

        if let Some(color) = ctx.layers.get_css_color(PINS_LAYER) {
            elements.push(Fragment::Circle {
                cx: origin.x,
                cy: origin.y,
                r: PIN_ORIGIN_RADIUS * ctx.scale,
                style: Style::new()
                    .with("stroke", color)
                    .with("stroke-width", 1)
                    .with("fill", "transparent"),
            });
        }

        elements
    }
}

/// Closed filled outline. Always has at least one vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    pub width: f64,
    pub layer: i32,
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn bounding_box(&self) -> BoundingBox {
        let margin = self.width / 2.0;
        BoundingBox::from_points(&self.vertices)
            .unwrap_or(BoundingBox::new(Point::ORIGIN, Point::ORIGIN))
            .expand(margin)
    }

    pub fn render(&self, ctx: &RenderContext) -> Vec<Fragment> {
        let Some(color) = ctx.layers.get_css_color(self.layer) else {
            return Vec::new();
        };
        let points = self
            .vertices
            .iter()
            .map(|v| {
                let p = ctx.project(*v);
                (p.x as i64, p.y as i64)
            })
            .collect();
        vec![Fragment::Polygon {
            points,
            style: Style::new()
                .with("fill", &color)
                .with("stroke", &color)
                .with_num("stroke-width", self.width * ctx.scale),
        }]
    }
}

/// Non-plated drill hole, drawn as an outline on the holes layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hole {
    pub position: Point,
    pub drill: f64,
}

impl Hole {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::around(self.position, self.drill / 2.0)
    }

    pub fn render(&self, ctx: &RenderContext) -> Vec<Fragment> {
        let Some(color) = ctx.layers.get_css_color(HOLES_LAYER) else {
            return Vec::new();
        };
        let center = ctx.project(self.position);
        vec![Fragment::Circle {
            cx: center.x,
            cy: center.y,
            r: (self.drill / 2.0) * ctx.scale,
            style: Style::new()
                .with("fill", TRANSPARENT)
                .with("stroke", color)
                .with("stroke-width", 1),
        }]
    }
}

/// Circle outline of the given stroke width
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub width: f64,
    pub layer: i32,
}

impl Circle {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::around(self.center, self.radius + self.width / 2.0)
    }

    pub fn render(&self, ctx: &RenderContext) -> Vec<Fragment> {
        let Some(color) = ctx.layers.get_css_color(self.layer) else {
            return Vec::new();
        };
        let center = ctx.project(self.center);
        vec![Fragment::Circle {
            cx: center.x,
            cy: center.y,
            r: self.radius * ctx.scale,
            style: Style::new()
                .with("fill", TRANSPARENT)
                .with("stroke", color)
                .with_num("stroke-width", self.width * ctx.scale),
        }]
    }
}

/// Plated via on a board signal, drawn on the vias layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Via {
    pub position: Point,
    pub drill: f64,
    /// Outer diameter; EAGLE derives it from the design rules when absent
    pub diameter: Option<f64>,
    /// Layer span such as `1-16`
    pub extent: String,
    pub shape: Option<String>,
}

impl Via {
    pub fn outer_diameter(&self) -> f64 {
        self.diameter.unwrap_or(self.drill)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::around(self.position, self.outer_diameter() / 2.0)
    }

    pub fn render(&self, ctx: &RenderContext) -> Vec<Fragment> {
        let Some(color) = ctx.layers.get_css_color(VIAS_LAYER) else {
            return Vec::new();
        };
        let center = ctx.project(self.position);
        vec![Fragment::Circle {
            cx: center.x,
            cy: center.y,
            r: (self.outer_diameter() / 2.0) * ctx.scale,
            style: Style::new().with("fill", color).with("stroke-width", 0),
        }]
    }
}

/// Closed set of primitive kinds found in EAGLE geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Wire(Wire),
    Smd(Smd),
    Text(Text),
    Rectangle(Rectangle),
    Polygon(Polygon),
    Hole(Hole),
    Pad(Pad),
    Pin(Pin),
    Circle(Circle),
    Via(Via),
}

impl Primitive {
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Primitive::Wire(p) => p.bounding_box(),
            Primitive::Smd(p) => p.bounding_box(),
            Primitive::Text(p) => p.bounding_box(),
            Primitive::Rectangle(p) => p.bounding_box(),
            Primitive::Polygon(p) => p.bounding_box(),
            Primitive::Hole(p) => p.bounding_box(),
            Primitive::Pad(p) => p.bounding_box(),
            Primitive::Pin(p) => p.bounding_box(),
            Primitive::Circle(p) => p.bounding_box(),
            Primitive::Via(p) => p.bounding_box(),
        }
    }

    pub fn render(&self, ctx: &RenderContext) -> Vec<Fragment> {
        match self {
            Primitive::Wire(p) => p.render(ctx),
            Primitive::Smd(p) => p.render(ctx),
            Primitive::Text(p) => p.render(ctx),
            Primitive::Rectangle(p) => p.render(ctx),
            Primitive::Polygon(p) => p.render(ctx),
            Primitive::Hole(p) => p.render(ctx),
            Primitive::Pad(p) => p.render(ctx),
            Primitive::Pin(p) => p.render(ctx),
            Primitive::Circle(p) => p.render(ctx),
            Primitive::Via(p) => p.render(ctx),
        }
    }

    /// Layer named in the document, if the primitive carries one
    pub fn layer(&self) -> Option<i32> {
        match self {
            Primitive::Wire(p) => Some(p.layer),
            Primitive::Smd(p) => Some(p.layer),
            Primitive::Text(p) => Some(p.layer),
            Primitive::Rectangle(p) => Some(p.layer),
            Primitive::Polygon(p) => Some(p.layer),
            Primitive::Circle(p) => Some(p.layer),
            Primitive::Hole(_) | Primitive::Pad(_) | Primitive::Pin(_) | Primitive::Via(_) => None,
        }
    }

    pub fn is_pad(&self) -> bool {
        matches!(self, Primitive::Pad(_) | Primitive::Smd(_))
    }

    pub fn is_pin(&self) -> bool {
        matches!(self, Primitive::Pin(_))
    }
}
