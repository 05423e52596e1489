//! Scene Module
//! The drawing tree a chart builder returns. Coordinates are SVG pixels with
//! the origin at the top left.

/// RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// `#ddd`, the box fill.
    pub const LIGHT_GRAY: Color = Color::rgb(0xdd, 0xdd, 0xdd);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').filter(|d| d.is_ascii())?;
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let short = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Some(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Some(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }

    pub const fn black() -> Self {
        Self::new(Color::BLACK, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Vertical placement of a label relative to its y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    /// Text hangs below the point.
    Top,
    Middle,
    /// Text sits on the point.
    Alphabetic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub content: String,
    pub position: Point,
    pub anchor: Anchor,
    pub baseline: Baseline,
    /// Degrees, clockwise positive, about `position`.
    pub rotation: f64,
    pub font_size: f64,
}

impl TextLabel {
    pub fn new(content: impl Into<String>, position: Point) -> Self {
        Self {
            content: content.into(),
            position,
            anchor: Anchor::Start,
            baseline: Baseline::Alphabetic,
            rotation: 0.0,
            font_size: 10.0,
        }
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
}

impl PathCommand {
    fn is_finite(&self) -> bool {
        match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p.is_finite(),
            PathCommand::CubicTo(a, b, c) => a.is_finite() && b.is_finite() && c.is_finite(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Color,
    },
    Path {
        commands: Vec<PathCommand>,
        stroke: Stroke,
    },
    Text(TextLabel),
}

impl Primitive {
    /// Whether every coordinate is a real number.
    pub fn is_drawable(&self) -> bool {
        match self {
            Primitive::Line { from, to, .. } => from.is_finite() && to.is_finite(),
            Primitive::Rect {
                origin,
                width,
                height,
                ..
            } => origin.is_finite() && width.is_finite() && height.is_finite(),
            Primitive::Circle { center, radius, .. } => center.is_finite() && radius.is_finite(),
            Primitive::Path { commands, .. } => {
                !commands.is_empty() && commands.iter().all(PathCommand::is_finite)
            }
            Primitive::Text(label) => label.position.is_finite(),
        }
    }
}

/// A finished chart: a fixed-size canvas and what to draw on it, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Id of the host container, e.g. `boxplot`.
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub primitives: Vec<Primitive>,
    /// Primitives left out because a coordinate was NaN or infinite.
    pub skipped: usize,
}

impl Scene {
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            primitives: Vec::new(),
            skipped: 0,
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        if primitive.is_drawable() {
            self.primitives.push(primitive);
        } else {
            self.skipped += 1;
        }
    }

    pub fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.push(Primitive::Line { from, to, stroke });
    }

    pub fn text(&mut self, label: TextLabel) {
        self.push(Primitive::Text(label));
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Point, &Point, &Stroke)> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line { from, to, stroke } => Some((from, to, stroke)),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Rect { .. }))
    }

    pub fn circles(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Circle { .. }))
    }

    pub fn paths(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Path { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextLabel> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Text(label) => Some(label),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colours() {
        assert_eq!(Color::from_hex("#1f77b4"), Some(Color::rgb(0x1f, 0x77, 0xb4)));
        assert_eq!(Color::from_hex("#ddd"), Some(Color::LIGHT_GRAY));
        assert_eq!(Color::from_hex("1f77b4"), None);
        assert_eq!(Color::from_hex("#12345"), None);
    }

    #[test]
    fn nan_primitives_are_skipped() {
        let mut scene = Scene::new("x", 10, 10);
        scene.line(Point::new(0.0, 0.0), Point::new(1.0, f64::NAN), Stroke::black());
        scene.line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), Stroke::black());
        assert_eq!(scene.primitives.len(), 1);
        assert_eq!(scene.skipped, 1);
    }
}
