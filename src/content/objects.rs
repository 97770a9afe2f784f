//! Typed content-object records emitted by the interpreter (§4.8, §6).
//!
//! A [`ContentObject`] is the interpreter's unit of output: one text run, one
//! path, one image, or one marked-content boundary, each carrying a
//! snapshot of the graphics state active when it was emitted.

use crate::content::graphics_state::{GraphicsState, Matrix};
use crate::object::Object;

/// Axis-aligned bounding box in device space, y increasing upward (§6).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bbox {
    /// Left edge.
    pub x0: f32,
    /// Bottom edge.
    pub y0: f32,
    /// Right edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
}

impl Bbox {
    /// Build a box from two opposite corners, normalizing so `x0 <= x1` and
    /// `y0 <= y1` regardless of the order the corners were given in.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0: x0.min(x1), y0: y0.min(y1), x1: x0.max(x1), y1: y0.max(y1) }
    }

    /// The smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Bbox) -> Bbox {
        Bbox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// The bounding box of a non-empty set of device-space points.
    pub fn from_points(points: impl IntoIterator<Item = (f32, f32)>) -> Option<Bbox> {
        let mut points = points.into_iter();
        let (x, y) = points.next()?;
        let mut bbox = Bbox::new(x, y, x, y);
        for (x, y) in points {
            bbox = bbox.union(&Bbox::new(x, y, x, y));
        }
        Some(bbox)
    }
}

/// A path segment, in either user space (`raw_segments`) or device space
/// (`segments`). Tags match §6: `m l c v y h re`.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// `m`: move to, starting a new subpath.
    MoveTo {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },
    /// `l`: line to.
    LineTo {
        /// X coordinate.
        x: f32,
        /// Y coordinate.
        y: f32,
    },
    /// `c`: cubic Bézier, both control points explicit.
    CurveTo {
        /// First control point X.
        x1: f32,
        /// First control point Y.
        y1: f32,
        /// Second control point X.
        x2: f32,
        /// Second control point Y.
        y2: f32,
        /// End point X.
        x3: f32,
        /// End point Y.
        y3: f32,
    },
    /// `v`: cubic Bézier, first control point equals the current point.
    CurveToV {
        /// Second control point X.
        x2: f32,
        /// Second control point Y.
        y2: f32,
        /// End point X.
        x3: f32,
        /// End point Y.
        y3: f32,
    },
    /// `y`: cubic Bézier, second control point equals the end point.
    CurveToY {
        /// First control point X.
        x1: f32,
        /// First control point Y.
        y1: f32,
        /// End point X.
        x3: f32,
        /// End point Y.
        y3: f32,
    },
    /// `h`: close the current subpath.
    ClosePath,
    /// `re`: a rectangle subpath, starting a new subpath like `m`.
    Rect {
        /// X coordinate of the rectangle's corner.
        x: f32,
        /// Y coordinate of the rectangle's corner.
        y: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
    },
}

/// Split a segment sequence into subpaths, each beginning at an `m` or `re`
/// (§6: "iteration over a path yields subpaths beginning at each m/re").
pub fn subpaths(segments: &[PathSegment]) -> Vec<Vec<PathSegment>> {
    let mut out: Vec<Vec<PathSegment>> = Vec::new();
    for seg in segments {
        match seg {
            PathSegment::MoveTo { .. } | PathSegment::Rect { .. } => out.push(vec![seg.clone()]),
            _ => match out.last_mut() {
                Some(last) => last.push(seg.clone()),
                None => out.push(vec![seg.clone()]),
            },
        }
    }
    out
}

/// An active marked-content frame: one entry of the marked-content stack
/// (§3, §4.8).
#[derive(Debug, Clone, PartialEq)]
pub struct MarkedContentFrame {
    /// The tag name (e.g. `Span`, `Artifact`).
    pub tag: String,
    /// The `/MCID` entry of the frame's property list, if any.
    pub mcid: Option<u32>,
    /// The resolved property list (inline dictionary or `/Properties`
    /// resource lookup), if the frame was opened with `BDC`.
    pub properties: Option<Object>,
}

/// Text-state snapshot attached to text items and glyphs (§6). A subset of
/// [`GraphicsState`] — the parameters PDF classifies as text state (§3).
#[derive(Debug, Clone, PartialEq)]
pub struct TextState {
    /// Character spacing (Tc).
    pub char_space: f32,
    /// Word spacing (Tw).
    pub word_space: f32,
    /// Horizontal scaling percentage (Tz).
    pub horizontal_scaling: f32,
    /// Leading (TL).
    pub leading: f32,
    /// Current font resource name (Tf).
    pub font_name: Option<String>,
    /// Current font size (Tf).
    pub font_size: f32,
    /// Text rise (Ts).
    pub text_rise: f32,
    /// Text rendering mode (Tr).
    pub render_mode: u8,
}

impl From<&GraphicsState> for TextState {
    fn from(gs: &GraphicsState) -> Self {
        TextState {
            char_space: gs.char_space,
            word_space: gs.word_space,
            horizontal_scaling: gs.horizontal_scaling,
            leading: gs.leading,
            font_name: gs.font_name.clone(),
            font_size: gs.font_size,
            text_rise: gs.text_rise,
            render_mode: gs.render_mode,
        }
    }
}

/// The kind of a [`ContentObject`] (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    /// A single glyph. Reserved: this crate currently groups glyphs into
    /// whole text-showing runs (see [`ObjectType::Text`]) rather than
    /// emitting one object per glyph, since no seed scenario requires
    /// per-glyph granularity.
    Char,
    /// The result of a single text-showing operator (`Tj`, `TJ`, `'`, `"`).
    Text,
    /// The result of a path-painting operator.
    Path,
    /// An image XObject or inline image.
    Image,
    /// A Form XObject invocation site (the Form's own content is inlined as
    /// further content objects; this variant is reserved for a future
    /// invocation-boundary marker and is not currently emitted).
    XObject,
    /// A marked-content point. Reserved: the operator set this crate parses
    /// covers `BMC`/`BDC`/`EMC` (frame delimiters, tracked via `mcs` on every
    /// other object) but not the standalone `MP`/`DP` marked-content-point
    /// operators, so this variant is not currently emitted.
    Mcs,
}

/// One content object: a text run, path, image, or marked-content boundary,
/// with the graphics state active when it was emitted (§3, §4.8, §6).
#[derive(Debug, Clone)]
pub struct ContentObject {
    /// Which kind of content this is.
    pub object_type: ObjectType,
    /// Device-space bounding box.
    pub bbox: Bbox,
    /// The CTM active when this object was emitted.
    pub ctm: Matrix,
    /// The nearest enclosing marked-content frame, if any.
    pub mcs: Option<MarkedContentFrame>,
    /// A snapshot of the full graphics state.
    pub gstate: GraphicsState,
    /// Text state, present only on `Text`/`Char` objects.
    pub textstate: Option<TextState>,
    /// Decoded Unicode text, present only on `Text`/`Char` objects.
    pub chars: Option<String>,
    /// Stroking color as RGB, when known.
    pub stroking_color: Option<(f32, f32, f32)>,
    /// Non-stroking (fill) color as RGB, when known.
    pub non_stroking_color: Option<(f32, f32, f32)>,
    /// Path segments in user space, present only on `Path` objects.
    pub raw_segments: Option<Vec<PathSegment>>,
    /// Path segments in device space, present only on `Path` objects.
    pub segments: Option<Vec<PathSegment>>,
    /// The `/Resources` name of the XObject, present on `Image` objects.
    pub xobject_name: Option<String>,
}
