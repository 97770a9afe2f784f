//! The content-stream driver: executes a token stream against a graphics
//! state machine and emits [`ContentObject`]s (§4.8, §5, §6).
//!
//! Execution is single-threaded and synchronous: there are no suspension
//! points, and content objects are appended in strict stream order. State
//! snapshots taken for each emitted object are plain `GraphicsState` clones;
//! in practice this reduces to deep-copying on emission rather than any
//! copy-on-write scheme, since `GraphicsState` holds no shared interior
//! mutability of its own.

use crate::content::graphics_state::{GraphicsState, GraphicsStateStack, Matrix};
use crate::content::objects::{Bbox, ContentObject, MarkedContentFrame, ObjectType, PathSegment, TextState};
use crate::content::operators::{Operator, TextElement};
use crate::content::parser::parse_content_stream;
use crate::document::PdfDocument;
use crate::error::Result;
use crate::fonts::FontInfo;
use crate::object::{Object, ObjectRef};
use std::collections::HashMap;
use std::rc::Rc;

const MAX_FORM_DEPTH: u32 = 16;

/// Executes content-stream operators against a graphics-state machine,
/// producing the content-object sequence a page (or a Form XObject nested
/// inside one) renders as.
pub struct Interpreter<'a> {
    doc: &'a mut PdfDocument,
    gs: GraphicsStateStack,
    path: Vec<PathSegment>,
    mcs_stack: Vec<MarkedContentFrame>,
    font_cache: HashMap<String, Rc<FontInfo>>,
    form_depth: u32,
    objects: Vec<ContentObject>,
}

impl<'a> Interpreter<'a> {
    /// Build an interpreter over `doc`, starting from an identity CTM.
    pub fn new(doc: &'a mut PdfDocument) -> Self {
        Self {
            doc,
            gs: GraphicsStateStack::new(),
            path: Vec::new(),
            mcs_stack: Vec::new(),
            font_cache: HashMap::new(),
            form_depth: 0,
            objects: Vec::new(),
        }
    }

    /// Run `ops` against `resources` and return the emitted content objects.
    ///
    /// Any `q` left unmatched by a `Q` at end-of-stream is synthesized with a
    /// warning (§7 property 6); any marked-content frame left open at
    /// end-of-stream is dropped with a warning (property 7).
    pub fn run(mut self, ops: &[Operator], resources: &Object) -> Result<Vec<ContentObject>> {
        let depth_before = self.gs.depth();
        self.exec(ops, resources)?;

        let unbalanced_saves = self.gs.depth().saturating_sub(depth_before);
        if unbalanced_saves > 0 {
            self.doc.warn(None, format!("{unbalanced_saves} unmatched q at end of content stream, synthesizing Q"));
            for _ in 0..unbalanced_saves {
                self.gs.restore();
            }
        }

        if !self.mcs_stack.is_empty() {
            self.doc.warn(
                None,
                format!("{} unclosed marked-content frame(s) at end of content stream", self.mcs_stack.len()),
            );
            self.mcs_stack.clear();
        }

        Ok(self.objects)
    }

    fn exec(&mut self, ops: &[Operator], resources: &Object) -> Result<()> {
        for op in ops {
            self.exec_one(op, resources)?;
        }
        Ok(())
    }

    fn exec_one(&mut self, op: &Operator, resources: &Object) -> Result<()> {
        match op {
            Operator::SaveState => self.gs.save(),
            Operator::RestoreState => self.gs.restore(),
            Operator::Cm { a, b, c, d, e, f } => {
                let m = Matrix { a: *a, b: *b, c: *c, d: *d, e: *e, f: *f };
                let gs = self.gs.current_mut();
                gs.ctm = m.multiply(&gs.ctm);
            },

            Operator::BeginText => {
                let gs = self.gs.current_mut();
                gs.text_matrix = Matrix::identity();
                gs.text_line_matrix = Matrix::identity();
            },
            Operator::EndText => {},

            Operator::Td { tx, ty } => {
                let gs = self.gs.current_mut();
                gs.text_line_matrix = Matrix::translation(*tx, *ty).multiply(&gs.text_line_matrix);
                gs.text_matrix = gs.text_line_matrix;
            },
            Operator::TD { tx, ty } => {
                self.gs.current_mut().leading = -ty;
                let gs = self.gs.current_mut();
                gs.text_line_matrix = Matrix::translation(*tx, *ty).multiply(&gs.text_line_matrix);
                gs.text_matrix = gs.text_line_matrix;
            },
            Operator::Tm { a, b, c, d, e, f } => {
                let m = Matrix { a: *a, b: *b, c: *c, d: *d, e: *e, f: *f };
                let gs = self.gs.current_mut();
                gs.text_matrix = m;
                gs.text_line_matrix = m;
            },
            Operator::TStar => {
                let leading = self.gs.current().leading;
                let gs = self.gs.current_mut();
                gs.text_line_matrix = Matrix::translation(0.0, -leading).multiply(&gs.text_line_matrix);
                gs.text_matrix = gs.text_line_matrix;
            },

            Operator::Tc { char_space } => self.gs.current_mut().char_space = *char_space,
            Operator::Tw { word_space } => self.gs.current_mut().word_space = *word_space,
            Operator::Tz { scale } => self.gs.current_mut().horizontal_scaling = *scale,
            Operator::TL { leading } => self.gs.current_mut().leading = *leading,
            Operator::Tr { render } => self.gs.current_mut().render_mode = *render,
            Operator::Ts { rise } => self.gs.current_mut().text_rise = *rise,
            Operator::Tf { font, size } => {
                let resolved = self.resolve_font(resources, font)?;
                let gs = self.gs.current_mut();
                gs.font_name = Some(font.clone());
                gs.font_size = *size;
                gs.current_font = resolved;
            },

            Operator::Tj { text } => self.show_text(&[TextElement::String(text.clone())])?,
            Operator::TJ { array } => self.show_text(array)?,
            Operator::Quote { text } => {
                let leading = self.gs.current().leading;
                let gs = self.gs.current_mut();
                gs.text_line_matrix = Matrix::translation(0.0, -leading).multiply(&gs.text_line_matrix);
                gs.text_matrix = gs.text_line_matrix;
                self.show_text(&[TextElement::String(text.clone())])?;
            },
            Operator::DoubleQuote { word_space, char_space, text } => {
                let gs = self.gs.current_mut();
                gs.word_space = *word_space;
                gs.char_space = *char_space;
                let leading = gs.leading;
                gs.text_line_matrix = Matrix::translation(0.0, -leading).multiply(&gs.text_line_matrix);
                gs.text_matrix = gs.text_line_matrix;
                self.show_text(&[TextElement::String(text.clone())])?;
            },

            Operator::MoveTo { x, y } => self.path.push(PathSegment::MoveTo { x: *x, y: *y }),
            Operator::LineTo { x, y } => self.path.push(PathSegment::LineTo { x: *x, y: *y }),
            Operator::CurveTo { x1, y1, x2, y2, x3, y3 } => {
                self.path.push(PathSegment::CurveTo { x1: *x1, y1: *y1, x2: *x2, y2: *y2, x3: *x3, y3: *y3 })
            },
            Operator::CurveToV { x2, y2, x3, y3 } => {
                self.path.push(PathSegment::CurveToV { x2: *x2, y2: *y2, x3: *x3, y3: *y3 })
            },
            Operator::CurveToY { x1, y1, x3, y3 } => {
                self.path.push(PathSegment::CurveToY { x1: *x1, y1: *y1, x3: *x3, y3: *y3 })
            },
            Operator::ClosePath => self.path.push(PathSegment::ClosePath),
            Operator::Rectangle { x, y, width, height } => {
                self.path.push(PathSegment::Rect { x: *x, y: *y, width: *width, height: *height })
            },

            Operator::Stroke | Operator::Fill | Operator::FillEvenOdd | Operator::CloseFillStroke | Operator::EndPath => {
                self.flush_path();
            },
            Operator::ClipNonZero | Operator::ClipEvenOdd => {
                // Clipping geometry isn't tracked; the path is still consumed
                // by whichever paint operator follows (per spec, W/W* only
                // take effect after the next path-painting operator).
            },

            Operator::SetFillRgb { r, g, b } => {
                let gs = self.gs.current_mut();
                gs.fill_color_rgb = (*r, *g, *b);
                gs.fill_color_cmyk = None;
                gs.fill_color_space = "DeviceRGB".to_string();
            },
            Operator::SetStrokeRgb { r, g, b } => {
                let gs = self.gs.current_mut();
                gs.stroke_color_rgb = (*r, *g, *b);
                gs.stroke_color_cmyk = None;
                gs.stroke_color_space = "DeviceRGB".to_string();
            },
            Operator::SetFillGray { gray } => {
                let gs = self.gs.current_mut();
                gs.fill_color_rgb = (*gray, *gray, *gray);
                gs.fill_color_cmyk = None;
                gs.fill_color_space = "DeviceGray".to_string();
            },
            Operator::SetStrokeGray { gray } => {
                let gs = self.gs.current_mut();
                gs.stroke_color_rgb = (*gray, *gray, *gray);
                gs.stroke_color_cmyk = None;
                gs.stroke_color_space = "DeviceGray".to_string();
            },
            Operator::SetFillCmyk { c, m, y, k } => {
                let gs = self.gs.current_mut();
                gs.fill_color_cmyk = Some((*c, *m, *y, *k));
                gs.fill_color_rgb = cmyk_to_rgb(*c, *m, *y, *k);
                gs.fill_color_space = "DeviceCMYK".to_string();
            },
            Operator::SetStrokeCmyk { c, m, y, k } => {
                let gs = self.gs.current_mut();
                gs.stroke_color_cmyk = Some((*c, *m, *y, *k));
                gs.stroke_color_rgb = cmyk_to_rgb(*c, *m, *y, *k);
                gs.stroke_color_space = "DeviceCMYK".to_string();
            },
            Operator::SetFillColorSpace { name } => self.gs.current_mut().fill_color_space = name.clone(),
            Operator::SetStrokeColorSpace { name } => self.gs.current_mut().stroke_color_space = name.clone(),
            Operator::SetFillColor { components } => {
                let rgb = components_to_rgb(components);
                let gs = self.gs.current_mut();
                gs.fill_color_rgb = rgb;
            },
            Operator::SetStrokeColor { components } => {
                let rgb = components_to_rgb(components);
                let gs = self.gs.current_mut();
                gs.stroke_color_rgb = rgb;
            },
            Operator::SetFillColorN { components, .. } => {
                let rgb = components_to_rgb(components);
                let gs = self.gs.current_mut();
                gs.fill_color_rgb = rgb;
            },
            Operator::SetStrokeColorN { components, .. } => {
                let rgb = components_to_rgb(components);
                let gs = self.gs.current_mut();
                gs.stroke_color_rgb = rgb;
            },

            Operator::SetLineWidth { width } => self.gs.current_mut().line_width = *width,
            Operator::SetDash { array, phase } => self.gs.current_mut().dash_pattern = (array.clone(), *phase),
            Operator::SetLineCap { cap_style } => self.gs.current_mut().line_cap = *cap_style,
            Operator::SetLineJoin { join_style } => self.gs.current_mut().line_join = *join_style,
            Operator::SetMiterLimit { limit } => self.gs.current_mut().miter_limit = *limit,
            Operator::SetRenderingIntent { intent } => self.gs.current_mut().rendering_intent = intent.clone(),
            Operator::SetFlatness { tolerance } => self.gs.current_mut().flatness = *tolerance,
            Operator::SetExtGState { dict_name } => self.apply_ext_gstate(resources, dict_name)?,

            Operator::Do { name } => self.do_xobject(name, resources)?,

            Operator::BeginMarkedContent { tag } => {
                self.mcs_stack.push(MarkedContentFrame { tag: tag.clone(), mcid: None, properties: None });
            },
            Operator::BeginMarkedContentDict { tag, properties } => {
                let resolved = self.resolve_properties(resources, properties)?;
                let mcid = resolved
                    .as_ref()
                    .and_then(|p| p.as_dict())
                    .and_then(|d| d.get("MCID"))
                    .and_then(Object::as_integer)
                    .map(|i| i as u32);
                self.mcs_stack.push(MarkedContentFrame { tag: tag.clone(), mcid, properties: resolved });
            },
            Operator::EndMarkedContent => {
                if self.mcs_stack.pop().is_none() {
                    self.doc.warn(None, "EMC with no matching BMC/BDC, ignoring");
                }
            },

            Operator::InlineImage { .. } => self.emit_image_object(None),

            Operator::Other { name, .. } => {
                // A handful of painting-operator aliases aren't modeled as
                // their own Operator variants; recognize them by name so they
                // still flush the accumulated path.
                match name.as_str() {
                    "f" | "F" | "f*" | "B" | "B*" | "b" | "b*" | "S" | "s" | "n" => self.flush_path(),
                    _ => log::debug!("unhandled content-stream operator '{name}', skipping"),
                }
            },

            // Td/TD/Tm/TStar/Tj/TJ/Quote/DoubleQuote/MoveTo/etc. handled above.
            _ => {},
        }
        Ok(())
    }

    fn category_dict(&mut self, resources: &Object, category: &str) -> Result<Option<HashMap<String, Object>>> {
        let Some(resources_dict) = resources.as_dict() else { return Ok(None) };
        let Some(entry) = resources_dict.get(category) else { return Ok(None) };
        let resolved = match entry {
            Object::Reference(r) => self.doc.load_object(*r)?,
            other => other.clone(),
        };
        Ok(resolved.as_dict().cloned())
    }

    fn lookup_resource(
        &mut self,
        resources: &Object,
        category: &str,
        name: &str,
    ) -> Result<Option<(Object, Option<ObjectRef>)>> {
        let Some(dict) = self.category_dict(resources, category)? else { return Ok(None) };
        let Some(entry) = dict.get(name) else { return Ok(None) };
        match entry {
            Object::Reference(r) => Ok(Some((self.doc.load_object(*r)?, Some(*r)))),
            other => Ok(Some((other.clone(), None))),
        }
    }

    fn resolve_font(&mut self, resources: &Object, name: &str) -> Result<Option<Rc<FontInfo>>> {
        let Some(dict) = self.category_dict(resources, "Font")? else { return Ok(None) };
        let Some(entry) = dict.get(name) else {
            self.doc.warn(None, format!("font resource '{name}' not found"));
            return Ok(None);
        };

        let (font_obj, cache_key) = match entry {
            Object::Reference(r) => (self.doc.load_object(*r)?, Some(r.to_string())),
            other => (other.clone(), None),
        };

        if let Some(key) = &cache_key {
            if let Some(cached) = self.font_cache.get(key) {
                return Ok(Some(cached.clone()));
            }
        }

        match FontInfo::from_dict(&font_obj, self.doc) {
            Ok(font) => {
                let font = Rc::new(font);
                if let Some(key) = cache_key {
                    self.font_cache.insert(key, font.clone());
                }
                Ok(Some(font))
            },
            Err(e) => {
                self.doc.warn(None, format!("failed to resolve font '{name}': {e}"));
                Ok(None)
            },
        }
    }

    fn resolve_properties(&mut self, resources: &Object, properties: &Object) -> Result<Option<Object>> {
        match properties {
            Object::Name(name) => match self.lookup_resource(resources, "Properties", name)? {
                Some((obj, _)) => Ok(Some(obj)),
                None => Ok(None),
            },
            Object::Dictionary(_) => Ok(Some(properties.clone())),
            _ => Ok(None),
        }
    }

    /// `Trm = [Tfs*Th 0; 0 Tfs; 0 Trise] x Tm x CTM` (§4.8).
    fn render_matrix(&self) -> Matrix {
        let gs = self.gs.current();
        let scale = Matrix {
            a: gs.font_size * gs.horizontal_scaling / 100.0,
            b: 0.0,
            c: 0.0,
            d: gs.font_size,
            e: 0.0,
            f: gs.text_rise,
        };
        scale.multiply(&gs.text_matrix).multiply(&gs.ctm)
    }

    fn advance_text_matrix(&mut self, tx: f32) {
        let gs = self.gs.current_mut();
        gs.text_matrix = Matrix::translation(tx, 0.0).multiply(&gs.text_matrix);
    }

    fn show_text(&mut self, elements: &[TextElement]) -> Result<()> {
        let font = self.gs.current().current_font.clone();
        let gs_snapshot_start = self.gs.current().clone();
        let trm_start = self.render_matrix();
        let start_origin = trm_start.transform_point(0.0, 0.0);

        let mut chars = String::new();
        let font_size = self.gs.current().font_size;
        let hscale = self.gs.current().horizontal_scaling / 100.0;
        let char_space = self.gs.current().char_space;
        let word_space = self.gs.current().word_space;

        for element in elements {
            match element {
                TextElement::Offset(amount) => {
                    let tx = (-amount / 1000.0) * font_size * hscale;
                    self.advance_text_matrix(tx);
                },
                TextElement::String(bytes) => {
                    let codes = decode_text_codes(bytes, font.as_deref());
                    for (code, is_single_byte) in codes {
                        if let Some(font) = &font {
                            if let Some(s) = font.char_to_unicode(code as u32) {
                                chars.push_str(&s);
                            }
                        }
                        let glyph_width =
                            font.as_ref().map(|f| f.get_glyph_width(code)).unwrap_or(0.0) / 1000.0 * font_size;
                        let apply_word_space = is_single_byte && code == 0x20;
                        let ws = if apply_word_space { word_space } else { 0.0 };
                        let tx = (glyph_width + char_space + ws) * hscale;
                        self.advance_text_matrix(tx);
                    }
                },
            }
        }

        let trm_end = self.render_matrix();
        let end_origin = trm_end.transform_point(0.0, 0.0);

        // No embedded /FontBBox is parsed, so text bbox is the degenerate
        // horizontal box spanning the run's advance at the font's em height.
        let height = font_size.abs().max(1.0);
        let bbox = Bbox::from_points([
            (start_origin.x, start_origin.y),
            (end_origin.x, end_origin.y),
            (start_origin.x, start_origin.y + height),
            (end_origin.x, end_origin.y + height),
        ])
        .unwrap_or(Bbox::new(start_origin.x, start_origin.y, end_origin.x, end_origin.y));

        self.objects.push(ContentObject {
            object_type: ObjectType::Text,
            bbox,
            ctm: gs_snapshot_start.ctm,
            mcs: self.mcs_stack.last().cloned(),
            gstate: gs_snapshot_start.clone(),
            textstate: Some(TextState::from(&gs_snapshot_start)),
            chars: Some(chars),
            stroking_color: Some(gs_snapshot_start.stroke_color_rgb),
            non_stroking_color: Some(gs_snapshot_start.fill_color_rgb),
            raw_segments: None,
            segments: None,
            xobject_name: None,
        });

        Ok(())
    }

    fn flush_path(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let raw_segments = std::mem::take(&mut self.path);
        let gs = self.gs.current().clone();
        let device_segments: Vec<PathSegment> = raw_segments.iter().map(|s| transform_segment(s, &gs.ctm)).collect();
        let bbox = bbox_of_segments(&device_segments)
            .unwrap_or(Bbox::new(gs.ctm.e, gs.ctm.f, gs.ctm.e, gs.ctm.f));

        self.objects.push(ContentObject {
            object_type: ObjectType::Path,
            bbox,
            ctm: gs.ctm,
            mcs: self.mcs_stack.last().cloned(),
            gstate: gs.clone(),
            textstate: None,
            chars: None,
            stroking_color: Some(gs.stroke_color_rgb),
            non_stroking_color: Some(gs.fill_color_rgb),
            raw_segments: Some(raw_segments),
            segments: Some(device_segments),
            xobject_name: None,
        });
    }

    fn apply_ext_gstate(&mut self, resources: &Object, dict_name: &str) -> Result<()> {
        let Some((obj, _)) = self.lookup_resource(resources, "ExtGState", dict_name)? else {
            self.doc.warn(None, format!("ExtGState resource '{dict_name}' not found"));
            return Ok(());
        };
        let Some(dict) = obj.as_dict() else { return Ok(()) };

        let gs = self.gs.current_mut();
        if let Some(ca) = dict.get("ca").and_then(Object::as_number) {
            gs.fill_alpha = ca as f32;
        }
        if let Some(ca) = dict.get("CA").and_then(Object::as_number) {
            gs.stroke_alpha = ca as f32;
        }
        if let Some(lw) = dict.get("LW").and_then(Object::as_number) {
            gs.line_width = lw as f32;
        }
        if let Some(bm) = dict.get("BM").and_then(Object::as_name) {
            gs.blend_mode = bm.to_string();
        } else if let Some(bm) = dict.get("BM").and_then(Object::as_array).and_then(|a| a.first()).and_then(Object::as_name)
        {
            gs.blend_mode = bm.to_string();
        }
        Ok(())
    }

    fn do_xobject(&mut self, name: &str, resources: &Object) -> Result<()> {
        let Some((obj, obj_ref)) = self.lookup_resource(resources, "XObject", name)? else {
            self.doc.warn(None, format!("XObject resource '{name}' not found"));
            return Ok(());
        };
        let subtype = obj.as_dict().and_then(|d| d.get("Subtype")).and_then(Object::as_name).unwrap_or("");
        match subtype {
            "Form" => self.do_form(obj, obj_ref, resources)?,
            "Image" => self.emit_image_object(Some(name.to_string())),
            other => self.doc.warn(None, format!("XObject '{name}' has unrecognized /Subtype '{other}'")),
        }
        Ok(())
    }

    fn do_form(&mut self, form_obj: Object, form_ref: Option<ObjectRef>, outer_resources: &Object) -> Result<()> {
        if self.form_depth >= MAX_FORM_DEPTH {
            self.doc.warn(None, "Form XObject nesting exceeds recursion limit, skipping");
            return Ok(());
        }

        let data = match form_ref {
            Some(r) => self.doc.decode_stream_with_encryption(&form_obj, r)?,
            None => form_obj.decode_stream_data()?,
        };
        let ops = parse_content_stream(&data)?;

        let form_dict = form_obj.as_dict().cloned().unwrap_or_default();
        let form_matrix = form_dict
            .get("Matrix")
            .and_then(Object::as_array)
            .filter(|a| a.len() == 6)
            .map(|a| Matrix {
                a: a[0].as_number().unwrap_or(1.0) as f32,
                b: a[1].as_number().unwrap_or(0.0) as f32,
                c: a[2].as_number().unwrap_or(0.0) as f32,
                d: a[3].as_number().unwrap_or(1.0) as f32,
                e: a[4].as_number().unwrap_or(0.0) as f32,
                f: a[5].as_number().unwrap_or(0.0) as f32,
            })
            .unwrap_or_else(Matrix::identity);

        let resources = match form_dict.get("Resources") {
            Some(Object::Reference(r)) => self.doc.load_object(*r)?,
            Some(other) => other.clone(),
            None => outer_resources.clone(),
        };

        self.form_depth += 1;
        self.gs.save();
        let gs = self.gs.current_mut();
        gs.ctm = form_matrix.multiply(&gs.ctm);
        let saved_path = std::mem::take(&mut self.path);
        self.exec(&ops, &resources)?;
        self.path = saved_path;
        self.gs.restore();
        self.form_depth -= 1;
        Ok(())
    }

    fn emit_image_object(&mut self, name: Option<String>) {
        let gs = self.gs.current().clone();
        let corners =
            [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)].map(|(x, y)| gs.ctm.transform_point(x, y));
        let bbox = Bbox::from_points(corners.iter().map(|p| (p.x, p.y)))
            .unwrap_or(Bbox::new(gs.ctm.e, gs.ctm.f, gs.ctm.e, gs.ctm.f));

        self.objects.push(ContentObject {
            object_type: ObjectType::Image,
            bbox,
            ctm: gs.ctm,
            mcs: self.mcs_stack.last().cloned(),
            gstate: gs.clone(),
            textstate: None,
            chars: None,
            stroking_color: None,
            non_stroking_color: Some(gs.fill_color_rgb),
            raw_segments: None,
            segments: None,
            xobject_name: name,
        });
    }
}

fn cmyk_to_rgb(c: f32, m: f32, y: f32, k: f32) -> (f32, f32, f32) {
    ((1.0 - c) * (1.0 - k), (1.0 - m) * (1.0 - k), (1.0 - y) * (1.0 - k))
}

fn components_to_rgb(components: &[f32]) -> (f32, f32, f32) {
    match components.len() {
        1 => (components[0], components[0], components[0]),
        3 => (components[0], components[1], components[2]),
        4 => cmyk_to_rgb(components[0], components[1], components[2], components[3]),
        _ => (0.0, 0.0, 0.0),
    }
}

/// Decode a text-showing operand into `(code, is_single_byte)` pairs.
///
/// Composite (Type0) fonts use the Identity-H/V convention of fixed 2-byte
/// big-endian codes: this crate has no encoding-direction CMap parser for
/// variable-length codespace ranges, so non-Identity composite encodings
/// decode as if they were Identity. Simple fonts are one byte per code.
fn decode_text_codes(bytes: &[u8], font: Option<&FontInfo>) -> Vec<(u16, bool)> {
    let is_composite = font.map(|f| f.subtype == "Type0").unwrap_or(false);
    if is_composite {
        bytes.chunks(2).map(|chunk| {
            let code = if chunk.len() == 2 { u16::from_be_bytes([chunk[0], chunk[1]]) } else { chunk[0] as u16 };
            (code, false)
        }).collect()
    } else {
        bytes.iter().map(|&b| (b as u16, true)).collect()
    }
}

fn bbox_of_segments(segments: &[PathSegment]) -> Option<Bbox> {
    Bbox::from_points(segments.iter().flat_map(segment_points))
}

fn segment_points(segment: &PathSegment) -> Vec<(f32, f32)> {
    match *segment {
        PathSegment::MoveTo { x, y } | PathSegment::LineTo { x, y } => vec![(x, y)],
        PathSegment::CurveTo { x1, y1, x2, y2, x3, y3 } => vec![(x1, y1), (x2, y2), (x3, y3)],
        PathSegment::CurveToV { x2, y2, x3, y3 } => vec![(x2, y2), (x3, y3)],
        PathSegment::CurveToY { x1, y1, x3, y3 } => vec![(x1, y1), (x3, y3)],
        PathSegment::ClosePath => vec![],
        PathSegment::Rect { x, y, width, height } => vec![(x, y), (x + width, y), (x, y + height), (x + width, y + height)],
    }
}

/// Transform one path segment's control points from user space to device
/// space via `ctm`. `Rect` is approximated by transforming its origin and
/// scaling its extents by `ctm`'s axis factors rather than producing a
/// rotated quadrilateral — adequate for axis-aligned or scaled CTMs, not for
/// rotated or skewed ones.
fn transform_segment(segment: &PathSegment, ctm: &Matrix) -> PathSegment {
    match *segment {
        PathSegment::MoveTo { x, y } => {
            let p = ctm.transform_point(x, y);
            PathSegment::MoveTo { x: p.x, y: p.y }
        },
        PathSegment::LineTo { x, y } => {
            let p = ctm.transform_point(x, y);
            PathSegment::LineTo { x: p.x, y: p.y }
        },
        PathSegment::CurveTo { x1, y1, x2, y2, x3, y3 } => {
            let p1 = ctm.transform_point(x1, y1);
            let p2 = ctm.transform_point(x2, y2);
            let p3 = ctm.transform_point(x3, y3);
            PathSegment::CurveTo { x1: p1.x, y1: p1.y, x2: p2.x, y2: p2.y, x3: p3.x, y3: p3.y }
        },
        PathSegment::CurveToV { x2, y2, x3, y3 } => {
            let p2 = ctm.transform_point(x2, y2);
            let p3 = ctm.transform_point(x3, y3);
            PathSegment::CurveToV { x2: p2.x, y2: p2.y, x3: p3.x, y3: p3.y }
        },
        PathSegment::CurveToY { x1, y1, x3, y3 } => {
            let p1 = ctm.transform_point(x1, y1);
            let p3 = ctm.transform_point(x3, y3);
            PathSegment::CurveToY { x1: p1.x, y1: p1.y, x3: p3.x, y3: p3.y }
        },
        PathSegment::ClosePath => PathSegment::ClosePath,
        PathSegment::Rect { x, y, width, height } => {
            let p = ctm.transform_point(x, y);
            PathSegment::Rect { x: p.x, y: p.y, width: width * ctm.a, height: height * ctm.d }
        },
    }
}
