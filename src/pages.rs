//! Page tree walker and page-label number tree (§4.7).
//!
//! The page tree is a `/Root → /Pages` DAG of `Pages` (internal) and `Page`
//! (leaf) nodes. [`PdfDocument::pages`] flattens it into left-to-right leaf
//! order exactly once per document, applying the inheritable-attribute rules
//! of ISO 32000-1:2008 Table 30 (`Resources`, `MediaBox`, `CropBox`,
//! `Rotate`) along the way and breaking `/Kids` cycles by tracking visited
//! object identities.

use crate::document::PdfDocument;
use crate::error::{Error, Result};
use crate::object::{Object, ObjectRef};
use std::collections::{HashMap, HashSet};

const INHERITABLE_ATTRS: [&str; 4] = ["Resources", "MediaBox", "CropBox", "Rotate"];

/// A flattened leaf of the page tree: the leaf's own object reference plus
/// the attributes it inherited from ancestor `Pages` nodes.
#[derive(Debug, Clone)]
pub(crate) struct PageEntry {
    pub obj_ref: ObjectRef,
    pub inherited: HashMap<String, Object>,
}

/// Depth-first, left-to-right walk of the page tree rooted at `pages_ref`.
///
/// A `Pages` node reachable from itself (directly or through a descendant)
/// is skipped with a warning rather than looped forever; the same applies to
/// a node that fails to resolve to a dictionary at all.
pub(crate) fn walk_pages(doc: &mut PdfDocument, pages_ref: ObjectRef) -> Result<Vec<PageEntry>> {
    let mut out = Vec::new();
    let mut visited = HashSet::new();
    let inherited = HashMap::new();
    walk_node(doc, pages_ref, &mut visited, &inherited, &mut out);
    Ok(out)
}

fn walk_node(
    doc: &mut PdfDocument,
    node_ref: ObjectRef,
    visited: &mut HashSet<ObjectRef>,
    inherited: &HashMap<String, Object>,
    out: &mut Vec<PageEntry>,
) {
    if !visited.insert(node_ref) {
        doc.warn(None, format!("page tree node {node_ref} reached twice, skipping repeated branch"));
        return;
    }

    let node = match doc.load_object(node_ref) {
        Ok(n) => n,
        Err(e) => {
            doc.warn(None, format!("failed to load page tree node {node_ref}: {e}"));
            return;
        },
    };

    let Some(node_dict) = node.as_dict() else {
        doc.warn(None, format!("page tree node {node_ref} is not a dictionary, skipping"));
        return;
    };

    let node_type = node_dict.get("Type").and_then(Object::as_name);

    // Nodes with /Kids are Pages nodes even when /Type is missing or wrong;
    // a leaf is anything else.
    if node_dict.contains_key("Kids") || node_type == Some("Pages") {
        let mut child_inherited = inherited.clone();
        for attr in INHERITABLE_ATTRS {
            if let Some(value) = node_dict.get(attr) {
                child_inherited.insert(attr.to_string(), value.clone());
            }
        }

        let Some(kids) = node_dict.get("Kids").and_then(Object::as_array) else {
            doc.warn(None, format!("Pages node {node_ref} missing /Kids array, skipping"));
            return;
        };

        for kid in kids.clone() {
            match kid.as_reference() {
                Some(kid_ref) => walk_node(doc, kid_ref, visited, &child_inherited, out),
                None => doc.warn(None, format!("kid of Pages node {node_ref} is not a reference, skipping")),
            }
        }
    } else {
        out.push(PageEntry { obj_ref: node_ref, inherited: inherited.clone() });
    }
}

/// Merge a leaf page's own dictionary with its inherited attributes (child
/// values always win).
pub(crate) fn materialize_page(doc: &mut PdfDocument, entry: &PageEntry) -> Result<Object> {
    let node = doc.load_object(entry.obj_ref)?;
    let Some(node_dict) = node.as_dict() else {
        return Err(Error::Resolve(format!("page {} is not a dictionary", entry.obj_ref)));
    };

    let mut page_dict = node_dict.clone();
    for attr in INHERITABLE_ATTRS {
        if !page_dict.contains_key(attr) {
            if let Some(value) = entry.inherited.get(attr) {
                page_dict.insert(attr.to_string(), value.clone());
            }
        }
    }
    Ok(Object::Dictionary(page_dict))
}

/// Page numbering style (ISO 32000-1:2008 §12.4.2, `/PageLabels` `/S`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLabelStyle {
    /// Decimal Arabic numerals (1, 2, 3, ...)
    Decimal,
    /// Uppercase Roman numerals (I, II, III, ...)
    RomanUpper,
    /// Lowercase Roman numerals (i, ii, iii, ...)
    RomanLower,
    /// Uppercase letters (A, B, ..., Z, AA, AB, ...)
    AlphaUpper,
    /// Lowercase letters (a, b, ..., z, aa, ab, ...)
    AlphaLower,
    /// No numeric style; only the prefix (if any) is shown.
    None,
}

impl PageLabelStyle {
    fn from_name(name: &str) -> Self {
        match name {
            "D" => PageLabelStyle::Decimal,
            "R" => PageLabelStyle::RomanUpper,
            "r" => PageLabelStyle::RomanLower,
            "A" => PageLabelStyle::AlphaUpper,
            "a" => PageLabelStyle::AlphaLower,
            _ => PageLabelStyle::None,
        }
    }
}

/// One `{S, P, St}` entry of the `/PageLabels` number tree, covering pages
/// from `start_page` up to (but not including) the next range.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLabelRange {
    /// Zero-based page index where this range begins.
    pub start_page: usize,
    /// Numbering style for this range.
    pub style: PageLabelStyle,
    /// Optional prefix prepended to the numeric portion.
    pub prefix: Option<String>,
    /// Numeric value of the first page in the range (default 1).
    pub start_value: u32,
}

impl PageLabelRange {
    fn format(&self, page_index: usize) -> String {
        let offset = (page_index - self.start_page) as u32;
        let number = self.start_value + offset;
        let number_str = match self.style {
            PageLabelStyle::Decimal => number.to_string(),
            PageLabelStyle::RomanUpper => to_roman(number, true),
            PageLabelStyle::RomanLower => to_roman(number, false),
            PageLabelStyle::AlphaUpper => to_alpha(number, true),
            PageLabelStyle::AlphaLower => to_alpha(number, false),
            PageLabelStyle::None => String::new(),
        };
        match &self.prefix {
            Some(prefix) => format!("{prefix}{number_str}"),
            None => number_str,
        }
    }
}

/// Parse the `/PageLabels` number tree from the catalog, if present.
///
/// A number tree is either a flat `/Nums` leaf (`[key, value, key, value,
/// ...]`) or an intermediate node with `/Kids` (§4.7); both shapes are
/// accepted at any depth.
pub(crate) fn parse_page_labels(doc: &mut PdfDocument, tree_root: &Object) -> Result<Vec<PageLabelRange>> {
    let mut ranges = Vec::new();
    collect_number_tree(doc, tree_root, &mut ranges)?;
    ranges.sort_by_key(|r| r.start_page);
    Ok(ranges)
}

fn collect_number_tree(doc: &mut PdfDocument, node: &Object, out: &mut Vec<PageLabelRange>) -> Result<()> {
    let resolved = resolve(doc, node)?;
    let Some(dict) = resolved.as_dict() else {
        doc.warn(None, "page-labels number tree node is not a dictionary");
        return Ok(());
    };

    if let Some(nums) = dict.get("Nums") {
        let nums = resolve(doc, nums)?;
        if let Some(arr) = nums.as_array() {
            let mut i = 0;
            while i + 1 < arr.len() {
                if let Some(page_index) = arr[i].as_integer() {
                    if page_index >= 0 {
                        let range = parse_label_dict(doc, &arr[i + 1], page_index as usize)?;
                        out.push(range);
                    }
                }
                i += 2;
            }
        }
    }

    if let Some(kids) = dict.get("Kids") {
        let kids = resolve(doc, kids)?;
        if let Some(arr) = kids.as_array() {
            for kid in arr.clone() {
                collect_number_tree(doc, &kid, out)?;
            }
        }
    }

    Ok(())
}

fn parse_label_dict(doc: &mut PdfDocument, dict_obj: &Object, start_page: usize) -> Result<PageLabelRange> {
    let resolved = resolve(doc, dict_obj)?;
    let Some(dict) = resolved.as_dict() else {
        return Ok(PageLabelRange { start_page, style: PageLabelStyle::Decimal, prefix: None, start_value: 1 });
    };

    let style = match dict.get("S").and_then(Object::as_name) {
        Some(name) => PageLabelStyle::from_name(name),
        None => PageLabelStyle::None,
    };

    let prefix = dict.get("P").and_then(Object::as_string).and_then(decode_text_string);

    let start_value = dict
        .get("St")
        .and_then(Object::as_integer)
        .filter(|v| *v > 0)
        .map(|v| v as u32)
        .unwrap_or(1);

    Ok(PageLabelRange { start_page, style, prefix, start_value })
}

fn resolve(doc: &mut PdfDocument, obj: &Object) -> Result<Object> {
    match obj.as_reference() {
        Some(r) => doc.load_object(r),
        None => Ok(obj.clone()),
    }
}

/// Decode a text string that may be UTF-16BE (BOM-prefixed) or PDFDocEncoding.
fn decode_text_string(bytes: &[u8]) -> Option<String> {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> =
            bytes[2..].chunks_exact(2).map(|c| u16::from_be_bytes([c[0], c[1]])).collect();
        String::from_utf16(&units).ok()
    } else {
        Some(bytes.iter().filter_map(|&b| crate::fonts::font_dict::pdfdoc_encoding_lookup(b)).collect())
    }
}

/// The label for `page_index`, falling back to the 1-based decimal page
/// number when no range covers it.
pub fn label_for_page(ranges: &[PageLabelRange], page_index: usize) -> String {
    match ranges.iter().rev().find(|r| r.start_page <= page_index) {
        Some(r) => r.format(page_index),
        None => (page_index + 1).to_string(),
    }
}

/// Look up a page by its 1-based "logical page number" encoded as a string
/// (§4.7) — distinct from a `/PageLabels` label, this is simply the decimal
/// position in document order.
pub fn page_index_for_logical_number(logical_number: &str, page_count: usize) -> Option<usize> {
    let n: usize = logical_number.trim().parse().ok()?;
    if n >= 1 && n <= page_count {
        Some(n - 1)
    } else {
        None
    }
}

fn to_roman(mut n: u32, uppercase: bool) -> String {
    if n == 0 {
        return String::new();
    }
    const NUMERALS: [(u32, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut result = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            result.push_str(numeral);
            n -= value;
        }
    }
    if uppercase {
        result.to_uppercase()
    } else {
        result
    }
}

fn to_alpha(mut n: u32, uppercase: bool) -> String {
    if n == 0 {
        return String::new();
    }
    let base = if uppercase { b'A' } else { b'a' };
    let mut result = String::new();
    while n > 0 {
        n -= 1;
        result.insert(0, (base + (n % 26) as u8) as char);
        n /= 26;
    }
    result
}
