//! PDF document model: the resolver, page tree, and parse entry points (§4.6, §4.7, §6).

use crate::encryption::EncryptionHandler;
use crate::error::{Error, Result, Warning};
use crate::object::{Object, ObjectRef};
use crate::pages::{self, PageEntry, PageLabelRange};
use crate::parser::parse_object;
use crate::parser_config::ParserOptions;
use crate::xref::{find_xref_offset, parse_xref, CrossRefTable, XRefEntry, XRefEntryType};
use std::cell::RefCell;
use std::collections::HashMap;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Cycle-detector bound on indirect-reference resolution depth (§4.6). This
/// is independent of [`ParserOptions::max_recursion_depth`], which bounds
/// container (dictionary/array) nesting within a single object instead.
const RESOLVER_MAX_DEPTH: u32 = 64;

/// Number of bytes of leading junk tolerated before the `%PDF-` header (§4.1).
const HEADER_SCAN_WINDOW: usize = 4096;

/// An open PDF document: the object resolver, xref index, and the page tree
/// and outline/structure-tree collaborators built on top of it.
///
/// # Example
///
/// ```no_run
/// use playa::document::PdfDocument;
///
/// let mut doc = PdfDocument::open("sample.pdf")?;
/// println!("PDF version: {}.{}", doc.version().0, doc.version().1);
/// println!("Page count: {}", doc.pages_count()?);
/// # Ok::<(), playa::error::Error>(())
/// ```
pub struct PdfDocument {
    reader: BufReader<File>,
    options: ParserOptions,
    version: (u8, u8),
    xref: CrossRefTable,
    trailer: Object,
    object_cache: HashMap<ObjectRef, Object>,
    resolving_stack: RefCell<HashSet<ObjectRef>>,
    recursion_depth: RefCell<u32>,
    encryption_handler: Option<EncryptionHandler>,
    warnings: RefCell<Vec<Warning>>,
    page_entries: RefCell<Option<Vec<PageEntry>>>,
}

impl std::fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfDocument")
            .field("version", &self.version)
            .field("xref_entries", &self.xref.len())
            .field("cached_objects", &self.object_cache.len())
            .finish_non_exhaustive()
    }
}

impl PdfDocument {
    /// Open a PDF document from a file path with default (lenient) parser
    /// options and an empty user password.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, None, ParserOptions::default())
    }

    /// Open a PDF document, supplying a password and parser options (§6).
    ///
    /// `options` governs recovery behavior (whether malformed objects and
    /// streams are tolerated) and the DoS-protection limits (file size,
    /// decompression ratio, recursion depth) applied while reading it.
    pub fn open_with_options(
        path: impl AsRef<Path>,
        password: Option<&[u8]>,
        options: ParserOptions,
    ) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        if options.max_file_size > 0 {
            let len = file.metadata()?.len();
            if len > options.max_file_size as u64 {
                return Err(Error::Unsupported(format!(
                    "file size {len} exceeds max_file_size {}",
                    options.max_file_size
                )));
            }
        }
        let mut reader = BufReader::new(file);

        let version = parse_header(&mut reader)?;

        let (xref, trailer) = match Self::try_open_regular(&mut reader) {
            Ok((xref, trailer)) if xref.is_empty() => {
                log::warn!("regular xref parsing produced an empty table, attempting reconstruction");
                Self::try_reconstruct_xref(&mut reader)?
            },
            Ok((xref, trailer)) if xref.len() < 5 => {
                log::warn!("regular xref parsing found only {} entries, attempting reconstruction", xref.len());
                match Self::try_reconstruct_xref(&mut reader) {
                    Ok((reconstructed_xref, reconstructed_trailer)) => {
                        log::info!(
                            "reconstruction found {} entries (vs {} in damaged xref)",
                            reconstructed_xref.len(),
                            xref.len()
                        );
                        (reconstructed_xref, reconstructed_trailer)
                    },
                    Err(e) => {
                        log::warn!("reconstruction failed ({e}), using the damaged xref as-is");
                        (xref, trailer)
                    },
                }
            },
            Ok(pair) => pair,
            Err(e) => {
                log::warn!("regular xref parsing failed ({e}), attempting reconstruction");
                match Self::try_reconstruct_xref(&mut reader) {
                    Ok(pair) => {
                        log::info!("successfully reconstructed xref table");
                        pair
                    },
                    Err(recon_err) => {
                        log::error!("xref reconstruction also failed: {recon_err}");
                        return Err(recon_err);
                    },
                }
            },
        };

        let mut document = Self {
            reader,
            options,
            version,
            xref,
            trailer,
            object_cache: HashMap::new(),
            resolving_stack: RefCell::new(HashSet::new()),
            recursion_depth: RefCell::new(0),
            encryption_handler: None,
            warnings: RefCell::new(Vec::new()),
            page_entries: RefCell::new(None),
        };

        document.ensure_encryption_initialized(password.unwrap_or(b""))?;

        Ok(document)
    }

    fn try_open_regular<R: Read + Seek>(reader: &mut R) -> Result<(CrossRefTable, Object)> {
        let xref_offset = find_xref_offset(reader)?;
        let xref = parse_xref(reader, xref_offset)?;

        let trailer = if let Some(trailer_dict) = xref.trailer() {
            Object::Dictionary(trailer_dict.clone())
        } else {
            reader.seek(SeekFrom::Start(xref_offset))?;
            parse_trailer(reader)?
        };

        Ok((xref, trailer))
    }

    fn try_reconstruct_xref<R: Read + Seek>(reader: &mut R) -> Result<(CrossRefTable, Object)> {
        crate::xref_reconstruction::reconstruct_xref(reader)
    }

    /// Locate, load and authenticate the security handler named by the
    /// trailer's `/Encrypt` entry, if any (§4.4). A handler that cannot be
    /// constructed at all (unsupported revision, malformed dictionary) is
    /// fatal to `open`, per §7's `Crypt` propagation policy; a handler that
    /// simply rejects the supplied password is not — the caller can retry
    /// via [`PdfDocument::authenticate`].
    fn ensure_encryption_initialized(&mut self, password: &[u8]) -> Result<()> {
        if self.encryption_handler.is_some() {
            return Ok(());
        }

        let (encrypt_obj, file_id) = {
            let Some(trailer_dict) = self.trailer.as_dict() else { return Ok(()) };

            let Some(encrypt_entry) = trailer_dict.get("Encrypt") else {
                log::debug!("document is not encrypted (no /Encrypt entry)");
                return Ok(());
            };
            let encrypt_entry = encrypt_entry.clone();

            let file_id = match trailer_dict.get("ID") {
                Some(Object::Array(arr)) => arr
                    .first()
                    .and_then(Object::as_string)
                    .map(<[u8]>::to_vec)
                    .unwrap_or_else(|| {
                        log::warn!("missing or non-string /ID[0], using an empty file ID");
                        Vec::new()
                    }),
                _ => {
                    log::warn!("missing /ID in trailer, using an empty file ID");
                    Vec::new()
                },
            };

            (encrypt_entry, file_id)
        };

        let encrypt_obj = match encrypt_obj {
            Object::Dictionary(_) => encrypt_obj,
            Object::Reference(obj_ref) => self.load_object(obj_ref)?,
            other => {
                return Err(Error::Crypt(format!("/Encrypt entry has unexpected type {}", other.type_name())));
            },
        };

        let mut handler = EncryptionHandler::new(&encrypt_obj, file_id)?;
        match handler.authenticate(password) {
            Ok(true) => log::info!("encryption handler authenticated"),
            Ok(false) => log::warn!("document is encrypted and the supplied password was rejected"),
            Err(e) => return Err(e),
        }

        self.encryption_handler = Some(handler);
        Ok(())
    }

    /// Re-attempt authentication with a different password after `open`.
    pub fn authenticate(&mut self, password: &[u8]) -> Result<bool> {
        match &mut self.encryption_handler {
            Some(handler) => handler.authenticate(password),
            None => Ok(true),
        }
    }

    /// Decode a stream's payload, decrypting it first if the document is
    /// encrypted (§4.4: decryption precedes filter decoding).
    pub(crate) fn decode_stream_with_encryption(&self, stream_obj: &Object, obj_ref: ObjectRef) -> Result<Vec<u8>> {
        match &self.encryption_handler {
            Some(handler) => {
                let decrypt_fn = |data: &[u8]| -> Result<Vec<u8>> {
                    handler.decrypt_stream(data, obj_ref.id, obj_ref.gen as u32)
                };
                stream_obj.decode_stream_data_with_decryption(Some(&decrypt_fn), obj_ref.id, obj_ref.gen as u32)
            },
            None => stream_obj.decode_stream_data(),
        }
    }

    /// The document's PDF version, as declared by the `%PDF-M.m` header.
    pub fn version(&self) -> (u8, u8) {
        self.version
    }

    /// The trailer dictionary (`/Root`, `/Info`, `/Size`, `/Encrypt`, `/ID`, ...).
    pub fn trailer(&self) -> &Object {
        &self.trailer
    }

    /// Parser options this document was opened with.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Non-fatal diagnostics accumulated while reading the document. Never
    /// cleared; warnings only ever accumulate across the document's lifetime
    /// (§7).
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.borrow().clone()
    }

    /// Record a warning: append it to the document's warning list and log it
    /// through `log::warn!`, so a caller who never inspects the list still
    /// sees it via their chosen `log` backend (§7).
    pub(crate) fn warn(&self, offset: Option<usize>, message: impl Into<String>) {
        let message = message.into();
        match offset {
            Some(o) => log::warn!("byte {o}: {message}"),
            None => log::warn!("{message}"),
        }
        self.warnings.borrow_mut().push(match offset {
            Some(o) => Warning::at(o, message),
            None => Warning::new(message),
        });
    }

    /// Scan the whole file for an `"id gen obj"` header when the xref table
    /// has no entry for `obj_ref`. Some generators emit incomplete xref
    /// tables for objects that are nonetheless present in the file.
    fn scan_for_object(&mut self, obj_ref: ObjectRef) -> Result<u64> {
        self.reader.seek(SeekFrom::Start(0))?;
        let mut content = Vec::new();
        self.reader.read_to_end(&mut content)?;

        let pattern = format!("{} {} obj", obj_ref.id, obj_ref.gen);
        let pattern_bytes = pattern.as_bytes();

        let mut pos = 0;
        while pos < content.len() {
            let Some(relative_pos) = content[pos..].windows(pattern_bytes.len()).position(|w| w == pattern_bytes)
            else {
                break;
            };
            let absolute_pos = pos + relative_pos;

            let valid_start = absolute_pos == 0 || matches!(content[absolute_pos - 1], b'\n' | b'\r');
            let end_pos = absolute_pos + pattern_bytes.len();
            let valid_end = end_pos >= content.len() || matches!(content[end_pos], b'\n' | b'\r' | b' ' | b'\t' | b'<');

            if valid_start && valid_end {
                return Ok(absolute_pos as u64);
            }
            pos = absolute_pos + 1;
        }

        Err(Error::Resolve(format!("object {obj_ref} not found by file scan")))
    }

    /// Resolve an indirect reference to its value (§4.6).
    ///
    /// A free xref entry, a reference absent from the xref index entirely
    /// (even after the file-scan fallback), and a cycle or recursion-depth
    /// overflow all resolve to [`Object::Null`] with a recorded warning —
    /// never to a spurious object and never as a propagated error. Only an
    /// I/O failure on the byte source itself propagates.
    pub fn load_object(&mut self, obj_ref: ObjectRef) -> Result<Object> {
        if let Some(cached) = self.object_cache.get(&obj_ref) {
            return Ok(cached.clone());
        }

        let depth = *self.recursion_depth.borrow();
        if depth >= RESOLVER_MAX_DEPTH || self.resolving_stack.borrow().contains(&obj_ref) {
            self.warn(None, format!("reference {obj_ref} cycles or exceeds resolver depth, resolving to null"));
            return Ok(Object::Null);
        }

        let entry = match self.xref.get(obj_ref.id).cloned() {
            Some(entry) => entry,
            None => match self.scan_for_object(obj_ref) {
                Ok(offset) => XRefEntry::uncompressed(offset, obj_ref.gen),
                Err(_) => {
                    self.warn(None, format!("object {} absent from xref, resolving to null", obj_ref.id));
                    return Ok(Object::Null);
                },
            },
        };

        if !entry.in_use {
            self.warn(None, format!("object {} is a free xref entry, resolving to null", obj_ref.id));
            return Ok(Object::Null);
        }

        self.resolving_stack.borrow_mut().insert(obj_ref);
        *self.recursion_depth.borrow_mut() += 1;

        let result = match entry.entry_type {
            XRefEntryType::Compressed => self.load_compressed_object(obj_ref, entry.offset as u32, entry.generation),
            XRefEntryType::Uncompressed => self.load_uncompressed_object(obj_ref, entry.offset),
            XRefEntryType::Free => Ok(Object::Null),
        };

        *self.recursion_depth.borrow_mut() -= 1;
        self.resolving_stack.borrow_mut().remove(&obj_ref);

        result
    }

    /// Resolve indirect references nested inside `obj`'s dictionaries and
    /// arrays, up to `max_depth` levels. A reference that fails to resolve
    /// is left as-is rather than aborting the whole call.
    pub fn resolve_references(&mut self, obj: &Object, max_depth: usize) -> Result<Object> {
        if max_depth == 0 {
            return Ok(obj.clone());
        }

        match obj {
            Object::Reference(obj_ref) => {
                let resolved = self.load_object(*obj_ref)?;
                self.resolve_references(&resolved, max_depth - 1)
            },
            Object::Dictionary(dict) => {
                let mut resolved_dict = HashMap::new();
                for (key, value) in dict.iter() {
                    resolved_dict.insert(key.clone(), self.resolve_references(value, max_depth - 1)?);
                }
                Ok(Object::Dictionary(resolved_dict))
            },
            Object::Array(arr) => {
                let resolved: Result<Vec<Object>> =
                    arr.iter().map(|item| self.resolve_references(item, max_depth - 1)).collect();
                Ok(Object::Array(resolved?))
            },
            _ => Ok(obj.clone()),
        }
    }

    fn load_uncompressed_object(&mut self, obj_ref: ObjectRef, offset: u64) -> Result<Object> {
        self.load_uncompressed_object_impl(obj_ref, offset, false)
    }

    /// Parse one indirect object's `"id gen obj ... endobj"` body. Per §7's
    /// `Lex`/`Parse` propagation policy, any failure below the level of an
    /// I/O error on the byte source resolves the object to `Null` with a
    /// warning rather than propagating.
    fn load_uncompressed_object_impl(&mut self, obj_ref: ObjectRef, offset: u64, already_corrected: bool) -> Result<Object> {
        self.reader.seek(SeekFrom::Start(offset))?;

        let mut header_bytes = Vec::new();
        let bytes_read = self.reader.read_until(b'\n', &mut header_bytes)?;
        if bytes_read == 0 {
            self.warn(Some(offset as usize), format!("unexpected EOF reading header of object {obj_ref}"));
            return Ok(Object::Null);
        }

        let line = String::from_utf8_lossy(&header_bytes);
        let parts: Vec<&str> = line.split_whitespace().collect();
        let obj_pos = parts.iter().position(|&p| p == "obj" || p.contains("obj"));

        let obj_pos = match obj_pos {
            Some(pos) if pos >= 2 => pos,
            _ => {
                if !already_corrected {
                    if let Ok(corrected_offset) = self.find_object_header_backwards(obj_ref, offset) {
                        return self.load_uncompressed_object_impl(obj_ref, corrected_offset, true);
                    }
                }
                self.warn(
                    Some(offset as usize),
                    format!("expected object header for {obj_ref}, found {:?}", line.trim()),
                );
                return Ok(Object::Null);
            },
        };
        let _ = obj_pos;

        let obj_num: Option<u32> = parts[0].parse().ok();
        let gen_num: Option<u16> = parts[1].parse().ok();
        let (Some(obj_num), Some(gen_num)) = (obj_num, gen_num) else {
            self.warn(Some(offset as usize), format!("malformed object/generation number in header: {line:?}"));
            return Ok(Object::Null);
        };

        if obj_num != obj_ref.id || gen_num != obj_ref.gen {
            log::debug!("object reference mismatch at offset {offset}: expected {obj_ref}, found {obj_num} {gen_num} obj");
        }

        let mut data = Vec::new();
        if let Some(obj_keyword_pos) = header_bytes.windows(3).position(|w| w == b"obj") {
            let mut content_start = obj_keyword_pos + 3;
            while content_start < header_bytes.len()
                && matches!(header_bytes[content_start], b' ' | b'\t' | b'\r')
            {
                content_start += 1;
            }
            if content_start < header_bytes.len() && header_bytes[content_start] != b'\n' {
                data.extend_from_slice(&header_bytes[content_start..]);
            }
        }

        const MAX_LINES: usize = 10_000;
        let mut lines_read = 0;
        loop {
            let mut chunk = Vec::new();
            let bytes_read = self.reader.read_until(b'\n', &mut chunk)?;

            lines_read += 1;
            if lines_read > MAX_LINES {
                self.warn(Some(offset as usize), format!("object {obj_ref} exceeded {MAX_LINES} lines, truncating"));
                break;
            }
            if bytes_read == 0 {
                self.warn(Some(offset as usize), format!("no endobj found for object {obj_ref}, using what was read"));
                break;
            }

            if chunk.contains(&b'e') {
                if let Some(endobj_pos) = find_substring(&chunk, b"endobj") {
                    data.extend_from_slice(&chunk[..endobj_pos]);
                    break;
                }
            }
            data.extend_from_slice(&chunk);
        }

        let obj = match parse_object(&data) {
            Ok((_, parsed)) => parsed,
            Err(e) => {
                self.warn(Some(offset as usize), format!("object {obj_ref} failed to parse ({e:?}), using null"));
                Object::Null
            },
        };

        self.object_cache.insert(obj_ref, obj.clone());
        Ok(obj)
    }

    /// Load a compressed object (Type 2 xref entry) out of its container
    /// object stream. A failure anywhere in this path — the container
    /// missing from the xref, the wrong object type, a decode error, or the
    /// target object absent from the decoded stream — resolves to `Null`
    /// with a warning, matching the resolver's general null-on-failure rule.
    fn load_compressed_object(&mut self, obj_ref: ObjectRef, stream_obj_num: u32, _index_in_stream: u16) -> Result<Object> {
        use crate::objstm::parse_object_stream_with_decryption;

        let Some(stream_entry) = self.xref.get(stream_obj_num).cloned() else {
            self.warn(None, format!("object stream {stream_obj_num} absent from xref, resolving {obj_ref} to null"));
            return Ok(Object::Null);
        };
        if stream_entry.entry_type != XRefEntryType::Uncompressed {
            self.warn(None, format!("object stream {stream_obj_num} is not itself uncompressed, resolving {obj_ref} to null"));
            return Ok(Object::Null);
        }

        let stream_ref = ObjectRef::new(stream_obj_num, 0);
        let stream_obj = self.load_uncompressed_object(stream_ref, stream_entry.offset)?;

        let objects_map = {
            let handler = self.encryption_handler.as_ref();
            let decrypt_fn = handler.map(|handler| {
                move |data: &[u8]| -> Result<Vec<u8>> { handler.decrypt_stream(data, stream_obj_num, 0) }
            });
            match &decrypt_fn {
                Some(f) => parse_object_stream_with_decryption(&stream_obj, Some(f), stream_obj_num, 0),
                None => parse_object_stream_with_decryption(&stream_obj, None, 0, 0),
            }
        };

        let objects_map = match objects_map {
            Ok(map) => map,
            Err(e) => {
                self.warn(None, format!("failed to decode object stream {stream_obj_num}: {e}, resolving {obj_ref} to null"));
                return Ok(Object::Null);
            },
        };

        let obj = match objects_map.get(&obj_ref.id) {
            Some(o) => o.clone(),
            None => {
                self.warn(None, format!("object {} absent from stream {stream_obj_num}, resolving to null", obj_ref.id));
                Object::Null
            },
        };

        for (num, object) in objects_map {
            self.object_cache.insert(ObjectRef::new(num, 0), object);
        }

        Ok(obj)
    }

    /// Some generators write xref offsets that land on the object body
    /// rather than the `"id gen obj"` header; search up to 100 bytes
    /// backward for the exact header to correct it.
    fn find_object_header_backwards(&mut self, obj_ref: ObjectRef, wrong_offset: u64) -> Result<u64> {
        if wrong_offset == 0 {
            return Err(Error::parse(wrong_offset as usize, "cannot search backwards from offset 0"));
        }

        let search_distance = std::cmp::min(100, wrong_offset);
        let search_start = wrong_offset - search_distance;

        self.reader.seek(SeekFrom::Start(search_start))?;
        let mut buffer = vec![0u8; search_distance as usize + 100];
        let bytes_read = self.reader.read(&mut buffer)?;
        if bytes_read == 0 {
            return Err(Error::parse(wrong_offset as usize, "could not read backwards search region"));
        }

        let patterns = [
            format!("{} {} obj", obj_ref.id, obj_ref.gen).into_bytes(),
            format!("{}  {} obj", obj_ref.id, obj_ref.gen).into_bytes(),
            format!("{}\t{} obj", obj_ref.id, obj_ref.gen).into_bytes(),
            format!("{} {}\tobj", obj_ref.id, obj_ref.gen).into_bytes(),
        ];

        for pattern in &patterns {
            let mut best: Option<(usize, i64)> = None;
            for (i, window) in buffer[..bytes_read].windows(pattern.len()).enumerate() {
                if window == pattern.as_slice() {
                    let candidate = search_start + i as u64;
                    let distance = candidate as i64 - wrong_offset as i64;
                    if (-100..=10).contains(&distance)
                        && best.as_ref().is_none_or(|(_, d)| distance.abs() < d.abs())
                    {
                        best = Some((i, distance));
                    }
                }
            }
            if let Some((pos, _)) = best {
                return Ok(search_start + pos as u64);
            }
        }

        Err(Error::parse(
            wrong_offset as usize,
            format!("could not find header for {obj_ref} within {search_distance} bytes before offset"),
        ))
    }

    /// The document catalog (`/Root`).
    pub fn catalog(&mut self) -> Result<Object> {
        let trailer_dict =
            self.trailer.as_dict().ok_or_else(|| Error::Resolve("trailer is not a dictionary".to_string()))?;

        let root_ref = trailer_dict
            .get("Root")
            .ok_or_else(|| Error::Resolve("trailer missing /Root entry".to_string()))?
            .as_reference()
            .ok_or_else(|| Error::Resolve("/Root is not a reference".to_string()))?;

        self.load_object(root_ref)
    }

    /// The logical structure tree (`/StructTreeRoot`), if the document is
    /// tagged (§6, thin collaborator over the resolver).
    pub fn structtree(&mut self) -> Result<Option<crate::structure::StructTreeRoot>> {
        crate::structure::parse_structure_tree(self)
    }

    /// The flat, depth-first walk of the document's outline tree (§6, thin
    /// collaborator over the resolver).
    pub fn outlines(&mut self) -> Result<Option<Vec<crate::outline::OutlineItem>>> {
        self.get_outline()
    }

    fn pages_ref(&mut self) -> Result<ObjectRef> {
        let catalog = self.catalog()?;
        let catalog_dict =
            catalog.as_dict().ok_or_else(|| Error::Resolve("catalog is not a dictionary".to_string()))?;
        catalog_dict
            .get("Pages")
            .ok_or_else(|| Error::Resolve("catalog missing /Pages entry".to_string()))?
            .as_reference()
            .ok_or_else(|| Error::Resolve("/Pages is not a reference".to_string()))
    }

    /// Flatten the page tree into left-to-right leaf order, memoizing the
    /// result for the lifetime of the document (§4.7).
    fn pages_entries(&mut self) -> Result<Vec<PageEntry>> {
        if let Some(entries) = self.page_entries.borrow().as_ref() {
            return Ok(entries.clone());
        }
        let pages_ref = self.pages_ref()?;
        let entries = pages::walk_pages(self, pages_ref)?;
        *self.page_entries.borrow_mut() = Some(entries.clone());
        Ok(entries)
    }

    /// Number of leaf pages reachable from `/Pages` (a byproduct of the
    /// depth-first walk, not a trusted `/Count`).
    pub fn pages_count(&mut self) -> Result<usize> {
        Ok(self.pages_entries()?.len())
    }

    /// The object reference of the leaf page at `page_index` (0-based).
    pub fn page_ref(&mut self, page_index: usize) -> Result<ObjectRef> {
        self.pages_entries()?
            .get(page_index)
            .map(|e| e.obj_ref)
            .ok_or_else(|| Error::Resolve(format!("page index {page_index} out of range")))
    }

    /// The page dictionary at `page_index` (0-based), with `Resources`,
    /// `MediaBox`, `CropBox` and `Rotate` inherited from ancestor `Pages`
    /// nodes where the leaf doesn't define them itself (§4.7).
    pub fn page(&mut self, page_index: usize) -> Result<Object> {
        let entry = self
            .pages_entries()?
            .get(page_index)
            .cloned()
            .ok_or_else(|| Error::Resolve(format!("page index {page_index} out of range")))?;
        pages::materialize_page(self, &entry)
    }

    /// The `/PageLabels` number tree, parsed into sorted ranges (§4.7).
    /// Returns an empty vector if the catalog has no `/PageLabels` entry.
    pub fn page_labels(&mut self) -> Result<Vec<PageLabelRange>> {
        let catalog = self.catalog()?;
        let Some(catalog_dict) = catalog.as_dict() else { return Ok(Vec::new()) };
        let Some(tree_root) = catalog_dict.get("PageLabels").cloned() else { return Ok(Vec::new()) };
        pages::parse_page_labels(self, &tree_root)
    }

    /// The label shown for `page_index`, computed from `/PageLabels` with a
    /// decimal 1-based fallback when no range covers it.
    pub fn page_label(&mut self, page_index: usize) -> Result<String> {
        let ranges = self.page_labels()?;
        Ok(pages::label_for_page(&ranges, page_index))
    }

    /// Look up a page by its 1-based logical page number, encoded as a
    /// decimal string (§4.7) — distinct from a `/PageLabels` label.
    pub fn page_by_logical_number(&mut self, logical_number: &str) -> Result<Option<usize>> {
        let count = self.pages_count()?;
        Ok(pages::page_index_for_logical_number(logical_number, count))
    }

    /// Iterate every indirect object named in the xref index, in ascending
    /// object-number order, as resolved `(objid, genno, value)` triples (§6).
    ///
    /// An object that fails to resolve is omitted rather than surfaced as an
    /// error, matching the resolver's general null-on-failure policy — it
    /// still appears once as `Object::Null` via the normal
    /// [`PdfDocument::load_object`] path, so it is never silently dropped,
    /// only ever degraded.
    pub fn tokens(&mut self) -> Tokens<'_> {
        let mut ids: Vec<u32> = self.xref.all_object_numbers().collect();
        ids.sort_unstable();
        Tokens { doc: self, ids: ids.into_iter() }
    }

    /// The page at `page_index` (0-based), exposing its content streams and
    /// the decoded content-object sequence in addition to the raw page
    /// dictionary (§4.7, §6).
    pub fn get_page(&mut self, page_index: usize) -> Result<crate::content::Page> {
        let dict = self.page(page_index)?;
        crate::content::Page::new(self, dict)
    }
}

/// Iterator over every indirect object reachable from a document's xref
/// index, yielding `(objid, genno, value)` triples (§6).
///
/// Returned by [`PdfDocument::tokens`]. Named rather than exposed via
/// `IntoIterator`/`Index`: `IntoIterator::into_iter` takes the container by
/// value or `&self`/`&mut self` with no room to report per-item resolution
/// failure, and `std::ops::Index` requires `&self`-only, infallible access to
/// an already-materialized value — neither fits a lazily-resolving, cache-
/// populating (`&mut self`), fallible resolver backed by a plain `HashMap`
/// cache rather than an interior-mutable one. A named iterator type keeps the
/// fallibility and mutation explicit at the call site.
pub struct Tokens<'a> {
    doc: &'a mut PdfDocument,
    ids: std::vec::IntoIter<u32>,
}

impl Iterator for Tokens<'_> {
    type Item = (u32, u16, Object);

    fn next(&mut self) -> Option<Self::Item> {
        for id in self.ids.by_ref() {
            let Some(entry) = self.doc.xref.get(id) else { continue };
            let genno = match entry.entry_type {
                XRefEntryType::Compressed => 0,
                _ => entry.generation,
            };
            match self.doc.load_object(ObjectRef::new(id, genno)) {
                Ok(value) => return Some((id, genno, value)),
                Err(e) => {
                    self.doc.warn(None, format!("object {id} failed to resolve during tokens() iteration: {e}"));
                    continue;
                },
            }
        }
        None
    }
}

/// Parse and validate the `%PDF-M.m` header (§4.1), tolerating up to
/// [`HEADER_SCAN_WINDOW`] bytes of leading junk before the magic bytes.
pub fn parse_header<R: Read + Seek>(reader: &mut R) -> Result<(u8, u8)> {
    let mut window = vec![0u8; HEADER_SCAN_WINDOW];
    let start = reader.stream_position()?;
    let n = reader.read(&mut window)?;
    let window = &window[..n];

    let header_pos = window
        .windows(5)
        .position(|w| w == b"%PDF-")
        .ok_or_else(|| Error::Xref("no %PDF- header found in the first 4 KiB".to_string()))?;

    if header_pos > 0 {
        log::warn!("skipped {header_pos} bytes of leading junk before the %PDF- header");
    }

    let header_start = header_pos + 5;
    if window.len() < header_start + 3 {
        return Err(Error::Xref("file too short to contain a PDF version".to_string()));
    }

    let major = window[header_start];
    let dot = window[header_start + 1];
    let minor = window[header_start + 2];

    if dot != b'.' {
        return Err(Error::Xref(format!("invalid version format: expected '.', found '{}'", dot as char)));
    }
    if !major.is_ascii_digit() || !minor.is_ascii_digit() {
        return Err(Error::Xref(format!("invalid version digits: {}.{}", major as char, minor as char)));
    }

    let major = major - b'0';
    let minor = minor - b'0';
    if major > 2 || (major == 0 && minor == 0) {
        return Err(Error::Xref(format!("unsupported PDF version {major}.{minor}")));
    }

    reader.seek(SeekFrom::Start(start))?;
    Ok((major, minor))
}

/// Parse the trailer dictionary that follows the `trailer` keyword after a
/// classic xref table.
pub fn parse_trailer<R: Read>(reader: &mut R) -> Result<Object> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    let content = String::from_utf8_lossy(&buffer);
    let trailer_pos =
        content.find("trailer").ok_or_else(|| Error::Xref("trailer keyword not found after xref table".to_string()))?;

    let dict_start = trailer_pos + "trailer".len();
    if dict_start >= buffer.len() {
        return Err(Error::Xref("unexpected EOF after trailer keyword".to_string()));
    }

    let (_, trailer_dict) = parse_object(&buffer[dict_start..])
        .map_err(|e| Error::parse(dict_start, format!("failed to parse trailer dictionary: {e:?}")))?;

    if trailer_dict.as_dict().is_none() {
        return Err(Error::Xref("trailer is not a dictionary".to_string()));
    }

    Ok(trailer_dict)
}

/// First occurrence of `needle` in `haystack`, or `None`.
fn find_substring(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
