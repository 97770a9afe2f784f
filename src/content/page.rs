//! A page's content streams, parsed operators and interpreted content
//! objects (§4.7, §4.8, §6).

use crate::content::interpreter::Interpreter;
use crate::content::operators::Operator;
use crate::content::parser::parse_content_stream;
use crate::content::ContentObject;
use crate::document::PdfDocument;
use crate::error::Result;
use crate::object::Object;

/// A page: its dictionary, resolved resources, raw content streams, parsed
/// operator tokens, and the content objects the interpreter produced from
/// them.
#[derive(Debug, Clone)]
pub struct Page {
    /// The page dictionary, with inherited attributes already applied
    /// (see [`PdfDocument::page`]).
    pub dict: Object,
    /// The page's `/Resources` dictionary, resolved if it was an indirect
    /// reference.
    pub resources: Object,
    /// The page's `/Contents` streams, each resolved to its decoded
    /// (filter- and encryption-decoded) dictionary-bearing `Object`.
    pub contents: Vec<Object>,
    /// The content stream tokenized into operators, in stream order.
    pub tokens: Vec<Operator>,
    /// The content objects the interpreter produced by executing `tokens`.
    pub objects: Vec<ContentObject>,
}

impl Page {
    /// Build a page from its (inheritance-resolved) dictionary: resolve
    /// `/Resources`, decode and concatenate `/Contents`, tokenize, and run
    /// the content-stream interpreter.
    pub(crate) fn new(doc: &mut PdfDocument, dict: Object) -> Result<Self> {
        let resources = match dict.as_dict().and_then(|d| d.get("Resources")).cloned() {
            Some(Object::Reference(r)) => doc.load_object(r)?,
            Some(other) => other,
            None => Object::Dictionary(Default::default()),
        };

        let (contents, data) = load_content_bytes(doc, &dict)?;
        let tokens = parse_content_stream(&data)?;
        let objects = Interpreter::new(doc).run(&tokens, &resources)?;

        Ok(Self { dict, resources, contents, tokens, objects })
    }
}

/// Resolve `/Contents` (a single stream or an array of streams), decode each
/// one (decrypting first if the document is encrypted), and concatenate the
/// decoded bytes with a single space between streams, as required for
/// streams that split a token across a stream boundary (§4.7).
fn load_content_bytes(doc: &mut PdfDocument, dict: &Object) -> Result<(Vec<Object>, Vec<u8>)> {
    let Some(contents_entry) = dict.as_dict().and_then(|d| d.get("Contents")).cloned() else {
        return Ok((Vec::new(), Vec::new()));
    };

    let refs: Vec<Object> = match &contents_entry {
        Object::Array(arr) => arr.clone(),
        other => vec![other.clone()],
    };

    let mut contents = Vec::with_capacity(refs.len());
    let mut data = Vec::new();
    for (i, entry) in refs.into_iter().enumerate() {
        let (stream_obj, obj_ref) = match entry {
            Object::Reference(r) => (doc.load_object(r)?, Some(r)),
            other => (other, None),
        };

        let decoded = match obj_ref {
            Some(r) => doc.decode_stream_with_encryption(&stream_obj, r),
            None => stream_obj.decode_stream_data(),
        };
        match decoded {
            Ok(bytes) => {
                if i > 0 {
                    data.push(b' ');
                }
                data.extend_from_slice(&bytes);
            },
            Err(e) => doc.warn(None, format!("failed to decode content stream {i}: {e}")),
        }
        contents.push(stream_obj);
    }

    Ok((contents, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_temp_pdf(data: &[u8]) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("playa-page-test-{}-{}.pdf", std::process::id(), TEST_COUNTER.next()));
        let mut f = File::create(&path).unwrap();
        f.write_all(data).unwrap();
        path
    }

    struct Counter(std::sync::atomic::AtomicU64);
    impl Counter {
        fn next(&self) -> u64 {
            self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
        }
    }
    static TEST_COUNTER: Counter = Counter(std::sync::atomic::AtomicU64::new(0));

    #[test]
    fn page_with_no_contents_is_empty() {
        let data = b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\nxref\n0 2\n0000000000 65535 f \n0000000009 00000 n \ntrailer\n<< /Size 2 /Root 1 0 R >>\nstartxref\n0\n%%EOF";
        let path = write_temp_pdf(data);
        let mut doc = PdfDocument::open(&path).unwrap();
        let page = Page::new(&mut doc, Object::Dictionary(Default::default())).unwrap();
        assert!(page.contents.is_empty());
        assert!(page.tokens.is_empty());
        assert!(page.objects.is_empty());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn page_decodes_single_content_stream() {
        let data = b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\nxref\n0 2\n0000000000 65535 f \n0000000009 00000 n \ntrailer\n<< /Size 2 /Root 1 0 R >>\nstartxref\n0\n%%EOF";
        let path = write_temp_pdf(data);
        let mut doc = PdfDocument::open(&path).unwrap();

        let mut dict = std::collections::HashMap::new();
        let stream = Object::Stream {
            dict: std::collections::HashMap::new(),
            data: bytes::Bytes::from_static(b"0 0 10 10 re f"),
        };
        dict.insert("Contents".to_string(), stream);
        let page_dict = Object::Dictionary(dict);

        let page = Page::new(&mut doc, page_dict).unwrap();
        assert_eq!(page.tokens.len(), 2);
        assert_eq!(page.objects.len(), 1);
        std::fs::remove_file(path).ok();
    }
}
