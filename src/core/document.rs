//! Document loading
//!
//! Reads a CDA file into an [`Element`] tree. Namespace prefixes are resolved
//! while parsing, so tags in the tree carry their namespace URI in Clark
//! notation and selectors can match on URI rather than on whatever prefix the
//! author happened to use.

use crate::domain::{Element, LoadError};
use quick_xml::encoding::{decode, detect_encoding};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::{NsReader, Reader};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// Namespace bound to the reserved `xml` prefix
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A parsed source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
    source: Option<PathBuf>,
}

impl Document {
    /// Wraps an already-built element tree
    pub fn new(root: Element) -> Self {
        Self { root, source: None }
    }

    /// Root element of the document
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Path the document was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Loads and parses a document from disk
///
/// The bytes are decoded before parsing: UTF-16 is recognised by its byte
/// order mark or by the `<?` pattern, any other encoding is taken from the
/// XML declaration, and UTF-8 is assumed when neither says otherwise.
///
/// # Errors
///
/// - [`LoadError::FileNotFound`] if `path` does not exist
/// - [`LoadError::Read`] if the file cannot be read
/// - [`LoadError::Parse`] if the content is not well-formed XML
///
/// # Examples
///
/// ```no_run
/// use cdaflat::core::document::load_document;
///
/// let document = load_document("samples/document.xml")?;
/// println!("{}", document.root().local_name());
/// # Ok::<(), cdaflat::domain::LoadError>(())
/// ```
pub fn load_document(path: impl AsRef<Path>) -> Result<Document, LoadError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Loading document");

    let bytes = fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => LoadError::FileNotFound(path.display().to_string()),
        _ => LoadError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        },
    })?;

    let text = decode_document(&bytes)?;

    let mut document = parse_document(&text)?;
    document.source = Some(path.to_path_buf());

    tracing::info!(
        path = %path.display(),
        root = %document.root.local_name(),
        elements = document.root.descendants().count() + 1,
        "Document loaded"
    );

    Ok(document)
}

/// Decodes raw document bytes to UTF-8 text
///
/// # Errors
///
/// Returns [`LoadError::Parse`] if the bytes are not valid in the detected
/// or declared encoding.
pub fn decode_document(bytes: &[u8]) -> Result<Cow<'_, str>, LoadError> {
    if let Some((encoding, bom_len)) = detect_encoding(bytes) {
        if !encoding.is_ascii_compatible() {
            return decode(&bytes[bom_len..], encoding).map_err(|_| undecodable(encoding.name()));
        }
    }

    // The reader switches its decoder when it sees an encoding declaration
    let mut reader = Reader::from_reader(bytes);
    loop {
        match reader.read_event()? {
            Event::Decl(_) | Event::Start(_) | Event::Empty(_) | Event::Eof => break,
            _ => {}
        }
    }

    let decoder = reader.decoder();
    decoder
        .decode(bytes)
        .map_err(|_| undecodable(decoder.encoding().name()))
}

fn undecodable(encoding: &str) -> LoadError {
    LoadError::Parse(format!("document is not valid {encoding}"))
}

/// Parses a document held in memory
///
/// # Errors
///
/// Returns [`LoadError::Parse`] for malformed XML, undeclared namespace
/// prefixes, a missing root element or content after the root element.
pub fn parse_document(text: &str) -> Result<Document, LoadError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = NsReader::from_str(text);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                ensure_single_root(&root)?;
                stack.push(open_element(&reader, &start)?);
            }
            Event::Empty(start) => {
                ensure_single_root(&root)?;
                let element = open_element(&reader, &start)?;
                close_element(element, &mut stack, &mut root);
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| LoadError::Parse("unexpected closing tag".to_string()))?;
                close_element(element, &mut stack, &mut root);
            }
            Event::Text(text) => {
                let value = text.unescape()?;
                append_text(&mut stack, &value)?;
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                append_text(&mut stack, &String::from_utf8_lossy(&bytes))?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(LoadError::Parse(format!(
            "unclosed element '{}'",
            open.local_name()
        )));
    }

    root.map(Document::new)
        .ok_or_else(|| LoadError::Parse("no element found".to_string()))
}

fn ensure_single_root(root: &Option<Element>) -> Result<(), LoadError> {
    match root {
        Some(_) => Err(LoadError::Parse("junk after document element".to_string())),
        None => Ok(()),
    }
}

fn open_element(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> Result<Element, LoadError> {
    let (namespace, local) = reader.resolve_element(start.name());
    let mut element = Element::new(qualified_name(namespace, local.as_ref())?);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| LoadError::Parse(e.to_string()))?;
        if attribute.key.as_namespace_binding().is_some() {
            continue;
        }

        let (namespace, local) = reader.resolve_attribute(attribute.key);
        let name = qualified_name(namespace, local.as_ref())?;
        let value = attribute.decode_and_unescape_value(&**reader)?;
        element.attributes.insert(name, value.into_owned());
    }

    Ok(element)
}

fn close_element(element: Element, stack: &mut [Element], root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

/// Text only belongs to an element until its first child; later text is the
/// child's tail and is dropped.
fn append_text(stack: &mut [Element], value: &str) -> Result<(), LoadError> {
    match stack.last_mut() {
        Some(current) if current.children.is_empty() => {
            current.text.get_or_insert_with(String::new).push_str(value);
            Ok(())
        }
        Some(_) => Ok(()),
        None if value.trim().is_empty() => Ok(()),
        None => Err(LoadError::Parse("text outside of the root element".to_string())),
    }
}

fn qualified_name(namespace: ResolveResult<'_>, local: &[u8]) -> Result<String, LoadError> {
    let local = utf8(local)?;
    match namespace {
        ResolveResult::Bound(ns) => Ok(format!("{{{}}}{}", utf8(ns.0)?, local)),
        ResolveResult::Unbound => Ok(local.to_string()),
        ResolveResult::Unknown(prefix) if prefix == b"xml" => {
            Ok(format!("{{{XML_NAMESPACE}}}{local}"))
        }
        ResolveResult::Unknown(prefix) => Err(LoadError::Parse(format!(
            "unbound prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn utf8(bytes: &[u8]) -> Result<&str, LoadError> {
    std::str::from_utf8(bytes).map_err(|e| LoadError::Parse(format!("invalid UTF-8 in name: {e}")))
}
