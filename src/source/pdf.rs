//! Span extraction from PDF content streams using lopdf.
//!
//! Text positions come from a minimal text-state machine over each page's
//! content stream. Glyph widths are not read from the font programs; a span's
//! width is estimated from its character count and font size.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use super::detect::detect_pdf_header;
use super::SpanSource;
use crate::error::{Error, Result};
use crate::model::{RawPage, RawSpan};

/// Default page size (US Letter) when no MediaBox can be found.
const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// Average glyph advance as a fraction of the font size.
const AVG_CHAR_WIDTH: f32 = 0.5;

/// Ascender height as a fraction of the font size.
const ASCENT: f32 = 0.8;

/// TJ adjustments beyond this (in thousandths of an em) read as a word break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Parent chain depth limit when resolving inherited page attributes.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Span source backed by `lopdf::Document`.
pub struct LopdfSource {
    doc: LopdfDocument,
}

impl LopdfSource {
    /// Load a PDF from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Load a PDF from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect_pdf_header(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: std::io::Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Extract the raw spans of one page.
    ///
    /// A page whose content stream cannot be read or decoded comes back
    /// empty; the failure is logged.
    pub fn extract_page(&self, number: u32, page_id: ObjectId) -> RawPage {
        match self.page_spans(page_id) {
            Ok(spans) => RawPage { number, spans },
            Err(e) => {
                log::warn!("Skipping page {}: {}", number, e);
                RawPage::new(number)
            }
        }
    }

    fn page_spans(&self, page_id: ObjectId) -> Result<Vec<RawSpan>> {
        let page_box = self.media_box(page_id);
        let fonts = self.doc.get_page_fonts(page_id).unwrap_or_default();

        let data = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::TextExtract(e.to_string()))?;
        let content = Content::decode(&data).map_err(|e| Error::TextExtract(e.to_string()))?;

        let mut interpreter = TextInterpreter::new(&self.doc, &fonts, page_box);
        for op in &content.operations {
            interpreter.apply(&op.operator, &op.operands);
        }
        Ok(interpreter.spans)
    }

    /// Page box, following the Parent chain for an inherited MediaBox.
    fn media_box(&self, page_id: ObjectId) -> PageBox {
        let mut current = self.doc.get_dictionary(page_id).ok();

        for _ in 0..MAX_INHERITANCE_DEPTH {
            let Some(dict) = current else { break };

            if let Some(page_box) = dict
                .get(b"MediaBox")
                .ok()
                .and_then(|obj| self.resolve(obj).as_array().ok())
                .and_then(|array| PageBox::from_array(array))
            {
                return page_box;
            }

            current = dict
                .get(b"Parent")
                .and_then(Object::as_reference)
                .ok()
                .and_then(|id| self.doc.get_dictionary(id).ok());
        }

        PageBox::default()
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> &'a Object {
        match obj {
            Object::Reference(id) => self.doc.get_object(*id).unwrap_or(obj),
            _ => obj,
        }
    }
}

impl SpanSource for LopdfSource {
    fn raw_pages(&self) -> Result<Vec<RawPage>> {
        let pages = self.doc.get_pages();
        log::debug!("Extracting spans from {} pages", pages.len());
        Ok(pages
            .into_iter()
            .map(|(number, page_id)| self.extract_page(number, page_id))
            .collect())
    }
}

/// Visible page rectangle in PDF user space.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PageBox {
    x0: f32,
    y0: f32,
    width: f32,
    height: f32,
}

impl PageBox {
    fn from_array(array: &[Object]) -> Option<Self> {
        let [x0, y0, x1, y1] = array else {
            return None;
        };
        let (x0, y0) = (x0.as_float().ok()?, y0.as_float().ok()?);
        let (x1, y1) = (x1.as_float().ok()?, y1.as_float().ok()?);
        Some(Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        })
    }
}

impl Default for PageBox {
    fn default() -> Self {
        Self {
            x0: 0.0,
            y0: 0.0,
            width: DEFAULT_PAGE_SIZE.0,
            height: DEFAULT_PAGE_SIZE.1,
        }
    }
}

/// Text matrix with the leading needed for T*, ' and ".
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    /// Move along the baseline by `tx` text-space units.
    fn advance(&mut self, tx: f32) {
        self.e += tx * self.a;
        self.f += tx * self.b;
    }

    /// Vertical scale factor
    fn scale(&self) -> f32 {
        (self.b * self.b + self.d * self.d).sqrt()
    }
}

/// Walks content-stream operators and records shown text as raw spans.
struct TextInterpreter<'a> {
    doc: &'a LopdfDocument,
    fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>,
    page_box: PageBox,
    matrix: TextMatrix,
    in_text: bool,
    font_name: Vec<u8>,
    font_size: f32,
    bold: bool,
    spans: Vec<RawSpan>,
}

impl<'a> TextInterpreter<'a> {
    fn new(
        doc: &'a LopdfDocument,
        fonts: &'a BTreeMap<Vec<u8>, &'a Dictionary>,
        page_box: PageBox,
    ) -> Self {
        Self {
            doc,
            fonts,
            page_box,
            matrix: TextMatrix::default(),
            in_text: false,
            font_name: Vec::new(),
            font_size: 12.0,
            bold: false,
            spans: Vec::new(),
        }
    }

    fn apply(&mut self, operator: &str, operands: &[Object]) {
        match operator {
            "BT" => {
                self.in_text = true;
                let leading = self.matrix.leading;
                self.matrix = TextMatrix {
                    leading,
                    ..TextMatrix::default()
                };
            }
            "ET" => self.in_text = false,
            "Tf" => {
                if let [Object::Name(name), size, ..] = operands {
                    self.bold = self.base_font(name).is_some_and(|f| is_bold_font(&f));
                    self.font_name = name.clone();
                    self.font_size = get_number(size).unwrap_or(12.0);
                }
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(get_number) {
                    self.matrix.leading = leading;
                }
            }
            "Td" | "TD" => {
                if let [tx, ty, ..] = operands {
                    let tx = get_number(tx).unwrap_or(0.0);
                    let ty = get_number(ty).unwrap_or(0.0);
                    if operator == "TD" {
                        self.matrix.leading = -ty;
                    }
                    self.matrix.translate(tx, ty);
                }
            }
            "Tm" => {
                if operands.len() >= 6 {
                    let n = |i: usize, default: f32| get_number(&operands[i]).unwrap_or(default);
                    self.matrix
                        .set(n(0, 1.0), n(1, 0.0), n(2, 0.0), n(3, 1.0), n(4, 0.0), n(5, 0.0));
                }
            }
            "T*" => self.matrix.next_line(),
            "Tj" => {
                if let Some(Object::String(bytes, _)) = operands.first() {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text = self.decode_array(items);
                    self.show(text);
                }
            }
            "'" | "\"" => {
                self.matrix.next_line();
                let index = if operator == "\"" { 2 } else { 0 };
                if let Some(Object::String(bytes, _)) = operands.get(index) {
                    let text = self.decode(bytes);
                    self.show(text);
                }
            }
            _ => {}
        }
    }

    fn base_font(&self, name: &[u8]) -> Option<String> {
        self.fonts
            .get(name)
            .and_then(|font| font.get(b"BaseFont").ok())
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
    }

    fn decode(&self, bytes: &[u8]) -> String {
        let encoding = self
            .fonts
            .get(&self.font_name)
            .and_then(|font| font.get_font_encoding(self.doc).ok());

        encoding
            .and_then(|enc| LopdfDocument::decode_text(&enc, bytes).ok())
            .unwrap_or_else(|| decode_text_simple(bytes))
    }

    fn decode_array(&self, items: &[Object]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(bytes)),
                other => {
                    // Negative adjustments move the next glyph to the right
                    let adjustment = get_number(other).map_or(0.0, |n| -n);
                    if adjustment > TJ_SPACE_THRESHOLD
                        && combined
                            .chars()
                            .last()
                            .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c))
                    {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }

    fn show(&mut self, text: String) {
        let chars = text.chars().count() as f32;
        let text_space_width = chars * self.font_size * AVG_CHAR_WIDTH;

        if self.in_text && !text.trim().is_empty() {
            let size = self.font_size * self.matrix.scale();
            let page = self.page_box;
            let baseline = self.matrix.f - page.y0;
            let top = (page.height - baseline - ASCENT * size).max(0.0);

            self.spans.push(
                RawSpan::new(text, size)
                    .with_bbox(
                        self.matrix.e - page.x0,
                        top,
                        chars * size * AVG_CHAR_WIDTH,
                        size,
                    )
                    .with_page_size(page.width, page.height),
            );
            if self.bold {
                if let Some(span) = self.spans.last_mut() {
                    span.bold = true;
                }
            }
        }

        self.matrix.advance(text_space_width);
    }
}

/// Whether a base font name denotes a bold face ("Helvetica-Bold",
/// "ABCDEF+Inter-SemiBold", "Arial Black").
fn is_bold_font(base_font: &str) -> bool {
    let lower = base_font.to_lowercase();
    ["bold", "black", "heavy", "semibold", "demi"]
        .iter()
        .any(|marker| lower.contains(marker))
}

/// Simple text decoding fallback when no font encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let utf16: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Scripts written without spaces between words (Han, Hiragana, Katakana).
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF
        | 0x3400..=0x4DBF
        | 0x20000..=0x2A6DF
        | 0x3040..=0x309F
        | 0x30A0..=0x30FF
        | 0x3000..=0x303F
    )
}
