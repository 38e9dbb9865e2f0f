//! Editable PDF document
//!
//! Wraps a `lopdf::Document` loaded from the source file. Pages are edited
//! in place by appending content streams; the document is written out once
//! with [`PdfDocument::save`].
//!
//! # Overlay layout
//!
//! Appending text runs to a page rewrites its `/Contents` as
//!
//! ```text
//! [ q ] [ original streams... ] [ Q q BT 3 Tr /FOcr 12 Tf 1 0 0 1 x y Tm (word) Tj ... ET Q ]
//! ```
//!
//! The leading `q` and its matching `Q` isolate the original graphics state
//! so a transformation left active by the scan's content stream cannot move
//! the overlay. A page without content gets only the overlay stream.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Encoding, Object, ObjectId, Stream, StringFormat};

use super::encoding::{decode_text, encode_text, overlay_font_dictionary};
use super::error::{DocumentError, DocumentResult};
use super::types::{PageBox, RenderMode, TextRun};
use crate::geometry::{PageSize, Rotation};

/// Resource name of the overlay font in each page's `/Font` dictionary
pub const OVERLAY_FONT: &str = "FOcr";

/// Page boxes that define the visible area, in lookup order
const VISIBLE_BOXES: [&[u8]; 2] = [b"CropBox", b"MediaBox"];

/// US Letter, used when a page tree carries no box at all
const DEFAULT_PAGE_BOX: PageBox = PageBox {
    llx: 0.0,
    lly: 0.0,
    urx: 612.0,
    ury: 792.0,
};

/// An open PDF that can receive text runs and be saved
pub struct PdfDocument {
    /// Source path, if loaded from disk
    path: Option<PathBuf>,
    /// Original file bytes (shared with the rasterizer)
    source: Arc<Vec<u8>>,
    /// Mutable object model
    doc: lopdf::Document,
    /// Page object ids in page order
    pages: Vec<ObjectId>,
    /// Shared overlay font object, created on first use
    font_id: Option<ObjectId>,
}

impl PdfDocument {
    /// Open a PDF from disk
    pub fn open<P: AsRef<Path>>(path: P) -> DocumentResult<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let mut document = Self::from_bytes(data)?;
        document.path = Some(path.to_path_buf());
        Ok(document)
    }

    /// Load a PDF from owned bytes
    pub fn from_bytes(data: Vec<u8>) -> DocumentResult<Self> {
        if !data.starts_with(b"%PDF") {
            return Err(DocumentError::UnsupportedFormat(
                "missing %PDF header".to_string(),
            ));
        }

        let doc = lopdf::Document::load_mem(&data)?;
        if doc.is_encrypted() {
            return Err(DocumentError::Encrypted);
        }

        // get_pages is keyed by 1-based page number, so values come out in page order
        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

        tracing::debug!("Loaded PDF with {} pages ({} bytes)", pages.len(), data.len());

        Ok(Self {
            path: None,
            source: Arc::new(data),
            doc,
            pages,
            font_id: None,
        })
    }

    /// Path the document was opened from
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Original, unmodified file bytes
    pub fn source_bytes(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.source)
    }

    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_id(&self, index: usize) -> DocumentResult<ObjectId> {
        self.pages
            .get(index)
            .copied()
            .ok_or(DocumentError::PageNotFound(index))
    }

    /// Visible box of a page (CropBox, else MediaBox, inherited through the page tree)
    pub fn page_box(&self, index: usize) -> DocumentResult<PageBox> {
        let page_id = self.page_id(index)?;

        for key in VISIBLE_BOXES {
            if let Some(rect) = self.inherited(page_id, key)? {
                let nums = self.numbers(&rect)?;
                if nums.len() == 4 {
                    return Ok(PageBox::from_corners(nums[0], nums[1], nums[2], nums[3]));
                }
                tracing::warn!(
                    "Page {} has a {} with {} elements, ignoring",
                    index,
                    String::from_utf8_lossy(key),
                    nums.len()
                );
            }
        }

        tracing::warn!("Page {} has no page box, assuming US Letter", index);
        Ok(DEFAULT_PAGE_BOX)
    }

    /// Page dimensions in points, before any display rotation
    pub fn page_size(&self, index: usize) -> DocumentResult<PageSize> {
        Ok(self.page_box(index)?.size())
    }

    /// Display rotation of a page (`/Rotate`, inherited through the page tree)
    pub fn page_rotation(&self, index: usize) -> DocumentResult<Rotation> {
        let page_id = self.page_id(index)?;
        let degrees = match self.inherited(page_id, b"Rotate")? {
            Some(value) => number(&value).map(|v| v as i64).unwrap_or(0),
            None => 0,
        };

        Ok(Rotation::from_degrees(degrees).unwrap_or_else(|| {
            tracing::warn!("Page {} has /Rotate {}, ignoring", index, degrees);
            Rotation::None
        }))
    }

    /// Append text runs to a page.
    ///
    /// Existing content is kept untouched; runs are added in one new content
    /// stream. An empty slice leaves the page unmodified.
    pub fn append_text_runs(&mut self, index: usize, runs: &[TextRun]) -> DocumentResult<()> {
        if runs.is_empty() {
            return Ok(());
        }

        let page_id = self.page_id(index)?;
        let page_box = self.page_box(index)?;
        let font_id = self.overlay_font();

        self.install_font(page_id, font_id)?;

        let existing = self.content_refs(page_id)?;
        let wrapped = !existing.is_empty();
        let overlay = {
            let encoding = self.doc.get_dictionary(font_id)?.get_font_encoding(&self.doc)?;
            encode_runs(runs, &page_box, wrapped, &encoding)?
        };

        let mut contents = Vec::with_capacity(existing.len() + 2);
        if wrapped {
            let open = self.doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
            contents.push(Object::Reference(open));
            contents.extend(existing);
        }
        let overlay_id = self.doc.add_object(Stream::new(Dictionary::new(), overlay));
        contents.push(Object::Reference(overlay_id));

        self.doc
            .get_object_mut(page_id)?
            .as_dict_mut()?
            .set("Contents", Object::Array(contents));

        tracing::trace!("Appended {} text runs to page {}", runs.len(), index);
        Ok(())
    }

    /// Read back every text run drawn on a page
    pub fn text_runs(&self, index: usize) -> DocumentResult<Vec<TextRun>> {
        let page_id = self.page_id(index)?;
        let page_box = self.page_box(index)?;

        let data = self.doc.get_page_content(page_id)?;
        let content = Content::decode(&data)?;

        let fonts = self.doc.get_page_fonts(page_id)?;
        let encodings: HashMap<&[u8], Encoding> = fonts
            .iter()
            .filter_map(|(name, font)| {
                font.get_font_encoding(&self.doc)
                    .ok()
                    .map(|enc| (name.as_slice(), enc))
            })
            .collect();

        Ok(decode_runs(&content.operations, &page_box, &encodings))
    }

    /// Write the document to `path`.
    ///
    /// The file is written next to the destination and renamed into place,
    /// so a failed save never leaves a truncated output behind.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> DocumentResult<()> {
        let path = path.as_ref();
        let tmp = staging_path(path);

        let result = self.write_file(&tmp).and_then(|_| {
            fs::rename(&tmp, path)?;
            Ok(())
        });

        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }

    fn write_file(&mut self, path: &Path) -> DocumentResult<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.doc
            .save_to(&mut writer)
            .map_err(|e| DocumentError::WriteError(e.to_string()))?;
        writer.flush()?;
        let file = writer
            .into_inner()
            .map_err(|e| DocumentError::IoError(e.into_error()))?;
        file.sync_all()?;
        Ok(())
    }

    fn overlay_font(&mut self) -> ObjectId {
        if let Some(id) = self.font_id {
            return id;
        }
        let id = self.doc.add_object(overlay_font_dictionary());
        self.font_id = Some(id);
        id
    }

    /// Give the page its own resource dictionary with the overlay font in it.
    ///
    /// Inherited or indirect resources are copied onto the page so other
    /// pages sharing them are not affected.
    fn install_font(&mut self, page_id: ObjectId, font_id: ObjectId) -> DocumentResult<()> {
        let mut resources = match self.inherited(page_id, b"Resources")? {
            Some(Object::Dictionary(dict)) => dict,
            Some(_) => {
                return Err(DocumentError::InvalidPage(
                    "Resources is not a dictionary".to_string(),
                ))
            }
            None => Dictionary::new(),
        };

        let mut fonts = match resources.get(b"Font") {
            Ok(obj) => match self.resolve(obj)? {
                Object::Dictionary(dict) => dict.clone(),
                _ => Dictionary::new(),
            },
            Err(_) => Dictionary::new(),
        };
        fonts.set(OVERLAY_FONT, Object::Reference(font_id));
        resources.set("Font", Object::Dictionary(fonts));

        self.doc
            .get_object_mut(page_id)?
            .as_dict_mut()?
            .set("Resources", Object::Dictionary(resources));
        Ok(())
    }

    /// Current `/Contents` of a page as a list of stream references
    fn content_refs(&self, page_id: ObjectId) -> DocumentResult<Vec<Object>> {
        let page = self.doc.get_dictionary(page_id)?;
        let contents = match page.get(b"Contents") {
            Ok(obj) => obj,
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(id) => match self.doc.get_object(*id)? {
                Object::Array(items) => Ok(items.clone()),
                Object::Stream(_) => Ok(vec![Object::Reference(*id)]),
                _ => Err(DocumentError::InvalidPage(
                    "Contents does not reference a stream".to_string(),
                )),
            },
            Object::Array(items) => Ok(items.clone()),
            _ => Err(DocumentError::InvalidPage(
                "Contents is neither a stream nor an array".to_string(),
            )),
        }
    }

    /// Look up an inheritable page attribute, walking up `/Parent` links.
    ///
    /// The result is resolved through one level of indirection and cloned.
    fn inherited(&self, page_id: ObjectId, key: &[u8]) -> DocumentResult<Option<Object>> {
        let mut node = self.doc.get_dictionary(page_id)?;

        // Bounded walk: malformed files can contain parent cycles
        for _ in 0..64 {
            if let Ok(value) = node.get(key) {
                return Ok(Some(self.resolve(value)?.clone()));
            }
            match node.get(b"Parent").and_then(Object::as_reference) {
                Ok(parent) => node = self.doc.get_dictionary(parent)?,
                Err(_) => return Ok(None),
            }
        }

        Ok(None)
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> DocumentResult<&'a Object> {
        match obj {
            Object::Reference(id) => Ok(self.doc.get_object(*id)?),
            other => Ok(other),
        }
    }

    fn numbers(&self, obj: &Object) -> DocumentResult<Vec<f32>> {
        let items = match obj {
            Object::Array(items) => items,
            _ => {
                return Err(DocumentError::InvalidPage(
                    "page box is not an array".to_string(),
                ))
            }
        };

        items
            .iter()
            .map(|item| {
                number(self.resolve(item)?)
                    .ok_or_else(|| DocumentError::InvalidPage("non-numeric page box".to_string()))
            })
            .collect()
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r as f32),
        _ => None,
    }
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

/// Build the overlay content stream for a set of runs.
///
/// `wrapped` closes the `q` pushed in front of the original content.
fn encode_runs(
    runs: &[TextRun],
    page_box: &PageBox,
    wrapped: bool,
    encoding: &Encoding,
) -> DocumentResult<Vec<u8>> {
    let mut operations = Vec::with_capacity(runs.len() * 3 + 6);
    if wrapped {
        operations.push(Operation::new("Q", vec![]));
    }
    operations.push(Operation::new("q", vec![]));
    operations.push(Operation::new("BT", vec![]));

    let mut mode = None;
    for run in runs {
        if mode != Some(run.render_mode) {
            operations.push(Operation::new(
                "Tr",
                vec![Object::Integer(run.render_mode.operand())],
            ));
            mode = Some(run.render_mode);
        }

        let (x, y) = page_box.to_user_space(run.x, run.y);
        operations.push(Operation::new(
            "Tf",
            vec![Object::Name(OVERLAY_FONT.as_bytes().to_vec()), real(run.font_size)],
        ));
        let (cos, sin) = run.rotation.direction();
        operations.push(Operation::new(
            "Tm",
            vec![
                Object::Integer(cos),
                Object::Integer(sin),
                Object::Integer(-sin),
                Object::Integer(cos),
                real(x),
                real(y),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_text(encoding, &run.text), StringFormat::Literal)],
        ));
    }

    operations.push(Operation::new("ET", vec![]));
    operations.push(Operation::new("Q", vec![]));

    Content { operations }
        .encode()
        .map_err(|e| DocumentError::WriteError(e.to_string()))
}

/// Minimal text-state interpreter: recovers `Tj` runs with their position,
/// size, render mode, and quarter-turn rotation. Enough to inspect overlays;
/// not a general text extractor (ignores `TJ`, leading, and scaled or skewed
/// text matrices).
fn decode_runs(
    operations: &[Operation],
    page_box: &PageBox,
    encodings: &HashMap<&[u8], Encoding>,
) -> Vec<TextRun> {
    #[derive(Clone, Copy)]
    struct State<'a> {
        mode: RenderMode,
        font: Option<&'a [u8]>,
        size: f32,
    }

    let mut runs = Vec::new();
    let mut state = State {
        mode: RenderMode::Visible,
        font: None,
        size: 0.0,
    };
    let mut saved = Vec::new();
    let (mut x, mut y) = (0.0f32, 0.0f32);
    let mut rotation = Rotation::None;

    for op in operations {
        let nums: Vec<f32> = op.operands.iter().filter_map(number).collect();
        match op.operator.as_str() {
            "q" => saved.push(state),
            "Q" => {
                if let Some(previous) = saved.pop() {
                    state = previous;
                }
            }
            "BT" => {
                x = 0.0;
                y = 0.0;
                rotation = Rotation::None;
            }
            "Tr" => {
                if let Some(mode) = nums.first() {
                    state.mode = if *mode as i64 == 3 {
                        RenderMode::Invisible
                    } else {
                        RenderMode::Visible
                    };
                }
            }
            "Tf" => {
                if let Some(Object::Name(name)) = op.operands.first() {
                    state.font = Some(name.as_slice());
                }
                if let Some(size) = nums.first() {
                    state.size = *size;
                }
            }
            "Tm" if nums.len() == 6 => {
                rotation = Rotation::from_direction(nums[0], nums[1]);
                x = nums[4];
                y = nums[5];
            }
            "Td" | "TD" if nums.len() == 2 => {
                x += nums[0];
                y += nums[1];
            }
            "Tj" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    runs.push(TextRun {
                        text: decode_text(state.font.and_then(|f| encodings.get(f)), bytes),
                        x: x - page_box.llx,
                        y: page_box.ury - y,
                        font_size: state.size,
                        render_mode: state.mode,
                        rotation,
                    });
                }
            }
            _ => {}
        }
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    /// Build a small PDF with one scanned-looking page per size
    fn sample_pdf(sizes: &[(i64, i64)]) -> Vec<u8> {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let kids: Vec<Object> = sizes
            .iter()
            .map(|(w, h)| {
                let content = doc.add_object(Stream::new(
                    Dictionary::new(),
                    b"2 0 0 2 0 0 cm 0 0 10 10 re f".to_vec(),
                ));
                Object::Reference(doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "MediaBox" => vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(*w),
                        Object::Integer(*h),
                    ],
                    "Contents" => content,
                }))
            })
            .collect();

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog);

        let mut out = Vec::new();
        doc.save_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_rejects_non_pdf() {
        let result = PdfDocument::from_bytes(b"hello world".to_vec());
        assert!(matches!(result, Err(DocumentError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_page_count_and_sizes() {
        let doc = PdfDocument::from_bytes(sample_pdf(&[(612, 792), (842, 595)])).unwrap();

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.page_size(0).unwrap(), PageSize::new(612.0, 792.0));
        assert_eq!(doc.page_size(1).unwrap(), PageSize::new(842.0, 595.0));
        assert!(matches!(doc.page_size(2), Err(DocumentError::PageNotFound(2))));
    }

    #[test]
    fn test_append_and_read_back_runs() {
        let mut doc = PdfDocument::from_bytes(sample_pdf(&[(612, 792)])).unwrap();
        let runs = vec![
            TextRun::invisible("Hello", 72.0, 100.0, 12.0),
            TextRun::invisible("world", 120.0, 100.0, 12.0),
        ];

        doc.append_text_runs(0, &runs).unwrap();
        let read = doc.text_runs(0).unwrap();

        assert_eq!(read.len(), 2);
        assert_eq!(read[0].text, "Hello");
        assert_eq!(read[1].text, "world");
        assert!(read.iter().all(|r| r.render_mode == RenderMode::Invisible));
        assert!((read[0].x - 72.0).abs() < 0.01);
        assert!((read[0].y - 100.0).abs() < 0.01);
        assert!((read[0].font_size - 12.0).abs() < 0.01);
    }

    #[test]
    fn test_unmappable_characters_become_replacement() {
        let mut doc = PdfDocument::from_bytes(sample_pdf(&[(612, 792)])).unwrap();
        doc.append_text_runs(0, &[TextRun::invisible("café “x” 日", 72.0, 100.0, 12.0)])
            .unwrap();

        assert_eq!(doc.text_runs(0).unwrap()[0].text, "café “x” ?");
    }

    #[test]
    fn test_page_rotation_is_read_and_inherited() {
        let mut doc = PdfDocument::from_bytes(sample_pdf(&[(612, 792), (612, 792)])).unwrap();
        assert_eq!(doc.page_rotation(0).unwrap(), Rotation::None);

        let parent = doc
            .doc
            .get_dictionary(doc.pages[0])
            .unwrap()
            .get(b"Parent")
            .unwrap()
            .as_reference()
            .unwrap();
        doc.doc
            .get_object_mut(parent)
            .unwrap()
            .as_dict_mut()
            .unwrap()
            .set("Rotate", Object::Integer(-90));
        doc.doc
            .get_object_mut(doc.pages[1])
            .unwrap()
            .as_dict_mut()
            .unwrap()
            .set("Rotate", Object::Integer(180));

        assert_eq!(doc.page_rotation(0).unwrap(), Rotation::Clockwise270);
        assert_eq!(doc.page_rotation(1).unwrap(), Rotation::Clockwise180);
    }

    #[test]
    fn test_rotated_runs_read_back_with_rotation() {
        let mut doc = PdfDocument::from_bytes(sample_pdf(&[(612, 792)])).unwrap();
        let run = TextRun::invisible("up", 300.0, 500.0, 10.0).rotated(Rotation::Clockwise90);
        doc.append_text_runs(0, &[run]).unwrap();

        let page_id = doc.page_id(0).unwrap();
        let data = doc.doc.get_page_content(page_id).unwrap();
        let content = String::from_utf8_lossy(&data).into_owned();
        assert!(content.contains("0 1 -1 0"));

        let read = &doc.text_runs(0).unwrap()[0];
        assert_eq!(read.rotation, Rotation::Clockwise90);
        assert!((read.x - 300.0).abs() < 0.01);
        assert!((read.y - 500.0).abs() < 0.01);
    }

    #[test]
    fn test_empty_runs_leave_page_untouched() {
        let mut doc = PdfDocument::from_bytes(sample_pdf(&[(612, 792)])).unwrap();
        let page_id = doc.page_id(0).unwrap();
        let before = doc.doc.get_dictionary(page_id).unwrap().clone();

        doc.append_text_runs(0, &[]).unwrap();

        let after = doc.doc.get_dictionary(page_id).unwrap();
        assert_eq!(format!("{:?}", before), format!("{:?}", after));
        assert!(doc.text_runs(0).unwrap().is_empty());
    }

    #[test]
    fn test_font_installed_per_page_and_shared() {
        let mut doc = PdfDocument::from_bytes(sample_pdf(&[(612, 792), (612, 792)])).unwrap();
        let run = [TextRun::invisible("x", 10.0, 10.0, 8.0)];
        doc.append_text_runs(0, &run).unwrap();
        doc.append_text_runs(1, &run).unwrap();

        let font_of = |index: usize| {
            let page = doc.doc.get_dictionary(doc.pages[index]).unwrap();
            let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
            let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
            fonts.get(OVERLAY_FONT.as_bytes()).unwrap().as_reference().unwrap()
        };
        assert_eq!(font_of(0), font_of(1));
    }

    #[test]
    fn test_original_content_is_isolated() {
        let mut doc = PdfDocument::from_bytes(sample_pdf(&[(612, 792)])).unwrap();
        doc.append_text_runs(0, &[TextRun::invisible("x", 10.0, 10.0, 8.0)])
            .unwrap();

        let page_id = doc.page_id(0).unwrap();
        let data = doc.doc.get_page_content(page_id).unwrap();
        let ops = Content::decode(&data).unwrap().operations;
        let operators: Vec<&str> = ops.iter().map(|op| op.operator.as_str()).collect();

        assert_eq!(operators.first(), Some(&"q"));
        let cm = operators.iter().position(|op| *op == "cm").unwrap();
        let restore = operators.iter().position(|op| *op == "Q").unwrap();
        let bt = operators.iter().position(|op| *op == "BT").unwrap();
        assert!(cm < restore && restore < bt);
    }

    #[test]
    fn test_save_round_trip_preserves_pages() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.pdf");

        let mut doc = PdfDocument::from_bytes(sample_pdf(&[(612, 792), (300, 400)])).unwrap();
        doc.append_text_runs(1, &[TextRun::invisible("scan", 5.0, 20.0, 9.6)])
            .unwrap();
        doc.save(&output).unwrap();

        assert!(!staging_path(&output).exists());
        let reopened = PdfDocument::open(&output).unwrap();
        assert_eq!(reopened.page_count(), 2);
        assert!(reopened.text_runs(0).unwrap().is_empty());
        assert_eq!(reopened.text_runs(1).unwrap()[0].text, "scan");
    }

    #[test]
    fn test_save_to_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("out.pdf");

        let mut doc = PdfDocument::from_bytes(sample_pdf(&[(612, 792)])).unwrap();
        assert!(doc.save(&output).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_staging_path_is_sibling() {
        let path = Path::new("/tmp/scans/report.pdf");
        assert_eq!(staging_path(path), Path::new("/tmp/scans/report.pdf.partial"));
    }
}
