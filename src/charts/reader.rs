//! Chart XML reader.
//!
//! Streams a chart part (or a flat OPC package wrapping one) and collects
//! every `c:ser` element into a [`ChartSeries`]. Elements are matched by
//! namespace URI and local name, so the prefix used by the document does
//! not matter.

use crate::charts::series::{ChartSeries, PointValue};
use crate::common::{Error, Result, skip_utf8_bom};
use quick_xml::NsReader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// DrawingML chart namespace.
pub const CHART_NS: &[u8] = b"http://schemas.openxmlformats.org/drawingml/2006/chart";

/// Options controlling which point lists are extracted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Use `c:xVal`/`c:yVal` points for series lacking `c:cat`/`c:val`
    pub scatter_axes: bool,
}

impl ExtractOptions {
    /// Enable or disable scatter axis fallback.
    #[inline]
    pub fn with_scatter_axes(mut self, enabled: bool) -> Self {
        self.scatter_axes = enabled;
        self
    }
}

/// Read all series from the chart XML file at `path`.
///
/// A leading UTF-8 BOM is skipped.
pub fn read_series_from_path<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<Vec<ChartSeries>> {
    let mut file = File::open(path.as_ref())?;
    skip_utf8_bom(&mut file)?;
    read_series(BufReader::new(file), options)
}

/// Read all series from a chart XML document, in document order.
pub fn read_series<R: BufRead>(reader: R, options: &ExtractOptions) -> Result<Vec<ChartSeries>> {
    let mut xml_reader = NsReader::from_reader(reader);
    let mut collector = SeriesCollector::new(*options);
    let mut buf = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                collector.open(resolve_tag(&xml_reader, e)?)?;
            },
            Ok(Event::Empty(ref e)) => {
                collector.open(resolve_tag(&xml_reader, e)?)?;
                collector.close();
            },
            Ok(Event::End(_)) => collector.close(),
            Ok(Event::Text(ref e)) => {
                let text = e.decode().map_err(|e| Error::Xml(e.to_string()))?;
                collector.text(&normalize_line_endings(&text))?;
            },
            Ok(Event::CData(ref e)) => {
                let text = e.decode().map_err(|e| Error::Xml(e.to_string()))?;
                collector.text(&normalize_line_endings(&text))?;
            },
            Ok(Event::GeneralRef(ref e)) => {
                collector.text(&resolve_reference(e)?)?;
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {},
        }
        buf.clear();
    }

    collector.finish()
}

/// Chart elements the reader cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChartTag {
    Ser,
    Tx,
    StrRef,
    StrCache,
    Cat,
    Val,
    XVal,
    YVal,
    Pt,
    V,
}

impl ChartTag {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"ser" => Some(ChartTag::Ser),
            b"tx" => Some(ChartTag::Tx),
            b"strRef" => Some(ChartTag::StrRef),
            b"strCache" => Some(ChartTag::StrCache),
            b"cat" => Some(ChartTag::Cat),
            b"val" => Some(ChartTag::Val),
            b"xVal" => Some(ChartTag::XVal),
            b"yVal" => Some(ChartTag::YVal),
            b"pt" => Some(ChartTag::Pt),
            b"v" => Some(ChartTag::V),
            _ => None,
        }
    }

    fn section(self) -> Option<Section> {
        match self {
            ChartTag::Cat => Some(Section::Categories),
            ChartTag::Val => Some(Section::Values),
            ChartTag::XVal => Some(Section::XValues),
            ChartTag::YVal => Some(Section::YValues),
            _ => None,
        }
    }
}

/// Resolve the element name of `e` and validate its attributes.
fn resolve_tag<R>(reader: &NsReader<R>, e: &BytesStart) -> Result<Option<ChartTag>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        if let (ResolveResult::Unknown(prefix), _) = reader.resolve_attribute(attr.key) {
            return Err(unbound_prefix(&prefix));
        }
        if attr.value.contains(&b'<') {
            return Err(Error::Xml(format!(
                "'<' in value of attribute '{}'",
                String::from_utf8_lossy(attr.key.as_ref())
            )));
        }
    }

    match reader.resolve_element(e.name()) {
        (ResolveResult::Bound(Namespace(uri)), local) if uri == CHART_NS => {
            Ok(ChartTag::from_local_name(local.as_ref()))
        },
        (ResolveResult::Unknown(prefix), _) => Err(unbound_prefix(&prefix)),
        _ => Ok(None),
    }
}

fn unbound_prefix(prefix: &[u8]) -> Error {
    Error::Xml(format!(
        "unbound namespace prefix '{}'",
        String::from_utf8_lossy(prefix)
    ))
}

/// XML end-of-line handling: `\r\n` and lone `\r` become `\n`.
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn resolve_reference(e: &BytesRef) -> Result<String> {
    if let Some(ch) = e.resolve_char_ref().map_err(|e| Error::Xml(e.to_string()))? {
        return Ok(ch.to_string());
    }
    let name = e.decode().map_err(|e| Error::Xml(e.to_string()))?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| Error::Xml(format!("undefined entity '&{name};'")))
}

/// Point list a `c:pt` belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Categories,
    Values,
    XValues,
    YValues,
}

#[derive(Debug)]
struct PointState {
    section: Section,
    depth: usize,
    v_seen: bool,
    text: Option<String>,
}

#[derive(Debug)]
struct TextCapture {
    depth: usize,
    text: String,
    for_point: bool,
    for_name: bool,
}

#[derive(Debug)]
struct SeriesBuilder {
    /// Stack depth of the `c:ser` element
    depth: usize,
    /// `None` until the first name path is seen
    name: Option<Option<String>>,
    categories: Vec<String>,
    values: Vec<PointValue>,
    x_values: Vec<String>,
    y_values: Vec<PointValue>,
    has_categories: bool,
    has_values: bool,
    point: Option<PointState>,
    capture: Option<TextCapture>,
}

impl SeriesBuilder {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            name: None,
            categories: Vec::new(),
            values: Vec::new(),
            x_values: Vec::new(),
            y_values: Vec::new(),
            has_categories: false,
            has_values: false,
            point: None,
            capture: None,
        }
    }

    /// `stack` already contains `tag` as its last entry.
    fn open(&mut self, tag: ChartTag, stack: &[Option<ChartTag>]) {
        let depth = stack.len();
        match tag {
            ChartTag::Cat => self.has_categories = true,
            ChartTag::Val => self.has_values = true,
            ChartTag::Pt if self.point.is_none() => {
                if let Some(section) = self.enclosing_section(stack) {
                    self.point = Some(PointState {
                        section,
                        depth,
                        v_seen: false,
                        text: None,
                    });
                }
            },
            ChartTag::V => {
                // Only the first `c:v` child of a point counts
                let for_point = match self.point.as_mut() {
                    Some(point) if point.depth + 1 == depth && !point.v_seen => {
                        point.v_seen = true;
                        true
                    },
                    _ => false,
                };
                let for_name = self.name.is_none() && self.is_name_path(stack);
                if for_name {
                    self.name = Some(None);
                }
                if for_point || for_name {
                    self.capture = Some(TextCapture {
                        depth,
                        text: String::new(),
                        for_point,
                        for_name,
                    });
                }
            },
            _ => {},
        }
    }

    fn close(&mut self, depth: usize) {
        if let Some(capture) = self.capture.take_if(|c| c.depth == depth) {
            if capture.for_name {
                let trimmed = capture.text.trim();
                self.name = Some((!trimmed.is_empty()).then(|| trimmed.to_string()));
            }
            if capture.for_point
                && let Some(point) = self.point.as_mut()
                && !capture.text.is_empty()
            {
                point.text = Some(capture.text);
            }
        }

        if let Some(point) = self.point.take_if(|p| p.depth == depth)
            && let Some(text) = point.text
        {
            let trimmed = text.trim();
            match point.section {
                Section::Categories => self.categories.push(trimmed.to_string()),
                Section::Values => self.values.push(PointValue::parse(trimmed)),
                Section::XValues => self.x_values.push(trimmed.to_string()),
                Section::YValues => self.y_values.push(PointValue::parse(trimmed)),
            }
        }
    }

    fn text(&mut self, text: &str, depth: usize) {
        if let Some(capture) = self.capture.as_mut()
            && capture.depth == depth
        {
            capture.text.push_str(text);
        }
    }

    /// Innermost point list enclosing the element on top of `stack`.
    fn enclosing_section(&self, stack: &[Option<ChartTag>]) -> Option<Section> {
        let ancestors = &stack[self.depth..stack.len() - 1];
        ancestors
            .iter()
            .rev()
            .find_map(|tag| tag.and_then(ChartTag::section))
    }

    /// Whether the `c:v` on top of `stack` ends a `tx/strRef/strCache/pt/v` path.
    fn is_name_path(&self, stack: &[Option<ChartTag>]) -> bool {
        const NAME_PATH: [ChartTag; 5] = [
            ChartTag::Tx,
            ChartTag::StrRef,
            ChartTag::StrCache,
            ChartTag::Pt,
            ChartTag::V,
        ];
        let n = stack.len();
        n >= self.depth + NAME_PATH.len()
            && stack[n - NAME_PATH.len()..]
                .iter()
                .zip(NAME_PATH.iter())
                .all(|(tag, expected)| *tag == Some(*expected))
    }

    fn finish(self, options: &ExtractOptions) -> ChartSeries {
        let mut series = ChartSeries {
            name: self.name.flatten(),
            categories: self.categories,
            values: self.values,
        };
        if options.scatter_axes {
            if !self.has_categories {
                series.categories = self.x_values;
            }
            if !self.has_values {
                series.values = self.y_values;
            }
        }
        series
    }
}

/// Tracks the open element stack and the series being built.
#[derive(Debug)]
struct SeriesCollector {
    options: ExtractOptions,
    stack: Vec<Option<ChartTag>>,
    current: Option<SeriesBuilder>,
    series: Vec<ChartSeries>,
    seen_root: bool,
    root_closed: bool,
}

impl SeriesCollector {
    fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            stack: Vec::new(),
            current: None,
            series: Vec::new(),
            seen_root: false,
            root_closed: false,
        }
    }

    fn open(&mut self, tag: Option<ChartTag>) -> Result<()> {
        if self.root_closed && self.stack.is_empty() {
            return Err(Error::Xml("junk after document element".to_string()));
        }
        self.seen_root = true;
        self.stack.push(tag);

        if let Some(builder) = self.current.as_mut() {
            if let Some(tag) = tag {
                builder.open(tag, &self.stack);
            }
        } else if tag == Some(ChartTag::Ser) {
            self.current = Some(SeriesBuilder::new(self.stack.len()));
        }
        Ok(())
    }

    fn close(&mut self) {
        let depth = self.stack.len();
        self.stack.pop();
        if self.stack.is_empty() {
            self.root_closed = true;
        }

        if let Some(builder) = self.current.take_if(|b| b.depth == depth) {
            let series = builder.finish(&self.options);
            debug!(
                index = self.series.len(),
                name = series.name.as_deref().unwrap_or("<unnamed>"),
                categories = series.categories.len(),
                values = series.values.len(),
                "read chart series"
            );
            self.series.push(series);
        } else if let Some(builder) = self.current.as_mut() {
            builder.close(depth);
        }
    }

    fn text(&mut self, text: &str) -> Result<()> {
        if self.stack.is_empty() {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(Error::Xml(
                "text outside the document element".to_string(),
            ));
        }
        if let Some(builder) = self.current.as_mut() {
            builder.text(text, self.stack.len());
        }
        Ok(())
    }

    fn finish(self) -> Result<Vec<ChartSeries>> {
        if !self.seen_root {
            return Err(Error::Xml("no element found".to_string()));
        }
        if !self.stack.is_empty() {
            return Err(Error::Xml(format!(
                "unexpected end of document: {} unclosed element(s)",
                self.stack.len()
            )));
        }
        Ok(self.series)
    }
}
