// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use graph_builder::GraphBuilder;

use crate::osm::Profile;
use crate::Graph;

mod graph_builder;
mod model;
mod xml;

/// Format of the input OSM file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the format based on the content
    /// (and the file extension, when loading from a file)
    Unknown,

    /// Force uncompressed [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    Xml,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    XmlGz,

    /// Force [OSM XML](https://wiki.openstreetmap.org/wiki/OSM_XML)
    /// with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    XmlBz2,
}

/// Additional controls for interpreting OSM data as a road [Graph].
#[derive(Debug, Clone, Copy)]
pub struct Options<'a> {
    /// Which OSM ways should be converted into edges of the [Graph].
    pub profile: &'a Profile<'a>,

    /// Format of the input data.
    pub file_format: FileFormat,

    /// Filter nodes by a specific bounding box. In order: left (min lon), bottom (min lat),
    /// right (max lon), top (max lat). Ignored if all values are set to zero, or at least one
    /// of them is not finite.
    pub bbox: [f64; 4],
}

/// Error conditions which may occur when loading OSM data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("xml: {0}")]
    Xml(#[from] quick_xml::Error),

    /// [FileFormat::Unknown] was requested, and the data doesn't look like
    /// any of the supported formats.
    #[error("unrecognized file format")]
    UnknownFormat,
}

/// Guesses the format of OSM data based on its first few bytes.
fn detect_format(head: &[u8]) -> Result<FileFormat, Error> {
    const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

    if head.starts_with(b"\x1F\x8B") {
        return Ok(FileFormat::XmlGz);
    }
    if head.starts_with(b"BZh") {
        return Ok(FileFormat::XmlBz2);
    }

    let text = head.strip_prefix(UTF8_BOM).unwrap_or(head);
    match text.iter().copied().find(|b| !b.is_ascii_whitespace()) {
        None | Some(b'<') => Ok(FileFormat::Xml),
        Some(_) => Err(Error::UnknownFormat),
    }
}

/// Guesses the format of OSM data based on the file extension.
fn format_from_extension(path: &Path) -> FileFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => FileFormat::XmlGz,
        Some("bz2") => FileFormat::XmlBz2,
        Some("osm") | Some("xml") => FileFormat::Xml,
        _ => FileFormat::Unknown,
    }
}

/// Parse OSM features from a reader into a [Graph] as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader.
/// After all features are added, vertices without any neighbors are
/// removed from the graph (see [Graph::remove_isolated]).
pub fn add_features_from_io<R: io::Read>(
    g: &mut Graph,
    options: &Options<'_>,
    reader: R,
) -> Result<(), Error> {
    let mut b = io::BufReader::new(reader);

    let format = match options.file_format {
        FileFormat::Unknown => detect_format(b.fill_buf()?)?,
        format => format,
    };
    log::debug!("reading OSM data as {:?}", format);

    match format {
        FileFormat::Unknown | FileFormat::Xml => {
            let r = xml::Reader::from_io(b);
            GraphBuilder::new(g, options).add_features(r)?;
        }

        FileFormat::XmlGz => {
            let d = flate2::read::MultiGzDecoder::new(b);
            let r = xml::Reader::from_io(io::BufReader::new(d));
            GraphBuilder::new(g, options).add_features(r)?;
        }

        FileFormat::XmlBz2 => {
            let d = bzip2::read::MultiBzDecoder::new(b);
            let r = xml::Reader::from_io(io::BufReader::new(d));
            GraphBuilder::new(g, options).add_features(r)?;
        }
    }

    Ok(())
}

/// Parse OSM features from a file at the provided path into a [Graph] as per the provided [Options].
///
/// With [FileFormat::Unknown], the format is first guessed from the file extension,
/// and then from the content.
pub fn add_features_from_file<P: AsRef<Path>>(
    g: &mut Graph,
    options: &Options<'_>,
    path: P,
) -> Result<(), Error> {
    let path = path.as_ref();
    let options = match options.file_format {
        FileFormat::Unknown => Options {
            file_format: format_from_extension(path),
            ..*options
        },
        _ => *options,
    };

    log::info!("loading {}", path.display());
    let f = File::open(path)?;
    add_features_from_io(g, &options, f)
}

/// Parse OSM features from a static buffer into a [Graph] as per the provided [Options].
pub fn add_features_from_buffer(
    g: &mut Graph,
    options: &Options<'_>,
    data: &[u8],
) -> Result<(), Error> {
    let format = match options.file_format {
        FileFormat::Unknown => detect_format(data)?,
        format => format,
    };

    if format == FileFormat::Xml {
        // Fast path is available for in-memory XML data
        let r = xml::Reader::from_buffer(data);
        GraphBuilder::new(g, options).add_features(r)?;
        Ok(())
    } else {
        // Wrap the buffer in a cursor and use the IO path
        let options = Options {
            file_format: format,
            ..*options
        };
        add_features_from_io(g, &options, io::Cursor::new(data))
    }
}
