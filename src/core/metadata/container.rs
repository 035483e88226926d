//! EXIF container backed by kamadak-exif.

use super::directory::{MetadataContainer, TagDirectory};
use super::tags::GPS_INFO_POINTER;
use super::value::{Ratio, TagValue};
use crate::error::{DirectoryError, ExtractError};
use exif::{Context, Exif, In, Reader, Value};
use image::{ImageFormat, ImageReader};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek};
use std::path::Path;
use tracing::{debug, warn};

/// Metadata parsed from an image's EXIF block
pub struct ExifContainer {
    exif: Exif,
}

impl ExifContainer {
    pub fn new(exif: Exif) -> Self {
        Self { exif }
    }

    fn collect<P>(&self, keep: P) -> TagDirectory
    where
        P: Fn(Context) -> bool,
    {
        self.exif
            .fields()
            .filter(|field| field.ifd_num == In::PRIMARY && keep(field.tag.context()))
            .map(|field| (field.tag.number(), convert_value(&field.value)))
            .collect()
    }
}

impl MetadataContainer for ExifContainer {
    fn primary_directory(&self) -> Option<TagDirectory> {
        Some(self.collect(|context| matches!(context, Context::Tiff | Context::Exif)))
    }

    fn sub_directory(&self, pointer: u16) -> Result<TagDirectory, DirectoryError> {
        if pointer != GPS_INFO_POINTER {
            return Err(DirectoryError::Unsupported { pointer });
        }

        let gps = self.collect(|context| matches!(context, Context::Gps));
        if gps.is_empty() {
            return Err(DirectoryError::Missing { pointer });
        }
        Ok(gps)
    }
}

/// HEIF brands kamadak-exif reads but `image` cannot identify
const HEIF_BRANDS: [&[u8]; 6] = [b"heic", b"heix", b"heim", b"heis", b"mif1", b"msf1"];

/// Open an image and parse its EXIF block.
///
/// The file handle lives only inside this call. Returns `Ok(None)` for a
/// recognised image without (readable) EXIF; fails only when the file cannot
/// be opened or is not an image container at all.
pub fn open_container(path: &Path) -> Result<Option<ExifContainer>, ExtractError> {
    let open_error = |source: std::io::Error| ExtractError::Open {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(open_error)?;
    let probe = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(open_error)?;

    let format = probe.format();
    let mut reader = probe.into_inner();

    match format {
        Some(format) if !exif_capable(format) => {
            debug!(path = %path.display(), format = ?format, "Container carries no EXIF");
            return Ok(None);
        }
        Some(_) => {}
        None => {
            if !has_heif_signature(&mut reader).map_err(open_error)? {
                return Err(ExtractError::UnrecognizedFormat {
                    path: path.to_path_buf(),
                });
            }
        }
    }

    reader.rewind().map_err(open_error)?;

    match Reader::new().read_from_container(&mut reader) {
        Ok(exif) => Ok(Some(ExifContainer::new(exif))),
        Err(exif::Error::NotFound(_)) => {
            debug!(path = %path.display(), "No EXIF block");
            Ok(None)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Unreadable EXIF block, treating image as untagged");
            Ok(None)
        }
    }
}

/// Containers kamadak-exif can pull an EXIF block out of
fn exif_capable(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Tiff | ImageFormat::Png | ImageFormat::WebP
    )
}

/// Whether the stream starts with an ISO-BMFF `ftyp` box of a HEIF brand
fn has_heif_signature<R: Read + Seek>(reader: &mut R) -> std::io::Result<bool> {
    reader.rewind()?;
    let mut head = [0u8; 12];
    match reader.read_exact(&mut head) {
        Ok(()) => Ok(is_heif_header(&head)),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

fn is_heif_header(head: &[u8; 12]) -> bool {
    &head[4..8] == b"ftyp" && HEIF_BRANDS.contains(&&head[8..12])
}

/// Convert a kamadak-exif value into a raw tag value
pub(crate) fn convert_value(value: &Value) -> TagValue {
    match value {
        Value::Ascii(strings) => TagValue::Text(ascii_text(strings)),
        Value::Byte(bytes) => TagValue::Bytes(bytes.clone()),
        Value::Undefined(bytes, _) => TagValue::Bytes(bytes.clone()),
        Value::Short(values) => TagValue::Integers(values.iter().map(|v| i64::from(*v)).collect()),
        Value::Long(values) => TagValue::Integers(values.iter().map(|v| i64::from(*v)).collect()),
        Value::SByte(values) => TagValue::Integers(values.iter().map(|v| i64::from(*v)).collect()),
        Value::SShort(values) => TagValue::Integers(values.iter().map(|v| i64::from(*v)).collect()),
        Value::SLong(values) => TagValue::Integers(values.iter().map(|v| i64::from(*v)).collect()),
        Value::Rational(values) => TagValue::Rationals(
            values
                .iter()
                .map(|r| Ratio::new(i64::from(r.num), i64::from(r.denom)))
                .collect(),
        ),
        Value::SRational(values) => TagValue::Rationals(
            values
                .iter()
                .map(|r| Ratio::new(i64::from(r.num), i64::from(r.denom)))
                .collect(),
        ),
        Value::Float(values) => TagValue::Floats(values.iter().map(|v| f64::from(*v)).collect()),
        Value::Double(values) => TagValue::Floats(values.clone()),
        _ => TagValue::Bytes(Vec::new()),
    }
}

/// First ASCII string of a field, without NUL padding
fn ascii_text(strings: &[Vec<u8>]) -> String {
    strings
        .first()
        .map(|bytes| {
            String::from_utf8_lossy(bytes)
                .trim_end_matches('\0')
                .to_string()
        })
        .unwrap_or_default()
}
