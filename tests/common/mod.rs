//! Fixture helpers shared by the integration tests.

#![allow(dead_code)]

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub fn ascii(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

pub fn dms(tag: Tag, degrees: u32, minutes: u32, seconds: u32) -> Field {
    rationals(tag, &[(degrees, 1), (minutes, 1), (seconds, 1)])
}

pub fn rationals(tag: Tag, values: &[(u32, u32)]) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(
            values
                .iter()
                .map(|(num, denom)| Rational {
                    num: *num,
                    denom: *denom,
                })
                .collect(),
        ),
    }
}

/// Encode the given EXIF fields as a bare TIFF structure
pub fn exif_tiff_bytes(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }

    let mut buffer = Cursor::new(Vec::new());
    writer.write(&mut buffer, false).unwrap();
    buffer.into_inner()
}

/// Write a TIFF container holding only the given EXIF fields
pub fn write_exif_tiff(path: &Path, fields: &[Field]) -> PathBuf {
    fs::write(path, exif_tiff_bytes(fields)).unwrap();
    path.to_path_buf()
}

/// Encode a real JPEG and place `tiff` in an APP1 `Exif` segment right
/// after the SOI marker
pub fn jpeg_with_exif_segment(tiff: &[u8]) -> Vec<u8> {
    let mut encoded = Cursor::new(Vec::new());
    image::RgbImage::from_pixel(16, 16, image::Rgb([200, 120, 40]))
        .write_to(&mut encoded, image::ImageFormat::Jpeg)
        .unwrap();
    let encoded = encoded.into_inner();
    assert_eq!(&encoded[..2], &[0xFF, 0xD8]);

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(tiff);
    let length = u16::try_from(payload.len() + 2).unwrap();

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&length.to_be_bytes());
    jpeg.extend_from_slice(&payload);
    jpeg.extend_from_slice(&encoded[2..]);
    jpeg
}

/// Write a JPEG whose APP1 segment holds the given EXIF fields
pub fn write_exif_jpeg(path: &Path, fields: &[Field]) -> PathBuf {
    fs::write(path, jpeg_with_exif_segment(&exif_tiff_bytes(fields))).unwrap();
    path.to_path_buf()
}

/// Write a small PNG without any metadata
pub fn write_plain_png(path: &Path, width: u32, height: u32) -> PathBuf {
    image::RgbImage::from_pixel(width, height, image::Rgb([90, 160, 220]))
        .save(path)
        .unwrap();
    path.to_path_buf()
}
