//! Raster image decoding and embedding as PDF image XObjects

use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::{DynamicImage, ImageFormat};
use lopdf::{Dictionary, Object, Stream};

use crate::types::{Result, Rotation, Size};

/// Raster formats accepted as page images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    /// Classify a path by its extension (case-insensitive).
    ///
    /// Only the extension is checked; file content is not sniffed.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ImageKind::Png),
            "jpg" | "jpeg" => Some(ImageKind::Jpeg),
            _ => None,
        }
    }

    fn format(self) -> ImageFormat {
        match self {
            ImageKind::Png => ImageFormat::Png,
            ImageKind::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// A decoded image, with any requested rotation already applied to its pixels
pub struct ImageAsset {
    kind: ImageKind,
    image: DynamicImage,
    /// Original file bytes, kept while they still match the pixels
    source: Option<Vec<u8>>,
}

impl ImageAsset {
    /// Decode `bytes` as `kind` and rotate the pixels clockwise by `rotation`.
    pub fn decode(bytes: Vec<u8>, kind: ImageKind, rotation: Rotation) -> Result<Self> {
        let image = image::load_from_memory_with_format(&bytes, kind.format())?;
        let (image, source) = match rotation {
            Rotation::None => (image, Some(bytes)),
            Rotation::Clockwise90 => (image.rotate90(), None),
            Rotation::Clockwise180 => (image.rotate180(), None),
            Rotation::Clockwise270 => (image.rotate270(), None),
        };
        Ok(Self {
            kind,
            image,
            source,
        })
    }

    /// Pixel dimensions after rotation
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Intrinsic size, one point per pixel
    pub fn size(&self) -> Size {
        let (w, h) = self.dimensions();
        Size::new(w as f32, h as f32)
    }

    /// Build the image XObject stream (plus a soft mask for transparent images).
    ///
    /// Unrotated gray or RGB JPEGs are embedded as-is with `DCTDecode`;
    /// everything else is stored as Flate-compressed 8-bit samples.
    pub fn to_xobjects(&self) -> Result<EmbeddedImage> {
        let (width, height) = self.dimensions();

        if self.kind == ImageKind::Jpeg {
            if let Some(bytes) = &self.source {
                if let Some(color_space) = jpeg_color_space(bytes) {
                    let mut dict = image_dict(width, height, color_space);
                    dict.set("Filter", Object::Name(b"DCTDecode".to_vec()));
                    return Ok(EmbeddedImage {
                        image: Stream::new(dict, bytes.clone()).with_compression(false),
                        soft_mask: None,
                    });
                }
            }
        }

        let color = self.image.color();
        let (samples, color_space, alpha) = if color.has_color() {
            if color.has_alpha() {
                let rgba = self.image.to_rgba8();
                let mut rgb = Vec::with_capacity((width * height * 3) as usize);
                let mut alpha = Vec::with_capacity((width * height) as usize);
                for pixel in rgba.pixels() {
                    rgb.extend_from_slice(&pixel.0[..3]);
                    alpha.push(pixel.0[3]);
                }
                (rgb, "DeviceRGB", Some(alpha))
            } else {
                (self.image.to_rgb8().into_raw(), "DeviceRGB", None)
            }
        } else if color.has_alpha() {
            let la = self.image.to_luma_alpha8();
            let mut gray = Vec::with_capacity((width * height) as usize);
            let mut alpha = Vec::with_capacity((width * height) as usize);
            for pixel in la.pixels() {
                gray.push(pixel.0[0]);
                alpha.push(pixel.0[1]);
            }
            (gray, "DeviceGray", Some(alpha))
        } else {
            (self.image.to_luma8().into_raw(), "DeviceGray", None)
        };

        let soft_mask = match alpha {
            Some(alpha) if alpha.iter().any(|&a| a != u8::MAX) => Some(flate_stream(
                image_dict(width, height, "DeviceGray"),
                &alpha,
            )?),
            _ => None,
        };

        Ok(EmbeddedImage {
            image: flate_stream(image_dict(width, height, color_space), &samples)?,
            soft_mask,
        })
    }
}

/// Streams ready to be added to an output document
pub struct EmbeddedImage {
    pub image: Stream,
    pub soft_mask: Option<Stream>,
}

fn image_dict(width: u32, height: u32, color_space: &str) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(i64::from(width)));
    dict.set("Height", Object::Integer(i64::from(height)));
    dict.set("ColorSpace", Object::Name(color_space.as_bytes().to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict
}

fn flate_stream(mut dict: Dictionary, samples: &[u8]) -> Result<Stream> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(samples)?;
    let compressed = encoder.finish()?;
    dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
    Ok(Stream::new(dict, compressed).with_compression(false))
}

/// Color space of a baseline/progressive JPEG, read from its SOF header.
///
/// Returns `None` for component counts a `DCTDecode` pass-through would get
/// wrong (CMYK, YCCK) or when no frame header is found.
fn jpeg_color_space(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 4 || bytes[0] != 0xFF || bytes[1] != 0xD8 {
        return None;
    }

    let mut pos = 2;
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return None;
        }
        let marker = bytes[pos + 1];
        // Fill bytes and standalone markers carry no length
        if marker == 0xFF {
            pos += 1;
            continue;
        }
        if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            pos += 2;
            continue;
        }

        let len = usize::from(u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]));
        let is_frame_header = matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_frame_header {
            // length(2) precision(1) height(2) width(2) components(1)
            let components = *bytes.get(pos + 9)?;
            return match components {
                1 => Some("DeviceGray"),
                3 => Some("DeviceRGB"),
                _ => None,
            };
        }
        if marker == 0xDA {
            return None;
        }
        pos += 2 + len;
    }
    None
}
