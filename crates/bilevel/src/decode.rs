//! Adapter from `image` decoders to the 16-bit RGB raster the pipeline needs.

use std::fmt;
use std::path::Path;

use image::{ColorType, DynamicImage, ImageBuffer, ImageReader, Rgb};
use serde::Serialize;

use crate::core::{BilevelError, Pixel16, PixelSource, SampleLayout};
use crate::pipeline::{self, BilevelOutput, PipelineConfig};
use crate::PipelineError;

/// Decode an image file of any format `image` supports.
pub fn open_dynamic(path: impl AsRef<Path>) -> Result<DynamicImage, PipelineError> {
    Ok(ImageReader::open(path)?.decode()?)
}

/// Owned 16-bit, 3-channel raster.
#[derive(Clone, Debug)]
pub struct Rgb16Raster {
    buf: ImageBuffer<Rgb<u16>, Vec<u16>>,
}

impl Rgb16Raster {
    /// Accept only images that already are 16-bit RGB without alpha.
    pub fn from_dynamic(img: DynamicImage) -> Result<Self, BilevelError> {
        match img {
            DynamicImage::ImageRgb16(buf) => Ok(Self { buf }),
            other => {
                let color = other.color();
                let channels = color.channel_count() as usize;
                Err(BilevelError::UnsupportedFormat {
                    channels,
                    bit_depth: (color.bits_per_pixel() / color.channel_count().max(1) as u16)
                        as u8,
                })
            }
        }
    }

    /// Explicitly convert any decoded image to 16-bit RGB.
    ///
    /// Lower bit depths are rescaled to the full 16-bit range and alpha is
    /// dropped.
    pub fn convert_from(img: &DynamicImage) -> Self {
        Self {
            buf: img.to_rgb16(),
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        Ok(Self::from_dynamic(open_dynamic(path)?)?)
    }

    pub fn samples(&self) -> &[u16] {
        self.buf.as_raw()
    }

    pub fn run(&self, cfg: &PipelineConfig) -> Result<BilevelOutput, BilevelError> {
        pipeline::run(
            self.samples(),
            self.buf.width() as usize,
            self.buf.height() as usize,
            SampleLayout::RGB16,
            cfg,
        )
    }
}

impl PixelSource for Rgb16Raster {
    fn width(&self) -> usize {
        self.buf.width() as usize
    }

    fn height(&self) -> usize {
        self.buf.height() as usize
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> Pixel16 {
        let Rgb([r, g, b]) = *self.buf.get_pixel(x as u32, y as u32);
        Pixel16::new(r, g, b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transparency {
    Opaque,
    Translucent,
}

/// Geometry and sample format of a decoded image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RasterInfo {
    pub width: u32,
    pub height: u32,
    /// Last valid `(x, y)` coordinate; the first is always `(0, 0)`.
    pub max_coord: [u32; 2],
    pub channels: u8,
    pub sample_type: &'static str,
    pub bits_per_pixel: u16,
    pub transparency: Transparency,
}

impl RasterInfo {
    pub fn from_dynamic(img: &DynamicImage) -> Self {
        let color = img.color();
        let (width, height) = (img.width(), img.height());
        Self {
            width,
            height,
            max_coord: [width.saturating_sub(1), height.saturating_sub(1)],
            channels: color.channel_count(),
            sample_type: sample_type_name(color),
            bits_per_pixel: color.bits_per_pixel(),
            transparency: if color.has_alpha() {
                Transparency::Translucent
            } else {
                Transparency::Opaque
            },
        }
    }
}

impl fmt::Display for RasterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Dimensions: {}x{} pixels (from 0,0 to {},{})",
            self.width, self.height, self.max_coord[0], self.max_coord[1]
        )?;
        writeln!(f, "Number of bands: {}", self.channels)?;
        writeln!(f, "Data type: {}", self.sample_type)?;
        writeln!(f, "Bits per pixel: {}", self.bits_per_pixel)?;
        let transparency = match self.transparency {
            Transparency::Opaque => "opaque",
            Transparency::Translucent => "translucent",
        };
        writeln!(f, "Transparency: {transparency}")
    }
}

fn sample_type_name(color: ColorType) -> &'static str {
    match color {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => "u8",
        ColorType::L16 | ColorType::La16 | ColorType::Rgb16 | ColorType::Rgba16 => "u16",
        ColorType::Rgb32F | ColorType::Rgba32F => "f32",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage, RgbaImage};

    fn rgb16(width: u32, height: u32, f: impl Fn(u32, u32) -> u16) -> DynamicImage {
        DynamicImage::ImageRgb16(ImageBuffer::from_fn(width, height, |x, y| {
            let l = f(x, y);
            Rgb([l, l, l])
        }))
    }

    #[test]
    fn accepts_rgb16() {
        let raster = Rgb16Raster::from_dynamic(rgb16(3, 2, |x, y| (x * 10 + y) as u16))
            .expect("rgb16 accepted");
        assert_eq!((raster.width(), raster.height()), (3, 2));
        assert_eq!(raster.samples().len(), 18);
        assert_eq!(raster.pixel(2, 1), Pixel16::splat(21));
    }

    #[test]
    fn rejects_other_formats() {
        let rgb8 = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        assert_eq!(
            Rgb16Raster::from_dynamic(rgb8).unwrap_err(),
            BilevelError::UnsupportedFormat {
                channels: 3,
                bit_depth: 8
            }
        );

        let rgba16 = DynamicImage::ImageRgba16(ImageBuffer::new(2, 2));
        assert_eq!(
            Rgb16Raster::from_dynamic(rgba16).unwrap_err(),
            BilevelError::UnsupportedFormat {
                channels: 4,
                bit_depth: 16
            }
        );
    }

    #[test]
    fn conversion_is_explicit_and_rescales() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_raw(2, 1, vec![0, 255]).expect("buf"));
        let raster = Rgb16Raster::convert_from(&gray);
        assert_eq!(raster.pixel(0, 0), Pixel16::splat(0));
        assert_eq!(raster.pixel(1, 0), Pixel16::splat(u16::MAX));
    }

    #[test]
    fn raster_run_thresholds_between_clusters() {
        let img = rgb16(8, 4, |x, _| if x < 4 { 1_000 } else { 30_000 });
        let raster = Rgb16Raster::from_dynamic(img).expect("rgb16");
        let out = raster.run(&PipelineConfig::default()).expect("run");
        assert_eq!(out.threshold, 1_000);
        assert_eq!(out.image.foreground_count(), 16);
        assert_eq!(out.image.get(4, 0), Some(true));
    }

    #[test]
    fn describes_raster() {
        let info = RasterInfo::from_dynamic(&rgb16(640, 480, |_, _| 0));
        assert_eq!(info.max_coord, [639, 479]);
        assert_eq!(info.channels, 3);
        assert_eq!(info.sample_type, "u16");
        assert_eq!(info.bits_per_pixel, 48);
        assert_eq!(info.transparency, Transparency::Opaque);

        let text = info.to_string();
        assert!(text.contains("Dimensions: 640x480 pixels (from 0,0 to 639,479)"));
        assert!(text.contains("Data type: u16"));

        let rgba = RasterInfo::from_dynamic(&DynamicImage::ImageRgba8(RgbaImage::new(1, 1)));
        assert_eq!(rgba.transparency, Transparency::Translucent);
        assert_eq!(rgba.sample_type, "u8");
    }
}
