//! Sprite decoding and downsampling for terminal display.

use image::imageops::FilterType;

use crate::error::FetchError;

/// Edge length of the box every sprite is stretched into.
pub const SPRITE_SIZE: u32 = 200;

/// Pixels with less alpha than this are drawn as background.
const ALPHA_CUTOFF: u8 = 128;

/// A decoded sprite, resized to [`SPRITE_SIZE`] square.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    pub w: u32,
    pub h: u32,
    /// RGBA pixels in row-major order (len = w*h*4)
    pub pixels: Vec<u8>,
}

impl Sprite {
    /// Decode `bytes` and resize literally to 200x200; aspect ratio is not kept.
    pub fn decode(bytes: &[u8]) -> Result<Self, FetchError> {
        let img = image::load_from_memory(bytes)?;
        let resized = image::imageops::resize(
            &img.to_rgba8(),
            SPRITE_SIZE,
            SPRITE_SIZE,
            FilterType::Lanczos3,
        );
        Ok(Self {
            w: resized.width(),
            h: resized.height(),
            pixels: resized.into_raw(),
        })
    }

    /// Resample to `w` x `h` cells. Transparent pixels come back as `None`.
    pub fn cells(&self, w: u32, h: u32) -> Vec<Vec<Option<(u8, u8, u8)>>> {
        if w == 0 || h == 0 {
            return Vec::new();
        }
        let Some(buf) = image::RgbaImage::from_raw(self.w, self.h, self.pixels.clone()) else {
            return Vec::new();
        };
        let small = image::imageops::resize(&buf, w, h, FilterType::Nearest);
        let mut rows = Vec::with_capacity(h as usize);
        for y in 0..small.height() {
            let mut row = Vec::with_capacity(w as usize);
            for x in 0..small.width() {
                let p = small.get_pixel(x, y);
                if p[3] < ALPHA_CUTOFF {
                    row.push(None);
                } else {
                    row.push(Some((p[0], p[1], p[2])));
                }
            }
            rows.push(row);
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png(w: u32, h: u32, fill: image::Rgba<u8>) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, fill);
        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageOutputFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn decode_stretches_to_fixed_box() {
        let sprite = Sprite::decode(&png(96, 48, image::Rgba([255, 0, 0, 255]))).unwrap();
        assert_eq!((sprite.w, sprite.h), (200, 200));
        assert_eq!(sprite.pixels.len(), 200 * 200 * 4);
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = Sprite::decode(b"definitely not a png").unwrap_err();
        assert!(matches!(err, FetchError::Image(_)));
    }

    #[test]
    fn cells_resample_and_mask_transparency() {
        let solid = Sprite::decode(&png(10, 10, image::Rgba([10, 20, 30, 255]))).unwrap();
        let rows = solid.cells(8, 4);
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.len() == 8));
        assert_eq!(rows[0][0], Some((10, 20, 30)));

        let clear = Sprite::decode(&png(10, 10, image::Rgba([0, 0, 0, 0]))).unwrap();
        assert!(clear.cells(3, 3).iter().flatten().all(|c| c.is_none()));
    }

    #[test]
    fn cells_of_empty_area() {
        let sprite = Sprite::decode(&png(4, 4, image::Rgba([1, 1, 1, 255]))).unwrap();
        assert!(sprite.cells(0, 5).is_empty());
    }
}
