//! Background image XObjects

use crate::types::{PriceCardError, Result};
use image::GenericImageView;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Decoded background, ready to embed
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    pub width: u32,
    pub height: u32,
    rgb: Vec<u8>,
    /// Alpha channel, only kept when some pixel is not fully opaque
    alpha: Option<Vec<u8>>,
}

impl BackgroundImage {
    /// Decode PNG or JPEG bytes
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| PriceCardError::AssetLoadFailure(e.to_string()))?;
        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(PriceCardError::AssetLoadFailure(
                "image has no pixels".to_string(),
            ));
        }

        let alpha = if decoded.color().has_alpha() {
            let rgba = decoded.to_rgba8();
            let alpha: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
            alpha.iter().any(|&a| a < u8::MAX).then_some(alpha)
        } else {
            None
        };

        Ok(Self {
            width,
            height,
            rgb: decoded.to_rgb8().into_raw(),
            alpha,
        })
    }

    /// Add the image (and its soft mask) to `output`, returning the XObject id
    pub fn embed(&self, output: &mut Document) -> Result<ObjectId> {
        let mut dict = image_dictionary(self.width, self.height, "DeviceRGB");

        if let Some(alpha) = &self.alpha {
            let mut mask = Stream::new(
                image_dictionary(self.width, self.height, "DeviceGray"),
                alpha.clone(),
            );
            mask.compress()?;
            let mask_id = output.add_object(mask);
            dict.set("SMask", Object::Reference(mask_id));
        }

        let mut stream = Stream::new(dict, self.rgb.clone());
        stream.compress()?;
        Ok(output.add_object(stream))
    }
}

fn image_dictionary(width: u32, height: u32, color_space: &str) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width as i64));
    dict.set("Height", Object::Integer(height as i64));
    dict.set("ColorSpace", Object::Name(color_space.as_bytes().to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([250, 220, 40]));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_decode_png() {
        let img = BackgroundImage::decode(&png_bytes(4, 2)).unwrap();
        assert_eq!((img.width, img.height), (4, 2));
        assert_eq!(img.rgb.len(), 4 * 2 * 3);
        assert!(img.alpha.is_none());
    }

    #[test]
    fn test_decode_keeps_transparency() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png).unwrap();

        let decoded = BackgroundImage::decode(bytes.get_ref()).unwrap();
        assert_eq!(decoded.alpha.as_deref(), Some(&[0, 255, 255, 255][..]));
    }

    #[test]
    fn test_decode_garbage_fails() {
        match BackgroundImage::decode(b"not an image") {
            Err(PriceCardError::AssetLoadFailure(_)) => {}
            other => panic!("Expected AssetLoadFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_embed_adds_image_xobject() {
        let img = BackgroundImage::decode(&png_bytes(3, 3)).unwrap();
        let mut doc = Document::with_version("1.7");
        let id = img.embed(&mut doc).unwrap();
        let stream = doc.get_object(id).unwrap().as_stream().unwrap();
        assert_eq!(stream.dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Image");
        assert_eq!(stream.dict.get(b"Width").unwrap().as_i64().unwrap(), 3);
    }
}
