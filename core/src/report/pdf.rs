//! PDF serialization of laid-out pages with `lopdf`.
//!
//! Text uses the standard Helvetica faces with WinAnsi encoding, so no font
//! files are embedded. Images are embedded as Flate-compressed RGB with an
//! optional soft mask for transparency.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, StringFormat, dictionary};

use dino_types::ReportConfig;

use super::ReportError;
use super::image::DecodedImage;
use super::layout::{DrawOp, FontStyle, MM_PER_PT, Page};

fn pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

fn font_resource(style: FontStyle) -> &'static str {
    match style {
        FontStyle::Regular => "F1",
        FontStyle::Bold => "F2",
        FontStyle::Italic => "F3",
    }
}

fn font(base: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Latin-1 bytes for a WinAnsi string; anything outside maps to `?`.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            c if (c as u32) < 0x100 => c as u8,
            _ => b'?',
        })
        .collect()
}

fn deflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

fn image_stream(
    width: u32,
    height: u32,
    color_space: &str,
    pixels: &[u8],
) -> Result<Stream, ReportError> {
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => i64::from(width),
        "Height" => i64::from(height),
        "ColorSpace" => color_space,
        "BitsPerComponent" => 8,
        "Filter" => "FlateDecode",
    };
    Ok(Stream::new(dict, deflate(pixels)?).with_compression(false))
}

fn page_operations(page: &Page, config: &ReportConfig) -> Vec<Operation> {
    let flip = |y: f32| pt(config.page_height_mm - y);
    let mut ops = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                style,
                gray,
                text,
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![font_resource(*style).into(), (*size).into()],
                ));
                ops.push(Operation::new("g", vec![(*gray).into()]));
                ops.push(Operation::new("Td", vec![pt(*x).into(), flip(*y).into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(encode_text(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Rule { x1, x2, y } => {
                ops.push(Operation::new("w", vec![0.3.into()]));
                ops.push(Operation::new("G", vec![0.75.into()]));
                ops.push(Operation::new("m", vec![pt(*x1).into(), flip(*y).into()]));
                ops.push(Operation::new("l", vec![pt(*x2).into(), flip(*y).into()]));
                ops.push(Operation::new("S", vec![]));
            }
            DrawOp::Fill {
                x,
                y,
                width,
                height,
                gray,
            } => {
                ops.push(Operation::new("g", vec![(*gray).into()]));
                ops.push(Operation::new(
                    "re",
                    vec![
                        pt(*x).into(),
                        flip(*y + *height).into(),
                        pt(*width).into(),
                        pt(*height).into(),
                    ],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::Image {
                index,
                x,
                y,
                width,
                height,
            } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        pt(*width).into(),
                        0.into(),
                        0.into(),
                        pt(*height).into(),
                        pt(*x).into(),
                        flip(*y + *height).into(),
                    ],
                ));
                ops.push(Operation::new(
                    "Do",
                    vec![Object::Name(format!("Im{index}").into_bytes())],
                ));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    ops
}

/// Serialize pages into a PDF document.
pub fn render(
    pages: &[Page],
    images: &[DecodedImage],
    config: &ReportConfig,
) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let fonts = dictionary! {
        "F1" => doc.add_object(font("Helvetica")),
        "F2" => doc.add_object(font("Helvetica-Bold")),
        "F3" => doc.add_object(font("Helvetica-Oblique")),
    };

    let mut xobjects = Dictionary::new();
    for (index, image) in images.iter().enumerate() {
        let mut stream = image_stream(image.width, image.height, "DeviceRGB", &image.rgb)?;
        if let Some(alpha) = &image.alpha {
            let mask = image_stream(image.width, image.height, "DeviceGray", alpha)?;
            stream.dict.set("SMask", doc.add_object(mask));
        }
        xobjects.set(format!("Im{index}"), doc.add_object(stream));
    }

    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
        "XObject" => xobjects,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page, config),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                pt(config.page_width_mm).into(),
                pt(config.page_height_mm).into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_latin1_and_bullets() {
        assert_eq!(encode_text("café"), b"caf\xe9".to_vec());
        assert_eq!(encode_text("• a"), vec![0x95, b' ', b'a']);
        assert_eq!(encode_text("λ"), b"?".to_vec());
    }

    #[test]
    fn renders_one_pdf_page_per_layout_page() {
        let config = ReportConfig::default();
        let text = DrawOp::Text {
            x: 15.0,
            y: 25.0,
            size: 12.0,
            style: FontStyle::Bold,
            gray: 0.0,
            text: "Hello".into(),
        };
        let pages = vec![
            Page {
                ops: vec![text.clone()],
            },
            Page { ops: vec![text] },
        ];
        let bytes = render(&pages, &[], &config).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn embeds_images_with_soft_mask() {
        let config = ReportConfig::default();
        let image = DecodedImage {
            width: 2,
            height: 1,
            rgb: vec![255, 0, 0, 0, 255, 0],
            alpha: Some(vec![255, 128]),
        };
        let pages = vec![Page {
            ops: vec![DrawOp::Image {
                index: 0,
                x: 15.0,
                y: 20.0,
                width: 180.0,
                height: 90.0,
            }],
        }];
        let bytes = render(&pages, &[image], &config).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let masks = doc
            .objects
            .values()
            .filter_map(|obj| obj.as_stream().ok())
            .filter(|s| s.dict.has(b"SMask"))
            .count();
        assert_eq!(masks, 1);
    }
}
