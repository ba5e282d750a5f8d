//! Per-card rendering: one entity record and one resolved template become
//! a [`CardFace`] — positioned, millimetre-sized elements ready for the
//! grid composer. A card face is a pure function of its inputs; rendering
//! a batch shares nothing but the template.

use serde::Serialize;

use crate::assets::AssetResolver;
use crate::fields::{self, Field};
use crate::model::Entity;
use crate::template::{CardTemplate, Orientation};
use crate::ComposerConfig;

/// Nominal height of one text line on the card face.
const LINE_HEIGHT_MM: f64 = 5.0;
/// Vertical/horizontal breathing room between blocks.
const GUTTER_MM: f64 = 2.0;
const LOGO_SIZE_MM: f64 = 8.0;
const SIGNATURE_WIDTH_MM: f64 = 14.0;
const SIGNATURE_HEIGHT_MM: f64 = 6.0;

/// A rendered card: the template's exact physical size plus its elements,
/// positioned in millimetres from the card's top-left corner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFace {
    pub width_mm: f64,
    pub height_mm: f64,
    pub elements: Vec<CardElement>,
}

/// One positioned element on a card face.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CardElement {
    /// Full-bleed background image.
    Background { src: String },
    Logo {
        src: String,
        x_mm: f64,
        y_mm: f64,
        width_mm: f64,
        height_mm: f64,
    },
    /// Organization name, centered.
    Title {
        text: String,
        x_mm: f64,
        y_mm: f64,
        width_mm: f64,
    },
    Photo {
        src: String,
        /// Role placeholder a backend substitutes when `src` fails to load.
        placeholder_src: String,
        x_mm: f64,
        y_mm: f64,
        width_mm: f64,
        height_mm: f64,
        corner_radius_mm: f64,
    },
    /// One resolved text line.
    Line {
        field: String,
        text: String,
        x_mm: f64,
        y_mm: f64,
        width_mm: f64,
    },
    Signature {
        src: String,
        x_mm: f64,
        y_mm: f64,
        width_mm: f64,
        height_mm: f64,
    },
}

/// Render one entity onto the template.
pub fn render_card(
    entity: &Entity,
    template: &CardTemplate,
    assets: &AssetResolver,
    config: &ComposerConfig,
) -> CardFace {
    let pad = template.padding_mm;
    let x0 = pad.left;
    let content_width = (template.width_mm - pad.horizontal()).max(0.0);
    let mut elements = Vec::new();
    let mut cursor = pad.top;

    if let Some(bg) = &template.background {
        elements.push(CardElement::Background {
            src: assets.resolve(bg),
        });
    }

    if let Some(logo) = &template.logo {
        elements.push(CardElement::Logo {
            src: assets.resolve(logo),
            x_mm: x0 + (content_width - LOGO_SIZE_MM) / 2.0,
            y_mm: cursor,
            width_mm: LOGO_SIZE_MM,
            height_mm: LOGO_SIZE_MM,
        });
        cursor += LOGO_SIZE_MM + GUTTER_MM;
    }

    if let Some(title) = &template.title {
        elements.push(CardElement::Title {
            text: title.clone(),
            x_mm: x0,
            y_mm: cursor,
            width_mm: content_width,
        });
        cursor += LINE_HEIGHT_MM + GUTTER_MM;
    }

    let lines = visible_lines(entity, template);

    match template.orientation {
        Orientation::Vertical => {
            if template.fields.photo {
                // centered in the content box
                let photo_x = x0 + (content_width - template.photo_width_mm) / 2.0;
                elements.push(photo_element(entity, template, assets, config, photo_x, cursor));
                cursor += template.photo_height_mm + GUTTER_MM;
            }
            for (field, text) in lines {
                elements.push(CardElement::Line {
                    field: field.key().to_string(),
                    text,
                    x_mm: x0,
                    y_mm: cursor,
                    width_mm: content_width,
                });
                cursor += LINE_HEIGHT_MM;
            }
        }
        Orientation::Horizontal => {
            let mut text_x = x0;
            let mut text_width = content_width;
            if template.fields.photo {
                elements.push(photo_element(entity, template, assets, config, x0, cursor));
                text_x = x0 + template.photo_width_mm + GUTTER_MM;
                text_width = (content_width - template.photo_width_mm - GUTTER_MM).max(0.0);
            }
            let mut text_y = cursor;
            for (field, text) in lines {
                elements.push(CardElement::Line {
                    field: field.key().to_string(),
                    text,
                    x_mm: text_x,
                    y_mm: text_y,
                    width_mm: text_width,
                });
                text_y += LINE_HEIGHT_MM;
            }
        }
    }

    if template.fields.signature {
        if let Some(sig) = &template.signature {
            elements.push(CardElement::Signature {
                src: assets.resolve(sig),
                x_mm: x0 + content_width - SIGNATURE_WIDTH_MM,
                y_mm: template.height_mm - pad.bottom - SIGNATURE_HEIGHT_MM,
                width_mm: SIGNATURE_WIDTH_MM,
                height_mm: SIGNATURE_HEIGHT_MM,
            });
        }
    }

    CardFace {
        width_mm: template.width_mm,
        height_mm: template.height_mm,
        elements,
    }
}

fn photo_element(
    entity: &Entity,
    template: &CardTemplate,
    assets: &AssetResolver,
    config: &ComposerConfig,
    x_mm: f64,
    y_mm: f64,
) -> CardElement {
    // Placeholder URLs are absolute, so resolution passes them through.
    let src = assets.resolve(&fields::photo_or_placeholder(entity, config));
    CardElement::Photo {
        src,
        placeholder_src: assets.resolve(config.placeholder_for(entity.role())),
        x_mm,
        y_mm,
        width_mm: template.photo_width_mm,
        height_mm: template.photo_height_mm,
        corner_radius_mm: template.photo_corner_radius_mm(),
    }
}

/// The text lines this template shows, in card order.
fn visible_lines(entity: &Entity, template: &CardTemplate) -> Vec<(Field, String)> {
    let mut lines = Vec::new();
    let flags = template.fields;
    for (on, field) in [
        (flags.name, Field::Name),
        (flags.id, Field::Id),
        (flags.class, Field::Class),
        (flags.phone, Field::Phone),
    ] {
        if on {
            let text = fields::display(entity, &field);
            lines.push((field, text));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawTemplate, Role};
    use serde_json::json;

    fn assets() -> AssetResolver {
        AssetResolver::new("http://assets.test")
    }

    fn config() -> ComposerConfig {
        ComposerConfig {
            student_placeholder_url: "http://p.test/student.png".into(),
            staff_placeholder_url: "http://p.test/staff.png".into(),
            ..Default::default()
        }
    }

    fn template(v: serde_json::Value) -> CardTemplate {
        CardTemplate::resolve(&serde_json::from_value::<RawTemplate>(v).unwrap())
    }

    fn line_text<'a>(face: &'a CardFace, key: &str) -> Option<&'a str> {
        face.elements.iter().find_map(|e| match e {
            CardElement::Line { field, text, .. } if field == key => Some(text.as_str()),
            _ => None,
        })
    }

    #[test]
    fn test_worked_example_card() {
        // The 54×86 vertical circle-photo template from the product docs.
        let tpl = template(json!({
            "width": 54, "height": 86, "adminLayout": "Vertical",
            "userPhotoSizeWidth": 21, "userPhotoSizeHeight": 21,
            "userPhotoStyle": "Circle"
        }));
        let entity = Entity::from_value(
            Role::Student,
            &json!({
                "firstName": "Asha", "lastName": "Rao",
                "admissionNumber": "2024-011",
                "class": {"name": "5"}, "phone": "9998887777"
            }),
        )
        .unwrap();

        let face = render_card(&entity, &tpl, &assets(), &config());
        assert_eq!((face.width_mm, face.height_mm), (54.0, 86.0));
        assert_eq!(line_text(&face, "name"), Some("Asha Rao"));
        assert_eq!(line_text(&face, "id"), Some("2024-011"));
        assert_eq!(line_text(&face, "class"), Some("5"));
        assert_eq!(line_text(&face, "phone"), Some("9998887777"));

        let photo = face
            .elements
            .iter()
            .find_map(|e| match e {
                CardElement::Photo {
                    src,
                    width_mm,
                    height_mm,
                    corner_radius_mm,
                    ..
                } => Some((src.clone(), *width_mm, *height_mm, *corner_radius_mm)),
                _ => None,
            })
            .expect("photo element");
        assert_eq!(photo.0, "http://p.test/student.png");
        assert_eq!((photo.1, photo.2), (21.0, 21.0));
        assert_eq!(photo.3, 10.5, "circle radius is half the photo side");
    }

    #[test]
    fn test_photo_element_carries_fallback_placeholder() {
        let tpl = template(json!({}));
        let entity =
            Entity::from_value(Role::Student, &json!({"photo": "uploads/asha.jpg"})).unwrap();
        let face = render_card(&entity, &tpl, &assets(), &config());

        let (src, placeholder) = face
            .elements
            .iter()
            .find_map(|e| match e {
                CardElement::Photo {
                    src,
                    placeholder_src,
                    ..
                } => Some((src.clone(), placeholder_src.clone())),
                _ => None,
            })
            .expect("photo element");
        assert_eq!(src, "http://assets.test/uploads/asha.jpg");
        assert_eq!(placeholder, "http://p.test/student.png");
    }

    #[test]
    fn test_hidden_fields_render_no_lines() {
        let tpl = template(json!({"showPhone": false, "showClass": false}));
        let entity = Entity::from_value(
            Role::Student,
            &json!({"firstName": "A", "phone": "123", "class": {"name": "5"}}),
        )
        .unwrap();
        let face = render_card(&entity, &tpl, &assets(), &config());
        assert!(line_text(&face, "phone").is_none());
        assert!(line_text(&face, "class").is_none());
        assert!(line_text(&face, "name").is_some());
    }

    #[test]
    fn test_hidden_photo_renders_no_photo() {
        let tpl = template(json!({"showPhoto": false}));
        let entity = Entity::from_value(Role::Student, &json!({})).unwrap();
        let face = render_card(&entity, &tpl, &assets(), &config());
        assert!(!face
            .elements
            .iter()
            .any(|e| matches!(e, CardElement::Photo { .. })));
    }

    #[test]
    fn test_horizontal_layout_puts_text_beside_photo() {
        let tpl = template(json!({"adminLayout": "Horizontal", "spacingLeft": 3}));
        let entity = Entity::from_value(Role::Staff, &json!({"name": "Mr. Iyer"})).unwrap();
        let face = render_card(&entity, &tpl, &assets(), &config());

        let photo_x = face
            .elements
            .iter()
            .find_map(|e| match e {
                CardElement::Photo { x_mm, .. } => Some(*x_mm),
                _ => None,
            })
            .unwrap();
        let name_x = face
            .elements
            .iter()
            .find_map(|e| match e {
                CardElement::Line { field, x_mm, .. } if field == "name" => Some(*x_mm),
                _ => None,
            })
            .unwrap();
        assert_eq!(photo_x, 3.0, "photo sits at the padded left edge");
        assert!(name_x > photo_x, "text column starts right of the photo");
    }

    #[test]
    fn test_asset_paths_are_normalized() {
        let tpl = template(json!({
            "backgroundImage": "uploads\\bg.png",
            "logo": "/logos/school.png",
            "signature": "sig.png",
            "title": "Green Valley School"
        }));
        let entity = Entity::from_value(Role::Student, &json!({})).unwrap();
        let face = render_card(&entity, &tpl, &assets(), &config());

        let srcs: Vec<&str> = face
            .elements
            .iter()
            .filter_map(|e| match e {
                CardElement::Background { src } => Some(src.as_str()),
                CardElement::Logo { src, .. } => Some(src.as_str()),
                CardElement::Signature { src, .. } => Some(src.as_str()),
                _ => None,
            })
            .collect();
        assert!(srcs.contains(&"http://assets.test/uploads/bg.png"));
        assert!(srcs.contains(&"http://assets.test/logos/school.png"));
        assert!(srcs.contains(&"http://assets.test/sig.png"));
    }

    #[test]
    fn test_empty_staff_record_renders_placeholders() {
        let tpl = template(json!({}));
        let entity = Entity::from_value(Role::Staff, &json!({})).unwrap();
        let face = render_card(&entity, &tpl, &assets(), &config());

        assert_eq!(line_text(&face, "name"), Some(""));
        assert_eq!(line_text(&face, "id"), Some("N/A"));
        assert_eq!(line_text(&face, "phone"), Some("N/A"));
        let photo_src = face.elements.iter().find_map(|e| match e {
            CardElement::Photo { src, .. } => Some(src.as_str()),
            _ => None,
        });
        assert_eq!(photo_src, Some("http://p.test/staff.png"));
    }
}
