//! Template resolution.
//!
//! Raw template records are whatever the admin forms saved over the years:
//! numeric strings, absent flags, empty asset paths. Resolution normalizes
//! one into a [`CardTemplate`] with every value concrete, the same way a
//! style cascade resolves into a computed style. It never fails — missing
//! data degrades to the documented defaults.

use crate::model::RawTemplate;

/// CR80 portrait, the common school ID blank.
pub const DEFAULT_CARD_WIDTH_MM: f64 = 54.0;
pub const DEFAULT_CARD_HEIGHT_MM: f64 = 86.0;
/// Default photo frame when the template doesn't size it.
pub const DEFAULT_PHOTO_SIZE_MM: f64 = 21.0;
/// Corner radius for the `Rounded` photo style.
const ROUNDED_CORNER_MM: f64 = 2.0;

/// How photo and text stack on the card face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Photo to the left, text to the right.
    Horizontal,
    /// Photo above, text below.
    #[default]
    Vertical,
}

/// Shape of the photo frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhotoShape {
    Circle,
    Rounded,
    #[default]
    Square,
}

/// Millimetre values for each edge, used as inner card padding.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Edges {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Which optional card elements this template shows. Absent flags mean
/// shown; templates only ever opt elements out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleFields {
    pub photo: bool,
    pub name: bool,
    pub id: bool,
    pub class: bool,
    pub phone: bool,
    pub signature: bool,
}

impl Default for VisibleFields {
    fn default() -> Self {
        VisibleFields {
            photo: true,
            name: true,
            id: true,
            class: true,
            phone: true,
            signature: true,
        }
    }
}

/// A fully resolved card template: all dimensions concrete, all defaults
/// filled. This is what the card renderer and grid composer work with.
#[derive(Debug, Clone)]
pub struct CardTemplate {
    pub width_mm: f64,
    pub height_mm: f64,
    pub orientation: Orientation,
    /// Template spacing, applied as inner padding.
    pub padding_mm: Edges,
    pub photo_shape: PhotoShape,
    pub photo_width_mm: f64,
    pub photo_height_mm: f64,
    pub fields: VisibleFields,
    /// Asset paths as stored; URL normalization happens at render time.
    pub logo: Option<String>,
    pub signature: Option<String>,
    pub background: Option<String>,
    pub title: Option<String>,
}

impl CardTemplate {
    /// Normalize a raw template record. Total: there is no error path.
    pub fn resolve(raw: &RawTemplate) -> CardTemplate {
        CardTemplate {
            width_mm: raw.width.unwrap_or(DEFAULT_CARD_WIDTH_MM),
            height_mm: raw.height.unwrap_or(DEFAULT_CARD_HEIGHT_MM),
            orientation: match raw.admin_layout.as_deref() {
                Some("Horizontal") => Orientation::Horizontal,
                _ => Orientation::Vertical,
            },
            padding_mm: Edges {
                top: raw.spacing_top.unwrap_or(0.0),
                right: raw.spacing_right.unwrap_or(0.0),
                bottom: raw.spacing_bottom.unwrap_or(0.0),
                left: raw.spacing_left.unwrap_or(0.0),
            },
            photo_shape: match raw.user_photo_style.as_deref() {
                Some("Circle") => PhotoShape::Circle,
                Some("Rounded") => PhotoShape::Rounded,
                _ => PhotoShape::Square,
            },
            photo_width_mm: raw.user_photo_size_width.unwrap_or(DEFAULT_PHOTO_SIZE_MM),
            photo_height_mm: raw.user_photo_size_height.unwrap_or(DEFAULT_PHOTO_SIZE_MM),
            fields: VisibleFields {
                photo: raw.show_photo.unwrap_or(true),
                name: raw.show_name.unwrap_or(true),
                id: raw.show_id.unwrap_or(true),
                class: raw.show_class.unwrap_or(true),
                phone: raw.show_phone.unwrap_or(true),
                signature: raw.show_signature.unwrap_or(true),
            },
            logo: present(&raw.logo),
            signature: present(&raw.signature),
            background: present(&raw.background_image),
            title: present(&raw.title),
        }
    }

    /// Photo frame corner radius in millimetres, derived from the shape:
    /// a circle is half the smaller side, rounded is a fixed corner,
    /// square is sharp.
    pub fn photo_corner_radius_mm(&self) -> f64 {
        match self.photo_shape {
            PhotoShape::Circle => self.photo_width_mm.min(self.photo_height_mm) / 2.0,
            PhotoShape::Rounded => ROUNDED_CORNER_MM,
            PhotoShape::Square => 0.0,
        }
    }
}

/// Empty strings stored by old forms count as absent.
fn present(value: &Option<String>) -> Option<String> {
    value.clone().filter(|s| !s.trim().is_empty())
}
