//! # Job Model
//!
//! The input representation for the composer. A print job carries a raw
//! template record, a batch of entity records, and the role that decides
//! how those records are read. Everything here mirrors the shapes the host
//! application fetches over REST, so most fields are optional and records
//! tolerate unknown keys: the engine's contract is to degrade, not reject.

use serde::{Deserialize, Serialize};

/// A complete bulk-print job as handed over by the host page.
///
/// `template` and `users` are `Option` on purpose: a job navigated to
/// without them is a precondition failure the composer reports as a typed
/// error, distinct from an empty-but-present user list (which composes an
/// empty sheet).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrintJob {
    /// Raw template record fetched by the host (`GET /templates/{id}`).
    pub template: Option<RawTemplate>,
    /// Entity records fetched by the host (`POST /bulk-fetch`). Kept as raw
    /// JSON here; the role decides which record shape they parse into.
    pub users: Option<Vec<serde_json::Value>>,
    /// Selects the entity variant and the placeholder photo.
    pub role: Option<Role>,
    /// Inter-card spacing in CSS pixels. Default 20px.
    pub grid_gap: Option<f64>,
    /// Print page size. Default A4.
    pub page: Option<PageSize>,
}

/// Entity role. Anything that isn't literally `"Student"` is treated as
/// staff-like, matching the bulk-fetch endpoint selection upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Student,
    Staff,
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        if s == "Student" {
            Role::Student
        } else {
            Role::Staff
        }
    }
}

impl From<Role> for String {
    fn from(r: Role) -> Self {
        match r {
            Role::Student => "Student".to_string(),
            Role::Staff => "Staff".to_string(),
        }
    }
}

/// Standard print page sizes in millimetres.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    A3,
    Letter,
    Legal,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in millimetres.
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::A3 => (297.0, 420.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::Legal => (215.9, 355.6),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// A raw card template record, exactly as stored. Numeric fields arrive as
/// numbers or numeric strings depending on which admin form last saved
/// them, so they deserialize leniently; resolution fills the defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTemplate {
    #[serde(deserialize_with = "lenient_mm")]
    pub width: Option<f64>,
    #[serde(deserialize_with = "lenient_mm")]
    pub height: Option<f64>,
    /// `"Horizontal"` or `"Vertical"`; anything else falls back to vertical.
    pub admin_layout: Option<String>,
    #[serde(deserialize_with = "lenient_mm")]
    pub spacing_top: Option<f64>,
    #[serde(deserialize_with = "lenient_mm")]
    pub spacing_bottom: Option<f64>,
    #[serde(deserialize_with = "lenient_mm")]
    pub spacing_left: Option<f64>,
    #[serde(deserialize_with = "lenient_mm")]
    pub spacing_right: Option<f64>,
    pub show_photo: Option<bool>,
    pub show_name: Option<bool>,
    pub show_id: Option<bool>,
    pub show_class: Option<bool>,
    pub show_phone: Option<bool>,
    pub show_signature: Option<bool>,
    /// `"Circle"`, `"Rounded"`, or `"Square"`.
    pub user_photo_style: Option<String>,
    #[serde(deserialize_with = "lenient_mm")]
    pub user_photo_size_width: Option<f64>,
    #[serde(deserialize_with = "lenient_mm")]
    pub user_photo_size_height: Option<f64>,
    /// Storage-relative or absolute asset paths.
    pub logo: Option<String>,
    pub signature: Option<String>,
    pub background_image: Option<String>,
    /// Organization name shown on the card.
    pub title: Option<String>,
}

/// Accept a number, a numeric string, or garbage (→ `None`).
fn lenient_mm<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(numeric))
}

fn numeric(v: &serde_json::Value) -> Option<f64> {
    match v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// An entity record, tagged by role. The two shapes share contact and
/// identity fields but differ in the academic/organizational ones; making
/// the split explicit turns the old duck-typed fallback chains into
/// exhaustive matches in the field mapper.
///
/// Deliberately not `Deserialize`: with every field optional, an untagged
/// parse would always pick the first variant. Use [`Entity::from_value`]
/// with the job role instead.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Entity {
    Student(StudentRecord),
    Staff(StaffRecord),
}

impl Entity {
    /// Parse a raw bulk-fetch record into the variant the job's role calls
    /// for. Records are partially populated by design, so this only fails
    /// on structurally wrong JSON (e.g. a non-object).
    pub fn from_value(role: Role, value: &serde_json::Value) -> Result<Entity, serde_json::Error> {
        match role {
            Role::Student => Ok(Entity::Student(serde_json::from_value(value.clone())?)),
            Role::Staff => Ok(Entity::Staff(serde_json::from_value(value.clone())?)),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Entity::Student(_) => Role::Student,
            Entity::Staff(_) => Role::Staff,
        }
    }
}

/// A student record. `admission_no` and `admission_number` are distinct
/// historical spellings that can coexist on one record; the field mapper
/// owns their precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub admission_no: Option<String>,
    pub admission_number: Option<String>,
    pub class: Option<SchoolClass>,
    pub section: Option<String>,
    pub roll_no: Option<String>,
    pub father_name: Option<String>,
    pub dob: Option<String>,
    pub blood_group: Option<String>,
    pub phone: Option<String>,
    pub guardian_phone: Option<String>,
    pub email: Option<String>,
    pub current_address: Option<String>,
    pub permanent_address: Option<String>,
    pub photo: Option<String>,
    pub image: Option<String>,
    pub profile_image: Option<String>,
    /// Everything else the record carries, kept for raw lookup.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A staff record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StaffRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub name: Option<String>,
    pub staff_id: Option<String>,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub dob: Option<String>,
    pub blood_group: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub current_address: Option<String>,
    pub permanent_address: Option<String>,
    pub photo: Option<String>,
    pub image: Option<String>,
    pub profile_image: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Nested class reference on student records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchoolClass {
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Representative shape of the host's data layer: a plain inventory item
/// with direct CRUD lifecycle and no derived state. Carried here so print
/// fixtures and host integrations share one definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub name: String,
    pub category_id: Option<String>,
    pub unit: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    pub school_id: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}
