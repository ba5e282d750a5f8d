//! Logical field resolution over heterogeneous entity records.
//!
//! Records arrive partially populated and with historical spellings, so
//! every logical field resolves through a fixed precedence chain of source
//! attributes. Resolution returns `Option<String>` and stays free of magic
//! literals; the single presentation boundary [`display`] substitutes the
//! `"N/A"` fallback. The chains here must not be reordered — templates in
//! the wild depend on them.

use chrono::NaiveDate;

use crate::model::{Entity, StaffRecord, StudentRecord};
use crate::ComposerConfig;

/// The literal printed for an unresolvable field.
pub const NOT_AVAILABLE: &str = "N/A";

/// The closed set of logical field names a card template can reference,
/// plus raw lookup for anything outside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Name,
    Id,
    AdmissionNo,
    Class,
    Section,
    RollNo,
    FatherName,
    Dob,
    BloodGroup,
    Phone,
    Email,
    Address,
    Department,
    Designation,
    /// Raw property lookup on the record by this name.
    Custom(String),
}

impl Field {
    /// The enumerated fields, for totality checks.
    pub const ENUMERATED: [Field; 14] = [
        Field::Name,
        Field::Id,
        Field::AdmissionNo,
        Field::Class,
        Field::Section,
        Field::RollNo,
        Field::FatherName,
        Field::Dob,
        Field::BloodGroup,
        Field::Phone,
        Field::Email,
        Field::Address,
        Field::Department,
        Field::Designation,
    ];

    /// Stable identifier used in composed layout output.
    pub fn key(&self) -> &str {
        match self {
            Field::Name => "name",
            Field::Id => "id",
            Field::AdmissionNo => "admissionNo",
            Field::Class => "class",
            Field::Section => "section",
            Field::RollNo => "rollNo",
            Field::FatherName => "fatherName",
            Field::Dob => "dob",
            Field::BloodGroup => "bloodGroup",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Address => "address",
            Field::Department => "department",
            Field::Designation => "designation",
            Field::Custom(name) => name,
        }
    }
}

/// Resolve a logical field to a display value, or `None` when no source
/// attribute is populated. Pure; one record, one shared template, no
/// shared state.
pub fn resolve(entity: &Entity, field: &Field) -> Option<String> {
    match entity {
        Entity::Student(r) => resolve_student(r, field),
        Entity::Staff(r) => resolve_staff(r, field),
    }
}

/// The presentation boundary: absent values render as [`NOT_AVAILABLE`] —
/// except Name, which renders empty. A card should not print "N/A" where a
/// person's name goes.
pub fn display(entity: &Entity, field: &Field) -> String {
    match resolve(entity, field) {
        Some(value) => value,
        None if matches!(field, Field::Name) => String::new(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Resolve the photo source, checking the known attribute names in order.
pub fn resolve_photo(entity: &Entity) -> Option<String> {
    let (photo, image, profile) = match entity {
        Entity::Student(r) => (&r.photo, &r.image, &r.profile_image),
        Entity::Staff(r) => (&r.photo, &r.image, &r.profile_image),
    };
    first_of(&[photo, image, profile])
}

/// Photo source with the role-specific placeholder fallback applied.
pub fn photo_or_placeholder(entity: &Entity, config: &ComposerConfig) -> String {
    resolve_photo(entity).unwrap_or_else(|| config.placeholder_for(entity.role()).to_string())
}

fn resolve_student(r: &StudentRecord, field: &Field) -> Option<String> {
    match field {
        Field::Name => full_name(&r.first_name, &r.last_name, &r.name),
        // admissionNo wins over the alternate spelling on records that
        // carry both.
        Field::Id | Field::AdmissionNo => first_of(&[&r.admission_no, &r.admission_number]),
        Field::Class => r
            .class
            .as_ref()
            .and_then(|c| c.name.clone())
            .filter(|s| !s.trim().is_empty()),
        Field::Section => present(&r.section),
        Field::RollNo => present(&r.roll_no),
        Field::FatherName => present(&r.father_name),
        Field::Dob => present(&r.dob).map(|d| format_dob(&d)),
        Field::BloodGroup => present(&r.blood_group),
        Field::Phone => first_of(&[&r.phone, &r.guardian_phone]),
        Field::Email => present(&r.email),
        Field::Address => first_of(&[&r.current_address, &r.permanent_address]),
        Field::Department | Field::Designation => None,
        Field::Custom(key) => lookup_raw(r, key),
    }
}

fn resolve_staff(r: &StaffRecord, field: &Field) -> Option<String> {
    match field {
        Field::Name => full_name(&r.first_name, &r.last_name, &r.name),
        Field::Id => present(&r.staff_id),
        Field::Dob => present(&r.dob).map(|d| format_dob(&d)),
        Field::BloodGroup => present(&r.blood_group),
        Field::Phone => present(&r.phone),
        Field::Email => present(&r.email),
        Field::Address => first_of(&[&r.current_address, &r.permanent_address]),
        Field::Department => present(&r.department),
        Field::Designation => present(&r.designation),
        Field::AdmissionNo
        | Field::Class
        | Field::Section
        | Field::RollNo
        | Field::FatherName => None,
        Field::Custom(key) => lookup_raw(r, key),
    }
}

/// First + last, trimmed; a generic `name` attribute is the fallback when
/// neither part is populated.
fn full_name(
    first: &Option<String>,
    last: &Option<String>,
    fallback: &Option<String>,
) -> Option<String> {
    let joined = format!(
        "{} {}",
        first.as_deref().unwrap_or(""),
        last.as_deref().unwrap_or("")
    );
    let joined = joined.trim();
    if !joined.is_empty() {
        return Some(joined.to_string());
    }
    present(fallback)
}

/// Date of birth renders as a plain date when the stored value parses;
/// otherwise the raw string passes through untouched.
fn format_dob(raw: &str) -> String {
    let head = raw.get(..10).unwrap_or(raw);
    match NaiveDate::parse_from_str(head, "%Y-%m-%d") {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value.clone().filter(|s| !s.trim().is_empty())
}

fn first_of(chain: &[&Option<String>]) -> Option<String> {
    chain.iter().find_map(|v| present(v))
}

/// Raw property lookup by name. Serializing the record gives one flat
/// camelCase map covering the declared attributes and the extras alike,
/// so `Custom("guardianPhone")` sees the same value the typed chains do.
fn lookup_raw<T: serde::Serialize>(record: &T, key: &str) -> Option<String> {
    let value = serde_json::to_value(record).ok()?;
    scalar(value.get(key)?)
}

fn scalar(v: &serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;
    use serde_json::json;

    fn student(v: serde_json::Value) -> Entity {
        Entity::from_value(Role::Student, &v).unwrap()
    }

    fn staff(v: serde_json::Value) -> Entity {
        Entity::from_value(Role::Staff, &v).unwrap()
    }

    #[test]
    fn test_resolution_is_total_on_empty_records() {
        for entity in [student(json!({})), staff(json!({}))] {
            for field in Field::ENUMERATED {
                let shown = display(&entity, &field);
                if field == Field::Name {
                    assert_eq!(shown, "", "empty name renders empty, not N/A");
                } else {
                    assert_eq!(shown, NOT_AVAILABLE, "field {:?}", field);
                }
            }
        }
    }

    #[test]
    fn test_name_concatenation_and_fallback() {
        let e = student(json!({"firstName": "Asha", "lastName": "Rao"}));
        assert_eq!(display(&e, &Field::Name), "Asha Rao");

        let e = student(json!({"firstName": "Asha"}));
        assert_eq!(display(&e, &Field::Name), "Asha");

        let e = student(json!({"name": "A. Rao"}));
        assert_eq!(display(&e, &Field::Name), "A. Rao");

        // Name parts win over the generic field.
        let e = student(json!({"firstName": "Asha", "name": "ignored"}));
        assert_eq!(display(&e, &Field::Name), "Asha");
    }

    #[test]
    fn test_id_precedence_chain() {
        let e = student(json!({"admissionNo": "A-1", "admissionNumber": "A-2"}));
        assert_eq!(display(&e, &Field::Id), "A-1");

        let e = student(json!({"admissionNumber": "A-2"}));
        assert_eq!(display(&e, &Field::Id), "A-2");

        let e = staff(json!({"staffId": "S-9"}));
        assert_eq!(display(&e, &Field::Id), "S-9");
    }

    #[test]
    fn test_phone_falls_back_to_guardian() {
        let e = student(json!({"guardianPhone": "111"}));
        assert_eq!(display(&e, &Field::Phone), "111");

        let e = student(json!({"phone": "222", "guardianPhone": "111"}));
        assert_eq!(display(&e, &Field::Phone), "222");
    }

    #[test]
    fn test_address_falls_back_to_permanent() {
        let e = staff(json!({"permanentAddress": "12 Hill Rd"}));
        assert_eq!(display(&e, &Field::Address), "12 Hill Rd");
    }

    #[test]
    fn test_dob_formats_when_parseable() {
        let e = student(json!({"dob": "2014-03-09"}));
        assert_eq!(display(&e, &Field::Dob), "09/03/2014");

        // ISO timestamps format from the date part.
        let e = student(json!({"dob": "2014-03-09T00:00:00.000Z"}));
        assert_eq!(display(&e, &Field::Dob), "09/03/2014");

        // Unparseable values pass through rather than vanish.
        let e = student(json!({"dob": "ninth of March"}));
        assert_eq!(display(&e, &Field::Dob), "ninth of March");
    }

    #[test]
    fn test_class_reads_nested_name() {
        let e = student(json!({"class": {"name": "5"}}));
        assert_eq!(display(&e, &Field::Class), "5");
    }

    #[test]
    fn test_custom_field_raw_lookup() {
        let e = student(json!({"house": "Blue", "lockerNo": 17}));
        assert_eq!(display(&e, &Field::Custom("house".into())), "Blue");
        assert_eq!(display(&e, &Field::Custom("lockerNo".into())), "17");
        assert_eq!(display(&e, &Field::Custom("missing".into())), NOT_AVAILABLE);
    }

    #[test]
    fn test_custom_lookup_sees_declared_attributes() {
        // Attributes the record shape declares are consumed by the struct
        // during parsing; raw lookup must still find them.
        let e = student(json!({"guardianPhone": "111", "photo": "a.png"}));
        assert_eq!(display(&e, &Field::Custom("guardianPhone".into())), "111");
        assert_eq!(display(&e, &Field::Custom("photo".into())), "a.png");

        let e = staff(json!({"currentAddress": "12 Hill Rd"}));
        assert_eq!(
            display(&e, &Field::Custom("currentAddress".into())),
            "12 Hill Rd"
        );
    }

    #[test]
    fn test_department_is_staff_only() {
        let e = student(json!({"department": "ignored on students"}));
        assert_eq!(display(&e, &Field::Department), NOT_AVAILABLE);

        let e = staff(json!({"department": "Science"}));
        assert_eq!(display(&e, &Field::Department), "Science");
    }

    #[test]
    fn test_photo_attribute_precedence() {
        let e = student(json!({"image": "b.png", "profileImage": "c.png"}));
        assert_eq!(resolve_photo(&e).as_deref(), Some("b.png"));

        let e = student(json!({"photo": "a.png", "image": "b.png"}));
        assert_eq!(resolve_photo(&e).as_deref(), Some("a.png"));
    }

    #[test]
    fn test_placeholder_selection_by_role() {
        let config = ComposerConfig {
            student_placeholder_url: "http://p.test/student.png".into(),
            staff_placeholder_url: "http://p.test/staff.png".into(),
            ..Default::default()
        };
        assert_eq!(
            photo_or_placeholder(&student(json!({})), &config),
            "http://p.test/student.png"
        );
        assert_eq!(
            photo_or_placeholder(&staff(json!({})), &config),
            "http://p.test/staff.png"
        );
    }
}
