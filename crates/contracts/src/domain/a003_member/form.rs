//! Editable registration form of a member.
//!
//! The form is a flat buffer of column values keyed like the `members` table,
//! walked through in seven steps. It turns into a REST payload only on save.

use super::aggregate::{ChildInfo, Member};
use crate::domain::a004_activity_log::diff::object_diff;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const STATUS_OPTIONS: &[&str] = &["Active", "Death", "Transfer"];
pub const MARITAL_OPTIONS: &[&str] = &["Single", "Married", "Divorced", "Widowed"];
pub const EDUCATION_LEVELS: &[&str] = &["High School", "Diploma", "Bachelor's", "Master's", "PhD"];
pub const EMPLOYMENT_OPTIONS: &[&str] = &["Employed", "Self-Employed", "Unemployed", "Student", "Retired"];
pub const GENDER_OPTIONS: &[&str] = &["Male", "Female"];

/// Columns shown only for married members
const SPOUSE_COLUMNS: &[&str] = &["spouse_name", "marriage_date", "marriage_place"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    Email,
    Phone,
    Date,
    Number,
    Choice(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub column: &'static str,
    pub kind: FieldKind,
}

impl FormField {
    const fn new(column: &'static str, kind: FieldKind) -> Self {
        Self { column, kind }
    }

    pub fn label_key(&self) -> String {
        format!("member.fields.{}", self.column)
    }
}

use FieldKind::*;

const PERSONAL: &[FormField] = &[
    FormField::new("full_name", Text),
    FormField::new("phone", Phone),
    FormField::new("email", Email),
    FormField::new("dob", Date),
    FormField::new("place_of_birth", Text),
    FormField::new("mother_tongue", Text),
    FormField::new("status", Choice(STATUS_OPTIONS)),
];

const SPIRITUAL: &[FormField] = &[
    FormField::new("salvation_date", Date),
    FormField::new("salvation_place", Text),
    FormField::new("previous_church", Text),
    FormField::new("reason_for_coming", LongText),
    FormField::new("faith", Text),
];

const EDUCATION: &[FormField] = &[
    FormField::new("field_of_study", Text),
    FormField::new("educational_level", Choice(EDUCATION_LEVELS)),
    FormField::new("employment_status", Choice(EMPLOYMENT_OPTIONS)),
    FormField::new("workplace_address", Text),
    FormField::new("income_amount", Number),
];

const FAMILY: &[FormField] = &[
    FormField::new("marital_status", Choice(MARITAL_OPTIONS)),
    FormField::new("spouse_name", Text),
    FormField::new("marriage_date", Date),
    FormField::new("marriage_place", Text),
    FormField::new("living_situation", Text),
    FormField::new("additional_family_info", LongText),
];

const SERVICE: &[FormField] = &[
    FormField::new("service_type", Text),
    FormField::new("service_duration", Text),
    FormField::new("service_responsibility", Text),
    FormField::new("current_service", Text),
    FormField::new("spiritual_gift", Text),
    FormField::new("future_service", Text),
    FormField::new("additional_service_info", LongText),
];

const FELLOWSHIP: &[FormField] = &[
    FormField::new("fellowship_start_date", Date),
    FormField::new("fellowship_name", Text),
    FormField::new("fellowship_responsibility", Text),
    FormField::new("fellowship_mentor", Text),
    FormField::new("fellowship_leader", Text),
    FormField::new("additional_fellowship_info", LongText),
];

const SIGNATURES: &[FormField] = &[
    FormField::new("member_signature", Text),
    FormField::new("form_filled_date", Date),
    FormField::new("fellowship_leader_signature", Text),
    FormField::new("zone_rep_signature", Text),
    FormField::new("middle_sector_rep_signature", Text),
];

/// Step of the registration form, in the order of the paper form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormStep {
    #[default]
    Personal,
    Spiritual,
    Education,
    Family,
    Service,
    Fellowship,
    Signatures,
}

impl FormStep {
    pub const ALL: [FormStep; 7] = [
        FormStep::Personal,
        FormStep::Spiritual,
        FormStep::Education,
        FormStep::Family,
        FormStep::Service,
        FormStep::Fellowship,
        FormStep::Signatures,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    pub fn title_key(self) -> &'static str {
        match self {
            FormStep::Personal => "member.sections.personal",
            FormStep::Spiritual => "member.sections.spiritual",
            FormStep::Education => "member.sections.education",
            FormStep::Family => "member.sections.family",
            FormStep::Service => "member.sections.service",
            FormStep::Fellowship => "member.sections.fellowship",
            FormStep::Signatures => "member.sections.signatures",
        }
    }

    pub fn fields(self) -> &'static [FormField] {
        match self {
            FormStep::Personal => PERSONAL,
            FormStep::Spiritual => SPIRITUAL,
            FormStep::Education => EDUCATION,
            FormStep::Family => FAMILY,
            FormStep::Service => SERVICE,
            FormStep::Fellowship => FELLOWSHIP,
            FormStep::Signatures => SIGNATURES,
        }
    }

    fn of_column(column: &str) -> FormStep {
        Self::ALL
            .into_iter()
            .find(|s| s.fields().iter().any(|f| f.column == column))
            .unwrap_or_default()
    }
}

/// `Some(trimmed)` unless blank
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.starts_with('.') && domain.contains('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Rejected form, with the step that holds the offending field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub step: FormStep,
    pub message: String,
}

impl FormError {
    fn at(column: &str, message: &str) -> Self {
        Self {
            step: FormStep::of_column(column),
            message: message.to_string(),
        }
    }
}

/// Column values being edited plus the children list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberDraft {
    values: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<ChildInfo>,
}

impl MemberDraft {
    /// Blank registration: active, single, filled in `today` (ISO date)
    pub fn new(today: &str, department_id: Option<String>) -> Self {
        let mut draft = Self::default();
        draft.set("status", "Active");
        draft.set("marital_status", "Single");
        draft.set("form_filled_date", today);
        if let Some(d) = department_id {
            draft.set("department_id", &d);
        }
        draft
    }

    /// Pre-fills the form from a stored member
    pub fn from_member(member: &Member) -> Self {
        let row = serde_json::to_value(member).unwrap_or(Value::Null);
        let mut draft = Self {
            values: BTreeMap::new(),
            children: member.family.children.clone(),
        };
        let columns = FormStep::ALL
            .iter()
            .flat_map(|s| s.fields().iter().map(|f| f.column))
            .chain(std::iter::once("department_id"));
        for column in columns {
            match row.get(column) {
                Some(Value::String(s)) => draft.set(column, s),
                Some(Value::Number(n)) => draft.set(column, &n.to_string()),
                _ => {}
            }
        }
        draft
    }

    pub fn get(&self, column: &str) -> String {
        self.values.get(column).cloned().unwrap_or_default()
    }

    pub fn set(&mut self, column: &str, value: &str) {
        if value.is_empty() {
            self.values.remove(column);
        } else {
            self.values.insert(column.to_string(), value.to_string());
        }
    }

    pub fn is_married(&self) -> bool {
        self.get("marital_status") == "Married"
    }

    /// Fields of `step` that apply to this member
    pub fn visible_fields(&self, step: FormStep) -> Vec<FormField> {
        step.fields()
            .iter()
            .filter(|f| self.is_married() || !SPOUSE_COLUMNS.contains(&f.column))
            .copied()
            .collect()
    }

    pub fn add_child(&mut self) {
        self.children.push(ChildInfo::default());
    }

    pub fn remove_child(&mut self, index: usize) {
        if index < self.children.len() {
            self.children.remove(index);
        }
    }

    pub fn validate(&self) -> Result<(), FormError> {
        if self.get("full_name").trim().chars().count() < 2 {
            return Err(FormError::at("full_name", "Full name is required"));
        }
        if let Some(email) = non_empty(&self.get("email")) {
            if !looks_like_email(&email) {
                return Err(FormError::at("email", "Invalid email"));
            }
        }
        if !STATUS_OPTIONS.contains(&self.get("status").as_str()) {
            return Err(FormError::at("status", "Status is required"));
        }
        if let Some(income) = non_empty(&self.get("income_amount")) {
            match income.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => {}
                _ => return Err(FormError::at("income_amount", "Income must be a positive number")),
            }
        }
        Ok(())
    }

    /// Row written to `members`: blanks become null, income a number, and
    /// spouse details are dropped for unmarried members.
    pub fn payload(&self, church_id: &str) -> Value {
        let mut row = Map::new();
        row.insert("church_id".into(), Value::String(church_id.to_string()));
        row.insert("department_id".into(), Self::text(non_empty(&self.get("department_id"))));

        for step in FormStep::ALL {
            for field in step.fields() {
                let value = match non_empty(&self.get(field.column)) {
                    Some(_) if SPOUSE_COLUMNS.contains(&field.column) && !self.is_married() => Value::Null,
                    Some(v) if field.kind == Number => v
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(Value::Number)
                        .unwrap_or(Value::Null),
                    other => Self::text(other),
                };
                row.insert(field.column.into(), value);
            }
        }

        let children: Vec<Value> = self
            .children
            .iter()
            .filter(|c| !c.name.trim().is_empty())
            .filter_map(|c| serde_json::to_value(c).ok())
            .collect();
        row.insert("children".into(), Value::Array(children));
        Value::Object(row)
    }

    /// Audit diff against the stored version; `department` carries the
    /// resolved department names because ids are not logged.
    pub fn changes(
        &self,
        original: &MemberDraft,
        department_name: impl Fn(&str) -> Option<String>,
    ) -> Option<Value> {
        let audit = |draft: &MemberDraft| {
            let mut value = draft.payload("");
            if let Value::Object(row) = &mut value {
                let name = non_empty(&draft.get("department_id")).and_then(|id| department_name(&id));
                row.insert("department".into(), Self::text(name));
            }
            value
        };
        object_diff(&audit(original), &audit(self))
    }

    fn text(value: Option<String>) -> Value {
        value.map(Value::String).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stored() -> Member {
        serde_json::from_value(json!({
            "id": "11111111-1111-4111-8111-111111111111",
            "church_id": "5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a",
            "department_id": "0b6f1b7e-8c0a-4f5e-9a51-3f1c2d4e5a60",
            "full_name": "Abebe Kebede",
            "status": "Active",
            "marital_status": "Married",
            "spouse_name": "Tigist",
            "income_amount": 1200.5,
            "photo": "https://cdn.example.org/a.jpg",
            "children": [{ "name": "Liya", "age": 7 }]
        }))
        .unwrap()
    }

    #[test]
    fn test_steps_walk_in_order() {
        assert_eq!(FormStep::ALL.len(), 7);
        assert_eq!(FormStep::Personal.prev(), None);
        assert_eq!(FormStep::Personal.next(), Some(FormStep::Spiritual));
        assert_eq!(FormStep::Fellowship.next(), Some(FormStep::Signatures));
        assert!(FormStep::Signatures.is_last());
        for (i, step) in FormStep::ALL.into_iter().enumerate() {
            assert_eq!(step.index(), i);
        }
    }

    #[test]
    fn test_every_column_belongs_to_one_step() {
        let mut seen = std::collections::BTreeSet::new();
        for step in FormStep::ALL {
            for field in step.fields() {
                assert!(seen.insert(field.column), "{} listed twice", field.column);
            }
        }
    }

    #[test]
    fn test_new_draft_defaults() {
        let d = MemberDraft::new("2024-09-11", Some("dept".into()));
        assert_eq!(d.get("status"), "Active");
        assert_eq!(d.get("marital_status"), "Single");
        assert_eq!(d.get("form_filled_date"), "2024-09-11");
        assert_eq!(d.get("department_id"), "dept");
    }

    #[test]
    fn test_from_member_keeps_form_columns_only() {
        let d = MemberDraft::from_member(&stored());
        assert_eq!(d.get("full_name"), "Abebe Kebede");
        assert_eq!(d.get("income_amount"), "1200.5");
        assert_eq!(d.get("department_id"), "0b6f1b7e-8c0a-4f5e-9a51-3f1c2d4e5a60");
        assert_eq!(d.get("photo"), "");
        assert_eq!(d.children.len(), 1);
    }

    #[test]
    fn test_spouse_fields_only_when_married() {
        let mut d = MemberDraft::new("2024-09-11", None);
        let columns = |d: &MemberDraft| -> Vec<&str> {
            d.visible_fields(FormStep::Family).iter().map(|f| f.column).collect()
        };
        assert!(!columns(&d).contains(&"spouse_name"));
        d.set("marital_status", "Married");
        assert!(columns(&d).contains(&"spouse_name"));
        assert_eq!(columns(&d).len(), FormStep::Family.fields().len());
    }

    #[test]
    fn test_validation_points_at_step() {
        let mut d = MemberDraft::new("2024-09-11", None);
        assert_eq!(d.validate().unwrap_err().step, FormStep::Personal);

        d.set("full_name", "Abebe");
        d.set("email", "abebe@");
        assert_eq!(d.validate().unwrap_err().message, "Invalid email");

        d.set("email", "abebe@example.org");
        d.set("income_amount", "lots");
        assert_eq!(d.validate().unwrap_err().step, FormStep::Education);

        d.set("income_amount", "2500");
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_payload_shapes_row() {
        let mut d = MemberDraft::new("2024-09-11", None);
        d.set("full_name", "  Abebe ");
        d.set("income_amount", "2500.75");
        d.set("spouse_name", "Tigist");
        d.add_child();
        d.children[0].name = "Liya".into();
        d.add_child();

        let row = d.payload("church-1");
        assert_eq!(row["church_id"], "church-1");
        assert_eq!(row["full_name"], "Abebe");
        assert_eq!(row["income_amount"], json!(2500.75));
        assert_eq!(row["spouse_name"], Value::Null);
        assert_eq!(row["department_id"], Value::Null);
        assert_eq!(row["dob"], Value::Null);
        assert_eq!(row["children"].as_array().map(Vec::len), Some(1));
        assert!(row.get("photo").is_none());
    }

    #[test]
    fn test_changes_report_edited_fields_and_department_names() {
        let original = MemberDraft::from_member(&stored());
        assert!(original.changes(&original, |_| None).is_none());

        let mut edited = original.clone();
        edited.set("phone", "0911");
        edited.set("department_id", "other");
        let names = |id: &str| Some(if id == "other" { "Ushers" } else { "Choir" }.to_string());
        let diff = edited.changes(&original, names).unwrap();
        assert_eq!(diff["new"], json!({ "phone": "0911", "department": "Ushers" }));
        assert_eq!(diff["old"]["department"], "Choir");
    }

    #[test]
    fn test_remove_child_out_of_range_is_ignored() {
        let mut d = MemberDraft::default();
        d.add_child();
        d.remove_child(3);
        assert_eq!(d.children.len(), 1);
        d.remove_child(0);
        assert!(d.children.is_empty());
    }
}
