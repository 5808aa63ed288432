//! Read-only presentation model of a member profile.
//!
//! Groups the flat `members` row into titled sections and drops empty values,
//! so the detail pane only renders what was actually filled in.

use super::aggregate::{ChildInfo, Member};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    /// ISO date, formatted by the UI according to the viewer's calendar
    Date(String),
    Amount(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailField {
    /// Translation key of the label
    pub label_key: &'static str,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailSection {
    pub title_key: &'static str,
    pub fields: Vec<DetailField>,
    pub children: Vec<ChildInfo>,
}

fn text(label_key: &'static str, v: &Option<String>) -> Option<DetailField> {
    v.as_ref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| DetailField {
            label_key,
            value: FieldValue::Text(s.clone()),
        })
}

fn date(label_key: &'static str, v: &Option<String>) -> Option<DetailField> {
    v.as_ref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| DetailField {
            label_key,
            value: FieldValue::Date(s.clone()),
        })
}

fn section(title_key: &'static str, fields: Vec<Option<DetailField>>) -> DetailSection {
    DetailSection {
        title_key,
        fields: fields.into_iter().flatten().collect(),
        children: Vec::new(),
    }
}

/// Non-empty sections of a member profile, in registration-form order.
pub fn member_sections(m: &Member) -> Vec<DetailSection> {
    let p = &m.personal;
    let s = &m.spiritual;
    let e = &m.education;
    let f = &m.family;
    let sv = &m.service;
    let fl = &m.fellowship;
    let sg = &m.signatures;

    let mut family = section(
        "member.sections.family",
        vec![
            text("member.fields.marital_status", &f.marital_status),
            text("member.fields.spouse_name", &f.spouse_name),
            date("member.fields.marriage_date", &f.marriage_date),
            text("member.fields.marriage_place", &f.marriage_place),
            text("member.fields.living_situation", &f.living_situation),
            text("member.fields.additional_family_info", &f.additional_family_info),
        ],
    );
    family.children = f
        .children
        .iter()
        .filter(|c| !c.name.trim().is_empty())
        .cloned()
        .collect();

    let mut education = section(
        "member.sections.education",
        vec![
            text("member.fields.field_of_study", &e.field_of_study),
            text("member.fields.educational_level", &e.educational_level),
            text("member.fields.employment_status", &e.employment_status),
            text("member.fields.workplace_address", &e.workplace_address),
        ],
    );
    if let Some(amount) = e.income_amount {
        education.fields.push(DetailField {
            label_key: "member.fields.income_amount",
            value: FieldValue::Amount(amount),
        });
    }

    vec![
        section(
            "member.sections.contact",
            vec![
                text("member.fields.phone", &m.phone),
                text("member.fields.email", &m.email),
            ],
        ),
        section(
            "member.sections.personal",
            vec![
                date("member.fields.dob", &p.dob),
                text("member.fields.place_of_birth", &p.place_of_birth),
                text("member.fields.mother_tongue", &p.mother_tongue),
            ],
        ),
        section(
            "member.sections.spiritual",
            vec![
                date("member.fields.salvation_date", &s.salvation_date),
                text("member.fields.salvation_place", &s.salvation_place),
                text("member.fields.previous_church", &s.previous_church),
                text("member.fields.reason_for_coming", &s.reason_for_coming),
                text("member.fields.faith", &s.faith),
            ],
        ),
        education,
        family,
        section(
            "member.sections.service",
            vec![
                text("member.fields.service_type", &sv.service_type),
                text("member.fields.service_duration", &sv.service_duration),
                text("member.fields.service_responsibility", &sv.service_responsibility),
                text("member.fields.current_service", &sv.current_service),
                text("member.fields.spiritual_gift", &sv.spiritual_gift),
                text("member.fields.future_service", &sv.future_service),
                text("member.fields.additional_service_info", &sv.additional_service_info),
            ],
        ),
        section(
            "member.sections.fellowship",
            vec![
                date("member.fields.fellowship_start_date", &fl.fellowship_start_date),
                text("member.fields.fellowship_name", &fl.fellowship_name),
                text("member.fields.fellowship_responsibility", &fl.fellowship_responsibility),
                text("member.fields.fellowship_mentor", &fl.fellowship_mentor),
                text("member.fields.fellowship_leader", &fl.fellowship_leader),
                text("member.fields.additional_fellowship_info", &fl.additional_fellowship_info),
            ],
        ),
        section(
            "member.sections.signatures",
            vec![
                text("member.fields.member_signature", &sg.member_signature),
                date("member.fields.form_filled_date", &sg.form_filled_date),
                text("member.fields.fellowship_leader_signature", &sg.fellowship_leader_signature),
                text("member.fields.zone_rep_signature", &sg.zone_rep_signature),
                text("member.fields.middle_sector_rep_signature", &sg.middle_sector_rep_signature),
            ],
        ),
    ]
    .into_iter()
    .filter(|s| !s.fields.is_empty() || !s.children.is_empty())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(json: &str) -> Member {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_empty_sections_are_dropped() {
        let m = member(
            r#"{"id":"11111111-1111-4111-8111-111111111111","church_id":"5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a","full_name":"Abebe","phone":"0911","email":""}"#,
        );
        let sections = member_sections(&m);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title_key, "member.sections.contact");
        assert_eq!(sections[0].fields.len(), 1);
    }

    #[test]
    fn test_dates_amounts_and_children() {
        let m = member(
            r#"{"id":"11111111-1111-4111-8111-111111111111","church_id":"5d4c3b2a-1f0e-4d9c-8b7a-6f5e4d3c2b1a","full_name":"Abebe",
                "dob":"1990-05-01","income_amount":500,"children":[{"name":"Liya","age":4},{"name":"  "}]}"#,
        );
        let sections = member_sections(&m);
        let keys: Vec<_> = sections.iter().map(|s| s.title_key).collect();
        assert_eq!(
            keys,
            vec![
                "member.sections.personal",
                "member.sections.education",
                "member.sections.family"
            ]
        );
        assert_eq!(sections[0].fields[0].value, FieldValue::Date("1990-05-01".into()));
        assert_eq!(sections[1].fields[0].value, FieldValue::Amount(500.0));
        assert_eq!(sections[2].children.len(), 1);
    }
}
