use crate::shared::date_utils::format_display_date;
use crate::shared::i18n::use_i18n;
use crate::shared::icons::icon;
use crate::shared::palette::{initials, member_palette};
use crate::system::auth::context::use_profile;
use contracts::domain::a003_member::aggregate::{ChildInfo, MemberSummary};
use contracts::domain::a003_member::sections::{member_sections, DetailSection, FieldValue};
use contracts::system::auth::CalendarType;
use leptos::prelude::*;

/// `12500.5` -> `"12,500.50"`
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

fn render_value(value: &FieldValue, calendar: CalendarType) -> String {
    match value {
        FieldValue::Text(s) => s.clone(),
        FieldValue::Date(s) => format_display_date(Some(s), calendar),
        FieldValue::Amount(a) => format_amount(*a),
    }
}

/// Read-only member profile shown in the detail pane
#[component]
pub fn MemberDetails(member: MemberSummary) -> impl IntoView {
    let i18n = use_i18n();
    let profile = use_profile();
    let calendar = Signal::derive(move || {
        profile.with(|p| p.as_ref().map(|p| p.calendar()).unwrap_or_default())
    });

    let m = &member.member;
    let palette = member_palette(&m.full_name);
    let badge = initials(&m.full_name);
    let photo = m.personal.photo.clone().filter(|p| !p.is_empty());
    let status = m.status.clone().filter(|s| !s.is_empty());
    let affiliation = [member.department_name.clone(), member.church_name.clone()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");
    let sections = member_sections(m);
    let has_sections = !sections.is_empty();

    view! {
        <div class="member-details">
            <div class="member-details__hero" style=palette.css_vars()>
                {match photo {
                    Some(url) => view! { <img class="avatar avatar--lg" src=url alt="" /> }.into_any(),
                    None => view! {
                        <span class="avatar avatar--lg" style=format!("background: {}", palette.avatar_background())>
                            {badge}
                        </span>
                    }.into_any(),
                }}
                <div>
                    <h2 class="member-details__name">{m.full_name.clone()}</h2>
                    <div class="member-details__meta">{affiliation}</div>
                    {status.map(|s| view! { <span class="badge">{s}</span> })}
                </div>
            </div>

            {sections.into_iter().map(|section| view! { <SectionCard section=section calendar=calendar /> }).collect_view()}

            <Show when=move || !has_sections>
                <div class="empty-state">{move || i18n.t("member.noDetails")}</div>
            </Show>
        </div>
    }
}

#[component]
fn SectionCard(section: DetailSection, calendar: Signal<CalendarType>) -> impl IntoView {
    let i18n = use_i18n();
    let title_key = section.title_key;
    let children = section.children;
    let has_children = !children.is_empty();

    view! {
        <section class="detail-section">
            <h3 class="detail-section__title">{move || i18n.t(title_key)}</h3>
            <dl class="detail-section__fields">
                {section.fields.into_iter().map(|field| {
                    let label_key = field.label_key;
                    let value = field.value;
                    view! {
                        <div class="detail-field">
                            <dt>{move || i18n.t(label_key)}</dt>
                            <dd>{move || render_value(&value, calendar.get())}</dd>
                        </div>
                    }
                }).collect_view()}
            </dl>
            <Show when=move || has_children>
                <ChildrenTable children_info=children.clone() />
            </Show>
        </section>
    }
}

#[component]
fn ChildrenTable(children_info: Vec<ChildInfo>) -> impl IntoView {
    let i18n = use_i18n();
    let dash = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());

    view! {
        <table class="table__data children-table">
            <thead>
                <tr>
                    <th>{move || i18n.t("member.children.name")}</th>
                    <th>{move || i18n.t("member.children.gender")}</th>
                    <th>{move || i18n.t("member.children.age")}</th>
                    <th>{move || i18n.t("member.children.education")}</th>
                    <th>{move || i18n.t("member.children.faith")}</th>
                </tr>
            </thead>
            <tbody>
                {children_info.into_iter().map(|c| view! {
                    <tr>
                        <td>{icon("members")}{c.name}</td>
                        <td>{dash(c.gender)}</td>
                        <td>{dash(c.age)}</td>
                        <td>{dash(c.education)}</td>
                        <td>{dash(c.faith)}</td>
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(999.5), "999.50");
        assert_eq!(format_amount(12500.5), "12,500.50");
        assert_eq!(format_amount(1234567.0), "1,234,567.00");
        assert_eq!(format_amount(-4200.0), "-4,200.00");
    }

    #[test]
    fn test_render_value_dates_follow_calendar() {
        let v = FieldValue::Date("2024-09-11".into());
        assert_eq!(render_value(&v, CalendarType::Gregorian), "Sep 11, 2024");
        assert_eq!(render_value(&v, CalendarType::Ethiopian), "Meskerem 1, 2017");
    }
}
