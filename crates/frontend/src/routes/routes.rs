use crate::domain::a001_church::ui::list::ChurchesPage;
use crate::domain::a002_department::ui::list::DepartmentsPage;
use crate::domain::a003_member::ui::form::MemberFormPage;
use crate::domain::a003_member::ui::list::MembersPage;
use crate::domain::a004_activity_log::ui::list::ActivitiesPage;
use crate::layout::Shell;
use crate::system::auth::guard::RequireSection;
use contracts::system::auth::Section;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

/// `:id?` keeps one page instance mounted while the detail opens and closes.
/// Fixed member paths come first so `add` is never read as an id.
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <Redirect path=Section::Members.path() /> }>
                    <Route path=path!("/members/add") view=MemberFormPage />
                    <Route path=path!("/members/edit/:id") view=MemberFormPage />
                    <Route path=path!("/members/:id?") view=MembersPage />
                    <Route
                        path=path!("/churches/:id?")
                        view=|| view! {
                            <RequireSection section=Section::Churches>
                                <ChurchesPage />
                            </RequireSection>
                        }
                    />
                    <Route
                        path=path!("/departments/:id?")
                        view=|| view! {
                            <RequireSection section=Section::Departments>
                                <DepartmentsPage />
                            </RequireSection>
                        }
                    />
                    <Route
                        path=path!("/activities")
                        view=|| view! {
                            <RequireSection section=Section::Activities>
                                <ActivitiesPage />
                            </RequireSection>
                        }
                    />
                </Routes>
            </Shell>
        </Router>
    }
}
