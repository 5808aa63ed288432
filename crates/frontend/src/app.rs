use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::i18n::LanguageProvider;
use crate::shared::theme::ThemeProvider;
use crate::system::auth::context::AuthProvider;
use crate::system::auth::guard::RequireAuth;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());

    // Language first: the auth provider adopts the profile's language once restored.
    view! {
        <ThemeProvider>
            <LanguageProvider>
                <AuthProvider>
                    <RequireAuth>
                        <AppRoutes />
                    </RequireAuth>
                </AuthProvider>
            </LanguageProvider>
        </ThemeProvider>
    }
}
