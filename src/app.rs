//! App Root Component
//!
//! Main application component with routing and the session provider.

use leptos::*;
use leptos_router::*;

use crate::pages::{Dashboard, Login};
use crate::state::session::provide_session;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide the session to all components
    provide_session();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white">
                <main>
                    <Routes>
                        <Route path="/" view=Dashboard />
                        <Route path="/login" view=Login />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"Nothing to monitor here."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Back to Dashboard"
            </A>
        </div>
    }
}
