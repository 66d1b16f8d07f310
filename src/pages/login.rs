//! Login Page
//!
//! Credential form gating the monitoring view. A successful login stores
//! the token in the session and moves on to the dashboard.

use leptos::*;
use leptos_router::use_navigate;

use crate::api::{self, ApiError};
use crate::state::session::Session;

/// Login page component
#[component]
pub fn Login() -> impl IntoView {
    let session = use_context::<Session>().expect("Session not found");
    let navigate = use_navigate();

    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);
    let (error, set_error) = create_signal(None::<String>);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let user = username.get();
        let pass = password.get();

        set_submitting.set(true);
        set_error.set(None);

        let session = session.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&user, &pass).await {
                Ok(token) => {
                    session.write(&token);
                    navigate("/", Default::default());
                }
                Err(ApiError::Rejected { message, .. }) => {
                    // The server says why: wrong credentials, locked account
                    set_error.set(Some(message));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Login failed: {}", e).into());
                    set_error.set(Some("Cannot reach the authentication server.".to_string()));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center px-4">
            <div class="w-full max-w-md bg-gray-800 rounded-xl p-8 border border-gray-700">
                // Branding
                <div class="text-center mb-8">
                    <div class="text-5xl mb-3">"🛡️"</div>
                    <h1 class="text-3xl font-bold">"Sentinel"</h1>
                    <p class="text-gray-400 mt-1">"Real-time fraud monitoring"</p>
                </div>

                <form on:submit=on_submit class="space-y-4">
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Username"</label>
                        <input
                            type="text"
                            required
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>

                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"Password"</label>
                        <input
                            type="password"
                            required
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>

                    // Server rejection or connectivity notice
                    {move || error.get().map(|message| view! {
                        <p class="text-red-400 text-sm">{message}</p>
                    })}

                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                               disabled:cursor-not-allowed rounded-lg py-3 font-semibold
                               transition-colors flex items-center justify-center space-x-2"
                    >
                        {move || if submitting.get() {
                            view! {
                                <div class="loading-spinner w-5 h-5" />
                                <span>"Signing in..."</span>
                            }.into_view()
                        } else {
                            view! {
                                <span>"Sign In"</span>
                            }.into_view()
                        }}
                    </button>
                </form>
            </div>
        </div>
    }
}
