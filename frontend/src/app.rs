use common::diagnostics::ports::TokenProvider;
use common::diagnostics::SaveOutcome;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::UrlSearchParams;
use yew::platform::spawn_local;
use yew::{classes, html, Component, Context, Html};

use crate::adapters::{exchange_login_token, sign_out, StoredJwt};
use crate::components::canteens::Canteens;
use crate::components::dashboard::Dashboard;
use crate::components::diagnostic::DiagnosticForm;
use crate::components::key_measures::KeyMeasures;
use crate::components::login::LoginForm;
use crate::components::poster::Poster;
use crate::components::sign_up::SignUpForm;
use crate::components::toast::show_toast;
use crate::routes::Page;

pub enum Msg {
    Navigate(Page),
    /// Back or forward in the browser history.
    PathChanged,
    SignedIn,
    LoginFailed,
    SignOut,
}

pub struct App {
    page: Page,
    signed_in: bool,
    /// Bumped on sign-in and sign-out so pages reload their diagnostics.
    generation: u32,
    _popstate: Option<Closure<dyn FnMut()>>,
}

fn current_page() -> Page {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .map(|path| Page::from_path(&path))
        .unwrap_or(Page::Dashboard)
}

fn same_section(a: Page, b: Page) -> bool {
    std::mem::discriminant(&a) == std::mem::discriminant(&b)
}

fn push_path(page: Page) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&page.path()));
        }
    }
}

fn listen_to_history(ctx: &Context<App>) -> Option<Closure<dyn FnMut()>> {
    let link = ctx.link().clone();
    let listener = Closure::<dyn FnMut()>::new(move || link.send_message(Msg::PathChanged));
    web_sys::window()?
        .add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())
        .ok()?;
    Some(listener)
}

/// Token of a magic link (`/?token=...`), if the page was opened from one.
fn login_token_from_url() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    UrlSearchParams::new_with_str(&search).ok()?.get("token")
}

/// Drops the query string so a reload does not replay a consumed token.
fn clear_url_query() {
    if let Some(window) = web_sys::window() {
        if let (Ok(history), Ok(path)) = (window.history(), window.location().pathname()) {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&path));
        }
    }
}

impl App {
    fn show(&mut self, page: Page) {
        if page != current_page() {
            push_path(page);
        }
        self.page = page;
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        if let Some(token) = login_token_from_url() {
            clear_url_query();
            let link = ctx.link().clone();
            spawn_local(async move {
                match exchange_login_token(&token).await {
                    Ok(()) => link.send_message(Msg::SignedIn),
                    Err(err) => {
                        log::warn!("{err}");
                        link.send_message(Msg::LoginFailed);
                    }
                }
            });
        }

        Self {
            page: current_page(),
            signed_in: StoredJwt.token().is_some(),
            generation: 0,
            _popstate: listen_to_history(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(page) => {
                if page == self.page {
                    return false;
                }
                self.show(page);
            }
            Msg::PathChanged => {
                self.page = current_page();
            }
            Msg::SignedIn => {
                self.signed_in = true;
                self.generation += 1;
                self.show(Page::Dashboard);
                show_toast("Vous êtes connecté.");
            }
            Msg::LoginFailed => {
                self.show(Page::Login);
                show_toast("Ce lien de connexion n'est plus valide. Demandez-en un nouveau.");
            }
            Msg::SignOut => {
                sign_out();
                self.signed_in = false;
                self.generation += 1;
                self.show(Page::Dashboard);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let key = self.generation.to_string();
        let tab = |page: Page, label: &'static str| {
            html! {
                <button
                    class={classes!("tab-btn", same_section(self.page, page).then_some("active"))}
                    onclick={link.callback(move |_| Msg::Navigate(page))}
                >
                    { label }
                </button>
            }
        };

        html! {
            <div class="app">
                <nav class="tab-bar">
                    { tab(Page::Dashboard, "Tableau de bord") }
                    { tab(Page::Diagnostic, "Mon diagnostic") }
                    { tab(Page::Poster, "Affiche") }
                    { tab(Page::KeyMeasures(None), "Mesures phares") }
                    { tab(Page::Canteens, "Nos cantines") }
                    if self.signed_in {
                        <button class="tab-btn" onclick={link.callback(|_| Msg::SignOut)}>{"Se déconnecter"}</button>
                    } else {
                        { tab(Page::Login, "Se connecter") }
                        { tab(Page::SignUp, "Créer un compte") }
                    }
                </nav>
                <main>
                    {
                        match self.page {
                            Page::Dashboard => html! {
                                <Dashboard
                                    key={key}
                                    on_start_diagnostic={link.callback(|_| Msg::Navigate(Page::Diagnostic))}
                                />
                            },
                            Page::Diagnostic => html! {
                                <DiagnosticForm
                                    key={key}
                                    on_saved={link.callback(|outcome: SaveOutcome| match outcome {
                                        SaveOutcome::Remote => Msg::Navigate(Page::Dashboard),
                                        SaveOutcome::Local => Msg::Navigate(Page::Diagnostic),
                                    })}
                                />
                            },
                            Page::Poster => html! { <Poster key={key} /> },
                            Page::Login => html! { <LoginForm /> },
                            Page::SignUp => html! { <SignUpForm /> },
                            Page::Canteens => html! { <Canteens /> },
                            Page::KeyMeasures(selected) => html! {
                                <KeyMeasures
                                    {selected}
                                    on_select={link.callback(|id: Option<&'static str>| {
                                        Msg::Navigate(Page::KeyMeasures(id))
                                    })}
                                />
                            },
                        }
                    }
                </main>
            </div>
        }
    }
}
