use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::adapters::request_login_link;
use crate::components::toast::show_toast;

pub enum Msg {
    UpdateEmail(String),
    Submit,
    Sent,
    Failed,
}

/// Email form asking for a magic link.
pub struct LoginForm {
    email: String,
    sending: bool,
}

impl Component for LoginForm {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            email: String::new(),
            sending: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::UpdateEmail(email) => {
                self.email = email;
                false
            }
            Msg::Submit => {
                if self.sending || self.email.trim().is_empty() {
                    return false;
                }
                self.sending = true;
                let email = self.email.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    match request_login_link(&email).await {
                        Ok(()) => link.send_message(Msg::Sent),
                        Err(err) => {
                            log::warn!("{err}");
                            link.send_message(Msg::Failed);
                        }
                    }
                });
                true
            }
            Msg::Sent => {
                self.sending = false;
                show_toast("Un lien de connexion vous a été envoyé par e-mail.");
                true
            }
            Msg::Failed => {
                self.sending = false;
                show_toast("Impossible d'envoyer le lien de connexion.");
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <form class="login" onsubmit={link.callback(|e: SubmitEvent| { e.prevent_default(); Msg::Submit })}>
                <label>
                    {"Adresse e-mail"}
                    <input
                        type="email"
                        value={self.email.clone()}
                        oninput={link.callback(|e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::UpdateEmail(input.value())
                        })}
                    />
                </label>
                <button type="submit" disabled={self.sending}>{"Recevoir un lien de connexion"}</button>
            </form>
        }
    }
}
