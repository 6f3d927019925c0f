use common::requests::{NewCanteen, SignUpRequest};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::adapters::{sign_up, SignUpOutcome};
use crate::components::toast::show_toast;

#[derive(Clone, Copy)]
pub enum Field {
    Email,
    Name,
    City,
    Sector,
}

pub enum Msg {
    Update(Field, String),
    Submit,
    Done(SignUpOutcome),
    Failed,
}

/// Account creation for a canteen manager, answered by a magic link.
pub struct SignUpForm {
    email: String,
    canteen: NewCanteen,
    sending: bool,
}

impl SignUpForm {
    fn is_complete(&self) -> bool {
        [
            &self.email,
            &self.canteen.name,
            &self.canteen.city,
            &self.canteen.sector,
        ]
        .iter()
        .all(|value| !value.trim().is_empty())
    }

    fn input(&self, ctx: &Context<Self>, field: Field, label: &'static str) -> Html {
        let (kind, value) = match field {
            Field::Email => ("email", &self.email),
            Field::Name => ("text", &self.canteen.name),
            Field::City => ("text", &self.canteen.city),
            Field::Sector => ("text", &self.canteen.sector),
        };
        html! {
            <label>
                { label }
                <input
                    type={kind}
                    value={value.clone()}
                    oninput={ctx.link().callback(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::Update(field, input.value())
                    })}
                />
            </label>
        }
    }
}

impl Component for SignUpForm {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            email: String::new(),
            canteen: NewCanteen {
                name: String::new(),
                city: String::new(),
                sector: String::new(),
            },
            sending: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Update(field, value) => {
                match field {
                    Field::Email => self.email = value,
                    Field::Name => self.canteen.name = value,
                    Field::City => self.canteen.city = value,
                    Field::Sector => self.canteen.sector = value,
                }
                true
            }
            Msg::Submit => {
                if self.sending {
                    return false;
                }
                if !self.is_complete() {
                    show_toast("Merci de remplir tous les champs.");
                    return false;
                }
                self.sending = true;
                let request = SignUpRequest {
                    email: self.email.clone(),
                    canteen: self.canteen.clone(),
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    match sign_up(&request).await {
                        Ok(outcome) => link.send_message(Msg::Done(outcome)),
                        Err(err) => {
                            log::warn!("{err}");
                            link.send_message(Msg::Failed);
                        }
                    }
                });
                true
            }
            Msg::Done(outcome) => {
                self.sending = false;
                show_toast(match outcome {
                    SignUpOutcome::Created => {
                        "Votre compte est créé. Un lien de connexion vous a été envoyé."
                    }
                    SignUpOutcome::AlreadyRegistered => {
                        "Cette adresse a déjà un compte. Un nouveau lien de connexion vous a été envoyé."
                    }
                });
                true
            }
            Msg::Failed => {
                self.sending = false;
                show_toast("Impossible de créer le compte.");
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <form class="sign-up" onsubmit={link.callback(|e: SubmitEvent| { e.prevent_default(); Msg::Submit })}>
                { self.input(ctx, Field::Email, "Adresse e-mail") }
                { self.input(ctx, Field::Name, "Nom de la cantine") }
                { self.input(ctx, Field::City, "Ville") }
                { self.input(ctx, Field::Sector, "Secteur") }
                <button type="submit" disabled={self.sending}>{"Créer mon compte"}</button>
            </form>
        }
    }
}
