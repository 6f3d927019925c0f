use common::model::canteen::CanteenSummary;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::adapters::fetch_canteens;
use crate::components::dashboard::format_share;

pub enum Msg {
    Loaded(Vec<CanteenSummary>),
    Failed,
}

/// Public list of canteens with their reporting-year shares.
pub struct Canteens {
    canteens: Option<Vec<CanteenSummary>>,
    failed: bool,
}

impl Component for Canteens {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            match fetch_canteens().await {
                Ok(canteens) => link.send_message(Msg::Loaded(canteens)),
                Err(err) => {
                    log::warn!("{err}");
                    link.send_message(Msg::Failed);
                }
            }
        });
        Self {
            canteens: None,
            failed: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(canteens) => self.canteens = Some(canteens),
            Msg::Failed => self.failed = true,
        }
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        if self.failed {
            return html! { <p>{"La liste des cantines n'est pas disponible."}</p> };
        }
        let Some(canteens) = &self.canteens else {
            return html! { <p>{"Chargement..."}</p> };
        };
        if canteens.is_empty() {
            return html! { <p>{"Aucune cantine n'a encore publié son diagnostic."}</p> };
        }

        html! {
            <section class="canteens">
                { for canteens.iter().map(canteen_card) }
            </section>
        }
    }
}

fn canteen_card(canteen: &CanteenSummary) -> Html {
    let diagnostic = canteen.diagnostic.as_ref();
    html! {
        <article class="canteen-card" key={canteen.id.to_string()}>
            <h3>{ &canteen.name }</h3>
            <p>{ format!("{} · {}", canteen.city, canteen.sector) }</p>
            <p>
                { format!("Bio en {} : {}", canteen.time_period, format_share(diagnostic.and_then(|d| d.bio_share()))) }
            </p>
            <p>
                { format!("Durable et de qualité : {}", format_share(diagnostic.and_then(|d| d.sustainable_share()))) }
            </p>
        </article>
    }
}
