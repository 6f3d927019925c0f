//! Canteen dashboard: progress on the key measures for the two latest years.
//!
//! Shows an invitation to fill in the diagnostic when nothing has been saved,
//! neither online nor on this device.

use common::key_measures::KEY_MEASURES;
use common::model::diagnostic::DiagnosticRecord;
use common::model::history::DiagnosticPair;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::adapters::normalizer;

pub enum Msg {
    Loaded(Option<DiagnosticPair>),
}

#[derive(Properties, PartialEq, Clone)]
pub struct DashboardProps {
    #[prop_or_default]
    pub on_start_diagnostic: Callback<()>,
}

pub struct Dashboard {
    diagnostics: Option<DiagnosticPair>,
    loading: bool,
}

impl Component for Dashboard {
    type Message = Msg;
    type Properties = DashboardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            let pair = normalizer().get_diagnostics_for_dashboard().await;
            link.send_message(Msg::Loaded(pair));
        });
        Self {
            diagnostics: None,
            loading: true,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(pair) => {
                self.diagnostics = pair;
                self.loading = false;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        if self.loading {
            return html! { <p class="loading">{"Chargement…"}</p> };
        }

        let Some(pair) = &self.diagnostics else {
            let start = ctx.props().on_start_diagnostic.reform(|_: MouseEvent| ());
            return html! {
                <div class="dashboard empty">
                    <p>{"Vous n'avez pas encore renseigné de diagnostic."}</p>
                    <button class="primary" onclick={start}>{"Commencer mon diagnostic"}</button>
                </div>
            };
        };

        html! {
            <div class="dashboard">
                { year_card(&pair.latest) }
                { pair.previous.as_ref().map(year_card).unwrap_or_default() }
                <ul class="key-measures">
                    { for KEY_MEASURES.iter().map(|measure| html! {
                        <li id={measure.id}>{ measure.title }</li>
                    }) }
                </ul>
            </div>
        }
    }
}

fn year_card(record: &DiagnosticRecord) -> Html {
    html! {
        <div class="year-card">
            <h3>{ record.year.to_string() }</h3>
            <p>{ format!("Produits bio : {}", format_share(record.bio_share())) }</p>
            <p>{ format!("Produits durables et de qualité : {}", format_share(record.sustainable_share())) }</p>
        </div>
    }
}

pub fn format_share(share: Option<f64>) -> String {
    share
        .map(|value| format!("{} %", value.round()))
        .unwrap_or_else(|| "non renseigné".to_string())
}
