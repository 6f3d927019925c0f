use common::model::diagnostic::DiagnosticRecord;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::adapters::normalizer;
use crate::components::dashboard::format_share;

/// Printable poster for the guests, built from the latest diagnostic.
pub struct Poster {
    diagnostic: Option<DiagnosticRecord>,
}

impl Component for Poster {
    type Message = DiagnosticRecord;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(normalizer().get_diagnostics_for_poster().await);
        });
        Self { diagnostic: None }
    }

    fn update(&mut self, _ctx: &Context<Self>, diagnostic: Self::Message) -> bool {
        self.diagnostic = Some(diagnostic);
        true
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let Some(diagnostic) = &self.diagnostic else {
            return html! {};
        };
        html! {
            <section class="poster">
                <h2>{ format!("Ce que vous mangez en {}", diagnostic.year) }</h2>
                <p>{ format!("{} de produits bio", format_share(diagnostic.bio_share())) }</p>
                <p>{ format!("{} de produits durables et de qualité", format_share(diagnostic.sustainable_share())) }</p>
            </section>
        }
    }
}
