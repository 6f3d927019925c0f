//! Form for the latest and previous year's diagnostics.
//!
//! Both records come from the normalizer when the form is first rendered, so a
//! signed-out visitor edits what this device holds, or blank records for the
//! default years. Saving goes back through the normalizer, which picks the API
//! or browser storage.

use yew::platform::spawn_local;
use yew::prelude::*;

use crate::adapters::normalizer;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::DiagnosticFormProps;
pub use state::DiagnosticForm;

impl Component for DiagnosticForm {
    type Message = Msg;
    type Properties = DiagnosticFormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        DiagnosticForm::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                let pair = normalizer().get_diagnostics_for_diagnostic_form().await;
                link.send_message(Msg::Loaded(pair));
            });
        }
    }
}
