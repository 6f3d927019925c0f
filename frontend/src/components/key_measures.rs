use common::key_measures::{find_key_measure, KeyMeasure, KEY_MEASURES};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct KeyMeasuresProps {
    /// Measure to show; the whole list when absent.
    #[prop_or_default]
    pub selected: Option<&'static str>,
    pub on_select: Callback<Option<&'static str>>,
}

/// The EGAlim key measures, as a list or one measure with its sub-measures.
pub struct KeyMeasures;

impl Component for KeyMeasures {
    type Message = ();
    type Properties = KeyMeasuresProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        match props.selected.and_then(find_key_measure) {
            Some(measure) => measure_detail(measure, &props.on_select),
            None => html! {
                <section class="key-measures">
                    <h2>{"Les mesures phares de la loi EGAlim"}</h2>
                    <ul>
                        { for KEY_MEASURES.iter().map(|measure| {
                            let id = measure.id;
                            let onclick = props.on_select.reform(move |_| Some(id));
                            html! {
                                <li key={id}>
                                    <button class="link" {onclick}>{ measure.title }</button>
                                </li>
                            }
                        }) }
                    </ul>
                </section>
            },
        }
    }
}

fn measure_detail(
    measure: &'static KeyMeasure,
    on_select: &Callback<Option<&'static str>>,
) -> Html {
    html! {
        <section class="key-measure" id={measure.id}>
            <button class="link" onclick={on_select.reform(|_| None)}>{"Toutes les mesures"}</button>
            <h2>{ measure.title }</h2>
            <ol>
                { for measure.sub_measures.iter().map(|sub| html! {
                    <li key={sub.id} id={sub.id}>{ sub.title }</li>
                }) }
            </ol>
        </section>
    }
}
