//! View rendering for the diagnostic form.
//!
//! One section per key measure, in the order of `KEY_MEASURES`, for the year
//! selected in the tab bar. Each input dispatches a `Msg::Edit`.

use common::key_measures::find_key_measure;
use common::model::diagnostic::DiagnosticRecord;
use common::model::legacy::{
    DiversificationMeasures, InformationMeasures, MeasureCategory, PlasticMeasures,
    QualityMeasures, WasteMeasures,
};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use super::helpers::{
    amount, flag, AmountField, FieldEdit, FlagField, COMMUNICATION_SUPPORTS,
    VEGETARIAN_FREQUENCIES, VEGETARIAN_MENU_TYPES, WASTE_ACTIONS,
};
use super::messages::Msg;
use super::state::DiagnosticForm;

pub fn view(component: &DiagnosticForm, ctx: &Context<DiagnosticForm>) -> Html {
    let link = ctx.link();

    let Some(record) = component.active_record() else {
        return html! { <p class="loading">{"Chargement du diagnostic…"}</p> };
    };

    html! {
        <div class="diagnostic-form">
            { build_year_tabs(component, link) }
            { section(QualityMeasures::KEY, quality_fields(record, link)) }
            { section(WasteMeasures::KEY, waste_fields(record, link)) }
            { section(DiversificationMeasures::KEY, diversification_fields(record, link)) }
            { section(PlasticMeasures::KEY, plastic_fields(record, link)) }
            { section(InformationMeasures::KEY, information_fields(record, link)) }
            { build_actions(component, link) }
        </div>
    }
}

fn build_year_tabs(component: &DiagnosticForm, link: &Scope<DiagnosticForm>) -> Html {
    let dirty = component.is_dirty();
    html! {
        <div class="tab-bar">
            { for component.years().into_iter().map(|year| {
                let active = component.active_year == Some(year);
                html! {
                    <button
                        class={classes!("tab-btn", active.then_some("active"))}
                        onclick={link.callback(move |_| Msg::SelectYear(year))}
                    >
                        { year.to_string() }
                    </button>
                }
            }) }
            if dirty {
                <span class="dirty-dot" title="Modifications non enregistrées" />
            }
        </div>
    }
}

fn section(measure_id: &str, body: Html) -> Html {
    let title = find_key_measure(measure_id)
        .map(|measure| measure.title)
        .unwrap_or(measure_id);
    html! {
        <fieldset class="measure" id={measure_id.to_string()}>
            <legend>{ title }</legend>
            { body }
        </fieldset>
    }
}

fn quality_fields(record: &DiagnosticRecord, link: &Scope<DiagnosticForm>) -> Html {
    html! {
        <>
            { amount_input("Valeur totale des achats alimentaires (HT)", record, AmountField::Total, link) }
            { amount_input("Dont produits bio (HT)", record, AmountField::Bio, link) }
            { amount_input("Dont produits de qualité et durables, hors bio (HT)", record, AmountField::Sustainable, link) }
            { amount_input("Dont produits issus du commerce équitable (HT)", record, AmountField::FairTrade, link) }
        </>
    }
}

fn waste_fields(record: &DiagnosticRecord, link: &Scope<DiagnosticForm>) -> Html {
    html! {
        <>
            { flag_input("J'ai réalisé un diagnostic sur les causes du gaspillage alimentaire", record, FlagField::WasteDiagnostic, link) }
            { flag_input("J'ai mis en place un plan d'action de lutte contre le gaspillage", record, FlagField::WastePlan, link) }
            <p>{"Actions mises en place :"}</p>
            { for WASTE_ACTIONS.iter().map(|(code, label)| {
                let checked = record.waste_actions.contains(*code);
                let code = code.to_string();
                html! {
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            checked={checked}
                            onchange={link.callback(move |e: Event| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                Msg::Edit(FieldEdit::WasteAction(code.clone(), input.checked()))
                            })}
                        />
                        { *label }
                    </label>
                }
            }) }
            { flag_input("J'ai proposé une convention de dons à une association", record, FlagField::DonationAgreement, link) }
        </>
    }
}

fn diversification_fields(record: &DiagnosticRecord, link: &Scope<DiagnosticForm>) -> Html {
    html! {
        <>
            { flag_input("J'ai mis en place un plan pluriannuel de diversification des protéines", record, FlagField::DiversificationPlan, link) }
            { select_input(
                "Fréquence du menu végétarien",
                &VEGETARIAN_FREQUENCIES,
                record.vegetarian_frequency.as_deref(),
                link.callback(|value| Msg::Edit(FieldEdit::VegetarianFrequency(value))),
            ) }
            { select_input(
                "Type de menu végétarien",
                &VEGETARIAN_MENU_TYPES,
                record.vegetarian_menu_type.as_deref(),
                link.callback(|value| Msg::Edit(FieldEdit::VegetarianMenuType(value))),
            ) }
        </>
    }
}

fn plastic_fields(record: &DiagnosticRecord, link: &Scope<DiagnosticForm>) -> Html {
    html! {
        <>
            { flag_input("Contenants alimentaires de cuisson", record, FlagField::CookingFoodContainers, link) }
            { flag_input("Contenants alimentaires de service", record, FlagField::ServiceFoodContainers, link) }
            { flag_input("Bouteilles d'eau plate", record, FlagField::WaterBottles, link) }
            { flag_input("Ustensiles à usage unique", record, FlagField::DisposableUtensils, link) }
        </>
    }
}

fn information_fields(record: &DiagnosticRecord, link: &Scope<DiagnosticForm>) -> Html {
    let support_link = record.communication_support_link.clone().unwrap_or_default();
    html! {
        <>
            <p>{"Supports de communication utilisés :"}</p>
            { for COMMUNICATION_SUPPORTS.iter().map(|(code, label)| {
                let checked = record.communication_supports.contains(*code);
                let code = code.to_string();
                html! {
                    <label class="checkbox">
                        <input
                            type="checkbox"
                            checked={checked}
                            onchange={link.callback(move |e: Event| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                Msg::Edit(FieldEdit::CommunicationSupport(code.clone(), input.checked()))
                            })}
                        />
                        { *label }
                    </label>
                }
            }) }
            <label class="text">
                {"Lien vers le support de communication"}
                <input
                    type="url"
                    value={support_link}
                    onchange={link.callback(|e: Event| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::Edit(FieldEdit::CommunicationSupportLink(input.value()))
                    })}
                />
            </label>
            { flag_input("J'informe les convives sur le plan alimentaire pluriannuel", record, FlagField::CommunicateOnFoodPlan, link) }
        </>
    }
}

fn build_actions(component: &DiagnosticForm, link: &Scope<DiagnosticForm>) -> Html {
    html! {
        <div class="form-actions">
            <button
                class="primary"
                disabled={component.saving}
                onclick={link.callback(|_| Msg::Save)}
            >
                { if component.saving { "Enregistrement…" } else { "Enregistrer" } }
            </button>
            <button class="secondary" onclick={link.callback(|_| Msg::DiscardLocal)}>
                {"Effacer les données de cet appareil"}
            </button>
        </div>
    }
}

fn amount_input(
    label: &str,
    record: &DiagnosticRecord,
    field: AmountField,
    link: &Scope<DiagnosticForm>,
) -> Html {
    let value = amount(record, field).map(|v| v.to_string()).unwrap_or_default();
    html! {
        <label class="amount">
            { label.to_string() }
            <input
                type="text"
                inputmode="decimal"
                value={value}
                onchange={link.callback(move |e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::Edit(FieldEdit::Amount(field, input.value()))
                })}
            />
            <span class="unit">{"€"}</span>
        </label>
    }
}

fn flag_input(
    label: &str,
    record: &DiagnosticRecord,
    field: FlagField,
    link: &Scope<DiagnosticForm>,
) -> Html {
    html! {
        <label class="checkbox">
            <input
                type="checkbox"
                checked={flag(record, field)}
                onchange={link.callback(move |e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::Edit(FieldEdit::Flag(field, input.checked()))
                })}
            />
            { label.to_string() }
        </label>
    }
}

fn select_input(
    label: &str,
    options: &[(&str, &str)],
    selected: Option<&str>,
    onchange: Callback<String>,
) -> Html {
    let selected = selected.unwrap_or("");
    html! {
        <label class="select">
            { label.to_string() }
            <select onchange={Callback::from(move |e: Event| {
                let select: HtmlSelectElement = e.target_unchecked_into();
                onchange.emit(select.value());
            })}>
                { for options.iter().map(|(code, text)| html! {
                    <option value={code.to_string()} selected={*code == selected}>{ *text }</option>
                }) }
            </select>
        </label>
    }
}
