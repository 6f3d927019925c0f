//! Update function for the diagnostic form.
//!
//! Edits only touch the record of the active year. `Save` hands the whole
//! pair to the normalizer, which posts it for signed-in users and keeps it in
//! browser storage otherwise; toasts tell the user which one happened.

use yew::platform::spawn_local;
use yew::prelude::*;

use common::diagnostics::SaveOutcome;

use crate::adapters::normalizer;

use super::helpers::{apply_edit, set_window_dirty_flag, show_toast};
use super::messages::Msg;
use super::state::DiagnosticForm;

pub fn update(component: &mut DiagnosticForm, ctx: &Context<DiagnosticForm>, msg: Msg) -> bool {
    match msg {
        Msg::Loaded(pair) => {
            component.active_year = Some(pair.latest.year);
            component.pair = Some(pair);
            component.original_md5 = component.current_md5();
            set_window_dirty_flag(false);
            true
        }
        Msg::SelectYear(year) => {
            component.active_year = Some(year);
            true
        }
        Msg::Edit(edit) => {
            let Some(record) = component.active_record_mut() else {
                return false;
            };
            apply_edit(record, edit);
            set_window_dirty_flag(component.is_dirty());
            true
        }
        Msg::Save => {
            if component.saving {
                return false;
            }
            let Some(pair) = component.pair.clone() else {
                return false;
            };
            component.saving = true;
            let link = ctx.link().clone();
            spawn_local(async move {
                match normalizer().save_diagnostics(pair).await {
                    Ok(outcome) => link.send_message(Msg::SaveSucceeded(outcome)),
                    Err(err) => link.send_message(Msg::SaveFailed(err.to_string())),
                }
            });
            true
        }
        Msg::SaveSucceeded(outcome) => {
            component.saving = false;
            component.original_md5 = component.current_md5();
            set_window_dirty_flag(false);
            match outcome {
                SaveOutcome::Remote => show_toast("Votre diagnostic a bien été enregistré."),
                SaveOutcome::Local => show_toast(
                    "Diagnostic sauvegardé sur cet appareil. Connectez-vous pour l'enregistrer en ligne.",
                ),
            }
            ctx.props().on_saved.emit(outcome);
            true
        }
        Msg::SaveFailed(reason) => {
            component.saving = false;
            log::error!("saving diagnostics failed: {reason}");
            show_toast("Erreur lors de l'enregistrement du diagnostic.");
            true
        }
        Msg::DiscardLocal => {
            let diagnostics = normalizer();
            diagnostics.delete_local_diagnostics();
            let link = ctx.link().clone();
            spawn_local(async move {
                let pair = diagnostics.get_diagnostics_for_diagnostic_form().await;
                link.send_message(Msg::Loaded(pair));
            });
            show_toast("Les données enregistrées sur cet appareil ont été supprimées.");
            false
        }
    }
}
