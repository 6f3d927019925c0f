use common::diagnostics::SaveOutcome;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DiagnosticFormProps {
    /// Called after every successful save, with where the data went.
    #[prop_or_default]
    pub on_saved: Callback<SaveOutcome>,
}
