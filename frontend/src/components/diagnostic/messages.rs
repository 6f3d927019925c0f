use super::helpers::FieldEdit;
use common::diagnostics::SaveOutcome;
use common::model::history::DiagnosticPair;

pub enum Msg {
    Loaded(DiagnosticPair),
    SelectYear(i32),
    Edit(FieldEdit),
    Save,
    SaveSucceeded(SaveOutcome),
    SaveFailed(String),
    DiscardLocal,
}
