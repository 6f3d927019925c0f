pub mod diagnostics;
pub mod key_measures;
pub mod model;
pub mod requests;
