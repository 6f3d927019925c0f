pub mod canteens;
pub mod dashboard;
pub mod diagnostic;
pub mod key_measures;
pub mod login;
pub mod poster;
pub mod sign_up;
pub mod toast;
