pub mod canteen;
pub mod diagnostic;
pub mod history;
pub mod legacy;
mod lenient;
pub mod stored;
