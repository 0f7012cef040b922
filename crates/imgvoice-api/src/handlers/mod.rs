pub mod form;
pub mod health;
pub mod process;
pub mod upload;
