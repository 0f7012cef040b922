//! imgvoice API Library
//!
//! HTTP front end of the image-to-voice pipeline: the upload form, the upload and
//! processing handlers, middleware and application setup.

mod handlers;
mod middleware;
mod telemetry;
mod utils;

pub mod error;
pub mod services;
pub mod setup;
pub mod state;
pub mod views;

pub use error::{ErrorResponse, HttpAppError};
