pub mod config;
pub mod controller;
pub mod error;
pub mod image_service;
pub mod params;
pub mod sessions;
pub mod web_pages;

pub use controller::{FormState, GenerationController, MAX_ATTEMPTS, SubmitOutcome};
pub use error::{ConfigError, RequestFailure};
pub use image_service::{HttpImageGenerator, ImageGenerator};
pub use params::{FormField, GenerationParams};
pub use sessions::SessionRegistry;
