//! Budget calculations, validation rules, and tracker services.

pub mod services;
pub mod utils;
pub mod validation;
