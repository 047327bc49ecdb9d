pub mod accountant;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod documents;
pub mod layout;
pub mod settings;
pub mod templates;
