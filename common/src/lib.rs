//! Platform-independent core of the FactureZen front-end: wire models,
//! request payloads, endpoint paths, the session model and the document
//! editor state machine. Nothing here touches the browser, so every rule
//! the UI relies on can be unit tested natively.

pub mod api;
pub mod config;
pub mod editor;
pub mod jobs;
pub mod listing;
pub mod model;
pub mod requests;
pub mod route;
pub mod session;
