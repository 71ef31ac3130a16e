//! HTTP front-end: upload form, prediction pages, stored uploads.

pub mod app;
pub mod config;
pub mod templates;
pub mod uploads;
