//! Settings service for the IPTVUSCA marketing site.
//!
//! Serves the singleton site settings document (banner, pricing, FAQs,
//! contact, popup, maintenance, theme) and the admin login used by the
//! admin page.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod util;
