//! Walking tour planner server.
//!
//! A web application that answers: "I'm standing here and feel like this,
//! which nearby places should I walk to, and in what order?"

pub mod config;
pub mod domain;
pub mod oracle;
pub mod places;
pub mod planner;
pub mod session;
pub mod web;
