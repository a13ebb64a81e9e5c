//! Terminal front-end over [`crate::session::Session`].

pub mod app;
pub mod controller;
pub mod ui;
