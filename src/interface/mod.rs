//! # Interface Layer
//!
//! User-facing entry points: one handler per command, menu selection and free-text question.

pub mod commands;
