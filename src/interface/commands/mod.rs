//! # Command Handlers
//!
//! Contains specific handler functions for each supported action (`/start`, `/help`,
//! menu selections, questions). These handlers are invoked by the Router.

pub mod help;
pub mod menu;
pub mod question;
pub mod start;
