//! # Application Layer
//!
//! Contains the core behaviour of the bot: the document store, the answer engine,
//! the deferred responder and the conversation router.

pub mod answer;
pub mod document;
pub mod responder;
pub mod router;

#[cfg(test)]
pub mod testing;
