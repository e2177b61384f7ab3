//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (ChatProvider, QnaProvider, TextExtractor).

pub mod pdf;
pub mod qna;
pub mod telegram;
