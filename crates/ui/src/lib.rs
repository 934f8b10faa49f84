#![deny(unsafe_code)]

//! Desktop front end for the Clinical ChatBot.
//!
//! The window is a navbar, a collapsible side panel and a chat view. Sending a message
//! posts the prior transcript to the query service and appends the bot's reply.
pub mod app;
/// Chat view, transcript list, input box and side panel.
pub mod chat;
