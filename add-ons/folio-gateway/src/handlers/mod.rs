//! Route handlers for the browser-facing API.

pub(crate) mod chat;
pub(crate) mod contact;
