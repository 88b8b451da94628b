//! Shared model and core logic for Travel Saver.
//!
//! Both the wasm frontend and the actix backend depend on this crate, so it
//! stays free of any browser or server dependency: transports and storage
//! backends are injected through the [`extraction::Transport`] and
//! [`store::KeyValueStorage`] traits.

pub mod extraction;
pub mod model;
pub mod requests;
pub mod store;
