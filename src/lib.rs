//! Course Library application library.
//!
//! Wires the kernel, the in-memory store and the `authors` module into a
//! runnable HTTP service.

pub mod app;
pub mod modules;
pub mod utils;
