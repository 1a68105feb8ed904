//! # Commands Module
//!
//! Every action the shell can take on a [`Session`](crate::state::Session).
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Search, filter panel, product grid
//! └── cart.rs     ◄─── Cart drawer and checkout
//! ```
//!
//! Commands take the session they need (`&Session` or `&mut Session`) plus
//! already-parsed arguments, and return the text to show or an
//! [`AppError`](crate::error::AppError). Parsing lives in the shell.

pub mod cart;
pub mod catalog;
