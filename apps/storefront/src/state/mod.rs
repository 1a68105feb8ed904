//! # State Module
//!
//! Everything the storefront app holds between shell commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         Session                                 │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────────────────────┐  ┌─────────────────────────┐ │   │
//! │  │  │ Storefront<NotificationQueue>│  │      StoreConfig        │ │   │
//! │  │  │                              │  │                         │ │   │
//! │  │  │  catalog, query, criteria,   │  │  store_name             │ │   │
//! │  │  │  cart, pending toasts        │  │  currency_symbol        │ │   │
//! │  │  │                              │  │  free shipping, catalog │ │   │
//! │  │  └──────────────────────────────┘  └─────────────────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  OWNERSHIP:                                                            │
//! │  • Session: owned by the shell loop, borrowed `&mut` by each command   │
//! │  • StoreConfig: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{default_config_path, StoreConfig};
pub use session::Session;
