//! QuickLayout Browser Shell
//!
//! Binds the page's editors, buttons and preview frame to a
//! [`quicklayout_core::PlaygroundSession`].

pub mod ids;
pub mod pending;

#[cfg(target_arch = "wasm32")]
mod capture_host;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod page;
#[cfg(target_arch = "wasm32")]
mod timer;
#[cfg(target_arch = "wasm32")]
mod toast;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::run_wasm;
