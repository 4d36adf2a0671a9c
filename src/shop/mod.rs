//! Storefront module: the Leptos CSR application (behind the `csr`
//! feature) plus the pieces of it that are plain data and compile
//! everywhere (OAuth handoff schema, state DTOs).

pub mod apiclient;
#[cfg(feature = "csr")]
pub mod components;
pub mod oauth;
pub mod state;
#[cfg(feature = "csr")]
pub mod theme;
