//! This crate contains all shared UI for the workspace.
//!
//! Screens take navigation callbacks as props so the platform shell owns the
//! routes; data comes from the [`Services`] context.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::*;
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

mod auth;
pub use auth::{refresh_user, use_auth, AuthProvider, AuthState};

mod avatar;
pub use avatar::{image_content_type, read_avatar};

mod hooks;
pub use hooks::use_cancellation;

pub mod links;
pub use links::open_link;

mod services;
pub use services::{token_cache_path, use_services, Services};

pub mod text;

mod tab_bar;
pub use tab_bar::{Tab, TabBar};

pub mod views;
