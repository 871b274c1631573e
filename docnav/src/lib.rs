//! docnav - sidebar navigation for generated API documentation pages
//!
//! A [`NavigationController`] owns the navigable elements of one page and the
//! current class/member selection. It styles the sidebar and description
//! panels on selection and steps through members on Page Up / Page Down.
//! Pages are read from the generated HTML ([`page`]) or from a TOML outline
//! of the documented API ([`outline`]).

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::enum_variant_names)]

pub mod check;
pub mod controller;
pub mod document;
pub mod keys;
pub mod node_id;
pub mod outline;
pub mod page;
pub mod style;

pub use controller::{NavigationController, NavigationSnapshot};
pub use document::{Category, Document, Element};
pub use keys::Key;
pub use node_id::{MemberId, NodeId};
