//#![deny(missing_docs)] // TODO: Complete missing documentation and enable this option
#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]

//! # yatube-entities
//!
//! Reusable, agnostic domain entities for Yatube.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod comment;
pub mod follow;
pub mod group;
pub mod id;
pub mod password;
pub mod post;
pub mod tag;
pub mod time;
pub mod user;
pub mod vote;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
