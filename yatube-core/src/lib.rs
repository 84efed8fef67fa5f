//! # yatube-core
//!
//! Business rules of Yatube: repository abstractions and use cases
//! that are independent of any storage or transport technology.

pub mod entities {
    pub use yatube_entities::{
        comment::*, follow::*, group::*, id::*, password::*, post::*, tag::*, time::*, user::*,
        vote::*,
    };
}

pub mod db;
pub mod repositories;
pub mod text;
pub mod usecases;
pub mod util;
