#[macro_use]
extern crate log;

mod add_comment;
mod cast_vote;
mod follows;
mod groups;
mod posts;
mod users;

pub mod prelude {
    pub use super::{
        add_comment::*, cast_vote::*, follows::*, groups::*, posts::*, users::*,
    };
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::AppError>;

pub(crate) use yatube_core::{entities::*, usecases};

#[cfg(test)]
pub(crate) mod tests;

pub(crate) mod sqlite {
    pub use yatube_db_sqlite::Connections;
}
