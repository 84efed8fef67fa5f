// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use anyhow::anyhow;
use diesel::{
    self,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
};
use num_traits::{FromPrimitive as _, ToPrimitive as _};

use yatube_core::{
    entities::*,
    repositories::{self as repo, *},
};

use super::*;

mod comment;
mod follow;
mod group;
mod post;
mod tag;
mod user;
mod vote;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            repo::Error::AlreadyExists
        }
        _ => repo::Error::Other(err.into()),
    }
}

fn resolve_user_rowid(conn: &mut SqliteConnection, username: &str) -> Result<i64> {
    use schema::users::dsl;
    dsl::users
        .select(dsl::rowid)
        .filter(dsl::username.eq(username))
        .first::<i64>(conn)
        .map_err(from_diesel_err)
}

fn resolve_post_rowid(conn: &mut SqliteConnection, id: &str) -> Result<i64> {
    use schema::post::dsl;
    dsl::post
        .select(dsl::rowid)
        .filter(dsl::id.eq(id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)
}

fn resolve_comment_rowid(conn: &mut SqliteConnection, id: &str) -> Result<i64> {
    use schema::post_comment::dsl;
    dsl::post_comment
        .select(dsl::rowid)
        .filter(dsl::id.eq(id))
        .first::<i64>(conn)
        .map_err(from_diesel_err)
}

fn resolve_group_rowid(conn: &mut SqliteConnection, slug: &str) -> Result<i64> {
    use schema::post_group::dsl;
    dsl::post_group
        .select(dsl::rowid)
        .filter(dsl::slug.eq(slug))
        .first::<i64>(conn)
        .map_err(from_diesel_err)
}

fn resolve_tag_rowid(conn: &mut SqliteConnection, slug: &str) -> Result<i64> {
    use schema::tag::dsl;
    dsl::tag
        .select(dsl::rowid)
        .filter(dsl::slug.eq(slug))
        .first::<i64>(conn)
        .map_err(from_diesel_err)
}

// Unresolvable references are not an error when filtering
fn optional_rowid(res: Result<i64>) -> Result<Option<i64>> {
    match res {
        Ok(rowid) => Ok(Some(rowid)),
        Err(repo::Error::NotFound) => Ok(None),
        Err(err) => Err(err),
    }
}

fn vote_target_kind_to_primitive(kind: VoteTargetKind) -> i16 {
    kind.to_i16().unwrap_or_default()
}

fn vote_value_to_primitive(value: VoteValue) -> i16 {
    value.to_i16().unwrap_or_default()
}

fn load_vote_value(value: i16) -> Result<VoteValue> {
    VoteValue::from_i16(value).ok_or_else(|| anyhow!("Invalid vote value: {value}").into())
}

fn load_vote_target_kind(kind: i16) -> Result<VoteTargetKind> {
    VoteTargetKind::from_i16(kind).ok_or_else(|| anyhow!("Invalid vote target kind: {kind}").into())
}
