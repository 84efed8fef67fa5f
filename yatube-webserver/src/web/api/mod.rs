use std::{fmt::Display, result};

use rocket::serde::json::{Error as JsonError, Json};
use rocket::{
    self, delete, get,
    http::Status,
    patch, post, put,
    response::{self, status::Created, Responder},
    routes, Route, State,
};
use yatube_boundary::{self as json, Error as JsonErrorResponse};

use super::guards::*;
use crate::web::{jwt, post_list_cache::PostListCache, sqlite};
use yatube_application::prelude as flows;
use yatube_core::{entities::*, repositories::*, usecases};

mod comments;
mod error;
mod follows;
mod groups;
mod posts;
mod users;
mod votes;

pub use self::error::Error as ApiError;
use self::error::RepoError;


type Result<T> = result::Result<Json<T>, ApiError>;
type CreatedResult<T> = result::Result<Created<Json<T>>, ApiError>;
type JsonResult<'a, T> = result::Result<Json<T>, JsonError<'a>>;
type StatusResult = result::Result<Status, ApiError>;

pub fn routes() -> Vec<Route> {
    routes![
        // ---   users   --- //
        users::post_user,
        users::post_login,
        users::post_logout,
        users::get_current_user,
        users::patch_current_user,
        users::patch_current_user_password,
        // ---   posts   --- //
        posts::get_posts,
        posts::get_posts_of_followed_authors,
        posts::post_post,
        posts::get_post,
        posts::put_post,
        posts::delete_post,
        // ---   comments   --- //
        comments::get_comments,
        comments::post_comment,
        // ---   votes   --- //
        votes::post_vote,
        votes::post_post_like,
        votes::post_post_dislike,
        votes::post_comment_like,
        votes::post_comment_dislike,
        // ---   groups and tags   --- //
        groups::get_groups,
        groups::post_group,
        groups::get_tags,
        groups::post_tag,
        // ---   follows   --- //
        follows::get_follows,
        follows::post_follow,
        follows::delete_follow,
    ]
}

fn json_error_response<'r, 'o: 'r, E: Display>(
    req: &'r rocket::Request<'_>,
    err: &E,
    status: Status,
) -> response::Result<'o> {
    let boundary_error = JsonErrorResponse {
        http_status: status.code,
        message: err.to_string(),
    };
    Json(boundary_error).respond_to(req).map(|mut res| {
        res.set_status(status);
        res
    })
}

/// Aggregated votes and the flags of the viewer for
/// targets of the same kind, in the order of the given ids.
fn vote_results<R: VoteRepo>(
    db: &R,
    kind: VoteTargetKind,
    ids: &[&str],
    viewer: Option<&str>,
) -> result::Result<Vec<json::VoteResult>, ApiError> {
    let counts = usecases::count_votes_of_targets(db, kind, ids)?;
    let targets: Vec<_> = ids
        .iter()
        .map(|id| VoteTarget {
            kind,
            id: Id::from(*id),
        })
        .collect();
    let flags = usecases::annotate_viewer_state(db, &targets, viewer)?;
    Ok(counts
        .into_iter()
        .zip(flags)
        .map(json::VoteResult::from)
        .collect())
}

fn json_post_page<R: VoteRepo>(
    db: &R,
    page: usecases::PostPage,
    viewer: Option<&str>,
) -> result::Result<json::PostPage, ApiError> {
    let page_count = page.page_count();
    let next = page.has_next().then_some(page.page + 1);
    let previous = (page.page > 1).then(|| page.page - 1);
    let usecases::PostPage {
        posts,
        total_count,
        page,
    } = page;
    let targets: Vec<_> = posts
        .iter()
        .map(|p| VoteTarget::post(p.post.id.clone()))
        .collect();
    let flags = usecases::annotate_viewer_state(db, &targets, viewer)?;
    let results = posts
        .into_iter()
        .zip(flags)
        .map(json::Post::from)
        .collect();
    Ok(json::PostPage {
        count: total_count,
        page,
        page_count,
        next,
        previous,
        results,
    })
}
