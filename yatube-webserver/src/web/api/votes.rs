use rocket::response::status::Custom;

use super::*;

type VoteResponse = result::Result<Custom<Json<json::VoteResult>>, ApiError>;

fn cast_vote(
    db: &sqlite::Connections,
    auth: &Auth,
    cache: &PostListCache,
    target: VoteTarget,
    value: VoteValue,
) -> VoteResponse {
    let summary = flows::cast_vote(db, auth.account_username()?, &target, value)?;
    // Ratings determine the order of listings
    cache.clear();
    let status = match summary.outcome {
        VoteOutcome::Created => Status::Created,
        VoteOutcome::Changed | VoteOutcome::Removed => Status::Ok,
    };
    Ok(Custom(status, Json(summary.into())))
}

fn comment_of_post(
    db: &sqlite::Connections,
    post_id: &str,
    comment_id: &str,
) -> result::Result<VoteTarget, ApiError> {
    let comment = db.shared()?.load_comment(comment_id)?;
    if comment.post_id.as_str() != post_id {
        return Err(RepoError::NotFound.into());
    }
    Ok(VoteTarget::comment(comment.id))
}

#[post("/votes", format = "application/json", data = "<vote>")]
pub fn post_vote(
    db: sqlite::Connections,
    auth: Auth,
    cache: &State<PostListCache>,
    vote: JsonResult<json::NewVote>,
) -> VoteResponse {
    let json::NewVote {
        target_kind,
        target_id,
        value,
    } = vote?.into_inner();
    let target = usecases::parse_vote_target(&target_kind, &target_id)?;
    let value = usecases::parse_vote_value(&value)?;
    cast_vote(&db, &auth, cache, target, value)
}

#[post("/posts/<id>/like")]
pub fn post_post_like(
    db: sqlite::Connections,
    auth: Auth,
    cache: &State<PostListCache>,
    id: &str,
) -> VoteResponse {
    cast_vote(&db, &auth, cache, VoteTarget::post(id), VoteValue::Like)
}

#[post("/posts/<id>/dislike")]
pub fn post_post_dislike(
    db: sqlite::Connections,
    auth: Auth,
    cache: &State<PostListCache>,
    id: &str,
) -> VoteResponse {
    cast_vote(&db, &auth, cache, VoteTarget::post(id), VoteValue::Dislike)
}

#[post("/posts/<id>/comments/<comment_id>/like")]
pub fn post_comment_like(
    db: sqlite::Connections,
    auth: Auth,
    cache: &State<PostListCache>,
    id: &str,
    comment_id: &str,
) -> VoteResponse {
    let target = comment_of_post(&db, id, comment_id)?;
    cast_vote(&db, &auth, cache, target, VoteValue::Like)
}

#[post("/posts/<id>/comments/<comment_id>/dislike")]
pub fn post_comment_dislike(
    db: sqlite::Connections,
    auth: Auth,
    cache: &State<PostListCache>,
    id: &str,
    comment_id: &str,
) -> VoteResponse {
    let target = comment_of_post(&db, id, comment_id)?;
    cast_vote(&db, &auth, cache, target, VoteValue::Dislike)
}
