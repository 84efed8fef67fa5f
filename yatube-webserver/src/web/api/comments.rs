use std::collections::HashMap;

use super::*;

fn nest_replies(
    comment: &Comment,
    thread: &usecases::CommentThread,
    votes: &HashMap<Id, json::VoteResult>,
) -> json::Comment {
    let mut json_comment = json::Comment::from(comment.clone());
    json_comment.votes = votes.get(&comment.id).copied().unwrap_or_default();
    json_comment.replies = thread
        .children_of(&comment.id)
        .iter()
        .map(|reply| nest_replies(reply, thread, votes))
        .collect();
    json_comment
}

/// All comments of a post as a forest of root comments
/// with their nested replies.
#[get("/posts/<id>/comments")]
pub fn get_comments(db: sqlite::Connections, auth: Auth, id: &str) -> Result<Vec<json::Comment>> {
    let db = db.shared()?;
    let thread = usecases::list_thread(&db, id)?;
    let ids: Vec<_> = thread.iter().map(|c| c.id.as_str()).collect();
    let results = vote_results(&db, VoteTargetKind::Comment, &ids, auth.viewer())?;
    let votes: HashMap<_, _> = ids.into_iter().map(Id::from).zip(results).collect();
    Ok(Json(
        thread
            .roots
            .iter()
            .map(|root| nest_replies(root, &thread, &votes))
            .collect(),
    ))
}

#[post("/posts/<id>/comments", format = "application/json", data = "<comment>")]
pub fn post_comment(
    db: sqlite::Connections,
    auth: Auth,
    cache: &State<PostListCache>,
    id: &str,
    comment: JsonResult<json::NewComment>,
) -> CreatedResult<json::Comment> {
    let json::NewComment { text, parent } = comment?.into_inner();
    let new_comment = usecases::NewComment {
        post_id: id.into(),
        text,
        parent_id: parent.map(Id::from),
    };
    let comment = flows::add_comment(&db, auth.account_username()?, new_comment)?;
    // The number of comments is part of the listings
    cache.clear();
    let location = format!("/api/v1/posts/{id}/comments");
    Ok(Created::new(location).body(Json(comment.into())))
}
