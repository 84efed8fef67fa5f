use super::*;

// Unknown sort keys fall back to the default order
fn post_order(sort: Option<&str>) -> PostOrder {
    match sort {
        Some("comments") => PostOrder::Comments,
        Some("likes") => PostOrder::Likes,
        _ => PostOrder::PubDate,
    }
}

fn new_post(from: json::NewPost) -> usecases::NewPost {
    let json::NewPost { text, group, tags } = from;
    usecases::NewPost { text, group, tags }
}

fn json_post<R>(db: &R, post: Post, viewer: Option<&str>) -> result::Result<json::Post, ApiError>
where
    R: CommentRepository + VoteRepo,
{
    let target = VoteTarget::post(post.id.clone());
    let comment_count = db.count_comments_of_post(post.id.as_str())?;
    let votes = db.count_votes(&target)?;
    let viewer_vote = usecases::annotate_viewer_state(db, &[target], viewer)?
        .pop()
        .unwrap_or_default();
    let post = PostWithStats {
        post,
        comment_count,
        votes,
    };
    Ok((post, viewer_vote).into())
}

#[allow(clippy::too_many_arguments)]
#[get("/posts?<group>&<tag>&<author>&<search>&<sort>&<page>")]
pub fn get_posts(
    db: sqlite::Connections,
    auth: Auth,
    cache: &State<PostListCache>,
    group: Option<String>,
    tag: Option<String>,
    author: Option<String>,
    search: Option<String>,
    sort: Option<String>,
    page: Option<u64>,
) -> Result<json::PostPage> {
    let query = PostQuery {
        group,
        tag,
        author,
        text: search.filter(|s| !s.trim().is_empty()),
        followed_by: None,
        order: post_order(sort.as_deref()),
    };
    let page = cache.query_posts(&db, &query, page.unwrap_or(1))?;
    Ok(Json(json_post_page(&db.shared()?, page, auth.viewer())?))
}

#[get("/posts/follow?<page>")]
pub fn get_posts_of_followed_authors(
    db: sqlite::Connections,
    auth: Auth,
    page: Option<u64>,
) -> Result<json::PostPage> {
    let username = auth.account_username()?;
    let query = PostQuery {
        followed_by: Some(username.to_owned()),
        ..Default::default()
    };
    let db = db.shared()?;
    let page = usecases::query_posts(&db, &query, page.unwrap_or(1))?;
    Ok(Json(json_post_page(&db, page, Some(username))?))
}

#[post("/posts", format = "application/json", data = "<post>")]
pub fn post_post(
    db: sqlite::Connections,
    auth: Auth,
    cache: &State<PostListCache>,
    post: JsonResult<json::NewPost>,
) -> CreatedResult<json::Post> {
    let new_post = new_post(post?.into_inner());
    let post = flows::create_post(&db, auth.account_username()?, new_post)?;
    cache.clear();
    let location = format!("/api/v1/posts/{}", post.id);
    Ok(Created::new(location).body(Json(post.into())))
}

#[get("/posts/<id>", rank = 2)]
pub fn get_post(db: sqlite::Connections, auth: Auth, id: &str) -> Result<json::Post> {
    let db = db.shared()?;
    let post = usecases::get_post(&db, id)?;
    Ok(Json(json_post(&db, post, auth.viewer())?))
}

#[put("/posts/<id>", format = "application/json", data = "<post>")]
pub fn put_post(
    db: sqlite::Connections,
    auth: Auth,
    cache: &State<PostListCache>,
    id: &str,
    post: JsonResult<json::NewPost>,
) -> Result<json::Post> {
    let new_post = new_post(post?.into_inner());
    let username = auth.account_username()?;
    let post = flows::update_post(&db, username, id, new_post)?;
    cache.clear();
    Ok(Json(json_post(&db.shared()?, post, Some(username))?))
}

#[delete("/posts/<id>")]
pub fn delete_post(
    db: sqlite::Connections,
    auth: Auth,
    cache: &State<PostListCache>,
    id: &str,
) -> StatusResult {
    flows::delete_post(&db, auth.account_username()?, id)?;
    cache.clear();
    Ok(Status::NoContent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sort_keys() {
        assert_eq!(PostOrder::PubDate, post_order(None));
        assert_eq!(PostOrder::PubDate, post_order(Some("pub_date")));
        assert_eq!(PostOrder::Comments, post_order(Some("comments")));
        assert_eq!(PostOrder::Likes, post_order(Some("likes")));
        assert_eq!(PostOrder::PubDate, post_order(Some("rating")));
    }
}
