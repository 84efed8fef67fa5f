use super::*;

#[get("/follow")]
pub fn get_follows(db: sqlite::Connections, auth: Auth) -> Result<Vec<json::Follow>> {
    let follows = usecases::follows_of(&db.shared()?, auth.account_username()?)?;
    Ok(Json(follows.into_iter().map(Into::into).collect()))
}

#[post("/follow", format = "application/json", data = "<follow>")]
pub fn post_follow(
    db: sqlite::Connections,
    auth: Auth,
    follow: JsonResult<json::NewFollow>,
) -> CreatedResult<json::Follow> {
    let json::NewFollow { author } = follow?.into_inner();
    let follow = flows::follow(&db, auth.account_username()?, &author)?;
    let location = format!("/api/v1/follow/{}", follow.author);
    Ok(Created::new(location).body(Json(follow.into())))
}

#[delete("/follow/<author>")]
pub fn delete_follow(db: sqlite::Connections, auth: Auth, author: &str) -> StatusResult {
    flows::unfollow(&db, auth.account_username()?, author)?;
    Ok(Status::NoContent)
}
