use super::*;

// Only registered users may create groups and tags
fn authorize(db: &sqlite::Connections, auth: &Auth) -> result::Result<User, ApiError> {
    let username = auth.account_username()?;
    Ok(usecases::authorize_user(&db.shared()?, username)?)
}

#[get("/groups?<ordering>")]
pub fn get_groups(db: sqlite::Connections, ordering: Option<&str>) -> Result<Vec<json::Group>> {
    let ordering = ordering
        .map(str::parse::<usecases::GroupOrdering>)
        .transpose()?
        .unwrap_or_default();
    let groups = usecases::all_groups(&db.shared()?, ordering)?;
    Ok(Json(groups.into_iter().map(Into::into).collect()))
}

#[post("/groups", format = "application/json", data = "<group>")]
pub fn post_group(
    db: sqlite::Connections,
    auth: Auth,
    group: JsonResult<json::NewGroup>,
) -> CreatedResult<json::Group> {
    let json::NewGroup {
        title,
        slug,
        description,
    } = group?.into_inner();
    let user = authorize(&db, &auth)?;
    let group = flows::create_group(
        &db,
        usecases::NewGroup {
            title,
            slug,
            description,
        },
    )?;
    debug!("Group {} created by {}", group.slug, user.username);
    let location = format!("/api/v1/groups/{}", group.slug);
    Ok(Created::new(location).body(Json(group.into())))
}

#[get("/tags")]
pub fn get_tags(db: sqlite::Connections) -> Result<Vec<json::Tag>> {
    let tags = usecases::all_tags(&db.shared()?)?;
    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

#[post("/tags", format = "application/json", data = "<tag>")]
pub fn post_tag(
    db: sqlite::Connections,
    auth: Auth,
    tag: JsonResult<json::NewTag>,
) -> CreatedResult<json::Tag> {
    let json::NewTag { title, slug } = tag?.into_inner();
    authorize(&db, &auth)?;
    let tag = flows::create_tag(&db, usecases::NewTag { title, slug })?;
    let location = format!("/api/v1/tags/{}", tag.slug);
    Ok(Created::new(location).body(Json(tag.into())))
}
