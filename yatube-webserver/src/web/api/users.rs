use super::*;

#[post("/users", format = "application/json", data = "<new_user>")]
pub fn post_user(
    db: sqlite::Connections,
    new_user: JsonResult<json::NewUser>,
) -> CreatedResult<json::User> {
    let json::NewUser {
        username,
        email,
        password,
    } = new_user?.into_inner();
    let new_user = usecases::NewUser {
        username,
        email,
        password,
    };
    let user = flows::register_user(&db, new_user)?;
    let location = format!("/api/v1/users/{}", user.username);
    Ok(Created::new(location).body(Json(user.into())))
}

#[post("/login", format = "application/json", data = "<login>")]
pub fn post_login(
    db: sqlite::Connections,
    login: JsonResult<json::Credentials>,
    jwt_state: &State<jwt::JwtState>,
) -> Result<json::JwtToken> {
    let login = login?.into_inner();
    let user = {
        let credentials = usecases::Credentials {
            login: &login.login,
            password: &login.password,
        };
        usecases::login(&db.shared()?, &credentials).map_err(|err| {
            debug!("Login of '{}' failed: {err}", login.login);
            err
        })?
    };
    let token = jwt_state.generate_token(&user.username)?;
    Ok(Json(json::JwtToken { token }))
}

#[post("/logout")]
pub fn post_logout(auth: Auth, jwt_state: &State<jwt::JwtState>) -> Json<()> {
    for bearer in auth.bearer_tokens() {
        jwt_state.blacklist_token(bearer.to_owned());
    }
    Json(())
}

#[get("/users/current")]
pub fn get_current_user(db: sqlite::Connections, auth: Auth) -> Result<json::User> {
    let username = auth.account_username()?;
    let user = usecases::get_user(&db.shared()?, username, username)?;
    Ok(Json(user.into()))
}

#[patch("/users/current", format = "application/json", data = "<profile>")]
pub fn patch_current_user(
    db: sqlite::Connections,
    auth: Auth,
    profile: JsonResult<json::ProfileUpdate>,
) -> Result<json::User> {
    let json::ProfileUpdate {
        first_name,
        last_name,
    } = profile?.into_inner();
    let profile = usecases::ProfileUpdate {
        first_name,
        last_name,
    };
    let user = flows::update_profile(&db, auth.account_username()?, profile)?;
    Ok(Json(user.into()))
}

#[patch(
    "/users/current/password",
    format = "application/json",
    data = "<change>"
)]
pub fn patch_current_user_password(
    db: sqlite::Connections,
    auth: Auth,
    change: JsonResult<json::ChangePassword>,
) -> StatusResult {
    let json::ChangePassword {
        old_password,
        new_password1,
        new_password2,
    } = change?.into_inner();
    let change = usecases::ChangePassword {
        old_password,
        new_password1,
        new_password2,
    };
    flows::change_password(&db, auth.account_username()?, change)?;
    Ok(Status::NoContent)
}
