use super::*;

pub fn create_post(
    connections: &sqlite::Connections,
    author: &str,
    new_post: usecases::NewPost,
) -> Result<Post> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::create_post(conn, author, new_post).map_err(|err| {
            warn!("Failed to create post of {author}: {err}");
            err
        })
    })?)
}

pub fn update_post(
    connections: &sqlite::Connections,
    editor: &str,
    id: &str,
    new_post: usecases::NewPost,
) -> Result<Post> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::update_post(conn, editor, id, new_post).map_err(|err| {
            warn!("Failed to update post {id}: {err}");
            err
        })
    })?)
}

pub fn delete_post(connections: &sqlite::Connections, editor: &str, id: &str) -> Result<()> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::delete_post(conn, editor, id).map_err(|err| {
            warn!("Failed to delete post {id}: {err}");
            err
        })
    })?)
}
