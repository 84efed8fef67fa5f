use super::*;

pub fn follow(connections: &sqlite::Connections, follower: &str, author: &str) -> Result<Follow> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::follow(conn, follower, author))?)
}

pub fn unfollow(connections: &sqlite::Connections, follower: &str, author: &str) -> Result<()> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::unfollow(conn, follower, author))?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn follow_and_read_the_feed() {
        let fixture = BackendFixture::new();
        fixture.create_user("leo");
        fixture.create_user("anna");
        let post = fixture.create_post("leo", "text");
        fixture.create_post("anna", "text");
        flows::follow(&fixture.db_connections, "anna", "leo").unwrap();
        flows::follow(&fixture.db_connections, "anna", "leo").unwrap();

        let db = fixture.db_connections.shared().unwrap();
        let query = PostQuery {
            followed_by: Some("anna".into()),
            ..Default::default()
        };
        let feed = usecases::query_posts(&db, &query, 1).unwrap();
        assert_eq!(1, feed.total_count);
        assert_eq!(post.id, feed.posts[0].post.id);
        drop(db);

        flows::unfollow(&fixture.db_connections, "anna", "leo").unwrap();
        assert!(matches!(
            flows::unfollow(&fixture.db_connections, "anna", "leo"),
            Err(AppError::Business(BError::Repo(RepoError::NotFound)))
        ));
    }

    #[test]
    fn do_not_follow_yourself() {
        let fixture = BackendFixture::new();
        fixture.create_user("leo");
        assert!(matches!(
            flows::follow(&fixture.db_connections, "leo", "leo"),
            Err(AppError::Business(BError::Parameter(
                usecases::Error::SelfFollow
            )))
        ));
    }
}
