use super::prelude::*;

/// Subscribe to the posts of an author.
///
/// Following an author twice has no further effect.
pub fn follow<R>(repo: &R, follower: &str, author: &str) -> Result<Follow>
where
    R: UserRepo + FollowRepo,
{
    if follower == author {
        return Err(Error::SelfFollow);
    }
    repo.get_user(author)?;
    let follow = Follow {
        follower: follower.to_owned(),
        author: author.to_owned(),
    };
    match repo.create_follow(&follow) {
        Ok(()) | Err(RepoError::AlreadyExists) => Ok(follow),
        Err(err) => Err(err.into()),
    }
}

pub fn unfollow<R: FollowRepo>(repo: &R, follower: &str, author: &str) -> Result<()> {
    let follow = Follow {
        follower: follower.to_owned(),
        author: author.to_owned(),
    };
    Ok(repo.delete_follow(&follow)?)
}

pub fn follows_of<R: FollowRepo>(repo: &R, follower: &str) -> Result<Vec<Follow>> {
    Ok(repo.follows_of(follower)?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::MockDb;
    use super::*;
    use yatube_entities::builders::*;

    fn db_with_users() -> MockDb {
        let db = MockDb::default();
        for username in ["leo", "anna"] {
            db.users
                .borrow_mut()
                .push(User::build().username(username).finish());
        }
        db
    }

    #[test]
    fn follow_is_idempotent() {
        let db = db_with_users();
        follow(&db, "anna", "leo").unwrap();
        follow(&db, "anna", "leo").unwrap();
        assert_eq!(1, follows_of(&db, "anna").unwrap().len());
        assert!(follows_of(&db, "leo").unwrap().is_empty());
    }

    #[test]
    fn cannot_follow_yourself_or_unknown_authors() {
        let db = db_with_users();
        assert!(matches!(follow(&db, "leo", "leo"), Err(Error::SelfFollow)));
        assert!(matches!(
            follow(&db, "leo", "fyodor"),
            Err(Error::Repo(RepoError::NotFound))
        ));
        assert!(db.follows.borrow().is_empty());
    }

    #[test]
    fn unfollow_missing_follow() {
        let db = db_with_users();
        follow(&db, "anna", "leo").unwrap();
        unfollow(&db, "anna", "leo").unwrap();
        assert!(matches!(
            unfollow(&db, "anna", "leo"),
            Err(Error::Repo(RepoError::NotFound))
        ));
    }

    #[test]
    fn feed_of_followed_authors() {
        let db = db_with_users();
        db.users
            .borrow_mut()
            .push(User::build().username("fyodor").finish());
        for (id, author) in [("1", "leo"), ("2", "fyodor"), ("3", "anna")] {
            db.posts
                .borrow_mut()
                .push(Post::build().id(id).author(author).finish());
        }
        follow(&db, "anna", "leo").unwrap();
        let query = PostQuery {
            followed_by: Some("anna".into()),
            ..Default::default()
        };
        let feed = super::super::query_posts(&db, &query, 1).unwrap();
        assert_eq!(1, feed.total_count);
        assert_eq!("1", feed.posts[0].post.id.as_str());
    }
}
