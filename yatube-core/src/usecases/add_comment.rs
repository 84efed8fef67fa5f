use super::prelude::*;

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: Id,
    pub text: String,
    pub parent_id: Option<Id>,
}

pub fn add_comment<R>(repo: &R, author: &str, c: NewComment) -> Result<Comment>
where
    R: UserRepo + PostRepo + CommentRepository,
{
    if repo.try_get_user(author)?.is_none() {
        return Err(Error::Unauthorized);
    }
    if c.text.trim().is_empty() {
        return Err(Error::EmptyComment);
    }
    let post = repo.get_post(c.post_id.as_str())?;
    let parent = c
        .parent_id
        .map(|parent_id| resolve_parent(repo, &post, parent_id.as_str()))
        .transpose()?;
    let depth = parent.as_ref().map(|p| p.depth + 1).unwrap_or(0);
    debug_assert!(depth <= MAX_COMMENT_DEPTH);
    let comment = Comment {
        id: Id::new(),
        post_id: post.id,
        author: author.to_owned(),
        created_at: Timestamp::now(),
        text: c.text,
        parent_id: parent.map(|p| p.id),
        depth,
    };
    repo.create_comment(&comment)?;
    Ok(comment)
}

// Replies to comments at the maximum depth are
// attached to the grandparent instead.
fn resolve_parent<R>(repo: &R, post: &Post, parent_id: &str) -> Result<Comment>
where
    R: CommentRepository,
{
    let parent = repo.load_comment(parent_id)?;
    if parent.post_id != post.id {
        return Err(Error::ParentOfOtherPost);
    }
    if !parent.is_at_max_depth() {
        return Ok(parent);
    }
    let Some(grandparent_id) = parent.parent_id else {
        // Unreachable as long as the depth is consistent
        log::warn!("Comment {} at depth {} without a parent", parent.id, parent.depth);
        return Ok(parent);
    };
    Ok(repo.load_comment(grandparent_id.as_str())?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::MockDb;
    use super::*;
    use yatube_entities::builders::*;

    fn db_with_post() -> MockDb {
        let db = MockDb::default();
        db.users
            .borrow_mut()
            .push(User::build().username("leo").finish());
        db.posts
            .borrow_mut()
            .push(Post::build().id("p").author("leo").finish());
        db.posts
            .borrow_mut()
            .push(Post::build().id("q").author("leo").finish());
        db
    }

    fn reply(db: &MockDb, parent: Option<&Comment>, text: &str) -> Result<Comment> {
        add_comment(
            db,
            "leo",
            NewComment {
                post_id: "p".into(),
                text: text.into(),
                parent_id: parent.map(|p| p.id.clone()),
            },
        )
    }

    #[test]
    fn add_root_comment() {
        let db = db_with_post();
        let c = reply(&db, None, "first").unwrap();
        assert!(c.is_root());
        assert_eq!(0, c.depth);
        assert_eq!("leo", c.author);
        assert_eq!(Id::from("p"), c.post_id);
        assert_eq!(1, db.comments.borrow().len());
    }

    #[test]
    fn replies_are_clamped_at_depth_2() {
        let db = db_with_post();
        let r = reply(&db, None, "R").unwrap();
        let c1 = reply(&db, Some(&r), "C1").unwrap();
        let c2 = reply(&db, Some(&c1), "C2").unwrap();
        assert_eq!(Some(r.id.clone()), c1.parent_id);
        assert_eq!(1, c1.depth);
        assert_eq!(Some(c1.id.clone()), c2.parent_id);
        assert_eq!(2, c2.depth);

        let c3 = reply(&db, Some(&c2), "C3").unwrap();
        assert_eq!(Some(c1.id.clone()), c3.parent_id);
        assert_eq!(2, c3.depth);

        let c4 = reply(&db, Some(&c3), "C4").unwrap();
        assert_eq!(Some(c1.id), c4.parent_id);
        assert_eq!(2, c4.depth);
    }

    #[test]
    fn reject_empty_comment() {
        let db = db_with_post();
        assert!(matches!(reply(&db, None, ""), Err(Error::EmptyComment)));
        assert!(matches!(reply(&db, None, " \n\t"), Err(Error::EmptyComment)));
        assert!(db.comments.borrow().is_empty());
    }

    #[test]
    fn reject_parent_of_other_post() {
        let db = db_with_post();
        let other = add_comment(
            &db,
            "leo",
            NewComment {
                post_id: "q".into(),
                text: "elsewhere".into(),
                parent_id: None,
            },
        )
        .unwrap();
        assert!(matches!(
            reply(&db, Some(&other), "reply"),
            Err(Error::ParentOfOtherPost)
        ));
    }

    #[test]
    fn reject_missing_parent_and_post() {
        let db = db_with_post();
        let missing = Comment::build().id("missing").post("p").finish();
        assert!(matches!(
            reply(&db, Some(&missing), "reply"),
            Err(Error::Repo(RepoError::NotFound))
        ));
        let err = add_comment(
            &db,
            "leo",
            NewComment {
                post_id: "x".into(),
                text: "text".into(),
                parent_id: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::Repo(RepoError::NotFound)));
    }

    #[test]
    fn reject_unknown_author() {
        let db = db_with_post();
        let err = add_comment(
            &db,
            "ghost",
            NewComment {
                post_id: "p".into(),
                text: "boo".into(),
                parent_id: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::Unauthorized));
    }
}
