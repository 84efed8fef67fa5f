use super::*;

pub fn add_comment(
    connections: &sqlite::Connections,
    author: &str,
    new_comment: usecases::NewComment,
) -> Result<Comment> {
    let comment = connections.exclusive()?.transaction(|conn| {
        usecases::add_comment(conn, author, new_comment).map_err(|err| {
            warn!("Failed to add comment: {err}");
            err
        })
    })?;
    info!(
        "Added comment {} to post {} at depth {}",
        comment.id, comment.post_id, comment.depth
    );
    Ok(comment)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    fn add_comment(
        fixture: &BackendFixture,
        post: &Post,
        parent: Option<&Comment>,
    ) -> super::Result<Comment> {
        flows::add_comment(
            &fixture.db_connections,
            "leo",
            usecases::NewComment {
                post_id: post.id.clone(),
                text: "Reply".into(),
                parent_id: parent.map(|c| c.id.clone()),
            },
        )
    }

    #[test]
    fn replies_are_clamped_to_the_maximum_depth() {
        let fixture = BackendFixture::new();
        fixture.create_user("leo");
        let post = fixture.create_post("leo", "text");
        let root = add_comment(&fixture, &post, None).unwrap();
        let c1 = add_comment(&fixture, &post, Some(&root)).unwrap();
        let c2 = add_comment(&fixture, &post, Some(&c1)).unwrap();
        let c3 = add_comment(&fixture, &post, Some(&c2)).unwrap();
        assert_eq!(2, c2.depth);
        assert_eq!(Some(c1.id.clone()), c3.parent_id);
        assert_eq!(2, c3.depth);

        let db = fixture.db_connections.shared().unwrap();
        let thread = usecases::list_thread(&db, post.id.as_str()).unwrap();
        assert_eq!(1, thread.roots.len());
        let descendants: Vec<_> = thread.descendants[&root.id]
            .iter()
            .map(|c| c.id.clone())
            .collect();
        assert_eq!(vec![c1.id.clone(), c2.id, c3.id], descendants);
        assert_eq!(2, thread.children_of(&c1.id).len());
    }

    #[test]
    fn reject_empty_comments_and_foreign_parents() {
        let fixture = BackendFixture::new();
        fixture.create_user("leo");
        let post = fixture.create_post("leo", "text");
        let other_post = fixture.create_post("leo", "other");
        let foreign_parent = add_comment(&fixture, &other_post, None).unwrap();
        assert!(matches!(
            add_comment(&fixture, &post, Some(&foreign_parent)),
            Err(AppError::Business(BError::Parameter(
                usecases::Error::ParentOfOtherPost
            )))
        ));
        let err = flows::add_comment(
            &fixture.db_connections,
            "leo",
            usecases::NewComment {
                post_id: post.id.clone(),
                text: "   ".into(),
                parent_id: None,
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Business(BError::Parameter(usecases::Error::EmptyComment))
        ));
    }
}
