use super::prelude::*;

/// Cast a like or dislike of a user on a post or a comment.
///
/// Repeating the same vote withdraws it, the opposite vote replaces
/// it. Concurrent first votes of the same voter are rejected by the
/// repository with `RepoError::AlreadyExists` and need to be retried
/// by the caller within a new transaction.
pub fn cast_vote<R>(
    repo: &R,
    voter: &str,
    target: &VoteTarget,
    value: VoteValue,
) -> Result<VoteSummary>
where
    R: UserRepo + PostRepo + CommentRepository + VoteRepo,
{
    if repo.try_get_user(voter)?.is_none() {
        return Err(Error::Unauthorized);
    }
    ensure_target_exists(repo, target)?;
    let (outcome, state) = match repo.try_get_vote(voter, target)? {
        None => {
            let vote = Vote {
                voter: voter.to_owned(),
                target: target.clone(),
                value,
            };
            repo.create_vote(&vote)?;
            (VoteOutcome::Created, VoteState::from(Some(value)))
        }
        Some(vote) if vote.value == value => {
            repo.delete_vote(voter, target)?;
            (VoteOutcome::Removed, VoteState::None)
        }
        Some(mut vote) => {
            vote.value = value;
            repo.update_vote(&vote)?;
            (VoteOutcome::Changed, VoteState::from(Some(value)))
        }
    };
    log::debug!("Vote of {voter} on {target}: {outcome:?}");
    let counts = repo.count_votes(target)?;
    Ok(VoteSummary {
        outcome,
        state,
        counts,
    })
}

pub fn parse_vote_value(value: &str) -> Result<VoteValue> {
    value.parse().map_err(|_| Error::VoteValue)
}

pub fn parse_vote_target(kind: &str, id: &str) -> Result<VoteTarget> {
    let kind = kind.parse().map_err(|_| Error::VoteTarget)?;
    let id = Id::from(id);
    if !id.is_valid() {
        return Err(Error::VoteTarget);
    }
    Ok(VoteTarget { kind, id })
}

fn ensure_target_exists<R>(repo: &R, target: &VoteTarget) -> Result<()>
where
    R: PostRepo + CommentRepository,
{
    match target.kind {
        VoteTargetKind::Post => {
            repo.get_post(target.id.as_str())?;
        }
        VoteTargetKind::Comment => {
            repo.load_comment(target.id.as_str())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::tests::MockDb;
    use super::*;
    use yatube_entities::builders::*;

    fn db_with_post_and_voters(voters: &[&str]) -> (MockDb, VoteTarget) {
        let db = MockDb::default();
        for voter in voters {
            db.users
                .borrow_mut()
                .push(User::build().username(voter).finish());
        }
        let post = Post::build().id("p").author("author").finish();
        db.posts.borrow_mut().push(post);
        (db, VoteTarget::post("p"))
    }

    #[test]
    fn like_then_dislike_changes_the_vote() {
        let (db, target) = db_with_post_and_voters(&["v"]);
        let summary = cast_vote(&db, "v", &target, VoteValue::Like).unwrap();
        assert_eq!(VoteOutcome::Created, summary.outcome);
        assert_eq!(VoteState::Liked, summary.state);
        assert_eq!(1, summary.counts.likes);
        assert_eq!(0, summary.counts.dislikes);

        let summary = cast_vote(&db, "v", &target, VoteValue::Dislike).unwrap();
        assert_eq!(VoteOutcome::Changed, summary.outcome);
        assert_eq!(VoteState::Disliked, summary.state);
        assert_eq!(0, summary.counts.likes);
        assert_eq!(1, summary.counts.dislikes);
        assert_eq!(1, db.votes.borrow().len());
    }

    #[test]
    fn like_then_like_removes_the_vote() {
        let (db, target) = db_with_post_and_voters(&["v"]);
        cast_vote(&db, "v", &target, VoteValue::Like).unwrap();
        let summary = cast_vote(&db, "v", &target, VoteValue::Like).unwrap();
        assert_eq!(VoteOutcome::Removed, summary.outcome);
        assert_eq!(VoteState::None, summary.state);
        assert_eq!(VoteCounts::default(), summary.counts);
        assert!(db.votes.borrow().is_empty());
    }

    #[test]
    fn toggling_twice_restores_the_counts() {
        for value in [VoteValue::Like, VoteValue::Dislike] {
            let (db, target) = db_with_post_and_voters(&["a", "b"]);
            cast_vote(&db, "a", &target, VoteValue::Dislike).unwrap();
            let before = db.count_votes(&target).unwrap();
            cast_vote(&db, "b", &target, value).unwrap();
            let after = cast_vote(&db, "b", &target, value).unwrap();
            assert_eq!(before, after.counts);
        }
    }

    #[test]
    fn votes_of_different_voters_commute() {
        let (db1, target) = db_with_post_and_voters(&["a", "b"]);
        cast_vote(&db1, "a", &target, VoteValue::Like).unwrap();
        let s1 = cast_vote(&db1, "b", &target, VoteValue::Dislike).unwrap();

        let (db2, target) = db_with_post_and_voters(&["a", "b"]);
        cast_vote(&db2, "b", &target, VoteValue::Dislike).unwrap();
        let s2 = cast_vote(&db2, "a", &target, VoteValue::Like).unwrap();

        assert_eq!(s1.counts, s2.counts);
        assert_eq!(1, s1.counts.likes);
        assert_eq!(1, s1.counts.dislikes);
        assert_eq!(0, s1.counts.sum_rating());
    }

    #[test]
    fn never_liked_and_disliked_at_the_same_time() {
        let (db, target) = db_with_post_and_voters(&["v"]);
        let values = [
            VoteValue::Like,
            VoteValue::Dislike,
            VoteValue::Dislike,
            VoteValue::Like,
            VoteValue::Like,
            VoteValue::Dislike,
        ];
        for value in values {
            cast_vote(&db, "v", &target, value).unwrap();
            assert!(db.votes.borrow().len() <= 1);
            let counts = db.count_votes(&target).unwrap();
            assert!(counts.likes + counts.dislikes <= 1);
        }
    }

    #[test]
    fn vote_on_comment() {
        let (db, _) = db_with_post_and_voters(&["v"]);
        let comment = Comment::build().id("c").post("p").author("v").finish();
        db.comments.borrow_mut().push(comment);
        let summary = cast_vote(&db, "v", &VoteTarget::comment("c"), VoteValue::Dislike).unwrap();
        assert_eq!(1, summary.counts.dislikes);
        // The vote on the comment does not count for the post
        let post_counts = db.count_votes(&VoteTarget::post("p")).unwrap();
        assert_eq!(VoteCounts::default(), post_counts);
    }

    #[test]
    fn vote_on_missing_target() {
        let (db, _) = db_with_post_and_voters(&["v"]);
        let err = cast_vote(&db, "v", &VoteTarget::post("x"), VoteValue::Like).unwrap_err();
        assert!(matches!(err, Error::Repo(RepoError::NotFound)));
        let err = cast_vote(&db, "v", &VoteTarget::comment("p"), VoteValue::Like).unwrap_err();
        assert!(matches!(err, Error::Repo(RepoError::NotFound)));
    }

    #[test]
    fn vote_of_unknown_user() {
        let (db, target) = db_with_post_and_voters(&[]);
        let err = cast_vote(&db, "ghost", &target, VoteValue::Like).unwrap_err();
        assert!(matches!(err, Error::Unauthorized));
        assert!(db.votes.borrow().is_empty());
    }

    #[test]
    fn parse_votes() {
        assert_eq!(VoteValue::Like, parse_vote_value("like").unwrap());
        assert!(matches!(parse_vote_value("meh"), Err(Error::VoteValue)));
        assert_eq!(
            VoteTarget::comment("x"),
            parse_vote_target("comment", "x").unwrap()
        );
        assert!(matches!(
            parse_vote_target("group", "x"),
            Err(Error::VoteTarget)
        ));
        assert!(matches!(
            parse_vote_target("post", " "),
            Err(Error::VoteTarget)
        ));
    }
}
