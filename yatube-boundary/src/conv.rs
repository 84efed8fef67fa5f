use super::*;
use yatube_entities as e;

impl From<e::user::User> for User {
    fn from(from: e::user::User) -> Self {
        let e::user::User {
            username,
            email,
            password: _,
            first_name,
            last_name,
            joined_at,
        } = from;
        Self {
            username,
            email,
            first_name,
            last_name,
            joined_at: joined_at.as_millis(),
        }
    }
}

impl From<(e::vote::VoteCounts, e::vote::ViewerVote)> for VoteResult {
    fn from((counts, viewer): (e::vote::VoteCounts, e::vote::ViewerVote)) -> Self {
        let e::vote::ViewerVote { liked, disliked } = viewer;
        Self {
            liked,
            disliked,
            like_count: counts.likes,
            dislike_count: counts.dislikes,
            sum_rating: counts.sum_rating(),
        }
    }
}

impl From<e::vote::VoteSummary> for VoteResult {
    fn from(from: e::vote::VoteSummary) -> Self {
        (from.counts, e::vote::ViewerVote::from(from.state)).into()
    }
}

impl From<(e::post::PostWithStats, e::vote::ViewerVote)> for Post {
    fn from((from, viewer): (e::post::PostWithStats, e::vote::ViewerVote)) -> Self {
        let e::post::PostWithStats {
            post,
            comment_count,
            votes,
        } = from;
        let e::post::Post {
            id,
            author,
            created_at,
            text,
            text_preview,
            group,
            tags,
        } = post;
        Self {
            id: id.into(),
            author,
            created_at: created_at.as_millis(),
            text,
            text_preview,
            group,
            tags,
            comment_count,
            votes: (votes, viewer).into(),
        }
    }
}

impl From<e::post::Post> for Post {
    fn from(from: e::post::Post) -> Self {
        let stats = e::post::PostWithStats {
            post: from,
            comment_count: 0,
            votes: Default::default(),
        };
        (stats, Default::default()).into()
    }
}

// Replies are attached by the caller.
impl From<(e::comment::Comment, e::vote::VoteCounts, e::vote::ViewerVote)> for Comment {
    fn from(
        (from, counts, viewer): (e::comment::Comment, e::vote::VoteCounts, e::vote::ViewerVote),
    ) -> Self {
        let e::comment::Comment {
            id,
            post_id,
            author,
            created_at,
            text,
            parent_id,
            depth,
        } = from;
        Self {
            id: id.into(),
            post: post_id.into(),
            author,
            created_at: created_at.as_millis(),
            text,
            parent: parent_id.map(Into::into),
            depth,
            votes: (counts, viewer).into(),
            replies: vec![],
        }
    }
}

impl From<e::comment::Comment> for Comment {
    fn from(from: e::comment::Comment) -> Self {
        (from, Default::default(), Default::default()).into()
    }
}

impl From<e::group::GroupWithPostCount> for Group {
    fn from(from: e::group::GroupWithPostCount) -> Self {
        let e::group::GroupWithPostCount { group, posts_count } = from;
        let e::group::Group {
            slug,
            title,
            description,
        } = group;
        Self {
            slug,
            title,
            description,
            posts_count,
        }
    }
}

impl From<e::group::Group> for Group {
    fn from(group: e::group::Group) -> Self {
        e::group::GroupWithPostCount {
            group,
            posts_count: 0,
        }
        .into()
    }
}

impl From<e::tag::Tag> for Tag {
    fn from(from: e::tag::Tag) -> Self {
        let e::tag::Tag { slug, title } = from;
        Self { slug, title }
    }
}

impl From<e::follow::Follow> for Follow {
    fn from(from: e::follow::Follow) -> Self {
        let e::follow::Follow { follower, author } = from;
        Self {
            user: follower,
            author,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_result_from_summary() {
        let summary = e::vote::VoteSummary {
            outcome: e::vote::VoteOutcome::Changed,
            state: e::vote::VoteState::Disliked,
            counts: e::vote::VoteCounts {
                likes: 1,
                dislikes: 4,
            },
        };
        let result = VoteResult::from(summary);
        assert!(!result.liked);
        assert!(result.disliked);
        assert_eq!(1, result.like_count);
        assert_eq!(4, result.dislike_count);
        assert_eq!(-3, result.sum_rating);
    }

    #[test]
    fn user_without_password() {
        let user = e::user::User {
            username: "leo".into(),
            email: "leo@example.com".into(),
            password: e::password::Password::from_hash("hash".into()),
            first_name: "Leo".into(),
            last_name: "Tolstoy".into(),
            joined_at: e::time::Timestamp::from_secs(1),
        };
        let user = User::from(user);
        assert_eq!("leo", user.username);
        assert_eq!(1_000, user.joined_at);
    }
}
