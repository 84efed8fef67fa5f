// Low-level database access traits.
// Each repository is responsible for a single entity and
// its relationships. Related entities are only referenced
// by their id (or their unique name) and never modified
// or loaded by another repository.

use crate::entities::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error("The object already exists")]
    AlreadyExists,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

pub trait UserRepo {
    fn create_user(&self, user: &User) -> Result<()>;
    fn update_user(&self, user: &User) -> Result<()>;

    fn get_user(&self, username: &str) -> Result<User>;
    fn try_get_user(&self, username: &str) -> Result<Option<User>>;
    fn try_get_user_by_email(&self, email: &str) -> Result<Option<User>>;
}

pub trait GroupRepo {
    fn create_group(&self, group: &Group) -> Result<()>;
    fn get_group(&self, slug: &str) -> Result<Group>;
    fn all_groups_with_post_count(&self) -> Result<Vec<GroupWithPostCount>>;
}

pub trait TagRepo {
    fn create_tag(&self, tag: &Tag) -> Result<()>;
    // Unknown slugs are silently skipped
    fn get_tags(&self, slugs: &[&str]) -> Result<Vec<Tag>>;
    fn all_tags(&self) -> Result<Vec<Tag>>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PostOrder {
    /// Newest first
    #[default]
    PubDate,
    /// Most commented first
    Comments,
    /// Highest rating (likes minus dislikes) first
    Likes,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PostQuery {
    pub group: Option<String>,
    pub tag: Option<String>,
    pub author: Option<String>,
    /// Case-insensitive substring of the text
    pub text: Option<String>,
    /// Only posts of authors the given user follows
    pub followed_by: Option<String>,
    pub order: PostOrder,
}

pub trait PostRepo {
    fn create_post(&self, post: &Post) -> Result<()>;
    fn update_post(&self, post: &Post) -> Result<()>;
    // Cascades to all comments of the post and all votes
    // on the post and its comments.
    fn delete_post(&self, id: &str) -> Result<()>;

    fn get_post(&self, id: &str) -> Result<Post>;
    fn query_posts(
        &self,
        query: &PostQuery,
        pagination: &Pagination,
    ) -> Result<Vec<PostWithStats>>;
    fn count_posts(&self, query: &PostQuery) -> Result<u64>;
}

pub trait CommentRepository {
    fn create_comment(&self, comment: &Comment) -> Result<()>;

    fn load_comment(&self, id: &str) -> Result<Comment>;
    // Ordered by creation time, ties are resolved by insertion order
    fn load_comments_of_post(&self, post_id: &str) -> Result<Vec<Comment>>;
    fn count_comments_of_post(&self, post_id: &str) -> Result<u64>;
}

pub trait VoteRepo {
    // Fails with `Error::AlreadyExists` if the voter has
    // already voted on the target.
    fn create_vote(&self, vote: &Vote) -> Result<()>;
    fn update_vote(&self, vote: &Vote) -> Result<()>;
    fn delete_vote(&self, voter: &str, target: &VoteTarget) -> Result<()>;

    fn try_get_vote(&self, voter: &str, target: &VoteTarget) -> Result<Option<Vote>>;
    fn count_votes(&self, target: &VoteTarget) -> Result<VoteCounts>;
    // Targets without any votes are omitted
    fn count_votes_of_targets(
        &self,
        kind: VoteTargetKind,
        ids: &[&str],
    ) -> Result<Vec<(Id, VoteCounts)>>;
    fn load_votes_of_voter(
        &self,
        voter: &str,
        kind: VoteTargetKind,
        ids: &[&str],
    ) -> Result<Vec<Vote>>;
}

pub trait FollowRepo {
    // Fails with `Error::AlreadyExists` for duplicates
    fn create_follow(&self, follow: &Follow) -> Result<()>;
    fn delete_follow(&self, follow: &Follow) -> Result<()>;

    fn is_following(&self, follow: &Follow) -> Result<bool>;
    fn follows_of(&self, follower: &str) -> Result<Vec<Follow>>;
}
