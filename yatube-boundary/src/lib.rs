//! # yatube-boundary
//!
//! Serializable data structures of the Yatube JSON API.
//!
//! All timestamps are milliseconds since the Unix epoch (UTC).

use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, thiserror::Error))]
#[cfg_attr(feature = "extra-derive", error("{message}"))]
pub struct Error {
    /// The HTTP status code of the response
    pub http_status: u16,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct JwtToken {
    pub token: String,
}

/// The login is either a username or an email address.
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct User {
    pub username   : String,
    pub email      : String,
    pub first_name : String,
    pub last_name  : String,
    pub joined_at  : i64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct ProfileUpdate {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct ChangePassword {
    pub old_password: String,
    pub new_password1: String,
    pub new_password2: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewPost {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Aggregated votes of a post or a comment, and
/// the vote of the current viewer.
#[rustfmt::skip]
#[derive(Serialize, Deserialize, Default)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq, Eq))]
pub struct VoteResult {
    pub liked         : bool,
    pub disliked      : bool,
    pub like_count    : u64,
    pub dislike_count : u64,
    pub sum_rating    : i64,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Post {
    pub id            : String,
    pub author        : String,
    pub created_at    : i64,
    pub text          : String,
    pub text_preview  : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group         : Option<String>,
    pub tags          : Vec<String>,
    pub comment_count : u64,
    #[serde(flatten)]
    pub votes         : VoteResult,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct PostPage {
    /// Total number of matching posts
    pub count: u64,
    /// 1-based
    pub page: u64,
    pub page_count: u64,
    pub next: Option<u64>,
    pub previous: Option<u64>,
    pub results: Vec<Post>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewComment {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// A comment with all of its replies.
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct Comment {
    pub id         : String,
    pub post       : String,
    pub author     : String,
    pub created_at : i64,
    pub text       : String,
    pub parent     : Option<String>,
    pub depth      : u8,
    #[serde(flatten)]
    pub votes      : VoteResult,
    #[serde(default)]
    pub replies    : Vec<Comment>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewVote {
    /// "post" or "comment"
    pub target_kind: String,
    pub target_id: String,
    /// "like" or "dislike"
    pub value: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewGroup {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Group {
    pub slug        : String,
    pub title       : String,
    pub description : String,
    pub posts_count : u64,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewTag {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Tag {
    pub slug: String,
    pub title: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone))]
pub struct NewFollow {
    pub author: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
pub struct Follow {
    pub user: String,
    pub author: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flatten_votes_of_posts() {
        let post = Post {
            id: "p".into(),
            author: "leo".into(),
            created_at: 0,
            text: "text".into(),
            text_preview: "text".into(),
            group: None,
            tags: vec![],
            comment_count: 2,
            votes: VoteResult {
                liked: true,
                like_count: 3,
                sum_rating: 3,
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["liked"], true);
        assert_eq!(json["disliked"], false);
        assert_eq!(json["like_count"], 3);
        assert_eq!(json["sum_rating"], 3);
        assert!(json.get("group").is_none());
        assert!(json.get("votes").is_none());
    }

    #[test]
    fn optional_fields_of_new_post() {
        let new_post: NewPost = serde_json::from_str(r#"{"text":"hello"}"#).unwrap();
        assert_eq!("hello", new_post.text);
        assert!(new_post.group.is_none());
        assert!(new_post.tags.is_empty());
    }

    #[test]
    fn nested_comments() {
        let json = r#"{
            "id": "c1", "post": "p", "author": "leo", "created_at": 1,
            "text": "root", "parent": null, "depth": 0,
            "liked": false, "disliked": false,
            "like_count": 0, "dislike_count": 1, "sum_rating": -1,
            "replies": [{
                "id": "c2", "post": "p", "author": "mia", "created_at": 2,
                "text": "reply", "parent": "c1", "depth": 1,
                "liked": false, "disliked": false,
                "like_count": 0, "dislike_count": 0, "sum_rating": 0
            }]
        }"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(-1, comment.votes.sum_rating);
        assert_eq!(1, comment.replies.len());
        assert_eq!(Some("c1"), comment.replies[0].parent.as_deref());
        assert!(comment.replies[0].replies.is_empty());
    }
}
