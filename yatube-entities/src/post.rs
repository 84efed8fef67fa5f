use crate::{id::*, time::*, vote::VoteCounts};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id           : Id,
    pub author       : String,
    pub created_at   : Timestamp,
    pub text         : String,
    pub text_preview : String,
    pub group        : Option<String>,
    pub tags         : Vec<String>,
}

/// A post together with the aggregates that are
/// displayed in listings.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithStats {
    pub post          : Post,
    pub comment_count : u64,
    pub votes         : VoteCounts,
}
