#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub slug        : String,
    pub title       : String,
    pub description : String,
}

impl Group {
    pub const fn max_title_len() -> usize {
        200
    }
}

/// A group together with the number of posts
/// that have been published in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupWithPostCount {
    pub group: Group,
    pub posts_count: u64,
}
