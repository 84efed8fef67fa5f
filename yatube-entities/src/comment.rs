use crate::{id::*, time::*};

/// The maximum nesting level of comments.
///
/// Root comments have depth 0.
pub const MAX_COMMENT_DEPTH: u8 = 2;

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id         : Id,
    pub post_id    : Id,
    pub author     : String,
    pub created_at : Timestamp,
    pub text       : String,
    pub parent_id  : Option<Id>,
    pub depth      : u8,
}

impl Comment {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Replies to this comment must be attached to its
    /// own parent instead to stay within the depth limit.
    pub fn is_at_max_depth(&self) -> bool {
        self.depth >= MAX_COMMENT_DEPTH
    }
}
