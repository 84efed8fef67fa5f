use std::fmt;

use num_derive::{FromPrimitive, ToPrimitive};
use strum::{AsRefStr, EnumString};

use crate::id::*;

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum VoteValue {
    Like    =  1,
    Dislike = -1,
}

impl VoteValue {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Like => Self::Dislike,
            Self::Dislike => Self::Like,
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive, ToPrimitive, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum VoteTargetKind {
    Post    = 1,
    Comment = 2,
}

/// The votable object, i.e. either a post or a comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VoteTarget {
    pub kind: VoteTargetKind,
    pub id: Id,
}

impl VoteTarget {
    pub fn post(id: impl Into<Id>) -> Self {
        Self {
            kind: VoteTargetKind::Post,
            id: id.into(),
        }
    }

    pub fn comment(id: impl Into<Id>) -> Self {
        Self {
            kind: VoteTargetKind::Comment,
            id: id.into(),
        }
    }
}

impl fmt::Display for VoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}:{}", self.kind.as_ref(), self.id)
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub voter  : String,
    pub target : VoteTarget,
    pub value  : VoteValue,
}

/// The vote of a single user on a single target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoteState {
    #[default]
    None,
    Liked,
    Disliked,
}

impl From<Option<VoteValue>> for VoteState {
    fn from(from: Option<VoteValue>) -> Self {
        match from {
            None => Self::None,
            Some(VoteValue::Like) => Self::Liked,
            Some(VoteValue::Dislike) => Self::Disliked,
        }
    }
}

/// How the ledger changed by casting a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Created,
    Changed,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct VoteCounts {
    pub likes: u64,
    pub dislikes: u64,
}

impl VoteCounts {
    pub fn sum_rating(&self) -> i64 {
        self.likes as i64 - self.dislikes as i64
    }

    pub fn add(&mut self, value: VoteValue, count: u64) {
        match value {
            VoteValue::Like => self.likes += count,
            VoteValue::Dislike => self.dislikes += count,
        }
    }
}

/// Whether a viewer has voted on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewerVote {
    pub liked: bool,
    pub disliked: bool,
}

impl From<VoteState> for ViewerVote {
    fn from(from: VoteState) -> Self {
        Self {
            liked: from == VoteState::Liked,
            disliked: from == VoteState::Disliked,
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteSummary {
    pub outcome : VoteOutcome,
    pub state   : VoteState,
    pub counts  : VoteCounts,
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{FromPrimitive, ToPrimitive};

    #[test]
    fn vote_values_as_small_integers() {
        assert_eq!(Some(1), VoteValue::Like.to_i16());
        assert_eq!(Some(-1), VoteValue::Dislike.to_i16());
        assert_eq!(Some(VoteValue::Dislike), VoteValue::from_i16(-1));
        assert_eq!(None, VoteValue::from_i16(0));
    }

    #[test]
    fn parse_vote_value() {
        assert_eq!(Ok(VoteValue::Like), "like".parse());
        assert_eq!(Ok(VoteValue::Dislike), "dislike".parse());
        assert!("love".parse::<VoteValue>().is_err());
    }

    #[test]
    fn parse_target_kind() {
        assert_eq!(Ok(VoteTargetKind::Post), "post".parse());
        assert_eq!(Ok(VoteTargetKind::Comment), "comment".parse());
        assert!("group".parse::<VoteTargetKind>().is_err());
    }

    #[test]
    fn sum_rating_may_be_negative() {
        let mut counts = VoteCounts::default();
        counts.add(VoteValue::Like, 1);
        counts.add(VoteValue::Dislike, 3);
        assert_eq!(-2, counts.sum_rating());
    }

    #[test]
    fn viewer_vote_from_state() {
        assert_eq!(ViewerVote::default(), ViewerVote::from(VoteState::None));
        assert!(ViewerVote::from(VoteState::Liked).liked);
        assert!(ViewerVote::from(VoteState::Disliked).disliked);
    }
}
