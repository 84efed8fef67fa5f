use crate::repositories::*;

pub trait Db:
    UserRepo + PostRepo + CommentRepository + VoteRepo + GroupRepo + TagRepo + FollowRepo
{
}

impl<T> Db for T where
    T: UserRepo + PostRepo + CommentRepository + VoteRepo + GroupRepo + TagRepo + FollowRepo
{
}
