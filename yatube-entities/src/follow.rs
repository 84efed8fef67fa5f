/// A subscription of a user to the posts of an author.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Follow {
    pub follower : String,
    pub author   : String,
}
