#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub slug  : String,
    pub title : String,
}

impl Tag {
    pub const fn max_title_len() -> usize {
        50
    }
}
