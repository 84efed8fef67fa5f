pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{comment_builder::*, post_builder::*, user_builder::*};

pub mod post_builder {

    use super::*;
    use crate::{id::*, post::*, time::*};

    #[derive(Debug)]
    pub struct PostBuild {
        post: Post,
    }

    impl PostBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.post.id = id.into();
            self
        }
        pub fn author(mut self, author: &str) -> Self {
            self.post.author = author.into();
            self
        }
        pub fn text(mut self, text: &str) -> Self {
            self.post.text = text.into();
            self.post.text_preview = text.into();
            self
        }
        pub fn group(mut self, group: Option<&str>) -> Self {
            self.post.group = group.map(Into::into);
            self
        }
        pub fn tags(mut self, tags: Vec<impl Into<String>>) -> Self {
            self.post.tags = tags.into_iter().map(|x| x.into()).collect();
            self
        }
        pub fn created_at(mut self, created_at: Timestamp) -> Self {
            self.post.created_at = created_at;
            self
        }
        pub fn finish(self) -> Post {
            self.post
        }
    }

    impl Builder for Post {
        type Build = PostBuild;
        fn build() -> PostBuild {
            PostBuild {
                post: Post {
                    id: Id::new(),
                    author: "".into(),
                    created_at: Timestamp::now(),
                    text: "".into(),
                    text_preview: "".into(),
                    group: None,
                    tags: vec![],
                },
            }
        }
    }
}

pub mod comment_builder {

    use super::*;
    use crate::{comment::*, id::*, time::*};

    #[derive(Debug)]
    pub struct CommentBuild {
        comment: Comment,
    }

    impl CommentBuild {
        pub fn id(mut self, id: &str) -> Self {
            self.comment.id = id.into();
            self
        }
        pub fn post(mut self, post_id: &str) -> Self {
            self.comment.post_id = post_id.into();
            self
        }
        pub fn author(mut self, author: &str) -> Self {
            self.comment.author = author.into();
            self
        }
        pub fn text(mut self, text: &str) -> Self {
            self.comment.text = text.into();
            self
        }
        pub fn parent(mut self, parent: &Comment) -> Self {
            self.comment.parent_id = Some(parent.id.clone());
            self.comment.depth = parent.depth + 1;
            self
        }
        pub fn created_at(mut self, created_at: Timestamp) -> Self {
            self.comment.created_at = created_at;
            self
        }
        pub fn finish(self) -> Comment {
            self.comment
        }
    }

    impl Builder for Comment {
        type Build = CommentBuild;
        fn build() -> CommentBuild {
            CommentBuild {
                comment: Comment {
                    id: Id::new(),
                    post_id: Id::new(),
                    author: "".into(),
                    created_at: Timestamp::now(),
                    text: "".into(),
                    parent_id: None,
                    depth: 0,
                },
            }
        }
    }
}

pub mod user_builder {

    use super::*;
    use crate::{password::*, time::*, user::*};

    #[derive(Debug)]
    pub struct UserBuild {
        user: User,
    }

    impl UserBuild {
        pub fn username(mut self, username: &str) -> Self {
            self.user.username = username.into();
            self
        }
        pub fn email(mut self, email: &str) -> Self {
            self.user.email = email.into();
            self
        }
        pub fn password(mut self, password: &str) -> Self {
            self.user.password = password.parse().expect("Valid password");
            self
        }
        pub fn finish(self) -> User {
            self.user
        }
    }

    impl Builder for User {
        type Build = UserBuild;
        fn build() -> UserBuild {
            UserBuild {
                user: User {
                    username: "".into(),
                    email: "".into(),
                    password: Password::from_hash("".into()),
                    first_name: "".into(),
                    last_name: "".into(),
                    joined_at: Timestamp::now(),
                },
            }
        }
    }
}
