pub mod prelude {

    pub use yatube_core::{
        db::*,
        entities::*,
        repositories::{Error as RepoError, *},
        usecases,
    };

    pub mod sqlite {
        pub use super::super::super::sqlite::*;
    }

    pub use crate::{
        error::{AppError, BError},
        prelude as flows,
    };

    pub struct BackendFixture {
        pub db_connections: sqlite::Connections,
    }

    impl BackendFixture {
        pub fn new() -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let db_connections = sqlite::Connections::init(":memory:", 1).unwrap();
            yatube_db_sqlite::run_embedded_database_migrations(
                db_connections.exclusive().unwrap(),
            )
            .unwrap();
            Self { db_connections }
        }

        pub fn create_user(&self, username: &str) -> User {
            flows::register_user(
                &self.db_connections,
                usecases::NewUser {
                    username: username.into(),
                    email: format!("{username}@example.com"),
                    password: "secret".into(),
                },
            )
            .unwrap()
        }

        pub fn create_post(&self, author: &str, text: &str) -> Post {
            flows::create_post(
                &self.db_connections,
                author,
                usecases::NewPost {
                    text: text.into(),
                    ..Default::default()
                },
            )
            .unwrap()
        }

        pub fn try_get_post(&self, id: &str) -> Option<Post> {
            match self.db_connections.shared().unwrap().get_post(id) {
                Ok(post) => Some(post),
                Err(RepoError::NotFound) => None,
                x => x.map(|_| None).unwrap(),
            }
        }
    }
}
