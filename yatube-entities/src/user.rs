use crate::{password::Password, time::Timestamp};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username   : String,
    pub email      : String,
    pub password   : Password,
    pub first_name : String,
    pub last_name  : String,
    pub joined_at  : Timestamp,
}

impl User {
    /// The full name if available, otherwise the username.
    pub fn display_name(&self) -> String {
        let full_name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full_name = full_name.trim();
        if full_name.is_empty() {
            self.username.clone()
        } else {
            full_name.to_owned()
        }
    }
}
