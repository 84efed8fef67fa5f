#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use super::schema::*;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct UserEntity {
    pub rowid: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = follow)]
pub struct NewFollow {
    pub follower_rowid: i64,
    pub author_rowid: i64,
}

#[derive(Insertable)]
#[diesel(table_name = post_group)]
pub struct NewGroup<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub description: &'a str,
}

#[derive(Queryable)]
pub struct GroupEntity {
    pub rowid: i64,
    pub slug: String,
    pub title: String,
    pub description: String,
}

#[derive(Insertable)]
#[diesel(table_name = tag)]
pub struct NewTag<'a> {
    pub slug: &'a str,
    pub title: &'a str,
}

#[derive(Queryable)]
pub struct TagEntity {
    pub rowid: i64,
    pub slug: String,
    pub title: String,
}

#[derive(Insertable)]
#[diesel(table_name = post)]
pub struct NewPost<'a> {
    pub id: &'a str,
    pub author_rowid: i64,
    pub group_rowid: Option<i64>,
    pub created_at: i64,
    pub text: &'a str,
    pub text_preview: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = post, treat_none_as_null = true)]
pub struct UpdatePost<'a> {
    pub group_rowid: Option<i64>,
    pub text: &'a str,
    pub text_preview: &'a str,
}

#[derive(Queryable)]
pub struct JoinedPost {
    pub rowid: i64,
    pub id: String,
    pub created_at: i64,
    pub text: String,
    pub text_preview: String,
    // Joined columns
    pub author: String,
    pub group: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = post_tag)]
pub struct NewPostTag {
    pub post_rowid: i64,
    pub tag_rowid: i64,
}

#[derive(Insertable)]
#[diesel(table_name = post_comment)]
pub struct NewPostComment<'a> {
    pub id: &'a str,
    pub post_rowid: i64,
    pub parent_rowid: Option<i64>,
    pub author_rowid: i64,
    pub created_at: i64,
    pub depth: i16,
    pub text: &'a str,
}

#[derive(Queryable)]
pub struct JoinedPostComment {
    pub rowid: i64,
    pub id: String,
    pub parent_rowid: Option<i64>,
    pub created_at: i64,
    pub depth: i16,
    pub text: String,
    // Joined columns
    pub author: String,
}

#[derive(Insertable)]
#[diesel(table_name = vote)]
pub struct NewVote<'a> {
    pub user_rowid: i64,
    pub target_kind: i16,
    pub target_id: &'a str,
    pub value: i16,
    pub created_at: i64,
}
