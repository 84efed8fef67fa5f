///////////////////////////////////////////////////////////////////////
// Users
///////////////////////////////////////////////////////////////////////

table! {
    users (rowid) {
        rowid -> BigInt,
        username -> Text,
        email -> Text,
        password -> Text,
        first_name -> Text,
        last_name -> Text,
        created_at -> BigInt,
    }
}

table! {
    follow (rowid) {
        rowid -> BigInt,
        follower_rowid -> BigInt,
        author_rowid -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Groups and tags
///////////////////////////////////////////////////////////////////////

table! {
    post_group (rowid) {
        rowid -> BigInt,
        slug -> Text,
        title -> Text,
        description -> Text,
    }
}

table! {
    tag (rowid) {
        rowid -> BigInt,
        slug -> Text,
        title -> Text,
    }
}

///////////////////////////////////////////////////////////////////////
// Posts
///////////////////////////////////////////////////////////////////////

table! {
    post (rowid) {
        rowid -> BigInt,
        id -> Text,
        author_rowid -> BigInt,
        group_rowid -> Nullable<BigInt>,
        created_at -> BigInt,
        text -> Text,
        text_preview -> Text,
    }
}

joinable!(post -> users (author_rowid));
joinable!(post -> post_group (group_rowid));

table! {
    post_tag (post_rowid, tag_rowid) {
        post_rowid -> BigInt,
        tag_rowid -> BigInt,
    }
}

joinable!(post_tag -> post (post_rowid));
joinable!(post_tag -> tag (tag_rowid));

///////////////////////////////////////////////////////////////////////
// Comments
///////////////////////////////////////////////////////////////////////

table! {
    post_comment (rowid) {
        rowid -> BigInt,
        id -> Text,
        post_rowid -> BigInt,
        parent_rowid -> Nullable<BigInt>,
        author_rowid -> BigInt,
        created_at -> BigInt,
        depth -> SmallInt,
        text -> Text,
    }
}

joinable!(post_comment -> post (post_rowid));
joinable!(post_comment -> users (author_rowid));

///////////////////////////////////////////////////////////////////////
// Votes
///////////////////////////////////////////////////////////////////////

table! {
    vote (rowid) {
        rowid -> BigInt,
        user_rowid -> BigInt,
        target_kind -> SmallInt,
        target_id -> Text,
        value -> SmallInt,
        created_at -> BigInt,
    }
}

joinable!(vote -> users (user_rowid));

allow_tables_to_appear_in_same_query!(
    users,
    follow,
    post_group,
    tag,
    post,
    post_tag,
    post_comment,
    vote,
);
