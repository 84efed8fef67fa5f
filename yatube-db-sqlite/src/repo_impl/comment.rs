use std::collections::HashMap;

use super::*;

impl<'a> CommentRepository for DbReadWrite<'a> {
    fn create_comment(&self, comment: &Comment) -> Result<()> {
        create_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn load_comment(&self, id: &str) -> Result<Comment> {
        load_comment(&mut self.conn.borrow_mut(), id)
    }
    fn load_comments_of_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        load_comments_of_post(&mut self.conn.borrow_mut(), post_id)
    }
    fn count_comments_of_post(&self, post_id: &str) -> Result<u64> {
        count_comments_of_post(&mut self.conn.borrow_mut(), post_id)
    }
}

impl<'a> CommentRepository for DbConnection<'a> {
    fn create_comment(&self, comment: &Comment) -> Result<()> {
        create_comment(&mut self.conn.borrow_mut(), comment)
    }
    fn load_comment(&self, id: &str) -> Result<Comment> {
        load_comment(&mut self.conn.borrow_mut(), id)
    }
    fn load_comments_of_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        load_comments_of_post(&mut self.conn.borrow_mut(), post_id)
    }
    fn count_comments_of_post(&self, post_id: &str) -> Result<u64> {
        count_comments_of_post(&mut self.conn.borrow_mut(), post_id)
    }
}

impl<'a> CommentRepository for DbReadOnly<'a> {
    fn create_comment(&self, _comment: &Comment) -> Result<()> {
        unreachable!();
    }
    fn load_comment(&self, id: &str) -> Result<Comment> {
        load_comment(&mut self.conn.borrow_mut(), id)
    }
    fn load_comments_of_post(&self, post_id: &str) -> Result<Vec<Comment>> {
        load_comments_of_post(&mut self.conn.borrow_mut(), post_id)
    }
    fn count_comments_of_post(&self, post_id: &str) -> Result<u64> {
        count_comments_of_post(&mut self.conn.borrow_mut(), post_id)
    }
}

fn create_comment(conn: &mut SqliteConnection, comment: &Comment) -> Result<()> {
    let Comment {
        id,
        post_id,
        author,
        created_at,
        text,
        parent_id,
        depth,
    } = comment;
    let post_rowid = resolve_post_rowid(conn, post_id.as_str())?;
    let author_rowid = resolve_user_rowid(conn, author)?;
    let parent_rowid = parent_id
        .as_ref()
        .map(|parent_id| resolve_comment_rowid(conn, parent_id.as_str()))
        .transpose()?;
    let new_comment = models::NewPostComment {
        id: id.as_str(),
        post_rowid,
        parent_rowid,
        author_rowid,
        created_at: created_at.as_millis(),
        depth: i16::from(*depth),
        text,
    };
    diesel::insert_into(schema::post_comment::table)
        .values(&new_comment)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn load_comment_from_row(
    row: models::JoinedPostComment,
    post_id: Id,
    parent_id: Option<Id>,
) -> Result<Comment> {
    let models::JoinedPostComment {
        rowid: _,
        id,
        parent_rowid,
        created_at,
        depth,
        text,
        author,
    } = row;
    if parent_rowid.is_some() != parent_id.is_some() {
        return Err(anyhow!("Missing parent of comment {id}").into());
    }
    let depth = u8::try_from(depth).map_err(|_| anyhow!("Invalid comment depth: {depth}"))?;
    Ok(Comment {
        id: id.into(),
        post_id,
        author,
        created_at: Timestamp::from_millis(created_at),
        text,
        parent_id,
        depth,
    })
}

fn load_comment(conn: &mut SqliteConnection, id: &str) -> Result<Comment> {
    use schema::{post::dsl as post_dsl, post_comment::dsl, users::dsl as user_dsl};
    let (row, post_id) = dsl::post_comment
        .inner_join(schema::post::table.on(post_dsl::rowid.eq(dsl::post_rowid)))
        .inner_join(schema::users::table.on(user_dsl::rowid.eq(dsl::author_rowid)))
        .select((
            (
                dsl::rowid,
                dsl::id,
                dsl::parent_rowid,
                dsl::created_at,
                dsl::depth,
                dsl::text,
                user_dsl::username,
            ),
            post_dsl::id,
        ))
        .filter(dsl::id.eq(id))
        .first::<(models::JoinedPostComment, String)>(conn)
        .map_err(from_diesel_err)?;
    let parent_id = row
        .parent_rowid
        .map(|parent_rowid| {
            dsl::post_comment
                .select(dsl::id)
                .filter(dsl::rowid.eq(parent_rowid))
                .first::<String>(conn)
                .map_err(from_diesel_err)
        })
        .transpose()?;
    load_comment_from_row(row, post_id.into(), parent_id.map(Into::into))
}

fn load_comments_of_post(conn: &mut SqliteConnection, post_id: &str) -> Result<Vec<Comment>> {
    use schema::{post_comment::dsl, users::dsl as user_dsl};
    let post_rowid = resolve_post_rowid(conn, post_id)?;
    let rows = dsl::post_comment
        .inner_join(schema::users::table.on(user_dsl::rowid.eq(dsl::author_rowid)))
        .select((
            dsl::rowid,
            dsl::id,
            dsl::parent_rowid,
            dsl::created_at,
            dsl::depth,
            dsl::text,
            user_dsl::username,
        ))
        .filter(dsl::post_rowid.eq(post_rowid))
        .order_by((dsl::created_at, dsl::rowid))
        .load::<models::JoinedPostComment>(conn)
        .map_err(from_diesel_err)?;
    // Parents always belong to the same post
    let ids: HashMap<_, _> = rows.iter().map(|row| (row.rowid, row.id.clone())).collect();
    rows.into_iter()
        .map(|row| {
            let parent_id = row
                .parent_rowid
                .and_then(|rowid| ids.get(&rowid))
                .map(|id| Id::from(id.as_str()));
            load_comment_from_row(row, post_id.into(), parent_id)
        })
        .collect()
}

fn count_comments_of_post(conn: &mut SqliteConnection, post_id: &str) -> Result<u64> {
    use schema::post_comment::dsl;
    let post_rowid = resolve_post_rowid(conn, post_id)?;
    let count = dsl::post_comment
        .select(diesel::dsl::count_star())
        .filter(dsl::post_rowid.eq(post_rowid))
        .first::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(count as u64)
}
