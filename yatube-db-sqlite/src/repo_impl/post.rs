use std::{cmp::Reverse, collections::HashMap};

use diesel::sqlite::Sqlite;

use super::*;

impl<'a> PostRepo for DbReadWrite<'a> {
    fn create_post(&self, post: &Post) -> Result<()> {
        create_post(&mut self.conn.borrow_mut(), post)
    }
    fn update_post(&self, post: &Post) -> Result<()> {
        update_post(&mut self.conn.borrow_mut(), post)
    }
    fn delete_post(&self, id: &str) -> Result<()> {
        delete_post(&mut self.conn.borrow_mut(), id)
    }
    fn get_post(&self, id: &str) -> Result<Post> {
        get_post(&mut self.conn.borrow_mut(), id)
    }
    fn query_posts(
        &self,
        query: &PostQuery,
        pagination: &Pagination,
    ) -> Result<Vec<PostWithStats>> {
        query_posts(&mut self.conn.borrow_mut(), query, pagination)
    }
    fn count_posts(&self, query: &PostQuery) -> Result<u64> {
        count_posts(&mut self.conn.borrow_mut(), query)
    }
}

impl<'a> PostRepo for DbConnection<'a> {
    fn create_post(&self, post: &Post) -> Result<()> {
        create_post(&mut self.conn.borrow_mut(), post)
    }
    fn update_post(&self, post: &Post) -> Result<()> {
        update_post(&mut self.conn.borrow_mut(), post)
    }
    fn delete_post(&self, id: &str) -> Result<()> {
        delete_post(&mut self.conn.borrow_mut(), id)
    }
    fn get_post(&self, id: &str) -> Result<Post> {
        get_post(&mut self.conn.borrow_mut(), id)
    }
    fn query_posts(
        &self,
        query: &PostQuery,
        pagination: &Pagination,
    ) -> Result<Vec<PostWithStats>> {
        query_posts(&mut self.conn.borrow_mut(), query, pagination)
    }
    fn count_posts(&self, query: &PostQuery) -> Result<u64> {
        count_posts(&mut self.conn.borrow_mut(), query)
    }
}

impl<'a> PostRepo for DbReadOnly<'a> {
    fn create_post(&self, _post: &Post) -> Result<()> {
        unreachable!();
    }
    fn update_post(&self, _post: &Post) -> Result<()> {
        unreachable!();
    }
    fn delete_post(&self, _id: &str) -> Result<()> {
        unreachable!();
    }
    fn get_post(&self, id: &str) -> Result<Post> {
        get_post(&mut self.conn.borrow_mut(), id)
    }
    fn query_posts(
        &self,
        query: &PostQuery,
        pagination: &Pagination,
    ) -> Result<Vec<PostWithStats>> {
        query_posts(&mut self.conn.borrow_mut(), query, pagination)
    }
    fn count_posts(&self, query: &PostQuery) -> Result<u64> {
        count_posts(&mut self.conn.borrow_mut(), query)
    }
}

fn create_post(conn: &mut SqliteConnection, post: &Post) -> Result<()> {
    let Post {
        id,
        author,
        created_at,
        text,
        text_preview,
        group,
        tags,
    } = post;
    let author_rowid = resolve_user_rowid(conn, author)?;
    let group_rowid = group
        .as_deref()
        .map(|slug| resolve_group_rowid(conn, slug))
        .transpose()?;
    let new_post = models::NewPost {
        id: id.as_str(),
        author_rowid,
        group_rowid,
        created_at: created_at.as_millis(),
        text,
        text_preview,
    };
    diesel::insert_into(schema::post::table)
        .values(&new_post)
        .execute(conn)
        .map_err(from_diesel_err)?;
    let post_rowid = resolve_post_rowid(conn, id.as_str())?;
    insert_post_tags(conn, post_rowid, tags)
}

fn update_post(conn: &mut SqliteConnection, post: &Post) -> Result<()> {
    use schema::{post::dsl, post_tag::dsl as tag_dsl};
    let post_rowid = resolve_post_rowid(conn, post.id.as_str())?;
    let group_rowid = post
        .group
        .as_deref()
        .map(|slug| resolve_group_rowid(conn, slug))
        .transpose()?;
    let changeset = models::UpdatePost {
        group_rowid,
        text: &post.text,
        text_preview: &post.text_preview,
    };
    diesel::update(dsl::post.filter(dsl::rowid.eq(post_rowid)))
        .set(&changeset)
        .execute(conn)
        .map_err(from_diesel_err)?;
    diesel::delete(tag_dsl::post_tag.filter(tag_dsl::post_rowid.eq(post_rowid)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    insert_post_tags(conn, post_rowid, &post.tags)
}

fn insert_post_tags(conn: &mut SqliteConnection, post_rowid: i64, tags: &[String]) -> Result<()> {
    if tags.is_empty() {
        return Ok(());
    }
    let post_tags = tags
        .iter()
        .map(|slug| {
            resolve_tag_rowid(conn, slug).map(|tag_rowid| models::NewPostTag {
                post_rowid,
                tag_rowid,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    diesel::insert_into(schema::post_tag::table)
        .values(&post_tags)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

// Comments, replies and votes are deleted by the database
fn delete_post(conn: &mut SqliteConnection, id: &str) -> Result<()> {
    use schema::post::dsl;
    let count = diesel::delete(dsl::post.filter(dsl::id.eq(id)))
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    debug_assert_eq!(1, count);
    Ok(())
}

fn get_post(conn: &mut SqliteConnection, id: &str) -> Result<Post> {
    let rowid = resolve_post_rowid(conn, id)?;
    load_posts(conn, &[rowid])?
        .pop()
        .map(|(_, post)| post)
        .ok_or(repo::Error::NotFound)
}

// The results are in the same order as the given rowids
fn load_posts(conn: &mut SqliteConnection, rowids: &[i64]) -> Result<Vec<(i64, Post)>> {
    use schema::{
        post::dsl as post_dsl, post_group::dsl as group_dsl, post_tag::dsl as post_tag_dsl,
        tag::dsl as tag_dsl, users::dsl as user_dsl,
    };
    if rowids.is_empty() {
        return Ok(vec![]);
    }
    let rows = schema::post::table
        .inner_join(schema::users::table)
        .left_join(schema::post_group::table)
        .select((
            post_dsl::rowid,
            post_dsl::id,
            post_dsl::created_at,
            post_dsl::text,
            post_dsl::text_preview,
            user_dsl::username,
            group_dsl::slug.nullable(),
        ))
        .filter(post_dsl::rowid.eq_any(rowids))
        .load::<models::JoinedPost>(conn)
        .map_err(from_diesel_err)?;
    let mut tags: HashMap<i64, Vec<String>> = HashMap::new();
    for (post_rowid, slug) in schema::post_tag::table
        .inner_join(schema::tag::table)
        .select((post_tag_dsl::post_rowid, tag_dsl::slug))
        .filter(post_tag_dsl::post_rowid.eq_any(rowids))
        .order_by(tag_dsl::slug)
        .load::<(i64, String)>(conn)
        .map_err(from_diesel_err)?
    {
        tags.entry(post_rowid).or_default().push(slug);
    }
    let mut posts: HashMap<_, _> = rows
        .into_iter()
        .map(|row| {
            let models::JoinedPost {
                rowid,
                id,
                created_at,
                text,
                text_preview,
                author,
                group,
            } = row;
            let post = Post {
                id: id.into(),
                author,
                created_at: Timestamp::from_millis(created_at),
                text,
                text_preview,
                group,
                tags: tags.remove(&rowid).unwrap_or_default(),
            };
            (rowid, post)
        })
        .collect();
    Ok(rowids
        .iter()
        .filter_map(|rowid| posts.remove(rowid).map(|post| (*rowid, post)))
        .collect())
}

// Returns `None` if the query references a group, tag or
// user that does not exist and therefore cannot match.
fn filter_posts<'a>(
    conn: &mut SqliteConnection,
    query: &PostQuery,
) -> Result<Option<schema::post::BoxedQuery<'a, Sqlite>>> {
    use schema::{follow::dsl as follow_dsl, post::dsl, post_tag::dsl as post_tag_dsl};
    let PostQuery {
        group,
        tag,
        author,
        text,
        followed_by,
        order: _,
    } = query;
    let mut filtered = dsl::post.into_boxed();
    if let Some(slug) = group {
        let Some(group_rowid) = optional_rowid(resolve_group_rowid(conn, slug))? else {
            return Ok(None);
        };
        filtered = filtered.filter(dsl::group_rowid.eq(group_rowid));
    }
    if let Some(slug) = tag {
        let Some(tag_rowid) = optional_rowid(resolve_tag_rowid(conn, slug))? else {
            return Ok(None);
        };
        filtered = filtered.filter(
            dsl::rowid.eq_any(
                post_tag_dsl::post_tag
                    .select(post_tag_dsl::post_rowid)
                    .filter(post_tag_dsl::tag_rowid.eq(tag_rowid)),
            ),
        );
    }
    if let Some(username) = author {
        let Some(author_rowid) = optional_rowid(resolve_user_rowid(conn, username))? else {
            return Ok(None);
        };
        filtered = filtered.filter(dsl::author_rowid.eq(author_rowid));
    }
    if let Some(text) = text {
        // LIKE is case insensitive for ASCII characters
        let pattern = format!("%{}%", escape_like_pattern(text));
        filtered = filtered.filter(dsl::text.like(pattern).escape('\\'));
    }
    if let Some(username) = followed_by {
        let Some(follower_rowid) = optional_rowid(resolve_user_rowid(conn, username))? else {
            return Ok(None);
        };
        filtered = filtered.filter(
            dsl::author_rowid.eq_any(
                follow_dsl::follow
                    .select(follow_dsl::author_rowid)
                    .filter(follow_dsl::follower_rowid.eq(follower_rowid)),
            ),
        );
    }
    Ok(Some(filtered))
}

fn escape_like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn query_posts(
    conn: &mut SqliteConnection,
    query: &PostQuery,
    pagination: &Pagination,
) -> Result<Vec<PostWithStats>> {
    use schema::post::dsl;
    let Some(filtered) = filter_posts(conn, query)? else {
        return Ok(vec![]);
    };
    let page_rowids = match query.order {
        PostOrder::PubDate => {
            let mut ordered = filtered
                .select(dsl::rowid)
                .order_by((dsl::created_at.desc(), dsl::rowid.desc()));
            if let Some(offset) = pagination.offset {
                ordered = ordered.offset(offset as i64);
            }
            if let Some(limit) = pagination.limit {
                ordered = ordered.limit(limit as i64);
            }
            ordered.load::<i64>(conn).map_err(from_diesel_err)?
        }
        order => {
            // Both rankings depend on aggregates of all matching posts
            let candidates = filtered
                .select((dsl::rowid, dsl::id, dsl::created_at))
                .load::<(i64, String, i64)>(conn)
                .map_err(from_diesel_err)?;
            let rowids: Vec<_> = candidates.iter().map(|(rowid, _, _)| *rowid).collect();
            let ids: Vec<_> = candidates.iter().map(|(_, id, _)| id.as_str()).collect();
            let comment_counts = count_comments_of_posts(conn, &rowids)?;
            let vote_counts: HashMap<_, _> =
                vote::count_votes_of_targets(conn, VoteTargetKind::Post, &ids)?
                    .into_iter()
                    .collect();
            let mut ranked: Vec<_> = candidates
                .iter()
                .map(|(rowid, id, created_at)| {
                    let score = match order {
                        PostOrder::Comments => {
                            comment_counts.get(rowid).copied().unwrap_or_default() as i64
                        }
                        _ => vote_counts
                            .get(id.as_str())
                            .map(VoteCounts::sum_rating)
                            .unwrap_or_default(),
                    };
                    Reverse((score, *created_at, *rowid))
                })
                .collect();
            ranked.sort_unstable();
            let offset = pagination.offset.unwrap_or_default() as usize;
            let limit = pagination.limit.map_or(usize::MAX, |limit| limit as usize);
            ranked
                .into_iter()
                .skip(offset)
                .take(limit)
                .map(|Reverse((_, _, rowid))| rowid)
                .collect()
        }
    };
    let posts = load_posts(conn, &page_rowids)?;
    load_post_stats(conn, posts)
}

fn load_post_stats(
    conn: &mut SqliteConnection,
    posts: Vec<(i64, Post)>,
) -> Result<Vec<PostWithStats>> {
    let rowids: Vec<_> = posts.iter().map(|(rowid, _)| *rowid).collect();
    let comment_counts = count_comments_of_posts(conn, &rowids)?;
    let ids: Vec<_> = posts.iter().map(|(_, post)| post.id.as_str()).collect();
    let vote_counts: HashMap<_, _> =
        vote::count_votes_of_targets(conn, VoteTargetKind::Post, &ids)?
            .into_iter()
            .collect();
    Ok(posts
        .into_iter()
        .map(|(rowid, post)| PostWithStats {
            comment_count: comment_counts.get(&rowid).copied().unwrap_or_default(),
            votes: vote_counts
                .get(post.id.as_str())
                .copied()
                .unwrap_or_default(),
            post,
        })
        .collect())
}

fn count_comments_of_posts(
    conn: &mut SqliteConnection,
    post_rowids: &[i64],
) -> Result<HashMap<i64, u64>> {
    use schema::post_comment::dsl;
    if post_rowids.is_empty() {
        return Ok(HashMap::new());
    }
    Ok(dsl::post_comment
        .filter(dsl::post_rowid.eq_any(post_rowids))
        .group_by(dsl::post_rowid)
        .select((dsl::post_rowid, diesel::dsl::count_star()))
        .load::<(i64, i64)>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(|(rowid, count)| (rowid, count as u64))
        .collect())
}

fn count_posts(conn: &mut SqliteConnection, query: &PostQuery) -> Result<u64> {
    let Some(filtered) = filter_posts(conn, query)? else {
        return Ok(0);
    };
    let count = filtered
        .count()
        .get_result::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(count as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_wildcards_in_like_patterns() {
        assert_eq!("100\\%", escape_like_pattern("100%"));
        assert_eq!("a\\_b\\\\c", escape_like_pattern("a_b\\c"));
        assert_eq!("plain", escape_like_pattern("plain"));
    }
}
