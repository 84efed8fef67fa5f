use super::*;

impl<'a> FollowRepo for DbReadWrite<'a> {
    fn create_follow(&self, follow: &Follow) -> Result<()> {
        create_follow(&mut self.conn.borrow_mut(), follow)
    }
    fn delete_follow(&self, follow: &Follow) -> Result<()> {
        delete_follow(&mut self.conn.borrow_mut(), follow)
    }
    fn is_following(&self, follow: &Follow) -> Result<bool> {
        is_following(&mut self.conn.borrow_mut(), follow)
    }
    fn follows_of(&self, follower: &str) -> Result<Vec<Follow>> {
        follows_of(&mut self.conn.borrow_mut(), follower)
    }
}

impl<'a> FollowRepo for DbConnection<'a> {
    fn create_follow(&self, follow: &Follow) -> Result<()> {
        create_follow(&mut self.conn.borrow_mut(), follow)
    }
    fn delete_follow(&self, follow: &Follow) -> Result<()> {
        delete_follow(&mut self.conn.borrow_mut(), follow)
    }
    fn is_following(&self, follow: &Follow) -> Result<bool> {
        is_following(&mut self.conn.borrow_mut(), follow)
    }
    fn follows_of(&self, follower: &str) -> Result<Vec<Follow>> {
        follows_of(&mut self.conn.borrow_mut(), follower)
    }
}

impl<'a> FollowRepo for DbReadOnly<'a> {
    fn create_follow(&self, _follow: &Follow) -> Result<()> {
        unreachable!();
    }
    fn delete_follow(&self, _follow: &Follow) -> Result<()> {
        unreachable!();
    }
    fn is_following(&self, follow: &Follow) -> Result<bool> {
        is_following(&mut self.conn.borrow_mut(), follow)
    }
    fn follows_of(&self, follower: &str) -> Result<Vec<Follow>> {
        follows_of(&mut self.conn.borrow_mut(), follower)
    }
}

fn resolve_follow(conn: &mut SqliteConnection, follow: &Follow) -> Result<models::NewFollow> {
    Ok(models::NewFollow {
        follower_rowid: resolve_user_rowid(conn, &follow.follower)?,
        author_rowid: resolve_user_rowid(conn, &follow.author)?,
    })
}

fn create_follow(conn: &mut SqliteConnection, follow: &Follow) -> Result<()> {
    let new_follow = resolve_follow(conn, follow)?;
    diesel::insert_into(schema::follow::table)
        .values(&new_follow)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn delete_follow(conn: &mut SqliteConnection, follow: &Follow) -> Result<()> {
    use schema::follow::dsl;
    let models::NewFollow {
        follower_rowid,
        author_rowid,
    } = resolve_follow(conn, follow)?;
    let count = diesel::delete(
        dsl::follow
            .filter(dsl::follower_rowid.eq(follower_rowid))
            .filter(dsl::author_rowid.eq(author_rowid)),
    )
    .execute(conn)
    .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    Ok(())
}

fn is_following(conn: &mut SqliteConnection, follow: &Follow) -> Result<bool> {
    use schema::follow::dsl;
    let (Some(follower_rowid), Some(author_rowid)) = (
        optional_rowid(resolve_user_rowid(conn, &follow.follower))?,
        optional_rowid(resolve_user_rowid(conn, &follow.author))?,
    ) else {
        return Ok(false);
    };
    let count = dsl::follow
        .select(diesel::dsl::count_star())
        .filter(dsl::follower_rowid.eq(follower_rowid))
        .filter(dsl::author_rowid.eq(author_rowid))
        .first::<i64>(conn)
        .map_err(from_diesel_err)?;
    Ok(count > 0)
}

fn follows_of(conn: &mut SqliteConnection, follower: &str) -> Result<Vec<Follow>> {
    use schema::{follow::dsl as follow_dsl, users::dsl as user_dsl};
    let Some(follower_rowid) = optional_rowid(resolve_user_rowid(conn, follower))? else {
        return Ok(vec![]);
    };
    Ok(schema::follow::table
        .inner_join(schema::users::table.on(user_dsl::rowid.eq(follow_dsl::author_rowid)))
        .select(user_dsl::username)
        .filter(follow_dsl::follower_rowid.eq(follower_rowid))
        .order_by(user_dsl::username)
        .load::<String>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(|author| Follow {
            follower: follower.to_owned(),
            author,
        })
        .collect())
}
