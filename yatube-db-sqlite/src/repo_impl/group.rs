use super::*;

impl<'a> GroupRepo for DbReadWrite<'a> {
    fn create_group(&self, group: &Group) -> Result<()> {
        create_group(&mut self.conn.borrow_mut(), group)
    }
    fn get_group(&self, slug: &str) -> Result<Group> {
        get_group(&mut self.conn.borrow_mut(), slug)
    }
    fn all_groups_with_post_count(&self) -> Result<Vec<GroupWithPostCount>> {
        all_groups_with_post_count(&mut self.conn.borrow_mut())
    }
}

impl<'a> GroupRepo for DbConnection<'a> {
    fn create_group(&self, group: &Group) -> Result<()> {
        create_group(&mut self.conn.borrow_mut(), group)
    }
    fn get_group(&self, slug: &str) -> Result<Group> {
        get_group(&mut self.conn.borrow_mut(), slug)
    }
    fn all_groups_with_post_count(&self) -> Result<Vec<GroupWithPostCount>> {
        all_groups_with_post_count(&mut self.conn.borrow_mut())
    }
}

impl<'a> GroupRepo for DbReadOnly<'a> {
    fn create_group(&self, _group: &Group) -> Result<()> {
        unreachable!();
    }
    fn get_group(&self, slug: &str) -> Result<Group> {
        get_group(&mut self.conn.borrow_mut(), slug)
    }
    fn all_groups_with_post_count(&self) -> Result<Vec<GroupWithPostCount>> {
        all_groups_with_post_count(&mut self.conn.borrow_mut())
    }
}

impl From<models::GroupEntity> for Group {
    fn from(from: models::GroupEntity) -> Self {
        let models::GroupEntity {
            rowid: _,
            slug,
            title,
            description,
        } = from;
        Self {
            slug,
            title,
            description,
        }
    }
}

fn create_group(conn: &mut SqliteConnection, group: &Group) -> Result<()> {
    let new_group = models::NewGroup {
        slug: &group.slug,
        title: &group.title,
        description: &group.description,
    };
    diesel::insert_into(schema::post_group::table)
        .values(&new_group)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_group(conn: &mut SqliteConnection, slug: &str) -> Result<Group> {
    use schema::post_group::dsl;
    Ok(dsl::post_group
        .filter(dsl::slug.eq(slug))
        .first::<models::GroupEntity>(conn)
        .map_err(from_diesel_err)?
        .into())
}

fn all_groups_with_post_count(conn: &mut SqliteConnection) -> Result<Vec<GroupWithPostCount>> {
    use schema::{post::dsl as post_dsl, post_group::dsl as group_dsl};
    let groups = group_dsl::post_group
        .order_by(group_dsl::title)
        .load::<models::GroupEntity>(conn)
        .map_err(from_diesel_err)?;
    let post_counts = post_dsl::post
        .filter(post_dsl::group_rowid.is_not_null())
        .group_by(post_dsl::group_rowid)
        .select((post_dsl::group_rowid, diesel::dsl::count_star()))
        .load::<(Option<i64>, i64)>(conn)
        .map_err(from_diesel_err)?;
    let post_counts: std::collections::HashMap<_, _> = post_counts
        .into_iter()
        .filter_map(|(rowid, count)| rowid.map(|rowid| (rowid, count as u64)))
        .collect();
    Ok(groups
        .into_iter()
        .map(|group| GroupWithPostCount {
            posts_count: post_counts.get(&group.rowid).copied().unwrap_or_default(),
            group: group.into(),
        })
        .collect())
}
