use super::*;

impl<'a> TagRepo for DbReadWrite<'a> {
    fn create_tag(&self, tag: &Tag) -> Result<()> {
        create_tag(&mut self.conn.borrow_mut(), tag)
    }
    fn get_tags(&self, slugs: &[&str]) -> Result<Vec<Tag>> {
        get_tags(&mut self.conn.borrow_mut(), slugs)
    }
    fn all_tags(&self) -> Result<Vec<Tag>> {
        all_tags(&mut self.conn.borrow_mut())
    }
}

impl<'a> TagRepo for DbConnection<'a> {
    fn create_tag(&self, tag: &Tag) -> Result<()> {
        create_tag(&mut self.conn.borrow_mut(), tag)
    }
    fn get_tags(&self, slugs: &[&str]) -> Result<Vec<Tag>> {
        get_tags(&mut self.conn.borrow_mut(), slugs)
    }
    fn all_tags(&self) -> Result<Vec<Tag>> {
        all_tags(&mut self.conn.borrow_mut())
    }
}

impl<'a> TagRepo for DbReadOnly<'a> {
    fn create_tag(&self, _tag: &Tag) -> Result<()> {
        unreachable!();
    }
    fn get_tags(&self, slugs: &[&str]) -> Result<Vec<Tag>> {
        get_tags(&mut self.conn.borrow_mut(), slugs)
    }
    fn all_tags(&self) -> Result<Vec<Tag>> {
        all_tags(&mut self.conn.borrow_mut())
    }
}

impl From<models::TagEntity> for Tag {
    fn from(from: models::TagEntity) -> Self {
        let models::TagEntity {
            rowid: _,
            slug,
            title,
        } = from;
        Self { slug, title }
    }
}

fn create_tag(conn: &mut SqliteConnection, tag: &Tag) -> Result<()> {
    let new_tag = models::NewTag {
        slug: &tag.slug,
        title: &tag.title,
    };
    diesel::insert_into(schema::tag::table)
        .values(&new_tag)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn get_tags(conn: &mut SqliteConnection, slugs: &[&str]) -> Result<Vec<Tag>> {
    use schema::tag::dsl;
    if slugs.is_empty() {
        return Ok(vec![]);
    }
    Ok(dsl::tag
        .filter(dsl::slug.eq_any(slugs))
        .order_by(dsl::slug)
        .load::<models::TagEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Into::into)
        .collect())
}

fn all_tags(conn: &mut SqliteConnection) -> Result<Vec<Tag>> {
    use schema::tag::dsl;
    Ok(dsl::tag
        .order_by((dsl::title, dsl::slug))
        .load::<models::TagEntity>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(Into::into)
        .collect())
}
