use super::*;

impl<'a> UserRepo for DbReadWrite<'a> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }
    fn get_user(&self, username: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), username)
    }
    fn try_get_user(&self, username: &str) -> Result<Option<User>> {
        try_get_user(&mut self.conn.borrow_mut(), username)
    }
    fn try_get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }
}

impl<'a> UserRepo for DbConnection<'a> {
    fn create_user(&self, user: &User) -> Result<()> {
        create_user(&mut self.conn.borrow_mut(), user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        update_user(&mut self.conn.borrow_mut(), user)
    }
    fn get_user(&self, username: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), username)
    }
    fn try_get_user(&self, username: &str) -> Result<Option<User>> {
        try_get_user(&mut self.conn.borrow_mut(), username)
    }
    fn try_get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }
}

impl<'a> UserRepo for DbReadOnly<'a> {
    fn create_user(&self, _user: &User) -> Result<()> {
        unreachable!();
    }
    fn update_user(&self, _user: &User) -> Result<()> {
        unreachable!();
    }
    fn get_user(&self, username: &str) -> Result<User> {
        get_user(&mut self.conn.borrow_mut(), username)
    }
    fn try_get_user(&self, username: &str) -> Result<Option<User>> {
        try_get_user(&mut self.conn.borrow_mut(), username)
    }
    fn try_get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        try_get_user_by_email(&mut self.conn.borrow_mut(), email)
    }
}

impl<'a> From<&'a User> for models::NewUser<'a> {
    fn from(from: &'a User) -> Self {
        let User {
            username,
            email,
            password,
            first_name,
            last_name,
            joined_at,
        } = from;
        Self {
            username,
            email,
            password: password.as_hash(),
            first_name,
            last_name,
            created_at: joined_at.as_millis(),
        }
    }
}

impl From<models::UserEntity> for User {
    fn from(from: models::UserEntity) -> Self {
        let models::UserEntity {
            rowid: _,
            username,
            email,
            password,
            first_name,
            last_name,
            created_at,
        } = from;
        Self {
            username,
            email,
            password: Password::from_hash(password),
            first_name,
            last_name,
            joined_at: Timestamp::from_millis(created_at),
        }
    }
}

fn create_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    let new_user = models::NewUser::from(u);
    diesel::insert_into(schema::users::table)
        .values(&new_user)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_user(conn: &mut SqliteConnection, u: &User) -> Result<()> {
    use schema::users::dsl;
    let new_user = models::NewUser::from(u);
    let count = diesel::update(dsl::users.filter(dsl::username.eq(new_user.username)))
        .set(&new_user)
        .execute(conn)
        .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    debug_assert_eq!(1, count);
    Ok(())
}

fn get_user(conn: &mut SqliteConnection, username: &str) -> Result<User> {
    use schema::users::dsl;
    Ok(dsl::users
        .filter(dsl::username.eq(username))
        .first::<models::UserEntity>(conn)
        .map_err(from_diesel_err)?
        .into())
}

fn try_get_user(conn: &mut SqliteConnection, username: &str) -> Result<Option<User>> {
    use schema::users::dsl;
    Ok(dsl::users
        .filter(dsl::username.eq(username))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(Into::into))
}

fn try_get_user_by_email(conn: &mut SqliteConnection, email: &str) -> Result<Option<User>> {
    use schema::users::dsl;
    Ok(dsl::users
        .filter(dsl::email.eq(email))
        .first::<models::UserEntity>(conn)
        .optional()
        .map_err(from_diesel_err)?
        .map(Into::into))
}
