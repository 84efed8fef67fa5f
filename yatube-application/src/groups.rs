use super::*;

pub fn create_group(connections: &sqlite::Connections, new_group: usecases::NewGroup) -> Result<Group> {
    let group = connections
        .exclusive()?
        .transaction(|conn| usecases::create_group(conn, new_group))?;
    info!("Created group {}", group.slug);
    Ok(group)
}

pub fn create_tag(connections: &sqlite::Connections, new_tag: usecases::NewTag) -> Result<Tag> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::create_tag(conn, new_tag))?)
}
