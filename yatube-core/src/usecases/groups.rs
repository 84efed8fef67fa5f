use super::prelude::*;
use crate::{text::slugify, util::validate};

#[derive(Debug, Clone, Default)]
pub struct NewGroup {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
}

pub fn create_group<R: GroupRepo>(repo: &R, g: NewGroup) -> Result<Group> {
    let title = g.title.trim();
    if !validate::is_valid_title(title, Group::max_title_len()) {
        return Err(Error::Title);
    }
    let slug = match g.slug {
        Some(slug) => slug.trim().to_owned(),
        None => slugify(title),
    };
    if !validate::is_valid_slug(&slug) {
        return Err(Error::Slug);
    }
    let group = Group {
        slug,
        title: title.to_owned(),
        description: g.description.unwrap_or_default(),
    };
    repo.create_group(&group).map_err(|err| match err {
        RepoError::AlreadyExists => Error::SlugExists,
        err => err.into(),
    })?;
    Ok(group)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupOrdering {
    #[default]
    Title,
    PostsCount,
    PostsCountDesc,
}

impl std::str::FromStr for GroupOrdering {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "title" => Ok(Self::Title),
            "posts_count" => Ok(Self::PostsCount),
            "-posts_count" => Ok(Self::PostsCountDesc),
            _ => Err(Error::InvalidOrdering),
        }
    }
}

pub fn all_groups<R: GroupRepo>(
    repo: &R,
    ordering: GroupOrdering,
) -> Result<Vec<GroupWithPostCount>> {
    let mut groups = repo.all_groups_with_post_count()?;
    match ordering {
        GroupOrdering::Title => groups.sort_by(|a, b| a.group.title.cmp(&b.group.title)),
        GroupOrdering::PostsCount => groups.sort_by_key(|g| g.posts_count),
        GroupOrdering::PostsCountDesc => {
            groups.sort_by_key(|g| std::cmp::Reverse(g.posts_count))
        }
    }
    Ok(groups)
}
