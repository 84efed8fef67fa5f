use super::prelude::*;
use crate::{text::slugify, util::validate};

#[derive(Debug, Clone, Default)]
pub struct NewTag {
    pub title: String,
    pub slug: Option<String>,
}

pub fn create_tag<R: TagRepo>(repo: &R, t: NewTag) -> Result<Tag> {
    let title = t.title.trim();
    if !validate::is_valid_title(title, Tag::max_title_len()) {
        return Err(Error::Title);
    }
    let slug = t
        .slug
        .map(|s| s.trim().to_owned())
        .unwrap_or_else(|| slugify(title));
    if !validate::is_valid_slug(&slug) {
        return Err(Error::Slug);
    }
    let tag = Tag {
        slug,
        title: title.to_owned(),
    };
    repo.create_tag(&tag).map_err(|err| match err {
        RepoError::AlreadyExists => Error::SlugExists,
        err => err.into(),
    })?;
    Ok(tag)
}

pub fn all_tags<R: TagRepo>(repo: &R) -> Result<Vec<Tag>> {
    Ok(repo.all_tags()?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::MockDb;
    use super::*;

    #[test]
    fn create_and_list_tags() {
        let db = MockDb::default();
        for title in ["Peace", "War"] {
            create_tag(
                &db,
                NewTag {
                    title: title.into(),
                    slug: None,
                },
            )
            .unwrap();
        }
        let err = create_tag(
            &db,
            NewTag {
                title: "Another war".into(),
                slug: Some("war".into()),
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::SlugExists));
        let slugs: Vec<_> = all_tags(&db).unwrap().into_iter().map(|t| t.slug).collect();
        assert_eq!(vec!["peace", "war"], slugs);
    }

    #[test]
    fn reject_long_titles() {
        let db = MockDb::default();
        let title = "x".repeat(Tag::max_title_len() + 1);
        assert!(matches!(
            create_tag(&db, NewTag { title, slug: None }),
            Err(Error::Title)
        ));
    }
}
