use super::prelude::*;
use crate::text::text_preview;

pub const POSTS_PER_PAGE: u64 = 10;

#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub text: String,
    pub group: Option<String>,
    pub tags: Vec<String>,
}

pub fn create_post<R>(repo: &R, author: &str, p: NewPost) -> Result<Post>
where
    R: UserRepo + PostRepo + GroupRepo + TagRepo,
{
    if repo.try_get_user(author)?.is_none() {
        return Err(Error::Unauthorized);
    }
    let NewPost { text, group, tags } = p;
    let (group, tags) = check_group_and_tags(repo, group, tags)?;
    let text = checked_text(text)?;
    let post = Post {
        id: Id::new(),
        author: author.to_owned(),
        created_at: Timestamp::now(),
        text_preview: text_preview(&text),
        text,
        group,
        tags,
    };
    log::debug!("Creating post {} of {}", post.id, post.author);
    repo.create_post(&post)?;
    Ok(post)
}

pub fn update_post<R>(repo: &R, editor: &str, id: &str, p: NewPost) -> Result<Post>
where
    R: PostRepo + GroupRepo + TagRepo,
{
    let mut post = repo.get_post(id)?;
    if post.author != editor {
        return Err(Error::Forbidden);
    }
    let NewPost { text, group, tags } = p;
    let (group, tags) = check_group_and_tags(repo, group, tags)?;
    post.text = checked_text(text)?;
    post.text_preview = text_preview(&post.text);
    post.group = group;
    post.tags = tags;
    repo.update_post(&post)?;
    Ok(post)
}

pub fn delete_post<R: PostRepo>(repo: &R, editor: &str, id: &str) -> Result<()> {
    let post = repo.get_post(id)?;
    if post.author != editor {
        return Err(Error::Forbidden);
    }
    log::info!("Deleting post {id} of {editor}");
    Ok(repo.delete_post(id)?)
}

pub fn get_post<R: PostRepo>(repo: &R, id: &str) -> Result<Post> {
    Ok(repo.get_post(id)?)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPage {
    pub posts: Vec<PostWithStats>,
    pub total_count: u64,
    pub page: u64,
}

impl PostPage {
    pub fn page_count(&self) -> u64 {
        self.total_count.div_ceil(POSTS_PER_PAGE)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }
}

/// Load a single page of posts. Pages start at 1.
pub fn query_posts<R: PostRepo>(repo: &R, query: &PostQuery, page: u64) -> Result<PostPage> {
    // The store addresses rows with signed 64-bit offsets
    let offset = page
        .checked_sub(1)
        .and_then(|skipped| skipped.checked_mul(POSTS_PER_PAGE))
        .filter(|offset| i64::try_from(*offset).is_ok())
        .ok_or(Error::InvalidPage)?;
    let pagination = Pagination {
        offset: Some(offset),
        limit: Some(POSTS_PER_PAGE),
    };
    let posts = repo.query_posts(query, &pagination)?;
    let total_count = repo.count_posts(query)?;
    Ok(PostPage {
        posts,
        total_count,
        page,
    })
}

fn checked_text(text: String) -> Result<String> {
    if text.trim().is_empty() {
        return Err(Error::EmptyText);
    }
    Ok(text)
}

fn check_group_and_tags<R>(
    repo: &R,
    group: Option<String>,
    tags: Vec<String>,
) -> Result<(Option<String>, Vec<String>)>
where
    R: GroupRepo + TagRepo,
{
    let group = group
        .map(|slug| repo.get_group(slug.trim()).map(|g| g.slug))
        .transpose()?;
    let mut tags: Vec<_> = tags.iter().map(|t| t.trim()).collect();
    tags.sort_unstable();
    tags.dedup();
    let existing = repo.get_tags(&tags)?;
    if existing.len() != tags.len() {
        return Err(RepoError::NotFound.into());
    }
    Ok((group, tags.into_iter().map(ToOwned::to_owned).collect()))
}
