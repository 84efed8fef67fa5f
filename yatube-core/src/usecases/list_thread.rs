use std::collections::HashMap;

use super::prelude::*;

/// All comments of a post arranged as a forest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentThread {
    /// Root comments, oldest first
    pub roots: Vec<Comment>,
    /// All descendants of each root in tree order, keyed by the id of the root
    pub descendants: HashMap<Id, Vec<Comment>>,
    /// Immediate replies, oldest first, keyed by the id of their parent
    pub children: HashMap<Id, Vec<Comment>>,
}

impl CommentThread {
    pub fn from_comments(comments: Vec<Comment>) -> Self {
        let mut roots = vec![];
        let mut children: HashMap<Id, Vec<Comment>> = HashMap::new();
        for comment in comments {
            match &comment.parent_id {
                Some(parent_id) => children.entry(parent_id.clone()).or_default().push(comment),
                None => roots.push(comment),
            }
        }
        let descendants = roots
            .iter()
            .map(|root| {
                let mut collected = vec![];
                collect_descendants(&children, &root.id, &mut collected);
                (root.id.clone(), collected)
            })
            .collect();
        Self {
            roots,
            descendants,
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.roots.len() + self.descendants.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// All comments in tree order
    pub fn iter(&self) -> impl Iterator<Item = &Comment> {
        self.roots.iter().flat_map(move |root| {
            std::iter::once(root).chain(self.descendants.get(&root.id).into_iter().flatten())
        })
    }

    pub fn children_of(&self, id: &Id) -> &[Comment] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }
}

fn collect_descendants(
    children: &HashMap<Id, Vec<Comment>>,
    parent_id: &Id,
    collected: &mut Vec<Comment>,
) {
    for child in children.get(parent_id).into_iter().flatten() {
        collected.push(child.clone());
        collect_descendants(children, &child.id, collected);
    }
}

pub fn list_thread<R>(repo: &R, post_id: &str) -> Result<CommentThread>
where
    R: PostRepo + CommentRepository,
{
    let post = repo.get_post(post_id)?;
    let comments = repo.load_comments_of_post(post.id.as_str())?;
    Ok(CommentThread::from_comments(comments))
}
