use std::collections::HashMap;

use itertools::Itertools as _;

use super::prelude::*;

/// Per-target flags whether the viewer has liked or disliked it.
///
/// The results are in the same order as the given targets.
/// Anonymous viewers have never voted, the repository is not
/// accessed at all in this case.
pub fn annotate_viewer_state<R>(
    repo: &R,
    targets: &[VoteTarget],
    viewer: Option<&str>,
) -> Result<Vec<ViewerVote>>
where
    R: VoteRepo,
{
    let Some(viewer) = viewer else {
        return Ok(vec![ViewerVote::default(); targets.len()]);
    };
    let mut values = HashMap::with_capacity(targets.len());
    let ids_by_kind = targets
        .iter()
        .map(|t| (t.kind, t.id.as_str()))
        .into_group_map();
    for (kind, ids) in ids_by_kind {
        for vote in repo.load_votes_of_voter(viewer, kind, &ids)? {
            values.insert(vote.target, vote.value);
        }
    }
    Ok(targets
        .iter()
        .map(|t| VoteState::from(values.get(t).copied()).into())
        .collect())
}

/// Aggregated votes of many targets of the same kind.
///
/// The results are in the same order as the given ids.
pub fn count_votes_of_targets<R>(
    repo: &R,
    kind: VoteTargetKind,
    ids: &[&str],
) -> Result<Vec<VoteCounts>>
where
    R: VoteRepo,
{
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let counts: HashMap<_, _> = repo
        .count_votes_of_targets(kind, ids)?
        .into_iter()
        .collect();
    Ok(ids
        .iter()
        .map(|id| counts.get(*id).copied().unwrap_or_default())
        .collect())
}
