use super::*;

/// Cast a vote within a single transaction.
///
/// Two concurrent first votes of the same voter on the same
/// target both find no existing vote and try to insert one.
/// The loser of this race is rejected by the unique index and
/// repeats the whole transaction, then finding the vote of the
/// winner.
pub fn cast_vote(
    connections: &sqlite::Connections,
    voter: &str,
    target: &VoteTarget,
    value: VoteValue,
) -> Result<VoteSummary> {
    retry_once_on_conflict(|| {
        Ok(connections.exclusive()?.transaction(|conn| {
            usecases::cast_vote(conn, voter, target, value).map_err(|err| {
                debug!("Failed to cast vote of {voter} on {target}: {err}");
                err
            })
        })?)
    })
}

pub fn retry_once_on_conflict<T, F>(mut f: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    match f() {
        Err(err) if err.is_conflict() => {
            warn!("Retrying after conflicting modification: {err}");
            f()
        }
        res => res,
    }
}
