use std::collections::HashMap;

use super::*;

impl<'a> VoteRepo for DbReadWrite<'a> {
    fn create_vote(&self, vote: &Vote) -> Result<()> {
        create_vote(&mut self.conn.borrow_mut(), vote)
    }
    fn update_vote(&self, vote: &Vote) -> Result<()> {
        update_vote(&mut self.conn.borrow_mut(), vote)
    }
    fn delete_vote(&self, voter: &str, target: &VoteTarget) -> Result<()> {
        delete_vote(&mut self.conn.borrow_mut(), voter, target)
    }
    fn try_get_vote(&self, voter: &str, target: &VoteTarget) -> Result<Option<Vote>> {
        try_get_vote(&mut self.conn.borrow_mut(), voter, target)
    }
    fn count_votes(&self, target: &VoteTarget) -> Result<VoteCounts> {
        count_votes(&mut self.conn.borrow_mut(), target)
    }
    fn count_votes_of_targets(
        &self,
        kind: VoteTargetKind,
        ids: &[&str],
    ) -> Result<Vec<(Id, VoteCounts)>> {
        count_votes_of_targets(&mut self.conn.borrow_mut(), kind, ids)
    }
    fn load_votes_of_voter(
        &self,
        voter: &str,
        kind: VoteTargetKind,
        ids: &[&str],
    ) -> Result<Vec<Vote>> {
        load_votes_of_voter(&mut self.conn.borrow_mut(), voter, kind, ids)
    }
}

impl<'a> VoteRepo for DbConnection<'a> {
    fn create_vote(&self, vote: &Vote) -> Result<()> {
        create_vote(&mut self.conn.borrow_mut(), vote)
    }
    fn update_vote(&self, vote: &Vote) -> Result<()> {
        update_vote(&mut self.conn.borrow_mut(), vote)
    }
    fn delete_vote(&self, voter: &str, target: &VoteTarget) -> Result<()> {
        delete_vote(&mut self.conn.borrow_mut(), voter, target)
    }
    fn try_get_vote(&self, voter: &str, target: &VoteTarget) -> Result<Option<Vote>> {
        try_get_vote(&mut self.conn.borrow_mut(), voter, target)
    }
    fn count_votes(&self, target: &VoteTarget) -> Result<VoteCounts> {
        count_votes(&mut self.conn.borrow_mut(), target)
    }
    fn count_votes_of_targets(
        &self,
        kind: VoteTargetKind,
        ids: &[&str],
    ) -> Result<Vec<(Id, VoteCounts)>> {
        count_votes_of_targets(&mut self.conn.borrow_mut(), kind, ids)
    }
    fn load_votes_of_voter(
        &self,
        voter: &str,
        kind: VoteTargetKind,
        ids: &[&str],
    ) -> Result<Vec<Vote>> {
        load_votes_of_voter(&mut self.conn.borrow_mut(), voter, kind, ids)
    }
}

impl<'a> VoteRepo for DbReadOnly<'a> {
    fn create_vote(&self, _vote: &Vote) -> Result<()> {
        unreachable!();
    }
    fn update_vote(&self, _vote: &Vote) -> Result<()> {
        unreachable!();
    }
    fn delete_vote(&self, _voter: &str, _target: &VoteTarget) -> Result<()> {
        unreachable!();
    }
    fn try_get_vote(&self, voter: &str, target: &VoteTarget) -> Result<Option<Vote>> {
        try_get_vote(&mut self.conn.borrow_mut(), voter, target)
    }
    fn count_votes(&self, target: &VoteTarget) -> Result<VoteCounts> {
        count_votes(&mut self.conn.borrow_mut(), target)
    }
    fn count_votes_of_targets(
        &self,
        kind: VoteTargetKind,
        ids: &[&str],
    ) -> Result<Vec<(Id, VoteCounts)>> {
        count_votes_of_targets(&mut self.conn.borrow_mut(), kind, ids)
    }
    fn load_votes_of_voter(
        &self,
        voter: &str,
        kind: VoteTargetKind,
        ids: &[&str],
    ) -> Result<Vec<Vote>> {
        load_votes_of_voter(&mut self.conn.borrow_mut(), voter, kind, ids)
    }
}

// The unique index on (user_rowid, target_kind, target_id)
// rejects concurrent duplicates with `AlreadyExists`.
fn create_vote(conn: &mut SqliteConnection, vote: &Vote) -> Result<()> {
    let Vote {
        voter,
        target,
        value,
    } = vote;
    let new_vote = models::NewVote {
        user_rowid: resolve_user_rowid(conn, voter)?,
        target_kind: vote_target_kind_to_primitive(target.kind),
        target_id: target.id.as_str(),
        value: vote_value_to_primitive(*value),
        created_at: Timestamp::now().as_millis(),
    };
    diesel::insert_into(schema::vote::table)
        .values(&new_vote)
        .execute(conn)
        .map_err(from_diesel_err)?;
    Ok(())
}

fn update_vote(conn: &mut SqliteConnection, vote: &Vote) -> Result<()> {
    use schema::vote::dsl;
    let user_rowid = resolve_user_rowid(conn, &vote.voter)?;
    let count = diesel::update(
        dsl::vote
            .filter(dsl::user_rowid.eq(user_rowid))
            .filter(dsl::target_kind.eq(vote_target_kind_to_primitive(vote.target.kind)))
            .filter(dsl::target_id.eq(vote.target.id.as_str())),
    )
    .set(dsl::value.eq(vote_value_to_primitive(vote.value)))
    .execute(conn)
    .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    debug_assert_eq!(1, count);
    Ok(())
}

fn delete_vote(conn: &mut SqliteConnection, voter: &str, target: &VoteTarget) -> Result<()> {
    use schema::vote::dsl;
    let user_rowid = resolve_user_rowid(conn, voter)?;
    let count = diesel::delete(
        dsl::vote
            .filter(dsl::user_rowid.eq(user_rowid))
            .filter(dsl::target_kind.eq(vote_target_kind_to_primitive(target.kind)))
            .filter(dsl::target_id.eq(target.id.as_str())),
    )
    .execute(conn)
    .map_err(from_diesel_err)?;
    if count == 0 {
        return Err(repo::Error::NotFound);
    }
    debug_assert_eq!(1, count);
    Ok(())
}

fn try_get_vote(
    conn: &mut SqliteConnection,
    voter: &str,
    target: &VoteTarget,
) -> Result<Option<Vote>> {
    use schema::vote::dsl;
    let Some(user_rowid) = optional_rowid(resolve_user_rowid(conn, voter))? else {
        return Ok(None);
    };
    let value = dsl::vote
        .select(dsl::value)
        .filter(dsl::user_rowid.eq(user_rowid))
        .filter(dsl::target_kind.eq(vote_target_kind_to_primitive(target.kind)))
        .filter(dsl::target_id.eq(target.id.as_str()))
        .first::<i16>(conn)
        .optional()
        .map_err(from_diesel_err)?;
    value
        .map(|value| {
            Ok(Vote {
                voter: voter.to_owned(),
                target: target.clone(),
                value: load_vote_value(value)?,
            })
        })
        .transpose()
}

fn count_votes(conn: &mut SqliteConnection, target: &VoteTarget) -> Result<VoteCounts> {
    Ok(count_votes_of_targets(conn, target.kind, &[target.id.as_str()])?
        .pop()
        .map(|(_, counts)| counts)
        .unwrap_or_default())
}

pub(super) fn count_votes_of_targets(
    conn: &mut SqliteConnection,
    kind: VoteTargetKind,
    ids: &[&str],
) -> Result<Vec<(Id, VoteCounts)>> {
    use schema::vote::dsl;
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let rows = dsl::vote
        .filter(dsl::target_kind.eq(vote_target_kind_to_primitive(kind)))
        .filter(dsl::target_id.eq_any(ids))
        .group_by((dsl::target_id, dsl::value))
        .select((dsl::target_id, dsl::value, diesel::dsl::count_star()))
        .order_by(dsl::target_id)
        .load::<(String, i16, i64)>(conn)
        .map_err(from_diesel_err)?;
    let mut counts: HashMap<String, VoteCounts> = HashMap::with_capacity(rows.len());
    for (target_id, value, count) in rows {
        counts
            .entry(target_id)
            .or_default()
            .add(load_vote_value(value)?, count as u64);
    }
    // Preserve the order of the requested ids
    Ok(ids
        .iter()
        .filter_map(|id| counts.remove(*id).map(|c| (Id::from(*id), c)))
        .collect())
}

fn load_votes_of_voter(
    conn: &mut SqliteConnection,
    voter: &str,
    kind: VoteTargetKind,
    ids: &[&str],
) -> Result<Vec<Vote>> {
    use schema::vote::dsl;
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let Some(user_rowid) = optional_rowid(resolve_user_rowid(conn, voter))? else {
        return Ok(vec![]);
    };
    dsl::vote
        .select((dsl::target_kind, dsl::target_id, dsl::value))
        .filter(dsl::user_rowid.eq(user_rowid))
        .filter(dsl::target_kind.eq(vote_target_kind_to_primitive(kind)))
        .filter(dsl::target_id.eq_any(ids))
        .load::<(i16, String, i16)>(conn)
        .map_err(from_diesel_err)?
        .into_iter()
        .map(|(target_kind, target_id, value)| {
            Ok(Vote {
                voter: voter.to_owned(),
                target: VoteTarget {
                    kind: load_vote_target_kind(target_kind)?,
                    id: target_id.into(),
                },
                value: load_vote_value(value)?,
            })
        })
        .collect()
}
