//! Trail of domain removals.
//!
//! Every candidate that forward checking kills is logged here with the
//! decision depth that killed it. Backtracking to a depth pops the log back
//! to the mark taken when that depth committed its value and revives each
//! popped candidate, newest first.

use crate::domain::Domain;
use crate::error::SolverError;

/// One removal: candidate `pos` of session `session` died at `depth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailEntry {
    /// Session whose domain shrank.
    pub session: usize,
    /// Candidate position within that domain.
    pub pos: usize,
    /// Decision depth that caused the removal.
    pub depth: usize,
}

/// Linear log of removals, undone in LIFO order.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    entries: Vec<TrailEntry>,
}

impl Trail {
    /// Creates an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty trail with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Current length, used as an undo mark.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes candidate `pos` from `domains[session]` and records it.
    ///
    /// Returns `false` (recording nothing) if the candidate was already dead.
    pub fn remove(
        &mut self,
        domains: &mut [Domain],
        session: usize,
        pos: usize,
        depth: usize,
    ) -> bool {
        if !domains[session].remove(pos) {
            return false;
        }
        self.entries.push(TrailEntry {
            session,
            pos,
            depth,
        });
        true
    }

    /// Undoes every entry above `mark`, all of which must carry `depth`.
    ///
    /// Returns the number of revived candidates. An entry from another depth
    /// or a candidate that is already live means the trail and the domains
    /// disagree, which is reported as an invariant violation.
    pub fn undo_to(
        &mut self,
        mark: usize,
        depth: usize,
        domains: &mut [Domain],
    ) -> Result<usize, SolverError> {
        if mark > self.entries.len() {
            return Err(SolverError::invariant(format!(
                "undo mark {mark} beyond trail length {}",
                self.entries.len()
            )));
        }
        let mut revived = 0;
        while self.entries.len() > mark {
            let Some(entry) = self.entries.pop() else {
                break;
            };
            if entry.depth != depth {
                return Err(SolverError::invariant(format!(
                    "trail entry for session {} tagged depth {} while undoing depth {depth}",
                    entry.session, entry.depth
                )));
            }
            let domain = domains.get_mut(entry.session).ok_or_else(|| {
                SolverError::invariant(format!("trail names unknown session {}", entry.session))
            })?;
            if entry.pos >= domain.total() || !domain.restore(entry.pos) {
                return Err(SolverError::invariant(format!(
                    "candidate {} of session {} was live while undoing depth {depth}",
                    entry.pos, entry.session
                )));
            }
            revived += 1;
        }
        Ok(revived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candidate;

    fn domains() -> Vec<Domain> {
        vec![
            Domain::new(vec![Candidate::new(0, 0, 0), Candidate::new(0, 1, 0)]),
            Domain::new(vec![
                Candidate::new(1, 0, 0),
                Candidate::new(1, 1, 0),
                Candidate::new(1, 2, 0),
            ]),
        ]
    }

    #[test]
    fn test_remove_records_once() {
        let mut d = domains();
        let mut trail = Trail::new();
        assert!(trail.remove(&mut d, 1, 2, 0));
        assert!(!trail.remove(&mut d, 1, 2, 0));
        assert_eq!(trail.len(), 1);
        assert_eq!(d[1].len(), 2);
    }

    #[test]
    fn test_undo_restores_to_mark() {
        let mut d = domains();
        let fresh = d.clone();
        let mut trail = Trail::with_capacity(8);

        trail.remove(&mut d, 0, 0, 0);
        let mark = trail.len();
        trail.remove(&mut d, 1, 0, 1);
        trail.remove(&mut d, 1, 1, 1);
        assert_eq!(d[1].len(), 1);

        assert_eq!(trail.undo_to(mark, 1, &mut d).unwrap(), 2);
        assert_eq!(d[1], fresh[1]);
        assert_eq!(d[0].len(), 1);

        assert_eq!(trail.undo_to(0, 0, &mut d).unwrap(), 1);
        assert_eq!(d, fresh);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_undo_wrong_depth_is_violation() {
        let mut d = domains();
        let mut trail = Trail::new();
        trail.remove(&mut d, 0, 1, 3);
        let err = trail.undo_to(0, 2, &mut d).unwrap_err();
        assert!(matches!(err, SolverError::InternalInvariantViolation { .. }));
    }

    #[test]
    fn test_undo_live_candidate_is_violation() {
        let mut d = domains();
        let mut trail = Trail::new();
        trail.remove(&mut d, 0, 1, 0);
        // Revive behind the trail's back
        d[0].restore(1);
        let err = trail.undo_to(0, 0, &mut d).unwrap_err();
        assert!(err.to_string().contains("was live"));
    }

    #[test]
    fn test_undo_mark_beyond_length() {
        let mut d = domains();
        let mut trail = Trail::new();
        assert!(trail.undo_to(5, 0, &mut d).is_err());
        assert_eq!(trail.undo_to(0, 0, &mut d).unwrap(), 0);
    }
}
