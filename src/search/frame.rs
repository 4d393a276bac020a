//! Decision frames.

/// One decision level on the explicit search stack.
///
/// The frame at stack position `d` owns every trail entry tagged `d`, all of
/// which sit above `trail_mark`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Session decided at this level.
    pub session: usize,
    /// Next candidate position to try.
    pub cursor: usize,
    /// Candidate position currently committed, if any.
    pub committed: Option<usize>,
    /// Trail length when the frame was pushed.
    pub trail_mark: usize,
}

impl Frame {
    /// A fresh frame for `session` with nothing tried yet.
    #[inline]
    pub fn new(session: usize, trail_mark: usize) -> Self {
        Self {
            session,
            cursor: 0,
            committed: None,
            trail_mark,
        }
    }
}
