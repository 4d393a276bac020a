//! Student group model.

use serde::{Deserialize, Serialize};

/// A cohort of students attending sessions together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique group identifier (e.g., "Y1-G1").
    pub id: String,
    /// Study year.
    pub year: u32,
    /// Number of students; every assigned room must seat them all.
    pub headcount: u32,
}

impl Group {
    /// Creates a new group.
    pub fn new(id: impl Into<String>, year: u32, headcount: u32) -> Self {
        Self {
            id: id.into(),
            year,
            headcount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_new() {
        let g = Group::new("Y2-G3", 2, 28);
        assert_eq!(g.id, "Y2-G3");
        assert_eq!(g.year, 2);
        assert_eq!(g.headcount, 28);
    }
}
