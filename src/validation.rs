//! Input validation for timetabling problems.
//!
//! Checks structural integrity of a [`Problem`] before any domain is built.
//! Detects:
//! - Duplicate IDs (per record kind)
//! - Courses enrolling groups that do not exist
//! - Duplicate cells in the slot grid
//!
//! Rooms without seats and groups without students are only logged: the
//! domain builder never places a session in such a room, and an empty group
//! still gets its sessions.
//!
//! Statically infeasible sessions (no legal candidate at all) are not a
//! structural defect; the domain builder reports those.

use log::warn;

use crate::models::Problem;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two records of the same kind share an ID.
    DuplicateId,
    /// A course enrolls a group ID that does not exist.
    UnknownGroup,
    /// The slot grid lists the same (day, period) twice.
    DuplicateTimeSlot,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a timetabling problem.
///
/// Checks:
/// 1. No duplicate course, instructor, room or group IDs
/// 2. Every enrolled group ID resolves to a group
/// 3. No duplicate (day, period) slots
///
/// Zero-seat rooms and zero-headcount groups are reported with `warn!`.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &Problem) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique(
        "course",
        problem.courses.iter().map(|c| c.id.as_str()),
        &mut errors,
    );
    check_unique(
        "instructor",
        problem.instructors.iter().map(|i| i.id.as_str()),
        &mut errors,
    );
    check_unique(
        "room",
        problem.rooms.iter().map(|r| r.id.as_str()),
        &mut errors,
    );
    check_unique(
        "group",
        problem.groups.iter().map(|g| g.id.as_str()),
        &mut errors,
    );

    // Enrollment references
    let group_ids: HashSet<&str> = problem.groups.iter().map(|g| g.id.as_str()).collect();
    for course in &problem.courses {
        for group_id in &course.groups {
            if !group_ids.contains(group_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownGroup,
                    format!(
                        "Course '{}' enrolls unknown group '{}'",
                        course.id, group_id
                    ),
                ));
            }
        }
    }

    // Slot grid
    let mut seen_slots = HashSet::new();
    for slot in &problem.timeslots {
        if !seen_slots.insert((slot.day, slot.period)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateTimeSlot,
                format!("Duplicate time slot: {slot}"),
            ));
        }
    }

    for room in problem.rooms.iter().filter(|r| r.capacity == 0) {
        warn!("room '{}' has no seats and will never be used", room.id);
    }

    for group in problem.groups.iter().filter(|g| g.headcount == 0) {
        warn!("group '{}' has no students", group.id);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_unique<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {kind} ID: {id}"),
            ));
        }
    }
}
