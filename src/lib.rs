//! Course timetabling engine for the U-Engine ecosystem.
//!
//! Assigns every weekly session of every course to a (room, time slot,
//! instructor) triple so that no instructor, room or group is double-booked
//! and every course keeps one instructor, then prices the result with
//! configurable soft penalties.
//!
//! # Modules
//!
//! - **`models`**: Problem snapshot: `Course`, `Instructor`, `Room`, `Group`,
//!   `TimeSlot`, `Problem`, `Session`, `Timetable`
//! - **`validation`**: Input integrity checks (duplicate IDs, group refs, slot grid)
//! - **`domain`**: Initial candidate sets from static compatibility
//! - **`constraints`**: Hard and soft constraints, full timetable evaluation
//! - **`search`**: Backtracking search (MRV, forward checking, trail) and `Solver`
//! - **`progress`**: Progress snapshots and cooperative cancellation
//! - **`export`**: Flat, serializable view of a solved timetable
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Course, Group, Instructor, Problem, Room, TimeSlot};
//! use u_timetable::search::{Solver, SolverConfig};
//!
//! let problem = Problem::new()
//!     .with_group(Group::new("CS-1", 1, 30))
//!     .with_course(Course::new("CS101", "cs").with_sessions_per_week(2).with_group("CS-1"))
//!     .with_instructor(Instructor::new("kim").with_specialization("cs"))
//!     .with_room(Room::lecture("A-101", 40))
//!     .with_timeslots(TimeSlot::grid(5, 4));
//!
//! let report = Solver::solve(&problem, &SolverConfig::default()).unwrap();
//! assert_eq!(report.outcome.timetable().unwrap().assignment_count(), 2);
//! ```
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Haralick & Elliott (1980), "Increasing Tree Search Efficiency for
//!   Constraint Satisfaction Problems"
//! - Schaerf (1999), "A Survey of Automated Timetabling"

pub mod constraints;
pub mod domain;
pub mod error;
pub mod export;
pub mod models;
pub mod progress;
pub mod search;
pub mod validation;

pub use error::{ConfigError, SolverError};
pub use search::{SolveOutcome, SolveReport, Solver, SolverConfig};
