#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_timetable::models::{Course, Group, Instructor, Problem, Room, RoomType, TimeSlot};

const SPECIALIZATIONS: [&str; 4] = ["math", "cs", "physics", "chem"];

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A department-sized instance: 10 groups, 11 rooms, 16 instructors and
/// 24 courses over a 5×6 grid. Loose enough to be feasible, large enough
/// that exhaustive search never finishes.
pub fn synthetic(seed: u64) -> Problem {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut problem = Problem::new().with_timeslots(TimeSlot::grid(5, 6));

    for g in 0..10u32 {
        problem = problem.with_group(Group::new(
            format!("G{g}"),
            1 + g % 4,
            rng.random_range(15..=40),
        ));
    }
    for r in 0..8 {
        problem = problem.with_room(Room::lecture(format!("R{r}"), 45));
    }
    for l in 0..3 {
        problem = problem.with_room(Room::lab(format!("L{l}"), 45));
    }
    for i in 0..16usize {
        let mut instructor =
            Instructor::new(format!("I{i}")).with_specialization(SPECIALIZATIONS[i % 4]);
        if rng.random_bool(0.3) {
            instructor = instructor.with_unavailable_day(rng.random_range(0..5));
        }
        problem = problem.with_instructor(instructor);
    }
    for c in 0..24 {
        let spec = SPECIALIZATIONS[rng.random_range(0..SPECIALIZATIONS.len())];
        let mut course = Course::new(format!("C{c}"), spec)
            .with_sessions_per_week(rng.random_range(1..=3));
        if rng.random_bool(0.2) {
            course = course.with_room_type(RoomType::Lab);
        }
        let first: u32 = rng.random_range(0..10);
        course = course.with_group(format!("G{first}"));
        if rng.random_bool(0.4) {
            let second = (first + 1 + rng.random_range(0..9)) % 10;
            course = course.with_group(format!("G{second}"));
        }
        problem = problem.with_course(course);
    }
    problem
}

/// Two groups, four courses, one of them shared, over a 3×3 grid.
pub fn small_department() -> Problem {
    Problem::new()
        .with_group(Group::new("CS-1", 1, 30))
        .with_group(Group::new("CS-2", 2, 25))
        .with_course(
            Course::new("MATH1", "math")
                .with_sessions_per_week(2)
                .with_group("CS-1")
                .with_group("CS-2"),
        )
        .with_course(Course::new("PROG1", "cs").with_sessions_per_week(2).with_group("CS-1"))
        .with_course(
            Course::new("PROG1-LAB", "cs")
                .with_room_type(RoomType::Lab)
                .with_group("CS-1"),
        )
        .with_course(Course::new("DB2", "cs").with_group("CS-2"))
        .with_instructor(Instructor::new("lee").with_specialization("math"))
        .with_instructor(
            Instructor::new("park")
                .with_specialization("cs")
                .with_unavailable_day(0),
        )
        .with_instructor(
            Instructor::new("choi")
                .with_specialization("cs")
                .with_specialization("math"),
        )
        .with_room(Room::lecture("A-101", 40))
        .with_room(Room::lecture("A-102", 30))
        .with_room(Room::lab("B-LAB", 30))
        .with_timeslots(TimeSlot::grid(3, 3))
}
