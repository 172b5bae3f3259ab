//! Grade book: records, mutations, and derived totals
//!
//! No I/O happens here; persistence is layered on by
//! [`Calculator`](crate::calculator::Calculator).

pub mod calc;
pub mod model;
pub mod state;

pub use calc::{
    Totals, calculate_gpa, format_fixed2, format_number, overall_gpa, parse_numeric,
    semester_credits, total_credits_taken,
};
pub use model::{Semester, Subject, SubjectField, UnknownField};
pub use state::GradeBook;
