//! Render-ready snapshot of the calculator
//!
//! Built fresh from the semester list on every render; the front-ends only
//! lay out what is here.

use crate::gradebook::{Semester, Subject, calc};

use super::labels;

/// One semester block
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterView {
    pub id: u32,
    pub name: String,
    pub subjects: Vec<Subject>,
    pub credits: String,
    pub gpa: String,
    pub summary: String,
}

impl SemesterView {
    pub fn build(semester: &Semester) -> Self {
        let credits = calc::format_number(calc::semester_credits(semester));
        let gpa = calc::calculate_gpa(semester);
        Self {
            id: semester.id,
            name: semester.name.clone(),
            subjects: semester.subjects.clone(),
            summary: labels::semester_summary(&credits, &gpa),
            credits,
            gpa,
        }
    }
}

/// Whole page
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorView {
    pub semesters: Vec<SemesterView>,
    pub total_credits: String,
    pub overall_gpa: String,
    pub summary: String,
}

impl CalculatorView {
    pub fn build(semesters: &[Semester]) -> Self {
        let total_credits = calc::format_number(calc::total_credits_taken(semesters));
        let overall_gpa = calc::overall_gpa(semesters);
        Self {
            semesters: semesters.iter().map(SemesterView::build).collect(),
            summary: labels::overall_summary(&total_credits, &overall_gpa),
            total_credits,
            overall_gpa,
        }
    }

    pub fn semester(&self, id: u32) -> Option<&SemesterView> {
        self.semesters.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gradebook::{GradeBook, SubjectField};

    #[test]
    fn test_summary_lines() {
        let mut book = GradeBook::default();
        book.handle_input_change(1, 0, SubjectField::Credit, "3");
        book.handle_input_change(1, 0, SubjectField::Score, "4.0");
        book.add_subject(1);
        book.handle_input_change(1, 1, SubjectField::Credit, "2");
        book.handle_input_change(1, 1, SubjectField::Score, "3.5");
        let id = book.add_semester();
        book.handle_input_change(id, 0, SubjectField::Credit, "4");

        let view = CalculatorView::build(book.semesters());
        assert_eq!(view.semester(1).unwrap().summary, "학점: 5 / 평균: 3.80");
        assert_eq!(view.semester(2).unwrap().summary, "학점: 4 / 평균: 0.00");
        assert_eq!(view.summary, "전체학점 9 / 전체평균 2.11");
    }

    #[test]
    fn test_empty_view() {
        let view = CalculatorView::build(&[]);
        assert!(view.semesters.is_empty());
        assert_eq!(view.summary, "전체학점 0 / 전체평균 0.00");
    }

    #[test]
    fn test_fractional_credits() {
        let mut book = GradeBook::default();
        book.handle_input_change(1, 0, SubjectField::Credit, "1.5");
        let view = CalculatorView::build(book.semesters());
        assert_eq!(view.total_credits, "1.5");
    }
}
