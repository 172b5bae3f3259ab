//! The semester list and its mutation operations
//!
//! [`GradeBook`] owns the list privately. Every operation builds a fresh list
//! and swaps it in, so callers never hold references into the old one.

use super::model::{Semester, Subject, SubjectField};

/// Ordered semesters, each with ordered subjects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeBook {
    semesters: Vec<Semester>,
}

impl Default for GradeBook {
    fn default() -> Self {
        Self::new("")
    }
}

impl GradeBook {
    /// Single semester (id 1) with one blank subject
    pub fn new(first_semester_name: &str) -> Self {
        Self {
            semesters: vec![Semester::new(1, first_semester_name)],
        }
    }

    /// Wrap a previously saved list as-is
    pub fn from_semesters(semesters: Vec<Semester>) -> Self {
        Self { semesters }
    }

    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    pub fn semester(&self, id: u32) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.semesters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.semesters.is_empty()
    }

    /// Append a blank semester and return its id.
    ///
    /// Ids are `count + 1`, which stays unique only because semesters are
    /// never removed.
    pub fn add_semester(&mut self) -> u32 {
        let id = self.semesters.len() as u32 + 1;
        let mut next = self.semesters.clone();
        next.push(Semester::new(id, ""));
        self.semesters = next;
        log::debug!("Added semester {}", id);
        id
    }

    /// Rename the semester with `id`. Returns false if no semester matched.
    pub fn update_semester_name(&mut self, id: u32, name: &str) -> bool {
        self.replace_matching(id, |s| Semester {
            name: name.to_string(),
            ..s.clone()
        })
    }

    /// Append a blank subject to the semester with `id`
    pub fn add_subject(&mut self, id: u32) -> bool {
        self.replace_matching(id, |s| {
            let mut subjects = s.subjects.clone();
            subjects.push(Subject::blank());
            Semester {
                subjects,
                ..s.clone()
            }
        })
    }

    /// Set one field of one subject.
    ///
    /// Only `subjects[subject_index]` of the matching semester changes; the
    /// subject row is rebuilt rather than edited in place. An index past the
    /// end of the subject list leaves everything untouched.
    pub fn handle_input_change(
        &mut self,
        semester_id: u32,
        subject_index: usize,
        field: SubjectField,
        value: &str,
    ) -> bool {
        let Some(target) = self.semester(semester_id) else {
            return false;
        };
        if subject_index >= target.subjects.len() {
            log::warn!(
                "Ignoring edit of subject {} in semester {} ({} subjects)",
                subject_index,
                semester_id,
                target.subjects.len()
            );
            return false;
        }

        self.replace_matching(semester_id, |s| {
            let subjects = s
                .subjects
                .iter()
                .enumerate()
                .map(|(i, subject)| {
                    if i == subject_index {
                        subject.with_field(field, value)
                    } else {
                        subject.clone()
                    }
                })
                .collect();
            Semester {
                subjects,
                ..s.clone()
            }
        })
    }

    /// Back to a single blank semester with id 1
    pub fn reset(&mut self) {
        self.semesters = vec![Semester::new(1, "")];
    }

    fn replace_matching(&mut self, id: u32, update: impl Fn(&Semester) -> Semester) -> bool {
        let mut matched = false;
        self.semesters = self
            .semesters
            .iter()
            .map(|s| {
                if s.id == id {
                    matched = true;
                    update(s)
                } else {
                    s.clone()
                }
            })
            .collect();
        matched
    }
}
