//! Literal UI strings

use crate::gradebook::SubjectField;

pub const TITLE: &str = "학점 계산기";
pub const SEMESTER_NAME_PLACEHOLDER: &str = "학기 이름";
pub const SUBJECT_NAME_PLACEHOLDER: &str = "과목명";
pub const CREDIT_PLACEHOLDER: &str = "학점";
pub const SCORE_PLACEHOLDER: &str = "성적";
pub const ADD_SUBJECT: &str = "과목 추가";
pub const ADD_SEMESTER: &str = "학기 추가";
pub const RESET_DATA: &str = "데이터 초기화";

/// Placeholder for a subject input
pub fn placeholder(field: SubjectField) -> &'static str {
    match field {
        SubjectField::Name => SUBJECT_NAME_PLACEHOLDER,
        SubjectField::Credit => CREDIT_PLACEHOLDER,
        SubjectField::Score => SCORE_PLACEHOLDER,
    }
}

/// `학점: 5 / 평균: 3.80`
pub fn semester_summary(credits: &str, gpa: &str) -> String {
    format!("학점: {credits} / 평균: {gpa}")
}

/// `전체학점 9 / 전체평균 3.44`
pub fn overall_summary(credits: &str, gpa: &str) -> String {
    format!("전체학점 {credits} / 전체평균 {gpa}")
}
