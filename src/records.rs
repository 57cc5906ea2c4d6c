use serde::Serialize;
use std::fmt;

/// One row of the `Student` table, used by the demo listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub student_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address_id: i64,
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// A course name on its own, as returned by the subject and course listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseTitle {
    pub course_name: String,
}

impl fmt::Display for CourseTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.course_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressInfo {
    pub street: String,
    pub city: String,
}

impl fmt::Display for AddressInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.street, self.city)
    }
}

/// A review left for a student: free text plus four subscores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewInfo {
    pub review_text: String,
    pub completeness: i64,
    pub efficiency: i64,
    pub style: i64,
    pub documentation: i64,
}

impl fmt::Display for ReviewInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Completeness: {}\nEfficiency: {}\nStyle: {}\nDocumentation: {}\nReview: {}",
            self.completeness, self.efficiency, self.style, self.documentation, self.review_text
        )
    }
}

/// A student paired with one of their course enrollments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrollmentInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub course_name: String,
}

impl fmt::Display for EnrollmentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} <{}>: {}",
            self.first_name, self.last_name, self.email, self.course_name
        )
    }
}

/// An `EnrollmentInfo` with the final mark, for the low-mark listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkedResult {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub course_name: String,
    pub mark: i64,
}

impl fmt::Display for MarkedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} <{}>: {} (mark {})",
            self.first_name, self.last_name, self.email, self.course_name, self.mark
        )
    }
}
