use crate::records::{AddressInfo, CourseTitle, EnrollmentInfo, MarkedResult, ReviewInfo, Student};
use rusqlite::Connection;
use std::io::Write;
use std::path::Path;

/// Handle to the student-records database.
///
/// Owns the single SQLite connection for the process lifetime and exposes
/// the fixed set of queries the command loop can run. The connection is
/// passed to callers explicitly; there is no global state.
pub struct Db {
    conn: Connection,
}

impl Db {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db, String> {
        let conn = Connection::open(path.as_ref()).map_err(|e| {
            format!(
                "Failed to open database {}: {}",
                path.as_ref().display(),
                e
            )
        })?;
        Ok(Db { conn })
    }

    pub fn open_in_memory() -> Result<Db, String> {
        let conn = Connection::open_in_memory()
            .map_err(|e| format!("Failed to open in-memory database: {}", e))?;
        Ok(Db { conn })
    }

    /// Execute a script of `;`-separated SQL statements in order.
    ///
    /// A failing statement does not abort the script: it is reported to
    /// `out` with a statement preview and the database error, and the
    /// remaining statements still run. There is no transaction around the
    /// script, so a partial run leaves whatever it managed to execute.
    pub fn run_script<W: Write>(&self, sql: &str, out: &mut W) -> Result<(), String> {
        for statement in sql.split(';') {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            if let Err(e) = self.conn.execute_batch(statement) {
                writeln!(out, "Statement skipped ({}): {}", preview(statement), e)
                    .map_err(|e| format!("Failed to write output: {}", e))?;
            }
        }
        Ok(())
    }

    pub fn all_students(&self) -> Result<Vec<Student>, String> {
        self.collect(
            "SELECT student_id, first_name, last_name, email, address_id FROM Student",
            [],
            |row| {
                Ok(Student {
                    student_id: row.get("student_id")?,
                    first_name: row.get("first_name")?,
                    last_name: row.get("last_name")?,
                    email: row.get("email")?,
                    address_id: row.get("address_id")?,
                })
            },
        )
    }

    pub fn subjects_for_student(&self, student_id: &str) -> Result<Vec<CourseTitle>, String> {
        self.collect(
            "SELECT Course.course_name FROM Course INNER JOIN StudentCourse \
             ON Course.course_code = StudentCourse.course_code \
             WHERE StudentCourse.student_id = ?1",
            [student_id],
            |row| {
                Ok(CourseTitle {
                    course_name: row.get("course_name")?,
                })
            },
        )
    }

    pub fn address_for(&self, first_name: &str, surname: &str) -> Result<Vec<AddressInfo>, String> {
        self.collect(
            "SELECT Address.street, Address.city FROM Address INNER JOIN Student \
             ON Address.address_id = Student.address_id \
             WHERE Student.first_name = ?1 AND Student.last_name = ?2",
            [first_name, surname],
            |row| {
                Ok(AddressInfo {
                    street: row.get("street")?,
                    city: row.get("city")?,
                })
            },
        )
    }

    pub fn reviews_for_student(&self, student_id: &str) -> Result<Vec<ReviewInfo>, String> {
        self.collect(
            "SELECT Review.review_text, Review.completeness, Review.efficiency, \
             Review.style, Review.documentation \
             FROM Review INNER JOIN Student ON Review.student_id = Student.student_id \
             WHERE Student.student_id = ?1",
            [student_id],
            |row| {
                Ok(ReviewInfo {
                    review_text: row.get("review_text")?,
                    completeness: row.get("completeness")?,
                    efficiency: row.get("efficiency")?,
                    style: row.get("style")?,
                    documentation: row.get("documentation")?,
                })
            },
        )
    }

    // TODO: add `WHERE Course.teacher_id = ?1` here. The argument is accepted
    // but never bound, so every invocation returns all courses.
    pub fn courses_for_teacher(&self, _teacher_id: &str) -> Result<Vec<CourseTitle>, String> {
        self.collect(
            "SELECT Course.course_name FROM Course INNER JOIN Teacher \
             ON Course.teacher_id = Teacher.teacher_id",
            [],
            |row| {
                Ok(CourseTitle {
                    course_name: row.get("course_name")?,
                })
            },
        )
    }

    pub fn incomplete_enrollments(&self) -> Result<Vec<EnrollmentInfo>, String> {
        self.collect(
            "SELECT Student.first_name, Student.last_name, Student.email, Course.course_name \
             FROM Student INNER JOIN StudentCourse \
             ON Student.student_id = StudentCourse.student_id \
             INNER JOIN Course ON StudentCourse.course_code = Course.course_code \
             WHERE StudentCourse.is_complete = ?1",
            [0],
            |row| {
                Ok(EnrollmentInfo {
                    first_name: row.get("first_name")?,
                    last_name: row.get("last_name")?,
                    email: row.get("email")?,
                    course_name: row.get("course_name")?,
                })
            },
        )
    }

    pub fn completed_with_low_mark(&self) -> Result<Vec<MarkedResult>, String> {
        self.collect(
            "SELECT Student.first_name, Student.last_name, Student.email, \
             Course.course_name, StudentCourse.mark \
             FROM Student INNER JOIN StudentCourse \
             ON Student.student_id = StudentCourse.student_id \
             INNER JOIN Course ON StudentCourse.course_code = Course.course_code \
             WHERE StudentCourse.is_complete = ?1 AND StudentCourse.mark <= ?2",
            [1, 30],
            |row| {
                Ok(MarkedResult {
                    first_name: row.get("first_name")?,
                    last_name: row.get("last_name")?,
                    email: row.get("email")?,
                    course_name: row.get("course_name")?,
                    mark: row.get("mark")?,
                })
            },
        )
    }

    fn collect<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Vec<T>, String>
    where
        P: rusqlite::Params,
        F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| format!("Failed to prepare query: {}", e))?;
        let rows = stmt
            .query_map(params, map)
            .map_err(|e| format!("Failed to run query: {}", e))?;
        rows.collect::<rusqlite::Result<Vec<T>>>()
            .map_err(|e| format!("Failed to read row: {}", e))
    }
}

fn preview(statement: &str) -> &str {
    let head = statement.lines().next().unwrap_or(statement);
    match head.char_indices().nth(40) {
        Some((idx, _)) => &head[..idx],
        None => head,
    }
}
