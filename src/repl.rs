use crate::commands::{Command, parse_command};
use crate::database::Db;
use crate::export::{ExportRow, offer_to_store, to_export_rows};
use std::io::{BufRead, Write};

const MENU: &str = "
What would you like to do?

d - demo
vs <student_id>            - view subjects taken by a student
la <firstname> <surname>   - lookup address for a given firstname and surname
lr <student_id>            - list reviews for a given student_id
lc <teacher_id>            - list all courses taken by teacher_id
lnc                        - list all students who haven't completed their course
lf                         - list all students who have completed their course and achieved 30 or below
e                          - exit this program

Type your option here: ";

/// Everything a query handler produced: an optional header line, one
/// display line per row, and the rows prepared for export.
struct QueryReport {
    header: Option<String>,
    lines: Vec<String>,
    rows: Vec<ExportRow>,
}

/// Run the interactive loop until `e` or end of input.
///
/// The reader and writer are injected so tests can drive a whole session
/// through in-memory buffers; `main` passes locked stdin and stdout.
pub fn run<R: BufRead, W: Write>(db: &Db, input: &mut R, out: &mut W) -> Result<(), String> {
    writeln!(out, "Welcome to the data querying app!").map_err(write_failed)?;

    loop {
        write!(out, "{}", MENU).map_err(write_failed)?;
        out.flush().map_err(write_failed)?;

        let mut line = String::new();
        if input
            .read_line(&mut line)
            .map_err(|e| format!("Failed to read input: {}", e))?
            == 0
        {
            break;
        }
        writeln!(out, "Your input has been processed.").map_err(write_failed)?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(out, "{}", message).map_err(write_failed)?;
                continue;
            }
        };

        if command == Command::Exit {
            writeln!(out, "Programme exited successfully!").map_err(write_failed)?;
            break;
        }

        match run_command(db, &command) {
            Ok(report) => {
                if let Some(header) = &report.header {
                    writeln!(out, "{}", header).map_err(write_failed)?;
                }
                for line in &report.lines {
                    writeln!(out, "{}", line).map_err(write_failed)?;
                }
                offer_to_store(&report.rows, input, out)?;
            }
            Err(message) => writeln!(out, "{}", message).map_err(write_failed)?,
        }
    }
    Ok(())
}

fn run_command(db: &Db, command: &Command) -> Result<QueryReport, String> {
    match command {
        Command::Demo => {
            let students = db.all_students()?;
            Ok(QueryReport {
                header: None,
                lines: students.iter().map(ToString::to_string).collect(),
                rows: to_export_rows(&students)?,
            })
        }
        Command::ViewSubjects { student_id } => {
            let courses = db.subjects_for_student(student_id)?;
            Ok(QueryReport {
                header: Some(format!("For student ID:{}", student_id)),
                lines: courses
                    .iter()
                    .map(|course| format!("Subjects taken: {}", course))
                    .collect(),
                rows: to_export_rows(&courses)?,
            })
        }
        Command::LookupAddress {
            first_name,
            surname,
        } => {
            let addresses = db.address_for(first_name, surname)?;
            Ok(QueryReport {
                header: None,
                lines: addresses
                    .iter()
                    .map(|address| format!("Address: {}", address))
                    .collect(),
                rows: to_export_rows(&addresses)?,
            })
        }
        Command::ListReviews { student_id } => {
            let reviews = db.reviews_for_student(student_id)?;
            Ok(QueryReport {
                header: Some(format!("Reviews for student ID:{}", student_id)),
                lines: reviews.iter().map(ToString::to_string).collect(),
                rows: to_export_rows(&reviews)?,
            })
        }
        Command::ListCourses { teacher_id } => {
            let courses = db.courses_for_teacher(teacher_id)?;
            Ok(QueryReport {
                header: Some("Courses taught by the specified teacher:".to_string()),
                lines: courses.iter().map(ToString::to_string).collect(),
                rows: to_export_rows(&courses)?,
            })
        }
        Command::ListIncomplete => {
            let enrollments = db.incomplete_enrollments()?;
            Ok(QueryReport {
                header: Some("Students with incomplete courses:".to_string()),
                lines: enrollments.iter().map(ToString::to_string).collect(),
                rows: to_export_rows(&enrollments)?,
            })
        }
        Command::ListLowMarks => {
            let results = db.completed_with_low_mark()?;
            Ok(QueryReport {
                header: Some(
                    "Students that have completed their course with a mark of 30 or below:"
                        .to_string(),
                ),
                lines: results.iter().map(ToString::to_string).collect(),
                rows: to_export_rows(&results)?,
            })
        }
        // `e` is handled by the caller before any query runs.
        Command::Exit => Ok(QueryReport {
            header: None,
            lines: Vec::new(),
            rows: Vec::new(),
        }),
    }
}

fn write_failed(e: std::io::Error) -> String {
    format!("Failed to write output: {}", e)
}
