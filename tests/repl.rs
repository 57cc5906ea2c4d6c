use std::fs;
use std::io::Cursor;
use studentql::database::Db;
use studentql::repl;

const SCHEMA: &str = "
    CREATE TABLE Student (student_id INTEGER PRIMARY KEY, first_name TEXT,
        last_name TEXT, email TEXT, address_id INTEGER);
    CREATE TABLE Address (address_id INTEGER PRIMARY KEY, street TEXT, city TEXT);
    CREATE TABLE Teacher (teacher_id INTEGER PRIMARY KEY, first_name TEXT, last_name TEXT);
    CREATE TABLE Course (course_code INTEGER PRIMARY KEY, course_name TEXT, teacher_id INTEGER);
    CREATE TABLE StudentCourse (student_id INTEGER, course_code INTEGER,
        is_complete INTEGER, mark INTEGER);
    CREATE TABLE Review (student_id INTEGER, review_text TEXT, completeness INTEGER,
        efficiency INTEGER, style INTEGER, documentation INTEGER);

    INSERT INTO Address VALUES (1, '14 Main Street', 'Cape Town');
    INSERT INTO Student VALUES (1, 'Ada', 'Bell', 'ada@example.com', 1);
    INSERT INTO Teacher VALUES (1, 'Grace', 'Mokoena');
    INSERT INTO Course VALUES (101, 'Databases', 1);
    INSERT INTO Course VALUES (102, 'Web Development', 1);
    INSERT INTO StudentCourse VALUES (1, 101, 1, 65);
    INSERT INTO StudentCourse VALUES (1, 102, 0, NULL);
    INSERT INTO Review VALUES (1, 'Strong work', 5, 4, 4, 4);
";

fn seeded_db() -> Db {
    let db = Db::open_in_memory().unwrap();
    let mut log = Vec::new();
    db.run_script(SCHEMA, &mut log).unwrap();
    db
}

fn run_session(db: &Db, script: &str) -> String {
    let mut input = Cursor::new(script.to_string());
    let mut out = Vec::new();
    repl::run(db, &mut input, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn exit_terminates_without_querying() {
    let db = seeded_db();
    let output = run_session(&db, "e\n");
    assert!(output.contains("Programme exited successfully!"));
    assert!(!output.contains("Would you like to store this result?"));
}

#[test]
fn end_of_input_ends_the_loop() {
    let db = seeded_db();
    let output = run_session(&db, "");
    assert!(output.contains("Welcome to the data querying app!"));
}

#[test]
fn view_subjects_prints_one_line_per_course() {
    let db = seeded_db();
    let output = run_session(&db, "vs 1\nn\ne\n");
    assert!(output.contains("For student ID:1"));
    assert_eq!(output.matches("Subjects taken:").count(), 2);
}

#[test]
fn address_lookup_with_no_match_still_offers_to_store() {
    let db = seeded_db();
    let output = run_session(&db, "la John Smith\nn\ne\n");
    assert!(!output.contains("Address:"));
    assert!(output.contains("Would you like to store this result?"));
}

#[test]
fn reviews_print_their_subscores() {
    let db = seeded_db();
    let output = run_session(&db, "lr 1\nn\ne\n");
    assert!(output.contains("Completeness: 5"));
    assert!(output.contains("Efficiency: 4"));
    assert!(output.contains("Review: Strong work"));
}

#[test]
fn unknown_command_returns_to_the_prompt() {
    let db = seeded_db();
    let output = run_session(&db, "xyzzy\nd\nn\ne\n");
    assert!(output.contains("Incorrect command: 'xyzzy'"));
    // The loop kept going: the demo after it still ran.
    assert!(output.contains("Ada Bell"));
}

#[test]
fn blank_lines_are_reprompted_silently() {
    let db = seeded_db();
    let output = run_session(&db, "\n\ne\n");
    assert!(!output.contains("Incorrect command"));
    assert!(output.contains("Programme exited successfully!"));
}

#[test]
fn export_works_from_a_full_session() {
    let path = std::env::temp_dir().join(format!("studentql_session_{}.json", std::process::id()));
    let db = seeded_db();
    let output = run_session(&db, &format!("vs 1\ny\n{}\nn\ne\n", path.display()));
    assert!(output.contains("Data stored as JSON file in:"));

    let written = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[0]["course_name"], "Databases");
}
