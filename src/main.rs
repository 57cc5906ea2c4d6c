use std::io;
use std::path::Path;
use std::process;
use studentql::database::Db;
use studentql::repl;

const DB_FILE: &str = "student_data.db";
const SCHEMA_FILE: &str = "create_database.sql";

fn main() {
    // Opening a missing file would silently create an empty database, so
    // require it to exist up front.
    if !Path::new(DB_FILE).exists() {
        eprintln!("Please store your database as {}", DB_FILE);
        process::exit(1);
    }

    let db = match Db::open(DB_FILE) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let schema = match std::fs::read_to_string(SCHEMA_FILE) {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("Failed to read {}: {}", SCHEMA_FILE, e);
            process::exit(1);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = db.run_script(&schema, &mut out) {
        eprintln!("{}", e);
        process::exit(1);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    if let Err(e) = repl::run(&db, &mut input, &mut out) {
        eprintln!("{}", e);
    }
}
