/// A fully parsed user command, arity already checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Demo,
    ViewSubjects { student_id: String },
    LookupAddress { first_name: String, surname: String },
    ListReviews { student_id: String },
    ListCourses { teacher_id: String },
    ListIncomplete,
    ListLowMarks,
    Exit,
}

/// Parse one input line into a `Command`.
///
/// The line is split on whitespace into a command token and its arguments.
/// A wrong argument count or an unrecognized command token produces the
/// message to show the user; no query runs in either case.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = tokens.split_first() else {
        return Err("Incorrect command: ''".to_string());
    };

    match command {
        "d" => {
            check_usage(command, args, 0)?;
            Ok(Command::Demo)
        }
        "vs" => {
            check_usage(command, args, 1)?;
            Ok(Command::ViewSubjects {
                student_id: args[0].to_string(),
            })
        }
        "la" => {
            check_usage(command, args, 2)?;
            Ok(Command::LookupAddress {
                first_name: args[0].to_string(),
                surname: args[1].to_string(),
            })
        }
        "lr" => {
            check_usage(command, args, 1)?;
            Ok(Command::ListReviews {
                student_id: args[0].to_string(),
            })
        }
        "lc" => {
            check_usage(command, args, 1)?;
            Ok(Command::ListCourses {
                teacher_id: args[0].to_string(),
            })
        }
        "lnc" => {
            check_usage(command, args, 0)?;
            Ok(Command::ListIncomplete)
        }
        "lf" => {
            check_usage(command, args, 0)?;
            Ok(Command::ListLowMarks)
        }
        "e" => {
            check_usage(command, args, 0)?;
            Ok(Command::Exit)
        }
        _ => Err(format!("Incorrect command: '{}'", command)),
    }
}

fn check_usage(command: &str, args: &[&str], num_args: usize) -> Result<(), String> {
    if args.len() != num_args {
        return Err(format!(
            "The {} command requires {} arguments.",
            command, num_args
        ));
    }
    Ok(())
}
