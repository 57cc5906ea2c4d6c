use proptest::prelude::*;
use studentql::commands::{Command, parse_command};

fn arity(command: &str) -> usize {
    match command {
        "vs" | "lr" | "lc" => 1,
        "la" => 2,
        _ => 0,
    }
}

proptest! {
    // Any known command with the wrong number of arguments parses to the
    // usage message naming that command and its arity, never to a Command.
    #[test]
    fn wrong_arity_never_parses(
        command in prop::sample::select(vec!["d", "vs", "la", "lr", "lc", "lnc", "lf", "e"]),
        args in prop::collection::vec("[a-z0-9]{1,8}", 0..5),
    ) {
        prop_assume!(args.len() != arity(command));
        let line = format!("{} {}", command, args.join(" "));
        let err = parse_command(&line).unwrap_err();
        prop_assert_eq!(
            err,
            format!("The {} command requires {} arguments.", command, arity(command))
        );
    }

    // Tokens outside the command table are always rejected with the
    // incorrect-command message.
    #[test]
    fn unknown_tokens_are_rejected(token in "[a-z]{3,10}") {
        prop_assume!(!matches!(
            token.as_str(),
            "d" | "vs" | "la" | "lr" | "lc" | "lnc" | "lf" | "e"
        ));
        let err = parse_command(&token).unwrap_err();
        prop_assert_eq!(err, format!("Incorrect command: '{}'", token));
    }

    // Correct arity always parses, whatever the argument text is.
    #[test]
    fn correct_arity_always_parses(
        student_id in "[a-z0-9]{1,8}",
    ) {
        let parsed = parse_command(&format!("vs {}", student_id)).unwrap();
        prop_assert_eq!(parsed, Command::ViewSubjects { student_id });
    }
}
