//! Command parsing for player input.

/// A parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Travel to an adjacent location.
    Move {
        /// Destination location id.
        destination: String,
    },
    /// Describe the current location.
    Look,
    /// List the locations reachable in one move.
    Moves,
    /// Show energy, score, and progress.
    Status,
    /// Show the active mission.
    Mission,
    /// Fight an enemy at the current location.
    Fight {
        /// Case-insensitive fragment of the enemy's name.
        enemy: String,
    },
    /// Search reachable locations for a property value.
    Search {
        /// Property key.
        key: String,
        /// Exact property value.
        value: String,
    },
    /// Save the game.
    Save,
    /// Load the last saved game.
    Load,
    /// Show the command reference.
    Help,
    /// Start a new game.
    Restart,
    /// Leave the game.
    Quit,
    /// A known verb missing its arguments.
    Incomplete {
        /// Usage hint for the verb.
        usage: &'static str,
    },
    /// Unknown command.
    Unknown {
        /// The raw input.
        input: String,
    },
}

/// Verb synonyms for command parsing.
const MOVE_VERBS: &[&str] = &["move", "go", "travel", "fly", "warp"];
const LOOK_VERBS: &[&str] = &["look", "l", "scan"];
const MOVES_VERBS: &[&str] = &["moves", "exits", "routes", "map"];
const STATUS_VERBS: &[&str] = &["status", "stats", "st"];
const MISSION_VERBS: &[&str] = &["mission", "missions", "m"];
const FIGHT_VERBS: &[&str] = &["fight", "attack", "engage", "combat"];
const SEARCH_VERBS: &[&str] = &["search", "find", "scan"];
const SAVE_VERBS: &[&str] = &["save"];
const LOAD_VERBS: &[&str] = &["load", "restore"];
const HELP_VERBS: &[&str] = &["help", "h", "?", "commands"];
const RESTART_VERBS: &[&str] = &["restart", "new"];
const QUIT_VERBS: &[&str] = &["quit", "q", "exit", "bye"];

/// Parse a player input string into a command.
///
/// Verbs are case-insensitive. Multi-word destinations are joined with
/// underscores, so `move proxima centauri b` reaches `proxima_centauri_b`.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    if input.is_empty() {
        return Command::Look;
    }

    let words: Vec<&str> = input.split_whitespace().collect();
    let verb = words[0].to_lowercase();
    let verb = verb.as_str();
    let rest = words.get(1..).unwrap_or(&[]);

    if MOVE_VERBS.contains(&verb) {
        return parse_move(rest);
    }
    if LOOK_VERBS.contains(&verb) {
        return Command::Look;
    }
    if MOVES_VERBS.contains(&verb) {
        return Command::Moves;
    }
    if STATUS_VERBS.contains(&verb) {
        return Command::Status;
    }
    if MISSION_VERBS.contains(&verb) {
        return Command::Mission;
    }
    if FIGHT_VERBS.contains(&verb) {
        return parse_fight(rest);
    }
    if SEARCH_VERBS.contains(&verb) {
        return parse_search(rest);
    }
    if SAVE_VERBS.contains(&verb) {
        return Command::Save;
    }
    if LOAD_VERBS.contains(&verb) {
        return Command::Load;
    }
    if HELP_VERBS.contains(&verb) {
        return Command::Help;
    }
    if RESTART_VERBS.contains(&verb) {
        return Command::Restart;
    }
    if QUIT_VERBS.contains(&verb) {
        return Command::Quit;
    }

    Command::Unknown {
        input: input.to_string(),
    }
}

fn parse_move(rest: &[&str]) -> Command {
    if rest.is_empty() {
        return Command::Incomplete {
            usage: "move <destination>",
        };
    }

    // "go to mars"
    let rest = if rest.len() > 1 && rest[0].eq_ignore_ascii_case("to") {
        &rest[1..]
    } else {
        rest
    };

    Command::Move {
        destination: rest.join("_").to_lowercase(),
    }
}

fn parse_fight(rest: &[&str]) -> Command {
    if rest.is_empty() {
        return Command::Incomplete {
            usage: "fight <enemy name>",
        };
    }
    Command::Fight {
        enemy: rest.join(" "),
    }
}

fn parse_search(rest: &[&str]) -> Command {
    if rest.len() < 2 {
        return Command::Incomplete {
            usage: "search <property> <value>",
        };
    }
    Command::Search {
        key: rest[0].to_string(),
        value: rest[1..].join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_move_verbs() {
        for input in ["move mars", "go Mars", "travel MARS", "go to mars"] {
            assert_eq!(
                parse_command(input),
                Command::Move {
                    destination: "mars".into(),
                },
                "input: {input}"
            );
        }
    }

    #[test]
    fn parse_multi_word_destination() {
        assert_eq!(
            parse_command("move Proxima Centauri b"),
            Command::Move {
                destination: "proxima_centauri_b".into(),
            }
        );
    }

    #[test]
    fn parse_simple_verbs() {
        assert_eq!(parse_command("look"), Command::Look);
        assert_eq!(parse_command(""), Command::Look);
        assert_eq!(parse_command("moves"), Command::Moves);
        assert_eq!(parse_command("STATUS"), Command::Status);
        assert_eq!(parse_command("mission"), Command::Mission);
        assert_eq!(parse_command("save"), Command::Save);
        assert_eq!(parse_command("load"), Command::Load);
        assert_eq!(parse_command("?"), Command::Help);
        assert_eq!(parse_command("restart"), Command::Restart);
        assert_eq!(parse_command("q"), Command::Quit);
    }

    #[test]
    fn parse_fight_keeps_fragment() {
        assert_eq!(
            parse_command("fight space pirate"),
            Command::Fight {
                enemy: "space pirate".into(),
            }
        );
        assert_eq!(
            parse_command("attack Pir"),
            Command::Fight {
                enemy: "Pir".into(),
            }
        );
    }

    #[test]
    fn parse_search_value_is_verbatim() {
        assert_eq!(
            parse_command("search atmosphere Thick Clouds"),
            Command::Search {
                key: "atmosphere".into(),
                value: "Thick Clouds".into(),
            }
        );
    }

    #[test]
    fn missing_arguments() {
        assert!(matches!(parse_command("move"), Command::Incomplete { .. }));
        assert!(matches!(parse_command("fight"), Command::Incomplete { .. }));
        assert!(matches!(
            parse_command("search atmosphere"),
            Command::Incomplete { .. }
        ));
    }

    #[test]
    fn unknown_keeps_input() {
        assert_eq!(
            parse_command("dance wildly"),
            Command::Unknown {
                input: "dance wildly".into(),
            }
        );
    }
}
