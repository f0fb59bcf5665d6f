use std::io::{self, BufRead, Write};

use crate::action::Action;
use crate::bot::Bot;
use crate::state::GameStateView;
use crate::visualize::{describe_action, render_state};

/// Interactive bot that queries a human via standard input.
pub struct HumanBot {
    name: String,
}

impl HumanBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for HumanBot {
    fn default() -> Self {
        Self::new("Human")
    }
}

impl Bot for HumanBot {
    fn select_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        loop {
            println!("\n=== {}'s turn ({}) ===", self.name, state.current_player_id);
            println!("{}", render_state(state));
            println!("Available actions:");
            for (index, action) in legal_actions.iter().enumerate() {
                println!("  [{index}] {}", describe_action(state, action));
            }
            println!("Type the action index, 'help' or 'q' to quit.");
            print!("Selection: ");
            if io::stdout().flush().is_err() {
                eprintln!("failed to flush stdout");
            }
            let input = match read_selection(&mut io::stdin().lock()) {
                Ok(Some(input)) => input,
                Ok(None) => {
                    println!("Input closed, exiting game.");
                    std::process::exit(0);
                }
                Err(_) => {
                    eprintln!("failed to read input");
                    continue;
                }
            };
            let trimmed = input.trim();
            if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
                println!("Exiting game at user's request.");
                std::process::exit(0);
            }
            if trimmed.eq_ignore_ascii_case("help") {
                println!("Enter the numeric index listed next to the action you wish to perform.");
                println!("Plays marked (UNO!) call UNO for you; playing down to one card without it costs two cards.");
                continue;
            }
            let Ok(choice) = trimmed.parse::<usize>() else {
                println!("Invalid input: '{trimmed}'. Please enter a number.");
                continue;
            };
            if let Some(action) = legal_actions.get(choice) {
                println!("You selected: {}", describe_action(state, action));
                return *action;
            }
            println!("Index out of range. Please choose a valid option.");
        }
    }
}

/// Next line of input, or `None` once the reader is exhausted.
fn read_selection(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut input = String::new();
    match reader.read_line(&mut input)? {
        0 => Ok(None),
        _ => Ok(Some(input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_input_reads_as_none() {
        let mut closed: &[u8] = b"";
        assert!(read_selection(&mut closed).expect("read").is_none());

        let mut typed: &[u8] = b"\n2\n";
        assert_eq!(read_selection(&mut typed).expect("read").as_deref(), Some("\n"));
        assert_eq!(read_selection(&mut typed).expect("read").as_deref(), Some("2\n"));
        assert!(read_selection(&mut typed).expect("read").is_none());
    }
}
