//! Menu-driven player input.
//!
//! [`ConsoleInput`] reads line-oriented answers from any `BufRead` and
//! writes prompts to any `Write`, re-prompting until an answer parses.
//! End of input is an error: the game cannot continue without a player.

use std::io::{BufRead, Write};
use std::str::FromStr;

use campus_quest_core::game::{ActionSource, PlayerAction, PlayerSnapshot};
use campus_quest_core::player::Direction;
use campus_quest_core::{Mode, QuestError, Result, WeaponKind};

use crate::display;

/// Interactive action source over a reader and a writer.
pub struct ConsoleInput<R, W> {
    input: R,
    output: W,
}

fn io_error(err: std::io::Error) -> QuestError {
    QuestError::Input(err.to_string())
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    /// Creates a console over the given streams.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks for the game mode.
    ///
    /// # Errors
    ///
    /// Fails when input ends or the streams fail.
    pub fn choose_mode(&mut self) -> Result<Mode> {
        self.say("Select mode:\n  [1] Interactive (you choose every action)\n  [2] Automated (watch the hero fight)\nYour choice: ")?;
        self.ask(|line| line.parse::<Mode>().ok(), "Please enter 1 or 2: ")
    }

    fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).map_err(io_error)?;
        self.output.flush().map_err(io_error)
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(io_error)?;
        if read == 0 {
            return Err(QuestError::Input("end of input".to_owned()));
        }
        Ok(line.trim().to_owned())
    }

    /// Reads lines until `parse` accepts one.
    fn ask<T>(&mut self, parse: impl Fn(&str) -> Option<T>, retry: &str) -> Result<T> {
        loop {
            let line = self.read_line()?;
            if let Some(value) = parse(&line) {
                return Ok(value);
            }
            self.say(&format!("Invalid input! {retry}"))?;
        }
    }

    fn ask_number(&mut self, min: u32, max: u32) -> Result<u32> {
        self.ask(
            |line| line.parse::<u32>().ok().filter(|n| (min..=max).contains(n)),
            &format!("Please enter a number between {min} and {max}: "),
        )
    }

    fn ask_move(&mut self, snapshot: &PlayerSnapshot) -> Result<PlayerAction> {
        self.say(&format!(
            "\nMOVEMENT\nCurrent position: {}\n  [W] Up  [A] Left  [S] Down  [D] Right\nChoice: ",
            snapshot.position
        ))?;
        let direction = self.ask(
            |line| Direction::from_str(line).ok(),
            "Valid options: w, a, s, d\nTry again: ",
        )?;
        self.say("Distance to move: ")?;
        let distance = self.ask(
            |line| {
                line.parse::<f64>()
                    .ok()
                    .filter(|d| d.is_finite() && *d > 0.0)
            },
            "Enter a positive number: ",
        )?;
        Ok(PlayerAction::Move {
            direction,
            distance,
        })
    }

    fn ask_weapon(&mut self, current: WeaponKind) -> Result<WeaponKind> {
        let mut menu = format!("\nCHANGE WEAPON\nCurrent weapon: {current}\n");
        for (n, kind) in WeaponKind::ALL.iter().enumerate() {
            menu.push_str(&format!("  [{}] {kind}\n", n + 1));
        }
        menu.push_str("Choice: ");
        self.say(&menu)?;
        self.ask(
            |line| {
                line.parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| WeaponKind::ALL.get(i).copied())
                    .or_else(|| line.parse::<WeaponKind>().ok())
            },
            "Please enter 1-3 or a weapon name: ",
        )
    }
}

impl<R: BufRead, W: Write> ActionSource for ConsoleInput<R, W> {
    fn choose_action(&mut self, snapshot: &PlayerSnapshot) -> Result<PlayerAction> {
        let mut menu = Vec::new();
        display::dashboard(&mut menu, snapshot).map_err(io_error)?;
        display::action_menu(&mut menu, snapshot).map_err(io_error)?;
        self.output.write_all(&menu).map_err(io_error)?;
        self.output.flush().map_err(io_error)?;

        match self.ask_number(1, 6)? {
            1 => self.ask_move(snapshot),
            2 => Ok(PlayerAction::Attack),
            3 => Ok(PlayerAction::ChangeWeapon(self.ask_weapon(snapshot.weapon)?)),
            4 => Ok(PlayerAction::Status),
            5 => Ok(PlayerAction::Pass),
            _ => Ok(PlayerAction::Help),
        }
    }

    fn show_help(&mut self) -> Result<()> {
        display::help(&mut self.output).map_err(io_error)?;
        self.acknowledge()
    }

    fn acknowledge(&mut self) -> Result<()> {
        self.say("\nPress Enter to continue...")?;
        self.read_line().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_quest_core::Point2D;
    use std::io::Cursor;

    fn snapshot() -> PlayerSnapshot {
        PlayerSnapshot {
            turn: 1,
            max_turns: 50,
            name: "Hero".to_owned(),
            position: Point2D::ORIGIN,
            health: 80,
            max_health: 80,
            weapon: WeaponKind::Bow,
            weapon_range: 4,
            weapon_power: 1,
            target: None,
            living_enemies: 3,
        }
    }

    fn console(input: &str) -> ConsoleInput<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleInput::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn simple_menu_choices() {
        let mut c = console("2\n4\n5\n6\n");
        let s = snapshot();
        assert_eq!(c.choose_action(&s).unwrap(), PlayerAction::Attack);
        assert_eq!(c.choose_action(&s).unwrap(), PlayerAction::Status);
        assert_eq!(c.choose_action(&s).unwrap(), PlayerAction::Pass);
        assert_eq!(c.choose_action(&s).unwrap(), PlayerAction::Help);
    }

    #[test]
    fn reprompts_on_bad_menu_input() {
        let mut c = console("zero\n9\n5\n");
        assert_eq!(c.choose_action(&snapshot()).unwrap(), PlayerAction::Pass);
        let shown = String::from_utf8(c.output).unwrap();
        assert_eq!(shown.matches("Invalid input!").count(), 2);
    }

    #[test]
    fn move_reads_direction_and_distance() {
        let mut c = console("1\nq\nD\n-1\nnan\n2.5\n");
        assert_eq!(
            c.choose_action(&snapshot()).unwrap(),
            PlayerAction::Move {
                direction: Direction::Right,
                distance: 2.5
            }
        );
    }

    #[test]
    fn weapon_by_number_or_name() {
        let mut c = console("3\n3\n3\nspear\n");
        let s = snapshot();
        assert_eq!(
            c.choose_action(&s).unwrap(),
            PlayerAction::ChangeWeapon(WeaponKind::Sword)
        );
        assert_eq!(
            c.choose_action(&s).unwrap(),
            PlayerAction::ChangeWeapon(WeaponKind::Spear)
        );
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut c = console("");
        assert!(matches!(
            c.choose_action(&snapshot()),
            Err(QuestError::Input(_))
        ));
    }

    #[test]
    fn mode_prompt() {
        let mut c = console("3\n1\n");
        assert_eq!(c.choose_mode().unwrap(), Mode::Interactive);
    }
}
