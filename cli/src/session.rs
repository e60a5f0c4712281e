use minefield_core::{Clock, Coord2, Difficulty, GameError, Minefield, RevealOutcome};

use crate::command::{Command, HELP};
use crate::render::render_board;

/// What the terminal has to do after a command was applied.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct Reply {
    pub(crate) redraw: bool,
    pub(crate) message: Option<String>,
    pub(crate) quit: bool,
}

impl Reply {
    fn redraw() -> Self {
        Self {
            redraw: true,
            ..Default::default()
        }
    }

    fn message(text: impl Into<String>) -> Self {
        Self {
            message: Some(text.into()),
            ..Default::default()
        }
    }

    fn with_message(mut self, text: impl Into<String>) -> Self {
        self.message = Some(text.into());
        self
    }
}

/// Holds the current field and routes commands into it. A field is only
/// replaced once its successor was created successfully.
pub(crate) struct Session<C: Clock + Clone> {
    field: Minefield<C>,
}

impl<C: Clock + Clone> Session<C> {
    pub(crate) fn new(field: Minefield<C>) -> Self {
        Self { field }
    }

    pub(crate) fn field(&self) -> &Minefield<C> {
        &self.field
    }

    pub(crate) fn board(&self) -> String {
        render_board(&self.field)
    }

    pub(crate) fn update(&mut self, command: Command) -> Reply {
        match command {
            Command::Reveal(coords) => self.reveal(coords),
            Command::Flag(coords) => self.flag(coords),
            Command::NewGame => self.replace(self.field.new_game()),
            Command::ChangeDifficulty(difficulty) => self.change_difficulty(difficulty),
            Command::Help => Reply::message(HELP),
            Command::Quit => Reply {
                quit: true,
                ..Default::default()
            },
        }
    }

    fn check_cell(&self, (x, y): Coord2) -> Option<Reply> {
        if self.field.contains((x, y)) {
            None
        } else {
            let (width, height) = self.field.size();
            Some(Reply::message(format!(
                "No such cell ({x}, {y}), the field is {width}x{height}"
            )))
        }
    }

    fn reveal(&mut self, coords: Coord2) -> Reply {
        if let Some(reply) = self.check_cell(coords) {
            return reply;
        }

        let outcome = self.field.reveal(coords);
        tracing::debug!(?coords, ?outcome, "reveal");
        match outcome {
            RevealOutcome::NoChange => Reply::default(),
            RevealOutcome::Revealed => Reply::redraw(),
            RevealOutcome::Won => Reply::redraw().with_message(format!(
                "You won in {} seconds!",
                self.field.elapsed_secs()
            )),
            RevealOutcome::HitMine => Reply::redraw().with_message("Boom! You hit a mine."),
        }
    }

    fn flag(&mut self, coords: Coord2) -> Reply {
        if let Some(reply) = self.check_cell(coords) {
            return reply;
        }

        let outcome = self.field.toggle_flag(coords);
        tracing::debug!(?coords, ?outcome, "toggle flag");
        if outcome.has_update() {
            Reply::redraw()
        } else {
            Reply::default()
        }
    }

    fn change_difficulty(&mut self, difficulty: Difficulty) -> Reply {
        let clock = self.field.clock().clone();
        self.replace(Minefield::with_clock(difficulty, clock))
    }

    fn replace(&mut self, next: Result<Minefield<C>, GameError>) -> Reply {
        match next {
            Ok(field) => {
                tracing::info!(difficulty = %field.difficulty(), "new game");
                self.field = field;
                Reply::redraw()
            }
            Err(err) => {
                tracing::warn!(%err, "could not create minefield");
                Reply::message(format!("{err}, keeping the current game"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minefield_core::{GameState, ManualClock};

    fn session(difficulty: Difficulty) -> Session<ManualClock> {
        let field = Minefield::with_clock(difficulty, ManualClock::new(0))
            .unwrap()
            .with_seed(3);
        Session::new(field)
    }

    #[test]
    fn reveal_outside_the_field_does_not_touch_it() {
        let mut session = session(Difficulty::Beginner);

        let reply = session.update(Command::Reveal((9, 0)));
        assert!(!reply.redraw);
        assert_eq!(
            reply.message.as_deref(),
            Some("No such cell (9, 0), the field is 9x9")
        );
        assert!(session.field().is_first_click());
    }

    #[test]
    fn moves_request_redraws() {
        let mut session = session(Difficulty::Beginner);

        assert!(session.update(Command::Reveal((4, 4))).redraw);
        assert!(!session.field().is_first_click());
        // revealing the same cell again changes nothing
        assert_eq!(session.update(Command::Reveal((4, 4))), Reply::default());
    }

    #[test]
    fn flag_toggles_back_and_forth() {
        let mut session = session(Difficulty::Beginner);

        assert!(session.update(Command::Flag((0, 0))).redraw);
        assert_eq!(session.field().flagged_cells(), 1);
        assert!(session.update(Command::Flag((0, 0))).redraw);
        assert_eq!(session.field().flagged_cells(), 0);
    }

    #[test]
    fn winning_prints_a_message() {
        let mut session = session(Difficulty::Custom {
            width: 2,
            height: 1,
            mines: 1,
        });

        let reply = session.update(Command::Reveal((1, 0)));
        assert!(reply.redraw);
        assert_eq!(reply.message.as_deref(), Some("You won in 0 seconds!"));
        assert_eq!(session.field().state(), GameState::Won);
    }

    #[test]
    fn rejected_difficulty_keeps_current_game() {
        let mut session = session(Difficulty::Beginner);
        session.update(Command::Flag((2, 2)));

        let reply = session.update(Command::ChangeDifficulty(Difficulty::Custom {
            width: 5,
            height: 5,
            mines: 25,
        }));
        assert!(!reply.redraw);
        assert_eq!(
            reply.message.as_deref(),
            Some("Invalid field dimensions or mine count, keeping the current game")
        );
        assert_eq!(session.field().difficulty(), Difficulty::Beginner);
        assert_eq!(session.field().flagged_cells(), 1);
    }

    #[test]
    fn new_game_reuses_difficulty() {
        let mut session = session(Difficulty::Expert);
        session.update(Command::Reveal((0, 0)));

        assert!(session.update(Command::NewGame).redraw);
        assert_eq!(session.field().difficulty(), Difficulty::Expert);
        assert!(session.field().is_first_click());

        assert!(
            session
                .update(Command::ChangeDifficulty(Difficulty::Intermediate))
                .redraw
        );
        assert_eq!(session.field().size(), (16, 16));
    }

    #[test]
    fn quit_and_help() {
        let mut session = session(Difficulty::Beginner);
        assert!(session.update(Command::Quit).quit);
        assert_eq!(session.update(Command::Help).message.as_deref(), Some(HELP));
    }
}
