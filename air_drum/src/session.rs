// THEORY:
// The `session` module owns everything that must survive from one frame to the
// next: which screen is showing and the drum pipeline (with its trigger locks).
// The front-end creates one `AppSession` at startup and threads it through every
// iteration of its loop; nothing lives in process-wide globals.
//
// Screen state machine (keyboard driven, one key per frame at most):
//
//     Menu{credits: false} --c--> Menu{credits: true}
//     Menu{credits: true}  --b--> Menu{credits: false}
//     Menu{..}             --p--> Play
//     Play                 --b--> Menu{credits: false}
//     any                  --q--> quit
//
// Every other key, and `p`/`c` while playing, leaves the state untouched.

use crate::pipeline::{ConfigError, DrumPipeline, FrameReport, KitConfig};
use log::info;

/// Which screen is showing. The credits flag only exists while in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu { showing_credits: bool },
    Play,
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Menu {
            showing_credits: false,
        }
    }
}

/// The four keys the kit understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Play,
    Credits,
    Back,
    Quit,
}

impl KeyCommand {
    /// Maps a raw key code (as returned by a window key poll, `-1` for none) to a
    /// command. Only the low byte is significant; keys are lowercase only.
    pub fn from_key_code(code: i32) -> Option<Self> {
        if code < 0 {
            return None;
        }
        match (code & 0xFF) as u8 {
            b'p' => Some(KeyCommand::Play),
            b'c' => Some(KeyCommand::Credits),
            b'b' => Some(KeyCommand::Back),
            b'q' => Some(KeyCommand::Quit),
            _ => None,
        }
    }
}

/// What the frame loop should do after handling input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

/// Per-run state passed through the frame loop.
pub struct AppSession {
    state: AppState,
    pipeline: DrumPipeline,
}

impl AppSession {
    pub fn new(config: KitConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_pipeline(DrumPipeline::new(config)?))
    }

    pub fn with_pipeline(pipeline: DrumPipeline) -> Self {
        Self {
            state: AppState::default(),
            pipeline,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn pipeline(&self) -> &DrumPipeline {
        &self.pipeline
    }

    /// Runs the drum pipeline on a frame. Only meaningful while playing; in the
    /// menu the caller skips tracking entirely.
    pub fn process_frame(&mut self, frame_buffer: &[u8]) -> FrameReport {
        self.pipeline.process_frame(frame_buffer)
    }

    /// Applies one polled key code to the screen state machine.
    pub fn handle_key(&mut self, code: i32) -> LoopControl {
        match KeyCommand::from_key_code(code) {
            Some(command) => self.apply(command),
            None => LoopControl::Continue,
        }
    }

    pub fn apply(&mut self, command: KeyCommand) -> LoopControl {
        let next = match (self.state, command) {
            (_, KeyCommand::Quit) => return LoopControl::Quit,
            (AppState::Menu { .. }, KeyCommand::Play) => AppState::Play,
            (AppState::Menu { .. }, KeyCommand::Credits) => AppState::Menu {
                showing_credits: true,
            },
            (AppState::Menu { .. }, KeyCommand::Back) | (AppState::Play, KeyCommand::Back) => {
                AppState::Menu {
                    showing_credits: false,
                }
            }
            (AppState::Play, KeyCommand::Play | KeyCommand::Credits) => AppState::Play,
        };

        if next != self.state {
            info!("screen {:?} -> {:?}", self.state, next);
            self.state = next;
        }
        LoopControl::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> AppSession {
        AppSession::new(KitConfig::default()).unwrap()
    }

    fn key(c: char) -> i32 {
        c as i32
    }

    #[test]
    fn starts_in_the_menu_without_credits() {
        assert_eq!(
            session().state(),
            AppState::Menu {
                showing_credits: false
            }
        );
    }

    #[test]
    fn menu_keys_move_between_screens() {
        let mut session = session();
        assert_eq!(session.handle_key(key('c')), LoopControl::Continue);
        assert_eq!(session.state(), AppState::Menu { showing_credits: true });

        session.handle_key(key('b'));
        assert_eq!(session.state(), AppState::Menu { showing_credits: false });

        session.handle_key(key('c'));
        session.handle_key(key('p'));
        assert_eq!(session.state(), AppState::Play);
    }

    #[test]
    fn back_from_play_lands_on_the_plain_menu() {
        let mut session = session();
        session.handle_key(key('p'));
        session.handle_key(key('b'));
        assert_eq!(session.state(), AppState::Menu { showing_credits: false });
    }

    #[test]
    fn quit_works_from_every_screen() {
        for setup in ["", "c", "p"] {
            let mut session = session();
            for c in setup.chars() {
                session.handle_key(key(c));
            }
            assert_eq!(session.handle_key(key('q')), LoopControl::Quit);
        }
    }

    #[test]
    fn unknown_keys_change_nothing_in_the_menu() {
        let mut session = session();
        session.handle_key(key('c'));
        for code in [-1, 0, key('x'), key('P'), key('Q'), 27, 13, key(' ')] {
            assert_eq!(session.handle_key(code), LoopControl::Continue);
            assert_eq!(session.state(), AppState::Menu { showing_credits: true });
        }
    }

    #[test]
    fn only_back_and_quit_matter_while_playing() {
        let mut session = session();
        session.handle_key(key('p'));
        for code in [key('p'), key('c'), key('z'), -1] {
            assert_eq!(session.handle_key(code), LoopControl::Continue);
            assert_eq!(session.state(), AppState::Play);
        }
    }

    #[test]
    fn high_bits_of_the_key_code_are_ignored() {
        assert_eq!(
            KeyCommand::from_key_code(0x10_0000 | b'q' as i32),
            Some(KeyCommand::Quit)
        );
    }
}
