use super::Phase;

const JUMP_KEYS: [&str; 3] = ["ArrowUp", "Space", "KeyW"];
const DUCK_KEYS: [&str; 2] = ["ArrowDown", "KeyS"];
const PAUSE_KEY: &str = "KeyP";
const RESTART_KEY: &str = "KeyR";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Jump,
    Duck,
    Pause,
    Restart,
}

impl Control {
    pub fn from_code(code: &str) -> Option<Self> {
        if JUMP_KEYS.contains(&code) {
            Some(Self::Jump)
        } else if DUCK_KEYS.contains(&code) {
            Some(Self::Duck)
        } else if code == PAUSE_KEY {
            Some(Self::Pause)
        } else if code == RESTART_KEY {
            Some(Self::Restart)
        } else {
            None
        }
    }

    /// Keys whose browser default (scrolling) must be suppressed.
    pub fn is_gameplay(self) -> bool {
        matches!(self, Self::Jump | Self::Duck)
    }
}

/// Edge-triggered session commands produced by key presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    TogglePause,
    Restart,
}

impl Command {
    /// Commands that come from a user gesture, which browsers require before
    /// audio may start.
    pub fn wakes_audio(self) -> bool {
        matches!(self, Command::Start | Command::Restart)
    }
}

/// Intents sampled once at the start of a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub jump: bool,
    pub duck: bool,
}

#[derive(Clone, Debug, Default)]
pub struct InputMapper {
    jump_held: bool,
    jump_armed: bool,
    duck_held: bool,
}

impl InputMapper {
    pub fn key_down(&mut self, code: &str, phase: Phase) -> Option<Command> {
        match Control::from_code(code)? {
            Control::Jump => {
                self.press(Control::Jump);
                matches!(phase, Phase::Ready | Phase::GameOver).then_some(Command::Start)
            }
            Control::Duck => {
                self.press(Control::Duck);
                None
            }
            Control::Pause => Some(Command::TogglePause),
            Control::Restart => Some(Command::Restart),
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(control) = Control::from_code(code) {
            self.release(control);
        }
    }

    /// Touch/mouse button down. Repeated presses while held are ignored.
    pub fn press(&mut self, control: Control) {
        match control {
            Control::Jump => {
                if !self.jump_held {
                    self.jump_held = true;
                    self.jump_armed = true;
                }
            }
            Control::Duck => self.duck_held = true,
            Control::Pause | Control::Restart => {}
        }
    }

    pub fn release(&mut self, control: Control) {
        match control {
            Control::Jump => self.jump_held = false,
            Control::Duck => self.duck_held = false,
            Control::Pause | Control::Restart => {}
        }
    }

    /// Snapshot for this frame; an armed jump is handed out once.
    pub fn sample(&mut self) -> Intents {
        let intents = Intents {
            jump: self.jump_armed,
            duck: self.duck_held,
        };
        self.jump_armed = false;
        intents
    }

    /// Drops a pending jump. Held keys stay held so their auto-repeat
    /// cannot re-arm a jump.
    pub fn disarm(&mut self) {
        self.jump_armed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_codes() {
        assert_eq!(Control::from_code("Space"), Some(Control::Jump));
        assert_eq!(Control::from_code("KeyW"), Some(Control::Jump));
        assert_eq!(Control::from_code("ArrowDown"), Some(Control::Duck));
        assert_eq!(Control::from_code("KeyP"), Some(Control::Pause));
        assert_eq!(Control::from_code("KeyR"), Some(Control::Restart));
        assert_eq!(Control::from_code("KeyQ"), None);
    }

    #[test]
    fn jump_is_armed_once_per_press() {
        let mut input = InputMapper::default();
        input.key_down("Space", Phase::Running);
        // auto-repeat while the key stays down
        input.key_down("Space", Phase::Running);
        assert!(input.sample().jump);
        input.key_down("Space", Phase::Running);
        assert!(!input.sample().jump);

        input.key_up("Space");
        input.key_down("ArrowUp", Phase::Running);
        assert!(input.sample().jump);
    }

    #[test]
    fn duck_is_held() {
        let mut input = InputMapper::default();
        input.press(Control::Duck);
        assert!(input.sample().duck);
        assert!(input.sample().duck);
        input.release(Control::Duck);
        assert!(!input.sample().duck);
    }

    #[test]
    fn commands_depend_on_phase() {
        let mut input = InputMapper::default();
        assert_eq!(input.key_down("Space", Phase::Ready), Some(Command::Start));
        input.key_up("Space");
        assert_eq!(input.key_down("Space", Phase::Running), None);
        input.key_up("Space");
        assert_eq!(input.key_down("Space", Phase::GameOver), Some(Command::Start));
        assert_eq!(input.key_down("KeyP", Phase::Running), Some(Command::TogglePause));
        assert_eq!(input.key_down("KeyR", Phase::Paused), Some(Command::Restart));
        assert_eq!(input.key_down("Enter", Phase::Running), None);
    }

    #[test]
    fn start_and_restart_wake_audio() {
        assert!(Command::Start.wakes_audio());
        assert!(Command::Restart.wakes_audio());
        assert!(!Command::TogglePause.wakes_audio());
    }

    #[test]
    fn disarm_keeps_held_keys() {
        let mut input = InputMapper::default();
        input.key_down("Space", Phase::Ready);
        input.press(Control::Duck);
        input.disarm();
        input.key_down("Space", Phase::Running);
        let intents = input.sample();
        assert!(!intents.jump);
        assert!(intents.duck);

        input.key_up("Space");
        input.key_down("Space", Phase::Running);
        assert!(input.sample().jump);
    }
}
