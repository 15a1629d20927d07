use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{DefaultTerminal, Frame};

use carthing::{BackgroundColor, BackgroundFade, CarThingError, Controller, Poller, Remote, TickOutcome};

use crate::view::panel::{self, Panel};

/// Redraw rate while the background is fading
const FRAME_INTERVAL: Duration = Duration::from_millis(33);
/// Input wait once polling has been cancelled
const IDLE_WAIT: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    TogglePlayback,
    NextTrack,
    PreviousTrack,
    ToggleLike,
    CycleRepeat,
    ToggleShuffle,
    Quit,
}

impl AppAction {
    pub fn from_key(key_event: KeyEvent) -> Option<Self> {
        if key_event.kind != KeyEventKind::Press {
            return None;
        }
        let action = match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => AppAction::Quit,
            KeyCode::Char(' ') => AppAction::TogglePlayback,
            KeyCode::Char('n') | KeyCode::Right => AppAction::NextTrack,
            KeyCode::Char('p') | KeyCode::Left => AppAction::PreviousTrack,
            KeyCode::Char('l') => AppAction::ToggleLike,
            KeyCode::Char('r') => AppAction::CycleRepeat,
            KeyCode::Char('s') => AppAction::ToggleShuffle,
            KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,
            _ => return None,
        };
        Some(action)
    }

    fn label(&self) -> &'static str {
        match self {
            AppAction::TogglePlayback => "Play/pause",
            AppAction::NextTrack => "Next track",
            AppAction::PreviousTrack => "Previous track",
            AppAction::ToggleLike => "Like",
            AppAction::CycleRepeat => "Repeat",
            AppAction::ToggleShuffle => "Shuffle",
            AppAction::Quit => "Quit",
        }
    }
}

/// Host event loop: poll ticks and key presses run here, one at a time
pub struct App<R: Remote> {
    controller: Controller<R>,
    poller: Poller,
    fade: BackgroundFade,
    fade_duration: Duration,
    status_message: Option<String>,
    exit: bool,
}

impl<R: Remote> App<R> {
    pub fn new(controller: Controller<R>, poller: Poller, fade_duration: Duration, now: Instant) -> Self {
        Self {
            controller,
            poller,
            fade: BackgroundFade::settled(BackgroundColor::BLACK, now),
            fade_duration,
            status_message: None,
            exit: false,
        }
    }

    pub fn controller(&self) -> &Controller<R> {
        &self.controller
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        while !self.should_exit() {
            let now = Instant::now();
            self.tick(now);
            terminal.draw(|frame| self.draw(frame, now))?;

            let timeout = self.wait_timeout(Instant::now());
            if event::poll(timeout)? {
                if let Event::Key(key_event) = event::read()? {
                    if let Some(action) = AppAction::from_key(key_event) {
                        self.dispatch(action, Instant::now());
                    }
                }
            }
        }
        self.poller.token().cancel();
        Ok(())
    }

    fn draw(&self, frame: &mut Frame, now: Instant) {
        let panel = Panel {
            state: self.controller().state(),
            icons: self.controller().icons(),
            background: self.fade.at(now),
            status: self.status_message(),
        };
        panel::draw(frame, &panel);
    }

    /// How long the loop may block waiting for input
    pub fn wait_timeout(&self, now: Instant) -> Duration {
        let until_tick = self.poller.time_until_due(now).unwrap_or(IDLE_WAIT);
        if self.fade.is_finished(now) {
            until_tick
        } else {
            until_tick.min(FRAME_INTERVAL)
        }
    }

    /// Run the poll tick if it is due
    pub fn tick(&mut self, now: Instant) {
        let Some(outcome) = self.poller.run_due(&mut self.controller, now) else {
            return;
        };

        match outcome {
            TickOutcome::Updated => {
                if self.status_message.as_deref() == Some(NO_SESSION_MESSAGE) {
                    self.status_message = None;
                }
            }
            TickOutcome::Skipped => self.status_message = Some(NO_SESSION_MESSAGE.to_string()),
            TickOutcome::Failed(e) => self.status_message = Some(format!("Sync failed: {}", e)),
        }
        self.refresh_background(now);
    }

    fn refresh_background(&mut self, now: Instant) {
        if let Some(color) = self.controller.background() {
            if color != self.fade.target() {
                log::debug!("Fading background to {:?}", color.to_rgb8());
                self.fade = self.fade.retarget(color, now).with_duration(self.fade_duration);
            }
        }
    }

    pub fn dispatch(&mut self, action: AppAction, now: Instant) {
        log::debug!("{:?} action received", action);

        let result = match action {
            AppAction::Quit => {
                self.exit = true;
                return;
            }
            AppAction::TogglePlayback => self.controller.toggle_playback(),
            AppAction::NextTrack => self.controller.next_track(),
            AppAction::PreviousTrack => self.controller.previous_track(),
            AppAction::ToggleLike => self.controller.toggle_like().map(|_| ()),
            AppAction::CycleRepeat => self.controller.cycle_repeat_state().map(|_| ()),
            AppAction::ToggleShuffle => self.controller.toggle_shuffle(),
        };

        self.status_message = match result {
            Ok(()) => None,
            Err(CarThingError::NoActiveSession) => Some(NO_SESSION_MESSAGE.to_string()),
            Err(e) => {
                log::warn!("{} failed: {}", action.label(), e);
                Some(format!("{} failed: {}", action.label(), e))
            }
        };
        self.refresh_background(now);
    }
}

const NO_SESSION_MESSAGE: &str = "Nothing playing";
