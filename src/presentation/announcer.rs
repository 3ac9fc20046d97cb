//! Spoken and on-screen announcements.
//!
//! The announcer turns engine events into the lines a speech unit would say
//! and the banner would show. It does not synthesise speech; hosts drain
//! [`Announcement`]s and hand `spoken` ones to their speech backend.

use serde::{Deserialize, Serialize};

use crate::events::{GameEvent, Observer};

use super::schedule::DelayedQueue;

/// Delay between a six's turn line and the bonus line.
pub const SIX_BONUS_DELAY_MS: u64 = 2000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnouncementKind {
    /// "`{name}, you have got {n}`"
    Turn,
    /// Follow-up after rolling a six.
    SixBonus,
    /// Win line.
    Victory,
}

/// A line ready to show and, if `spoken`, to say.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub kind: AnnouncementKind,
    pub text: String,
    pub spoken: bool,
}

/// Renders engine events as announcement lines.
#[derive(Clone, Debug)]
pub struct Announcer {
    voice_enabled: bool,
    banner: Option<String>,
    ready: Vec<Announcement>,
    delayed: DelayedQueue<(AnnouncementKind, String)>,
}

impl Default for Announcer {
    fn default() -> Self {
        Self {
            voice_enabled: true,
            banner: None,
            ready: Vec::new(),
            delayed: DelayedQueue::new(),
        }
    }
}

impl Announcer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sound toggle. Muted lines are still produced, with `spoken == false`.
    pub fn set_voice_enabled(&mut self, enabled: bool) {
        self.voice_enabled = enabled;
    }

    #[must_use]
    pub fn voice_enabled(&self) -> bool {
        self.voice_enabled
    }

    /// The line currently on the banner.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Advance the clock, releasing delayed lines that fell due.
    pub fn advance_to(&mut self, now_ms: u64) {
        for (kind, text) in self.delayed.advance_to(now_ms) {
            self.emit(kind, text);
        }
    }

    /// Lines waiting on the clock.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.delayed.len()
    }

    /// Take all lines released so far.
    pub fn drain(&mut self) -> Vec<Announcement> {
        std::mem::take(&mut self.ready)
    }

    fn emit(&mut self, kind: AnnouncementKind, text: String) {
        self.banner = Some(text.clone());
        self.ready.push(Announcement {
            kind,
            text,
            spoken: self.voice_enabled,
        });
    }

    fn clear(&mut self) {
        self.delayed.cancel_all();
        self.banner = None;
    }
}

impl Observer for Announcer {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::TurnAdvanced { name, face, .. } => {
                self.emit(AnnouncementKind::Turn, format!("{name}, you have got {face}"));
                if face.is_max() {
                    self.delayed.schedule_in(
                        SIX_BONUS_DELAY_MS,
                        (
                            AnnouncementKind::SixBonus,
                            format!("Congratulations, {name}, you have got a six number"),
                        ),
                    );
                }
            }
            GameEvent::GameWon { name, .. } => {
                self.delayed.cancel_all();
                self.emit(
                    AnnouncementKind::Victory,
                    format!("Congratulations {name}, you have won"),
                );
            }
            GameEvent::GameStarted { .. } | GameEvent::GameReset => self.clear(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DieFace, PlayerId};

    fn turn(name: &str, face: u8) -> GameEvent {
        GameEvent::TurnAdvanced {
            player: PlayerId::new(0),
            name: name.into(),
            face: DieFace::new(face).unwrap(),
            next: PlayerId::new(1),
        }
    }

    #[test]
    fn test_turn_line() {
        let mut announcer = Announcer::new();
        announcer.on_event(&turn("Ann", 3));

        let lines = announcer.drain();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Ann, you have got 3");
        assert!(lines[0].spoken);
        assert_eq!(announcer.banner(), Some("Ann, you have got 3"));
    }

    #[test]
    fn test_six_bonus_is_delayed() {
        let mut announcer = Announcer::new();
        announcer.advance_to(1_000);
        announcer.on_event(&turn("Ann", 6));
        announcer.drain();

        announcer.advance_to(2_999);
        assert!(announcer.drain().is_empty());

        announcer.advance_to(3_000);
        let lines = announcer.drain();
        assert_eq!(lines[0].kind, AnnouncementKind::SixBonus);
        assert_eq!(lines[0].text, "Congratulations, Ann, you have got a six number");
    }

    #[test]
    fn test_reset_cancels_bonus() {
        let mut announcer = Announcer::new();
        announcer.on_event(&turn("Ann", 6));
        announcer.on_event(&GameEvent::GameReset);

        announcer.advance_to(10_000);
        assert_eq!(announcer.pending(), 0);
        assert!(announcer.drain().iter().all(|a| a.kind != AnnouncementKind::SixBonus));
        assert_eq!(announcer.banner(), None);
    }

    #[test]
    fn test_victory_line() {
        let mut announcer = Announcer::new();
        announcer.on_event(&GameEvent::GameWon {
            winner: PlayerId::new(1),
            name: "Bo".into(),
            score: 52,
        });

        let lines = announcer.drain();
        assert_eq!(lines[0].kind, AnnouncementKind::Victory);
        assert_eq!(lines[0].text, "Congratulations Bo, you have won");
    }

    #[test]
    fn test_muted_lines_are_not_spoken() {
        let mut announcer = Announcer::new();
        announcer.set_voice_enabled(false);
        announcer.on_event(&turn("Ann", 2));

        let lines = announcer.drain();
        assert!(!lines[0].spoken);
        assert_eq!(announcer.banner(), Some("Ann, you have got 2"));
    }
}
