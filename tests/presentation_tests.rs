//! Presentation observers wired to a live engine.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::scripted_engine;
use dice_race::core::{GameRng, Phase, PlayerId};
use dice_race::events::EventKind;
use dice_race::presentation::{
    face_orientation, AnnouncementKind, Announcer, Celebration, RollAnimation, ScoreboardView,
    PETAL_COUNT, ROLL_DURATION_MS, SIX_BONUS_DELAY_MS,
};

fn texts(announcer: &Rc<RefCell<Announcer>>) -> Vec<(AnnouncementKind, String)> {
    announcer
        .borrow_mut()
        .drain()
        .into_iter()
        .map(|a| (a.kind, a.text))
        .collect()
}

#[test]
fn test_announcements_follow_turns() {
    let mut engine = scripted_engine(2, &["Ann", "Bob"], 12, &[6, 2, 4]);
    let announcer = Rc::new(RefCell::new(Announcer::new()));
    engine.subscribe_all(announcer.clone());

    engine.start();
    engine.roll_dice().unwrap();
    assert_eq!(
        texts(&announcer),
        vec![(AnnouncementKind::Turn, "Ann, you have got 6".to_string())]
    );
    assert_eq!(announcer.borrow().pending(), 1);

    announcer.borrow_mut().advance_to(SIX_BONUS_DELAY_MS);
    assert_eq!(
        texts(&announcer),
        vec![(
            AnnouncementKind::SixBonus,
            "Congratulations, Ann, you have got a six number".to_string()
        )]
    );

    engine.roll_dice().unwrap();
    assert_eq!(announcer.borrow().banner(), Some("Bob, you have got 2"));
}

/// A six that wins the game gets the victory line, not the bonus line.
#[test]
fn test_victory_cancels_pending_bonus() {
    let mut engine = scripted_engine(2, &["Ann", "Bob"], 12, &[6, 2, 6]);
    let announcer = Rc::new(RefCell::new(Announcer::new()));
    engine.subscribe(
        &[EventKind::TurnAdvanced, EventKind::GameWon, EventKind::GameStarted],
        announcer.clone(),
    );

    engine.start();
    while engine.roll_dice().unwrap().is_some() {}
    assert_eq!(engine.phase(), Phase::Won);

    announcer.borrow_mut().advance_to(10 * SIX_BONUS_DELAY_MS);
    let lines = texts(&announcer);

    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines.last(),
        Some(&(
            AnnouncementKind::Victory,
            "Congratulations Ann, you have won".to_string()
        ))
    );
    assert!(lines.iter().all(|(kind, _)| *kind != AnnouncementKind::SixBonus));
}

#[test]
fn test_reset_silences_announcer() {
    let mut engine = scripted_engine(2, &[], 50, &[6]);
    let announcer = Rc::new(RefCell::new(Announcer::new()));
    engine.subscribe_all(announcer.clone());

    engine.start();
    engine.roll_dice().unwrap();
    engine.reset();

    assert_eq!(announcer.borrow().pending(), 0);
    assert_eq!(announcer.borrow().banner(), None);

    announcer.borrow_mut().advance_to(SIX_BONUS_DELAY_MS);
    let lines = texts(&announcer);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].0, AnnouncementKind::Turn);
}

#[test]
fn test_muted_lines_are_not_spoken() {
    let mut engine = scripted_engine(1, &["Solo"], 100, &[3]);
    let announcer = Rc::new(RefCell::new(Announcer::new()));
    announcer.borrow_mut().set_voice_enabled(false);
    engine.subscribe_all(announcer.clone());

    engine.start();
    engine.roll_dice().unwrap();

    let lines = announcer.borrow_mut().drain();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].text, "Solo, you have got 3");
    assert!(!lines[0].spoken);
}

#[test]
fn test_celebration_on_win_and_cleared_on_reset() {
    let mut engine = scripted_engine(1, &[], 4, &[5]);
    let celebration = Rc::new(RefCell::new(Celebration::new(11)));
    engine.subscribe_all(celebration.clone());

    engine.start();
    assert!(!celebration.borrow().is_active());

    engine.roll_dice().unwrap();
    assert_eq!(celebration.borrow().petals().len(), PETAL_COUNT);

    engine.reset();
    assert!(!celebration.borrow().is_active());
}

/// The view animates toward the face drawn by `begin_roll`; the score only
/// moves once the animation ends and `finish_roll` is called.
#[test]
fn test_animation_lands_on_drawn_face() {
    let mut engine = scripted_engine(2, &["A", "B"], 50, &[5]);
    let mut cosmetic = GameRng::new(3);
    engine.start();

    let face = engine.begin_roll().unwrap().unwrap();
    let animation = RollAnimation::new(face, &mut cosmetic);
    assert_eq!(animation.face(), face);

    let midway = animation.sample(ROLL_DURATION_MS / 2);
    assert!(!midway.finished);
    assert_eq!(engine.scores(), &[0, 0]);

    let last = animation.sample(ROLL_DURATION_MS);
    assert!(last.finished);
    assert_eq!(last.orientation, face_orientation(face));

    let outcome = engine.finish_roll().unwrap();
    assert_eq!(outcome.face, face);
    assert_eq!(engine.scores(), &[5, 0]);
}

#[test]
fn test_scoreboard_tracks_engine() {
    let mut engine = scripted_engine(3, &["A", "", "C"], 8, &[3, 4, 2, 5]);
    let mut view = ScoreboardView::from_engine(&engine);
    assert_eq!(view.phase, Phase::Setup);
    assert!(view.rows.iter().all(|r| !r.is_current));

    engine.start();
    engine.roll_dice().unwrap();
    engine.roll_dice().unwrap();
    view.update_from_engine(&engine);

    assert_eq!(view.rows[1].name, "Player 2");
    assert_eq!(view.rows[1].score, 4);
    assert!(view.rows[2].is_current);
    assert_eq!(view.last_roll, Some(4));
    assert_eq!(
        view.recent,
        vec![("Player 2".to_string(), 4), ("A".to_string(), 3)]
    );

    engine.roll_dice().unwrap();
    engine.roll_dice().unwrap();
    view.update_from_engine(&engine);

    assert_eq!(engine.winner(), Some(PlayerId::new(0)));
    assert_eq!(view.winner.as_deref(), Some("A"));
    assert!(view.rows.iter().all(|r| !r.is_current));
}
