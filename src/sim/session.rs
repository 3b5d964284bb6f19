//! Session state machine
//!
//! Sole owner of score, high score and the Idle → Playing → GameOver flow.
//! Lane controllers only report contacts; every side effect (UI text,
//! visibility, music, persisted keys, reload) is pushed out from here.
//!
//! A reload never rebuilds the session from scratch: `begin` re-reads the
//! persisted restart intent and either shows the title or jumps straight
//! into play.

use serde::{Deserialize, Serialize};

use super::collision::{CollisionSink, HitResponse};
use super::entity::EntityCategory;
use crate::persistence::{HIGH_SCORE_KEY, KeyValueStore, RESTART_KEY};
use crate::platform::Presentation;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title shown, time frozen
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart or exit
    GameOver,
}

impl GamePhase {
    /// Global time scale while in this phase
    pub fn time_scale(&self) -> f32 {
        match self {
            GamePhase::Playing => 1.0,
            GamePhase::Idle | GamePhase::GameOver => 0.0,
        }
    }
}

pub struct Session {
    phase: GamePhase,
    score: u64,
    high_score: u64,
    reload_requested: bool,
    store: Box<dyn KeyValueStore>,
    presentation: Option<Box<dyn Presentation>>,
}

impl Session {
    /// Create the session and run the start-of-session sequence
    pub fn new(store: Box<dyn KeyValueStore>, presentation: Option<Box<dyn Presentation>>) -> Self {
        let mut session = Self {
            phase: GamePhase::Idle,
            score: 0,
            high_score: 0,
            reload_requested: false,
            store,
            presentation,
        };
        session.begin();
        session
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Run `f` against the presentation layer if one is wired
    fn present(&mut self, f: impl FnOnce(&mut dyn Presentation)) {
        if let Some(presentation) = self.presentation.as_deref_mut() {
            f(presentation);
        }
    }

    fn flush(&mut self, context: &str) {
        if let Err(e) = self.store.flush() {
            log::error!("Failed to persist {}: {}", context, e);
        }
    }

    /// Start of a freshly (re)loaded session: consume the restart intent,
    /// load the high score, then land in Idle or Playing.
    pub fn begin(&mut self) {
        let restart = self.store.get_flag(RESTART_KEY);
        self.store.set_flag(RESTART_KEY, false);
        self.flush("restart intent");

        self.phase = GamePhase::Idle;
        self.score = 0;
        self.reload_requested = false;
        self.high_score = self.store.get_u64_or(HIGH_SCORE_KEY, 0);

        let (score, high_score) = (self.score, self.high_score);
        self.present(|p| {
            p.hide_game_over();
            p.set_score_text(score);
            p.set_high_score_text(high_score);
        });

        if restart {
            log::info!("Restart intent found, skipping title");
            self.start_game();
        } else {
            log::info!("Session ready, showing title (high score {})", high_score);
            self.present(|p| p.show_title());
        }
    }

    /// Idle → Playing
    pub fn start_game(&mut self) {
        if self.phase != GamePhase::Idle {
            log::debug!("Ignoring start while {:?}", self.phase);
            return;
        }
        self.phase = GamePhase::Playing;
        self.present(|p| {
            p.hide_title();
            p.play_music();
        });
        log::info!("Game started");
    }

    /// Collectible picked up while playing. Returns whether it was counted.
    pub fn collect(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.score += 1;
        let score = self.score;
        self.present(|p| p.set_score_text(score));
        true
    }

    /// Playing → GameOver. Repeated calls (or calls outside Playing) are no-ops.
    pub fn game_over(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }

        // Score and high score are settled before anything observes GameOver
        let new_best = self.score > self.high_score;
        if new_best {
            self.high_score = self.score;
            self.store.set_int(HIGH_SCORE_KEY, self.high_score as i64);
            self.flush("high score");
        }
        self.phase = GamePhase::GameOver;

        let high_score = self.high_score;
        self.present(|p| {
            p.stop_music();
            p.play_collision_sound();
            if new_best {
                p.set_high_score_text(high_score);
            }
            p.show_game_over();
        });
        log::info!(
            "Game over: score {} (high score {}{})",
            self.score,
            high_score,
            if new_best { ", new best" } else { "" }
        );
    }

    /// Player asked to play again: persist the intent and reload
    pub fn request_restart(&mut self) {
        self.request_reload(true);
    }

    /// Player asked to go back to the title: clear the intent and reload
    pub fn exit_to_menu(&mut self) {
        self.request_reload(false);
    }

    fn request_reload(&mut self, restart: bool) {
        if self.phase != GamePhase::GameOver {
            log::debug!("Ignoring reload request while {:?}", self.phase);
            return;
        }
        self.store.set_flag(RESTART_KEY, restart);
        // Durable before the reload is triggered
        self.flush("restart intent");
        self.reload_requested = true;
        self.present(|p| p.reload_session());
        log::info!("Reloading session (restart = {})", restart);
    }

    /// Consume a pending reload request
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }
}

impl CollisionSink for Session {
    fn report_collision(&mut self, category: EntityCategory) -> HitResponse {
        match category {
            EntityCategory::Obstacle => {
                self.game_over();
                HitResponse::Keep
            }
            EntityCategory::Collectible => {
                if self.collect() {
                    HitResponse::Consume
                } else {
                    HitResponse::Keep
                }
            }
        }
    }
}
