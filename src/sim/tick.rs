//! Per-frame simulation step
//!
//! The world owns every component and runs them once per tick in a fixed
//! order: session actions → clock → spawner → entity motion/expiry → lane
//! controllers and collisions → road tiles. A requested reload is applied at
//! the end of the tick it was requested in.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{EntityCategory, EntityRegistry};
use super::lane::{LaneTrack, Side};
use super::player::PlayerController;
use super::session::{GamePhase, Session};
use super::spawner::Spawner;
use super::track::TrackSegment;
use crate::persistence::KeyValueStore;
use crate::platform::{Clock, EntityFactory, Presentation, Tap};
use crate::tuning::{Tuning, TuningError};

/// Screen width the autopilot pretends to tap on
const AUTOPILOT_SCREEN_WIDTH: f32 = 1000.0;
/// How far ahead of the car (along the travel axis) the autopilot looks
const AUTOPILOT_LOOKAHEAD: f32 = 8.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Taps since the previous tick, in order
    pub taps: Vec<Tap>,
    /// Play button on the title screen
    pub start: bool,
    /// Restart button on the game-over screen
    pub restart: bool,
    /// Exit-to-menu button on the game-over screen
    pub exit_to_menu: bool,
    /// Demo mode: the cars dodge by themselves
    pub autopilot: bool,
}

/// Optional front-end collaborators; anything left `None` is skipped
#[derive(Default)]
pub struct Collaborators {
    pub presentation: Option<Box<dyn Presentation>>,
    pub factory: Option<Box<dyn EntityFactory>>,
}

/// Complete simulation, built once and reloaded in place
pub struct World {
    tuning: Tuning,
    seed: u64,
    rng: Pcg32,
    lanes: LaneTrack,
    clock: Clock,
    session: Session,
    spawner: Spawner,
    entities: EntityRegistry,
    players: [PlayerController; 2],
    road: Vec<TrackSegment>,
    time_ticks: u64,
    reloads: u32,
}

impl World {
    /// Wire every component and start the first session
    pub fn new(
        tuning: Tuning,
        seed: u64,
        store: Box<dyn KeyValueStore>,
        collaborators: Collaborators,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        let lanes = LaneTrack::new(&tuning.lanes)?;
        let players = Side::BOTH.map(|side| PlayerController::new(side, &lanes, &tuning.player));
        let session = Session::new(store, collaborators.presentation);

        let mut world = Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            clock: Clock::new(),
            spawner: Spawner::new(&tuning.spawn),
            entities: EntityRegistry::new(&tuning.spawn, collaborators.factory),
            road: TrackSegment::road(&tuning.track),
            players,
            lanes,
            session,
            tuning,
            time_ticks: 0,
            reloads: 0,
        };
        world.sync_clock();
        log::info!("World ready (seed {}, phase {:?})", seed, world.session.phase());
        Ok(world)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn lanes(&self) -> &LaneTrack {
        &self.lanes
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityRegistry {
        &mut self.entities
    }

    pub fn player(&self, side: Side) -> &PlayerController {
        &self.players[side.index()]
    }

    pub fn road(&self) -> &[TrackSegment] {
        &self.road
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.session.store()
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Completed session reloads since construction
    pub fn reloads(&self) -> u32 {
        self.reloads
    }

    fn sync_clock(&mut self) {
        self.clock.set_time_scale(self.session.phase().time_scale());
    }

    /// Advance the simulation by one frame of `raw_dt` wall-clock seconds
    pub fn tick(&mut self, input: &TickInput, raw_dt: f32) {
        // Session actions
        if input.start {
            self.session.start_game();
        }
        if input.restart {
            self.session.request_restart();
        } else if input.exit_to_menu {
            self.session.exit_to_menu();
        }
        if self.session.take_reload_request() {
            self.reload();
            return;
        }
        self.sync_clock();

        let dt = self.clock.scaled_delta(raw_dt);
        let playing = self.session.is_playing();
        if playing {
            self.time_ticks += 1;
            self.spawner
                .tick(dt, &mut self.rng, &self.lanes, &mut self.entities);
        }

        // Motion is already frozen by the scaled delta; expiry runs regardless
        self.entities.advance(dt);
        self.entities.expire();

        if playing {
            let mut taps = input.taps.clone();
            if input.autopilot {
                taps.extend(self.autopilot_taps());
            }
            for player in &mut self.players {
                for tap in &taps {
                    player.handle_tap(tap);
                }
                player.advance(dt);
            }
            for player in &self.players {
                player.detect_collisions(&mut self.entities, Some(&mut self.session));
            }
            // A game over mid-tick freezes everything after this point
            self.sync_clock();
        }

        let paused = self.clock.is_paused();
        for segment in &mut self.road {
            segment.advance(dt, paused);
        }
    }

    /// Tear down the run and start a fresh session against the same store
    fn reload(&mut self) {
        self.entities.clear();
        self.spawner.reset();
        for player in &mut self.players {
            player.reset();
        }
        for segment in &mut self.road {
            segment.reset();
        }
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(u64::from(self.reloads) + 1));
        self.time_ticks = 0;
        self.reloads += 1;
        self.session.begin();
        self.sync_clock();
    }

    /// Taps that move a car out of an obstacle's way when its other lane is clear
    fn autopilot_taps(&self) -> Vec<Tap> {
        let mut taps = Vec::new();
        for player in &self.players {
            let side = player.bounds();
            let current = side.lane_x(player.lane);
            let other = side.lane_x(player.lane ^ 1);
            let ahead = |lane_x: f32, category: EntityCategory| {
                self.entities.iter().any(|e| {
                    e.category == category
                        && !e.struck
                        && (e.lane_x - lane_x).abs() < f32::EPSILON
                        && e.travel_distance < player.pos.y + player.half_extents.y
                        && player.pos.y - e.travel_distance < AUTOPILOT_LOOKAHEAD
                })
            };

            let threatened = ahead(current, EntityCategory::Obstacle);
            let escape_clear = !ahead(other, EntityCategory::Obstacle);
            let coin_over_there = ahead(other, EntityCategory::Collectible)
                && !ahead(current, EntityCategory::Collectible);
            if (threatened && escape_clear) || (!threatened && escape_clear && coin_over_there) {
                // Cross-mapped controls: the left car listens to the right half
                let x = match player.side {
                    Side::Left => AUTOPILOT_SCREEN_WIDTH * 0.75,
                    Side::Right => AUTOPILOT_SCREEN_WIDTH * 0.25,
                };
                taps.push(Tap::new(x, AUTOPILOT_SCREEN_WIDTH));
            }
        }
        taps
    }
}
