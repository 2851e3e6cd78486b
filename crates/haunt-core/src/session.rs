//! Session Orchestration
//!
//! Builds the house from a [`SessionConfig`], places the agents, runs every
//! agent on its own thread and tallies the result once all of them have
//! joined.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use thiserror::Error;

use haunt_events::{EventKind, ExitReason, Outcome, SessionReport};

use crate::components::agent::{Ghost, Hunter};
use crate::components::house::House;
use crate::components::room::Room;
use crate::config::{ConfigError, SessionConfig};
use crate::events::EventLogger;
use crate::setup::agents::{
    assign_equipment, random_ghost_class, spawn_ghost, spawn_hunter, SpawnError,
};
use crate::setup::house::{build_house, random_room_excluding_van, van};
use crate::systems::{GhostAgent, HunterAgent};

/// Errors that abort a session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("setup failed: {0}")]
    Setup(#[from] SpawnError),
    #[error("unknown ghost start room: {0:?}")]
    UnknownRoom(String),
    #[error("failed to start the {agent} thread: {source}")]
    Spawn {
        agent: String,
        #[source]
        source: io::Error,
    },
    #[error("the {0} thread panicked")]
    AgentPanicked(String),
    #[error("event log error: {0}")]
    Logger(#[from] io::Error),
}

/// A running agent thread and its label
type AgentHandle = (String, JoinHandle<ExitReason>);

/// Ends the session if the owning thread unwinds, so the others still stop
struct EndOnPanic(Arc<House>);

impl Drop for EndOnPanic {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.state().end();
        }
    }
}

/// A fully set up session, ready to run
pub struct Session {
    config: SessionConfig,
    seed: u64,
    house: Arc<House>,
    ghost: Arc<Ghost>,
    hunters: Vec<Arc<Hunter>>,
    logger: Arc<EventLogger>,
    /// Seeds each agent's own RNG
    rng: SmallRng,
}

impl Session {
    /// Build the house and place the ghost and every hunter.
    pub fn new(config: SessionConfig, logger: Arc<EventLogger>) -> Result<Self, SessionError> {
        config.validate()?;

        let seed = config.session.seed.unwrap_or_else(rand::random);
        let mut rng = SmallRng::seed_from_u64(seed);
        let house = Arc::new(build_house(config.hunters.count));

        let class = config
            .ghost
            .class
            .unwrap_or_else(|| random_ghost_class(&mut rng));
        let start = match &config.ghost.start_room {
            Some(name) => house
                .room_by_name(name)
                .map(Room::id)
                .ok_or_else(|| SessionError::UnknownRoom(name.clone()))?,
            None => random_room_excluding_van(&house, &mut rng),
        };

        let ghost = spawn_ghost(&house, class, start)?;
        logger.log(EventKind::GhostInit {
            class,
            room: house.room_name(start).to_string(),
        });

        let equipment = assign_equipment(config.hunters.count, &mut rng);
        let entrance = van(&house);
        let mut hunters = Vec::with_capacity(equipment.len());
        for (name, kind) in config.hunter_names().iter().zip(equipment) {
            let hunter = spawn_hunter(&house, name, kind, entrance)?;
            logger.log(EventKind::HunterInit {
                hunter: name.clone(),
                equipment: kind,
            });
            hunters.push(hunter);
        }

        tracing::info!(seed, %class, hunters = hunters.len(), "session set up");

        Ok(Self {
            config,
            seed,
            house,
            ghost,
            hunters,
            logger,
            rng,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn house(&self) -> &Arc<House> {
        &self.house
    }

    pub fn ghost(&self) -> &Arc<Ghost> {
        &self.ghost
    }

    pub fn hunters(&self) -> &[Arc<Hunter>] {
        &self.hunters
    }

    pub fn logger(&self) -> &Arc<EventLogger> {
        &self.logger
    }

    /// Run every agent to completion and report the result.
    ///
    /// Blocks until all threads have joined.
    pub fn run(mut self) -> Result<SessionReport, SessionError> {
        let limits = self.config.limits;
        let timing = self.config.timing;
        let mut handles: Vec<AgentHandle> = Vec::new();

        let ghost = GhostAgent::new(
            Arc::clone(&self.ghost),
            Arc::clone(&self.house),
            limits,
            timing.ghost_interval(),
            Arc::clone(&self.logger),
            SmallRng::seed_from_u64(self.rng.gen()),
        );
        match self.start("ghost".to_string(), move || ghost.run()) {
            Ok(handle) => handles.push(handle),
            Err(err) => return Err(self.abort(err, handles)),
        }

        for hunter in self.hunters.clone() {
            let label = format!("hunter {}", hunter.name());
            let agent = HunterAgent::new(
                hunter,
                Arc::clone(&self.house),
                limits,
                timing.hunter_interval(),
                Arc::clone(&self.logger),
                SmallRng::seed_from_u64(self.rng.gen()),
            );
            match self.start(label, move || agent.run()) {
                Ok(handle) => handles.push(handle),
                Err(err) => return Err(self.abort(err, handles)),
            }
        }

        if let Some(agent) = join_all(handles) {
            return Err(SessionError::AgentPanicked(agent));
        }
        self.logger.flush()?;

        let report = self.report();
        tracing::info!(outcome = ?report.outcome, remaining = report.hunters_remaining, "session over");
        Ok(report)
    }

    /// Spawn a named agent thread
    fn start<F>(&self, label: String, body: F) -> Result<AgentHandle, SessionError>
    where
        F: FnOnce() -> ExitReason + Send + 'static,
    {
        let guard = EndOnPanic(Arc::clone(&self.house));
        thread::Builder::new()
            .name(label.clone())
            .spawn(move || {
                let _guard = guard;
                body()
            })
            .map(|handle| (label.clone(), handle))
            .map_err(|source| SessionError::Spawn {
                agent: label,
                source,
            })
    }

    /// Stop the agents already running and wait for them before failing
    fn abort(&self, err: SessionError, handles: Vec<AgentHandle>) -> SessionError {
        tracing::error!(error = %err, "aborting session");
        self.house.state().end();
        join_all(handles);
        err
    }

    /// Tally the final state. Only meaningful once every agent has joined.
    pub fn report(&self) -> SessionReport {
        let hunters_remaining = self.house.state().live_hunters();
        SessionReport {
            seed: self.seed,
            hunters: self.hunters.iter().map(|h| h.summary()).collect(),
            ghost: self.ghost.summary(self.house.room_name(self.ghost.room())),
            evidence: self.house.evidence(),
            hunters_remaining,
            outcome: self.outcome(hunters_remaining),
            event_count: self.logger.event_count(),
        }
    }

    fn outcome(&self, hunters_remaining: usize) -> Outcome {
        let class = self.ghost.class();
        if hunters_remaining == 0 {
            return Outcome::GhostWins;
        }

        let victory = self
            .hunters
            .iter()
            .any(|h| h.exit() == Some(ExitReason::Victory));
        if victory || self.house.review(class).is_match() {
            Outcome::HuntersWin { identified: class }
        } else {
            Outcome::GhostBored
        }
    }
}

/// Join every handle, returning the label of the first one that panicked
fn join_all(handles: Vec<AgentHandle>) -> Option<String> {
    let mut panicked = None;
    for (label, handle) in handles {
        match handle.join() {
            Ok(reason) => tracing::debug!(agent = %label, %reason, "agent joined"),
            Err(_) => {
                tracing::error!(agent = %label, "agent panicked");
                panicked.get_or_insert(label);
            }
        }
    }
    panicked
}

/// Set up and run a session in one call
pub fn run_session(
    config: SessionConfig,
    logger: Arc<EventLogger>,
) -> Result<SessionReport, SessionError> {
    Session::new(config, logger)?.run()
}
