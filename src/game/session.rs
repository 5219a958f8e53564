// game/session.rs

use crate::game::catalog::{CatalogError, LevelCatalog, LevelSpec};
use crate::game::config::SessionConfig;
use crate::game::evaluator::evaluate;
use crate::game::progression::{Progression, RunStats, next_level};
use crate::graph::*;
use bevy::prelude::{Message, Resource};
use serde::Serialize;

/// Where the current level stands
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Phase {
    /// Nothing drawn yet, timer frozen at the full budget
    Idle,
    /// First connection drawn, timer counting down
    Active,
    /// Sequence matched, timer frozen; next level loads when the delay runs out
    Won { advance_in_secs: f32 },
    /// Every level has been won
    Completed,
}

/// Something the presentation layer may want to react to
#[derive(Message, Debug, Clone, PartialEq)]
pub enum SessionEvent {
    EdgeStarted(NodeLabel),
    EdgeCancelled,
    Connected {
        connection: Connection,
        extracted: Vec<NodeLabel>,
    },
    TimerStarted {
        level: usize,
        budget_secs: f32,
    },
    LevelWon {
        level: usize,
        attempt: u64,
    },
    /// Time ran out; the level has already been restarted
    LevelFailed {
        level: usize,
    },
    LevelAdvanced {
        level: usize,
    },
    AllLevelsComplete {
        levels: usize,
    },
    Reset {
        level: usize,
    },
}

/// A level session - owns the active level, its timer and the player's drawing
#[derive(Debug, Clone, PartialEq, Resource)]
pub struct LevelSession {
    /// The level being played
    spec: LevelSpec,
    remaining_secs: f32,
    phase: Phase,
    /// Connections of the current attempt
    graph: ConnectionGraph,
    /// Node where the player pressed down, waiting for a release
    pending: Option<NodeLabel>,
    /// Bumped every time a fresh attempt starts
    attempt: u64,
    advance_delay_secs: f32,
    stats: RunStats,
}

impl LevelSession {
    /// Create a new session on the given level
    pub fn new(spec: LevelSpec, config: &SessionConfig) -> Self {
        LevelSession {
            remaining_secs: spec.time_budget_secs,
            spec,
            phase: Phase::Idle,
            graph: ConnectionGraph::new(),
            pending: None,
            attempt: 0,
            advance_delay_secs: config.advance_delay_secs,
            stats: RunStats::default(),
        }
    }

    /// Create a session on a cataloged level
    pub fn start(
        catalog: &LevelCatalog,
        level: usize,
        config: &SessionConfig,
    ) -> Result<Self, CatalogError> {
        let spec = catalog.get(level)?;
        Ok(Self::new(spec.clone(), config))
    }

    // === Query Methods (for Bevy systems to read state) ===

    pub fn level(&self) -> usize {
        self.spec.index
    }

    pub fn spec(&self) -> &LevelSpec {
        &self.spec
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> f32 {
        self.remaining_secs
    }

    /// Has the countdown been started in this attempt?
    pub fn is_started(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Is the current level won (or every level)?
    pub fn is_won(&self) -> bool {
        matches!(self.phase, Phase::Won { .. } | Phase::Completed)
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    /// Get all drawn connections
    pub fn graph(&self) -> &ConnectionGraph {
        &self.graph
    }

    pub fn pending_start(&self) -> Option<NodeLabel> {
        self.pending
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// The sequence the current drawing encodes
    pub fn current_sequence(&self) -> Vec<NodeLabel> {
        extract_sequence(&self.graph)
    }

    /// Read-only copy of everything a renderer needs for one frame
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            level: self.level(),
            phase: self.phase,
            started: self.is_started(),
            won: self.is_won(),
            remaining_secs: self.remaining_secs,
            attempt: self.attempt,
            pending_start: self.pending,
            connections: self.graph.edges_in_order().to_vec(),
            spec: self.spec.clone(),
            stats: self.stats,
        }
    }

    fn accepts_input(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Active)
    }

    // === Mutation Methods (for handling user input) ===

    /// Pointer went down on a node
    pub fn begin_edge(&mut self, node: NodeLabel) -> Vec<SessionEvent> {
        if !self.accepts_input() || self.pending.is_some() {
            return Vec::new();
        }

        self.pending = Some(node);
        vec![SessionEvent::EdgeStarted(node)]
    }

    /// Pointer was released on a node: commit the pending connection
    /// Releasing on the node the drag started from drops it instead
    pub fn end_edge(&mut self, node: NodeLabel) -> Vec<SessionEvent> {
        if !self.accepts_input() {
            return Vec::new();
        }
        let Some(from) = self.pending.take() else {
            return Vec::new();
        };

        if from == node {
            return vec![SessionEvent::EdgeCancelled];
        }
        self.connect(from, node)
    }

    /// Pointer was released away from every node
    pub fn cancel_edge(&mut self) -> Vec<SessionEvent> {
        match self.pending.take() {
            Some(_) => vec![SessionEvent::EdgeCancelled],
            None => Vec::new(),
        }
    }

    /// Add a connection and check the level
    ///
    /// The first connection of an attempt starts the countdown. Self-loops
    /// are accepted here like any other connection.
    pub fn connect(&mut self, from: NodeLabel, to: NodeLabel) -> Vec<SessionEvent> {
        if !self.accepts_input() {
            return Vec::new();
        }

        let mut events = Vec::new();
        if self.phase == Phase::Idle {
            self.phase = Phase::Active;
            events.push(SessionEvent::TimerStarted {
                level: self.level(),
                budget_secs: self.spec.time_budget_secs,
            });
        }

        let connection = self.graph.add_edge(from, to);
        let evaluation = evaluate(&self.graph, &self.spec);
        events.push(SessionEvent::Connected {
            connection,
            extracted: evaluation.extracted,
        });

        if evaluation.won {
            self.phase = Phase::Won {
                advance_in_secs: self.advance_delay_secs,
            };
            self.stats.levels_cleared += 1;
            events.push(SessionEvent::LevelWon {
                level: self.level(),
                attempt: self.attempt,
            });
        }

        events
    }

    /// Abandon the current attempt and start the same level over
    ///
    /// Cancels a pending advance when called after a win. From Idle this only
    /// drops a half-drawn connection, so resetting twice equals resetting once.
    pub fn reset(&mut self) -> Vec<SessionEvent> {
        match self.phase {
            Phase::Completed => Vec::new(),
            Phase::Idle => {
                self.pending = None;
                Vec::new()
            }
            Phase::Active | Phase::Won { .. } => {
                self.stats.resets += 1;
                self.restart_attempt();
                vec![SessionEvent::Reset { level: self.level() }]
            }
        }
    }

    /// Advance the clock by one frame
    ///
    /// While Active this counts the level timer down and restarts the level
    /// when it hits zero. While Won it counts down the advance delay.
    pub fn tick(&mut self, delta_secs: f32, catalog: &LevelCatalog) -> Vec<SessionEvent> {
        if !delta_secs.is_finite() || delta_secs <= 0.0 {
            return Vec::new();
        }

        match self.phase {
            Phase::Active => {
                self.remaining_secs = (self.remaining_secs - delta_secs).max(0.0);
                if self.remaining_secs > 0.0 {
                    return Vec::new();
                }

                let level = self.level();
                self.stats.failures += 1;
                self.restart_attempt();
                vec![SessionEvent::LevelFailed { level }]
            }
            Phase::Won { advance_in_secs } => {
                let left = advance_in_secs - delta_secs;
                if left > 0.0 {
                    self.phase = Phase::Won {
                        advance_in_secs: left,
                    };
                    return Vec::new();
                }
                self.advance(catalog)
            }
            Phase::Idle | Phase::Completed => Vec::new(),
        }
    }

    fn advance(&mut self, catalog: &LevelCatalog) -> Vec<SessionEvent> {
        match next_level(catalog, self.level()) {
            Progression::Next(spec) => {
                self.spec = spec.clone();
                self.restart_attempt();
                vec![SessionEvent::LevelAdvanced { level: self.level() }]
            }
            Progression::Completed => {
                self.phase = Phase::Completed;
                self.pending = None;
                vec![SessionEvent::AllLevelsComplete {
                    levels: catalog.len(),
                }]
            }
        }
    }

    fn restart_attempt(&mut self) {
        self.graph.clear();
        self.pending = None;
        self.remaining_secs = self.spec.time_budget_secs;
        self.phase = Phase::Idle;
        self.attempt += 1;
    }
}

/// Snapshot of the session for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub level: usize,
    pub phase: Phase,
    pub started: bool,
    pub won: bool,
    pub remaining_secs: f32,
    pub attempt: u64,
    pub pending_start: Option<NodeLabel>,
    pub connections: Vec<Connection>,
    pub spec: LevelSpec,
    pub stats: RunStats,
}
