use crate::game::catalog::{LevelCatalog, setup_level_catalog};
use crate::game::config::SessionConfig;
use crate::game::session::{LevelSession, Phase, SessionEvent};
use crate::graph::NodeLabel;
use bevy::prelude::*;

/// Drives the level session: node input, reset requests and the frame clock
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionConfig>()
            .add_message::<NodeInput>()
            .add_message::<ResetRequested>()
            .add_message::<SessionEvent>()
            // Load the catalog first, then open the session on it
            .add_systems(Startup, (setup_level_catalog, setup_session).chain())
            .add_systems(
                Update,
                (handle_node_input, handle_reset_requests, tick_session)
                    .chain()
                    .run_if(resource_exists::<LevelSession>),
            );
    }
}

/// Press or release over the board, already hit-tested against the nodes
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeInput {
    /// Node under the pointer, `None` when released over empty space
    pub node: Option<NodeLabel>,
    pub event_type: NodeInputType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeInputType {
    Down,
    Up,
}

impl NodeInput {
    pub fn down(node: NodeLabel) -> Self {
        NodeInput {
            node: Some(node),
            event_type: NodeInputType::Down,
        }
    }

    pub fn up(node: NodeLabel) -> Self {
        NodeInput {
            node: Some(node),
            event_type: NodeInputType::Up,
        }
    }

    /// Released away from every node
    pub fn released_off_node() -> Self {
        NodeInput {
            node: None,
            event_type: NodeInputType::Up,
        }
    }
}

/// The player asked to start the level over
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ResetRequested;

/// System: Open the session on the configured start level
fn setup_session(
    mut commands: Commands,
    catalog: Option<Res<LevelCatalog>>,
    config: Res<SessionConfig>,
) {
    let Some(catalog) = catalog else {
        return;
    };

    let level = if catalog.contains(config.start_level) {
        config.start_level
    } else {
        warn!(
            "Level {} does not exist - starting from level 1 instead",
            config.start_level
        );
        1
    };

    let session = match LevelSession::start(&catalog, level, &config) {
        Ok(session) => session,
        Err(e) => {
            error!("Cannot open a level session: {}", e);
            return;
        }
    };

    info!("{}", session.spec().banner());
    commands.insert_resource(session);
}

/// System: Turn node presses and releases into connections
fn handle_node_input(
    mut inputs: MessageReader<NodeInput>,
    mut session: ResMut<LevelSession>,
    mut events: MessageWriter<SessionEvent>,
) {
    for input in inputs.read() {
        let produced = match (input.event_type, input.node) {
            (NodeInputType::Down, Some(node)) => session.begin_edge(node),
            (NodeInputType::Down, None) => continue,
            (NodeInputType::Up, Some(node)) => session.end_edge(node),
            (NodeInputType::Up, None) => session.cancel_edge(),
        };
        events.write_batch(produced);
    }
}

/// System: Start the level over on request
fn handle_reset_requests(
    mut requests: MessageReader<ResetRequested>,
    mut session: ResMut<LevelSession>,
    mut events: MessageWriter<SessionEvent>,
) {
    for _ in requests.read() {
        events.write_batch(session.reset());
    }
}

/// System: Feed frame time to the session timers
fn tick_session(
    time: Res<Time>,
    catalog: Res<LevelCatalog>,
    mut session: ResMut<LevelSession>,
    mut events: MessageWriter<SessionEvent>,
) {
    // Idle and completed sessions have no clock running
    if !matches!(session.phase(), Phase::Active | Phase::Won { .. }) {
        return;
    }
    events.write_batch(session.tick(time.delta_secs(), &catalog));
}
