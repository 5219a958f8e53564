use crate::game::{NodeInput, ResetRequested};
use crate::graph::{InvalidEdgeEndpoint, NodeLabel};
use crate::hud::StatusRequested;
use async_channel::{Receiver, TryRecvError};
use bevy::prelude::*;
use std::io::BufRead;
use std::str::FromStr;
use thiserror::Error;

/// Reads board input from stdin, one command per line
pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<NodeInput>()
            .add_message::<ResetRequested>()
            .add_message::<StatusRequested>()
            .add_systems(Startup, spawn_console_reader)
            .add_systems(
                PreUpdate,
                collect_console_commands.run_if(resource_exists::<ConsoleLines>),
            );
    }
}

const HELP: &str = "commands: <from>><to> | <from> <to> | down <node> | up <node> | cancel | reset | status | quit";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command `{0}`")]
    Unknown(String),
    #[error(transparent)]
    Label(#[from] InvalidEdgeEndpoint),
}

/// One line typed on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Press on the first node and release on the second
    Connect(NodeLabel, NodeLabel),
    Down(NodeLabel),
    Up(NodeLabel),
    /// Release over empty space
    Cancel,
    Reset,
    Status,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim().to_ascii_lowercase();

        if let Some((from, to)) = line.split_once('>') {
            return Ok(ConsoleCommand::Connect(from.parse()?, to.parse()?));
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let command = match words.as_slice() {
            [] => return Err(CommandError::Empty),
            ["reset"] => ConsoleCommand::Reset,
            ["status"] => ConsoleCommand::Status,
            ["cancel"] => ConsoleCommand::Cancel,
            ["help"] => ConsoleCommand::Help,
            ["quit"] | ["exit"] => ConsoleCommand::Quit,
            ["down", node] => ConsoleCommand::Down(node.parse()?),
            ["up", node] => ConsoleCommand::Up(node.parse()?),
            [from, to] => ConsoleCommand::Connect(from.parse()?, to.parse()?),
            _ => return Err(CommandError::Unknown(line.clone())),
        };
        Ok(command)
    }
}

impl ConsoleCommand {
    /// Pointer input this command stands for
    pub fn node_inputs(&self) -> Vec<NodeInput> {
        match *self {
            ConsoleCommand::Connect(from, to) => vec![NodeInput::down(from), NodeInput::up(to)],
            ConsoleCommand::Down(node) => vec![NodeInput::down(node)],
            ConsoleCommand::Up(node) => vec![NodeInput::up(node)],
            ConsoleCommand::Cancel => vec![NodeInput::released_off_node()],
            ConsoleCommand::Reset
            | ConsoleCommand::Status
            | ConsoleCommand::Help
            | ConsoleCommand::Quit => Vec::new(),
        }
    }
}

/// Lines forwarded by the stdin reader thread
#[derive(Resource)]
struct ConsoleLines(Receiver<String>);

fn spawn_console_reader(mut commands: Commands) {
    let (sender, receiver) = async_channel::unbounded();

    let spawned = std::thread::Builder::new()
        .name("console-input".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                if sender.send_blocking(line).is_err() {
                    break;
                }
            }
        });

    match spawned {
        Ok(_) => {
            commands.insert_resource(ConsoleLines(receiver));
            info!("Console ready - {}", HELP);
        }
        Err(e) => error!("Failed to start console input: {}", e),
    }
}

fn collect_console_commands(
    lines: Res<ConsoleLines>,
    mut node_inputs: MessageWriter<NodeInput>,
    mut resets: MessageWriter<ResetRequested>,
    mut status: MessageWriter<StatusRequested>,
    mut exit: MessageWriter<AppExit>,
) {
    loop {
        let line = match lines.0.try_recv() {
            Ok(line) => line,
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Closed) => {
                info!("Console input closed, shutting down");
                exit.write(AppExit::Success);
                break;
            }
        };

        let command = match line.parse::<ConsoleCommand>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };

        match command {
            ConsoleCommand::Reset => {
                resets.write(ResetRequested);
            }
            ConsoleCommand::Status => {
                status.write(StatusRequested);
            }
            ConsoleCommand::Help => info!("{}", HELP),
            ConsoleCommand::Quit => {
                exit.write(AppExit::Success);
            }
            _ => {
                node_inputs.write_batch(command.node_inputs());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use NodeLabel::*;

    #[test]
    fn test_parse_connect_forms() {
        assert_eq!(
            "cut>carve".parse::<ConsoleCommand>(),
            Ok(ConsoleCommand::Connect(Cut, Carve))
        );
        assert_eq!(
            " Polish > Assemble ".parse::<ConsoleCommand>(),
            Ok(ConsoleCommand::Connect(Polish, Assemble))
        );
        assert_eq!(
            "carve cut".parse::<ConsoleCommand>(),
            Ok(ConsoleCommand::Connect(Carve, Cut))
        );
    }

    #[test]
    fn test_parse_gestures() {
        assert_eq!("down cut".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Down(Cut)));
        assert_eq!("UP polish".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Up(Polish)));
        assert_eq!("cancel".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Cancel));
    }

    #[test]
    fn test_parse_controls() {
        assert_eq!("reset".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Reset));
        assert_eq!("Status".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Status));
        assert_eq!("help".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Help));
        assert_eq!("exit".parse::<ConsoleCommand>(), Ok(ConsoleCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("   ".parse::<ConsoleCommand>(), Err(CommandError::Empty));
        assert_eq!(
            "cut>sand".parse::<ConsoleCommand>(),
            Err(CommandError::Label(InvalidEdgeEndpoint("sand".into())))
        );
        assert_eq!(
            "cut carve polish".parse::<ConsoleCommand>(),
            Err(CommandError::Unknown("cut carve polish".into()))
        );
    }

    #[test]
    fn test_node_inputs() {
        assert_eq!(
            ConsoleCommand::Connect(Cut, Carve).node_inputs(),
            vec![NodeInput::down(Cut), NodeInput::up(Carve)]
        );
        assert_eq!(
            ConsoleCommand::Cancel.node_inputs(),
            vec![NodeInput::released_off_node()]
        );
        assert!(ConsoleCommand::Reset.node_inputs().is_empty());
    }
}
