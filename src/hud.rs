use crate::game::progression::{is_final_level, progress_percentage};
use crate::game::{LevelCatalog, LevelSession, Phase, SessionEvent};
use crate::graph::format_sequence;
use bevy::prelude::*;

/// Text HUD: reports session changes and the countdown through the log
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudState>()
            .add_message::<SessionEvent>()
            .add_message::<StatusRequested>()
            .add_systems(
                PostUpdate,
                (report_session_events, report_timer_urgency, report_status)
                    .chain()
                    .run_if(resource_exists::<LevelSession>),
            );
    }
}

/// Ask the HUD to print the full session snapshot
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct StatusRequested;

/// How close the countdown is to running out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerUrgency {
    Calm,
    /// Under two minutes left
    Warning,
    /// Under one minute left
    Critical,
}

impl TimerUrgency {
    pub fn from_remaining(secs: f32) -> Self {
        if secs < 60.0 {
            TimerUrgency::Critical
        } else if secs < 120.0 {
            TimerUrgency::Warning
        } else {
            TimerUrgency::Calm
        }
    }
}

/// Format seconds as m:ss, rounding down
pub fn format_clock(secs: f32) -> String {
    let total = secs.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[derive(Resource, Default)]
struct HudState {
    /// Urgency last reported for the running countdown
    urgency: Option<TimerUrgency>,
}

fn report_session_events(
    mut events: MessageReader<SessionEvent>,
    session: Res<LevelSession>,
    catalog: Res<LevelCatalog>,
) {
    for event in events.read() {
        match event {
            SessionEvent::EdgeStarted(node) => debug!("Dragging from {}", node),
            SessionEvent::EdgeCancelled => debug!("Connection dropped"),
            SessionEvent::Connected {
                connection,
                extracted,
            } => {
                info!(
                    "Connected {} → {} | sequence: {}",
                    connection.from,
                    connection.to,
                    format_sequence(extracted)
                );
            }
            SessionEvent::TimerStarted { level, budget_secs } => {
                info!("Level {} timer started: {}", level, format_clock(*budget_secs));
            }
            SessionEvent::LevelWon { level, .. } => {
                let progress = progress_percentage(&catalog, session.stats().levels_cleared);
                if is_final_level(&catalog, *level) {
                    info!("✨ FINAL LEVEL SYNTHESIZED ✨ ({:.0}% complete)", progress);
                } else {
                    info!("✨ LEVEL {} SYNTHESIZED ✨ ({:.0}% complete)", level, progress);
                }
            }
            SessionEvent::LevelFailed { level } => {
                warn!("⚠ Time expired on level {} - protocol failed, starting over", level);
            }
            SessionEvent::LevelAdvanced { .. } => info!("{}", session.spec().banner()),
            SessionEvent::AllLevelsComplete { levels } => {
                info!("👑 ALL {} LEVELS COMPLETE! 👑", levels);
            }
            SessionEvent::Reset { level } => info!("Level {} reset", level),
        }
    }
}

fn report_timer_urgency(session: Res<LevelSession>, mut hud: ResMut<HudState>) {
    if session.phase() != Phase::Active {
        hud.urgency = None;
        return;
    }

    let urgency = TimerUrgency::from_remaining(session.remaining_secs());
    if hud.urgency == Some(urgency) {
        return;
    }
    hud.urgency = Some(urgency);

    match urgency {
        TimerUrgency::Calm => {}
        TimerUrgency::Warning => info!("{} left", format_clock(session.remaining_secs())),
        TimerUrgency::Critical => warn!("{} left!", format_clock(session.remaining_secs())),
    }
}

fn report_status(mut requests: MessageReader<StatusRequested>, session: Res<LevelSession>) {
    for _ in requests.read() {
        match serde_json::to_string_pretty(&session.snapshot()) {
            Ok(json) => info!("{}", json),
            Err(e) => warn!("Failed to serialize session: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeLabel;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(300.0), "5:00");
        assert_eq!(format_clock(119.9), "1:59");
        assert_eq!(format_clock(61.0), "1:01");
        assert_eq!(format_clock(0.4), "0:00");
        assert_eq!(format_clock(-3.0), "0:00");
    }

    #[test]
    fn test_timer_urgency() {
        assert_eq!(TimerUrgency::from_remaining(300.0), TimerUrgency::Calm);
        assert_eq!(TimerUrgency::from_remaining(120.0), TimerUrgency::Calm);
        assert_eq!(TimerUrgency::from_remaining(119.0), TimerUrgency::Warning);
        assert_eq!(TimerUrgency::from_remaining(60.0), TimerUrgency::Warning);
        assert_eq!(TimerUrgency::from_remaining(59.9), TimerUrgency::Critical);
    }

    #[test]
    fn test_urgency_follows_running_session() {
        let mut app = App::new();
        let catalog = LevelCatalog::load().unwrap();
        let mut session = LevelSession::start(&catalog, 15, &default()).unwrap();
        session.connect(NodeLabel::Cut, NodeLabel::Carve);

        app.insert_resource(catalog)
            .insert_resource(session)
            .add_plugins(HudPlugin);
        app.update();

        // Level 15 starts with 70s on the clock
        let hud = app.world().resource::<HudState>();
        assert_eq!(hud.urgency, Some(TimerUrgency::Warning));
    }
}
