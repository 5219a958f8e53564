use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use artisan_sequence::game::{LevelPlugin, SessionConfig};
use artisan_sequence::hud::HudPlugin;
use artisan_sequence::input::InputPlugin;

fn main() -> AppExit {
    let config = SessionConfig::from_env();
    let frame = config.frame_duration();

    let mut app = App::new();

    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame)))
        .add_plugins(LogPlugin::default())
        .insert_resource(config)
        .add_plugins(InputPlugin)
        .add_plugins(LevelPlugin)
        .add_plugins(HudPlugin);

    app.run()
}
