use bevy::prelude::*;
use bevy::window::WindowResolution;

use rockstorm::audio::GameAudioPlugin;
use rockstorm::config::{self, GameConfig};
use rockstorm::control::ControlPlugin;
use rockstorm::menu::MenuPlugin;
use rockstorm::rendering::RenderingPlugin;
use rockstorm::simulation::SimulationPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Rockstorm".into(),
                resolution: WindowResolution::new(1280, 720),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Insert GameConfig with compiled defaults; load_game_config will
        // overwrite it from assets/game.toml (if present) in Startup.
        .insert_resource(GameConfig::default())
        .add_systems(Startup, config::load_game_config)
        // MenuPlugin registers GameState and must precede every plugin that
        // gates systems on it.
        .add_plugins(MenuPlugin)
        .add_plugins(SimulationPlugin)
        .add_plugins(ControlPlugin)
        .add_plugins(RenderingPlugin)
        .add_plugins(GameAudioPlugin)
        .run();
}
