//! Screen flow — `GameState` definition, main-menu splash, and the shared
//! menu plumbing used by the pause, options, and game-over overlays.
//!
//! ## States
//!
//! | State      | Description                                      |
//! |------------|--------------------------------------------------|
//! | `MainMenu` | Initial state; splash screen shown               |
//! | `Playing`  | Simulation ticking; all gameplay systems active  |
//! | `Paused`   | Simulation frozen; pause overlay visible         |
//! | `Options`  | Settings screen reached from the main menu       |
//! | `GameOver` | Last life spent; final-score overlay shown       |
//!
//! Every simulation system in [`crate::simulation::SimulationPlugin`] runs
//! under `.run_if(in_state(GameState::Playing))`, so pausing is nothing more
//! than a state change — the session resource keeps its data and resumes
//! exactly where it stopped.

use bevy::prelude::*;

pub mod game_over;
pub mod options;
pub mod pause;

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level application state machine.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Main-menu splash screen; shown on startup.
    #[default]
    MainMenu,
    /// Active gameplay.
    Playing,
    /// Simulation frozen; in-game pause overlay is visible.
    Paused,
    /// Settings screen (sound toggle), reached from the main menu.
    Options,
    /// Player has exhausted all lives; game-over overlay shown.
    GameOver,
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the main-menu UI; entire tree is despawned on `OnExit(MainMenu)`.
#[derive(Component)]
pub struct MainMenuRoot;

/// Tags the "Start Game" button.
#[derive(Component)]
pub struct MenuStartButton;

/// Tags the "Options" button.
#[derive(Component)]
pub struct MenuOptionsButton;

/// Tags the "Quit" button.
#[derive(Component)]
pub struct MenuQuitButton;

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState` and every menu screen: splash, pause, options, and
/// game over.
///
/// This plugin must be added to the app **before** any plugin that calls
/// `.run_if(in_state(GameState::Playing))`, so the state is always registered
/// first.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            // Main menu
            .add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(OnExit(GameState::MainMenu), cleanup_main_menu)
            .add_systems(
                Update,
                menu_button_system.run_if(in_state(GameState::MainMenu)),
            )
            // Pause overlay
            .add_systems(OnEnter(GameState::Paused), pause::setup_pause_menu)
            .add_systems(OnExit(GameState::Paused), pause::cleanup_pause_menu)
            .add_systems(
                Update,
                pause::toggle_pause_system.run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (pause::pause_resume_input_system, pause::pause_button_system)
                    .run_if(in_state(GameState::Paused)),
            )
            // Options
            .add_systems(OnEnter(GameState::Options), options::setup_options_menu)
            .add_systems(OnExit(GameState::Options), options::cleanup_options_menu)
            .add_systems(
                Update,
                options::options_button_system.run_if(in_state(GameState::Options)),
            )
            // Game over
            .add_systems(OnEnter(GameState::GameOver), game_over::setup_game_over)
            .add_systems(OnExit(GameState::GameOver), game_over::cleanup_game_over)
            .add_systems(
                Update,
                game_over::game_over_button_system.run_if(in_state(GameState::GameOver)),
            );
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

pub(crate) fn start_bg() -> Color {
    Color::srgb(0.08, 0.36, 0.14)
}
pub(crate) fn start_border() -> Color {
    Color::srgb(0.18, 0.72, 0.28)
}
pub(crate) fn start_text() -> Color {
    Color::srgb(0.75, 1.0, 0.80)
}
pub(crate) fn neutral_bg() -> Color {
    Color::srgb(0.10, 0.12, 0.22)
}
pub(crate) fn neutral_border() -> Color {
    Color::srgb(0.26, 0.32, 0.58)
}
pub(crate) fn neutral_text() -> Color {
    Color::srgb(0.72, 0.78, 1.0)
}
pub(crate) fn quit_bg() -> Color {
    Color::srgb(0.28, 0.06, 0.06)
}
pub(crate) fn quit_border() -> Color {
    Color::srgb(0.60, 0.12, 0.12)
}
pub(crate) fn quit_text() -> Color {
    Color::srgb(1.0, 0.65, 0.65)
}
pub(crate) fn title_color() -> Color {
    Color::srgb(0.95, 0.88, 0.45)
}
pub(crate) fn subtitle_color() -> Color {
    Color::srgb(0.55, 0.55, 0.65)
}
pub(crate) fn hint_color() -> Color {
    Color::srgb(0.28, 0.28, 0.35)
}

/// Spawn a fixed-height invisible spacer node.
pub(crate) fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

/// Spawn one standard menu button with a centred label.
pub(crate) fn menu_button(
    parent: &mut ChildSpawnerCommands<'_>,
    label: &str,
    bg: Color,
    border: Color,
    text: Color,
    marker: impl Component,
) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(50.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(bg),
            BorderColor::all(border),
            marker,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(text),
            ));
        });
}

// ── OnEnter(MainMenu): spawn UI ───────────────────────────────────────────────

/// Spawn the full-screen main-menu overlay.
///
/// Layout:
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │             ROCKSTORM                       │
/// │   A twin-stick arcade asteroid shooter      │
/// │                                             │
/// │         [ START GAME ]                      │
/// │         [ OPTIONS    ]                      │
/// │         [ QUIT       ]                      │
/// │                                             │
/// │          v0.1.0  ·  Bevy 0.17               │
/// └─────────────────────────────────────────────┘
/// ```
pub fn setup_main_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::BLACK),
            MainMenuRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("ROCKSTORM"),
                TextFont {
                    font_size: 56.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 10.0);

            root.spawn((
                Text::new("A twin-stick arcade asteroid shooter"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(subtitle_color()),
            ));

            spacer(root, 52.0);

            menu_button(
                root,
                "START GAME",
                start_bg(),
                start_border(),
                start_text(),
                MenuStartButton,
            );
            spacer(root, 14.0);
            menu_button(
                root,
                "OPTIONS",
                neutral_bg(),
                neutral_border(),
                neutral_text(),
                MenuOptionsButton,
            );
            spacer(root, 14.0);
            menu_button(
                root,
                "QUIT",
                quit_bg(),
                quit_border(),
                quit_text(),
                MenuQuitButton,
            );

            spacer(root, 52.0);

            root.spawn((
                Text::new("v0.1.0  ·  Bevy 0.17"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
}

// ── OnExit(MainMenu): despawn UI ──────────────────────────────────────────────

/// Recursively despawn all main-menu entities.
pub fn cleanup_main_menu(mut commands: Commands, query: Query<Entity, With<MainMenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Update (MainMenu only): button interaction ────────────────────────────────

/// Handle Start Game, Options, and Quit button presses.
///
/// - **Start Game** → replaces the session resource with a fresh run and
///   transitions to [`GameState::Playing`].
/// - **Options** → transitions to [`GameState::Options`].
/// - **Quit** → sends [`AppExit`] to gracefully shut down.
#[allow(clippy::type_complexity)]
pub fn menu_button_system(
    start_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuStartButton>)>,
    options_query: Query<
        (&Interaction, &Children),
        (Changed<Interaction>, With<MenuOptionsButton>),
    >,
    quit_query: Query<(&Interaction, &Children), (Changed<Interaction>, With<MenuQuitButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut commands: Commands,
    config: Res<crate::config::GameConfig>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
) {
    for (interaction, children) in start_query.iter() {
        match interaction {
            Interaction::Pressed => {
                commands.insert_resource(crate::simulation::fresh_session(&config));
                next_state.set(GameState::Playing);
            }
            Interaction::Hovered => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(Color::WHITE);
                    }
                }
            }
            Interaction::None => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(start_text());
                    }
                }
            }
        }
    }

    for (interaction, children) in options_query.iter() {
        match interaction {
            Interaction::Pressed => {
                next_state.set(GameState::Options);
            }
            Interaction::Hovered => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(Color::WHITE);
                    }
                }
            }
            Interaction::None => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(neutral_text());
                    }
                }
            }
        }
    }

    for (interaction, children) in quit_query.iter() {
        match interaction {
            Interaction::Pressed => {
                exit.write(bevy::app::AppExit::Success);
            }
            Interaction::Hovered => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(Color::WHITE);
                    }
                }
            }
            Interaction::None => {
                for child in children.iter() {
                    if let Ok(mut color) = btn_text.get_mut(child) {
                        *color = TextColor(quit_text());
                    }
                }
            }
        }
    }
}
