use super::*;
use crate::config::GameConfig;

/// Root node of the options screen.
#[derive(Component)]
pub struct OptionsMenuRoot;

/// Tags the sound toggle button.
#[derive(Component)]
pub struct OptionsSoundButton;

/// Tags the label inside the sound toggle (updated in place on toggle).
#[derive(Component)]
pub struct OptionsSoundLabel;

/// Tags the debug overlay toggle button.
#[derive(Component)]
pub struct OptionsDebugButton;

/// Tags the label inside the debug toggle (updated in place on toggle).
#[derive(Component)]
pub struct OptionsDebugLabel;

/// Tags the "Back" button.
#[derive(Component)]
pub struct OptionsBackButton;

fn sound_label(enabled: bool) -> String {
    format!("SOUND: {}", if enabled { "ON" } else { "OFF" })
}

fn debug_label(enabled: bool) -> String {
    format!("DEBUG OVERLAY: {}", if enabled { "ON" } else { "OFF" })
}

/// Spawn one toggle row in the options column.
fn toggle_row(
    parent: &mut ChildSpawnerCommands<'_>,
    label: String,
    button: impl Component,
    label_tag: impl Component,
) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(260.0),
                height: Val::Px(50.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(neutral_bg()),
            BorderColor::all(neutral_border()),
            button,
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(neutral_text()),
                label_tag,
            ));
        });
}

/// Spawn the options screen: sound and debug-overlay toggles.
/// Changes live in the `GameConfig` resource for this process; edit
/// `assets/game.toml` to make them stick.
pub fn setup_options_menu(mut commands: Commands, config: Res<GameConfig>) {
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
            OptionsMenuRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new("OPTIONS"),
                TextFont {
                    font_size: 42.0,
                    ..default()
                },
                TextColor(title_color()),
            ));

            spacer(root, 40.0);

            // Toggle labels are tagged so the button handler can rewrite
            // them in place without respawning the tree.
            toggle_row(
                root,
                sound_label(config.sound_enabled),
                OptionsSoundButton,
                OptionsSoundLabel,
            );

            spacer(root, 14.0);

            toggle_row(
                root,
                debug_label(config.debug_enabled),
                OptionsDebugButton,
                OptionsDebugLabel,
            );

            spacer(root, 14.0);

            menu_button(
                root,
                "BACK",
                quit_bg(),
                quit_border(),
                quit_text(),
                OptionsBackButton,
            );

            spacer(root, 40.0);

            root.spawn((
                Text::new("Settings apply to this run; edit assets/game.toml to persist"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(hint_color()),
            ));
        });
}

/// Despawn the options screen.
pub fn cleanup_options_menu(mut commands: Commands, query: Query<Entity, With<OptionsMenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Handle the sound and debug toggles and Back presses.
#[allow(clippy::type_complexity)]
pub fn options_button_system(
    sound_query: Query<&Interaction, (Changed<Interaction>, With<OptionsSoundButton>)>,
    debug_query: Query<&Interaction, (Changed<Interaction>, With<OptionsDebugButton>)>,
    back_query: Query<&Interaction, (Changed<Interaction>, With<OptionsBackButton>)>,
    mut sound_label_query: Query<
        &mut Text,
        (With<OptionsSoundLabel>, Without<OptionsDebugLabel>),
    >,
    mut debug_label_query: Query<
        &mut Text,
        (With<OptionsDebugLabel>, Without<OptionsSoundLabel>),
    >,
    mut config: ResMut<GameConfig>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for interaction in sound_query.iter() {
        if *interaction == Interaction::Pressed {
            config.sound_enabled = !config.sound_enabled;
            for mut text in sound_label_query.iter_mut() {
                *text = Text::new(sound_label(config.sound_enabled));
            }
        }
    }
    for interaction in debug_query.iter() {
        if *interaction == Interaction::Pressed {
            config.debug_enabled = !config.debug_enabled;
            for mut text in debug_label_query.iter_mut() {
                *text = Text::new(debug_label(config.debug_enabled));
            }
        }
    }
    for interaction in back_query.iter() {
        if *interaction == Interaction::Pressed {
            next_state.set(GameState::MainMenu);
        }
    }
}
