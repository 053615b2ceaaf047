use super::*;

/// Root node of the pause overlay.
#[derive(Component)]
pub struct PauseMenuRoot;

/// Tags the "Resume" button.
#[derive(Component)]
pub struct PauseResumeButton;

/// Tags the "Main Menu" button.
#[derive(Component)]
pub struct PauseMainMenuButton;

/// ESC while in `Playing` → transition to `Paused`. The fixed-tick system
/// only runs in `Playing`, so the session freezes with no extra bookkeeping.
pub fn toggle_pause_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::Paused);
    }
}

/// ESC while in `Paused` → transition back to `Playing`.
pub fn pause_resume_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::Playing);
    }
}

/// Spawn the in-game pause overlay.
///
/// Layout (appears centred over the frozen game world):
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │ ░░░░░░░░░ semi-transparent overlay ░░░░░░░░ │
/// │ ░░░░░   ┌───────────────────────┐   ░░░░░░ │
/// │ ░░░░░   │      — PAUSED —       │   ░░░░░░ │
/// │ ░░░░░   │    [ RESUME    ]      │   ░░░░░░ │
/// │ ░░░░░   │    [ MAIN MENU ]      │   ░░░░░░ │
/// │ ░░░░░   │   ESC to resume       │   ░░░░░░ │
/// │ ░░░░░   └───────────────────────┘   ░░░░░░ │
/// └─────────────────────────────────────────────┘
/// ```
pub fn setup_pause_menu(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.70)),
            ZIndex(200),
            PauseMenuRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(36.0)),
                        row_gap: Val::Px(14.0),
                        border: UiRect::all(Val::Px(2.0)),
                        min_width: Val::Px(280.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.04, 0.04, 0.07)),
                    BorderColor::all(neutral_border()),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new("— PAUSED —"),
                        TextFont {
                            font_size: 38.0,
                            ..default()
                        },
                        TextColor(title_color()),
                    ));

                    spacer(card, 8.0);

                    menu_button(
                        card,
                        "RESUME",
                        start_bg(),
                        start_border(),
                        start_text(),
                        PauseResumeButton,
                    );
                    menu_button(
                        card,
                        "MAIN MENU",
                        quit_bg(),
                        quit_border(),
                        quit_text(),
                        PauseMainMenuButton,
                    );

                    card.spawn((
                        Text::new("ESC to resume"),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(hint_color()),
                    ));
                });
        });
}

/// Despawn the pause overlay.
pub fn cleanup_pause_menu(mut commands: Commands, query: Query<Entity, With<PauseMenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Handle Resume and Main Menu presses on the pause overlay.
#[allow(clippy::type_complexity)]
pub fn pause_button_system(
    resume_query: Query<&Interaction, (Changed<Interaction>, With<PauseResumeButton>)>,
    main_menu_query: Query<&Interaction, (Changed<Interaction>, With<PauseMainMenuButton>)>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for interaction in resume_query.iter() {
        if *interaction == Interaction::Pressed {
            next_state.set(GameState::Playing);
        }
    }
    for interaction in main_menu_query.iter() {
        if *interaction == Interaction::Pressed {
            // The stale session stays in place; starting a new game replaces it.
            next_state.set(GameState::MainMenu);
        }
    }
}
