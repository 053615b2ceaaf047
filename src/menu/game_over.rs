use super::*;
use crate::config::GameConfig;
use crate::scoreboard::load_scoreboard;
use crate::session::GameSession;

/// Root node of the game-over overlay.
#[derive(Component)]
pub struct GameOverRoot;

/// Tags the "Play Again" button.
#[derive(Component)]
pub struct GameOverPlayAgainButton;

/// Tags the "Main Menu" button.
#[derive(Component)]
pub struct GameOverMainMenuButton;

/// Best score to show: the scoreboard's top row, or this run if it beats it.
/// Taking the max means the line is right whether or not the run has been
/// appended to the file yet.
fn best_score(file_best: Option<u32>, run_score: u32) -> u32 {
    file_best.unwrap_or(0).max(run_score)
}

/// Spawn the game-over overlay centred over the frozen world.
///
/// Shows the final score and wave, the local best, and buttons to restart or
/// return to the splash screen.
pub fn setup_game_over(
    mut commands: Commands,
    session: Res<GameSession>,
    config: Res<GameConfig>,
) {
    let best = best_score(
        load_scoreboard(&config.scoreboard_path)
            .ok()
            .and_then(|rows| rows.first().map(|r| r.score)),
        session.score,
    );

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
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.82)),
            ZIndex(300),
            GameOverRoot,
        ))
        .with_children(|overlay| {
            overlay
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(40.0)),
                        row_gap: Val::Px(16.0),
                        border: UiRect::all(Val::Px(2.0)),
                        min_width: Val::Px(320.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.06, 0.02, 0.02)),
                    BorderColor::all(Color::srgb(0.55, 0.10, 0.10)),
                ))
                .with_children(|card| {
                    card.spawn((
                        Text::new("GAME OVER"),
                        TextFont {
                            font_size: 46.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.22, 0.22)),
                    ));

                    spacer(card, 4.0);

                    card.spawn((
                        Text::new(format!(
                            "Score: {}   ·   Wave {}   ·   Best: {}",
                            session.score, session.wave.wave, best
                        )),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(subtitle_color()),
                    ));

                    spacer(card, 8.0);

                    menu_button(
                        card,
                        "PLAY AGAIN",
                        start_bg(),
                        start_border(),
                        start_text(),
                        GameOverPlayAgainButton,
                    );
                    menu_button(
                        card,
                        "MAIN MENU",
                        quit_bg(),
                        quit_border(),
                        quit_text(),
                        GameOverMainMenuButton,
                    );
                });
        });
}

/// Despawn the game-over overlay.
pub fn cleanup_game_over(mut commands: Commands, query: Query<Entity, With<GameOverRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Handle Play Again and Main Menu presses on the game-over overlay.
#[allow(clippy::type_complexity)]
pub fn game_over_button_system(
    again_query: Query<&Interaction, (Changed<Interaction>, With<GameOverPlayAgainButton>)>,
    main_menu_query: Query<&Interaction, (Changed<Interaction>, With<GameOverMainMenuButton>)>,
    mut commands: Commands,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for interaction in again_query.iter() {
        if *interaction == Interaction::Pressed {
            commands.insert_resource(crate::simulation::fresh_session(&config));
            next_state.set(GameState::Playing);
        }
    }
    for interaction in main_menu_query.iter() {
        if *interaction == Interaction::Pressed {
            next_state.set(GameState::MainMenu);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::best_score;

    #[test]
    fn fresh_run_beats_an_unwritten_scoreboard() {
        // The run that just ended may not be in the file yet.
        assert_eq!(best_score(None, 340), 340);
        assert_eq!(best_score(Some(120), 340), 340);
    }

    #[test]
    fn standing_record_wins_over_a_worse_run() {
        assert_eq!(best_score(Some(900), 340), 900);
    }
}
