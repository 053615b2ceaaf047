//! Keyboard/mouse sampling into the per-tick [`PlayerInput`] snapshot.
//!
//! Sampling runs every render frame and overwrites the [`InputState`]
//! resource; the fixed-tick simulation reads whatever snapshot is current
//! when it fires. Edge-triggered flags (reload) are latched here and cleared
//! by the tick system after consumption, so a press between two fixed steps
//! is never lost.

use crate::body::angle_of;
use crate::menu::GameState;
use crate::player::PlayerInput;
use crate::session::GameSession;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Latest sampled input, consumed by the fixed-tick session update.
#[derive(Resource, Debug, Default)]
pub struct InputState(pub PlayerInput);

/// Registers input sampling while in gameplay.
pub struct ControlPlugin;

impl Plugin for ControlPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>().add_systems(
            Update,
            sample_input.run_if(in_state(GameState::Playing)),
        );
    }
}

/// Sample movement keys, the pointer, and fire/reload buttons.
///
/// - W/S or Up/Down: thrust axis along the aim direction.
/// - A/D or Left/Right: strafe axis perpendicular to aim.
/// - Pointer: aim; the ship turns to face the cursor's world position.
/// - Left mouse or Space: sustained fire.
/// - R: manual reload.
pub fn sample_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    session: Res<GameSession>,
    mut input: ResMut<InputState>,
) {
    let mut thrust = 0.0;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        thrust += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        thrust -= 1.0;
    }

    let mut strafe = 0.0;
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        strafe += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        strafe -= 1.0;
    }

    // Aim at the cursor's world position; keep the previous aim when the
    // cursor is outside the window.
    let mut aim_deg = input.0.aim_deg;
    if let (Ok(window), Ok((camera, camera_transform))) =
        (windows.single(), camera_query.single())
    {
        if let Some(cursor) = window.cursor_position() {
            if let Ok(world) = camera.viewport_to_world_2d(camera_transform, cursor) {
                let to_cursor = world - session.ship.body.pos;
                if to_cursor.length_squared() > 1.0 {
                    aim_deg = angle_of(to_cursor);
                }
            }
        }
    }

    input.0.thrust = thrust;
    input.0.strafe = strafe;
    input.0.aim_deg = aim_deg;
    input.0.fire_held = mouse.pressed(MouseButton::Left) || keys.pressed(KeyCode::Space);
    // Latch; the tick system clears it after the simulation has seen it.
    if keys.just_pressed(KeyCode::KeyR) {
        input.0.reload_pressed = true;
    }
}
