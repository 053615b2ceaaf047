//! Camera, gizmo world drawing, and the in-game HUD.
//!
//! The whole arena is drawn with immediate-mode gizmos from the session
//! snapshot every frame — no per-entity render entities to keep in sync with
//! the pools. The camera sits at the arena center so world coordinates and
//! simulation coordinates are the same.

use crate::body::heading;
use crate::config::GameConfig;
use crate::constants::*;
use crate::enemy::{EnemyClass, SteerState};
use crate::menu::GameState;
use crate::player::{arena_center, WeaponKind};
use crate::powerup::PowerUpKind;
use crate::projectile::BulletKind;
use crate::session::GameSession;
use bevy::prelude::*;

/// Registers the camera, the gizmo draw pass, and the HUD.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(OnEnter(GameState::Playing), setup_hud)
            .add_systems(OnEnter(GameState::MainMenu), cleanup_hud)
            .add_systems(
                Update,
                draw_world.run_if(
                    in_state(GameState::Playing)
                        .or(in_state(GameState::Paused))
                        .or(in_state(GameState::GameOver)),
                ),
            )
            .add_systems(
                Update,
                draw_debug_overlay
                    .after(draw_world)
                    .run_if(in_state(GameState::Playing).or(in_state(GameState::Paused))),
            )
            .add_systems(Update, update_hud.run_if(in_state(GameState::Playing)));
    }
}

/// Setup camera for 2D rendering, centered on the arena so world coordinates
/// equal simulation coordinates.
pub fn setup_camera(mut commands: Commands) {
    let center = arena_center();
    commands.spawn((Camera2d, Transform::from_xyz(center.x, center.y, 0.0)));
}

// ── Gizmo world pass ──────────────────────────────────────────────────────────

fn asteroid_color() -> Color {
    Color::srgb(0.55, 0.50, 0.45)
}

fn powerup_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Health => Color::srgb(0.2, 0.9, 0.3),
        PowerUpKind::Life => Color::srgb(0.95, 0.85, 0.2),
        PowerUpKind::Shotgun => Color::srgb(0.9, 0.5, 0.15),
        PowerUpKind::Grenade => Color::srgb(0.85, 0.25, 0.25),
    }
}

fn enemy_color(class: EnemyClass) -> Color {
    match class {
        EnemyClass::Tank => Color::srgb(0.9, 0.45, 0.1),
        EnemyClass::Scout => Color::srgb(0.95, 0.2, 0.25),
    }
}

/// Draw the arena border and every active entity from the session snapshot.
pub fn draw_world(session: Res<GameSession>, mut gizmos: Gizmos) {
    // Arena border.
    let border = Color::srgb(0.25, 0.25, 0.32);
    let corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(ARENA_WIDTH, 0.0),
        Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
        Vec2::new(0.0, ARENA_HEIGHT),
    ];
    for i in 0..4 {
        gizmos.line_2d(corners[i], corners[(i + 1) % 4], border);
    }

    // Ship: a triangle pointing along the aim. Hidden frames of the respawn
    // blink are simply not drawn.
    let ship = &session.ship;
    if ship.visible {
        let color = if ship.is_invulnerable() {
            Color::srgb(0.5, 0.9, 1.0)
        } else {
            Color::srgb(0.85, 0.95, 1.0)
        };
        let r = ship.body.radius;
        let tip = ship.body.pos + heading(ship.body.angle_deg) * r;
        let left = ship.body.pos + heading(ship.body.angle_deg + 140.0) * r;
        let right = ship.body.pos + heading(ship.body.angle_deg - 140.0) * r;
        gizmos.line_2d(tip, left, color);
        gizmos.line_2d(left, right, color);
        gizmos.line_2d(right, tip, color);
    }

    for (_, a) in session.asteroids.iter_active() {
        gizmos.circle_2d(a.body.pos, a.body.radius, asteroid_color());
    }

    for (_, e) in session.enemies.iter_active() {
        let color = enemy_color(e.class);
        gizmos.circle_2d(e.body.pos, e.body.radius, color);
        // Facing tick so the player can read where it is about to shoot.
        gizmos.line_2d(
            e.body.pos,
            e.body.pos + e.body.facing() * e.body.radius,
            color,
        );
    }

    for (_, b) in session.bullets.iter_active() {
        gizmos.circle_2d(b.body.pos, b.body.radius, Color::srgb(1.0, 1.0, 0.7));
    }

    for (_, b) in session.enemy_bullets.iter_active() {
        let color = match (b.kind, b.from_player) {
            (BulletKind::Grenade, _) => Color::srgb(1.0, 0.55, 0.1),
            (BulletKind::Normal, true) => Color::srgb(1.0, 0.9, 0.5),
            (BulletKind::Normal, false) => Color::srgb(1.0, 0.3, 0.3),
        };
        gizmos.circle_2d(b.body.pos, b.body.radius, color);
    }

    for (_, p) in session.powerups.iter_active() {
        // Pulse the ring with the drop's animation phase.
        let pulse = 1.0 + 0.15 * p.anim_phase.sin();
        gizmos.circle_2d(p.body.pos, p.body.radius * pulse, powerup_color(p.kind));
    }

    for (_, p) in session.particles.iter_active() {
        let (r, g, b) = p.color;
        gizmos.circle_2d(p.pos, p.radius(), Color::srgba(r, g, b, p.alpha()));
    }
}

// ── Debug overlay ─────────────────────────────────────────────────────────────

fn steer_color(state: SteerState) -> Color {
    match state {
        SteerState::Wander => Color::srgb(0.4, 0.4, 0.5),
        SteerState::Approach => Color::srgb(0.2, 0.8, 0.3),
        SteerState::Hold => Color::srgb(0.9, 0.85, 0.2),
        SteerState::Retreat => Color::srgb(0.9, 0.3, 0.2),
    }
}

/// Debug layer over the world pass, gated on `GameConfig::debug_enabled`:
/// collision radii, per-tick velocity vectors (scaled up to be readable),
/// and a steer-state ring around each enemy.
pub fn draw_debug_overlay(
    session: Res<GameSession>,
    config: Res<GameConfig>,
    mut gizmos: Gizmos,
) {
    if !config.debug_enabled {
        return;
    }

    const VEL_SCALE: f32 = 10.0;
    let radius_color = Color::srgba(0.2, 1.0, 0.6, 0.5);
    let vel_color = Color::srgb(0.3, 0.7, 1.0);

    let ship = &session.ship;
    if ship.body.active {
        gizmos.circle_2d(ship.body.pos, ship.body.radius, radius_color);
        gizmos.line_2d(ship.body.pos, ship.body.pos + ship.body.vel * VEL_SCALE, vel_color);
    }

    for (_, a) in session.asteroids.iter_active() {
        gizmos.line_2d(a.body.pos, a.body.pos + a.body.vel * VEL_SCALE, vel_color);
    }

    for (_, e) in session.enemies.iter_active() {
        gizmos.circle_2d(e.body.pos, e.body.radius + 4.0, steer_color(e.steer));
        gizmos.line_2d(e.body.pos, e.body.pos + e.body.vel * VEL_SCALE, vel_color);
    }

    for (_, b) in session.bullets.iter_active() {
        gizmos.circle_2d(b.body.pos, b.body.radius, radius_color);
    }
    for (_, b) in session.enemy_bullets.iter_active() {
        gizmos.circle_2d(b.body.pos, b.body.radius, radius_color);
    }
    for (_, p) in session.powerups.iter_active() {
        gizmos.circle_2d(p.body.pos, p.body.radius, radius_color);
    }
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Root node of the HUD; despawned when returning to the main menu.
#[derive(Component)]
pub struct HudRoot;

/// Tags the score/wave/lives/health block (top left).
#[derive(Component)]
pub struct HudStatusText;

/// Tags the weapon/ammo line (top right).
#[derive(Component)]
pub struct HudWeaponText;

/// Tags the centred wave-transition banner.
#[derive(Component)]
pub struct HudBannerText;

/// Spawn the HUD overlay. Idempotent: a leftover HUD from a previous
/// pause/resume round trip is replaced.
pub fn setup_hud(
    mut commands: Commands,
    config: Res<GameConfig>,
    existing: Query<Entity, With<HudRoot>>,
) {
    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                top: Val::Px(0.0),
                ..default()
            },
            ZIndex(100),
            HudRoot,
        ))
        .with_children(|root| {
            root.spawn((
                Text::new(""),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.9, 1.0)),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(12.0),
                    top: Val::Px(8.0),
                    ..default()
                },
                HudStatusText,
            ));

            root.spawn((
                Text::new(""),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.9, 0.6)),
                Node {
                    position_type: PositionType::Absolute,
                    right: Val::Px(12.0),
                    top: Val::Px(8.0),
                    ..default()
                },
                HudWeaponText,
            ));

            root.spawn((
                Text::new(""),
                TextFont {
                    font_size: config.hud_font_size * 1.8,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.88, 0.45)),
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.0),
                    top: Val::Percent(38.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                HudBannerText,
            ));
        });
}

/// Despawn the HUD.
pub fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

fn weapon_line(session: &GameSession) -> String {
    let w = &session.ship.weapons;
    if w.reloading {
        return "RELOADING...".to_string();
    }
    match w.selected {
        WeaponKind::Normal => format!("CANNON {}", w.normal_ammo),
        WeaponKind::Shotgun => format!("SHOTGUN {}", w.shotgun_ammo),
        WeaponKind::Grenade => format!("GRENADE {}", w.grenade_ammo),
    }
}

/// Refresh the HUD text blocks from the session.
#[allow(clippy::type_complexity)]
pub fn update_hud(
    session: Res<GameSession>,
    mut status: Query<&mut Text, (With<HudStatusText>, Without<HudWeaponText>)>,
    mut weapon: Query<
        &mut Text,
        (With<HudWeaponText>, Without<HudStatusText>, Without<HudBannerText>),
    >,
    mut banner: Query<&mut Text, (With<HudBannerText>, Without<HudStatusText>)>,
) {
    for mut text in status.iter_mut() {
        *text = Text::new(format!(
            "SCORE {}\nWAVE {}   ROCKS {}\nLIVES {}   HULL {:.0}",
            session.score,
            session.wave.wave,
            session.wave.asteroids_remaining,
            session.lives,
            session.health,
        ));
    }
    for mut text in weapon.iter_mut() {
        *text = Text::new(weapon_line(&session));
    }
    for mut text in banner.iter_mut() {
        *text = Text::new(if session.wave.in_transition() {
            format!("WAVE {} COMPLETE", session.wave.wave)
        } else {
            String::new()
        });
    }
}
