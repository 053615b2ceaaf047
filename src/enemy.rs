//! Enemy AI subsystem: per-class steering policies, asteroid avoidance,
//! scout flocking, and the fire-control state machines.
//!
//! Steering is an explicit state machine over the live distance to the
//! player. The Hold band spans 0.6×–1.3× of the class attack distance;
//! Approach triggers only above the band and Retreat only below it, so an
//! enemy sitting near the attack distance does not flip states every tick.
//!
//! Each enemy's target velocity is produced by the pure
//! [`steer_velocity`] function and blended exponentially into the current
//! velocity, which gives smooth turns without any per-enemy path state.

use crate::asteroid::Asteroid;
use crate::body::{angle_of, heading, KineticBody};
use crate::constants::*;
use crate::particlefx::{emit_burst, emit_thrust, Particle};
use crate::pool::{Active, Pool};
use crate::powerup::{maybe_drop, PowerUp};
use crate::projectile::{fire_grenade, fire_shot, EnemyBullet};
use crate::session::AudioCue;
use bevy::prelude::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

// ── Classes ───────────────────────────────────────────────────────────────────

/// Enemy behaviour class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyClass {
    /// Slow, tough, direct pursuit, timed-detonation grenades.
    Tank,
    /// Fast, fragile, orbits and flocks, burst-fired direct shots.
    #[default]
    Scout,
}

/// Per-class tuning table.
#[derive(Debug, Clone, Copy)]
pub struct ClassParams {
    pub radius: f32,
    pub max_speed: f32,
    pub health: f32,
    /// Player detection radius; outside it the enemy wanders.
    pub detect_radius: f32,
    /// Preferred engagement distance; the Hold band is derived from it.
    pub attack_dist: f32,
    /// Seconds between Tank shots; base burst cooldown for Scouts.
    pub fire_cooldown: f32,
    pub contact_damage: f32,
    pub score: u32,
    pub drop_chance: f32,
}

impl EnemyClass {
    pub const fn params(self) -> ClassParams {
        match self {
            EnemyClass::Tank => ClassParams {
                radius: 22.0,
                max_speed: 1.2,
                health: 60.0,
                detect_radius: 450.0,
                attack_dist: 280.0,
                fire_cooldown: 2.2,
                contact_damage: 25.0,
                score: 150,
                drop_chance: TANK_DROP_CHANCE,
            },
            EnemyClass::Scout => ClassParams {
                radius: 14.0,
                max_speed: 2.6,
                health: 30.0,
                detect_radius: 400.0,
                attack_dist: 180.0,
                fire_cooldown: BURST_COOLDOWN,
                contact_damage: 15.0,
                score: 100,
                drop_chance: SCOUT_DROP_CHANCE,
            },
        }
    }
}

// ── Fire control ──────────────────────────────────────────────────────────────

/// Weapon timer state, tagged per class so Tank slots carry no burst fields
/// and Scout slots no cannon fields.
#[derive(Debug, Clone, Copy)]
pub enum EnemyWeapon {
    /// Flat per-shot cooldown (Tank).
    Cannon { cooldown: f32 },
    /// Burst machine (Scout): a cooldown phase alternating with a rapid
    /// multi-shot phase of fixed count and inter-shot delay.
    Burst {
        cooldown: f32,
        bursting: bool,
        shots_left: u32,
        shot_timer: f32,
    },
}

impl Default for EnemyWeapon {
    fn default() -> Self {
        EnemyWeapon::Burst {
            cooldown: BURST_COOLDOWN,
            bursting: false,
            shots_left: 0,
            shot_timer: 0.0,
        }
    }
}

impl EnemyWeapon {
    fn for_class(class: EnemyClass, rng: &mut StdRng) -> Self {
        let params = class.params();
        match class {
            // Randomized initial phase so simultaneous spawns don't salvo.
            EnemyClass::Tank => EnemyWeapon::Cannon {
                cooldown: params.fire_cooldown * rng.gen_range(0.4..1.0),
            },
            EnemyClass::Scout => EnemyWeapon::Burst {
                cooldown: params.fire_cooldown * rng.gen_range(0.4..1.0),
                bursting: false,
                shots_left: 0,
                shot_timer: 0.0,
            },
        }
    }
}

// ── Steering states ───────────────────────────────────────────────────────────

/// Named steering states, re-evaluated every tick from the live distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SteerState {
    /// Player out of detection radius: random heading changes on a timer.
    #[default]
    Wander,
    /// Beyond `HOLD_FAR ×` attack distance: close in.
    Approach,
    /// Inside the hysteresis band: Tank holds, Scout orbits.
    Hold,
    /// Below `HOLD_NEAR ×` attack distance: back off.
    Retreat,
}

/// Pick the steering state for a given live distance to the player.
pub fn steer_state_for(dist: f32, params: &ClassParams) -> SteerState {
    if dist > params.detect_radius {
        SteerState::Wander
    } else if dist > params.attack_dist * HOLD_FAR {
        SteerState::Approach
    } else if dist < params.attack_dist * HOLD_NEAR {
        SteerState::Retreat
    } else {
        SteerState::Hold
    }
}

// ── Entity ────────────────────────────────────────────────────────────────────

/// One enemy slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Enemy {
    pub body: KineticBody,
    pub class: EnemyClass,
    pub health: f32,
    pub weapon: EnemyWeapon,
    pub steer: SteerState,
    /// Current wander heading (degrees).
    pub wander_angle_deg: f32,
    /// Seconds until the next wander heading re-roll.
    pub wander_timer: f32,
    /// Persistent grouping preference for Scouts, derived from the slot index
    /// at spawn — never re-rolled per frame.
    pub wants_group: bool,
}

impl Active for Enemy {
    fn is_active(&self) -> bool {
        self.body.active
    }
    fn set_active(&mut self, active: bool) {
        self.body.active = active;
    }
}

/// Spawn an enemy of `class` at `pos`. Returns the slot index, or `None`
/// when the pool is full (the spawn is dropped).
pub fn spawn_enemy(
    enemies: &mut Pool<Enemy>,
    class: EnemyClass,
    pos: Vec2,
    rng: &mut StdRng,
) -> Option<usize> {
    let weapon = EnemyWeapon::for_class(class, rng);
    let wander_angle_deg = rng.gen_range(0.0..360.0);
    let params = class.params();
    let (idx, slot) = enemies.acquire()?;
    *slot = Enemy {
        body: KineticBody {
            pos,
            vel: Vec2::ZERO,
            angle_deg: wander_angle_deg,
            radius: params.radius,
            active: true,
        },
        class,
        health: params.health,
        weapon,
        steer: SteerState::Wander,
        wander_angle_deg,
        wander_timer: WANDER_RETARGET_SECS,
        wants_group: idx % 2 == 0,
    };
    Some(idx)
}

// ── Avoidance ─────────────────────────────────────────────────────────────────

/// Repulsion away from nearby asteroids. Every active asteroid within
/// `5·r_enemy + r_asteroid` contributes a vector away from itself weighted by
/// squared proximity — a rock about to hit counts quadratically more than one
/// at the edge of the zone. The accumulated vector is normalized.
pub fn avoidance_vector(pos: Vec2, enemy_radius: f32, asteroids: &Pool<Asteroid>) -> Vec2 {
    let mut accum = Vec2::ZERO;
    for (_, a) in asteroids.iter_active() {
        let limit = AVOID_RADIUS_FACTOR * enemy_radius + a.body.radius;
        let offset = pos - a.body.pos;
        let dist = offset.length().max(CONTACT_EPSILON);
        if dist < limit {
            let proximity = (limit - dist) / limit; // 0 at edge → 1 at center
            accum += (offset / dist) * proximity * proximity;
        }
    }
    if accum.length_squared() > 0.0 {
        accum.normalize()
    } else {
        Vec2::ZERO
    }
}

// ── Scout flocking ────────────────────────────────────────────────────────────

/// Per-tick flocking inputs computed from the other grouping scouts.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupInfluence {
    /// Normalized pull toward the average position of group members.
    pub cohesion: Vec2,
    /// Normalized push away from members inside the separation radius,
    /// inverse-distance weighted with quadratic falloff.
    pub separation: Vec2,
    /// This member's rank within the group (by slot index); spreads orbit
    /// offsets so grouped scouts circle at staggered angles.
    pub rank: u32,
    /// Number of *other* members in this tick's ad hoc group.
    pub others: u32,
}

/// Minimal per-enemy data captured before the mutable AI pass, so flocking
/// can read peers while each enemy is updated in place.
#[derive(Debug, Clone, Copy)]
struct PeerSnapshot {
    idx: usize,
    pos: Vec2,
    is_scout: bool,
    wants_group: bool,
}

/// Compute cohesion/separation for the scout in slot `idx` at `pos` against
/// its peers. Non-grouping scouts and peers outside [`SCOUT_GROUP_RADIUS`]
/// contribute nothing.
fn group_influence(peers: &[PeerSnapshot], idx: usize, pos: Vec2, wants_group: bool) -> GroupInfluence {
    if !wants_group {
        return GroupInfluence::default();
    }

    let mut cohesion_accum = Vec2::ZERO;
    let mut separation_accum = Vec2::ZERO;
    let mut others = 0u32;
    let mut rank = 0u32;

    for peer in peers {
        if peer.idx == idx || !peer.is_scout || !peer.wants_group {
            continue;
        }
        let offset = peer.pos - pos;
        let dist = offset.length();
        if dist >= SCOUT_GROUP_RADIUS {
            continue;
        }
        others += 1;
        if peer.idx < idx {
            rank += 1;
        }
        cohesion_accum += offset;

        if dist < SCOUT_SEPARATION_RADIUS {
            let d = dist.max(CONTACT_EPSILON);
            let falloff = (SCOUT_SEPARATION_RADIUS - d) / SCOUT_SEPARATION_RADIUS;
            separation_accum += (-offset / d) * falloff * falloff;
        }
    }

    if others == 0 {
        return GroupInfluence::default();
    }

    let cohesion = {
        let avg = cohesion_accum / others as f32;
        if avg.length_squared() > 0.0 {
            avg.normalize()
        } else {
            Vec2::ZERO
        }
    };
    let separation = if separation_accum.length_squared() > 0.0 {
        separation_accum.normalize()
    } else {
        Vec2::ZERO
    };

    GroupInfluence {
        cohesion,
        separation,
        rank,
        others,
    }
}

// ── Steering ──────────────────────────────────────────────────────────────────

/// Pure steering function: target velocity for one enemy this tick.
///
/// `to_player` is the offset from the enemy to the ship. The caller blends
/// the result into the current velocity with [`STEER_BLEND`].
pub fn steer_velocity(
    class: EnemyClass,
    state: SteerState,
    to_player: Vec2,
    wander_dir: Vec2,
    avoidance: Vec2,
    group: &GroupInfluence,
) -> Vec2 {
    let params = class.params();
    let speed = params.max_speed;
    let toward = if to_player.length_squared() > 0.0 {
        to_player.normalize()
    } else {
        Vec2::ZERO
    };

    let mut target = match state {
        SteerState::Wander => wander_dir * speed * WANDER_SPEED_FACTOR + avoidance * speed * 0.5,
        SteerState::Approach => toward * speed + avoidance * speed,
        SteerState::Retreat => -toward * speed + avoidance * speed,
        SteerState::Hold => match class {
            // Tank parks, moving only to dodge rocks.
            EnemyClass::Tank => avoidance * speed * TANK_HOLD_AVOID_MULT,
            // Scout circles the player at a group-staggered tangent.
            EnemyClass::Scout => {
                let orbit_deg = group.rank as f32 * SCOUT_ORBIT_SPREAD_DEG;
                let rad = orbit_deg.to_radians();
                let tangent = Vec2::new(-toward.y, toward.x);
                let orbit = tangent * rad.cos() + toward * rad.sin();
                orbit * speed + avoidance * speed
            }
        },
    };

    if class == EnemyClass::Scout {
        target += group.cohesion * speed * SCOUT_COHESION_WEIGHT
            + group.separation * speed * SCOUT_SEPARATION_WEIGHT;
    }

    target
}

// ── Per-tick AI pass ──────────────────────────────────────────────────────────

/// Run one AI decision step for every active enemy: state selection,
/// steering, wander retargeting, thrust particles, and weapon fire.
/// Movement integration itself happens later in the physics step.
#[allow(clippy::too_many_arguments)]
pub fn enemy_ai_step(
    enemies: &mut Pool<Enemy>,
    asteroids: &Pool<Asteroid>,
    enemy_bullets: &mut Pool<EnemyBullet>,
    particles: &mut Pool<Particle>,
    ship_pos: Vec2,
    dt: f32,
    rng: &mut StdRng,
    cues: &mut Vec<AudioCue>,
) {
    let peers: Vec<PeerSnapshot> = enemies
        .iter_active()
        .map(|(idx, e)| PeerSnapshot {
            idx,
            pos: e.body.pos,
            is_scout: e.class == EnemyClass::Scout,
            wants_group: e.wants_group,
        })
        .collect();

    // Fire requests are deferred so the enemy pool borrow can end before the
    // bullet pool is mutated alongside the rng.
    enum FireRequest {
        Grenade { pos: Vec2, angle_deg: f32 },
        Shot { pos: Vec2, angle_deg: f32 },
    }
    let mut shots: Vec<FireRequest> = Vec::new();
    let mut thrust_puffs: Vec<(Vec2, Vec2)> = Vec::new();

    for (idx, enemy) in enemies.iter_active_mut() {
        let params = enemy.class.params();
        let to_player = ship_pos - enemy.body.pos;
        let dist = to_player.length();

        enemy.steer = steer_state_for(dist, &params);

        // Wander heading re-rolls on a randomized timer.
        enemy.wander_timer -= dt;
        if enemy.wander_timer <= 0.0 {
            enemy.wander_angle_deg = rng.gen_range(0.0..360.0);
            enemy.wander_timer = WANDER_RETARGET_SECS * (1.0 + rng.gen_range(0.0..1.0));
        }

        let avoidance = avoidance_vector(enemy.body.pos, params.radius, asteroids);
        let group = group_influence(&peers, idx, enemy.body.pos, enemy.wants_group);

        let target = steer_velocity(
            enemy.class,
            enemy.steer,
            to_player,
            heading(enemy.wander_angle_deg),
            avoidance,
            &group,
        );
        enemy.body.vel = enemy.body.vel * (1.0 - STEER_BLEND) + target * STEER_BLEND;

        // Face the player when engaged, otherwise the direction of travel.
        enemy.body.angle_deg = if enemy.steer == SteerState::Wander {
            angle_of(enemy.body.vel)
        } else {
            angle_of(to_player)
        };

        // Thrust puffs: probabilistic while wandering, steady while closing.
        let emit = match enemy.steer {
            SteerState::Wander => rng.gen_range(0.0..1.0) < WANDER_THRUST_CHANCE,
            SteerState::Approach => true,
            _ => false,
        };
        if emit && enemy.body.vel.length_squared() > 0.01 {
            thrust_puffs.push((enemy.body.pos, enemy.body.vel.normalize()));
        }

        // Fire control.
        let aim_deg = angle_of(to_player);
        match (&mut enemy.weapon, enemy.class) {
            // Tank: flat cooldown, fires whenever the player is detected.
            (EnemyWeapon::Cannon { cooldown }, EnemyClass::Tank) => {
                *cooldown -= dt;
                if enemy.steer != SteerState::Wander && *cooldown <= 0.0 {
                    *cooldown = params.fire_cooldown;
                    shots.push(FireRequest::Grenade {
                        pos: enemy.body.pos,
                        angle_deg: aim_deg,
                    });
                }
            }
            // Scout: burst machine, advances only while holding position.
            (
                EnemyWeapon::Burst {
                    cooldown,
                    bursting,
                    shots_left,
                    shot_timer,
                },
                _,
            ) => {
                if enemy.steer != SteerState::Hold {
                    continue;
                }
                if !*bursting {
                    *cooldown -= dt;
                    if *cooldown <= 0.0 {
                        *bursting = true;
                        *shots_left = BURST_COUNT;
                        *shot_timer = 0.0; // first shot fires immediately
                    }
                }
                if *bursting {
                    *shot_timer -= dt;
                    if *shot_timer <= 0.0 && *shots_left > 0 {
                        *shots_left -= 1;
                        *shot_timer = BURST_DELAY;
                        let jitter = rng.gen_range(-SCOUT_AIM_JITTER_DEG..SCOUT_AIM_JITTER_DEG);
                        shots.push(FireRequest::Shot {
                            pos: enemy.body.pos,
                            angle_deg: aim_deg + jitter,
                        });
                    }
                    if *shots_left == 0 && *shot_timer <= 0.0 {
                        // Extended cooldown with group-size jitter staggers
                        // fire among group members.
                        *bursting = false;
                        *cooldown = params.fire_cooldown
                            + rng.gen_range(0.0..=BURST_GROUP_JITTER) * group.others as f32;
                    }
                }
            }
            // A mismatched weapon/class pairing falls through to no fire.
            _ => {}
        }
    }

    for (pos, facing) in thrust_puffs {
        emit_thrust(particles, pos, facing, (0.9, 0.5, 0.2), rng);
    }
    for request in shots {
        match request {
            FireRequest::Grenade { pos, angle_deg } => {
                fire_grenade(enemy_bullets, pos, angle_deg, TANK_GRENADE_DAMAGE, false);
            }
            FireRequest::Shot { pos, angle_deg } => {
                fire_shot(
                    enemy_bullets,
                    pos,
                    angle_deg,
                    SCOUT_BULLET_SPEED,
                    SCOUT_BULLET_DAMAGE,
                    false,
                );
            }
        }
        cues.push(AudioCue::EnemyShoot);
    }
}

// ── Damage & death ────────────────────────────────────────────────────────────

/// Apply `amount` damage to the enemy in slot `idx`. On death: release the
/// slot, burst explosion particles, roll a power-up drop, and return the
/// score award — halved when the killer was an asteroid rather than the
/// player.
#[allow(clippy::too_many_arguments)]
pub fn damage_enemy(
    enemies: &mut Pool<Enemy>,
    idx: usize,
    amount: f32,
    by_asteroid: bool,
    powerups: &mut Pool<PowerUp>,
    particles: &mut Pool<Particle>,
    rng: &mut StdRng,
    cues: &mut Vec<AudioCue>,
) -> Option<u32> {
    let (pos, params) = match enemies.get_mut(idx) {
        Some(e) if e.body.active => {
            e.health -= amount;
            if e.health > 0.0 {
                return None;
            }
            (e.body.pos, e.class.params())
        }
        _ => return None,
    };
    enemies.release(idx);

    emit_burst(particles, pos, EXPLOSION_PARTICLES, (1.0, 0.3, 0.1), rng);
    maybe_drop(powerups, pos, params.drop_chance, rng);
    cues.push(AudioCue::EnemyExplode);

    Some(if by_asteroid {
        params.score / 2
    } else {
        params.score
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn scout_peer(idx: usize, x: f32, y: f32, wants_group: bool) -> PeerSnapshot {
        PeerSnapshot {
            idx,
            pos: Vec2::new(x, y),
            is_scout: true,
            wants_group,
        }
    }

    // ── steer_state_for ───────────────────────────────────────────────────────

    #[test]
    fn state_selection_uses_the_hysteresis_band() {
        let params = EnemyClass::Scout.params();
        let attack = params.attack_dist;

        assert_eq!(
            steer_state_for(params.detect_radius + 1.0, &params),
            SteerState::Wander
        );
        assert_eq!(
            steer_state_for(attack * HOLD_FAR + 1.0, &params),
            SteerState::Approach
        );
        assert_eq!(steer_state_for(attack, &params), SteerState::Hold);
        assert_eq!(
            steer_state_for(attack * HOLD_NEAR - 1.0, &params),
            SteerState::Retreat
        );
        // Both band edges resolve to Hold — no oscillation at the boundary.
        assert_eq!(steer_state_for(attack * HOLD_FAR, &params), SteerState::Hold);
        assert_eq!(steer_state_for(attack * HOLD_NEAR, &params), SteerState::Hold);
    }

    // ── group_influence ───────────────────────────────────────────────────────

    #[test]
    fn two_grouping_scouts_in_radius_attract_each_other() {
        let peers = vec![
            scout_peer(0, 0.0, 0.0, true),
            scout_peer(1, SCOUT_GROUP_RADIUS * 0.5, 0.0, true),
        ];
        let a = group_influence(&peers, 0, Vec2::ZERO, true);
        let b = group_influence(&peers, 1, peers[1].pos, true);
        assert!(a.cohesion.length() > 0.0);
        assert!(b.cohesion.length() > 0.0);
        // They pull toward each other.
        assert!(a.cohesion.x > 0.0);
        assert!(b.cohesion.x < 0.0);
    }

    #[test]
    fn scout_outside_group_radius_contributes_nothing() {
        let peers = vec![
            scout_peer(0, 0.0, 0.0, true),
            scout_peer(1, SCOUT_GROUP_RADIUS * 0.5, 0.0, true),
            scout_peer(2, SCOUT_GROUP_RADIUS * 3.0, 0.0, true),
        ];
        let far = group_influence(&peers, 2, peers[2].pos, true);
        assert_eq!(far.others, 0);
        assert_eq!(far.cohesion, Vec2::ZERO);

        let near = group_influence(&peers, 0, Vec2::ZERO, true);
        assert_eq!(near.others, 1, "only the in-radius peer counts");
    }

    #[test]
    fn non_grouping_scout_ignores_and_is_ignored() {
        let peers = vec![
            scout_peer(0, 0.0, 0.0, false),
            scout_peer(1, 10.0, 0.0, true),
        ];
        assert_eq!(group_influence(&peers, 0, Vec2::ZERO, false).others, 0);
        assert_eq!(group_influence(&peers, 1, peers[1].pos, true).others, 0);
    }

    #[test]
    fn separation_activates_only_below_separation_radius() {
        let close = vec![
            scout_peer(0, 0.0, 0.0, true),
            scout_peer(1, SCOUT_SEPARATION_RADIUS * 0.5, 0.0, true),
        ];
        let inf = group_influence(&close, 0, Vec2::ZERO, true);
        assert!(inf.separation.x < 0.0, "pushed away from the close peer");

        let spaced = vec![
            scout_peer(0, 0.0, 0.0, true),
            scout_peer(1, SCOUT_SEPARATION_RADIUS * 2.0, 0.0, true),
        ];
        let inf = group_influence(&spaced, 0, Vec2::ZERO, true);
        assert_eq!(inf.separation, Vec2::ZERO);
        assert!(inf.cohesion.length() > 0.0, "cohesion still applies");
    }

    // ── avoidance_vector ──────────────────────────────────────────────────────

    #[test]
    fn avoidance_points_away_from_a_nearby_rock() {
        let mut asteroids: Pool<Asteroid> = Pool::new(4);
        let (_, slot) = asteroids.acquire().unwrap();
        *slot = Asteroid {
            body: KineticBody {
                pos: Vec2::new(30.0, 0.0),
                radius: 20.0,
                active: true,
                ..Default::default()
            },
            size: 1,
        };
        let v = avoidance_vector(Vec2::ZERO, 14.0, &asteroids);
        assert!(v.x < -0.9, "repulsion along −X, got {v:?}");
    }

    #[test]
    fn closer_rocks_dominate_the_avoidance_sum() {
        let mut asteroids: Pool<Asteroid> = Pool::new(4);
        for (x, r) in [(25.0_f32, 20.0_f32), (-60.0, 20.0)] {
            let (_, slot) = asteroids.acquire().unwrap();
            *slot = Asteroid {
                body: KineticBody {
                    pos: Vec2::new(x, 0.0),
                    radius: r,
                    active: true,
                    ..Default::default()
                },
                size: 1,
            };
        }
        let v = avoidance_vector(Vec2::ZERO, 14.0, &asteroids);
        // The rock at +25 is much closer than the one at −60, so the net
        // repulsion points in −X despite the opposing contribution.
        assert!(v.x < 0.0);
    }

    #[test]
    fn no_rocks_in_range_means_zero_avoidance() {
        let asteroids: Pool<Asteroid> = Pool::new(4);
        assert_eq!(avoidance_vector(Vec2::ZERO, 14.0, &asteroids), Vec2::ZERO);
    }

    // ── steer_velocity ────────────────────────────────────────────────────────

    #[test]
    fn approach_steers_toward_the_player() {
        let v = steer_velocity(
            EnemyClass::Tank,
            SteerState::Approach,
            Vec2::new(100.0, 0.0),
            Vec2::Y,
            Vec2::ZERO,
            &GroupInfluence::default(),
        );
        assert!(v.x > 0.0);
        assert!(v.length() <= EnemyClass::Tank.params().max_speed * 1.01);
    }

    #[test]
    fn retreat_steers_away_from_the_player() {
        let v = steer_velocity(
            EnemyClass::Scout,
            SteerState::Retreat,
            Vec2::new(100.0, 0.0),
            Vec2::Y,
            Vec2::ZERO,
            &GroupInfluence::default(),
        );
        assert!(v.x < 0.0);
    }

    #[test]
    fn holding_tank_moves_only_with_avoidance() {
        let still = steer_velocity(
            EnemyClass::Tank,
            SteerState::Hold,
            Vec2::new(100.0, 0.0),
            Vec2::Y,
            Vec2::ZERO,
            &GroupInfluence::default(),
        );
        assert_eq!(still, Vec2::ZERO);

        let dodging = steer_velocity(
            EnemyClass::Tank,
            SteerState::Hold,
            Vec2::new(100.0, 0.0),
            Vec2::Y,
            Vec2::NEG_Y,
            &GroupInfluence::default(),
        );
        assert!(dodging.y < 0.0);
        assert!(
            dodging.length() > EnemyClass::Tank.params().max_speed,
            "Tank avoidance in Hold is amplified"
        );
    }

    #[test]
    fn holding_scout_orbits_perpendicular_to_the_player() {
        let v = steer_velocity(
            EnemyClass::Scout,
            SteerState::Hold,
            Vec2::new(100.0, 0.0),
            Vec2::Y,
            Vec2::ZERO,
            &GroupInfluence::default(),
        );
        // Rank 0 orbit is the pure tangent of +X, i.e. ±Y.
        assert!(v.x.abs() < 1e-4);
        assert!(v.y.abs() > 0.0);
    }

    // ── spawn / damage ────────────────────────────────────────────────────────

    #[test]
    fn wants_group_is_derived_from_the_slot_index() {
        let mut enemies: Pool<Enemy> = Pool::new(4);
        let mut rng = rng();
        for _ in 0..4 {
            spawn_enemy(&mut enemies, EnemyClass::Scout, Vec2::ZERO, &mut rng);
        }
        assert!(enemies.get(0).unwrap().wants_group);
        assert!(!enemies.get(1).unwrap().wants_group);
        assert!(enemies.get(2).unwrap().wants_group);
        assert!(!enemies.get(3).unwrap().wants_group);
    }

    #[test]
    fn asteroid_kills_award_half_score() {
        let mut rng = rng();
        let mut cues = Vec::new();
        let mut particles: Pool<Particle> = Pool::new(64);
        let mut powerups: Pool<PowerUp> = Pool::new(N_POWERUPS);

        for by_asteroid in [false, true] {
            let mut enemies: Pool<Enemy> = Pool::new(4);
            let idx =
                spawn_enemy(&mut enemies, EnemyClass::Scout, Vec2::ZERO, &mut rng).unwrap();
            let score = damage_enemy(
                &mut enemies,
                idx,
                999.0,
                by_asteroid,
                &mut powerups,
                &mut particles,
                &mut rng,
                &mut cues,
            );
            let expected = if by_asteroid {
                EnemyClass::Scout.params().score / 2
            } else {
                EnemyClass::Scout.params().score
            };
            assert_eq!(score, Some(expected));
            assert_eq!(enemies.active_count(), 0);
        }
    }

    #[test]
    fn nonlethal_damage_returns_no_score() {
        let mut rng = rng();
        let mut cues = Vec::new();
        let mut particles: Pool<Particle> = Pool::new(64);
        let mut powerups: Pool<PowerUp> = Pool::new(N_POWERUPS);
        let mut enemies: Pool<Enemy> = Pool::new(4);

        let idx = spawn_enemy(&mut enemies, EnemyClass::Tank, Vec2::ZERO, &mut rng).unwrap();
        let score = damage_enemy(
            &mut enemies,
            idx,
            1.0,
            false,
            &mut powerups,
            &mut particles,
            &mut rng,
            &mut cues,
        );
        assert_eq!(score, None);
        assert_eq!(enemies.active_count(), 1);
        assert!(cues.is_empty());
    }

    // ── burst machine (via the full AI step) ──────────────────────────────────

    #[test]
    fn holding_scout_fires_a_full_burst_then_cools_down() {
        let mut enemies: Pool<Enemy> = Pool::new(4);
        let asteroids: Pool<Asteroid> = Pool::new(4);
        let mut bullets: Pool<EnemyBullet> = Pool::new(N_ENEMY_BULLETS);
        let mut particles: Pool<Particle> = Pool::new(256);
        let mut rng = rng();
        let mut cues = Vec::new();

        // Scout parked exactly at attack distance from the ship → Hold.
        let ship = Vec2::new(640.0, 360.0);
        let attack = EnemyClass::Scout.params().attack_dist;
        let idx = spawn_enemy(
            &mut enemies,
            EnemyClass::Scout,
            ship + Vec2::new(attack, 0.0),
            &mut rng,
        )
        .unwrap();

        // Tick until the first burst completes. Pin the scout in place so the
        // steering blend cannot walk it out of the Hold band.
        let dt = 1.0 / 60.0;
        for _ in 0..(5.0 / dt) as usize {
            enemy_ai_step(
                &mut enemies,
                &asteroids,
                &mut bullets,
                &mut particles,
                ship,
                dt,
                &mut rng,
                &mut cues,
            );
            let e = enemies.get_mut(idx).unwrap();
            e.body.pos = ship + Vec2::new(attack, 0.0);
            if bullets.active_count() >= BURST_COUNT as usize {
                break;
            }
        }
        assert_eq!(bullets.active_count(), BURST_COUNT as usize);

        // A few more ticks let the machine notice the burst is spent.
        for _ in 0..10 {
            enemy_ai_step(
                &mut enemies,
                &asteroids,
                &mut bullets,
                &mut particles,
                ship,
                dt,
                &mut rng,
                &mut cues,
            );
            let e = enemies.get_mut(idx).unwrap();
            e.body.pos = ship + Vec2::new(attack, 0.0);
        }
        assert_eq!(bullets.active_count(), BURST_COUNT as usize);

        // Immediately after the burst the machine must be cooling down.
        match enemies.get(idx).unwrap().weapon {
            EnemyWeapon::Burst {
                bursting, cooldown, ..
            } => {
                assert!(!bursting);
                assert!(cooldown > 0.0);
            }
            _ => panic!("scout must carry a burst weapon"),
        }
    }
}
