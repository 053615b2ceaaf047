//! Fire-and-forget sound playback for simulation cues.
//!
//! The simulation reports [`AudioCue`]s per tick; the tick system pushes them
//! into [`CueQueue`] and this module drains the queue each frame, spawning a
//! one-shot `AudioPlayer` per cue. Missing sound files are tolerated: Bevy's
//! asset server logs the load failure and the entity despawns after playback
//! regardless.

use crate::config::GameConfig;
use crate::menu::GameState;
use crate::session::AudioCue;
use bevy::prelude::*;

/// Cues produced by fixed ticks, awaiting playback.
#[derive(Resource, Debug, Default)]
pub struct CueQueue(pub Vec<AudioCue>);

/// Handles to every sound effect, loaded once at startup.
#[derive(Resource, Default)]
pub struct SoundBank {
    shot: Handle<AudioSource>,
    reload_start: Handle<AudioSource>,
    reload_finish: Handle<AudioSource>,
    asteroid_hit: Handle<AudioSource>,
    ship_hit: Handle<AudioSource>,
    enemy_shoot: Handle<AudioSource>,
    enemy_explode: Handle<AudioSource>,
    pickup: Handle<AudioSource>,
}

impl SoundBank {
    fn handle(&self, cue: AudioCue) -> Handle<AudioSource> {
        match cue {
            AudioCue::Shot => self.shot.clone(),
            AudioCue::ReloadStart => self.reload_start.clone(),
            AudioCue::ReloadFinish => self.reload_finish.clone(),
            AudioCue::AsteroidHit => self.asteroid_hit.clone(),
            AudioCue::ShipHit => self.ship_hit.clone(),
            AudioCue::EnemyShoot => self.enemy_shoot.clone(),
            AudioCue::EnemyExplode => self.enemy_explode.clone(),
            AudioCue::Pickup => self.pickup.clone(),
        }
    }
}

/// Registers sound loading and cue playback.
pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CueQueue>()
            .init_resource::<SoundBank>()
            .add_systems(Startup, load_sounds)
            .add_systems(Update, play_cues.run_if(in_state(GameState::Playing)));
    }
}

/// Load every sound effect handle at startup.
pub fn load_sounds(mut bank: ResMut<SoundBank>, asset_server: Res<AssetServer>) {
    bank.shot = asset_server.load("sounds/shot.ogg");
    bank.reload_start = asset_server.load("sounds/reload_start.ogg");
    bank.reload_finish = asset_server.load("sounds/reload_finish.ogg");
    bank.asteroid_hit = asset_server.load("sounds/asteroid_hit.ogg");
    bank.ship_hit = asset_server.load("sounds/ship_hit.ogg");
    bank.enemy_shoot = asset_server.load("sounds/enemy_shoot.ogg");
    bank.enemy_explode = asset_server.load("sounds/enemy_explode.ogg");
    bank.pickup = asset_server.load("sounds/pickup.ogg");
}

/// Drain the cue queue and spawn a one-shot player per cue. With sound
/// disabled the queue is still drained so it cannot grow unbounded.
pub fn play_cues(
    mut commands: Commands,
    mut queue: ResMut<CueQueue>,
    bank: Res<SoundBank>,
    config: Res<GameConfig>,
) {
    for cue in queue.0.drain(..) {
        if !config.sound_enabled {
            continue;
        }
        commands.spawn((AudioPlayer::new(bank.handle(cue)), PlaybackSettings::DESPAWN));
    }
}
