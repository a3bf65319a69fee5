//! Sound cues emitted by the simulation for an external audio player.

/// A discrete sound trigger. The simulation queues these on the world during a
/// frame; the host drains them with [`crate::entities::World::drain_cues`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Shoot,
    Laser,
    Explosion,
    Hit,
    PowerUp,
    GameOver,
    ShieldRecharge,
    EnemyDeath,
    /// Basic enemy volley, one per bullet.
    EnemyShoot,
    UfoShoot,
    UfoHit,
    UfoDeath,
    UfoPresence,
    Charge,
    BlobShoot,
    BlobPresence,
}

impl SoundCue {
    /// Asset-style name, stable across releases.
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Shoot => "shoot",
            SoundCue::Laser => "laser",
            SoundCue::Explosion => "explosion",
            SoundCue::Hit => "hit",
            SoundCue::PowerUp => "power_up",
            SoundCue::GameOver => "game_over",
            SoundCue::ShieldRecharge => "shield_recharge",
            SoundCue::EnemyDeath => "enemy_death",
            SoundCue::EnemyShoot => "enemy_shoot",
            SoundCue::UfoShoot => "ufo_shoot",
            SoundCue::UfoHit => "ufo_hit",
            SoundCue::UfoDeath => "ufo_death",
            SoundCue::UfoPresence => "ufo_presence",
            SoundCue::Charge => "charge",
            SoundCue::BlobShoot => "blob_shoot",
            SoundCue::BlobPresence => "blob",
        }
    }
}
