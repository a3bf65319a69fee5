//! Skyscraper pillar pairs: creation, scrolling and pass scoring.

use rand::Rng;

use crate::config::GameConfig;
use crate::constants::{
    OBSTACLE_SCORE, OBSTACLE_WIDTH, WINDOW_COLS, WINDOW_LIT_CHANCE, WINDOW_PRESENT_CHANCE,
    WINDOW_ROWS,
};
use crate::entities::{Obstacle, SkyscraperWindow, World};

/// New pillar pair at the right edge. The top pillar's height is uniform in
/// `[min, max)` so both pillars keep their minimum height around the gap.
pub fn create_obstacle(config: &GameConfig, rng: &mut impl Rng) -> Obstacle {
    let min = config.obstacle_min_height;
    let max = config.obstacle_max_height();
    let top_height = rng.gen::<f32>() * (max - min) + min;

    Obstacle {
        x: config.screen_width,
        width: OBSTACLE_WIDTH,
        top_height,
        bottom_y: top_height + config.obstacle_gap,
        passed: false,
        shade: 20 + (rng.gen::<f32>() * 40.0) as u8,
        windows: window_pattern(rng),
    }
}

fn window_pattern(rng: &mut impl Rng) -> Vec<SkyscraperWindow> {
    let mut windows = Vec::new();
    for row in 0..WINDOW_ROWS {
        for col in 0..WINDOW_COLS {
            if rng.gen::<f32>() < WINDOW_PRESENT_CHANCE {
                windows.push(SkyscraperWindow {
                    row,
                    col,
                    lit: rng.gen::<f32>() < WINDOW_LIT_CHANCE,
                });
            }
        }
    }
    windows
}

/// Scroll every pillar, award a point the first time one is fully behind the
/// player, and drop pillars that left the screen.
pub fn update(world: &mut World) {
    let scroll = world.scroll_speed;
    let player_x = world.player.x;
    let mut gained = 0;

    for obstacle in &mut world.obstacles {
        obstacle.x -= scroll;
        if !obstacle.passed && obstacle.x + obstacle.width < player_x {
            obstacle.passed = true;
            gained += OBSTACLE_SCORE;
        }
    }

    world.score += gained;
    world.obstacles.retain(|o| o.x + o.width >= 0.0);
}
