//! Player-vs-obstacle collision detection
//!
//! Pure queries over the current (post-integration) hitboxes. Nothing here
//! mutates state; the session decides what a hit means.

use super::rect::Rect;
use super::state::{Obstacle, Player};

/// Result of a collision query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Id of the obstacle that was hit
    pub obstacle_id: u32,
    /// Intersection of the two hitboxes
    pub overlap: Rect,
}

/// Intersection of two rectangles, if they overlap
pub fn intersection(a: &Rect, b: &Rect) -> Option<Rect> {
    if !a.overlaps(b) {
        return None;
    }
    Some(Rect::new(a.min.max(b.min), a.max.min(b.max)))
}

/// Check the player against one obstacle
pub fn player_obstacle_collision(player: &Player, obstacle: &Obstacle) -> Option<CollisionResult> {
    if !obstacle.alive {
        return None;
    }
    intersection(&player.bounds(), &obstacle.bounds()).map(|overlap| CollisionResult {
        obstacle_id: obstacle.id,
        overlap,
    })
}

/// First obstacle (lowest id) overlapping the player
pub fn first_collision<'a>(
    player: &Player,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
) -> Option<CollisionResult> {
    obstacles
        .into_iter()
        .filter_map(|o| player_obstacle_collision(player, o))
        .min_by_key(|hit| hit.obstacle_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn grounded_player() -> Player {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.body.pos = Vec2::new(100.0, 400.0);
        player
    }

    fn obstacle_at(id: u32, x: f32) -> Obstacle {
        let mut o = Obstacle::new(id, &Tuning::default());
        o.body.pos.x = x;
        o
    }

    #[test]
    fn test_intersection_area() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::splat(6.0), Vec2::splat(20.0));
        let hit = intersection(&a, &b).expect("overlap");
        assert_eq!(hit.min, Vec2::splat(6.0));
        assert_eq!(hit.max, Vec2::splat(10.0));
    }

    #[test]
    fn test_player_hits_obstacle_in_lane() {
        let player = grounded_player();
        // Player spans x 68..132, obstacle at 150 spans 130..170
        let hit = player_obstacle_collision(&player, &obstacle_at(1, 150.0));
        assert!(hit.is_some());
        // Obstacle at 152 spans 132..172: touching only
        assert!(player_obstacle_collision(&player, &obstacle_at(2, 152.0)).is_none());
    }

    #[test]
    fn test_jumping_player_clears_obstacle() {
        let mut player = grounded_player();
        player.body.pos.y = 320.0; // feet above obstacle top (330)
        assert!(player_obstacle_collision(&player, &obstacle_at(1, 100.0)).is_none());
    }

    #[test]
    fn test_dead_obstacle_ignored() {
        let player = grounded_player();
        let mut o = obstacle_at(1, 100.0);
        o.alive = false;
        assert!(player_obstacle_collision(&player, &o).is_none());
    }

    #[test]
    fn test_first_collision_picks_lowest_id() {
        let player = grounded_player();
        let obstacles = vec![obstacle_at(7, 110.0), obstacle_at(3, 90.0), obstacle_at(9, 600.0)];
        let hit = first_collision(&player, &obstacles).expect("hit");
        assert_eq!(hit.obstacle_id, 3);
    }
}
