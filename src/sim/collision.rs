//! Collision response: reflection and de-penetration
//!
//! Reflection fixes velocities, `uncollide` fixes positions. Both visit bodies in
//! `BAT_ORDER` so the outcome of simultaneous contacts never depends on anything
//! but the state itself.

use glam::Vec2;

use super::board::Board;
use super::shape::{direction_or_fallback, penetration};
use super::state::{Bat, Collider, Puck, collision_point, does_collide};
use crate::Settings;

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Bounce the puck off a bat
///
/// Only the part of the puck's velocity heading into the bat is mirrored, then
/// `push` times the bat's own speed along the contact normal is added on top.
/// Nothing happens unless the two overlap and are closing. Returns whether the
/// puck was deflected.
pub fn reflect_off_bat(puck: &mut Puck, bat: &Bat, push: f32) -> bool {
    if !does_collide(bat, puck) {
        return false;
    }

    let normal = direction_or_fallback(bat.body.pos, collision_point(bat, puck));
    let puck_vel = puck.body.velocity();
    let bat_vel = bat.body.velocity();
    if (puck_vel - bat_vel).dot(normal) >= 0.0 {
        return false;
    }

    let mut vel = puck_vel;
    if vel.dot(normal) < 0.0 {
        vel = reflect_velocity(vel, normal);
    }
    vel += normal * push * bat_vel.dot(normal).max(0.0);
    puck.body.set_velocity(vel);
    true
}

/// Bounce the puck off the table walls
///
/// The side walls have a gap at each goal mouth. Only velocity components that
/// still point into a wall are flipped.
pub fn reflect_off_board(puck: &mut Puck, board: &Board) -> bool {
    let pos = puck.body.pos;
    let r = puck.radius();
    let mut vel = puck.body.velocity();
    let mut hit = false;

    if (pos.y - r < board.top() && vel.y < 0.0) || (pos.y + r > board.bottom() && vel.y > 0.0) {
        vel.y = -vel.y;
        hit = true;
    }

    if !board.in_goal_mouth(pos.y)
        && ((pos.x - r < board.left() && vel.x < 0.0) || (pos.x + r > board.right() && vel.x > 0.0))
    {
        vel.x = -vel.x;
        hit = true;
    }

    if hit {
        puck.body.set_velocity(vel);
    }
    hit
}

/// One de-penetration pass over every body
///
/// Order: bat/bat pairs, then each bat against the puck, then everything back
/// inside the walls. Each overlapping pair is pushed apart to just touching,
/// split by inverse mass. Chains of three or more bodies may keep some overlap;
/// later substeps work it off.
pub fn uncollide(bats: &mut [Bat; 4], puck: &mut Puck, board: &Board, settings: &Settings) {
    for j in 1..bats.len() {
        let (head, tail) = bats.split_at_mut(j);
        let b = &mut tail[0];
        for a in head.iter_mut() {
            if let Some(contact) = penetration(&a.shape(), &b.shape()) {
                let half = contact.normal * contact.depth * 0.5;
                a.body.pos -= half;
                b.body.pos += half;
            }
        }
    }

    let (bat_share, puck_share) = settings.bat_puck_shares();
    for bat in bats.iter_mut() {
        if let Some(contact) = penetration(&bat.shape(), &puck.shape()) {
            let push = contact.normal * contact.depth;
            bat.body.pos -= push * bat_share;
            puck.body.pos += push * puck_share;
        }
    }

    for bat in bats.iter_mut() {
        let r = bat.radius();
        keep_inside(&mut bat.body.pos, r, board, false);
    }
    let r = puck.radius();
    keep_inside(&mut puck.body.pos, r, board, true);
}

/// Clamp a round body inside the field; `through_goals` leaves the side walls
/// open across the goal mouths
fn keep_inside(pos: &mut Vec2, radius: f32, board: &Board, through_goals: bool) {
    pos.y = clamp_span(pos.y, board.top() + radius, board.bottom() - radius);
    if !(through_goals && board.in_goal_mouth(pos.y)) {
        pos.x = clamp_span(pos.x, board.left() + radius, board.right() - radius);
    }
}

/// `clamp` that tolerates a body wider than the span by centering it
#[inline]
fn clamp_span(v: f32, lo: f32, hi: f32) -> f32 {
    if lo > hi { (lo + hi) / 2.0 } else { v.clamp(lo, hi) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::board::{Ally, Color};
    use proptest::prelude::*;

    fn bat_at(pos: Vec2) -> Bat {
        let settings = Settings::default();
        Bat::new(Color::Red, Ally::One, pos, settings.bat_radius, &settings)
    }

    fn puck_at(pos: Vec2, vel: Vec2) -> Puck {
        let mut puck = Puck::new(pos, Settings::default().puck_radius);
        puck.body.set_velocity(vel);
        puck
    }

    #[test]
    fn test_reflect_velocity() {
        // Puck moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    #[test]
    fn test_head_on_bat_hit_flips_x() {
        let bat = bat_at(Vec2::new(500.0, 400.0));
        // Touching from the left, moving right
        let mut puck = puck_at(Vec2::new(436.0, 400.0), Vec2::new(1.0, 0.0));
        assert!(reflect_off_bat(&mut puck, &bat, 0.5));
        assert!((puck.body.velocity().x + 1.0).abs() < 1e-5);
        assert!(puck.body.velocity().y.abs() < 1e-5);
    }

    #[test]
    fn test_separating_puck_is_left_alone() {
        let bat = bat_at(Vec2::new(500.0, 400.0));
        let mut puck = puck_at(Vec2::new(436.0, 400.0), Vec2::new(-0.5, 0.0));
        assert!(!reflect_off_bat(&mut puck, &bat, 0.5));
        assert_eq!(puck.body.velocity(), Vec2::new(-0.5, 0.0));
    }

    #[test]
    fn test_far_puck_is_left_alone() {
        let bat = bat_at(Vec2::new(500.0, 400.0));
        let mut puck = puck_at(Vec2::new(100.0, 400.0), Vec2::new(1.0, 0.0));
        assert!(!reflect_off_bat(&mut puck, &bat, 0.5));
    }

    #[test]
    fn test_moving_bat_pushes_resting_puck() {
        let mut bat = bat_at(Vec2::new(500.0, 400.0));
        bat.body.set_velocity(Vec2::new(0.0, 0.4));
        let mut puck = puck_at(Vec2::new(500.0, 460.0), Vec2::ZERO);
        assert!(reflect_off_bat(&mut puck, &bat, 0.5));
        let v = puck.body.velocity();
        assert!(v.x.abs() < 1e-6);
        assert!((v.y - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_bat_and_puck_stay_finite() {
        let mut bat = bat_at(Vec2::new(500.0, 400.0));
        bat.body.set_velocity(Vec2::new(0.3, 0.0));
        let mut puck = puck_at(Vec2::new(500.0, 400.0), Vec2::new(-0.5, 0.2));
        reflect_off_bat(&mut puck, &bat, 0.5);
        assert!(puck.body.velocity().is_finite());
    }

    #[test]
    fn test_board_top_wall() {
        let board = Board::default();
        let mut puck = puck_at(Vec2::new(300.0, board.top() + 10.0), Vec2::new(0.3, -0.6));
        assert!(reflect_off_board(&mut puck, &board));
        assert_eq!(puck.body.velocity(), Vec2::new(0.3, 0.6));
        // Already heading back in: no second flip
        assert!(!reflect_off_board(&mut puck, &board));
    }

    #[test]
    fn test_board_side_wall_and_goal_mouth() {
        let board = Board::default();
        let (mouth_top, _) = board.goal_mouth();

        let mut beside = puck_at(Vec2::new(board.left() + 5.0, mouth_top - 60.0), Vec2::new(-0.7, 0.0));
        assert!(reflect_off_board(&mut beside, &board));
        assert!(beside.body.velocity().x > 0.0);

        let mut in_mouth = puck_at(Vec2::new(board.left() + 5.0, board.center().y), Vec2::new(-0.7, 0.0));
        assert!(!reflect_off_board(&mut in_mouth, &board));
        assert!(in_mouth.body.velocity().x < 0.0);
    }

    #[test]
    fn test_uncollide_separates_bat_and_puck() {
        let board = Board::default();
        let settings = Settings::default();
        let mut bats = crate::sim::state::Field::new(board.clone(), &settings).bats;
        let bat_pos = bats[0].body.pos;
        let mut puck = puck_at(bat_pos + Vec2::new(-40.0, 0.0), Vec2::ZERO);
        let before = puck.body.pos.distance(bat_pos);

        uncollide(&mut bats, &mut puck, &board, &settings);

        let after = puck.body.pos.distance(bats[0].body.pos);
        assert!(after >= before);
        let touching = bats[0].radius() + puck.radius();
        assert!((after - touching).abs() < 1e-3);
        // Heavier bat moves less
        let bat_moved = bats[0].body.pos.distance(bat_pos);
        assert!(bat_moved < puck.body.pos.distance(bat_pos + Vec2::new(-40.0, 0.0)));
    }

    #[test]
    fn test_uncollide_separates_bats() {
        let board = Board::default();
        let settings = Settings::default();
        let mut bats = crate::sim::state::Field::new(board.clone(), &settings).bats;
        bats[3].body.pos = bats[2].body.pos + Vec2::new(30.0, 10.0);
        let mut puck = puck_at(board.center(), Vec2::ZERO);

        uncollide(&mut bats, &mut puck, &board, &settings);

        let gap = bats[2].body.pos.distance(bats[3].body.pos);
        assert!(gap >= 2.0 * settings.bat_radius - 1e-3);
    }

    #[test]
    fn test_uncollide_keeps_pieces_on_table() {
        let board = Board::default();
        let settings = Settings::default();
        let mut bats = crate::sim::state::Field::new(board.clone(), &settings).bats;
        bats[0].body.pos = Vec2::new(board.right() + 30.0, board.bottom() + 30.0);
        let mut puck = puck_at(Vec2::new(200.0, board.top() - 5.0), Vec2::ZERO);

        uncollide(&mut bats, &mut puck, &board, &settings);

        assert!(bats[0].body.pos.x <= board.right() - bats[0].radius() + 1e-4);
        assert!(bats[0].body.pos.y <= board.bottom() - bats[0].radius() + 1e-4);
        assert!((puck.body.pos.y - (board.top() + puck.radius())).abs() < 1e-4);
    }

    #[test]
    fn test_uncollide_leaves_goal_mouth_open() {
        let board = Board::default();
        let settings = Settings::default();
        let mut bats = crate::sim::state::Field::new(board.clone(), &settings).bats;
        let pos = Vec2::new(board.left() - 10.0, board.center().y);
        let mut puck = puck_at(pos, Vec2::ZERO);

        uncollide(&mut bats, &mut puck, &board, &settings);

        assert_eq!(puck.body.pos, pos);
    }

    #[test]
    fn test_uncollide_bat_puck_bat_chain() {
        let board = Board::default();
        let settings = Settings::default();
        let mut bats = crate::sim::state::Field::new(board.clone(), &settings).bats;
        let mid = board.center();
        // Red ONE and Red TWO squeeze the puck from both sides
        bats[0].body.pos = mid + Vec2::new(50.0, 0.0);
        bats[1].body.pos = mid - Vec2::new(50.0, 0.0);
        let mut puck = puck_at(mid + Vec2::new(0.0, 1.0), Vec2::ZERO);

        uncollide(&mut bats, &mut puck, &board, &settings);

        let touching = bats[0].radius() + puck.radius();
        // Both bats lose ground and the puck comes out off-axis
        assert!(bats[0].body.pos.x > mid.x + 50.0);
        assert!(bats[1].body.pos.x < mid.x - 50.0);
        assert!(puck.body.pos.y > mid.y + 1.0);
        // The last pair resolved is exactly touching
        assert!((puck.body.pos.distance(bats[1].body.pos) - touching).abs() < 1e-3);
        assert!(bats[0].body.pos.distance(bats[1].body.pos) >= 2.0 * bats[0].radius() - 1e-3);
        for bat in &bats {
            assert!(bat.body.pos.is_finite());
        }
        assert!(puck.body.pos.is_finite());
    }

    proptest! {
        #[test]
        fn reflection_off_still_bat_keeps_speed(angle in 0.0f32..std::f32::consts::TAU, speed in 0.05f32..1.0) {
            let bat = bat_at(Vec2::new(500.0, 400.0));
            let dir = Vec2::new(angle.cos(), angle.sin());
            // Puck resting against the bat, heading straight at its center plus a tangential part
            let pos = bat.body.pos + dir * (bat.radius() + 20.0);
            let vel = (-dir + Vec2::new(-dir.y, dir.x) * 0.5).normalize() * speed;
            let mut puck = puck_at(pos, vel);

            prop_assert!(reflect_off_bat(&mut puck, &bat, 0.5));
            prop_assert!((puck.body.velocity().length() - speed).abs() < 1e-4);
            prop_assert!(puck.body.velocity().dot(dir) > 0.0);
        }

        #[test]
        fn uncollide_never_brings_puck_closer(angle in 0.0f32..std::f32::consts::TAU, dist in 0.0f32..80.0) {
            let board = Board::default();
            let settings = Settings::default();
            let mut bats = crate::sim::state::Field::new(board.clone(), &settings).bats;
            let dir = Vec2::new(angle.cos(), angle.sin());
            let mut puck = puck_at(bats[1].body.pos + dir * dist, Vec2::ZERO);
            let before = puck.body.pos.distance(bats[1].body.pos);

            uncollide(&mut bats, &mut puck, &board, &settings);

            let after = puck.body.pos.distance(bats[1].body.pos);
            prop_assert!(after >= before - 1e-4);
            prop_assert!(after >= bats[1].radius() + puck.radius() - 1e-3);
        }
    }
}
