//! Combat resolution
//!
//! Hit rules translate raw overlaps into domain effects. The table below is
//! the only place deciding who reacts to whom; a partner carrying none of the
//! listed tags is ignored.

use super::entity::{EntityKind, Tags};
use super::event::{GameEvent, Reaction};
use super::scene::Scene;

/// React with `reaction` when hit by a partner tagged `partner`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRule {
    pub partner: Tags,
    pub reaction: Reaction,
}

const PLAYER_BULLET_RULES: &[HitRule] = &[HitRule {
    partner: Tags::ENEMY,
    reaction: Reaction::DestroySelf,
}];

const FIGHTER_RULES: &[HitRule] = &[HitRule {
    partner: Tags::ENEMY_BULLET,
    reaction: Reaction::DestroySelf,
}];

const ENEMY_RULES: &[HitRule] = &[HitRule {
    partner: Tags::PLAYER_BULLET,
    reaction: Reaction::TakeDamage(1),
}];

/// Hit rules installed on every entity of `kind`
pub fn hit_rules(kind: EntityKind) -> &'static [HitRule] {
    match kind {
        EntityKind::PlayerBullet => PLAYER_BULLET_RULES,
        EntityKind::Fighter => FIGHTER_RULES,
        EntityKind::Enemy => ENEMY_RULES,
        EntityKind::EnemyBullet
        | EntityKind::FireworksBullet
        | EntityKind::HpGauge
        | EntityKind::Label => &[],
    }
}

/// Raise `hit` on both partners of every overlapping live pair
///
/// Pairs are visited in creation order (i < j). Entities destroyed by an
/// earlier pair are skipped for the rest of the pass.
pub fn resolve_collisions(scene: &mut Scene) {
    let count = scene.entities.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let (a, b) = (&scene.entities[i], &scene.entities[j]);
            if !a.is_alive() || !b.is_alive() {
                continue;
            }
            let (rect_a, rect_b) = (a.hit_rect(), b.hit_rect());
            if rect_a.is_empty() || rect_b.is_empty() || !rect_a.intersects(&rect_b) {
                continue;
            }

            let (a_id, a_tags) = (a.id(), a.tags());
            let (b_id, b_tags) = (b.id(), b.tags());
            scene.emit(
                a_id,
                GameEvent::Hit {
                    partner: b_id,
                    partner_tags: b_tags,
                },
            );
            scene.emit(
                b_id,
                GameEvent::Hit {
                    partner: a_id,
                    partner_tags: a_tags,
                },
            );
        }
    }
}
