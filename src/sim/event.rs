//! Per-entity event bus
//!
//! Each entity owns an ordered list of subscriptions. Emitting an event on an
//! entity runs the reactions of every matching subscription, in subscription
//! order, before the emitter continues. Reactions are plain data; the scene
//! interprets them (see `Scene::emit`).

use super::entity::{EntityId, Tags};

/// Event names an entity can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The entity overlapped another entity this tick
    Hit,
    /// The entity's hit points decreased
    ChangeHp,
    /// The entity left the simulation
    Destroy,
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Hit => "hit",
            EventKind::ChangeHp => "changehp",
            EventKind::Destroy => "destroy",
        }
    }
}

/// An emitted event with its payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Hit {
        partner: EntityId,
        partner_tags: Tags,
    },
    ChangeHp {
        current_hp: i32,
        max_hp: i32,
    },
    Destroy,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::Hit { .. } => EventKind::Hit,
            GameEvent::ChangeHp { .. } => EventKind::ChangeHp,
            GameEvent::Destroy => EventKind::Destroy,
        }
    }
}

/// Signals delivered to the match controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSignal {
    PlayerDown,
    EnemyDefeated,
}

/// What a subscription does when its event fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// Destroy the entity that owns the subscription
    DestroySelf,
    /// Lose hit points, then emit `changehp` if they actually dropped
    TakeDamage(i32),
    /// Resize the given HP gauge from a `changehp` payload
    ResizeGauge(EntityId),
    /// Forward to the match controller
    Signal(MatchSignal),
}

/// One (event, filter, reaction) binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub kind: EventKind,
    /// For `hit`: the partner must carry all of these tags
    pub partner_filter: Option<Tags>,
    pub reaction: Reaction,
}

impl Subscription {
    /// Unfiltered subscription
    pub fn on(kind: EventKind, reaction: Reaction) -> Self {
        Self {
            kind,
            partner_filter: None,
            reaction,
        }
    }

    /// `hit` subscription that only fires for partners tagged `partner`
    pub fn on_hit_by(partner: Tags, reaction: Reaction) -> Self {
        Self {
            kind: EventKind::Hit,
            partner_filter: Some(partner),
            reaction,
        }
    }

    pub fn matches(&self, event: &GameEvent) -> bool {
        if self.kind != event.kind() {
            return false;
        }
        match (self.partner_filter, event) {
            (None, _) => true,
            (Some(filter), GameEvent::Hit { partner_tags, .. }) => {
                !filter.is_empty() && partner_tags.contains(filter)
            }
            (Some(_), _) => false,
        }
    }
}

/// Ordered subscription list owned by one entity
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Reactions triggered by `event`, in subscription order
    pub fn reactions_for(&self, event: &GameEvent) -> Vec<Reaction> {
        self.subscriptions
            .iter()
            .filter(|s| s.matches(event))
            .map(|s| s.reaction)
            .collect()
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
