#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collision system that checks the player against every NPC once per tick.

use chaser_core::{CollisionRule, Command, Event, NpcId, NpcView, Position};

/// Pure system reporting every NPC that touches the player.
#[derive(Debug, Default)]
pub struct CollisionDetector;

impl CollisionDetector {
    /// Consumes world events and the current positions to emit collision reports.
    ///
    /// The check runs once for every batch containing a `TimeAdvanced` event,
    /// independent of whether NPCs moved during that tick. Reports are emitted
    /// in NPC identifier order.
    pub fn handle(
        &mut self,
        events: &[Event],
        rule: CollisionRule,
        size: f64,
        player: Position,
        npcs: &NpcView,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        out.extend(
            colliding_npcs(rule, size, player, npcs).map(|npc| Command::ReportCollision { npc }),
        );
    }
}

/// Identifiers of every NPC overlapping the player under `rule`.
pub fn colliding_npcs<'a>(
    rule: CollisionRule,
    size: f64,
    player: Position,
    npcs: &'a NpcView,
) -> impl Iterator<Item = NpcId> + 'a {
    let player = player.as_dvec2();
    npcs.iter()
        .filter(move |snapshot| rule.collides(player, snapshot.position.as_dvec2(), size))
        .map(|snapshot| snapshot.id)
}
