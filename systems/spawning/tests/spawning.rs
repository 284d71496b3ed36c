use chaser_core::{Layout, Position, Rules};
use chaser_system_spawning::Spawning;
use chaser_world::{query, World};
use glam::{DVec2, IVec2};

#[test]
fn player_starts_at_world_center() {
    let continuous = Spawning::new(1).layout(&Rules::continuous());
    let discrete = Spawning::new(1).layout(&Rules::discrete());

    assert_eq!(
        continuous.player,
        Position::Continuous(DVec2::new(320.0, 240.0))
    );
    assert_eq!(discrete.player, Position::Grid(IVec2::new(320, 240)));
}

#[test]
fn discrete_npcs_line_up_on_the_diagonal() {
    let layout = Spawning::new(7).layout(&Rules::discrete());

    assert_eq!(
        layout.npcs,
        vec![
            Position::Grid(IVec2::new(160, 120)),
            Position::Grid(IVec2::new(176, 136)),
            Position::Grid(IVec2::new(192, 152)),
            Position::Grid(IVec2::new(208, 168)),
        ]
    );
}

#[test]
fn discrete_layout_ignores_the_seed() {
    let first = Spawning::new(1).layout(&Rules::discrete());
    let second = Spawning::new(2).layout(&Rules::discrete());

    assert_eq!(first, second);
}

#[test]
fn continuous_layout_is_reproducible_per_seed() {
    let rules = Rules::continuous();
    let first = Spawning::new(0xC0FFEE).layout(&rules);
    let second = Spawning::new(0xC0FFEE).layout(&rules);

    assert_eq!(first, second);
    assert_eq!(first.npcs.len(), 5);
}

#[test]
fn continuous_layout_honours_npc_count() {
    let mut rules = Rules::continuous();
    rules.npc_count = 12;

    let layout = Spawning::new(3).layout(&rules);

    assert_eq!(layout.npcs.len(), 12);
}

#[test]
fn spawned_world_keeps_every_npc_inside_bounds() {
    let rules = Rules::continuous();
    let layout: Layout = Spawning::new(42).layout(&rules);
    let world = World::new(rules, layout).expect("preset rules are valid");

    for snapshot in query::npc_view(&world).iter() {
        let position = snapshot.position.as_dvec2();
        assert!(position.x >= 0.0 && position.x <= 608.0);
        assert!(position.y >= 0.0 && position.y <= 448.0);
    }
}
