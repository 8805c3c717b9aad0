use glam::Vec3;

use super::fsm::Hook;
use super::*;
use crate::state::Tick;
use crate::testing::{FakeWorld, directing_tree, simple_tree};

fn spawn(class: AgentClass, state: AgentState) -> Agent {
    spawn_with(class, state, simple_tree())
}

fn spawn_with(class: AgentClass, state: AgentState, tree: SquadTree) -> Agent {
    let spec = AgentSpec::new("Alpha", class).starting_in(state);
    let mut agent = Agent::new(AgentId(1), spec, &AgentTuning::default(), tree);
    agent.take_events();
    agent
}

fn clock(tick: u64) -> Clock {
    Clock {
        tick: Tick(tick),
        now: tick as f32 * 0.1,
        delta: 0.1,
    }
}

fn tick_at(agent: &mut Agent, world: &FakeWorld, tick: u64) {
    let ctx = TickContext {
        env: world.env(),
        clock: clock(tick),
        seed: 42,
        team: TeamView::default(),
    };
    agent.tick(&ctx);
}

fn transitions(events: &[SquadEvent]) -> Vec<(AgentState, AgentState)> {
    events
        .iter()
        .filter_map(|e| match e {
            SquadEvent::StateChanged { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .collect()
}

#[test]
fn self_transition_runs_no_hooks() {
    let mut agent = spawn(AgentClass::Assault, AgentState::Cover);
    let world = FakeWorld::default();
    tick_at(&mut agent, &world, 0);
    agent.take_events();

    agent.clear_hooks();

    assert!(!agent.change_state(AgentState::Cover, 1.0));
    assert!(agent.is_providing_cover());
    assert!(agent.take_events().is_empty());
    assert_eq!(agent.hook_count(Hook::Enter, AgentState::Cover), 0);
    assert_eq!(agent.hook_count(Hook::Exit, AgentState::Cover), 0);

    // Enter(Cover) did not rerun, so cover is not searched again.
    tick_at(&mut agent, &world, 1);
    assert_eq!(world.stop_requests(), 1);
}

#[test]
fn death_in_combat_is_final() {
    let mut agent = spawn(AgentClass::Assault, AgentState::Idle);
    agent.change_state(AgentState::Combat, 0.0);
    agent.take_events();

    assert!(agent.take_damage(10_000.0, 1.0));
    let events = agent.take_events();
    assert_eq!(transitions(&events), vec![(AgentState::Combat, AgentState::Dead)]);
    let deaths = events
        .iter()
        .filter(|e| matches!(e, SquadEvent::AgentDied { .. }))
        .count();
    assert_eq!(deaths, 1);
    assert_eq!(agent.state(), AgentState::Dead);
    assert_eq!(agent.health(), 0.0);
    assert!(!agent.in_combat());

    let world = FakeWorld::default().with_hostile(7, Vec3::new(0.0, 0.0, 3.0));
    for tick in 0..5 {
        tick_at(&mut agent, &world, tick);
    }
    assert!(!agent.take_damage(5.0, 2.0));
    assert!(!agent.change_state(AgentState::Idle, 2.0));
    assert_eq!(agent.receive_command("Follow", 2.0), Err(CommandError::AgentDown));
    assert!(agent.take_events().is_empty());
    assert_eq!(world.destination_requests(), 0);
}

#[test]
fn provide_cover_preempts_ability_and_tree() {
    let mut agent = spawn_with(
        AgentClass::Hacker,
        AgentState::Ability,
        directing_tree(Directive::Patrol),
    );
    let world = FakeWorld::default();
    // Directive is applied before the state tick, so run the hack directly.
    agent.run_pending_ability(0.0);
    assert_eq!(agent.effects().count(EffectKind::SystemHack), 1);
    agent.take_events();
    agent.clear_hooks();

    let command = agent.receive_command("Provide Cover", 0.1);
    assert_eq!(command, Ok(Command::ProvideCover));
    assert_eq!(agent.hook_count(Hook::Exit, AgentState::Ability), 1);
    assert_eq!(agent.hook_count(Hook::Enter, AgentState::Cover), 1);
    assert_eq!(agent.hook_count(Hook::Enter, AgentState::Ability), 0);
    let events = agent.take_events();
    assert_eq!(transitions(&events), vec![(AgentState::Ability, AgentState::Cover)]);
    assert!(events.contains(&SquadEvent::EffectEnded {
        agent: AgentId(1),
        effect: EffectKind::SystemHack,
        expired: false,
    }));
    assert!(!events.contains(&SquadEvent::HackCompleted { agent: AgentId(1) }));
    assert!(agent.is_providing_cover());

    // The tree still recommends Patrol, but the command wins this tick.
    tick_at(&mut agent, &world, 2);
    assert_eq!(agent.state(), AgentState::Cover);

    tick_at(&mut agent, &world, 3);
    assert_eq!(agent.state(), AgentState::Patrol);
    assert!(!agent.is_providing_cover());
}

#[test]
fn unrecognized_command_leaves_state_unchanged() {
    let mut agent = spawn(AgentClass::Medic, AgentState::Patrol);
    let result = agent.receive_command("Dance", 0.0);
    assert!(matches!(result, Err(CommandError::Unrecognized { .. })));
    assert_eq!(agent.state(), AgentState::Patrol);
    assert_eq!(
        agent.take_events(),
        vec![SquadEvent::UnrecognizedCommand {
            agent: Some(AgentId(1)),
            command: "Dance".into(),
        }]
    );
}

#[test]
fn hold_position_stops_and_stays_idle() {
    let mut agent = spawn(AgentClass::Assault, AgentState::Follow);
    let world = FakeWorld::default();
    agent.receive_command("Hold Position", 0.0).unwrap();
    assert_eq!(agent.state(), AgentState::Idle);
    assert!(!agent.follows_team());

    tick_at(&mut agent, &world, 1);
    tick_at(&mut agent, &world, 2);
    assert_eq!(world.stop_requests(), 1);
    assert_eq!(agent.state(), AgentState::Idle);

    agent.receive_command("Follow", 0.3).unwrap();
    assert_eq!(agent.state(), AgentState::Follow);
    assert!(agent.follows_team());
}

#[test]
fn idle_agent_engages_visible_hostile() {
    let mut agent = spawn(AgentClass::Assault, AgentState::Idle);
    let mut world = FakeWorld::default().with_hostile(7, Vec3::new(0.0, 0.0, 5.0));

    tick_at(&mut agent, &world, 0);
    assert_eq!(agent.state(), AgentState::Combat);
    assert_eq!(agent.target(), Some(TargetId(7)));
    assert!(agent.in_combat());

    tick_at(&mut agent, &world, 1);
    assert_eq!(agent.ammo().current, 29);
    assert!(agent.take_events().contains(&SquadEvent::AttackRequested {
        agent: AgentId(1),
        target: TargetId(7),
    }));

    world.hostiles.clear();
    tick_at(&mut agent, &world, 2);
    assert_eq!(agent.target(), None);
    assert_eq!(agent.state(), AgentState::Follow);
}

#[test]
fn out_of_range_target_is_pursued() {
    let mut agent = spawn(AgentClass::Assault, AgentState::Combat);
    let world = FakeWorld::default().with_hostile(3, Vec3::new(0.0, 0.0, 14.0));

    tick_at(&mut agent, &world, 0);
    assert_eq!(agent.ammo().current, 30);
    assert_eq!(agent.destination(), Some(Vec3::new(0.0, 0.0, 14.0)));
    assert!(agent.is_moving());
}

#[test]
fn repeated_combat_entry_runs_no_hooks() {
    let mut agent = spawn(AgentClass::Assault, AgentState::Combat);
    agent.clear_hooks();

    assert!(!agent.change_state(AgentState::Combat, 1.0));
    assert_eq!(agent.hook_count(Hook::Enter, AgentState::Combat), 0);
    assert_eq!(agent.hook_count(Hook::Exit, AgentState::Combat), 0);

    assert!(agent.change_state(AgentState::Follow, 1.0));
    assert_eq!(agent.hook_count(Hook::Exit, AgentState::Combat), 1);
    assert_eq!(agent.hook_count(Hook::Enter, AgentState::Follow), 1);
}

#[test]
fn hidden_target_search_ends_at_last_known_position() {
    let mut agent = spawn(AgentClass::Assault, AgentState::Combat);
    let mut world = FakeWorld::default().with_hostile(3, Vec3::new(0.0, 0.0, 0.5));

    tick_at(&mut agent, &world, 0);
    assert_eq!(agent.target(), Some(TargetId(3)));

    // Still out there, but no longer visible from where it was last seen.
    world.line_of_sight = false;
    tick_at(&mut agent, &world, 1);
    assert_eq!(agent.target(), Some(TargetId(3)));
    assert_eq!(agent.state(), AgentState::Follow);

    tick_at(&mut agent, &world, 2);
    assert_eq!(agent.state(), AgentState::Follow);
}

#[test]
fn combat_cooldown_clears_after_ten_seconds() {
    let mut agent = spawn(AgentClass::Assault, AgentState::Idle);
    let world = FakeWorld::default();
    agent.take_damage(10.0, 0.0);
    assert!(agent.in_combat());

    tick_at(&mut agent, &world, 50);
    assert!(agent.in_combat());

    tick_at(&mut agent, &world, 100);
    assert!(!agent.in_combat());
    assert!(agent.take_events().contains(&SquadEvent::CombatEnded { agent: AgentId(1) }));
}

#[test]
fn unreachable_patrol_point_keeps_state() {
    let mut agent = spawn(AgentClass::Sniper, AgentState::Patrol);
    let world = FakeWorld::default().with_unreachable();
    tick_at(&mut agent, &world, 0);
    assert_eq!(agent.state(), AgentState::Patrol);
    assert!(!agent.is_moving());

    // A fresh point is tried on the next tick.
    tick_at(&mut agent, &world, 1);
    assert_eq!(world.destination_requests(), 2);
}

#[test]
fn tree_directives_drive_transitions() {
    let mut agent = spawn_with(
        AgentClass::Medic,
        AgentState::Patrol,
        directing_tree(Directive::FollowTeam),
    );
    let world = FakeWorld::default();
    tick_at(&mut agent, &world, 0);
    assert_eq!(agent.state(), AgentState::Follow);
    assert_eq!(agent.current_action(), "Requested");

    let mut worker = spawn_with(
        AgentClass::Medic,
        AgentState::Idle,
        directing_tree(Directive::AdvanceObjective),
    );
    tick_at(&mut worker, &world, 0);
    tick_at(&mut worker, &world, 1);
    assert_eq!(worker.objective_progress(), 2);
}

#[test]
fn adrenaline_rush_is_not_doubled() {
    let mut agent = spawn(AgentClass::Assault, AgentState::Idle);
    assert_eq!(agent.use_ability(0.0), Ok(AbilityKind::AdrenalineRush));
    assert_eq!(
        agent.use_ability(1.0),
        Err(AbilityError::AlreadyActive {
            ability: AbilityKind::AdrenalineRush
        })
    );
    assert!((agent.stats().move_speed - 7.5).abs() < 1e-6);

    let world = FakeWorld::default();
    tick_at(&mut agent, &world, 150);
    assert!(!agent.effects().has(EffectKind::AdrenalineRush));
    assert!((agent.stats().move_speed - 5.0).abs() < 1e-6);
}

#[test]
fn sniper_mode_toggles() {
    let mut agent = spawn(AgentClass::Sniper, AgentState::Idle);
    agent.use_ability(0.0).unwrap();
    assert!(agent.effects().has(EffectKind::SniperMode));
    agent.use_ability(1.0).unwrap();
    assert!(!agent.effects().has(EffectKind::SniperMode));
}

#[test]
fn explosives_run_out_and_detonate() {
    let mut agent = spawn(AgentClass::Demolitions, AgentState::Idle);
    for _ in 0..5 {
        agent.use_ability(0.0).unwrap();
    }
    assert_eq!(agent.kit().explosives_left(), 0);
    assert_eq!(
        agent.use_ability(0.0),
        Err(AbilityError::Exhausted {
            ability: AbilityKind::ExplosiveCharge
        })
    );
    assert_eq!(agent.kit().armed_charges().len(), 5);
    let placed = agent.kit().armed_charges()[0].position;
    assert_eq!(placed, Vec3::new(0.0, 0.0, 2.0));
    agent.take_events();

    let world = FakeWorld::default();
    tick_at(&mut agent, &world, 50);
    let detonations = agent
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, SquadEvent::ChargeDetonated { damage, .. } if *damage == 150.0))
        .count();
    assert_eq!(detonations, 5);
    assert!(agent.kit().armed_charges().is_empty());
}

#[test]
fn death_abandons_charges_and_effects() {
    let mut agent = spawn(AgentClass::Demolitions, AgentState::Idle);
    agent.use_ability(0.0).unwrap();
    agent.apply_effect(TimedEffect::timed(EffectKind::TeamBoost, 0.0, 10.0));
    agent.take_damage(10_000.0, 1.0);

    assert!(agent.kit().armed_charges().is_empty());
    assert!(agent.effects().is_empty());
    let world = FakeWorld::default();
    tick_at(&mut agent, &world, 60);
    assert!(
        !agent
            .take_events()
            .iter()
            .any(|e| matches!(e, SquadEvent::ChargeDetonated { .. }))
    );
}

#[test]
fn hacks_are_capped_and_complete_in_ability_state() {
    let mut agent = spawn(AgentClass::Hacker, AgentState::Idle);
    for _ in 0..3 {
        agent.use_ability(0.0).unwrap();
    }
    assert_eq!(
        agent.use_ability(0.0),
        Err(AbilityError::AtCapacity {
            ability: AbilityKind::SystemOverride,
            max: 3
        })
    );

    let mut hacker = spawn(AgentClass::Hacker, AgentState::Idle);
    let world = FakeWorld::default();
    hacker.change_state(AgentState::Ability, 0.0);
    tick_at(&mut hacker, &world, 0);
    assert_eq!(hacker.effects().count(EffectKind::SystemHack), 1);

    tick_at(&mut hacker, &world, 20);
    assert!(hacker.take_events().contains(&SquadEvent::HackCompleted { agent: AgentId(1) }));
    assert_eq!(hacker.state(), AgentState::Ability);

    tick_at(&mut hacker, &world, 21);
    assert_eq!(hacker.state(), AgentState::Follow);
}

#[test]
fn tactical_command_is_deferred() {
    let mut leader = spawn(AgentClass::Leader, AgentState::Idle);
    leader.use_ability(0.0).unwrap();
    assert_eq!(
        leader.take_deferred(),
        vec![DeferredEffect::TeamBoost {
            source: AgentId(1)
        }]
    );
    assert!(leader.take_deferred().is_empty());
    assert!(!leader.effects().has(EffectKind::TeamBoost));
}

#[test]
fn level_up_raises_max_health() {
    let mut agent = spawn(AgentClass::Medic, AgentState::Idle);
    agent.take_damage(30.0, 0.0);
    agent.level_up();
    assert_eq!(agent.level(), 2);
    assert_eq!(agent.max_health(), 120.0);
    assert_eq!(agent.health(), 90.0);
    assert_eq!(agent.heal(100.0), 30.0);
}
