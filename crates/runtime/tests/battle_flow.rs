//! End-to-end battle flow tests.
//!
//! These run with paused tokio time (`start_paused`), so loading delays
//! elapse deterministically: the clock only advances when every task is
//! parked on a timer.

use std::time::Duration;

use battle_core::{
    Action, ActionCatalog, Attributes, Battle, BattlePhase, Combatant, CombatantId, DamageKind,
    EngineError,
};
use runtime::{BattleEvent, BattleRuntime, RuntimeError, ScriptedProvider};

fn attributes(strength: u32, constitution: u32, magic_power: u32, spirit: u32) -> Attributes {
    Attributes {
        strength,
        constitution,
        magic_power,
        spirit,
    }
}

fn action(
    name: &str,
    origin: CombatantId,
    cost: u32,
    damage: u32,
    loading_secs: u64,
) -> Action {
    Action {
        name: name.into(),
        kind: DamageKind::Physical,
        cost,
        damage,
        loading_secs,
        origin,
        target: origin.other(),
    }
}

/// Hero with 20 energy and strength 10 against a constitution-100 wall:
/// the setup from the canonical single-action scenario.
fn scenario_battle() -> (Battle, ActionCatalog) {
    let hero = Combatant::new(CombatantId::Hero, "Hero", 100, 20, attributes(10, 10, 10, 10));
    let opponent = Combatant::new(
        CombatantId::Opponent,
        "Monster",
        400,
        100,
        attributes(10, 100, 10, 100),
    );
    let catalog = ActionCatalog::new(vec![action(
        "Heavy Blow",
        CombatantId::Hero,
        5,
        50,
        5,
    )]);
    (Battle::new(hero, opponent), catalog)
}

#[tokio::test(start_paused = true)]
async fn single_action_resolves_after_its_loading_delay() {
    let (battle, catalog) = scenario_battle();
    let runtime = BattleRuntime::builder()
        .battle(battle)
        .catalog(catalog)
        .build()
        .await
        .expect("runtime should start");
    let handle = runtime.handle();
    let mut events = handle.subscribe_events();

    let started = tokio::time::Instant::now();
    handle
        .request_action(CombatantId::Hero, "Heavy Blow")
        .await
        .expect("request should succeed");

    // Queued immediately: cost charged up front, head timing.
    let queued = events.recv().await.expect("queued event");
    let snapshot = queued.snapshot();
    assert_eq!(snapshot.hero.energy, 15);
    assert_eq!(snapshot.hero.queue.len(), 1);
    assert!(snapshot.hero.in_flight);
    assert_eq!(snapshot.opponent.health, 400);

    // Resolution only lands after the 5s loading delay.
    let resolved = events.recv().await.expect("resolution event");
    assert!(started.elapsed() >= Duration::from_secs(5));
    match resolved {
        BattleEvent::ActionResolved {
            action,
            damage,
            snapshot,
        } => {
            assert_eq!(action.name, "Heavy Blow");
            // floor(50 * strength 10 / constitution 100) = 5
            assert_eq!(damage, 5);
            assert_eq!(snapshot.opponent.health, 395);
            assert_eq!(snapshot.hero.energy, 15);
            assert!(snapshot.hero.queue.is_empty());
            assert!(!snapshot.hero.in_flight);
        }
        other => panic!("expected ActionResolved, got {other:?}"),
    }

    drop(events);
    drop(handle);
    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test(start_paused = true)]
async fn second_action_waits_and_only_non_head_entries_are_withdrawable() {
    let runtime = BattleRuntime::builder().build().await.unwrap();
    let handle = runtime.handle();

    // Two back-to-back affordable requests: 20 - 5 - 5 = 10 energy left.
    handle
        .request_action(CombatantId::Hero, "H2O")
        .await
        .unwrap();
    handle
        .request_action(CombatantId::Hero, "H2O")
        .await
        .unwrap();

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.hero.energy, 10);
    assert_eq!(snapshot.hero.queue.len(), 2);
    assert!(snapshot.hero.in_flight, "only the head is timing");

    // The head is irrevocable.
    let err = handle
        .withdraw_action(CombatantId::Hero, 0)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Engine(EngineError::InvalidWithdrawal { index: 0, .. })
    ));

    // The queued second entry withdraws and refunds in full.
    handle.withdraw_action(CombatantId::Hero, 1).await.unwrap();
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.hero.energy, 15);
    assert_eq!(snapshot.hero.queue.len(), 1);
    assert!(snapshot.hero.in_flight, "head timer untouched by withdrawal");

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn unaffordable_request_changes_nothing() {
    let runtime = BattleRuntime::builder().build().await.unwrap();
    let handle = runtime.handle();

    // Four casts drain the hero's 20 energy exactly.
    for _ in 0..4 {
        handle
            .request_action(CombatantId::Hero, "H2O")
            .await
            .unwrap();
    }

    let err = handle
        .request_action(CombatantId::Hero, "H2O")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Engine(EngineError::InsufficientResources {
            required: 5,
            available: 0
        })
    ));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.hero.energy, 0);
    assert_eq!(snapshot.hero.queue.len(), 4);
    assert!(snapshot.hero.in_flight);

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn lethal_resolution_concludes_and_rejects_further_requests() {
    let runtime = BattleRuntime::builder().build().await.unwrap();
    let handle = runtime.handle();
    let mut events = handle.subscribe_events();

    // H2O deals 50 * magic 10 / spirit 5 = 100; four casts fell the
    // 400 HP dragon.
    for _ in 0..4 {
        handle
            .request_action(CombatantId::Hero, "H2O")
            .await
            .unwrap();
    }

    let victor = loop {
        match events.recv().await.expect("event stream open") {
            BattleEvent::BattleConcluded { victor, snapshot } => {
                assert_eq!(snapshot.opponent.health, 0);
                assert_eq!(snapshot.phase, BattlePhase::Concluded { victor });
                break victor;
            }
            _ => continue,
        }
    };
    assert_eq!(victor, Some(CombatantId::Hero));

    // Both sides are now rejected.
    for (side, name) in [(CombatantId::Hero, "Kick"), (CombatantId::Opponent, "Claw")] {
        let err = handle.request_action(side, name).await.unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Engine(EngineError::BattleConcluded)
        ));
    }

    drop(events);
    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn resolution_order_is_fifo_per_combatant_and_wall_clock_across() {
    // Harmless damage so four resolutions land without a conclusion.
    let hero = Combatant::new(CombatantId::Hero, "Hero", 1000, 50, attributes(1, 100, 1, 100));
    let opponent = Combatant::new(
        CombatantId::Opponent,
        "Rival",
        1000,
        50,
        attributes(1, 100, 1, 100),
    );
    let catalog = ActionCatalog::new(vec![
        action("Jab", CombatantId::Hero, 1, 1, 2),
        action("Slam", CombatantId::Hero, 1, 1, 5),
        action("Bite", CombatantId::Opponent, 1, 1, 3),
        action("Peck", CombatantId::Opponent, 1, 1, 1),
    ]);
    let runtime = BattleRuntime::builder()
        .battle(Battle::new(hero, opponent))
        .catalog(catalog)
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut events = handle.subscribe_events();

    // Hero queues Jab (2s) then Slam (5s): resolves at t=2 and t=7.
    // Opponent queues Bite (3s) then Peck (1s): resolves at t=3 and t=4.
    handle.request_action(CombatantId::Hero, "Jab").await.unwrap();
    handle.request_action(CombatantId::Hero, "Slam").await.unwrap();
    handle.request_action(CombatantId::Opponent, "Bite").await.unwrap();
    handle.request_action(CombatantId::Opponent, "Peck").await.unwrap();

    let mut resolved = Vec::new();
    while resolved.len() < 4 {
        if let BattleEvent::ActionResolved { action, .. } =
            events.recv().await.expect("event stream open")
        {
            resolved.push(action.name);
        }
    }

    // Wall-clock interleaving across combatants, FIFO within each.
    assert_eq!(resolved, ["Jab", "Bite", "Peck", "Slam"]);

    drop(events);
    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn scripted_provider_drives_the_opponent_through_the_same_contract() {
    let mut runtime = BattleRuntime::builder().build().await.unwrap();
    runtime.set_opponent_provider(ScriptedProvider::new(["Claw"]));
    let handle = runtime.handle();

    assert!(runtime.drive(CombatantId::Opponent).await.unwrap());
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.opponent.queue.len(), 1);
    assert_eq!(snapshot.opponent.queue[0].name, "Claw");

    // Script exhausted: the policy idles.
    assert!(!runtime.drive(CombatantId::Opponent).await.unwrap());

    // No provider was configured for the hero.
    let err = runtime.drive(CombatantId::Hero).await.unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::ProviderNotSet {
            combatant: CombatantId::Hero
        }
    ));

    drop(handle);
    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_outstanding_timers() {
    let runtime = BattleRuntime::builder().build().await.unwrap();
    let handle = runtime.handle();

    // Fire breath loads for 8s; tear down well before it resolves.
    handle
        .request_action(CombatantId::Opponent, "Fire breath")
        .await
        .unwrap();

    drop(handle);
    runtime.shutdown().await.expect("worker joins cleanly");
}
