//! High-level runtime orchestrator.
//!
//! The runtime spawns the battle worker, wires up the command and event
//! channels, and exposes a builder-based API for clients to start an
//! engagement.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use battle_core::{ActionCatalog, Battle, CombatantId};
use battle_content::ContentFactory;

use crate::api::{ActionProvider, BattleEvent, BattleHandle, Result, RuntimeError};
use crate::workers::{BattleWorker, Command};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Hero level used when the battle is assembled from embedded content;
    /// the opponent's resource pools scale with it.
    pub opponent_level: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            opponent_level: 1,
        }
    }
}

/// Main runtime that hosts one battle.
///
/// Design: the runtime owns the worker task; [`BattleHandle`] provides a
/// cloneable facade for clients. Action providers are injected per side so
/// human input, scripts, and AI policies all issue requests through the
/// identical contract.
pub struct BattleRuntime {
    handle: BattleHandle,
    hero_provider: Option<Box<dyn ActionProvider>>,
    opponent_provider: Option<Box<dyn ActionProvider>>,
    worker_handle: JoinHandle<()>,
}

impl BattleRuntime {
    /// Create a new runtime builder.
    pub fn builder() -> BattleRuntimeBuilder {
        BattleRuntimeBuilder::new()
    }

    /// Get a cloneable handle to this battle.
    pub fn handle(&self) -> BattleHandle {
        self.handle.clone()
    }

    /// Subscribe to battle events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<BattleEvent> {
        self.handle.subscribe_events()
    }

    /// Set the hero's action provider.
    pub fn set_hero_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.hero_provider = Some(Box::new(provider));
    }

    /// Set the opponent's action provider.
    pub fn set_opponent_provider(&mut self, provider: impl ActionProvider + 'static) {
        self.opponent_provider = Some(Box::new(provider));
    }

    /// Asks `combatant`'s provider for its next move and submits it.
    ///
    /// Returns `true` when an action was requested, `false` when the
    /// provider had nothing to do.
    pub async fn drive(&self, combatant: CombatantId) -> Result<bool> {
        let provider = match combatant {
            CombatantId::Hero => self.hero_provider.as_ref(),
            CombatantId::Opponent => self.opponent_provider.as_ref(),
        }
        .ok_or(RuntimeError::ProviderNotSet { combatant })?;

        let snapshot = self.handle.snapshot().await?;
        match provider.provide_action(combatant, &snapshot).await? {
            Some(name) => {
                self.handle.request_action(combatant, name).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Shutdown the runtime gracefully: closes the command channel so the
    /// worker exits its loop and cancels any outstanding timers.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`BattleRuntime`] with flexible configuration.
pub struct BattleRuntimeBuilder {
    config: RuntimeConfig,
    battle: Option<Battle>,
    catalog: Option<ActionCatalog>,
    hero_provider: Option<Box<dyn ActionProvider>>,
    opponent_provider: Option<Box<dyn ActionProvider>>,
}

impl BattleRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            battle: None,
            catalog: None,
            hero_provider: None,
            opponent_provider: None,
        }
    }

    /// Override runtime configuration.
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide a custom battle instead of the embedded content.
    pub fn battle(mut self, battle: Battle) -> Self {
        self.battle = Some(battle);
        self
    }

    /// Provide a custom action catalog instead of the embedded content.
    pub fn catalog(mut self, catalog: ActionCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Set the hero's action provider (optional).
    pub fn hero_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.hero_provider = Some(Box::new(provider));
        self
    }

    /// Set the opponent's action provider (optional).
    pub fn opponent_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.opponent_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime and spawn the battle worker.
    ///
    /// Whichever of battle and catalog was not supplied explicitly is
    /// assembled from the embedded content.
    pub async fn build(self) -> Result<BattleRuntime> {
        let (battle, catalog) = match (self.battle, self.catalog) {
            (Some(battle), Some(catalog)) => (battle, catalog),
            (battle, catalog) => {
                let (default_battle, default_catalog) =
                    ContentFactory::standard_battle(self.config.opponent_level)
                        .map_err(RuntimeError::Content)?;
                (
                    battle.unwrap_or(default_battle),
                    catalog.unwrap_or(default_catalog),
                )
            }
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (event_tx, _event_rx) =
            broadcast::channel::<BattleEvent>(self.config.event_buffer_size);

        let handle = BattleHandle::new(command_tx, event_tx.clone());

        let worker = BattleWorker::new(battle, catalog, command_rx, event_tx);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(BattleRuntime {
            handle,
            hero_provider: self.hero_provider,
            opponent_provider: self.opponent_provider,
            worker_handle,
        })
    }
}
