//! Unified plugin for `bevy_tiledlayer`.

use bevy::prelude::*;

use bevy_tiledlayer_core::{TiledlayerCoreConfig, TiledlayerCorePlugin};

/// Unified plugin that adds all enabled `bevy_tiledlayer` functionality.
///
/// # With Custom Configuration
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tiledlayer::prelude::*;
///
/// App::new()
///     .add_plugins(BevyTiledlayerPlugin::default().with_core(TiledlayerCoreConfig {
///         keep_source: false,
///         ..default()
///     }))
///     .run();
/// ```
#[derive(Default)]
pub struct BevyTiledlayerPlugin {
    /// Core configuration
    pub core: TiledlayerCoreConfig,
}

impl BevyTiledlayerPlugin {
    /// Create with custom core configuration
    pub fn with_core(mut self, config: TiledlayerCoreConfig) -> Self {
        self.core = config;
        self
    }
}

impl Plugin for BevyTiledlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(TiledlayerCorePlugin::new(self.core.clone()));

        info!("BevyTiledlayerPlugin initialized");
    }
}
