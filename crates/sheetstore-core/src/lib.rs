pub mod app_config;
pub mod config;
pub mod order;
pub mod products;
pub mod publish;
pub mod stores;
pub mod theme;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use order::{
    compose_order, deep_link, normalize_contact, OrderError, OrderMessage, Selection,
};
pub use products::{Price, Product, DEFAULT_PLACEHOLDER_IMAGE_URL};
pub use publish::{
    prepare_publish, PublishError, PublishPlan, PublishProduct, DEFAULT_STORE_NAME,
};
pub use stores::Store;
pub use theme::{
    resolve_preset, resolve_preset_kind, ColorRoles, LayoutHints, Preset, PresetKind, StyleScope,
    ThemeContext, ThemeError,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
