pub mod analyzer;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod monitor;
pub mod notifier;
pub mod session;

// Re-exports for convenience
pub use config::{MonitorConfig, RetryConfig};
pub use fetcher::Fetcher;
pub use models::{AnalysisResult, NeighborPair, OptionChain, Snapshot};
pub use monitor::{CycleOutcome, Monitor};
pub use notifier::{Notifier, TelegramNotifier};
pub use session::SessionManager;
