//! Logging targets for Horizon Mask.
//!
//! Horizon Mask uses the `tracing` crate for instrumentation. The libraries
//! never install a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_mask_core=trace,horizon_mask=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_mask_core";
    /// Pattern compilation target.
    pub const COMPILE: &str = "horizon_mask_core::compile";
    /// Rule table construction target.
    pub const RULES: &str = "horizon_mask_core::rules";
    /// Engine transformation target.
    pub const ENGINE: &str = "horizon_mask_core::engine";
    /// Signal emission target.
    pub const SIGNAL: &str = "horizon_mask_core::signal";
    /// Editor orchestration target.
    pub const EDITOR: &str = "horizon_mask::editor";
}
