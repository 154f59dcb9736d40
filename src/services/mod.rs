// Time handling shared by every derivation
pub mod timewindow;

// Metrics Engine
pub mod metrics;
pub mod notifications;

// Classification & Filtering Engine
pub mod expiry;
pub mod stock;
