//! Readiness evaluation and provider infrastructure.

pub mod doctor;
pub mod locator;
pub mod logging;
pub mod provider;

pub use doctor::{
    CheckKind, CheckResult, CheckStatus, Doctor, DoctorReport, PlannedCheck, ProviderReadiness,
    Verdict,
};
pub use locator::{BinaryLocator, PathLocator, SearchPathLocator};
pub use logging::{LogFormat, LogLevel, LogSettings};
pub use provider::ProviderId;
