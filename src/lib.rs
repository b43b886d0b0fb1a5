pub mod breakdown;
pub mod config;
pub mod debt;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod schedule;
pub mod timeline;
pub mod types;

// re-export key types
pub use breakdown::{compute_breakdown, Breakdown, BreakdownComponent, CompositionSlice};
pub use config::ScheduleConfig;
pub use debt::{Debt, RawDebt};
pub use decimal::{Money, Rate};
pub use errors::{DebtError, Result};
pub use interest::{FixedInterest, InterestRequest, InterestSource};
pub use schedule::{build_schedule, classify, Installment, Schedule, ScheduleBuilder, StatusClassifier};
pub use timeline::{compute_default_index, DebtTimeline, TimelineNavigator};
pub use types::{DurationUnit, InstallmentStatus, InterestType};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
