pub mod config;
pub mod export;
pub mod itinerary;
pub mod review;
pub mod sections;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use itinerary::{ParseOptions, ScheduleItem, StructuredDay, parse_itinerary};
pub use review::{ReviewReport, review};
