mod images;
mod lists;
mod normalize;
mod segment;
mod structured_day;

pub use images::find_images;
pub use lists::{ListSource, ScheduleItem, parse_lines, parse_list, parse_schedule};
pub use normalize::normalize;
pub use segment::{DaySegment, OVERVIEW, count_day_headings, is_day_heading, split_into_days};
pub use structured_day::{
    DEFAULT_SUMMARY_MIN_CHARS, ParseOptions, StructuredDay, build_day, parse_itinerary,
};
