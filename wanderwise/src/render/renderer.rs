use super::theme::OneDark;
use termimad::{MadSkin, crossterm::style::Stylize};
use wanderwise_core::{ReviewReport, StructuredDay};

#[derive(Clone)]
pub struct RenderOptions {
    pub use_color: bool,
    pub short_mode: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: OneDark::itinerary_skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    use_color: true,
                    short_mode: false,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            print!("{md}");
        }
    }

    /// Status messages. Without colors they go to stderr so stdout stays
    /// clean for redirection.
    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            eprintln!("{message}");
        }
    }

    pub fn print_day_line(&self, day: &StructuredDay) {
        let mut title = day.title.to_string();
        let mut counts = day_counts(day);
        if self.opts.use_color {
            title = title.with(OneDark::YELLOW).to_string();
            counts = counts.with(OneDark::COMMENT).to_string();
        }
        println!("{} {}", title, counts);
    }

    pub fn print_days(&self, days: &[StructuredDay]) {
        for (i, day) in days.iter().enumerate() {
            if self.opts.short_mode {
                self.print_day_line(day);
                continue;
            }

            self.print_md(&day_markdown(day));
            if i + 1 < days.len() {
                println!();
                self.print_md("---\n");
            }
        }
    }

    pub fn print_review(&self, report: &ReviewReport) {
        self.print_md(&review_markdown(report, self.opts.short_mode));
    }
}

/// `(4 stops, 2 activities)` style summary for short mode.
fn day_counts(day: &StructuredDay) -> String {
    let timed = day
        .schedule
        .iter()
        .filter(|item| !item.time.is_empty())
        .count();
    let parts: Vec<String> = [
        (timed, "stop", "stops"),
        (day.activities.len(), "activity", "activities"),
        (day.locations.len(), "place", "places"),
    ]
    .iter()
    .filter(|(n, _, _)| *n > 0)
    .map(|(n, one, many)| format!("{n} {}", if *n == 1 { one } else { many }))
    .collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!("({})", parts.join(", "))
    }
}

fn day_markdown(day: &StructuredDay) -> String {
    let mut md = format!("## {}\n", day.title);

    if day.is_unstructured() {
        if !day.raw.is_empty() {
            md.push_str(&day.raw);
            md.push('\n');
        }
        return md;
    }

    if !day.summary.is_empty() {
        md.push_str(&format!("*{}*\n", day.summary));
    }
    if !day.schedule.is_empty() {
        md.push_str("### Schedule\n");
        for item in &day.schedule {
            if item.time.is_empty() {
                md.push_str(&format!("* {}\n", item.text));
            } else {
                md.push_str(&format!("* **{}** {}\n", item.time, item.text));
            }
        }
    }
    push_list(&mut md, "Locations", &day.locations);
    push_list(&mut md, "Activities", &day.activities);
    push_list(&mut md, "Food", &day.food);
    push_list(&mut md, "Budget", &day.budget);
    push_list(&mut md, "Notes", &day.notes);
    push_list(&mut md, "Images", &day.images);
    md
}

fn push_list(md: &mut String, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    md.push_str(&format!("### {heading}\n"));
    for item in items {
        md.push_str(&format!("* {item}\n"));
    }
}

fn review_markdown(report: &ReviewReport, short_mode: bool) -> String {
    let mut md = String::from("# Review\n");
    md.push_str(&format!("* Days detected: {}\n", report.days_detected));
    if report.valid {
        md.push_str("* Structure: complete\n");
    } else {
        md.push_str(&format!(
            "* Missing sections: {}\n",
            report.missing_sections.join(", ")
        ));
    }

    if !report.preview.is_empty() {
        md.push_str("## Preview\n");
        for line in report.preview.lines() {
            md.push_str(&format!("> {line}\n"));
        }
    }
    if !short_mode && !report.cleaned.is_empty() {
        md.push_str("## Cleaned text\n");
        md.push_str(&report.cleaned);
        md.push('\n');
    }
    md
}
