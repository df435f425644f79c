//! Standalone HTML document for sharing or printing an itinerary.

use super::escape_html;
use crate::itinerary::{StructuredDay, find_images, normalize, split_into_days};
use chrono::{DateTime, Local};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};
use std::fmt::Write;

const BRAND: &str = "WanderWise";

const STYLE: &str = r#"
@page { margin: 20mm 18mm; }
body { font-family: Inter, system-ui, -apple-system, "Segoe UI", Roboto, Arial, sans-serif; color: #0d1b2a; background: #f4f7fb; }
.wrapper { max-width: 900px; margin: 16px auto; background: white; padding: 22px; border-radius: 8px; }
header { display: flex; justify-content: space-between; align-items: flex-start; gap: 16px; }
h1 { margin: 0; font-size: 30px; color: #07203a; }
.meta { color: #6b7280; margin-top: 8px; font-size: 12px; }
.badge { display: inline-block; background: #eef6ff; color: #0b63ff; padding: 6px 10px; border-radius: 999px; font-weight: 600; }
.traveller { margin-top: 8px; color: #6b7280; text-align: right; }
.hero { margin-top: 18px; border-radius: 8px; overflow: hidden; height: 240px; background: #eef6ff; }
.hero img { width: 100%; height: 100%; object-fit: cover; display: block; }
.toc { margin-top: 18px; padding: 12px; background: #fbfdff; border-radius: 6px; border: 1px solid #eef6ff; }
.toc h2 { margin: 0 0 8px 0; font-size: 16px; color: #07203a; }
.toc ul { margin: 6px 0 0 18px; color: #334155; font-size: 13px; }
.day-section { margin-top: 20px; page-break-inside: avoid; }
.day { display: flex; gap: 16px; padding: 14px; border-radius: 8px; border: 1px solid #eef5fb; }
.day-image { width: 220px; min-width: 140px; height: 140px; border-radius: 6px; overflow: hidden; background: #f8fafc; display: flex; align-items: center; justify-content: center; color: #94a3b8; font-size: 12px; }
.day-image img { width: 100%; height: 100%; object-fit: cover; }
.day-content { flex: 1; }
.day h3 { margin: 0 0 8px 0; font-size: 18px; color: #07203a; }
.day-body { color: #334155; font-size: 14px; line-height: 1.65; }
footer.page-footer { margin-top: 24px; text-align: center; font-size: 12px; color: #6b7280; }
@media print { .wrapper { border-radius: 0; margin: 0; padding: 12mm; } .hero { height: 160px; } }
"#;

/// Everything needed to export one itinerary.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Document title.
    pub name: String,
    pub destinations: Vec<String>,
    pub exported_at: DateTime<Local>,
    pub user_name: Option<String>,
    /// Hero image; falls back to the first image found in `raw`.
    pub header_image: Option<String>,
    /// The generated itinerary text.
    pub raw: String,
    /// Already structured days. When present they are rendered instead of
    /// splitting `raw`.
    pub days: Option<Vec<StructuredDay>>,
}

impl ExportRequest {
    pub fn new(name: &str, raw: &str) -> Self {
        Self {
            name: name.to_string(),
            destinations: Vec::new(),
            exported_at: Local::now(),
            user_name: None,
            header_image: None,
            raw: raw.to_string(),
            days: None,
        }
    }
}

/// A rendered block: one per day, in document order.
#[derive(Debug, PartialEq)]
struct DayBlock {
    header: String,
    body: String,
    images: Vec<String>,
}

/// Renders `request` as a complete HTML document.
///
/// `date_format` is a `chrono` format string for the export timestamp; an
/// invalid one falls back to RFC 3339.
pub fn render_itinerary_html(request: &ExportRequest, date_format: &str) -> String {
    let blocks = match request.days.as_deref() {
        Some(days) if !days.is_empty() => blocks_from_days(days),
        _ => blocks_from_text(&normalize(&request.raw)),
    };
    let hero = request
        .header_image
        .clone()
        .or_else(|| find_images(&request.raw).into_iter().next());
    let destinations = if request.destinations.is_empty() {
        "Multiple destinations".to_string()
    } else {
        request.destinations.join(", ")
    };
    let exported = format_timestamp(&request.exported_at, date_format);
    let name = escape_html(&request.name);

    let mut out = String::new();
    out.push_str("<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\" />\n");
    out.push_str(&format!("<title>{name}</title>\n"));
    out.push_str(&format!(
        "<style>{STYLE}</style>\n</head>\n<body>\n<div class=\"wrapper\">\n"
    ));

    out.push_str(&format!(
        "<header>\n<div>\n<h1>{name}</h1>\n<div class=\"meta\">{} • Generated {}</div>\n</div>\n",
        escape_html(&destinations),
        escape_html(&exported)
    ));
    out.push_str(&format!(
        "<div>\n<div class=\"badge\">{BRAND}</div>\n<div class=\"traveller\">{}</div>\n</div>\n</header>\n",
        escape_html(request.user_name.as_deref().unwrap_or("Guest"))
    ));

    if let Some(hero) = hero {
        out.push_str(&format!(
            "<div class=\"hero\"><img src=\"{}\" alt=\"Hero image\" /></div>\n",
            escape_html(&hero)
        ));
    }

    out.push_str("<nav class=\"toc\" aria-label=\"Table of contents\">\n<h2>Contents</h2>\n<ul>\n");
    for (index, block) in blocks.iter().enumerate() {
        out.push_str(&format!(
            "<li><a href=\"#day-{}\">{}</a></li>\n",
            index + 1,
            escape_html(&block.header)
        ));
    }
    out.push_str("</ul>\n</nav>\n");

    for (index, block) in blocks.iter().enumerate() {
        let title = escape_html(&block.header);
        let image = match block.images.first() {
            Some(src) => format!(
                "<div class=\"day-image\"><img src=\"{}\" alt=\"{title}\" /></div>",
                escape_html(src)
            ),
            None => "<div class=\"day-image placeholder\">No image</div>".to_string(),
        };
        out.push_str(&format!(
            "<section id=\"day-{}\" class=\"day-section\">\n<div class=\"day\">\n{image}\n<div class=\"day-content\">\n<h3>{title}</h3>\n<div class=\"day-body\">{}</div>\n</div>\n</div>\n</section>\n",
            index + 1,
            markdown_to_html(&block.body)
        ));
    }

    out.push_str(&format!(
        "<footer class=\"page-footer\">Generated with {BRAND} • {}</footer>\n",
        escape_html(&exported)
    ));
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn blocks_from_text(cleaned: &str) -> Vec<DayBlock> {
    split_into_days(cleaned)
        .into_iter()
        .map(|segment| DayBlock {
            images: find_images(&segment.body),
            header: segment.header,
            body: segment.body,
        })
        .collect()
}

fn blocks_from_days(days: &[StructuredDay]) -> Vec<DayBlock> {
    days.iter()
        .enumerate()
        .map(|(index, day)| {
            let schedule: Vec<String> = day.schedule.iter().map(ToString::to_string).collect();
            let body = [
                day.summary.clone(),
                bullets(&schedule),
                bullets(&day.locations),
                bullets(&day.activities),
                bullets(&day.food),
                bullets(&day.budget),
                day.notes.join("\n"),
            ]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
            let images = if day.images.is_empty() {
                find_images(&body)
            } else {
                day.images.clone()
            };
            DayBlock {
                header: if day.title.is_empty() {
                    format!("Day {}", index + 1)
                } else {
                    day.title.clone()
                },
                body,
                images,
            }
        })
        .collect()
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_timestamp(at: &DateTime<Local>, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", at.format(date_format)).is_err() {
        out = at.to_rfc3339();
    }
    out
}

/// Markdown to HTML with line breaks kept, raw HTML escaped and script
/// links neutralized.
fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let events = Parser::new_ext(markdown, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if is_script_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if is_script_url(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::new();
    html::push_html(&mut out, events);
    out
}

fn is_script_url(url: &str) -> bool {
    let url = url.trim().to_ascii_lowercase();
    url.starts_with("javascript:") || url.starts_with("vbscript:")
}
