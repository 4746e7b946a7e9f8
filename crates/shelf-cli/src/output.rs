use clap::ValueEnum;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::{json, Value};
use shelf_core::ReconcileStats;
use shelf_models::{DisplayItem, MediaType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

#[derive(Debug, Clone, Copy)]
enum Notice {
    Success,
    Info,
    Warning,
}

impl Notice {
    fn kind(self) -> &'static str {
        match self {
            Notice::Success => "success",
            Notice::Info => "info",
            Notice::Warning => "warning",
        }
    }
}

/// Prints command results either for a terminal or as JSON documents
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.notice(Notice::Success, msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.notice(Notice::Info, msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.notice(Notice::Warning, msg.as_ref());
    }

    pub fn json(&self, data: &Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }
        self.print_json(data);
    }

    /// Print a merged collection: a numbered table with a summary line, or a
    /// single `collection` document
    pub fn collection(
        &self,
        media_type: MediaType,
        items: &[DisplayItem],
        stats: &ReconcileStats,
        show_stats: bool,
    ) {
        if self.format != OutputFormat::Human {
            self.json(&collection_body(media_type, items, stats, show_stats));
            return;
        }

        if items.is_empty() {
            self.warn(format!("Nothing to show for {}", media_type));
            return;
        }
        self.info(collection_table(items).to_string());
        self.info(format!(
            "{} items, {} tracked records merged, {} only in your collection",
            items.len(),
            stats.merged(),
            stats.tracked_only
        ));
        if show_stats {
            self.info(format!(
                "matched by id: {}, by alias: {}, by external id: {}, by internal alias: {}, by title/year: {}",
                stats.direct, stats.alias, stats.external_id, stats.internal_alias, stats.fallback
            ));
            if stats.duplicate_external > 0 {
                self.warn(format!("{} repeated discovery entries were folded", stats.duplicate_external));
            }
        }
    }

    fn notice(&self, notice: Notice, msg: &str) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => match notice {
                Notice::Success => println!("{} {}", "✓".green(), msg),
                Notice::Info => println!("{}", msg),
                Notice::Warning => println!("{} {}", "⚠".yellow(), msg),
            },
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": notice.kind(), "message": msg }));
            }
        }
    }

    fn print_json(&self, data: &Value) {
        match self.format {
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Json | OutputFormat::Human => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
        }
    }
}

fn collection_body(
    media_type: MediaType,
    items: &[DisplayItem],
    stats: &ReconcileStats,
    show_stats: bool,
) -> Value {
    let mut body = json!({
        "type": "collection",
        "mediaType": media_type,
        "items": items,
    });
    if show_stats {
        body["stats"] = json!(stats);
    }
    body
}

fn collection_table(items: &[DisplayItem]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Year").add_attribute(Attribute::Bold),
        Cell::new("Status").add_attribute(Attribute::Bold),
        Cell::new("Rating").add_attribute(Attribute::Bold),
        Cell::new("Link").add_attribute(Attribute::Bold),
    ]);
    for (index, item) in items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&item.title),
            Cell::new(format_year(item.year)),
            status_cell(item),
            Cell::new(format_rating(item.rating)),
            Cell::new(&item.href),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn status_cell(item: &DisplayItem) -> Cell {
    match item.status {
        Some(status) => Cell::new(status.as_str()).fg(Color::Green),
        // In the collection, but with a status we could not read
        None if item.tracked => Cell::new("tracked").fg(Color::Yellow),
        None => Cell::new("-"),
    }
}

fn format_year(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}

fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r.fract() == 0.0 => format!("{:.0}", r),
        Some(r) => format!("{:.1}", r),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_models::TrackStatus;

    fn item(id: &str, status: Option<TrackStatus>, tracked: bool) -> DisplayItem {
        DisplayItem {
            id: id.to_string(),
            title: format!("Album {}", id),
            media_type: MediaType::Music,
            year: Some(1997),
            cover_url: String::new(),
            href: MediaType::Music.href_for(id),
            status,
            rating: Some(8.0),
            tracked,
        }
    }

    #[test]
    fn test_format_rating_and_year() {
        assert_eq!(format_rating(Some(10.0)), "10");
        assert_eq!(format_rating(Some(7.84)), "7.8");
        assert_eq!(format_rating(None), "-");
        assert_eq!(format_year(Some(1999)), "1999");
        assert_eq!(format_year(None), "-");
    }

    #[test]
    fn test_collection_body_stats_only_when_asked() {
        let items = vec![item("1", Some(TrackStatus::Completed), true)];
        let stats = ReconcileStats {
            external: 1,
            tracked: 1,
            direct: 1,
            ..ReconcileStats::default()
        };

        let body = collection_body(MediaType::Music, &items, &stats, false);
        assert_eq!(body["type"], "collection");
        assert_eq!(body["mediaType"], "music");
        assert_eq!(body["items"][0]["id"], "1");
        assert_eq!(body["items"][0]["status"], "COMPLETED");
        assert_eq!(body["items"][0]["tracked"], true);
        assert!(body.get("stats").is_none());

        let body = collection_body(MediaType::Music, &items, &stats, true);
        assert_eq!(body["stats"]["direct"], 1);
    }

    #[test]
    fn test_collection_table_marks_tracked_rows_without_status() {
        let items = vec![
            item("1", Some(TrackStatus::OnHold), true),
            item("2", None, true),
            item("3", None, false),
        ];

        let rendered = collection_table(&items).to_string();
        assert!(rendered.contains("Album 1"));
        assert!(rendered.contains("ON_HOLD"));
        assert!(rendered.contains("tracked"));
        assert!(rendered.contains("/music/3"));
    }
}
