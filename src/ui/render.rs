//! Text renderings of the journal screens. Pure functions from records to
//! strings; styling comes from `console` and disappears when stdout is not a
//! terminal.

use console::Style;
use std::fmt::Write;

use crate::memory::types::MemoryRecord;

const CARD_LINE_WIDTH: usize = 120;
const CARD_MAX_LINES: usize = 3;
const RULE_WIDTH: usize = 50;

pub const UNKNOWN_LOCATION_SHORT: &str = "Loc. Desconhecida";
pub const UNKNOWN_LOCATION: &str = "Localização Desconhecida";
pub const FORM_PLACEHOLDER: &str = "O que está acontecendo? Como está o ar? Que sons você ouve?";

/// Image reference to show for a record: its own, or a stable stand-in
/// seeded by the id.
pub fn card_image(record: &MemoryRecord) -> String {
    record
        .generated_image_url
        .clone()
        .unwrap_or_else(|| format!("https://picsum.photos/seed/{}/400/300", record.id))
}

/// Short description of an image reference. Data URIs are summarized by type
/// and size instead of being dumped.
pub fn describe_image(url: &str) -> String {
    match url.strip_prefix("data:").and_then(|rest| rest.split_once(',')) {
        Some((meta, data)) => {
            let kb = (data.len() * 3 / 4).div_ceil(1024);
            format!("data:{meta} ({kb} KB)")
        }
        None => url.to_string(),
    }
}

/// One timeline card.
pub fn render_card(record: &MemoryRecord) -> String {
    let bold = Style::new().bold();
    let accent = Style::new().magenta();
    let dim = Style::new().dim();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}  ·  {}",
        bold.apply_to(record.enrichment.mood.to_uppercase()),
        record.weather.temp.as_deref().unwrap_or("N/A"),
    );
    let _ = writeln!(
        out,
        "{}",
        accent.apply_to(format!(
            "{}, {} · {}",
            record.display_weekday, record.display_date, record.display_time
        ))
    );
    for line in clamp_lines(&record.content, CARD_LINE_WIDTH, CARD_MAX_LINES) {
        let _ = writeln!(out, "  {line}");
    }
    let location = record
        .location
        .as_ref()
        .map(|l| l.text.as_str())
        .unwrap_or(UNKNOWN_LOCATION_SHORT);
    let _ = writeln!(
        out,
        "{}",
        dim.apply_to(format!("{location}  ♪ {}", record.enrichment.music_vibe))
    );
    let _ = write!(out, "{}", dim.apply_to(describe_image(&card_image(record))));
    out
}

/// One-line label used in selection menus.
pub fn card_title(record: &MemoryRecord) -> String {
    let preview: String = record.content.chars().take(48).collect();
    let ellipsis = if record.content.chars().count() > 48 { "…" } else { "" };
    format!(
        "{} {} · {} — {preview}{ellipsis}",
        record.display_date, record.display_time, record.enrichment.mood
    )
}

/// The timeline screen, or the empty state when there is nothing yet.
pub fn render_timeline(records: &[MemoryRecord]) -> String {
    if records.is_empty() {
        let bold = Style::new().bold();
        let dim = Style::new().dim();
        return format!(
            "{}\n{}\n",
            bold.apply_to("Seu diário está vazio"),
            dim.apply_to(
                "Comece a capturar seus momentos. A IA ajudará você a lembrar do clima, \
                 do humor e da sensação do agora."
            )
        );
    }

    let mut out = render_timeline_header(records.len());
    for record in records {
        out.push_str(&render_card(record));
        out.push_str("\n\n");
    }
    out
}

pub fn render_timeline_header(count: usize) -> String {
    format!(
        "{} {}\n\n",
        Style::new().bold().apply_to("Sua Linha do Tempo"),
        Style::new().dim().apply_to(format!("{count} registros"))
    )
}

/// The detail screen for one record.
pub fn render_detail(record: &MemoryRecord) -> String {
    let bold = Style::new().bold();
    let italic = Style::new().italic();
    let dim = Style::new().dim();
    let heading = Style::new().cyan().bold();

    let mut out = String::new();
    let _ = writeln!(out, "{}", italic.apply_to(format!("\"{}\"", record.enrichment.poetic_summary)));
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(
        out,
        "{}  {}",
        bold.apply_to(record.enrichment.mood.to_uppercase()),
        dim.apply_to(format!("{}, {}", record.display_weekday, record.display_date))
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", record.content);
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", heading.apply_to("Atmosfera"));
    if let Some(ref temp) = record.weather.temp {
        let _ = writeln!(out, "  {temp}");
    }
    let _ = writeln!(out, "  {}", dim.apply_to(&record.weather.description));
    let _ = writeln!(out, "{}", heading.apply_to("Trilha Sonora"));
    let _ = writeln!(out, "  {}", record.enrichment.music_vibe);
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    let location = record
        .location
        .as_ref()
        .map(|l| l.text.as_str())
        .unwrap_or(UNKNOWN_LOCATION);
    let _ = writeln!(out, "  Local:  {location}");
    let _ = writeln!(out, "  Hora:   {}", record.display_time);
    let _ = writeln!(out, "  Cor:    {}", record.enrichment.color_hex);
    if let Some(ref url) = record.generated_image_url {
        let _ = writeln!(out, "  Imagem: {}", describe_image(url));
    }
    let tags: Vec<String> = record.enrichment.tags.iter().map(|t| format!("#{t}")).collect();
    let _ = write!(out, "  {}", tags.join(" "));
    out
}

/// Header of the creation form.
pub fn render_form_header(location_label: &str, time: &str) -> String {
    let bold = Style::new().bold();
    let dim = Style::new().dim();
    format!(
        "{}\n{}\n{}  ·  {}\n",
        bold.apply_to("Nova Memória"),
        dim.apply_to("Capture a essência do agora."),
        location_label.to_uppercase(),
        time
    )
}

/// Wrap `text` to `width` characters and keep at most `max_lines`, marking a
/// cut with an ellipsis.
fn clamp_lines(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut truncated = false;

    'outer: for word in text.split_whitespace() {
        let mut word = word.to_string();
        loop {
            let current_len = current.chars().count();
            let needed = usize::from(!current.is_empty()) + word.chars().count();
            if current_len + needed <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(&word);
                break;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            } else {
                // single word longer than a line
                let head: String = word.chars().take(width).collect();
                word = word.chars().skip(width).collect();
                lines.push(head);
            }
            if lines.len() == max_lines {
                truncated = true;
                break 'outer;
            }
            if word.is_empty() {
                break;
            }
        }
    }
    if !truncated && !current.is_empty() {
        lines.push(current);
    }
    if truncated {
        if let Some(last) = lines.last_mut() {
            last.push('…');
        }
    }
    lines
}
