use moodji_client::{ConfidenceTier, Sentiment, SessionSnapshot};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block as RatatuiBlock, Borders, Padding, Paragraph, Wrap},
};

use super::spinner::active_frame;
use super::state::AppState;
use super::view_model::{Blocks, Content};

/// Fixed card width for the TUI
const CARD_WIDTH: u16 = 64;

/// What a piece of text means, rather than how it looks.
#[derive(Debug, Clone, Copy)]
enum Meaning {
    Base,
    Guidance,
    Important,
    Annotation,
    Muted,
    AlertError,
}

fn style(meaning: Meaning) -> Style {
    match meaning {
        Meaning::Base => Style::default(),
        Meaning::Guidance => Style::default().fg(Color::Cyan),
        Meaning::Important => Style::default().add_modifier(Modifier::BOLD),
        Meaning::Annotation => Style::default().fg(Color::Gray),
        Meaning::Muted => Style::default().fg(Color::DarkGray),
        Meaning::AlertError => Style::default().fg(Color::Red),
    }
}

fn sentiment_style(sentiment: Sentiment) -> Style {
    match sentiment {
        Sentiment::Positive => Style::default().fg(Color::Green),
        Sentiment::Neutral => Style::default().fg(Color::Yellow),
        Sentiment::Negative => Style::default().fg(Color::Magenta),
    }
}

fn tier_style(tier: ConfidenceTier) -> Style {
    match tier {
        ConfidenceTier::High => Style::default().fg(Color::Green),
        ConfidenceTier::Medium => Style::default().fg(Color::Yellow),
        ConfidenceTier::Low => Style::default().fg(Color::Red),
    }
}

fn tier_label(tier: ConfidenceTier) -> &'static str {
    match tier {
        ConfidenceTier::High => "high confidence",
        ConfidenceTier::Medium => "medium confidence",
        ConfidenceTier::Low => "low confidence",
    }
}

fn view(session: &SessionSnapshot, state: &AppState) -> Blocks {
    Blocks::from_state(session, state).with_spinner_frame(state.spinner_frame)
}

/// Calculate the height needed to render the current state, borders
/// included.
pub fn calculate_needed_height(session: &SessionSnapshot, state: &AppState) -> u16 {
    let view = view(session, state);
    let content_width = usize::from(CARD_WIDTH.saturating_sub(4)).max(1);

    content_height(&view, content_width)
        .saturating_add(3) // borders (2) + top padding (1)
        .max(5)
}

/// Main render function: derives view model from state, then renders it
pub fn render(frame: &mut Frame, session: &SessionSnapshot, state: &AppState) {
    let view = view(session, state);
    render_view(frame, &view);
}

fn content_height(view: &Blocks, content_width: usize) -> u16 {
    let mut total_height = 0u16;
    for (idx, block) in view.items.iter().enumerate() {
        if idx > 0 {
            total_height = total_height.saturating_add(2); // separator + leading blank
        }
        total_height =
            total_height.saturating_add(calculate_block_height(&block.content, content_width));
    }
    total_height
}

fn render_view(frame: &mut Frame, view: &Blocks) {
    let area = frame.area();

    // Fixed width, min 32 if terminal is narrow
    let desired_width = CARD_WIDTH.min(area.width.saturating_sub(2)).max(32);
    let content_width = usize::from(desired_width.saturating_sub(4)).max(1);

    let desired_height = content_height(view, content_width)
        .saturating_add(3) // borders (2) + top padding (1), no bottom padding
        .max(5);

    // Cap card height at viewport height, scrolling to the bottom when it overflows
    let actual_height = desired_height.min(area.height);
    let scroll_offset = desired_height.saturating_sub(actual_height);

    let card = Rect {
        x: area.x,
        y: area.y,
        width: desired_width.min(area.width),
        height: actual_height,
    };

    let title = view
        .items
        .first()
        .and_then(|b| b.title.as_deref())
        .unwrap_or("Mood Emoji AI");

    let outer_block = RatatuiBlock::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom(Line::from(view.footer).alignment(Alignment::Right))
        .padding(Padding::new(1, 1, 1, 0));

    let inner_area = outer_block.inner(card);
    frame.render_widget(outer_block, card);

    render_blocks_content(frame, view, inner_area, card.width, scroll_offset);
}

fn render_blocks_content(
    frame: &mut Frame,
    view: &Blocks,
    area: Rect,
    card_width: u16,
    scroll_offset: u16,
) {
    let content_width = usize::from(area.width).max(1);

    // Heights in order: [block, sep, blank, block, sep, blank, block, ...]
    let mut heights = Vec::new();
    for (idx, block) in view.items.iter().enumerate() {
        if idx > 0 {
            heights.push(1);
            heights.push(1);
        }
        heights.push(calculate_block_height(&block.content, content_width));
    }

    if heights.is_empty() {
        return;
    }

    let mut cumulative: Vec<u16> = Vec::with_capacity(heights.len() + 1);
    let mut running = 0u16;
    cumulative.push(running);
    for h in &heights {
        running = running.saturating_add(*h);
        cumulative.push(running);
    }

    let visible_end = scroll_offset.saturating_add(area.height);

    let mut chunk_idx = 0;
    for (idx, block) in view.items.iter().enumerate() {
        if idx > 0 {
            let sep_start = cumulative[chunk_idx];
            if sep_start >= scroll_offset && sep_start < visible_end {
                let sep_area = Rect {
                    x: area.x,
                    y: area.y + sep_start - scroll_offset,
                    width: area.width,
                    height: 1,
                };
                render_separator(frame, sep_area, card_width);
            }
            chunk_idx += 2;
        }

        let block_start = cumulative[chunk_idx];
        let block_end = cumulative[chunk_idx + 1];

        if block_start < visible_end && block_end > scroll_offset {
            let top = block_start.max(scroll_offset);
            let bottom = block_end.min(visible_end);

            let block_area = Rect {
                x: area.x,
                y: area.y + top - scroll_offset,
                width: area.width,
                height: bottom - top,
            };

            // Partially scrolled blocks are cut from the top
            let clipped = top - block_start;
            render_block_content(frame, &block.content, block_area, clipped);
        }

        chunk_idx += 1;
    }
}

/// Blank lines before an item inside a block. History rows stack tightly.
fn gap_before(idx: usize, content: &Content) -> u16 {
    if idx == 0 || matches!(content, Content::HistoryRow { .. }) {
        0
    } else {
        1
    }
}

fn render_block_content(frame: &mut Frame, content: &[Content], area: Rect, clipped: u16) {
    let content_width = usize::from(area.width).max(1);

    let mut y = 0u16;
    for (idx, item) in content.iter().enumerate() {
        y = y.saturating_add(gap_before(idx, item));
        let height = calculate_single_content_height(item, content_width);

        // Skip items above the visible part of the block
        if y + height <= clipped {
            y = y.saturating_add(height);
            continue;
        }

        let item_top = y.saturating_sub(clipped);
        if item_top >= area.height {
            break;
        }

        let item_area = Rect {
            x: area.x,
            y: area.y + item_top,
            width: area.width,
            height: height.min(area.height - item_top),
        };
        render_single_content(frame, item, item_area);

        y = y.saturating_add(height);
    }
}

/// Render a single content item. Symbol at column 0, text from column 2.
fn render_single_content(frame: &mut Frame, content: &Content, area: Rect) {
    let text_area = Rect {
        x: area.x.saturating_add(2),
        y: area.y,
        width: area.width.saturating_sub(2),
        height: area.height,
    };

    match content {
        Content::Input {
            text,
            cursor,
            locked,
        } => {
            let mut text_style = style(Meaning::Base);
            if *locked {
                text_style = text_style.add_modifier(Modifier::DIM);
            }

            render_symbol(frame, content.prefix_symbol(), style(Meaning::Guidance), area);

            // Keep the cursor in view on long input
            let before_cursor: String = text.chars().take(*cursor).collect();
            let cursor_col = Span::raw(before_cursor).width() as u16;
            let offset = cursor_col.saturating_sub(text_area.width.saturating_sub(1));

            let paragraph = Paragraph::new(text.as_str())
                .style(text_style)
                .scroll((0, offset));
            frame.render_widget(paragraph, text_area);

            if !locked && text_area.width > 0 {
                frame.set_cursor_position((text_area.x + cursor_col - offset, text_area.y));
            }
        }

        Content::Hint { text } => {
            let paragraph = Paragraph::new(text.as_str())
                .style(style(Meaning::Muted))
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, text_area);
        }

        Content::Spinner {
            frame: spinner_frame,
            status_text,
        } => {
            let annotation = style(Meaning::Annotation);
            render_symbol(frame, active_frame(*spinner_frame), annotation, area);

            let paragraph = Paragraph::new(status_text.as_str()).style(annotation);
            frame.render_widget(paragraph, text_area);
        }

        Content::Error { message } => {
            render_symbol(frame, content.prefix_symbol(), style(Meaning::AlertError), area);

            let paragraph = Paragraph::new(message.as_str())
                .style(style(Meaning::Base))
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, text_area);
        }

        Content::Verdict {
            emoji,
            word,
            sentiment,
            percent,
            tier,
        } => {
            render_symbol(frame, content.prefix_symbol(), style(Meaning::Guidance), area);

            let lines = vec![
                Line::from(vec![
                    Span::raw(format!("{emoji}  ")),
                    Span::styled(word.as_str(), style(Meaning::Important)),
                ]),
                Line::from(vec![
                    Span::styled(sentiment.title(), sentiment_style(*sentiment)),
                    Span::styled(" · ", style(Meaning::Muted)),
                    Span::styled(format!("{percent}% {}", tier_label(*tier)), tier_style(*tier)),
                ]),
            ];
            frame.render_widget(Paragraph::new(lines), text_area);
        }

        Content::Banner { kind } => {
            let paragraph = Paragraph::new(kind.text()).style(style(Meaning::Guidance));
            frame.render_widget(paragraph, text_area);
        }

        Content::Recent { words } => {
            render_symbol(frame, content.prefix_symbol(), style(Meaning::Muted), area);

            let paragraph = Paragraph::new(recent_line(words))
                .style(style(Meaning::Annotation))
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, text_area);
        }

        Content::Stats {
            words_analyzed,
            positive_rate,
        } => {
            render_symbol(frame, content.prefix_symbol(), style(Meaning::Muted), area);

            let plural = if *words_analyzed == 1 { "" } else { "s" };
            let text = format!("{words_analyzed} word{plural} analyzed, {positive_rate}% positive");
            frame.render_widget(
                Paragraph::new(text).style(style(Meaning::Annotation)),
                text_area,
            );
        }

        Content::HistoryRow { entry } => {
            let percent = (entry.confidence * 100.0).round().clamp(0.0, 100.0) as u32;
            let line = Line::from(vec![
                Span::styled(format!("{}  ", entry.timestamp), style(Meaning::Muted)),
                Span::raw(format!("{} {}  ", entry.emoji, entry.word)),
                Span::styled(
                    format!("{} {percent}%", entry.sentiment),
                    sentiment_style(entry.sentiment),
                ),
            ]);
            frame.render_widget(Paragraph::new(line), text_area);
        }
    }
}

fn recent_line(words: &[String]) -> String {
    format!("Recent: {}", words.join(", "))
}

/// Render a single-character symbol at the start of an area
fn render_symbol(frame: &mut Frame, symbol: &str, style: Style, area: Rect) {
    let symbol_area = Rect {
        x: area.x,
        y: area.y,
        width: 1.min(area.width),
        height: 1.min(area.height),
    };
    frame.render_widget(Paragraph::new(symbol).style(style), symbol_area);
}

fn render_separator(frame: &mut Frame, area: Rect, card_width: u16) {
    // ├ + ─ repeated + ┤ spanning the full card width
    let inner_width = card_width.saturating_sub(2) as usize;
    let separator = format!("\u{251c}{}\u{2524}", "\u{2500}".repeat(inner_width));

    let paragraph = Paragraph::new(Span::styled(separator, style(Meaning::Muted)));

    // The area is inside the padding; the border is two columns to the left
    let sep_area = Rect {
        x: area.x.saturating_sub(2),
        y: area.y,
        width: card_width,
        height: 1,
    };
    frame.render_widget(paragraph, sep_area);
}

fn calculate_block_height(content: &[Content], width: usize) -> u16 {
    let mut height = 0u16;
    for (idx, item) in content.iter().enumerate() {
        height = height
            .saturating_add(gap_before(idx, item))
            .saturating_add(calculate_single_content_height(item, width));
    }

    // Trailing blank line after the block
    height.saturating_add(1)
}

fn calculate_single_content_height(content: &Content, width: usize) -> u16 {
    // Text area is offset by 2 for symbol column
    let text_width = width.saturating_sub(2);

    match content {
        Content::Hint { text } => line_count_wrapped(text, text_width),
        Content::Error { message } => line_count_wrapped(message, text_width),
        Content::Recent { words } => line_count_wrapped(&recent_line(words), text_width),
        Content::Verdict { .. } => 2,
        Content::Input { .. }
        | Content::Spinner { .. }
        | Content::Banner { .. }
        | Content::Stats { .. }
        | Content::HistoryRow { .. } => 1,
    }
}

/// Count lines when text is wrapped at given width.
fn line_count_wrapped(text: &str, width: usize) -> u16 {
    if width == 0 {
        return 1;
    }

    let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
    paragraph.line_count(width as u16).max(1) as u16
}
