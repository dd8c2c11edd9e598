use crate::news::Article;
use crate::theme::ColorPalette;
use crate::util::{display_width, strip_control_chars};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const LABEL: &str = " URGENTE ";
const SEPARATOR: &str = "   ●   ";

/// Render the one-line headline ticker.
///
/// The headlines form a loop that scrolls left by `offset` columns. Two
/// copies are laid out back to back so the wrap-around never shows a gap.
pub fn render(
    f: &mut Frame,
    palette: &ColorPalette,
    headlines: &[&Article],
    offset: usize,
    area: Rect,
) {
    if area.width < 1 || area.height < 1 || headlines.is_empty() {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LABEL.len() as u16), Constraint::Min(0)])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled(LABEL, palette.ticker_label)),
        chunks[0],
    );

    let cycle: String = headlines
        .iter()
        .map(|a| format!("{}{}", strip_control_chars(&a.title), SEPARATOR))
        .collect();
    let cycle_width = display_width(&cycle).max(1);
    let scroll = u16::try_from(offset % cycle_width).unwrap_or(0);

    let line = Line::from(vec![
        Span::styled(cycle.clone(), palette.ticker_text),
        Span::styled(cycle, palette.ticker_text),
    ]);
    f.render_widget(Paragraph::new(line).scroll((0, scroll)), chunks[1]);
}
