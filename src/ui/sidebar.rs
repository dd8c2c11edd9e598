use crate::app::App;
use crate::news::TRENDING;
use crate::theme::ColorPalette;
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the sidebar: "Últimas Notícias" above "Em Alta".
pub fn render(f: &mut Frame, app: &App, palette: &ColorPalette, area: Rect) {
    if area.width < 3 || area.height < 6 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_latest(f, app, palette, chunks[0]);
    render_trending(f, palette, chunks[1]);
}

fn render_latest(f: &mut Frame, app: &App, palette: &ColorPalette, area: Rect) {
    let width = area.width.saturating_sub(4) as usize;

    let mut items: Vec<ListItem> = app
        .session
        .latest_news()
        .map(|article| {
            let title = strip_control_chars(&article.title);
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("• ", palette.trending_rank),
                    Span::styled(
                        truncate_to_width(&title, width).into_owned(),
                        palette.sidebar_item,
                    ),
                ]),
                Line::styled(
                    format!("  {}", strip_control_chars(&article.date)),
                    palette.article_meta,
                ),
            ])
        })
        .collect();
    if items.is_empty() {
        items.push(ListItem::new(Line::styled(
            "Nenhuma notícia por aqui ainda.",
            palette.notice,
        )));
    }

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.panel_border)
            .title(Span::styled("Últimas Notícias", palette.sidebar_heading)),
    );
    f.render_widget(list, area);
}

fn render_trending(f: &mut Frame, palette: &ColorPalette, area: Rect) {
    let width = area.width.saturating_sub(6) as usize;

    let items: Vec<ListItem> = TRENDING
        .iter()
        .map(|item| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{:>2} ", item.rank), palette.trending_rank),
                    Span::styled(truncate_to_width(item.title, width), palette.sidebar_item),
                ]),
                Line::styled(format!("   {} leituras", item.views), palette.article_meta),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.panel_border)
            .title(Span::styled("Em Alta", palette.sidebar_heading)),
    );
    f.render_widget(list, area);
}
