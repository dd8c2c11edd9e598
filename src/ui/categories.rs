use crate::app::{category_menu, App, Focus};
use crate::theme::ColorPalette;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the category panel.
///
/// The active view is marked with `›`; the cursor is only highlighted while
/// the panel has focus.
pub fn render(f: &mut Frame, app: &App, palette: &ColorPalette, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Categories;
    let active = app.session.feed().active_category();
    let searching = app.session.feed().search_query().is_some();

    let items: Vec<ListItem> = category_menu()
        .enumerate()
        .map(|(i, (slug, name))| {
            let is_active = slug == active && !searching;
            let style = if is_focused && i == app.selected_category {
                palette.category_selected
            } else if is_active {
                palette.category_active
            } else {
                palette.category_normal
            };
            let marker = if is_active { "› " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(name, style),
            ]))
        })
        .collect();

    let border_style = if is_focused {
        palette.panel_border_focused
    } else {
        palette.panel_border
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Categorias"),
        )
        .highlight_style(Style::default());

    let mut state = ListState::default().with_selected(Some(app.selected_category));
    f.render_stateful_widget(list, area, &mut state);
}
