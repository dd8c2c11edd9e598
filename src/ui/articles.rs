use crate::app::{App, Focus};
use crate::feed::FeedView;
use crate::news::{category_by_slug, Article, FeedFilter};
use crate::theme::ColorPalette;
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const FEATURED_LABEL: &str = " DESTAQUE ";
const SAVED_MARKER: &str = "★ ";
/// Height of the excerpt panel under the list, borders included.
const PREVIEW_HEIGHT: u16 = 7;

/// Title of the article panel for the current view.
fn heading(app: &App) -> String {
    match app.session.feed().view() {
        FeedView::Saved => "Artigos Salvos".to_string(),
        FeedView::Feed(FeedFilter::All) => "Destaques do Feed".to_string(),
        FeedView::Feed(FeedFilter::Search(query)) => {
            format!("Resultados para \"{}\"", strip_control_chars(query))
        }
        FeedView::Feed(FeedFilter::Category(slug)) => category_by_slug(slug)
            .map(|c| c.name.to_string())
            .unwrap_or_else(|| slug.clone()),
    }
}

/// Render the article list and, below it, the excerpt of the selected
/// article.
pub fn render(f: &mut Frame, app: &App, palette: &ColorPalette, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    if area.height >= PREVIEW_HEIGHT * 2 {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(PREVIEW_HEIGHT)])
            .split(area);
        render_list(f, app, palette, chunks[0]);
        render_preview(f, app, palette, chunks[1]);
    } else {
        render_list(f, app, palette, area);
    }
}

fn render_list(f: &mut Frame, app: &App, palette: &ColorPalette, area: Rect) {
    let session = &app.session;
    let feed = session.feed();
    let saved_view = *feed.view() == FeedView::Saved;
    // Room for text inside the borders.
    let width = area.width.saturating_sub(2) as usize;

    let mut items: Vec<ListItem> = Vec::new();
    let mut selected = None;

    if feed.is_loading() {
        items.push(ListItem::new(Line::styled("Carregando...", palette.notice)));
    } else if session.visible_articles().next().is_none() {
        let msg = if saved_view {
            "Você ainda não salvou nenhum artigo. Pressione 's' para guardar uma notícia."
        } else {
            "Nenhuma notícia encontrada."
        };
        items.push(ListItem::new(Line::styled(msg, palette.notice)));
    } else {
        let has_featured = feed.featured().is_some();
        for (i, article) in session.visible_articles().enumerate() {
            let featured = i == 0 && has_featured;
            let saved = session.is_saved(&article.id);
            items.push(article_item(palette, article, featured, saved, width));
        }
        selected = Some(app.selected_article);

        let notice = if feed.is_loading_more() {
            Some("Carregando mais notícias...")
        } else if !saved_view && !feed.has_more() {
            Some("Você chegou ao fim das notícias.")
        } else {
            None
        };
        if let Some(notice) = notice {
            items.push(ListItem::new(Line::styled(notice, palette.notice)));
        }
    }

    let border_style = if app.focus == Focus::Articles {
        palette.panel_border_focused
    } else {
        palette.panel_border
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(heading(app)),
        )
        .highlight_style(palette.article_selected);

    let mut state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, area, &mut state);
}

/// Two lines per article: marker and title, then category and meta.
fn article_item(
    palette: &ColorPalette,
    article: &Article,
    featured: bool,
    saved: bool,
    width: usize,
) -> ListItem<'static> {
    let mut title_spans = Vec::with_capacity(3);
    let mut used = 0;
    if featured {
        title_spans.push(Span::styled(FEATURED_LABEL, palette.featured_label));
        title_spans.push(Span::raw(" "));
        used += FEATURED_LABEL.len() + 1;
    }
    if saved {
        title_spans.push(Span::styled(SAVED_MARKER, palette.saved_marker));
        used += 2;
    }
    let title = strip_control_chars(&article.title);
    let title_style = if featured {
        palette.featured_title
    } else {
        palette.article_title
    };
    title_spans.push(Span::styled(
        truncate_to_width(&title, width.saturating_sub(used)).into_owned(),
        title_style,
    ));

    let category = strip_control_chars(&article.category).into_owned();
    let meta = format!(
        " · {} · {} · {}",
        strip_control_chars(&article.author),
        strip_control_chars(&article.date),
        article.read_time
    );
    let meta_room = width.saturating_sub(category.chars().count());
    let meta_line = Line::from(vec![
        Span::styled(category, palette.category_label),
        Span::styled(
            truncate_to_width(&meta, meta_room).into_owned(),
            palette.article_meta,
        ),
    ]);

    ListItem::new(vec![Line::from(title_spans), meta_line])
}

/// Excerpt of the selected article, word-wrapped.
fn render_preview(f: &mut Frame, app: &App, palette: &ColorPalette, area: Rect) {
    let text = if app.session.is_loading() {
        Text::default()
    } else {
        match app.selected_article() {
            Some(article) => Text::from(vec![
                Line::styled(
                    strip_control_chars(&article.title).into_owned(),
                    palette.article_title,
                ),
                Line::styled(
                    strip_control_chars(&article.excerpt).into_owned(),
                    palette.article_excerpt,
                ),
            ]),
            None => Text::default(),
        }
    };

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.panel_border)
                .title("Resumo"),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
