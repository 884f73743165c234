use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Span, Spans};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, Focus, HitAreas, NameBrowser, ResultView, NO_RESULT};
use crate::fetch::PokeSource;
use crate::sprite::Sprite;
use crate::utils::{clean_text, text_to_lines};

pub const WINDOW_TITLE: &str = "PokeRecord Archive";
pub const BROWSER_TITLE: &str = "Pokemon Names (A-Z)";
const IMAGE_BOX_W: u16 = 26;

fn button<'a>(label: &'a str, focused: bool) -> Paragraph<'a> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Gray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Paragraph::new(Spans::from(Span::styled(label, style)))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

/// Split `r` into the primary content and a right-hand column for the name
/// browser. The two never overlap.
fn split_for_browser(r: Rect) -> (Rect, Rect) {
    let w = (r.width.saturating_mul(45) / 100).max(20).min(r.width);
    let main = Rect::new(r.x, r.y, r.width - w, r.height);
    let pane = Rect::new(r.x + r.width - w, r.y, w, r.height);
    (main, pane)
}

pub fn draw<B: Backend, S: PokeSource>(f: &mut Frame<B>, app: &mut App<S>) {
    let size = f.size();
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            WINDOW_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = outer.inner(size);
    f.render_widget(outer, size);

    let (content, pane) = if app.browser.is_some() {
        let (main, pane) = split_for_browser(inner);
        (main, Some(pane))
    } else {
        (inner, None)
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(4),
        ])
        .split(content);

    f.render_widget(
        Paragraph::new("Input Pokemon Name or ID:").style(Style::default().fg(Color::LightBlue)),
        rows[0],
    );

    let input_style = if app.focus == Focus::Input {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input = Paragraph::new(app.input.as_str())
        .block(Block::default().borders(Borders::ALL).border_style(input_style));
    f.render_widget(input, rows[1]);
    if app.focus == Focus::Input {
        let cursor_x = rows[1].x + 1 + app.input.chars().count() as u16;
        f.set_cursor(cursor_x.min(rows[1].right().saturating_sub(2)), rows[1].y + 1);
    }

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(22),
            Constraint::Min(0),
        ])
        .split(rows[2]);
    f.render_widget(button("Search", app.focus == Focus::Search), buttons[0]);
    f.render_widget(
        button("Show All Pokémon", app.focus == Focus::ShowAll),
        buttons[2],
    );

    if let Some(status) = app.status() {
        f.render_widget(
            Paragraph::new(Span::styled(status, Style::default().fg(Color::DarkGray))),
            rows[3],
        );
    }

    let image_w = IMAGE_BOX_W.min(rows[4].width / 2);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(image_w)])
        .split(rows[4]);
    draw_result(f, &app.result, body[0]);
    draw_image(f, app.sprite.as_ref(), body[1]);

    let mut hit = HitAreas {
        input: rows[1],
        search: buttons[0],
        show_all: buttons[2],
        ..HitAreas::default()
    };

    if let (Some(browser), Some(pane)) = (app.browser.as_mut(), pane) {
        let (list, scrollbar) = draw_browser(f, browser, app.focus == Focus::Browser, pane);
        hit.browser = pane;
        hit.list = list;
        hit.scrollbar = scrollbar;
    }
    app.hit = hit;
}

fn draw_result<B: Backend>(f: &mut Frame<B>, result: &ResultView, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Result");
    let width = block.inner(area).width.max(1) as usize;
    let lines: Vec<Spans> = match result {
        ResultView::Idle => Vec::new(),
        ResultView::NoResult => vec![Spans::from(Span::raw(NO_RESULT))],
        ResultView::Found(p) => {
            let mut lines = vec![
                Spans::from(Span::styled(
                    format!("Name: {}", p.name),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Spans::from(Span::raw(format!("Height: {}", p.height))),
                Spans::from(Span::raw(format!("Weight: {}", p.weight))),
            ];
            let text = format!("Description: {}", clean_text(&p.description));
            for line in text_to_lines(&text, width) {
                lines.push(Spans::from(Span::raw(line)));
            }
            lines
        }
    };
    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn draw_image<B: Backend>(f: &mut Frame<B>, sprite: Option<&Sprite>, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Image");
    let inner = block.inner(area);
    f.render_widget(block, area);
    let Some(sprite) = sprite else {
        return;
    };

    // Each cell shows two stacked pixels, so a square box is w cells by w/2 rows.
    let side = inner.width.min(inner.height.saturating_mul(2)) as u32;
    let cell_rows = side / 2;
    if side == 0 || cell_rows == 0 {
        return;
    }
    let pixels = sprite.cells(side, cell_rows * 2);
    let to_color = |c: Option<(u8, u8, u8)>| match c {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => Color::Reset,
    };
    let mut lines: Vec<Spans> = Vec::with_capacity(cell_rows as usize);
    for pair in pixels.chunks(2) {
        let top = &pair[0];
        let bottom = pair.get(1);
        let mut spans = Vec::with_capacity(top.len());
        for (x, &t) in top.iter().enumerate() {
            let b = bottom.and_then(|row| row.get(x).copied()).flatten();
            if t.is_none() && b.is_none() {
                spans.push(Span::raw(" "));
            } else {
                spans.push(Span::styled(
                    "▀",
                    Style::default().fg(to_color(t)).bg(to_color(b)),
                ));
            }
        }
        lines.push(Spans::from(spans));
    }
    let x_pad = (inner.width - side as u16) / 2;
    let target = Rect::new(inner.x + x_pad, inner.y, side as u16, cell_rows as u16);
    f.render_widget(Paragraph::new(lines), target);
}

/// Returns the list and scrollbar areas.
fn draw_browser<B: Backend>(
    f: &mut Frame<B>,
    browser: &mut NameBrowser,
    focused: bool,
    area: Rect,
) -> (Rect, Rect) {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(BROWSER_TITLE);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    let (list_area, bar_area) = (parts[0], parts[1]);

    browser.set_viewport(list_area.height as usize);
    let lines: Vec<Spans> = browser
        .names
        .iter()
        .enumerate()
        .skip(browser.offset)
        .take(list_area.height as usize)
        .map(|(i, name)| {
            if i == browser.selected {
                Spans::from(Span::styled(
                    name.as_str(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                ))
            } else {
                Spans::from(Span::raw(name.as_str()))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines), list_area);

    let track = bar_area.height as usize;
    let max = browser.max_offset();
    let thumb = if track == 0 || max == 0 {
        0
    } else {
        browser.offset * (track - 1) / max
    };
    let bar: Vec<Spans> = (0..track)
        .map(|y| {
            if y == thumb {
                Spans::from(Span::styled("█", Style::default().fg(Color::Gray)))
            } else {
                Spans::from(Span::styled("│", Style::default().fg(Color::DarkGray)))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(bar), bar_area);

    (list_area, bar_area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{png, record, StubSource};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render<S: PokeSource>(app: &mut App<S>) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
    }

    #[test]
    fn primary_window_layout() {
        let mut app = App::new(StubSource::default());
        app.input = "pika".into();
        let terminal = render(&mut app);
        let text = screen_text(&terminal);
        assert!(text.contains(WINDOW_TITLE));
        assert!(text.contains("Input Pokemon Name or ID:"));
        assert!(text.contains("pika"));
        assert!(text.contains("Search"));
        assert!(text.contains("Show All Pokémon"));
        assert!(app.hit.search.width > 0);
        assert!(app.hit.show_all.x > app.hit.search.x);
        assert_eq!(app.hit.list, Rect::default());
    }

    #[tokio::test]
    async fn not_found_renders_message() {
        let mut app = App::new(StubSource::default());
        app.input = "doesnotexist".into();
        app.search().await;
        let text = screen_text(&render(&mut app));
        assert!(text.contains("No Pokemon Result"));
    }

    #[tokio::test]
    async fn found_record_renders_fields_and_image() {
        let source = StubSource::default()
            .with_record(record("pikachu", Some("http://x/img.png")))
            .with_sprite("http://x/img.png", png());
        let mut app = App::new(source);
        app.input = "pikachu".into();
        app.search().await;
        let terminal = render(&mut app);
        let text = screen_text(&terminal);
        assert!(text.contains("Name: pikachu"));
        assert!(text.contains("Height: 4"));
        assert!(text.contains("Weight: 60"));
        assert!(text.contains("Description: A mouse-type Pokémon."));
        assert!(text.contains('▀'));
    }

    #[tokio::test]
    async fn browser_pane_lists_names_in_order() {
        let source = StubSource::default().with_names(&["bulbasaur", "charmander", "abra"]);
        let mut app = App::new(source);
        app.show_all().await;
        let text = screen_text(&render(&mut app));
        assert!(text.contains(BROWSER_TITLE));
        let a = text.find("abra").unwrap();
        let b = text.find("bulbasaur").unwrap();
        let c = text.find("charmander").unwrap();
        assert!(a < b && b < c);
        assert!(app.hit.list.height > 0);
        assert_eq!(app.hit.scrollbar.width, 1);
        assert_eq!(app.hit.scrollbar.x, app.hit.list.x + app.hit.list.width);
    }

    #[tokio::test]
    async fn browser_search_result_stays_visible() {
        use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
        use std::time::{Duration, Instant};

        for (w, h) in [(80, 24), (90, 30), (120, 40)] {
            let mut abra = record("abra", Some("http://x/abra.png"));
            abra.description = "Senses danger and will teleport to safety.".into();
            let source = StubSource::default()
                .with_record(abra)
                .with_sprite("http://x/abra.png", png())
                .with_names(&["bulbasaur", "charmander", "abra"]);
            let mut app = App::new(source);
            app.show_all().await;

            let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
            terminal.draw(|f| draw(f, &mut app)).unwrap();
            let click = MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: app.hit.list.x,
                row: app.hit.list.y,
                modifiers: KeyModifiers::NONE,
            };
            let t0 = Instant::now();
            app.handle_mouse_at(click, t0);
            app.handle_mouse_at(click, t0 + Duration::from_millis(100));
            assert_eq!(app.input, "abra");
            app.run_pending().await;

            terminal.draw(|f| draw(f, &mut app)).unwrap();
            let text = screen_text(&terminal);
            assert!(app.browser.is_some(), "{w}x{h}");
            assert!(text.contains(BROWSER_TITLE), "{w}x{h}");
            assert!(text.contains("teleport"), "{w}x{h}");
            assert!(text.contains('▀'), "{w}x{h}");
            assert!(app.hit.show_all.right() <= app.hit.browser.x, "{w}x{h}");
        }
    }
}
