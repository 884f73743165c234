//! Application state and event handling.
//!
//! Input events are handled in two steps: `handle_key` / `handle_mouse` only
//! update state and record a [`Pending`] action, and `run_pending` performs the
//! network work for it. The main loop draws in between so the status line is
//! visible while a request blocks.

use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use tracing::{info, warn};

use crate::fetch::PokeSource;
use crate::models::PokemonRecord;
use crate::sprite::Sprite;

/// Two clicks on the same row within this window count as a double click.
pub const DOUBLE_CLICK: Duration = Duration::from_millis(400);

pub const NO_RESULT: &str = "No Pokemon Result";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Search,
    ShowAll,
    Browser,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Idle,
    Found(PokemonRecord),
    NoResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Search,
    ShowAll,
}

/// Screen areas from the last draw, used to route mouse clicks.
#[derive(Debug, Clone, Copy, Default)]
pub struct HitAreas {
    pub input: Rect,
    pub search: Rect,
    pub show_all: Rect,
    pub browser: Rect,
    pub list: Rect,
    pub scrollbar: Rect,
}

fn hit(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
}

/// The "all names" pane. List and scrollbar share `offset`.
#[derive(Debug, Clone, Default)]
pub struct NameBrowser {
    pub names: Vec<String>,
    pub selected: usize,
    pub offset: usize,
    view_h: usize,
    last_click: Option<(usize, Instant)>,
}

impl NameBrowser {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            ..Self::default()
        }
    }

    pub fn selected_name(&self) -> Option<&str> {
        self.names.get(self.selected).map(String::as_str)
    }

    pub fn max_offset(&self) -> usize {
        self.names.len().saturating_sub(self.view_h.max(1))
    }

    /// Record how many rows fit on screen and keep the offset in range.
    pub fn set_viewport(&mut self, rows: usize) {
        self.view_h = rows;
        self.offset = self.offset.min(self.max_offset());
    }

    fn follow_selection(&mut self) {
        let h = self.view_h.max(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + h {
            self.offset = self.selected + 1 - h;
        }
    }

    pub fn next(&mut self) {
        if !self.names.is_empty() {
            self.selected = (self.selected + 1) % self.names.len();
            self.follow_selection();
        }
    }

    pub fn previous(&mut self) {
        if !self.names.is_empty() {
            if self.selected == 0 {
                self.selected = self.names.len() - 1;
            } else {
                self.selected -= 1;
            }
            self.follow_selection();
        }
    }

    pub fn page_down(&mut self) {
        if !self.names.is_empty() {
            self.selected = (self.selected + self.view_h.max(1)).min(self.names.len() - 1);
            self.follow_selection();
        }
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.view_h.max(1));
        self.follow_selection();
    }

    pub fn home(&mut self) {
        self.selected = 0;
        self.follow_selection();
    }

    pub fn end(&mut self) {
        self.selected = self.names.len().saturating_sub(1);
        self.follow_selection();
    }

    /// Scroll the view without moving the selection.
    pub fn scroll_by(&mut self, delta: isize) {
        let target = self.offset as isize + delta;
        self.offset = target.clamp(0, self.max_offset() as isize) as usize;
    }

    /// Jump the view to where `pos` of `track_len` points on the scrollbar.
    pub fn scroll_to_track(&mut self, pos: usize, track_len: usize) {
        if track_len <= 1 {
            self.offset = 0;
            return;
        }
        let pos = pos.min(track_len - 1);
        self.offset = pos * self.max_offset() / (track_len - 1);
    }

    /// Select the row `row` lines below the top of the view. Returns true
    /// when this completes a double click on that row.
    pub fn click_row(&mut self, row: usize, now: Instant) -> bool {
        let index = self.offset + row;
        if index >= self.names.len() {
            self.last_click = None;
            return false;
        }
        self.selected = index;
        let double = matches!(
            self.last_click,
            Some((prev, at)) if prev == index && now.duration_since(at) <= DOUBLE_CLICK
        );
        self.last_click = if double { None } else { Some((index, now)) };
        double
    }
}

pub struct App<S> {
    source: S,
    pub input: String,
    pub focus: Focus,
    pub result: ResultView,
    pub sprite: Option<Sprite>,
    pub browser: Option<NameBrowser>,
    pub pending: Option<Pending>,
    pub running: bool,
    pub hit: HitAreas,
}

impl<S: PokeSource> App<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            input: String::new(),
            focus: Focus::Input,
            result: ResultView::Idle,
            sprite: None,
            browser: None,
            pending: None,
            running: true,
            hit: HitAreas::default(),
        }
    }

    /// Text for the status line while an action is waiting to run.
    pub fn status(&self) -> Option<&'static str> {
        match self.pending {
            Some(Pending::Search) => Some("Searching…"),
            Some(Pending::ShowAll) => Some("Loading names…"),
            None => None,
        }
    }

    pub async fn run_pending(&mut self) {
        match self.pending.take() {
            Some(Pending::Search) => self.search().await,
            Some(Pending::ShowAll) => self.show_all().await,
            None => {}
        }
    }

    /// Look up whatever is in the input field and show the outcome.
    pub async fn search(&mut self) {
        let identifier = self.input.clone();
        info!(identifier = %identifier, "search");
        match self.source.fetch_by_identifier(&identifier).await {
            Ok(Some(record)) => {
                let sprite_url = record.sprite.clone();
                self.result = ResultView::Found(record);
                self.load_sprite(sprite_url.as_deref()).await;
            }
            // The previous image stays on screen.
            Ok(None) => self.result = ResultView::NoResult,
            Err(e) => {
                warn!(identifier = %identifier, error = %e, "lookup failed");
                self.result = ResultView::NoResult;
            }
        }
    }

    async fn load_sprite(&mut self, url: Option<&str>) {
        let Some(url) = url else {
            self.sprite = None;
            return;
        };
        let decoded = match self.source.fetch_sprite(url).await {
            Ok(bytes) => Sprite::decode(&bytes),
            Err(e) => Err(e),
        };
        match decoded {
            Ok(sprite) => self.sprite = Some(sprite),
            Err(e) => {
                warn!(url, error = %e, "sprite unavailable");
                self.sprite = None;
            }
        }
    }

    /// Fetch the full name list and open it in the browser pane.
    pub async fn show_all(&mut self) {
        info!("show all");
        let names = self.source.fetch_all_names().await.unwrap_or_else(|e| {
            warn!(error = %e, "name list failed");
            Vec::new()
        });
        self.browser = Some(NameBrowser::new(names));
        self.focus = Focus::Browser;
    }

    /// Copy the selected browser row into the input and queue a search.
    pub fn activate_selected(&mut self) {
        let Some(name) = self.browser.as_ref().and_then(|b| b.selected_name()) else {
            return;
        };
        self.input = name.to_string();
        self.pending = Some(Pending::Search);
    }

    fn close_browser(&mut self) {
        self.browser = None;
        if self.focus == Focus::Browser {
            self.focus = Focus::Input;
        }
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Search,
            Focus::Search => Focus::ShowAll,
            Focus::ShowAll if self.browser.is_some() => Focus::Browser,
            Focus::ShowAll | Focus::Browser => Focus::Input,
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }
        match key.code {
            KeyCode::Esc => {
                if self.browser.is_some() {
                    self.close_browser();
                } else {
                    self.running = false;
                }
            }
            KeyCode::Tab => self.cycle_focus(),
            _ => match self.focus {
                Focus::Input => self.input_key(key.code),
                Focus::Search => {
                    if key.code == KeyCode::Enter {
                        self.pending = Some(Pending::Search);
                    }
                }
                Focus::ShowAll => {
                    if key.code == KeyCode::Enter {
                        self.pending = Some(Pending::ShowAll);
                    }
                }
                Focus::Browser => self.browser_key(key.code),
            },
        }
    }

    fn input_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => self.pending = Some(Pending::Search),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn browser_key(&mut self, code: KeyCode) {
        if code == KeyCode::Enter {
            self.activate_selected();
            return;
        }
        let Some(browser) = self.browser.as_mut() else {
            return;
        };
        match code {
            KeyCode::Down => browser.next(),
            KeyCode::Up => browser.previous(),
            KeyCode::PageDown => browser.page_down(),
            KeyCode::PageUp => browser.page_up(),
            KeyCode::Home => browser.home(),
            KeyCode::End => browser.end(),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, ev: MouseEvent) {
        self.handle_mouse_at(ev, Instant::now());
    }

    pub fn handle_mouse_at(&mut self, ev: MouseEvent, now: Instant) {
        let (col, row) = (ev.column, ev.row);
        let hit_areas = self.hit;
        match ev.kind {
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                let delta = if ev.kind == MouseEventKind::ScrollDown { 3 } else { -3 };
                if let Some(browser) = self.browser.as_mut() {
                    if hit(hit_areas.list, col, row) || hit(hit_areas.scrollbar, col, row) {
                        browser.scroll_by(delta);
                    }
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(browser) = self.browser.as_mut() {
                    if hit(hit_areas.list, col, row) {
                        self.focus = Focus::Browser;
                        if browser.click_row((row - hit_areas.list.y) as usize, now) {
                            self.activate_selected();
                        }
                        return;
                    }
                    if hit(hit_areas.scrollbar, col, row) {
                        self.focus = Focus::Browser;
                        browser.scroll_to_track(
                            (row - hit_areas.scrollbar.y) as usize,
                            hit_areas.scrollbar.height as usize,
                        );
                        return;
                    }
                    // Border and title of the pane.
                    if hit(hit_areas.browser, col, row) {
                        self.focus = Focus::Browser;
                        return;
                    }
                }
                if hit(hit_areas.input, col, row) {
                    self.focus = Focus::Input;
                } else if hit(hit_areas.search, col, row) {
                    self.focus = Focus::Search;
                    self.pending = Some(Pending::Search);
                } else if hit(hit_areas.show_all, col, row) {
                    self.focus = Focus::ShowAll;
                    self.pending = Some(Pending::ShowAll);
                }
            }
            _ => {}
        }
    }
}
