//! The interactive demo screen.

use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{Attribute, Attributes, Color, ContentStyle},
};
use rand::rngs::StdRng;
use waterfall_masonry::{LayoutError, MasonryConfig, MasonryGrid};
use waterfall_tui::{
    RenderFrame, RenderLine, RenderSegment, Terminal, TuiApp, TuiAppBuilder, TuiError,
};

use crate::{
    card::{MasonryCard, Rgb},
    sample::{sample_card, sample_cards},
};

/// Rows taken by the header above the grid.
pub const HEADER_ROWS: usize = 2;

const ADD_BUTTON: Rgb = Rgb::from_hex(0x3b_82_f6);
const RESET_BUTTON: Rgb = Rgb::from_hex(0xf8_71_71);

/// What the event loop should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    Continue,
    /// Leave the screen.
    Quit,
}

/// A header with add/reset controls above a scrollable card grid.
#[derive(Debug)]
pub struct DemoScreen {
    grid: MasonryGrid<MasonryCard>,
    rng: StdRng,
    initial_cards: usize,
    scroll: usize,
    size: (u16, u16),
}

impl DemoScreen {
    /// Creates the screen with `initial_cards` generated cards.
    ///
    /// # Errors
    ///
    /// Fails when `config` does not validate.
    pub fn new(
        config: MasonryConfig,
        initial_cards: usize,
        mut rng: StdRng,
    ) -> Result<Self, LayoutError> {
        let cards = sample_cards(initial_cards, &mut rng);
        Ok(Self {
            grid: MasonryGrid::with_items(config, cards)?,
            rng,
            initial_cards,
            scroll: 0,
            size: (0, 0),
        })
    }

    /// The card grid.
    #[must_use]
    pub const fn grid(&self) -> &MasonryGrid<MasonryCard> {
        &self.grid
    }

    /// First grid row shown below the header.
    #[must_use]
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    /// Appends a new card.
    pub fn add_card(&mut self) {
        let card = sample_card(self.grid.len(), &mut self.rng);
        tracing::info!(id = %card.id, title = %card.title, "card added");
        self.grid.push(card);
    }

    /// Replaces every card with a fresh initial set and scrolls to the top.
    pub fn reset_cards(&mut self) {
        let cards = sample_cards(self.initial_cards, &mut self.rng);
        tracing::info!(count = cards.len(), "cards reset");
        self.grid.set_items(cards);
        self.scroll = 0;
    }

    /// Adopts a new terminal size.
    ///
    /// # Errors
    ///
    /// Never fails for sizes a terminal can report; the error comes from
    /// the grid's viewport validation.
    pub fn resize(&mut self, columns: u16, rows: u16) -> Result<(), LayoutError> {
        self.size = (columns, rows);
        self.grid.set_viewport_width(f32::from(columns))?;
        self.scroll = self.scroll.min(self.max_scroll());
        Ok(())
    }

    /// Moves the view by `delta` rows, staying within the content.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self
            .scroll
            .saturating_add_signed(delta)
            .min(self.max_scroll());
    }

    /// Applies a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind == KeyEventKind::Release {
            return Flow::Continue;
        }

        let page = isize::try_from(self.body_rows().max(1)).unwrap_or(isize::MAX);
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Flow::Quit;
            }
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('a') => self.add_card(),
            KeyCode::Char('r') => self.reset_cards(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll = self.max_scroll(),
            _ => {}
        }
        Flow::Continue
    }

    /// Settles the grid and builds the visible frame.
    ///
    /// # Errors
    ///
    /// Propagates render failures from the backend.
    pub fn compose(&mut self, app: &mut TuiApp) -> Result<RenderFrame, TuiError> {
        let body = app.settle(&mut self.grid)?;
        self.scroll = self.scroll.min(self.max_scroll());

        let mut frame = self.header();
        frame.extend(body.window(self.scroll, self.body_rows()));
        Ok(frame)
    }

    fn width(&self) -> usize {
        usize::from(self.size.0)
    }

    fn body_rows(&self) -> usize {
        usize::from(self.size.1).saturating_sub(HEADER_ROWS)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn max_scroll(&mut self) -> usize {
        let content = self.grid.layout().content_size().height.ceil().max(0.0) as usize;
        content.saturating_sub(self.body_rows())
    }

    fn header(&self) -> RenderFrame {
        let width = self.width();
        let title = ContentStyle {
            attributes: Attributes::from(Attribute::Bold),
            ..ContentStyle::new()
        };
        let controls = [
            RenderSegment::styled(" [a] Add card ", button(ADD_BUTTON)),
            RenderSegment::plain(" "),
            RenderSegment::styled(" [r] Reset ", button(RESET_BUTTON)),
            RenderSegment::plain(" [q] Quit "),
        ];

        let mut top = RenderLine::new();
        top.push(RenderSegment::styled(" Masonry", title));
        let controls_width: usize = controls.iter().map(RenderSegment::width).sum();
        let spacer = width.saturating_sub(top.width() + controls_width).max(1);
        top.push(RenderSegment::plain(" ".repeat(spacer)));
        for segment in controls {
            top.push(segment);
        }

        let status = format!(
            " {} cards · {} columns · j/k scroll",
            self.grid.len(),
            self.grid.config().columns,
        );
        let dim = ContentStyle {
            attributes: Attributes::from(Attribute::Dim),
            ..ContentStyle::new()
        };
        let mut bottom = RenderLine::new();
        bottom.push(RenderSegment::styled(status, dim));

        [top.fit(width), bottom.fit(width)].into_iter().collect()
    }
}

fn button(background: Rgb) -> ContentStyle {
    ContentStyle {
        foreground_color: Some(Color::White),
        background_color: Some(background.into()),
        attributes: Attributes::from(Attribute::Bold),
        ..ContentStyle::new()
    }
}

/// Renders the whole settled screen at `width` columns as plain text.
///
/// # Errors
///
/// Fails when `config` does not validate or rendering fails.
pub fn render_snapshot(
    config: MasonryConfig,
    initial_cards: usize,
    width: u16,
    rng: StdRng,
) -> Result<String, TuiError> {
    let mut app = TuiAppBuilder::new()
        .with_terminal(Terminal::buffered_with_size(width, u16::MAX))
        .build()?;
    let (columns, rows) = app.terminal().size()?;

    let mut screen = DemoScreen::new(config, initial_cards, rng)?;
    screen.resize(columns, rows)?;
    let frame = screen.compose(&mut app)?;
    app.present(&frame)?;

    let bytes = app
        .terminal()
        .snapshot()
        .ok_or_else(|| TuiError::Render("snapshot terminal has no buffer".to_string()))?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::terminal_layout;
    use rand::SeedableRng;

    fn screen(cards: usize) -> DemoScreen {
        DemoScreen::new(terminal_layout(), cards, StdRng::seed_from_u64(7)).unwrap()
    }

    fn app() -> TuiApp {
        TuiAppBuilder::new()
            .with_terminal(Terminal::buffered())
            .build()
            .unwrap()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn add_card_appends_the_next_number() {
        let mut screen = screen(2);
        assert_eq!(screen.handle_key(press(KeyCode::Char('a'))), Flow::Continue);

        let titles: Vec<_> = screen
            .grid()
            .items()
            .iter()
            .map(|card| card.title.as_str())
            .collect();
        assert_eq!(titles, ["Card #1", "Card #2", "Card #3"]);
    }

    #[test]
    fn reset_restores_fresh_initial_cards() {
        let mut screen = screen(2);
        screen.resize(80, 24).unwrap();
        let mut app = app();
        screen.compose(&mut app).unwrap();
        let before: Vec<_> = screen.grid().items().iter().map(|card| card.id).collect();

        screen.add_card();
        screen.add_card();
        screen.handle_key(press(KeyCode::Char('r')));

        assert_eq!(screen.grid().len(), 2);
        assert!(screen.grid().heights().is_empty());
        assert_eq!(screen.scroll(), 0);
        assert!(
            screen
                .grid()
                .items()
                .iter()
                .all(|card| !before.contains(&card.id))
        );
    }

    #[test]
    fn quit_keys() {
        let mut screen = screen(0);
        assert_eq!(screen.handle_key(press(KeyCode::Char('q'))), Flow::Quit);
        assert_eq!(screen.handle_key(press(KeyCode::Esc)), Flow::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(screen.handle_key(ctrl_c), Flow::Quit);
        assert_eq!(screen.handle_key(press(KeyCode::Char('c'))), Flow::Continue);
    }

    #[test]
    fn scrolling_stays_inside_short_content() {
        let mut screen = screen(2);
        screen.resize(80, 40).unwrap();
        screen.scroll_by(5);
        assert_eq!(screen.scroll(), 0);
    }

    #[test]
    fn scrolling_reaches_the_bottom_of_long_content() {
        let mut screen = screen(30);
        screen.resize(60, 10).unwrap();
        screen.handle_key(press(KeyCode::End));
        assert!(screen.scroll() > 0);

        let mut app = app();
        let frame = screen.compose(&mut app).unwrap();
        assert_eq!(frame.len(), 10);

        // Measured heights replace the placeholders, so jump again.
        screen.handle_key(press(KeyCode::End));
        let bottom = screen.scroll();
        assert!(bottom > 0);
        screen.handle_key(press(KeyCode::Down));
        assert_eq!(screen.scroll(), bottom);
        screen.handle_key(press(KeyCode::Up));
        assert_eq!(screen.scroll(), bottom - 1);
        screen.handle_key(press(KeyCode::Home));
        assert_eq!(screen.scroll(), 0);
    }

    #[test]
    fn frame_starts_with_header() {
        let mut screen = screen(2);
        screen.resize(80, 24).unwrap();
        let mut app = app();
        let frame = screen.compose(&mut app).unwrap();

        let text = frame.to_plain_text();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with(" Masonry"));
        assert!(first.contains("[a] Add card"));
        assert!(first.contains("[r] Reset"));
        assert!(text.contains("2 cards · 3 columns"));
        assert!(frame.lines().iter().all(|line| line.width() <= 80));
    }

    #[test]
    fn drawn_rows_match_layout_height_with_fractional_gaps() {
        let settings = crate::Settings::from_toml("[layout]\nrow_gap = 0.5\npadding_top = 1.5\n")
            .unwrap();
        let mut screen =
            DemoScreen::new(settings.masonry_config(), 12, StdRng::seed_from_u64(5)).unwrap();
        screen.resize(60, 1000).unwrap();

        let mut app = app();
        let frame = screen.compose(&mut app).unwrap();
        let content = screen.grid.layout().content_size().height;
        assert_eq!(content.fract(), 0.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let content = content as usize;
        assert_eq!(frame.len() - HEADER_ROWS, content);
    }

    #[test]
    fn snapshot_shows_every_card() {
        let text =
            render_snapshot(terminal_layout(), 5, 72, StdRng::seed_from_u64(11)).unwrap();
        for n in 1..=5 {
            assert!(text.contains(&format!("Card #{n}")), "missing card {n}");
        }
    }
}
