//! Sample cards and how they draw in the terminal.

use crossterm::style::{Attribute, Attributes, Color, ContentStyle};
use uuid::Uuid;
use waterfall_tui::{RenderLine, RenderSegment, TerminalView, wrap_text};

/// Horizontal padding inside a card, in cells.
const CARD_PADDING: usize = 1;

/// Text colour on the light card backgrounds.
const INK: Rgb = Rgb::from_hex(0x11_18_27);

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Builds a colour from a `0xRRGGBB` literal.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        }
    }
}

impl From<Rgb> for Color {
    fn from(value: Rgb) -> Self {
        Self::Rgb {
            r: value.r,
            g: value.g,
            b: value.b,
        }
    }
}

/// A card shown in the demo grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MasonryCard {
    /// Unique id.
    pub id: Uuid,
    /// Bold heading.
    pub title: String,
    /// Body text; may be empty.
    pub description: String,
    /// Background colour.
    pub color: Rgb,
}

impl MasonryCard {
    fn base_style(&self) -> ContentStyle {
        ContentStyle {
            foreground_color: Some(INK.into()),
            background_color: Some(self.color.into()),
            ..ContentStyle::new()
        }
    }
}

impl TerminalView for MasonryCard {
    fn draw(&self, width: usize) -> Vec<RenderLine> {
        if width == 0 {
            return Vec::new();
        }

        let padding = if width > CARD_PADDING * 2 { CARD_PADDING } else { 0 };
        let text_width = width - padding * 2;
        let base = self.base_style();
        let title = ContentStyle {
            attributes: Attributes::from(Attribute::Bold),
            ..base
        };

        let mut lines = vec![filled_line("", base, base, padding, width)];
        for text in wrap_text(&self.title, text_width) {
            lines.push(filled_line(&text, title, base, padding, width));
        }
        for text in wrap_text(&self.description, text_width) {
            lines.push(filled_line(&text, base, base, padding, width));
        }
        lines.push(filled_line("", base, base, padding, width));
        lines
    }
}

/// One card row: `text` after `padding` cells, the rest filled with `fill`.
fn filled_line(
    text: &str,
    style: ContentStyle,
    fill: ContentStyle,
    padding: usize,
    width: usize,
) -> RenderLine {
    let mut line = RenderLine::new();
    if padding > 0 {
        line.push(RenderSegment::styled(" ".repeat(padding), fill));
    }
    let text = RenderSegment::styled(text, style);
    let rest = width.saturating_sub(padding + text.width());
    if !text.content().is_empty() {
        line.push(text);
    }
    if rest > 0 {
        line.push(RenderSegment::styled(" ".repeat(rest), fill));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(description: &str) -> MasonryCard {
        MasonryCard {
            id: Uuid::nil(),
            title: "Card #1".to_string(),
            description: description.to_string(),
            color: Rgb::from_hex(0xbf_db_fe),
        }
    }

    #[test]
    fn hex_colors_split_into_channels() {
        assert_eq!(
            Rgb::from_hex(0xbf_db_fe),
            Rgb {
                r: 0xbf,
                g: 0xdb,
                b: 0xfe
            }
        );
    }

    #[test]
    fn card_without_description_is_title_between_margins() {
        let lines = card("").draw(12);
        let text: Vec<String> = lines.iter().map(RenderLine::text).collect();
        assert_eq!(text, [" ".repeat(12), format!(" Card #1{}", " ".repeat(4)), " ".repeat(12)]);
        assert!(lines.iter().all(|line| line.width() == 12));
    }

    #[test]
    fn description_wraps_inside_padding() {
        let lines = card("one two three four").draw(12);
        let text: Vec<String> = lines.iter().map(RenderLine::text).collect();
        assert_eq!(text.len(), 5);
        assert_eq!(text[2], " one two    ");
        assert_eq!(text[3], " three four ");

        // One cell narrower leaves a ten-cell line only nine cells of text.
        let narrow: Vec<String> = card("one two three four")
            .draw(11)
            .iter()
            .map(RenderLine::text)
            .collect();
        assert_eq!(narrow.len(), 6);
        assert_eq!(narrow[3], " three     ");
        assert_eq!(narrow[4], " four      ");
    }

    #[test]
    fn narrow_cards_drop_padding() {
        let lines = card("").draw(2);
        assert!(lines.iter().all(|line| line.width() == 2));
    }

    #[test]
    fn background_is_applied_to_every_segment() {
        let card = card("body");
        let expected = Some(Color::from(card.color));
        for line in card.draw(10) {
            for segment in line.segments() {
                assert_eq!(segment.style().background_color, expected);
            }
        }
    }
}
