//! Generated demo data.

use rand::Rng;
use uuid::Uuid;

use crate::card::{MasonryCard, Rgb};

/// Number of cards the demo starts with and resets to.
pub const INITIAL_CARDS: usize = 2;

/// Card backgrounds, cycled by card index.
pub const PALETTE: [Rgb; 5] = [
    Rgb::from_hex(0xbf_db_fe),
    Rgb::from_hex(0xfe_ca_ca),
    Rgb::from_hex(0xbb_f7_d0),
    Rgb::from_hex(0xfd_e6_8a),
    Rgb::from_hex(0xe9_d5_ff),
];

/// Upper bound for the description length, in groups of four words.
const MAX_DESCRIPTION_GROUPS: usize = 10;

const SAMPLE_TEXT: &str = "Sample card for the waterfall layout demo. Project: a UI kit for a \
    small mobile application. Task: build a masonry grid that places every card in the \
    shortest column and keeps the columns balanced as cards of different heights arrive";

/// Builds the card shown at `index`.
///
/// The description takes a random multiple of four words from a fixed
/// sentence, so it may be empty.
pub fn sample_card<R: Rng + ?Sized>(index: usize, rng: &mut R) -> MasonryCard {
    let groups = rng.gen_range(0..=MAX_DESCRIPTION_GROUPS);
    let description = SAMPLE_TEXT
        .split_whitespace()
        .take(groups * 4)
        .collect::<Vec<_>>()
        .join(" ");

    MasonryCard {
        id: Uuid::new_v4(),
        title: format!("Card #{}", index + 1),
        description,
        color: PALETTE[index % PALETTE.len()],
    }
}

/// Builds `count` cards numbered from one.
pub fn sample_cards<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<MasonryCard> {
    (0..count).map(|index| sample_card(index, rng)).collect()
}
