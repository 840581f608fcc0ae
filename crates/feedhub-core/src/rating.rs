//! Five-star rating input. The selected value lives with the caller; this
//! module only maps activation events to the star that was chosen.

pub const MAX_STARS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingKey {
    Enter,
    Space,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingEvent {
    Pointer,
    Key(RatingKey),
}

impl RatingEvent {
    pub fn activates(self) -> bool {
        matches!(
            self,
            RatingEvent::Pointer | RatingEvent::Key(RatingKey::Enter | RatingKey::Space)
        )
    }
}

pub struct RatingInput;

impl RatingInput {
    /// The value to emit when `star` receives `event`, if any.
    pub fn activate(star: u8, event: RatingEvent) -> Option<u8> {
        event.activates().then_some(star)
    }

    pub fn stars() -> impl Iterator<Item = u8> {
        1..=MAX_STARS
    }

    pub fn is_lit(value: u8, star: u8) -> bool {
        value >= star
    }

    pub fn tooltip(star: u8) -> String {
        if star > 1 {
            format!("{star} stars")
        } else {
            format!("{star} star")
        }
    }

    pub fn mood(rating: u8) -> &'static str {
        match rating {
            r if r >= 4 => "Loved it",
            3 => "It was okay",
            _ => "Needs improvement",
        }
    }
}
