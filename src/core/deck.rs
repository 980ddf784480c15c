//! The fixed 52-card deck used as a lookup ring.
//!
//! Order matters: every selector offset is taken modulo [`DECK_SIZE`] over
//! this exact sequence (hearts, clubs, diamonds, spades; ace to king).

use crate::domain::model::Card;

pub const DECK_SIZE: usize = 52;

const fn card(name: &'static str, keywords: &'static str, advice: &'static str) -> Card {
    Card {
        name,
        keywords,
        advice,
    }
}

#[rustfmt::skip]
pub static DECK: [Card; DECK_SIZE] = [
    // Hearts
    card("Ace of Hearts", "Birth of passion and emotional renewal.", "Lead with compassion and allow yourself to begin again."),
    card("Two of Hearts", "Connection and heartfelt alliances.", "Nurture intimate bonds through honest conversation."),
    card("Three of Hearts", "Creative expression of love.", "Experiment with new ways to communicate affection."),
    card("Four of Hearts", "Emotional stability and home.", "Create rituals that remind you of emotional safety."),
    card("Five of Hearts", "Emotional adventure.", "Travel, learn, and keep your heart curious."),
    card("Six of Hearts", "Karmic balance in relationships.", "Choose forgiveness and live your values consistently."),
    card("Seven of Hearts", "Spiritual tests of love.", "Trust the unseen and move beyond fear of loss."),
    card("Eight of Hearts", "Magnetic charisma.", "Use your influence to inspire, not control."),
    card("Nine of Hearts", "Emotional fulfillment.", "Release attachments that block your joy."),
    card("Ten of Hearts", "Celebration and community.", "Host gatherings that keep your heart open."),
    card("Jack of Hearts", "Devotional creativity.", "Serve with humility and playful spirit."),
    card("Queen of Hearts", "Sacred nurturer.", "Set boundaries so your care is sustainable."),
    card("King of Hearts", "Emotional mastery.", "Lead with emotional intelligence and kindness."),
    // Clubs
    card("Ace of Clubs", "Curiosity and mental sparks.", "Follow the question that lights you up."),
    card("Two of Clubs", "Shared ideas.", "Collaborate with someone who mirrors your brilliance."),
    card("Three of Clubs", "Creative mind.", "Channel mental restlessness into art."),
    card("Four of Clubs", "Mental foundation.", "Design systems that let you feel secure."),
    card("Five of Clubs", "Quest for truth.", "Study diverse viewpoints to grow."),
    card("Six of Clubs", "Messenger of inspiration.", "Speak up; your ideas change lives."),
    card("Seven of Clubs", "Faith in your voice.", "Silence doubt with spiritual practice."),
    card("Eight of Clubs", "Mental focus.", "Discipline your genius to achieve breakthroughs."),
    card("Nine of Clubs", "Completion of ideas.", "Share your wisdom freely and move on."),
    card("Ten of Clubs", "Mastermind success.", "Teach what you know to elevate others."),
    card("Jack of Clubs", "Inventive storyteller.", "Gamify learning to keep curiosity alive."),
    card("Queen of Clubs", "Intuitive intellect.", "Trust inner knowing when logic is noisy."),
    card("King of Clubs", "Visionary leadership.", "Strategize, delegate, and empower minds."),
    // Diamonds
    card("Ace of Diamonds", "Manifestation spark.", "Initiate ventures aligned with your values."),
    card("Two of Diamonds", "Values partnerships.", "Invest with allies who share your mission."),
    card("Three of Diamonds", "Creative enterprise.", "Prototype boldly and learn from iteration."),
    card("Four of Diamonds", "Financial foundation.", "Budget with intention and gratitude."),
    card("Five of Diamonds", "Freedom with resources.", "Experiment with new revenue channels."),
    card("Six of Diamonds", "Karmic balance in value.", "Pay it forward and settle open accounts."),
    card("Seven of Diamonds", "Faith in prosperity.", "Release scarcity patterns with trust."),
    card("Eight of Diamonds", "Magnetic value creator.", "Elevate your skills through disciplined focus."),
    card("Nine of Diamonds", "Completion and generosity.", "Donate or invest to expand collective wealth."),
    card("Ten of Diamonds", "Legacy of abundance.", "Scale what works and celebrate milestones."),
    card("Jack of Diamonds", "Creative investor.", "Pitch imaginative offers with heart."),
    card("Queen of Diamonds", "Resourceful mentor.", "Curate experiences that feel luxurious and wise."),
    card("King of Diamonds", "Regal commerce.", "Lead enterprises with integrity."),
    // Spades
    card("Ace of Spades", "Spiritual initiation.", "Embrace transformation with courage."),
    card("Two of Spades", "Sacred allies.", "Partner with those who mirror your work ethic."),
    card("Three of Spades", "Creative work-life blend.", "Invent careers that fit your soul."),
    card("Four of Spades", "Stability in purpose.", "Guard your energy with healthy structures."),
    card("Five of Spades", "Adventure in purpose.", "Make brave pivots that honour your truth."),
    card("Six of Spades", "Karmic destiny.", "Stay consistent; the universe is taking notes."),
    card("Seven of Spades", "Faith in purpose.", "Transcend worry through spiritual discipline."),
    card("Eight of Spades", "Powerhouse worker.", "Channel intensity into sustainable routines."),
    card("Nine of Spades", "Completion of cycles.", "Release what is ending with reverence."),
    card("Ten of Spades", "Mastery of craft.", "Build systems that hold your ambitious visions."),
    card("Jack of Spades", "Mystic artisan.", "Blend sacred practice with practical magic."),
    card("Queen of Spades", "Soulful authority.", "Lead through embodiment and devotion."),
    card("King of Spades", "Master teacher.", "Share the blueprint that transformed you."),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_deck_has_52_unique_cards() {
        let names: HashSet<&str> = DECK.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), DECK_SIZE);
    }

    #[test]
    fn test_deck_order_by_suit() {
        assert_eq!(DECK[0].name, "Ace of Hearts");
        assert_eq!(DECK[12].name, "King of Hearts");
        assert_eq!(DECK[13].name, "Ace of Clubs");
        assert_eq!(DECK[26].name, "Ace of Diamonds");
        assert_eq!(DECK[39].name, "Ace of Spades");
        assert_eq!(DECK[51].name, "King of Spades");
    }

    #[test]
    fn test_no_blank_fields() {
        for card in DECK.iter() {
            assert!(!card.keywords.is_empty(), "{} has no keywords", card.name);
            assert!(!card.advice.is_empty(), "{} has no advice", card.name);
        }
    }
}
