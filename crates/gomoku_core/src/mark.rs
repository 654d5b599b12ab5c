use std::fmt;

/// State of a single board cell.
///
/// Three participant identities exist (the human and the two AI strategies),
/// but any one game only ever uses two of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mark {
    #[default]
    Empty,
    PlayerOne,
    PlayerTwo,
    PlayerThree,
}

impl Mark {
    pub const PLAYERS: [Mark; 3] = [Mark::PlayerOne, Mark::PlayerTwo, Mark::PlayerThree];

    /// Character used for this mark in textual board layouts.
    pub fn symbol(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::PlayerOne => 'X',
            Mark::PlayerTwo => 'O',
            Mark::PlayerThree => 'A',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Mark::Empty),
            'X' => Some(Mark::PlayerOne),
            'O' => Some(Mark::PlayerTwo),
            'A' => Some(Mark::PlayerThree),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Mark::Empty
    }

    #[inline]
    pub fn is_player(self) -> bool {
        self != Mark::Empty
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
