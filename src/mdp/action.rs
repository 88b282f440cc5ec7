use std::fmt;

/// One of the four moves available in every free cell.
///
/// The declaration order is also the enumeration order used when breaking
/// ties between equally good actions: `Up`, `Right`, `Down`, `Left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Action {
    /// All actions in enumeration order.
    pub const ALL: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

    /// Unit coordinate offset `(dx, dy)`. `y` grows downwards, so `Up` is `(0, -1)`.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (0, -1),
            Action::Right => (1, 0),
            Action::Down => (0, 1),
            Action::Left => (-1, 0),
        }
    }

    /// Numeric encoding: 0 = up, 1 = right, 2 = down, 3 = left.
    pub fn code(self) -> u8 {
        match self {
            Action::Up => 0,
            Action::Right => 1,
            Action::Down => 2,
            Action::Left => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Action> {
        Action::ALL.get(code as usize).copied()
    }

    pub fn symbol(self) -> char {
        match self {
            Action::Up => '↑',
            Action::Right => '→',
            Action::Down => '↓',
            Action::Left => '←',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Up => "UP",
            Action::Right => "RIGHT",
            Action::Down => "DOWN",
            Action::Left => "LEFT",
        };
        f.write_str(name)
    }
}
