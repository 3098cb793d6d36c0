/// Editing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    /// `:` command line
    Command,
    /// `/` search prompt
    Search,
    Visual,
}

impl Mode {
    /// Status line label
    pub fn label(self) -> &'static str {
        match self {
            Mode::Normal => "-- NORMAL --",
            Mode::Insert => "-- INSERT --",
            Mode::Command => "-- COMMAND --",
            Mode::Search => "-- SEARCH --",
            Mode::Visual => "-- VISUAL --",
        }
    }

    /// Mode reads keys into a prompt line
    pub fn is_prompt(self) -> bool {
        matches!(self, Mode::Command | Mode::Search)
    }
}
