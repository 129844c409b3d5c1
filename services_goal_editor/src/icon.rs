//! Icon picker capability
//!
//! The picker widget is external. The session only needs the chosen symbol,
//! so whatever payload the widget emits is read through [`IconChoice`].

/// A picker selection
pub trait IconChoice {
    /// The displayable symbol that was picked
    fn symbol(&self) -> &str;
}

impl IconChoice for str {
    fn symbol(&self) -> &str {
        self
    }
}

impl IconChoice for String {
    fn symbol(&self) -> &str {
        self.as_str()
    }
}

/// An icon picker that can be presented to the user
pub trait IconPicker {
    type Choice: IconChoice;

    /// Presents the picker once
    ///
    /// Returns the selection, or `None` if the user dismissed the picker.
    fn present(&mut self) -> Option<Self::Choice>;
}

/// Visibility of the icon picker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IconPickerState {
    #[default]
    Closed,
    Open,
}

impl IconPickerState {
    /// Returns the state after a user toggle
    pub fn toggled(self) -> Self {
        match self {
            IconPickerState::Closed => IconPickerState::Open,
            IconPickerState::Open => IconPickerState::Closed,
        }
    }

    pub fn is_open(self) -> bool {
        self == IconPickerState::Open
    }
}
