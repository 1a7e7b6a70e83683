use crate::runtime::event::CloseReason;
use crate::terminal::KeyEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Close through the cancel path for the given cause.
    Dismiss(CloseReason),
    NextFocus,
    PrevFocus,
    InputKey(KeyEvent),
    Tick,
}
