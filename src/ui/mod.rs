/// UI layer: panel rendering and file dialogs.  All functions take
/// `&mut AppState` explicitly; nothing here holds state of its own.

pub mod panels;
pub mod plot;
