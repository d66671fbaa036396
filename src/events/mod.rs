mod dispatcher;
pub mod panel;

pub use dispatcher::{Dispatcher, NamedEvent};
pub use panel::PanelEvent;
