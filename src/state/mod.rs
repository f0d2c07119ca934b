// Session state

mod selection;
mod session;
mod shared;
mod store;

pub use selection::{SelectionSet, SelectionState};
pub use session::{Intent, IntentOutcome, SetupSession};
pub use shared::SharedSession;
pub use store::{FileStore, MemoryStore, SessionSnapshot, SessionStore};
