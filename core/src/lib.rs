//! Application core: request validation, the presentation store, the
//! clipboard seam and the background generation session.

pub mod clipboard;
pub mod error;
pub mod generator;
pub mod request;
pub mod session;
pub mod store;

pub use clipboard::{copy_text, Clipboard, MemoryClipboard, SystemClipboard};
pub use error::{ClipboardError, SessionError};
pub use generator::{DeckGenerator, StubGenerator};
pub use request::{Field, FieldError, FormInput, ValidationErrors};
pub use session::{Session, GENERIC_FAILURE_MESSAGE};
pub use store::PresentationStore;
