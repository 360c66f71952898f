//! Domain entities - the core business objects.

mod note_edit;
mod note_target;
mod request;
mod tier;

pub use note_edit::{NoteEdit, NoteKey};
pub use note_target::NoteTarget;
pub use request::{MAX_AUTHOR_ID_LEN, MAX_PUBLIC_IDENTIFIER_LEN, NoteAccess, NoteEditRequest};
pub use tier::{NoteTierLimits, TierInformation};
