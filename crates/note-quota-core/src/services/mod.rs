//! Services - business rules built on top of the ports.

mod can_update_note;

pub use can_update_note::{CanUpdateNoteService, NOTE_EDIT_BUFFER_MINUTES, note_edit_buffer};
