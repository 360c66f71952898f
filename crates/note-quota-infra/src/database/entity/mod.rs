//! SeaORM entities.

pub mod note_edit;
