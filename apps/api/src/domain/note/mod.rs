// Note domain module
// Notes live inside a per-user bucket (NoteOwner), never as standalone records

#![allow(clippy::module_inception)]

pub mod note;
pub mod note_owner;

pub use note::{Note, DEFAULT_NOTE_STATUS};
pub use note_owner::NoteOwner;
