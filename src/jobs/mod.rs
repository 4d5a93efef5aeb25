//! Typed contracts for specific background jobs.
//!
//! Each job kind is a plain argument struct paired with a result type
//! carrying a [`Status`](crate::thread_pool::Status). The pool stays
//! agnostic to job semantics; these modules are the bridge between it
//! and the engine subsystems that own the actual work.

pub mod audio;

pub use audio::{
    submit_sound_upload, AudioBackend, AudioUploadError, SoundUploadArgs, SoundUploadResult,
};
