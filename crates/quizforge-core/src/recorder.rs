//! Audio clip recorder state for fill-in-the-blank prompts.
//!
//! Two states, `Idle` and `Recording`. The owner feeds captured chunks with
//! [`AudioRecorder::push_chunk`] and calls [`AudioRecorder::tick`] once per
//! second while recording; [`AudioRecorder::stop`] flushes everything as
//! one [`AudioClip`]. Uploading the clip and storing its URL in
//! `FillInBlank::audio_url` happen outside this crate.

use serde::Serialize;

use crate::error::RecorderError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RecorderState {
    #[default]
    Idle,
    Recording {
        elapsed_secs: u32,
    },
}

/// A finished recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub data: Vec<u8>,
    pub duration_secs: u32,
}

#[derive(Debug, Default)]
pub struct AudioRecorder {
    state: RecorderState,
    buffer: Vec<u8>,
}

impl AudioRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording { .. })
    }

    /// Begin a new clip.
    pub fn start(&mut self) -> Result<(), RecorderError> {
        if self.is_recording() {
            return Err(RecorderError::AlreadyRecording);
        }
        self.buffer.clear();
        self.state = RecorderState::Recording { elapsed_secs: 0 };
        tracing::debug!("recorder started");
        Ok(())
    }

    /// Advance the elapsed-time counter by one second.
    ///
    /// Returns the new elapsed time, or `None` when idle (a late tick after
    /// `stop` is ignored).
    pub fn tick(&mut self) -> Option<u32> {
        match &mut self.state {
            RecorderState::Recording { elapsed_secs } => {
                *elapsed_secs = elapsed_secs.saturating_add(1);
                Some(*elapsed_secs)
            }
            RecorderState::Idle => None,
        }
    }

    pub fn push_chunk(&mut self, chunk: &[u8]) -> Result<(), RecorderError> {
        if !self.is_recording() {
            return Err(RecorderError::NotRecording);
        }
        self.buffer.extend_from_slice(chunk);
        Ok(())
    }

    /// Stop and flush the recorded bytes.
    pub fn stop(&mut self) -> Result<AudioClip, RecorderError> {
        let RecorderState::Recording { elapsed_secs } = self.state else {
            return Err(RecorderError::NotRecording);
        };
        self.state = RecorderState::Idle;
        let clip = AudioClip {
            data: std::mem::take(&mut self.buffer),
            duration_secs: elapsed_secs,
        };
        tracing::debug!(
            bytes = clip.data.len(),
            secs = clip.duration_secs,
            "recorder stopped"
        );
        Ok(clip)
    }
}
