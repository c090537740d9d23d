/// Sound notifications around move results. The rules core never calls
/// these; the controller layer drives them from `MoveRecord` after each
/// attempted move.
pub trait AudioSink {
    fn play_move(&self);
    fn play_capture(&self);
    fn play_illegal(&self);
    fn play_promotion(&self);

    /// Flip the mute state and report the new value.
    fn toggle_mute(&mut self) -> bool;
    fn is_muted(&self) -> bool;
}

/// No-op sink for headless use (tests, simulations, servers).
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentAudio {
    muted: bool,
}

impl AudioSink for SilentAudio {
    fn play_move(&self) {}
    fn play_capture(&self) {}
    fn play_illegal(&self) {}
    fn play_promotion(&self) {}

    fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_sink_tracks_mute_state() {
        let mut sink = SilentAudio::default();
        assert!(!sink.is_muted());
        assert!(sink.toggle_mute());
        assert!(sink.is_muted());
        assert!(!sink.toggle_mute());
    }
}
