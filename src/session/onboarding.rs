pub const DEFAULT_SCRIPT: [&str; 3] = [
    "Hi! I'm your CBT companion. I'm here to help you practice healthier thinking patterns. See that plant? It represents your thought patterns' health. Let's try something - could you share a negative thought you've had recently?",
    "Notice how the plant responded to that negative thought? Now, let's practice reframing. Can you try looking at this situation from a different angle? What's a more balanced way to view it?",
    "Great job! See how the plant grew when you practiced reframing? This is what CBT is all about - learning to recognize and adjust our thought patterns. Would you like to continue practicing?",
];

/// Fixed introductory prompts. `step` points at the entry most recently shown.
#[derive(Debug, Clone)]
pub struct OnboardingScript {
    entries: Vec<String>,
    step: usize,
}

impl Default for OnboardingScript {
    fn default() -> Self {
        Self::new(DEFAULT_SCRIPT.iter().map(|entry| entry.to_string()).collect())
    }
}

impl OnboardingScript {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries, step: 0 }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.step).map(String::as_str)
    }

    pub fn is_finished(&self) -> bool {
        self.step + 1 >= self.entries.len()
    }

    /// Moves to the next entry and returns it, or `None` once the script is exhausted.
    pub fn advance(&mut self) -> Option<&str> {
        if self.is_finished() {
            return None;
        }
        self.step += 1;
        self.current()
    }

    /// Whether a turn with this delta completes the exercise posed by the current step.
    ///
    /// Step 0 asks for a negative thought, step 1 asks for a reframe.
    pub fn expects(&self, delta: f64) -> bool {
        match self.step {
            0 => delta < 0.0,
            1 => delta > 0.0,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OnboardingScript, DEFAULT_SCRIPT};

    #[test]
    fn starts_on_first_entry() {
        let script = OnboardingScript::default();
        assert_eq!(script.step(), 0);
        assert_eq!(script.current(), Some(DEFAULT_SCRIPT[0]));
    }

    #[test]
    fn advance_stops_at_last_entry() {
        let mut script = OnboardingScript::default();
        assert_eq!(script.advance(), Some(DEFAULT_SCRIPT[1]));
        assert_eq!(script.advance(), Some(DEFAULT_SCRIPT[2]));
        assert!(script.is_finished());
        assert_eq!(script.advance(), None);
        assert_eq!(script.step(), 2);
    }

    #[test]
    fn expectations_follow_the_exercise() {
        let mut script = OnboardingScript::default();
        assert!(script.expects(-15.0));
        assert!(!script.expects(0.0));
        script.advance();
        assert!(script.expects(7.5));
        assert!(!script.expects(-10.0));
        script.advance();
        assert!(!script.expects(10.0));
    }

    #[test]
    fn empty_script_has_no_current_entry() {
        let mut script = OnboardingScript::new(Vec::new());
        assert_eq!(script.current(), None);
        assert_eq!(script.advance(), None);
    }
}
