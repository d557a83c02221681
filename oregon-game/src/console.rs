//! Line-based prompt/response channel between the trail and the player.

use std::collections::VecDeque;

/// Text channel the engine narrates through and asks questions on.
pub trait Console {
    /// Emit one line of narration.
    fn say(&mut self, line: &str);

    /// Show `prompt` and return the trimmed reply; end of input yields `""`.
    fn ask(&mut self, prompt: &str) -> String;

    /// True once the input side has ended and every further `ask` is `""`.
    fn input_closed(&self) -> bool {
        false
    }
}

/// Ask `prompt` and lower-case the reply, the form every menu compares against.
pub fn ask_choice(console: &mut dyn Console, prompt: &str) -> String {
    console.ask(prompt).to_lowercase()
}

/// Console fed from a queue of replies, recording everything it is told.
///
/// Replies run out into empty strings, so prompts fall back to their defaults.
#[derive(Debug, Clone, Default)]
pub struct ScriptedConsole {
    replies: VecDeque<String>,
    transcript: Vec<String>,
    prompts: Vec<String>,
    exhausted: bool,
}

impl ScriptedConsole {
    #[must_use]
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: replies.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
            prompts: Vec::new(),
            exhausted: false,
        }
    }

    /// Queue more replies behind the ones already pending.
    pub fn push_replies<I, S>(&mut self, replies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.replies.extend(replies.into_iter().map(Into::into));
        self.exhausted = self.replies.is_empty() && self.exhausted;
    }

    /// Narration lines in the order they were said.
    #[must_use]
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Prompts in the order they were asked.
    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// True when any narration line contains `needle`.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }

    #[must_use]
    pub fn pending_replies(&self) -> usize {
        self.replies.len()
    }

    /// Drop the recorded transcript and prompts, keeping pending replies.
    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
        self.prompts.clear();
    }
}

impl Console for ScriptedConsole {
    fn say(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }

    fn ask(&mut self, prompt: &str) -> String {
        self.prompts.push(prompt.to_string());
        match self.replies.pop_front() {
            Some(reply) => reply.trim().to_string(),
            None => {
                self.exhausted = true;
                String::new()
            }
        }
    }

    fn input_closed(&self) -> bool {
        self.exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replies_are_trimmed_and_exhaust_to_empty() {
        let mut console = ScriptedConsole::new(["  Travel \n"]);
        assert_eq!(ask_choice(&mut console, "> "), "travel");
        assert!(!console.input_closed());
        assert_eq!(console.ask("> "), "");
        assert!(console.input_closed());
        assert_eq!(console.prompts().len(), 2);
        console.push_replies(["rest"]);
        assert!(!console.input_closed());
    }

    #[test]
    fn transcript_records_narration() {
        let mut console = ScriptedConsole::default();
        console.say("You travel 12 miles.");
        assert!(console.mentions("12 miles"));
        console.clear_transcript();
        assert!(console.transcript().is_empty());
    }
}
