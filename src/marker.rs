//! Per-sender yes/no marking
//!
//! Marking goes through a [`DecisionSource`], so the workflows run the same
//! against a live terminal or a pre-supplied list of answers.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use tracing::debug;

use crate::error::{Result, TriageError};

/// Printed after an answer other than `y` or `n`
pub const INVALID_ANSWER_MESSAGE: &str = "Invalid input. Please enter 'y' or 'n'.";

/// Anything that can answer "mark this sender?"
pub trait DecisionSource {
    /// Decide one sender; `true` marks it
    fn decide(&mut self, sender: &str) -> Result<bool>;
}

impl<F> DecisionSource for F
where
    F: FnMut(&str) -> Result<bool>,
{
    fn decide(&mut self, sender: &str) -> Result<bool> {
        self(sender)
    }
}

/// Validate one raw answer: `y`/`n` in any case, nothing else
pub fn parse_answer(raw: &str) -> Option<bool> {
    let answer = raw.trim_end_matches(['\r', '\n']).to_lowercase();
    match answer.as_str() {
        "y" => Some(true),
        "n" => Some(false),
        _ => None,
    }
}

/// Blocking line-based prompt
///
/// Re-prompts until a valid answer is read. End of input is an error.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on the process's stdin/stdout
    ///
    /// The stdin lock is held until the prompt is dropped and reads one line
    /// per answer. Lines typed ahead stay buffered for the next `decide` call;
    /// an `inquire` prompt reads the terminal directly and never sees them.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output sink (used by tests to inspect prompts)
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> DecisionSource for TerminalPrompt<R, W> {
    fn decide(&mut self, sender: &str) -> Result<bool> {
        loop {
            write!(self.output, "Do you want to mark '{}'? (y/n): ", sender)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(TriageError::PromptError(
                    "input closed before an answer was given".to_string(),
                ));
            }

            match parse_answer(&line) {
                Some(decision) => return Ok(decision),
                None => writeln!(self.output, "{}", INVALID_ANSWER_MESSAGE)?,
            }
        }
    }
}

/// Pre-supplied raw answers, validated exactly like terminal input
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    answers: VecDeque<String>,
    rejected: usize,
}

impl ScriptedDecisions {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            rejected: 0,
        }
    }

    /// Number of invalid answers skipped so far
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl DecisionSource for ScriptedDecisions {
    fn decide(&mut self, sender: &str) -> Result<bool> {
        while let Some(answer) = self.answers.pop_front() {
            match parse_answer(&answer) {
                Some(decision) => return Ok(decision),
                None => {
                    debug!("Skipping invalid scripted answer {:?} for {}", answer, sender);
                    self.rejected += 1;
                }
            }
        }

        Err(TriageError::PromptError(format!(
            "no answer left for sender '{}'",
            sender
        )))
    }
}

/// Ask about each sender once, keeping the marked ones in presentation order
pub fn mark_senders<I, S>(senders: I, source: &mut dyn DecisionSource) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut marked = Vec::new();

    for sender in senders {
        let sender = sender.as_ref();
        if source.decide(sender)? {
            marked.push(sender.to_string());
        }
    }

    Ok(marked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("y"), Some(true));
        assert_eq!(parse_answer("Y\n"), Some(true));
        assert_eq!(parse_answer("n\r\n"), Some(false));
        assert_eq!(parse_answer("N"), Some(false));
        assert_eq!(parse_answer("yes"), None);
        assert_eq!(parse_answer(""), None);
        assert_eq!(parse_answer(" y"), None);
    }

    #[test]
    fn test_terminal_prompt_reprompts_on_invalid_input() {
        let input = Cursor::new("maybe\n\nYES\ny\n");
        let mut prompt = TerminalPrompt::new(input, Vec::new());

        assert!(prompt.decide("Alice <a@x.com>").unwrap());

        let output = String::from_utf8(prompt.into_output()).unwrap();
        assert_eq!(output.matches("Do you want to mark 'Alice <a@x.com>'? (y/n): ").count(), 4);
        assert_eq!(output.matches(INVALID_ANSWER_MESSAGE).count(), 3);
    }

    #[test]
    fn test_terminal_prompt_reads_one_line_per_answer() {
        let mut prompt = TerminalPrompt::new(Cursor::new("y\nn\n"), Vec::new());

        assert!(prompt.decide("a").unwrap());
        assert!(!prompt.decide("b").unwrap());
        assert!(matches!(prompt.decide("c"), Err(TriageError::PromptError(_))));
    }

    #[test]
    fn test_terminal_prompt_eof_is_error() {
        let mut prompt = TerminalPrompt::new(Cursor::new("x\n"), Vec::new());
        let result = prompt.decide("Alice <a@x.com>");
        assert!(matches!(result, Err(TriageError::PromptError(_))));
    }

    #[test]
    fn test_mark_senders_first_valid_answer_decides() {
        let input = Cursor::new("q\nN\ny\nn\n");
        let mut prompt = TerminalPrompt::new(input, Vec::new());

        let marked = mark_senders(["a", "b", "c"], &mut prompt).unwrap();
        assert_eq!(marked, vec!["b".to_string()]);
    }

    #[test]
    fn test_scripted_decisions_skip_invalid() {
        let mut source = ScriptedDecisions::new(["y", "oops", "Y", "n"]);
        let marked = mark_senders(
            ["Alice <a@x.com>", "Bob <b@y.com>", "Carol <c@z.com>"],
            &mut source,
        )
        .unwrap();

        assert_eq!(marked, vec!["Alice <a@x.com>", "Bob <b@y.com>"]);
        assert_eq!(source.rejected(), 1);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_scripted_decisions_exhausted() {
        let mut source = ScriptedDecisions::new(["y"]);
        let result = mark_senders(["a", "b"], &mut source);
        assert!(matches!(result, Err(TriageError::PromptError(_))));
    }

    #[test]
    fn test_closure_decision_source() {
        let mut accept_x = |sender: &str| -> Result<bool> { Ok(sender.contains("x.com")) };
        let marked = mark_senders(["Alice <a@x.com>", "Bob <b@y.com>"], &mut accept_x).unwrap();
        assert_eq!(marked, vec!["Alice <a@x.com>"]);
    }

    #[test]
    fn test_mark_senders_empty() {
        let mut source = ScriptedDecisions::default();
        let marked = mark_senders(Vec::<String>::new(), &mut source).unwrap();
        assert!(marked.is_empty());
    }
}
