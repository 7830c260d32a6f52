//! Line parser: raw input -> pipeline of commands.
//!
//! Splits a line on `|` into stages, then each stage on whitespace into a
//! program name plus arguments. There is no quoting, escaping, or glob
//! expansion; a token is exactly a whitespace-delimited run of characters.

use super::error::ShellError;

/// One command: program name followed by its arguments.
/// Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    tokens: Vec<String>,
}

impl Command {
    /// Program name (first token). Always present; the parser rejects
    /// empty stages.
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Arguments after the program name.
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    /// The command as typed, tokens joined by single spaces.
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }
}

/// An ordered sequence of commands connected by pipes. Length >= 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    stages: Vec<Command>,
}

impl Pipeline {
    pub fn stages(&self) -> &[Command] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Reconstructed pipeline text, stages joined by ` | `. This is the
    /// normalized form stored in history.
    pub fn text(&self) -> String {
        self.stages
            .iter()
            .map(Command::text)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Split a line into a pipeline. A line without `|` yields a single stage.
pub fn split_pipeline(line: &str, max_stages: usize) -> Result<Pipeline, ShellError> {
    let pieces: Vec<&str> = line.split('|').collect();
    if pieces.len() > max_stages {
        return Err(ShellError::TooManyStages { max: max_stages });
    }

    let mut stages = Vec::with_capacity(pieces.len());
    for piece in pieces {
        let tokens: Vec<String> = piece.split_whitespace().map(str::to_string).collect();
        if tokens.is_empty() {
            return Err(ShellError::EmptyPipelineStage);
        }
        stages.push(Command { tokens });
    }

    Ok(Pipeline { stages })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_tokens(p: &Pipeline, i: usize) -> Vec<&str> {
        let cmd = &p.stages()[i];
        std::iter::once(cmd.program())
            .chain(cmd.args().iter().map(String::as_str))
            .collect()
    }

    #[test]
    fn test_single_command() {
        let p = split_pipeline("echo hi", 16).unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(stage_tokens(&p, 0), vec!["echo", "hi"]);
        assert_eq!(p.text(), "echo hi");
    }

    #[test]
    fn test_pipeline_split_and_trim() {
        let p = split_pipeline("echo hello |  tr a-z A-Z", 16).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(stage_tokens(&p, 0), vec!["echo", "hello"]);
        assert_eq!(stage_tokens(&p, 1), vec!["tr", "a-z", "A-Z"]);
        assert_eq!(p.text(), "echo hello | tr a-z A-Z");
    }

    #[test]
    fn test_whitespace_is_normalized_in_text() {
        let p = split_pipeline("  ls   -la  ", 16).unwrap();
        assert_eq!(p.text(), "ls -la");
    }

    #[test]
    fn test_empty_stage_rejected() {
        assert!(matches!(
            split_pipeline("ls | | wc", 16),
            Err(ShellError::EmptyPipelineStage)
        ));
        assert!(matches!(
            split_pipeline("ls |", 16),
            Err(ShellError::EmptyPipelineStage)
        ));
        assert!(matches!(
            split_pipeline("   ", 16),
            Err(ShellError::EmptyPipelineStage)
        ));
    }

    #[test]
    fn test_too_many_stages() {
        let line = vec!["cat"; 17].join(" | ");
        assert!(matches!(
            split_pipeline(&line, 16),
            Err(ShellError::TooManyStages { max: 16 })
        ));
        let line = vec!["cat"; 16].join(" | ");
        assert!(split_pipeline(&line, 16).is_ok());
    }

    #[test]
    fn test_no_quoting_support() {
        // Quotes are ordinary characters; this is a documented simplification.
        let p = split_pipeline(r#"echo "hello world""#, 16).unwrap();
        assert_eq!(stage_tokens(&p, 0), vec!["echo", "\"hello", "world\""]);
    }
}
