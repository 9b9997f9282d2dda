//! Line-oriented terminal IO. Generic over reader and writer so sessions can be
//! scripted in tests.

use std::fmt::Display;
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

/// Result of asking for one value.
#[derive(Debug, PartialEq, Eq)]
pub enum Answer<T> {
    Got(T),
    /// Blank or unusable input; the current action is abandoned.
    Skip,
    /// Input closed.
    Eof,
}

pub struct Console<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, out: W) -> Self {
        Console {
            lines: input.lines(),
            out,
        }
    }

    /// Print `label` and read one line. `None` once input is closed.
    pub async fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}: ", label)?;
        self.out.flush()?;
        let line = self.lines.next_line().await?;
        Ok(line.map(|l| l.trim_end_matches('\r').to_string()))
    }

    /// Read an integer; blank input takes `default` when there is one.
    pub async fn ask_number(&mut self, label: &str, default: Option<i64>) -> io::Result<Answer<i64>> {
        let shown = match default {
            Some(d) => format!("{} [{}]", label, d),
            None => label.to_string(),
        };
        let Some(raw) = self.ask(&shown).await? else {
            return Ok(Answer::Eof);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(default.map(Answer::Got).unwrap_or(Answer::Skip));
        }
        match raw.parse() {
            Ok(n) => Ok(Answer::Got(n)),
            Err(_) => {
                self.warn(format!("'{}' is not a number", raw))?;
                Ok(Answer::Skip)
            }
        }
    }

    pub async fn confirm(&mut self, question: &str) -> io::Result<Answer<bool>> {
        let Some(raw) = self.ask(&format!("{} [y/N]", question)).await? else {
            return Ok(Answer::Eof);
        };
        Ok(Answer::Got(matches!(raw.trim(), "y" | "Y" | "yes" | "YES")))
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    /// Inline warning; the session always continues.
    pub fn warn(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.out, "warning: {}", text)
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(input: &'static str) -> Console<&'static [u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    #[tokio::test]
    async fn numbers_defaults_and_eof() {
        let mut c = console("12\n\nabc\n");
        assert_eq!(c.ask_number("Player ID", None).await.unwrap(), Answer::Got(12));
        assert_eq!(c.ask_number("Limit", Some(50)).await.unwrap(), Answer::Got(50));
        assert_eq!(c.ask_number("Player ID", None).await.unwrap(), Answer::Skip);
        assert_eq!(c.ask_number("Player ID", None).await.unwrap(), Answer::Eof);
        let out = String::from_utf8(c.into_output()).unwrap();
        assert!(out.contains("Limit [50]: "));
        assert!(out.contains("warning: 'abc' is not a number"));
    }

    #[tokio::test]
    async fn confirm_defaults_to_no() {
        let mut c = console("y\n\nnope\n");
        assert_eq!(c.confirm("Delete?").await.unwrap(), Answer::Got(true));
        assert_eq!(c.confirm("Delete?").await.unwrap(), Answer::Got(false));
        assert_eq!(c.confirm("Delete?").await.unwrap(), Answer::Got(false));
        assert_eq!(c.confirm("Delete?").await.unwrap(), Answer::Eof);
    }
}
