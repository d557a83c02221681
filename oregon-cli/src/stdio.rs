use std::io::{self, BufRead, Write};

use oregon_game::Console;

/// Console over a line reader and a writer, normally the process's stdio.
pub struct StdConsole<R, W> {
    input: R,
    output: W,
    closed: bool,
}

impl StdConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            closed: false,
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn say(&mut self, line: &str) {
        if let Err(err) = writeln!(self.output, "{line}") {
            log::warn!("console write failed: {err}");
        }
    }

    fn ask(&mut self, prompt: &str) -> String {
        if let Err(err) = write!(self.output, "{prompt}").and_then(|()| self.output.flush()) {
            log::warn!("console write failed: {err}");
        }
        if self.closed {
            return String::new();
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => {
                self.closed = true;
                // keep the transcript readable when input is piped
                let _ = writeln!(self.output);
                String::new()
            }
            Ok(_) => line.trim().to_string(),
            Err(err) => {
                log::warn!("console read failed: {err}");
                self.closed = true;
                String::new()
            }
        }
    }

    fn input_closed(&self) -> bool {
        self.closed
    }
}
