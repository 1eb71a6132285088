use colored::Colorize;
use std::io::{self, Write};

/// Tagged log lines for a smoke run, written to stdout or any other sink
pub struct Reporter {
    out: Box<dyn Write>,
    debug: bool,
}

impl Reporter {
    pub fn stdout(debug: bool) -> Self {
        Reporter::new(Box::new(io::stdout()), debug)
    }

    pub fn new(out: Box<dyn Write>, debug: bool) -> Self {
        Reporter { out, debug }
    }

    pub fn success(&mut self, msg: &str) {
        let tag = "[SUCCESS]".green();
        self.line(format!("{} {}", tag, msg));
    }

    pub fn error(&mut self, msg: &str) {
        let tag = "[ERROR]".red();
        self.line(format!("{} {}", tag, msg));
    }

    pub fn pass(&mut self, msg: &str) {
        let tag = "[PASS]".green().bold();
        self.line(format!("{} {}", tag, msg));
    }

    pub fn fail(&mut self, msg: &str) {
        let tag = "[FAIL]".red().bold();
        self.line(format!("{} {}", tag, msg));
    }

    pub fn info(&mut self, msg: &str) {
        self.line(msg.to_owned());
    }

    pub fn debug(&mut self, msg: &str) {
        if self.debug {
            let tag = "[DEBUG]".dimmed();
            self.line(format!("{} {}", tag, msg));
        }
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    fn line(&mut self, line: String) {
        // a broken stdout shouldn't take the run down with it
        let _r = writeln!(self.out, "{}", line);
    }
}
