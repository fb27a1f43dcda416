//! Interactive command shell for a serial diagnostic console
//!
//! This module implements a line-oriented command interpreter designed for
//! embedded targets and `no_std` environments. One [`Shell`] value is one
//! session: it is bound to a console stream at construction, reads command
//! lines until that stream closes or the operator types `exit`, and
//! dispatches each line against a fixed command table.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   Line Input    │───▶│   Tokenizer     │───▶│   Command       │
//! │   (echo, edit)  │    │   (whitespace)  │    │   Table         │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!                                                        │
//!                                                        ▼
//!                                               ┌─────────────────┐
//!                                               │   Handler       │
//!                                               │   (kernel, I/O) │
//!                                               └─────────────────┘
//! ```
//!
//! The line protocol is deliberately plain: one command per line, tokens
//! separated by arbitrary whitespace, no quoting and no escaping. Responses
//! are newline-terminated human-readable text. This is an operator console,
//! not an API.
//!
//! # Dispatch rules
//!
//! - The first token names the command; the match is exact and
//!   case-sensitive.
//! - At most one handler runs per line. An unmatched name is echoed back
//!   with ` ?`.
//! - Handlers receive the tokens after the command name. A handler given an
//!   unexpected argument count prints its one-line usage message and does
//!   nothing else; the shell never observes handler failure.
//! - `help` and `exit` are resolved before the table and cannot be
//!   shadowed.

use core::fmt;

use heapless::Vec;

use crate::kernel::Kernel;
use crate::stream::{self, Console, Write};

pub mod commands;

pub use commands::builtin_commands;

/// Maximum accepted command line length. Further input is ignored until the
/// line is terminated.
pub const MAX_LINE_LEN: usize = 64;

/// Maximum tokens per line: the command name plus four arguments.
pub const MAX_TOKENS: usize = 5;

/// Prompt printed before each command line.
pub const PROMPT: &str = "ds> ";

/// ASCII backspace character (0x08).
pub const ASCII_BACKSPACE: u8 = 0x08;
/// ASCII line feed character (0x0A).
pub const ASCII_LF: u8 = 0x0A;
/// ASCII carriage return character (0x0D).
pub const ASCII_CR: u8 = 0x0D;
/// ASCII delete character (0x7F).
pub const ASCII_DEL: u8 = 0x7F;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The console stream closed or failed while reading.
    Eof,
    /// The operator issued the `exit` command.
    Exit,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ExitReason {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ExitReason::Eof => defmt::write!(f, "Eof"),
            ExitReason::Exit => defmt::write!(f, "Exit"),
        }
    }
}

/// What a command handler sees while it runs: the host kernel, the session
/// console, and the dedicated raw output port.
pub struct Context<'c, K, C, P> {
    /// Scheduling services of the host kernel.
    pub kernel: &'c mut K,
    /// The session's interactive stream. Handler responses go here.
    pub console: &'c mut C,
    /// Dedicated output port, exclusively the handler's for the duration of
    /// the command.
    pub port: &'c mut P,
}

impl<K, C: Write, P> Context<'_, K, C, P> {
    /// Write literal text to the console, best-effort.
    pub fn print_str(&mut self, text: &str) {
        let _ = self.console.write_all(text.as_bytes());
    }

    /// Write formatted text to the console, best-effort.
    pub fn print_fmt(&mut self, args: fmt::Arguments<'_>) {
        stream::write_fmt(&mut *self.console, args);
    }
}

/// A command handler. Receives the execution context and the argument
/// tokens, i.e. everything on the line after the command name.
pub type Handler<K, C, P> = fn(&mut Context<'_, K, C, P>, args: &[&str]);

/// One command table entry: a name and the handler it dispatches to.
///
/// Names must be unique within a table; the first match wins.
pub struct Command<K, C, P> {
    /// The command name as typed by the operator. Case-sensitive.
    pub name: &'static str,
    /// The function implementing the command.
    pub handler: Handler<K, C, P>,
}

impl<K, C, P> Clone for Command<K, C, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, C, P> Copy for Command<K, C, P> {}

enum LineOutcome {
    Continue,
    Exit,
}

/// One interactive session over a console stream.
///
/// The command table is borrowed, read-only state owned by the caller; the
/// shell itself holds only the line buffer and echo flag.
pub struct Shell<'a, K, C, P> {
    commands: &'a [Command<K, C, P>],
    kernel: &'a mut K,
    console: &'a mut C,
    port: &'a mut P,
    line: [u8; MAX_LINE_LEN],
    len: usize,
    echo: bool,
}

impl<'a, K: Kernel, C: Console, P: Write> Shell<'a, K, C, P> {
    /// Bind a new session to `console`, dispatching against `commands`.
    ///
    /// Echo is enabled by default, as expected by an interactive terminal.
    pub fn new(
        commands: &'a [Command<K, C, P>],
        kernel: &'a mut K,
        console: &'a mut C,
        port: &'a mut P,
    ) -> Self {
        Self {
            commands,
            kernel,
            console,
            port,
            line: [0; MAX_LINE_LEN],
            len: 0,
            echo: true,
        }
    }

    /// Enable or disable input echo. Disable for scripted input.
    pub fn set_echo(&mut self, enabled: bool) {
        self.echo = enabled;
    }

    /// Run the session until its stream closes or the operator exits.
    ///
    /// This is the session task body: it blocks on console reads and returns
    /// rather than panicking on every recognized failure.
    pub fn run(&mut self) -> ExitReason {
        loop {
            self.print_str(PROMPT);
            if !self.read_line() {
                return ExitReason::Eof;
            }
            match self.execute_line() {
                LineOutcome::Exit => return ExitReason::Exit,
                LineOutcome::Continue => {}
            }
        }
    }

    /// Assemble one line, handling echo and backspace editing. Returns
    /// `false` when the stream reports end-of-stream or an error.
    fn read_line(&mut self) -> bool {
        self.len = 0;
        loop {
            let mut byte = [0u8; 1];
            match self.console.read(&mut byte) {
                Ok(0) | Err(_) => return false,
                Ok(_) => {}
            }
            match byte[0] {
                ASCII_CR | ASCII_LF => {
                    if self.echo {
                        self.print_str("\r\n");
                    }
                    return true;
                }
                ASCII_BACKSPACE | ASCII_DEL => {
                    if self.len > 0 {
                        self.len -= 1;
                        if self.echo {
                            self.print_str("\x08 \x08");
                        }
                    }
                }
                b' '..=b'~' => {
                    if self.len < MAX_LINE_LEN {
                        self.line[self.len] = byte[0];
                        self.len += 1;
                        if self.echo {
                            let _ = self.console.write_all(&byte);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Tokenize the assembled line and dispatch to at most one handler.
    fn execute_line(&mut self) -> LineOutcome {
        let line = self.line;
        let text = match core::str::from_utf8(&line[..self.len]) {
            Ok(text) => text,
            Err(_) => return LineOutcome::Continue,
        };

        let mut tokens: Vec<&str, MAX_TOKENS> = Vec::new();
        for token in text.split_ascii_whitespace() {
            if tokens.push(token).is_err() {
                self.print_str("too many arguments\r\n");
                return LineOutcome::Continue;
            }
        }
        let Some((&name, args)) = tokens.split_first() else {
            return LineOutcome::Continue;
        };

        match name {
            "help" => {
                if !args.is_empty() {
                    self.print_str("Usage: help\r\n");
                } else {
                    self.list_commands();
                }
                return LineOutcome::Continue;
            }
            "exit" => {
                if !args.is_empty() {
                    self.print_str("Usage: exit\r\n");
                    return LineOutcome::Continue;
                }
                return LineOutcome::Exit;
            }
            _ => {}
        }

        let commands = self.commands;
        for command in commands {
            if command.name == name {
                let handler = command.handler;
                let mut context = Context {
                    kernel: &mut *self.kernel,
                    console: &mut *self.console,
                    port: &mut *self.port,
                };
                handler(&mut context, args);
                return LineOutcome::Continue;
            }
        }

        self.print_fmt(format_args!("{} ?\r\n", name));
        LineOutcome::Continue
    }

    fn list_commands(&mut self) {
        self.print_str("Commands: help exit ");
        let commands = self.commands;
        for command in commands {
            self.print_fmt(format_args!("{} ", command.name));
        }
        self.print_str("\r\n");
    }

    fn print_str(&mut self, text: &str) {
        let _ = self.console.write_all(text.as_bytes());
    }

    fn print_fmt(&mut self, args: fmt::Arguments<'_>) {
        stream::write_fmt(&mut *self.console, args);
    }
}
