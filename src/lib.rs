//! # diagshell - Embedded Diagnostic Console
//!
//! A supervised, line-oriented diagnostic shell for microcontroller
//! firmware, with a background LED blinker task. This library is designed
//! for embedded systems and supports `no_std` environments.
//!
//! ## What it provides
//!
//! ### Command Shell
//! - Whitespace-tokenized command lines over any serial character stream
//! - Fixed, caller-owned command table with exact case-sensitive dispatch
//! - Built-in `help` and `exit`, plus four diagnostic commands: `mem`,
//!   `threads`, `test`, and `write`
//! - Input echo and backspace editing for interactive terminals
//!
//! ### Session Supervision
//! - A two-state supervisor that keeps exactly one session alive, recreating
//!   it whenever the previous one ends and reclaiming its resources
//!
//! ### Blinker Task
//! - A periodic status-LED toggle that runs independently of the console
//!
//! ## Boundaries
//!
//! The host real-time kernel, the serial driver, and the GPIO pins are
//! consumed through narrow traits ([`kernel::Kernel`], [`stream::Console`],
//! [`gpio::OutputPin`]) and are never implemented here. The board support
//! layer wires them up; tests substitute mocks.
//!
//! ## Usage
//!
//! Feeding one `mem` command through a session bound to a scripted stream:
//!
//! ```rust
//! use diagshell::kernel::{HeapStatus, Kernel, Priority, SpawnError, TaskSnapshot, TaskState};
//! use diagshell::shell::{builtin_commands, ExitReason, Shell};
//! use diagshell::stream::{Console, PollInput, Read, Write};
//! # struct NullKernel;
//! # impl Kernel for NullKernel {
//! #     type Handle = ();
//! #     fn sleep(&self, _: core::time::Duration) {}
//! #     fn current_priority(&self) -> Priority { Priority(64) }
//! #     fn heap_status(&self) -> HeapStatus {
//! #         HeapStatus { core_free: 8192, fragments: 1, heap_free: 4096 }
//! #     }
//! #     fn visit_tasks(&self, _: &mut dyn FnMut(&TaskSnapshot)) {}
//! #     fn spawn_self_test(&mut self, _: Priority) -> Result<(), SpawnError> { Ok(()) }
//! #     fn state_of(&self, _: &()) -> TaskState { TaskState::Terminated }
//! #     fn join(&self, _: &()) {}
//! #     fn release(&mut self, _: ()) {}
//! # }
//! # struct Scripted { input: &'static [u8], pos: usize, output: Vec<u8> }
//! # impl Read for Scripted {
//! #     type Error = ();
//! #     fn read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
//! #         if self.pos == self.input.len() { return Ok(0); }
//! #         buf[0] = self.input[self.pos];
//! #         self.pos += 1;
//! #         Ok(1)
//! #     }
//! # }
//! # impl Write for Scripted {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, ()> {
//! #         self.output.extend_from_slice(buf);
//! #         Ok(buf.len())
//! #     }
//! #     fn flush(&mut self) -> Result<(), ()> { Ok(()) }
//! # }
//! # impl PollInput for Scripted {
//! #     fn input_pending(&mut self) -> bool { self.pos < self.input.len() }
//! # }
//! # impl Console for Scripted {}
//! # struct Sink;
//! # impl Write for Sink {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, ()> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), ()> { Ok(()) }
//! # }
//!
//! let commands = builtin_commands();
//! let mut kernel = NullKernel;
//! let mut console = Scripted { input: b"mem\r", pos: 0, output: Vec::new() };
//! let mut port = Sink;
//!
//! let mut shell = Shell::new(&commands, &mut kernel, &mut console, &mut port);
//! shell.set_echo(false);
//! assert_eq!(shell.run(), ExitReason::Eof);
//! drop(shell);
//!
//! let transcript = String::from_utf8(console.output).unwrap();
//! assert!(transcript.contains("core free memory : 8192 bytes"));
//! ```
//!
//! The supervisor side composes the same way: implement
//! [`supervisor::SessionSpawner`] so that `spawn` starts a task driving
//! [`shell::Shell::run`], then hand it to a
//! [`supervisor::Supervisor`] and call `run`.
//!
//! ## Platform Support
//!
//! This library is designed to work on:
//! - Embedded microcontrollers (ARM Cortex-M, RISC-V, etc.)
//! - Any platform supporting Rust's `core` library
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

/// Scheduling services consumed from the host real-time kernel.
///
/// Task states, registry snapshots, heap statistics, and the [`kernel::Kernel`]
/// trait the rest of the crate is written against.
pub mod kernel;

/// Character-stream abstraction for serial consoles.
///
/// Blocking read/write traits with a non-blocking input poll, plus a
/// `core::fmt` adapter for formatted diagnostics.
pub mod stream;

/// Digital output abstraction for status indicators.
pub mod gpio;

/// The interactive command shell and its built-in diagnostic commands.
pub mod shell;

/// Session lifecycle supervision.
///
/// Keeps exactly one shell session alive, recreating and reclaiming session
/// tasks as they come and go.
pub mod supervisor;

/// The background status-LED blinker task.
pub mod blinker;
