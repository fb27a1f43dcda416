//! Built-in diagnostic command handlers
//!
//! The four commands every console ships with: heap statistics, a task
//! registry listing, the kernel self-test, and a raw write throughput
//! stress. All follow the uniform argument policy: any argument at all
//! yields the usage line and no action.

use super::{Command, Context};
use crate::kernel::{Kernel, SpawnError, TaskSnapshot};
use crate::stream::{self, Console, Write};

/// Pattern written by the `write` command: sixteen 64-character hex ruler
/// lines, CRLF-terminated.
pub const WRITE_PATTERN: &str =
    "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n\
     0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n\
     0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n\
     0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n\
     0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n\
     0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n\
     0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n\
     0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n\
     0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n\
     0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n\
     0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n\
     0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n\
     0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n\
     0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n\
     0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n\
     0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef\r\n";

/// `mem` — report allocator statistics.
pub fn cmd_mem<K: Kernel, C: Console, P: Write>(ctx: &mut Context<'_, K, C, P>, args: &[&str]) {
    if !args.is_empty() {
        ctx.print_str("Usage: mem\r\n");
        return;
    }
    let status = ctx.kernel.heap_status();
    ctx.print_fmt(format_args!(
        "core free memory : {} bytes\r\n",
        status.core_free
    ));
    ctx.print_fmt(format_args!("heap fragments   : {}\r\n", status.fragments));
    ctx.print_fmt(format_args!(
        "heap free total  : {} bytes\r\n",
        status.heap_free
    ));
}

/// `threads` — list every live task known to the host scheduler.
pub fn cmd_threads<K: Kernel, C: Console, P: Write>(ctx: &mut Context<'_, K, C, P>, args: &[&str]) {
    if !args.is_empty() {
        ctx.print_str("Usage: threads\r\n");
        return;
    }
    ctx.print_str("    addr    stack prio refs     state\r\n");
    let Context {
        kernel, console, ..
    } = ctx;
    kernel.visit_tasks(&mut |task: &TaskSnapshot| {
        stream::write_fmt(
            &mut **console,
            format_args!(
                "{:08x} {:08x} {:4} {:4} {:>9}\r\n",
                task.address,
                task.stack_pointer,
                task.priority.0,
                task.refs.saturating_sub(1),
                task.state.name(),
            ),
        );
    });
}

/// `test` — run the kernel self-test as a bounded sub-task and wait for it.
///
/// The sub-task runs at the session's own priority and is reclaimed before
/// the handler returns; it never outlives the command.
pub fn cmd_test<K: Kernel, C: Console, P: Write>(ctx: &mut Context<'_, K, C, P>, args: &[&str]) {
    if !args.is_empty() {
        ctx.print_str("Usage: test\r\n");
        return;
    }
    let priority = ctx.kernel.current_priority();
    match ctx.kernel.spawn_self_test(priority) {
        Ok(handle) => {
            ctx.kernel.join(&handle);
            ctx.kernel.release(handle);
        }
        Err(SpawnError::OutOfMemory) => ctx.print_str("out of memory\r\n"),
    }
}

/// `write` — stream the fixed pattern to the dedicated port until any byte
/// arrives on the session's own input.
///
/// The loop busy-polls without suspending, monopolizing its priority level
/// for maximum throughput until the operator interrupts it. The pending
/// byte is peeked, not consumed.
pub fn cmd_write<K: Kernel, C: Console, P: Write>(ctx: &mut Context<'_, K, C, P>, args: &[&str]) {
    if !args.is_empty() {
        ctx.print_str("Usage: write\r\n");
        return;
    }
    while !ctx.console.input_pending() {
        let _ = ctx.port.write_all(WRITE_PATTERN.as_bytes());
    }
    ctx.print_str("\r\n\nstopped\r\n");
}

/// The standard four-entry diagnostic command table.
pub fn builtin_commands<K: Kernel, C: Console, P: Write>() -> [Command<K, C, P>; 4] {
    [
        Command {
            name: "mem",
            handler: cmd_mem,
        },
        Command {
            name: "threads",
            handler: cmd_threads,
        },
        Command {
            name: "test",
            handler: cmd_test,
        },
        Command {
            name: "write",
            handler: cmd_write,
        },
    ]
}
