use criterion::Criterion;
use std::time::Duration;

use diagshell::kernel::{HeapStatus, Kernel, Priority, SpawnError, TaskSnapshot, TaskState};
use diagshell::shell::{Shell, builtin_commands};
use diagshell::stream::{Console, PollInput, Read, Write};

struct NullKernel;

impl Kernel for NullKernel {
    type Handle = ();

    fn sleep(&self, _duration: Duration) {}

    fn current_priority(&self) -> Priority {
        Priority(64)
    }

    fn heap_status(&self) -> HeapStatus {
        HeapStatus {
            core_free: 8192,
            fragments: 1,
            heap_free: 4096,
        }
    }

    fn visit_tasks(&self, _visit: &mut dyn FnMut(&TaskSnapshot)) {}

    fn spawn_self_test(&mut self, _priority: Priority) -> Result<(), SpawnError> {
        Ok(())
    }

    fn state_of(&self, _handle: &()) -> TaskState {
        TaskState::Terminated
    }

    fn join(&self, _handle: &()) {}

    fn release(&mut self, _handle: ()) {}
}

/// Serves a fixed script, discards all output.
struct ScriptConsole {
    input: &'static [u8],
    pos: usize,
}

impl Read for ScriptConsole {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
        if self.pos == self.input.len() {
            return Ok(0);
        }
        buf[0] = self.input[self.pos];
        self.pos += 1;
        Ok(1)
    }
}

impl Write for ScriptConsole {
    type Error = ();

    fn write(&mut self, buf: &[u8]) -> Result<usize, ()> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }
}

impl PollInput for ScriptConsole {
    fn input_pending(&mut self) -> bool {
        self.pos < self.input.len()
    }
}

impl Console for ScriptConsole {}

struct NullPort;

impl Write for NullPort {
    type Error = ();

    fn write(&mut self, buf: &[u8]) -> Result<usize, ()> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), ()> {
        Ok(())
    }
}

fn run_script(kernel: &mut NullKernel, script: &'static [u8]) {
    let commands = builtin_commands();
    let mut console = ScriptConsole {
        input: script,
        pos: 0,
    };
    let mut port = NullPort;
    let mut shell = Shell::new(&commands, kernel, &mut console, &mut port);
    shell.set_echo(false);
    shell.run();
}

pub fn bench_dispatch_mem(c: &mut Criterion) {
    let mut kernel = NullKernel;
    c.bench_function("shell_dispatch_mem", |b| {
        b.iter(|| run_script(&mut kernel, b"mem\r"));
    });
}

pub fn bench_unknown_command(c: &mut Criterion) {
    let mut kernel = NullKernel;
    c.bench_function("shell_unknown_command", |b| {
        b.iter(|| run_script(&mut kernel, b"bogus\r"));
    });
}
