//! Console command surface.
//!
//! A [`Shell`] holds a fixed set of named [`Command`]s and dispatches a text
//! line to the matching handler. Handlers follow the usual console contract:
//! they receive `argv` (command name first), write to the console and return
//! `0` or a negative errno-style status.
//!
//! The only command the firmware registers is [`fft_command`], a placeholder
//! that validates and echoes its two numeric arguments.

use core::fmt::Write;
use heapless::Vec;

/// Invalid argument.
pub const EINVAL: i32 = 22;
/// Command not found.
pub const ENOEXEC: i32 = 8;

/// Maximum number of whitespace-separated tokens in one line.
pub const MAX_ARGS: usize = 8;

/// Command handler: `argv` includes the command name.
pub type Handler = fn(argv: &[&str], out: &mut dyn Write) -> i32;

/// A named console command.
#[derive(Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub help: &'static str,
    pub usage: &'static str,
    pub handler: Handler,
}

impl Command {
    /// Creates command.
    pub const fn new(
        name: &'static str,
        help: &'static str,
        usage: &'static str,
        handler: Handler,
    ) -> Self {
        Self {
            name,
            help,
            usage,
            handler,
        }
    }
}

/// Command registration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShellError {
    /// No room for another command.
    Full,
    /// A command with this name is already registered.
    Duplicate(&'static str),
}

impl core::fmt::Display for ShellError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShellError::Full => write!(f, "command table is full"),
            ShellError::Duplicate(name) => write!(f, "command '{}' already registered", name),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShellError {}

/// Fixed-capacity command table.
pub struct Shell<const N: usize> {
    commands: Vec<Command, N>,
}

impl<const N: usize> Shell<N> {
    /// Creates an empty shell. `help` is always available.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Adds a command.
    pub fn register(&mut self, command: Command) -> Result<(), ShellError> {
        if command.name == "help" || self.find(command.name).is_some() {
            return Err(ShellError::Duplicate(command.name));
        }
        self.commands.push(command).map_err(|_| ShellError::Full)
    }

    /// Registered commands, in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Tokenizes `line` and runs the matching command.
    ///
    /// Returns the handler's status, `0` for an empty line, `-ENOEXEC` for an
    /// unknown command and `-EINVAL` when the line has more than
    /// [`MAX_ARGS`] tokens.
    pub fn execute(&self, line: &str, out: &mut dyn Write) -> i32 {
        let mut argv: Vec<&str, MAX_ARGS> = Vec::new();
        for token in line.split_whitespace() {
            if argv.push(token).is_err() {
                let _ = writeln!(out, "too many arguments");
                return -EINVAL;
            }
        }

        let Some(&name) = argv.first() else {
            return 0;
        };

        if name == "help" {
            self.print_help(out);
            return 0;
        }

        match self.find(name) {
            Some(command) => (command.handler)(&argv, out),
            None => {
                let _ = writeln!(out, "{}: command not found", name);
                -ENOEXEC
            }
        }
    }

    fn find(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    fn print_help(&self, out: &mut dyn Write) {
        let _ = writeln!(out, "Available commands:");
        let _ = writeln!(out, "  help: list commands");
        for command in &self.commands {
            let _ = writeln!(out, "  {}: {}", command.name, command.help);
        }
    }
}

impl<const N: usize> Default for Shell<N> {
    fn default() -> Self {
        Self::new()
    }
}

const FFT_USAGE: &str = "usage: fft <arg1> <arg2>";

/// The `fft` placeholder command.
pub fn fft_command() -> Command {
    Command::new("fft", "placeholder FFT entry point", FFT_USAGE, cmd_fft)
}

// No transform is computed; the arguments are parsed and printed back.
fn cmd_fft(argv: &[&str], out: &mut dyn Write) -> i32 {
    if argv.len() != 3 {
        let _ = writeln!(out, "{}", FFT_USAGE);
        return -EINVAL;
    }

    let (Ok(first), Ok(second)) = (argv[1].parse::<f32>(), argv[2].parse::<f32>()) else {
        let _ = writeln!(out, "{}", FFT_USAGE);
        return -EINVAL;
    };

    let _ = writeln!(out, "{:.2} {:.2}", first, second);
    0
}
