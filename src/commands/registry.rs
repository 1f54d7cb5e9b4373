use super::CommandResult;
use crate::core::controller::InteractionController;

pub type CommandHandler = fn(&mut InteractionController, CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub usage: &'static str,
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    /// Everything after the command name, trimmed.
    pub args: &'a str,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        usage: "/help",
        help: "Show available commands.",
        handler: super::handle_help,
    },
    Command {
        name: "clear",
        usage: "/clear",
        help: "Start a fresh conversation.",
        handler: super::handle_clear,
    },
    Command {
        name: "name",
        usage: "/name <name>",
        help: "Set the name shown on your messages. Leave blank to reset it.",
        handler: super::handle_name,
    },
    Command {
        name: "quick",
        usage: "/quick [n]",
        help: "List quick actions, or send quick action n.",
        handler: super::handle_quick,
    },
    Command {
        name: "quit",
        usage: "/quit",
        help: "Leave the chat.",
        handler: super::handle_quit,
    },
];
