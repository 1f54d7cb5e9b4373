mod registry;

pub use registry::{all_commands, CommandInvocation};

use crate::core::controller::InteractionController;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    /// Text for the user that is not part of the conversation.
    Notice(String),
    ProcessAsMessage(String),
    Quit,
}

/// Runs `input` as a slash command when it names one; anything else is
/// handed back to be sent as a message.
pub fn process_input(controller: &mut InteractionController, input: &str) -> CommandResult {
    let trimmed = input.trim();

    if !trimmed.starts_with('/') {
        return CommandResult::ProcessAsMessage(input.to_string());
    }

    let mut parts = trimmed[1..].splitn(2, ' ');
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    if let Some(command) = registry::find_command(command_name) {
        (command.handler)(controller, CommandInvocation { args })
    } else {
        CommandResult::ProcessAsMessage(input.to_string())
    }
}

pub(super) fn handle_help(
    _controller: &mut InteractionController,
    _invocation: CommandInvocation<'_>,
) -> CommandResult {
    let lines: Vec<String> = all_commands()
        .iter()
        .map(|command| format!("  {:<14} {}", command.usage, command.help))
        .collect();
    CommandResult::Notice(format!("Commands:\n{}", lines.join("\n")))
}

pub(super) fn handle_clear(
    controller: &mut InteractionController,
    _invocation: CommandInvocation<'_>,
) -> CommandResult {
    controller.clear();
    CommandResult::Continue
}

pub(super) fn handle_name(
    controller: &mut InteractionController,
    invocation: CommandInvocation<'_>,
) -> CommandResult {
    controller.set_identity(invocation.args);
    match controller.identity() {
        Some(name) => CommandResult::Notice(format!("You are now chatting as {name}.")),
        None => CommandResult::Notice("Name cleared.".to_string()),
    }
}

pub(super) fn handle_quick(
    controller: &mut InteractionController,
    invocation: CommandInvocation<'_>,
) -> CommandResult {
    if invocation.args.is_empty() {
        let lines: Vec<String> = controller
            .quick_actions()
            .iter()
            .enumerate()
            .map(|(index, query)| format!("  {}. {query}", index + 1))
            .collect();
        return CommandResult::Notice(format!("Quick actions:\n{}", lines.join("\n")));
    }

    let position = match invocation.args.parse::<usize>() {
        Ok(position) if position > 0 => position,
        _ => {
            return CommandResult::Notice(format!(
                "Usage: /quick [n], where n is between 1 and {}",
                controller.quick_actions().len()
            ))
        }
    };

    match controller.submit_quick_action(position - 1) {
        Ok(_) => CommandResult::Continue,
        Err(err) => CommandResult::Notice(err.to_string()),
    }
}

pub(super) fn handle_quit(
    _controller: &mut InteractionController,
    _invocation: CommandInvocation<'_>,
) -> CommandResult {
    CommandResult::Quit
}
