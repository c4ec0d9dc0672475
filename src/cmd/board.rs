//! Board session command - `taskboard board`.
//!
//! Reads one command per line, from a script file or stdin. In an attended
//! terminal session errors are reported and the session continues; in a
//! script the first error other than a rejected form aborts the run.

use anyhow::{Context, Result};
use console::style;
use std::io::{BufRead, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use taskboard::board::Board;
use taskboard::component::{ProjectInput, RawInput};
use taskboard::config::BoardToml;
use taskboard::dnd::DropOutcome;
use taskboard::errors::BoardError;
use taskboard::state::{ProjectState, StatusChange};
use taskboard::ui::icons::{CHECK, CROSS, SPARKLE};
use taskboard::ui::{BoardScreen, TerminalForm, short_id, terminal_width};
use taskboard_common::ProjectStatus;

const HELP: &str = "\
Commands:
  add                                  prompt for a new project
  add TITLE | DESCRIPTION | PEOPLE     add a project in one line
  move REF STAGE                       drag card REF onto the STAGE column
  show                                 draw the whole board
  list STAGE                           draw one column
  json                                 print all projects as JSON
  help                                 show this help
  quit                                 leave the board

REF is #N (creation order), a full id, or an id prefix.
STAGE is new_ticket, in_progress or finished.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    Add(Option<RawInput>),
    Move { reference: String, stage: ProjectStatus },
    Show,
    List(ProjectStatus),
    Json,
    Help,
    Quit,
}

fn parse_stage(raw: &str) -> Result<ProjectStatus, BoardError> {
    raw.parse()
        .map_err(|_| BoardError::UnknownStage(raw.trim().to_string()))
}

impl FromStr for BoardCommand {
    type Err = BoardError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        match word.to_lowercase().as_str() {
            "add" if rest.is_empty() => Ok(Self::Add(None)),
            "add" => {
                let parts: Vec<&str> = rest.split('|').collect();
                match parts.as_slice() {
                    [title, description, people] => {
                        Ok(Self::Add(Some(RawInput::new(*title, *description, *people))))
                    }
                    _ => Err(BoardError::BadCommand(
                        "usage: add TITLE | DESCRIPTION | PEOPLE".to_string(),
                    )),
                }
            }
            "move" | "mv" => {
                let (reference, stage) = rest.split_once(char::is_whitespace).ok_or_else(|| {
                    BoardError::BadCommand("usage: move REF STAGE".to_string())
                })?;
                Ok(Self::Move {
                    reference: reference.to_string(),
                    stage: parse_stage(stage)?,
                })
            }
            "show" | "board" => Ok(Self::Show),
            "list" | "ls" if !rest.is_empty() => Ok(Self::List(parse_stage(rest)?)),
            "list" | "ls" => Err(BoardError::BadCommand("usage: list STAGE".to_string())),
            "json" => Ok(Self::Json),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(BoardError::BadCommand(format!(
                "unknown command '{}' (try 'help')",
                word
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A board plus its form and screen, driven by text commands.
pub struct Session<W> {
    board: Board,
    screen: BoardScreen,
    input: ProjectInput<TerminalForm>,
    interactive: bool,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(config: &BoardToml, interactive: bool, out: W) -> Self {
        let store = Arc::new(ProjectState::new());
        let screen = BoardScreen::new();
        let board = Board::new(Arc::clone(&store), &config.board.heading_suffix, |status| {
            screen.renderer(status)
        });
        let input = ProjectInput::new(
            store,
            TerminalForm::new(interactive),
            config.validation.clone(),
        );
        Self {
            board,
            screen,
            input,
            interactive,
            out,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn execute(&mut self, command: BoardCommand) -> Result<Flow, BoardError> {
        match command {
            BoardCommand::Add(values) => {
                if let Some(values) = values {
                    self.input.fields_mut().preset(values);
                }
                let id = self.input.submit()?;
                let title = self
                    .board
                    .store()
                    .get(&id)
                    .map(|p| p.title)
                    .unwrap_or_default();
                self.say(format!(
                    "{}Created {} {}",
                    SPARKLE,
                    short_id(&id.to_string()),
                    title
                ))?;
                self.show_if_interactive()?;
            }
            BoardCommand::Move { reference, stage } => {
                let id = self.board.resolve(&reference)?;
                let message = match self.board.drag_to(&id, stage) {
                    DropOutcome::Applied(StatusChange::Switched { from, to }) => {
                        format!("{}Moved {} {} -> {}", CHECK, short_id(&id.to_string()), from, to)
                    }
                    DropOutcome::Applied(StatusChange::Unchanged) => {
                        format!("{} is already in {}", short_id(&id.to_string()), stage)
                    }
                    DropOutcome::Applied(StatusChange::NotFound) => {
                        return Err(BoardError::ProjectNotFound { reference });
                    }
                    DropOutcome::Rejected => {
                        format!("{}Drop rejected by {}", CROSS, stage)
                    }
                };
                self.say(message)?;
                self.show_if_interactive()?;
            }
            BoardCommand::Show => {
                let drawn = self.screen.draw(terminal_width());
                self.say(drawn)?;
            }
            BoardCommand::List(stage) => {
                let drawn = self.screen.draw_column(stage, terminal_width());
                self.say(drawn)?;
            }
            BoardCommand::Json => {
                let projects = self.board.store().projects();
                let json = serde_json::to_string_pretty(&*projects)
                    .context("Failed to serialize projects")?;
                self.say(json)?;
            }
            BoardCommand::Help => self.say(HELP)?,
            BoardCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn show_if_interactive(&mut self) -> Result<(), BoardError> {
        if self.interactive {
            let drawn = self.screen.draw(terminal_width());
            self.say(drawn)?;
        }
        Ok(())
    }

    fn say(&mut self, text: impl AsRef<str>) -> Result<(), BoardError> {
        writeln!(self.out, "{}", text.as_ref().trim_end()).context("Failed to write output")?;
        Ok(())
    }

    /// Run every command from `source` until it ends or `quit`.
    pub fn run(&mut self, source: impl BufRead) -> Result<()> {
        if self.interactive {
            self.say(format!("{} (type 'help' for commands)", style("taskboard").bold()))?;
        }
        let mut lines = source.lines();
        let mut line_no = 0usize;
        loop {
            if self.interactive {
                write!(self.out, "{} ", style(">").cyan().bold())?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else { break };
            let line = line.context("Failed to read command")?;
            line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('#') {
                continue;
            }

            let result = trimmed
                .parse::<BoardCommand>()
                .and_then(|command| self.execute(command));
            match result {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                // The form has already alerted the user.
                Err(BoardError::Input(_)) => {}
                Err(e) if self.interactive => {
                    eprintln!("{}{}", CROSS, style(&e).red());
                }
                Err(e) => {
                    return Err(anyhow::Error::new(e))
                        .with_context(|| format!("line {}: {}", line_no, trimmed));
                }
            }
        }
        Ok(())
    }
}

pub fn cmd_board(config: &BoardToml, script: Option<&Path>) -> Result<()> {
    let stdout = std::io::stdout();
    match script {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open script: {}", path.display()))?;
            let mut session = Session::new(config, false, stdout.lock());
            session.run(std::io::BufReader::new(file))
        }
        None => {
            let interactive = console::user_attended() && console::Term::stdout().is_term();
            let mut session = Session::new(config, interactive, stdout.lock());
            session.run(std::io::stdin().lock())
        }
    }
}
