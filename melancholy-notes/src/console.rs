//! Console front end
//!
//! A line-oriented note list and editor over any async reader/writer pair.
//! Each input line is one command; store failures are reported as an alert
//! line and the session carries on with its in-memory state unchanged.

use crate::error::Result;
use crate::services::{NotesService, Workspace};
use chrono::Local;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const HELP: &str = "\
Commands:
  list              show notes matching the current search
  new               create an empty note and select it
  open <id>         select a note for editing
  title <text>      set the selected note's title
  content <text>    set the selected note's content (\\n for a new line)
  show              print the selected note as being edited
  save              save the selected note
  delete            delete the selected note (asks first)
  search <query>    filter the list; no query clears the filter
  help              show this text
  quit              leave";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    New,
    Open(i64),
    Title(String),
    Content(String),
    Show,
    Save,
    Delete,
    Search(String),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("Not a note id: {0}")]
    BadId(String),
}

impl Command {
    pub fn parse(line: &str) -> std::result::Result<Self, CommandError> {
        let line = line.trim_end_matches(['\r', '\n']).trim_start();
        let (word, rest) = match line.find(char::is_whitespace) {
            Some(at) => (&line[..at], line[at..].trim_start()),
            None => (line, ""),
        };

        match word {
            "" => Err(CommandError::Empty),
            "list" | "ls" => Ok(Command::List),
            "new" => Ok(Command::New),
            "open" => {
                let arg = rest.trim();
                if arg.is_empty() {
                    return Err(CommandError::MissingArgument("open"));
                }
                arg.parse()
                    .map(Command::Open)
                    .map_err(|_| CommandError::BadId(arg.to_string()))
            }
            "title" => Ok(Command::Title(rest.to_string())),
            "content" => Ok(Command::Content(rest.replace("\\n", "\n"))),
            "show" => Ok(Command::Show),
            "save" => Ok(Command::Save),
            "delete" | "rm" => Ok(Command::Delete),
            "search" => Ok(Command::Search(rest.to_string())),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

pub struct Console<R, W> {
    input: R,
    output: W,
    service: NotesService,
    workspace: Workspace,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W, service: NotesService) -> Self {
        Self {
            input,
            output,
            service,
            workspace: Workspace::new(),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Load the note list and process commands until `quit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        if let Err(e) = self.workspace.load(&self.service).await {
            tracing::error!("Loading notes failed: {}", e);
            self.say(&format!("! {}", e)).await?;
        }
        self.print_list().await?;

        while let Some(line) = self.prompt("> ").await? {
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(CommandError::Empty) => continue,
                Err(e) => {
                    self.say(&format!("! {}", e)).await?;
                    continue;
                }
            };

            match self.execute(command).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => {
                    tracing::error!("Command failed: {}", e);
                    self.say(&format!("! {}", e)).await?;
                }
            }
        }

        self.output.flush().await?;
        Ok(())
    }

    async fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::List => self.print_list().await?,
            Command::New => {
                let unsaved = self.unsaved_title();
                let note = self.workspace.new_note(&self.service).await?;
                self.warn_discarded(unsaved).await?;
                self.say(&format!("Created note {}", note.id)).await?;
            }
            Command::Open(id) => {
                let unsaved = self.unsaved_title();
                if self.workspace.select(id) {
                    self.warn_discarded(unsaved).await?;
                    self.print_draft().await?;
                } else {
                    self.say(&format!("No note with id {}", id)).await?;
                }
            }
            Command::Title(text) => {
                if !self.workspace.edit_title(text) {
                    self.say("No note selected").await?;
                }
            }
            Command::Content(text) => {
                if !self.workspace.edit_content(text) {
                    self.say("No note selected").await?;
                }
            }
            Command::Show => self.print_draft().await?,
            Command::Save => self.save().await?,
            Command::Delete => self.delete().await?,
            Command::Search(query) => {
                self.workspace.set_query(query);
                self.print_list().await?;
            }
            Command::Help => self.say(HELP).await?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn save(&mut self) -> Result<()> {
        if self.workspace.draft().is_none() {
            return self.say("No note selected").await;
        }

        match self.workspace.save(&self.service).await? {
            Some(note) => self.say(&format!("Saved \"{}\"", note.title)).await,
            None => self.say("That note no longer exists").await,
        }
    }

    async fn delete(&mut self) -> Result<()> {
        let Some(title) = self.workspace.draft().map(|d| d.title().to_string()) else {
            return self.say("No note selected").await;
        };

        let answer = self
            .prompt(&format!("Delete \"{}\"? [y/N] ", title))
            .await?
            .unwrap_or_default();

        if matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            self.workspace.delete_current(&self.service).await?;
            self.say("Deleted").await
        } else {
            self.say("Kept").await
        }
    }

    /// Title of the selected note if it has edits not yet saved.
    fn unsaved_title(&self) -> Option<String> {
        self.workspace
            .draft()
            .filter(|d| d.is_dirty())
            .map(|d| d.title().to_string())
    }

    async fn warn_discarded(&mut self, unsaved: Option<String>) -> Result<()> {
        match unsaved {
            Some(title) => self.say(&format!("Unsaved changes to \"{}\" discarded", title)).await,
            None => Ok(()),
        }
    }

    async fn print_list(&mut self) -> Result<()> {
        let notes = self.workspace.visible();
        if notes.is_empty() {
            return self.say("(no notes)").await;
        }

        let current = self.workspace.draft().map(|d| d.id());
        let mut text = String::new();
        for note in &notes {
            let marker = if Some(note.id) == current { '*' } else { ' ' };
            text.push_str(&format!(
                "{}{:>4}  {}  [{}]\n        {}\n",
                marker,
                note.id,
                note.title,
                note.modified_at.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                note.preview().replace('\n', " "),
            ));
        }
        self.output.write_all(text.as_bytes()).await?;
        Ok(())
    }

    async fn print_draft(&mut self) -> Result<()> {
        match self.workspace.draft() {
            Some(draft) => {
                let json = serde_json::to_string_pretty(draft).map_err(std::io::Error::from)?;
                self.say(&json).await
            }
            None => self.say("No note selected").await,
        }
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        Ok(())
    }

    /// Print a prompt and read one line; `None` at end of input.
    async fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        self.output.write_all(prompt.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
