mod input;
mod view;

use anyhow::Result;
use blocknav_config::{Config, SelectabilityConfig};
use blocknav_engine::editing::{
    Cmd, Document, DocumentPosition, Editor, Intent, Node, NodeBehaviors, NodeId, Selection,
};
use blocknav_engine::io::{self, IoError};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use input::{Action, key_action};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{env, fs::OpenOptions, io::stdout, path::PathBuf, process};

struct App {
    path: PathBuf,
    editor: Editor,
    dirty: bool,
    status: String,
    /// Where the document was drawn in the last frame, for mouse hits
    content_area: Rect,
}

impl App {
    fn new(path: PathBuf, behaviors: NodeBehaviors) -> Result<Self> {
        let mut document = match io::read_document(&path) {
            Ok(document) => document,
            Err(IoError::NotFound(_)) => {
                log::info!("{} does not exist yet, starting empty", path.display());
                Document::default()
            }
            Err(e) => return Err(e.into()),
        };

        let first = match behaviors.edge_selectable(&document, true) {
            Some(index) => document.node_at(index).map(|node| {
                DocumentPosition::new(node.id.clone(), node.start_position())
            }),
            None => {
                // Nowhere to put the caret: give the user an empty paragraph to type into
                let id = NodeId::generate();
                document.apply(Cmd::InsertNode {
                    index: document.len(),
                    node: Node::paragraph(id.clone(), ""),
                })?;
                Some(DocumentPosition::text(id, 0))
            }
        };

        let mut editor = Editor::new(document, behaviors);
        editor.set_selection(first.map(Selection::collapsed))?;

        Ok(Self {
            path,
            editor,
            dirty: false,
            status: String::new(),
            content_area: Rect::default(),
        })
    }

    fn apply(&mut self, intent: Intent) {
        match self.editor.handle(intent) {
            Ok(Some(patch)) => {
                self.dirty = true;
                self.status = format!(
                    "v{}: {} changed, {} removed",
                    patch.version,
                    patch.changed.len(),
                    patch.removed.len()
                );
            }
            Ok(None) => {}
            Err(e) => {
                log::warn!("edit failed: {e}");
                self.status = format!("Error: {e}");
            }
        }
    }

    fn save(&mut self) {
        match io::write_document(&self.path, self.editor.document()) {
            Ok(()) => {
                self.dirty = false;
                self.status = format!("Saved {}", self.path.display());
            }
            Err(e) => {
                log::error!("save failed: {e}");
                self.status = format!("Error saving: {e}");
            }
        }
    }
}

fn behaviors_from(config: &SelectabilityConfig) -> NodeBehaviors {
    let mut behaviors = NodeBehaviors::new();
    if !config.horizontal_rules {
        behaviors = behaviors.horizontal_rules_selectable(false);
    }
    if !config.images {
        behaviors = behaviors.images_selectable(false);
    }
    behaviors
}

/// Log to a file: the terminal belongs to the editor while it runs
fn init_logging(config: &Config) -> Result<()> {
    let log_path = config
        .log_file
        .clone()
        .unwrap_or_else(|| env::temp_dir().join("blocknav.log"));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    if let Some(level) = &config.log_level {
        builder.parse_filters(level);
    }
    builder
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <file.md>", args[0]);
        process::exit(1);
    }
    let path = PathBuf::from(&args[1]);

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    init_logging(&config)?;
    log::info!("blocknav starting up on {}", path.display());

    let mut app = match App::new(path, behaviors_from(&config.selectability)) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }
    if app.dirty {
        eprintln!("Unsaved changes to {} were discarded", app.path.display());
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key_action(key) {
                Action::Edit(intent) => app.apply(intent),
                Action::Save => app.save(),
                Action::Quit => return Ok(()),
                Action::Ignore => {}
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some(intent) =
                    view::tap_at(&app.editor, app.content_area, mouse.column, mouse.row)
                {
                    app.apply(intent);
                }
            }
            _ => {}
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());
    app.content_area = chunks[0];

    let name = app
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let title = if app.dirty {
        format!("{name} [modified]")
    } else {
        name
    };

    let lines = view::document_lines(&app.editor, chunks[0].width);
    let content =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(content, chunks[0]);

    // Status or help at bottom
    let help_text = if app.status.is_empty() {
        Line::from(vec![
            Span::raw("Esc: Quit | "),
            Span::raw("Ctrl-S: Save | "),
            Span::raw("Shift: Extend | "),
            Span::raw("Alt: Word | "),
            Span::raw("Home/End | Del/Backspace | Enter: Split"),
        ])
    } else {
        Line::from(Span::styled(
            app.status.clone(),
            Style::default().fg(Color::Cyan),
        ))
    };
    f.render_widget(Paragraph::new(vec![help_text]), chunks[1]);
}
