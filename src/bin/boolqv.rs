use boolq::query::fields::FieldSource;
use boolq::query::lexer::{tokenize_with_spans, Token};
use boolq::query::parser::to_treeviz_str;
use boolq::query::processor::MAX_AST_DEPTH;
use boolq::Translator;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "boolqv")]
#[command(about = "Live English rendering of a boolean query as you type it")]
struct Args {
    /// Text to start with in the query box
    #[arg(long, default_value = "")]
    query: String,

    /// Field label table (YAML or JSON). Enables field:value terms.
    #[arg(long, env = "BOOLQ_FIELDS")]
    fields: Option<PathBuf>,

    /// Use the built-in coin catalogue field labels
    #[arg(long)]
    builtin_fields: bool,

    /// Read field:value terms, showing field names as typed
    #[arg(long)]
    field_terms: bool,
}

struct App {
    input: String,
    translator: Translator,
}

impl App {
    fn new(translator: Translator, input: String) -> Self {
        App { input, translator }
    }

    fn english(&self) -> String {
        self.translator.display(&self.input)
    }

    fn tree(&self) -> String {
        let query = self.input.trim();
        if query.is_empty() {
            String::new()
        } else {
            let ast = self.translator.parse(query);
            match ast.depth() {
                depth if depth > MAX_AST_DEPTH => {
                    format!("{} levels deep, too deep to draw", depth)
                }
                _ => to_treeviz_str(&ast),
            }
        }
    }

    /// The query with keywords and parens highlighted and dropped characters dimmed
    fn input_line(&self) -> Line<'_> {
        let dropped = Style::default().fg(Color::DarkGray);
        let mut spans = Vec::new();
        let mut last = 0;

        for (token, range) in tokenize_with_spans(&self.input, self.translator.dialect()) {
            if range.start > last {
                spans.push(Span::styled(&self.input[last..range.start], dropped));
            }
            let style = if token.is_paren() {
                Style::default().fg(Color::Yellow)
            } else if token.keyword().is_some() {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else if matches!(&token, Token::Word(w) if w.contains(':')) {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            spans.push(Span::styled(&self.input[range.clone()], style));
            last = range.end;
        }
        if last < self.input.len() {
            spans.push(Span::styled(&self.input[last..], dropped));
        }

        Line::from(spans)
    }

    fn draw(&self, frame: &mut Frame) {
        let [input_area, english_area, tree_area, help_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let input = Paragraph::new(self.input_line())
            .block(Block::default().borders(Borders::ALL).title("query"));
        frame.render_widget(input, input_area);

        let english = Paragraph::new(self.english())
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("english"));
        frame.render_widget(english, english_area);

        let tree = Paragraph::new(self.tree())
            .block(Block::default().borders(Borders::ALL).title("tree"));
        frame.render_widget(tree, tree_area);

        let help = Paragraph::new("type to edit · Backspace delete · Ctrl-U clear · Esc quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, help_area);

        let typed = u16::try_from(self.input.chars().count()).unwrap_or(u16::MAX);
        let cursor_x = input_area
            .x
            .saturating_add(1)
            .saturating_add(typed)
            .min(input_area.right().saturating_sub(2));
        frame.set_cursor_position((cursor_x, input_area.y + 1));
    }

    /// Apply a key press. Returns true when the app should quit.
    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => return true,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.input.clear(),
            (KeyCode::Backspace, _) => {
                self.input.pop();
            }
            (KeyCode::Char(c), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
            }
            _ => {}
        }
        false
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let source = FieldSource::from_flags(args.fields, args.builtin_fields, args.field_terms);
    let translator = match Translator::from_field_source(&source) {
        Ok(translator) => translator,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let mut app = App::new(translator, args.query);

    // Setup terminal
    enable_raw_mode()?;
    let stdout = io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    terminal.clear()?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        return Err(e);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| {
            app.draw(frame);
        })?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key_event(key) {
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boolq::query::fields::FieldLabels;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn rendered_text(app: &App) -> String {
        let backend = TestBackend::new(60, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_typing_updates_english() {
        let mut app = App::new(Translator::plain(), String::new());
        assert_eq!(app.english(), "");

        type_text(&mut app, "a AND");
        assert_eq!(app.english(), r#""a" and"#);

        type_text(&mut app, " b");
        assert_eq!(app.english(), r#""a" and "b""#);
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut app = App::new(Translator::plain(), "NOT ab".to_string());
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input, "NOT a");
        assert_eq!(app.english(), r#"excluding "a""#);

        app.handle_key_event(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(app.input, "");
        assert_eq!(app.english(), "");
    }

    #[test]
    fn test_shifted_characters_are_typed() {
        let mut app = App::new(Translator::plain(), String::new());
        app.handle_key_event(KeyEvent::new(KeyCode::Char('('), KeyModifiers::SHIFT));
        assert_eq!(app.input, "(");
    }

    #[test]
    fn test_quit_key_event() {
        let mut app = App::new(Translator::plain(), String::new());
        assert!(press(&mut app, KeyCode::Esc));
        assert!(app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.input, "q");
    }

    #[test]
    fn test_input_line_keeps_all_text() {
        let app = App::new(Translator::plain(), "a, (b OR c)!".to_string());
        let line = app.input_line();
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, "a, (b OR c)!");
    }

    #[test]
    fn test_render_to_buffer() {
        let translator = Translator::fielded(FieldLabels::from_pairs([("type", "coin type")]));
        let app = App::new(translator, "type:aureus OR gold".to_string());
        let rendered = rendered_text(&app);

        assert!(rendered.contains(r#"coin type "aureus" or "gold""#));
        assert!(rendered.contains("Term: type:aureus"));
    }

    #[test]
    fn test_tree_empty_for_blank_input() {
        let app = App::new(Translator::plain(), "   ".to_string());
        assert_eq!(app.tree(), "");
    }

    #[test]
    fn test_very_long_input_renders() {
        let input = format!("{}a", "a ".repeat(32_767));
        assert_eq!(input.len(), usize::from(u16::MAX));
        let app = App::new(Translator::plain(), input);
        let rendered = rendered_text(&app);
        assert!(rendered.contains(r#""a" "a""#));
    }

    #[test]
    fn test_deep_query_tree_is_summarised() {
        let app = App::new(Translator::plain(), format!("{}a", "(NOT ".repeat(500)));
        assert_eq!(app.tree(), "501 levels deep, too deep to draw");
        assert!(app.english().starts_with("excluding excluding "));
    }
}
