#[cfg(test)]
mod ui_render_tests {
    use crate::app::{App, Notice};
    use crate::catalog::Catalog;
    use crate::config::{ColumnMap, SourceConfig};
    use crate::models::{AppState, Mode};
    use crate::ui;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::{Terminal, backend::TestBackend};
    use std::fs;
    use std::path::Path;

    const TREES: &str = "Nummer,Nederlands,Wetenschappelijke naam,Extra info,Afbeelding\n\
                         1,Eik,Quercus robur,Inheems in heel Europa,eik.jpg\n\
                         2,Beuk,Fagus sylvatica,,\n\
                         3,Es,Fraxinus excelsior,,\n\
                         4,Linde,Tilia cordata,,\n\
                         5,Wilg,Salix alba,,\n";

    const GAPPED: &str = "Nummer;Nederlands;Wetenschappelijke naam\n\
                          1;Eik;Quercus robur\n\
                          2;Beuk;Fagus sylvatica\n\
                          3;Es;Fraxinus excelsior\n\
                          10;Linde;Tilia cordata\n\
                          11;Wilg;Salix alba\n";

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn create_test_app(dir: &Path, content: &str) -> App {
        let path = dir.join("Bomen.csv");
        fs::write(&path, content).unwrap();
        let source = SourceConfig {
            name: "Bomen".to_string(),
            path,
            require_extras: false,
            columns: None,
        };
        let catalog = Catalog::new(vec![source], ColumnMap::default());
        App::with_rng(catalog, None, StdRng::seed_from_u64(7))
    }

    fn open_mode(app: &mut App, mode: Mode) {
        app.handle_key(key(KeyCode::Enter));
        let index = Mode::ALL.iter().position(|m| *m == mode).unwrap();
        for _ in 0..index {
            app.handle_key(key(KeyCode::Down));
        }
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Mode(mode));
    }

    fn correct_choice(app: &App) -> usize {
        let question = app.session.as_ref().unwrap().question.as_ref().unwrap();
        question
            .choices()
            .iter()
            .position(|c| *c == question.correct_answer)
            .unwrap()
    }

    fn render(app: &App) -> String {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui::draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_menu_lists_sources_and_modes() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_test_app(dir.path(), TREES);
        let screen = render(&app);

        assert!(screen.contains("Plant Quiz v"));
        assert!(screen.contains("Bomen"));
        assert!(!screen.contains("* Bomen"), "nothing is loaded yet");
        for mode in Mode::ALL {
            assert!(screen.contains(mode.title()), "missing {}", mode.title());
        }
    }

    #[test]
    fn test_menu_marks_loaded_source() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(dir.path(), TREES);
        app.handle_key(key(KeyCode::Enter));

        assert!(render(&app).contains("* Bomen"));
    }

    #[test]
    fn test_browse_shows_names_and_details() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(dir.path(), TREES);
        open_mode(&mut app, Mode::Browse);
        let screen = render(&app);

        assert!(screen.contains("Plant 1 of 5"));
        assert!(screen.contains("Eik"));
        assert!(screen.contains("Quercus robur"));
        assert!(screen.contains("Inheems in heel Europa"));
        assert!(screen.contains("Image: eik.jpg"));

        app.handle_key(key(KeyCode::Right));
        let screen = render(&app);
        assert!(screen.contains("Plant 2 of 5"));
        assert!(screen.contains("Fagus sylvatica"));
        assert!(!screen.contains("Extra info:"));
    }

    #[test]
    fn test_browse_empty_range_warns() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(dir.path(), GAPPED);
        app.initial_bounds = Some((Some(5), Some(8)));
        open_mode(&mut app, Mode::Browse);

        let screen = render(&app);
        assert!(screen.contains("No plants found in range 5-8"));
        assert!(screen.contains("No plants"));
    }

    fn narrow_range(app: &mut App, low: &str, high: &str) {
        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        app.range_editor.low = low.to_string();
        app.range_editor.high = high.to_string();
        app.handle_key(key(KeyCode::Enter));
    }

    #[test]
    fn test_browse_range_emptied_while_browsing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(dir.path(), GAPPED);
        open_mode(&mut app, Mode::Browse);
        assert!(render(&app).contains("Plant 1 of 5"));

        narrow_range(&mut app, "5", "8");
        let screen = render(&app);
        assert!(screen.contains("No plants found in range 5-8"));
        assert!(!screen.contains("Plant 1 of 5"));
        assert!(!screen.contains("Quercus robur"));
    }

    #[test]
    fn test_quiz_range_emptied_mid_question() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(dir.path(), GAPPED);
        open_mode(&mut app, Mode::MultipleChoice);
        let prompt = app.session.as_ref().unwrap().question.as_ref().unwrap().prompt.clone();
        assert!(render(&app).contains(&prompt));

        narrow_range(&mut app, "5", "8");
        let screen = render(&app);
        assert!(!screen.contains(&prompt));
        assert!(screen.contains("No question available."));
        assert!(screen.contains("No plants found in range 5-8"));
        assert!(!screen.contains("Select an option"));
    }

    #[test]
    fn test_list_shows_whole_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(dir.path(), TREES);
        open_mode(&mut app, Mode::ListAll);
        let screen = render(&app);

        assert!(screen.contains("Full plant list: Bomen"));
        assert!(screen.contains("Number of plants in the list: 5"));
        for name in ["Quercus robur", "Fagus sylvatica", "Salix alba"] {
            assert!(screen.contains(name), "missing {}", name);
        }

        app.handle_key(key(KeyCode::Down));
        let screen = render(&app);
        assert!(!screen.contains("Quercus robur"));
        assert!(screen.contains("Salix alba"));
    }

    #[test]
    fn test_multiple_choice_screen() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(dir.path(), TREES);
        open_mode(&mut app, Mode::MultipleChoice);

        let (prompt, options) = {
            let question = app.session.as_ref().unwrap().question.as_ref().unwrap();
            (question.prompt.clone(), question.options.clone())
        };
        let screen = render(&app);
        assert!(screen.contains(&prompt));
        assert!(screen.contains("Select an option"));
        assert!(screen.contains("Streak of correct answers: 0 / 5"));
        for option in &options {
            assert!(screen.contains(option.as_str()), "missing {}", option);
        }
    }

    #[test]
    fn test_multiple_choice_feedback() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(dir.path(), TREES);
        open_mode(&mut app, Mode::MultipleChoice);

        let correct = correct_choice(&app);
        app.handle_key(key(KeyCode::Char(char::from(b'0' + correct as u8))));
        let screen = render(&app);
        assert!(screen.contains("Correct!"));
        assert!(screen.contains("Streak of correct answers: 1 / 5"));

        app.handle_key(key(KeyCode::Enter));
        let correct = correct_choice(&app);
        let wrong = if correct == 1 { 2 } else { 1 };
        let answer = app
            .session
            .as_ref()
            .unwrap()
            .question
            .as_ref()
            .unwrap()
            .correct_answer
            .clone();
        app.handle_key(key(KeyCode::Char(char::from(b'0' + wrong as u8))));

        assert!(matches!(app.notice, Some(Notice::Incorrect { .. })));
        let screen = render(&app);
        assert!(screen.contains("Wrong! The correct answer was"));
        assert!(screen.contains(&answer));
        assert!(screen.contains("Streak of correct answers: 0 / 5"));
    }

    #[test]
    fn test_expert_input_placeholder_and_typing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(dir.path(), TREES);
        open_mode(&mut app, Mode::Expert);

        let screen = render(&app);
        assert!(screen.contains("[Type your answer and press Enter...]"));
        assert!(!screen.contains("Select an option"));

        for c in "Tilia".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        let screen = render(&app);
        assert!(screen.contains("Tilia"));
        assert!(!screen.contains("[Type your answer"));
    }

    #[test]
    fn test_range_editor_popup() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(dir.path(), TREES);
        open_mode(&mut app, Mode::MultipleChoice);
        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert_eq!(app.state, AppState::RangeEdit(Mode::MultipleChoice));

        let screen = render(&app);
        assert!(screen.contains("Select plant range"));
        assert!(screen.contains("Start at plant number"));
        assert!(screen.contains("End at plant number"));
    }

    #[test]
    fn test_quit_confirmation_screen() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(dir.path(), TREES);
        open_mode(&mut app, Mode::Expert);
        app.handle_key(key(KeyCode::Esc));

        let screen = render(&app);
        assert!(screen.contains("Return to main menu?"));
        assert!(screen.contains("Yes (Return to Menu)"));
    }

    #[test]
    fn test_load_error_screen() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = create_test_app(dir.path(), "Nummer,Nederlands\n1,Eik\n");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state, AppState::LoadError);

        let screen = render(&app);
        assert!(screen.contains("Could not load plant list"));
        assert!(screen.contains("Press any key to return to the menu."));
    }
}
