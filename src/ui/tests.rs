use super::*;
use crate::app::{Message, Model, update};
use crate::blocks::{Block, BlockStore, Field};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::style::Modifier;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn draw(model: &mut Model) -> (String, Terminal<TestBackend>) {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    let content: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect();
    (content, terminal)
}

fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
    let buffer = terminal.backend().buffer();
    (0..buffer.area.width)
        .map(|x| buffer[(x, row)].symbol())
        .collect()
}

#[test]
fn test_render_default_session() {
    let mut model = Model::default();
    let (content, _) = draw(&mut model);
    assert!(content.contains("Viagem à Lua"));
    assert!(content.contains("Bloco 1"));
    assert!(content.contains("Escolha a voz..."));
    assert!(content.contains("Azul"));
    assert!(content.contains("Digite o texto narrado..."));
    assert!(content.contains("[Remover Bloco]"));
    assert!(content.contains("[+ Adicionar Bloco]"));
    assert!(content.contains("[Mostrar Estrutura dos Blocos]"));
}

#[test]
fn test_render_records_layout_on_model() {
    let mut model = Model::new("t", (40, 10));
    let (_, _) = draw(&mut model);
    assert_eq!(model.width, 80);
    assert_eq!(model.height, 24);
    assert_eq!(model.layout.slots.len(), 1);
    assert_eq!(model.layout.slots[0].area.y, 1);
}

#[test]
fn test_render_block_contents_in_order() {
    let store = BlockStore::from_blocks(vec![
        Block {
            voice: "voz2".to_string(),
            text: "Era uma vez".to_string(),
            color: "#DC3545".to_string(),
        },
        Block {
            text: "linha 1\nlinha 2\nlinha 3".to_string(),
            ..Block::default()
        },
    ]);
    let mut model = Model::default().with_store(store);
    let (_, terminal) = draw(&mut model);

    // block 0 inner rows 2..4, block 1 inner rows 7..9
    assert!(row_text(&terminal, 2).contains("Voz 2"));
    assert!(row_text(&terminal, 2).contains("Vermelho"));
    assert!(row_text(&terminal, 3).contains("Era uma vez"));
    assert!(row_text(&terminal, 8).contains("linha 1"));
    assert!(row_text(&terminal, 9).contains("linha 2"));
    let all: String = (0..24).map(|r| row_text(&terminal, r)).collect();
    assert!(!all.contains("linha 3"), "only two text rows are shown");
}

#[test]
fn test_render_marks_dragged_block() {
    let mut model = Model::default();
    model = update(model, Message::AddBlock);
    model = update(model, Message::StartDrag(1));
    let (content, terminal) = draw(&mut model);
    assert!(content.contains("Bloco 2 (movendo)"));
    assert!(content.contains("[arrastando]"));

    let border = &terminal.backend().buffer()[(0, 6)];
    assert!(border.modifier.contains(Modifier::DIM));
}

#[test]
fn test_render_empty_sequence_hint() {
    let mut model = update(Model::default(), Message::DeleteBlock(0));
    let (content, _) = draw(&mut model);
    assert!(content.contains("Nenhum bloco"));
    assert!(content.contains("sem blocos"));
}

#[test]
fn test_render_structure_overlay_shows_json() {
    let model = update(
        Model::default(),
        Message::SetField(0, Field::Voice, "voz3".to_string()),
    );
    let mut model = update(model, Message::ShowStructure);
    let (content, _) = draw(&mut model);
    assert!(content.contains("Estrutura dos Blocos"));
    assert!(content.contains("\"voice\": \"voz3\""));
    assert!(content.contains("\"color\": \"#007BFF\""));
}

#[test]
fn test_render_text_editing_places_cursor() {
    let model = update(Model::default(), Message::EditText(0));
    let model = update(model, Message::TextInsert('o'));
    let mut model = update(model, Message::TextInsert('i'));
    let (_, mut terminal) = draw(&mut model);
    assert!(row_text(&terminal, 3).contains("oi"));
    // text field starts at column 1, row 3
    assert_eq!(
        terminal.get_cursor_position().unwrap(),
        ratatui::layout::Position::new(3, 3)
    );
}

#[test]
fn test_render_error_toast_replaces_status() {
    let mut model = update(Model::default(), Message::DeleteBlock(7));
    let (content, _) = draw(&mut model);
    assert!(content.contains("[error] Remove block"));
}

#[test]
fn test_render_help_overlay() {
    let mut model = update(Model::default(), Message::ToggleHelp);
    let (content, _) = draw(&mut model);
    // every section fits the default terminal
    for line in [
        "Select",
        "Edit text",
        "Stop editing",
        "Reorder blocks",
        "Show block structure",
        "Quit (also Ctrl-c)",
        "Toggle help",
        "any key closes",
    ] {
        assert!(content.contains(line), "help is missing {line:?}");
    }
}
