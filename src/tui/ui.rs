use crate::cards::Card;
use crate::game::{Stage, TableView};
use crate::session::{HUMAN, OPPONENT};
use crate::tui::app::{AppState, SEAT_NAMES};
use ratatui::prelude::*;
use ratatui::widgets::*;

/// Events shown in the log pane.
const LOG_LINES: usize = 12;

pub fn draw(f: &mut Frame, app: &AppState) {
    let view = app.view();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(7), // opponent
            Constraint::Length(5), // board
            Constraint::Length(7), // you
            Constraint::Min(4),    // log + status
        ])
        .split(f.area());

    let config = app.session().game().config();
    let header = Paragraph::new(Line::from(format!(
        "Hand #{}  Blinds {}/{}  {}  Pot {}  Bet {}",
        view.hand,
        config.small_blind,
        config.big_blind,
        view.stage,
        view.pot,
        view.current_bet,
    )))
    .block(Block::default().title("headsup").borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    draw_seat(f, chunks[1], &view, OPPONENT);
    draw_board(f, chunks[2], &view);
    draw_seat(f, chunks[3], &view, HUMAN);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[4]);
    draw_log(f, bottom[0], &view);
    draw_status(f, bottom[1], app, &view);

    if app.help_open() {
        draw_help(f);
    }
}

fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(rows[1])[1]
}

fn draw_seat(f: &mut Frame, area: Rect, view: &TableView, idx: usize) {
    let seat = &view.seats[idx];
    let mut title = SEAT_NAMES[idx].to_string();
    if idx == view.button {
        title.push_str(" [BTN]");
    }
    if seat.all_in() {
        title.push_str(" [ALL-IN]");
    }
    if view.to_act == Some(idx) {
        title.push_str(" [Act]");
    }
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if seat.folded() {
        block = block.border_style(Style::default().fg(Color::DarkGray));
    } else if view.stage == Stage::HandOver && view.winners.contains(&idx) {
        block = block.border_style(Style::default().fg(Color::Green));
    } else if view.to_act == Some(idx) {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    f.render_widget(block, area);

    let split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(16)])
        .split(inner(area));
    let mut lines = vec![
        Line::from(format!("Stack: {}", seat.chips())),
        Line::from(format!("Bet: {}", seat.bet())),
    ];
    if let Some(category) = view.shown[idx] {
        lines.push(Line::from(Span::styled(
            category.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    } else if seat.folded() {
        lines.push(Line::from(Span::styled("Folded", Style::default().add_modifier(Modifier::DIM))));
    }
    f.render_widget(Paragraph::new(lines), split[0]);

    // opponent cards stay hidden until they are shown down
    let reveal = idx == HUMAN || view.shown[idx].is_some();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(7), Constraint::Length(7)])
        .split(split[1]);
    for (i, area) in cards.iter().enumerate() {
        let card = seat.hole().filter(|_| reveal).map(|h| h[i]);
        let face_down = seat.hole().is_some() && !reveal;
        render_card(f, *area, card, face_down);
    }
}

fn draw_board(f: &mut Frame, area: Rect, view: &TableView) {
    let block = Block::default().title(format!("Board - {}", view.stage)).borders(Borders::ALL);
    let board_inner = inner(area);
    f.render_widget(block, area);
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(7); 5])
        .split(board_inner);
    for (i, slot) in slots.iter().enumerate() {
        render_card(f, *slot, view.board.get(i).copied(), false);
    }
}

fn draw_log(f: &mut Frame, area: Rect, view: &TableView) {
    let lines: Vec<Line> = view
        .events
        .iter()
        .take(LOG_LINES)
        .map(|e| Line::from(e.describe(&SEAT_NAMES)))
        .collect();
    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Log").borders(Borders::ALL));
    f.render_widget(para, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState, view: &TableView) {
    let action_style = |enabled: bool| {
        if enabled {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        }
    };
    let can_act = app.human_to_act();
    let call_label = if view.to_call > 0 { format!("C call {}", view.to_call) } else { "C check".into() };
    let raise_label = match view.raise_bounds {
        Some(b) if can_act => format!("R raise {} ({}-{})", app.raise_amount(), b.min, b.max),
        _ => "R raise".to_string(),
    };
    let mut lines = vec![
        Line::from(app.status_line()),
        Line::from(vec![
            Span::styled("F fold", action_style(can_act)),
            Span::raw(" • "),
            Span::styled(call_label, action_style(can_act)),
        ]),
        Line::from(Span::styled(raise_label, action_style(can_act && view.raise_bounds.is_some()))),
        Line::from(Span::styled(
            "+/- size • N deal • X restart • ? help • Q quit",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    if let Some(err) = app.error() {
        lines.push(Line::from(Span::styled(format!("Error: {err}"), Style::default().fg(Color::Red))));
    }
    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Status").borders(Borders::ALL));
    f.render_widget(para, area);
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let lines = vec![
        Line::from(Span::styled("Table:", Style::default().add_modifier(Modifier::BOLD))),
        Line::from("- N / Space: deal the next hand"),
        Line::from("- F: fold"),
        Line::from("- C / K: check or call"),
        Line::from("- R / Enter: bet or raise the shown amount"),
        Line::from("- + / -: change the amount by one big blind"),
        Line::from("- A: set the amount to all in"),
        Line::from("- X: restart with fresh stacks"),
        Line::from("- Q / Esc: quit"),
        Line::from(""),
        Line::from("One raise per street. Close help: ? or Esc"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn suit_style(card: Card) -> Style {
    if card.suit().is_red() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    }
}

fn render_card(f: &mut Frame, area: Rect, card: Option<Card>, face_down: bool) {
    let block = Block::default().borders(Borders::ALL);
    let inner_area = inner(area);
    f.render_widget(block, area);
    let content = match card {
        Some(c) => Line::from(Span::styled(c.to_string(), suit_style(c))),
        None if face_down => Line::from(Span::styled("##", Style::default().fg(Color::Blue))),
        None => Line::from(""),
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner_area);
}
