use crate::app::{App, Prompt, SettingsDraft};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Line, Modifier, Style, Stylize};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;
use scoresheet_core::{CellView, RowClass, SheetView, VariantChoice};

pub fn draw(frame: &mut Frame, app: &App) {
    let sheet = SheetView::build(&app.session);
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(10),
            Constraint::Length(7),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app, &sheet);
    draw_sheet(frame, root[1], app, &sheet);
    draw_events(frame, root[2], app);

    if app.show_help {
        draw_help_popup(frame);
    }
    match &app.prompt {
        Some(Prompt::Settings(draft)) => draw_settings(frame, draft),
        Some(prompt) => draw_prompt(frame, app, prompt),
        None => {}
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App, sheet: &SheetView) {
    let params = sheet.params;
    let rules = match sheet.variant {
        VariantChoice::Yatzy => format!(
            "{} dice | bonus {} at {}",
            params.dice_count, params.bonus_points, params.bonus_threshold
        ),
        VariantChoice::MiniGolf => format!("{} holes", params.holes),
    };
    let standings = if sheet.hide_totals {
        "totals hidden".to_string()
    } else {
        sheet
            .players
            .iter()
            .filter_map(|player| {
                let totals = player.totals?;
                Some(format!("{} {}", player.name, totals.grand_total))
            })
            .collect::<Vec<_>>()
            .join(" | ")
    };
    let lines = vec![
        Line::from(format!("{} | {}", sheet.title, sheet.variant.label()).bold()),
        Line::from(rules),
        Line::from(standings),
        Line::from(format!("Status: {}", app.status_line)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Scoresheet (? help)");
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn draw_sheet(frame: &mut Frame, area: Rect, app: &App, sheet: &SheetView) {
    let target = app.cursor_target();
    let mut rows = Vec::new();
    let mut selected = None;
    for section in &sheet.sections {
        rows.push(
            Row::new(vec![Cell::from(section.title.clone())])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );
        for row in &section.rows {
            let on_cursor_row = target
                .as_ref()
                .is_some_and(|(sec, name)| *sec == section.section && *name == row.name);
            if on_cursor_row {
                selected = Some(rows.len());
            }
            let label = match row.max_point {
                Some(max) => format!("{} ({max})", row.name),
                None => row.name.clone(),
            };
            let mut cells = vec![Cell::from(label)];
            cells.extend(row.cells.iter().enumerate().map(|(col, cell)| {
                let text = Cell::from(cell_text(cell));
                if on_cursor_row && col == app.cursor_col {
                    text.style(Style::default().fg(Color::Black).bg(Color::Yellow))
                } else {
                    text
                }
            }));
            rows.push(Row::new(cells).style(row_style(row.class())));
        }
    }

    let mut header = vec![Cell::from("")];
    header.extend(
        sheet
            .players
            .iter()
            .map(|player| Cell::from(player.name.clone())),
    );
    let mut widths = vec![Constraint::Length(26)];
    widths.extend(sheet.players.iter().map(|_| Constraint::Length(13)));

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(Block::default().borders(Borders::ALL).title("Sheet"));
    let mut state = TableState::default().with_selected(selected);
    frame.render_stateful_widget(table, area, &mut state);
}

fn cell_text(cell: &CellView) -> String {
    if cell.hidden {
        return "-".to_string();
    }
    match cell.value {
        Some(value) => value.to_string(),
        None if cell.editable => ".".to_string(),
        None => String::new(),
    }
}

fn row_style(class: RowClass) -> Style {
    match class {
        RowClass::Normal => Style::default(),
        RowClass::SectionSubtotal | RowClass::Bonus => Style::default().fg(Color::Gray),
        RowClass::GrandTotal => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    }
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    let block = Block::default().title("Events").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("arrows/hjkl move | tab next player"),
        Line::from("enter edit cell | 0-9 start typing a score"),
        Line::from("empty entry clears a cell, 0 crosses it out"),
        Line::from("r rename player | a add player | x remove last player"),
        Line::from("t hide/show totals | v switch Yatzy/Mini Golf"),
        Line::from("s settings | N new game | q quit | esc close"),
    ];
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_prompt(frame: &mut Frame, app: &App, prompt: &Prompt) {
    let area = centered_rect(60, 25, frame.area());
    frame.render_widget(Clear, area);
    let (title, hint, input) = match prompt {
        Prompt::Score {
            player_id,
            category,
            input,
        } => {
            let name = app
                .session
                .roster
                .get(player_id)
                .map(|player| player.name.as_str())
                .unwrap_or(player_id.as_str());
            (
                format!("{category} for {name}"),
                "Enter=save  Esc=cancel  (empty clears)",
                Some(input.as_str()),
            )
        }
        Prompt::Rename { input, .. } => (
            "Rename player".to_string(),
            "Enter=save  Esc=cancel",
            Some(input.as_str()),
        ),
        Prompt::ConfirmReset => (
            "New game".to_string(),
            "Clear all scores and players? y=yes, any other key cancels",
            None,
        ),
        Prompt::Settings(_) => return,
    };
    let mut lines = vec![Line::from(hint), Line::from("")];
    if let Some(input) = input {
        lines.push(Line::from(format!("> {input}")));
    }
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn draw_settings(frame: &mut Frame, draft: &SettingsDraft) {
    let area = centered_rect(50, 35, frame.area());
    frame.render_widget(Clear, area);
    let mut lines = vec![
        Line::from("up/down select  enter=apply  esc=cancel"),
        Line::from(""),
    ];
    for (idx, (field, value)) in draft.fields.iter().enumerate() {
        let text = format!("{:<18} {value}", field.label());
        if idx == draft.selected {
            lines.push(Line::from(format!(">> {text}")).style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            lines.push(Line::from(format!("   {text}")));
        }
    }
    let block = Block::default()
        .title("Settings")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
