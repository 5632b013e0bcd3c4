//! Rendering
//!
//! Pure draw functions over [`App`]; no state is mutated here. The
//! battle screen mirrors the view-model structure one to one: two
//! combatant panels, a roster strip with one open detail panel per
//! side, the move groups, and the battle log tailing at the bottom.

use maison_protocol::{BoostBlock, InvestmentHypothesis, OpponentInvestment, Stat, StatBlock};
use maison_view::{ActivePanel, BattleView, DetailPanel, HpDisplay, Roster, outcome_line};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::{App, BattleFocus, FormRow, Screen};

const TEXT_MAIN: Color = Color::Rgb(228, 236, 214);
const TEXT_DIM: Color = Color::Rgb(150, 160, 140);
const ACCENT: Color = Color::Rgb(104, 204, 120);
const ACCENT_WARN: Color = Color::Rgb(222, 196, 120);
const ACCENT_ERR: Color = Color::Rgb(220, 96, 96);
const HIGHLIGHT_TEXT: Color = Color::Rgb(16, 26, 18);
const BORDER: Color = Color::Rgb(74, 98, 82);

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    match app.screen {
        Screen::Setup => render_setup(frame, area, app),
        Screen::Battle => render_battle(frame, area, app),
    }
}

fn render_setup(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel_block(" BATTLE SETUP ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let form = &app.form;
    let teams_label = |idx: usize| -> &str {
        if form.loading_teams {
            "loading..."
        } else {
            form.teams.get(idx).map(String::as_str).unwrap_or("-")
        }
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "NEW BATTLE",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        selector_line("Game", form.mode().label(), form.row == FormRow::Mode),
        selector_line(
            "Opponent",
            form.opponent().label(),
            form.row == FormRow::Opponent,
        ),
        selector_line(
            "Your team",
            teams_label(form.player_team_idx),
            form.row == FormRow::PlayerTeam,
        ),
        selector_line(
            "Opponent team",
            teams_label(form.opp_team_idx),
            form.row == FormRow::OppTeam,
        ),
        Line::from(""),
        menu_line("[ Start Battle ]", form.row == FormRow::Submit),
        Line::from(""),
    ];

    if let Some(notice) = &app.notice {
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(ACCENT_ERR),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Up/Down: row  |  Left/Right: change  |  Enter: start  |  Q: quit",
        Style::default().fg(TEXT_DIM),
    )));

    let content = centered(inner, 60, lines.len() as u16);
    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, content);
}

fn render_battle(frame: &mut Frame, area: Rect, app: &App) {
    let Some(view) = app.session.view() else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),  // combatants
            Constraint::Length(9),  // rosters
            Constraint::Length(5),  // moves
            Constraint::Min(4),     // log
            Constraint::Length(1),  // status
        ])
        .split(area);

    let combatants = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[0]);
    render_combatant(frame, combatants[0], " YOU ", &view.player);
    render_combatant(frame, combatants[1], " OPPONENT ", &view.opponent);

    let rosters = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[1]);
    render_roster(
        frame,
        rosters[0],
        "TEAM",
        &view.player_roster,
        app.focus == BattleFocus::PlayerRoster,
    );
    render_roster(
        frame,
        rosters[1],
        "OPPOSING TEAM",
        &view.opponent_roster,
        app.focus == BattleFocus::OppRoster,
    );

    render_moves(frame, layout[2], app, view);
    render_log(frame, layout[3], app);
    render_status(frame, layout[4], app, view);
}

fn render_combatant(frame: &mut Frame, area: Rect, title: &str, panel: &ActivePanel) {
    let block = panel_block(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            panel.species.to_ascii_uppercase(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        hp_line(panel.hp),
    ];
    if let Some(boosts) = format_boosts(&panel.boosts) {
        lines.push(Line::from(Span::styled(
            boosts,
            Style::default().fg(ACCENT_WARN),
        )));
    }

    let paragraph = Paragraph::new(Text::from(lines)).style(Style::default().fg(TEXT_MAIN));
    frame.render_widget(paragraph, inner);
}

fn render_roster(frame: &mut Frame, area: Rect, title: &str, roster: &Roster, focused: bool) {
    let block = panel_block(title).border_style(Style::default().fg(if focused {
        ACCENT
    } else {
        BORDER
    }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Icon strip: the selected member's panel is the open one.
    let mut spans = Vec::new();
    for (idx, entry) in roster.entries().iter().enumerate() {
        spans.push(menu_span(&entry.species, roster.is_visible(idx)));
        spans.push(Span::raw("  "));
    }
    let mut lines = vec![Line::from(spans), Line::from("")];

    if let Some(entry) = roster.visible_entry() {
        lines.extend(detail_lines(&entry.detail));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .style(Style::default().fg(TEXT_MAIN))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

fn detail_lines(detail: &DetailPanel) -> Vec<Line<'static>> {
    match detail {
        DetailPanel::Player {
            stats,
            moves,
            boosts,
        } => {
            let mut lines = vec![
                Line::from(stat_summary(stats)),
                Line::from(format!("Moves: {}", join_or_dash(moves))),
            ];
            if let Some(text) = format_boosts(boosts) {
                lines.push(Line::from(Span::styled(
                    text,
                    Style::default().fg(ACCENT_WARN),
                )));
            }
            lines
        }
        DetailPanel::Opponent {
            revealed_moves,
            investment,
        } => {
            let mut lines = vec![Line::from(format!(
                "Revealed: {}",
                join_or_dash(revealed_moves)
            ))];
            match investment {
                Some(inv) => lines.extend(
                    investment_lines(inv)
                        .into_iter()
                        .map(|text| Line::from(Span::styled(text, Style::default().fg(TEXT_DIM)))),
                ),
                None => lines.push(Line::from(Span::styled(
                    "No stat estimates yet",
                    Style::default().fg(TEXT_DIM),
                ))),
            }
            lines
        }
    }
}

fn render_moves(frame: &mut Frame, area: Rect, app: &App, view: &BattleView) {
    let focused = app.focus == BattleFocus::Moves;
    let block = panel_block(" MOVES ").border_style(Style::default().fg(if focused {
        ACCENT
    } else {
        BORDER
    }));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(moves) = &view.moves else {
        let text = outcome_line(&view.outcome).unwrap_or_else(|| "Battle over".to_string());
        let paragraph = Paragraph::new(Text::from(vec![
            Line::from(Span::styled(
                text,
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "N: new battle  |  Q: quit",
                Style::default().fg(TEXT_DIM),
            )),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, inner);
        return;
    };

    let selected = if focused { Some(app.move_idx) } else { None };
    let lines = vec![
        option_group_line("Attacks:  ", &moves.attacks, 0, selected),
        option_group_line("Switches: ", &moves.switches, moves.attacks.len(), selected),
        Line::from(Span::styled(
            "Left/Right: pick  |  Enter: submit  |  Tab: focus",
            Style::default().fg(TEXT_DIM),
        )),
    ];
    let paragraph = Paragraph::new(Text::from(lines)).style(Style::default().fg(TEXT_MAIN));
    frame.render_widget(paragraph, inner);
}

fn option_group_line(
    label: &str,
    options: &[maison_protocol::MoveOption],
    offset: usize,
    selected: Option<usize>,
) -> Line<'static> {
    let mut spans = vec![Span::styled(
        label.to_string(),
        Style::default().fg(TEXT_DIM),
    )];
    if options.is_empty() {
        spans.push(Span::styled("-".to_string(), Style::default().fg(TEXT_DIM)));
    }
    for (idx, option) in options.iter().enumerate() {
        spans.push(menu_span(&option.label, selected == Some(offset + idx)));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

fn render_log(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel_block(" LOG ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = app
        .session
        .log()
        .entries()
        .iter()
        .flat_map(|entry| entry.lines())
        .map(Line::from)
        .collect();

    // Always tail the newest entries.
    let scroll = (lines.len() as u16).saturating_sub(inner.height);
    let paragraph = Paragraph::new(Text::from(lines))
        .style(Style::default().fg(TEXT_MAIN))
        .scroll((scroll, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App, view: &BattleView) {
    let (text, color) = if let Some(notice) = &app.notice {
        (notice.clone(), ACCENT_ERR)
    } else if app.session.request_pending() {
        ("Waiting for the server...".to_string(), ACCENT_WARN)
    } else if view.finished() {
        (
            outcome_line(&view.outcome).unwrap_or_else(|| "Battle over".to_string()),
            ACCENT,
        )
    } else {
        ("Pick a move.".to_string(), TEXT_DIM)
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color))));
    frame.render_widget(paragraph, area);
}

/// `name  < value >` selector row, poketui-menu style.
fn selector_line(name: &str, value: &str, selected: bool) -> Line<'static> {
    let name_style = if selected {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    };
    Line::from(vec![
        Span::styled(format!("{name:>14}  "), name_style),
        menu_span(&format!("< {value} >"), selected),
    ])
}

fn menu_span(label: &str, selected: bool) -> Span<'static> {
    let style = if selected {
        Style::default()
            .fg(HIGHLIGHT_TEXT)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_MAIN)
    };
    Span::styled(label.to_string(), style)
}

fn menu_line(label: &str, selected: bool) -> Line<'static> {
    Line::from(menu_span(label, selected))
}

fn hp_line(hp: HpDisplay) -> Line<'static> {
    let width: usize = 16;
    let ratio = (hp.percent() / 100.0).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let color = if ratio > 0.5 {
        ACCENT
    } else if ratio > 0.2 {
        ACCENT_WARN
    } else {
        ACCENT_ERR
    };
    let numbers = match hp {
        HpDisplay::Exact { current, max } => {
            format!(" {current}/{max} ({:.1}%)", hp.percent())
        }
        HpDisplay::Percent(pct) => format!(" {pct:.1}%"),
    };
    Line::from(vec![
        Span::raw("HP "),
        Span::styled(
            "█".repeat(filled),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "░".repeat(width.saturating_sub(filled)),
            Style::default().fg(TEXT_DIM),
        ),
        Span::raw(numbers),
    ])
}

fn stat_summary(stats: &StatBlock) -> String {
    format!(
        "Atk {}  Def {}  SpA {}  SpD {}  Spe {}",
        stats.atk, stats.def, stats.spa, stats.spd, stats.spe
    )
}

/// Non-neutral boost stages, e.g. `+2 atk  -1 spe`. `None` when
/// everything is neutral.
fn format_boosts(boosts: &BoostBlock) -> Option<String> {
    if boosts.is_neutral() {
        return None;
    }
    let parts: Vec<String> = Stat::ALL
        .iter()
        .filter(|&&stat| boosts.get(stat) != 0)
        .map(|&stat| format!("{:+} {stat}", boosts.get(stat)))
        .collect();
    Some(parts.join("  "))
}

/// One line per hypothesized stat plus the speed range, verbatim from
/// the engine's numbers. A trailing `+` marks a boosting-nature
/// hypothesis.
fn investment_lines(investment: &OpponentInvestment) -> Vec<String> {
    let mut lines: Vec<String> = investment
        .hypotheses
        .iter()
        .map(|(stat, hypotheses)| format!("{stat}: {}", hypothesis_summary(hypotheses)))
        .collect();
    lines.push(format!(
        "speed: {:.0}-{:.0}",
        investment.spe_range.min, investment.spe_range.max
    ));
    lines
}

fn hypothesis_summary(hypotheses: &[InvestmentHypothesis]) -> String {
    if hypotheses.is_empty() {
        return "-".to_string();
    }
    hypotheses
        .iter()
        .map(|h| {
            if h.positive_nature {
                format!("{}+", h.evs)
            } else {
                h.evs.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn panel_block<'a>(title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .style(Style::default().fg(TEXT_MAIN))
        .border_style(Style::default().fg(BORDER))
}
