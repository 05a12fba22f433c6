//! Wizard screens
//!
//! One render function per step:
//! - `CategorySelection` - what is being replaced
//! - `ProjectDetails` - size, building type and current product
//! - `ResultsSummary` - headline savings and the contact form
//! - `FullReport` - every figure, assumption and benefit
//! - `Submitted` - confirmation and the follow-up link

use crate::app::{AppState, ContactField, DetailsField};
use crate::engine::SavingsResult;
use crate::format;
use crate::input::TextField;
use crate::theme::{Colors, Styles, UiText};
use crate::types::ProjectCategory;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use url::Url;

fn panel(title: &str, active: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .title_style(if active { Styles::title() } else { Styles::text_secondary() })
        .border_style(if active {
            Styles::border_active()
        } else {
            Styles::border_inactive()
        })
}

fn button(label: &str, enabled: bool) -> Paragraph<'_> {
    let style = if enabled {
        Styles::button_active()
    } else {
        Styles::button_inactive()
    };
    Paragraph::new(Span::styled(label, style)).alignment(Alignment::Center)
}

/// `Label: [value]` with the placeholder muted and focus highlighted
fn field_line<'a>(label: &'a str, value: &'a str, is_placeholder: bool, focused: bool) -> Line<'a> {
    let marker = if focused { "▸ " } else { "  " };
    let value_style = if is_placeholder {
        Styles::text_muted()
    } else if focused {
        Styles::focused()
    } else {
        Styles::text()
    };
    Line::from(vec![
        Span::styled(marker, Styles::focused()),
        Span::styled(format!("{:<26}", label), Styles::text_secondary()),
        Span::styled(format!("[ {} ]", value), value_style),
    ])
}

fn text_field_line<'a>(label: &'a str, field: &'a TextField, focused: bool) -> Line<'a> {
    let mut line = field_line(label, field.display_value(), field.value.is_empty(), focused);
    if focused {
        line.spans.push(Span::styled("▏", Styles::focused()));
    }
    line
}

// ============================================================================
// Step 1: Category Selection
// ============================================================================

fn category_description(category: ProjectCategory) -> &'static str {
    match category {
        ProjectCategory::WetUnderlayment => "Compare OSB + gypcrete against MAXTERRA underlayment",
        ProjectCategory::FullSubfloor => "Compare a competitor subfloor panel against MAXTERRA",
    }
}

pub fn render_category_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(2)])
        .split(area);

    let chosen = state.wizard.selection().category;
    let items: Vec<ListItem> = AppState::categories()
        .into_iter()
        .map(|category| {
            let marker = if chosen == Some(category) { "(●) " } else { "( ) " };
            ListItem::new(vec![
                Line::from(format!("{}{}", marker, category.label())),
                Line::from(Span::styled(
                    format!("    {}", category_description(category)),
                    Styles::text_muted(),
                )),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(panel("What are you looking to replace?", true))
        .highlight_style(Styles::selected());
    let mut list_state = ListState::default();
    list_state.select(Some(state.category_cursor));
    f.render_stateful_widget(list, chunks[0], &mut list_state);

    f.render_widget(button(UiText::BTN_CONTINUE, true), chunks[1]);
}

// ============================================================================
// Step 2: Project Details
// ============================================================================

pub fn render_details_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let selection = state.wizard.selection();
    let fields = state.details_fields();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(fields.len() as u16 * 2 + 3),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(area);

    let mut lines = vec![Line::from("")];
    for field in fields {
        let focused = state.details_focus == *field;
        let line = match field {
            DetailsField::AreaSize => text_field_line(field.label(), &state.area_input, focused),
            DetailsField::BuildingType => {
                let value = selection
                    .building_type
                    .map(|b| b.label())
                    .unwrap_or(UiText::NOT_SELECTED);
                field_line(field.label(), value, selection.building_type.is_none(), focused)
            }
            DetailsField::Comparator => {
                let value = selection
                    .comparison_target
                    .as_deref()
                    .and_then(|id| state.wizard.catalog().get(id))
                    .map(|e| e.display_name.as_str())
                    .unwrap_or(UiText::NOT_SELECTED);
                field_line(field.label(), value, selection.comparison_target.is_none(), focused)
            }
        };
        lines.push(line);
        lines.push(Line::from(""));
    }
    let title = selection
        .category
        .map(|c| c.label())
        .unwrap_or("Project Details");
    f.render_widget(Paragraph::new(lines).block(panel(title, true)), chunks[0]);

    // Context for the focused field
    let hint: Vec<Line> = match state.details_focus {
        DetailsField::Comparator => state
            .wizard
            .catalog()
            .entries()
            .iter()
            .map(|e| {
                let current = selection.comparison_target.as_deref() == Some(e.identifier.as_str());
                Line::from(vec![
                    Span::styled(
                        format!("  {:<16}", e.display_name),
                        if current { Styles::focused() } else { Styles::text() },
                    ),
                    Span::styled(
                        format!("{}/sq ft", format::per_area(e.alternative_cost_per_area)),
                        Styles::text_muted(),
                    ),
                ])
            })
            .collect(),
        DetailsField::BuildingType => vec![Line::from(Span::styled(
            "  Building type is recorded with your report; it does not change the figures.",
            Styles::text_muted(),
        ))],
        DetailsField::AreaSize => vec![Line::from(Span::styled(
            "  Total floor area in square feet. Thousands separators are fine.",
            Styles::text_muted(),
        ))],
    };
    f.render_widget(
        Paragraph::new(hint)
            .block(panel("Details", false))
            .wrap(Wrap { trim: false }),
        chunks[1],
    );

    f.render_widget(
        button(UiText::BTN_CALCULATE, state.wizard.can_calculate()),
        chunks[2],
    );
}

// ============================================================================
// Step 3: Results Summary
// ============================================================================

fn headline_lines(result: &SavingsResult) -> Vec<Line<'static>> {
    let figures = result.figures();
    vec![
        Line::from(Span::styled(
            format::currency(figures.total_savings),
            Styles::savings(),
        )),
        Line::from(Span::styled(
            format!("{}% savings vs {}", figures.percent_savings, figures.comparison_name),
            Styles::text_bold(),
        )),
        Line::from(Span::styled(
            format!(
                "{}/sq ft saved on {}",
                format::per_area(result.savings_per_area()),
                format::area(figures.area_size)
            ),
            Styles::per_area(),
        )),
    ]
}

fn cost_comparison_lines(result: &SavingsResult) -> Vec<Line<'static>> {
    let figures = result.figures();
    let current_label = match result {
        SavingsResult::WetUnderlayment { .. } => "OSB + Gypcrete".to_string(),
        SavingsResult::FullSubfloor { .. } => figures.comparison_name.clone(),
    };
    let row = |label: String, total: u64, per_area: f64, style: Style| {
        Line::from(vec![
            Span::styled(format!("  {:<22}", label), Styles::text_secondary()),
            Span::styled(format!("{:>12}", format::currency(total)), style),
            Span::styled(
                format!("   {}/sq ft", format::per_area(per_area)),
                Styles::text_muted(),
            ),
        ])
    };
    vec![
        row(
            current_label,
            figures.baseline_total_cost,
            figures.baseline_cost_per_area,
            Styles::text(),
        ),
        row(
            "MAXTERRA".to_string(),
            figures.own_total_cost,
            figures.own_cost_per_area,
            Styles::focused(),
        ),
    ]
}

fn calculation_notes(result: &SavingsResult) -> Vec<Line<'static>> {
    let notes: Vec<String> = match result {
        SavingsResult::WetUnderlayment { .. } => vec![
            "OSB + gypcrete: multi-trade, wet installation".to_string(),
            "OSB + MAXTERRA: single trade, dry installation".to_string(),
        ],
        SavingsResult::FullSubfloor {
            spacing_note,
            construction_note,
            ..
        } => spacing_note
            .iter()
            .chain(construction_note.iter())
            .cloned()
            .collect(),
    };
    notes
        .into_iter()
        .map(|n| Line::from(Span::styled(format!("  • {}", n), Styles::text_muted())))
        .collect()
}

pub fn render_results_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(result) = state.wizard.step().result() else {
        return;
    };
    let pending = state.wizard.step().is_pending();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(headline_lines(result))
            .alignment(Alignment::Center)
            .block(panel("Your Potential Savings", true)),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(cost_comparison_lines(result)).block(panel("Cost Comparison", false)),
        chunks[1],
    );
    f.render_widget(
        Paragraph::new(calculation_notes(result))
            .wrap(Wrap { trim: false })
            .block(panel("Calculation Details", false)),
        chunks[2],
    );

    let mut form = vec![Line::from(Span::styled(
        "  Get the complete analysis and a copy by email:",
        Styles::text_secondary(),
    ))];
    for field in ContactField::ALL {
        let input = match field {
            ContactField::FirstName => &state.first_name_input,
            ContactField::LastName => &state.last_name_input,
            ContactField::Email => &state.email_input,
        };
        form.push(text_field_line(
            field.label(),
            input,
            !pending && state.contact_focus == field,
        ));
    }
    form.push(Line::from(""));
    form.push(Line::from(Span::styled(
        if state.wizard.contact().has_email() {
            "  F2 opens the full report"
        } else {
            "  Enter an email to unlock the full report (F2)"
        },
        Styles::text_muted(),
    )));
    f.render_widget(
        Paragraph::new(form).block(panel("Your Details", !pending)),
        chunks[3],
    );

    let (label, enabled) = if pending {
        (UiText::BTN_SUBMITTING, false)
    } else {
        (UiText::BTN_SUBMIT, state.wizard.contact().is_complete())
    };
    f.render_widget(button(label, enabled), chunks[4]);
}

// ============================================================================
// Step 4: Full Report
// ============================================================================

pub fn render_full_report_screen(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(result) = state.wizard.step().result() else {
        return;
    };
    let figures = result.figures();
    let selection = state.wizard.selection();

    let mut lines = headline_lines(result);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Project", Styles::title())));
    lines.push(Line::from(format!("  Replacing: {}", result.category().label())));
    lines.push(Line::from(format!("  With: {}", result.category().replacement())));
    if let Some(building) = selection.building_type {
        lines.push(Line::from(format!("  Building type: {}", building.label())));
    }
    lines.push(Line::from(format!("  Project size: {}", format::area(figures.area_size))));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Cost Comparison", Styles::title())));
    lines.extend(cost_comparison_lines(result));
    if let SavingsResult::WetUnderlayment { .. } = result {
        let baseline = state.wizard.catalog().baseline();
        for (label, breakdown, finish) in [
            ("OSB + Gypcrete", &baseline.current, "Gypcrete"),
            ("OSB + MAXTERRA", &baseline.own, "MAXTERRA underlayment"),
        ] {
            lines.push(Line::from(Span::styled(
                format!(
                    "    {}: OSB {} + {} {} ({})",
                    label,
                    format::per_area(breakdown.substrate),
                    finish,
                    format::per_area(breakdown.finish_layer),
                    breakdown.process
                ),
                Styles::text_muted(),
            )));
        }
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Calculation Details", Styles::title())));
    lines.extend(calculation_notes(result));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Additional Benefits", Styles::title())));
    for benefit in &figures.additional_benefits {
        lines.push(Line::from(vec![
            Span::styled("  ✓ ", Styles::success()),
            Span::styled(benefit.clone(), Styles::text()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(UiText::DISCLAIMER, Styles::text_muted())));
    lines.push(Line::from(Span::styled(
        UiText::CUSTOM_ANALYSIS,
        Style::default().fg(Colors::SECONDARY),
    )));

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(panel("Complete Savings Analysis", true)),
        area,
    );
}

// ============================================================================
// Step 5: Submitted
// ============================================================================

pub fn render_submitted_screen(f: &mut Frame, area: Rect, redirect: &Url) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Your report is on its way.", Styles::savings())),
        Line::from(""),
        Line::from(Span::styled(
            "Continue to the follow-up form to talk to our team:",
            Styles::text_secondary(),
        )),
        Line::from(Span::styled(redirect.to_string(), Styles::info())),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .block(panel("Report Sent", true)),
        area,
    );
}
