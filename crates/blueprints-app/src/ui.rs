//! UI components using egui.
//!
//! The search panel (author input, candidate table, point total) is plain
//! egui. The display dialog is split: its card and canvas are painted by
//! Vello underneath, egui only adds the title and the close button on top.

use blueprints_core::{StatusMessage, ViewState};
use egui::{Align2, Color32, Context, CornerRadius, Frame, Margin, Pos2, RichText, Stroke, Vec2};
use kurbo::{Point, Rect, Size};

/// Colors used by the panels.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Failure text
    pub const ERROR: Color32 = Color32::from_rgb(220, 38, 38);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}

/// Space between the dialog card edge and its content.
pub const CARD_PADDING: f64 = 15.0;
/// Corner radius of the dialog card.
pub const CARD_RADIUS: f64 = 10.0;
/// Height reserved above the canvas for the title.
const HEADER_HEIGHT: f64 = 36.0;
/// Height reserved below the canvas for the close button.
const FOOTER_HEIGHT: f64 = 40.0;
/// Width of the search panel.
const PANEL_WIDTH: f32 = 360.0;

/// UI state owned by the widgets themselves.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Contents of the author text field.
    pub author_input: String,
}

impl UiState {
    /// Lookup action for the current input, if there is an author to look up.
    pub fn submit(&self) -> Option<UiAction> {
        let author = self.author_input.trim();
        if author.is_empty() {
            return None;
        }
        Some(UiAction::Lookup(author.to_string()))
    }
}

/// Actions that can be triggered by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Fetch the blueprints of an author.
    Lookup(String),
    /// Open the display dialog for the named blueprint.
    Select(String),
    /// Close the display dialog.
    CloseDisplay,
}

/// Placement of the display dialog, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalLayout {
    /// White card behind the dialog content.
    pub card: Rect,
    /// Drawing surface area.
    pub canvas: Rect,
}

impl ModalLayout {
    /// Center a dialog holding a `canvas`-sized surface on a `screen`-sized window.
    ///
    /// On a window too small for the card the card is pinned to the top-left
    /// corner instead of going off-screen there.
    pub fn new(screen: Size, canvas: Size) -> Self {
        let card_size = Size::new(
            canvas.width + 2.0 * CARD_PADDING,
            canvas.height + 2.0 * CARD_PADDING + HEADER_HEIGHT + FOOTER_HEIGHT,
        );
        let origin = Point::new(
            ((screen.width - card_size.width) / 2.0).max(0.0).round(),
            ((screen.height - card_size.height) / 2.0).max(0.0).round(),
        );
        let card = Rect::from_origin_size(origin, card_size);
        let canvas = Rect::from_origin_size(
            Point::new(card.x0 + CARD_PADDING, card.y0 + CARD_PADDING + HEADER_HEIGHT),
            canvas,
        );
        Self { card, canvas }
    }

    /// Top-left of the title.
    pub fn title_pos(&self) -> Point {
        Point::new(self.canvas.x0, self.card.y0 + CARD_PADDING)
    }

    /// Top-left of the button row.
    pub fn footer_pos(&self) -> Point {
        Point::new(self.canvas.x0, self.canvas.y1 + CARD_PADDING / 2.0)
    }
}

fn to_pos(point: Point) -> Pos2 {
    Pos2::new(point.x as f32, point.y as f32)
}

fn to_egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_max(to_pos(rect.origin()), Pos2::new(rect.x1 as f32, rect.y1 as f32))
}

/// Render all UI and return any triggered action.
pub fn render_ui(
    ctx: &Context,
    ui_state: &mut UiState,
    view: &ViewState,
    busy: bool,
    layout: &ModalLayout,
) -> Option<UiAction> {
    let search_action = render_search_panel(ctx, ui_state, view, busy);
    let dialog_action = if view.is_display_open() {
        render_display_dialog(ctx, view, layout)
    } else {
        None
    };

    // The dialog is modal, so its action wins.
    dialog_action.or(search_action)
}

/// Common panel frame style.
fn panel_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(8))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::same(12))
}

/// Author input, status line, candidate table and point total.
fn render_search_panel(
    ctx: &Context,
    ui_state: &mut UiState,
    view: &ViewState,
    busy: bool,
) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(egui::Id::new("search_panel"))
        .anchor(Align2::LEFT_TOP, Vec2::new(16.0, 16.0))
        .order(egui::Order::Middle)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_width(PANEL_WIDTH);
                ui.add_enabled_ui(!view.is_display_open(), |ui| {
                    ui.label(RichText::new("Blueprints").size(18.0).strong().color(theme::TEXT));
                    ui.add_space(8.0);

                    ui.horizontal(|ui| {
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut ui_state.author_input)
                                .hint_text("Author name")
                                .desired_width(200.0),
                        );
                        let submitted =
                            response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        if ui.button("Get blueprints").clicked() || submitted {
                            action = ui_state.submit();
                        }
                        if busy {
                            ui.spinner();
                        }
                    });

                    if let Some(status) = view.status() {
                        ui.add_space(6.0);
                        status_label(ui, status);
                    }

                    if !view.blueprints().is_empty() {
                        ui.add_space(10.0);
                        ui.label(
                            RichText::new(format!("Author: {}", view.author()))
                                .size(15.0)
                                .strong()
                                .color(theme::TEXT),
                        );
                        ui.add_space(4.0);
                        if let Some(name) = blueprint_table(ui, view) {
                            action = Some(UiAction::Select(name));
                        }
                        ui.add_space(8.0);
                        ui.label(
                            RichText::new(format!("Total points: {}", view.total_points()))
                                .strong()
                                .color(theme::TEXT),
                        );
                    }
                });
            });
        });

    action
}

fn status_label(ui: &mut egui::Ui, status: &StatusMessage) {
    let color = if status.is_failure() { theme::ERROR } else { theme::TEXT_MUTED };
    ui.label(RichText::new(status.text()).color(color));
}

/// Name / point count / view button per candidate. Returns the name whose
/// button was clicked.
fn blueprint_table(ui: &mut egui::Ui, view: &ViewState) -> Option<String> {
    let mut clicked = None;
    egui::Grid::new("blueprint_table")
        .num_columns(3)
        .striped(true)
        .spacing(Vec2::new(24.0, 6.0))
        .show(ui, |ui| {
            ui.label(RichText::new("Name").strong().color(theme::TEXT));
            ui.label(RichText::new("Points").strong().color(theme::TEXT));
            ui.label(RichText::new("Blueprint").strong().color(theme::TEXT));
            ui.end_row();

            for blueprint in view.blueprints() {
                ui.label(RichText::new(&blueprint.name).color(theme::TEXT));
                ui.label(RichText::new(blueprint.len().to_string()).color(theme::TEXT));
                if ui.button("View").clicked() {
                    clicked = Some(blueprint.name.clone());
                }
                ui.end_row();
            }
        });
    clicked
}

/// Title, close button and click-outside backdrop of the display dialog.
fn render_display_dialog(ctx: &Context, view: &ViewState, layout: &ModalLayout) -> Option<UiAction> {
    let mut action = None;

    // Backdrop: the dimming itself is painted under the card by Vello.
    egui::Area::new(egui::Id::new("display_backdrop"))
        .fixed_pos(Pos2::ZERO)
        .order(egui::Order::Background)
        .show(ctx, |ui| {
            let screen_rect = ctx.input(|i| i.content_rect());
            let response = ui.allocate_rect(screen_rect, egui::Sense::click());
            if response.clicked() {
                let outside = response
                    .interact_pointer_pos()
                    .is_some_and(|pos| !to_egui_rect(layout.card).contains(pos));
                if outside {
                    action = Some(UiAction::CloseDisplay);
                }
            }
        });

    let title = view.selected().map(|b| b.name.as_str()).unwrap_or_default();
    egui::Area::new(egui::Id::new("display_title"))
        .fixed_pos(to_pos(layout.title_pos()))
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(RichText::new(title).size(18.0).strong().color(theme::TEXT));
        });

    egui::Area::new(egui::Id::new("display_footer"))
        .fixed_pos(to_pos(layout.footer_pos()))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            if ui.button("Close").clicked() {
                action = Some(UiAction::CloseDisplay);
            }
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        action = Some(UiAction::CloseDisplay);
    }

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_trims_author() {
        let state = UiState {
            author_input: "  john ".to_string(),
        };
        assert_eq!(state.submit(), Some(UiAction::Lookup("john".to_string())));
    }

    #[test]
    fn test_submit_blank_author() {
        assert_eq!(UiState::default().submit(), None);
        let state = UiState {
            author_input: "   ".to_string(),
        };
        assert_eq!(state.submit(), None);
    }

    #[test]
    fn test_modal_layout_centered() {
        let layout = ModalLayout::new(Size::new(1200.0, 900.0), Size::new(600.0, 500.0));
        assert_eq!(layout.canvas.size(), Size::new(600.0, 500.0));
        let left = layout.card.x0;
        let right = 1200.0 - layout.card.x1;
        assert!((left - right).abs() <= 1.0);
        let top = layout.card.y0;
        let bottom = 900.0 - layout.card.y1;
        assert!((top - bottom).abs() <= 1.0);
    }

    #[test]
    fn test_modal_layout_canvas_inside_card() {
        let layout = ModalLayout::new(Size::new(1024.0, 720.0), Size::new(600.0, 500.0));
        assert!(layout.card.contains(layout.canvas.origin()));
        assert!(layout.canvas.x1 <= layout.card.x1 && layout.canvas.y1 <= layout.card.y1);
        assert!(layout.title_pos().y < layout.canvas.y0);
        assert!(layout.footer_pos().y > layout.canvas.y1);
        assert!(layout.footer_pos().y < layout.card.y1);
    }

    #[test]
    fn test_modal_layout_small_window_pinned() {
        let layout = ModalLayout::new(Size::new(300.0, 200.0), Size::new(600.0, 500.0));
        assert_eq!(layout.card.origin(), Point::ZERO);
        assert_eq!(layout.canvas.origin(), Point::new(CARD_PADDING, CARD_PADDING + HEADER_HEIGHT));
    }
}
